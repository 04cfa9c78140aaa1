use slotmap::new_key_type;
use std::sync::Arc;

use crate::assets::ColorSpace;
use crate::assets::io::AssetReaderVariant;
use crate::assets::storage::AssetStorage;
use crate::errors::AssetError;
use crate::resources::image::Image;
use crate::resources::material::Material;
use crate::resources::texture::Texture;

// Strongly-typed handles
new_key_type! {
    pub struct MaterialHandle;
    pub struct TextureHandle;
}

type AssetResult<T> = std::result::Result<T, AssetError>;

/// Shared material and texture pools plus async image loading.
#[derive(Clone, Default)] // lightweight, clones share storage
pub struct AssetServer {
    pub materials: Arc<AssetStorage<MaterialHandle, Material>>,
    pub textures: Arc<AssetStorage<TextureHandle, Texture>>,
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Asynchronously loads a 2D texture from a path, an HTTP(S) URL or a
    /// `data:` URI. A locator already loaded in the same color space returns
    /// the stored texture without fetching again.
    pub async fn load_texture_async(
        &self,
        locator: &str,
        color_space: ColorSpace,
    ) -> AssetResult<TextureHandle> {
        let key = texture_key(locator, color_space);
        if let Some(handle) = self.textures.get_handle_by_key(&key) {
            return Ok(handle);
        }

        let reader = AssetReaderVariant::from_locator(locator)?;
        let filename = AssetReaderVariant::source_filename(locator).to_string();

        // 1. IO: Read bytes
        let bytes = reader.read_bytes().await?;

        // 2. Decode off the frame thread
        let image = Self::decode_image_async(bytes, color_space, filename.clone()).await?;

        // 3. Store (a concurrent load of the same locator may have won)
        let handle = self.textures.add_keyed(&key, Texture::new(&filename, image));
        log::debug!("Loaded texture `{filename}` from {}", short_locator(locator));
        Ok(handle)
    }

    /// Loads a 2D texture from raw bytes (e.g. a dropped file in the browser).
    pub async fn load_texture_from_bytes_async(
        &self,
        name: &str,
        bytes: Vec<u8>,
        color_space: ColorSpace,
    ) -> AssetResult<TextureHandle> {
        let image = Self::decode_image_async(bytes, color_space, name.to_string()).await?;
        Ok(self.textures.add(Texture::new(name, image)))
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Unified image decoding helper (offloads to the blocking pool on native).
    async fn decode_image_async(
        bytes: Vec<u8>,
        color_space: ColorSpace,
        label: String,
    ) -> AssetResult<Image> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            tokio::task::spawn_blocking(move || Self::decode_image_cpu(&bytes, color_space, &label))
                .await?
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::decode_image_cpu(&bytes, color_space, &label)
        }
    }

    /// CPU image decoding logic.
    pub(crate) fn decode_image_cpu(
        bytes: &[u8],
        color_space: ColorSpace,
        label: &str,
    ) -> AssetResult<Image> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::Format(format!("Failed to decode image {label}: {e}")))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Image::new(
            Some(label),
            width,
            height,
            color_space.image_format(),
            rgba.into_raw(),
        ))
    }
}

fn texture_key(locator: &str, color_space: ColorSpace) -> String {
    format!("{color_space:?}:{locator}")
}

/// Data URIs can be megabytes long; keep log lines readable.
pub(crate) fn short_locator(locator: &str) -> &str {
    const MAX: usize = 96;
    if locator.len() <= MAX {
        return locator;
    }
    let mut end = MAX;
    while !locator.is_char_boundary(end) {
        end -= 1;
    }
    &locator[..end]
}
