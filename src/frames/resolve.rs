use futures::future::BoxFuture;

use crate::assets::{AssetServer, ColorSpace, MaterialHandle};
use crate::errors::AssetError;
use crate::frames::store::Locator;
use crate::resources::Material;

/// Turns a locator into an appearance the scene can display.
///
/// The returned future must not borrow the loader: it is driven in the
/// background and its result is handed back to the frame thread.
pub trait AppearanceLoader: Send + Sync + 'static {
    type Appearance: Clone + PartialEq + Send + 'static;

    fn load(&self, locator: &Locator) -> BoxFuture<'static, Result<Self::Appearance, AssetError>>;
}

/// Fetches the image through the [`AssetServer`], decodes it as sRGB and
/// wraps it in an unlit material showing it as a surface map.
///
/// Materials are stored keyed by locator, so showing a locator again reuses
/// the stored material and storage grows with distinct locators only.
#[derive(Clone)]
pub struct TextureMaterialLoader {
    assets: AssetServer,
}

impl TextureMaterialLoader {
    #[must_use]
    pub fn new(assets: AssetServer) -> Self {
        Self { assets }
    }

    #[must_use]
    pub fn assets(&self) -> &AssetServer {
        &self.assets
    }
}

impl AppearanceLoader for TextureMaterialLoader {
    type Appearance = MaterialHandle;

    fn load(&self, locator: &Locator) -> BoxFuture<'static, Result<MaterialHandle, AssetError>> {
        let assets = self.assets.clone();
        let locator = locator.clone();
        Box::pin(async move {
            if let Some(material) = assets.materials.get_handle_by_key(locator.as_str()) {
                return Ok(material);
            }
            let texture = assets
                .load_texture_async(locator.as_str(), ColorSpace::Srgb)
                .await?;
            let name = assets
                .textures
                .get(texture)
                .map_or_else(|| locator.to_string(), |t| t.name.clone());
            Ok(assets
                .materials
                .add_keyed(locator.as_str(), Material::with_map(&name, texture)))
        })
    }
}
