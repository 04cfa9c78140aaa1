use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

// Global Image ID generator
static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Pixel layout of decoded image data. Both variants are 8-bit RGBA; they
/// differ only in how the sampler interprets the stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Surface colors (albedo, photos): stored sRGB-encoded.
    Rgba8UnormSrgb,
    /// Non-color data (normals, roughness): stored as-is.
    Rgba8Unorm,
}

#[derive(Debug)]
pub struct ImageInner {
    pub id: u64,
    label: Cow<'static, str>,

    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,

    /// Tightly packed RGBA rows.
    pub data: Vec<u8>,
}

/// Decoded CPU-side image, shared by reference and compared by identity.
#[derive(Debug, Clone)]
pub struct Image(Arc<ImageInner>);

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}
impl Eq for Image {}
impl std::hash::Hash for Image {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl Image {
    #[must_use]
    pub fn new(
        label: Option<&str>,
        width: u32,
        height: u32,
        format: ImageFormat,
        data: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self(Arc::new(ImageInner {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            label: label.map_or(Cow::Borrowed("Unnamed Image"), |s| {
                Cow::Owned(s.to_string())
            }),
            width,
            height,
            format,
            data,
        }))
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.0.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.0.label
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height
    }

    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.0.format
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.0.data
    }
}

// Deref for convenient read-only access to inner data
impl std::ops::Deref for Image {
    type Target = ImageInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
