use crate::resources::image::Image;

/// A decoded image as stored in the texture pool.
#[derive(Debug, Clone)]
pub struct Texture {
    pub name: String,
    pub image: Image,
}

impl Texture {
    #[must_use]
    pub fn new(name: &str, image: Image) -> Self {
        Self {
            name: name.to_string(),
            image,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
