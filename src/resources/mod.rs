//! CPU-side resource definitions: images, textures and materials.

pub mod image;
pub mod material;
pub mod texture;

pub use image::{Image, ImageFormat};
pub use material::{Material, MaterialType, Side};
pub use texture::Texture;
