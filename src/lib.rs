//! # Gallery
//!
//! Runtime picture swapping for a 3D room scene.
//!
//! A room exported from a design tool contains a handful of picture frames,
//! each a named object in the scene graph. This crate lets a host replace the
//! image shown in any frame with one fetched from a pasted URL, restore the
//! authored image on clear, and map a click on the rendered scene back to the
//! frame that was hit.
//!
//! ```rust,ignore
//! use gallery::{AssetServer, Gallery, SlotBinding, TextureMaterialLoader};
//!
//! let assets = AssetServer::new();
//! let mut gallery = Gallery::new(SlotBinding::pictures(8), TextureMaterialLoader::new(assets));
//!
//! let slot = gallery.slot("picture-2").unwrap();
//! gallery.set(&slot, "https://example.com/cat.png");
//!
//! // every frame
//! gallery.update(&mut scene);
//! ```

pub mod assets;
pub mod errors;
pub mod frames;
pub mod resources;
pub mod scene;

pub use assets::{AssetServer, ColorSpace, MaterialHandle, TextureHandle};
pub use errors::{AssetError, ConfigError, Error, Result};
pub use frames::{
    AppearanceLoader, FrameConfig, FramePatcher, Gallery, Locator, OverrideSnapshot,
    OverrideStore, PointerHit, Slot, SlotBinding, SlotPhase, TextureMaterialLoader,
    slot_for_target,
};
pub use resources::{Image, Material, Texture};
pub use scene::{Mesh, NamedNode, Node, NodeHandle, NodeRef, Scene, SceneAccess};
