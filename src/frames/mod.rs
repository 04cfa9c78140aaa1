//! Picture-frame overrides.
//!
//! - [`OverrideStore`]: which slot should show which image (user intent)
//! - [`FramePatcher`]: applies that intent to a scene, restoring originals
//! - [`slot_for_target`]: maps a pointer hit to the frame it belongs to
//! - [`Gallery`]: the three bundled for a host's frame loop and panel

pub mod cache;
pub mod config;
pub mod gallery;
pub mod patcher;
pub mod picking;
pub mod resolve;
pub mod slot;
pub mod store;

pub use cache::OriginalAppearanceCache;
pub use config::{FrameConfig, SlotEntry};
pub use gallery::{FrameReport, Gallery};
pub use patcher::{FramePatcher, ReconcileReport, ResolveFailure, ResolveReport, SlotPhase};
pub use picking::{PointerHit, slot_for_target};
pub use resolve::{AppearanceLoader, TextureMaterialLoader};
pub use slot::{Slot, SlotBinding};
pub use store::{Locator, OverrideSnapshot, OverrideStore};
