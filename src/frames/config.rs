use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::frames::slot::SlotBinding;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub slot: String,
    pub object: String,
}

/// Frame setup for one scene build.
///
/// ```json
/// {
///   "slots": [{ "slot": "picture-1", "object": "Canvas 1" }],
///   "reassert_every_frame": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub slots: Vec<SlotEntry>,
    /// Re-apply the desired appearance every update, for hosts whose own
    /// per-frame logic may reset materials.
    pub reassert_every_frame: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            slots: (1..=8)
                .map(|n| SlotEntry {
                    slot: format!("picture-{n}"),
                    object: format!("picture-{n}-image"),
                })
                .collect(),
            reassert_every_frame: false,
        }
    }
}

impl FrameConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Validates the slot list into an immutable binding.
    pub fn binding(&self) -> Result<SlotBinding> {
        let pairs = self.slots.iter().map(|e| (e.slot.as_str(), e.object.as_str()));
        Ok(SlotBinding::new(pairs)?)
    }
}
