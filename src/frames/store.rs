use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::frames::slot::Slot;

/// Where an override image comes from: a path, an http(s) URL or a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(Arc<str>);

impl Locator {
    /// Trims surrounding whitespace (pasted URLs often carry a newline).
    /// Returns `None` for a blank locator.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(Arc::from(trimmed)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::assets::server::short_locator(&self.0))
    }
}

/// Immutable view of the override map at one point in time.
///
/// Two snapshots compare equal iff they map the same slots to the same
/// locators. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverrideSnapshot(Arc<BTreeMap<Slot, Locator>>);

impl OverrideSnapshot {
    #[must_use]
    pub fn get(&self, slot: &Slot) -> Option<&Locator> {
        self.0.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &Locator)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// User intent: which slot should show which image.
///
/// Pure in-memory state with no error conditions. Locators are not validated
/// here; an unreachable one surfaces later as a resolution failure.
#[derive(Debug, Clone, Default)]
pub struct OverrideStore {
    overrides: Arc<BTreeMap<Slot, Locator>>,
}

impl OverrideStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins. A blank locator clears the slot.
    pub fn set(&mut self, slot: Slot, locator: &str) {
        match Locator::new(locator) {
            Some(locator) => {
                if self.overrides.get(&slot) != Some(&locator) {
                    Arc::make_mut(&mut self.overrides).insert(slot, locator);
                }
            }
            None => self.clear(&slot),
        }
    }

    pub fn clear(&mut self, slot: &Slot) {
        if self.overrides.contains_key(slot) {
            Arc::make_mut(&mut self.overrides).remove(slot);
        }
    }

    pub fn clear_all(&mut self) {
        if !self.overrides.is_empty() {
            self.overrides = Arc::default();
        }
    }

    #[must_use]
    pub fn get(&self, slot: &Slot) -> Option<&Locator> {
        self.overrides.get(slot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> OverrideSnapshot {
        OverrideSnapshot(Arc::clone(&self.overrides))
    }
}
