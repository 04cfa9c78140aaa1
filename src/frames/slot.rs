use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::ConfigError;

/// Identifier of one overridable picture frame, e.g. `picture-3`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(Arc<str>);

impl Slot {
    pub(crate) fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slot {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Slot {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Fixed, one-to-one mapping from slots to the scene object carrying each
/// frame's picture surface. Built once; never mutated.
#[derive(Debug, Clone)]
pub struct SlotBinding {
    entries: Vec<(Slot, String)>,
    by_slot: FxHashMap<Slot, usize>,
    by_object: FxHashMap<String, usize>,
}

impl SlotBinding {
    /// Builds a binding from `(slot, object name)` pairs, in display order.
    pub fn new<I, S, O>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, O)>,
        S: AsRef<str>,
        O: AsRef<str>,
    {
        let mut binding = Self {
            entries: Vec::new(),
            by_slot: FxHashMap::default(),
            by_object: FxHashMap::default(),
        };

        for (slot, object) in pairs {
            let slot = slot.as_ref().trim();
            let object = object.as_ref().trim();
            if slot.is_empty() {
                return Err(ConfigError::EmptySlotName);
            }
            if object.is_empty() {
                return Err(ConfigError::EmptyObjectName(slot.to_string()));
            }

            let slot = Slot::new(slot);
            let index = binding.entries.len();
            if binding.by_slot.insert(slot.clone(), index).is_some() {
                return Err(ConfigError::DuplicateSlot(slot.to_string()));
            }
            if binding.by_object.insert(object.to_string(), index).is_some() {
                return Err(ConfigError::DuplicateObject(object.to_string()));
            }
            binding.entries.push((slot, object.to_string()));
        }

        Ok(binding)
    }

    /// `picture-1` … `picture-{count}`, each bound to `picture-N-image`.
    #[must_use]
    pub fn pictures(count: usize) -> Self {
        let pairs = (1..=count).map(|n| (format!("picture-{n}"), format!("picture-{n}-image")));
        Self::new(pairs).expect("generated picture names are unique")
    }

    /// Looks up a configured slot by id.
    #[must_use]
    pub fn slot(&self, id: &str) -> Option<Slot> {
        self.by_slot
            .get_key_value(id)
            .map(|(slot, _)| slot.clone())
    }

    #[must_use]
    pub fn contains(&self, slot: &Slot) -> bool {
        self.by_slot.contains_key(slot)
    }

    #[must_use]
    pub fn object_name(&self, slot: &Slot) -> Option<&str> {
        let index = *self.by_slot.get(slot)?;
        Some(self.entries[index].1.as_str())
    }

    #[must_use]
    pub fn slot_for_object(&self, object_name: &str) -> Option<&Slot> {
        let index = *self.by_object.get(object_name)?;
        Some(&self.entries[index].0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &str)> {
        self.entries.iter().map(|(s, o)| (s, o.as_str()))
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.entries.iter().map(|(s, _)| s)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SlotBinding {
    fn default() -> Self {
        Self::pictures(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pictures_binding_is_ordered() {
        let binding = SlotBinding::pictures(3);
        let ids: Vec<_> = binding.slots().map(Slot::as_str).collect();
        assert_eq!(ids, ["picture-1", "picture-2", "picture-3"]);
        let slot = binding.slot("picture-2").unwrap();
        assert_eq!(binding.object_name(&slot), Some("picture-2-image"));
        assert_eq!(binding.slot_for_object("picture-3-image").unwrap().as_str(), "picture-3");
    }

    #[test]
    fn unknown_slot_is_none() {
        let binding = SlotBinding::pictures(8);
        assert!(binding.slot("picture-9").is_none());
    }

    #[test]
    fn rejects_duplicates_and_blanks() {
        assert_eq!(
            SlotBinding::new([("a", "x"), ("a", "y")]).unwrap_err(),
            ConfigError::DuplicateSlot("a".into())
        );
        assert_eq!(
            SlotBinding::new([("a", "x"), ("b", "x")]).unwrap_err(),
            ConfigError::DuplicateObject("x".into())
        );
        assert_eq!(
            SlotBinding::new([(" ", "x")]).unwrap_err(),
            ConfigError::EmptySlotName
        );
        assert_eq!(
            SlotBinding::new([("a", "")]).unwrap_err(),
            ConfigError::EmptyObjectName("a".into())
        );
    }
}
