use rustc_hash::FxHashMap;

/// First-observed appearance of each scene object, keyed by object name.
///
/// Write-once: an entry is recorded the first time an object is seen and is
/// never replaced or removed afterwards, so restoring always yields the
/// appearance the scene was authored with, however many override cycles ran.
#[derive(Debug, Clone)]
pub struct OriginalAppearanceCache<A> {
    entries: FxHashMap<String, A>,
}

impl<A> Default for OriginalAppearanceCache<A> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<A> OriginalAppearanceCache<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `appearance` for `name` unless an entry already exists.
    /// Returns true if this call stored it.
    pub fn capture(&mut self, name: &str, appearance: A) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(name.to_string(), appearance);
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&A> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
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
