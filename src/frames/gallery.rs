use std::sync::Arc;

use crate::errors::Result;
use crate::frames::config::FrameConfig;
use crate::frames::patcher::{FramePatcher, ReconcileReport, ResolveReport, SlotPhase};
use crate::frames::picking::{PointerHit, slot_for_target};
use crate::frames::resolve::AppearanceLoader;
use crate::frames::slot::{Slot, SlotBinding};
use crate::frames::store::{Locator, OverrideSnapshot, OverrideStore};
use crate::scene::{NamedNode, SceneAccess};

/// What one [`Gallery::update`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Present when the override map changed (or a fetch landed) and a
    /// reconcile pass ran.
    pub reconciled: Option<ReconcileReport>,
    pub resolved: ResolveReport,
    pub reasserted: usize,
}

/// Host-facing session: the override store, the patcher for one scene, and
/// the slot the user currently has selected in the panel.
pub struct Gallery<L: AppearanceLoader> {
    store: OverrideStore,
    patcher: FramePatcher<L>,
    selected: Option<Slot>,
    last_reconciled: Option<OverrideSnapshot>,
    /// Some bound object was absent last pass (scene still streaming in).
    objects_missing: bool,
    reassert_every_frame: bool,
}

impl<L: AppearanceLoader> Gallery<L> {
    pub fn new(binding: SlotBinding, loader: L) -> Self {
        Self {
            store: OverrideStore::new(),
            patcher: FramePatcher::new(Arc::new(binding), loader),
            selected: None,
            last_reconciled: None,
            objects_missing: false,
            reassert_every_frame: false,
        }
    }

    pub fn from_config(config: &FrameConfig, loader: L) -> Result<Self> {
        let mut gallery = Self::new(config.binding()?, loader);
        gallery.reassert_every_frame = config.reassert_every_frame;
        Ok(gallery)
    }

    pub fn set_reassert_every_frame(&mut self, enabled: bool) {
        self.reassert_every_frame = enabled;
    }

    // ========================================================================
    // Panel surface
    // ========================================================================

    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.patcher.binding().slots()
    }

    /// Resolves a slot id typed or clicked in the panel.
    #[must_use]
    pub fn slot(&self, id: &str) -> Option<Slot> {
        self.patcher.binding().slot(id)
    }

    /// Selects a slot. Ids outside the binding clear the selection.
    pub fn select(&mut self, slot: Option<Slot>) {
        self.selected = slot.filter(|s| self.patcher.binding().contains(s));
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Slot> {
        self.selected.as_ref()
    }

    /// Points `slot` at `locator`. Slots outside the binding are ignored.
    pub fn set(&mut self, slot: &Slot, locator: &str) {
        if self.patcher.binding().contains(slot) {
            self.store.set(slot.clone(), locator);
        } else {
            log::warn!("Ignoring override for unknown frame `{slot}`");
        }
    }

    /// Applies `locator` to the selected slot. Returns the slot, if any.
    pub fn apply_to_selected(&mut self, locator: &str) -> Option<Slot> {
        let slot = self.selected.clone()?;
        self.store.set(slot.clone(), locator);
        Some(slot)
    }

    pub fn clear(&mut self, slot: &Slot) {
        self.store.clear(slot);
    }

    pub fn clear_all(&mut self) {
        self.store.clear_all();
    }

    /// Current overrides, for display.
    #[must_use]
    pub fn overrides(&self) -> OverrideSnapshot {
        self.store.snapshot()
    }

    #[must_use]
    pub fn locator(&self, slot: &Slot) -> Option<&Locator> {
        self.store.get(slot)
    }

    #[must_use]
    pub fn phase(&self, slot: &Slot) -> SlotPhase {
        self.patcher.phase(slot)
    }

    #[must_use]
    pub fn patcher(&self) -> &FramePatcher<L> {
        &self.patcher
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Runs once per frame: applies finished fetches, reconciles if the
    /// override map changed since the last pass (or some frame object was not
    /// found yet), and re-asserts when enabled.
    pub fn update<S>(&mut self, scene: &mut S) -> FrameReport
    where
        S: SceneAccess<Appearance = L::Appearance>,
    {
        let snapshot = self.store.snapshot();
        let mut report = FrameReport {
            resolved: self.patcher.apply_resolved(scene, &snapshot),
            ..FrameReport::default()
        };

        // A stale drop can leave a desired locator unfetched.
        let dirty = self.objects_missing
            || self.last_reconciled.as_ref() != Some(&snapshot)
            || !report.resolved.is_empty();
        if dirty {
            let pass = self.patcher.reconcile(scene, &snapshot);
            self.objects_missing = !pass.missing.is_empty();
            report.reconciled = Some(pass);
            self.last_reconciled = Some(snapshot);
        }

        if self.reassert_every_frame {
            report.reasserted = self.patcher.reassert(scene);
        }
        report
    }

    /// Waits for outstanding fetches and applies them.
    pub async fn settle<S>(&mut self, scene: &mut S) -> ResolveReport
    where
        S: SceneAccess<Appearance = L::Appearance>,
    {
        let snapshot = self.store.snapshot();
        self.patcher.settle(scene, &snapshot).await
    }

    /// Maps a pointer hit to a frame and selects it. A miss keeps the
    /// current selection.
    ///
    /// For the bundled [`Scene`](crate::scene::Scene) pass a
    /// [`NodeRef`](crate::scene::NodeRef) as the hit node.
    pub fn handle_pointer<N: NamedNode>(&mut self, hit: PointerHit<N>) -> Option<Slot> {
        let slot = slot_for_target(hit.node, self.patcher.binding())?;
        log::debug!("Picked frame `{slot}` at distance {:.2}", hit.distance);
        self.selected = Some(slot.clone());
        Some(slot)
    }
}
