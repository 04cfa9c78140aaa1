//! Reconciles the override map against a live scene.
//!
//! Per slot the displayed state moves `Original → Overriding → Overridden`
//! and back to `Original` on clear. While a fetch is in flight the object
//! keeps whatever it showed before. Every fetch carries a ticket; only the
//! slot's latest ticket may land, and only while its locator is still the
//! desired one, so a slow fetch for a superseded locator is dropped.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::assets::spawn_detached;
use crate::errors::AssetError;
use crate::frames::cache::OriginalAppearanceCache;
use crate::frames::resolve::AppearanceLoader;
use crate::frames::slot::{Slot, SlotBinding};
use crate::frames::store::{Locator, OverrideSnapshot};
use crate::scene::SceneAccess;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    Original,
    Overriding,
    Overridden,
}

#[derive(Debug, Clone)]
enum Shown<A> {
    Original,
    Override { locator: Locator, appearance: A },
}

#[derive(Debug, Clone)]
struct Pending {
    locator: Locator,
    ticket: u64,
}

#[derive(Debug, Clone)]
struct SlotState<A> {
    shown: Shown<A>,
    pending: Option<Pending>,
    /// Last locator whose fetch failed; not retried while it stays the
    /// desired locator. Forgotten as soon as another locator is desired.
    failed: Option<Locator>,
}

impl<A> Default for SlotState<A> {
    fn default() -> Self {
        Self {
            shown: Shown::Original,
            pending: None,
            failed: None,
        }
    }
}

impl<A> SlotState<A> {
    fn phase(&self) -> SlotPhase {
        match (&self.pending, &self.shown) {
            (Some(_), _) => SlotPhase::Overriding,
            (None, Shown::Original) => SlotPhase::Original,
            (None, Shown::Override { .. }) => SlotPhase::Overridden,
        }
    }
}

/// A finished fetch travelling back to the frame thread.
struct Resolution<A> {
    slot: Slot,
    ticket: u64,
    locator: Locator,
    result: Result<A, AssetError>,
}

/// A fetch that could not be turned into an appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveFailure {
    pub slot: Slot,
    pub locator: Locator,
    pub error: AssetError,
}

/// Outcome of one [`FramePatcher::reconcile`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Slots whose object is absent from this scene.
    pub missing: Vec<Slot>,
    /// Fetches started by this pass.
    pub started: Vec<(Slot, Locator)>,
    /// Number of objects whose appearance was reassigned.
    pub assigned: usize,
}

/// Outcome of draining completed fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub applied: Vec<(Slot, Locator)>,
    pub failed: Vec<ResolveFailure>,
    /// Results dropped because a newer request or a clear superseded them.
    pub stale: usize,
}

impl ResolveReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty() && self.failed.is_empty() && self.stale == 0
    }

    pub fn merge(&mut self, other: ResolveReport) {
        self.applied.extend(other.applied);
        self.failed.extend(other.failed);
        self.stale += other.stale;
    }
}

/// Slot resolver and patcher.
///
/// Owns the original-appearance cache for the scene it patches; use one
/// patcher per scene instance.
pub struct FramePatcher<L: AppearanceLoader> {
    binding: Arc<SlotBinding>,
    loader: Arc<L>,
    originals: OriginalAppearanceCache<L::Appearance>,
    states: FxHashMap<Slot, SlotState<L::Appearance>>,
    next_ticket: u64,
    tx: flume::Sender<Resolution<L::Appearance>>,
    rx: flume::Receiver<Resolution<L::Appearance>>,
}

impl<L: AppearanceLoader> FramePatcher<L> {
    pub fn new(binding: Arc<SlotBinding>, loader: L) -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            binding,
            loader: Arc::new(loader),
            originals: OriginalAppearanceCache::new(),
            states: FxHashMap::default(),
            next_ticket: 0,
            tx,
            rx,
        }
    }

    #[must_use]
    pub fn binding(&self) -> &SlotBinding {
        &self.binding
    }

    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    #[must_use]
    pub fn originals(&self) -> &OriginalAppearanceCache<L::Appearance> {
        &self.originals
    }

    /// The appearance cached for `object_name` on first sight.
    #[must_use]
    pub fn original(&self, object_name: &str) -> Option<&L::Appearance> {
        self.originals.get(object_name)
    }

    #[must_use]
    pub fn phase(&self, slot: &Slot) -> SlotPhase {
        self.states.get(slot).map_or(SlotPhase::Original, SlotState::phase)
    }

    /// Locator whose appearance the slot currently displays.
    #[must_use]
    pub fn shown_locator(&self, slot: &Slot) -> Option<&Locator> {
        match &self.states.get(slot)?.shown {
            Shown::Original => None,
            Shown::Override { locator, .. } => Some(locator),
        }
    }

    /// True while at least one fetch has not been drained yet.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.states.values().any(|s| s.pending.is_some())
    }

    // ========================================================================
    // Reconciliation
    // ========================================================================

    /// Brings every bound object in line with `overrides`.
    ///
    /// Objects missing from the scene are skipped. Each object's appearance
    /// is captured into the original cache the first time it is found, before
    /// anything is assigned to it. Overrides not yet resolved start a fetch
    /// and leave the object as it is until the fetch lands.
    pub fn reconcile<S>(&mut self, scene: &mut S, overrides: &OverrideSnapshot) -> ReconcileReport
    where
        S: SceneAccess<Appearance = L::Appearance>,
    {
        let mut report = ReconcileReport::default();
        let binding = Arc::clone(&self.binding);

        for (slot, object_name) in binding.iter() {
            let Some(object) = scene.find_by_name(object_name) else {
                log::debug!("Frame `{slot}`: object `{object_name}` not in scene, skipping");
                report.missing.push(slot.clone());
                continue;
            };

            if !self.originals.contains(object_name) {
                match scene.appearance(object) {
                    Some(current) => {
                        self.originals.capture(object_name, current);
                    }
                    None => {
                        log::debug!("Frame `{slot}`: object `{object_name}` has no surface");
                        report.missing.push(slot.clone());
                        continue;
                    }
                }
            }

            let state = self.states.entry(slot.clone()).or_default();
            match overrides.get(slot) {
                None => {
                    state.pending = None;
                    state.failed = None;
                    state.shown = Shown::Original;
                }
                Some(desired) => {
                    if state.failed.as_ref().is_some_and(|failed| failed != desired) {
                        state.failed = None;
                    }
                    let already_shown = matches!(
                        &state.shown,
                        Shown::Override { locator, .. } if locator == desired
                    );
                    let in_flight = state
                        .pending
                        .as_ref()
                        .is_some_and(|p| &p.locator == desired);
                    let known_bad = state.failed.as_ref() == Some(desired);

                    if already_shown || known_bad {
                        state.pending = None;
                    } else if !in_flight {
                        self.next_ticket += 1;
                        let ticket = self.next_ticket;
                        state.pending = Some(Pending {
                            locator: desired.clone(),
                            ticket,
                        });
                        Self::start_fetch(&self.loader, &self.tx, slot.clone(), desired.clone(), ticket);
                        report.started.push((slot.clone(), desired.clone()));
                    }
                }
            }

            if self.assign_target(scene, slot, object, object_name) {
                report.assigned += 1;
            }
        }

        report
    }

    fn start_fetch(
        loader: &Arc<L>,
        tx: &flume::Sender<Resolution<L::Appearance>>,
        slot: Slot,
        locator: Locator,
        ticket: u64,
    ) {
        log::debug!("Frame `{slot}`: resolving {locator} (ticket {ticket})");
        let fetch = loader.load(&locator);
        let tx = tx.clone();
        spawn_detached(async move {
            let result = fetch.await;
            // The patcher may have been dropped meanwhile.
            let _ = tx.send(Resolution {
                slot,
                ticket,
                locator,
                result,
            });
        });
    }

    /// Assigns the slot's target appearance if the object shows something
    /// else. Returns true if it reassigned.
    fn assign_target<S>(&self, scene: &mut S, slot: &Slot, object: S::Object, object_name: &str) -> bool
    where
        S: SceneAccess<Appearance = L::Appearance>,
    {
        let target = match self.states.get(slot).map(|s| &s.shown) {
            Some(Shown::Override { appearance, .. }) => appearance,
            Some(Shown::Original) | None => match self.originals.get(object_name) {
                Some(original) => original,
                None => return false,
            },
        };

        if scene.appearance(object).as_ref() == Some(target) {
            return false;
        }
        scene.set_appearance(object, target.clone())
    }

    // ========================================================================
    // Completed fetches
    // ========================================================================

    /// Applies every fetch that has finished so far. Never blocks.
    pub fn apply_resolved<S>(&mut self, scene: &mut S, overrides: &OverrideSnapshot) -> ResolveReport
    where
        S: SceneAccess<Appearance = L::Appearance>,
    {
        let mut report = ResolveReport::default();
        while let Ok(resolution) = self.rx.try_recv() {
            self.apply_one(scene, overrides, resolution, &mut report);
        }
        report
    }

    /// Waits until at least one fetch finishes, then applies everything that
    /// has finished. Returns immediately if nothing is in flight.
    pub async fn wait_resolved<S>(&mut self, scene: &mut S, overrides: &OverrideSnapshot) -> ResolveReport
    where
        S: SceneAccess<Appearance = L::Appearance>,
    {
        let mut report = ResolveReport::default();
        if !self.has_pending() && self.rx.is_empty() {
            return report;
        }
        if let Ok(first) = self.rx.recv_async().await {
            self.apply_one(scene, overrides, first, &mut report);
        }
        let rest = self.apply_resolved(scene, overrides);
        report.merge(rest);
        report
    }

    /// Waits until no fetch the patcher still cares about is in flight.
    pub async fn settle<S>(&mut self, scene: &mut S, overrides: &OverrideSnapshot) -> ResolveReport
    where
        S: SceneAccess<Appearance = L::Appearance>,
    {
        let mut report = ResolveReport::default();
        while self.has_pending() {
            let step = self.wait_resolved(scene, overrides).await;
            report.merge(step);
        }
        report.merge(self.apply_resolved(scene, overrides));
        report
    }

    fn apply_one<S>(
        &mut self,
        scene: &mut S,
        overrides: &OverrideSnapshot,
        resolution: Resolution<L::Appearance>,
        report: &mut ResolveReport,
    ) where
        S: SceneAccess<Appearance = L::Appearance>,
    {
        let Resolution {
            slot,
            ticket,
            locator,
            result,
        } = resolution;

        let Some(state) = self.states.get_mut(&slot) else {
            report.stale += 1;
            return;
        };
        if !state.pending.as_ref().is_some_and(|p| p.ticket == ticket) {
            log::debug!("Frame `{slot}`: discarding superseded result for {locator}");
            report.stale += 1;
            return;
        }
        state.pending = None;
        if overrides.get(&slot) != Some(&locator) {
            log::debug!("Frame `{slot}`: {locator} is no longer wanted, discarding");
            report.stale += 1;
            return;
        }

        match result {
            Ok(appearance) => {
                state.shown = Shown::Override {
                    locator: locator.clone(),
                    appearance,
                };
                log::info!("Frame `{slot}`: showing {locator}");
                if let Some(object_name) = self.binding.object_name(&slot)
                    && let Some(object) = scene.find_by_name(object_name)
                {
                    self.assign_target(scene, &slot, object, object_name);
                }
                report.applied.push((slot, locator));
            }
            Err(error) => {
                log::warn!("Frame `{slot}`: failed to load {locator}: {error}");
                state.failed = Some(locator.clone());
                report.failed.push(ResolveFailure {
                    slot,
                    locator,
                    error,
                });
            }
        }
    }

    // ========================================================================
    // Re-assertion
    // ========================================================================

    /// Re-applies each slot's current target appearance, for hosts whose own
    /// per-frame logic may reset materials. One comparison per slot when
    /// nothing changed. Returns the number of objects reassigned.
    pub fn reassert<S>(&self, scene: &mut S) -> usize
    where
        S: SceneAccess<Appearance = L::Appearance>,
    {
        let mut assigned = 0;
        for (slot, object_name) in self.binding.iter() {
            if let Some(object) = scene.find_by_name(object_name)
                && self.assign_target(scene, slot, object, object_name)
            {
                assigned += 1;
            }
        }
        assigned
    }
}
