//! Pending-change tracking for the server's email-map mapping set.
//!
//! The store keeps a `committed` baseline (the set as last confirmed by the
//! server), a `working` view (baseline plus staged adds minus staged
//! removes), and a duplicate-check index derived from the working view. The
//! index is rebuilt wholesale after every mutation; it is never patched in
//! place. Staged changes accumulate locally and are flushed by [`MappingStore::save`]
//! as one batched request.

use std::collections::BTreeMap;

use emap_model::{ChangeSet, Mapping};
use tracing::debug;

use crate::error::StoreError;
use crate::events::{ChangeSummary, MappingEvents};
use crate::transport::EmailMapTransport;

/// Where a pair currently stands relative to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairState {
    /// Confirmed by the server, no pending change.
    Committed,
    /// Staged locally, not yet part of the confirmed set.
    PendingAdd,
    /// Confirmed by the server, staged for deletion.
    PendingRemove,
    /// Not held by the store at all.
    Absent,
}

/// Tracks uncommitted additions and removals of email-header to
/// record-property mappings against the server-confirmed set.
///
/// Operations are synchronous; `load` and `save` block on the injected
/// transport. Every mutating operation takes `&mut self`, so a second save
/// cannot start while one is in flight.
pub struct MappingStore<T> {
    transport: T,
    committed: Vec<Mapping>,
    working: Vec<Mapping>,
    index: BTreeMap<String, Vec<String>>,
    pending_adds: Vec<Mapping>,
    pending_removes: Vec<Mapping>,
    observers: Vec<Box<dyn MappingEvents>>,
}

impl<T: EmailMapTransport> MappingStore<T> {
    /// Create an empty store around a transport. Call [`MappingStore::load`]
    /// before staging changes.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            committed: Vec::new(),
            working: Vec::new(),
            index: BTreeMap::new(),
            pending_adds: Vec::new(),
            pending_removes: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer for load/change/save notifications.
    pub fn register(&mut self, observer: Box<dyn MappingEvents>) {
        self.observers.push(observer);
    }

    /// Fetch the authoritative mapping set from the server.
    ///
    /// On success the confirmed baseline is replaced wholesale, both pending
    /// buffers are cleared, and observers receive the full list. On failure
    /// every piece of state is left exactly as it was.
    pub fn load(&mut self) -> Result<&[Mapping], StoreError> {
        let mappings = self
            .transport
            .fetch_mappings()
            .map_err(StoreError::LoadFailed)?;
        debug!(count = mappings.len(), "loaded mapping set");
        self.committed = mappings;
        self.working = self.committed.clone();
        self.pending_adds.clear();
        self.pending_removes.clear();
        self.rebuild_index();
        for observer in &self.observers {
            observer.on_loaded(&self.working);
        }
        Ok(&self.working)
    }

    /// True iff both sides of the pair are present and `to` is not already
    /// indexed under `from`, pending or committed.
    #[must_use]
    pub fn is_valid_addition(&self, pair: &Mapping) -> bool {
        pair.is_complete() && !self.is_indexed(&pair.from, &pair.to)
    }

    /// Stage an addition.
    ///
    /// Returns `false` with no side effects when the pair is incomplete or
    /// already indexed. Re-adding a pair staged for removal cancels the
    /// removal instead of staging a contradictory add.
    pub fn add(&mut self, pair: Mapping) -> bool {
        if !self.is_valid_addition(&pair) {
            debug!(%pair, "rejected addition");
            return false;
        }
        if let Some(at) = position(&self.pending_removes, &pair) {
            self.pending_removes.remove(at);
            debug!(%pair, "cancelled staged removal");
        } else {
            self.pending_adds.push(pair.clone());
            debug!(%pair, "staged addition");
        }
        self.working.push(pair);
        self.rebuild_index();
        self.notify_changed();
        true
    }

    /// Stage a removal.
    ///
    /// A pair that is only staged as a pending add is simply un-staged: that
    /// is a pure local undo and no removal reaches the server. Otherwise the
    /// pair is staged for deletion and dropped from the working view. The
    /// pair does not have to exist: the server ignores deletes of unknown
    /// mappings, so staging one is permitted. Returns `false` only when the
    /// pair was already staged for removal, i.e. the call changed nothing.
    pub fn remove(&mut self, pair: &Mapping) -> bool {
        if let Some(at) = position(&self.pending_adds, pair) {
            self.pending_adds.remove(at);
            self.drop_from_working(pair);
            debug!(%pair, "un-staged addition");
            self.rebuild_index();
            self.notify_changed();
            return true;
        }
        if position(&self.pending_removes, pair).is_some() {
            return false;
        }
        self.pending_removes.push(pair.clone());
        self.drop_from_working(pair);
        debug!(%pair, "staged removal");
        self.rebuild_index();
        self.notify_changed();
        true
    }

    /// The record properties currently indexed under an email header, each
    /// followed by a comma: `"rma:title,rma:description,"`. Empty string when
    /// the header maps to nothing. Consumers substring-match against this to
    /// disable already-used targets.
    #[must_use]
    pub fn selection_by_key(&self, from: &str) -> String {
        match self.index.get(from) {
            Some(targets) => targets.iter().map(|to| format!("{to},")).collect(),
            None => String::new(),
        }
    }

    /// Flush staged changes as one batched request.
    ///
    /// With nothing staged, no request is made and the current list is
    /// reported as-is. On success the server's returned list becomes the new
    /// baseline and both buffers are cleared; on failure the buffers are kept
    /// so the caller can retry or discard.
    pub fn save(&mut self) -> Result<&[Mapping], StoreError> {
        let changes = ChangeSet::new(self.pending_adds.clone(), self.pending_removes.clone());
        if changes.is_empty() {
            debug!("nothing staged, skipping submit");
            return Ok(&self.working);
        }
        let mappings = self
            .transport
            .submit_changes(&changes)
            .map_err(StoreError::SaveFailed)?;
        debug!(count = mappings.len(), "saved mapping changes");
        self.committed = mappings;
        self.working = self.committed.clone();
        self.pending_adds.clear();
        self.pending_removes.clear();
        self.rebuild_index();
        for observer in &self.observers {
            observer.on_saved(&self.working);
        }
        Ok(&self.working)
    }

    /// Drop every staged change and revert the working view to the last
    /// confirmed baseline. Local only; the server is not contacted.
    pub fn discard(&mut self) {
        self.working = self.committed.clone();
        self.pending_adds.clear();
        self.pending_removes.clear();
        self.rebuild_index();
        self.notify_changed();
    }

    /// Where the pair currently stands relative to the store.
    #[must_use]
    pub fn pair_state(&self, pair: &Mapping) -> PairState {
        if position(&self.pending_adds, pair).is_some() {
            PairState::PendingAdd
        } else if position(&self.pending_removes, pair).is_some() {
            PairState::PendingRemove
        } else if position(&self.committed, pair).is_some() {
            PairState::Committed
        } else {
            PairState::Absent
        }
    }

    /// Current working view: baseline plus staged adds minus staged removes.
    #[must_use]
    pub fn mappings(&self) -> &[Mapping] {
        &self.working
    }

    /// Snapshot of the staged changes.
    #[must_use]
    pub fn summary(&self) -> ChangeSummary {
        ChangeSummary {
            pending_adds: self.pending_adds.clone(),
            pending_removes: self.pending_removes.clone(),
        }
    }

    /// True when anything is staged for submission.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        !self.pending_adds.is_empty() || !self.pending_removes.is_empty()
    }

    fn is_indexed(&self, from: &str, to: &str) -> bool {
        self.index
            .get(from)
            .is_some_and(|targets| targets.iter().any(|t| t == to))
    }

    fn drop_from_working(&mut self, pair: &Mapping) {
        if let Some(at) = position(&self.working, pair) {
            self.working.remove(at);
        }
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for mapping in &self.working {
            self.index
                .entry(mapping.from.clone())
                .or_default()
                .push(mapping.to.clone());
        }
    }

    fn notify_changed(&self) {
        let summary = self.summary();
        for observer in &self.observers {
            observer.on_changed(&summary);
        }
    }
}

fn position(pairs: &[Mapping], pair: &Mapping) -> Option<usize> {
    pairs.iter().position(|candidate| candidate == pair)
}
