//! Observer contract for store notifications.
//!
//! Callers register observers directly on the store instead of listening on a
//! process-wide event bus; payloads are typed.

use emap_model::Mapping;
use serde::Serialize;

/// Snapshot of the staged-but-unsaved changes.
///
/// Enough for a front end to toggle its save and discard controls and to
/// render what would be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    /// Pairs staged for addition, in staging order.
    pub pending_adds: Vec<Mapping>,
    /// Pairs staged for removal, in staging order.
    pub pending_removes: Vec<Mapping>,
}

impl ChangeSummary {
    /// True when anything is staged.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.pending_adds.is_empty() || !self.pending_removes.is_empty()
    }
}

/// Callbacks invoked by the store after its state has settled.
///
/// All methods default to no-ops so observers implement only what they need.
pub trait MappingEvents {
    /// The authoritative list was (re)loaded from the server.
    fn on_loaded(&self, mappings: &[Mapping]) {
        let _ = mappings;
    }

    /// A change was staged or un-staged locally.
    fn on_changed(&self, summary: &ChangeSummary) {
        let _ = summary;
    }

    /// Staged changes were confirmed by the server.
    fn on_saved(&self, mappings: &[Mapping]) {
        let _ = mappings;
    }
}
