//! Store observer that reports progress through `tracing`.

use emap_model::Mapping;
use emap_store::{ChangeSummary, MappingEvents};
use tracing::{debug, info};

/// Logs store notifications; stands in for the save/discard controls a
/// graphical front end would toggle on these events.
pub struct LogObserver;

impl MappingEvents for LogObserver {
    fn on_loaded(&self, mappings: &[Mapping]) {
        info!(count = mappings.len(), "mapping set loaded");
    }

    fn on_changed(&self, summary: &ChangeSummary) {
        debug!(
            pending_adds = summary.pending_adds.len(),
            pending_removes = summary.pending_removes.len(),
            "staged changes updated"
        );
    }

    fn on_saved(&self, mappings: &[Mapping]) {
        info!(count = mappings.len(), "mapping changes saved");
    }
}
