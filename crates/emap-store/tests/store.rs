use std::cell::{Cell, RefCell};
use std::rc::Rc;

use emap_model::{ChangeSet, Mapping};
use emap_store::{
    ChangeSummary, EmailMapTransport, MappingEvents, MappingStore, PairState, StoreError,
    TransportError,
};

/// In-memory stand-in for the server's email-map endpoint. Applies submitted
/// change sets to its own list the way the real endpoint does.
#[derive(Default)]
struct FakeServer {
    mappings: RefCell<Vec<Mapping>>,
    submissions: RefCell<Vec<ChangeSet>>,
    fail_fetch: Cell<bool>,
    fail_submit: Cell<bool>,
}

impl FakeServer {
    fn with_mappings(mappings: Vec<Mapping>) -> Self {
        Self {
            mappings: RefCell::new(mappings),
            ..Self::default()
        }
    }

    fn submission_count(&self) -> usize {
        self.submissions.borrow().len()
    }
}

impl EmailMapTransport for &FakeServer {
    fn fetch_mappings(&self) -> Result<Vec<Mapping>, TransportError> {
        if self.fail_fetch.get() {
            return Err(TransportError::Network("connection refused".to_string()));
        }
        Ok(self.mappings.borrow().clone())
    }

    fn submit_changes(&self, changes: &ChangeSet) -> Result<Vec<Mapping>, TransportError> {
        if self.fail_submit.get() {
            return Err(TransportError::UnexpectedStatus {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        self.submissions.borrow_mut().push(changes.clone());
        let mut current = self.mappings.borrow_mut();
        if let Some(deletes) = &changes.delete {
            current.retain(|mapping| !deletes.contains(mapping));
        }
        if let Some(adds) = &changes.add {
            current.extend(adds.iter().cloned());
        }
        Ok(current.clone())
    }
}

/// Observer that records every notification it receives.
#[derive(Clone, Default)]
struct Recorder {
    loaded: Rc<RefCell<Vec<usize>>>,
    changed: Rc<RefCell<Vec<ChangeSummary>>>,
    saved: Rc<RefCell<Vec<usize>>>,
}

impl MappingEvents for Recorder {
    fn on_loaded(&self, mappings: &[Mapping]) {
        self.loaded.borrow_mut().push(mappings.len());
    }

    fn on_changed(&self, summary: &ChangeSummary) {
        self.changed.borrow_mut().push(summary.clone());
    }

    fn on_saved(&self, mappings: &[Mapping]) {
        self.saved.borrow_mut().push(mappings.len());
    }
}

fn pair(from: &str, to: &str) -> Mapping {
    Mapping::new(from, to)
}

fn loaded_store(server: &FakeServer) -> MappingStore<&FakeServer> {
    let mut store = MappingStore::new(server);
    store.load().expect("initial load");
    store
}

#[test]
fn load_replaces_state_and_clears_buffers() {
    let server = FakeServer::with_mappings(vec![
        pair("messageSubject", "rma:title"),
        pair("messageFrom", "rma:originator"),
    ]);
    let mut store = MappingStore::new(&server);
    store.add(pair("messageCc", "rma:participants"));

    store.load().expect("load");

    assert!(!store.has_pending_changes());
    assert_eq!(store.mappings().len(), 2);
    assert_eq!(store.selection_by_key("messageSubject"), "rma:title,");
    assert_eq!(store.selection_by_key("messageCc"), "");
}

#[test]
fn valid_addition_requires_complete_unindexed_pair() {
    let server = FakeServer::with_mappings(vec![pair("messageSubject", "rma:title")]);
    let store = loaded_store(&server);

    assert!(store.is_valid_addition(&pair("messageSubject", "rma:description")));
    assert!(!store.is_valid_addition(&pair("messageSubject", "rma:title")));
    assert!(!store.is_valid_addition(&pair("", "rma:title")));
    assert!(!store.is_valid_addition(&pair("messageSubject", "")));
}

#[test]
fn addition_extends_selection_under_same_header() {
    // A second target under the same header is fine; only exact pair
    // duplicates are rejected.
    let server = FakeServer::with_mappings(vec![pair("messageSubject", "rma:title")]);
    let mut store = loaded_store(&server);

    assert!(store.add(pair("messageSubject", "rma:description")));
    assert_eq!(
        store.selection_by_key("messageSubject"),
        "rma:title,rma:description,"
    );
}

#[test]
fn duplicate_addition_is_rejected_without_side_effects() {
    let server = FakeServer::with_mappings(vec![pair("messageSubject", "rma:title")]);
    let mut store = loaded_store(&server);

    assert!(!store.add(pair("messageSubject", "rma:title")));
    assert!(!store.has_pending_changes());
    assert_eq!(store.mappings().len(), 1);
}

#[test]
fn add_then_remove_is_a_pure_local_undo() {
    let server = FakeServer::with_mappings(vec![pair("messageSubject", "rma:title")]);
    let mut store = loaded_store(&server);
    let fresh = pair("messageCc", "rma:participants");

    assert!(store.add(fresh.clone()));
    assert_eq!(store.pair_state(&fresh), PairState::PendingAdd);

    assert!(store.remove(&fresh));
    assert_eq!(store.pair_state(&fresh), PairState::Absent);

    let summary = store.summary();
    assert!(summary.pending_adds.is_empty());
    assert!(summary.pending_removes.is_empty());
    assert_eq!(store.mappings(), [pair("messageSubject", "rma:title")]);

    // Nothing staged, so save must not reach the server.
    store.save().expect("save");
    assert_eq!(server.submission_count(), 0);
}

#[test]
fn removing_committed_pair_stages_a_deletion() {
    let server = FakeServer::with_mappings(vec![pair("messageSubject", "rma:title")]);
    let mut store = loaded_store(&server);
    let committed = pair("messageSubject", "rma:title");

    assert!(store.remove(&committed));
    assert_eq!(store.pair_state(&committed), PairState::PendingRemove);
    assert_eq!(store.selection_by_key("messageSubject"), "");
    assert!(store.mappings().is_empty());

    // Staging the same removal twice changes nothing.
    assert!(!store.remove(&committed));
}

#[test]
fn re_adding_cancels_a_staged_removal() {
    let server = FakeServer::with_mappings(vec![pair("messageSubject", "rma:title")]);
    let mut store = loaded_store(&server);
    let committed = pair("messageSubject", "rma:title");

    store.remove(&committed);
    assert!(store.add(committed.clone()));

    assert_eq!(store.pair_state(&committed), PairState::Committed);
    assert!(!store.has_pending_changes());
    assert_eq!(store.selection_by_key("messageSubject"), "rma:title,");

    store.save().expect("save");
    assert_eq!(server.submission_count(), 0);
}

#[test]
fn removal_of_unknown_pair_is_permitted() {
    let server = FakeServer::with_mappings(vec![pair("messageSubject", "rma:title")]);
    let mut store = loaded_store(&server);
    let unknown = pair("messageTo", "rma:address");

    assert!(store.remove(&unknown));
    assert_eq!(store.pair_state(&unknown), PairState::PendingRemove);

    store.save().expect("save");
    let submitted = &server.submissions.borrow()[0];
    assert_eq!(submitted.delete.as_deref(), Some(&[unknown][..]));
    assert!(submitted.add.is_none());
}

#[test]
fn save_submits_one_batched_request_and_resets_buffers() {
    let server = FakeServer::with_mappings(vec![
        pair("messageSubject", "rma:title"),
        pair("messageFrom", "rma:originator"),
    ]);
    let mut store = loaded_store(&server);
    let added = pair("messageCc", "rma:participants");
    let removed = pair("messageFrom", "rma:originator");

    store.add(added.clone());
    store.remove(&removed);
    store.save().expect("save");

    assert_eq!(server.submission_count(), 1);
    let submitted = &server.submissions.borrow()[0];
    assert_eq!(submitted.add.as_deref(), Some(&[added.clone()][..]));
    assert_eq!(submitted.delete.as_deref(), Some(&[removed.clone()][..]));

    assert!(!store.has_pending_changes());
    assert_eq!(store.pair_state(&added), PairState::Committed);
    assert_eq!(store.pair_state(&removed), PairState::Absent);
    assert_eq!(store.selection_by_key("messageFrom"), "");
}

#[test]
fn failed_load_leaves_state_untouched() {
    let server = FakeServer::with_mappings(vec![pair("messageSubject", "rma:title")]);
    let mut store = loaded_store(&server);
    store.add(pair("messageCc", "rma:participants"));

    server.fail_fetch.set(true);
    let error = store.load().expect_err("load must fail");
    assert!(matches!(error, StoreError::LoadFailed(_)));
    assert!(error.is_retryable());

    // Working view and staged changes survive the failure.
    assert_eq!(store.mappings().len(), 2);
    assert_eq!(store.summary().pending_adds.len(), 1);
}

#[test]
fn failed_first_load_leaves_store_empty() {
    let server = FakeServer::with_mappings(vec![pair("messageSubject", "rma:title")]);
    server.fail_fetch.set(true);
    let mut store = MappingStore::new(&server);

    let error = store.load().expect_err("load must fail");
    assert!(matches!(error, StoreError::LoadFailed(_)));
    assert!(store.mappings().is_empty());
    assert!(!store.has_pending_changes());
}

#[test]
fn failed_save_keeps_staged_changes() {
    let server = FakeServer::with_mappings(vec![pair("messageSubject", "rma:title")]);
    let mut store = loaded_store(&server);
    let added = pair("messageCc", "rma:participants");
    store.add(added.clone());

    server.fail_submit.set(true);
    let error = store.save().expect_err("save must fail");
    assert!(matches!(error, StoreError::SaveFailed(_)));

    assert_eq!(store.pair_state(&added), PairState::PendingAdd);
    assert!(store.has_pending_changes());

    // Retry succeeds once the server recovers.
    server.fail_submit.set(false);
    store.save().expect("retry");
    assert_eq!(store.pair_state(&added), PairState::Committed);
}

#[test]
fn discard_reverts_to_the_confirmed_baseline() {
    let server = FakeServer::with_mappings(vec![pair("messageSubject", "rma:title")]);
    let mut store = loaded_store(&server);

    store.add(pair("messageCc", "rma:participants"));
    store.remove(&pair("messageSubject", "rma:title"));
    store.discard();

    assert!(!store.has_pending_changes());
    assert_eq!(store.mappings(), [pair("messageSubject", "rma:title")]);
    assert_eq!(store.selection_by_key("messageSubject"), "rma:title,");
    assert_eq!(server.submission_count(), 0);
}

#[test]
fn selection_reflects_only_indexed_targets() {
    let server = FakeServer::with_mappings(vec![
        pair("messageSubject", "rma:title"),
        pair("messageSubject", "rma:description"),
    ]);
    let mut store = loaded_store(&server);

    store.remove(&pair("messageSubject", "rma:description"));
    let selection = store.selection_by_key("messageSubject");
    assert_eq!(selection, "rma:title,");
    assert!(!selection.contains("rma:description"));
}

#[test]
fn observers_receive_typed_notifications() {
    let server = FakeServer::with_mappings(vec![pair("messageSubject", "rma:title")]);
    let recorder = Recorder::default();
    let mut store = MappingStore::new(&server);
    store.register(Box::new(recorder.clone()));

    store.load().expect("load");
    store.add(pair("messageCc", "rma:participants"));
    store.remove(&pair("messageSubject", "rma:title"));
    store.save().expect("save");

    assert_eq!(*recorder.loaded.borrow(), [1]);
    assert_eq!(*recorder.saved.borrow(), [1]);

    let changed = recorder.changed.borrow();
    assert_eq!(changed.len(), 2);
    assert_eq!(
        changed[0].pending_adds,
        [pair("messageCc", "rma:participants")]
    );
    assert!(changed[0].has_changes());
    assert_eq!(
        changed[1].pending_removes,
        [pair("messageSubject", "rma:title")]
    );
}
