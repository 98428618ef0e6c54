//! Store refresh and mutate-then-refetch behaviour.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::Call;
use common::FakeApi;
use common::sample_records;
use sysprompt_lib::error::Error;
use sysprompt_lib::error::ValidationError;
use sysprompt_lib::model::RecordDraft;
use sysprompt_lib::mutation::Mutation;
use sysprompt_lib::mutation::MutationCoordinator;
use sysprompt_lib::mutation::MutationKind;
use sysprompt_lib::notify::Notifier;
use sysprompt_lib::notify::Severity;
use sysprompt_lib::store::RecordStore;

fn setup(api: &Arc<FakeApi>) -> MutationCoordinator {
    let store = RecordStore::new(api.clone());
    MutationCoordinator::new(store, Notifier::default())
}

// =============================================================================
// Store
// =============================================================================

#[tokio::test]
async fn test_refresh_replaces_snapshot() {
    let api = FakeApi::new(sample_records());
    let store = RecordStore::new(api.clone());
    assert!(store.get().is_empty());

    assert_eq!(store.refresh().await.unwrap(), 1);
    assert_eq!(*store.get(), sample_records());
    assert_eq!(store.version(), 1);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let api = FakeApi::new(sample_records());
    let store = RecordStore::new(api.clone());
    store.refresh().await.unwrap();

    api.fail_list(true);
    api.set_records(Vec::new());
    let err = store.refresh().await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(*store.get(), sample_records());
    assert_eq!(store.version(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_newer_refresh_supersedes_older() {
    let api = FakeApi::new(sample_records());
    let store = RecordStore::new(api.clone());
    api.set_list_delay(Duration::from_millis(100));

    let slow = tokio::spawn({
        let store = store.clone();
        async move { store.refresh().await }
    });
    tokio::task::yield_now().await;

    api.set_records(sample_records()[..2].to_vec());
    let latest = store.refresh().await;

    assert!(slow.await.unwrap().unwrap_err().is_cancelled());
    assert_eq!(latest.unwrap(), 1);
    assert_eq!(store.get().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_abandons_refresh() {
    let api = FakeApi::new(sample_records());
    let store = RecordStore::new(api.clone());
    api.set_list_delay(Duration::from_millis(100));

    let pending = tokio::spawn({
        let store = store.clone();
        async move { store.refresh().await }
    });
    tokio::task::yield_now().await;
    store.cancel();

    assert!(matches!(pending.await.unwrap(), Err(Error::Cancelled)));
    assert!(store.get().is_empty());
}

// =============================================================================
// Coordinator
// =============================================================================

#[tokio::test]
async fn test_create_refetches_and_announces() {
    let api = FakeApi::new(sample_records());
    let coordinator = setup(&api);
    coordinator.store().refresh().await.unwrap();

    let draft = RecordDraft::new("poet", "寫一首詩", "Write a poem");
    coordinator.create(draft.clone()).await.unwrap();

    let snapshot = coordinator.store().get();
    assert_eq!(snapshot.len(), 5);
    let created = snapshot.iter().find(|r| r.name == "poet").unwrap();
    assert_eq!(created.id, 5);
    assert_eq!(created.content, "寫一首詩");

    assert_eq!(api.write_calls(), vec![Call::Create(draft)]);
    assert_eq!(api.calls().last(), Some(&Call::List));

    let notice = coordinator.notifier().current().unwrap();
    assert_eq!(notice.severity, Severity::Success);
    assert_eq!(notice.message, "Data created successfully.");
    assert_eq!(coordinator.version(), 1);
}

#[tokio::test]
async fn test_update_then_delete() {
    let api = FakeApi::new(sample_records());
    let coordinator = setup(&api);
    coordinator.store().refresh().await.unwrap();

    coordinator
        .update(2, RecordDraft::new("translator", "翻譯", "Translate"))
        .await
        .unwrap();
    let updated = coordinator.store().get().iter().find(|r| r.id == 2).cloned().unwrap();
    assert_eq!(updated.content, "翻譯");
    assert_eq!(coordinator.notifier().current().unwrap().message, "Data updated successfully.");

    coordinator.delete(2).await.unwrap();
    assert!(coordinator.store().get().iter().all(|r| r.id != 2));
    assert_eq!(coordinator.notifier().current().unwrap().message, "Data deleted successfully.");
    assert_eq!(coordinator.version(), 2);
}

#[tokio::test]
async fn test_failed_write_leaves_store_and_shows_error() {
    let api = FakeApi::new(sample_records());
    let coordinator = setup(&api);
    coordinator.store().refresh().await.unwrap();
    let store_version = coordinator.store().version();
    api.fail_writes(true);

    let err = coordinator.delete(3).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));

    assert_eq!(*coordinator.store().get(), sample_records());
    assert_eq!(coordinator.store().version(), store_version);

    let notice = coordinator.notifier().current().unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(notice.message, "Error deleting data: HTTP 500: boom");
    // settled, even though it failed
    assert_eq!(coordinator.version(), 1);
}

#[tokio::test]
async fn test_refresh_failure_after_write_still_succeeds() {
    let api = FakeApi::new(sample_records());
    let coordinator = setup(&api);
    coordinator.store().refresh().await.unwrap();
    api.fail_list(true);

    coordinator
        .create(RecordDraft::new("poet", "詩", ""))
        .await
        .unwrap();
    assert_eq!(coordinator.store().get().len(), 4);
    assert_eq!(
        coordinator.notifier().current().unwrap().severity,
        Severity::Success
    );
}

#[tokio::test]
async fn test_presence_check_only_when_enabled() {
    let api = FakeApi::new(Vec::new());
    let lenient = setup(&api);
    lenient.create(RecordDraft::default()).await.unwrap();
    assert_eq!(api.write_calls().len(), 1);

    let strict = setup(&api).with_require_fields(true);
    let err = strict
        .create(RecordDraft::new("", "content", ""))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::Empty { field: "name" })
    ));
    assert_eq!(api.write_calls().len(), 1);
    assert_eq!(
        strict.notifier().current().unwrap().message,
        "Error creating data: Field 'name' must not be empty"
    );
}

#[tokio::test]
async fn test_shutdown_cancels_without_notice() {
    let api = FakeApi::new(sample_records());
    let coordinator = setup(&api);
    coordinator.shutdown();

    let err = coordinator.apply(Mutation::Delete(1)).await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(api.write_calls().is_empty());
    assert_eq!(coordinator.notifier().current(), None);
    assert_eq!(coordinator.version(), 0);
}

#[tokio::test]
async fn test_version_subscribers_tick_per_settlement() {
    let api = FakeApi::new(sample_records());
    let coordinator = setup(&api);
    let mut rx = coordinator.subscribe();

    coordinator.delete(1).await.unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), 1);
}

#[test]
fn test_mutation_kinds() {
    assert_eq!(Mutation::Delete(1).kind(), MutationKind::Delete);
    assert_eq!(
        Mutation::Update {
            id: 1,
            draft: RecordDraft::default()
        }
        .kind(),
        MutationKind::Update
    );
}
