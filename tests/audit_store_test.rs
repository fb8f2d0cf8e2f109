mod common;

use std::time::Duration;

use common::{create_test_audit_store, minutes_after_epoch, record_at, setup_test_audit_db};
use skeleton_backend::audit::{AuditConfig, AuditRecorder, RecordBuilder};
use skeleton_backend::errors::internal::AuditError;
use skeleton_backend::errors::InternalError;
use skeleton_backend::stores::{AuditStore, Storer};
use skeleton_backend::types::internal::audit::{Action, RecordId};
use skeleton_backend::types::internal::context::RequestContext;
use skeleton_backend::types::internal::order::{Direction, OrderBy, OrderField};
use skeleton_backend::types::internal::pagination::Page;
use std::sync::Arc;

#[tokio::test]
async fn test_create_then_get_returns_same_record() {
    let store = create_test_audit_store().await;
    let record = record_at(Action::Update, 42, minutes_after_epoch(5));

    store.create(&record).await.unwrap();
    let fetched = store.get(record.id).await.unwrap();

    assert_eq!(fetched, record);
    assert_eq!(fetched.data["user_id"], 42);
}

#[tokio::test]
async fn test_get_missing_record_is_not_found() {
    let store = create_test_audit_store().await;
    let id = RecordId::new();

    let result = store.get(id).await;

    match result {
        Err(InternalError::Audit(AuditError::RecordNotFound(missing))) => {
            assert_eq!(missing, id.to_string());
        }
        other => panic!("Expected RecordNotFound, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_duplicate_id_fails() {
    let store = create_test_audit_store().await;
    let record = record_at(Action::Insert, 1, minutes_after_epoch(0));

    store.create(&record).await.unwrap();
    let result = store.create(&record).await;

    assert!(matches!(result, Err(InternalError::Database(_))));
}

#[tokio::test]
async fn test_list_defaults_to_newest_first() {
    let store = create_test_audit_store().await;
    for minute in 0..5 {
        store
            .create(&record_at(Action::Insert, minute, minutes_after_epoch(minute)))
            .await
            .unwrap();
    }

    let records = store.list(Page::default(), OrderBy::default()).await.unwrap();

    let users: Vec<i64> = records.iter().map(|r| r.user_id).collect();
    assert_eq!(users, vec![4, 3, 2, 1, 0]);
}

#[tokio::test]
async fn test_list_pages_through_records() {
    let store = create_test_audit_store().await;
    for minute in 0..5 {
        store
            .create(&record_at(Action::Insert, minute, minutes_after_epoch(minute)))
            .await
            .unwrap();
    }

    let oldest_first = OrderBy::new(OrderField::CreatedAt, Direction::Asc);

    let first = store.list(Page::new(0, 2), oldest_first).await.unwrap();
    let second = store.list(Page::new(1, 2), oldest_first).await.unwrap();
    let last = store.list(Page::new(2, 2), oldest_first).await.unwrap();
    let beyond = store.list(Page::new(3, 2), oldest_first).await.unwrap();

    assert_eq!(first.iter().map(|r| r.user_id).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(second.iter().map(|r| r.user_id).collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(last.iter().map(|r| r.user_id).collect::<Vec<_>>(), vec![4]);
    assert!(beyond.is_empty());
    assert_eq!(store.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_list_orders_by_action() {
    let store = create_test_audit_store().await;
    store.create(&record_at(Action::Update, 1, minutes_after_epoch(0))).await.unwrap();
    store.create(&record_at(Action::Delete, 2, minutes_after_epoch(1))).await.unwrap();
    store.create(&record_at(Action::Get, 3, minutes_after_epoch(2))).await.unwrap();

    let order_by = OrderBy::parse("action,ASC").unwrap();
    let records = store.list(Page::default(), order_by).await.unwrap();

    let actions: Vec<Action> = records.iter().map(|r| r.action).collect();
    assert_eq!(actions, vec![Action::Delete, Action::Get, Action::Update]);
}

#[tokio::test]
async fn test_recorder_persists_through_audit_store() {
    let db = setup_test_audit_db().await;
    let store = Arc::new(AuditStore::new(db));
    let recorder = AuditRecorder::new(AuditConfig::new(8, 2), store.clone());

    let ctx = RequestContext::new().with_request_id("req-e2e").with_user_id(9);
    for n in 0..10 {
        recorder
            .record(
                RecordBuilder::new(Action::Insert)
                    .with_context(&ctx)
                    .resource("organization", n)
                    .add_field("name", format!("org-{}", n))
                    .build(),
            )
            .await;
    }

    recorder.shutdown(Duration::from_secs(5)).await.unwrap();

    let page = recorder
        .list(Page::new(0, 4), OrderBy::default())
        .await
        .unwrap();

    assert_eq!(page.total_rows, 10);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.data.len(), 4);
    assert!(page.data.iter().all(|r| r.request_id == "req-e2e" && r.user_id == 9));

    let first = &page.data[0];
    assert_eq!(recorder.get(first.id).await.unwrap(), *first);
}
