// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use migration::{AuditMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};
use skeleton_backend::errors::internal::AuditError;
use skeleton_backend::errors::InternalError;
use skeleton_backend::stores::{AuditStore, Storer};
use skeleton_backend::types::internal::audit::{Action, Record, RecordId};
use skeleton_backend::types::internal::order::OrderBy;
use skeleton_backend::types::internal::pagination::Page;
use tokio::sync::Semaphore;

/// Creates a test audit database with migrations applied
pub async fn setup_test_audit_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create audit database");

    AuditMigrator::up(&db, None)
        .await
        .expect("Failed to run audit migrations");

    db
}

/// Creates a test audit store
pub async fn create_test_audit_store() -> Arc<AuditStore> {
    let audit_db = setup_test_audit_db().await;
    Arc::new(AuditStore::new(audit_db))
}

/// Record with a fixed event time, useful when ordering matters
pub fn record_at(action: Action, user_id: i64, created_at: DateTime<Utc>) -> Record {
    let mut record = Record::new(action);
    record.id = RecordId::new();
    record.request_id = format!("req-{}", user_id);
    record.created_at = created_at;
    record.origin_ip = "127.0.0.1".to_string();
    record.resource_type = "username".to_string();
    record.resource_id = user_id;
    record.user_id = user_id;
    record.data = serde_json::json!({ "user_id": user_id });
    record
}

/// `2025-01-01T00:00:00Z` plus `minutes`
pub fn minutes_after_epoch(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(minutes)
}

/// In-memory Storer that keeps every record it is given
///
/// An optional delay is applied to each `create` call to model a slow database.
#[derive(Default)]
pub struct MemoryStorer {
    records: Mutex<Vec<Record>>,
    create_calls: AtomicUsize,
    delay: Option<Duration>,
}

impl MemoryStorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    pub fn stored_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl Storer for MemoryStorer {
    async fn create(&self, record: &Record) -> Result<(), InternalError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn get(&self, id: RecordId) -> Result<Record, InternalError> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| AuditError::RecordNotFound(id.to_string()).into())
    }

    async fn list(&self, page: Page, _order_by: OrderBy) -> Result<Vec<Record>, InternalError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, InternalError> {
        Ok(self.stored_count() as u64)
    }
}

/// Storer whose `create` blocks until the test releases permits
///
/// `entered` counts calls that reached the gate, so tests can tell when a
/// worker has dequeued a record.
pub struct GatedStorer {
    gate: Semaphore,
    entered: AtomicUsize,
    inner: MemoryStorer,
}

impl GatedStorer {
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            entered: AtomicUsize::new(0),
            inner: MemoryStorer::new(),
        }
    }

    /// Let `n` more `create` calls through
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    pub fn stored_count(&self) -> usize {
        self.inner.stored_count()
    }
}

#[async_trait]
impl Storer for GatedStorer {
    async fn create(&self, record: &Record) -> Result<(), InternalError> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        let permit = self.gate.acquire().await.expect("gate closed");
        permit.forget();
        self.inner.create(record).await
    }

    async fn get(&self, id: RecordId) -> Result<Record, InternalError> {
        self.inner.get(id).await
    }

    async fn list(&self, page: Page, order_by: OrderBy) -> Result<Vec<Record>, InternalError> {
        self.inner.list(page, order_by).await
    }

    async fn count(&self) -> Result<u64, InternalError> {
        self.inner.count().await
    }
}

/// Storer that fails every write
#[derive(Default)]
pub struct FailingStorer {
    attempts: AtomicUsize,
}

impl FailingStorer {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storer for FailingStorer {
    async fn create(&self, _record: &Record) -> Result<(), InternalError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(InternalError::database(
            "create_audit_record",
            DbErr::Custom("database is locked".to_string()),
        ))
    }

    async fn get(&self, id: RecordId) -> Result<Record, InternalError> {
        Err(AuditError::RecordNotFound(id.to_string()).into())
    }

    async fn list(&self, _page: Page, _order_by: OrderBy) -> Result<Vec<Record>, InternalError> {
        Ok(Vec::new())
    }

    async fn count(&self) -> Result<u64, InternalError> {
        Ok(0)
    }
}

/// Poll `condition` every 10ms until it holds or `timeout` elapses
pub async fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
