use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::audit::{AuditConfig, AuditRecorder};
use crate::config::Settings;
use crate::errors::internal::AuditError;
use crate::stores::{AuditStore, Storer};

/// Centralized application data created once by the `serve` command
///
/// ```text
/// run_server
///   ↓
/// AppData::init()
///   ├─ db (DatabaseConnection)
///   ├─ audit_store (Arc<AuditStore>)
///   └─ recorder (Arc<AuditRecorder>) → workers write through audit_store
///   ↓
/// HealthApi / AuditApi hold clones of the Arcs
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub audit_store: Arc<AuditStore>,
    pub recorder: Arc<AuditRecorder>,
}

impl AppData {
    /// Build stores and start the audit recorder
    ///
    /// The database must already be migrated. Must run inside a tokio runtime
    /// since the recorder spawns its workers immediately.
    pub fn init(db: DatabaseConnection, settings: &Settings) -> Self {
        Self::with_audit_config(db, settings.audit_config())
    }

    pub fn with_audit_config(db: DatabaseConnection, audit_config: AuditConfig) -> Self {
        tracing::debug!("Creating stores...");
        let audit_store = Arc::new(AuditStore::new(db.clone()));

        let storer: Arc<dyn Storer> = audit_store.clone();
        let recorder = Arc::new(AuditRecorder::new(audit_config, storer));

        tracing::info!("AppData initialized");

        Self {
            db,
            audit_store,
            recorder,
        }
    }

    /// Stop accepting audit records and wait for the backlog to be persisted
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), AuditError> {
        self.recorder.shutdown(timeout).await
    }
}
