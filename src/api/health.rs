use std::sync::Arc;

use chrono::Utc;
use poem_openapi::{payload::Json, OpenApi, Tags};
use sea_orm::DatabaseConnection;

use crate::audit::AuditRecorder;
use crate::types::dto::common::HealthResponse;

/// Health check API
pub struct HealthApi {
    db: DatabaseConnection,
    recorder: Arc<AuditRecorder>,
}

impl HealthApi {
    pub fn new(db: DatabaseConnection, recorder: Arc<AuditRecorder>) -> Self {
        Self { db, recorder }
    }
}

/// API tags for health endpoints
#[derive(Tags)]
enum ApiTags {
    /// Health check endpoints
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Health check endpoint
    ///
    /// Reports database reachability and the audit recorder's backlog
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        let database = match self.db.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "health check database ping failed");
                false
            }
        };

        Json(HealthResponse {
            status: if database { "healthy" } else { "degraded" }.to_string(),
            database,
            audit_in_flight: self.recorder.in_flight() as u64,
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
