use poem_openapi::Object;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// "healthy" when the database answers, "degraded" otherwise
    pub status: String,

    /// Whether the database answered a ping
    pub database: bool,

    /// Audit records accepted but not yet persisted
    pub audit_in_flight: u64,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}
