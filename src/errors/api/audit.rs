use crate::errors::internal::{AuditError, InternalError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error response for audit endpoints
#[derive(Object, Debug)]
pub struct ApiErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Audit query error types
#[derive(ApiResponse, Debug)]
pub enum AuditApiError {
    /// Malformed request parameter
    #[oai(status = 400)]
    BadRequest(Json<ApiErrorResponse>),

    /// Audit record not found
    #[oai(status = 404)]
    RecordNotFound(Json<ApiErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ApiErrorResponse>),
}

impl AuditApiError {
    /// Create a BadRequest error
    pub fn bad_request(message: impl Into<String>) -> Self {
        AuditApiError::BadRequest(Json(ApiErrorResponse {
            error: "bad_request".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    /// Create a RecordNotFound error
    pub fn record_not_found(record_id: String) -> Self {
        AuditApiError::RecordNotFound(Json(ApiErrorResponse {
            error: "record_not_found".to_string(),
            message: format!("Audit record not found: {}", record_id),
            status_code: 404,
        }))
    }

    /// Convert InternalError to AuditApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Audit(AuditError::RecordNotFound(record_id)) => {
                Self::record_not_found(record_id.clone())
            }
            InternalError::Audit(AuditError::UnknownOrder(field)) => {
                Self::bad_request(format!("Unknown order field: {}", field))
            }
            InternalError::Audit(AuditError::UnknownDirection(direction)) => {
                Self::bad_request(format!("Unknown order direction: {}", direction))
            }
            InternalError::Database(_) => {
                tracing::error!("Database error in audit query: {}", err);
                Self::internal_server_error()
            }
            _ => {
                tracing::error!("Unexpected error in audit query: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Create a generic internal server error without exposing internal details
    fn internal_server_error() -> Self {
        AuditApiError::InternalError(Json(ApiErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuditApiError::BadRequest(json) => json.0.message.clone(),
            AuditApiError::RecordNotFound(json) => json.0.message.clone(),
            AuditApiError::InternalError(json) => json.0.message.clone(),
        }
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        match self {
            AuditApiError::BadRequest(json) => json.0.status_code,
            AuditApiError::RecordNotFound(json) => json.0.status_code,
            AuditApiError::InternalError(json) => json.0.status_code,
        }
    }
}

impl fmt::Display for AuditApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
