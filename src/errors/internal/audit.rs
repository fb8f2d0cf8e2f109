use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Audit record not found: {0}")]
    RecordNotFound(String),

    #[error("Unknown audit action: {0}")]
    UnknownAction(String),

    #[error("Unknown order field: {0}")]
    UnknownOrder(String),

    #[error("Unknown order direction: {0}")]
    UnknownDirection(String),

    /// The drain did not finish before the shutdown deadline.
    #[error("Audit shutdown timed out with {pending} record(s) still in flight")]
    ShutdownTimeout { pending: usize },
}
