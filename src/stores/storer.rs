use async_trait::async_trait;

use crate::errors::InternalError;
use crate::types::internal::audit::{Record, RecordId};
use crate::types::internal::order::OrderBy;
use crate::types::internal::pagination::Page;

/// Durable system-of-record for audit records
///
/// Shared by every recorder worker at once, so implementations must be safe
/// for concurrent use.
#[async_trait]
pub trait Storer: Send + Sync {
    /// Persist one record
    async fn create(&self, record: &Record) -> Result<(), InternalError>;

    /// Fetch a record by id
    ///
    /// # Errors
    /// `AuditError::RecordNotFound` when no record has this id
    async fn get(&self, id: RecordId) -> Result<Record, InternalError>;

    /// Fetch one page of records in the requested order
    async fn list(&self, page: Page, order_by: OrderBy) -> Result<Vec<Record>, InternalError>;

    /// Total number of persisted records
    async fn count(&self) -> Result<u64, InternalError>;
}
