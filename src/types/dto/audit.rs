use poem_openapi::Object;

use crate::types::internal::audit::Record;
use crate::types::internal::pagination::PageResponse;

/// Response model representing a persisted audit record
#[derive(Object, Debug)]
pub struct AuditRecordResponse {
    /// Unique identifier of the record
    pub id: String,

    /// Correlation id of the request that produced the record
    pub request_id: String,

    /// One of insert, update, delete, list, get
    pub action: String,

    /// When the audited event happened (ISO 8601 format)
    pub created_at: String,

    /// Caller-defined payload, stored verbatim
    pub data: serde_json::Value,

    pub origin_ip: String,
    pub resource_id: i64,
    pub resource_type: String,
    pub user_id: i64,
}

impl From<Record> for AuditRecordResponse {
    fn from(record: Record) -> Self {
        Self {
            id: record.id.to_string(),
            request_id: record.request_id,
            action: record.action.to_string(),
            created_at: record.created_at.to_rfc3339(),
            data: record.data,
            origin_ip: record.origin_ip,
            resource_id: record.resource_id,
            resource_type: record.resource_type,
            user_id: record.user_id,
        }
    }
}

/// One page of audit records
#[derive(Object, Debug)]
pub struct AuditRecordListResponse {
    pub page_number: u64,
    pub page_rows: u64,
    pub total_rows: u64,
    pub total_pages: u64,
    pub data: Vec<AuditRecordResponse>,
}

impl From<PageResponse<Record>> for AuditRecordListResponse {
    fn from(page: PageResponse<Record>) -> Self {
        Self {
            page_number: page.page_number,
            page_rows: page.page_rows,
            total_rows: page.total_rows,
            total_pages: page.total_pages,
            data: page.data.into_iter().map(AuditRecordResponse::from).collect(),
        }
    }
}
