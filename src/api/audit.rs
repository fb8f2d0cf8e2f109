use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::helpers;
use crate::audit::{AuditRecorder, RecordBuilder};
use crate::errors::AuditApiError;
use crate::types::dto::audit::{AuditRecordListResponse, AuditRecordResponse};
use crate::types::internal::audit::{Action, RecordId};
use crate::types::internal::order::OrderBy;
use crate::types::internal::pagination::Page;

/// Resource type used for audit records emitted by this API
const AUDIT_RESOURCE_TYPE: &str = "audit_record";

/// Read-only access to persisted audit records
pub struct AuditApi {
    recorder: Arc<AuditRecorder>,
}

impl AuditApi {
    pub fn new(recorder: Arc<AuditRecorder>) -> Self {
        Self { recorder }
    }
}

/// API tags for audit endpoints
#[derive(Tags)]
enum AuditTags {
    /// Audit record queries
    Audit,
}

#[OpenApi(prefix_path = "/audit")]
impl AuditApi {
    /// Fetch a single audit record by id
    #[oai(path = "/records/:id", method = "get", tag = "AuditTags::Audit")]
    async fn get_record(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<AuditRecordResponse>, AuditApiError> {
        let ctx = helpers::create_request_context(req);

        let record_id: RecordId = id.0.parse()
            .map_err(|_| AuditApiError::bad_request(format!("Invalid audit record id: {}", id.0)))?;

        // Reads of the audit trail are themselves audited
        self.recorder
            .record(
                RecordBuilder::new(Action::Get)
                    .with_context(&ctx)
                    .resource(AUDIT_RESOURCE_TYPE, 0)
                    .add_field("record_id", record_id.to_string())
                    .build(),
            )
            .await;

        let record = self.recorder
            .get(record_id)
            .await
            .map_err(AuditApiError::from_internal_error)?;

        Ok(Json(AuditRecordResponse::from(record)))
    }

    /// List audit records
    ///
    /// `page_number` is zero-based. `page_rows` defaults to 20 and is capped at 100.
    /// `order_by` takes `field[,ASC|DESC]` with field one of created_at, action,
    /// user_id, resource_type; the default is `created_at,DESC`.
    #[oai(path = "/records", method = "get", tag = "AuditTags::Audit")]
    async fn list_records(
        &self,
        req: &Request,
        page_number: Query<Option<u64>>,
        page_rows: Query<Option<u64>>,
        order_by: Query<Option<String>>,
    ) -> Result<Json<AuditRecordListResponse>, AuditApiError> {
        let ctx = helpers::create_request_context(req);

        let page = Page::new(page_number.0.unwrap_or(0), page_rows.0.unwrap_or(0));
        let order_by = match order_by.0.as_deref() {
            Some(raw) => OrderBy::parse(raw)
                .map_err(|e| AuditApiError::from_internal_error(e.into()))?,
            None => OrderBy::default(),
        };

        self.recorder
            .record(
                RecordBuilder::new(Action::List)
                    .with_context(&ctx)
                    .resource(AUDIT_RESOURCE_TYPE, 0)
                    .add_field("page_number", page.page_number)
                    .add_field("page_rows", page.limit())
                    .add_field("order_by", order_by.to_string())
                    .build(),
            )
            .await;

        let records = self.recorder
            .list(page, order_by)
            .await
            .map_err(AuditApiError::from_internal_error)?;

        Ok(Json(AuditRecordListResponse::from(records)))
    }
}
