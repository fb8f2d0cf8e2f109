use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};
use sha2::{Digest, Sha256};

use crate::types::internal::audit::{Action, Record, RecordId};
use crate::types::internal::context::RequestContext;

/// Builder for audit records
///
/// Provides a fluent API for constructing records with type-safe payload fields
/// and hashing of sensitive values. The event time is captured when the builder
/// is created.
///
/// # Example
/// ```
/// use skeleton_backend::audit::RecordBuilder;
/// use skeleton_backend::types::internal::audit::Action;
/// use skeleton_backend::types::internal::context::RequestContext;
///
/// let ctx = RequestContext::new().with_user_id(7);
/// let record = RecordBuilder::new(Action::Update)
///     .with_context(&ctx)
///     .resource("organization", 42)
///     .add_field("name", "acme")
///     .add_sensitive("email", "owner@acme.test")
///     .build();
///
/// assert_eq!(record.user_id, 7);
/// ```
pub struct RecordBuilder {
    action: Action,
    created_at: DateTime<Utc>,
    request_id: String,
    origin_ip: Option<String>,
    resource_type: String,
    resource_id: i64,
    user_id: i64,
    data: Map<String, Value>,
}

impl RecordBuilder {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            created_at: Utc::now(),
            request_id: String::new(),
            origin_ip: None,
            resource_type: String::new(),
            resource_id: 0,
            user_id: 0,
            data: Map::new(),
        }
    }

    /// Populate correlation and actor fields from a RequestContext
    ///
    /// - `request_id` -> `request_id`
    /// - `ip_address` -> `origin_ip` (or "unknown" if None)
    /// - `user_id` -> `user_id`
    pub fn with_context(mut self, ctx: &RequestContext) -> Self {
        self.request_id = ctx.request_id.to_string();
        self.origin_ip = Some(
            ctx.ip_address
                .map(|ip| ip.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        );
        self.user_id = ctx.user_id;
        self
    }

    /// Set the resource the action was performed on
    pub fn resource(mut self, resource_type: impl Into<String>, resource_id: i64) -> Self {
        self.resource_type = resource_type.into();
        self.resource_id = resource_id;
        self
    }

    pub fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn origin_ip(mut self, ip: impl Into<String>) -> Self {
        self.origin_ip = Some(ip.into());
        self
    }

    /// Add an arbitrary field to the record's payload
    ///
    /// Values that fail to serialize are skipped.
    pub fn add_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.data.insert(key.into(), json_value);
        }
        self
    }

    /// Add a field whose value is stored as a SHA-256 digest
    ///
    /// Same input always produces the same digest, so related events can be
    /// correlated without storing the original value.
    pub fn add_sensitive(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(&value) {
            let mut hasher = Sha256::new();
            hasher.update(json_value.to_string().as_bytes());
            let hash_hex = format!("sha256:{:x}", hasher.finalize());

            self.data.insert(key.into(), json!(hash_hex));
        }
        self
    }

    /// Build the record; its id is left unset for the recorder to assign
    pub fn build(self) -> Record {
        Record {
            id: RecordId::default(),
            request_id: self.request_id,
            action: self.action,
            created_at: self.created_at,
            data: Value::Object(self.data),
            origin_ip: self.origin_ip.unwrap_or_else(|| "unknown".to_string()),
            resource_id: self.resource_id,
            resource_type: self.resource_type,
            user_id: self.user_id,
        }
    }
}
