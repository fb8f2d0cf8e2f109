use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};

use crate::errors::InternalError;
use crate::errors::internal::AuditError;
use crate::stores::storer::Storer;
use crate::types::db::audit_record::{self, Column, Entity as AuditRecords};
use crate::types::internal::audit::{Record, RecordId};
use crate::types::internal::order::{Direction, OrderBy, OrderField};
use crate::types::internal::pagination::Page;

/// SeaORM-backed repository for audit records
pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    /// Create a new AuditStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_model(record: &Record) -> Result<audit_record::ActiveModel, InternalError> {
        let data = serde_json::to_string(&record.data)
            .map_err(|e| InternalError::parse("audit_record.data", e.to_string()))?;

        Ok(audit_record::ActiveModel {
            id: Set(record.id.to_string()),
            request_id: Set(record.request_id.clone()),
            action: Set(record.action.as_str().to_string()),
            created_at: Set(record.created_at),
            data: Set(data),
            origin_ip: Set(record.origin_ip.clone()),
            resource_id: Set(record.resource_id),
            resource_type: Set(record.resource_type.clone()),
            user_id: Set(record.user_id),
        })
    }

    fn from_model(model: audit_record::Model) -> Result<Record, InternalError> {
        let id = model
            .id
            .parse::<RecordId>()
            .map_err(|e| InternalError::parse("audit_record.id", e.to_string()))?;
        let data = serde_json::from_str(&model.data)
            .map_err(|e| InternalError::parse("audit_record.data", e.to_string()))?;

        Ok(Record {
            id,
            request_id: model.request_id,
            action: model.action.parse()?,
            created_at: model.created_at,
            data,
            origin_ip: model.origin_ip,
            resource_id: model.resource_id,
            resource_type: model.resource_type,
            user_id: model.user_id,
        })
    }

    fn column_for(field: OrderField) -> Column {
        match field {
            OrderField::CreatedAt => Column::CreatedAt,
            OrderField::Action => Column::Action,
            OrderField::UserId => Column::UserId,
            OrderField::ResourceType => Column::ResourceType,
        }
    }
}

#[async_trait]
impl Storer for AuditStore {
    async fn create(&self, record: &Record) -> Result<(), InternalError> {
        Self::to_model(record)?
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_audit_record", e))?;

        Ok(())
    }

    async fn get(&self, id: RecordId) -> Result<Record, InternalError> {
        let model = AuditRecords::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_audit_record", e))?
            .ok_or_else(|| AuditError::RecordNotFound(id.to_string()))?;

        Self::from_model(model)
    }

    async fn list(&self, page: Page, order_by: OrderBy) -> Result<Vec<Record>, InternalError> {
        let order = match order_by.direction {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        };

        let models = AuditRecords::find()
            .order_by(Self::column_for(order_by.field), order)
            .limit(page.limit())
            .offset(page.offset())
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_audit_records", e))?;

        models.into_iter().map(Self::from_model).collect()
    }

    async fn count(&self) -> Result<u64, InternalError> {
        AuditRecords::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_audit_records", e))
    }
}
