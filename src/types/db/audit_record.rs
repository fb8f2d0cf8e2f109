use sea_orm::entity::prelude::*;

/// SeaORM entity for audit_records table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub request_id: String,
    pub action: String,
    pub created_at: DateTimeUtc,
    #[sea_orm(column_type = "Text")]
    pub data: String,
    pub origin_ip: String,
    pub resource_id: i64,
    pub resource_type: String,
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
