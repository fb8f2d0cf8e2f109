use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditRecords::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AuditRecords::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(AuditRecords::RequestId).string().not_null())
                    .col(ColumnDef::new(AuditRecords::Action).string().not_null())
                    .col(ColumnDef::new(AuditRecords::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(AuditRecords::Data).text().not_null())
                    .col(ColumnDef::new(AuditRecords::OriginIp).string().not_null())
                    .col(ColumnDef::new(AuditRecords::ResourceId).big_integer().not_null())
                    .col(ColumnDef::new(AuditRecords::ResourceType).string().not_null())
                    .col(ColumnDef::new(AuditRecords::UserId).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_records_created_at")
                    .table(AuditRecords::Table)
                    .col(AuditRecords::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_records_action")
                    .table(AuditRecords::Table)
                    .col(AuditRecords::Action)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_records_user_id")
                    .table(AuditRecords::Table)
                    .col(AuditRecords::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditRecords::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AuditRecords {
    Table,
    Id,
    RequestId,
    Action,
    CreatedAt,
    Data,
    OriginIp,
    ResourceId,
    ResourceType,
    UserId,
}
