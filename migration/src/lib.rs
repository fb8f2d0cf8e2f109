pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_audit_records;

pub struct AuditMigrator;

#[async_trait::async_trait]
impl MigratorTrait for AuditMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_audit_records::Migration),
        ]
    }
}
