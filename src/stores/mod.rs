// Stores layer - Data access and repository pattern
pub mod audit_store;
pub mod storer;

pub use audit_store::AuditStore;
pub use storer::Storer;
