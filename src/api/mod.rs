// API layer - HTTP endpoints
pub mod audit;
pub mod health;
pub mod helpers;

pub use audit::AuditApi;
pub use health::HealthApi;
