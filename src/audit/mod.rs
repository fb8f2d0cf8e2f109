pub mod in_flight;
pub mod record_builder;
pub mod recorder;
mod worker;

pub use record_builder::RecordBuilder;
pub use recorder::{AuditConfig, AuditRecorder};
