// Request/response models for the HTTP layer
pub mod audit;
pub mod common;
