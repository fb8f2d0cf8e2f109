pub mod audit;
pub mod context;
pub mod order;
pub mod pagination;
