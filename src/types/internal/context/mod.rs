pub mod request_context;
pub mod request_id;

pub use {request_context::RequestContext, request_id::RequestId};
