use std::net::IpAddr;

use super::request_id::RequestId;

/// Request context that flows through all layers
///
/// Contains contextual information about the current request that is needed
/// for logging and auditing across API, service, and store layers.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// User who initiated the operation (0 when anonymous)
    pub user_id: i64,
}

impl RequestContext {
    /// Create an anonymous RequestContext with a generated request_id
    pub fn new() -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::generate(),
            user_id: 0,
        }
    }

    /// Set the ip_address
    pub fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    /// Replace the generated request_id with one supplied by the caller
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = RequestId(request_id.into());
        self
    }

    /// Set the acting user
    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
