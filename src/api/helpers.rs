use std::net::IpAddr;

use poem::Request;

use crate::types::internal::context::RequestContext;

/// Header carrying a caller-supplied correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Extract the client IP address from request headers or the connection
///
/// Checks X-Forwarded-For (first entry), then X-Real-IP, then falls back to
/// the remote socket address.
pub fn extract_ip_address(req: &Request) -> Option<IpAddr> {
    // Proxy/load balancer
    if let Some(forwarded) = req.header("X-Forwarded-For") {
        if let Some(ip) = forwarded.split(',').next() {
            return ip.trim().parse().ok();
        }
    }

    // nginx
    if let Some(real_ip) = req.header("X-Real-IP") {
        return real_ip.trim().parse().ok();
    }

    req.remote_addr()
        .as_socket_addr()
        .map(|addr| addr.ip())
}

/// Build the RequestContext for an incoming request
///
/// Reuses the caller's X-Request-Id when present so audit records can be
/// correlated with upstream logs; otherwise a fresh id is generated.
pub fn create_request_context(req: &Request) -> RequestContext {
    let mut ctx = RequestContext::new();

    if let Some(request_id) = req
        .header(REQUEST_ID_HEADER)
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        ctx = ctx.with_request_id(request_id);
    }

    if let Some(ip) = extract_ip_address(req) {
        ctx = ctx.with_ip_address(ip);
    }

    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_extract_ip_from_x_forwarded_for() {
        let req = Request::builder()
            .header("X-Forwarded-For", "192.168.1.1, 10.0.0.1")
            .finish();

        assert_eq!(
            extract_ip_address(&req),
            Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)))
        );
    }

    #[test]
    fn test_extract_ip_from_x_real_ip() {
        let req = Request::builder()
            .header("X-Real-IP", "192.168.1.2")
            .finish();

        assert_eq!(
            extract_ip_address(&req),
            Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 2)))
        );
    }

    #[test]
    fn test_extract_ip_without_headers_or_remote_addr() {
        let req = Request::builder().finish();

        assert_eq!(extract_ip_address(&req), None);
    }

    #[test]
    fn test_request_context_uses_request_id_header() {
        let req = Request::builder()
            .header(REQUEST_ID_HEADER, "req-from-gateway")
            .header("X-Real-IP", "10.1.2.3")
            .finish();

        let ctx = create_request_context(&req);

        assert_eq!(ctx.request_id.as_str(), "req-from-gateway");
        assert_eq!(ctx.ip_address, Some(IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3))));
        assert_eq!(ctx.user_id, 0);
    }

    #[test]
    fn test_request_context_generates_request_id() {
        let req = Request::builder().header(REQUEST_ID_HEADER, "  ").finish();

        let ctx = create_request_context(&req);

        assert!(!ctx.request_id.as_str().trim().is_empty());
        assert!(ctx.ip_address.is_none());
    }
}
