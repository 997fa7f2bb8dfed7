use crate::http::{Request, Response};
use async_trait::async_trait;

/// Hooks the connection driver calls for every request.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Produce the response for a GET or HEAD request.
    async fn on_request(&self, request: &Request) -> Response;

    /// Last chance to adjust headers before the head is written.
    ///
    /// Called for every response the driver writes for a parsed request,
    /// including preflights and method errors that never reach `on_request`.
    fn on_headers_ready(&self, request: &Request, response: &mut Response);

    /// Adjust a 400, 408 or 431 written for a head that never parsed.
    fn on_rejection(&self, _response: &mut Response) {}
}
