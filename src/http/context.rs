//! Per-request context shared with handlers.
//!
//! # Responsibilities
//! - Carry the buffered request (method, URI, headers, body, request ID)
//! - Hold the response written by whichever pipeline stage processed it
//!
//! # Design Decisions
//! - `RequestContext` is an `Arc` handle: handlers get their own clone
//! - The body is buffered before dispatch; handlers stay synchronous
//! - At most one response is kept; a later write replaces an earlier one

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Request, Uri};
use axum::response::Response;

use crate::http::request::REQUEST_ID_HEADER;

#[derive(Debug, Default)]
struct RequestData {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

/// Read-only view of the current request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    inner: Arc<RequestData>,
}

impl RequestContext {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            inner: Arc::new(RequestData {
                method,
                uri,
                headers,
                body,
            }),
        }
    }

    /// Build from request parts and an already buffered body.
    pub fn from_parts(parts: Parts, body: Bytes) -> Self {
        Self::new(parts.method, parts.uri, parts.headers, body)
    }

    pub fn from_request(request: Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();
        Self::from_parts(parts, body)
    }

    pub fn method(&self) -> &Method {
        &self.inner.method
    }

    pub fn uri(&self) -> &Uri {
        &self.inner.uri
    }

    /// Request path without the query string.
    pub fn path(&self) -> &str {
        self.inner.uri.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.inner.uri.query()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.inner.headers
    }

    /// A header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.inner.body
    }

    /// Request ID assigned by the request-id layer, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }
}

/// Request plus the response slot filled during processing.
#[derive(Debug)]
pub struct HttpContext {
    request: RequestContext,
    response: Option<Response>,
}

impl HttpContext {
    pub fn new(request: RequestContext) -> Self {
        Self {
            request,
            response: None,
        }
    }

    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    /// Store the response for this request.
    pub fn set_response(&mut self, response: Response) {
        if self.response.is_some() {
            tracing::warn!(path = %self.request.path(), "Response overwritten");
        }
        self.response = Some(response);
    }

    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub fn take_response(&mut self) -> Option<Response> {
        self.response.take()
    }

    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_request_accessors() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/products/show?id=3")
            .header("x-request-id", "abc-123")
            .body(Bytes::from_static(b"payload"))
            .unwrap();
        let ctx = RequestContext::from_request(request);

        assert_eq!(ctx.method(), Method::POST);
        assert_eq!(ctx.path(), "/products/show");
        assert_eq!(ctx.query(), Some("id=3"));
        assert_eq!(ctx.request_id(), Some("abc-123"));
        assert_eq!(ctx.body().as_ref(), b"payload");
    }

    #[test]
    fn test_default_request_is_root_get() {
        let ctx = RequestContext::default();
        assert_eq!(ctx.method(), Method::GET);
        assert_eq!(ctx.path(), "/");
        assert!(ctx.request_id().is_none());
    }

    #[test]
    fn test_response_slot() {
        let mut ctx = HttpContext::new(RequestContext::default());
        assert!(!ctx.has_response());

        ctx.set_response(StatusCode::ACCEPTED.into_response());
        assert_eq!(ctx.response().unwrap().status(), StatusCode::ACCEPTED);

        let response = ctx.take_response().unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert!(!ctx.has_response());
    }
}
