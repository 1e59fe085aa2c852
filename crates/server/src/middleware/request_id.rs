//! Request ids and the per-exchange log span.
//!
//! Every HTTP exchange gets an `x-request-id` (kept if the wallet UI sent one) and a span
//! carrying that id and the calling origin, so the coordinator's log lines for one
//! `wallet_switchEthereumChain` call can be told apart from another origin's.

use super::origin::origin_from_headers;
use axum::{
    body::Body,
    http::{header::HeaderValue, HeaderName, Request},
};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tracing::{field, info_span, Span};
use uuid::Uuid;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Clone, Copy, Default)]
pub struct UuidRequestIdGenerator;

impl MakeRequestId for UuidRequestIdGenerator {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).ok()?))
    }
}

/// Creates the request id layer pair.
///
/// Apply the propagate layer before the set layer; layers run in reverse order, so the id is
/// assigned first and then copied onto the response.
#[must_use]
pub fn create_request_id_layers(
) -> (SetRequestIdLayer<UuidRequestIdGenerator>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::new(X_REQUEST_ID.clone(), UuidRequestIdGenerator),
        PropagateRequestIdLayer::new(X_REQUEST_ID.clone()),
    )
}

/// Span for one HTTP exchange, used as the `TraceLayer` span.
///
/// Must run inside the set-request-id layer so the id is already on the request. Requests
/// without an `Origin` header (health checks, the approval UI) leave `origin` empty.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let span = info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = field::Empty,
        origin = field::Empty,
    );

    if let Some(id) = request.headers().get(&X_REQUEST_ID).and_then(|v| v.to_str().ok()) {
        span.record("request_id", field::display(id));
    }
    if let Some(origin) = origin_from_headers(request.headers()) {
        span.record("origin", field::display(origin));
    }
    span
}
