//! Extracts the calling dApp origin from the `Origin` header.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chainswitch_core::types::{error_codes, JsonRpcResponse};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const ORIGIN_HEADER: &str = "origin";

/// The origin a request is made on behalf of. Every chain selection is scoped to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin(pub String);

impl RequestOrigin {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The trimmed `Origin` header, if present and non-empty.
#[must_use]
pub fn origin_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(ORIGIN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
}

impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match origin_from_headers(&parts.headers) {
            Some(origin) => Ok(Self(origin.to_string())),
            None => {
                debug!("rejecting request without origin");
                let response = JsonRpcResponse::error(
                    error_codes::INVALID_REQUEST,
                    "Invalid Request: missing Origin header",
                    Arc::new(Value::Null),
                );
                Err((StatusCode::BAD_REQUEST, Json(response)).into_response())
            }
        }
    }
}
