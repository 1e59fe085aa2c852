//! HTTP endpoints through which a wallet UI answers pending prompts.

use crate::router::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chainswitch_core::approval::{ApprovalDecision, ApprovalError, PendingApproval};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ApprovalResolution {
    pub approved: bool,
}

#[derive(Debug, Deserialize)]
pub struct OriginQuery {
    pub origin: String,
}

/// Lists pending prompts, oldest first.
#[allow(clippy::unused_async)]
pub async fn list_approvals(State(state): State<AppState>) -> Json<Vec<PendingApproval>> {
    Json(state.approvals.pending())
}

/// Fetches one pending prompt.
#[allow(clippy::unused_async)]
pub async fn get_approval(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.approvals.get(&id) {
        Some(approval) => Json(approval).into_response(),
        None => error_response(&ApprovalError::UnknownApproval(id)),
    }
}

/// Approves or rejects one pending prompt. Answers `204` once the decision is delivered.
#[allow(clippy::unused_async)]
pub async fn resolve_approval(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(resolution): Json<ApprovalResolution>,
) -> Response {
    let decision = ApprovalDecision::from_approved(resolution.approved);
    match state.approvals.resolve(id, decision) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            warn!(id = %id, error = %e, "approval resolution failed");
            error_response(&e)
        }
    }
}

/// Rejects every prompt raised by one origin, e.g. when its tab closes.
#[allow(clippy::unused_async)]
pub async fn reject_origin(
    State(state): State<AppState>,
    Query(query): Query<OriginQuery>,
) -> impl IntoResponse {
    let rejected = state.approvals.reject_all_for(&query.origin);
    info!(origin = %query.origin, rejected, "rejected pending approvals for origin");
    Json(json!({ "rejected": rejected }))
}

fn error_response(error: &ApprovalError) -> Response {
    let status = match error {
        ApprovalError::UnknownApproval(_) => StatusCode::NOT_FOUND,
        ApprovalError::Closed => StatusCode::GONE,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
