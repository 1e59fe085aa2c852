use crate::middleware::RequestOrigin;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chainswitch_core::{
    approval::ApprovalQueue,
    registry::NetworkRegistry,
    rpc::RpcDispatcher,
    runtime::ChainswitchRuntime,
    types::{error_codes, JsonRpcRequest, JsonRpcResponse},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Shared state for every route.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<RpcDispatcher>,
    pub approvals: Arc<ApprovalQueue>,
    pub registry: Arc<NetworkRegistry>,
}

impl AppState {
    #[must_use]
    pub fn from_runtime(runtime: &ChainswitchRuntime) -> Self {
        Self {
            dispatcher: runtime.dispatcher().clone(),
            approvals: runtime.approvals().clone(),
            registry: runtime.registry().clone(),
        }
    }
}

/// Handles JSON-RPC requests (single or batched) on behalf of the `Origin` header.
///
/// Dispatched requests always answer `200 OK`, with failures carried in the JSON-RPC error
/// object. Only payloads that are not requests at all answer `400`.
pub async fn handle_rpc(
    State(state): State<AppState>,
    origin: RequestOrigin,
    Json(payload): Json<Value>,
) -> Response {
    match payload {
        Value::Array(items) => handle_batch_request(&state, origin.as_str(), items).await,
        payload => handle_single_request(&state, origin.as_str(), payload).await,
    }
}

async fn handle_single_request(state: &AppState, origin: &str, payload: Value) -> Response {
    match parse_request(payload) {
        Ok(request) => {
            let response = state.dispatcher.handle(origin, request).await;
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(error_response) => (StatusCode::BAD_REQUEST, Json(error_response)).into_response(),
    }
}

async fn handle_batch_request(state: &AppState, origin: &str, items: Vec<Value>) -> Response {
    if items.is_empty() {
        let response = JsonRpcResponse::error(
            error_codes::INVALID_REQUEST,
            "Invalid Request: empty batch",
            Arc::new(Value::Null),
        );
        return (StatusCode::BAD_REQUEST, Json(response)).into_response();
    }

    info!(origin, batch_size = items.len(), "Received batched RPC request");

    // Sequential: a switch earlier in the batch must be visible to a later eth_chainId.
    let mut responses = Vec::with_capacity(items.len());
    for item in items {
        let response = match parse_request(item) {
            Ok(request) => state.dispatcher.handle(origin, request).await,
            Err(error_response) => error_response,
        };
        responses.push(response);
    }

    (StatusCode::OK, Json(responses)).into_response()
}

/// Deserializes one request, echoing its `id` in the error response when it can be found.
fn parse_request(payload: Value) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let id = Arc::new(payload.get("id").cloned().unwrap_or(Value::Null));

    serde_json::from_value::<JsonRpcRequest>(payload).map_err(|e| {
        debug!(error = %e, "malformed JSON-RPC request");
        JsonRpcResponse::error(error_codes::INVALID_REQUEST, format!("Invalid Request: {e}"), id)
    })
}

#[allow(clippy::unused_async)]
pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let health_status = serde_json::json!({
        "status": "healthy",
        "networks": state.registry.len(),
        "pendingApprovals": state.approvals.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(health_status))
}
