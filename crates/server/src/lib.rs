//! HTTP surface for the chainswitch wallet: JSON-RPC on `/`, the approval queue under
//! `/approvals`, and a liveness check on `/health`.

pub mod approvals;
pub mod logging;
pub mod middleware;
pub mod router;

use axum::{
    routing::{get, post},
    Router,
};
use chainswitch_core::config::AppConfig;
use router::AppState;
use std::net::SocketAddr;
use tokio::{net::TcpListener, sync::broadcast};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::debug;

/// Request bodies above this size are rejected before parsing.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the full application router.
pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    let (set_request_id, propagate_request_id) = middleware::create_request_id_layers();

    let public = Router::new().route("/health", get(router::handle_health));

    let rpc = Router::new()
        .route("/", post(router::handle_rpc))
        .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests()));

    let approvals = Router::new()
        .route(
            "/approvals",
            get(approvals::list_approvals).delete(approvals::reject_origin),
        )
        .route(
            "/approvals/{id}",
            get(approvals::get_approval).post(approvals::resolve_approval),
        );

    public
        .merge(rpc)
        .merge(approvals)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::make_request_span))
        .layer(propagate_request_id)
        .layer(set_request_id)
}

/// Serves `app` until the runtime broadcasts shutdown on `shutdown`.
///
/// Take the receiver from `ChainswitchRuntime::shutdown_receiver` before anything can call
/// `ChainswitchRuntime::shutdown`. Shutdown closes every pending approval, so requests
/// blocked on a prompt are answered and the graceful drain does not wait on the user.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move {
            if shutdown.recv().await.is_err() {
                debug!("runtime dropped without a shutdown broadcast");
            }
        })
        .await
}
