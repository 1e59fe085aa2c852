use anyhow::Result;
use chainswitch_core::{config::AppConfig, runtime::ChainswitchRuntime};
use server::{create_app, logging::init_logging, router::AppState, serve};
use std::sync::Arc;
use tokio::signal;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config =
        AppConfig::load().map_err(|e| anyhow::anyhow!("Configuration loading failed: {e}"))?;

    init_logging(&config.logging);
    info!("Starting chainswitch wallet server");
    debug!(
        networks_count = config.networks.configurations.len(),
        default_chain_id = %config.networks.default_chain_id,
        permissions_enabled = config.permissions_enabled(),
        bind_port = config.server.bind_port,
        "Configuration loaded"
    );

    let runtime = Arc::new(
        ChainswitchRuntime::builder()
            .with_config(config.clone())
            .build()
            .map_err(|e| anyhow::anyhow!("Runtime initialization failed: {e}"))?,
    );

    let app = create_app(AppState::from_runtime(&runtime), &config);
    let addr = config.socket_addr().map_err(|e| anyhow::anyhow!("Invalid bind address: {e}"))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "Wallet RPC server listening");

    let shutdown = runtime.shutdown_receiver();
    let signal_runtime = Arc::clone(&runtime);
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_runtime.shutdown().await;
    });

    if let Err(e) = serve(listener, app, shutdown).await {
        error!(error = %e, "Server error occurred");
    }

    if !runtime.is_shutting_down() {
        runtime.shutdown().await;
    }
    info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                () = std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
