//! Runtime lifecycle management and graceful shutdown.

use crate::{
    approval::ApprovalQueue,
    chain::ActiveNetworkState,
    config::AppConfig,
    registry::NetworkRegistry,
    rpc::RpcDispatcher,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{builder::ChainswitchRuntimeBuilder, ChainswitchComponents};

/// Main runtime container owning every wallet component.
///
/// Shutdown is broadcast to subscribers and closes the approval queue, so requests still
/// waiting on a prompt settle instead of hanging forever.
pub struct ChainswitchRuntime {
    components: ChainswitchComponents,
    shutdown_tx: broadcast::Sender<()>,
    config: AppConfig,
    shutdown_initiated: Arc<AtomicBool>,
}

impl ChainswitchRuntime {
    /// Creates a new builder for constructing a `ChainswitchRuntime`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let runtime = ChainswitchRuntime::builder().with_config(config).build()?;
    /// ```
    #[must_use]
    pub fn builder() -> ChainswitchRuntimeBuilder {
        ChainswitchRuntimeBuilder::new()
    }

    pub(super) fn new(
        components: ChainswitchComponents,
        shutdown_tx: broadcast::Sender<()>,
        config: AppConfig,
    ) -> Self {
        let shutdown_initiated = Arc::new(AtomicBool::new(false));
        Self { components, shutdown_tx, config, shutdown_initiated }
    }

    #[must_use]
    pub fn components(&self) -> &ChainswitchComponents {
        &self.components
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Convenience accessor for the JSON-RPC dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<RpcDispatcher> {
        self.components.dispatcher()
    }

    /// Convenience accessor for the approval queue.
    #[must_use]
    pub fn approvals(&self) -> &Arc<ApprovalQueue> {
        self.components.approvals()
    }

    /// Convenience accessor for the network registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<NetworkRegistry> {
        self.components.registry()
    }

    /// Convenience accessor for the active network state.
    #[must_use]
    pub fn state(&self) -> &Arc<ActiveNetworkState> {
        self.components.state()
    }

    /// Subscribes to the shutdown broadcast. The HTTP server drains when it fires.
    #[must_use]
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Broadcasts shutdown and closes every pending approval.
    ///
    /// Callers blocked on a switch prompt observe `UserRejected`, callers blocked on a
    /// permission prompt observe `PermissionRequestFailed`. Idempotent.
    pub async fn shutdown(&self) {
        if self
            .shutdown_initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Shutdown already initiated, ignoring duplicate call");
            return;
        }

        info!("Initiating chainswitch runtime shutdown");
        if let Err(e) = self.shutdown_tx.send(()) {
            debug!(error = %e, "No shutdown subscribers");
        }

        let closed = self.components.approvals().close_all();
        if closed > 0 {
            warn!(closed, "Closed pending approvals during shutdown");
        }

        // Let the woken requests observe the closed queue before returning.
        tokio::task::yield_now().await;

        info!("Chainswitch runtime shutdown complete");
    }

    /// Returns whether `shutdown` has been called.
    #[must_use]
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_initiated.load(Ordering::SeqCst)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    let _ = assert_send::<ChainswitchRuntime>;
    let _ = assert_sync::<ChainswitchRuntime>;
};
