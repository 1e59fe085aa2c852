//! Core component container for the chainswitch runtime.

use crate::{
    approval::ApprovalQueue,
    chain::ActiveNetworkState,
    permissions::PermissionStore,
    registry::NetworkRegistry,
    rpc::RpcDispatcher,
    switch::{ChainSwitchCoordinator, WalletHooks},
};
use std::sync::Arc;

/// Container for all initialized components.
///
/// All components are wrapped in `Arc` and share state through interior mutability, so the
/// container is cheap to clone into request handlers.
#[derive(Clone)]
pub struct ChainswitchComponents {
    registry: Arc<NetworkRegistry>,
    state: Arc<ActiveNetworkState>,
    permissions: Arc<PermissionStore>,
    approvals: Arc<ApprovalQueue>,
    hooks: Arc<WalletHooks>,
    coordinator: Arc<ChainSwitchCoordinator>,
    dispatcher: Arc<RpcDispatcher>,
}

impl ChainswitchComponents {
    /// Called by `ChainswitchRuntimeBuilder` during initialization.
    #[must_use]
    pub fn new(
        registry: Arc<NetworkRegistry>,
        state: Arc<ActiveNetworkState>,
        permissions: Arc<PermissionStore>,
        approvals: Arc<ApprovalQueue>,
        hooks: Arc<WalletHooks>,
        coordinator: Arc<ChainSwitchCoordinator>,
        dispatcher: Arc<RpcDispatcher>,
    ) -> Self {
        Self { registry, state, permissions, approvals, hooks, coordinator, dispatcher }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<NetworkRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn state(&self) -> &Arc<ActiveNetworkState> {
        &self.state
    }

    #[must_use]
    pub fn permissions(&self) -> &Arc<PermissionStore> {
        &self.permissions
    }

    #[must_use]
    pub fn approvals(&self) -> &Arc<ApprovalQueue> {
        &self.approvals
    }

    /// Returns the production hooks, e.g. to toggle the permissions feature at runtime.
    #[must_use]
    pub fn hooks(&self) -> &Arc<WalletHooks> {
        &self.hooks
    }

    #[must_use]
    pub fn coordinator(&self) -> &Arc<ChainSwitchCoordinator> {
        &self.coordinator
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Arc<RpcDispatcher> {
        &self.dispatcher
    }
}
