use super::{ChainSwitchHooks, SwitchError};
use crate::{
    approval::{ApprovalDecision, ApprovalError, ApprovalKind, ApprovalQueue},
    chain::{ActiveNetworkState, ChainId, NetworkClientId, NetworkConfiguration, NetworkType},
    permissions::{PermissionStore, PermittedChainSet},
    registry::NetworkRegistry,
};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tracing::debug;

/// [`ChainSwitchHooks`] backed by the wallet's in-process components.
///
/// Prompts go through the shared [`ApprovalQueue`]; commits write to the shared
/// [`ActiveNetworkState`].
pub struct WalletHooks {
    registry: Arc<NetworkRegistry>,
    state: Arc<ActiveNetworkState>,
    permissions: Arc<PermissionStore>,
    approvals: Arc<ApprovalQueue>,
    permissions_enabled: AtomicBool,
}

impl WalletHooks {
    pub fn new(
        registry: Arc<NetworkRegistry>,
        state: Arc<ActiveNetworkState>,
        permissions: Arc<PermissionStore>,
        approvals: Arc<ApprovalQueue>,
        permissions_enabled: bool,
    ) -> Self {
        Self {
            registry,
            state,
            permissions,
            approvals,
            permissions_enabled: AtomicBool::new(permissions_enabled),
        }
    }

    /// Turns the permissions feature on or off for subsequent requests.
    pub fn set_permissions_enabled(&self, enabled: bool) {
        self.permissions_enabled.store(enabled, Ordering::Relaxed);
    }

    fn commit(&self, origin: &str, configuration: NetworkConfiguration) {
        let version = self.state.commit(origin, configuration);
        debug!(origin, version, "active network state updated");
    }
}

#[async_trait]
impl ChainSwitchHooks for WalletHooks {
    fn find_network_configuration_by_chain_id(
        &self,
        chain_id: &ChainId,
    ) -> Option<NetworkConfiguration> {
        self.registry.find_by_chain_id(chain_id)
    }

    fn current_chain_id_for_domain(&self, origin: &str) -> ChainId {
        self.state.current_chain_id_for(origin)
    }

    async fn request_user_approval(
        &self,
        origin: &str,
        candidate: &NetworkConfiguration,
    ) -> Result<NetworkConfiguration, SwitchError> {
        let kind = ApprovalKind::SwitchNetwork {
            from: self.state.current_chain_id_for(origin),
            to: candidate.clone(),
        };

        match self.approvals.request(origin, kind).await {
            Ok(ApprovalDecision::Approved) => Ok(candidate.clone()),
            Ok(ApprovalDecision::Rejected) | Err(_) => Err(SwitchError::UserRejected),
        }
    }

    fn is_permissions_feature_active(&self) -> bool {
        self.permissions_enabled.load(Ordering::Relaxed)
    }

    fn permitted_chains_for_domain(&self, origin: &str) -> PermittedChainSet {
        self.permissions.permitted_chains(origin)
    }

    async fn request_permitted_chains_permission(
        &self,
        origin: &str,
        chain_id: &ChainId,
    ) -> Result<(), SwitchError> {
        let kind = ApprovalKind::PermittedChains { chain_id: *chain_id };

        match self.approvals.request(origin, kind).await {
            Ok(ApprovalDecision::Approved) => {
                self.permissions.grant(origin, *chain_id);
                Ok(())
            }
            Ok(ApprovalDecision::Rejected) => Err(SwitchError::UserRejected),
            Err(e @ ApprovalError::Closed) => {
                Err(SwitchError::PermissionRequestFailed(e.to_string()))
            }
            Err(e) => Err(SwitchError::Internal(e.to_string())),
        }
    }

    async fn switch_active_network_by_type(
        &self,
        origin: &str,
        network_type: NetworkType,
    ) -> Result<(), SwitchError> {
        let configuration = self.registry.find_by_type(network_type).ok_or_else(|| {
            SwitchError::Internal(format!("no configuration for network type {network_type}"))
        })?;
        self.commit(origin, configuration);
        Ok(())
    }

    async fn switch_active_network_by_id(
        &self,
        origin: &str,
        id: &NetworkClientId,
    ) -> Result<(), SwitchError> {
        let configuration = self.registry.find_by_id(id).ok_or_else(|| {
            SwitchError::Internal(format!("no configuration for network client {id}"))
        })?;
        self.commit(origin, configuration);
        Ok(())
    }
}
