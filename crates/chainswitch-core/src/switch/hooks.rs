use super::SwitchError;
use crate::{
    chain::{ChainId, NetworkClientId, NetworkConfiguration, NetworkType},
    permissions::PermittedChainSet,
};
use async_trait::async_trait;

/// Capabilities the switch coordinator needs from the rest of the wallet.
///
/// The coordinator depends on nothing else, which keeps it testable with a hand-written mock
/// and lets the network, permission and prompt layers evolve independently.
///
/// Implementations must be cheap to call concurrently; the coordinator already serializes
/// calls for the same origin.
#[async_trait]
pub trait ChainSwitchHooks: Send + Sync {
    /// Looks up the wallet's configuration for `chain_id`. `None` if the chain was never added.
    fn find_network_configuration_by_chain_id(
        &self,
        chain_id: &ChainId,
    ) -> Option<NetworkConfiguration>;

    /// Chain currently active for `origin`.
    fn current_chain_id_for_domain(&self, origin: &str) -> ChainId;

    /// Asks the user to confirm switching `origin` to `candidate`.
    ///
    /// Resolves to the approved configuration, or [`SwitchError::UserRejected`].
    async fn request_user_approval(
        &self,
        origin: &str,
        candidate: &NetworkConfiguration,
    ) -> Result<NetworkConfiguration, SwitchError>;

    /// Whether chain access is gated by per-origin permissions.
    fn is_permissions_feature_active(&self) -> bool;

    fn permitted_chains_for_domain(&self, origin: &str) -> PermittedChainSet;

    /// Asks the user to grant `origin` access to `chain_id`.
    async fn request_permitted_chains_permission(
        &self,
        origin: &str,
        chain_id: &ChainId,
    ) -> Result<(), SwitchError>;

    /// Makes the built-in network of `network_type` active for `origin`.
    async fn switch_active_network_by_type(
        &self,
        origin: &str,
        network_type: NetworkType,
    ) -> Result<(), SwitchError>;

    /// Makes the network with client id `id` active for `origin`.
    async fn switch_active_network_by_id(
        &self,
        origin: &str,
        id: &NetworkClientId,
    ) -> Result<(), SwitchError>;
}
