//! Builder for initializing the wallet runtime from configuration.

use crate::{
    approval::ApprovalQueue,
    chain::ActiveNetworkState,
    config::AppConfig,
    permissions::PermissionStore,
    registry::NetworkRegistry,
    rpc::RpcDispatcher,
    switch::{ChainSwitchCoordinator, WalletHooks},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::{lifecycle::ChainswitchRuntime, ChainswitchComponents};

/// Errors that can occur during runtime initialization.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigValidation(String),

    /// The network registry rejected the configured networks
    #[error("Network registry initialization failed: {0}")]
    Registry(#[from] crate::registry::RegistryError),
}

/// Shutdown is sent once, so a single slot is enough for every subscriber.
const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

/// Builder for constructing a [`ChainswitchRuntime`].
///
/// # Examples
///
/// ```no_run
/// # use chainswitch_core::{config::AppConfig, runtime::ChainswitchRuntimeBuilder};
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AppConfig::load()?;
///
/// let runtime =
///     ChainswitchRuntimeBuilder::new().with_config(config).enable_permissions().build()?;
/// # Ok(())
/// # }
/// ```
pub struct ChainswitchRuntimeBuilder {
    config: Option<AppConfig>,
    permissions_override: Option<bool>,
}

impl ChainswitchRuntimeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self { config: None, permissions_override: None }
    }

    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Turns the permissions feature on regardless of `permissions.enabled`.
    #[must_use]
    pub fn enable_permissions(mut self) -> Self {
        self.permissions_override = Some(true);
        self
    }

    /// Turns the permissions feature off regardless of `permissions.enabled`.
    #[must_use]
    pub fn disable_permissions(mut self) -> Self {
        self.permissions_override = Some(false);
        self
    }

    /// Builds the runtime, wiring every component together.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError`] if the configuration is missing or invalid, or the configured
    /// networks cannot be loaded into the registry.
    pub fn build(self) -> Result<ChainswitchRuntime, RuntimeError> {
        let config = self.config.ok_or_else(|| {
            RuntimeError::ConfigValidation("No configuration provided".to_string())
        })?;

        config.validate().map_err(RuntimeError::ConfigValidation)?;

        let permissions_enabled =
            self.permissions_override.unwrap_or(config.permissions_enabled());

        info!(
            networks_count = config.networks.configurations.len(),
            default_chain_id = %config.networks.default_chain_id,
            permissions_enabled,
            "Initializing chainswitch runtime"
        );

        let (shutdown_tx, _) = broadcast::channel::<()>(SHUTDOWN_CHANNEL_CAPACITY);

        let networks = config.network_configurations().map_err(RuntimeError::ConfigValidation)?;
        let registry = Arc::new(NetworkRegistry::from_configurations(networks)?);
        debug!(networks = registry.len(), "Network registry initialized");

        let default_chain_id =
            config.default_chain_id().map_err(RuntimeError::ConfigValidation)?;
        let default_network = registry.find_by_chain_id(&default_chain_id).ok_or_else(|| {
            RuntimeError::ConfigValidation(format!(
                "Default chain {default_chain_id} is not a configured network"
            ))
        })?;

        // Single instance, shared by every component that reads or commits the active network.
        let state = Arc::new(ActiveNetworkState::new(default_network));
        debug!(default_chain_id = %default_chain_id, "Active network state initialized");

        let permissions = Arc::new(PermissionStore::new());
        let approvals = Arc::new(ApprovalQueue::new());

        let hooks = Arc::new(WalletHooks::new(
            registry.clone(),
            state.clone(),
            permissions.clone(),
            approvals.clone(),
            permissions_enabled,
        ));
        let coordinator = Arc::new(ChainSwitchCoordinator::new(hooks.clone()));
        let dispatcher = Arc::new(RpcDispatcher::new(coordinator.clone()));
        debug!("Chain switch coordinator initialized");

        let components = ChainswitchComponents::new(
            registry,
            state,
            permissions,
            approvals,
            hooks,
            coordinator,
            dispatcher,
        );
        let runtime = ChainswitchRuntime::new(components, shutdown_tx, config);

        info!("Chainswitch runtime initialization complete");

        Ok(runtime)
    }
}

impl Default for ChainswitchRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
