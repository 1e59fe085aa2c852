//! In-memory store of known network configurations.
//!
//! The registry is the wallet's answer to "which networks has the user added?". It is seeded
//! from configuration at startup and can be edited afterwards by the network management
//! surface. The chain switch flow only reads from it.

use crate::chain::{ChainId, NetworkClientId, NetworkConfiguration, NetworkType};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("chain id {0} is configured more than once")]
    DuplicateChainId(ChainId),

    #[error("network client id '{id}' is already used by chain {chain_id}")]
    DuplicateClientId { id: NetworkClientId, chain_id: ChainId },

    #[error("network type {network_type} requires chain id {expected}, got {chain_id}")]
    BuiltInChainMismatch { network_type: NetworkType, expected: ChainId, chain_id: ChainId },
}

/// Network configurations keyed by chain id.
///
/// At most one configuration exists per chain id, and client ids are unique across the
/// registry, so lookups in either direction are unambiguous.
///
/// # Example
///
/// ```
/// use chainswitch_core::{
///     chain::{ChainId, NetworkConfiguration, NetworkType},
///     registry::NetworkRegistry,
/// };
///
/// let registry = NetworkRegistry::from_configurations(
///     NetworkType::BUILT_IN.into_iter().filter_map(NetworkConfiguration::built_in),
/// )
/// .unwrap();
///
/// let linea = registry.find_by_chain_id(&"0xE708".parse().unwrap()).unwrap();
/// assert_eq!(linea.network_type, NetworkType::LineaMainnet);
/// assert!(registry.find_by_chain_id(&ChainId::from_u64(0x123).unwrap()).is_none());
/// ```
#[derive(Debug, Default)]
pub struct NetworkRegistry {
    networks: RwLock<BTreeMap<ChainId, NetworkConfiguration>>,
}

impl NetworkRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from an initial set of configurations.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if two configurations share a chain id or a client id, or a
    /// built-in network type carries a chain id other than its own.
    pub fn from_configurations(
        configurations: impl IntoIterator<Item = NetworkConfiguration>,
    ) -> Result<Self, RegistryError> {
        let registry = Self::new();
        {
            let mut networks = registry.networks.write();
            for configuration in configurations {
                if networks.contains_key(&configuration.chain_id) {
                    return Err(RegistryError::DuplicateChainId(configuration.chain_id));
                }
                check_built_in_chain(&configuration)?;
                check_client_id(&networks, &configuration)?;
                networks.insert(configuration.chain_id, configuration);
            }
            debug!(count = networks.len(), "network registry seeded");
        }
        Ok(registry)
    }

    #[must_use]
    pub fn find_by_chain_id(&self, chain_id: &ChainId) -> Option<NetworkConfiguration> {
        self.networks.read().get(chain_id).cloned()
    }

    #[must_use]
    pub fn find_by_id(&self, id: &NetworkClientId) -> Option<NetworkConfiguration> {
        self.networks.read().values().find(|config| &config.id == id).cloned()
    }

    /// Returns the configuration for a built-in network type.
    ///
    /// Always `None` for [`NetworkType::Custom`], which is not addressable by type.
    #[must_use]
    pub fn find_by_type(&self, network_type: NetworkType) -> Option<NetworkConfiguration> {
        if !network_type.is_built_in() {
            return None;
        }
        self.networks
            .read()
            .values()
            .find(|config| config.network_type == network_type)
            .cloned()
    }

    /// Adds or replaces the configuration for its chain id.
    ///
    /// Returns the configuration it replaced, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateClientId`] if a configuration for a different chain
    /// already uses the same client id, and [`RegistryError::BuiltInChainMismatch`] if a
    /// built-in network type is paired with a foreign chain id.
    pub fn upsert(
        &self,
        configuration: NetworkConfiguration,
    ) -> Result<Option<NetworkConfiguration>, RegistryError> {
        check_built_in_chain(&configuration)?;
        let mut networks = self.networks.write();
        check_client_id(&networks, &configuration)?;

        info!(
            chain_id = %configuration.chain_id,
            id = %configuration.id,
            network_type = %configuration.network_type,
            "network configuration stored"
        );
        Ok(networks.insert(configuration.chain_id, configuration))
    }

    pub fn remove(&self, chain_id: &ChainId) -> Option<NetworkConfiguration> {
        let removed = self.networks.write().remove(chain_id);
        if removed.is_some() {
            info!(chain_id = %chain_id, "network configuration removed");
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.networks.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.networks.read().is_empty()
    }

    /// All configurations, sorted by chain id.
    #[must_use]
    pub fn all(&self) -> Vec<NetworkConfiguration> {
        self.networks.read().values().cloned().collect()
    }
}

/// A built-in type is committed by type, so it must resolve back to the same chain.
fn check_built_in_chain(configuration: &NetworkConfiguration) -> Result<(), RegistryError> {
    match configuration.network_type.built_in_chain_id() {
        Some(expected) if expected != configuration.chain_id => {
            Err(RegistryError::BuiltInChainMismatch {
                network_type: configuration.network_type,
                expected,
                chain_id: configuration.chain_id,
            })
        }
        _ => Ok(()),
    }
}

fn check_client_id(
    networks: &BTreeMap<ChainId, NetworkConfiguration>,
    configuration: &NetworkConfiguration,
) -> Result<(), RegistryError> {
    let conflict = networks.values().find(|existing| {
        existing.id == configuration.id && existing.chain_id != configuration.chain_id
    });

    match conflict {
        Some(existing) => Err(RegistryError::DuplicateClientId {
            id: configuration.id.clone(),
            chain_id: existing.chain_id,
        }),
        None => Ok(()),
    }
}
