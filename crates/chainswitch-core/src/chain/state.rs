//! Per-origin active network tracking.
//!
//! `ActiveNetworkState` is the single source of truth for which network each origin is
//! talking to. Origins that never switched see the wallet-wide default.

use super::{ChainId, NetworkConfiguration};
use arc_swap::ArcSwap;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone)]
struct Selection {
    /// `None` after the origin's selection was cleared.
    configuration: Option<NetworkConfiguration>,
    /// Bumped on every write for this origin, never reset.
    version: u64,
}

/// Keyed store of origin → active [`NetworkConfiguration`].
///
/// # Thread Safety
///
/// Reads never block writers of other origins: selections live in a sharded `DashMap` and the
/// default is behind an `ArcSwap`. Writers for the same origin are expected to be serialized by
/// the caller (the switch coordinator holds a per-origin lock around read-then-commit).
///
/// # Example
///
/// ```
/// use chainswitch_core::chain::{ActiveNetworkState, NetworkConfiguration, NetworkType};
///
/// let mainnet = NetworkConfiguration::built_in(NetworkType::Mainnet).unwrap();
/// let sepolia = NetworkConfiguration::built_in(NetworkType::Sepolia).unwrap();
/// let state = ActiveNetworkState::new(mainnet.clone());
///
/// assert_eq!(state.current_for("example.com"), mainnet);
///
/// state.commit("example.com", sepolia.clone());
/// assert_eq!(state.current_for("example.com"), sepolia);
/// assert_eq!(state.current_for("other.org"), mainnet);
/// ```
pub struct ActiveNetworkState {
    default: ArcSwap<NetworkConfiguration>,
    selections: DashMap<String, Selection>,
}

impl ActiveNetworkState {
    #[must_use]
    pub fn new(default: NetworkConfiguration) -> Self {
        Self { default: ArcSwap::from_pointee(default), selections: DashMap::new() }
    }

    /// Returns the wallet-wide default network.
    #[must_use]
    pub fn default_configuration(&self) -> NetworkConfiguration {
        NetworkConfiguration::clone(&self.default.load())
    }

    /// Replaces the wallet-wide default. Origins with their own selection are unaffected.
    pub fn set_default(&self, configuration: NetworkConfiguration) {
        trace!(chain_id = %configuration.chain_id, "default network updated");
        self.default.store(Arc::new(configuration));
    }

    /// Returns the network currently active for `origin`.
    #[must_use]
    pub fn current_for(&self, origin: &str) -> NetworkConfiguration {
        self.selections
            .get(origin)
            .and_then(|selection| selection.configuration.clone())
            .unwrap_or_else(|| self.default_configuration())
    }

    #[must_use]
    pub fn current_chain_id_for(&self, origin: &str) -> ChainId {
        self.selections
            .get(origin)
            .and_then(|selection| selection.configuration.as_ref().map(|c| c.chain_id))
            .unwrap_or_else(|| self.default.load().chain_id)
    }

    /// Makes `configuration` the active network for `origin`.
    ///
    /// Returns the new version number for the origin.
    pub fn commit(&self, origin: &str, configuration: NetworkConfiguration) -> u64 {
        let mut selection = self
            .selections
            .entry(origin.to_string())
            .or_insert_with(|| Selection { configuration: None, version: 0 });

        trace!(origin, chain_id = %configuration.chain_id, "active network committed");
        selection.configuration = Some(configuration);
        selection.version += 1;
        selection.version
    }

    /// Drops the origin's own selection so it falls back to the default.
    ///
    /// Returns `true` if the origin had a selection.
    pub fn clear(&self, origin: &str) -> bool {
        match self.selections.get_mut(origin) {
            Some(mut selection) if selection.configuration.is_some() => {
                selection.configuration = None;
                selection.version += 1;
                true
            }
            _ => false,
        }
    }

    /// Number of writes ever applied to `origin` (`0` if none).
    #[must_use]
    pub fn version_for(&self, origin: &str) -> u64 {
        self.selections.get(origin).map_or(0, |selection| selection.version)
    }

    /// Number of origins holding their own selection.
    #[must_use]
    pub fn origin_count(&self) -> usize {
        self.selections.iter().filter(|entry| entry.configuration.is_some()).count()
    }
}
