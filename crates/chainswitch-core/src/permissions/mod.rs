//! Per-origin permitted chain sets.
//!
//! When the permissions feature is active, an origin may only be switched to chains it has
//! been granted. Grants are monotonic for the lifetime of a session: the switch flow adds
//! chains but never removes them.

use crate::chain::ChainId;
use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// The chains an origin is permitted to use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermittedChainSet(BTreeSet<ChainId>);

impl PermittedChainSet {
    #[must_use]
    pub fn contains(&self, chain_id: &ChainId) -> bool {
        self.0.contains(chain_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainId> {
        self.0.iter()
    }
}

impl FromIterator<ChainId> for PermittedChainSet {
    fn from_iter<T: IntoIterator<Item = ChainId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Stores the [`PermittedChainSet`] of every origin.
#[derive(Debug, Default)]
pub struct PermissionStore {
    grants: DashMap<String, BTreeSet<ChainId>>,
}

impl PermissionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the chains granted to `origin`. Empty for unknown origins.
    #[must_use]
    pub fn permitted_chains(&self, origin: &str) -> PermittedChainSet {
        self.grants
            .get(origin)
            .map(|chains| PermittedChainSet(chains.clone()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_permitted(&self, origin: &str, chain_id: &ChainId) -> bool {
        self.grants.get(origin).is_some_and(|chains| chains.contains(chain_id))
    }

    /// Grants `chain_id` to `origin`. Returns `true` if it was not granted before.
    pub fn grant(&self, origin: &str, chain_id: ChainId) -> bool {
        let inserted = self.grants.entry(origin.to_string()).or_default().insert(chain_id);
        if inserted {
            debug!(origin, chain_id = %chain_id, "chain permission granted");
        }
        inserted
    }

    /// Drops every grant held by `origin`. Only used when its session ends.
    pub fn revoke_origin(&self, origin: &str) -> usize {
        let revoked = self.grants.remove(origin).map_or(0, |(_, chains)| chains.len());
        if revoked > 0 {
            debug!(origin, revoked, "origin permissions revoked");
        }
        revoked
    }
}
