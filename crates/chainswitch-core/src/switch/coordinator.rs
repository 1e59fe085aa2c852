use super::{ChainSwitchHooks, SwitchError};
use crate::chain::{ChainId, NetworkConfiguration};
use dashmap::DashMap;
use serde::Serialize;
use std::{future::Future, sync::Arc};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, instrument, warn};

/// How a switch was authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ApprovalPath {
    /// Permissions feature off; the user confirmed the switch prompt.
    UserApproved,
    /// Permissions feature on and the origin already held the chain.
    AlreadyPermitted,
    /// Permissions feature on; the user granted the chain just now.
    PermissionGranted,
}

/// Result of a successful [`ChainSwitchCoordinator::switch_chain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The origin was already on the requested chain. Nothing was prompted or written.
    AlreadyActive { configuration: NetworkConfiguration },
    /// The origin now uses `configuration`.
    Switched { configuration: NetworkConfiguration, approval: ApprovalPath },
}

impl SwitchOutcome {
    #[must_use]
    pub fn configuration(&self) -> &NetworkConfiguration {
        match self {
            Self::AlreadyActive { configuration } | Self::Switched { configuration, .. } => {
                configuration
            }
        }
    }

    #[must_use]
    pub fn switched(&self) -> bool {
        matches!(self, Self::Switched { .. })
    }
}

/// Per-origin serialization state.
struct OriginSlot {
    /// Held for the whole read-decide-commit sequence of one request.
    lock: Mutex<()>,
    /// Bumped by every incoming request; a prompt whose generation is stale has been
    /// superseded.
    generation: watch::Sender<u64>,
}

impl OriginSlot {
    fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self { lock: Mutex::new(()), generation }
    }
}

/// One request's hold on its origin's slot.
///
/// The slot is evicted when the last request holding it finishes or is cancelled, so the
/// map only grows with origins that have requests in flight.
struct SlotLease<'a> {
    origins: &'a DashMap<String, Arc<OriginSlot>>,
    origin: &'a str,
    slot: Arc<OriginSlot>,
}

impl Drop for SlotLease<'_> {
    fn drop(&mut self) {
        // The map's reference plus this lease. Cloning happens under the same shard lock, so
        // a request arriving concurrently either keeps the slot or creates a fresh one.
        self.origins.remove_if(self.origin, |_, slot| {
            Arc::ptr_eq(slot, &self.slot) && Arc::strong_count(slot) == 2
        });
    }
}

/// Snapshot of the origin's generation taken when a request arrived.
struct Ticket {
    generation: u64,
    current: watch::Receiver<u64>,
}

impl Ticket {
    fn is_superseded(&self) -> bool {
        *self.current.borrow() != self.generation
    }

    /// Runs a prompt, abandoning it as soon as a newer request for the same origin arrives.
    ///
    /// Dropping `prompt` is what withdraws it from whoever is presenting it.
    async fn prompt<T>(
        &mut self,
        prompt: impl Future<Output = Result<T, SwitchError>>,
    ) -> Result<T, SwitchError> {
        if self.is_superseded() {
            return Err(SwitchError::UserRejected);
        }

        let generation = self.generation;
        tokio::select! {
            biased;
            result = prompt => result,
            _ = self.current.wait_for(|current| *current != generation) => {
                warn!("prompt superseded by a newer request");
                Err(SwitchError::UserRejected)
            }
        }
    }
}

/// Decides and commits `wallet_switchEthereumChain` requests.
///
/// # Flow
///
/// ```text
/// switch_chain(origin, chain_id)
///   │
///   ▼
/// find configuration ── none ──► UnrecognizedChain
///   │
///   ▼
/// already active? ── yes ──► AlreadyActive (no prompt, no write)
///   │
///   ▼
/// permissions feature?
///   ├─ off ─► user approval prompt ──────────────┐
///   └─ on ──► already permitted? ── no ─► grant prompt
///               │ yes                            │
///               ▼                                ▼
///             commit: built-in type ─► by type, custom ─► by client id
/// ```
///
/// # Concurrency
///
/// Requests for the same origin run one at a time under a per-origin lock; different origins
/// never contend. A request arriving for an origin supersedes any request of that origin
/// still waiting on a prompt: the older one fails with [`SwitchError::UserRejected`] and
/// commits nothing.
pub struct ChainSwitchCoordinator {
    hooks: Arc<dyn ChainSwitchHooks>,
    origins: DashMap<String, Arc<OriginSlot>>,
}

impl ChainSwitchCoordinator {
    pub fn new(hooks: Arc<dyn ChainSwitchHooks>) -> Self {
        Self { hooks, origins: DashMap::new() }
    }

    #[must_use]
    pub fn hooks(&self) -> &Arc<dyn ChainSwitchHooks> {
        &self.hooks
    }

    /// Parses a raw hex chain id and switches to it.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::InvalidParams`] for a malformed chain id, otherwise whatever
    /// [`Self::switch_chain`] returns.
    pub async fn switch_chain_hex(
        &self,
        origin: &str,
        chain_id: &str,
    ) -> Result<SwitchOutcome, SwitchError> {
        let chain_id =
            ChainId::parse(chain_id).map_err(|e| SwitchError::InvalidParams(e.to_string()))?;
        self.switch_chain(origin, chain_id).await
    }

    /// Makes `chain_id` the active chain for `origin`.
    ///
    /// # Errors
    ///
    /// - [`SwitchError::UnrecognizedChain`] if the wallet has no configuration for the chain.
    /// - [`SwitchError::UserRejected`] if the user declined, or a newer request superseded
    ///   this one while it was prompting.
    /// - Any error returned by the permission prompt or the commit hooks, unchanged.
    #[instrument(skip(self, chain_id), fields(chain_id = %chain_id))]
    pub async fn switch_chain(
        &self,
        origin: &str,
        chain_id: ChainId,
    ) -> Result<SwitchOutcome, SwitchError> {
        let (lease, mut ticket) = self.supersede(origin);
        let _serialized = lease.slot.lock.lock().await;

        let Some(candidate) = self.hooks.find_network_configuration_by_chain_id(&chain_id) else {
            warn!("no network configuration for requested chain");
            return Err(SwitchError::UnrecognizedChain(chain_id));
        };

        if self.hooks.current_chain_id_for_domain(origin) == chain_id {
            debug!("requested chain already active");
            return Ok(SwitchOutcome::AlreadyActive { configuration: candidate });
        }

        let (configuration, approval) = if self.hooks.is_permissions_feature_active() {
            if self.hooks.permitted_chains_for_domain(origin).contains(&chain_id) {
                debug!("chain already permitted for origin");
                (candidate, ApprovalPath::AlreadyPermitted)
            } else {
                debug!("requesting chain permission");
                ticket
                    .prompt(self.hooks.request_permitted_chains_permission(origin, &chain_id))
                    .await
                    .inspect_err(|e| warn!(error = %e, "chain permission not granted"))?;
                (candidate, ApprovalPath::PermissionGranted)
            }
        } else {
            debug!("requesting user approval");
            let approved = ticket
                .prompt(self.hooks.request_user_approval(origin, &candidate))
                .await
                .inspect_err(|e| warn!(error = %e, "switch not approved"))?;

            if approved.chain_id != chain_id {
                return Err(SwitchError::Internal(format!(
                    "approval returned chain {} for request {chain_id}",
                    approved.chain_id
                )));
            }
            (approved, ApprovalPath::UserApproved)
        };

        self.commit(origin, &configuration).await?;
        info!(
            network_type = %configuration.network_type,
            id = %configuration.id,
            ?approval,
            "active network switched"
        );

        Ok(SwitchOutcome::Switched { configuration, approval })
    }

    /// Chain currently active for `origin`.
    #[must_use]
    pub fn current_chain_id(&self, origin: &str) -> ChainId {
        self.hooks.current_chain_id_for_domain(origin)
    }

    /// Number of origins with a request in flight.
    #[must_use]
    pub fn tracked_origins(&self) -> usize {
        self.origins.len()
    }

    fn supersede<'a>(&'a self, origin: &'a str) -> (SlotLease<'a>, Ticket) {
        let slot = self
            .origins
            .entry(origin.to_string())
            .or_insert_with(|| Arc::new(OriginSlot::new()))
            .clone();

        let mut generation = 0;
        slot.generation.send_modify(|current| {
            *current += 1;
            generation = *current;
        });
        let ticket = Ticket { generation, current: slot.generation.subscribe() };
        (SlotLease { origins: &self.origins, origin, slot }, ticket)
    }

    async fn commit(
        &self,
        origin: &str,
        configuration: &NetworkConfiguration,
    ) -> Result<(), SwitchError> {
        if configuration.is_built_in() {
            self.hooks.switch_active_network_by_type(origin, configuration.network_type).await
        } else {
            self.hooks.switch_active_network_by_id(origin, &configuration.id).await
        }
    }
}
