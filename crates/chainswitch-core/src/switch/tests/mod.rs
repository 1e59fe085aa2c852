//! Tests for the chain switch flow.
//!
//! `coordinator_tests` drives [`ChainSwitchCoordinator`] against a scripted [`MockHooks`];
//! `wallet_tests` runs it end to end over the real registry, state, permission store and
//! approval queue.


use super::{ChainSwitchCoordinator, ChainSwitchHooks, SwitchError};
use crate::{
    chain::{ChainId, NetworkClientId, NetworkConfiguration, NetworkType},
    permissions::PermittedChainSet,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::{
    collections::{HashMap, HashSet},
    future::Future,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

// ============================================================================
// Shared Test Helpers
// ============================================================================

pub(super) const ORIGIN: &str = "https://dapp.example";

pub(super) fn custom_chain_id() -> ChainId {
    ChainId::parse("0x123456789").expect("valid chain id")
}

pub(super) fn custom_network() -> NetworkConfiguration {
    NetworkConfiguration::custom("123", custom_chain_id()).with_nickname("Local devnet")
}

pub(super) fn built_in(network_type: NetworkType) -> NetworkConfiguration {
    NetworkConfiguration::built_in(network_type).expect("built-in network type")
}

/// Polls `condition` until it holds, failing the test after one second.
pub(super) async fn eventually(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

/// What a mocked prompt does when called.
#[derive(Debug, Clone)]
pub(super) enum Prompt {
    Approve,
    Reject,
    Fail(SwitchError),
    /// Approves with a different configuration than the one asked about.
    Substitute(NetworkConfiguration),
    /// Never resolves.
    Hang,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Commit {
    ByType(String, NetworkType),
    ById(String, NetworkClientId),
}

/// Scripted [`ChainSwitchHooks`] recording every call.
pub(super) struct MockHooks {
    networks: Vec<NetworkConfiguration>,
    default_chain: ChainId,
    current: Mutex<HashMap<String, ChainId>>,
    permissions_active: AtomicBool,
    permitted: Mutex<HashMap<String, HashSet<ChainId>>>,
    approval_prompt: Mutex<Prompt>,
    permission_prompt: Mutex<Prompt>,
    commit_error: Mutex<Option<SwitchError>>,
    pub approval_requests: AtomicUsize,
    pub permission_requests: AtomicUsize,
    pub commits: Mutex<Vec<Commit>>,
}

impl MockHooks {
    pub fn new() -> Self {
        let mut networks: Vec<_> =
            NetworkType::BUILT_IN.into_iter().filter_map(NetworkConfiguration::built_in).collect();
        networks.push(custom_network());

        Self {
            networks,
            default_chain: ChainId::MAINNET,
            current: Mutex::new(HashMap::new()),
            permissions_active: AtomicBool::new(false),
            permitted: Mutex::new(HashMap::new()),
            approval_prompt: Mutex::new(Prompt::Approve),
            permission_prompt: Mutex::new(Prompt::Approve),
            commit_error: Mutex::new(None),
            approval_requests: AtomicUsize::new(0),
            permission_requests: AtomicUsize::new(0),
            commits: Mutex::new(Vec::new()),
        }
    }

    pub fn with_permissions(self, active: bool) -> Self {
        self.permissions_active.store(active, Ordering::SeqCst);
        self
    }

    pub fn set_current(&self, origin: &str, chain_id: ChainId) {
        self.current.lock().insert(origin.to_string(), chain_id);
    }

    pub fn permit(&self, origin: &str, chain_id: ChainId) {
        self.permitted.lock().entry(origin.to_string()).or_default().insert(chain_id);
    }

    pub fn set_approval_prompt(&self, prompt: Prompt) {
        *self.approval_prompt.lock() = prompt;
    }

    pub fn set_permission_prompt(&self, prompt: Prompt) {
        *self.permission_prompt.lock() = prompt;
    }

    pub fn fail_commits_with(&self, error: SwitchError) {
        *self.commit_error.lock() = Some(error);
    }

    pub fn approval_count(&self) -> usize {
        self.approval_requests.load(Ordering::SeqCst)
    }

    pub fn permission_count(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> Vec<Commit> {
        self.commits.lock().clone()
    }

    pub fn is_permitted(&self, origin: &str, chain_id: &ChainId) -> bool {
        self.permitted.lock().get(origin).is_some_and(|chains| chains.contains(chain_id))
    }

    fn record_commit(&self, commit: Commit, chain_id: ChainId) -> Result<(), SwitchError> {
        if let Some(error) = self.commit_error.lock().clone() {
            return Err(error);
        }
        let origin = match &commit {
            Commit::ByType(origin, _) | Commit::ById(origin, _) => origin.clone(),
        };
        self.commits.lock().push(commit);
        self.current.lock().insert(origin, chain_id);
        Ok(())
    }
}

async fn run_prompt<T>(
    prompt: Prompt,
    approved: T,
    substitute: impl FnOnce(NetworkConfiguration) -> T,
) -> Result<T, SwitchError> {
    match prompt {
        Prompt::Approve => Ok(approved),
        Prompt::Reject => Err(SwitchError::UserRejected),
        Prompt::Fail(error) => Err(error),
        Prompt::Substitute(configuration) => Ok(substitute(configuration)),
        Prompt::Hang => std::future::pending().await,
    }
}

#[async_trait]
impl ChainSwitchHooks for MockHooks {
    fn find_network_configuration_by_chain_id(
        &self,
        chain_id: &ChainId,
    ) -> Option<NetworkConfiguration> {
        self.networks.iter().find(|network| &network.chain_id == chain_id).cloned()
    }

    fn current_chain_id_for_domain(&self, origin: &str) -> ChainId {
        self.current.lock().get(origin).copied().unwrap_or(self.default_chain)
    }

    async fn request_user_approval(
        &self,
        _origin: &str,
        candidate: &NetworkConfiguration,
    ) -> Result<NetworkConfiguration, SwitchError> {
        self.approval_requests.fetch_add(1, Ordering::SeqCst);
        let prompt = self.approval_prompt.lock().clone();
        run_prompt(prompt, candidate.clone(), |substitute| substitute).await
    }

    fn is_permissions_feature_active(&self) -> bool {
        self.permissions_active.load(Ordering::SeqCst)
    }

    fn permitted_chains_for_domain(&self, origin: &str) -> PermittedChainSet {
        self.permitted
            .lock()
            .get(origin)
            .map(|chains| chains.iter().copied().collect())
            .unwrap_or_default()
    }

    async fn request_permitted_chains_permission(
        &self,
        origin: &str,
        chain_id: &ChainId,
    ) -> Result<(), SwitchError> {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        let prompt = self.permission_prompt.lock().clone();
        run_prompt(prompt, (), |_| ()).await?;
        self.permit(origin, *chain_id);
        Ok(())
    }

    async fn switch_active_network_by_type(
        &self,
        origin: &str,
        network_type: NetworkType,
    ) -> Result<(), SwitchError> {
        let chain_id = network_type
            .built_in_chain_id()
            .ok_or_else(|| SwitchError::Internal("custom network committed by type".into()))?;
        self.record_commit(Commit::ByType(origin.to_string(), network_type), chain_id)
    }

    async fn switch_active_network_by_id(
        &self,
        origin: &str,
        id: &NetworkClientId,
    ) -> Result<(), SwitchError> {
        let chain_id = self
            .networks
            .iter()
            .find(|network| &network.id == id)
            .map(|network| network.chain_id)
            .ok_or_else(|| SwitchError::Internal(format!("unknown client id {id}")))?;
        self.record_commit(Commit::ById(origin.to_string(), id.clone()), chain_id)
    }
}

/// Builds a coordinator over `hooks`, keeping a typed handle for assertions.
pub(super) fn coordinator(hooks: MockHooks) -> (Arc<ChainSwitchCoordinator>, Arc<MockHooks>) {
    let hooks = Arc::new(hooks);
    let coordinator = Arc::new(ChainSwitchCoordinator::new(hooks.clone()));
    (coordinator, hooks)
}

/// Spawns a switch request so it can be left suspended on a prompt.
pub(super) fn spawn_switch(
    coordinator: &Arc<ChainSwitchCoordinator>,
    origin: &'static str,
    chain_id: ChainId,
) -> tokio::task::JoinHandle<Result<super::SwitchOutcome, SwitchError>> {
    let coordinator = coordinator.clone();
    tokio::spawn(async move { coordinator.switch_chain(origin, chain_id).await })
}

#[allow(dead_code)]
fn assert_send<F: Future + Send>(_: F) {}

#[allow(dead_code)]
fn switch_future_is_send(coordinator: &ChainSwitchCoordinator) {
    assert_send(coordinator.switch_chain(ORIGIN, ChainId::MAINNET));
}
