//! Hook implementation that records calls and lets tests decide prompts.

use async_trait::async_trait;
use chainswitch_core::{
    chain::{ActiveNetworkState, ChainId, NetworkClientId, NetworkConfiguration, NetworkType},
    permissions::{PermissionStore, PermittedChainSet},
    registry::NetworkRegistry,
    switch::{ChainSwitchHooks, SwitchError},
};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::{oneshot, Mutex};

/// Every hook call that changes or asks for something, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    ApprovalRequested { origin: String, chain_id: ChainId },
    PermissionRequested { origin: String, chain_id: ChainId },
    CommittedByType { origin: String, network_type: NetworkType },
    CommittedById { origin: String, id: NetworkClientId },
}

/// How prompts are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Every prompt resolves immediately with the given answer.
    Auto(bool),
    /// Prompts wait until the test calls [`RecordingHooks::answer_next`].
    Manual,
}

struct HeldPrompt {
    origin: String,
    chain_id: ChainId,
    reply: oneshot::Sender<bool>,
}

pub struct RecordingHooks {
    registry: NetworkRegistry,
    state: ActiveNetworkState,
    permissions: PermissionStore,
    permissions_enabled: AtomicBool,
    mode: PromptMode,
    held: Mutex<Vec<HeldPrompt>>,
    events: Mutex<Vec<HookEvent>>,
    prompts_started: AtomicUsize,
    commits: AtomicUsize,
}

pub struct RecordingHooksBuilder {
    networks: Vec<NetworkConfiguration>,
    permissions_enabled: bool,
    mode: PromptMode,
}

impl RecordingHooksBuilder {
    #[must_use]
    pub fn permissions(mut self, enabled: bool) -> Self {
        self.permissions_enabled = enabled;
        self
    }

    #[must_use]
    pub fn prompt_mode(mut self, mode: PromptMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn network(mut self, configuration: NetworkConfiguration) -> Self {
        self.networks.push(configuration);
        self
    }

    /// # Panics
    ///
    /// Panics if the configured networks collide.
    #[must_use]
    pub fn build(self) -> Arc<RecordingHooks> {
        let registry = NetworkRegistry::from_configurations(self.networks)
            .expect("test networks must be unique");
        let mainnet = registry.find_by_type(NetworkType::Mainnet).expect("mainnet is built in");

        Arc::new(RecordingHooks {
            registry,
            state: ActiveNetworkState::new(mainnet),
            permissions: PermissionStore::new(),
            permissions_enabled: AtomicBool::new(self.permissions_enabled),
            mode: self.mode,
            held: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
            prompts_started: AtomicUsize::new(0),
            commits: AtomicUsize::new(0),
        })
    }
}

impl RecordingHooks {
    /// Built-in networks, permissions off, prompts auto-approved.
    #[must_use]
    pub fn builder() -> RecordingHooksBuilder {
        RecordingHooksBuilder {
            networks: NetworkType::BUILT_IN
                .into_iter()
                .filter_map(NetworkConfiguration::built_in)
                .collect(),
            permissions_enabled: false,
            mode: PromptMode::Auto(true),
        }
    }

    pub fn grant(&self, origin: &str, chain_id: ChainId) {
        self.permissions.grant(origin, chain_id);
    }

    pub fn is_permitted(&self, origin: &str, chain_id: &ChainId) -> bool {
        self.permissions.is_permitted(origin, chain_id)
    }

    pub async fn events(&self) -> Vec<HookEvent> {
        self.events.lock().await.clone()
    }

    /// Number of prompts of either kind that were started, including abandoned ones.
    pub fn prompts_started(&self) -> usize {
        self.prompts_started.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Origins and chains of prompts still waiting for an answer. Abandoned prompts are
    /// excluded.
    pub async fn held_prompts(&self) -> Vec<(String, ChainId)> {
        let mut held = self.held.lock().await;
        held.retain(|prompt| !prompt.reply.is_closed());
        held.iter().map(|prompt| (prompt.origin.clone(), prompt.chain_id)).collect()
    }

    /// Answers the oldest prompt that is still waiting. Returns `false` if there was none.
    pub async fn answer_next(&self, approved: bool) -> bool {
        let mut held = self.held.lock().await;
        while !held.is_empty() {
            let prompt = held.remove(0);
            if prompt.reply.send(approved).is_ok() {
                return true;
            }
        }
        false
    }

    async fn record(&self, event: HookEvent) {
        self.events.lock().await.push(event);
    }

    async fn prompt(&self, origin: &str, chain_id: ChainId) -> bool {
        self.prompts_started.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            PromptMode::Auto(answer) => answer,
            PromptMode::Manual => {
                let (reply, answer) = oneshot::channel();
                self.held.lock().await.push(HeldPrompt {
                    origin: origin.to_string(),
                    chain_id,
                    reply,
                });
                answer.await.unwrap_or(false)
            }
        }
    }
}

#[async_trait]
impl ChainSwitchHooks for RecordingHooks {
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
        self.record(HookEvent::ApprovalRequested {
            origin: origin.to_string(),
            chain_id: candidate.chain_id,
        })
        .await;

        if self.prompt(origin, candidate.chain_id).await {
            Ok(candidate.clone())
        } else {
            Err(SwitchError::UserRejected)
        }
    }

    fn is_permissions_feature_active(&self) -> bool {
        self.permissions_enabled.load(Ordering::SeqCst)
    }

    fn permitted_chains_for_domain(&self, origin: &str) -> PermittedChainSet {
        self.permissions.permitted_chains(origin)
    }

    async fn request_permitted_chains_permission(
        &self,
        origin: &str,
        chain_id: &ChainId,
    ) -> Result<(), SwitchError> {
        self.record(HookEvent::PermissionRequested {
            origin: origin.to_string(),
            chain_id: *chain_id,
        })
        .await;

        if self.prompt(origin, *chain_id).await {
            self.permissions.grant(origin, *chain_id);
            Ok(())
        } else {
            Err(SwitchError::UserRejected)
        }
    }

    async fn switch_active_network_by_type(
        &self,
        origin: &str,
        network_type: NetworkType,
    ) -> Result<(), SwitchError> {
        let configuration = self
            .registry
            .find_by_type(network_type)
            .ok_or_else(|| SwitchError::Internal(format!("no {network_type} network")))?;
        self.state.commit(origin, configuration);
        self.commits.fetch_add(1, Ordering::SeqCst);
        self.record(HookEvent::CommittedByType { origin: origin.to_string(), network_type })
            .await;
        Ok(())
    }

    async fn switch_active_network_by_id(
        &self,
        origin: &str,
        id: &NetworkClientId,
    ) -> Result<(), SwitchError> {
        let configuration = self
            .registry
            .find_by_id(id)
            .ok_or_else(|| SwitchError::Internal(format!("no network with id {id}")))?;
        self.state.commit(origin, configuration);
        self.commits.fetch_add(1, Ordering::SeqCst);
        self.record(HookEvent::CommittedById { origin: origin.to_string(), id: id.clone() })
            .await;
        Ok(())
    }
}
