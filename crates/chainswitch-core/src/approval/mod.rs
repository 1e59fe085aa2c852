//! User approval prompts.
//!
//! The wallet never decides on its own whether a dApp may change the active network. Each
//! decision point becomes a [`PendingApproval`] in the [`ApprovalQueue`]; an external presenter
//! (the HTTP approval endpoints, a UI, a test) lists the queue and resolves entries. The task
//! that raised the prompt stays suspended until then.
//!
//! ```text
//! WalletHooks                 ApprovalQueue                 Presenter
//!     │  request(origin, kind)     │                            │
//!     │ ─────────────────────────► │  pending()                 │
//!     │        (suspended)         │ ◄───────────────────────── │
//!     │                            │  resolve(id, Approved)     │
//!     │ ◄───────────────────────── │ ◄───────────────────────── │
//! ```

mod queue;

pub use queue::ApprovalQueue;

use crate::chain::{ChainId, NetworkConfiguration};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// What the user is being asked to approve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ApprovalKind {
    /// Switch the origin from its current network to `to`.
    #[serde(rename_all = "camelCase")]
    SwitchNetwork { from: ChainId, to: NetworkConfiguration },

    /// Allow the origin to use `chain_id`.
    #[serde(rename_all = "camelCase")]
    PermittedChains { chain_id: ChainId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approved,
    Rejected,
}

impl ApprovalDecision {
    #[must_use]
    pub fn from_approved(approved: bool) -> Self {
        if approved {
            Self::Approved
        } else {
            Self::Rejected
        }
    }
}

/// A prompt waiting for a decision.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingApproval {
    pub id: Uuid,
    pub origin: String,
    #[serde(flatten)]
    pub kind: ApprovalKind,
    pub created_at: DateTime<Utc>,
    /// Insertion order; breaks ties between equal timestamps.
    #[serde(skip)]
    pub(crate) seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApprovalError {
    #[error("no pending approval with id {0}")]
    UnknownApproval(Uuid),

    /// The queue dropped the prompt without a decision, e.g. during shutdown.
    #[error("approval queue closed before a decision was made")]
    Closed,
}
