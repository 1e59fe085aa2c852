use super::{ApprovalDecision, ApprovalError, ApprovalKind, PendingApproval};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;
use tracing::{debug, info};
use uuid::Uuid;

struct Entry {
    approval: PendingApproval,
    reply: oneshot::Sender<ApprovalDecision>,
}

/// Queue of prompts waiting for a user decision.
///
/// Each prompt owns a one-shot reply channel. Resolving an entry removes it and wakes the
/// waiter; dropping the waiter's future removes the entry too, so abandoned prompts never
/// linger in [`ApprovalQueue::pending`].
#[derive(Default)]
pub struct ApprovalQueue {
    entries: DashMap<Uuid, Entry>,
    next_seq: AtomicU64,
}

/// Removes the entry if the waiting future is dropped before a decision arrives.
struct PendingGuard<'a> {
    entries: &'a DashMap<Uuid, Entry>,
    id: Uuid,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.entries.remove(&self.id).is_some() {
            debug!(id = %self.id, "approval abandoned by requester");
        }
    }
}

impl ApprovalQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a prompt for `origin` and waits for its decision.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Closed`] if the prompt is discarded without a decision.
    pub async fn request(
        &self,
        origin: &str,
        kind: ApprovalKind,
    ) -> Result<ApprovalDecision, ApprovalError> {
        let (reply, decision) = oneshot::channel();
        let id = Uuid::new_v4();
        let approval = PendingApproval {
            id,
            origin: origin.to_string(),
            kind,
            created_at: Utc::now(),
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        };

        info!(id = %id, origin, "approval requested");
        self.entries.insert(id, Entry { approval, reply });
        let _guard = PendingGuard { entries: &self.entries, id };

        decision.await.map_err(|_| ApprovalError::Closed)
    }

    /// Pending prompts, oldest first.
    #[must_use]
    pub fn pending(&self) -> Vec<PendingApproval> {
        let mut pending: Vec<_> =
            self.entries.iter().map(|entry| entry.approval.clone()).collect();
        pending.sort_by_key(|approval| approval.seq);
        pending
    }

    #[must_use]
    pub fn get(&self, id: &Uuid) -> Option<PendingApproval> {
        self.entries.get(id).map(|entry| entry.approval.clone())
    }

    /// Delivers a decision to the prompt with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::UnknownApproval`] if no such prompt is pending.
    pub fn resolve(&self, id: Uuid, decision: ApprovalDecision) -> Result<(), ApprovalError> {
        let (_, entry) = self.entries.remove(&id).ok_or(ApprovalError::UnknownApproval(id))?;
        info!(id = %id, origin = %entry.approval.origin, ?decision, "approval resolved");
        // The requester may have gone away in the meantime; nothing to deliver then.
        let _ = entry.reply.send(decision);
        Ok(())
    }

    /// Rejects every prompt raised by `origin`. Returns how many were rejected.
    pub fn reject_all_for(&self, origin: &str) -> usize {
        let ids: Vec<Uuid> = self
            .entries
            .iter()
            .filter(|entry| entry.approval.origin == origin)
            .map(|entry| *entry.key())
            .collect();

        ids.into_iter()
            .filter(|id| self.resolve(*id, ApprovalDecision::Rejected).is_ok())
            .count()
    }

    /// Drops every prompt without a decision. Waiters observe [`ApprovalError::Closed`].
    pub fn close_all(&self) -> usize {
        let ids: Vec<Uuid> = self.entries.iter().map(|entry| *entry.key()).collect();
        let closed = ids.into_iter().filter(|id| self.entries.remove(id).is_some()).count();
        if closed > 0 {
            info!(closed, "pending approvals discarded");
        }
        closed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
