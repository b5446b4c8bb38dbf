//! Vote ledger: remembers which targets each user has voted on.
//!
//! A user gets one vote per `type:id` key, of either polarity. Votes are
//! never withdrawn or changed, and the ledger does not touch vote counters.

use std::collections::HashSet;

use dashmap::DashMap;
use tracing::debug;

use crate::db::models::VoteTarget;
use crate::error::{AppError, Result};

/// Ledger key for a target, e.g. `argument:42`.
pub fn vote_key(target: VoteTarget, id: &str) -> String {
    format!("{}:{}", target.as_str(), id)
}

pub struct VoteLedger {
    /// user id → voted keys
    votes: DashMap<String, HashSet<String>>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self {
            votes: DashMap::new(),
        }
    }

    /// Record a vote. Fails with `DuplicateVote` if the user already voted on
    /// the target. Check and insert happen under the same shard lock.
    pub fn record(&self, user_id: &str, target: VoteTarget, id: &str) -> Result<()> {
        let key = vote_key(target, id);
        let mut voted = self.votes.entry(user_id.to_string()).or_default();
        if !voted.insert(key.clone()) {
            return Err(AppError::DuplicateVote);
        }
        debug!(user_id, key = %key, "vote recorded");
        Ok(())
    }

    pub fn has_voted(&self, user_id: &str, target: VoteTarget, id: &str) -> bool {
        self.votes
            .get(user_id)
            .is_some_and(|set| set.contains(&vote_key(target, id)))
    }

    /// Number of distinct users who have voted at least once.
    pub fn voter_count(&self) -> usize {
        self.votes.len()
    }

    pub fn vote_count(&self) -> usize {
        self.votes.iter().map(|e| e.value().len()).sum()
    }
}

impl Default for VoteLedger {
    fn default() -> Self {
        Self::new()
    }
}
