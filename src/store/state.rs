//! Client-visible state tree.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::models::{Debate, Market, VoteDirection, VoteTarget};
use crate::service::types::DebateFilter;

/// A write the client has sent but the server has not yet confirmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub id: Uuid,
    pub kind: IntentKind,
    pub status: IntentStatus,
    pub created_at: DateTime<Utc>,
}

impl Intent {
    pub fn pending(kind: IntentKind, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            status: IntentStatus::Pending,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum IntentKind {
    Debate,
    Argument { debate_id: String },
    Reply { argument_id: String },
    Vote {
        target: VoteTarget,
        id: String,
        direction: VoteDirection,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum IntentStatus {
    Pending,
    Failed { reason: String },
}

/// How the server answered an intent.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentOutcome {
    Confirmed,
    Failed(String),
}

/// `loading` and `error` are independent flags; callers inspect both.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DebateState {
    pub debates: Vec<Debate>,
    pub markets: Vec<Market>,
    pub loading: bool,
    pub error: Option<String>,
    pub intents: Vec<Intent>,
}

impl DebateState {
    pub fn debate(&self, id: &str) -> Option<&Debate> {
        self.debates.iter().find(|d| d.id == id)
    }

    pub fn market(&self, id: &str) -> Option<&Market> {
        self.markets.iter().find(|m| m.id == id)
    }

    /// Debates passing `filter`, in store order.
    pub fn filtered<'a>(
        &'a self,
        filter: &'a DebateFilter,
        now: DateTime<Utc>,
    ) -> impl Iterator<Item = &'a Debate> + 'a {
        self.debates.iter().filter(move |d| filter.matches(d, now))
    }

    pub fn pending_intents(&self) -> impl Iterator<Item = &Intent> {
        self.intents
            .iter()
            .filter(|i| i.status == IntentStatus::Pending)
    }

    pub fn failed_intents(&self) -> impl Iterator<Item = &Intent> {
        self.intents
            .iter()
            .filter(|i| matches!(i.status, IntentStatus::Failed { .. }))
    }

    /// True while a vote on this target is sent but unconfirmed.
    pub fn vote_pending(&self, target: VoteTarget, id: &str) -> bool {
        self.pending_intents().any(|i| {
            matches!(&i.kind, IntentKind::Vote { target: t, id: vid, .. } if *t == target && vid == id)
        })
    }
}
