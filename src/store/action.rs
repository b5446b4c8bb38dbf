//! The closed set of state transitions.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::models::{Argument, Debate, Market, Reply, VoteDirection, VoteTarget};
use crate::store::state::{Intent, IntentOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLoading(bool),
    /// Also clears `loading`.
    SetError(Option<String>),
    /// Full replacement; also clears `loading`.
    SetDebates(Vec<Debate>),
    SetMarkets(Vec<Market>),
    /// Prepends, so the newest debate comes first.
    AddDebate(Debate),
    AddArgument {
        debate_id: String,
        argument: Argument,
    },
    AddReply {
        argument_id: String,
        reply: Reply,
    },
    UpdateVote {
        target: VoteTarget,
        id: String,
        direction: VoteDirection,
    },
    UpdateDebateActivity {
        debate_id: String,
        timestamp: DateTime<Utc>,
    },
    BeginIntent(Intent),
    ResolveIntent {
        id: Uuid,
        outcome: IntentOutcome,
    },
    ClearFailedIntents,
}

impl Action {
    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetLoading(_) => "SET_LOADING",
            Action::SetError(_) => "SET_ERROR",
            Action::SetDebates(_) => "SET_DEBATES",
            Action::SetMarkets(_) => "SET_MARKETS",
            Action::AddDebate(_) => "ADD_DEBATE",
            Action::AddArgument { .. } => "ADD_ARGUMENT",
            Action::AddReply { .. } => "ADD_REPLY",
            Action::UpdateVote { .. } => "UPDATE_VOTE",
            Action::UpdateDebateActivity { .. } => "UPDATE_DEBATE_ACTIVITY",
            Action::BeginIntent(_) => "BEGIN_INTENT",
            Action::ResolveIntent { .. } => "RESOLVE_INTENT",
            Action::ClearFailedIntents => "CLEAR_FAILED_INTENTS",
        }
    }
}
