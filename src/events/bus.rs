//! Internal event broadcast: tokio::broadcast channel for forum activity.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::db::models::{Stance, VoteDirection, VoteTarget};

/// Forum-wide events for logging and downstream listeners.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForumEvent {
    /// A debate and its opening argument were created.
    DebateCreated {
        debate_id: String,
        market_id: String,
        author_address: String,
    },
    /// An argument was posted to a debate.
    ArgumentPosted {
        debate_id: String,
        argument_id: String,
        stance: Stance,
        ai_score: u8,
    },
    /// A reply was posted under an argument.
    ReplyPosted {
        argument_id: String,
        reply_id: String,
    },
    /// The ledger accepted a vote.
    VoteRecorded {
        target: VoteTarget,
        id: String,
        direction: VoteDirection,
        user_id: String,
    },
}

/// Central event bus for broadcasting events to all subscribers.
pub struct EventBus {
    tx: broadcast::Sender<ForumEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: ForumEvent) {
        // No subscribers is fine.
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ForumEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Log every event until the bus closes.
pub async fn run_activity_log(mut events: broadcast::Receiver<ForumEvent>) {
    loop {
        match events.recv().await {
            Ok(ev) => match &ev {
                ForumEvent::DebateCreated {
                    debate_id,
                    market_id,
                    author_address,
                } => info!(%debate_id, %market_id, author = %author_address, "debate created"),
                ForumEvent::ArgumentPosted {
                    debate_id,
                    argument_id,
                    stance,
                    ai_score,
                } => info!(%debate_id, %argument_id, %stance, ai_score, "argument posted"),
                ForumEvent::ReplyPosted {
                    argument_id,
                    reply_id,
                } => info!(%argument_id, %reply_id, "reply posted"),
                ForumEvent::VoteRecorded {
                    target,
                    id,
                    direction,
                    user_id,
                } => info!(%target, %id, %direction, %user_id, "vote recorded"),
            },
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(skipped = n, "activity log receiver lagged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                info!("event bus closed, activity log stopping");
                break;
            }
        }
    }
}
