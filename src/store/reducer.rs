//! Reducer: applies one [`Action`] to the state tree.
//!
//! `now` is passed in rather than read from the clock, so the same inputs
//! always produce the same state. Entity lookup is a linear scan.

use chrono::{DateTime, Utc};

use crate::db::models::{Debate, VoteDirection, VoteTarget};
use crate::store::action::Action;
use crate::store::state::{DebateState, IntentOutcome, IntentStatus};

pub fn reduce(state: &mut DebateState, action: Action, now: DateTime<Utc>) {
    match action {
        Action::SetLoading(loading) => state.loading = loading,
        Action::SetError(error) => {
            state.error = error;
            state.loading = false;
        }
        Action::SetDebates(debates) => {
            state.debates = debates;
            state.loading = false;
        }
        Action::SetMarkets(markets) => state.markets = markets,
        Action::AddDebate(debate) => state.debates.insert(0, debate),
        Action::AddArgument {
            debate_id,
            argument,
        } => {
            if let Some(debate) = state.debates.iter_mut().find(|d| d.id == debate_id) {
                debate.arguments.push(argument);
                debate.argument_count += 1;
                debate.last_activity = now;
            }
        }
        Action::AddReply { argument_id, reply } => {
            for debate in state.debates.iter_mut() {
                if let Some(argument) = debate.arguments.iter_mut().find(|a| a.id == argument_id) {
                    argument.replies.push(reply);
                    debate.last_activity = now;
                    return;
                }
            }
        }
        Action::UpdateVote {
            target,
            id,
            direction,
        } => {
            if let Some((up, down)) = counters_mut(&mut state.debates, target, &id) {
                match direction {
                    VoteDirection::Up => *up += 1,
                    VoteDirection::Down => *down += 1,
                }
            }
        }
        Action::UpdateDebateActivity {
            debate_id,
            timestamp,
        } => {
            if let Some(debate) = state.debates.iter_mut().find(|d| d.id == debate_id) {
                debate.last_activity = timestamp;
            }
        }
        Action::BeginIntent(intent) => state.intents.push(intent),
        Action::ResolveIntent { id, outcome } => match outcome {
            IntentOutcome::Confirmed => state.intents.retain(|i| i.id != id),
            IntentOutcome::Failed(reason) => {
                if let Some(intent) = state.intents.iter_mut().find(|i| i.id == id) {
                    intent.status = IntentStatus::Failed { reason };
                }
            }
        },
        Action::ClearFailedIntents => state
            .intents
            .retain(|i| i.status == IntentStatus::Pending),
    }
}

/// Up/down counters of the first argument or reply with this id.
fn counters_mut<'a>(
    debates: &'a mut [Debate],
    target: VoteTarget,
    id: &str,
) -> Option<(&'a mut u32, &'a mut u32)> {
    let mut arguments = debates.iter_mut().flat_map(|d| d.arguments.iter_mut());
    match target {
        VoteTarget::Argument => arguments
            .find(|a| a.id == id)
            .map(|a| (&mut a.upvotes, &mut a.downvotes)),
        VoteTarget::Reply => arguments
            .flat_map(|a| a.replies.iter_mut())
            .find(|r| r.id == id)
            .map(|r| (&mut r.upvotes, &mut r.downvotes)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::db::models::{Argument, Reply, Stance};
    use crate::store::state::{Intent, IntentKind};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn debate(id: &str) -> Debate {
        Debate {
            id: id.into(),
            title: format!("debate {id}"),
            description: String::new(),
            market_id: "1".into(),
            market_question: String::new(),
            category: "Crypto".into(),
            author: "A".into(),
            author_address: "0xA".into(),
            created_at: t0(),
            last_activity: t0(),
            argument_count: 0,
            upvotes: 0,
            downvotes: 0,
            ai_score: 50,
            stance: Stance::Yes,
            preview: String::new(),
            is_hot: false,
            participants: 1,
            arguments: Vec::new(),
        }
    }

    fn argument(id: &str, debate_id: &str) -> Argument {
        Argument {
            id: id.into(),
            debate_id: debate_id.into(),
            author: "B".into(),
            author_address: "0xB".into(),
            content: "c".into(),
            stance: Stance::No,
            timestamp: t0(),
            upvotes: 0,
            downvotes: 0,
            ai_score: 70,
            ai_analysis: String::new(),
            replies: Vec::new(),
            is_highlighted: false,
        }
    }

    fn reply(id: &str, argument_id: &str) -> Reply {
        Reply {
            id: id.into(),
            argument_id: argument_id.into(),
            author: "C".into(),
            author_address: "0xC".into(),
            content: "r".into(),
            timestamp: t0(),
            upvotes: 0,
            downvotes: 0,
        }
    }

    fn apply(state: &mut DebateState, action: Action) {
        reduce(state, action, t0() + Duration::minutes(10));
    }

    #[test]
    fn add_debate_keeps_newest_first() {
        let mut state = DebateState::default();
        for id in ["1", "2", "3"] {
            apply(&mut state, Action::AddDebate(debate(id)));
        }
        let ids: Vec<_> = state.debates.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[test]
    fn add_argument_grows_matching_debate_only() {
        let mut state = DebateState::default();
        apply(&mut state, Action::AddDebate(debate("1")));
        apply(&mut state, Action::AddDebate(debate("2")));

        apply(
            &mut state,
            Action::AddArgument {
                debate_id: "1".into(),
                argument: argument("a", "1"),
            },
        );

        let d1 = state.debate("1").unwrap();
        assert_eq!(d1.arguments.len(), 1);
        assert_eq!(d1.argument_count, 1);
        assert_eq!(d1.last_activity, t0() + Duration::minutes(10));
        let d2 = state.debate("2").unwrap();
        assert_eq!(d2.argument_count, 0);
        assert_eq!(d2.last_activity, t0());
    }

    #[test]
    fn add_argument_to_missing_debate_is_noop() {
        let mut state = DebateState::default();
        apply(&mut state, Action::AddDebate(debate("1")));
        let before = state.clone();

        apply(
            &mut state,
            Action::AddArgument {
                debate_id: "nope".into(),
                argument: argument("a", "nope"),
            },
        );
        assert_eq!(state, before);
    }

    #[test]
    fn add_reply_stamps_owning_debate_only() {
        let mut state = DebateState::default();
        let mut d1 = debate("1");
        d1.arguments.push(argument("a1", "1"));
        let mut d2 = debate("2");
        d2.arguments.push(argument("a2", "2"));
        apply(&mut state, Action::SetDebates(vec![d1, d2]));

        apply(
            &mut state,
            Action::AddReply {
                argument_id: "a2".into(),
                reply: reply("r", "a2"),
            },
        );

        assert_eq!(state.debate("1").unwrap().last_activity, t0());
        let d2 = state.debate("2").unwrap();
        assert_eq!(d2.last_activity, t0() + Duration::minutes(10));
        assert_eq!(d2.arguments[0].replies.len(), 1);
        // Replies don't count as arguments.
        assert_eq!(d2.argument_count, 0);
    }

    #[test]
    fn update_vote_applies_once_even_with_duplicate_ids() {
        let mut state = DebateState::default();
        let mut d1 = debate("1");
        d1.arguments.push(argument("dup", "1"));
        d1.arguments.push(argument("other", "1"));
        let mut d2 = debate("2");
        d2.arguments.push(argument("dup", "2"));
        apply(&mut state, Action::SetDebates(vec![d1, d2]));

        apply(
            &mut state,
            Action::UpdateVote {
                target: VoteTarget::Argument,
                id: "dup".into(),
                direction: VoteDirection::Up,
            },
        );

        let total_up: u32 = state
            .debates
            .iter()
            .flat_map(|d| d.arguments.iter())
            .map(|a| a.upvotes)
            .sum();
        let total_down: u32 = state
            .debates
            .iter()
            .flat_map(|d| d.arguments.iter())
            .map(|a| a.downvotes)
            .sum();
        assert_eq!(total_up, 1);
        assert_eq!(total_down, 0);
        assert_eq!(state.debates[0].arguments[0].upvotes, 1);
    }

    #[test]
    fn update_vote_on_reply_ignores_argument_with_same_id() {
        let mut state = DebateState::default();
        let mut d = debate("1");
        let mut a = argument("x", "1");
        a.replies.push(reply("x", "x"));
        d.arguments.push(a);
        apply(&mut state, Action::SetDebates(vec![d]));

        apply(
            &mut state,
            Action::UpdateVote {
                target: VoteTarget::Reply,
                id: "x".into(),
                direction: VoteDirection::Down,
            },
        );

        let a = &state.debates[0].arguments[0];
        assert_eq!(a.downvotes, 0);
        assert_eq!(a.replies[0].downvotes, 1);
    }

    #[test]
    fn error_and_debates_clear_loading() {
        let mut state = DebateState::default();
        apply(&mut state, Action::SetLoading(true));
        apply(&mut state, Action::SetError(Some("boom".into())));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("boom"));

        apply(&mut state, Action::SetLoading(true));
        apply(&mut state, Action::SetDebates(vec![debate("9")]));
        assert!(!state.loading);
        // Independent of the error flag.
        assert_eq!(state.error.as_deref(), Some("boom"));
    }

    #[test]
    fn set_debates_discards_local_edits() {
        let mut state = DebateState::default();
        apply(&mut state, Action::AddDebate(debate("local")));
        apply(&mut state, Action::SetDebates(vec![debate("server")]));
        assert!(state.debate("local").is_none());
        assert!(state.debate("server").is_some());
    }

    #[test]
    fn debate_activity_is_set_explicitly() {
        let mut state = DebateState::default();
        apply(&mut state, Action::AddDebate(debate("1")));
        let stamp = t0() + Duration::hours(3);
        apply(
            &mut state,
            Action::UpdateDebateActivity {
                debate_id: "1".into(),
                timestamp: stamp,
            },
        );
        assert_eq!(state.debates[0].last_activity, stamp);
    }

    #[test]
    fn intents_move_from_pending_to_resolved() {
        let mut state = DebateState::default();
        let vote = Intent::pending(
            IntentKind::Vote {
                target: VoteTarget::Argument,
                id: "a".into(),
                direction: VoteDirection::Up,
            },
            t0(),
        );
        let reply = Intent::pending(
            IntentKind::Reply {
                argument_id: "a".into(),
            },
            t0(),
        );
        let (vote_id, reply_id) = (vote.id, reply.id);
        apply(&mut state, Action::BeginIntent(vote));
        apply(&mut state, Action::BeginIntent(reply));
        assert!(state.vote_pending(VoteTarget::Argument, "a"));

        apply(
            &mut state,
            Action::ResolveIntent {
                id: vote_id,
                outcome: IntentOutcome::Confirmed,
            },
        );
        assert!(!state.vote_pending(VoteTarget::Argument, "a"));

        apply(
            &mut state,
            Action::ResolveIntent {
                id: reply_id,
                outcome: IntentOutcome::Failed("offline".into()),
            },
        );
        assert_eq!(state.pending_intents().count(), 0);
        assert_eq!(state.failed_intents().count(), 1);

        apply(&mut state, Action::ClearFailedIntents);
        assert!(state.intents.is_empty());
    }
}
