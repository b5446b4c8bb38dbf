//! Debate service: validation, id assignment and assembly of the nested
//! debate → argument → reply view over the flat repositories.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::db::models::{
    new_id, Argument, Debate, Market, Reply, SortBy, Stance, VoteDirection, VoteTarget,
};
use crate::db::repository::Repositories;
use crate::error::{AppError, Result};
use crate::events::bus::{EventBus, ForumEvent};
use crate::oracle::scorer::ArgumentScorer;
use crate::service::types::{
    parse_sort, ArgumentQuery, CreateArgumentRequest, CreateDebateRequest, CreateReplyRequest,
    CreatedDebate, DebateFilter, DebateQuery, ServiceStatus, VoteReceipt, VoteRequest,
};
use crate::votes::ledger::VoteLedger;

const PREVIEW_CHARS: usize = 150;

pub struct DebateService {
    repos: Repositories,
    ledger: VoteLedger,
    scorer: Arc<dyn ArgumentScorer>,
    events: Arc<EventBus>,
}

impl DebateService {
    pub fn new(repos: Repositories, scorer: Arc<dyn ArgumentScorer>, events: Arc<EventBus>) -> Self {
        Self {
            repos,
            ledger: VoteLedger::new(),
            scorer,
            events,
        }
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    // ── Debates ────────────────────────────────────────────────────

    /// Every debate, assembled with its arguments and replies, filtered and sorted.
    /// Without a recognised sort key the newest-created debate comes first.
    pub fn list_debates(&self, query: &DebateQuery, now: DateTime<Utc>) -> Result<Vec<Debate>> {
        let filter = DebateFilter::from_query(query)?;
        let mut by_debate = self.arguments_by_debate();

        let mut debates: Vec<Debate> = self
            .repos
            .debates
            .list()
            .into_iter()
            .rev()
            .map(|d| {
                let args = by_debate.remove(&d.id).unwrap_or_default();
                assemble(d, args)
            })
            .filter(|d| filter.matches(d, now))
            .collect();

        if let Some(sort) = parse_sort(query.sort_by.as_deref()) {
            sort_debates(&mut debates, sort);
        }
        Ok(debates)
    }

    pub fn get_debate(&self, id: &str) -> Option<Debate> {
        let debate = self.repos.debates.get_by_id(id)?;
        let args = self.arguments_by_debate().remove(id).unwrap_or_default();
        Some(assemble(debate, args))
    }

    /// Create a debate together with its opening argument.
    pub fn create_debate(&self, req: CreateDebateRequest, now: DateTime<Utc>) -> Result<CreatedDebate> {
        let (
            Some(title),
            Some(description),
            Some(market_id),
            Some(category),
            Some(stance),
            Some(initial_argument),
            Some(author),
            Some(author_address),
        ) = (
            present(req.title),
            present(req.description),
            present(req.market_id),
            present(req.category),
            present(req.stance),
            present(req.initial_argument),
            present(req.author),
            present(req.author_address),
        )
        else {
            warn!("debate creation rejected: missing fields");
            return Err(AppError::MissingFields);
        };
        let stance: Stance = stance.trim().parse().map_err(AppError::InvalidField)?;

        let market_question = self
            .repos
            .markets
            .get_by_id(&market_id)
            .map(|m| m.question)
            .unwrap_or_else(|| description.clone());

        let debate = Debate {
            id: new_id(),
            title,
            description,
            market_id,
            market_question,
            category,
            author: author.clone(),
            author_address: author_address.clone(),
            created_at: now,
            last_activity: now,
            argument_count: 1,
            upvotes: 0,
            downvotes: 0,
            ai_score: 0,
            stance,
            preview: preview_of(&initial_argument),
            is_hot: false,
            participants: 1,
            arguments: Vec::new(),
        };
        let debate = self.repos.debates.insert(debate)?;

        // The opening argument is not scored.
        let argument = Argument {
            id: new_id(),
            debate_id: debate.id.clone(),
            author,
            author_address,
            content: initial_argument,
            stance,
            timestamp: now,
            upvotes: 0,
            downvotes: 0,
            ai_score: 0,
            ai_analysis: String::new(),
            replies: Vec::new(),
            is_highlighted: false,
        };
        let argument = self.repos.arguments.insert(argument)?;

        info!(debate_id = %debate.id, market_id = %debate.market_id, "debate created");
        self.events.publish(ForumEvent::DebateCreated {
            debate_id: debate.id.clone(),
            market_id: debate.market_id.clone(),
            author_address: debate.author_address.clone(),
        });

        Ok(CreatedDebate { debate, argument })
    }

    // ── Arguments ──────────────────────────────────────────────────

    /// Arguments with nested replies, optionally scoped to one debate.
    pub fn list_arguments(&self, query: &ArgumentQuery) -> Vec<Argument> {
        let mut replies = self.replies_by_argument();
        let mut arguments: Vec<Argument> = self
            .repos
            .arguments
            .list()
            .into_iter()
            .filter(|a| query.debate_id.as_deref().map_or(true, |id| a.debate_id == id))
            .map(|mut a| {
                a.replies = replies.remove(&a.id).unwrap_or_default();
                a
            })
            .collect();

        if let Some(sort) = parse_sort(query.sort_by.as_deref()) {
            sort_arguments(&mut arguments, sort);
        }
        arguments
    }

    pub fn create_argument(&self, req: CreateArgumentRequest, now: DateTime<Utc>) -> Result<Argument> {
        let (Some(debate_id), Some(author), Some(author_address), Some(content), Some(stance)) = (
            present(req.debate_id),
            present(req.author),
            present(req.author_address),
            present(req.content),
            present(req.stance),
        ) else {
            return Err(AppError::MissingFields);
        };
        let stance: Stance = stance.trim().parse().map_err(AppError::InvalidField)?;

        if self.repos.debates.get_by_id(&debate_id).is_none() {
            return Err(AppError::NotFound("Debate".into()));
        }

        let assessment = self.scorer.assess(&content);
        let argument = self.repos.arguments.insert(Argument {
            id: new_id(),
            debate_id,
            author,
            author_address,
            content,
            stance,
            timestamp: now,
            upvotes: 0,
            downvotes: 0,
            ai_score: assessment.score,
            ai_analysis: assessment.analysis,
            replies: Vec::new(),
            is_highlighted: false,
        })?;

        self.repos.debates.update(&argument.debate_id, &mut |d: &mut Debate| {
            d.argument_count += 1;
            d.last_activity = now;
        });

        debug!(argument_id = %argument.id, debate_id = %argument.debate_id, score = argument.ai_score, "argument stored");
        self.events.publish(ForumEvent::ArgumentPosted {
            debate_id: argument.debate_id.clone(),
            argument_id: argument.id.clone(),
            stance: argument.stance,
            ai_score: argument.ai_score,
        });

        Ok(argument)
    }

    // ── Replies ────────────────────────────────────────────────────

    /// Replies in posting order, optionally scoped to one argument.
    pub fn list_replies(&self, argument_id: Option<&str>) -> Vec<Reply> {
        self.repos
            .replies
            .list()
            .into_iter()
            .filter(|r| argument_id.map_or(true, |id| r.argument_id == id))
            .collect()
    }

    pub fn create_reply(&self, req: CreateReplyRequest, now: DateTime<Utc>) -> Result<Reply> {
        let (Some(argument_id), Some(author), Some(author_address), Some(content)) = (
            present(req.argument_id),
            present(req.author),
            present(req.author_address),
            present(req.content),
        ) else {
            return Err(AppError::MissingFields);
        };

        let Some(parent) = self.repos.arguments.get_by_id(&argument_id) else {
            return Err(AppError::NotFound("Argument".into()));
        };

        let reply = self.repos.replies.insert(Reply {
            id: new_id(),
            argument_id,
            author,
            author_address,
            content,
            timestamp: now,
            upvotes: 0,
            downvotes: 0,
        })?;

        // Only the owning debate counts as active.
        self.repos
            .debates
            .update(&parent.debate_id, &mut |d: &mut Debate| d.last_activity = now);

        self.events.publish(ForumEvent::ReplyPosted {
            argument_id: reply.argument_id.clone(),
            reply_id: reply.id.clone(),
        });

        Ok(reply)
    }

    // ── Votes ──────────────────────────────────────────────────────

    /// Record a vote in the ledger. Counters are left to the caller.
    pub fn cast_vote(&self, req: VoteRequest) -> Result<VoteReceipt> {
        let (Some(target), Some(id), Some(vote_type), Some(user_id)) = (
            present(req.target),
            present(req.id),
            present(req.vote_type),
            present(req.user_id),
        ) else {
            return Err(AppError::MissingFields);
        };
        let target: VoteTarget = target.parse().map_err(AppError::InvalidField)?;
        let direction: VoteDirection = vote_type.parse().map_err(AppError::InvalidField)?;

        self.ledger.record(&user_id, target, &id)?;

        self.events.publish(ForumEvent::VoteRecorded {
            target,
            id: id.clone(),
            direction,
            user_id,
        });

        let verb = match direction {
            VoteDirection::Up => "upvoted",
            VoteDirection::Down => "downvoted",
        };
        Ok(VoteReceipt {
            message: format!("Vote {verb} successfully"),
            target: target.as_str().to_string(),
            id,
            vote_type: direction.as_str().to_string(),
        })
    }

    // ── Markets / status ───────────────────────────────────────────

    pub fn list_markets(&self) -> Vec<Market> {
        self.repos.markets.list()
    }

    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            markets: self.repos.markets.count(),
            debates: self.repos.debates.count(),
            arguments: self.repos.arguments.count(),
            replies: self.repos.replies.count(),
            voters: self.ledger.voter_count(),
            votes: self.ledger.vote_count(),
            event_subscribers: self.events.subscriber_count(),
        }
    }

    // ── Assembly helpers ───────────────────────────────────────────

    fn replies_by_argument(&self) -> HashMap<String, Vec<Reply>> {
        let mut grouped: HashMap<String, Vec<Reply>> = HashMap::new();
        for reply in self.repos.replies.list() {
            grouped.entry(reply.argument_id.clone()).or_default().push(reply);
        }
        grouped
    }

    fn arguments_by_debate(&self) -> HashMap<String, Vec<Argument>> {
        let mut replies = self.replies_by_argument();
        let mut grouped: HashMap<String, Vec<Argument>> = HashMap::new();
        for mut argument in self.repos.arguments.list() {
            argument.replies = replies.remove(&argument.id).unwrap_or_default();
            grouped
                .entry(argument.debate_id.clone())
                .or_default()
                .push(argument);
        }
        grouped
    }
}

/// The field as sent, if present and not blank.
fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

/// First 150 characters followed by an ellipsis.
fn preview_of(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

/// Attach arguments and recompute the derived counters so they match.
fn assemble(mut debate: Debate, arguments: Vec<Argument>) -> Debate {
    let mut addresses: HashSet<&str> = HashSet::new();
    addresses.insert(&debate.author_address);
    for a in &arguments {
        addresses.insert(&a.author_address);
    }
    let participants = addresses.len() as u32;

    debate.argument_count = arguments.len() as u32;
    debate.participants = participants;
    debate.arguments = arguments;
    debate
}

pub fn sort_debates(debates: &mut [Debate], sort: SortBy) {
    match sort {
        SortBy::Recent => debates.sort_by(|a, b| b.last_activity.cmp(&a.last_activity)),
        SortBy::Popular => debates.sort_by(|a, b| b.net_votes().cmp(&a.net_votes())),
        SortBy::AiScore => debates.sort_by(|a, b| b.ai_score.cmp(&a.ai_score)),
    }
}

pub fn sort_arguments(arguments: &mut [Argument], sort: SortBy) {
    match sort {
        SortBy::Recent => arguments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortBy::Popular => arguments.sort_by(|a, b| b.net_votes().cmp(&a.net_votes())),
        SortBy::AiScore => arguments.sort_by(|a, b| b.ai_score.cmp(&a.ai_score)),
    }
}
