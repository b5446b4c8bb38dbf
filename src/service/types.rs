//! Request, query and response bodies of the JSON API.
//!
//! Request fields are all optional so a body with missing fields still
//! deserializes; the service turns absent or blank fields into
//! `MissingFields`. The client builds the same structs to send.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::{Argument, Debate, Market, Reply, SortBy, Stance};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDebateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub market_id: Option<String>,
    pub category: Option<String>,
    pub stance: Option<String>,
    pub initial_argument: Option<String>,
    pub author: Option<String>,
    pub author_address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArgumentRequest {
    pub debate_id: Option<String>,
    pub author: Option<String>,
    pub author_address: Option<String>,
    pub content: Option<String>,
    pub stance: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyRequest {
    pub argument_id: Option<String>,
    pub author: Option<String>,
    pub author_address: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(rename = "type")]
    pub target: Option<String>,
    pub id: Option<String>,
    pub vote_type: Option<String>,
    pub user_id: Option<String>,
}

/// Query string of `GET /api/debates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateQuery {
    pub sort_by: Option<String>,
    pub category: Option<String>,
    pub stance: Option<String>,
    pub min_score: Option<u8>,
    pub max_score: Option<u8>,
    pub window: Option<String>,
}

/// Query string of `GET /api/arguments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentQuery {
    pub debate_id: Option<String>,
    pub sort_by: Option<String>,
}

/// Query string of `GET /api/replies`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyQuery {
    pub argument_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateList {
    pub debates: Vec<Debate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedDebate {
    pub debate: Debate,
    pub argument: Argument,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentList {
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedArgument {
    pub argument: Argument,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyList {
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedReply {
    pub reply: Reply,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketList {
    pub markets: Vec<Market>,
}

/// Body of a successful `POST /api/vote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteReceipt {
    pub message: String,
    #[serde(rename = "type")]
    pub target: String,
    pub id: String,
    pub vote_type: String,
}

/// Collection sizes reported by `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub markets: usize,
    pub debates: usize,
    pub arguments: usize,
    pub replies: usize,
    pub voters: usize,
    pub votes: usize,
    pub event_subscribers: usize,
}

/// Sort key from a query string. Absent means `recent`; unknown means unsorted.
pub fn parse_sort(raw: Option<&str>) -> Option<SortBy> {
    match raw {
        None => Some(SortBy::Recent),
        Some(s) => s.parse().ok(),
    }
}

/// How far back `lastActivity` may lie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityWindow {
    #[default]
    All,
    LastHour,
    LastDay,
    LastWeek,
}

impl ActivityWindow {
    fn span(&self) -> Option<Duration> {
        match self {
            ActivityWindow::All => None,
            ActivityWindow::LastHour => Some(Duration::hours(1)),
            ActivityWindow::LastDay => Some(Duration::hours(24)),
            ActivityWindow::LastWeek => Some(Duration::days(7)),
        }
    }
}

impl FromStr for ActivityWindow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "all" => Ok(ActivityWindow::All),
            "1h" => Ok(ActivityWindow::LastHour),
            "24h" => Ok(ActivityWindow::LastDay),
            "7d" => Ok(ActivityWindow::LastWeek),
            other => Err(format!("Invalid window: {other}")),
        }
    }
}

/// Narrowing applied to the debate list. An empty set accepts everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebateFilter {
    pub categories: Vec<String>,
    pub stances: Vec<Stance>,
    pub min_score: Option<u8>,
    pub max_score: Option<u8>,
    pub window: ActivityWindow,
}

impl DebateFilter {
    pub fn from_query(query: &DebateQuery) -> Result<Self> {
        let stances = list_param(query.stance.as_deref())
            .map(str::parse::<Stance>)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(AppError::InvalidField)?;
        let window = query
            .window
            .as_deref()
            .map(str::parse::<ActivityWindow>)
            .transpose()
            .map_err(AppError::InvalidField)?
            .unwrap_or_default();
        Ok(Self {
            categories: list_param(query.category.as_deref())
                .map(str::to_string)
                .collect(),
            stances,
            min_score: query.min_score,
            max_score: query.max_score,
            window,
        })
    }

    pub fn matches(&self, debate: &Debate, now: DateTime<Utc>) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&debate.category) {
            return false;
        }
        if !self.stances.is_empty() && !self.stances.contains(&debate.stance) {
            return false;
        }
        if self.min_score.is_some_and(|min| debate.ai_score < min) {
            return false;
        }
        if self.max_score.is_some_and(|max| debate.ai_score > max) {
            return false;
        }
        match self.window.span() {
            Some(span) => debate.last_activity >= now - span,
            None => true,
        }
    }
}

/// Non-blank entries of a comma-separated query value, e.g. `Crypto,DeFi`.
fn list_param(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
