//! Record types for every collection, plus the small enums they share.
//!
//! All records serialize camelCase so the JSON on the wire matches what the
//! web front-end reads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Binary position attached to debates and arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Yes,
    No,
}

impl Stance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Yes => "yes",
            Stance::No => "no",
        }
    }
}

impl FromStr for Stance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yes" => Ok(Stance::Yes),
            "no" => Ok(Stance::No),
            _ => Err(r#"Invalid stance. Must be "yes" or "no""#.into()),
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a vote is cast on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteTarget {
    Argument,
    Reply,
}

impl VoteTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteTarget::Argument => "argument",
            VoteTarget::Reply => "reply",
        }
    }
}

impl FromStr for VoteTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "argument" => Ok(VoteTarget::Argument),
            "reply" => Ok(VoteTarget::Reply),
            _ => Err(r#"Invalid type. Must be "argument" or "reply""#.into()),
        }
    }
}

impl fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vote polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }
}

impl FromStr for VoteDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(VoteDirection::Up),
            "down" => Ok(VoteDirection::Down),
            _ => Err(r#"Invalid vote type. Must be "up" or "down""#.into()),
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort key accepted by the list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    #[serde(rename = "recent")]
    Recent,
    #[serde(rename = "popular")]
    Popular,
    #[serde(rename = "ai-score")]
    AiScore,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Recent => "recent",
            SortBy::Popular => "popular",
            SortBy::AiScore => "ai-score",
        }
    }
}

impl FromStr for SortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recent" => Ok(SortBy::Recent),
            "popular" => Ok(SortBy::Popular),
            "ai-score" => Ok(SortBy::AiScore),
            _ => Err(()),
        }
    }
}

/// Anything stored in a repository is addressed by a string id.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// A prediction market a debate can reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: String,
    pub question: String,
    pub category: String,
    pub outcomes: Vec<String>,
    pub volume: f64,
    pub liquidity: f64,
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

/// A discussion thread tied to one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub market_id: String,
    pub market_question: String,
    pub category: String,
    pub author: String,
    pub author_address: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub argument_count: u32,
    pub upvotes: u32,
    pub downvotes: u32,
    pub ai_score: u8,
    pub stance: Stance,
    pub preview: String,
    pub is_hot: bool,
    pub participants: u32,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

impl Debate {
    /// Upvotes minus downvotes, the "popular" ordering key.
    pub fn net_votes(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}

/// A stance-tagged contribution to a debate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    pub id: String,
    pub debate_id: String,
    pub author: String,
    pub author_address: String,
    pub content: String,
    pub stance: Stance,
    pub timestamp: DateTime<Utc>,
    pub upvotes: u32,
    pub downvotes: u32,
    pub ai_score: u8,
    pub ai_analysis: String,
    #[serde(default)]
    pub replies: Vec<Reply>,
    pub is_highlighted: bool,
}

impl Argument {
    pub fn net_votes(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}

/// A response nested under one argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub argument_id: String,
    pub author: String,
    pub author_address: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub upvotes: u32,
    pub downvotes: u32,
}

impl Record for Market {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Debate {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Argument {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Reply {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Fresh globally unique record id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
