//! Typed HTTP client for the debate API.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::{ClientError, Result};
use crate::db::models::{Argument, Debate, Market, Reply, SortBy};
use crate::service::types::{
    ArgumentList, CreateArgumentRequest, CreateDebateRequest, CreateReplyRequest, CreatedArgument,
    CreatedDebate, CreatedReply, DebateList, MarketList, ReplyList, VoteReceipt, VoteRequest,
};

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let resp = self.client.get(self.url(path)).query(query).send().await?;
        decode(resp).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        decode(resp).await
    }

    pub async fn list_debates(&self, sort: SortBy) -> Result<Vec<Debate>> {
        let list: DebateList = self
            .get("/api/debates", &[("sortBy", sort.as_str())])
            .await?;
        Ok(list.debates)
    }

    pub async fn create_debate(&self, req: &CreateDebateRequest) -> Result<CreatedDebate> {
        self.post("/api/debates", req).await
    }

    pub async fn list_arguments(&self, debate_id: Option<&str>) -> Result<Vec<Argument>> {
        let query: Vec<(&str, &str)> = debate_id.map(|id| ("debateId", id)).into_iter().collect();
        let list: ArgumentList = self.get("/api/arguments", &query).await?;
        Ok(list.arguments)
    }

    pub async fn create_argument(&self, req: &CreateArgumentRequest) -> Result<Argument> {
        let created: CreatedArgument = self.post("/api/arguments", req).await?;
        Ok(created.argument)
    }

    pub async fn list_replies(&self, argument_id: Option<&str>) -> Result<Vec<Reply>> {
        let query: Vec<(&str, &str)> = argument_id
            .map(|id| ("argumentId", id))
            .into_iter()
            .collect();
        let list: ReplyList = self.get("/api/replies", &query).await?;
        Ok(list.replies)
    }

    pub async fn create_reply(&self, req: &CreateReplyRequest) -> Result<Reply> {
        let created: CreatedReply = self.post("/api/replies", req).await?;
        Ok(created.reply)
    }

    pub async fn vote(&self, req: &VoteRequest) -> Result<VoteReceipt> {
        self.post("/api/vote", req).await
    }

    pub async fn list_markets(&self) -> Result<Vec<Market>> {
        let list: MarketList = self.get("/api/markets", &[]).await?;
        Ok(list.markets)
    }
}

/// Parse a 2xx body, or turn the `{"error": ...}` body into `ClientError::Status`.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    let message = resp
        .json::<Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| status.to_string());
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
