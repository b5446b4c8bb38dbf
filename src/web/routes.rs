//! HTTP route handlers for the debate API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::service::types::{
    ArgumentList, ArgumentQuery, CreateArgumentRequest, CreateDebateRequest, CreateReplyRequest,
    CreatedArgument, CreatedDebate, CreatedReply, DebateList, DebateQuery, MarketList, ReplyList,
    ReplyQuery, VoteReceipt, VoteRequest,
};

use super::server::AppState;

/// Build all API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/debates", get(list_debates).post(create_debate))
        .route("/api/arguments", get(list_arguments).post(create_argument))
        .route("/api/replies", get(list_replies).post(create_reply))
        .route("/api/vote", post(vote))
        .route("/api/markets", get(markets))
        .route("/api/status", get(status))
        .route("/api/network", get(network))
        .route("/health", get(health))
}

fn body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload.map(|Json(v)| v).map_err(|e| {
        debug!(error = %e, "rejected request body");
        AppError::MalformedBody
    })
}

fn query<T>(params: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    params.map(|Query(v)| v).map_err(|e| {
        debug!(error = %e, "rejected query string");
        AppError::InvalidField(format!("Invalid query string: {}", e.body_text()))
    })
}

/// GET /api/debates: debates with nested arguments, sorted and filtered.
async fn list_debates(
    State(state): State<AppState>,
    params: std::result::Result<Query<DebateQuery>, QueryRejection>,
) -> Result<Json<DebateList>> {
    let debates = state.service.list_debates(&query(params)?, Utc::now())?;
    Ok(Json(DebateList { debates }))
}

/// POST /api/debates: create a debate and its opening argument.
async fn create_debate(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateDebateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedDebate>)> {
    let created = state.service.create_debate(body(payload)?, Utc::now())?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/arguments: arguments, optionally scoped by `debateId`.
async fn list_arguments(
    State(state): State<AppState>,
    params: std::result::Result<Query<ArgumentQuery>, QueryRejection>,
) -> Result<Json<ArgumentList>> {
    Ok(Json(ArgumentList {
        arguments: state.service.list_arguments(&query(params)?),
    }))
}

/// POST /api/arguments: post a scored argument.
async fn create_argument(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateArgumentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedArgument>)> {
    let argument = state.service.create_argument(body(payload)?, Utc::now())?;
    Ok((StatusCode::CREATED, Json(CreatedArgument { argument })))
}

/// GET /api/replies: replies, optionally scoped by `argumentId`.
async fn list_replies(
    State(state): State<AppState>,
    params: std::result::Result<Query<ReplyQuery>, QueryRejection>,
) -> Result<Json<ReplyList>> {
    let params = query(params)?;
    Ok(Json(ReplyList {
        replies: state.service.list_replies(params.argument_id.as_deref()),
    }))
}

/// POST /api/replies: reply to an argument.
async fn create_reply(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateReplyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedReply>)> {
    let reply = state.service.create_reply(body(payload)?, Utc::now())?;
    Ok((StatusCode::CREATED, Json(CreatedReply { reply })))
}

/// POST /api/vote: one vote per user and target.
async fn vote(
    State(state): State<AppState>,
    payload: std::result::Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Json<VoteReceipt>> {
    Ok(Json(state.service.cast_vote(body(payload)?)?))
}

/// GET /api/markets: markets debates can reference.
async fn markets(State(state): State<AppState>) -> Json<MarketList> {
    Json(MarketList {
        markets: state.service.list_markets(),
    })
}

/// GET /api/status: collection sizes.
async fn status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "running",
        "counts": state.service.status(),
    }))
}

/// GET /api/network: chain the wallet layer should connect to.
async fn network(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "network": state.chain }))
}

/// GET /health: simple health check.
async fn health() -> &'static str {
    "ok"
}
