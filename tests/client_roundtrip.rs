//! Serves the real router on an ephemeral port and drives it through
//! `DebateSession`, checking what lands in the client store.

use std::sync::Arc;

use chrono::Utc;
use tokio::net::TcpListener;

use debate_arena::client::{ApiClient, ClientError, DebateSession};
use debate_arena::config::ChainConfig;
use debate_arena::db::models::{SortBy, Stance, VoteDirection, VoteTarget};
use debate_arena::db::repository::Repositories;
use debate_arena::events::bus::EventBus;
use debate_arena::oracle::scorer::RandomScorer;
use debate_arena::service::debates::DebateService;
use debate_arena::service::types::{
    CreateArgumentRequest, CreateDebateRequest, CreateReplyRequest,
};
use debate_arena::store::state::IntentKind;
use debate_arena::store::DebateStore;
use debate_arena::web::server::{router, AppState};

async fn spawn_server() -> String {
    let service = DebateService::new(
        Repositories::seeded(Utc::now()),
        Arc::new(RandomScorer::new(Default::default())),
        Arc::new(EventBus::new(64)),
    );
    let app = router(AppState {
        service: Arc::new(service),
        chain: ChainConfig::default().info(),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn session() -> DebateSession {
    let base = spawn_server().await;
    DebateSession::new(ApiClient::new(base), Arc::new(DebateStore::new()))
}

#[tokio::test]
async fn initialize_loads_markets_and_recent_debates() {
    let session = session().await;
    session.initialize().await.unwrap();

    let state = session.store().snapshot();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.markets.len(), 3);
    let ids: Vec<_> = state.debates.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3", "2"]);

    let first = state.debate("1").unwrap();
    assert_eq!(first.argument_count as usize, first.arguments.len());
    assert_eq!(first.arguments[0].replies.len(), 2);
}

#[tokio::test]
async fn created_debate_is_first_and_carries_its_argument() {
    let session = session().await;
    session.fetch_debates(SortBy::Recent).await.unwrap();

    let debate = session
        .create_debate(CreateDebateRequest {
            title: Some("Will SOL flip ETH?".into()),
            description: Some("Market cap race".into()),
            market_id: Some("1".into()),
            category: Some("Crypto".into()),
            stance: Some("no".into()),
            initial_argument: Some("Network effects favour ETH.".into()),
            author: Some("Tester".into()),
            author_address: Some("0xT".into()),
        })
        .await
        .unwrap();

    let state = session.store().snapshot();
    assert_eq!(state.debates[0].id, debate.id);
    assert_eq!(state.debates[0].stance, Stance::No);
    assert_eq!(state.debates[0].arguments.len(), 1);
    assert_eq!(state.debates[0].argument_count, 1);
    assert_eq!(
        state.debates[0].arguments[0].content,
        "Network effects favour ETH."
    );

    assert!(state.intents.is_empty());

    // The server agrees on ordering.
    session.fetch_debates(SortBy::Recent).await.unwrap();
    assert_eq!(session.store().snapshot().debates[0].id, debate.id);
}

#[tokio::test]
async fn argument_and_reply_update_the_owning_debate() {
    let session = session().await;
    session.fetch_debates(SortBy::Recent).await.unwrap();

    let argument = session
        .add_argument(
            "2",
            CreateArgumentRequest {
                author: Some("X".into()),
                author_address: Some("0xA".into()),
                content: Some("test".into()),
                stance: Some("yes".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!((60..100).contains(&argument.ai_score));

    let reply = session
        .add_reply(
            &argument.id,
            CreateReplyRequest {
                author: Some("Y".into()),
                author_address: Some("0xB".into()),
                content: Some("agreed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let state = session.store().snapshot();
    let d2 = state.debate("2").unwrap();
    assert_eq!(d2.arguments.len(), d2.argument_count as usize);
    let stored = d2.arguments.iter().find(|a| a.id == argument.id).unwrap();
    assert_eq!(stored.replies, vec![reply]);
    assert!(state.intents.is_empty());
}

#[tokio::test]
async fn reply_to_unknown_argument_fails_with_server_message() {
    let session = session().await;

    let err = session
        .add_reply(
            "missing",
            CreateReplyRequest {
                author: Some("Y".into()),
                author_address: Some("0xB".into()),
                content: Some("hello?".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 404, .. }));
    let state = session.store().snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to add reply"));
    assert_eq!(state.failed_intents().count(), 1);
}

#[tokio::test]
async fn vote_counts_once_and_duplicate_is_rejected() {
    let session = session().await;
    session.fetch_debates(SortBy::Recent).await.unwrap();
    session.connect_wallet("0xVoter");

    let upvotes = |s: &DebateSession| {
        s.store()
            .read(|st| st.debate("1").unwrap().arguments[0].upvotes)
    };
    let before = upvotes(&session);

    let receipt = session
        .vote(VoteTarget::Argument, "a-1", VoteDirection::Up)
        .await
        .unwrap();
    assert_eq!(receipt.message, "Vote upvoted successfully");
    assert_eq!(upvotes(&session), before + 1);
    assert!(session.store().snapshot().error.is_none());

    let err = session
        .vote(VoteTarget::Argument, "a-1", VoteDirection::Down)
        .await
        .unwrap_err();
    assert_eq!(
        err.server_message(),
        Some("User has already voted on this item")
    );

    let state = session.store().snapshot();
    assert_eq!(upvotes(&session), before + 1);
    assert_eq!(state.debate("1").unwrap().arguments[0].downvotes, 3);
    assert_eq!(state.error.as_deref(), Some("Failed to vote"));
    assert!(!state.loading);
    assert_eq!(state.failed_intents().count(), 1);
    assert_eq!(state.pending_intents().count(), 0);
}

#[tokio::test]
async fn vote_without_wallet_is_refused_locally() {
    let session = session().await;
    session.fetch_debates(SortBy::Recent).await.unwrap();

    let err = session
        .vote(VoteTarget::Reply, "r-1", VoteDirection::Up)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::WalletNotConnected));

    let state = session.store().snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to vote"));
    assert!(state.intents.is_empty());
    assert_eq!(state.debate("1").unwrap().arguments[0].replies[0].upvotes, 8);
}

/// Base URL of a port that was bound once and is now closed.
async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn fetch_failures_set_fixed_error_and_are_returned() {
    let session = DebateSession::new(
        ApiClient::new(closed_port().await),
        Arc::new(DebateStore::new()),
    );

    let err = session.fetch_debates(SortBy::Recent).await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    let state = session.store().snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to fetch debates"));
    assert!(!state.loading);

    let err = session.fetch_markets().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    let state = session.store().snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to fetch markets"));
    assert!(!state.loading);
    assert!(state.markets.is_empty());

    assert!(session.initialize().await.is_err());
}

#[tokio::test]
async fn rejected_debate_leaves_store_without_it() {
    let session = session().await;
    session.fetch_debates(SortBy::Recent).await.unwrap();
    let before = session.store().snapshot().debates.len();

    let err = session
        .create_debate(CreateDebateRequest {
            title: Some("No opening argument".into()),
            description: Some("d".into()),
            market_id: Some("1".into()),
            category: Some("Crypto".into()),
            stance: Some("yes".into()),
            initial_argument: None,
            author: Some("Tester".into()),
            author_address: Some("0xT".into()),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 400, .. }));
    assert_eq!(err.server_message(), Some("Missing required fields"));

    let state = session.store().snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to create debate"));
    assert!(!state.loading);
    assert_eq!(state.debates.len(), before);
    let failed: Vec<_> = state.failed_intents().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].kind, IntentKind::Debate);
}
