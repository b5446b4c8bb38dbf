//! Action creators: each one performs an API call and dispatches the
//! resulting actions into the shared [`DebateStore`].
//!
//! Every action brackets itself with `SetLoading(true)` / `SetLoading(false)`.
//! On failure the store gets a fixed, user-facing error string and the
//! underlying [`ClientError`] is returned to the caller.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::client::api::ApiClient;
use crate::client::{ClientError, Result};
use crate::db::models::{Argument, Debate, Reply, SortBy, VoteDirection, VoteTarget};
use crate::service::types::{
    CreateArgumentRequest, CreateDebateRequest, CreateReplyRequest, VoteReceipt, VoteRequest,
};
use crate::store::state::{Intent, IntentKind, IntentOutcome};
use crate::store::{Action, DebateStore};

pub struct DebateSession {
    api: ApiClient,
    store: Arc<DebateStore>,
    /// Connected wallet address; doubles as the voting user id.
    wallet: RwLock<Option<String>>,
}

impl DebateSession {
    pub fn new(api: ApiClient, store: Arc<DebateStore>) -> Self {
        Self {
            api,
            store,
            wallet: RwLock::new(None),
        }
    }

    pub fn store(&self) -> &Arc<DebateStore> {
        &self.store
    }

    pub fn connect_wallet(&self, address: impl Into<String>) {
        let address = address.into();
        info!(%address, "wallet connected");
        *self.wallet.write() = Some(address);
    }

    pub fn disconnect_wallet(&self) {
        if self.wallet.write().take().is_some() {
            info!("wallet disconnected");
        }
    }

    pub fn wallet(&self) -> Option<String> {
        self.wallet.read().clone()
    }

    /// Load markets, then debates.
    pub async fn initialize(&self) -> Result<()> {
        self.fetch_markets().await?;
        self.fetch_debates(SortBy::Recent).await
    }

    pub async fn fetch_debates(&self, sort: SortBy) -> Result<()> {
        self.run("Failed to fetch debates", async {
            let debates = self.api.list_debates(sort).await?;
            debug!(count = debates.len(), sort = sort.as_str(), "debates fetched");
            self.store.dispatch(Action::SetDebates(debates));
            Ok(())
        })
        .await
    }

    pub async fn fetch_markets(&self) -> Result<()> {
        self.run("Failed to fetch markets", async {
            let markets = self.api.list_markets().await?;
            debug!(count = markets.len(), "markets fetched");
            self.store.dispatch(Action::SetMarkets(markets));
            Ok(())
        })
        .await
    }

    /// Create a debate; it lands at the head of the store already carrying
    /// its opening argument.
    pub async fn create_debate(&self, req: CreateDebateRequest) -> Result<Debate> {
        let intent = Intent::pending(IntentKind::Debate, Utc::now());
        self.tracked("Failed to create debate", intent, async {
            let created = self.api.create_debate(&req).await?;
            let mut debate = created.debate;
            if !debate.arguments.iter().any(|a| a.id == created.argument.id) {
                debate.arguments.push(created.argument);
            }
            debate.argument_count = debate.arguments.len() as u32;
            info!(debate_id = %debate.id, "debate created");
            self.store.dispatch(Action::AddDebate(debate.clone()));
            Ok(debate)
        })
        .await
    }

    pub async fn add_argument(
        &self,
        debate_id: &str,
        mut req: CreateArgumentRequest,
    ) -> Result<Argument> {
        req.debate_id = Some(debate_id.to_string());
        let intent = Intent::pending(
            IntentKind::Argument {
                debate_id: debate_id.to_string(),
            },
            Utc::now(),
        );
        self.tracked("Failed to add argument", intent, async {
            let argument = self.api.create_argument(&req).await?;
            self.store.dispatch(Action::AddArgument {
                debate_id: debate_id.to_string(),
                argument: argument.clone(),
            });
            Ok(argument)
        })
        .await
    }

    pub async fn add_reply(&self, argument_id: &str, mut req: CreateReplyRequest) -> Result<Reply> {
        req.argument_id = Some(argument_id.to_string());
        let intent = Intent::pending(
            IntentKind::Reply {
                argument_id: argument_id.to_string(),
            },
            Utc::now(),
        );
        self.tracked("Failed to add reply", intent, async {
            let reply = self.api.create_reply(&req).await?;
            self.store.dispatch(Action::AddReply {
                argument_id: argument_id.to_string(),
                reply: reply.clone(),
            });
            Ok(reply)
        })
        .await
    }

    /// Cast a vote as the connected wallet. The local counter moves only
    /// once the server has accepted the vote.
    pub async fn vote(
        &self,
        target: VoteTarget,
        id: &str,
        direction: VoteDirection,
    ) -> Result<VoteReceipt> {
        let Some(user_id) = self.wallet() else {
            return self
                .run("Failed to vote", async { Err(ClientError::WalletNotConnected) })
                .await;
        };

        let req = VoteRequest {
            target: Some(target.as_str().to_string()),
            id: Some(id.to_string()),
            vote_type: Some(direction.as_str().to_string()),
            user_id: Some(user_id),
        };
        let intent = Intent::pending(
            IntentKind::Vote {
                target,
                id: id.to_string(),
                direction,
            },
            Utc::now(),
        );
        self.tracked("Failed to vote", intent, async {
            let receipt = self.api.vote(&req).await?;
            self.store.dispatch(Action::UpdateVote {
                target,
                id: id.to_string(),
                direction,
            });
            Ok(receipt)
        })
        .await
    }

    /// Run `fut` between `SetLoading(true)` and `SetLoading(false)`,
    /// recording `failure` in the store if it errors.
    async fn run<T>(
        &self,
        failure: &'static str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        self.store.dispatch(Action::SetLoading(true));
        let result = fut.await;
        if let Err(e) = &result {
            warn!(error = %e, "{failure}");
            self.store.dispatch(Action::SetError(Some(failure.to_string())));
        }
        self.store.dispatch(Action::SetLoading(false));
        result
    }

    /// Like [`run`](Self::run), with `intent` pending for the duration of the call.
    async fn tracked<T>(
        &self,
        failure: &'static str,
        intent: Intent,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let intent_id = intent.id;
        self.store.dispatch(Action::BeginIntent(intent));
        let result = self.run(failure, fut).await;
        let outcome = match &result {
            Ok(_) => IntentOutcome::Confirmed,
            Err(e) => IntentOutcome::Failed(
                e.server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| e.to_string()),
            ),
        };
        self.store.dispatch(Action::ResolveIntent {
            id: intent_id,
            outcome,
        });
        result
    }
}
