//! Axum HTTP server for the debate API.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::config::{ChainInfo, WebConfig};
use crate::service::debates::DebateService;

use super::routes;

/// Shared state for all web routes.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DebateService>,
    pub chain: ChainInfo,
}

/// Router with every route and the state attached.
pub fn router(state: AppState) -> Router {
    Router::new().merge(routes::api_routes()).with_state(state)
}

/// Axum web server for the debate API.
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    pub fn new(config: WebConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn start(self, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
        let app = router(self.state);

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "debate api listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("debate api stopped");
        Ok(())
    }
}
