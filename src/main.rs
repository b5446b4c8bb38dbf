//! Debate Arena API: entry point
//!
//! Loads configuration, wires the repositories, scorer and event bus into the
//! debate service, and serves the JSON API until SIGINT/SIGTERM.

use std::sync::Arc;

use chrono::Utc;
use tokio::signal;
use tracing::{info, warn};

use debate_arena::config::Config;
use debate_arena::db::repository::Repositories;
use debate_arena::events::bus::{run_activity_log, EventBus};
use debate_arena::logging;
use debate_arena::oracle::scorer::RandomScorer;
use debate_arena::service::debates::DebateService;
use debate_arena::web::server::{AppState, WebServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (ignore if missing)
    let _ = dotenvy::dotenv();

    let config = Config::load()?;

    logging::structured::init_logging(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        network = ?config.chain.network,
        seed = config.seed.enabled,
        "debate-arena starting"
    );

    let repos = if config.seed.enabled {
        Repositories::seeded(Utc::now())
    } else {
        Repositories::in_memory()
    };

    let event_bus = Arc::new(EventBus::new(config.events.capacity));
    let _activity_handle = tokio::spawn(run_activity_log(event_bus.subscribe()));

    let scorer = Arc::new(RandomScorer::new(config.scoring.clone()));
    let service = Arc::new(DebateService::new(repos, scorer, event_bus.clone()));
    info!(status = ?service.status(), "debate service ready");

    if config.web.enabled {
        let state = AppState {
            service,
            chain: config.chain.info(),
        };
        WebServer::new(config.web.clone(), state)
            .start(shutdown_signal())
            .await?;
    } else {
        warn!("web server disabled, idling until shutdown");
        shutdown_signal().await;
    }

    info!("shutdown complete");
    Ok(())
}

/// Resolves on the first SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT"),
        _ = terminate => info!("received SIGTERM"),
    }
}
