//! Application wiring: state construction and the server lifecycle.

use crate::cache::StoryCache;
use crate::config::Config;
use crate::hn::HackerNewsApi;
use crate::service::StoryService;
use crate::state::AppState;
use crate::web::create_router;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Main application struct containing all necessary components
pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    /// Build the application from configuration.
    pub fn new(config: Config) -> Self {
        let provider = Arc::new(HackerNewsApi::new(config.hn_base_url.clone()));
        let cache = StoryCache::new(config.cache_retention_seconds.clone());
        let state = AppState::new(StoryService::new(provider, cache));
        Self { config, state }
    }

    /// Serve the API until a shutdown signal arrives.
    pub async fn run(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        info!(%addr, "web server listening");

        axum::serve(listener, create_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("web server exited with an error")
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    info!("shutdown signal received");
}
