//! API module for TactiCore
//!
//! Serves match data, pattern summaries and event analysis as JSON for a
//! dashboard front end.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::events::EventStore;

pub mod handlers;
pub mod models;
pub mod server;

/// API server over a loaded event store
#[derive(Debug)]
pub struct ApiServer {
    store: Arc<EventStore>,
    config: Arc<Config>,
}

impl ApiServer {
    pub fn new(store: Arc<EventStore>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    /// Run the API server until it fails
    pub async fn start(self) -> Result<()> {
        let address = format!("{}:{}", self.config.api.bind_address, self.config.api.port);
        info!("🚀 Starting API server on {}", address);

        server::start_http_server(self.store, &address).await
    }
}
