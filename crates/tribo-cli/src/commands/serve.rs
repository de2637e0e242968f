//! `tribo serve`

use anyhow::Result;
use tribo_core::TriboConfig;
use tribo_server::{TriboServer, shutdown_signal};

pub async fn execute(config: TriboConfig) -> Result<()> {
    tracing::info!(
        bind = %config.server.bind,
        cache_size_limit = config.cache.size_limit,
        request_timeout_secs = config.server.request_timeout_secs,
        "Starting tribo server"
    );
    TriboServer::new(&config).serve(shutdown_signal()).await
}
