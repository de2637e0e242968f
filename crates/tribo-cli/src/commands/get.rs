//! `tribo get`

use anyhow::{Context, Result};
use tribo_core::{RequestContext, Tribo, TriboConfig};

/// Compute `T(n)` within the configured request timeout and print it
pub async fn execute(config: &TriboConfig, n: i64) -> Result<()> {
    let tribo = Tribo::from_config(&config.cache);
    let ctx = RequestContext::with_timeout(config.server.request_timeout());

    let value = tribo
        .get(&ctx, n)
        .await
        .with_context(|| format!("Failed to compute T({})", n))?;
    println!("{}", value);
    Ok(())
}
