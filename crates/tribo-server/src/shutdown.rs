//! Process signal handling

use tracing::info;

/// Resolve when the process receives SIGINT or SIGTERM
#[cfg(unix)]
pub async fn shutdown_signal() {
    use futures::stream::StreamExt;
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook_tokio::Signals;

    match Signals::new([SIGINT, SIGTERM]) {
        Ok(mut signals) => {
            let handle = signals.handle();
            if let Some(signal) = signals.next().await {
                info!(signal, "Received shutdown signal");
            }
            handle.close();
        }
        Err(err) => {
            tracing::warn!(%err, "Failed to install signal handlers, falling back to Ctrl+C");
            ctrl_c().await;
        }
    }
}

/// Resolve when the process receives Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    ctrl_c().await;
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "Failed to listen for Ctrl+C");
        // Never resolve; the server keeps running until killed.
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C");
}
