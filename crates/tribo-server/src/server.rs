//! Server lifecycle

use crate::router::{AppState, router};
use anyhow::{Context, Result};
use axum::Router;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tribo_core::{ServerConfig, Tribo, TriboConfig};

/// HTTP server around one shared engine
#[derive(Debug)]
pub struct TriboServer {
    config: ServerConfig,
    tribo: Tribo,
    shutdown: CancellationToken,
}

impl TriboServer {
    /// Build a server and its engine from configuration
    pub fn new(config: &TriboConfig) -> Self {
        Self::with_engine(config.server.clone(), Tribo::from_config(&config.cache))
    }

    pub fn with_engine(config: ServerConfig, tribo: Tribo) -> Self {
        Self {
            config,
            tribo,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn engine(&self) -> &Tribo {
        &self.tribo
    }

    /// Token whose cancellation stops the server and every in-flight lookup
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn router(&self) -> Router {
        router(AppState::new(
            self.tribo.clone(),
            self.config.request_timeout(),
            self.shutdown.clone(),
        ))
    }

    /// Bind the configured address and serve until `signal` resolves
    pub async fn serve<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let addr: SocketAddr = self.config.bind_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        self.run(listener, signal).await
    }

    /// Serve on an already bound listener until `signal` resolves or the
    /// shutdown token is cancelled
    ///
    /// On shutdown, in-flight lookups are cancelled first, then open
    /// connections get at most the configured grace period to finish.
    pub async fn run<F>(self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = listener.local_addr()?;
        let grace = self.config.shutdown_grace();
        let app = self.router();
        let shutdown = self.shutdown;

        let draining = shutdown.clone();
        let server = axum::serve(listener, app)
            .with_graceful_shutdown(async move { draining.cancelled().await });
        let mut server = tokio::spawn(server.into_future());

        info!(%addr, "Start listening on {}", addr);

        tokio::select! {
            result = &mut server => {
                result.context("Server task failed")??;
                return Ok(());
            }
            _ = signal => {}
            _ = shutdown.cancelled() => {}
        }

        info!("Shutting down the server...");
        shutdown.cancel();

        match tokio::time::timeout(grace, &mut server).await {
            Ok(result) => {
                result.context("Server task failed")??;
            }
            Err(_) => {
                warn!(?grace, "Grace period elapsed with connections still open");
                server.abort();
            }
        }

        info!("Server stopped");
        Ok(())
    }
}
