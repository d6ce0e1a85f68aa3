use anyhow::Context;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::{self, AppState};
use crate::config::Config;

/// A running HTTP server. Dropping it without calling [`Server::shutdown`]
/// stops the server as well, since the shutdown sender goes away with it.
#[derive(Debug)]
pub struct Server {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl Server {
    /// Binds the configured address and starts serving in a background task.
    pub async fn start(config: &Config) -> anyhow::Result<Self> {
        let state = AppState::from_config(config)?;
        let app = api::router(state);

        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        let local_addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
        });

        info!("Listening on port {}", local_addr.port());

        Ok(Self {
            local_addr,
            shutdown_tx,
            handle,
        })
    }

    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections and waits for in-flight requests.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        let Self {
            shutdown_tx,
            handle,
            ..
        } = self;

        let _ = shutdown_tx.send(());
        Self::join(handle).await
    }

    /// Serves until `signal` resolves, then shuts down gracefully.
    pub async fn run_until<F>(mut self, signal: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = &mut self.handle => {
                return Self::flatten(result);
            }
            () = signal => {
                info!("Shutdown signal received");
            }
        }

        self.shutdown().await?;
        info!("Server stopped");
        Ok(())
    }

    async fn join(handle: JoinHandle<std::io::Result<()>>) -> anyhow::Result<()> {
        Self::flatten(handle.await)
    }

    fn flatten(
        result: Result<std::io::Result<()>, tokio::task::JoinError>,
    ) -> anyhow::Result<()> {
        result
            .context("Server task failed")?
            .context("Web server error")
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Error listening for shutdown: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
