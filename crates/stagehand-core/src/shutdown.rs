// ABOUTME: Explicit shutdown coordination for stagehand processes.
// ABOUTME: Wraps a tokio watch channel; tripped by OS signals or programmatically, idempotent either way.

use tokio::sync::watch;

/// A process-wide shutdown handle. Clones share the underlying channel.
/// Constructed once in main and passed by reference to whatever needs
/// lifecycle coordination.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    /// Create a new, untriggered shutdown handle.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Trip the shutdown signal. Subsequent calls have no further effect.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Whether the shutdown signal has been tripped.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the shutdown signal has been tripped.
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives at least as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }

    /// Block until the process receives SIGINT (ctrl-c) or, on unix,
    /// SIGTERM, then trip the shutdown signal. This is the single blocking
    /// wait the example binaries sit on while entries serve.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %err, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => tracing::info!("received interrupt signal"),
            _ = terminate => tracing::info!("received terminate signal"),
        }

        self.trigger();
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
