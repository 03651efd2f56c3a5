// ABOUTME: Shared bind-and-serve glue for stagehand entries.
// ABOUTME: Owns the listener task and the graceful-stop handshake used by every entry kind.

use std::net::SocketAddr;

use axum::Router;
use stagehand_core::{EntryError, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running server task for one entry. The entry keeps this in an Option
/// and takes it out on interrupt, which makes interrupt idempotent.
#[derive(Debug)]
pub(crate) struct ServerTask {
    stop: Shutdown,
    task: JoinHandle<Result<(), std::io::Error>>,
    local_addr: SocketAddr,
}

impl ServerTask {
    /// Bind the address and start serving the router. The serve loop drains
    /// when either the entry's private stop signal or the process-wide
    /// shutdown handle is triggered.
    pub(crate) async fn spawn(
        addr: SocketAddr,
        router: Router,
        shutdown: &Shutdown,
    ) -> Result<Self, EntryError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| EntryError::Bind { addr, source })?;
        let local_addr = listener.local_addr().map_err(EntryError::Serve)?;

        let stop = Shutdown::new();
        let stop_signal = stop.clone();
        let global = shutdown.clone();
        let task = tokio::spawn(async move {
            axum::serve(listener, router.into_make_service())
                .with_graceful_shutdown(async move {
                    tokio::select! {
                        _ = stop_signal.triggered() => {}
                        _ = global.triggered() => {}
                    }
                })
                .await
        });

        Ok(Self {
            stop,
            task,
            local_addr,
        })
    }

    pub(crate) fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Trip the stop signal and wait for the serve loop to drain.
    pub(crate) async fn stop(self) -> Result<(), EntryError> {
        self.stop.trigger();
        match self.task.await {
            Ok(result) => result.map_err(EntryError::Serve),
            Err(err) => {
                tracing::error!(error = %err, "server task failed to join");
                Ok(())
            }
        }
    }
}
