// ABOUTME: Entry lifecycle trait shared by every bootable stagehand component.
// ABOUTME: Entries are constructed from config, bootstrapped once, and interrupted idempotently.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::shutdown::Shutdown;

/// Errors that can occur while bootstrapping or interrupting an entry.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("invalid listen address '{addr}' for entry '{name}'")]
    InvalidAddress { name: String, addr: String },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// The kind of a registered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Web,
    Internal,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Web => write!(f, "web"),
            EntryKind::Internal => write!(f, "internal"),
        }
    }
}

/// A named, lifecycle-bearing component: bootstrapped once at startup and
/// interrupted once at shutdown. Interrupting an entry that is not running
/// is a no-op.
#[async_trait]
pub trait Entry: Send {
    fn name(&self) -> &str;

    fn kind(&self) -> EntryKind;

    /// Start the entry. The shutdown handle lets the entry stop serving on
    /// its own when a process-wide shutdown is triggered.
    async fn bootstrap(&mut self, shutdown: &Shutdown) -> Result<(), EntryError>;

    /// Stop the entry and release its resources. Must be idempotent.
    async fn interrupt(&mut self) -> Result<(), EntryError>;
}
