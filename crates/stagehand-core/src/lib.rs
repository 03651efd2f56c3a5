// ABOUTME: Core library for stagehand, containing the entry lifecycle trait and boot configuration.
// ABOUTME: This crate defines the shared contracts used by entry implementations and the example binaries.

pub mod config;
pub mod entry;
pub mod shutdown;

pub use config::{AssetsConfig, AuthConfig, BootConfig, ConfigError, InternalConfig, WebConfig};
pub use entry::{Entry, EntryError, EntryKind};
pub use shutdown::Shutdown;
