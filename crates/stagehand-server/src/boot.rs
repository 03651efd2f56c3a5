// ABOUTME: The Boot orchestrator: builds typed entries from a BootConfig and drives their lifecycle.
// ABOUTME: Retrieval is checked by name and kind; a missing entry is an error, not a panic.

use std::path::Path;

use stagehand_core::{BootConfig, ConfigError, Entry, EntryError, EntryKind, Shutdown};
use thiserror::Error;

use crate::entry::WebEntry;
use crate::internal::InternalEntry;

/// Errors that can occur while assembling or driving the boot set.
#[derive(Debug, Error)]
pub enum BootError {
    #[error("no entry named '{0}'")]
    UnknownEntry(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Entry(#[from] EntryError),
}

/// A registered entry, tagged by kind.
pub enum EntryHandle {
    Web(WebEntry),
    Internal(InternalEntry),
}

impl EntryHandle {
    fn as_entry_mut(&mut self) -> &mut dyn Entry {
        match self {
            EntryHandle::Web(entry) => entry,
            EntryHandle::Internal(entry) => entry,
        }
    }
}

/// The set of entries described by one boot configuration. Bootstrapped
/// once, then interrupted once at shutdown; both operations walk the
/// entries in a deterministic order.
pub struct Boot {
    entries: Vec<EntryHandle>,
}

impl Boot {
    /// Load a configuration file and build the boot set from it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BootError> {
        Self::from_config(&BootConfig::from_path(path)?)
    }

    /// Parse an in-memory configuration buffer and build the boot set.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, BootError> {
        Self::from_config(&BootConfig::from_slice(bytes)?)
    }

    /// Build entries from a parsed configuration. The internal entry is
    /// registered before web entries; disabled sections are skipped.
    pub fn from_config(config: &BootConfig) -> Result<Self, BootError> {
        let mut entries = Vec::new();

        if config.internal.enabled {
            entries.push(EntryHandle::Internal(InternalEntry::from_config(
                &config.internal,
            )?));
        }

        for web in config.web.iter().filter(|web| web.enabled) {
            entries.push(EntryHandle::Web(WebEntry::from_config(web)?));
        }

        Ok(Self { entries })
    }

    /// Checked retrieval of a web entry by name.
    pub fn web_mut(&mut self, name: &str) -> Result<&mut WebEntry, BootError> {
        self.entries
            .iter_mut()
            .find_map(|handle| match handle {
                EntryHandle::Web(entry) if entry.name() == name => Some(entry),
                _ => None,
            })
            .ok_or_else(|| BootError::UnknownEntry(name.to_string()))
    }

    /// Checked retrieval of the internal entry.
    pub fn internal_mut(&mut self) -> Result<&mut InternalEntry, BootError> {
        self.entries
            .iter_mut()
            .find_map(|handle| match handle {
                EntryHandle::Internal(entry) => Some(entry),
                _ => None,
            })
            .ok_or_else(|| BootError::UnknownEntry("internal".to_string()))
    }

    /// Names and kinds of all registered entries, in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, EntryKind)> {
        self.entries.iter().map(|handle| match handle {
            EntryHandle::Web(entry) => (entry.name(), entry.kind()),
            EntryHandle::Internal(entry) => (entry.name(), entry.kind()),
        })
    }

    /// Bootstrap every entry in registration order. Fails on the first
    /// entry that cannot start; there is no partial recovery.
    pub async fn bootstrap(&mut self, shutdown: &Shutdown) -> Result<(), BootError> {
        for handle in &mut self.entries {
            let entry = handle.as_entry_mut();
            tracing::debug!(entry = entry.name(), kind = %entry.kind(), "bootstrapping entry");
            entry.bootstrap(shutdown).await?;
        }
        Ok(())
    }

    /// Interrupt every entry in reverse registration order. Idempotent:
    /// already-stopped entries are skipped by their own interrupt.
    pub async fn interrupt(&mut self) -> Result<(), BootError> {
        for handle in self.entries.iter_mut().rev() {
            handle.as_entry_mut().interrupt().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
internal:
  enabled: true
  port: 0
web:
  - name: greeter
    host: 127.0.0.1
    port: 0
  - name: disabled-entry
    port: 0
    enabled: false
"#;

    #[test]
    fn registers_internal_before_web_and_skips_disabled() {
        let boot = Boot::from_slice(CONFIG.as_bytes()).unwrap();

        let entries: Vec<_> = boot.entries().collect();
        assert_eq!(
            entries,
            vec![
                ("internal", EntryKind::Internal),
                ("greeter", EntryKind::Web),
            ]
        );
    }

    #[test]
    fn web_mut_finds_the_named_entry() {
        let mut boot = Boot::from_slice(CONFIG.as_bytes()).unwrap();
        let entry = boot.web_mut("greeter").unwrap();
        assert_eq!(entry.name(), "greeter");
    }

    #[test]
    fn unknown_entry_is_an_error() {
        let mut boot = Boot::from_slice(CONFIG.as_bytes()).unwrap();

        let err = boot.web_mut("missing").unwrap_err();
        assert!(matches!(err, BootError::UnknownEntry(ref name) if name == "missing"));

        let mut without_internal = Boot::from_slice(b"web:\n  - name: greeter\n    port: 0\n").unwrap();
        assert!(matches!(
            without_internal.internal_mut(),
            Err(BootError::UnknownEntry(_))
        ));
    }

    #[tokio::test]
    async fn lifecycle_runs_all_entries() {
        let mut boot = Boot::from_slice(CONFIG.as_bytes()).unwrap();
        let shutdown = Shutdown::new();

        boot.bootstrap(&shutdown).await.unwrap();
        assert!(boot.web_mut("greeter").unwrap().local_addr().is_some());
        assert!(boot.internal_mut().unwrap().local_addr().is_some());

        boot.interrupt().await.unwrap();
        assert!(boot.web_mut("greeter").unwrap().local_addr().is_none());

        // A second interrupt finds nothing running.
        boot.interrupt().await.unwrap();
    }
}
