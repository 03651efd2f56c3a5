// ABOUTME: YAML boot configuration types and loading for stagehand entries.
// ABOUTME: Parses web and internal entry sections with serde defaults and typed errors.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_REALM: &str = "stagehand";
const DEFAULT_ASSETS_PREFIX: &str = "/assets";
const DEFAULT_INTERNAL_PORT: u16 = 9091;

/// Errors that can occur while loading a boot configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Top-level boot configuration document: one `web` element per HTTP
/// entry, plus an optional `internal` section for the health/info entry.
#[derive(Debug, Clone, Deserialize)]
pub struct BootConfig {
    #[serde(default)]
    pub web: Vec<WebConfig>,
    #[serde(default)]
    pub internal: InternalConfig,
}

/// Configuration for a single named web entry.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    pub name: String,
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Request logging middleware toggle.
    #[serde(default)]
    pub logging: bool,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub assets: Option<AssetsConfig>,
}

/// HTTP Basic Auth settings for a web entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_realm")]
    pub realm: String,
    /// Account name to password. Keys are matched exactly.
    #[serde(default)]
    pub accounts: HashMap<String, String>,
}

/// Embedded static asset settings for a web entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_assets_prefix")]
    pub prefix: String,
}

/// Internal health/info entry settings. Disabled unless the section
/// opts in with `enabled: true`.
#[derive(Debug, Clone, Deserialize)]
pub struct InternalConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_internal_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub healthy: bool,
    #[serde(default = "default_true")]
    pub info: bool,
}

impl Default for InternalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_INTERNAL_PORT,
            healthy: true,
            info: true,
        }
    }
}

impl BootConfig {
    /// Load a boot configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)?;
        Self::from_slice(&bytes)
    }

    /// Parse a boot configuration from an in-memory YAML buffer, e.g. one
    /// embedded into the binary at compile time.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_slice(bytes)?)
    }
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_realm() -> String {
    DEFAULT_REALM.to_string()
}

fn default_assets_prefix() -> String {
    DEFAULT_ASSETS_PREFIX.to_string()
}

fn default_internal_port() -> u16 {
    DEFAULT_INTERNAL_PORT
}
