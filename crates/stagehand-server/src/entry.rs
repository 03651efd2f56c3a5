// ABOUTME: The stagehand web entry: an axum HTTP server built from a WebConfig.
// ABOUTME: Routes are attached before bootstrap; interrupt drains the serve loop and is idempotent.

use std::net::SocketAddr;

use async_trait::async_trait;
use axum::Router;
use axum::routing::MethodRouter;
use include_dir::Dir;
use stagehand_core::{AssetsConfig, AuthConfig, Entry, EntryError, EntryKind, Shutdown, WebConfig};
use tower_http::trace::TraceLayer;

use crate::assets::asset_routes;
use crate::auth::basic_auth;
use crate::serve::ServerTask;

/// An HTTP server entry. Built from a configuration section, optionally
/// extended with routes and an embedded asset bundle, then bootstrapped
/// once and interrupted once.
#[derive(Debug)]
pub struct WebEntry {
    name: String,
    addr: SocketAddr,
    logging: bool,
    auth: Option<AuthConfig>,
    assets_config: Option<AssetsConfig>,
    assets: Option<&'static Dir<'static>>,
    router: Router,
    serving: Option<ServerTask>,
}

impl WebEntry {
    /// Construct a web entry from its configuration section.
    pub fn from_config(config: &WebConfig) -> Result<Self, EntryError> {
        let addr_str = format!("{}:{}", config.host, config.port);
        let addr = addr_str.parse().map_err(|_| EntryError::InvalidAddress {
            name: config.name.clone(),
            addr: addr_str,
        })?;

        Ok(Self {
            name: config.name.clone(),
            addr,
            logging: config.logging,
            auth: config.auth.clone(),
            assets_config: config.assets.clone(),
            assets: None,
            router: Router::new(),
            serving: None,
        })
    }

    /// Attach an additional route. Routes must be attached before
    /// bootstrap; later attachments are not picked up by a running server.
    pub fn route(&mut self, path: &str, handler: MethodRouter) -> &mut Self {
        self.router = std::mem::take(&mut self.router).route(path, handler);
        self
    }

    /// Supply the embedded asset bundle. It is mounted only when the
    /// entry's `assets` config section is present and enabled.
    pub fn with_assets(&mut self, bundle: &'static Dir<'static>) -> &mut Self {
        self.assets = Some(bundle);
        self
    }

    /// The bound address once the entry is serving.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.serving.as_ref().map(ServerTask::local_addr)
    }

    /// Assemble the final router: attached routes, asset mount, then the
    /// auth and logging layers around the whole surface.
    fn build_router(&self) -> Router {
        let mut router = self.router.clone();

        if let (Some(config), Some(bundle)) = (&self.assets_config, self.assets) {
            if config.enabled {
                let prefix = normalize_prefix(&config.prefix);
                router = router.nest(&prefix, asset_routes(bundle));
            }
        }

        if let Some(auth) = &self.auth {
            if auth.enabled {
                router = router.layer(basic_auth(auth.accounts.clone(), &auth.realm));
            }
        }

        if self.logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }
}

/// Nested prefixes must start with a slash.
fn normalize_prefix(prefix: &str) -> String {
    if prefix.starts_with('/') {
        prefix.to_string()
    } else {
        format!("/{prefix}")
    }
}

#[async_trait]
impl Entry for WebEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntryKind {
        EntryKind::Web
    }

    async fn bootstrap(&mut self, shutdown: &Shutdown) -> Result<(), EntryError> {
        if self.serving.is_some() {
            return Ok(());
        }
        let router = self.build_router();
        let task = ServerTask::spawn(self.addr, router, shutdown).await?;
        tracing::info!(entry = %self.name, addr = %task.local_addr(), "web entry serving");
        self.serving = Some(task);
        Ok(())
    }

    async fn interrupt(&mut self) -> Result<(), EntryError> {
        match self.serving.take() {
            Some(task) => {
                tracing::info!(entry = %self.name, "web entry stopping");
                task.stop().await
            }
            None => Ok(()),
        }
    }
}
