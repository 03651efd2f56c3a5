// ABOUTME: The internal entry: health and build-info routes on a dedicated listener.
// ABOUTME: Built from the `internal` config section and registered before any web entry.

use std::net::SocketAddr;
use std::time::Instant;

use async_trait::async_trait;
use axum::routing::get;
use axum::{Json, Router};
use stagehand_core::{Entry, EntryError, EntryKind, InternalConfig, Shutdown};

use crate::serve::ServerTask;

const ENTRY_NAME: &str = "internal";

/// Health/info entry serving on its own address, separate from the web
/// entries so probes never pass through their middleware.
pub struct InternalEntry {
    addr: SocketAddr,
    healthy: bool,
    info: bool,
    started: Instant,
    serving: Option<ServerTask>,
}

impl InternalEntry {
    /// Construct the internal entry from its configuration section.
    pub fn from_config(config: &InternalConfig) -> Result<Self, EntryError> {
        let addr_str = format!("{}:{}", config.host, config.port);
        let addr = addr_str.parse().map_err(|_| EntryError::InvalidAddress {
            name: ENTRY_NAME.to_string(),
            addr: addr_str,
        })?;

        Ok(Self {
            addr,
            healthy: config.healthy,
            info: config.info,
            started: Instant::now(),
            serving: None,
        })
    }

    /// The bound address once the entry is serving.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.serving.as_ref().map(ServerTask::local_addr)
    }

    fn build_router(&self) -> Router {
        let mut router = Router::new();
        if self.healthy {
            router = router.route("/healthy", get(healthy));
        }
        if self.info {
            let started = self.started;
            router = router.route("/info", get(move || async move { info(started) }));
        }
        router
    }
}

/// GET /healthy - liveness probe.
async fn healthy() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "healthy": true }))
}

/// GET /info - build and uptime information.
fn info(started: Instant) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": started.elapsed().as_secs(),
    }))
}

#[async_trait]
impl Entry for InternalEntry {
    fn name(&self) -> &str {
        ENTRY_NAME
    }

    fn kind(&self) -> EntryKind {
        EntryKind::Internal
    }

    async fn bootstrap(&mut self, shutdown: &Shutdown) -> Result<(), EntryError> {
        if self.serving.is_some() {
            return Ok(());
        }
        let task = ServerTask::spawn(self.addr, self.build_router(), shutdown).await?;
        tracing::info!(addr = %task.local_addr(), "internal entry serving");
        self.serving = Some(task);
        Ok(())
    }

    async fn interrupt(&mut self) -> Result<(), EntryError> {
        match self.serving.take() {
            Some(task) => {
                tracing::info!("internal entry stopping");
                task.stop().await
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use http::Request;
    use tower::ServiceExt;

    fn internal_config() -> InternalConfig {
        InternalConfig {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 0,
            healthy: true,
            info: true,
        }
    }

    async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn healthy_reports_true() {
        let entry = InternalEntry::from_config(&internal_config()).unwrap();

        let resp = entry
            .build_router()
            .oneshot(Request::get("/healthy").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["healthy"], true);
    }

    #[tokio::test]
    async fn info_reports_name_and_version() {
        let entry = InternalEntry::from_config(&internal_config()).unwrap();

        let resp = entry
            .build_router()
            .oneshot(Request::get("/info").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert!(json["uptime_secs"].is_u64());
    }

    #[tokio::test]
    async fn disabled_routes_are_absent() {
        let mut config = internal_config();
        config.healthy = false;
        let entry = InternalEntry::from_config(&config).unwrap();

        let resp = entry
            .build_router()
            .oneshot(Request::get("/healthy").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
