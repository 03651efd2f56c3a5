// ABOUTME: Entry point for the greeter example, configured from boot/greeter.yaml.
// ABOUTME: Loads config, attaches the greeter route and assets, bootstraps, and waits for a shutdown signal.

use axum::routing::get;
use stagehand::{BOOT_ASSETS, greeter};
use stagehand_core::Shutdown;
use stagehand_server::Boot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stagehand=debug,tower_http=debug".parse().unwrap()),
        )
        .init();

    let mut boot = Boot::from_path("boot/greeter.yaml")?;

    boot.web_mut("greeter")?
        .route("/v1/greeter", get(greeter::greet))
        .with_assets(&BOOT_ASSETS);

    let shutdown = Shutdown::new();
    boot.bootstrap(&shutdown).await?;
    tracing::info!("greeter running, waiting for shutdown signal");

    shutdown.wait_for_signal().await;

    boot.interrupt().await?;
    tracing::info!("greeter stopped");
    Ok(())
}
