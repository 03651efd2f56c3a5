// ABOUTME: Greeter variant with the internal health/info entry enabled.
// ABOUTME: The internal entry is registered before the web entry and serves on its own port.

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

    let mut boot = Boot::from_path("boot/greeter-internal.yaml")?;

    let shutdown = Shutdown::new();
    boot.bootstrap(&shutdown).await?;
    tracing::info!("greeter-internal running, waiting for shutdown signal");

    shutdown.wait_for_signal().await;

    boot.interrupt().await?;
    tracing::info!("greeter-internal stopped");
    Ok(())
}
