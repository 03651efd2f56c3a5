// ABOUTME: Greeter variant that embeds its YAML configuration into the binary.
// ABOUTME: Same lifecycle as the file-based variant, with no config file on disk at runtime.

use stagehand_core::Shutdown;
use stagehand_server::Boot;

static BOOT_CONFIG: &[u8] = include_bytes!("../../boot/greeter-embedded.yaml");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stagehand=debug,tower_http=debug".parse().unwrap()),
        )
        .init();

    let mut boot = Boot::from_slice(BOOT_CONFIG)?;

    let shutdown = Shutdown::new();
    boot.bootstrap(&shutdown).await?;
    tracing::info!("greeter-embedded running, waiting for shutdown signal");

    shutdown.wait_for_signal().await;

    boot.interrupt().await?;
    tracing::info!("greeter-embedded stopped");
    Ok(())
}
