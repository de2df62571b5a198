use std::sync::Arc;

use anyhow::Context;

use client_onboard::cli::Cli;
use client_onboard::config::OnboardConfig;
use client_onboard::onboarding::OnboardingManager;
use client_onboard::store::{KeyValueStore, LibSqlStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = OnboardConfig::from_env().context("Failed to load configuration")?;

    eprintln!("RiskCherry Client Onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", config.db_path.display());
    if !config.simulate_latency {
        eprintln!("   Simulated latency: off");
    }
    eprintln!("   Type 'help' for commands, 'quit' to exit.\n");

    // ── Store ────────────────────────────────────────────────────────────
    let store: Arc<dyn KeyValueStore> = Arc::new(
        LibSqlStore::new_local(&config.db_path)
            .await
            .with_context(|| format!("Failed to open database at {}", config.db_path.display()))?,
    );

    // ── Session ──────────────────────────────────────────────────────────
    let manager = Arc::new(OnboardingManager::local(config, store));
    manager
        .restore()
        .await
        .context("Failed to restore onboarding progress")?;

    Cli::new(manager).run().await?;

    tracing::info!("Goodbye");
    Ok(())
}
