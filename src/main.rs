use std::env;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "PAYROLL_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config/payroll.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigLoader::load(&config_path)?;
    let bind_address = config.server().bind_address.clone();
    let rules = config.rules();

    tracing::info!(
        config_path = %config_path,
        timezone = rules.timezone.name(),
        daily_threshold_ms = rules.daily_threshold_ms,
        "Loaded payroll configuration"
    );

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %bind_address, "Payroll engine listening");

    axum::serve(listener, create_router(AppState::new(config)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn shutdown_signal() {
    if let Err(error) = signal::ctrl_c().await {
        tracing::warn!(error = %error, "Failed to install Ctrl+C handler");
    }
    tracing::info!("Shutdown signal received");
}
