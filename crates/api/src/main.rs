//! Climate Observation API - Main Entry Point

use climate_api::{init_logging, run_server, ApiConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::load()?;
    init_logging(&config.log_level)?;

    info!("=== Climate Observation API v{} ===", env!("CARGO_PKG_VERSION"));
    info!(database = %config.database_url, policy = ?config.cutoff_policy, "Loaded configuration");

    run_server(&config).await?;

    Ok(())
}
