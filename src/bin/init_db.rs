//! One-off bootstrap: creates the campaigns table and loads a SQL data script.
//!
//! Usage: `init-db [SCRIPT]` (default `data/campaigns.sql`). Connection settings come from the environment.

use campaign_api::{init_tracing, Settings, StartupError, Store};

const DEFAULT_SCRIPT: &str = "data/campaigns.sql";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SCRIPT.into());
    let script = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| StartupError::Bootstrap(format!("read {}: {}", path, e)))?;

    let settings = Settings::resolve(None)?;
    let store = Store::connect(&settings).await?;
    store.ensure_schema().await?;
    let executed = store.run_script(&script).await?;
    store.close().await;

    tracing::info!(script = %path, statements = executed, "database initialized");
    Ok(())
}
