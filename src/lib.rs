//! Campaign API: read-only REST access to marketing campaign records in PostgreSQL.

pub mod campaign;
pub mod config;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod store;

pub use campaign::{to_wire, to_wire_all, Campaign, CampaignRecord};
pub use config::Settings;
pub use error::{AppError, StartupError};
pub use routes::app;
pub use state::AppState;
pub use store::{Session, Store};

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("campaign_api=info,tower_http=info")),
        )
        .init();
}

/// Connect, ensure the schema, then serve until Ctrl+C. Nothing listens if schema setup fails.
pub async fn serve(settings: Settings) -> Result<(), StartupError> {
    let store = Store::connect(&settings).await?;
    store.ensure_schema().await?;

    let app = app(AppState::new(store.clone()));
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
