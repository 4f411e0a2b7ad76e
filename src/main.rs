//! Campaign API server. Usage: `campaign-api [DATABASE_URL]`.

use campaign_api::{init_tracing, serve, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let settings = Settings::resolve(std::env::args().nth(1))?;
    serve(settings).await?;
    Ok(())
}
