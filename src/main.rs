use rust_ip_blacklist_api::config::Config;
use rust_ip_blacklist_api::handlers::{router, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration, checks that the upstream API key
/// is present and starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_ip_blacklist_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // A missing key does not stop the server: each lookup reports it instead
    if config.has_api_key() {
        tracing::info!("Startup check: RAPIDAPI_KEY is configured");
    } else {
        tracing::error!(
            "Startup check: RAPIDAPI_KEY is not set. Add it to the environment or .env file and restart the server"
        );
    }

    let port = config.port;
    let app = router(Arc::new(AppState::new(config)));

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
