use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sagrada_lobby::api;
use sagrada_lobby::config::Config;
use sagrada_lobby::infrastructure::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sagrada_lobby=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    api::routes::health::mark_started();

    let config = Config::from_env();

    // Initialize application state
    let state = AppState::from_config(&config.database).await?;
    let app = api::create_app(Arc::new(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting Sagrada lobby backend on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
