mod api;
mod config;
mod state;

use std::sync::Arc;

use config::Config;
use state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dishes_service=info".into()),
        )
        .init();

    dotenv::dotenv().ok();

    let config = Config::from_env();
    let state = Arc::new(AppState::new());
    if config.seed {
        state.catalog.seed();
        info!("Catalog seeded with sample menu");
    }

    let app = api::router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🍜 dishes-service listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
