use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_catalog::{
    api::{create_router, AppState},
    completion::GroqGateway,
    config::Config,
    db,
    error::AppError,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,book_catalog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting book catalog API v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::connect(
        &config.database_url,
        config.db_max_connections,
        config.db_min_connections,
    )
    .await?;
    tracing::info!("Database connected: {}", config.database_url);

    db::migrate(&pool).await?;
    tracing::info!("Database migrations completed");

    let gateway = GroqGateway::new(
        config.completion_api_key.clone(),
        config.completion_api_url.clone(),
        Duration::from_secs(config.completion_timeout_secs),
    )?;
    tracing::info!("Completion gateway: {}", config.completion_api_url);

    let state = AppState {
        db: pool,
        gateway: Arc::new(gateway),
    };

    let app = create_router(state, Duration::from_secs(config.request_timeout_secs));

    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
