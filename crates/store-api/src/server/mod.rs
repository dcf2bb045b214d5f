//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;

use axum::Router;
use store_common::{AppConfig, AppError, AppResult};
use store_db::{create_pool, run_migrations, PoolConfig};
use store_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::response::route_not_found;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_rate_limit(create_router(), &config.rate_limit);
    let router = api.merge(health_routes()).fallback(route_not_found);
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());

    router.with_state(state)
}

/// Connect to PostgreSQL, run migrations and create AppState
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("Migrations failed: {e}")))?;
        info!(dir = %config.database.migrations_dir, "Migrations applied");
    }

    Ok(AppState::new(ServiceContext::from_pool(pool), config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> AppResult<()> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API address {}: {e}", config.api.address())))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
