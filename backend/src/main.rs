//! User App Backend
//!
//! User management API with token-based authentication.
//!
//! ## Architecture
//!
//! - Routes: HTTP request handling, the request gate and routing
//! - Services: Login flow and user CRUD
//! - Repositories: `UserStore` over PostgreSQL (or in-memory)
//! - Database: PostgreSQL with SQLx

use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_app_backend::{
    config, db,
    repositories::{InMemoryUserStore, PgUserStore, UserStore},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting User App Backend"
    );

    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    let (users, pool) = open_store(&config).await?;

    let state = AppState::new(users, config.clone())?;
    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        info!("Closing database pool");
        pool.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Open the configured user store
///
/// Returns the pool alongside the store so it can be closed on shutdown.
async fn open_store(config: &config::AppConfig) -> Result<(Arc<dyn UserStore>, Option<PgPool>)> {
    if config.database.is_in_memory() {
        warn!("Using in-memory user store; data is lost on exit");
        return Ok((Arc::new(InMemoryUserStore::new()), None));
    }

    info!("Connecting to database...");
    let pool = db::create_pool(&config.database).await?;
    db::health_check(&pool).await?;

    // Skip in production if using separate migration job
    if !config::AppConfig::is_production() {
        db::run_migrations(&pool).await?;
    }

    Ok((Arc::new(PgUserStore::new(pool.clone())), Some(pool)))
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "user_app_backend=info,tower_http=info".into()
        } else {
            "user_app_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
        warn!("Database URL contains localhost - ensure this is intentional for production");
    }

    let problems = config.production_problems();
    if !problems.is_empty() {
        for problem in &problems {
            error!("Configuration error: {}", problem);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
