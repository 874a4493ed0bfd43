/// Roster Auth Service - Main entry point
use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use roster_auth::{
    config::Config, routes::api_router, AppState, PgUserStore, TokenService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!(
        "Starting Roster Auth Service on {}:{}",
        config.server_host,
        config.server_port
    );

    // Initialize database connection pool
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;

    tracing::info!("Database connection pool initialized");

    // Signing configuration is loaded once here and immutable afterwards;
    // rotating the key requires a restart and invalidates unexpired tokens.
    let tokens = Arc::new(TokenService::from_config(&config));
    let store = Arc::new(PgUserStore::new(db_pool));

    let app = api_router(AppState::new(store, tokens));

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("REST API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
