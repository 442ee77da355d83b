//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use anyhow::Context;
use auth::PgCredentialStore;
use inventory::PgProductRepository;
use platform::storage::ImageStorage;
use sqlx::postgres::PgPoolOptions;
use textile_api::seed::seed_default_accounts;
use textile_api::{AppConfig, AppContext, build_app};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "textile_api=info,auth=info,inventory=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Migrations completed");

    let credentials = PgCredentialStore::new(pool.clone());
    seed_default_accounts(
        credentials.clone(),
        &config.seed_admin_password,
        &config.seed_user_password,
    )
    .await?;

    let ctx = AppContext::new(
        config.auth,
        ImageStorage::new(config.upload_dir),
        config.frontend_origins,
    );
    let app = build_app(ctx, credentials, PgProductRepository::new(pool));

    // Start server
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
