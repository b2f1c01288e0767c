use std::sync::Arc;

use anyhow::Context;
use storage::{Database, FileTenantLock, IdDispenser, InMemoryTenantLock, ShardGateway, TenantLock};

mod app;
mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::{Config, LockBackend};
use middleware::auth::TokenVerifier;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting scoreboard API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Opening shared store at: {}", config.database_url);
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    tokio::fs::create_dir_all(&config.tenant_db_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create tenant directory {}",
                config.tenant_db_dir.display()
            )
        })?;

    let shards = match &config.tenant_schema_file {
        Some(schema_file) => ShardGateway::with_schema_file(&config.tenant_db_dir, schema_file)
            .await
            .context("Failed to load tenant schema")?,
        None => ShardGateway::new(&config.tenant_db_dir),
    };

    let locks: Arc<dyn TenantLock> = match config.lock_backend {
        LockBackend::File => Arc::new(FileTenantLock::new(&config.tenant_db_dir)),
        LockBackend::Memory => Arc::new(InMemoryTenantLock::new()),
    };
    tracing::info!(backend = ?config.lock_backend, "Tenant lock backend selected");

    let public_key = tokio::fs::read(&config.jwt_public_key_file)
        .await
        .with_context(|| {
            format!(
                "Failed to read {}",
                config.jwt_public_key_file.display()
            )
        })?;
    let verifier =
        TokenVerifier::from_rsa_pem(&public_key).context("Failed to parse JWT public key")?;

    let state = AppState {
        ids: IdDispenser::new(db.pool().clone()),
        db,
        shards,
        locks,
        verifier: Arc::new(verifier),
        base_hostname: Arc::from(config.base_hostname.as_str()),
    };

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "OpenAPI document available at http://{}/api-docs/openapi.json",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app::router(state))
        .await
        .context("Server error")?;

    Ok(())
}
