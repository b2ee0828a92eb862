//! Invoice dashboard server
//!
//! Configuration is read from the YAML file named by `DASHBOARD_CONFIG` when
//! set, then overridden from the environment (`DASHBOARD_ADDRESS`,
//! `POSTGRES_URL`, `DASHBOARD_ALLOWED_ORIGINS`).

use anyhow::Result;
use dashboard::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("DASHBOARD_CONFIG") {
        Ok(path) => DashboardConfig::from_yaml_file(&path)?,
        Err(_) => DashboardConfig::default_config(),
    }
    .apply_env_overrides()?;

    tracing::info!(
        address = %config.server.address,
        listing = %config.routes.invoices,
        "starting invoice dashboard"
    );

    let builder = ServerBuilder::new().with_config(config.clone());
    let builder = match config.database.url.as_deref() {
        Some(url) => with_database(builder, url, config.database.max_connections).await?,
        None => {
            tracing::info!("no database configured, using in-memory storage");
            builder.with_invoice_service(InMemoryInvoiceService::new())
        }
    };

    builder.serve().await
}

#[cfg(feature = "postgres")]
async fn with_database(builder: ServerBuilder, url: &str, max_connections: u32) -> Result<ServerBuilder> {
    use dashboard::storage::postgres::{connect, ensure_schema};

    let pool = connect(url, max_connections).await?;
    ensure_schema(&pool).await?;
    tracing::info!("connected to PostgreSQL");
    Ok(builder.with_invoice_service(PostgresInvoiceService::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn with_database(builder: ServerBuilder, _url: &str, _max_connections: u32) -> Result<ServerBuilder> {
    tracing::warn!("database URL ignored: built without the `postgres` feature, using in-memory storage");
    Ok(builder.with_invoice_service(InMemoryInvoiceService::new()))
}
