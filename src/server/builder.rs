//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::DashboardState;
use super::origin::OriginPolicy;
use super::router::build_router;
use crate::actions::InvoiceActions;
use crate::config::DashboardConfig;
use crate::core::cache::PageCache;
use crate::core::clock::Clock;
use crate::core::service::InvoiceService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the dashboard HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_invoice_service(InMemoryInvoiceService::new())
///     .with_config(DashboardConfig::default_config())
///     .build()?;
/// ```
pub struct ServerBuilder {
    service: Option<Arc<dyn InvoiceService>>,
    cache: PageCache,
    clock: Option<Arc<dyn Clock>>,
    config: DashboardConfig,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            service: None,
            cache: PageCache::new(),
            clock: None,
            config: DashboardConfig::default(),
        }
    }

    /// Set the invoice service (required)
    pub fn with_invoice_service(mut self, service: impl InvoiceService + 'static) -> Self {
        self.service = Some(Arc::new(service));
        self
    }

    /// Set an already shared invoice service
    pub fn with_shared_invoice_service(mut self, service: Arc<dyn InvoiceService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Share a page cache with the caller (e.g., to inspect it in tests)
    pub fn with_page_cache(mut self, cache: PageCache) -> Self {
        self.cache = cache;
        self
    }

    /// Override the clock used to date new invoices
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the shared handler state
    pub fn build_state(&self) -> Result<DashboardState> {
        let service = self
            .service
            .clone()
            .ok_or_else(|| anyhow::anyhow!("InvoiceService is required. Call .with_invoice_service()"))?;

        let mut actions = InvoiceActions::new(service.clone(), Arc::new(self.cache.clone()))
            .with_listing_route(self.config.routes.invoices.clone());
        if let Some(clock) = &self.clock {
            actions = actions.with_clock(clock.clone());
        }

        Ok(DashboardState {
            actions,
            service,
            cache: self.cache.clone(),
        })
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        self.config.validate()?;
        let state = self.build_state()?;
        let policy = OriginPolicy::new(self.config.server.allowed_origins.iter().cloned());
        Ok(build_router(state, policy))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to `server.address` from the configuration
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.address.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
