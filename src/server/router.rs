//! Router builder for invoice routes

use super::handlers::{
    DashboardState, create_invoice, get_invoice, health_check, list_invoices, update_invoice,
};
use super::origin::{OriginPolicy, guard_form_actions};
use axum::{Router, middleware, routing::get, routing::post};
use tower_http::trace::TraceLayer;

/// Build invoice routes beneath the listing route
///
/// With the default listing route `/dashboard/invoices`:
/// - GET  /dashboard/invoices - Listing view (cached)
/// - POST /dashboard/invoices/create - Create form action
/// - GET  /dashboard/invoices/{id} - Get one invoice
/// - POST /dashboard/invoices/{id}/edit - Update form action
pub fn build_invoice_routes(state: DashboardState, policy: OriginPolicy) -> Router {
    let listing = state.actions.listing_route().to_string();

    Router::new()
        .route(&listing, get(list_invoices))
        .route(&format!("{}/create", listing), post(create_invoice))
        .route(&format!("{}/{{id}}", listing), get(get_invoice))
        .route(&format!("{}/{{id}}/edit", listing), post(update_invoice))
        .layer(middleware::from_fn_with_state(policy, guard_form_actions))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// Full application router with request tracing
pub fn build_router(state: DashboardState, policy: OriginPolicy) -> Router {
    health_routes()
        .merge(build_invoice_routes(state, policy))
        .layer(TraceLayer::new_for_http())
}
