//! HTTP handlers for invoice views and form actions

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect as HttpRedirect, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::actions::{CreateOutcome, InvoiceActions, Redirect};
use crate::core::error::{DashboardError, RequestError, StorageError};
use crate::core::validation::FormInput;
use crate::core::{Invoice, InvoiceId, InvoiceService, PageCache};

/// Application state shared across handlers
#[derive(Clone)]
pub struct DashboardState {
    pub actions: InvoiceActions,
    pub service: Arc<dyn InvoiceService>,
    pub cache: PageCache,
}

impl std::fmt::Debug for DashboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardState")
            .field("actions", &self.actions)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// `303 See Other` so the browser follows up with a GET
fn see_other(redirect: &Redirect) -> Response {
    HttpRedirect::to(redirect.location()).into_response()
}

/// Invoice listing view, served through the page cache
///
/// The `x-cache` header reports whether the body came from the cache.
pub async fn list_invoices(State(state): State<DashboardState>) -> Result<Response, DashboardError> {
    let service = state.service.clone();
    let (body, status) = state
        .cache
        .get_or_render(state.actions.listing_route(), || async move {
            let invoices = service.list().await?;
            Ok::<Value, StorageError>(json!({
                "invoices": invoices,
                "count": invoices.len()
            }))
        })
        .await?;

    Ok(([("x-cache", status.as_str())], Json(body)).into_response())
}

pub async fn get_invoice(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
) -> Result<Json<Invoice>, DashboardError> {
    let id = InvoiceId::new(id);
    state
        .service
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            RequestError::NotFound {
                resource: "Invoice".to_string(),
                id: id.to_string(),
            }
            .into()
        })
}

/// Create form action
///
/// A failed insert answers `500` with `{"message": "DB Error!"}` so the form
/// can show it; validation failures answer `422`.
pub async fn create_invoice(
    State(state): State<DashboardState>,
    FormInput(form): FormInput,
) -> Result<Response, DashboardError> {
    match state.actions.create(&form).await? {
        CreateOutcome::Redirect(redirect) => Ok(see_other(&redirect)),
        CreateOutcome::Failed(message) => {
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(message)).into_response())
        }
    }
}

/// Update form action
pub async fn update_invoice(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
    FormInput(form): FormInput,
) -> Result<Response, DashboardError> {
    let redirect = state.actions.update(&InvoiceId::new(id), &form).await?;
    Ok(see_other(&redirect))
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-dashboard"
    }))
}
