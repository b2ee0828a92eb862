//! Invoice mutation handler
//!
//! Runs one create or update per invocation:
//!
//! ```text
//! Validating ──▶ ValidationFailed
//!     │
//!     ▼
//! Persisting ──▶ PersistFailed   (create: DB Error! message, update: propagated)
//!     │
//!     ▼
//! Invalidating ──▶ NavigatedAway (Redirect to the listing view)
//! ```
//!
//! The two operations deliberately handle persistence failures differently:
//! `create` reports them as an [`ActionMessage`], `update` propagates them as
//! [`DashboardError::Storage`].

use super::{ActionMessage, CreateOutcome, INVOICES_ROUTE, Redirect};
use crate::core::clock::{Clock, SystemClock};
use crate::core::error::{DashboardError, ValidationError};
use crate::core::form::FormData;
use crate::core::invoice::{InvoiceChanges, InvoiceId, NewInvoice};
use crate::core::service::{InvoiceService, Revalidate};
use crate::core::validation::{CreateInvoice, CreateInvoiceSchema, Schema};
use std::sync::Arc;

/// Message returned by `create` when the insert fails
pub const DB_ERROR_MESSAGE: &str = "DB Error!";

/// Create/update operations on invoices with injected collaborators
#[derive(Clone)]
pub struct InvoiceActions {
    service: Arc<dyn InvoiceService>,
    revalidator: Arc<dyn Revalidate>,
    clock: Arc<dyn Clock>,
    listing_route: String,
}

impl std::fmt::Debug for InvoiceActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceActions")
            .field("listing_route", &self.listing_route)
            .finish_non_exhaustive()
    }
}

impl InvoiceActions {
    /// Create a handler writing through `service` and invalidating through `revalidator`
    pub fn new(service: Arc<dyn InvoiceService>, revalidator: Arc<dyn Revalidate>) -> Self {
        Self {
            service,
            revalidator,
            clock: Arc::new(SystemClock),
            listing_route: INVOICES_ROUTE.to_string(),
        }
    }

    /// Use `clock` for the creation date
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Invalidate and redirect to `route` instead of the default listing route
    pub fn with_listing_route(mut self, route: impl Into<String>) -> Self {
        self.listing_route = route.into();
        self
    }

    pub fn listing_route(&self) -> &str {
        &self.listing_route
    }

    /// Validate the caller-supplied fields of `form`
    ///
    /// Only `customerId`, `amount` and `status` are read; anything else in the
    /// form, including `id` or `date`, is ignored.
    pub fn validate(form: &FormData) -> Result<CreateInvoice, ValidationError> {
        let schema = CreateInvoiceSchema;
        schema.parse(&form.pick(schema.fields()))
    }

    /// Update the invoice with `id` from `form`
    ///
    /// Overwrites customer, amount and status; `id` and `date` are never
    /// touched. A storage failure is returned to the caller unhandled.
    pub async fn update(&self, id: &InvoiceId, form: &FormData) -> Result<Redirect, DashboardError> {
        let input = Self::validate(form).inspect_err(|e| {
            tracing::debug!(invoice_id = %id, fields = ?e.fields(), "update rejected by validation");
        })?;

        let changes = InvoiceChanges {
            amount_in_cents: input.amount_in_cents,
            customer_id: input.customer_id,
            status: input.status,
        };

        let affected = self.service.update(id, changes).await?;
        if affected == 0 {
            tracing::warn!(invoice_id = %id, "update matched no invoice");
        } else {
            tracing::info!(invoice_id = %id, "invoice updated");
        }

        Ok(self.finish().await)
    }

    /// Create an invoice from `form`, dated today
    ///
    /// A failed insert is reported as an [`ActionMessage`] carrying
    /// [`DB_ERROR_MESSAGE`]; no invalidation or redirect happens in that case.
    pub async fn create(&self, form: &FormData) -> Result<CreateOutcome, ValidationError> {
        let input = Self::validate(form).inspect_err(|e| {
            tracing::debug!(fields = ?e.fields(), "create rejected by validation");
        })?;

        let new_invoice = NewInvoice {
            amount_in_cents: input.amount_in_cents,
            customer_id: input.customer_id,
            status: input.status,
            date: self.clock.today(),
        };

        match self.service.insert(new_invoice).await {
            Ok(invoice) => {
                tracing::info!(
                    invoice_id = %invoice.id,
                    customer_id = %invoice.customer_id,
                    amount = invoice.amount,
                    "invoice created"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create invoice");
                return Ok(CreateOutcome::Failed(ActionMessage::new(DB_ERROR_MESSAGE)));
            }
        }

        Ok(CreateOutcome::Redirect(self.finish().await))
    }

    async fn finish(&self) -> Redirect {
        self.revalidator.revalidate_path(&self.listing_route).await;
        Redirect::to(self.listing_route.clone())
    }
}
