//! Service traits for the collaborators the mutation handler talks to

use crate::core::error::StorageError;
use crate::core::invoice::{Invoice, InvoiceChanges, InvoiceId, NewInvoice};
use async_trait::async_trait;

/// Persistence collaborator for invoices
///
/// Implementations must bind every value (customer id, amount, status, date,
/// id) as a statement parameter; nothing is spliced into query text.
#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// Insert a new invoice, assigning its id
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice, StorageError>;

    /// Overwrite customer, amount and status of the invoice with `id`
    ///
    /// Returns the number of rows affected; an unknown id is a no-op (`0`).
    async fn update(&self, id: &InvoiceId, changes: InvoiceChanges) -> Result<u64, StorageError>;

    /// Get an invoice by ID
    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, StorageError>;

    /// List all invoices, newest date first
    async fn list(&self) -> Result<Vec<Invoice>, StorageError>;
}

/// Cache invalidation collaborator
///
/// Marks any cached rendering of a view path stale so the next read
/// recomputes it from persistence.
#[async_trait]
pub trait Revalidate: Send + Sync {
    async fn revalidate_path(&self, path: &str);
}
