//! In-memory implementation of InvoiceService for testing and development

use crate::core::error::StorageError;
use crate::core::invoice::{Invoice, InvoiceChanges, InvoiceId, NewInvoice};
use crate::core::service::InvoiceService;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory invoice service implementation
///
/// Useful for testing and development. Uses an async RwLock for thread-safe
/// access; clones share the same rows.
#[derive(Clone, Debug, Default)]
pub struct InMemoryInvoiceService {
    invoices: Arc<RwLock<IndexMap<InvoiceId, Invoice>>>,
}

impl InMemoryInvoiceService {
    /// Create a new, empty in-memory invoice service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service pre-populated with `invoices`
    pub fn with_invoices(invoices: impl IntoIterator<Item = Invoice>) -> Self {
        let rows = invoices
            .into_iter()
            .map(|invoice| (invoice.id.clone(), invoice))
            .collect();
        Self {
            invoices: Arc::new(RwLock::new(rows)),
        }
    }

    pub async fn len(&self) -> usize {
        self.invoices.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.invoices.read().await.is_empty()
    }
}

#[async_trait]
impl InvoiceService for InMemoryInvoiceService {
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice, StorageError> {
        let mut invoices = self.invoices.write().await;

        let id = InvoiceId::generate();
        if invoices.contains_key(&id) {
            return Err(StorageError::IntegrityError {
                message: format!("duplicate invoice id '{}'", id),
            });
        }

        let invoice = invoice.into_invoice(id.clone());
        invoices.insert(id, invoice.clone());

        Ok(invoice)
    }

    async fn update(&self, id: &InvoiceId, changes: InvoiceChanges) -> Result<u64, StorageError> {
        let mut invoices = self.invoices.write().await;

        match invoices.get_mut(id) {
            Some(invoice) => {
                changes.apply_to(invoice);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, StorageError> {
        Ok(self.invoices.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>, StorageError> {
        let mut invoices: Vec<Invoice> = self.invoices.read().await.values().cloned().collect();
        // Stable sort keeps insertion order within a day
        invoices.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(invoices)
    }
}
