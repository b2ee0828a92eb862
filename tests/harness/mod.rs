//! Shared doubles for integration tests
//!
//! Provides a `RecordingService` that stores rows in memory, records every
//! write it receives and can be told to fail, plus a `RecordingRevalidator`
//! that remembers every invalidated path.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

use dashboard::prelude::*;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Invoice service double backed by an in-memory store
#[derive(Debug, Default)]
pub struct RecordingService {
    store: InMemoryInvoiceService,
    inserts: Mutex<Vec<NewInvoice>>,
    updates: Mutex<Vec<(InvoiceId, InvoiceChanges)>>,
    fail_writes: AtomicBool,
}

impl RecordingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_invoices(invoices: impl IntoIterator<Item = Invoice>) -> Self {
        Self {
            store: InMemoryInvoiceService::with_invoices(invoices),
            ..Self::default()
        }
    }

    /// A service whose inserts and updates always fail
    pub fn failing() -> Self {
        let service = Self::default();
        service.fail_writes.store(true, Ordering::SeqCst);
        service
    }

    pub fn inserts(&self) -> Vec<NewInvoice> {
        self.inserts.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(InvoiceId, InvoiceChanges)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.inserts.lock().unwrap().len() + self.updates.lock().unwrap().len()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable {
                backend: "recording".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl InvoiceService for RecordingService {
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice, StorageError> {
        self.inserts.lock().unwrap().push(invoice.clone());
        self.check_available()?;
        self.store.insert(invoice).await
    }

    async fn update(&self, id: &InvoiceId, changes: InvoiceChanges) -> Result<u64, StorageError> {
        self.updates.lock().unwrap().push((id.clone(), changes.clone()));
        self.check_available()?;
        self.store.update(id, changes).await
    }

    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, StorageError> {
        self.store.get(id).await
    }

    async fn list(&self) -> Result<Vec<Invoice>, StorageError> {
        self.store.list().await
    }
}

/// Revalidation double remembering every path it was asked to invalidate
#[derive(Debug, Default)]
pub struct RecordingRevalidator {
    paths: Mutex<Vec<String>>,
}

impl RecordingRevalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl Revalidate for RecordingRevalidator {
    async fn revalidate_path(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

pub const CUSTOMER_ID: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A stored invoice with the given id, dated 2023-06-01
pub fn sample_invoice(id: &str) -> Invoice {
    Invoice {
        id: InvoiceId::new(id),
        customer_id: "c0".to_string(),
        amount: 1234,
        status: InvoiceStatus::Pending,
        date: date(2023, 6, 1),
    }
}

pub fn invoice_form(customer_id: &str, amount: &str, status: &str) -> FormData {
    FormData::new()
        .with("customerId", customer_id)
        .with("amount", amount)
        .with("status", status)
}

/// Actions wired to the given doubles with a fixed clock
pub fn actions_with(
    service: Arc<RecordingService>,
    revalidator: Arc<RecordingRevalidator>,
    today: NaiveDate,
) -> InvoiceActions {
    InvoiceActions::new(service, revalidator).with_clock(Arc::new(FixedClock(today)))
}
