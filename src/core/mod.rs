//! Core module containing the invoice domain, its schemas and collaborator traits

pub mod cache;
pub mod clock;
pub mod error;
pub mod form;
pub mod invoice;
pub mod service;
pub mod validation;

pub use cache::{CacheStatus, PageCache};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{
    ConfigError, DashboardError, DashboardResult, FieldValidationError, RequestError,
    StorageError, ValidationError,
};
pub use form::FormData;
pub use invoice::{Invoice, InvoiceChanges, InvoiceId, InvoiceStatus, NewInvoice};
pub use service::{InvoiceService, Revalidate};
pub use validation::{CreateInvoice, CreateInvoiceSchema, InvoiceSchema, Schema};
