//! Validation system
//!
//! Invoice input is checked against a declarative [`Schema`] before any
//! persistence attempt. Validators coerce raw form strings into typed values
//! and schemas collect every failing field into one [`ValidationError`].
//!
//! [`ValidationError`]: crate::core::error::ValidationError

pub mod extractor;
pub mod schema;
pub mod validators;

pub use extractor::FormInput;
pub use schema::{CreateInvoice, CreateInvoiceSchema, InvoiceInput, InvoiceSchema, Schema};
