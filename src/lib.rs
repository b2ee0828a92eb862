//! # Invoice Dashboard
//!
//! Backend for an invoice dashboard: create and update invoices through
//! validated form actions, persist them in a relational store, and keep the
//! cached listing view in sync.
//!
//! ## Features
//!
//! - **Explicit Schemas**: a full invoice schema and a separately declared
//!   create schema, both reporting every failing field at once
//! - **Exact Money Handling**: dollar amounts are parsed as decimals and stored
//!   as integer cents
//! - **Injected Collaborators**: persistence, cache invalidation and the clock
//!   are passed in, so every step can be replaced in tests
//! - **Navigation as Data**: actions return a `Redirect` instead of unwinding
//! - **Storage Backends**: in-memory (default) and PostgreSQL (`postgres` feature)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! let service = Arc::new(InMemoryInvoiceService::new());
//! let actions = InvoiceActions::new(service, Arc::new(PageCache::new()));
//!
//! let form = FormData::new()
//!     .with("customerId", "3958dc9e-712f-4377-85e9-fec4b6a6442a")
//!     .with("amount", "9.99")
//!     .with("status", "pending");
//!
//! match actions.create(&form).await? {
//!     CreateOutcome::Redirect(to) => println!("redirect to {}", to.location()),
//!     CreateOutcome::Failed(state) => println!("{}", state.message),
//! }
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CacheStatus, Clock, CreateInvoice, CreateInvoiceSchema, FixedClock, FormData, Invoice,
        InvoiceChanges, InvoiceId, InvoiceSchema, InvoiceService, InvoiceStatus, NewInvoice,
        PageCache, Revalidate, Schema, SystemClock,
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, DashboardError, DashboardResult, FieldValidationError, RequestError,
        StorageError, ValidationError,
    };

    // === Actions ===
    pub use crate::actions::{
        ActionMessage, CreateOutcome, DB_ERROR_MESSAGE, INVOICES_ROUTE, InvoiceActions, Redirect,
    };

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceService;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceService;

    // === Config ===
    pub use crate::config::DashboardConfig;

    // === Server ===
    pub use crate::server::{DashboardState, OriginPolicy, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use rust_decimal::Decimal;
    pub use std::sync::Arc;
}
