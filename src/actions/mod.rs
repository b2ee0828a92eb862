//! Form actions and their outcomes
//!
//! Navigation is modelled as a value: a successful action returns a
//! [`Redirect`] that the HTTP layer turns into a `303 See Other`.

pub mod invoices;

pub use invoices::{DB_ERROR_MESSAGE, InvoiceActions};

use serde::{Deserialize, Serialize};

/// Route of the invoice listing view
pub const INVOICES_ROUTE: &str = "/dashboard/invoices";

/// Instruction to navigate the client to another route
///
/// Terminal for the action that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    location: String,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Structured, reportable action result shown back to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMessage {
    pub message: String,
}

impl ActionMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of a create that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Persisted; navigate to the listing
    Redirect(Redirect),
    /// Persistence failed; stay and show the message
    Failed(ActionMessage),
}

impl CreateOutcome {
    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            CreateOutcome::Redirect(r) => Some(r),
            CreateOutcome::Failed(_) => None,
        }
    }
}
