//! Invoice domain types
//!
//! The stored [`Invoice`] row, the closed [`InvoiceStatus`] set, and the two
//! write shapes the mutation handler hands to persistence: [`NewInvoice`] for
//! inserts and [`InvoiceChanges`] for updates.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque invoice identifier
///
/// Assigned by the persistence layer on insert and never revised afterwards.
/// Callers only ever use it to say *which* invoice an update targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

impl InvoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier for a newly persisted invoice
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InvoiceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for InvoiceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Every accepted wire value, in declaration order
    pub const VALUES: [&'static str; 2] = ["pending", "paid"];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a status outside `{pending, paid}`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown invoice status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for InvoiceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Convert a major-unit amount (dollars) into minor units (cents).
///
/// Rounds half away from zero at the cent, so `9.99` becomes `999` exactly and
/// `0.005` becomes `1`. Returns `None` when the result does not fit in `i64`.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// A persisted invoice row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub customer_id: String,
    /// Amount in minor units (cents)
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Values written by an insert; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl NewInvoice {
    pub fn into_invoice(self, id: InvoiceId) -> Invoice {
        Invoice {
            id,
            customer_id: self.customer_id,
            amount: self.amount_in_cents,
            status: self.status,
            date: self.date,
        }
    }
}

/// The only columns an update may overwrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

impl InvoiceChanges {
    /// Apply to a stored row, leaving `id` and `date` untouched
    pub fn apply_to(&self, invoice: &mut Invoice) {
        invoice.customer_id.clone_from(&self.customer_id);
        invoice.amount = self.amount_in_cents;
        invoice.status = self.status;
    }
}
