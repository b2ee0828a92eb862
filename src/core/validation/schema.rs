//! Invoice schemas
//!
//! [`InvoiceSchema`] describes the full shape of an invoice; [`CreateInvoiceSchema`]
//! is declared on its own and covers only the caller-supplied fields, so the
//! two shapes can be tested and evolved independently.
//!
//! Parsing is all-or-nothing: a schema returns either a fully coerced value or
//! a [`ValidationError`] listing every field that failed, in declaration order.

use super::validators::{coerce_number, date_format, non_negative, one_of, string};
use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::invoice::{InvoiceId, InvoiceStatus, to_minor_units};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

/// A declarative schema over a flat JSON object
pub trait Schema {
    /// The fully typed, coerced value produced on success
    type Output;

    /// Field names this schema reads, in declaration order
    fn fields(&self) -> &'static [&'static str];

    /// Parse `input`, reporting every non-conforming field on failure
    fn parse(&self, input: &Value) -> Result<Self::Output, ValidationError>;
}

/// Collects per-field outcomes so one pass reports every failure
#[derive(Debug, Default)]
struct FieldCollector {
    errors: Vec<FieldValidationError>,
}

impl FieldCollector {
    fn check<T>(&mut self, field: &str, outcome: Result<T, String>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.push(FieldValidationError::new(field, message));
                None
            }
        }
    }

    fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationError> {
        if !self.errors.is_empty() {
            return Err(ValidationError::FieldErrors(self.errors));
        }
        build().ok_or_else(|| ValidationError::FieldErrors(Vec::new()))
    }
}

fn field<'a>(input: &'a Value, name: &str) -> &'a Value {
    input.get(name).unwrap_or(&Value::Null)
}

fn not_an_object() -> ValidationError {
    ValidationError::FieldErrors(vec![FieldValidationError::new(
        "",
        "Expected object",
    )])
}

/// Amount in major units together with its value in cents
fn parse_amount(name: &str, value: &Value) -> Result<(Decimal, i64), String> {
    let amount = coerce_number()(name, value)?;
    non_negative()(name, &amount)?;
    let cents = to_minor_units(amount).ok_or_else(|| format!("Amount {} is too large", amount))?;
    Ok((amount, cents))
}

fn parse_status(name: &str, value: &Value) -> Result<InvoiceStatus, String> {
    let status = one_of(&InvoiceStatus::VALUES)(name, value)?;
    status.parse().map_err(|e: crate::core::invoice::UnknownStatus| e.to_string())
}

// =============================================================================
// Full invoice schema
// =============================================================================

/// The canonical invoice shape, including server-assigned fields
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceSchema;

/// Output of [`InvoiceSchema`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceInput {
    pub id: InvoiceId,
    pub customer_id: String,
    /// Major units as submitted
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl Schema for InvoiceSchema {
    type Output = InvoiceInput;

    fn fields(&self) -> &'static [&'static str] {
        &["id", "customerId", "amount", "status", "date"]
    }

    fn parse(&self, input: &Value) -> Result<InvoiceInput, ValidationError> {
        if !input.is_object() {
            return Err(not_an_object());
        }

        let mut collector = FieldCollector::default();
        let id = collector.check("id", string()("id", field(input, "id")));
        let customer_id =
            collector.check("customerId", string()("customerId", field(input, "customerId")));
        let amount = collector.check("amount", parse_amount("amount", field(input, "amount")));
        let status = collector.check("status", parse_status("status", field(input, "status")));
        let date = collector.check("date", date_format("%Y-%m-%d")("date", field(input, "date")));

        collector.finish(|| {
            Some(InvoiceInput {
                id: InvoiceId::new(id?),
                customer_id: customer_id?,
                amount: amount?.0,
                status: status?,
                date: date?,
            })
        })
    }
}

// =============================================================================
// Create schema (caller-supplied fields only)
// =============================================================================

/// Input schema for create and update: no `id`, no `date`
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateInvoiceSchema;

/// Output of [`CreateInvoiceSchema`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInvoice {
    pub customer_id: String,
    /// Major units as submitted
    pub amount: Decimal,
    /// `amount` in minor units
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

impl Schema for CreateInvoiceSchema {
    type Output = CreateInvoice;

    fn fields(&self) -> &'static [&'static str] {
        &["customerId", "amount", "status"]
    }

    fn parse(&self, input: &Value) -> Result<CreateInvoice, ValidationError> {
        if !input.is_object() {
            return Err(not_an_object());
        }

        let mut collector = FieldCollector::default();
        let customer_id =
            collector.check("customerId", string()("customerId", field(input, "customerId")));
        let amount = collector.check("amount", parse_amount("amount", field(input, "amount")));
        let status = collector.check("status", parse_status("status", field(input, "status")));

        collector.finish(|| {
            let (amount, amount_in_cents) = amount?;
            Some(CreateInvoice {
                customer_id: customer_id?,
                amount,
                amount_in_cents,
                status: status?,
            })
        })
    }
}
