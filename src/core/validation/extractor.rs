//! Axum extractor for form submissions
//!
//! This module provides the `FormInput` extractor that decodes an
//! `application/x-www-form-urlencoded` body into [`FormData`] before it
//! reaches the action handlers.

use crate::core::error::{DashboardError, ValidationError};
use crate::core::form::FormData;
use axum::{
    Form,
    extract::{FromRequest, Request},
};

/// Axum extractor that decodes a flat form body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_invoice(
///     State(state): State<DashboardState>,
///     FormInput(form): FormInput,
/// ) -> Response {
///     // form.get("customerId"), form.get("amount"), ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FormInput(pub FormData);

impl FormInput {
    /// Get the inner form data
    pub fn into_inner(self) -> FormData {
        self.0
    }
}

// Allow dereferencing to FormData
impl std::ops::Deref for FormInput {
    type Target = FormData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequest<S> for FormInput
where
    S: Send + Sync,
{
    type Rejection = DashboardError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Pairs keep submission order so the first value of a repeated name wins
        let Form(pairs): Form<Vec<(String, String)>> = Form::from_request(req, state)
            .await
            .map_err(|e| ValidationError::InvalidForm {
                message: e.body_text(),
            })?;

        Ok(FormInput(FormData::from_pairs(pairs)))
    }
}
