//! Typed error handling for the invoice dashboard
//!
//! Every failure the dashboard can report is one of the categories below, so
//! callers can match on what went wrong instead of inspecting strings.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: form input that does not conform to an invoice schema
//! - [`StorageError`]: the persistence collaborator rejected or failed a write
//! - [`ConfigError`]: configuration parsing and loading
//! - [`RequestError`]: HTTP-level problems (unknown resources, refused origins)
//!
//! # Example
//!
//! ```rust,ignore
//! match actions.update(&id, &form).await {
//!     Ok(redirect) => println!("go to {}", redirect.location()),
//!     Err(DashboardError::Validation(e)) => {
//!         for field in e.fields() {
//!             println!("{}: {}", field.field, field.message);
//!         }
//!     }
//!     Err(e) => eprintln!("update failed: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for the dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Request(e) => e.status_code(),
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Validation(_) => "VALIDATION_ERROR",
            DashboardError::Storage(_) => "STORAGE_ERROR",
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::Request(e) => e.error_code(),
            DashboardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Validation(e) => Some(serde_json::json!({ "fields": e.fields() })),
            DashboardError::Request(RequestError::NotFound { resource, id }) => {
                Some(serde_json::json!({ "resource": resource, "id": id }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors related to input validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more fields did not conform to the schema
    #[error("Validation errors: {}", join_fields(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// The request body could not be read as a form
    #[error("Invalid form body: {message}")]
    InvalidForm { message: String },
}

impl ValidationError {
    /// Every offending field, in schema declaration order
    pub fn fields(&self) -> &[FieldValidationError] {
        match self {
            ValidationError::FieldErrors(errors) => errors,
            ValidationError::InvalidForm { .. } => &[],
        }
    }

    /// Whether `field` is among the offending fields
    pub fn has_field(&self, field: &str) -> bool {
        self.fields().iter().any(|e| e.field == field)
    }
}

fn join_fields(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Data integrity error
    #[error("Data integrity error: {message}")]
    IntegrityError { message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Requested resource does not exist
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },

    /// Form action submitted from an origin that is not allowed
    #[error("Origin '{origin}' is not allowed to submit form actions")]
    ForbiddenOrigin { origin: String },

    /// Malformed request headers
    #[error("Invalid header '{header}': {message}")]
    InvalidHeader { header: String, message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RequestError::ForbiddenOrigin { .. } => StatusCode::FORBIDDEN,
            RequestError::InvalidHeader { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::NotFound { .. } => "NOT_FOUND",
            RequestError::ForbiddenOrigin { .. } => "FORBIDDEN_ORIGIN",
            RequestError::InvalidHeader { .. } => "INVALID_HEADER",
        }
    }
}

/// Result alias used across the crate
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_field() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError::new("customerId", "Required"),
            FieldValidationError::new("status", "Invalid enum value"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation errors: customerId: Required, status: Invalid enum value"
        );
        assert!(err.has_field("status"));
        assert!(!err.has_field("amount"));
    }

    #[test]
    fn test_validation_maps_to_422_with_field_details() {
        let err = DashboardError::from(ValidationError::FieldErrors(vec![
            FieldValidationError::new("amount", "Expected number"),
        ]));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = err.to_response();
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.expect("validation errors carry details");
        assert_eq!(details["fields"][0]["field"], "amount");
    }

    #[test]
    fn test_storage_error_is_500() {
        let err = DashboardError::from(StorageError::QueryError {
            backend: "PostgreSQL".to_string(),
            message: "relation \"invoices\" does not exist".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(err.to_response().details.is_none());
    }

    #[test]
    fn test_config_parse_error_display() {
        let with_file = ConfigError::ParseError {
            file: Some("dashboard.yaml".to_string()),
            message: "bad indent".to_string(),
        };
        assert_eq!(
            with_file.to_string(),
            "Failed to parse config file 'dashboard.yaml': bad indent"
        );

        let without = ConfigError::ParseError {
            file: None,
            message: "bad indent".to_string(),
        };
        assert_eq!(without.to_string(), "Failed to parse config: bad indent");
    }

    #[test]
    fn test_forbidden_origin_is_403() {
        let err = DashboardError::from(RequestError::ForbiddenOrigin {
            origin: "https://evil.example".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.error_code(), "FORBIDDEN_ORIGIN");
    }
}
