//! Server module for exposing the invoice actions over HTTP
//!
//! This module provides a `ServerBuilder` that wires:
//! - The listing view and the create/update form actions
//! - The origin guard for form submissions
//! - Health check routes

pub mod builder;
pub mod handlers;
pub mod origin;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::DashboardState;
pub use origin::OriginPolicy;
