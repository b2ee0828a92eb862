//! Origin guard for form actions
//!
//! State-changing requests that carry an `Origin` header are only accepted
//! when the origin's host matches the host the request was sent to, or is on
//! the configured allow-list. Requests without an `Origin` header pass.

use crate::core::error::{DashboardError, RequestError};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Allow-list of hosts permitted to submit form actions
///
/// Entries are `host` or `host:port`; a leading `*.` matches any subdomain.
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    allowed: Arc<Vec<String>>,
}

impl OriginPolicy {
    pub fn new(allowed: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allowed: Arc::new(
                allowed
                    .into_iter()
                    .map(|a| a.into().to_ascii_lowercase())
                    .collect(),
            ),
        }
    }

    /// Decide whether `origin` may act on a request addressed to `request_host`
    pub fn is_allowed(&self, origin: &str, request_host: Option<&str>) -> bool {
        let Some(origin_host) = origin_host(origin) else {
            return false;
        };

        if request_host.is_some_and(|h| h.eq_ignore_ascii_case(&origin_host)) {
            return true;
        }

        let hostname = origin_host.split(':').next().unwrap_or(&origin_host);
        self.allowed
            .iter()
            .any(|pattern| matches_pattern(pattern, &origin_host) || matches_pattern(pattern, hostname))
    }
}

/// Host (and port, when present) of a serialized origin such as
/// `https://example.com:8443`
fn origin_host(origin: &str) -> Option<String> {
    let (_, rest) = origin.split_once("://")?;
    let host = rest.split('/').next().unwrap_or(rest);
    if host.is_empty() {
        return None;
    }
    Some(host.to_ascii_lowercase())
}

fn matches_pattern(pattern: &str, host: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(suffix) => host
            .strip_suffix(suffix)
            .is_some_and(|prefix| prefix.ends_with('.') && prefix.len() > 1),
        None => pattern == host,
    }
}

fn request_host(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-forwarded-host")
        .or_else(|| headers.get(header::HOST))
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim())
}

/// Middleware rejecting cross-origin form submissions
pub async fn guard_form_actions(
    State(policy): State<OriginPolicy>,
    request: Request,
    next: Next,
) -> Result<Response, DashboardError> {
    if request.method() != Method::GET
        && request.method() != Method::HEAD
        && let Some(origin) = request.headers().get(header::ORIGIN)
    {
        let origin = origin.to_str().map_err(|e| RequestError::InvalidHeader {
            header: "origin".to_string(),
            message: e.to_string(),
        })?;

        if !policy.is_allowed(origin, request_host(request.headers())) {
            tracing::warn!(origin, path = %request.uri().path(), "rejected cross-origin form action");
            return Err(RequestError::ForbiddenOrigin {
                origin: origin.to_string(),
            }
            .into());
        }
    }

    Ok(next.run(request).await)
}
