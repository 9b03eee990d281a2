//! Catalog error types.

use reqwest::StatusCode;

/// Typed failures returned by `CatalogClient`.
///
/// Wrapped in `anyhow::Error`; callers that care recover it with
/// `downcast_ref::<CatalogError>()`.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum CatalogError {
    /// The backend answered 404 for the requested resource.
    #[error("not found: {resource}")]
    NotFound {
        /// Request path that was not found.
        resource: String,
    },
    /// The backend answered with any other non-success status.
    #[error("catalog API error (HTTP {status}): {body}")]
    Status {
        /// HTTP status code.
        status: StatusCode,
        /// Response body (best effort).
        body: String,
    },
}

/// Error returned when parsing an enumerated filter value from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?} (expected one of: {expected})")]
pub struct ParseValueError {
    /// What was being parsed (e.g. "sort field").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Accepted spellings, comma separated.
    pub expected: String,
}

impl ParseValueError {
    /// Creates a new parse error.
    pub(crate) fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: String::from(value),
            expected: expected.join(", "),
        }
    }
}
