//! Client-facing error classification shared by every service.
//!
//! Each service error enum exposes a `kind()` mapping onto [`ErrorKind`], so
//! callers can branch on the category without matching every variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Client-facing classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The subject does not exist.
    NotFound,
    /// The request conflicts with an existing value.
    Duplicate,
    /// The caller lacks the required role.
    AccessDenied,
    /// A remote dependency is circuit-broken; the request may be retried.
    ServiceUnavailable,
    /// The request is malformed or violates a domain rule.
    Validation,
    /// The caller abandoned the request.
    Cancelled,
    /// Persistence or transport failure.
    Internal,
}

impl ErrorKind {
    /// Returns the wire code, matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Duplicate => "duplicate",
            Self::AccessDenied => "access_denied",
            Self::ServiceUnavailable => "service_unavailable",
            Self::Validation => "validation",
            Self::Cancelled => "cancelled",
            Self::Internal => "internal",
        }
    }

    /// Returns `true` when retrying the same request later may succeed.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::ServiceUnavailable)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
