//! Errors returned by remote service clients.

use std::sync::Arc;
use thiserror::Error;

/// Result type for remote service calls.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors returned by remote service clients.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The circuit breaker guarding the service is open; no call was made.
    #[error("{service} is temporarily unavailable, retry later")]
    Unavailable {
        /// Name of the remote service.
        service: String,
    },

    /// The call reached the transport and failed.
    #[error("call to {service} failed: {source}")]
    Call {
        /// Name of the remote service.
        service: String,
        /// Underlying transport or remote failure.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl RemoteError {
    /// Wraps a transport or remote failure.
    pub fn call(
        service: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Call {
            service: service.into(),
            source: Arc::new(err),
        }
    }

    /// Returns the name of the service the error came from.
    #[must_use]
    pub fn service(&self) -> &str {
        match self {
            Self::Unavailable { service } | Self::Call { service, .. } => service,
        }
    }

    /// Returns `true` when the call was rejected by an open breaker.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
