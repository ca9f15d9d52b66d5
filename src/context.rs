//! Per-request context threaded through every service call.
//!
//! A [`RequestContext`] names the acting user (if any) and carries a
//! cancellation token. Services check the token between suspension points so
//! a caller that abandons the request stops further mutations from being
//! issued.

use crate::project::domain::UserId;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Error returned when a request has been cancelled by its caller.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("request was cancelled before completion")]
pub struct Cancelled;

/// Context for one logical request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    acting_user: Option<UserId>,
    cancellation: CancellationToken,
}

impl RequestContext {
    /// Creates a context for a request issued by an end user.
    #[must_use]
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            acting_user: Some(user_id),
            cancellation: CancellationToken::new(),
        }
    }

    /// Creates a context for service-to-service calls with no end user.
    #[must_use]
    pub fn internal() -> Self {
        Self {
            acting_user: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Replaces the cancellation token, typically with a child of a
    /// connection-scoped token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Returns the acting user, if the request came from one.
    #[must_use]
    pub const fn acting_user(&self) -> Option<UserId> {
        self.acting_user
    }

    /// Returns the cancellation token for this request.
    #[must_use]
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Cancels the request.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Returns `true` once the request has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Fails with [`Cancelled`] if the caller has abandoned the request.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] when the cancellation token has fired.
    pub fn ensure_active(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        Ok(())
    }
}
