//! Remote service plumbing shared by the project and task contexts.
//!
//! Remote clients are plain port implementations; wrapping one in a
//! breaker-guarded adapter gives it fail-fast behaviour when the far side is
//! unhealthy. There is no process-wide breaker registry: every client owns
//! the [`CircuitBreaker`] it was constructed with.

mod breaker;
mod error;

pub use breaker::{BreakerConfig, CircuitBreaker, CircuitState, InvalidBreakerConfig};
pub use error::{RemoteError, RemoteResult};

/// Service name used for the task-owning service.
pub const TASK_SERVICE: &str = "task-service";

/// Service name used for the user directory.
pub const USER_SERVICE: &str = "user-service";

/// Service name used for the project service, as seen by the task side.
pub const PROJECT_SERVICE: &str = "project-service";
