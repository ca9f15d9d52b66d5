//! Atelier: authorization and consistency core for project and task
//! management.
//!
//! The crate decides who may act on a project, keeps exactly one owner per
//! project across ownership transfers, cascades project and user deletion to
//! dependent records (including tasks held by a sibling service), and keeps
//! task-to-tag links inside a single project. Calls to sibling services are
//! guarded by per-client circuit breakers.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and remote services
//! - **Adapters**: Concrete implementations of ports (in-memory stores,
//!   breaker-guarded clients, in-process loopbacks)
//!
//! # Modules
//!
//! - [`project`]: Projects, memberships, tags, access control and cascades
//! - [`task`]: Tasks and tag assignment
//! - [`remote`]: Circuit breaker and remote error types
//! - [`context`]: Per-request acting user and cancellation
//! - [`pagination`]: Page requests and results
//! - [`config`]: Runtime configuration
//! - [`telemetry`]: Tracing subscriber set-up
//! - [`error`]: Client-facing error classification

pub mod config;
pub mod context;
pub mod error;
pub mod pagination;
pub mod project;
pub mod remote;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
