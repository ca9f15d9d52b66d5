//! Port contracts for the task context.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod catalog;
pub mod repository;

pub use catalog::ProjectCatalog;
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
