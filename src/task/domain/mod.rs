//! Domain model for tasks and their tag links.
//!
//! Tags themselves are owned by the project context; a task only records the
//! identifiers of the tags linked to it.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use task::Task;
