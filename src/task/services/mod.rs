//! Application services for tasks and tag links.

mod error;
mod lifecycle;
mod lookup;
mod tagging;

pub use error::{TaskServiceError, TaskServiceResult};
pub use lifecycle::{CreateTaskRequest, TaskLifecycleService};
pub use tagging::TagAssignmentService;
