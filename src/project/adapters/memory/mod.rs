//! In-memory adapters for the project service.

mod store;
mod users;

pub use store::InMemoryProjectStore;
pub use users::InMemoryUserDirectory;
