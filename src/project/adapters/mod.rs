//! Adapter implementations for the project context.

pub mod loopback;
pub mod memory;
pub mod remote;

pub use loopback::LoopbackTaskService;
pub use memory::{InMemoryProjectStore, InMemoryUserDirectory};
pub use remote::{BreakerTaskServiceClient, BreakerUserDirectory};
