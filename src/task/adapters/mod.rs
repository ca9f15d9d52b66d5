//! Adapter implementations for the task context.

pub mod loopback;
pub mod memory;
pub mod remote;

pub use loopback::LoopbackProjectCatalog;
pub use memory::InMemoryTaskRepository;
pub use remote::BreakerProjectCatalog;
