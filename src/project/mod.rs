//! Project, membership and tag management.
//!
//! This context owns the role hierarchy (`OWNER > EDITOR > VIEWER`), the
//! single-owner invariant and the cascade that removes a project's
//! dependents. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
