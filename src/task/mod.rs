//! Tasks and their tag links.
//!
//! Tasks live in their own context and reach the project context only
//! through the [`ports::ProjectCatalog`] port. Linking a tag checks that the
//! tag belongs to the task's project. The module follows hexagonal
//! architecture:
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
