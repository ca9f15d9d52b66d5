//! Step definitions for ownership transfer scenarios.

pub mod given;
pub mod then;
pub mod world;
