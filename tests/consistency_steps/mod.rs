//! Step definitions for deletion and tag assignment scenarios.

pub mod given;
pub mod then;
pub mod when;
