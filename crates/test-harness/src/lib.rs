//! Shared helpers for the scenario tests: mesh math and journal queries.

pub mod assertions;
pub mod helpers;

pub use assertions::*;
pub use helpers::*;
