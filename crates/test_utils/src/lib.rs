//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! faraid engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built estates and heir scenarios
//! - `builders`: Builder patterns for estates and heir sets
//! - `assertions`: Custom assertion helpers for calculation results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
