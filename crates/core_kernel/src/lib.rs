//! Core Kernel - Foundational types for the inheritance engine
//!
//! This crate provides the building blocks shared by the estate and faraid
//! domains:
//! - Exact rational arithmetic for shares
//! - Money in integer minor units
//! - Strongly-typed identifiers

pub mod fraction;
pub mod money;
pub mod identifiers;
pub mod error;

pub use fraction::{Fraction, FractionError};
pub use money::{Money, Currency, MoneyError};
pub use identifiers::{HeirId, DeceasedId};
