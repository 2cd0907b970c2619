//! Faraid engine errors
//!
//! Every failure is a typed return value. None of them is retried: the engine
//! is deterministic, so the same input fails the same way.

use thiserror::Error;

use core_kernel::{FractionError, MoneyError};
use domain_estate::EstateError;

/// Errors that can occur while calculating a distribution
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Contradictory or malformed heir input
    #[error("Invalid heir set: {0}")]
    InvalidHeirSet(String),

    /// Relationship tag outside the closed vocabulary
    #[error("Unrecognized relationship: {0}")]
    UnrecognizedRelationship(String),

    /// Debts, funeral cost and bequest exceed the gross assets
    #[error("Negative estate: deductions of {deductions} exceed gross assets of {gross_assets}")]
    NegativeEstate {
        gross_assets: i64,
        deductions: i128,
    },

    /// Bequest above one third without an honoured consent override
    #[error("Wasiyyah of {wasiyyah} exceeds the one-third limit of {limit}")]
    WasiyyahExceedsLimit {
        wasiyyah: i64,
        limit: i64,
    },

    /// Estate amounts that cannot be netted
    #[error("Invalid estate: {0}")]
    InvalidEstate(String),

    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] FractionError),

    #[error("Money error: {0}")]
    Money(MoneyError),

    #[error("Invalid stage transition from {from} to {to}")]
    InvalidStageTransition {
        from: String,
        to: String,
    },
}

impl EngineError {
    pub fn invalid_heir_set(message: impl Into<String>) -> Self {
        EngineError::InvalidHeirSet(message.into())
    }
}

impl From<MoneyError> for EngineError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::Fraction(inner) => EngineError::Arithmetic(inner),
            other => EngineError::Money(other),
        }
    }
}

impl From<EstateError> for EngineError {
    fn from(err: EstateError) -> Self {
        match err {
            EstateError::NegativeEstate {
                gross_assets,
                deductions,
            } => EngineError::NegativeEstate {
                gross_assets,
                deductions,
            },
            EstateError::WasiyyahExceedsLimit { wasiyyah, limit } => {
                EngineError::WasiyyahExceedsLimit { wasiyyah, limit }
            }
            EstateError::InvalidAmount(message) => EngineError::InvalidEstate(message),
            EstateError::Money(inner) => inner.into(),
        }
    }
}
