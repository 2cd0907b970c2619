//! Kernel error types shared by the arithmetic and money modules

use thiserror::Error;

/// Errors that can occur during fraction arithmetic
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FractionError {
    #[error("Fraction denominator cannot be zero")]
    ZeroDenominator,

    #[error("Overflow during fraction calculation")]
    Overflow,

    #[error("Invalid fraction literal: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur during money operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Overflow during calculation")]
    Overflow,

    #[error(transparent)]
    Fraction(#[from] FractionError),
}
