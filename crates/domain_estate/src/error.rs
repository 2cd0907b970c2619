//! Estate domain errors

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur while netting an estate
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstateError {
    /// Debts, funeral cost and bequest together exceed the gross assets
    #[error("Deductions of {deductions} exceed gross assets of {gross_assets} (minor units)")]
    NegativeEstate {
        gross_assets: i64,
        deductions: i128,
    },

    /// Bequest is larger than one third of the estate after liabilities
    #[error("Wasiyyah of {wasiyyah} exceeds the one-third limit of {limit} (minor units) without heir consent")]
    WasiyyahExceedsLimit {
        wasiyyah: i64,
        limit: i64,
    },

    /// An amount is negative or inconsistent
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl EstateError {
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        EstateError::InvalidAmount(message.into())
    }
}
