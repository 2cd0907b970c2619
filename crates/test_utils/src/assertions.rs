//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for calculation results that give
//! more meaningful error messages than standard assertions.

use core_kernel::{Fraction, HeirId};
use domain_faraid::{CalculationResult, ShareKind};
use rust_decimal::Decimal;

/// Asserts that the assigned fractions add up to exactly one
pub fn assert_fractions_sum_to_one(result: &CalculationResult) {
    let total = result
        .total_fraction()
        .unwrap_or_else(|e| panic!("Fraction sum overflowed: {}", e));
    assert_eq!(
        total,
        Fraction::ONE,
        "Shares sum to {} instead of 1: {:?}",
        total,
        result
            .assignments()
            .iter()
            .map(|a| (a.relationship, a.fraction))
            .collect::<Vec<_>>()
    );
}

/// Asserts that the assigned amounts add up to the distributable estate
pub fn assert_amounts_sum_to_net(result: &CalculationResult) {
    let total = result
        .total_amount()
        .unwrap_or_else(|e| panic!("Amount sum failed: {}", e));
    assert_eq!(
        total,
        result.net_estate().distributable,
        "Amounts sum to {} instead of the net estate {}",
        total,
        result.net_estate().distributable
    );
}

/// Asserts the final fraction assigned to an heir
pub fn assert_share(result: &CalculationResult, heir_id: HeirId, expected: Fraction) {
    let assignment = result
        .assignment_for(heir_id)
        .unwrap_or_else(|| panic!("No assignment for heir {}", heir_id));
    assert_eq!(
        assignment.fraction, expected,
        "Heir {} ({}) received {} instead of {}",
        heir_id, assignment.relationship, assignment.fraction, expected
    );
}

/// Asserts the minor-unit amount assigned to an heir
pub fn assert_amount(result: &CalculationResult, heir_id: HeirId, expected_minor: i64) {
    let assignment = result
        .assignment_for(heir_id)
        .unwrap_or_else(|| panic!("No assignment for heir {}", heir_id));
    assert_eq!(
        assignment.amount.minor_units(),
        expected_minor,
        "Heir {} ({}) received {} instead of {} minor units",
        heir_id,
        assignment.relationship,
        assignment.amount,
        expected_minor
    );
}

/// Asserts the display percentage of an heir
pub fn assert_percentage(result: &CalculationResult, heir_id: HeirId, expected: Decimal) {
    let assignment = result
        .assignment_for(heir_id)
        .unwrap_or_else(|| panic!("No assignment for heir {}", heir_id));
    assert_eq!(
        assignment.percentage, expected,
        "Heir {} percentage {} instead of {}",
        heir_id, assignment.percentage, expected
    );
}

/// Asserts that an heir is excluded and receives nothing
pub fn assert_excluded(result: &CalculationResult, heir_id: HeirId) {
    let assignment = result
        .assignment_for(heir_id)
        .unwrap_or_else(|| panic!("No assignment for heir {}", heir_id));
    assert_eq!(
        assignment.kind,
        ShareKind::None,
        "Heir {} ({}) expected to be excluded, got {:?}",
        heir_id,
        assignment.relationship,
        assignment.kind
    );
    assert!(assignment.fraction.is_zero());
    assert!(assignment.amount.is_zero());
}

/// Asserts the share kind of an heir
pub fn assert_kind(result: &CalculationResult, heir_id: HeirId, expected: ShareKind) {
    let assignment = result
        .assignment_for(heir_id)
        .unwrap_or_else(|| panic!("No assignment for heir {}", heir_id));
    assert_eq!(
        assignment.kind, expected,
        "Heir {} ({}) kind mismatch",
        heir_id, assignment.relationship
    );
}
