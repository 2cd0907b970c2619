//! Estate preprocessing
//!
//! Nets funeral cost, debts and the bequest out of the gross assets in the
//! order the law prescribes, and enforces the one-third bequest cap. The cap is
//! never clamped: an oversized bequest is a validation failure.

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use crate::error::EstateError;
use crate::snapshot::EstateSnapshot;

/// Options that influence preprocessing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Whether a recorded unanimous consent may lift the one-third cap
    pub honor_consent_override: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            honor_consent_override: true,
        }
    }
}

/// The estate after all deductions, ready for distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetEstate {
    pub gross_assets: Money,
    pub funeral_cost: Money,
    pub debts: Money,
    /// Gross assets less funeral cost and debts
    pub after_liabilities: Money,
    pub wasiyyah: Money,
    /// Largest bequest permitted without consent
    pub wasiyyah_limit: Money,
    /// Whether the bequest relied on the consent override
    pub consent_override_applied: bool,
    /// Amount distributed among the heirs
    pub distributable: Money,
}

/// Preprocesses an estate with default options
pub fn preprocess(snapshot: &EstateSnapshot) -> Result<NetEstate, EstateError> {
    preprocess_with(snapshot, &PreprocessOptions::default())
}

/// Preprocesses an estate
///
/// # Errors
///
/// * `InvalidAmount` - a negative amount, or itemised assets that do not sum to
///   the gross assets
/// * `NegativeEstate` - debts, funeral cost and bequest exceed the gross assets
/// * `WasiyyahExceedsLimit` - bequest above one third without an honoured consent
pub fn preprocess_with(
    snapshot: &EstateSnapshot,
    options: &PreprocessOptions,
) -> Result<NetEstate, EstateError> {
    validate_amounts(snapshot)?;

    let deductions =
        snapshot.debts as i128 + snapshot.funeral_cost as i128 + snapshot.wasiyyah as i128;
    if deductions > snapshot.gross_assets as i128 {
        return Err(EstateError::NegativeEstate {
            gross_assets: snapshot.gross_assets,
            deductions,
        });
    }

    let after_liabilities = snapshot
        .gross_assets_money()
        .checked_sub(&snapshot.funeral_cost_money())?
        .checked_sub(&snapshot.debts_money())?;

    let limit = after_liabilities.minor_units() / 3;
    let exceeds_cap = 3 * snapshot.wasiyyah as i128 > after_liabilities.minor_units() as i128;
    let consent_override_applied = exceeds_cap && snapshot.wasiyyah_consent;
    if exceeds_cap && !(consent_override_applied && options.honor_consent_override) {
        return Err(EstateError::WasiyyahExceedsLimit {
            wasiyyah: snapshot.wasiyyah,
            limit,
        });
    }

    let distributable = after_liabilities.checked_sub(&snapshot.wasiyyah_money())?;

    Ok(NetEstate {
        gross_assets: snapshot.gross_assets_money(),
        funeral_cost: snapshot.funeral_cost_money(),
        debts: snapshot.debts_money(),
        after_liabilities,
        wasiyyah: snapshot.wasiyyah_money(),
        wasiyyah_limit: Money::from_minor(limit, snapshot.currency),
        consent_override_applied,
        distributable,
    })
}

fn validate_amounts(snapshot: &EstateSnapshot) -> Result<(), EstateError> {
    let fields = [
        ("gross_assets", snapshot.gross_assets),
        ("debts", snapshot.debts),
        ("funeral_cost", snapshot.funeral_cost),
        ("wasiyyah", snapshot.wasiyyah),
    ];
    for (name, value) in fields {
        if value < 0 {
            return Err(EstateError::invalid_amount(format!(
                "{} must not be negative, got {}",
                name, value
            )));
        }
    }

    if !snapshot.assets.is_empty() {
        if let Some(item) = snapshot.assets.iter().find(|a| a.value < 0) {
            return Err(EstateError::invalid_amount(format!(
                "asset '{}' has negative value {}",
                item.description, item.value
            )));
        }
        let itemised: i128 = snapshot.assets.iter().map(|a| a.value as i128).sum();
        if itemised != snapshot.gross_assets as i128 {
            return Err(EstateError::invalid_amount(format!(
                "itemised assets sum to {} but gross assets are {}",
                itemised, snapshot.gross_assets
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;

    #[test]
    fn test_net_estate_subtracts_everything() {
        let snapshot = EstateSnapshot::new(Currency::USD, 1_000_000)
            .with_debts(100_000)
            .with_funeral_cost(50_000)
            .with_wasiyyah(50_000);
        let net = preprocess(&snapshot).unwrap();
        assert_eq!(net.after_liabilities.minor_units(), 850_000);
        assert_eq!(net.distributable.minor_units(), 800_000);
        assert!(!net.consent_override_applied);
    }

    #[test]
    fn test_wasiyyah_exactly_one_third_is_allowed() {
        let snapshot = EstateSnapshot::new(Currency::USD, 900).with_wasiyyah(300);
        let net = preprocess(&snapshot).unwrap();
        assert_eq!(net.distributable.minor_units(), 600);
    }

    #[test]
    fn test_wasiyyah_over_cap_rejected() {
        let snapshot = EstateSnapshot::new(Currency::USD, 900).with_wasiyyah(301);
        assert_eq!(
            preprocess(&snapshot),
            Err(EstateError::WasiyyahExceedsLimit {
                wasiyyah: 301,
                limit: 300
            })
        );
    }

    #[test]
    fn test_consent_not_honoured_when_disabled() {
        let snapshot = EstateSnapshot::new(Currency::USD, 900)
            .with_wasiyyah(450)
            .with_wasiyyah_consent(true);
        let options = PreprocessOptions {
            honor_consent_override: false,
        };
        assert!(matches!(
            preprocess_with(&snapshot, &options),
            Err(EstateError::WasiyyahExceedsLimit { .. })
        ));
        assert!(preprocess(&snapshot).unwrap().consent_override_applied);
    }

    #[test]
    fn test_negative_estate() {
        let snapshot = EstateSnapshot::new(Currency::USD, 100)
            .with_debts(80)
            .with_funeral_cost(30);
        assert!(matches!(
            preprocess(&snapshot),
            Err(EstateError::NegativeEstate { deductions: 110, .. })
        ));
    }
}
