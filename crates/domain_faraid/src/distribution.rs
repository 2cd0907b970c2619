//! Amount distribution
//!
//! Converts final share fractions into minor-unit amounts. Each amount is
//! rounded half to even; the signed difference between the net estate and the
//! sum of rounded amounts is then added to the heir with the largest share
//! (lowest heir id on ties), so the amounts always add up to the net estate.

use core_kernel::{Fraction, HeirId, Money};
use crate::error::EngineError;

/// Result of converting fractions into amounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apportionment {
    /// One amount per input share, in input order
    pub amounts: Vec<Money>,
    /// Net estate minus the sum of the rounded amounts, before placement
    pub remainder: Money,
    /// Heir that absorbed the remainder
    pub recipient: Option<HeirId>,
}

impl Apportionment {
    pub fn total(&self) -> Result<Money, EngineError> {
        let currency = self.remainder.currency();
        Ok(Money::checked_sum(currency, &self.amounts)?)
    }
}

/// Picks the heir with the largest share, lowest id first on ties
pub fn remainder_recipient(shares: &[(HeirId, Fraction)]) -> Option<HeirId> {
    shares
        .iter()
        .filter(|(_, fraction)| fraction.is_positive())
        .min_by(|(a_id, a), (b_id, b)| b.cmp(a).then_with(|| a_id.cmp(b_id)))
        .map(|(id, _)| *id)
}

/// Apportions `net` among `shares`
///
/// With no positive share the amounts are all zero and the whole net estate
/// is reported as remainder without a recipient.
pub fn apportion(net: Money, shares: &[(HeirId, Fraction)]) -> Result<Apportionment, EngineError> {
    let mut amounts = shares
        .iter()
        .map(|(_, fraction)| net.apportion(fraction))
        .collect::<Result<Vec<_>, _>>()?;

    let distributed = Money::checked_sum(net.currency(), &amounts)?;
    let remainder = net.checked_sub(&distributed)?;
    let recipient = remainder_recipient(shares);

    if let Some(id) = recipient {
        if let Some(index) = shares.iter().position(|(heir_id, _)| *heir_id == id) {
            amounts[index] = amounts[index].checked_add(&remainder)?;
        }
    }

    Ok(Apportionment {
        amounts,
        remainder,
        recipient,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;

    fn id(n: u128) -> HeirId {
        HeirId::from_u128(n)
    }

    #[test]
    fn test_exact_split_has_no_remainder() {
        let net = Money::from_minor(1_200_000, Currency::IDR);
        let result = apportion(
            net,
            &[(id(1), Fraction::of(1, 8)), (id(2), Fraction::of(7, 8))],
        )
        .unwrap();
        assert_eq!(result.amounts[0].minor_units(), 150_000);
        assert_eq!(result.amounts[1].minor_units(), 1_050_000);
        assert!(result.remainder.is_zero());
        assert_eq!(result.recipient, Some(id(2)));
    }

    #[test]
    fn test_thirds_remainder_goes_to_lowest_id_on_tie() {
        let net = Money::from_minor(100, Currency::USD);
        let third = Fraction::of(1, 3);
        let result = apportion(net, &[(id(3), third), (id(1), third), (id(2), third)]).unwrap();
        // 33 each, one cent left for heir 1
        assert_eq!(result.remainder.minor_units(), 1);
        assert_eq!(result.recipient, Some(id(1)));
        assert_eq!(result.amounts[1].minor_units(), 34);
        assert_eq!(result.total().unwrap(), net);
    }

    #[test]
    fn test_negative_remainder_is_absorbed() {
        let net = Money::from_minor(5, Currency::USD);
        let result = apportion(
            net,
            &[(id(1), Fraction::of(3, 10)), (id(2), Fraction::of(7, 10))],
        )
        .unwrap();
        // 1.5 -> 2 and 3.5 -> 4, so one unit too many
        assert_eq!(result.remainder.minor_units(), -1);
        assert_eq!(result.recipient, Some(id(2)));
        assert_eq!(result.amounts[1].minor_units(), 3);
        assert_eq!(result.total().unwrap(), net);
    }

    #[test]
    fn test_no_positive_share_keeps_everything_undistributed() {
        let net = Money::from_minor(500, Currency::USD);
        let result = apportion(net, &[(id(1), Fraction::ZERO)]).unwrap();
        assert_eq!(result.recipient, None);
        assert_eq!(result.remainder, net);
        assert!(result.amounts[0].is_zero());
    }
}
