//! Exact rational arithmetic
//!
//! Every share computation runs on [`Fraction`] so that sums can be compared
//! against one exactly. Values are always stored reduced with a positive
//! denominator; conversion to money or decimals happens only at the edges.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub use crate::error::FractionError;

/// An exact rational number `numer / denom`
///
/// Invariants: `denom > 0` and `gcd(|numer|, denom) == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numer: i128,
    denom: i128,
}

/// Greatest common divisor of the magnitudes
///
/// Works on `u128` so that `i128::MIN` has a representable magnitude.
const fn gcd(a: i128, b: i128) -> u128 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// gcd where one side is a positive denominator, so the result fits `i128`
fn gcd_with_denom(value: i128, denom: i128) -> i128 {
    gcd(value, denom) as i128
}

impl Fraction {
    pub const ZERO: Fraction = Fraction { numer: 0, denom: 1 };
    pub const ONE: Fraction = Fraction { numer: 1, denom: 1 };

    /// Creates a reduced fraction, rejecting a zero denominator
    pub fn new(numer: i128, denom: i128) -> Result<Self, FractionError> {
        if denom == 0 {
            return Err(FractionError::ZeroDenominator);
        }
        let (mut n, mut d) = (numer, denom);
        if d < 0 {
            n = n.checked_neg().ok_or(FractionError::Overflow)?;
            d = d.checked_neg().ok_or(FractionError::Overflow)?;
        }
        let g = i128::try_from(gcd(n, d)).map_err(|_| FractionError::Overflow)?;
        Ok(Self {
            numer: n / g,
            denom: d / g,
        })
    }

    /// Creates a fraction from constant parts, as used by the rule tables
    ///
    /// # Panics
    ///
    /// Panics unless `denom` is positive and the parts are in lowest terms.
    /// In a `const` item this is a compile-time error.
    pub const fn of(numer: i128, denom: i128) -> Self {
        assert!(denom > 0, "fraction denominator must be positive");
        assert!(gcd(numer, denom) == 1, "fraction must be in lowest terms");
        Self { numer, denom }
    }

    /// Builds from parts already known to be reduced with a positive denominator
    const fn from_reduced(numer: i128, denom: i128) -> Self {
        Self { numer, denom }
    }

    /// Creates a whole-number fraction
    pub fn from_integer(value: i128) -> Self {
        Self {
            numer: value,
            denom: 1,
        }
    }

    pub fn numer(&self) -> i128 {
        self.numer
    }

    pub fn denom(&self) -> i128 {
        self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer == 0
    }

    pub fn is_positive(&self) -> bool {
        self.numer > 0
    }

    pub fn is_negative(&self) -> bool {
        self.numer < 0
    }

    pub fn is_one(&self) -> bool {
        self.numer == 1 && self.denom == 1
    }

    /// Exact addition
    pub fn checked_add(&self, other: &Fraction) -> Result<Fraction, FractionError> {
        let g = gcd_with_denom(self.denom, other.denom);
        let lhs = self
            .numer
            .checked_mul(other.denom / g)
            .ok_or(FractionError::Overflow)?;
        let rhs = other
            .numer
            .checked_mul(self.denom / g)
            .ok_or(FractionError::Overflow)?;
        let numer = lhs.checked_add(rhs).ok_or(FractionError::Overflow)?;
        let denom = (self.denom / g)
            .checked_mul(other.denom)
            .ok_or(FractionError::Overflow)?;
        Fraction::new(numer, denom)
    }

    /// Exact subtraction
    pub fn checked_sub(&self, other: &Fraction) -> Result<Fraction, FractionError> {
        self.checked_add(&other.checked_neg()?)
    }

    /// Exact multiplication, cross-reducing before multiplying
    pub fn checked_mul(&self, other: &Fraction) -> Result<Fraction, FractionError> {
        let g1 = gcd_with_denom(self.numer, other.denom);
        let g2 = gcd_with_denom(other.numer, self.denom);
        let numer = (self.numer / g1)
            .checked_mul(other.numer / g2)
            .ok_or(FractionError::Overflow)?;
        let denom = (self.denom / g2)
            .checked_mul(other.denom / g1)
            .ok_or(FractionError::Overflow)?;
        Fraction::new(numer, denom)
    }

    /// Exact division
    pub fn checked_div(&self, other: &Fraction) -> Result<Fraction, FractionError> {
        self.checked_mul(&other.recip()?)
    }

    /// Multiplies by an integer scalar
    pub fn checked_mul_int(&self, factor: i128) -> Result<Fraction, FractionError> {
        self.checked_mul(&Fraction::from_integer(factor))
    }

    /// Divides by an integer scalar
    pub fn checked_div_int(&self, divisor: i128) -> Result<Fraction, FractionError> {
        self.checked_mul(&Fraction::new(1, divisor)?)
    }

    /// Returns the reciprocal
    pub fn recip(&self) -> Result<Fraction, FractionError> {
        Fraction::new(self.denom, self.numer)
    }

    /// Sums an iterator of fractions exactly
    pub fn checked_sum<'a, I>(items: I) -> Result<Fraction, FractionError>
    where
        I: IntoIterator<Item = &'a Fraction>,
    {
        items
            .into_iter()
            .try_fold(Fraction::ZERO, |acc, f| acc.checked_add(f))
    }

    /// Rounds to the nearest integer, ties to even (banker's rounding)
    pub fn round_half_even(&self) -> i128 {
        let q = self.numer.div_euclid(self.denom);
        let r = self.numer.rem_euclid(self.denom);
        // r in [0, denom); compare 2r with denom without overflow
        match r.cmp(&(self.denom - r)) {
            Ordering::Less => q,
            Ordering::Greater => q + 1,
            Ordering::Equal => {
                if q % 2 == 0 {
                    q
                } else {
                    q + 1
                }
            }
        }
    }

    /// Applies this fraction to an integer amount and rounds half to even
    pub fn apply_to_minor(&self, amount: i64) -> Result<i64, FractionError> {
        let scaled = self.checked_mul_int(amount as i128)?;
        i64::try_from(scaled.round_half_even()).map_err(|_| FractionError::Overflow)
    }

    /// Converts to a decimal rounded half to even at `dp` places
    pub fn to_decimal(&self, dp: u32) -> Result<Decimal, FractionError> {
        let numer = Decimal::try_from_i128_with_scale(self.numer, 0)
            .map_err(|_| FractionError::Overflow)?;
        let denom = Decimal::try_from_i128_with_scale(self.denom, 0)
            .map_err(|_| FractionError::Overflow)?;
        let value = numer.checked_div(denom).ok_or(FractionError::Overflow)?;
        Ok(value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
    }

    /// Converts to a percentage rounded half to even at `dp` places
    pub fn to_percentage(&self, dp: u32) -> Result<Decimal, FractionError> {
        self.checked_mul_int(100)?.to_decimal(dp)
    }

    /// Negation, failing for a numerator of `i128::MIN`
    pub fn checked_neg(&self) -> Result<Fraction, FractionError> {
        let numer = self.numer.checked_neg().ok_or(FractionError::Overflow)?;
        Ok(Fraction::from_reduced(numer, self.denom))
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::ZERO
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplication preserves order.
        // Fall back to floor/remainder comparison if the products overflow.
        match (
            self.numer.checked_mul(other.denom),
            other.numer.checked_mul(self.denom),
        ) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            _ => {
                let (qa, qb) = (
                    self.numer.div_euclid(self.denom),
                    other.numer.div_euclid(other.denom),
                );
                if qa != qb {
                    return qa.cmp(&qb);
                }
                let ra = Fraction::from_reduced(self.numer.rem_euclid(self.denom), self.denom);
                let rb = Fraction::from_reduced(other.numer.rem_euclid(other.denom), other.denom);
                // Compare remainders via their reciprocals (both in [0, 1))
                match (ra.is_zero(), rb.is_zero()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    (false, false) => Fraction::from_reduced(rb.denom, rb.numer)
                        .cmp(&Fraction::from_reduced(ra.denom, ra.numer)),
                }
            }
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FractionError::InvalidFormat(s.to_string());
        match s.trim().split_once('/') {
            Some((n, d)) => {
                let n: i128 = n.trim().parse().map_err(|_| invalid())?;
                let d: i128 = d.trim().parse().map_err(|_| invalid())?;
                Fraction::new(n, d)
            }
            None => {
                let n: i128 = s.trim().parse().map_err(|_| invalid())?;
                Ok(Fraction::from_integer(n))
            }
        }
    }
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
