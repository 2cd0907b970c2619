//! Normalization (Awl / Radd) adjuster
//!
//! After the fixed and residuary stages the shares may not add up to one:
//!
//! - **Awl**: the fixed shares exceed the estate. Every fixed share is scaled
//!   by `1 / Σ fixed`.
//! - **Radd**: the fixed shares fall short and nobody takes the residue. The
//!   surplus is returned to the blood relatives holding fixed shares, in
//!   proportion to their shares. Spouses keep their share unchanged unless
//!   they are the only fixed-share heirs, in which case the surplus goes to
//!   them.
//!
//! The two cases are mutually exclusive and decided by exact comparison.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{Fraction, HeirId};
use crate::error::EngineError;
use crate::fixed_share::FixedShareAllocation;
use crate::residuary::ResiduaryAllocation;
use crate::rules::RuleId;

/// The adjustment applied to bring the shares to exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Normalization {
    None,
    Awl {
        total_fixed: Fraction,
    },
    Radd {
        surplus: Fraction,
        to_spouse: bool,
    },
}

impl Normalization {
    pub fn rule(&self) -> Option<RuleId> {
        match self {
            Normalization::None => None,
            Normalization::Awl { .. } => Some(RuleId::Awl),
            Normalization::Radd { to_spouse: false, .. } => Some(RuleId::Radd),
            Normalization::Radd { to_spouse: true, .. } => Some(RuleId::RaddToSpouse),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Normalization::None => "none",
            Normalization::Awl { .. } => "awl",
            Normalization::Radd { .. } => "radd",
        }
    }
}

/// Fixed shares after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedShares {
    pub normalization: Normalization,
    /// Final fixed portion per heir
    pub fixed: BTreeMap<HeirId, Fraction>,
    /// Heirs whose share was rescaled
    pub adjusted: Vec<HeirId>,
}

impl NormalizedShares {
    pub fn fixed_for(&self, heir_id: HeirId) -> Fraction {
        self.fixed.get(&heir_id).copied().unwrap_or(Fraction::ZERO)
    }

    pub fn was_adjusted(&self, heir_id: HeirId) -> bool {
        self.adjusted.contains(&heir_id)
    }
}

/// Normalizes the fixed shares against the residuary outcome
pub fn normalize(
    fixed: &FixedShareAllocation,
    residuary: &ResiduaryAllocation,
) -> Result<NormalizedShares, EngineError> {
    let original: BTreeMap<HeirId, Fraction> = fixed
        .shares
        .iter()
        .map(|s| (s.heir_id, s.fraction))
        .collect();

    if fixed.total > Fraction::ONE {
        let factor = fixed.total.recip()?;
        return scale(
            fixed,
            original,
            Normalization::Awl {
                total_fixed: fixed.total,
            },
            |_| true,
            &factor,
        );
    }

    if fixed.total < Fraction::ONE && !residuary.has_residuary_heir() && fixed.total.is_positive()
    {
        let surplus = Fraction::ONE.checked_sub(&fixed.total)?;
        let spouse_total = Fraction::checked_sum(
            fixed
                .shares
                .iter()
                .filter(|s| s.is_spouse())
                .map(|s| &s.fraction),
        )?;
        let blood_total = fixed.total.checked_sub(&spouse_total)?;

        if blood_total.is_positive() {
            let factor = Fraction::ONE
                .checked_sub(&spouse_total)?
                .checked_div(&blood_total)?;
            return scale(
                fixed,
                original,
                Normalization::Radd {
                    surplus,
                    to_spouse: false,
                },
                |spouse| !spouse,
                &factor,
            );
        }

        let factor = spouse_total.recip()?;
        return scale(
            fixed,
            original,
            Normalization::Radd {
                surplus,
                to_spouse: true,
            },
            |spouse| spouse,
            &factor,
        );
    }

    Ok(NormalizedShares {
        normalization: Normalization::None,
        fixed: original,
        adjusted: Vec::new(),
    })
}

fn scale(
    allocation: &FixedShareAllocation,
    mut shares: BTreeMap<HeirId, Fraction>,
    normalization: Normalization,
    selects: impl Fn(bool) -> bool,
    factor: &Fraction,
) -> Result<NormalizedShares, EngineError> {
    let mut adjusted = Vec::new();
    for share in &allocation.shares {
        if share.fraction.is_positive() && selects(share.is_spouse()) {
            shares.insert(share.heir_id, share.fraction.checked_mul(factor)?);
            adjusted.push(share.heir_id);
        }
    }
    Ok(NormalizedShares {
        normalization,
        fixed: shares,
        adjusted,
    })
}
