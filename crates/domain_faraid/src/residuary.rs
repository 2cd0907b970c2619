//! Residuary (Asabah) distributor
//!
//! Whatever the fixed shares leave goes to the closest residuary class present.
//! The classes are listed in order of degree; the first one with an eligible
//! member takes the whole residue and more distant classes get nothing.
//! Within a class a male takes twice the portion of a female.

use core_kernel::{Fraction, HeirId};
use crate::composition::Composition;
use crate::error::EngineError;
use crate::heir::{AnnotatedHeir, Relationship};
use crate::rules::RuleId;

use Relationship::*;

/// A single residuary class
#[derive(Debug, Clone, Copy)]
pub struct ResiduaryRule {
    pub id: RuleId,
    pub members: &'static [Relationship],
    pub applies: fn(&Composition) -> bool,
}

/// Residuary classes, closest degree first
pub const RESIDUARY_RULES: &[ResiduaryRule] = &[
    ResiduaryRule {
        id: RuleId::AsabahSon,
        members: &[Son, Daughter],
        applies: |c| c.has(Son),
    },
    ResiduaryRule {
        id: RuleId::AsabahSonsSon,
        members: &[SonsSon, SonsDaughter],
        applies: |c| c.has(SonsSon),
    },
    ResiduaryRule {
        id: RuleId::AsabahFather,
        members: &[Father],
        applies: |c| c.has(Father),
    },
    ResiduaryRule {
        id: RuleId::AsabahGrandfather,
        members: &[PaternalGrandfather],
        applies: |c| c.has(PaternalGrandfather),
    },
    ResiduaryRule {
        id: RuleId::AsabahFullBrother,
        members: &[FullBrother, FullSister],
        applies: |c| c.has(FullBrother),
    },
    ResiduaryRule {
        id: RuleId::AsabahFullSisterWithDaughters,
        members: &[FullSister],
        applies: |c| c.full_sister_with_daughters(),
    },
    ResiduaryRule {
        id: RuleId::AsabahPaternalBrother,
        members: &[PaternalHalfBrother, PaternalHalfSister],
        applies: |c| c.has(PaternalHalfBrother),
    },
    ResiduaryRule {
        id: RuleId::AsabahPaternalSisterWithDaughters,
        members: &[PaternalHalfSister],
        applies: |c| c.paternal_sister_with_daughters(),
    },
    ResiduaryRule {
        id: RuleId::AsabahFullNephew,
        members: &[FullBrothersSon],
        applies: |c| c.has(FullBrothersSon),
    },
    ResiduaryRule {
        id: RuleId::AsabahPaternalNephew,
        members: &[PaternalHalfBrothersSon],
        applies: |c| c.has(PaternalHalfBrothersSon),
    },
    ResiduaryRule {
        id: RuleId::AsabahFullUncle,
        members: &[FullPaternalUncle],
        applies: |c| c.has(FullPaternalUncle),
    },
    ResiduaryRule {
        id: RuleId::AsabahPaternalUncle,
        members: &[PaternalHalfUncle],
        applies: |c| c.has(PaternalHalfUncle),
    },
    ResiduaryRule {
        id: RuleId::AsabahFullCousin,
        members: &[FullPaternalUnclesSon],
        applies: |c| c.has(FullPaternalUnclesSon),
    },
    ResiduaryRule {
        id: RuleId::AsabahPaternalCousin,
        members: &[PaternalHalfUnclesSon],
        applies: |c| c.has(PaternalHalfUnclesSon),
    },
];

/// Residuary portion granted to one heir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResiduaryShare {
    pub heir_id: HeirId,
    pub fraction: Fraction,
}

/// Outcome of the residuary stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResiduaryAllocation {
    /// The class that took the residue, if any residuary heir exists
    pub rule: Option<RuleId>,
    /// `1 - Σ fixed`; negative when the fixed shares oversubscribe the estate
    pub residue: Fraction,
    pub shares: Vec<ResiduaryShare>,
}

impl ResiduaryAllocation {
    pub fn has_residuary_heir(&self) -> bool {
        self.rule.is_some()
    }

    /// A residuary class exists but nothing was left for it
    pub fn is_exhausted(&self) -> bool {
        self.rule.is_some() && !self.residue.is_positive()
    }

    /// Residue left over with no residuary heir to take it
    pub fn surplus(&self) -> Fraction {
        if self.rule.is_none() && self.residue.is_positive() {
            self.residue
        } else {
            Fraction::ZERO
        }
    }

    pub fn share_for(&self, heir_id: HeirId) -> Option<&ResiduaryShare> {
        self.shares.iter().find(|s| s.heir_id == heir_id)
    }
}

/// Distributes the residue using the standard class order
pub fn distribute(
    heirs: &[AnnotatedHeir],
    fixed_total: &Fraction,
) -> Result<ResiduaryAllocation, EngineError> {
    distribute_with(heirs, fixed_total, RESIDUARY_RULES)
}

/// Distributes the residue using an explicit class order
pub fn distribute_with(
    heirs: &[AnnotatedHeir],
    fixed_total: &Fraction,
    rules: &[ResiduaryRule],
) -> Result<ResiduaryAllocation, EngineError> {
    let residue = Fraction::ONE.checked_sub(fixed_total)?;
    let composition = Composition::from_annotated(heirs);

    let matched = rules.iter().find_map(|rule| {
        if !(rule.applies)(&composition) {
            return None;
        }
        let members: Vec<&AnnotatedHeir> = heirs
            .iter()
            .filter(|h| !h.is_excluded() && rule.members.contains(&h.relationship()))
            .collect();
        (!members.is_empty()).then_some((rule, members))
    });

    let Some((rule, members)) = matched else {
        return Ok(ResiduaryAllocation {
            rule: None,
            residue,
            shares: Vec::new(),
        });
    };

    let total_weight: i128 = members
        .iter()
        .map(|h| h.heir().gender.residuary_weight())
        .sum();
    let shares = members
        .iter()
        .map(|h| -> Result<ResiduaryShare, EngineError> {
            let fraction = if residue.is_positive() {
                residue
                    .checked_mul_int(h.heir().gender.residuary_weight())?
                    .checked_div_int(total_weight)?
            } else {
                Fraction::ZERO
            };
            Ok(ResiduaryShare {
                heir_id: h.id(),
                fraction,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResiduaryAllocation {
        rule: Some(rule.id),
        residue,
        shares,
    })
}
