//! Fixed-share (Fara'id) assigner
//!
//! Fixed shares are looked up from an ordered table keyed by share class and a
//! predicate over the composition of survivors. The first matching rule for a
//! class wins. A class share is divided equally among the class members.

use serde::{Deserialize, Serialize};

use core_kernel::{Fraction, HeirId};
use crate::composition::Composition;
use crate::error::EngineError;
use crate::heir::{AnnotatedHeir, Relationship};
use crate::rules::RuleId;

/// Heirs that share one Quranic fraction between them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShareClass {
    Husband,
    Wives,
    Father,
    Grandfather,
    Mother,
    Grandmothers,
    Daughters,
    SonsDaughters,
    FullSisters,
    PaternalSisters,
    MaternalSiblings,
}

impl ShareClass {
    /// Classes in evaluation order; spouses precede the mother
    pub const ALL: [ShareClass; 11] = [
        ShareClass::Husband,
        ShareClass::Wives,
        ShareClass::Father,
        ShareClass::Grandfather,
        ShareClass::Mother,
        ShareClass::Grandmothers,
        ShareClass::Daughters,
        ShareClass::SonsDaughters,
        ShareClass::FullSisters,
        ShareClass::PaternalSisters,
        ShareClass::MaternalSiblings,
    ];

    /// The class a relationship belongs to, if it can hold a fixed share
    pub fn of(relationship: Relationship) -> Option<ShareClass> {
        use Relationship::*;
        match relationship {
            Husband => Some(ShareClass::Husband),
            Wife => Some(ShareClass::Wives),
            Father => Some(ShareClass::Father),
            PaternalGrandfather => Some(ShareClass::Grandfather),
            Mother => Some(ShareClass::Mother),
            PaternalGrandmother | MaternalGrandmother => Some(ShareClass::Grandmothers),
            Daughter => Some(ShareClass::Daughters),
            SonsDaughter => Some(ShareClass::SonsDaughters),
            FullSister => Some(ShareClass::FullSisters),
            PaternalHalfSister => Some(ShareClass::PaternalSisters),
            MaternalHalfBrother | MaternalHalfSister => Some(ShareClass::MaternalSiblings),
            _ => None,
        }
    }

    pub fn is_spouse(&self) -> bool {
        matches!(self, ShareClass::Husband | ShareClass::Wives)
    }
}

/// What a matching rule gives its class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// A fixed fraction of the estate
    Fixed(Fraction),
    /// A fixed fraction plus a place in the residuary distribution
    FixedWithResidue(Fraction),
    /// One third of what remains after the spouse's share
    ThirdOfRemainderAfterSpouse,
    /// No fixed share; the class inherits as residuary
    Residuary,
}

/// A single fixed-share rule
#[derive(Debug, Clone, Copy)]
pub struct FixedShareRule {
    pub id: RuleId,
    pub class: ShareClass,
    pub applies: fn(&Composition) -> bool,
    pub outcome: ShareOutcome,
}

use Relationship::*;
use ShareOutcome::*;

const SIXTH: Fraction = Fraction::of(1, 6);
const QUARTER: Fraction = Fraction::of(1, 4);
const EIGHTH: Fraction = Fraction::of(1, 8);
const THIRD: Fraction = Fraction::of(1, 3);
const HALF: Fraction = Fraction::of(1, 2);
const TWO_THIRDS: Fraction = Fraction::of(2, 3);

/// The fixed-share table, in precedence order
pub const FIXED_SHARE_RULES: &[FixedShareRule] = &[
    // Spouses
    FixedShareRule {
        id: RuleId::FardHusbandWithDescendant,
        class: ShareClass::Husband,
        applies: |c| c.has_descendant(),
        outcome: Fixed(QUARTER),
    },
    FixedShareRule {
        id: RuleId::FardHusband,
        class: ShareClass::Husband,
        applies: |_| true,
        outcome: Fixed(HALF),
    },
    FixedShareRule {
        id: RuleId::FardWifeWithDescendant,
        class: ShareClass::Wives,
        applies: |c| c.has_descendant(),
        outcome: Fixed(EIGHTH),
    },
    FixedShareRule {
        id: RuleId::FardWife,
        class: ShareClass::Wives,
        applies: |_| true,
        outcome: Fixed(QUARTER),
    },
    // Father and grandfather
    FixedShareRule {
        id: RuleId::FardFatherWithSon,
        class: ShareClass::Father,
        applies: |c| c.has_male_descendant(),
        outcome: Fixed(SIXTH),
    },
    FixedShareRule {
        id: RuleId::FardFatherWithDaughter,
        class: ShareClass::Father,
        applies: |c| c.has_female_descendant(),
        outcome: FixedWithResidue(SIXTH),
    },
    FixedShareRule {
        id: RuleId::FardFatherResiduary,
        class: ShareClass::Father,
        applies: |_| true,
        outcome: Residuary,
    },
    FixedShareRule {
        id: RuleId::FardGrandfatherWithSon,
        class: ShareClass::Grandfather,
        applies: |c| c.has_male_descendant(),
        outcome: Fixed(SIXTH),
    },
    FixedShareRule {
        id: RuleId::FardGrandfatherWithDaughter,
        class: ShareClass::Grandfather,
        applies: |c| c.has_female_descendant(),
        outcome: FixedWithResidue(SIXTH),
    },
    FixedShareRule {
        id: RuleId::FardGrandfatherResiduary,
        class: ShareClass::Grandfather,
        applies: |_| true,
        outcome: Residuary,
    },
    // Mother and grandmothers
    FixedShareRule {
        id: RuleId::FardMotherWithDescendant,
        class: ShareClass::Mother,
        applies: |c| c.has_descendant(),
        outcome: Fixed(SIXTH),
    },
    FixedShareRule {
        id: RuleId::FardMotherWithSiblings,
        class: ShareClass::Mother,
        applies: |c| c.living_siblings() >= 2,
        outcome: Fixed(SIXTH),
    },
    FixedShareRule {
        id: RuleId::FardMotherUmariyyatayn,
        class: ShareClass::Mother,
        applies: |c| c.has(Father) && c.has_spouse(),
        outcome: ThirdOfRemainderAfterSpouse,
    },
    FixedShareRule {
        id: RuleId::FardMother,
        class: ShareClass::Mother,
        applies: |_| true,
        outcome: Fixed(THIRD),
    },
    FixedShareRule {
        id: RuleId::FardGrandmother,
        class: ShareClass::Grandmothers,
        applies: |_| true,
        outcome: Fixed(SIXTH),
    },
    // Daughters
    FixedShareRule {
        id: RuleId::FardDaughterWithSon,
        class: ShareClass::Daughters,
        applies: |c| c.has(Son),
        outcome: Residuary,
    },
    FixedShareRule {
        id: RuleId::FardDaughterSingle,
        class: ShareClass::Daughters,
        applies: |c| c.count(Daughter) == 1,
        outcome: Fixed(HALF),
    },
    FixedShareRule {
        id: RuleId::FardDaughters,
        class: ShareClass::Daughters,
        applies: |_| true,
        outcome: Fixed(TWO_THIRDS),
    },
    // Son's daughters
    FixedShareRule {
        id: RuleId::FardSonsDaughterWithSonsSon,
        class: ShareClass::SonsDaughters,
        applies: |c| c.has(SonsSon),
        outcome: Residuary,
    },
    FixedShareRule {
        id: RuleId::FardSonsDaughterTakmilah,
        class: ShareClass::SonsDaughters,
        applies: |c| c.count(Daughter) == 1,
        outcome: Fixed(SIXTH),
    },
    FixedShareRule {
        id: RuleId::FardSonsDaughterSingle,
        class: ShareClass::SonsDaughters,
        applies: |c| c.count(SonsDaughter) == 1,
        outcome: Fixed(HALF),
    },
    FixedShareRule {
        id: RuleId::FardSonsDaughters,
        class: ShareClass::SonsDaughters,
        applies: |_| true,
        outcome: Fixed(TWO_THIRDS),
    },
    // Full sisters
    FixedShareRule {
        id: RuleId::FardFullSisterWithBrother,
        class: ShareClass::FullSisters,
        applies: |c| c.has(FullBrother),
        outcome: Residuary,
    },
    FixedShareRule {
        id: RuleId::FardFullSisterWithDaughters,
        class: ShareClass::FullSisters,
        applies: |c| c.has_female_descendant(),
        outcome: Residuary,
    },
    FixedShareRule {
        id: RuleId::FardFullSisterSingle,
        class: ShareClass::FullSisters,
        applies: |c| c.count(FullSister) == 1,
        outcome: Fixed(HALF),
    },
    FixedShareRule {
        id: RuleId::FardFullSisters,
        class: ShareClass::FullSisters,
        applies: |_| true,
        outcome: Fixed(TWO_THIRDS),
    },
    // Paternal half sisters
    FixedShareRule {
        id: RuleId::FardPaternalSisterWithBrother,
        class: ShareClass::PaternalSisters,
        applies: |c| c.has(PaternalHalfBrother),
        outcome: Residuary,
    },
    FixedShareRule {
        id: RuleId::FardPaternalSisterWithDaughters,
        class: ShareClass::PaternalSisters,
        applies: |c| c.has_female_descendant(),
        outcome: Residuary,
    },
    FixedShareRule {
        id: RuleId::FardPaternalSisterTakmilah,
        class: ShareClass::PaternalSisters,
        applies: |c| c.count(FullSister) == 1,
        outcome: Fixed(SIXTH),
    },
    FixedShareRule {
        id: RuleId::FardPaternalSisterSingle,
        class: ShareClass::PaternalSisters,
        applies: |c| c.count(PaternalHalfSister) == 1,
        outcome: Fixed(HALF),
    },
    FixedShareRule {
        id: RuleId::FardPaternalSisters,
        class: ShareClass::PaternalSisters,
        applies: |_| true,
        outcome: Fixed(TWO_THIRDS),
    },
    // Maternal half siblings
    FixedShareRule {
        id: RuleId::FardMaternalSiblingSingle,
        class: ShareClass::MaternalSiblings,
        applies: |c| c.maternal_siblings() == 1,
        outcome: Fixed(SIXTH),
    },
    FixedShareRule {
        id: RuleId::FardMaternalSiblings,
        class: ShareClass::MaternalSiblings,
        applies: |_| true,
        outcome: Fixed(THIRD),
    },
];

/// Looks up the first rule for `class` that applies to `composition`
pub fn match_rule<'a>(
    rules: &'a [FixedShareRule],
    class: ShareClass,
    composition: &Composition,
) -> Option<&'a FixedShareRule> {
    rules
        .iter()
        .find(|rule| rule.class == class && (rule.applies)(composition))
}

/// The fixed share granted to one heir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedShare {
    pub heir_id: HeirId,
    pub class: ShareClass,
    pub rule: RuleId,
    /// Zero when the rule makes the heir residuary only
    pub fraction: Fraction,
    /// Whether the heir also takes part in the residuary distribution
    pub residuary: bool,
}

impl FixedShare {
    pub fn is_spouse(&self) -> bool {
        self.class.is_spouse()
    }
}

/// All fixed shares of a calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedShareAllocation {
    /// One entry per eligible heir in a share class, in canonical heir order
    pub shares: Vec<FixedShare>,
    /// Sum of all fixed fractions
    pub total: Fraction,
    /// Rules that matched, in class order
    pub applied_rules: Vec<RuleId>,
}

impl FixedShareAllocation {
    pub fn share_for(&self, heir_id: HeirId) -> Option<&FixedShare> {
        self.shares.iter().find(|s| s.heir_id == heir_id)
    }
}

/// Assigns fixed shares using the standard table
pub fn assign(heirs: &[AnnotatedHeir]) -> Result<FixedShareAllocation, EngineError> {
    assign_with(heirs, FIXED_SHARE_RULES)
}

/// Assigns fixed shares using an explicit rule table
pub fn assign_with(
    heirs: &[AnnotatedHeir],
    rules: &[FixedShareRule],
) -> Result<FixedShareAllocation, EngineError> {
    let composition = Composition::from_annotated(heirs);
    let mut class_shares: Vec<(ShareClass, &FixedShareRule, Fraction, bool)> = Vec::new();
    let mut spouse_share = Fraction::ZERO;

    for class in ShareClass::ALL {
        let members = heirs
            .iter()
            .filter(|h| !h.is_excluded() && ShareClass::of(h.relationship()) == Some(class))
            .count();
        if members == 0 {
            continue;
        }
        let Some(rule) = match_rule(rules, class, &composition) else {
            continue;
        };
        let (total, residuary) = match rule.outcome {
            Fixed(f) => (f, false),
            FixedWithResidue(f) => (f, true),
            ThirdOfRemainderAfterSpouse => {
                (Fraction::ONE.checked_sub(&spouse_share)?.checked_mul(&THIRD)?, false)
            }
            Residuary => (Fraction::ZERO, true),
        };
        if class.is_spouse() {
            spouse_share = spouse_share.checked_add(&total)?;
        }
        let per_member = total.checked_div_int(members as i128)?;
        class_shares.push((class, rule, per_member, residuary));
    }

    let shares: Vec<FixedShare> = heirs
        .iter()
        .filter(|h| !h.is_excluded())
        .filter_map(|h| {
            let class = ShareClass::of(h.relationship())?;
            class_shares
                .iter()
                .find(|(c, ..)| *c == class)
                .map(|(_, rule, fraction, residuary)| FixedShare {
                    heir_id: h.id(),
                    class,
                    rule: rule.id,
                    fraction: *fraction,
                    residuary: *residuary,
                })
        })
        .collect();

    let total = Fraction::checked_sum(shares.iter().map(|s| &s.fraction))?;
    let applied_rules = class_shares.iter().map(|(_, rule, ..)| rule.id).collect();

    Ok(FixedShareAllocation {
        shares,
        total,
        applied_rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heir::Heir;

    fn annotated(n: u128, relationship: Relationship) -> AnnotatedHeir {
        AnnotatedHeir::eligible(Heir {
            id: HeirId::from_u128(n),
            name: None,
            relationship,
            gender: relationship.gender(),
            is_alive: true,
        })
    }

    fn fraction_of(allocation: &FixedShareAllocation, n: u128) -> Fraction {
        allocation.share_for(HeirId::from_u128(n)).unwrap().fraction
    }

    #[test]
    fn test_every_class_has_a_fallback_rule() {
        let empty = Composition::default();
        for class in ShareClass::ALL {
            assert!(
                FIXED_SHARE_RULES
                    .iter()
                    .any(|r| r.class == class && (r.applies)(&empty)),
                "{:?} has no unconditional rule",
                class
            );
        }
    }

    #[test]
    fn test_wives_share_an_eighth_beside_children() {
        let allocation = assign(&[
            annotated(1, Wife),
            annotated(2, Wife),
            annotated(3, Son),
        ])
        .unwrap();
        assert_eq!(fraction_of(&allocation, 1), Fraction::of(1, 16));
        assert_eq!(fraction_of(&allocation, 2), Fraction::of(1, 16));
        assert_eq!(allocation.total, Fraction::of(1, 8));
        assert!(allocation.share_for(HeirId::from_u128(3)).is_none());
    }

    #[test]
    fn test_umariyyatayn_with_husband() {
        let allocation = assign(&[
            annotated(1, Husband),
            annotated(2, Father),
            annotated(3, Mother),
        ])
        .unwrap();
        assert_eq!(fraction_of(&allocation, 1), Fraction::of(1, 2));
        assert_eq!(fraction_of(&allocation, 3), Fraction::of(1, 6));
        assert_eq!(
            allocation.share_for(HeirId::from_u128(3)).unwrap().rule,
            RuleId::FardMotherUmariyyatayn
        );
        let father = allocation.share_for(HeirId::from_u128(2)).unwrap();
        assert!(father.residuary);
        assert!(father.fraction.is_zero());
    }

    #[test]
    fn test_umariyyatayn_with_wife() {
        let allocation = assign(&[
            annotated(1, Wife),
            annotated(2, Father),
            annotated(3, Mother),
        ])
        .unwrap();
        assert_eq!(fraction_of(&allocation, 3), Fraction::of(1, 4));
    }

    #[test]
    fn test_sons_daughter_takmilah() {
        let allocation = assign(&[annotated(1, Daughter), annotated(2, SonsDaughter)]).unwrap();
        assert_eq!(fraction_of(&allocation, 1), Fraction::of(1, 2));
        assert_eq!(fraction_of(&allocation, 2), Fraction::of(1, 6));
    }

    #[test]
    fn test_maternal_siblings_share_equally_regardless_of_gender() {
        let allocation = assign(&[
            annotated(1, MaternalHalfBrother),
            annotated(2, MaternalHalfSister),
        ])
        .unwrap();
        assert_eq!(fraction_of(&allocation, 1), Fraction::of(1, 6));
        assert_eq!(fraction_of(&allocation, 2), Fraction::of(1, 6));
    }

    #[test]
    fn test_father_with_daughter_takes_sixth_and_residue() {
        let allocation = assign(&[annotated(1, Father), annotated(2, Daughter)]).unwrap();
        let father = allocation.share_for(HeirId::from_u128(1)).unwrap();
        assert_eq!(father.fraction, Fraction::of(1, 6));
        assert!(father.residuary);
        assert_eq!(father.rule, RuleId::FardFatherWithDaughter);
    }
}
