//! Exclusion (Hajb) resolver
//!
//! Exclusion is expressed as an ordered table of `{targets, predicate}` rules.
//! An heir is excluded by the first rule that names its relationship and whose
//! predicate holds for the current set of eligible heirs. Because excluding one
//! heir can change whether another is excluded, the resolver recomputes the
//! whole set until it stops changing.
//!
//! Every predicate only looks at relationships of higher priority than its
//! targets, so the iteration settles after at most one pass per priority
//! level.

use crate::composition::Composition;
use crate::heir::{AnnotatedHeir, Heir, Relationship};
use crate::rules::RuleId;

use Relationship::*;

/// A single exclusion rule
#[derive(Debug, Clone, Copy)]
pub struct ExclusionRule {
    pub id: RuleId,
    pub targets: &'static [Relationship],
    pub applies: fn(&Composition) -> bool,
}

impl ExclusionRule {
    /// Whether this rule excludes an heir of `relationship` in `composition`
    pub fn excludes(&self, relationship: Relationship, composition: &Composition) -> bool {
        self.targets.contains(&relationship) && (self.applies)(composition)
    }
}

fn agnatic_line_blocks_siblings(c: &Composition) -> bool {
    c.has_male_descendant() || c.has_any(&[Father, PaternalGrandfather])
}

fn blocks_full_nephew(c: &Composition) -> bool {
    agnatic_line_blocks_siblings(c)
        || c.has_any(&[FullBrother, PaternalHalfBrother])
        || c.full_sister_with_daughters()
        || c.paternal_sister_with_daughters()
}

fn blocks_paternal_nephew(c: &Composition) -> bool {
    blocks_full_nephew(c) || c.has(FullBrothersSon)
}

fn blocks_full_uncle(c: &Composition) -> bool {
    blocks_paternal_nephew(c) || c.has(PaternalHalfBrothersSon)
}

fn blocks_paternal_uncle(c: &Composition) -> bool {
    blocks_full_uncle(c) || c.has(FullPaternalUncle)
}

fn blocks_full_cousin(c: &Composition) -> bool {
    blocks_paternal_uncle(c) || c.has(PaternalHalfUncle)
}

fn blocks_paternal_cousin(c: &Composition) -> bool {
    blocks_full_cousin(c) || c.has(FullPaternalUnclesSon)
}

/// The exclusion table, in precedence order
pub const EXCLUSION_RULES: &[ExclusionRule] = &[
    ExclusionRule {
        id: RuleId::HajbGrandfatherByFather,
        targets: &[PaternalGrandfather],
        applies: |c| c.has(Father),
    },
    ExclusionRule {
        id: RuleId::HajbPaternalGrandmotherByParent,
        targets: &[PaternalGrandmother],
        applies: |c| c.has_any(&[Father, Mother]),
    },
    ExclusionRule {
        id: RuleId::HajbMaternalGrandmotherByMother,
        targets: &[MaternalGrandmother],
        applies: |c| c.has(Mother),
    },
    ExclusionRule {
        id: RuleId::HajbSonsChildBySon,
        targets: &[SonsSon, SonsDaughter],
        applies: |c| c.has(Son),
    },
    ExclusionRule {
        id: RuleId::HajbSonsDaughterByDaughters,
        targets: &[SonsDaughter],
        applies: |c| c.count(Daughter) >= 2 && !c.has(SonsSon),
    },
    ExclusionRule {
        id: RuleId::HajbFullSiblingByAgnate,
        targets: &[FullBrother, FullSister],
        applies: agnatic_line_blocks_siblings,
    },
    ExclusionRule {
        id: RuleId::HajbPaternalSiblingByAgnate,
        targets: &[PaternalHalfBrother, PaternalHalfSister],
        applies: |c| agnatic_line_blocks_siblings(c) || c.has(FullBrother),
    },
    ExclusionRule {
        id: RuleId::HajbPaternalSiblingBySisterWithDaughters,
        targets: &[PaternalHalfBrother, PaternalHalfSister],
        applies: |c| c.full_sister_with_daughters(),
    },
    ExclusionRule {
        id: RuleId::HajbPaternalSisterByFullSisters,
        targets: &[PaternalHalfSister],
        applies: |c| c.count(FullSister) >= 2 && !c.has(PaternalHalfBrother),
    },
    ExclusionRule {
        id: RuleId::HajbMaternalSiblingByDescendantOrAgnate,
        targets: &[MaternalHalfBrother, MaternalHalfSister],
        applies: |c| c.has_descendant() || c.has_any(&[Father, PaternalGrandfather]),
    },
    ExclusionRule {
        id: RuleId::HajbFullNephew,
        targets: &[FullBrothersSon],
        applies: blocks_full_nephew,
    },
    ExclusionRule {
        id: RuleId::HajbPaternalNephew,
        targets: &[PaternalHalfBrothersSon],
        applies: blocks_paternal_nephew,
    },
    ExclusionRule {
        id: RuleId::HajbFullUncle,
        targets: &[FullPaternalUncle],
        applies: blocks_full_uncle,
    },
    ExclusionRule {
        id: RuleId::HajbPaternalUncle,
        targets: &[PaternalHalfUncle],
        applies: blocks_paternal_uncle,
    },
    ExclusionRule {
        id: RuleId::HajbFullCousin,
        targets: &[FullPaternalUnclesSon],
        applies: blocks_full_cousin,
    },
    ExclusionRule {
        id: RuleId::HajbPaternalCousin,
        targets: &[PaternalHalfUnclesSon],
        applies: blocks_paternal_cousin,
    },
];

/// Outcome of exclusion resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionOutcome {
    pub heirs: Vec<AnnotatedHeir>,
    /// Rules that excluded at least one heir, in table order
    pub applied_rules: Vec<RuleId>,
    /// Number of passes needed to reach the fixed point
    pub passes: usize,
}

/// Resolves exclusions with the standard table
pub fn resolve(heirs: &[Heir]) -> ExclusionOutcome {
    resolve_with(heirs, EXCLUSION_RULES)
}

/// Resolves exclusions with an explicit rule table
pub fn resolve_with(heirs: &[Heir], rules: &[ExclusionRule]) -> ExclusionOutcome {
    let initial: Vec<Option<RuleId>> = heirs
        .iter()
        .map(|h| (!h.is_alive).then_some(RuleId::HajbPredeceased))
        .collect();

    let mut state = initial.clone();
    let mut passes = 0;
    // Each pass settles at least one more priority level.
    let max_passes = heirs.len() + 1;
    while passes < max_passes {
        passes += 1;
        let composition =
            Composition::from_eligibility(heirs.iter().zip(&state).map(|(h, s)| (h, s.is_none())));
        let next: Vec<Option<RuleId>> = heirs
            .iter()
            .zip(&initial)
            .map(|(heir, fixed)| {
                fixed.or_else(|| {
                    rules
                        .iter()
                        .find(|rule| rule.excludes(heir.relationship, &composition))
                        .map(|rule| rule.id)
                })
            })
            .collect();
        if next == state {
            break;
        }
        state = next;
    }

    let annotated: Vec<AnnotatedHeir> = heirs
        .iter()
        .zip(&state)
        .map(|(heir, excluded_by)| match excluded_by {
            Some(rule) => AnnotatedHeir::excluded(heir.clone(), *rule),
            None => AnnotatedHeir::eligible(heir.clone()),
        })
        .collect();

    let mut applied_rules = Vec::new();
    if state.contains(&Some(RuleId::HajbPredeceased)) {
        applied_rules.push(RuleId::HajbPredeceased);
    }
    applied_rules.extend(
        rules
            .iter()
            .map(|rule| rule.id)
            .filter(|id| state.contains(&Some(*id))),
    );

    ExclusionOutcome {
        heirs: annotated,
        applied_rules,
        passes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::HeirId;

    fn heir(n: u128, relationship: Relationship) -> Heir {
        Heir {
            id: HeirId::from_u128(n),
            name: None,
            relationship,
            gender: relationship.gender(),
            is_alive: true,
        }
    }

    fn excluded_by(outcome: &ExclusionOutcome, n: u128) -> Option<RuleId> {
        outcome
            .heirs
            .iter()
            .find(|h| h.id() == HeirId::from_u128(n))
            .and_then(|h| h.excluded_by())
    }

    #[test]
    fn test_son_excludes_grandson_and_brother() {
        let outcome = resolve(&[
            heir(1, Son),
            heir(2, SonsSon),
            heir(3, FullBrother),
        ]);
        assert_eq!(excluded_by(&outcome, 1), None);
        assert_eq!(excluded_by(&outcome, 2), Some(RuleId::HajbSonsChildBySon));
        assert_eq!(excluded_by(&outcome, 3), Some(RuleId::HajbFullSiblingByAgnate));
    }

    #[test]
    fn test_predeceased_son_does_not_exclude() {
        let mut son = heir(1, Son);
        son.is_alive = false;
        let outcome = resolve(&[son, heir(2, SonsSon)]);
        assert_eq!(excluded_by(&outcome, 1), Some(RuleId::HajbPredeceased));
        assert_eq!(excluded_by(&outcome, 2), None);
        assert_eq!(outcome.applied_rules, vec![RuleId::HajbPredeceased]);
    }

    #[test]
    fn test_chain_reaches_fixed_point() {
        // Father excludes the full brother; the full brother's son is then
        // excluded by the father as well, and the uncle by both.
        let outcome = resolve(&[
            heir(1, Father),
            heir(2, FullBrother),
            heir(3, FullBrothersSon),
            heir(4, FullPaternalUncle),
        ]);
        assert_eq!(excluded_by(&outcome, 2), Some(RuleId::HajbFullSiblingByAgnate));
        assert_eq!(excluded_by(&outcome, 3), Some(RuleId::HajbFullNephew));
        assert_eq!(excluded_by(&outcome, 4), Some(RuleId::HajbFullUncle));
    }

    #[test]
    fn test_excluded_heir_stops_excluding() {
        // The full sister is excluded by the son's son, so she cannot make the
        // paternal half brother's exclusion by sister-with-daughters hold.
        let outcome = resolve(&[
            heir(1, Daughter),
            heir(2, SonsSon),
            heir(3, FullSister),
            heir(4, PaternalHalfBrother),
        ]);
        assert_eq!(excluded_by(&outcome, 3), Some(RuleId::HajbFullSiblingByAgnate));
        assert_eq!(excluded_by(&outcome, 4), Some(RuleId::HajbPaternalSiblingByAgnate));
    }

    #[test]
    fn test_sons_daughter_kept_by_sons_son() {
        let outcome = resolve(&[
            heir(1, Daughter),
            heir(2, Daughter),
            heir(3, SonsDaughter),
            heir(4, SonsSon),
        ]);
        assert_eq!(excluded_by(&outcome, 3), None);

        let outcome = resolve(&[heir(1, Daughter), heir(2, Daughter), heir(3, SonsDaughter)]);
        assert_eq!(excluded_by(&outcome, 3), Some(RuleId::HajbSonsDaughterByDaughters));
    }

    #[test]
    fn test_every_rule_targets_a_lower_priority() {
        // Stratification check: a rule never targets the highest-priority heirs.
        for rule in EXCLUSION_RULES {
            for target in rule.targets {
                assert!(target.priority() > Mother.priority());
            }
        }
    }
}
