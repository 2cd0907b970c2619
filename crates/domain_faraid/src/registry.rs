//! Heir registry
//!
//! Turns raw [`HeirInput`] records into a canonical, priority-sorted list of
//! [`Heir`]s, rejecting input that cannot describe a real family.

use std::collections::BTreeSet;

use crate::error::EngineError;
use crate::heir::{Deceased, Gender, Heir, HeirInput, Relationship};

/// Default upper bound on the number of heir records per calculation
pub const DEFAULT_MAX_HEIRS: usize = 64;

/// Maximum number of wives who can inherit together
pub const MAX_WIVES: usize = 4;

/// Relationships of which at most one record may exist
const SINGULAR: [Relationship; 6] = [
    Relationship::Husband,
    Relationship::Father,
    Relationship::Mother,
    Relationship::PaternalGrandfather,
    Relationship::PaternalGrandmother,
    Relationship::MaternalGrandmother,
];

/// Validates and normalises heir input
#[derive(Debug, Clone)]
pub struct HeirRegistry {
    max_heirs: usize,
}

impl Default for HeirRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEIRS)
    }
}

impl HeirRegistry {
    pub fn new(max_heirs: usize) -> Self {
        Self { max_heirs }
    }

    /// Builds the canonical heir list
    ///
    /// # Errors
    ///
    /// * `UnrecognizedRelationship` - a tag outside the closed vocabulary
    /// * `InvalidHeirSet` - duplicate ids, an heir referencing the deceased,
    ///   a relationship whose gender contradicts the record, or a family that
    ///   cannot exist (two fathers, a husband beside a wife, five wives, ...)
    pub fn register(
        &self,
        inputs: &[HeirInput],
        deceased: Option<&Deceased>,
    ) -> Result<Vec<Heir>, EngineError> {
        if inputs.len() > self.max_heirs {
            return Err(EngineError::invalid_heir_set(format!(
                "{} heirs supplied, at most {} are accepted",
                inputs.len(),
                self.max_heirs
            )));
        }

        let mut seen = BTreeSet::new();
        let mut heirs = Vec::with_capacity(inputs.len());
        for input in inputs {
            if !seen.insert(input.id) {
                return Err(EngineError::invalid_heir_set(format!(
                    "duplicate heir id {}",
                    input.id
                )));
            }
            if let Some(deceased_id) = deceased.and_then(|d| d.id) {
                if deceased_id.as_uuid() == input.id.as_uuid() {
                    return Err(EngineError::invalid_heir_set(format!(
                        "heir {} refers to the deceased",
                        input.id
                    )));
                }
            }
            heirs.push(canonicalize(input)?);
        }

        check_composition(&heirs, deceased)?;

        heirs.sort_by(|a, b| {
            a.relationship
                .priority()
                .cmp(&b.relationship.priority())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(heirs)
    }
}

fn canonicalize(input: &HeirInput) -> Result<Heir, EngineError> {
    let relationship = Relationship::from_tag(&input.relationship, input.gender)?;
    if relationship.gender() != input.gender {
        return Err(EngineError::invalid_heir_set(format!(
            "heir {} is recorded as {} but {} implies {}",
            input.id,
            input.gender,
            relationship,
            relationship.gender()
        )));
    }
    Ok(Heir {
        id: input.id,
        name: input.name.clone(),
        relationship,
        gender: input.gender,
        is_alive: input.is_alive,
    })
}

fn check_composition(heirs: &[Heir], deceased: Option<&Deceased>) -> Result<(), EngineError> {
    let count = |relationship: Relationship, alive_only: bool| {
        heirs
            .iter()
            .filter(|h| h.relationship == relationship && (h.is_alive || !alive_only))
            .count()
    };

    for relationship in SINGULAR {
        // A predeceased former husband may coexist with a living one.
        let alive_only = relationship == Relationship::Husband;
        if count(relationship, alive_only) > 1 {
            return Err(EngineError::invalid_heir_set(format!(
                "more than one {}",
                relationship
            )));
        }
    }

    if count(Relationship::Wife, true) > MAX_WIVES {
        return Err(EngineError::invalid_heir_set(format!(
            "more than {} living wives",
            MAX_WIVES
        )));
    }

    let has_husband = count(Relationship::Husband, false) > 0;
    let has_wife = count(Relationship::Wife, false) > 0;
    if has_husband && has_wife {
        return Err(EngineError::invalid_heir_set(
            "a husband and a wife cannot both be spouses of the deceased",
        ));
    }

    if let Some(gender) = deceased.and_then(|d| d.gender) {
        let same_gender_spouse = match gender {
            Gender::Male => has_husband,
            Gender::Female => has_wife,
        };
        if same_gender_spouse {
            return Err(EngineError::invalid_heir_set(format!(
                "spouse must be {} for a {} deceased",
                gender.opposite(),
                gender
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::HeirId;

    fn input(n: u128, tag: &str, gender: Gender) -> HeirInput {
        HeirInput::new(HeirId::from_u128(n), tag, gender)
    }

    #[test]
    fn test_sorted_by_priority_then_id() {
        let registry = HeirRegistry::default();
        let heirs = registry
            .register(
                &[
                    input(3, "son", Gender::Male),
                    input(2, "spouse", Gender::Female),
                    input(1, "son", Gender::Male),
                ],
                None,
            )
            .unwrap();
        let order: Vec<_> = heirs.iter().map(|h| (h.relationship, h.id)).collect();
        assert_eq!(
            order,
            vec![
                (Relationship::Wife, HeirId::from_u128(2)),
                (Relationship::Son, HeirId::from_u128(1)),
                (Relationship::Son, HeirId::from_u128(3)),
            ]
        );
    }

    #[test]
    fn test_two_fathers_rejected() {
        let registry = HeirRegistry::default();
        let err = registry
            .register(
                &[input(1, "father", Gender::Male), input(2, "father", Gender::Male)],
                None,
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidHeirSet(_)));
    }

    #[test]
    fn test_predeceased_former_husband_allowed() {
        let registry = HeirRegistry::default();
        let heirs = registry
            .register(
                &[
                    input(1, "husband", Gender::Male).predeceased(),
                    input(2, "husband", Gender::Male),
                ],
                None,
            )
            .unwrap();
        assert_eq!(heirs.len(), 2);
    }

    #[test]
    fn test_limit_enforced() {
        let registry = HeirRegistry::new(1);
        let err = registry
            .register(&[input(1, "son", Gender::Male), input(2, "son", Gender::Male)], None)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidHeirSet(_)));
    }
}
