//! Composition of survivors
//!
//! A snapshot of how many eligible heirs of each relationship are present.
//! Every exclusion, fixed-share and residuary predicate is a function of this
//! snapshot.

use std::collections::BTreeMap;

use crate::heir::{AnnotatedHeir, Heir, Relationship};

/// Counts of heirs by relationship
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    eligible: BTreeMap<Relationship, usize>,
    living_siblings: usize,
}

impl Composition {
    /// Builds a composition from heirs paired with their eligibility
    pub fn from_eligibility<'a, I>(heirs: I) -> Self
    where
        I: IntoIterator<Item = (&'a Heir, bool)>,
    {
        let mut composition = Composition::default();
        for (heir, eligible) in heirs {
            if eligible {
                *composition.eligible.entry(heir.relationship).or_insert(0) += 1;
            }
            // Siblings reduce the mother's share even when excluded themselves.
            if heir.is_alive && heir.relationship.is_sibling() {
                composition.living_siblings += 1;
            }
        }
        composition
    }

    /// Builds a composition from annotated heirs
    pub fn from_annotated(heirs: &[AnnotatedHeir]) -> Self {
        Self::from_eligibility(heirs.iter().map(|h| (h.heir(), !h.is_excluded())))
    }

    /// Number of eligible heirs with this relationship
    pub fn count(&self, relationship: Relationship) -> usize {
        self.eligible.get(&relationship).copied().unwrap_or(0)
    }

    pub fn has(&self, relationship: Relationship) -> bool {
        self.count(relationship) > 0
    }

    pub fn has_any(&self, relationships: &[Relationship]) -> bool {
        relationships.iter().any(|r| self.has(*r))
    }

    pub fn total(&self) -> usize {
        self.eligible.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn has_descendant(&self) -> bool {
        self.eligible.keys().any(|r| r.is_descendant())
    }

    pub fn has_male_descendant(&self) -> bool {
        self.has_any(&[Relationship::Son, Relationship::SonsSon])
    }

    pub fn has_female_descendant(&self) -> bool {
        self.has_any(&[Relationship::Daughter, Relationship::SonsDaughter])
    }

    pub fn has_spouse(&self) -> bool {
        self.has_any(&[Relationship::Husband, Relationship::Wife])
    }

    /// Living siblings of any kind, whether or not they inherit
    pub fn living_siblings(&self) -> usize {
        self.living_siblings
    }

    /// Eligible maternal half siblings of either gender
    pub fn maternal_siblings(&self) -> usize {
        self.count(Relationship::MaternalHalfBrother) + self.count(Relationship::MaternalHalfSister)
    }

    /// A full sister who takes the residue beside female descendants
    pub fn full_sister_with_daughters(&self) -> bool {
        self.has(Relationship::FullSister) && self.has_female_descendant()
    }

    /// A paternal half sister who takes the residue beside female descendants
    pub fn paternal_sister_with_daughters(&self) -> bool {
        self.has(Relationship::PaternalHalfSister) && self.has_female_descendant()
    }
}
