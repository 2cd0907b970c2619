//! Heir value objects
//!
//! Heirs are a flat list keyed by a closed [`Relationship`] enum. Exclusion and
//! share logic are predicates over that list rather than behaviour attached to
//! each relationship.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{DeceasedId, HeirId};
use crate::error::EngineError;
use crate::rules::RuleId;

/// Biological gender as recorded on the heir form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Weight within a residuary class (a male takes twice a female)
    pub fn residuary_weight(&self) -> i128 {
        match self {
            Gender::Male => 2,
            Gender::Female => 1,
        }
    }

    pub fn opposite(&self) -> Gender {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Canonical relationship of an heir to the deceased
///
/// Declaration order is the canonical priority used to sort heirs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Husband,
    Wife,
    Father,
    Mother,
    PaternalGrandfather,
    PaternalGrandmother,
    MaternalGrandmother,
    Son,
    Daughter,
    SonsSon,
    SonsDaughter,
    FullBrother,
    FullSister,
    PaternalHalfBrother,
    PaternalHalfSister,
    MaternalHalfBrother,
    MaternalHalfSister,
    FullBrothersSon,
    PaternalHalfBrothersSon,
    FullPaternalUncle,
    PaternalHalfUncle,
    FullPaternalUnclesSon,
    PaternalHalfUnclesSon,
}

impl Relationship {
    pub const ALL: [Relationship; 23] = [
        Relationship::Husband,
        Relationship::Wife,
        Relationship::Father,
        Relationship::Mother,
        Relationship::PaternalGrandfather,
        Relationship::PaternalGrandmother,
        Relationship::MaternalGrandmother,
        Relationship::Son,
        Relationship::Daughter,
        Relationship::SonsSon,
        Relationship::SonsDaughter,
        Relationship::FullBrother,
        Relationship::FullSister,
        Relationship::PaternalHalfBrother,
        Relationship::PaternalHalfSister,
        Relationship::MaternalHalfBrother,
        Relationship::MaternalHalfSister,
        Relationship::FullBrothersSon,
        Relationship::PaternalHalfBrothersSon,
        Relationship::FullPaternalUncle,
        Relationship::PaternalHalfUncle,
        Relationship::FullPaternalUnclesSon,
        Relationship::PaternalHalfUnclesSon,
    ];

    /// Position in the canonical ordering (lower sorts first)
    pub fn priority(&self) -> usize {
        *self as usize
    }

    /// The gender implied by the relationship
    pub fn gender(&self) -> Gender {
        use Relationship::*;
        match self {
            Wife | Mother | PaternalGrandmother | MaternalGrandmother | Daughter
            | SonsDaughter | FullSister | PaternalHalfSister | MaternalHalfSister => {
                Gender::Female
            }
            _ => Gender::Male,
        }
    }

    /// Canonical snake_case tag
    pub fn tag(&self) -> &'static str {
        use Relationship::*;
        match self {
            Husband => "husband",
            Wife => "wife",
            Father => "father",
            Mother => "mother",
            PaternalGrandfather => "paternal_grandfather",
            PaternalGrandmother => "paternal_grandmother",
            MaternalGrandmother => "maternal_grandmother",
            Son => "son",
            Daughter => "daughter",
            SonsSon => "sons_son",
            SonsDaughter => "sons_daughter",
            FullBrother => "full_brother",
            FullSister => "full_sister",
            PaternalHalfBrother => "paternal_half_brother",
            PaternalHalfSister => "paternal_half_sister",
            MaternalHalfBrother => "maternal_half_brother",
            MaternalHalfSister => "maternal_half_sister",
            FullBrothersSon => "full_brothers_son",
            PaternalHalfBrothersSon => "paternal_half_brothers_son",
            FullPaternalUncle => "full_paternal_uncle",
            PaternalHalfUncle => "paternal_half_uncle",
            FullPaternalUnclesSon => "full_paternal_uncles_son",
            PaternalHalfUnclesSon => "paternal_half_uncles_son",
        }
    }

    pub fn is_spouse(&self) -> bool {
        matches!(self, Relationship::Husband | Relationship::Wife)
    }

    /// Descendant through a son, at any modelled depth
    pub fn is_descendant(&self) -> bool {
        use Relationship::*;
        matches!(self, Son | Daughter | SonsSon | SonsDaughter)
    }

    pub fn is_sibling(&self) -> bool {
        use Relationship::*;
        matches!(
            self,
            FullBrother
                | FullSister
                | PaternalHalfBrother
                | PaternalHalfSister
                | MaternalHalfBrother
                | MaternalHalfSister
        )
    }

    /// Resolves a caller-supplied tag into a canonical relationship
    ///
    /// Tags are matched case-insensitively; spaces, hyphens and apostrophes are
    /// normalised so that `"Son's Son"` and `"sons-son"` resolve alike. The
    /// gender-neutral tags `spouse` and `child` are resolved using `gender`.
    pub fn from_tag(tag: &str, gender: Gender) -> Result<Relationship, EngineError> {
        use Relationship::*;
        let normalized: String = tag
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| *c != '\'')
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        let relationship = match normalized.as_str() {
            "spouse" => match gender {
                Gender::Male => Husband,
                Gender::Female => Wife,
            },
            "child" => match gender {
                Gender::Male => Son,
                Gender::Female => Daughter,
            },
            "brother" => FullBrother,
            "sister" => FullSister,
            "grandfather" => PaternalGrandfather,
            "grandmother" => MaternalGrandmother,
            "grandson" => SonsSon,
            "granddaughter" => SonsDaughter,
            other => Relationship::ALL
                .iter()
                .copied()
                .find(|r| r.tag() == other)
                .ok_or_else(|| EngineError::UnrecognizedRelationship(tag.to_string()))?,
        };
        Ok(relationship)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

fn default_alive() -> bool {
    true
}

/// Raw heir input as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeirInput {
    pub id: HeirId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Relationship tag from the closed vocabulary
    pub relationship: String,
    pub gender: Gender,
    #[serde(default = "default_alive")]
    pub is_alive: bool,
}

impl HeirInput {
    pub fn new(id: HeirId, relationship: impl Into<String>, gender: Gender) -> Self {
        Self {
            id,
            name: None,
            relationship: relationship.into(),
            gender,
            is_alive: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn predeceased(mut self) -> Self {
        self.is_alive = false;
        self
    }
}

/// A validated heir with a canonical relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heir {
    pub id: HeirId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub relationship: Relationship,
    pub gender: Gender,
    pub is_alive: bool,
}

/// An heir annotated with the outcome of exclusion
///
/// Built once by the exclusion resolver; later stages only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedHeir {
    heir: Heir,
    excluded: bool,
    excluded_by: Option<RuleId>,
}

impl AnnotatedHeir {
    pub fn eligible(heir: Heir) -> Self {
        Self {
            heir,
            excluded: false,
            excluded_by: None,
        }
    }

    pub fn excluded(heir: Heir, rule: RuleId) -> Self {
        Self {
            heir,
            excluded: true,
            excluded_by: Some(rule),
        }
    }

    pub fn heir(&self) -> &Heir {
        &self.heir
    }

    pub fn id(&self) -> HeirId {
        self.heir.id
    }

    pub fn relationship(&self) -> Relationship {
        self.heir.relationship
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    pub fn excluded_by(&self) -> Option<RuleId> {
        self.excluded_by
    }
}

/// Details about the deceased used to validate the heir set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deceased {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DeceasedId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_death: Option<NaiveDate>,
}

impl Deceased {
    pub fn new(gender: Gender) -> Self {
        Self {
            gender: Some(gender),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: DeceasedId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_date_of_death(mut self, date: NaiveDate) -> Self {
        self.date_of_death = Some(date);
        self
    }
}
