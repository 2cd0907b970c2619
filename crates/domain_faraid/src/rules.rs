//! Rule catalogue
//!
//! Every legal rule the engine can apply has a stable identifier. Identifiers
//! appear in `CalculationResult::applied_rules` and in each assignment's basis
//! so a result can be audited rule by rule.
//!
//! # Canonical rule set
//!
//! The tables follow the majority Sunni position with two explicit choices:
//!
//! - the paternal grandfather excludes full and paternal siblings, as the father
//!   does (no muqasamah sharing);
//! - in the mushtarakah case full brothers remain residuary and may receive
//!   nothing once the fixed shares exhaust the estate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which pipeline stage a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleCategory {
    Estate,
    Exclusion,
    FixedShare,
    Residuary,
    Normalization,
}

/// Stable identifier of a legal rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleId {
    // Estate
    WasiyyahConsentOverride,

    // Hajb
    HajbPredeceased,
    HajbGrandfatherByFather,
    HajbPaternalGrandmotherByParent,
    HajbMaternalGrandmotherByMother,
    HajbSonsChildBySon,
    HajbSonsDaughterByDaughters,
    HajbFullSiblingByAgnate,
    HajbPaternalSiblingByAgnate,
    HajbPaternalSiblingBySisterWithDaughters,
    HajbPaternalSisterByFullSisters,
    HajbMaternalSiblingByDescendantOrAgnate,
    HajbFullNephew,
    HajbPaternalNephew,
    HajbFullUncle,
    HajbPaternalUncle,
    HajbFullCousin,
    HajbPaternalCousin,

    // Fara'id
    FardHusbandWithDescendant,
    FardHusband,
    FardWifeWithDescendant,
    FardWife,
    FardFatherWithSon,
    FardFatherWithDaughter,
    FardFatherResiduary,
    FardGrandfatherWithSon,
    FardGrandfatherWithDaughter,
    FardGrandfatherResiduary,
    FardMotherWithDescendant,
    FardMotherWithSiblings,
    FardMotherUmariyyatayn,
    FardMother,
    FardGrandmother,
    FardDaughterWithSon,
    FardDaughterSingle,
    FardDaughters,
    FardSonsDaughterWithSonsSon,
    FardSonsDaughterTakmilah,
    FardSonsDaughterSingle,
    FardSonsDaughters,
    FardFullSisterWithBrother,
    FardFullSisterWithDaughters,
    FardFullSisterSingle,
    FardFullSisters,
    FardPaternalSisterWithBrother,
    FardPaternalSisterWithDaughters,
    FardPaternalSisterTakmilah,
    FardPaternalSisterSingle,
    FardPaternalSisters,
    FardMaternalSiblingSingle,
    FardMaternalSiblings,

    // Asabah
    AsabahSon,
    AsabahSonsSon,
    AsabahFather,
    AsabahGrandfather,
    AsabahFullBrother,
    AsabahFullSisterWithDaughters,
    AsabahPaternalBrother,
    AsabahPaternalSisterWithDaughters,
    AsabahFullNephew,
    AsabahPaternalNephew,
    AsabahFullUncle,
    AsabahPaternalUncle,
    AsabahFullCousin,
    AsabahPaternalCousin,

    // Awl / Radd
    Awl,
    Radd,
    RaddToSpouse,
}

impl RuleId {
    /// The stage this rule belongs to
    pub fn category(&self) -> RuleCategory {
        let code = self.code();
        if code.starts_with("HAJB_") {
            RuleCategory::Exclusion
        } else if code.starts_with("FARD_") {
            RuleCategory::FixedShare
        } else if code.starts_with("ASABAH_") {
            RuleCategory::Residuary
        } else if matches!(self, RuleId::WasiyyahConsentOverride) {
            RuleCategory::Estate
        } else {
            RuleCategory::Normalization
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        use RuleId::*;
        match self {
            WasiyyahConsentOverride => "WASIYYAH_CONSENT_OVERRIDE",
            HajbPredeceased => "HAJB_PREDECEASED",
            HajbGrandfatherByFather => "HAJB_GRANDFATHER_BY_FATHER",
            HajbPaternalGrandmotherByParent => "HAJB_PATERNAL_GRANDMOTHER_BY_PARENT",
            HajbMaternalGrandmotherByMother => "HAJB_MATERNAL_GRANDMOTHER_BY_MOTHER",
            HajbSonsChildBySon => "HAJB_SONS_CHILD_BY_SON",
            HajbSonsDaughterByDaughters => "HAJB_SONS_DAUGHTER_BY_DAUGHTERS",
            HajbFullSiblingByAgnate => "HAJB_FULL_SIBLING_BY_AGNATE",
            HajbPaternalSiblingByAgnate => "HAJB_PATERNAL_SIBLING_BY_AGNATE",
            HajbPaternalSiblingBySisterWithDaughters => {
                "HAJB_PATERNAL_SIBLING_BY_SISTER_WITH_DAUGHTERS"
            }
            HajbPaternalSisterByFullSisters => "HAJB_PATERNAL_SISTER_BY_FULL_SISTERS",
            HajbMaternalSiblingByDescendantOrAgnate => {
                "HAJB_MATERNAL_SIBLING_BY_DESCENDANT_OR_AGNATE"
            }
            HajbFullNephew => "HAJB_FULL_NEPHEW",
            HajbPaternalNephew => "HAJB_PATERNAL_NEPHEW",
            HajbFullUncle => "HAJB_FULL_UNCLE",
            HajbPaternalUncle => "HAJB_PATERNAL_UNCLE",
            HajbFullCousin => "HAJB_FULL_COUSIN",
            HajbPaternalCousin => "HAJB_PATERNAL_COUSIN",
            FardHusbandWithDescendant => "FARD_HUSBAND_WITH_DESCENDANT",
            FardHusband => "FARD_HUSBAND",
            FardWifeWithDescendant => "FARD_WIFE_WITH_DESCENDANT",
            FardWife => "FARD_WIFE",
            FardFatherWithSon => "FARD_FATHER_WITH_SON",
            FardFatherWithDaughter => "FARD_FATHER_WITH_DAUGHTER",
            FardFatherResiduary => "FARD_FATHER_RESIDUARY",
            FardGrandfatherWithSon => "FARD_GRANDFATHER_WITH_SON",
            FardGrandfatherWithDaughter => "FARD_GRANDFATHER_WITH_DAUGHTER",
            FardGrandfatherResiduary => "FARD_GRANDFATHER_RESIDUARY",
            FardMotherWithDescendant => "FARD_MOTHER_WITH_DESCENDANT",
            FardMotherWithSiblings => "FARD_MOTHER_WITH_SIBLINGS",
            FardMotherUmariyyatayn => "FARD_MOTHER_UMARIYYATAYN",
            FardMother => "FARD_MOTHER",
            FardGrandmother => "FARD_GRANDMOTHER",
            FardDaughterWithSon => "FARD_DAUGHTER_WITH_SON",
            FardDaughterSingle => "FARD_DAUGHTER_SINGLE",
            FardDaughters => "FARD_DAUGHTERS",
            FardSonsDaughterWithSonsSon => "FARD_SONS_DAUGHTER_WITH_SONS_SON",
            FardSonsDaughterTakmilah => "FARD_SONS_DAUGHTER_TAKMILAH",
            FardSonsDaughterSingle => "FARD_SONS_DAUGHTER_SINGLE",
            FardSonsDaughters => "FARD_SONS_DAUGHTERS",
            FardFullSisterWithBrother => "FARD_FULL_SISTER_WITH_BROTHER",
            FardFullSisterWithDaughters => "FARD_FULL_SISTER_WITH_DAUGHTERS",
            FardFullSisterSingle => "FARD_FULL_SISTER_SINGLE",
            FardFullSisters => "FARD_FULL_SISTERS",
            FardPaternalSisterWithBrother => "FARD_PATERNAL_SISTER_WITH_BROTHER",
            FardPaternalSisterWithDaughters => "FARD_PATERNAL_SISTER_WITH_DAUGHTERS",
            FardPaternalSisterTakmilah => "FARD_PATERNAL_SISTER_TAKMILAH",
            FardPaternalSisterSingle => "FARD_PATERNAL_SISTER_SINGLE",
            FardPaternalSisters => "FARD_PATERNAL_SISTERS",
            FardMaternalSiblingSingle => "FARD_MATERNAL_SIBLING_SINGLE",
            FardMaternalSiblings => "FARD_MATERNAL_SIBLINGS",
            AsabahSon => "ASABAH_SON",
            AsabahSonsSon => "ASABAH_SONS_SON",
            AsabahFather => "ASABAH_FATHER",
            AsabahGrandfather => "ASABAH_GRANDFATHER",
            AsabahFullBrother => "ASABAH_FULL_BROTHER",
            AsabahFullSisterWithDaughters => "ASABAH_FULL_SISTER_WITH_DAUGHTERS",
            AsabahPaternalBrother => "ASABAH_PATERNAL_BROTHER",
            AsabahPaternalSisterWithDaughters => "ASABAH_PATERNAL_SISTER_WITH_DAUGHTERS",
            AsabahFullNephew => "ASABAH_FULL_NEPHEW",
            AsabahPaternalNephew => "ASABAH_PATERNAL_NEPHEW",
            AsabahFullUncle => "ASABAH_FULL_UNCLE",
            AsabahPaternalUncle => "ASABAH_PATERNAL_UNCLE",
            AsabahFullCousin => "ASABAH_FULL_COUSIN",
            AsabahPaternalCousin => "ASABAH_PATERNAL_COUSIN",
            Awl => "AWL",
            Radd => "RADD",
            RaddToSpouse => "RADD_TO_SPOUSE",
        }
    }

    /// Human-readable statement of the rule
    pub fn description(&self) -> &'static str {
        use RuleId::*;
        match self {
            WasiyyahConsentOverride => "Bequest above one third allowed by unanimous heir consent",
            HajbPredeceased => "An heir who died before the deceased does not inherit",
            HajbGrandfatherByFather => "The father excludes the paternal grandfather",
            HajbPaternalGrandmotherByParent => {
                "The father or the mother excludes the paternal grandmother"
            }
            HajbMaternalGrandmotherByMother => "The mother excludes the maternal grandmother",
            HajbSonsChildBySon => "A son excludes the son's children",
            HajbSonsDaughterByDaughters => {
                "Two or more daughters exclude the son's daughter unless a son's son makes her residuary"
            }
            HajbFullSiblingByAgnate => {
                "A son, son's son, father or paternal grandfather excludes full siblings"
            }
            HajbPaternalSiblingByAgnate => {
                "A son, son's son, father, paternal grandfather or full brother excludes paternal half siblings"
            }
            HajbPaternalSiblingBySisterWithDaughters => {
                "A full sister made residuary by daughters excludes paternal half siblings"
            }
            HajbPaternalSisterByFullSisters => {
                "Two or more full sisters exclude the paternal half sister unless a paternal half brother makes her residuary"
            }
            HajbMaternalSiblingByDescendantOrAgnate => {
                "Any descendant, the father or the paternal grandfather excludes maternal half siblings"
            }
            HajbFullNephew => "A closer agnate excludes the full brother's son",
            HajbPaternalNephew => "A closer agnate excludes the paternal half brother's son",
            HajbFullUncle => "A closer agnate excludes the full paternal uncle",
            HajbPaternalUncle => "A closer agnate excludes the paternal half uncle",
            HajbFullCousin => "A closer agnate excludes the full paternal uncle's son",
            HajbPaternalCousin => "A closer agnate excludes the paternal half uncle's son",
            FardHusbandWithDescendant => "Husband takes 1/4 when the deceased leaves a descendant",
            FardHusband => "Husband takes 1/2 when the deceased leaves no descendant",
            FardWifeWithDescendant => "Wives share 1/8 when the deceased leaves a descendant",
            FardWife => "Wives share 1/4 when the deceased leaves no descendant",
            FardFatherWithSon => "Father takes 1/6 beside a male descendant",
            FardFatherWithDaughter => {
                "Father takes 1/6 and the residue beside female descendants only"
            }
            FardFatherResiduary => "Father is residuary when there is no descendant",
            FardGrandfatherWithSon => "Paternal grandfather takes 1/6 beside a male descendant",
            FardGrandfatherWithDaughter => {
                "Paternal grandfather takes 1/6 and the residue beside female descendants only"
            }
            FardGrandfatherResiduary => "Paternal grandfather is residuary when there is no descendant",
            FardMotherWithDescendant => "Mother takes 1/6 when the deceased leaves a descendant",
            FardMotherWithSiblings => "Mother takes 1/6 when the deceased leaves two or more siblings",
            FardMotherUmariyyatayn => {
                "Mother takes 1/3 of what remains after the spouse when only a spouse and both parents inherit"
            }
            FardMother => "Mother takes 1/3",
            FardGrandmother => "Grandmothers share 1/6",
            FardDaughterWithSon => "Daughters are residuary with a son",
            FardDaughterSingle => "A single daughter takes 1/2",
            FardDaughters => "Two or more daughters share 2/3",
            FardSonsDaughterWithSonsSon => "Son's daughters are residuary with a son's son",
            FardSonsDaughterTakmilah => "Son's daughters share 1/6 beside a single daughter",
            FardSonsDaughterSingle => "A single son's daughter takes 1/2",
            FardSonsDaughters => "Two or more son's daughters share 2/3",
            FardFullSisterWithBrother => "Full sisters are residuary with a full brother",
            FardFullSisterWithDaughters => "Full sisters are residuary with female descendants",
            FardFullSisterSingle => "A single full sister takes 1/2",
            FardFullSisters => "Two or more full sisters share 2/3",
            FardPaternalSisterWithBrother => {
                "Paternal half sisters are residuary with a paternal half brother"
            }
            FardPaternalSisterWithDaughters => {
                "Paternal half sisters are residuary with female descendants"
            }
            FardPaternalSisterTakmilah => {
                "Paternal half sisters share 1/6 beside a single full sister"
            }
            FardPaternalSisterSingle => "A single paternal half sister takes 1/2",
            FardPaternalSisters => "Two or more paternal half sisters share 2/3",
            FardMaternalSiblingSingle => "A single maternal half sibling takes 1/6",
            FardMaternalSiblings => "Two or more maternal half siblings share 1/3 equally",
            AsabahSon => "Sons take the residue, daughters alongside at half a son's portion",
            AsabahSonsSon => {
                "Son's sons take the residue, son's daughters alongside at half a portion"
            }
            AsabahFather => "Father takes the residue",
            AsabahGrandfather => "Paternal grandfather takes the residue",
            AsabahFullBrother => {
                "Full brothers take the residue, full sisters alongside at half a portion"
            }
            AsabahFullSisterWithDaughters => "Full sisters take the residue beside daughters",
            AsabahPaternalBrother => {
                "Paternal half brothers take the residue, paternal half sisters alongside at half a portion"
            }
            AsabahPaternalSisterWithDaughters => {
                "Paternal half sisters take the residue beside daughters"
            }
            AsabahFullNephew => "Full brother's sons take the residue",
            AsabahPaternalNephew => "Paternal half brother's sons take the residue",
            AsabahFullUncle => "Full paternal uncles take the residue",
            AsabahPaternalUncle => "Paternal half uncles take the residue",
            AsabahFullCousin => "Full paternal uncle's sons take the residue",
            AsabahPaternalCousin => "Paternal half uncle's sons take the residue",
            Awl => "Fixed shares exceed the estate and are reduced proportionally",
            Radd => {
                "Surplus returns to blood-relative fixed-share heirs in proportion to their shares"
            }
            RaddToSpouse => "Surplus returns to the spouse when no blood relative inherits",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
