//! Calculation result types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Fraction, HeirId, Money};
use domain_estate::{EstateSnapshot, NetEstate};
use crate::engine::CalculationStage;
use crate::heir::{AnnotatedHeir, Deceased, Relationship};
use crate::normalization::Normalization;
use crate::rules::RuleId;

/// How an heir inherits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShareKind {
    Fixed,
    Residuary,
    None,
}

/// The share assigned to one heir
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareAssignment {
    pub heir_id: HeirId,
    pub relationship: Relationship,
    pub kind: ShareKind,
    /// Final share of the net estate
    pub fraction: Fraction,
    /// Fixed share before normalization
    pub fixed_portion: Fraction,
    /// Residuary share before normalization
    pub residuary_portion: Fraction,
    pub amount: Money,
    /// `fraction` as a percentage, four decimal places
    pub percentage: Decimal,
    /// Rules that produced this share, in pipeline order
    pub basis: Vec<RuleId>,
}

impl ShareAssignment {
    pub fn is_excluded(&self) -> bool {
        self.kind == ShareKind::None
    }
}

/// Non-fatal conditions reported alongside a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Warning {
    /// Every heir is excluded or predeceased; nothing was distributed
    NoEligibleHeir { undistributed: Money },
    /// The fixed shares left nothing for the residuary heirs
    ResidueExhausted { rule: RuleId },
    /// The bequest exceeds one third and relies on the heirs' consent
    WasiyyahConsentOverride { wasiyyah: Money, limit: Money },
    /// The surplus went back to the spouse for lack of blood relatives
    RaddToSpouse,
}

/// Outcome of a successful calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    estate: EstateSnapshot,
    net_estate: NetEstate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deceased: Option<Deceased>,
    heirs: Vec<AnnotatedHeir>,
    assignments: Vec<ShareAssignment>,
    applied_rules: Vec<RuleId>,
    normalization: Normalization,
    warnings: Vec<Warning>,
    rounding_remainder: Money,
    remainder_recipient: Option<HeirId>,
    stage: CalculationStage,
}

impl CalculationResult {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        estate: EstateSnapshot,
        net_estate: NetEstate,
        deceased: Option<Deceased>,
        heirs: Vec<AnnotatedHeir>,
        assignments: Vec<ShareAssignment>,
        applied_rules: Vec<RuleId>,
        normalization: Normalization,
        warnings: Vec<Warning>,
        rounding_remainder: Money,
        remainder_recipient: Option<HeirId>,
        stage: CalculationStage,
    ) -> Self {
        Self {
            estate,
            net_estate,
            deceased,
            heirs,
            assignments,
            applied_rules,
            normalization,
            warnings,
            rounding_remainder,
            remainder_recipient,
            stage,
        }
    }

    pub fn estate(&self) -> &EstateSnapshot {
        &self.estate
    }

    pub fn net_estate(&self) -> &NetEstate {
        &self.net_estate
    }

    pub fn deceased(&self) -> Option<&Deceased> {
        self.deceased.as_ref()
    }

    /// Heirs in canonical order with their exclusion status
    pub fn heirs(&self) -> &[AnnotatedHeir] {
        &self.heirs
    }

    /// One assignment per heir, in canonical heir order
    pub fn assignments(&self) -> &[ShareAssignment] {
        &self.assignments
    }

    pub fn applied_rules(&self) -> &[RuleId] {
        &self.applied_rules
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Remainder left by rounding, before it was placed
    pub fn rounding_remainder(&self) -> Money {
        self.rounding_remainder
    }

    pub fn remainder_recipient(&self) -> Option<HeirId> {
        self.remainder_recipient
    }

    pub fn stage(&self) -> CalculationStage {
        self.stage
    }

    pub fn assignment_for(&self, heir_id: HeirId) -> Option<&ShareAssignment> {
        self.assignments.iter().find(|a| a.heir_id == heir_id)
    }

    pub fn eligible_count(&self) -> usize {
        self.heirs.iter().filter(|h| !h.is_excluded()).count()
    }

    pub fn excluded_count(&self) -> usize {
        self.heirs.len() - self.eligible_count()
    }

    pub fn has_warning(&self, predicate: impl Fn(&Warning) -> bool) -> bool {
        self.warnings.iter().any(predicate)
    }

    /// Sum of all assigned fractions
    pub fn total_fraction(&self) -> Result<Fraction, crate::error::EngineError> {
        Ok(Fraction::checked_sum(self.assignments.iter().map(|a| &a.fraction))?)
    }

    /// Sum of all assigned amounts
    pub fn total_amount(&self) -> Result<Money, crate::error::EngineError> {
        let currency = self.net_estate.distributable.currency();
        Ok(Money::checked_sum(
            currency,
            self.assignments.iter().map(|a| &a.amount),
        )?)
    }
}
