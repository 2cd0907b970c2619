//! Calculation pipeline
//!
//! Runs the stages in a fixed order and tracks progress with a
//! [`CalculationStage`] state machine. The engine is a pure function of its
//! input: it keeps no state between calls, performs no I/O and emits no
//! events.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use core_kernel::{Fraction, HeirId};
use domain_estate::{preprocess_with, EstateSnapshot, PreprocessOptions};
use crate::distribution;
use crate::error::EngineError;
use crate::exclusion;
use crate::fixed_share;
use crate::heir::{Deceased, HeirInput};
use crate::normalization::{self, Normalization};
use crate::registry::{HeirRegistry, DEFAULT_MAX_HEIRS};
use crate::residuary;
use crate::result::{CalculationResult, ShareAssignment, ShareKind, Warning};
use crate::rules::RuleId;

/// Decimal places of the display percentage
const PERCENTAGE_DP: u32 = 4;

/// Pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationStage {
    Preprocessing,
    Validating,
    Excluding,
    AssigningFixed,
    DistributingResiduary,
    Normalizing,
    Done,
    Failed,
}

impl CalculationStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CalculationStage::Done | CalculationStage::Failed)
    }

    /// Checks if transition to target stage is valid
    pub fn can_transition_to(&self, target: CalculationStage) -> bool {
        use CalculationStage::*;
        matches!(
            (*self, target),
            (Preprocessing, Validating) |
            (Validating, Excluding) |
            (Excluding, AssigningFixed) |
            (AssigningFixed, DistributingResiduary) |
            (DistributingResiduary, Normalizing) |
            (Normalizing, Done)
        ) || (!self.is_terminal() && target == Failed)
    }
}

impl fmt::Display for CalculationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalculationStage::Preprocessing => "preprocessing",
            CalculationStage::Validating => "validating",
            CalculationStage::Excluding => "excluding",
            CalculationStage::AssigningFixed => "assigning_fixed",
            CalculationStage::DistributingResiduary => "distributing_residuary",
            CalculationStage::Normalizing => "normalizing",
            CalculationStage::Done => "done",
            CalculationStage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Tracks the current stage of one calculation
#[derive(Debug)]
pub struct Pipeline {
    stage: CalculationStage,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            stage: CalculationStage::Preprocessing,
        }
    }

    pub fn stage(&self) -> CalculationStage {
        self.stage
    }

    /// Moves to `target`, rejecting backward or skipping transitions
    pub fn advance(&mut self, target: CalculationStage) -> Result<(), EngineError> {
        if !self.stage.can_transition_to(target) {
            return Err(EngineError::InvalidStageTransition {
                from: self.stage.to_string(),
                to: target.to_string(),
            });
        }
        self.stage = target;
        Ok(())
    }

    /// Marks the calculation failed and returns the stage it failed in
    pub fn fail(&mut self) -> CalculationStage {
        let failed_at = self.stage;
        if self.stage.can_transition_to(CalculationStage::Failed) {
            self.stage = CalculationStage::Failed;
        }
        failed_at
    }
}

/// Per-call policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationOptions {
    pub max_heirs: usize,
    pub honor_consent_override: bool,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self {
            max_heirs: DEFAULT_MAX_HEIRS,
            honor_consent_override: true,
        }
    }
}

/// A calculation that stopped before reaching `Done`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("calculation failed while {stage}: {error}")]
pub struct FailedCalculation {
    /// Stage that was running when the error occurred
    pub stage: CalculationStage,
    #[source]
    pub error: EngineError,
}

/// Calculates the distribution with default options
pub fn calculate(
    estate: &EstateSnapshot,
    heirs: &[HeirInput],
) -> Result<CalculationResult, EngineError> {
    calculate_with(estate, heirs, None, &CalculationOptions::default())
}

/// Calculates the distribution
///
/// # Errors
///
/// * `NegativeEstate`, `WasiyyahExceedsLimit`, `InvalidEstate` - estate input
/// * `InvalidHeirSet`, `UnrecognizedRelationship` - heir input
/// * `Arithmetic` - a fraction overflowed `i128`
pub fn calculate_with(
    estate: &EstateSnapshot,
    heirs: &[HeirInput],
    deceased: Option<&Deceased>,
    options: &CalculationOptions,
) -> Result<CalculationResult, EngineError> {
    run(estate, heirs, deceased, options).map_err(|failed| failed.error)
}

/// Calculates the distribution, reporting the failing stage on error
pub fn run(
    estate: &EstateSnapshot,
    heirs: &[HeirInput],
    deceased: Option<&Deceased>,
    options: &CalculationOptions,
) -> Result<CalculationResult, FailedCalculation> {
    let mut pipeline = Pipeline::new();
    execute(&mut pipeline, estate, heirs, deceased, options).map_err(|error| FailedCalculation {
        stage: pipeline.fail(),
        error,
    })
}

fn execute(
    pipeline: &mut Pipeline,
    estate: &EstateSnapshot,
    inputs: &[HeirInput],
    deceased: Option<&Deceased>,
    options: &CalculationOptions,
) -> Result<CalculationResult, EngineError> {
    use CalculationStage::*;

    let net_estate = preprocess_with(
        estate,
        &PreprocessOptions {
            honor_consent_override: options.honor_consent_override,
        },
    )?;

    pipeline.advance(Validating)?;
    let heirs = HeirRegistry::new(options.max_heirs).register(inputs, deceased)?;

    pipeline.advance(Excluding)?;
    let exclusion = exclusion::resolve(&heirs);

    pipeline.advance(AssigningFixed)?;
    let fixed = fixed_share::assign(&exclusion.heirs)?;

    pipeline.advance(DistributingResiduary)?;
    let residuary = residuary::distribute(&exclusion.heirs, &fixed.total)?;

    pipeline.advance(Normalizing)?;
    let normalized = normalization::normalize(&fixed, &residuary)?;

    let finals = exclusion
        .heirs
        .iter()
        .map(|heir| -> Result<(HeirId, Fraction), EngineError> {
            if heir.is_excluded() {
                return Ok((heir.id(), Fraction::ZERO));
            }
            let residuary_portion = residuary
                .share_for(heir.id())
                .map(|s| s.fraction)
                .unwrap_or(Fraction::ZERO);
            let fraction = normalized
                .fixed_for(heir.id())
                .checked_add(&residuary_portion)?;
            Ok((heir.id(), fraction))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let apportionment = distribution::apportion(net_estate.distributable, &finals)?;

    let mut assignments = Vec::with_capacity(finals.len());
    for ((heir, (_, fraction)), amount) in exclusion
        .heirs
        .iter()
        .zip(&finals)
        .zip(&apportionment.amounts)
    {
        let fixed_share = fixed.share_for(heir.id()).filter(|_| !heir.is_excluded());
        let residuary_share = residuary.share_for(heir.id()).filter(|_| !heir.is_excluded());
        let fixed_portion = fixed_share.map(|s| s.fraction).unwrap_or(Fraction::ZERO);
        let residuary_portion = residuary_share
            .map(|s| s.fraction)
            .unwrap_or(Fraction::ZERO);

        let kind = if heir.is_excluded() {
            ShareKind::None
        } else if residuary_share.is_some()
            && !(residuary_portion.is_zero() && fixed_portion.is_positive())
        {
            ShareKind::Residuary
        } else if fixed_portion.is_positive() {
            ShareKind::Fixed
        } else {
            ShareKind::None
        };

        let mut basis = Vec::new();
        if let Some(rule) = heir.excluded_by() {
            basis.push(rule);
        }
        if let Some(share) = fixed_share {
            basis.push(share.rule);
        }
        if let (Some(_), Some(rule)) = (residuary_share, residuary.rule) {
            basis.push(rule);
        }
        if normalized.was_adjusted(heir.id()) {
            basis.extend(normalized.normalization.rule());
        }

        assignments.push(ShareAssignment {
            heir_id: heir.id(),
            relationship: heir.relationship(),
            kind,
            fraction: *fraction,
            fixed_portion,
            residuary_portion,
            amount: *amount,
            percentage: fraction.to_percentage(PERCENTAGE_DP)?,
            basis,
        });
    }

    let mut applied_rules = Vec::new();
    if net_estate.consent_override_applied {
        applied_rules.push(RuleId::WasiyyahConsentOverride);
    }
    applied_rules.extend(exclusion.applied_rules.iter().copied());
    applied_rules.extend(fixed.applied_rules.iter().copied());
    applied_rules.extend(residuary.rule);
    applied_rules.extend(normalized.normalization.rule());

    let mut warnings = Vec::new();
    if net_estate.consent_override_applied {
        warnings.push(Warning::WasiyyahConsentOverride {
            wasiyyah: net_estate.wasiyyah,
            limit: net_estate.wasiyyah_limit,
        });
    }
    if let (true, Some(rule)) = (residuary.is_exhausted(), residuary.rule) {
        warnings.push(Warning::ResidueExhausted { rule });
    }
    if let Normalization::Radd {
        to_spouse: true, ..
    } = normalized.normalization
    {
        warnings.push(Warning::RaddToSpouse);
    }
    if exclusion.heirs.iter().all(|h| h.is_excluded()) {
        warnings.push(Warning::NoEligibleHeir {
            undistributed: net_estate.distributable,
        });
    }

    pipeline.advance(Done)?;

    Ok(CalculationResult::new(
        estate.clone(),
        net_estate,
        deceased.cloned(),
        exclusion.heirs,
        assignments,
        applied_rules,
        normalized.normalization,
        warnings,
        apportionment.remainder,
        apportionment.recipient,
        pipeline.stage(),
    ))
}
