//! Inheritance service
//!
//! Boundary wrapper around the pure engine. It applies the configured policy
//! and reports each calculation through `tracing`; installing a subscriber is
//! left to the host application.

use tracing::{debug, info, instrument, warn};

use domain_estate::EstateSnapshot;
use crate::config::EngineConfig;
use crate::engine::{self, CalculationOptions};
use crate::error::EngineError;
use crate::heir::{Deceased, HeirInput};
use crate::result::{CalculationResult, Warning};

/// Service for computing inheritance distributions
#[derive(Debug, Clone, Default)]
pub struct InheritanceService {
    config: EngineConfig,
}

impl InheritanceService {
    /// Creates a new inheritance service
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn options(&self) -> CalculationOptions {
        self.config.calculation_options()
    }

    /// Calculates the distribution of `estate` among `heirs`
    #[instrument(
        skip_all,
        fields(
            currency = %estate.currency,
            heirs = heirs.len(),
            gross_assets = estate.gross_assets,
        )
    )]
    pub fn calculate(
        &self,
        estate: &EstateSnapshot,
        heirs: &[HeirInput],
        deceased: Option<&Deceased>,
    ) -> Result<CalculationResult, EngineError> {
        debug!(max_heirs = self.config.max_heirs, "Starting inheritance calculation");

        let result = match engine::run(estate, heirs, deceased, &self.options()) {
            Ok(result) => result,
            Err(failed) => {
                warn!(stage = %failed.stage, error = %failed.error, "Inheritance calculation failed");
                return Err(failed.error);
            }
        };

        for warning in result.warnings() {
            match warning {
                Warning::NoEligibleHeir { undistributed } => {
                    warn!(%undistributed, "No eligible heir; estate left undistributed");
                }
                other => {
                    debug!(warning = ?other, "Calculation warning");
                }
            }
        }

        info!(
            normalization = result.normalization().label(),
            eligible = result.eligible_count(),
            excluded = result.excluded_count(),
            rules = result.applied_rules().len(),
            distributable = %result.net_estate().distributable,
            "Inheritance calculation completed"
        );

        Ok(result)
    }
}
