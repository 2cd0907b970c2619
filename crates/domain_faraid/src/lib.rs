//! Faraid Distribution Engine
//!
//! Divides a deceased person's net estate among surviving heirs under the
//! fixed-share (Fara'id), residuary (Asabah), exclusion (Hajb) and
//! normalization (Awl/Radd) rules. All share arithmetic is exact; money is
//! rounded once, at the end.
//!
//! # Pipeline
//!
//! ```text
//! estate + heirs
//!   -> Preprocessing          net estate, bequest cap
//!   -> Validating             canonical, priority-sorted heirs
//!   -> Excluding              hajb to a fixed point
//!   -> AssigningFixed         quranic shares
//!   -> DistributingResiduary  residue by degree, 2:1 male:female
//!   -> Normalizing            awl / radd so the shares sum to one
//!   -> Done                   per-heir fractions and amounts
//! ```

pub mod heir;
pub mod rules;
pub mod registry;
pub mod composition;
pub mod exclusion;
pub mod fixed_share;
pub mod residuary;
pub mod normalization;
pub mod distribution;
pub mod result;
pub mod engine;
pub mod config;
pub mod services;
pub mod error;

pub use heir::{AnnotatedHeir, Deceased, Gender, Heir, HeirInput, Relationship};
pub use rules::{RuleCategory, RuleId};
pub use registry::HeirRegistry;
pub use normalization::Normalization;
pub use result::{CalculationResult, ShareAssignment, ShareKind, Warning};
pub use engine::{calculate, calculate_with, CalculationOptions, CalculationStage, FailedCalculation};
pub use config::EngineConfig;
pub use services::InheritanceService;
pub use error::EngineError;
