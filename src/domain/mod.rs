//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O. All types are
//! serializable, and all scoring functions are deterministic functions of
//! their inputs.

mod assessment;
mod ors;
mod patient;
mod prodigy;
mod vitals;

pub use assessment::{OverallRisk, RiskAssessment, RiskLevel};
pub use ors::{deviation_score, CombinerWeights, RiskModel};
pub use patient::{OpioidExposure, PatientRecord, PatientRiskFactors, Sex, ValidationError};
pub use prodigy::{ScoringProfile, Tier};
pub use vitals::{NormalRange, VitalSigns};
