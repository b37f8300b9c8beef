//! Assessment service: Orchestrates the risk-scoring pipeline.
//!
//! This service coordinates:
//! - Record loading through the source port
//! - Input validation
//! - Static PRODIGY scoring
//! - Dynamic ORS combination and classification

use crate::domain::{PatientRecord, RiskAssessment, RiskModel};
use crate::ports::RecordSource;
use crate::RespiguardError;

/// Service for running patient risk assessments.
///
/// Stateless apart from its configuration: every assessment is an
/// independent, pure computation over the loaded record, so one service may
/// be shared across threads freely.
pub struct AssessmentService<R>
where
    R: RecordSource,
{
    source: R,
    model: RiskModel,
}

impl<R> AssessmentService<R>
where
    R: RecordSource,
    R::Error: Into<crate::adapters::SourceError>,
{
    /// Create a service with the extended (primary) risk model.
    pub fn new(source: R) -> Self {
        Self::with_model(source, RiskModel::extended())
    }

    /// Create a service with an explicit risk model.
    pub fn with_model(source: R, model: RiskModel) -> Self {
        Self { source, model }
    }

    /// The model this service scores with.
    #[must_use]
    pub fn model(&self) -> &RiskModel {
        &self.model
    }

    /// Load a record through the source port and assess it.
    ///
    /// # Errors
    /// Returns error if loading, validation, or parsing fails.
    pub fn assess_from(&self, reference: &str) -> Result<RiskAssessment, RespiguardError> {
        tracing::debug!("Loading patient record...");
        let record = self
            .source
            .load(reference)
            .map_err(|e| RespiguardError::Source(e.into()))?;
        self.assess(&record)
    }

    /// Assess an already-loaded patient record.
    ///
    /// # Errors
    /// Returns error if the record fails validation.
    pub fn assess(&self, record: &PatientRecord) -> Result<RiskAssessment, RespiguardError> {
        record.validate()?;

        tracing::debug!("Computing static risk score...");
        let static_score = self.model.profile.score(&record.factors);

        tracing::debug!("Combining with vital signs...");
        let overall = self.model.combine(static_score, &record.vitals);

        let assessment = match &record.id {
            Some(patient_id) => RiskAssessment::with_patient(
                static_score,
                self.model.profile.max_score,
                overall,
                patient_id.clone(),
            ),
            None => RiskAssessment::new(static_score, self.model.profile.max_score, overall),
        };

        tracing::info!(
            "Assessment complete: static={:.1}/{:.0}, ors={:.3}, level={}",
            assessment.static_score,
            assessment.static_max,
            assessment.ors,
            assessment.risk_level
        );

        Ok(assessment)
    }
}
