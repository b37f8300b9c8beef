//! JSON file source for patient records.
//!
//! Reads one patient record per file, in the bedside-monitor export schema.
//! The wire format is strongly typed: unknown fields, missing required
//! fields, and non-numeric values are rejected at parse time, before any
//! value reaches the scoring core.

use std::path::Path;

use serde::Deserialize;

use crate::domain::{
    OpioidExposure, PatientRecord, PatientRiskFactors, Sex, ValidationError, VitalSigns,
};
use crate::ports::RecordSource;

/// Error type for record loading.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Patient file not found: {0}")]
    NotFound(String),

    #[error("Failed to read patient file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed patient file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid patient data: {0}")]
    Validation(#[from] ValidationError),
}

/// Raw wire format of a patient file.
///
/// Field names mirror the monitor export; `sleep_apnea` and `copd` are
/// accepted as aliases for `sdb` and `chf`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecord {
    #[serde(default)]
    id: Option<String>,
    age: u32,
    sex: String,
    #[serde(alias = "sleep_apnea")]
    sdb: bool,
    #[serde(default)]
    opioid_naive: Option<bool>,
    #[serde(default)]
    opioid_dosage: Option<f64>,
    sedative_use: bool,
    #[serde(default, alias = "copd")]
    chf: Option<bool>,
    #[serde(default)]
    bmi: Option<f64>,
    #[serde(default)]
    asa_status: Option<u8>,
    recent_breathing_rate: f64,
    current_breathing_rate: f64,
    heart_rate: f64,
    breath_amplitude: f64,
    #[serde(default)]
    spo2: Option<f64>,
    #[serde(default)]
    etco2: Option<f64>,
}

impl RawRecord {
    /// Resolve the two opioid wire fields into one exposure value.
    ///
    /// `opioid_naive: true` excludes a dosage; `opioid_naive: false` with no
    /// dosage means prior use at an unknown dose (scores as dose zero);
    /// neither field present is a missing required factor.
    fn opioid_exposure(&self) -> Result<OpioidExposure, ValidationError> {
        match (self.opioid_naive, self.opioid_dosage) {
            (Some(true), Some(_)) => Err(ValidationError::ConflictingFields(
                "opioid_naive=true excludes opioid_dosage",
            )),
            (Some(true), None) => Ok(OpioidExposure::Naive),
            (_, Some(dose)) => Ok(OpioidExposure::Dose(dose)),
            (Some(false), None) => Ok(OpioidExposure::Dose(0.0)),
            (None, None) => Err(ValidationError::MissingField(
                "opioid_naive or opioid_dosage",
            )),
        }
    }

    fn into_record(self) -> Result<PatientRecord, SourceError> {
        let opioid = self.opioid_exposure()?;
        let sex = Sex::parse(&self.sex)?;

        let factors = PatientRiskFactors {
            age: self.age,
            sex,
            sleep_disordered_breathing: self.sdb,
            opioid,
            sedative_use: self.sedative_use,
            bmi: self.bmi,
            cardiopulmonary_disease: self.chf,
            asa_status: self.asa_status,
        };

        let vitals = VitalSigns {
            recent_breathing_rate: self.recent_breathing_rate,
            current_breathing_rate: self.current_breathing_rate,
            heart_rate: self.heart_rate,
            breath_amplitude: self.breath_amplitude,
            spo2: self.spo2,
            etco2: self.etco2,
        };

        let record = match self.id {
            Some(id) => PatientRecord::with_id(id, factors, vitals),
            None => PatientRecord::new(factors, vitals),
        };
        record.validate()?;
        Ok(record)
    }
}

/// File-backed record source reading one JSON document per patient.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileSource;

impl JsonFileSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a patient record from JSON text.
    ///
    /// # Errors
    /// Returns error if the document is malformed or fails validation.
    pub fn parse_str(text: &str) -> Result<PatientRecord, SourceError> {
        let raw: RawRecord = serde_json::from_str(text)?;
        raw.into_record()
    }
}

impl RecordSource for JsonFileSource {
    type Error = SourceError;

    fn load(&self, reference: &str) -> Result<PatientRecord, SourceError> {
        let path = Path::new(reference);
        if !path.exists() {
            return Err(SourceError::NotFound(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse_str(&text)
    }
}
