//! Patient risk-factor types for opioid-induced respiratory depression.
//!
//! The factor set follows the PRODIGY trial rubric (age, sex, opioid
//! exposure, sleep disordered breathing) extended with sedative use, BMI,
//! cardiopulmonary disease, and ASA physical status.

use serde::{Deserialize, Serialize};

/// Validation error for patient input.
///
/// Out-of-range values are rejected, never clamped: a physically impossible
/// input (negative dose, ASA class 7) means the record is corrupt, and a
/// silently corrected score would be worse than no score.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Categorical value outside the recognized set.
    #[error("Unrecognized sex category: {0:?} (expected \"male\" or \"female\")")]
    UnknownSex(String),

    /// A required field was absent or unresolvable.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Two fields that cannot be combined were both supplied.
    #[error("Conflicting fields: {0}")]
    ConflictingFields(&'static str),

    /// A numeric value outside its physically valid range.
    #[error("Field {field} out of range: {message}")]
    OutOfRange {
        field: &'static str,
        message: String,
    },
}

/// Biological sex category used by the PRODIGY rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Parse from free-form text, case-insensitively.
    ///
    /// # Errors
    /// Returns `ValidationError::UnknownSex` for anything other than
    /// "male" or "female" (any casing, surrounding whitespace ignored).
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(ValidationError::UnknownSex(input.to_string())),
        }
    }
}

/// Opioid exposure history.
///
/// The legacy rubric only records naivety; the extended rubric scores the
/// daily dose in morphine milligram equivalents. Both are expressible here,
/// so one factor set feeds either scoring profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpioidExposure {
    /// No prior opioid use.
    Naive,
    /// Ongoing opioid therapy at the given daily dose (MME/day).
    /// A dose of zero means prior use at an unknown or negligible dose.
    Dose(f64),
}

/// Static risk factors for one patient.
///
/// Optional factors default to `None` (absent/unknown) and contribute zero
/// to the score. Absence is distinct from "present with zero effect":
/// `cardiopulmonary_disease: Some(false)` records a negative finding, `None`
/// records that nobody asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRiskFactors {
    /// Age in years
    pub age: u32,

    /// Biological sex
    pub sex: Sex,

    /// Known sleep disordered breathing (SDB) or high STOP-BANG score
    pub sleep_disordered_breathing: bool,

    /// Opioid exposure (naivety or daily dose)
    pub opioid: OpioidExposure,

    /// Concurrent sedative or benzodiazepine use
    pub sedative_use: bool,

    /// Body mass index (kg/m²), if measured
    pub bmi: Option<f64>,

    /// Chronic heart failure or COPD, if assessed
    pub cardiopulmonary_disease: Option<bool>,

    /// ASA physical status classification (1-5), if assigned
    pub asa_status: Option<u8>,
}

impl PatientRiskFactors {
    /// Validate that all factors are physically plausible.
    ///
    /// # Errors
    /// Returns the first violation found. Negative doses, non-finite
    /// numerics, and ASA classes outside 1-5 are rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let OpioidExposure::Dose(dose) = self.opioid {
            if !dose.is_finite() {
                return Err(ValidationError::OutOfRange {
                    field: "opioid_dosage",
                    message: format!("{dose} is not a finite number"),
                });
            }
            if dose < 0.0 {
                return Err(ValidationError::OutOfRange {
                    field: "opioid_dosage",
                    message: format!("{dose} MME/day is negative"),
                });
            }
        }

        if let Some(bmi) = self.bmi {
            if !bmi.is_finite() || bmi <= 0.0 {
                return Err(ValidationError::OutOfRange {
                    field: "bmi",
                    message: format!("{bmi} must be finite and positive"),
                });
            }
        }

        if let Some(asa) = self.asa_status {
            if !(1..=5).contains(&asa) {
                return Err(ValidationError::OutOfRange {
                    field: "asa_status",
                    message: format!("class {asa} outside [1, 5]"),
                });
            }
        }

        Ok(())
    }
}

/// One patient record as produced by the loading collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Patient identifier (local only, never logged unredacted)
    pub id: Option<String>,

    /// Static risk factors
    pub factors: PatientRiskFactors,

    /// Vital-sign snapshot
    pub vitals: super::VitalSigns,

    /// Timestamp of record construction
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl PatientRecord {
    /// Create a new record from factors and vitals.
    #[must_use]
    pub fn new(factors: PatientRiskFactors, vitals: super::VitalSigns) -> Self {
        Self {
            id: None,
            factors,
            vitals,
            created_at: chrono::Utc::now(),
        }
    }

    /// Create a new record with a patient ID.
    #[must_use]
    pub fn with_id(
        id: impl Into<String>,
        factors: PatientRiskFactors,
        vitals: super::VitalSigns,
    ) -> Self {
        Self {
            id: Some(id.into()),
            factors,
            vitals,
            created_at: chrono::Utc::now(),
        }
    }

    /// Validate factors and vitals together.
    ///
    /// # Errors
    /// Returns the first violation found in either part.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.factors.validate()?;
        self.vitals.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_factors() -> PatientRiskFactors {
        PatientRiskFactors {
            age: 65,
            sex: Sex::Male,
            sleep_disordered_breathing: true,
            opioid: OpioidExposure::Naive,
            sedative_use: false,
            bmi: None,
            cardiopulmonary_disease: None,
            asa_status: None,
        }
    }

    #[test]
    fn test_sex_parse_case_insensitive() {
        assert_eq!(Sex::parse("male").expect("Should parse"), Sex::Male);
        assert_eq!(Sex::parse("FEMALE").expect("Should parse"), Sex::Female);
        assert_eq!(Sex::parse("  Male ").expect("Should parse"), Sex::Male);
    }

    #[test]
    fn test_sex_parse_rejects_unknown() {
        assert!(matches!(
            Sex::parse("other"),
            Err(ValidationError::UnknownSex(_))
        ));
        assert!(Sex::parse("").is_err());
    }

    #[test]
    fn test_valid_factors() {
        assert!(base_factors().validate().is_ok());

        let with_optionals = PatientRiskFactors {
            bmi: Some(31.5),
            cardiopulmonary_disease: Some(true),
            asa_status: Some(3),
            ..base_factors()
        };
        assert!(with_optionals.validate().is_ok());
    }

    #[test]
    fn test_negative_dose_rejected() {
        let factors = PatientRiskFactors {
            opioid: OpioidExposure::Dose(-10.0),
            ..base_factors()
        };
        assert!(matches!(
            factors.validate(),
            Err(ValidationError::OutOfRange { field: "opioid_dosage", .. })
        ));
    }

    #[test]
    fn test_asa_out_of_range_rejected() {
        let factors = PatientRiskFactors {
            asa_status: Some(6),
            ..base_factors()
        };
        assert!(factors.validate().is_err());

        let zero = PatientRiskFactors {
            asa_status: Some(0),
            ..base_factors()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_bad_bmi_rejected() {
        let factors = PatientRiskFactors {
            bmi: Some(f64::NAN),
            ..base_factors()
        };
        assert!(factors.validate().is_err());
    }
}
