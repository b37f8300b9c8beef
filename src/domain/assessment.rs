//! Risk assessment result types.
//!
//! Represents the output of the PRODIGY + ORS risk computation.

use serde::{Deserialize, Serialize};

/// Risk level classification for respiratory depression.
///
/// Ordered from least to most severe; `classify` maps an ORS onto exactly
/// one level with exclusive lower boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Routine care
    Minimal,
    /// Standard monitoring
    Low,
    /// Regular monitoring
    Moderate,
    /// Close monitoring required
    High,
    /// Immediate intervention required
    Critical,
}

impl RiskLevel {
    /// Classify an overall risk score against the fixed breakpoints.
    ///
    /// Boundaries are exclusive on the lower side: an ORS of exactly 0.45
    /// is Moderate, not High.
    #[must_use]
    pub fn classify(ors: f64) -> Self {
        if ors > 0.65 {
            Self::Critical
        } else if ors > 0.45 {
            Self::High
        } else if ors > 0.25 {
            Self::Moderate
        } else if ors > 0.15 {
            Self::Low
        } else {
            Self::Minimal
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal Risk - Routine Care",
            Self::Low => "Low Risk - Standard Monitoring",
            Self::Moderate => "Moderate Risk - Regular Monitoring",
            Self::High => "High Risk - Close Monitoring Required",
            Self::Critical => "Critical Risk - Immediate Intervention Required",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimal => write!(f, "MINIMAL"),
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Result of the dynamic risk combination (before record wrapping).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OverallRisk {
    /// Overall risk score in [0, 1)
    pub score: f64,

    /// Risk classification of the score
    pub level: RiskLevel,
}

/// Complete risk assessment record including metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Unique identifier
    pub id: String,

    /// Reference to patient (if available)
    pub patient_id: Option<String>,

    /// Static PRODIGY score, clamped to the model's maximum
    pub static_score: f64,

    /// Maximum of the static scale the score was computed on
    pub static_max: f64,

    /// Overall risk score in [0, 1)
    pub ors: f64,

    /// Risk classification
    pub risk_level: RiskLevel,

    /// Timestamp of assessment
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl RiskAssessment {
    /// Create a new assessment record.
    #[must_use]
    pub fn new(static_score: f64, static_max: f64, overall: OverallRisk) -> Self {
        Self {
            id: record_id(),
            patient_id: None,
            static_score,
            static_max,
            ors: overall.score,
            risk_level: overall.level,
            created_at: chrono::Utc::now(),
        }
    }

    /// Create an assessment record with a patient reference.
    #[must_use]
    pub fn with_patient(
        static_score: f64,
        static_max: f64,
        overall: OverallRisk,
        patient_id: impl Into<String>,
    ) -> Self {
        Self {
            patient_id: Some(patient_id.into()),
            ..Self::new(static_score, static_max, overall)
        }
    }
}

/// Generate a UUID v4 (random) record identifier using a CSPRNG.
///
/// ChaCha20Rng seeded from OS entropy keeps identifiers unpredictable on all
/// platforms, so record ids leak nothing about ordering or volume.
fn record_id() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_breakpoints() {
        assert_eq!(RiskLevel::classify(0.0), RiskLevel::Minimal);
        assert_eq!(RiskLevel::classify(0.15), RiskLevel::Minimal);
        assert_eq!(RiskLevel::classify(0.1501), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(0.25), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(0.2501), RiskLevel::Moderate);
        assert_eq!(RiskLevel::classify(0.45), RiskLevel::Moderate);
        assert_eq!(RiskLevel::classify(0.4501), RiskLevel::High);
        assert_eq!(RiskLevel::classify(0.65), RiskLevel::High);
        assert_eq!(RiskLevel::classify(0.6501), RiskLevel::Critical);
        assert_eq!(RiskLevel::classify(0.999), RiskLevel::Critical);
    }

    #[test]
    fn test_classification_monotone() {
        let mut previous = RiskLevel::Minimal;
        for step in 0..100 {
            let level = RiskLevel::classify(f64::from(step) / 100.0);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_assessment_creation() {
        let overall = OverallRisk {
            score: 0.52,
            level: RiskLevel::classify(0.52),
        };
        let assessment = RiskAssessment::with_patient(38.0, 100.0, overall, "patient-7");

        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.patient_id.as_deref(), Some("patient-7"));
        assert!((assessment.static_score - 38.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_id_generation() {
        let id1 = record_id();
        let id2 = record_id();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36); // UUID format with dashes
    }
}
