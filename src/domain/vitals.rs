//! Vital-sign snapshot types.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Closed interval of clinically normal values for one vital sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalRange {
    pub lo: f64,
    pub hi: f64,
}

impl NormalRange {
    /// Breaths per minute, adult at rest.
    pub const BREATHING_RATE: NormalRange = NormalRange { lo: 12.0, hi: 20.0 };

    /// Beats per minute, adult at rest.
    pub const HEART_RATE: NormalRange = NormalRange { lo: 60.0, hi: 100.0 };

    /// Peripheral oxygen saturation, percent.
    pub const SPO2: NormalRange = NormalRange { lo: 95.0, hi: 100.0 };

    /// End-tidal CO2, mmHg.
    pub const ETCO2: NormalRange = NormalRange { lo: 35.0, hi: 45.0 };

    /// Whether a value falls inside the normal range (inclusive).
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }
}

/// One snapshot of monitored vital signs.
///
/// Capnography fields are optional: not every bedside monitor reports SpO2
/// or EtCO2. Absent fields contribute nothing to the risk combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    /// Breathing rate averaged over the recent window (breaths/min)
    pub recent_breathing_rate: f64,

    /// Current breathing rate (breaths/min)
    pub current_breathing_rate: f64,

    /// Heart rate (beats/min)
    pub heart_rate: f64,

    /// Breath amplitude from the respiration sensor (arbitrary units,
    /// ~10 at full normal excursion)
    pub breath_amplitude: f64,

    /// Peripheral oxygen saturation (%), if monitored
    pub spo2: Option<f64>,

    /// End-tidal CO2 (mmHg), if monitored
    pub etco2: Option<f64>,
}

impl VitalSigns {
    /// Validate that all measurements are physically plausible.
    ///
    /// # Errors
    /// Returns the first violation found. Non-finite and negative values are
    /// rejected; SpO2 must lie in [0, 100].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("recent_breathing_rate", self.recent_breathing_rate),
            ("current_breathing_rate", self.current_breathing_rate),
            ("heart_rate", self.heart_rate),
            ("breath_amplitude", self.breath_amplitude),
        ];
        for (field, value) in required {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::OutOfRange {
                    field,
                    message: format!("{value} must be finite and non-negative"),
                });
            }
        }

        if let Some(spo2) = self.spo2 {
            if !spo2.is_finite() || !(0.0..=100.0).contains(&spo2) {
                return Err(ValidationError::OutOfRange {
                    field: "spo2",
                    message: format!("{spo2}% outside [0, 100]"),
                });
            }
        }

        if let Some(etco2) = self.etco2 {
            if !etco2.is_finite() || etco2 < 0.0 {
                return Err(ValidationError::OutOfRange {
                    field: "etco2",
                    message: format!("{etco2} mmHg must be finite and non-negative"),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midpoint_vitals() -> VitalSigns {
        VitalSigns {
            recent_breathing_rate: 16.0,
            current_breathing_rate: 16.0,
            heart_rate: 80.0,
            breath_amplitude: 10.0,
            spo2: None,
            etco2: None,
        }
    }

    #[test]
    fn test_range_contains_boundaries() {
        let range = NormalRange::BREATHING_RATE;
        assert!(range.contains(12.0));
        assert!(range.contains(20.0));
        assert!(range.contains(16.0));
        assert!(!range.contains(11.9));
        assert!(!range.contains(20.1));
    }

    #[test]
    fn test_valid_vitals() {
        assert!(midpoint_vitals().validate().is_ok());

        let with_capnography = VitalSigns {
            spo2: Some(97.0),
            etco2: Some(40.0),
            ..midpoint_vitals()
        };
        assert!(with_capnography.validate().is_ok());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let vitals = VitalSigns {
            heart_rate: -5.0,
            ..midpoint_vitals()
        };
        assert!(matches!(
            vitals.validate(),
            Err(ValidationError::OutOfRange { field: "heart_rate", .. })
        ));
    }

    #[test]
    fn test_spo2_above_100_rejected() {
        let vitals = VitalSigns {
            spo2: Some(104.0),
            ..midpoint_vitals()
        };
        assert!(vitals.validate().is_err());
    }

    #[test]
    fn test_nan_rejected() {
        let vitals = VitalSigns {
            current_breathing_rate: f64::NAN,
            ..midpoint_vitals()
        };
        assert!(vitals.validate().is_err());
    }
}
