//! Overall Risk Score (ORS): fuses the static score with live vitals.
//!
//! Each vital sign is reduced to a relative deviation from its normal range,
//! the deviations and the normalized static score enter a fixed weighted sum,
//! and an exponential saturation transform maps the sum into [0, 1). The
//! transform is strictly increasing, so larger raw risk always means a
//! larger ORS, with diminishing sensitivity near 1.

use serde::{Deserialize, Serialize};

use super::{NormalRange, OverallRisk, RiskLevel, ScoringProfile, VitalSigns};

/// Relative overshoot above which a deviation counts as severe.
const SEVERE_DEVIATION: f64 = 0.3;

/// Amplification applied to severe deviations.
const SEVERE_MULTIPLIER: f64 = 1.5;

/// Rate constant of the saturation transform `1 - exp(-RATE * sum)`.
const SATURATION_RATE: f64 = 2.2;

/// Breath amplitude corresponding to full normal excursion.
const AMPLITUDE_REFERENCE: f64 = 10.0;

/// Scale applied to the inverted normalized amplitude.
const AMPLITUDE_MULTIPLIER: f64 = 1.5;

/// SpO2 below this doubles its deviation term (critical desaturation).
const SPO2_CRITICAL: f64 = 92.0;

/// EtCO2 outside this band doubles its deviation term.
const ETCO2_CRITICAL_LO: f64 = 30.0;
const ETCO2_CRITICAL_HI: f64 = 50.0;

/// Relative deviation of a value from its clinically normal range.
///
/// Zero inside the range. Outside, the relative overshoot
/// `(lo - value) / lo` or `(value - hi) / hi`; overshoot beyond 30% is
/// amplified 1.5x so severe excursions grow super-linearly.
#[must_use]
pub fn deviation_score(value: f64, range: NormalRange) -> f64 {
    let deviation = if value < range.lo {
        (range.lo - value) / range.lo
    } else if value > range.hi {
        (value - range.hi) / range.hi
    } else {
        return 0.0;
    };

    if deviation > SEVERE_DEVIATION {
        deviation * SEVERE_MULTIPLIER
    } else {
        deviation
    }
}

/// Fixed weights of the ORS combination.
///
/// Weights are constants: an absent optional vital contributes zero through
/// its weight, and the remaining weights are never renormalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinerWeights {
    pub prodigy: f64,
    pub recent_breathing: f64,
    pub current_breathing: f64,
    pub heart_rate: f64,
    pub breath_amplitude: f64,
    pub spo2: f64,
    pub etco2: f64,
}

impl CombinerWeights {
    /// Extended weighting with amplitude and capnography terms.
    #[must_use]
    pub const fn extended() -> Self {
        Self {
            prodigy: 0.30,
            recent_breathing: 0.15,
            current_breathing: 0.20,
            heart_rate: 0.10,
            breath_amplitude: 0.15,
            spo2: 0.05,
            etco2: 0.05,
        }
    }

    /// Legacy weighting: static score and breathing/heart deviations only.
    /// The legacy formulation accepted a breath amplitude but never weighted
    /// it; zero weights keep that behavior reproducible.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            prodigy: 0.4,
            recent_breathing: 0.25,
            current_breathing: 0.25,
            heart_rate: 0.1,
            breath_amplitude: 0.0,
            spo2: 0.0,
            etco2: 0.0,
        }
    }
}

/// A scoring profile paired with its combiner weights.
///
/// Bundling the two keeps the static normalization exact: `combine` divides
/// by its own profile's `max_score`, so the divisor cannot drift from the
/// scorer's ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskModel {
    pub profile: ScoringProfile,
    pub weights: CombinerWeights,
}

impl RiskModel {
    /// Extended percentage model (primary).
    #[must_use]
    pub fn extended() -> Self {
        Self {
            profile: ScoringProfile::extended(),
            weights: CombinerWeights::extended(),
        }
    }

    /// Legacy 39-point model.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            profile: ScoringProfile::legacy(),
            weights: CombinerWeights::legacy(),
        }
    }

    /// Combine a static score with a vitals snapshot into an overall risk.
    ///
    /// Pure and deterministic. The returned ORS lies in [0, 1) for any
    /// non-negative weighted sum; the risk level is its classification.
    #[must_use]
    pub fn combine(&self, static_score: f64, vitals: &VitalSigns) -> OverallRisk {
        let normalized_static = (static_score / self.profile.max_score).clamp(0.0, 1.0);

        let current_breathing =
            deviation_score(vitals.current_breathing_rate, NormalRange::BREATHING_RATE);
        let recent_breathing =
            deviation_score(vitals.recent_breathing_rate, NormalRange::BREATHING_RATE);
        let heart_rate = deviation_score(vitals.heart_rate, NormalRange::HEART_RATE);

        // Lower amplitude means shallower breathing and higher risk. The
        // multiplier deliberately lets the term exceed 1 at zero amplitude.
        let normalized_amplitude = (vitals.breath_amplitude / AMPLITUDE_REFERENCE).clamp(0.0, 1.0);
        let amplitude_risk = (1.0 - normalized_amplitude) * AMPLITUDE_MULTIPLIER;

        let spo2 = vitals.spo2.map_or(0.0, |value| {
            let deviation = deviation_score(value, NormalRange::SPO2);
            if deviation > 0.0 && value < SPO2_CRITICAL {
                deviation * 2.0
            } else {
                deviation
            }
        });

        let etco2 = vitals.etco2.map_or(0.0, |value| {
            let deviation = deviation_score(value, NormalRange::ETCO2);
            if deviation > 0.0 && (value < ETCO2_CRITICAL_LO || value > ETCO2_CRITICAL_HI) {
                deviation * 2.0
            } else {
                deviation
            }
        });

        let weights = &self.weights;
        let weighted_sum = weights.prodigy * normalized_static
            + weights.current_breathing * current_breathing
            + weights.recent_breathing * recent_breathing
            + weights.heart_rate * heart_rate
            + weights.breath_amplitude * amplitude_risk
            + weights.spo2 * spo2
            + weights.etco2 * etco2;

        let score = 1.0 - (-SATURATION_RATE * weighted_sum).exp();

        OverallRisk {
            score,
            level: RiskLevel::classify(score),
        }
    }
}
