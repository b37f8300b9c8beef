//! Static PRODIGY-style risk scoring.
//!
//! Continuous factors (age, opioid dose, BMI, ASA class) are scored through
//! explicit ordered tier tables: a value earns the points of the highest
//! tier threshold it reaches. Boolean factors earn fixed points. The sum is
//! clamped to the profile's maximum.
//!
//! Tier lookup is threshold-floor everywhere. For integer ages with tiers at
//! 60/70/80 this is identical to the closed-interval buckets of the legacy
//! 39-point rubric (`60 <= age <= 69` earns the 60 tier).

use serde::{Deserialize, Serialize};

use super::{OpioidExposure, PatientRiskFactors, Sex};

/// One tier of a threshold-bucketed factor: applies when `value >= threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub threshold: f64,
    pub points: f64,
}

impl Tier {
    #[must_use]
    pub const fn new(threshold: f64, points: f64) -> Self {
        Self { threshold, points }
    }
}

/// Points earned by `value` against an ordered tier table.
///
/// Explicit max-fold over the listed tiers: the result is the maximum points
/// among tiers whose threshold does not exceed the value, or zero when the
/// value is below every threshold. Independent of table ordering.
fn tier_points(tiers: &[Tier], value: f64) -> f64 {
    tiers
        .iter()
        .filter(|tier| value >= tier.threshold)
        .map(|tier| tier.points)
        .fold(0.0, f64::max)
}

/// Weight tables for the static risk score.
///
/// All weights are in points; `max_score` is both the clamping ceiling and
/// the normalization divisor used by the dynamic combiner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub age_tiers: Vec<Tier>,
    pub male_points: f64,
    pub female_points: f64,
    pub opioid_naive_points: f64,
    pub opioid_dose_tiers: Vec<Tier>,
    pub sdb_points: f64,
    pub sedative_points: f64,
    pub cardiopulmonary_points: f64,
    pub bmi_tiers: Vec<Tier>,
    pub asa_tiers: Vec<Tier>,
    pub max_score: f64,
}

impl ScoringProfile {
    /// Extended percentage formulation (primary). Scores cap at 100.
    #[must_use]
    pub fn extended() -> Self {
        Self {
            age_tiers: vec![
                Tier::new(60.0, 8.0),
                Tier::new(70.0, 12.0),
                Tier::new(80.0, 16.0),
            ],
            male_points: 8.0,
            female_points: 0.0,
            opioid_naive_points: 3.0,
            opioid_dose_tiers: vec![
                Tier::new(25.0, 2.0),
                Tier::new(50.0, 4.0),
                Tier::new(100.0, 8.0),
            ],
            sdb_points: 5.0,
            sedative_points: 5.0,
            cardiopulmonary_points: 7.0,
            bmi_tiers: vec![
                Tier::new(30.0, 3.0),
                Tier::new(35.0, 5.0),
                Tier::new(40.0, 8.0),
            ],
            asa_tiers: vec![Tier::new(3.0, 5.0), Tier::new(4.0, 8.0)],
            max_score: 100.0,
        }
    }

    /// Legacy 39-point formulation: age, sex, opioid naivety, SDB, CHF only.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            age_tiers: vec![
                Tier::new(60.0, 8.0),
                Tier::new(70.0, 12.0),
                Tier::new(80.0, 16.0),
            ],
            male_points: 8.0,
            female_points: 0.0,
            opioid_naive_points: 3.0,
            opioid_dose_tiers: Vec::new(),
            sdb_points: 5.0,
            sedative_points: 0.0,
            cardiopulmonary_points: 7.0,
            bmi_tiers: Vec::new(),
            asa_tiers: Vec::new(),
            max_score: 39.0,
        }
    }

    /// Compute the static risk score for validated factors.
    ///
    /// Pure and deterministic; the result is clamped to `[0, max_score]`.
    /// Clamping truncates runaway sums, it never rejects.
    #[must_use]
    pub fn score(&self, factors: &PatientRiskFactors) -> f64 {
        let mut total = 0.0;

        total += tier_points(&self.age_tiers, f64::from(factors.age));

        total += match factors.sex {
            Sex::Male => self.male_points,
            Sex::Female => self.female_points,
        };

        total += match factors.opioid {
            OpioidExposure::Naive => self.opioid_naive_points,
            OpioidExposure::Dose(dose) => tier_points(&self.opioid_dose_tiers, dose),
        };

        if factors.sleep_disordered_breathing {
            total += self.sdb_points;
        }
        if factors.sedative_use {
            total += self.sedative_points;
        }
        if factors.cardiopulmonary_disease == Some(true) {
            total += self.cardiopulmonary_points;
        }

        if let Some(bmi) = factors.bmi {
            total += tier_points(&self.bmi_tiers, bmi);
        }
        if let Some(asa) = factors.asa_status {
            total += tier_points(&self.asa_tiers, f64::from(asa));
        }

        total.clamp(0.0, self.max_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_example() -> PatientRiskFactors {
        PatientRiskFactors {
            age: 65,
            sex: Sex::Male,
            sleep_disordered_breathing: true,
            opioid: OpioidExposure::Naive,
            sedative_use: false,
            bmi: None,
            cardiopulmonary_disease: Some(false),
            asa_status: None,
        }
    }

    #[test]
    fn test_tier_points_floor_lookup() {
        let tiers = [
            Tier::new(60.0, 8.0),
            Tier::new(70.0, 12.0),
            Tier::new(80.0, 16.0),
        ];
        assert_eq!(tier_points(&tiers, 59.0), 0.0);
        assert_eq!(tier_points(&tiers, 60.0), 8.0);
        assert_eq!(tier_points(&tiers, 69.0), 8.0);
        assert_eq!(tier_points(&tiers, 70.0), 12.0);
        assert_eq!(tier_points(&tiers, 79.0), 12.0);
        assert_eq!(tier_points(&tiers, 80.0), 16.0);
        assert_eq!(tier_points(&tiers, 101.0), 16.0);
    }

    #[test]
    fn test_tier_points_order_independent() {
        let shuffled = [
            Tier::new(80.0, 16.0),
            Tier::new(60.0, 8.0),
            Tier::new(70.0, 12.0),
        ];
        assert_eq!(tier_points(&shuffled, 75.0), 12.0);
    }

    #[test]
    fn test_legacy_reference_score() {
        // 8 (age 65) + 8 (male) + 3 (naive) + 5 (SDB) + 0 (no CHF) = 24
        let score = ScoringProfile::legacy().score(&legacy_example());
        assert!((score - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_legacy_maximum_reachable() {
        let worst = PatientRiskFactors {
            age: 85,
            sex: Sex::Male,
            sleep_disordered_breathing: true,
            opioid: OpioidExposure::Naive,
            sedative_use: true,
            bmi: Some(45.0),
            cardiopulmonary_disease: Some(true),
            asa_status: Some(5),
        };
        // Extended-only factors are weightless under the legacy profile.
        let score = ScoringProfile::legacy().score(&worst);
        assert!((score - 39.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extended_scores_optional_factors() {
        let profile = ScoringProfile::extended();
        let base = legacy_example();
        let with_optionals = PatientRiskFactors {
            bmi: Some(36.0),
            asa_status: Some(4),
            opioid: OpioidExposure::Dose(60.0),
            ..base.clone()
        };

        // 8 + 8 + 4 (dose tier 50) + 5 + 5 (BMI tier 35) + 8 (ASA 4) = 38
        let score = profile.score(&with_optionals);
        assert!((score - 38.0).abs() < f64::EPSILON);

        // Absent optionals contribute zero.
        let score_base = profile.score(&base);
        assert!((score_base - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_bounded_by_max() {
        let profile = ScoringProfile::extended();
        let worst = PatientRiskFactors {
            age: 95,
            sex: Sex::Male,
            sleep_disordered_breathing: true,
            opioid: OpioidExposure::Dose(200.0),
            sedative_use: true,
            bmi: Some(48.0),
            cardiopulmonary_disease: Some(true),
            asa_status: Some(5),
        };
        let score = profile.score(&worst);
        assert!(score >= 0.0);
        assert!(score <= profile.max_score);
    }

    #[test]
    fn test_clamp_is_a_hard_ceiling() {
        // A profile whose weights can exceed its ceiling must truncate.
        let profile = ScoringProfile {
            age_tiers: vec![Tier::new(60.0, 80.0)],
            male_points: 50.0,
            ..ScoringProfile::extended()
        };
        let score = profile.score(&legacy_example());
        assert!((score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boolean_factors_monotone() {
        let profile = ScoringProfile::extended();
        let base = PatientRiskFactors {
            sleep_disordered_breathing: false,
            cardiopulmonary_disease: Some(false),
            ..legacy_example()
        };
        let base_score = profile.score(&base);

        for factors in [
            PatientRiskFactors {
                sleep_disordered_breathing: true,
                ..base.clone()
            },
            PatientRiskFactors {
                sedative_use: true,
                ..base.clone()
            },
            PatientRiskFactors {
                cardiopulmonary_disease: Some(true),
                ..base.clone()
            },
        ] {
            assert!(profile.score(&factors) >= base_score);
        }
    }

    #[test]
    fn test_dose_below_every_tier_scores_zero() {
        let profile = ScoringProfile::extended();
        let factors = PatientRiskFactors {
            opioid: OpioidExposure::Dose(0.0),
            ..legacy_example()
        };
        // 24 with naive (3 points) becomes 21 with a sub-threshold dose.
        assert!((profile.score(&factors) - 21.0).abs() < f64::EPSILON);
    }
}
