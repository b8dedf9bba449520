use serde::{Deserialize, Serialize};

use crate::models::school::SchoolRecord;
use crate::models::student::StudentProfile;
use crate::scoring::bucket::Bucket;
use crate::scoring::fit::compute_fit;
use crate::scoring::rigor::profile_rigor;

/// GPA below which the penalty applies.
const GPA_PENALTY_THRESHOLD: f64 = 3.0;
const GPA_PENALTY_FACTOR: f64 = 0.2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CompetitivenessWeights {
    pub fit: f64,
    pub selectivity: f64,
    pub rigor: f64,
}

impl Default for CompetitivenessWeights {
    fn default() -> Self {
        Self {
            fit: 0.25,
            selectivity: 0.25,
            rigor: 0.50,
        }
    }
}

/// Score and bucket for one (student, school) pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoredSchool {
    pub score: Option<f64>,
    pub bucket: Bucket,
}

/// Weighted mean of the defined components. `None` when no weight remains.
pub fn weighted_average(components: &[(Option<f64>, f64)]) -> Option<f64> {
    let (sum, total_weight) = components
        .iter()
        .filter_map(|(value, weight)| value.map(|v| (v * weight, *weight)))
        .fold((0.0, 0.0), |(sum, total), (v, w)| (sum + v, total + w));

    if total_weight > 0.0 {
        Some(sum / total_weight)
    } else {
        None
    }
}

/// `(3.0 - gpa)^2 * 0.2` below a 3.0 GPA, otherwise zero.
pub fn gpa_penalty(gpa: f64) -> f64 {
    if gpa < GPA_PENALTY_THRESHOLD {
        (GPA_PENALTY_THRESHOLD - gpa).powi(2) * GPA_PENALTY_FACTOR
    } else {
        0.0
    }
}

/// Competitiveness in 0..=1: blend of fit, selectivity and rigor, minus the GPA penalty.
///
/// Undefined fit or selectivity drop out of the average along with their weights.
/// Rigor is always present, so in practice this only returns `None` for a
/// zero-weight configuration.
pub fn competitiveness(
    student: &StudentProfile,
    school: &SchoolRecord,
    weights: &CompetitivenessWeights,
) -> Option<f64> {
    let fit = compute_fit(student, school);
    // Higher admission rate reads as easier, so it raises the score.
    let selectivity = school
        .overall_admission_rate()
        .map(|rate| rate.clamp(0.0, 1.0));
    let rigor = profile_rigor(student);

    let blended = weighted_average(&[
        (fit, weights.fit),
        (selectivity, weights.selectivity),
        (Some(rigor), weights.rigor),
    ])?;

    Some((blended - gpa_penalty(student.gpa())).clamp(0.0, 1.0))
}

/// Scores a single school and assigns its bucket.
pub fn score_school(
    student: &StudentProfile,
    school: &SchoolRecord,
    weights: &CompetitivenessWeights,
) -> ScoredSchool {
    let score = competitiveness(student, school, weights);
    ScoredSchool {
        score,
        bucket: Bucket::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn banded_school(admission_rate: Option<f64>) -> SchoolRecord {
        SchoolRecord {
            id: 7,
            name: "Band College".to_string(),
            admission_rate,
            sat_math_25: Some(600.0),
            sat_math_75: Some(700.0),
            sat_verbal_25: Some(600.0),
            sat_verbal_75: Some(700.0),
            ..Default::default()
        }
    }

    fn student(gpa: f64, ebrw: f64, math: f64) -> StudentProfile {
        StudentProfile {
            gpa: Some(gpa),
            sat_ebrw: Some(ebrw),
            sat_math: Some(math),
            ..Default::default()
        }
    }

    #[test]
    fn test_weighted_average_skips_undefined() {
        let avg = weighted_average(&[(None, 0.25), (Some(0.4), 0.25), (Some(0.8), 0.5)]).unwrap();
        // (0.1 + 0.4) / 0.75
        assert!(approx(avg, 0.5 / 0.75));
    }

    #[test]
    fn test_weighted_average_empty_is_none() {
        assert_eq!(weighted_average(&[(None, 0.25), (None, 0.25)]), None);
        assert_eq!(weighted_average(&[]), None);
    }

    #[test]
    fn test_all_components_no_penalty_at_gpa_4() {
        let s = student(4.0, 650.0, 650.0);
        let school = banded_school(Some(0.4));
        let fit = compute_fit(&s, &school).unwrap();
        let rigor = profile_rigor(&s);
        let expected = 0.25 * fit + 0.25 * 0.4 + 0.5 * rigor;

        let score = competitiveness(&s, &school, &CompetitivenessWeights::default()).unwrap();
        assert!(approx(score, expected), "score {score} expected {expected}");
        assert!(score >= expected - 1e-12);
    }

    #[test]
    fn test_gpa_2_subtracts_point_two() {
        let s = student(2.0, 700.0, 700.0);
        let school = banded_school(Some(0.9));
        let fit = compute_fit(&s, &school).unwrap();
        let rigor = profile_rigor(&s);
        let unpenalized = 0.25 * fit + 0.25 * 0.9 + 0.5 * rigor;

        let score = competitiveness(&s, &school, &CompetitivenessWeights::default()).unwrap();
        assert!(approx(score, unpenalized - 0.2), "score was {score}");
    }

    #[test]
    fn test_penalty_clips_at_zero() {
        let s = student(0.5, 0.0, 0.0);
        let school = SchoolRecord {
            admission_rate: Some(0.05),
            ..Default::default()
        };
        let score = competitiveness(&s, &school, &CompetitivenessWeights::default()).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_rigor_only_when_fit_and_selectivity_missing() {
        let s = student(3.6, 0.0, 0.0);
        let score =
            competitiveness(&s, &SchoolRecord::default(), &CompetitivenessWeights::default())
                .unwrap();
        assert!(approx(score, profile_rigor(&s)));
    }

    #[test]
    fn test_selectivity_uses_alternate_rate() {
        let s = student(3.6, 0.0, 0.0);
        let school = SchoolRecord {
            admission_rate_alt: Some(1.0),
            ..Default::default()
        };
        let score = competitiveness(&s, &school, &CompetitivenessWeights::default()).unwrap();
        let expected = (0.25 * 1.0 + 0.5 * profile_rigor(&s)) / 0.75;
        assert!(approx(score, expected));
    }

    #[test]
    fn test_admission_rate_clipped() {
        let s = student(3.6, 0.0, 0.0);
        let over = SchoolRecord {
            admission_rate: Some(1.7),
            ..Default::default()
        };
        let one = SchoolRecord {
            admission_rate: Some(1.0),
            ..Default::default()
        };
        let weights = CompetitivenessWeights::default();
        assert_eq!(
            competitiveness(&s, &over, &weights),
            competitiveness(&s, &one, &weights)
        );
    }

    #[test]
    fn test_gpa_penalty_curve() {
        assert_eq!(gpa_penalty(3.0), 0.0);
        assert_eq!(gpa_penalty(3.9), 0.0);
        assert!(approx(gpa_penalty(2.0), 0.2));
        assert!(approx(gpa_penalty(2.5), 0.05));
    }

    #[test]
    fn test_zero_weights_yield_unknown_bucket() {
        let weights = CompetitivenessWeights {
            fit: 0.0,
            selectivity: 0.0,
            rigor: 0.0,
        };
        let scored = score_school(&student(3.5, 600.0, 600.0), &banded_school(Some(0.5)), &weights);
        assert_eq!(scored.score, None);
        assert_eq!(scored.bucket, Bucket::Unknown);
    }

    #[test]
    fn test_score_always_in_unit_interval() {
        let weights = CompetitivenessWeights::default();
        for gpa_tenths in 0..=40 {
            for rate in [None, Some(0.0), Some(0.05), Some(0.5), Some(1.0)] {
                let s = student(gpa_tenths as f64 / 10.0, 500.0, 560.0);
                let score = competitiveness(&s, &banded_school(rate), &weights).unwrap();
                assert!((0.0..=1.0).contains(&score));
            }
        }
    }
}
