//! Rigor: a school-independent measure of academic strength.
//!
//! GPA carries most of the weight; tests contribute little and AP/IB are flat bumps.

use crate::models::student::StudentProfile;

const GPA_SCALE: f64 = 4.0;
const SAT_SCALE: f64 = 1600.0;

const GPA_WEIGHT: f64 = 0.75;
const SAT_WEIGHT: f64 = 0.15;

const AP_BUMP_PER_COURSE: f64 = 0.02;
const AP_BUMP_CAP: f64 = 0.10;

const IB_THRESHOLD: f64 = 38.0;
const IB_BUMP: f64 = 0.05;

/// Rigor in 0..=1 from GPA, AP count, IB total and optional SAT sections.
pub fn rigor_score(
    gpa: f64,
    ap_courses: f64,
    ib_score: f64,
    sat_ebrw: Option<f64>,
    sat_math: Option<f64>,
) -> f64 {
    let gpa_norm = (gpa / GPA_SCALE).clamp(0.0, 1.0);

    let sat_total = sat_ebrw.unwrap_or(0.0) + sat_math.unwrap_or(0.0);
    let sat_norm = (sat_total / SAT_SCALE).clamp(0.0, 1.0);

    let ap_bump = (ap_courses.max(0.0) * AP_BUMP_PER_COURSE).min(AP_BUMP_CAP);
    let ib_bump = if ib_score >= IB_THRESHOLD { IB_BUMP } else { 0.0 };

    (GPA_WEIGHT * gpa_norm + SAT_WEIGHT * sat_norm + ap_bump + ib_bump).clamp(0.0, 1.0)
}

/// Full-profile rigor used by the competitiveness scorer.
pub fn profile_rigor(student: &StudentProfile) -> f64 {
    rigor_score(
        student.gpa(),
        student.ap_courses(),
        student.ib_score(),
        student.sat_ebrw,
        student.sat_math,
    )
}

/// Coursework-only rigor (no SAT), on a 0–100 scale.
///
/// This is the figure shown on the profile page and used as the search "user score".
pub fn coursework_rigor_percent(student: &StudentProfile) -> f64 {
    rigor_score(student.gpa(), student.ap_courses(), student.ib_score(), None, None) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_perfect_gpa_and_sat() {
        let score = rigor_score(4.0, 0.0, 0.0, Some(800.0), Some(800.0));
        assert!(approx(score, 0.90), "score was {score}");
    }

    #[test]
    fn test_ap_bump_is_capped() {
        let score = rigor_score(2.0, 10.0, 0.0, None, None);
        assert!(approx(score, 0.475), "score was {score}");
        assert!(approx(
            rigor_score(2.0, 40.0, 0.0, None, None),
            rigor_score(2.0, 5.0, 0.0, None, None)
        ));
    }

    #[test]
    fn test_ib_bump_threshold() {
        let below = rigor_score(3.0, 0.0, 37.0, None, None);
        let at = rigor_score(3.0, 0.0, 38.0, None, None);
        assert!(approx(at - below, 0.05));
    }

    #[test]
    fn test_clipped_to_one() {
        let score = rigor_score(4.0, 20.0, 45.0, Some(800.0), Some(800.0));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_bounded_over_input_grid() {
        for gpa_tenths in 0..=40 {
            for ap in [0.0, 1.0, 3.0, 5.0, 12.0] {
                for ib in [0.0, 24.0, 38.0, 45.0] {
                    let gpa = gpa_tenths as f64 / 10.0;
                    let score = rigor_score(gpa, ap, ib, Some(800.0), Some(650.0));
                    assert!((0.0..=1.0).contains(&score), "{gpa_tenths} {ap} {ib} → {score}");
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_gpa_is_clipped() {
        assert!(approx(rigor_score(5.0, 0.0, 0.0, None, None), 0.75));
        assert_eq!(rigor_score(-1.0, 0.0, 0.0, None, None), 0.0);
    }

    #[test]
    fn test_negative_ap_count_adds_nothing() {
        assert_eq!(
            rigor_score(3.0, -4.0, 0.0, None, None),
            rigor_score(3.0, 0.0, 0.0, None, None)
        );
    }

    #[test]
    fn test_coursework_rigor_ignores_sat() {
        let student = StudentProfile {
            gpa: Some(4.0),
            sat_ebrw: Some(800.0),
            sat_math: Some(800.0),
            ..Default::default()
        };
        assert!(approx(coursework_rigor_percent(&student), 75.0));
        assert!(approx(profile_rigor(&student), 0.90));
    }
}
