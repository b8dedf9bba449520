//! Fit: where a student's test scores fall within a school's admitted band.

use crate::models::school::SchoolRecord;
use crate::models::student::StudentProfile;

/// Half-width of the band synthesized around a Scorecard SAT midpoint.
const SAT_MIDPOINT_SPREAD: f64 = 100.0;
/// Half-width of the band synthesized around a Scorecard ACT midpoint.
const ACT_MIDPOINT_SPREAD: f64 = 2.0;

/// Which band produced a fit value. Exposed for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandSource {
    SatPercentile,
    SatMidpoint,
    ActPercentile,
    ActMidpoint,
}

/// Position of `x` within `[lo, hi]`, clipped to 0..=1.
///
/// 0 at or below the 25th percentile, 1 at or above the 75th. `None` when the band
/// is empty or inverted, or any input is NaN.
pub fn pct_position(x: f64, lo: f64, hi: f64) -> Option<f64> {
    if x.is_nan() || lo.is_nan() || hi.is_nan() || hi <= lo {
        return None;
    }
    Some(((x - lo) / (hi - lo)).clamp(0.0, 1.0))
}

/// Picks the first usable band for this student and school.
///
/// Order: IPEDS SAT 25/75, Scorecard SAT midpoint ±100, IPEDS ACT 25/75,
/// Scorecard ACT midpoint ±2. SAT bands need a reported SAT, ACT bands a nonzero ACT.
pub fn select_band(
    student: &StudentProfile,
    school: &SchoolRecord,
) -> Option<(BandSource, f64, f64, f64)> {
    if let Some(sat) = student.sat_total().filter(|s| *s > 0.0) {
        if let Some((lo, hi)) = school.precise_sat_band() {
            return Some((BandSource::SatPercentile, sat, lo, hi));
        }
        if let Some(mid) = school.midpoint_sat_total() {
            return Some((
                BandSource::SatMidpoint,
                sat,
                mid - SAT_MIDPOINT_SPREAD,
                mid + SAT_MIDPOINT_SPREAD,
            ));
        }
    }

    let act = student.act()?;
    if let Some((lo, hi)) = school.act_band() {
        return Some((BandSource::ActPercentile, act, lo, hi));
    }
    let mid = school.act_mid?;
    Some((
        BandSource::ActMidpoint,
        act,
        mid - ACT_MIDPOINT_SPREAD,
        mid + ACT_MIDPOINT_SPREAD,
    ))
}

/// Fit in 0..=1, or `None` when no band applies.
///
/// The first applicable band decides: a degenerate band yields `None` without
/// consulting the lower-priority sources.
pub fn compute_fit(student: &StudentProfile, school: &SchoolRecord) -> Option<f64> {
    let (_, x, lo, hi) = select_band(student, school)?;
    pct_position(x, lo, hi)
}
