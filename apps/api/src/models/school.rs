use serde::{Deserialize, Serialize};

/// A school normalized at ingestion.
///
/// Scorecard supplies the identity, midpoints, cost and primary admission rate.
/// IPEDS admissions data supplies the 25th/75th percentile bands and `ADM_RATE`.
/// Either side may be missing any field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchoolRecord {
    pub id: u64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub url: Option<String>,

    pub admission_rate: Option<f64>,
    pub admission_rate_alt: Option<f64>,

    pub sat_math_25: Option<f64>,
    pub sat_math_75: Option<f64>,
    pub sat_verbal_25: Option<f64>,
    pub sat_verbal_75: Option<f64>,
    pub act_25: Option<f64>,
    pub act_75: Option<f64>,

    pub sat_math_mid: Option<f64>,
    pub sat_reading_mid: Option<f64>,
    pub act_mid: Option<f64>,

    pub student_size: Option<u64>,
    pub tuition_in_state: Option<f64>,
    pub tuition_out_of_state: Option<f64>,
}

impl SchoolRecord {
    /// Combined SAT 25th/75th band, present only when all four section bounds are.
    pub fn precise_sat_band(&self) -> Option<(f64, f64)> {
        Some((
            self.sat_math_25? + self.sat_verbal_25?,
            self.sat_math_75? + self.sat_verbal_75?,
        ))
    }

    /// Sum of the math and reading midpoints.
    pub fn midpoint_sat_total(&self) -> Option<f64> {
        Some(self.sat_math_mid? + self.sat_reading_mid?)
    }

    pub fn act_band(&self) -> Option<(f64, f64)> {
        Some((self.act_25?, self.act_75?))
    }

    /// Overall admission rate, preferring Scorecard over IPEDS.
    pub fn overall_admission_rate(&self) -> Option<f64> {
        self.admission_rate
            .filter(|rate| !rate.is_nan())
            .or(self.admission_rate_alt.filter(|rate| !rate.is_nan()))
    }
}
