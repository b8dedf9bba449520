use serde::{Deserialize, Serialize};

const LIKELY_THRESHOLD: f64 = 0.75;
const TARGET_THRESHOLD: f64 = 0.45;

/// Recommendation category for a competitiveness score.
///
/// Variant order is the order buckets are listed in recommendations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Likely,
    Reach,
    Target,
    Unknown,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [Bucket::Likely, Bucket::Reach, Bucket::Target, Bucket::Unknown];

    /// Lower bounds are inclusive: 0.75 is Likely, 0.45 is Target.
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            None => Bucket::Unknown,
            Some(s) if s.is_nan() => Bucket::Unknown,
            Some(s) if s >= LIKELY_THRESHOLD => Bucket::Likely,
            Some(s) if s >= TARGET_THRESHOLD => Bucket::Target,
            Some(_) => Bucket::Reach,
        }
    }

    /// Lowercase label used by the search `category` field.
    pub fn category(&self) -> &'static str {
        match self {
            Bucket::Likely => "likely",
            Bucket::Reach => "reach",
            Bucket::Target => "target",
            Bucket::Unknown => "unknown",
        }
    }
}
