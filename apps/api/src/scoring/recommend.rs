//! Recommendation pipeline: score every school, then group, rank and truncate per bucket.
//!
//! Pure: reads the school slice, never mutates it, no I/O.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::school::SchoolRecord;
use crate::models::student::StudentProfile;
use crate::scoring::bucket::Bucket;
use crate::scoring::competitiveness::{score_school, CompetitivenessWeights};

/// A school row annotated with its score and bucket, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedSchool {
    #[serde(flatten)]
    pub school: SchoolRecord,
    pub score: Option<f64>,
    pub bucket: Bucket,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationSummary {
    pub total_recommendations: usize,
    pub reach_schools: usize,
    pub target_schools: usize,
    pub likely_schools: usize,
    pub unknown_schools: usize,
}

impl RecommendationSummary {
    pub fn from_rows(rows: &[RecommendedSchool]) -> Self {
        let count = |bucket: Bucket| rows.iter().filter(|r| r.bucket == bucket).count();
        Self {
            total_recommendations: rows.len(),
            reach_schools: count(Bucket::Reach),
            target_schools: count(Bucket::Target),
            likely_schools: count(Bucket::Likely),
            unknown_schools: count(Bucket::Unknown),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    pub recommendations: Vec<RecommendedSchool>,
    pub summary: RecommendationSummary,
}

/// Descending by score; undefined scores sort after defined ones.
fn by_score_desc(a: &RecommendedSchool, b: &RecommendedSchool) -> Ordering {
    let key = |r: &RecommendedSchool| r.score.filter(|s| !s.is_nan());
    match (key(a), key(b)) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Buckets every school for `student`, keeping at most `max_per_bucket` per bucket.
///
/// Buckets are emitted Likely, Reach, Target, Unknown. Within a bucket rows are
/// ranked by score; the sort is stable so ties keep input order.
pub fn recommend(
    schools: &[SchoolRecord],
    student: &StudentProfile,
    max_per_bucket: usize,
    weights: &CompetitivenessWeights,
) -> Recommendations {
    let scored: Vec<RecommendedSchool> = schools
        .iter()
        .map(|school| {
            let scored = score_school(student, school, weights);
            RecommendedSchool {
                school: school.clone(),
                score: scored.score,
                bucket: scored.bucket,
            }
        })
        .collect();

    let mut recommendations = Vec::new();
    for bucket in Bucket::ALL {
        let mut rows: Vec<RecommendedSchool> =
            scored.iter().filter(|r| r.bucket == bucket).cloned().collect();
        rows.sort_by(by_score_desc);
        rows.truncate(max_per_bucket);
        recommendations.extend(rows);
    }

    let summary = RecommendationSummary::from_rows(&recommendations);
    Recommendations {
        recommendations,
        summary,
    }
}
