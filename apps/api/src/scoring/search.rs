//! School search: name filter plus competitiveness annotations for the universities page.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::school::SchoolRecord;
use crate::models::student::StudentProfile;
use crate::scoring::competitiveness::{score_school, CompetitivenessWeights};
use crate::scoring::rigor::coursework_rigor_percent;

pub const MAX_SEARCH_RESULTS: usize = 10;

/// Placeholder ranking multiplier until a real ranking source exists.
const RANKING_MULTIPLIER: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: u64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub acceptance_rate: Option<f64>,
    pub ranking: u64,
    pub required_score: u32,
    pub comparison_ratio: f64,
    pub category: String,
    pub competitiveness_score: f64,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Profile score (0–100) a student should reach for a school with this competitiveness.
pub fn required_score(score: Option<f64>) -> u32 {
    match score.filter(|s| !s.is_nan()) {
        Some(s) if s >= 0.75 => 95,
        Some(s) if s >= 0.45 => 80,
        Some(s) if s > 0.0 => 65,
        _ => 90,
    }
}

/// Case-insensitive substring match on school name. An empty query matches all.
pub fn matches_query(school: &SchoolRecord, query: &str) -> bool {
    school.name.to_lowercase().contains(&query.to_lowercase())
}

/// Filters `schools` by name and annotates each match, best competitiveness first.
pub fn search_schools(
    schools: &[SchoolRecord],
    query: &str,
    student: &StudentProfile,
    weights: &CompetitivenessWeights,
) -> Vec<SearchResult> {
    let user_score = coursework_rigor_percent(student);

    let mut results: Vec<SearchResult> = schools
        .iter()
        .filter(|school| matches_query(school, query))
        .map(|school| {
            let scored = score_school(student, school, weights);
            let required = required_score(scored.score);
            SearchResult {
                id: school.id,
                name: school.name.clone(),
                city: school.city.clone(),
                state: school.state.clone(),
                acceptance_rate: school
                    .overall_admission_rate()
                    .map(|rate| round_to(rate * 100.0, 1)),
                ranking: school.id.saturating_mul(RANKING_MULTIPLIER),
                required_score: required,
                comparison_ratio: round_to(user_score / f64::from(required), 2),
                category: scored.bucket.category().to_string(),
                competitiveness_score: scored
                    .score
                    .map(|s| round_to(s * 100.0, 1))
                    .unwrap_or(0.0),
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.competitiveness_score
            .partial_cmp(&a.competitiveness_score)
            .unwrap_or(Ordering::Equal)
    });
    results.truncate(MAX_SEARCH_RESULTS);
    results
}
