//! Axum route handlers for the scoring API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::student::{StudentProfile, StudentSummary};
use crate::scoring::bucket::Bucket;
use crate::scoring::competitiveness::score_school;
use crate::scoring::recommend::{recommend, RecommendationSummary, RecommendedSchool};
use crate::scoring::rigor::coursework_rigor_percent;
use crate::scoring::search::{search_schools, SearchResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileScoreResponse {
    pub rigor_score: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationParams {
    pub max_per_bucket: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendedSchool>,
    pub summary: RecommendationSummary,
    pub student_profile: StudentSummary,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub query: String,
    pub student_data: StudentProfile,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreSchoolRequest {
    pub school_id: u64,
    #[serde(default)]
    pub student_data: StudentProfile,
}

#[derive(Debug, Serialize)]
pub struct ScoreSchoolResponse {
    pub school_id: u64,
    pub name: String,
    pub score: Option<f64>,
    pub bucket: Bucket,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/calculate-profile-score
///
/// Coursework rigor (GPA, AP, IB) on a 0–100 scale, one decimal.
pub async fn handle_profile_score(
    Json(profile): Json<StudentProfile>,
) -> Json<ProfileScoreResponse> {
    let rigor = coursework_rigor_percent(&profile);
    Json(ProfileScoreResponse {
        rigor_score: (rigor * 10.0).round() / 10.0,
    })
}

/// POST /api/get-recommendations
///
/// Buckets every school into Likely/Reach/Target/Unknown for the submitted profile.
/// `?max_per_bucket=N` overrides the configured cap.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
    Json(profile): Json<StudentProfile>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let max_per_bucket = params.max_per_bucket.unwrap_or(state.config.max_per_bucket);
    if max_per_bucket == 0 {
        return Err(AppError::Validation(
            "max_per_bucket must be at least 1".to_string(),
        ));
    }

    let schools = state.catalog.schools().await?;
    let recs = recommend(&schools, &profile, max_per_bucket, &state.weights);
    debug!(
        "Recommended {} of {} schools (cap {max_per_bucket})",
        recs.summary.total_recommendations,
        schools.len()
    );

    Ok(Json(RecommendationResponse {
        recommendations: recs.recommendations,
        summary: recs.summary,
        student_profile: profile.summary(),
    }))
}

/// POST /api/search-schools
pub async fn handle_search_schools(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let schools = state.catalog.schools().await?;
    let results = search_schools(
        &schools,
        &request.query,
        &request.student_data,
        &state.weights,
    );
    Ok(Json(SearchResponse { results }))
}

/// POST /api/score-school
///
/// Competitiveness score and bucket for one school.
pub async fn handle_score_school(
    State(state): State<AppState>,
    Json(request): Json<ScoreSchoolRequest>,
) -> Result<Json<ScoreSchoolResponse>, AppError> {
    let schools = state.catalog.schools().await?;
    let school = schools
        .iter()
        .find(|school| school.id == request.school_id)
        .ok_or_else(|| AppError::NotFound(format!("School {} not found", request.school_id)))?;

    let scored = score_school(&request.student_data, school, &state.weights);
    Ok(Json(ScoreSchoolResponse {
        school_id: school.id,
        name: school.name.clone(),
        score: scored.score,
        bucket: scored.bucket,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    fn profile() -> StudentProfile {
        StudentProfile {
            gpa: Some(3.9),
            sat_ebrw: Some(730.0),
            sat_math: Some(770.0),
            ap_courses: Some(6.0),
            intended_major: Some("Economics".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_profile_score_rounds_to_one_decimal() {
        let Json(response) = handle_profile_score(Json(profile())).await;
        // (0.75 * 0.975 + 0.10) * 100 = 83.125
        assert_eq!(response.rigor_score, 83.1);
    }

    #[tokio::test]
    async fn test_profile_score_empty_body_is_zero() {
        let Json(response) = handle_profile_score(Json(StudentProfile::default())).await;
        assert_eq!(response.rigor_score, 0.0);
    }

    #[tokio::test]
    async fn test_recommendations_use_configured_cap() {
        let mut state = test_state();
        state.config.max_per_bucket = 1;

        let Json(response) = handle_recommendations(
            State(state),
            Query(RecommendationParams::default()),
            Json(profile()),
        )
        .await
        .unwrap();

        assert_eq!(response.summary.total_recommendations, 2);
        assert_eq!(response.summary.likely_schools, 1);
        assert_eq!(response.summary.target_schools, 1);
        assert_eq!(response.student_profile.sat_total, 1500.0);
        assert_eq!(response.student_profile.major, "Economics");
    }

    #[tokio::test]
    async fn test_recommendations_query_overrides_cap() {
        let Json(response) = handle_recommendations(
            State(test_state()),
            Query(RecommendationParams {
                max_per_bucket: Some(15),
            }),
            Json(profile()),
        )
        .await
        .unwrap();

        assert_eq!(response.summary.total_recommendations, 6);
    }

    #[tokio::test]
    async fn test_recommendations_reject_zero_cap() {
        let err = handle_recommendations(
            State(test_state()),
            Query(RecommendationParams {
                max_per_bucket: Some(0),
            }),
            Json(profile()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_search_filters_by_name() {
        let request = SearchRequest {
            query: "Stanford".to_string(),
            student_data: profile(),
        };
        let Json(response) = handle_search_schools(State(test_state()), Json(request))
            .await
            .unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].name, "Stanford University");
        assert_eq!(response.results[0].category, "target");
    }

    #[tokio::test]
    async fn test_search_query_is_not_trimmed() {
        let request = SearchRequest {
            query: " Stanford ".to_string(),
            student_data: profile(),
        };
        let Json(response) = handle_search_schools(State(test_state()), Json(request))
            .await
            .unwrap();

        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn test_score_school() {
        let request = ScoreSchoolRequest {
            school_id: 6,
            student_data: profile(),
        };
        let Json(response) = handle_score_school(State(test_state()), Json(request))
            .await
            .unwrap();

        assert_eq!(response.name, "Penn State");
        assert_eq!(response.bucket, Bucket::Likely);
        assert!(response.score.unwrap() > 0.9);
    }

    #[tokio::test]
    async fn test_score_unknown_school_is_not_found() {
        let request = ScoreSchoolRequest {
            school_id: 77,
            student_data: profile(),
        };
        let err = handle_score_school(State(test_state()), Json(request))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
