pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::schools::handlers as schools;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Scoring API
        .route(
            "/api/calculate-profile-score",
            post(scoring::handle_profile_score),
        )
        .route(
            "/api/get-recommendations",
            post(scoring::handle_recommendations),
        )
        .route("/api/search-schools", post(scoring::handle_search_schools))
        .route("/api/score-school", post(scoring::handle_score_school))
        // School data
        .route("/api/schools", get(schools::handle_list_schools))
        .route("/api/schools/:id", get(schools::handle_get_school))
        .with_state(state)
}
