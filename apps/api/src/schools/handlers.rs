use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::school::SchoolRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SchoolListResponse {
    pub source: &'static str,
    pub total: usize,
    pub schools: Vec<SchoolRecord>,
}

/// GET /api/schools
pub async fn handle_list_schools(
    State(state): State<AppState>,
) -> Result<Json<SchoolListResponse>, AppError> {
    let schools = state.catalog.schools().await?;
    Ok(Json(SchoolListResponse {
        source: state.catalog.source_name(),
        total: schools.len(),
        schools: schools.to_vec(),
    }))
}

/// GET /api/schools/:id
pub async fn handle_get_school(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<SchoolRecord>, AppError> {
    let schools = state.catalog.schools().await?;
    schools
        .iter()
        .find(|school| school.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("School {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    #[tokio::test]
    async fn test_lists_seed_schools() {
        let Json(response) = handle_list_schools(State(test_state())).await.unwrap();
        assert_eq!(response.source, "seed");
        assert_eq!(response.total, 6);
        assert_eq!(response.schools[2].name, "MIT");
    }

    #[tokio::test]
    async fn test_get_school_by_id() {
        let Json(school) = handle_get_school(State(test_state()), Path(4)).await.unwrap();
        assert_eq!(school.name, "UC Berkeley");
    }

    #[tokio::test]
    async fn test_unknown_school_is_not_found() {
        let err = handle_get_school(State(test_state()), Path(404)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
