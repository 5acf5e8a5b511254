//! District Routes

use axum::{
    extract::{Path, State},
    Json,
};
use datasets::DistrictClimateSummary;
use input_validator::Location;
use serde::Serialize;

use crate::{ApiError, SharedState};

/// Response for districts endpoint
#[derive(Debug, Serialize)]
pub struct DistrictsResponse {
    pub data: Vec<String>,
    pub count: usize,
}

/// Districts the models know, or those in the fire data when no models
/// are loaded
pub async fn list_districts(
    State(state): State<SharedState>,
) -> Result<Json<DistrictsResponse>, ApiError> {
    let state = state.read().await;

    let data = match &state.engine {
        Some(engine) if !engine.districts().is_empty() => engine.districts().to_vec(),
        _ => state.fire()?.districts(),
    };

    Ok(Json(DistrictsResponse {
        count: data.len(),
        data,
    }))
}

/// Coordinates of a district
pub async fn get_location(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<Location>, ApiError> {
    let state = state.read().await;
    state
        .fire()?
        .locate(&name)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Coordinates not found for district '{}'", name)))
}

/// Climate means and total fires of a district
pub async fn get_summary(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<DistrictClimateSummary>, ApiError> {
    let state = state.read().await;
    state
        .fire()?
        .district_climate_summary(&name)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown district '{}'", name)))
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::tests::{get_json, test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_list_districts() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(create_router(test_state(dir.path())), "/api/v1/districts").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0], "dang");
    }

    #[tokio::test]
    async fn test_location_found_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));
        let (status, body) = get_json(app, "/api/v1/districts/Kailali/location").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["district"], "kailali");
        assert_eq!(body["lat"], 28.69);
    }

    #[tokio::test]
    async fn test_location_unknown_district() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));
        let (status, body) = get_json(app, "/api/v1/districts/atlantis/location").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Coordinates not found for district 'atlantis'");
    }

    #[tokio::test]
    async fn test_summary() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));
        let (status, body) = get_json(app, "/api/v1/districts/kailali/summary").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fire_count"], 100.0);
        assert_eq!(body["avg_temp"], 24.5);
    }
}
