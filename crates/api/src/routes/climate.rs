//! Climate Routes

use axum::{
    extract::{Path, State},
    Json,
};
use datasets::{BoxStats, ClimateVariable, DistrictValue, MonthYearCell, SummaryStatistics};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{ApiError, SharedState};

/// Map animation frames for one variable
#[derive(Debug, Serialize)]
pub struct FramesResponse {
    pub variable: ClimateVariable,
    pub unit: &'static str,
    /// District values keyed by "YYYY-MM"
    pub frames: BTreeMap<String, Vec<DistrictValue>>,
}

/// Monthly views of one variable
#[derive(Debug, Serialize)]
pub struct MonthlyResponse {
    pub variable: ClimateVariable,
    pub unit: &'static str,
    pub summary: SummaryStatistics,
    /// Mean per month and year
    pub heatmap: Vec<MonthYearCell>,
    /// Spread per calendar month
    pub distribution: Vec<BoxStats>,
}

/// Year-month frames of a variable across districts
pub async fn get_frames(
    State(state): State<SharedState>,
    Path(variable): Path<String>,
) -> Result<Json<FramesResponse>, ApiError> {
    let variable: ClimateVariable = variable.parse()?;
    let state = state.read().await;

    Ok(Json(FramesResponse {
        variable,
        unit: variable.unit(),
        frames: state.climate()?.frames(variable),
    }))
}

/// Summary, heatmap and monthly spread of a variable
pub async fn get_monthly(
    State(state): State<SharedState>,
    Path(variable): Path<String>,
) -> Result<Json<MonthlyResponse>, ApiError> {
    let variable: ClimateVariable = variable.parse()?;
    let state = state.read().await;
    let climate = state.climate()?;

    Ok(Json(MonthlyResponse {
        variable,
        unit: variable.unit(),
        summary: climate.summary(variable),
        heatmap: climate.month_year_means(variable),
        distribution: climate.monthly_distribution(variable),
    }))
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::tests::{get_json, test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_frames() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));
        let (status, body) = get_json(app, "/api/v1/climate/max-temperature/frames").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["unit"], "°C");
        assert_eq!(body["frames"]["2012-03"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_monthly() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));
        let (status, body) = get_json(app, "/api/v1/climate/humidity/monthly").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["variable"], "humidity");
        assert_eq!(body["summary"]["count"], 3);
        assert_eq!(body["heatmap"][0]["value"], 37.5);
        assert_eq!(body["distribution"][1]["month"], 7);
    }

    #[tokio::test]
    async fn test_unknown_variable() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));
        let (status, body) = get_json(app, "/api/v1/climate/snowfall/monthly").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Unknown climate variable: snowfall");
    }
}
