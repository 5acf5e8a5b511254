//! Historical Fire Routes

use axum::{
    extract::{Path, Query, State},
    Json,
};
use datasets::{
    AnnualCount, CorrelationRow, DistrictFireRisk, DistrictTotal, MonthlyAverage, MonthlyCount,
    ProbabilityGrid, TrendPoint, TrendView,
};
use input_validator::normalize_district;
use serde::{Deserialize, Serialize};

use crate::{ApiError, SharedState};

const MAX_GRID_BINS: usize = 20;

/// List response wrapper
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub count: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Query parameters for top districts endpoint
#[derive(Debug, Deserialize)]
pub struct TopQuery {
    #[serde(default = "default_top_limit")]
    pub limit: usize,
}

fn default_top_limit() -> usize {
    15
}

/// Query parameters for district trend endpoint
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    #[serde(default = "default_view")]
    pub view: TrendView,
}

fn default_view() -> TrendView {
    TrendView::Monthly
}

/// Query parameters for probability grid endpoint
#[derive(Debug, Deserialize)]
pub struct GridQuery {
    #[serde(default = "default_bins")]
    pub bins: usize,
}

fn default_bins() -> usize {
    5
}

/// Fire risk per district for the map
pub async fn district_risk(
    State(state): State<SharedState>,
) -> Result<Json<ListResponse<DistrictFireRisk>>, ApiError> {
    let state = state.read().await;
    Ok(Json(state.fire()?.district_fire_risk().into()))
}

/// Most fire-prone districts
pub async fn top_districts(
    State(state): State<SharedState>,
    Query(params): Query<TopQuery>,
) -> Result<Json<ListResponse<DistrictTotal>>, ApiError> {
    let state = state.read().await;
    Ok(Json(state.fire()?.top_fire_districts(params.limit).into()))
}

/// Fires per year
pub async fn annual_counts(
    State(state): State<SharedState>,
) -> Result<Json<ListResponse<AnnualCount>>, ApiError> {
    let state = state.read().await;
    Ok(Json(state.fire()?.annual_fire_counts().into()))
}

/// Mean fires per calendar month
pub async fn monthly_averages(
    State(state): State<SharedState>,
) -> Result<Json<ListResponse<MonthlyAverage>>, ApiError> {
    let state = state.read().await;
    Ok(Json(state.fire()?.monthly_average_fire().into()))
}

/// Fires per year-month
pub async fn monthly_series(
    State(state): State<SharedState>,
) -> Result<Json<ListResponse<MonthlyCount>>, ApiError> {
    let state = state.read().await;
    Ok(Json(state.fire()?.monthly_fire_series().into()))
}

/// Monthly or yearly fire trend of one district
pub async fn district_trend(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Query(params): Query<TrendQuery>,
) -> Result<Json<ListResponse<TrendPoint>>, ApiError> {
    let state = state.read().await;
    let fire = state.fire()?;

    let district = normalize_district(&name);
    if !fire.districts().contains(&district) {
        return Err(ApiError::NotFound(format!("Unknown district '{}'", name)));
    }
    Ok(Json(fire.district_trend(&district, params.view).into()))
}

/// Climate variables against fire count and confidence
pub async fn correlations(
    State(state): State<SharedState>,
) -> Result<Json<ListResponse<CorrelationRow>>, ApiError> {
    let state = state.read().await;
    Ok(Json(state.fire()?.climate_fire_correlations().into()))
}

/// Fire probability over temperature and humidity bins
pub async fn probability_grid(
    State(state): State<SharedState>,
    Query(params): Query<GridQuery>,
) -> Result<Json<ProbabilityGrid>, ApiError> {
    if params.bins == 0 || params.bins > MAX_GRID_BINS {
        return Err(ApiError::BadRequest(format!(
            "bins must be between 1 and {}",
            MAX_GRID_BINS
        )));
    }

    let state = state.read().await;
    state
        .fire()?
        .fire_probability_grid(params.bins)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No rows with both temperature and humidity".to_string()))
}
