//! Dataset Catalog Routes

use axum::{
    extract::{Path, Query, State},
    Json,
};
use datasets::{preview, DatasetEntry, DatasetError, DatasetKind, TablePreview};
use serde::Deserialize;
use tracing::debug;

use crate::{ApiError, SharedState};

const MAX_PREVIEW_ROWS: usize = 100;

/// Query parameters for preview endpoint
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Preview the raw file instead of the processed one
    #[serde(default)]
    pub raw: bool,
}

fn default_rows() -> usize {
    10
}

/// The bundled datasets
pub async fn list_datasets(State(state): State<SharedState>) -> Json<Vec<DatasetEntry>> {
    let state = state.read().await;
    Json(state.catalog.entries.clone())
}

/// First rows of a dataset's processed file, or its first raw file
pub async fn preview_dataset(
    State(state): State<SharedState>,
    Path(kind): Path<String>,
    Query(params): Query<PreviewQuery>,
) -> Result<Json<TablePreview>, ApiError> {
    let state = state.read().await;
    let entry = DatasetKind::parse(&kind)
        .and_then(|kind| state.catalog.get(kind))
        .ok_or_else(|| ApiError::NotFound(format!("Unknown dataset '{}'", kind)))?;

    let path = match (&entry.filtered_path, params.raw) {
        (Some(filtered), false) => filtered,
        _ => entry
            .raw_paths
            .first()
            .ok_or_else(|| ApiError::NotFound(format!("No files for dataset '{}'", kind)))?,
    };
    debug!("Previewing {}", path.display());

    match preview(path, params.rows.min(MAX_PREVIEW_ROWS)) {
        Ok(table) => Ok(Json(table)),
        Err(DatasetError::Io { path, .. }) => {
            Err(ApiError::NotFound(format!("Dataset file not found: {}", path)))
        }
        Err(e) => Err(e.into()),
    }
}
