//! CSV Loading

use crate::catalog::TablePreview;
use crate::records::{ClimateRecord, FireClimateRecord};
use crate::DatasetError;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

fn open(path: &Path) -> Result<csv::Reader<File>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file))
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DatasetError> {
    let mut reader = open(path)?;
    let mut rows = Vec::new();

    for result in reader.deserialize() {
        let row: T = result.map_err(|source| DatasetError::Csv {
            path: path.display().to_string(),
            source,
        })?;
        rows.push(row);
    }

    info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load the filtered climate CSV
pub fn load_climate(path: impl AsRef<Path>) -> Result<Vec<ClimateRecord>, DatasetError> {
    load(path.as_ref())
}

/// Load the combined fire/climate CSV
pub fn load_fire_climate(path: impl AsRef<Path>) -> Result<Vec<FireClimateRecord>, DatasetError> {
    load(path.as_ref())
}

/// Header and the first `limit` rows of any CSV file, as strings
pub fn preview(path: impl AsRef<Path>, limit: usize) -> Result<TablePreview, DatasetError> {
    let path = path.as_ref();
    let csv_err = |source| DatasetError::Csv {
        path: path.display().to_string(),
        source,
    };

    let mut reader = open(path)?;
    let headers = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    let mut total_rows = 0;
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        if rows.len() < limit {
            rows.push(record.iter().map(str::to_string).collect());
        }
        total_rows += 1;
    }

    debug!("Previewed {} of {} rows from {}", rows.len(), total_rows, path.display());
    Ok(TablePreview {
        headers,
        rows,
        total_rows,
    })
}
