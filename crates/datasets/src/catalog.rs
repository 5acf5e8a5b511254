//! Dataset Catalog

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kind of dataset offered for browsing and download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Climate,
    Fire,
    ForestCoverage,
}

impl DatasetKind {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Climate => "climate",
            DatasetKind::Fire => "fire",
            DatasetKind::ForestCoverage => "forest_coverage",
        }
    }

    /// Parse from the `as_str` form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "climate" => Some(DatasetKind::Climate),
            "fire" => Some(DatasetKind::Fire),
            "forest_coverage" => Some(DatasetKind::ForestCoverage),
            _ => None,
        }
    }
}

/// A dataset and the files it ships as
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub kind: DatasetKind,
    pub title: String,
    pub description: String,
    /// Raw source files
    pub raw_paths: Vec<PathBuf>,
    /// Processed file, if the dataset has one
    pub filtered_path: Option<PathBuf>,
    /// Column descriptions for the raw files
    pub columns: Vec<(String, String)>,
}

/// First rows of a CSV file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablePreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

/// The datasets bundled with the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetCatalog {
    pub entries: Vec<DatasetEntry>,
}

fn columns(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl DatasetCatalog {
    /// Standard catalog rooted at a data directory
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let root = data_dir.as_ref();

        let entries = vec![
            DatasetEntry {
                kind: DatasetKind::Climate,
                title: "Climate Data".to_string(),
                description: "District-wise monthly climate data from the MERRA2 dataset (2012–2017)."
                    .to_string(),
                raw_paths: vec![root.join("raw/climate_data_nepal_district_wise_monthly.csv")],
                filtered_path: Some(root.join("processed/flitered_climate_data.csv")),
                columns: columns(&[
                    ("PRECTOT", "Precipitation (mm/day)"),
                    ("PS", "Surface Pressure (kPa)"),
                    ("QV2M", "Specific Humidity at 2m (g/kg)"),
                    ("RH2M", "Relative Humidity at 2m (%)"),
                    ("T2M", "Temperature at 2m (°C)"),
                    ("T2MWET", "Wet Bulb Temp at 2m (°C)"),
                    ("T2M_MAX/MIN/RANGE", "Max, Min, and Range of Temp at 2m (°C)"),
                    ("TS", "Earth Skin Temp (°C)"),
                    ("WS10M/WS50M", "Wind Speed at 10m/50m (m/s)"),
                ]),
            },
            DatasetEntry {
                kind: DatasetKind::Fire,
                title: "Fire Data".to_string(),
                description:
                    "MODIS satellite fire detection data from NASA LANCE FIRMS (2012–2017)."
                        .to_string(),
                raw_paths: vec![root.join("raw/modis/modis_2012_2017_all_districts.csv")],
                filtered_path: Some(root.join("processed/filtered_fire_data.csv")),
                columns: columns(&[
                    ("brightness", "Brightness temperature of the fire pixel (K)"),
                    ("confidence", "Detection confidence (0–100)"),
                    ("thermaldata", "Band 31 brightness temperature of the pixel (K)"),
                    ("frp", "Fire radiative power (MW)"),
                    ("daynight", "Detected during the day (D) or night (N)"),
                ]),
            },
            DatasetEntry {
                kind: DatasetKind::ForestCoverage,
                title: "Forest Coverage Data".to_string(),
                description: "Forest coverage data by district and province.".to_string(),
                raw_paths: vec![
                    root.join("raw/forest_coverage/forest-coverage-by-district.csv"),
                    root.join("raw/forest_coverage/forest-coverage-by-province.csv"),
                ],
                filtered_path: None,
                columns: Vec::new(),
            },
        ];

        Self { entries }
    }

    /// Look up an entry by kind
    pub fn get(&self, kind: DatasetKind) -> Option<&DatasetEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_paths() {
        let catalog = DatasetCatalog::new("data");
        let climate = catalog.get(DatasetKind::Climate).unwrap();
        assert_eq!(
            climate.filtered_path.as_deref(),
            Some(Path::new("data/processed/flitered_climate_data.csv"))
        );

        let coverage = catalog.get(DatasetKind::ForestCoverage).unwrap();
        assert_eq!(coverage.raw_paths.len(), 2);
        assert!(coverage.filtered_path.is_none());
    }

    #[test]
    fn test_kind_round_trip_names() {
        for kind in [DatasetKind::Climate, DatasetKind::Fire, DatasetKind::ForestCoverage] {
            assert_eq!(DatasetKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(DatasetKind::parse("ocean"), None);
    }
}
