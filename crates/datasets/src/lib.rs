//! Climate and Fire Datasets
//!
//! Loads the district-wise monthly climate CSV and the combined fire/climate
//! CSV, and answers the aggregate queries the dashboard charts are built on.

mod catalog;
mod climate;
mod fire;
mod loader;
mod records;
mod stats;

pub use catalog::{DatasetCatalog, DatasetEntry, DatasetKind, TablePreview};
pub use climate::{BoxStats, ClimateDataset, ClimateVariable, DistrictValue, MonthYearCell};
pub use fire::{
    AnnualCount, CorrelationRow, DistrictClimateSummary, DistrictFireRisk, DistrictTotal,
    FireDataset, MonthlyAverage, MonthlyCount, ProbabilityGrid, RiskLevel, TrendPoint, TrendView,
};
pub use loader::{load_climate, load_fire_climate, preview};
pub use records::{year_month, ClimateRecord, FireClimateRecord};
pub use stats::{pearson, quantile, SummaryStatistics};

use thiserror::Error;

/// Dataset errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("Unknown climate variable: {0}")]
    UnknownVariable(String),
}
