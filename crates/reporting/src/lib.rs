//! Reports and Feedback
//!
//! Renders a prediction as the downloadable key/value CSV record and keeps
//! the append-only feedback log.

mod feedback;
mod report;

pub use feedback::{FeedbackEntry, FeedbackStore, FEEDBACK_HEADER};
pub use report::AssessmentReport;

use thiserror::Error;

/// Reporting errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Lock error: {0}")]
    Lock(String),
}
