//! Append-Only Feedback Log

use crate::ReportError;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Header row written once, when the log file is created
pub const FEEDBACK_HEADER: [&str; 4] = ["Timestamp", "Name", "Email", "Feedback"];

/// One submitted feedback row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Feedback")]
    pub feedback: String,
}

impl FeedbackEntry {
    /// Build an entry, requiring every field to be non-blank
    pub fn new(
        at: NaiveDateTime,
        name: &str,
        email: &str,
        feedback: &str,
    ) -> Result<Self, ReportError> {
        let required = |field: &'static str, value: &str| {
            if value.trim().is_empty() {
                Err(ReportError::MissingField(field))
            } else {
                Ok(value.to_string())
            }
        };

        Ok(Self {
            timestamp: at.format("%Y-%m-%d %H:%M:%S").to_string(),
            name: required("name", name)?,
            email: required("email", email)?,
            feedback: required("feedback", feedback)?,
        })
    }
}

/// Feedback CSV file, appended one row per submission
pub struct FeedbackStore {
    path: PathBuf,
    /// Serializes writers within this process
    write_lock: Mutex<()>,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("Feedback log at {}", path.display());
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record feedback stamped with the local time
    pub fn submit(&self, name: &str, email: &str, feedback: &str) -> Result<FeedbackEntry, ReportError> {
        let entry = FeedbackEntry::new(Local::now().naive_local(), name, email, feedback)?;
        self.append(&entry)?;
        Ok(entry)
    }

    /// Append an entry, writing the header first if the file is new
    pub fn append(&self, entry: &FeedbackEntry) -> Result<(), ReportError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| ReportError::Lock(e.to_string()))?;

        let io_err = |source| ReportError::Io {
            path: self.path.display().to_string(),
            source,
        };

        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(FEEDBACK_HEADER)?;
        }
        writer.serialize(entry)?;
        writer.flush().map_err(io_err)?;

        debug!("Feedback from {} appended", entry.email);
        Ok(())
    }

    /// All recorded entries, oldest first
    pub fn entries(&self) -> Result<Vec<FeedbackEntry>, ReportError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let entries = reader.deserialize().collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
