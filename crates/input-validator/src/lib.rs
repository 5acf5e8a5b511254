//! Prediction Input Validation
//!
//! Holds the climate/location input of a prediction request and checks it
//! against the ranges the prediction form accepts.

mod error;
mod inputs;
mod validator;

pub use error::ValidationError;
pub use inputs::{month_name, normalize_district, ClimateInputs, Location, MONTH_NAMES};
pub use validator::{ValidationConfig, ValidationResult, Validator};
