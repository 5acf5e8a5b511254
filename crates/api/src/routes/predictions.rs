//! Prediction Routes

use axum::{extract::State, Json};
use chrono::{Datelike, Local};
use input_validator::{normalize_district, ClimateInputs, Location};
use reporting::AssessmentReport;
use risk_scorer::{score, RiskAssessment};
use serde::{Deserialize, Serialize};
use tracing::info;
use weather::WeatherSource;

use crate::{ApiError, SharedState};

/// Prediction form submission
#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    pub district: String,
    /// Missing fields take the form defaults
    #[serde(default)]
    pub inputs: PredictionInputs,
    /// Replace the weather fields with current conditions first
    #[serde(default)]
    pub use_current_weather: bool,
    #[serde(default)]
    pub notes: String,
}

/// Form fields as submitted
#[derive(Debug, Default, Deserialize)]
pub struct PredictionInputs {
    /// Current month when omitted
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(flatten)]
    pub climate: ClimateInputs,
}

impl PredictionInputs {
    pub fn resolve(self) -> ClimateInputs {
        ClimateInputs {
            month: self.month.unwrap_or_else(|| Local::now().month()),
            ..self.climate
        }
    }
}

/// Downloadable report
#[derive(Debug, Serialize)]
pub struct ReportDownload {
    pub file_name: String,
    pub content: String,
}

/// Response for predictions endpoint
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub location: Location,
    /// Inputs the models were run on
    pub inputs: ClimateInputs,
    pub assessment: RiskAssessment,
    pub risk_color: &'static str,
    pub confidence_color: &'static str,
    pub latency_ms: f64,
    pub mock: bool,
    pub report: ReportDownload,
}

/// Validate, run the models, score and build the report
pub async fn create_prediction(
    State(state): State<SharedState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let state = state.read().await;
    let district = normalize_district(&request.district);

    let location = state.fire()?.locate(&district).ok_or_else(|| {
        ApiError::NotFound(format!("Coordinates not found for district '{}'", district))
    })?;
    let engine = state.engine()?;

    let inputs = request.inputs.resolve();
    let inputs = if request.use_current_weather {
        state.weather.current(&location).await.apply(inputs)
    } else {
        inputs
    };

    let validation = state.validator.validate_all(&inputs);
    if !validation.valid {
        let message = validation
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ApiError::BadRequest(message));
    }

    let result = engine.predict(&location, &inputs)?;
    let assessment = score(result.output.risk_value, result.output.fire_probability_percent);

    metrics::counter!("predictions_total").increment(1);
    metrics::histogram!("inference_latency_ms").record(result.latency_ms);
    info!(
        "Prediction for {}: risk {:.2} ({}), confidence {:.1}% ({})",
        location.district,
        assessment.risk_value,
        assessment.risk_category,
        assessment.adjusted_confidence,
        assessment.confidence_level
    );

    let report = AssessmentReport::new(
        Local::now().naive_local(),
        location.clone(),
        inputs.clone(),
        assessment,
        request.notes,
    )?;

    Ok(Json(PredictionResponse {
        location,
        inputs,
        risk_color: assessment.risk_category.color(),
        confidence_color: assessment.confidence_level.color(),
        assessment,
        latency_ms: result.latency_ms,
        mock: result.mock,
        report: ReportDownload {
            file_name: report.file_name(),
            content: report.to_csv(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::tests::{post_json, test_state};
    use axum::http::StatusCode;
    use chrono::{Datelike, Local};
    use serde_json::json;

    #[tokio::test]
    async fn test_prediction_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));

        let (status, body) = post_json(
            app,
            "/api/v1/predictions",
            json!({ "district": " Kailali ", "inputs": { "month": 4 }, "notes": "field check" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["location"]["district"], "kailali");
        assert_eq!(body["mock"], true);

        let risk = body["assessment"]["risk_value"].as_f64().unwrap();
        assert!((0.0..=40.0).contains(&risk));
        let confidence = body["assessment"]["adjusted_confidence"].as_f64().unwrap();
        let probability = body["assessment"]["fire_probability"].as_f64().unwrap();
        assert!(confidence <= probability + 1e-9);

        let file_name = body["report"]["file_name"].as_str().unwrap();
        assert!(file_name.starts_with("fire_risk_kailali_"));
        let content = body["report"]["content"].as_str().unwrap();
        assert!(content.contains("Month,April"));
        assert!(content.ends_with("Notes,field check\n"));
    }

    #[tokio::test]
    async fn test_prediction_with_current_weather() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));

        let (status, body) = post_json(
            app,
            "/api/v1/predictions",
            json!({ "district": "dang", "inputs": { "month": 6, "humidity_pct": 90.0 }, "use_current_weather": true }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["inputs"]["humidity_pct"], 45.0);
        assert_eq!(body["inputs"]["month"], 6);
    }

    #[tokio::test]
    async fn test_prediction_rejects_out_of_range_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));

        let (status, body) = post_json(
            app,
            "/api/v1/predictions",
            json!({ "district": "dang", "inputs": { "month": 13, "humidity_pct": 120.0 } }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("Month 13"));
        assert!(message.contains("humidity"));
    }

    #[tokio::test]
    async fn test_prediction_month_defaults_to_current() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));

        let (status, body) = post_json(
            app,
            "/api/v1/predictions",
            json!({ "district": "dang", "inputs": { "humidity_pct": 30.0 } }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["inputs"]["month"], Local::now().month());
        assert_eq!(body["inputs"]["humidity_pct"], 30.0);
    }

    #[tokio::test]
    async fn test_prediction_without_inputs_uses_current_month() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));

        let (status, body) = post_json(app, "/api/v1/predictions", json!({ "district": "kailali" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["inputs"]["month"], Local::now().month());
        assert_eq!(body["inputs"]["precipitation_mm"], 26.7);
    }

    #[tokio::test]
    async fn test_prediction_unknown_district() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));

        let (status, _) = post_json(app, "/api/v1/predictions", json!({ "district": "atlantis" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
