//! Feedback Routes

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ApiError, SharedState};

/// Feedback form submission; absent fields count as blank
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeedbackRequest {
    pub name: String,
    pub email: String,
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Append a feedback row
pub async fn submit_feedback(
    State(state): State<SharedState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiError> {
    let state = state.read().await;
    let entry = state
        .feedback
        .submit(&request.name, &request.email, &request.feedback)?;

    metrics::counter!("feedback_total").increment(1);
    info!("Feedback recorded at {}", entry.timestamp);

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            status: "recorded",
            timestamp: entry.timestamp,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::tests::{post_json, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_feedback_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));

        let (status, body) = post_json(
            app,
            "/api/v1/feedback",
            json!({ "name": "Asha", "email": "asha@example.org", "feedback": "Useful map" }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "recorded");

        let content = std::fs::read_to_string(dir.path().join("feedback.csv")).unwrap();
        assert!(content.starts_with("Timestamp,Name,Email,Feedback\n"));
        assert!(content.contains("Asha,asha@example.org,Useful map"));
    }

    #[tokio::test]
    async fn test_feedback_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path()));

        let (status, body) = post_json(
            app,
            "/api/v1/feedback",
            json!({ "name": "Asha", "feedback": "No email given" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required field: email");
        assert!(!dir.path().join("feedback.csv").exists());
    }
}
