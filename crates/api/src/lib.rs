//! Forest Fire Risk API Server
//!
//! REST API backing the Nepal forest fire dashboard: historical fire and
//! climate views, model predictions with downloadable reports, and the
//! feedback form.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use datasets::{ClimateDataset, DatasetCatalog, FireDataset};
use inference_engine::InferenceEngine;
use input_validator::{ValidationConfig, Validator};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use reporting::FeedbackStore;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use weather::StubWeatherSource;

pub mod config;
mod error;
pub mod rate_limit;
mod routes;

pub use config::Settings;
pub use error::ApiError;

use rate_limit::{create_governor_config, FeedbackGovernorConfig};

/// State handle passed to every handler
pub type SharedState = Arc<RwLock<AppState>>;

/// Application state shared across handlers
pub struct AppState {
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
    /// Combined fire/climate rows, if they loaded
    pub fire: Option<FireDataset>,
    /// Climate rows, if they loaded
    pub climate: Option<ClimateDataset>,
    /// Risk and fire models, if they loaded
    pub engine: Option<InferenceEngine>,
    pub validator: Validator,
    pub feedback: FeedbackStore,
    pub weather: StubWeatherSource,
    pub catalog: DatasetCatalog,
    /// Prometheus render handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state with no datasets or models loaded
    pub fn new(catalog: DatasetCatalog, feedback: FeedbackStore, weather: StubWeatherSource) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
            fire: None,
            climate: None,
            engine: None,
            validator: Validator::new(ValidationConfig::default()),
            feedback,
            weather,
            catalog,
            metrics: None,
        }
    }

    /// Load datasets and models named in the settings.
    ///
    /// Anything that fails to load is logged and left out; the routes that
    /// need it answer 503.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut state = Self::new(
            DatasetCatalog::new(&settings.data.dir),
            FeedbackStore::new(&settings.data.feedback_csv),
            StubWeatherSource::new(settings.weather.latency()),
        );

        match FireDataset::load(&settings.data.combined_csv) {
            Ok(dataset) => state.fire = Some(dataset),
            Err(e) => warn!("Fire dataset unavailable: {}", e),
        }
        match ClimateDataset::load(&settings.data.climate_csv) {
            Ok(dataset) => state.climate = Some(dataset),
            Err(e) => warn!("Climate dataset unavailable: {}", e),
        }

        state.engine = if settings.models.mock {
            let districts = state.fire.as_ref().map(FireDataset::districts).unwrap_or_default();
            Some(InferenceEngine::mock(districts))
        } else {
            match InferenceEngine::load(&settings.models.dir) {
                Ok(engine) => Some(engine),
                Err(e) => {
                    warn!("Models unavailable, predictions disabled: {}", e);
                    None
                }
            }
        };

        state
    }

    pub fn with_fire_dataset(mut self, dataset: FireDataset) -> Self {
        self.fire = Some(dataset);
        self
    }

    pub fn with_climate_dataset(mut self, dataset: ClimateDataset) -> Self {
        self.climate = Some(dataset);
        self
    }

    pub fn with_engine(mut self, engine: InferenceEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub(crate) fn fire(&self) -> Result<&FireDataset, ApiError> {
        self.fire.as_ref().ok_or(ApiError::Unavailable("Fire dataset"))
    }

    pub(crate) fn climate(&self) -> Result<&ClimateDataset, ApiError> {
        self.climate.as_ref().ok_or(ApiError::Unavailable("Climate dataset"))
    }

    pub(crate) fn engine(&self) -> Result<&InferenceEngine, ApiError> {
        self.engine.as_ref().ok_or(ApiError::Unavailable("Inference models"))
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: ComponentStatus,
}

/// Component status
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub fire_data: ComponentHealth,
    pub climate_data: ComponentHealth,
    pub inference: ComponentHealth,
}

/// Individual component health
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    /// Rows loaded, or districts known to the models
    pub size: Option<usize>,
}

impl ComponentHealth {
    fn from_size(size: Option<usize>) -> Self {
        Self {
            status: if size.is_some() { "ok" } else { "unavailable" }.to_string(),
            size,
        }
    }
}

/// Create the application router without rate limiting
pub fn create_router(state: SharedState) -> Router {
    build_router(state, None)
}

fn build_router(state: SharedState, feedback_limit: Option<Arc<FeedbackGovernorConfig>>) -> Router {
    let mut feedback: Router<SharedState> = Router::new().route(
        "/api/v1/feedback",
        post(routes::feedback::submit_feedback),
    );
    if let Some(config) = feedback_limit {
        feedback = feedback.layer(GovernorLayer { config });
    }

    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/districts", get(routes::districts::list_districts))
        .route("/api/v1/districts/:name/location", get(routes::districts::get_location))
        .route("/api/v1/districts/:name/summary", get(routes::districts::get_summary))
        .route("/api/v1/predictions", post(routes::predictions::create_prediction))
        .route("/api/v1/fire/districts", get(routes::fire::district_risk))
        .route("/api/v1/fire/top", get(routes::fire::top_districts))
        .route("/api/v1/fire/annual", get(routes::fire::annual_counts))
        .route("/api/v1/fire/monthly", get(routes::fire::monthly_averages))
        .route("/api/v1/fire/series", get(routes::fire::monthly_series))
        .route("/api/v1/fire/districts/:name/trend", get(routes::fire::district_trend))
        .route("/api/v1/fire/correlations", get(routes::fire::correlations))
        .route("/api/v1/fire/probability-grid", get(routes::fire::probability_grid))
        .route("/api/v1/climate/:variable/frames", get(routes::climate::get_frames))
        .route("/api/v1/climate/:variable/monthly", get(routes::climate::get_monthly))
        .route("/api/v1/datasets", get(routes::datasets::list_datasets))
        .route("/api/v1/datasets/:kind/preview", get(routes::datasets::preview_dataset))
        .route("/metrics", get(metrics_handler))
        .merge(feedback)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let components = ComponentStatus {
        fire_data: ComponentHealth::from_size(state.fire.as_ref().map(FireDataset::len)),
        climate_data: ComponentHealth::from_size(state.climate.as_ref().map(ClimateDataset::len)),
        inference: ComponentHealth::from_size(state.engine.as_ref().map(|e| e.districts().len())),
    };
    let degraded = state.fire.is_none() || state.climate.is_none() || state.engine.is_none();

    Json(HealthResponse {
        status: if degraded { "degraded" } else { "healthy" }.to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        components,
    })
}

/// Prometheus text exposition
async fn metrics_handler(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let state = state.read().await;
    let handle = state
        .metrics
        .as_ref()
        .ok_or(ApiError::Unavailable("Metrics recorder"))?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], handle.render()))
}

/// Initialize logging at the given level name, falling back to info
pub fn init_logging(level: &str) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

/// Run the server
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    let governor = create_governor_config(&settings.rate_limit).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid rate limit: per_second={} burst_size={}",
            settings.rate_limit.per_second,
            settings.rate_limit.burst_size
        )
    })?;

    // Drop idle per-IP limiter entries
    let limiter = governor.limiter().clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            limiter.retain_recent();
        }
    });

    let state = Arc::new(RwLock::new(AppState::from_settings(&settings).with_metrics(handle)));
    let app = build_router(state, Some(governor));

    info!("Starting API server on {}", settings.server.addr);

    let listener = tokio::net::TcpListener::bind(&settings.server.addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::io::Write;
    use tower::ServiceExt;

    pub(crate) const COMBINED_CSV: &str = "\
DISTRICT,YEAR,MONTH,LAT,LON,Prep,AvgTemp,MaxTemp,Humidity,WindSpeed,Fire_Count,Confidence,FRP,Brightness
Kailali,2012,3,28.69,80.91,5.0,24.0,33.0,35.0,3.0,40,70.0,30.0,320.0
Kailali,2013,3,28.69,80.91,8.0,25.0,34.0,30.0,3.2,60,72.0,36.0,325.0
Dang,2012,3,28.04,82.30,10.0,22.0,31.0,40.0,2.5,10,65.0,20.0,315.0
Dang,2013,8,28.04,82.30,500.0,27.0,31.0,90.0,1.0,0,,,
";

    pub(crate) const CLIMATE_CSV: &str = "\
DISTRICT,YEAR,MONTH,LAT,LON,Prep,AvgTemp,MaxTemp,Humidity,WindSpeed
Kailali,2012,3,28.69,80.91,5.0,24.0,33.0,35.0,3.0
Dang,2012,3,28.04,82.30,10.0,22.0,31.0,40.0,2.5
Dang,2012,7,28.04,82.30,420.0,27.0,31.0,88.0,1.2
";

    /// Fully loaded state over fixture files in `dir`
    pub(crate) fn test_state(dir: &std::path::Path) -> SharedState {
        let write = |name: &str, content: &str| {
            let path = dir.join(name);
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(content.as_bytes()).unwrap();
            path
        };
        let fire = FireDataset::load(write("combined.csv", COMBINED_CSV)).unwrap();
        let climate = ClimateDataset::load(write("climate.csv", CLIMATE_CSV)).unwrap();
        let engine = InferenceEngine::mock(fire.districts());

        let state = AppState::new(
            DatasetCatalog::new(dir),
            FeedbackStore::new(dir.join("feedback.csv")),
            StubWeatherSource::new(Duration::ZERO),
        )
        .with_fire_dataset(fire)
        .with_climate_dataset(climate)
        .with_engine(engine);

        Arc::new(RwLock::new(state))
    }

    pub(crate) async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        read_json(response).await
    }

    pub(crate) async fn post_json(
        app: Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        read_json(app.oneshot(request).await.unwrap()).await
    }

    async fn read_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_all_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(create_router(test_state(dir.path())), "/api/v1/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["components"]["fire_data"]["size"], 4);
        assert_eq!(body["components"]["inference"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_health_degraded_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(
            DatasetCatalog::new(dir.path()),
            FeedbackStore::new(dir.path().join("feedback.csv")),
            StubWeatherSource::default(),
        );
        let app = create_router(Arc::new(RwLock::new(state)));

        let (status, body) = get_json(app, "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["components"]["climate_data"]["status"], "unavailable");
    }

    #[tokio::test]
    async fn test_metrics_unavailable_without_recorder() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(create_router(test_state(dir.path())), "/metrics").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Metrics recorder not loaded");
    }
}
