//! Nepal Forest Fire Risk Dashboard - Main Entry Point

use api::{init_logging, run_server, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_logging(&settings.server.log_level)?;

    info!("=== Forest Fire Risk Dashboard v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Data: {} / {}, models: {}{}",
        settings.data.combined_csv.display(),
        settings.data.climate_csv.display(),
        settings.models.dir.display(),
        if settings.models.mock { " (mock)" } else { "" }
    );

    run_server(settings).await
}
