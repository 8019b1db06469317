use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use aqscreen_api::config::ApiConfig;
use aqscreen_api::state::AppState;
use aqscreen_instruments::importance::FlatImportance;
use aqscreen_instruments::ScreeningEngine;
use aqscreen_storage::memory::MemoryStore;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ApiConfig::from_env()?;

    let engine = ScreeningEngine::new().with_importance(FlatImportance(config.importance));
    let state = AppState::new(engine, Arc::new(MemoryStore::new()));
    let app = aqscreen_api::router(state, &config);

    if config.lambda {
        tracing::info!("starting in lambda mode");
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
