mod config;
mod errors;
mod models;
mod routes;
mod schools;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::schools::catalog::SchoolCatalog;
use crate::schools::scorecard::{ScorecardQuery, ScorecardSource};
use crate::schools::seed::SeedSource;
use crate::schools::SchoolSource;
use crate::scoring::competitiveness::CompetitivenessWeights;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting admitscope API v{}", env!("CARGO_PKG_VERSION"));

    // School data loads lazily on first request; only the source is chosen here.
    let source = build_school_source(&config)?;
    info!("School source: {}", source.name());

    let weights = CompetitivenessWeights::default();
    info!(
        "Competitiveness weights: fit={} selectivity={} rigor={}",
        weights.fit, weights.selectivity, weights.rigor
    );

    let state = AppState {
        config: config.clone(),
        catalog: Arc::new(SchoolCatalog::new(source)),
        weights,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Scorecard when an API key is configured, otherwise the built-in seed table.
fn build_school_source(config: &Config) -> Result<Arc<dyn SchoolSource>> {
    let Some(api_key) = config.scorecard_api_key.clone() else {
        if config.ipeds_csv_path.is_some() {
            tracing::warn!("IPEDS_CSV_PATH is ignored without SCORECARD_API_KEY");
        }
        return Ok(Arc::new(SeedSource));
    };

    let query = ScorecardQuery {
        state: config.scorecard_state.clone(),
        ownership: config.scorecard_ownership.clone(),
        max_pages: config.scorecard_max_pages,
    };
    let source = ScorecardSource::new(api_key, query, config.ipeds_csv_path.clone())
        .context("Failed to build College Scorecard client")?;
    Ok(Arc::new(source))
}
