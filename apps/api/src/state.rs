use std::sync::Arc;

use crate::config::Config;
use crate::schools::catalog::SchoolCatalog;
use crate::scoring::competitiveness::CompetitivenessWeights;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Lazily loaded school collection over the configured source.
    pub catalog: Arc<SchoolCatalog>,
    pub weights: CompetitivenessWeights,
}

/// Seed-backed state for handler tests.
#[cfg(test)]
pub fn test_state() -> AppState {
    AppState {
        config: Config::default(),
        catalog: Arc::new(SchoolCatalog::new(Arc::new(
            crate::schools::seed::SeedSource,
        ))),
        weights: CompetitivenessWeights::default(),
    }
}
