//! School data access.
//!
//! Every source produces normalized `SchoolRecord`s. `SchoolCatalog` is the only
//! place that loads them, once per process.
//!
//! `AppState` holds an `Arc<SchoolCatalog>` over an injected `Arc<dyn SchoolSource>`.

pub mod catalog;
pub mod handlers;
pub mod ipeds;
pub mod scorecard;
pub mod seed;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::school::SchoolRecord;

#[derive(Debug, Error)]
pub enum SchoolDataError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Scorecard API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A supplier of school records. Implement this to swap data backends without
/// touching the scoring core or the handlers.
#[async_trait]
pub trait SchoolSource: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    async fn load(&self) -> Result<Vec<SchoolRecord>, SchoolDataError>;
}
