use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use crate::models::school::SchoolRecord;
use crate::schools::{SchoolDataError, SchoolSource};

/// Lazily loaded, read-only school collection.
///
/// The first successful `schools()` call loads from the source; every later call
/// returns the same `Arc`. A failed load is not cached. There is no expiry: a
/// changed upstream is only seen after a restart.
pub struct SchoolCatalog {
    source: Arc<dyn SchoolSource>,
    cache: OnceCell<Arc<Vec<SchoolRecord>>>,
}

impl SchoolCatalog {
    pub fn new(source: Arc<dyn SchoolSource>) -> Self {
        Self {
            source,
            cache: OnceCell::new(),
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub async fn schools(&self) -> Result<Arc<Vec<SchoolRecord>>, SchoolDataError> {
        let schools = self
            .cache
            .get_or_try_init(|| async {
                let schools = self.source.load().await?;
                info!(
                    "Loaded {} schools from {} source",
                    schools.len(),
                    self.source.name()
                );
                Ok::<_, SchoolDataError>(Arc::new(schools))
            })
            .await?;
        Ok(Arc::clone(schools))
    }
}
