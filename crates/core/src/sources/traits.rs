use async_trait::async_trait;

use crate::errors::CoreError;

/// Anything that can turn a published-sheet URL into CSV text.
///
/// The data service only depends on this trait, so tests swap in canned
/// CSV and deployments can point at any CSV-serving backend.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the CSV body served at `url`.
    async fn fetch_csv(&self, url: &str) -> Result<String, CoreError>;
}
