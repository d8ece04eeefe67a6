pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod sheets;
pub mod sources;
pub mod storage;

use std::sync::Arc;

use api::{respond, ApiResponse, LOAD_COMPANIES_FAILED, RENT_FAILED, TICKER_NOT_FOUND};
use config::Settings;
use errors::CoreError;
use models::group::Portfolios;
use models::holding::Holding;
use models::rent::RentIndex;
use services::data_service::DataService;
use sources::http::HttpSheetSource;
use sources::traits::SheetSource;
use storage::local::LocalArtifactStore;
use storage::traits::ArtifactStore;

/// Main entry point for the Stockboard core library.
///
/// Wires the sheet source, the snapshot store and the data service together
/// and exposes one method per HTTP endpoint.
#[must_use]
pub struct StockBoard {
    service: DataService,
}

impl std::fmt::Debug for StockBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockBoard")
            .field("service", &self.service)
            .finish()
    }
}

impl StockBoard {
    /// Production wiring: HTTP sheet fetches and snapshots under `settings.data_dir`.
    pub fn from_settings(settings: Settings) -> Self {
        let source = Arc::new(HttpSheetSource::with_timeout(settings.fetch_timeout));
        let store = Arc::new(LocalArtifactStore::new(settings.data_dir.clone()));
        Self::with_parts(settings, source, store)
    }

    /// Settings from the environment, production wiring.
    pub fn from_env() -> Result<Self, CoreError> {
        Ok(Self::from_settings(Settings::from_env()?))
    }

    /// Custom wiring (tests, alternative backends).
    pub fn with_parts(
        settings: Settings,
        source: Arc<dyn SheetSource>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self::with_service(DataService::new(settings, source, store))
    }

    pub fn with_service(service: DataService) -> Self {
        Self { service }
    }

    #[must_use]
    pub fn service(&self) -> &DataService {
        &self.service
    }

    // ── Typed operations ────────────────────────────────────────────

    /// Refresh both portfolio groups using the configured max age.
    pub async fn refresh_portfolios(&self) -> Result<Portfolios, CoreError> {
        let max_age = self.service.settings().portfolio_max_age_days;
        self.service.refresh_all(max_age).await
    }

    pub fn holding(&self, ticker: &str) -> Result<Holding, CoreError> {
        self.service.get_holding(ticker)
    }

    pub async fn rent_index(&self) -> Result<RentIndex, CoreError> {
        self.service.get_rent_index().await
    }

    // ── HTTP endpoints ──────────────────────────────────────────────

    /// `POST /load_companies`
    pub async fn load_companies(&self) -> ApiResponse {
        respond(self.refresh_portfolios().await, TICKER_NOT_FOUND, LOAD_COMPANIES_FAILED)
    }

    /// `GET /company/{ticker}`
    pub fn company(&self, ticker: &str) -> ApiResponse {
        respond(self.holding(ticker), TICKER_NOT_FOUND, LOAD_COMPANIES_FAILED)
    }

    /// `GET /realt/rent`
    pub async fn realt_rent(&self) -> ApiResponse {
        respond(self.rent_index().await, RENT_FAILED, RENT_FAILED)
    }
}
