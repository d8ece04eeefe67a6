use chrono::NaiveDate;
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Settings;
use crate::errors::CoreError;
use crate::models::group::{PortfolioGroup, Portfolios};
use crate::models::holding::Holding;
use crate::models::rent::{RentIndex, RentRecord};
use crate::sheets::holdings::build_holdings;
use crate::sheets::rent::parse_rent_sheet;
use crate::sheets::table::SheetTable;
use crate::sources::traits::SheetSource;
use crate::storage::snapshot::{DatasetId, SnapshotCache};
use crate::storage::traits::ArtifactStore;

/// Supplies "today" for snapshot naming and staleness checks.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Orchestrates the pipeline: reuse a cached snapshot when fresh, otherwise
/// fetch the sheets, rebuild the records and persist a new snapshot.
///
/// Refreshes are serialized per dataset family, so concurrent callers that
/// both see a stale snapshot fetch once; the second one re-checks freshness
/// after the first has persisted and reuses its snapshot.
pub struct DataService {
    settings: Settings,
    source: Arc<dyn SheetSource>,
    cache: SnapshotCache,
    clock: Clock,
    portfolio_lock: Mutex<()>,
    rent_lock: Mutex<()>,
}

impl std::fmt::Debug for DataService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataService")
            .field("source", &self.source.name())
            .field("today", &self.today())
            .finish_non_exhaustive()
    }
}

impl DataService {
    pub fn new(
        settings: Settings,
        source: Arc<dyn SheetSource>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            settings,
            source,
            cache: SnapshotCache::new(store),
            clock: Arc::new(|| chrono::Local::now().date_naive()),
            portfolio_lock: Mutex::new(()),
            rent_lock: Mutex::new(()),
        }
    }

    /// Replace the calendar (tests pin "today" with this).
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Portfolio groups ────────────────────────────────────────────

    /// Holdings of one group from today's snapshot only. Never fetches;
    /// an older snapshot is ignored and yields an empty list.
    pub fn get_portfolio_group(&self, group: PortfolioGroup) -> Result<Vec<Holding>, CoreError> {
        let holdings = self
            .cache
            .load_today(&DatasetId::group(group), self.today())?
            .unwrap_or_default();
        Ok(holdings)
    }

    /// Every group from today's snapshots.
    pub fn all_groups(&self) -> Result<Portfolios, CoreError> {
        let mut portfolios = Portfolios::new();
        for group in PortfolioGroup::ALL {
            portfolios.insert(group, self.get_portfolio_group(group)?);
        }
        Ok(portfolios)
    }

    /// Make sure every group has a snapshot at most `max_age_days` old and
    /// return the holdings.
    ///
    /// If any group is stale, all groups are fetched and rebuilt, and nothing
    /// is persisted until every fetch has succeeded. When all are fresh, the
    /// newest snapshot of each group is returned as is.
    pub async fn refresh_all(&self, max_age_days: i64) -> Result<Portfolios, CoreError> {
        let _guard = self.portfolio_lock.lock().await;
        let today = self.today();

        let all_fresh = PortfolioGroup::ALL
            .iter()
            .all(|g| self.cache.is_fresh(&DatasetId::group(*g), max_age_days, today));

        let mut portfolios = Portfolios::new();

        if all_fresh {
            debug!("All portfolio snapshots are fresh, skipping fetch");
            for group in PortfolioGroup::ALL {
                let holdings = self
                    .cache
                    .load(&DatasetId::group(group), today)?
                    .unwrap_or_default();
                portfolios.insert(group, holdings);
            }
            return Ok(portfolios);
        }

        for group in PortfolioGroup::ALL {
            portfolios.insert(group, self.fetch_group(group).await?);
        }
        for group in PortfolioGroup::ALL {
            self.cache
                .persist(&DatasetId::group(group), portfolios.get(group), today)?;
        }
        info!(
            "Refreshed {} holdings across {} groups",
            portfolios.total_holdings(),
            PortfolioGroup::ALL.len()
        );

        Ok(portfolios)
    }

    /// First holding with this exact ticker, searching groups in priority order.
    pub fn get_holding(&self, ticker: &str) -> Result<Holding, CoreError> {
        for group in PortfolioGroup::ALL {
            if let Some(holding) = self
                .get_portfolio_group(group)?
                .into_iter()
                .find(|h| h.ticker == ticker)
            {
                return Ok(holding);
            }
        }
        Err(CoreError::TickerNotFound(ticker.to_string()))
    }

    /// Fetch and build one group's holdings (no caching).
    pub async fn fetch_group(&self, group: PortfolioGroup) -> Result<Vec<Holding>, CoreError> {
        let sources = self.settings.sources(group);
        let holdings_csv = self
            .fetch(&sources.holdings_url, &format!("{group} holdings"))
            .await?;
        let history_csv = self
            .fetch(&sources.history_url, &format!("{group} history"))
            .await?;

        let holdings = SheetTable::parse(&holdings_csv)?;
        let history = SheetTable::parse(&history_csv)?;
        build_holdings(&holdings, &history)
    }

    // ── Rent index ──────────────────────────────────────────────────

    /// Rent index, re-fetched when the cached one is older than the
    /// configured max age. Reads the newest snapshot of any age afterwards.
    pub async fn get_rent_index(&self) -> Result<RentIndex, CoreError> {
        let _guard = self.rent_lock.lock().await;
        let today = self.today();
        let dataset = DatasetId::rent();

        if self
            .cache
            .is_fresh(&dataset, self.settings.rent_max_age_days, today)
        {
            debug!("Using cached rent data");
        } else {
            let records = self.fetch_rent().await?;
            self.cache.persist(&dataset, &records, today)?;
        }

        let records: Vec<RentRecord> = self
            .cache
            .load(&dataset, today)?
            .ok_or_else(|| CoreError::SnapshotMissing(dataset.to_string()))?;
        Ok(RentIndex::from(records))
    }

    async fn fetch_rent(&self) -> Result<Vec<RentRecord>, CoreError> {
        let csv = self.fetch(&self.settings.rent_url, "rent").await?;
        let table = SheetTable::parse(&csv)?;
        parse_rent_sheet(&table)
    }

    async fn fetch(&self, url: &str, label: &str) -> Result<String, CoreError> {
        if url.trim().is_empty() {
            return Err(CoreError::MissingSource(label.to_string()));
        }
        debug!("Fetching {label} sheet from {}", self.source.name());
        self.source.fetch_csv(url).await
    }
}
