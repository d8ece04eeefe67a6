use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::group::PortfolioGroup;

use super::traits::ArtifactStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identity of a cached dataset: artifact name and the folder holding it.
///
/// Artifacts are named `{YYYY-MM-DD}-{name}.json` inside `dir`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetId {
    name: String,
    dir: String,
}

impl DatasetId {
    pub fn new(name: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    /// Snapshot dataset of a portfolio group (`PEA/2025-01-15-PEA.json`).
    pub fn group(group: PortfolioGroup) -> Self {
        Self::new(group.as_str(), group.as_str())
    }

    /// Rent index dataset (`realt/rent/2025-01-15-rent.json`).
    pub fn rent() -> Self {
        Self::new("rent", "realt/rent")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("{}-{}.json", date.format(DATE_FORMAT), self.name)
    }

    pub fn path(&self, date: NaiveDate) -> String {
        format!("{}/{}", self.dir, self.file_name(date))
    }

    /// Date embedded in an artifact file name, or `None` if the name is not
    /// an artifact of this dataset.
    pub fn parse_file_date(&self, file_name: &str) -> Option<NaiveDate> {
        let suffix = format!("-{}.json", self.name);
        let date_str = file_name.strip_suffix(&suffix)?;
        NaiveDate::parse_from_str(date_str, DATE_FORMAT).ok()
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Dated JSON snapshots, at most one kept per dataset.
///
/// The cache exclusively owns artifact lifecycle: it writes today's
/// artifact, judges staleness from file-name dates, and removes superseded
/// artifacts after a successful write.
///
/// Two read paths exist on purpose: [`SnapshotCache::load_today`] only
/// accepts today's artifact, while [`SnapshotCache::load`] falls back to the
/// newest artifact of any age.
#[derive(Clone)]
pub struct SnapshotCache {
    store: Arc<dyn ArtifactStore>,
}

impl std::fmt::Debug for SnapshotCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCache").finish_non_exhaustive()
    }
}

impl SnapshotCache {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    /// Dates of the dataset's artifacts, newest first. Foreign or malformed
    /// file names are ignored.
    pub fn artifacts(&self, dataset: &DatasetId) -> Result<Vec<NaiveDate>, CoreError> {
        let mut dates: Vec<NaiveDate> = self
            .store
            .list(dataset.dir())?
            .iter()
            .filter_map(|f| dataset.parse_file_date(f))
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();
        Ok(dates)
    }

    /// `true` iff the newest artifact is at most `max_age_days` old.
    ///
    /// No artifact, or an unreadable folder, counts as stale.
    pub fn is_fresh(&self, dataset: &DatasetId, max_age_days: i64, today: NaiveDate) -> bool {
        match self.artifacts(dataset) {
            Ok(dates) => match dates.first() {
                Some(latest) => {
                    let age = (today - *latest).num_days();
                    debug!("{dataset} snapshot from {latest} is {age} day(s) old");
                    age <= max_age_days
                }
                None => false,
            },
            Err(e) => {
                warn!("{dataset} freshness check failed: {e}");
                false
            }
        }
    }

    /// Write `payload` as today's artifact, then delete every other artifact
    /// of the dataset. Cleanup failures are logged and never fail the call.
    /// Returns the path written.
    pub fn persist<T: Serialize + ?Sized>(
        &self,
        dataset: &DatasetId,
        payload: &T,
        today: NaiveDate,
    ) -> Result<String, CoreError> {
        let bytes = serde_json::to_vec_pretty(payload).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize {dataset} snapshot: {e}"))
        })?;

        let path = dataset.path(today);
        self.store.write(&path, &bytes)?;
        info!("{dataset} snapshot saved to {path}");

        self.remove_superseded(dataset, today);
        Ok(path)
    }

    /// Today's artifact if present, otherwise the newest one of any age.
    pub fn load<T: DeserializeOwned>(
        &self,
        dataset: &DatasetId,
        today: NaiveDate,
    ) -> Result<Option<T>, CoreError> {
        if let Some(payload) = self.load_today(dataset, today)? {
            return Ok(Some(payload));
        }
        match self.artifacts(dataset)?.first() {
            Some(latest) => {
                debug!("{dataset}: no snapshot for {today}, using {latest}");
                self.read_artifact(dataset, *latest)
            }
            None => Ok(None),
        }
    }

    /// Today's artifact only.
    pub fn load_today<T: DeserializeOwned>(
        &self,
        dataset: &DatasetId,
        today: NaiveDate,
    ) -> Result<Option<T>, CoreError> {
        self.read_artifact(dataset, today)
    }

    fn read_artifact<T: DeserializeOwned>(
        &self,
        dataset: &DatasetId,
        date: NaiveDate,
    ) -> Result<Option<T>, CoreError> {
        let path = dataset.path(date);
        let Some(bytes) = self.store.read(&path)? else {
            return Ok(None);
        };
        let payload = serde_json::from_slice(&bytes).map_err(|e| {
            CoreError::Deserialization(format!("Failed to read snapshot {path}: {e}"))
        })?;
        Ok(Some(payload))
    }

    fn remove_superseded(&self, dataset: &DatasetId, keep: NaiveDate) {
        let files = match self.store.list(dataset.dir()) {
            Ok(files) => files,
            Err(e) => {
                warn!("{dataset} cleanup skipped, listing failed: {e}");
                return;
            }
        };

        for file in files {
            match dataset.parse_file_date(&file) {
                Some(date) if date != keep => {}
                _ => continue,
            }
            let path = format!("{}/{}", dataset.dir(), file);
            match self.store.delete(&path) {
                Ok(()) => info!("Deleted superseded snapshot {path}"),
                Err(e) => warn!("Failed to delete superseded snapshot {path}: {e}"),
            }
        }
    }
}
