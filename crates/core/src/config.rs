use std::path::PathBuf;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::group::PortfolioGroup;

pub const ENV_PEA_URL: &str = "GOOGLE_SHEET_CSV_PEA_URL";
pub const ENV_PEA_HISTORY_URL: &str = "GOOGLE_SHEET_CSV_HISTORY_PEA_URL";
pub const ENV_CTO_URL: &str = "GOOGLE_SHEET_CSV_CTO_URL";
pub const ENV_CTO_HISTORY_URL: &str = "GOOGLE_SHEET_CSV_HISTORY_CTO_URL";
pub const ENV_RENT_URL: &str = "GOOGLE_SHEET_CSV_REALT_RENT_URL";
pub const ENV_DATA_DIR: &str = "STOCKBOARD_DATA_DIR";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "STOCKBOARD_FETCH_TIMEOUT_SECS";

/// Default timeout for every outbound sheet fetch.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Rent snapshots are reused for up to this many days.
pub const DEFAULT_RENT_MAX_AGE_DAYS: i64 = 4;

/// Published CSV URLs for one portfolio group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSources {
    /// Current metrics sheet (one row per holding)
    pub holdings_url: String,
    /// Ten-year history sheet (one date/price column pair per holding)
    pub history_url: String,
}

/// Runtime settings for the data pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Root folder for snapshot artifacts.
    pub data_dir: PathBuf,

    pub pea: GroupSources,
    pub cto: GroupSources,
    pub rent_url: String,

    /// Applied to every outbound fetch.
    pub fetch_timeout: Duration,

    /// Max snapshot age accepted by `/load_companies` before re-fetching.
    /// Zero means "only today's snapshot counts".
    pub portfolio_max_age_days: i64,

    pub rent_max_age_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            pea: GroupSources::default(),
            cto: GroupSources::default(),
            rent_url: String::new(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            portfolio_max_age_days: 0,
            rent_max_age_days: DEFAULT_RENT_MAX_AGE_DAYS,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    /// Unset keys keep their defaults; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut settings = Self::default();

        if let Some(dir) = get(ENV_DATA_DIR) {
            settings.data_dir = PathBuf::from(dir);
        }
        settings.pea = GroupSources {
            holdings_url: get(ENV_PEA_URL).unwrap_or_default(),
            history_url: get(ENV_PEA_HISTORY_URL).unwrap_or_default(),
        };
        settings.cto = GroupSources {
            holdings_url: get(ENV_CTO_URL).unwrap_or_default(),
            history_url: get(ENV_CTO_HISTORY_URL).unwrap_or_default(),
        };
        settings.rent_url = get(ENV_RENT_URL).unwrap_or_default();

        if let Some(raw) = get(ENV_FETCH_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| {
                CoreError::Config(format!(
                    "{ENV_FETCH_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            if secs == 0 {
                return Err(CoreError::Config(format!(
                    "{ENV_FETCH_TIMEOUT_SECS} must be greater than zero"
                )));
            }
            settings.fetch_timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }

    /// Sheet URLs for a group.
    pub fn sources(&self, group: PortfolioGroup) -> &GroupSources {
        match group {
            PortfolioGroup::Pea => &self.pea,
            PortfolioGroup::Cto => &self.cto,
        }
    }
}
