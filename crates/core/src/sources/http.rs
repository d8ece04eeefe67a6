use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::config::DEFAULT_FETCH_TIMEOUT_SECS;
use crate::errors::CoreError;
use super::traits::SheetSource;

const SOURCE_NAME: &str = "Published sheet";

/// Fetches CSV exports of published spreadsheets over HTTP(S).
///
/// Every request is bounded by the client timeout; a stalled sheet provider
/// fails the fetch instead of holding the request forever.
pub struct HttpSheetSource {
    client: Client,
}

impl HttpSheetSource {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

impl Default for HttpSheetSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch_csv(&self, url: &str) -> Result<String, CoreError> {
        debug!("Fetching sheet CSV");
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                source_name: SOURCE_NAME.into(),
                message: format!("HTTP {status}"),
            });
        }

        Ok(resp.text().await?)
    }
}
