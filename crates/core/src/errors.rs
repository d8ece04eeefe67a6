use thiserror::Error;

/// Unified error type for the entire stockboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Upstream sheets ─────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Sheet source error ({source_name}): {message}")]
    Api {
        source_name: String,
        message: String,
    },

    #[error("Sheet URL not configured: {0}")]
    MissingSource(String),

    // ── Sheet parsing ───────────────────────────────────────────────
    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Schema mismatch in {sheet} sheet: missing column '{column}'")]
    SchemaMismatch { sheet: String, column: String },

    // ── Snapshot storage ────────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("No snapshot available for dataset: {0}")]
    SnapshotMissing(String),

    // ── Lookups ─────────────────────────────────────────────────────
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// `true` for the typed not-found class (surfaced as 404 by the HTTP layer).
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::TickerNotFound(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::Csv(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Published sheet URLs carry the document key in the query string;
        // keep it out of logs and error messages.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
