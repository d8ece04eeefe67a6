use serde::{Deserialize, Serialize};

/// Placeholder used when a sheet row carries no moat description.
pub const DEFAULT_MOAT: &str = "-";

/// One tracked instrument: current metrics, derived valuation, and its
/// ten-year price history.
///
/// `price_history` and `price_dates` are parallel sequences in chronological
/// source order and always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol, trimmed (e.g., "MC.PA", "AAPL")
    pub ticker: String,

    pub name: String,

    /// Display string copied verbatim from the sheet (e.g., "312,5 Md")
    pub market_cap: String,

    pub currency: String,

    /// Current price (0.0 when the cell is blank or unreadable)
    pub price: f64,

    /// 52-week high
    pub high_price: f64,

    /// Display string copied verbatim from the sheet (e.g., "-18,20%")
    pub drop_from_high: String,

    /// Price/earnings ratio; `None` when the sheet has no value
    pub pe: Option<f64>,

    /// Display string copied verbatim from the sheet
    pub daily_change: String,

    /// Earnings per share; `None` when the sheet has no value
    pub eps: Option<f64>,

    /// Sector, lowercased
    pub sector: String,

    #[serde(default = "default_moat")]
    pub moat: String,

    /// Discount of price against fair value, in percent
    pub fair_value_gap: Option<f64>,

    /// EPS × sector baseline P/E
    pub fair_value: Option<f64>,

    /// Attractiveness score in [0, 100]
    #[serde(default)]
    pub score: u8,

    #[serde(default)]
    pub price_history: Vec<f64>,

    #[serde(default)]
    pub price_dates: Vec<String>,
}

fn default_moat() -> String {
    DEFAULT_MOAT.to_string()
}

impl Holding {
    /// Number of (date, price) points in the history.
    pub fn history_len(&self) -> usize {
        self.price_history.len()
    }
}
