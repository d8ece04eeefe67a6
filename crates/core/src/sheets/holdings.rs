use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::holding::{Holding, DEFAULT_MOAT};
use crate::services::valuation::{attractiveness_score, fair_value_and_discount};

use super::history::extract_history;
use super::number::{parse_cell, parse_number, sanitize};
use super::table::SheetTable;

const SHEET: &str = "holdings";

// Accepted header spellings, first one is the canonical name.
const TICKER: &[&str] = &["Ticker", "Symbol", "Symbole"];
const NAME: &[&str] = &["Name", "Nom", "Company"];
const MARKET_CAP: &[&str] = &["Market Cap", "MarketCap", "Capitalisation"];
const CURRENCY: &[&str] = &["Currency", "Devise"];
const PRICE: &[&str] = &["Price", "Prix", "Cours"];
const HIGH: &[&str] = &["52 Week High", "52W High", "High Price", "Plus Haut 52S"];
const DROP_FROM_HIGH: &[&str] = &["Drop From High", "Drop", "Baisse"];
const PE: &[&str] = &["PE", "P/E", "PER"];
const DAILY_CHANGE: &[&str] = &["Daily Change", "Change", "Variation"];
const EPS: &[&str] = &["EPS", "BPA"];
const SECTOR: &[&str] = &["Sector", "Secteur"];
const MOAT: &[&str] = &["Moat"];

/// Column positions of the holdings sheet, resolved once per table.
///
/// The valuation inputs are required; display columns are optional and read
/// as empty strings when the sheet does not have them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldingsSchema {
    pub ticker: usize,
    pub price: usize,
    pub high: usize,
    pub eps: usize,
    pub sector: usize,
    pub name: Option<usize>,
    pub market_cap: Option<usize>,
    pub currency: Option<usize>,
    pub drop_from_high: Option<usize>,
    pub pe: Option<usize>,
    pub daily_change: Option<usize>,
    pub moat: Option<usize>,
}

impl HoldingsSchema {
    /// Resolve column positions from the header row.
    /// Fails with `SchemaMismatch` naming the first required column missing.
    pub fn resolve(table: &SheetTable) -> Result<Self, CoreError> {
        let required = |names: &[&str]| {
            table
                .column_index(names)
                .ok_or_else(|| CoreError::SchemaMismatch {
                    sheet: SHEET.to_string(),
                    column: names[0].to_string(),
                })
        };

        Ok(Self {
            ticker: required(TICKER)?,
            price: required(PRICE)?,
            high: required(HIGH)?,
            eps: required(EPS)?,
            sector: required(SECTOR)?,
            name: table.column_index(NAME),
            market_cap: table.column_index(MARKET_CAP),
            currency: table.column_index(CURRENCY),
            drop_from_high: table.column_index(DROP_FROM_HIGH),
            pe: table.column_index(PE),
            daily_change: table.column_index(DAILY_CHANGE),
            moat: table.column_index(MOAT),
        })
    }
}

/// Build holding records from the current-metrics sheet and the history sheet.
///
/// Row `i` of `holdings` is paired with column pair `i` of `history`.
/// Rows keep their source order and duplicate tickers are kept as separate
/// records; rows with a blank ticker are skipped.
pub fn build_holdings(holdings: &SheetTable, history: &SheetTable) -> Result<Vec<Holding>, CoreError> {
    let schema = HoldingsSchema::resolve(holdings)?;
    let mut result = Vec::with_capacity(holdings.row_count());

    for row in 0..holdings.row_count() {
        let ticker = holdings.cell(row, schema.ticker).unwrap_or_default().trim();
        if ticker.is_empty() {
            warn!("Skipping holdings row {}: blank ticker", row + 1);
            continue;
        }

        let text = |col: Option<usize>| {
            col.and_then(|c| holdings.cell(row, c))
                .unwrap_or_default()
                .to_string()
        };

        let sector = text(Some(schema.sector)).trim().to_lowercase();
        let price = parse_number(holdings.cell(row, schema.price).unwrap_or_default());
        let high = parse_number(holdings.cell(row, schema.high).unwrap_or_default());
        let eps = parse_cell(holdings.cell(row, schema.eps));
        let pe = parse_cell(schema.pe.and_then(|c| holdings.cell(row, c)));

        let (discount, fair_value) = fair_value_and_discount(&sector, eps, price);
        let score = attractiveness_score(&sector, pe, eps, price, high);

        let series = extract_history(history, row);
        debug!("{}: {} history points", ticker, series.len());

        let moat = match schema.moat.and_then(|c| holdings.cell(row, c)) {
            Some(m) => m.trim().to_string(),
            None => DEFAULT_MOAT.to_string(),
        };

        result.push(Holding {
            ticker: ticker.to_string(),
            name: text(schema.name),
            market_cap: text(schema.market_cap),
            currency: text(schema.currency),
            price,
            high_price: high,
            drop_from_high: text(schema.drop_from_high),
            pe: sanitize(pe),
            daily_change: text(schema.daily_change),
            eps: sanitize(eps),
            sector,
            moat,
            fair_value_gap: sanitize(discount),
            fair_value: sanitize(fair_value),
            score,
            price_history: series.prices,
            price_dates: series.dates,
        });
    }

    Ok(result)
}
