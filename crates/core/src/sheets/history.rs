use log::debug;

use super::number::parse_price;
use super::table::SheetTable;

/// Price series of one holding, as two parallel sequences in source row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Extract the (date, price) series of the holding at `index`.
///
/// The history sheet holds one column pair per holding: column `2 * index`
/// is the date and `2 * index + 1` the closing price. Rows with a blank cell
/// are dropped, rows whose price does not parse are skipped, and dates keep
/// only the part before the first space (time of day is discarded).
///
/// A sheet too narrow to contain the pair yields an empty series.
pub fn extract_history(table: &SheetTable, index: usize) -> PriceSeries {
    let date_col = 2 * index;
    let price_col = date_col + 1;

    if table.width() <= price_col {
        debug!(
            "History sheet has {} columns, no pair for holding #{}",
            table.width(),
            index
        );
        return PriceSeries::default();
    }

    let mut series = PriceSeries::default();
    for row in 0..table.row_count() {
        let (Some(raw_date), Some(raw_price)) = (table.cell(row, date_col), table.cell(row, price_col))
        else {
            continue;
        };
        let Some(price) = parse_price(raw_price) else {
            continue;
        };
        let date = raw_date.trim().split(' ').next().unwrap_or_default();
        if date.is_empty() {
            continue;
        }
        series.dates.push(date.to_string());
        series.prices.push(price);
    }
    series
}
