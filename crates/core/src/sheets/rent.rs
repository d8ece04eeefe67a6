use chrono::NaiveDate;
use log::warn;

use crate::errors::CoreError;
use crate::models::rent::RentRecord;

use super::number::parse_price;
use super::table::SheetTable;

const SHEET: &str = "rent";

/// Day-first date format used by the rent sheet.
pub const RENT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse the two-column rent sheet (`Date`, `Rent`) into ISO-dated records.
///
/// Rows missing either cell are dropped. Rows whose date or amount does not
/// parse are skipped with a warning. Source order is preserved.
pub fn parse_rent_sheet(table: &SheetTable) -> Result<Vec<RentRecord>, CoreError> {
    let column = |name: &str| {
        table
            .column_index(&[name])
            .ok_or_else(|| CoreError::SchemaMismatch {
                sheet: SHEET.to_string(),
                column: name.to_string(),
            })
    };
    let date_col = column("Date")?;
    let rent_col = column("Rent")?;

    let mut records = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let (Some(raw_date), Some(raw_rent)) = (table.cell(row, date_col), table.cell(row, rent_col))
        else {
            continue;
        };

        let date = match NaiveDate::parse_from_str(raw_date.trim(), RENT_DATE_FORMAT) {
            Ok(d) => d,
            Err(e) => {
                warn!("Skipping rent row {}: bad date '{}': {}", row + 1, raw_date, e);
                continue;
            }
        };
        let Some(rent) = parse_price(raw_rent) else {
            warn!("Skipping rent row {}: bad amount '{}'", row + 1, raw_rent);
            continue;
        };

        records.push(RentRecord {
            date: date.format("%Y-%m-%d").to_string(),
            rent,
        });
    }

    Ok(records)
}
