// ═══════════════════════════════════════════════════════════════════
// Sheet Tests — numeric normalizer, CSV tables, history extraction,
// holdings builder, rent sheet
// ═══════════════════════════════════════════════════════════════════

use stockboard_core::errors::CoreError;
use stockboard_core::sheets::history::extract_history;
use stockboard_core::sheets::holdings::{build_holdings, HoldingsSchema};
use stockboard_core::sheets::number::{parse_cell, parse_number, parse_price, round2, sanitize};
use stockboard_core::sheets::rent::parse_rent_sheet;
use stockboard_core::sheets::table::SheetTable;

const HOLDINGS_CSV: &str = "\u{feff}Ticker,Name,Market Cap,Currency,Price,52 Week High,Drop From High,PE,Daily Change,EPS,Sector,Moat
 MC.PA ,LVMH,\"312,5 Md\",EUR,\"600,00\",\"800,00\",\"-25,00%\",\"20,0\",\"+1,2%\",\"30,00\",Luxe,Brand
AI.PA,Air Liquide,\"95 Md\",EUR,\"170,5\",\"180\",\"-5,28%\",,\"-0,3%\",,Industrie,
";

const HISTORY_CSV: &str = "Date,Close,Date,Close
2015-01-02 17:30:00,\"120,50 €\",2015-01-02 17:30:00,\"80,10 €\"
2015-02-02 17:30:00,\"125,00 €\",,
2015-03-02 17:30:00,n/a,2015-03-02 17:30:00,\"82,00 €\"
";

// ═══════════════════════════════════════════════════════════════════
// Numeric normalizer
// ═══════════════════════════════════════════════════════════════════

mod number {
    use super::*;

    #[test]
    fn decimal_comma() {
        assert_eq!(parse_number("12,5"), 12.5);
    }

    #[test]
    fn decimal_dot() {
        assert_eq!(parse_number("12.5"), 12.5);
    }

    #[test]
    fn strips_currency_percent_and_spaces() {
        assert_eq!(parse_number("€ 1 024,50"), 1024.5);
        assert_eq!(parse_number("-3,2%"), -3.2);
        assert_eq!(parse_number("1\u{a0}200"), 1200.0);
    }

    #[test]
    fn mixed_separators_are_unreadable() {
        // "1,234.5" → "1.234.5": two decimal points
        assert_eq!(parse_number("1,234.5"), 0.0);
        assert_eq!(parse_number("1.234,5"), 0.0);
    }

    #[test]
    fn garbage_is_zero() {
        for raw in ["", "n/a", "-", ".", "--5", "#DIV/0!", "   "] {
            assert_eq!(parse_number(raw), 0.0, "input {raw:?}");
        }
    }

    #[test]
    fn never_panics_on_arbitrary_text() {
        for raw in ["∞", "1e309", "NaN", "inf", "-0", "٣", "1-2", "9".repeat(400).as_str()] {
            assert!(parse_number(raw).is_finite(), "input {raw:?}");
        }
    }

    #[test]
    fn blank_cell_is_nan_then_none() {
        assert!(parse_cell(None).is_nan());
        assert!(parse_cell(Some("  ")).is_nan());
        assert_eq!(sanitize(parse_cell(None)), None);
        assert_eq!(sanitize(parse_cell(Some("4,2"))), Some(4.2));
    }

    #[test]
    fn sanitize_passes_non_nan_through() {
        assert_eq!(sanitize(0.0), Some(0.0));
        assert_eq!(sanitize(-1.5), Some(-1.5));
        assert_eq!(sanitize(f64::INFINITY), Some(f64::INFINITY));
        assert_eq!(sanitize(f64::NAN), None);
    }

    #[test]
    fn price_parsing_is_strict() {
        assert_eq!(parse_price("120,50 €"), Some(120.5));
        assert_eq!(parse_price("$1200.5"), Some(1200.5));
        assert_eq!(parse_price("n/a"), None);
        assert_eq!(parse_price("€"), None);
    }

    #[test]
    fn round_two_decimals() {
        assert_eq!(round2(19.999), 20.0);
        assert_eq!(round2(-4.444), -4.44);
    }
}

// ═══════════════════════════════════════════════════════════════════
// SheetTable
// ═══════════════════════════════════════════════════════════════════

mod table {
    use super::*;

    #[test]
    fn headers_are_cleaned() {
        let table = SheetTable::parse("\u{feff} Ticker ,Price\nAAPL,1\n").unwrap();
        assert_eq!(table.headers(), &["Ticker".to_string(), "Price".to_string()]);
        assert_eq!(table.column_index(&["ticker"]), Some(0));
    }

    #[test]
    fn ragged_rows_are_kept() {
        let table = SheetTable::parse("a,b,c\n1\n1,2,3,4\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.width(), 3);
        assert_eq!(table.cell(0, 1), None);
        assert_eq!(table.cell(1, 3), Some("4"));
    }

    #[test]
    fn blank_cells_read_as_missing() {
        let table = SheetTable::parse("a,b\n ,x\n").unwrap();
        assert_eq!(table.cell(0, 0), None);
        assert_eq!(table.cell(0, 1), Some("x"));
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn quoted_decimal_commas_stay_in_one_cell() {
        let table = SheetTable::parse("Price\n\"12,5\"\n").unwrap();
        assert_eq!(table.cell(0, 0), Some("12,5"));
    }

    #[test]
    fn empty_input_is_an_empty_table() {
        let table = SheetTable::parse("").unwrap();
        assert_eq!(table.width(), 0);
        assert_eq!(table.row_count(), 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// History extractor
// ═══════════════════════════════════════════════════════════════════

mod history {
    use super::*;

    #[test]
    fn first_pair() {
        let table = SheetTable::parse(HISTORY_CSV).unwrap();
        let series = extract_history(&table, 0);
        // Third row has an unreadable price and is skipped.
        assert_eq!(series.dates, vec!["2015-01-02", "2015-02-02"]);
        assert_eq!(series.prices, vec![120.5, 125.0]);
    }

    #[test]
    fn second_pair_drops_missing_cells() {
        let table = SheetTable::parse(HISTORY_CSV).unwrap();
        let series = extract_history(&table, 1);
        assert_eq!(series.dates, vec!["2015-01-02", "2015-03-02"]);
        assert_eq!(series.prices, vec![80.1, 82.0]);
    }

    #[test]
    fn narrow_table_yields_empty_series() {
        let table = SheetTable::parse(HISTORY_CSV).unwrap();
        let series = extract_history(&table, 2);
        assert!(series.dates.is_empty());
        assert!(series.prices.is_empty());
    }

    #[test]
    fn half_pair_is_absent() {
        // Width 3 cannot hold pair #1 (columns 2 and 3).
        let table = SheetTable::parse("Date,Close,Date\n2020-01-01,1,2020-01-01\n").unwrap();
        assert!(extract_history(&table, 1).is_empty());
    }

    #[test]
    fn dates_without_time_are_kept_whole() {
        let table = SheetTable::parse("Date,Close\n02/01/2015,10\n").unwrap();
        let series = extract_history(&table, 0);
        assert_eq!(series.dates, vec!["02/01/2015"]);
        assert_eq!(series.prices, vec![10.0]);
    }

    #[test]
    fn dates_and_prices_stay_parallel() {
        let table = SheetTable::parse(HISTORY_CSV).unwrap();
        for idx in 0..3 {
            let series = extract_history(&table, idx);
            assert_eq!(series.dates.len(), series.prices.len());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Holdings builder
// ═══════════════════════════════════════════════════════════════════

mod holdings {
    use super::*;

    fn build() -> Vec<stockboard_core::models::holding::Holding> {
        let holdings = SheetTable::parse(HOLDINGS_CSV).unwrap();
        let history = SheetTable::parse(HISTORY_CSV).unwrap();
        build_holdings(&holdings, &history).unwrap()
    }

    #[test]
    fn two_rows_two_holdings() {
        let result = build();
        assert_eq!(result.len(), 2);
        for h in &result {
            assert_eq!(h.price_history.len(), h.price_dates.len());
        }
    }

    #[test]
    fn ticker_is_trimmed_and_sector_lowercased() {
        let result = build();
        assert_eq!(result[0].ticker, "MC.PA");
        assert_eq!(result[0].sector, "luxe");
        assert_eq!(result[1].sector, "industrie");
    }

    #[test]
    fn display_fields_are_verbatim() {
        let lvmh = &build()[0];
        assert_eq!(lvmh.name, "LVMH");
        assert_eq!(lvmh.market_cap, "312,5 Md");
        assert_eq!(lvmh.currency, "EUR");
        assert_eq!(lvmh.drop_from_high, "-25,00%");
        assert_eq!(lvmh.daily_change, "+1,2%");
        assert_eq!(lvmh.moat, "Brand");
    }

    #[test]
    fn valuation_is_derived_per_row() {
        let lvmh = &build()[0];
        assert_eq!(lvmh.price, 600.0);
        assert_eq!(lvmh.high_price, 800.0);
        assert_eq!(lvmh.pe, Some(20.0));
        assert_eq!(lvmh.eps, Some(30.0));
        // luxe baseline 25 → fair value 750, discount (750 - 600) / 750 = 20%
        assert_eq!(lvmh.fair_value, Some(750.0));
        assert_eq!(lvmh.fair_value_gap, Some(20.0));
        // pe (50-20)/25 → 1.0, eps 35/25 → 1.0, drop 0.25/0.5 → 0.5
        assert_eq!(lvmh.score, 80);
    }

    #[test]
    fn blank_numeric_cells_become_none() {
        let air = &build()[1];
        assert_eq!(air.pe, None);
        assert_eq!(air.eps, None);
        assert_eq!(air.fair_value, None);
        assert_eq!(air.fair_value_gap, None);
        assert_eq!(air.score, 0);
        assert_eq!(air.moat, "-");
    }

    #[test]
    fn history_pairs_follow_row_position() {
        let result = build();
        assert_eq!(result[0].price_history, vec![120.5, 125.0]);
        assert_eq!(result[1].price_history, vec![80.1, 82.0]);
        assert_eq!(result[1].price_dates, vec!["2015-01-02", "2015-03-02"]);
    }

    #[test]
    fn duplicate_tickers_are_preserved() {
        let csv = "Ticker,Price,52 Week High,EPS,Sector\nAAPL,1,2,1,tech\nAAPL,3,4,1,tech\n";
        let holdings = SheetTable::parse(csv).unwrap();
        let result = build_holdings(&holdings, &SheetTable::default()).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].price, 1.0);
        assert_eq!(result[1].price, 3.0);
        assert!(result[0].price_history.is_empty());
    }

    #[test]
    fn blank_ticker_rows_are_skipped_without_shifting_history() {
        let csv = "Ticker,Price,52 Week High,EPS,Sector\n ,1,2,1,tech\nB,3,4,1,tech\n";
        let holdings = SheetTable::parse(csv).unwrap();
        let history = SheetTable::parse("Date,Close,Date,Close\n2020-01-01,1,2020-01-01,2\n").unwrap();
        let result = build_holdings(&holdings, &history).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].ticker, "B");
        assert_eq!(result[0].price_history, vec![2.0]);
    }

    #[test]
    fn header_aliases_resolve() {
        let table = SheetTable::parse("Symbole,Cours,Plus Haut 52S,BPA,Secteur,PER\n").unwrap();
        let schema = HoldingsSchema::resolve(&table).unwrap();
        assert_eq!(schema.ticker, 0);
        assert_eq!(schema.price, 1);
        assert_eq!(schema.high, 2);
        assert_eq!(schema.eps, 3);
        assert_eq!(schema.sector, 4);
        assert_eq!(schema.pe, Some(5));
        assert_eq!(schema.name, None);
    }

    #[test]
    fn missing_required_column_fails_fast() {
        let table = SheetTable::parse("Ticker,Price,52 Week High,Sector\nA,1,2,x\n").unwrap();
        let err = build_holdings(&table, &SheetTable::default()).unwrap_err();
        match err {
            CoreError::SchemaMismatch { sheet, column } => {
                assert_eq!(sheet, "holdings");
                assert_eq!(column, "EPS");
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Rent sheet
// ═══════════════════════════════════════════════════════════════════

mod rent {
    use super::*;

    #[test]
    fn parses_and_rekeys_to_iso() {
        let table = SheetTable::parse("Date,Rent\n15/01/2024,\"$12,50\"\n15/02/2024,13.1\n").unwrap();
        let records = parse_rent_sheet(&table).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2024-01-15");
        assert_eq!(records[0].rent, 12.5);
        assert_eq!(records[1].date, "2024-02-15");
        assert_eq!(records[1].rent, 13.1);
    }

    #[test]
    fn drops_missing_and_unparseable_rows() {
        let csv = "Date,Rent\n15/01/2024,\n,10\n2024-03-15,10\n15/04/2024,abc\n15/05/2024,11\n";
        let table = SheetTable::parse(csv).unwrap();
        let records = parse_rent_sheet(&table).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2024-05-15");
    }

    #[test]
    fn keeps_source_order() {
        let table = SheetTable::parse("Date,Rent\n15/03/2024,3\n15/01/2024,1\n").unwrap();
        let records = parse_rent_sheet(&table).unwrap();
        assert_eq!(records[0].date, "2024-03-15");
        assert_eq!(records[1].date, "2024-01-15");
    }

    #[test]
    fn missing_rent_column() {
        let table = SheetTable::parse("Date,Amount\n15/01/2024,1\n").unwrap();
        let err = parse_rent_sheet(&table).unwrap_err();
        assert!(matches!(err, CoreError::SchemaMismatch { ref column, .. } if column == "Rent"));
    }
}
