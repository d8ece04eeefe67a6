//! Sector-relative valuation: fair value, discount and attractiveness score.

use crate::sheets::number::round2;

/// Baseline P/E applied to sectors missing from [`SECTOR_BASELINE_PE`].
pub const DEFAULT_BASELINE_PE: f64 = 15.0;

/// Assumed "fair" price/earnings multiple per sector (lowercase keys).
///
/// Sheets are maintained in French, with a few English labels mixed in,
/// so both spellings are listed.
pub const SECTOR_BASELINE_PE: &[(&str, f64)] = &[
    ("luxe", 25.0),
    ("luxury", 25.0),
    ("technologie", 28.0),
    ("technology", 28.0),
    ("santé", 22.0),
    ("sante", 22.0),
    ("healthcare", 22.0),
    ("consommation", 20.0),
    ("consumer", 20.0),
    ("industrie", 18.0),
    ("industrials", 18.0),
    ("services publics", 16.0),
    ("utilities", 16.0),
    ("immobilier", 15.0),
    ("real estate", 15.0),
    ("matériaux", 14.0),
    ("materials", 14.0),
    ("télécommunications", 14.0),
    ("communication", 14.0),
    ("finance", 12.0),
    ("financial services", 12.0),
    ("énergie", 10.0),
    ("energie", 10.0),
    ("energy", 10.0),
];

const PE_WEIGHT: f64 = 0.3;
const EPS_WEIGHT: f64 = 0.3;
const DROP_WEIGHT: f64 = 0.4;

/// EPS at or below this floor scores zero; the EPS score saturates at floor + range.
const EPS_FLOOR: f64 = -5.0;
const EPS_RANGE: f64 = 25.0;

/// A 50% distance from the 52-week high saturates the drop score.
const DROP_SATURATION: f64 = 0.5;

/// Baseline P/E for a sector (case-insensitive, surrounding spaces ignored).
pub fn baseline_pe(sector: &str) -> f64 {
    let key = sector.trim().to_lowercase();
    SECTOR_BASELINE_PE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, pe)| *pe)
        .unwrap_or(DEFAULT_BASELINE_PE)
}

/// Fair value (`eps × baseline P/E`) and the discount of `price` against it.
///
/// Returns `(discount_pct, fair_value)`, both rounded to two decimals.
/// Non-positive EPS has no fair value and yields `(0.0, 0.0)`.
/// NaN inputs propagate, so a missing EPS produces NaN for both values.
pub fn fair_value_and_discount(sector: &str, eps: f64, price: f64) -> (f64, f64) {
    if eps <= 0.0 {
        return (0.0, 0.0);
    }
    let fair_value = eps * baseline_pe(sector);
    let discount = (fair_value - price) / fair_value * 100.0;
    (round2(discount), round2(fair_value))
}

/// Attractiveness score in [0, 100].
///
/// Weighted blend of three sub-scores, each clamped to [0, 1]:
/// - P/E against twice the sector baseline (30%)
/// - EPS between -5 and 20 (30%)
/// - distance from the 52-week high, either direction (40%)
///
/// Any input that leaves the blend undefined (NaN) scores 0.
pub fn attractiveness_score(sector: &str, pe: f64, eps: f64, price: f64, high: f64) -> u8 {
    let base = baseline_pe(sector);
    let drop = if high != 0.0 { (price - high) / high } else { 0.0 };

    // f64::clamp keeps NaN, which the finiteness check below rejects.
    let pe_score = ((2.0 * base - pe) / base).clamp(0.0, 1.0);
    let eps_score = ((eps - EPS_FLOOR) / EPS_RANGE).clamp(0.0, 1.0);
    let drop_score = (drop.abs() / DROP_SATURATION).clamp(0.0, 1.0);

    let total = 100.0 * (PE_WEIGHT * pe_score + EPS_WEIGHT * eps_score + DROP_WEIGHT * drop_score);
    if !total.is_finite() {
        return 0;
    }
    total.round().clamp(0.0, 100.0) as u8
}
