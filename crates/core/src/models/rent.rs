use serde::{Deserialize, Serialize};

/// One rent observation, as persisted in the rent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentRecord {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    pub rent: f64,
}

/// Rent index in the column-oriented shape the front end charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RentIndex {
    pub dates: Vec<String>,
    pub rents: Vec<f64>,
}

impl RentIndex {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl From<Vec<RentRecord>> for RentIndex {
    fn from(records: Vec<RentRecord>) -> Self {
        let (dates, rents) = records.into_iter().map(|r| (r.date, r.rent)).unzip();
        Self { dates, rents }
    }
}
