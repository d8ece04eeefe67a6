use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::holding::Holding;

/// A named partition of tracked holdings.
///
/// Each group is published as its own pair of sheets (current metrics and
/// ten years of history) and cached as its own snapshot dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioGroup {
    /// Plan d'Épargne en Actions (French tax-advantaged equity account)
    Pea,
    /// Compte-Titres Ordinaire (regular brokerage account)
    Cto,
}

impl PortfolioGroup {
    /// Every group, in lookup priority order.
    pub const ALL: [PortfolioGroup; 2] = [PortfolioGroup::Pea, PortfolioGroup::Cto];

    /// Dataset identifier used for snapshot folders and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            PortfolioGroup::Pea => "PEA",
            PortfolioGroup::Cto => "CTO",
        }
    }
}

impl std::fmt::Display for PortfolioGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PortfolioGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PEA" => Ok(PortfolioGroup::Pea),
            "CTO" => Ok(PortfolioGroup::Cto),
            other => Err(format!("Unknown portfolio group '{other}'")),
        }
    }
}

/// Holdings of every group, keyed by group.
///
/// Serializes as `{"pea": [...], "cto": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolios {
    pub groups: BTreeMap<PortfolioGroup, Vec<Holding>>,
}

impl Portfolios {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: PortfolioGroup, holdings: Vec<Holding>) {
        self.groups.insert(group, holdings);
    }

    /// Holdings of one group (empty slice if the group was never loaded).
    pub fn get(&self, group: PortfolioGroup) -> &[Holding] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of holdings across all groups.
    pub fn total_holdings(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
