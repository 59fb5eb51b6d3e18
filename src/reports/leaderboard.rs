//! Salesperson ranking by revenue

use std::collections::HashMap;

use crate::models::{Money, Vehicle};

use super::grouping::UNSPECIFIED;

/// Sales attributed to one salesperson
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalespersonStats {
    pub name: String,
    pub sales: usize,
    pub revenue: Money,
}

/// Salespeople ordered by revenue, highest first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Leaderboard {
    pub entries: Vec<SalespersonStats>,
}

impl Leaderboard {
    /// Rank salespeople over a set of sales
    ///
    /// Sales without a salesperson are credited to [`UNSPECIFIED`]. Equal
    /// revenues keep first-seen order. `top` truncates the ranking.
    pub fn build<'a, I>(sales: I, top: Option<usize>) -> Self
    where
        I: IntoIterator<Item = &'a Vehicle>,
    {
        let mut entries: Vec<SalespersonStats> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for vehicle in sales {
            let name = vehicle
                .salesperson
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(UNSPECIFIED);

            let i = match index.get(name) {
                Some(&i) => i,
                None => {
                    index.insert(name.to_string(), entries.len());
                    entries.push(SalespersonStats {
                        name: name.to_string(),
                        sales: 0,
                        revenue: Money::zero(),
                    });
                    entries.len() - 1
                }
            };
            entries[i].sales += 1;
            entries[i].revenue += vehicle.sold_price;
        }

        entries.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        if let Some(n) = top {
            entries.truncate(n);
        }

        Self { entries }
    }

    pub fn leader(&self) -> Option<&SalespersonStats> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
