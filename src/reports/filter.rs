//! Period filter for sales reports

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Vehicle;

/// Month selector: a calendar month or every month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MonthFilter {
    #[default]
    All,
    Month(u32),
}

impl MonthFilter {
    /// Parse "all"/"todos" or a month number 1-12
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim().to_lowercase();
        if s == "all" || s == "todos" {
            return Ok(Self::All);
        }
        match s.parse::<u32>() {
            Ok(m) if (1..=12).contains(&m) => Ok(Self::Month(m)),
            _ => Err(PeriodParseError::InvalidMonth(s)),
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Month(m) => date.month() == *m,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "todos"),
            Self::Month(m) => write!(f, "{:02}", m),
        }
    }
}

/// Year selector: a calendar year or every year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    /// Parse "all"/"todos" or a four-digit year
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim().to_lowercase();
        if s == "all" || s == "todos" {
            return Ok(Self::All);
        }
        match s.parse::<i32>() {
            Ok(y) if (1900..=9999).contains(&y) => Ok(Self::Year(y)),
            _ => Err(PeriodParseError::InvalidYear(s)),
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Year(y) => date.year() == *y,
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "todos"),
            Self::Year(y) => write!(f, "{}", y),
        }
    }
}

/// Selects sold vehicles by sale month and year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalesFilter {
    #[serde(default)]
    pub month: MonthFilter,
    #[serde(default)]
    pub year: YearFilter,
}

impl SalesFilter {
    pub fn new(month: MonthFilter, year: YearFilter) -> Self {
        Self { month, year }
    }

    /// Filter for a single calendar month
    pub fn month_of(year: i32, month: u32) -> Self {
        Self::new(MonthFilter::Month(month), YearFilter::Year(year))
    }

    /// Whether a vehicle counts as a sale inside this period
    ///
    /// Only sold vehicles with a sale date qualify.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if !vehicle.is_sold() {
            return false;
        }
        match vehicle.sold_date {
            Some(date) => self.month.matches(date) && self.year.matches(date),
            None => false,
        }
    }

    /// Matching sales, most recent sale first
    ///
    /// The sort is stable, so sales on the same day keep their input order.
    pub fn apply<'a>(&self, vehicles: &'a [Vehicle]) -> Vec<&'a Vehicle> {
        let mut sales: Vec<&Vehicle> = vehicles.iter().filter(|v| self.matches(v)).collect();
        sales.sort_by(|a, b| b.sold_date.cmp(&a.sold_date));
        sales
    }

    /// Report file name, e.g. `relatorio_vendas_01_2025.csv`
    pub fn report_filename(&self) -> String {
        format!("relatorio_vendas_{}_{}.csv", self.month, self.year)
    }
}

impl fmt::Display for SalesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.month, self.year) {
            (MonthFilter::All, YearFilter::All) => write!(f, "all time"),
            (MonthFilter::All, YearFilter::Year(y)) => write!(f, "{}", y),
            (MonthFilter::Month(m), YearFilter::All) => write!(f, "month {:02}, all years", m),
            (MonthFilter::Month(m), YearFilter::Year(y)) => write!(f, "{:02}/{}", m, y),
        }
    }
}

/// Errors parsing period selectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidMonth(String),
    InvalidYear(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMonth(s) => write!(f, "Invalid month '{}': use 1-12 or 'all'", s),
            Self::InvalidYear(s) => write!(f, "Invalid year '{}': use YYYY or 'all'", s),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, VehicleStatus};

    fn sold(id: &str, date: Option<NaiveDate>) -> Vehicle {
        let mut v = Vehicle::new("Fiat", "Uno", 2015, Money::from_units(30000));
        v.id = id.into();
        v.status = VehicleStatus::Sold;
        v.sold_date = date;
        v
    }

    fn d(y: i32, m: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, day)
    }

    #[test]
    fn test_parse_selectors() {
        assert_eq!(MonthFilter::parse("all").unwrap(), MonthFilter::All);
        assert_eq!(MonthFilter::parse("3").unwrap(), MonthFilter::Month(3));
        assert!(MonthFilter::parse("13").is_err());
        assert!(MonthFilter::parse("0").is_err());
        assert_eq!(YearFilter::parse("2025").unwrap(), YearFilter::Year(2025));
        assert_eq!(YearFilter::parse("TODOS").unwrap(), YearFilter::All);
        assert!(YearFilter::parse("25x").is_err());
    }

    #[test]
    fn test_only_sold_vehicles_in_period() {
        let mut available = sold("a", d(2025, 1, 5));
        available.status = VehicleStatus::Available;
        let vehicles = vec![
            sold("jan", d(2025, 1, 10)),
            sold("feb", d(2025, 2, 10)),
            sold("jan-2024", d(2024, 1, 10)),
            sold("undated", None),
            available,
        ];

        let filter = SalesFilter::month_of(2025, 1);
        let ids: Vec<_> = filter.apply(&vehicles).iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["jan"]);

        let all_januaries = SalesFilter::new(MonthFilter::Month(1), YearFilter::All);
        assert_eq!(all_januaries.apply(&vehicles).len(), 2);

        assert_eq!(SalesFilter::default().apply(&vehicles).len(), 3);
    }

    #[test]
    fn test_sorted_newest_first_and_stable() {
        let vehicles = vec![
            sold("old", d(2025, 1, 1)),
            sold("same-1", d(2025, 1, 20)),
            sold("new", d(2025, 1, 31)),
            sold("same-2", d(2025, 1, 20)),
        ];
        let ids: Vec<_> = SalesFilter::default()
            .apply(&vehicles)
            .iter()
            .map(|v| v.id.as_str())
            .collect();
        assert_eq!(ids, vec!["new", "same-1", "same-2", "old"]);
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(
            SalesFilter::month_of(2025, 1).report_filename(),
            "relatorio_vendas_01_2025.csv"
        );
        assert_eq!(
            SalesFilter::default().report_filename(),
            "relatorio_vendas_todos_todos.csv"
        );
    }
}
