//! Public catalogue query
//!
//! Filters, sorts and paginates the inventory the way the storefront lists
//! vehicles. Queries are plain values built with chained setters and run
//! over an in-memory slice.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::link::slugify;
use crate::models::{Money, Vehicle, VehicleStatus};

/// Default page size of the catalogue grid
pub const DEFAULT_PER_PAGE: usize = 12;

/// Catalogue ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently listed first
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    /// Newest model year first; zero-km vehicles lead
    YearDesc,
}

/// Catalogue filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryQuery {
    /// `None` lists every status
    pub status: Option<VehicleStatus>,
    pub make: Option<String>,
    pub text: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub sort: SortOrder,
    pub page: usize,
    pub per_page: usize,
}

impl Default for InventoryQuery {
    fn default() -> Self {
        Self {
            status: Some(VehicleStatus::Available),
            make: None,
            text: None,
            min_price: None,
            max_price: None,
            min_year: None,
            max_year: None,
            sort: SortOrder::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
    /// Matches across all pages
    pub total: usize,
    pub total_pages: usize,
}

impl InventoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: Option<VehicleStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn make(mut self, make: impl Into<String>) -> Self {
        self.make = Some(make.into());
        self
    }

    /// Free-text search over make and model
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn year_range(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_year = min;
        self.max_year = max;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: usize, per_page: usize) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    /// Whether a vehicle passes every filter
    ///
    /// Year bounds compare the raw year, so the zero-km sentinel sits above
    /// any real model year.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if let Some(status) = self.status {
            if vehicle.status != status {
                return false;
            }
        }
        if let Some(make) = self.make.as_deref() {
            if !vehicle.make.trim().eq_ignore_ascii_case(make.trim()) {
                return false;
            }
        }
        if let Some(text) = self.text.as_deref() {
            let needle = slugify(text);
            let haystack = slugify(&format!("{} {}", vehicle.make, vehicle.model));
            if !needle.is_empty() && !haystack.contains(&needle) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| vehicle.price < min)
            || self.max_price.is_some_and(|max| vehicle.price > max)
        {
            return false;
        }
        if self.min_year.is_some_and(|min| vehicle.year < min)
            || self.max_year.is_some_and(|max| vehicle.year > max)
        {
            return false;
        }
        true
    }

    /// Filter, sort and cut out the requested page
    ///
    /// Page numbers start at 1; a page past the end is empty.
    pub fn run(&self, vehicles: &[Vehicle]) -> Page<Vehicle> {
        let mut matched: Vec<&Vehicle> = vehicles.iter().filter(|v| self.matches(v)).collect();

        match self.sort {
            SortOrder::Newest => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::PriceAsc => matched.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::YearDesc => matched.sort_by(|a, b| b.year.cmp(&a.year)),
        }

        let per_page = self.per_page.max(1);
        let page = self.page.max(1);
        let total = matched.len();
        let total_pages = total.div_ceil(per_page).max(1);

        let items = matched
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect();

        Page {
            items,
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ZERO_KM_YEAR;
    use chrono::{Duration, Utc};

    fn vehicle(make: &str, model: &str, year: i32, price: i64, age_days: i64) -> Vehicle {
        let mut v = Vehicle::new(make, model, year, Money::from_units(price));
        v.created_at = Utc::now() - Duration::days(age_days);
        v
    }

    fn stock() -> Vec<Vehicle> {
        let mut sold = vehicle("VW", "Gol", 2014, 30000, 1);
        sold.status = VehicleStatus::Sold;
        vec![
            vehicle("Fiat", "Uno", 2015, 25000, 10),
            vehicle("Citroën", "C4 Cactus", 2021, 89000, 5),
            vehicle("Fiat", "Pulse", ZERO_KM_YEAR, 110000, 2),
            sold,
        ]
    }

    fn models(page: &Page<Vehicle>) -> Vec<&str> {
        page.items.iter().map(|v| v.model.as_str()).collect()
    }

    #[test]
    fn test_default_lists_available_newest_first() {
        let page = InventoryQuery::new().run(&stock());
        assert_eq!(models(&page), vec!["Pulse", "C4 Cactus", "Uno"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_make_and_accent_insensitive_text() {
        let vehicles = stock();
        let fiat = InventoryQuery::new().make("fiat").run(&vehicles);
        assert_eq!(fiat.total, 2);

        let cactus = InventoryQuery::new().text("citroen cactus").run(&vehicles);
        assert_eq!(models(&cactus), vec!["C4 Cactus"]);

        let everything = InventoryQuery::new().status(None).text("gol").run(&vehicles);
        assert_eq!(models(&everything), vec!["Gol"]);
    }

    #[test]
    fn test_price_and_year_ranges() {
        let vehicles = stock();
        let mid = InventoryQuery::new()
            .price_range(Some(Money::from_units(20000)), Some(Money::from_units(90000)))
            .sort(SortOrder::PriceAsc)
            .run(&vehicles);
        assert_eq!(models(&mid), vec!["Uno", "C4 Cactus"]);

        let recent = InventoryQuery::new().year_range(Some(2020), None).run(&vehicles);
        assert_eq!(recent.total, 2);

        let used = InventoryQuery::new().year_range(None, Some(2024)).run(&vehicles);
        assert_eq!(used.total, 2);
    }

    #[test]
    fn test_year_desc_puts_zero_km_first() {
        let page = InventoryQuery::new().sort(SortOrder::YearDesc).run(&stock());
        assert_eq!(models(&page), vec!["Pulse", "C4 Cactus", "Uno"]);
    }

    #[test]
    fn test_pagination() {
        let vehicles = stock();
        let query = InventoryQuery::new().sort(SortOrder::PriceDesc).page(2, 2);
        let page = query.run(&vehicles);
        assert_eq!(models(&page), vec!["Uno"]);
        assert_eq!(page.total_pages, 2);

        let beyond = InventoryQuery::new().page(9, 2).run(&vehicles);
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 3);
    }
}
