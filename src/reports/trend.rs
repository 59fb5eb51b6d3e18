//! Monthly revenue series for the trend chart

use chrono::{Datelike, NaiveDate};

use crate::models::{Money, Vehicle};

/// Default number of months in the series
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Longest series the trend will build (ten years)
pub const MAX_TREND_MONTHS: u32 = 120;

const MONTH_ABBR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Revenue and sale count for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub revenue: Money,
    pub sales: usize,
}

impl MonthlyBucket {
    /// Chart label, e.g. `jan/2025`
    pub fn label(&self) -> String {
        let idx = (self.month.clamp(1, 12) - 1) as usize;
        format!("{}/{}", MONTH_ABBR[idx], self.year)
    }

    fn key(&self) -> i64 {
        month_key(self.year, self.month)
    }
}

fn month_key(year: i32, month: u32) -> i64 {
    year as i64 * 12 + (month as i64 - 1)
}

fn from_key(key: i64) -> (i32, u32) {
    (key.div_euclid(12) as i32, (key.rem_euclid(12) + 1) as u32)
}

/// Trailing monthly series ending at the current month, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesTrend {
    pub buckets: Vec<MonthlyBucket>,
}

impl SalesTrend {
    /// Bucket sold vehicles into the `months` calendar months ending at `today`
    ///
    /// `months` is clamped to `1..=MAX_TREND_MONTHS`.
    pub fn build<'a, I>(vehicles: I, today: NaiveDate, months: u32) -> Self
    where
        I: IntoIterator<Item = &'a Vehicle>,
    {
        let months = months.clamp(1, MAX_TREND_MONTHS);
        let current = month_key(today.year(), today.month());
        let first = current - months as i64 + 1;

        let mut buckets: Vec<MonthlyBucket> = (first..=current)
            .map(|key| {
                let (year, month) = from_key(key);
                MonthlyBucket {
                    year,
                    month,
                    revenue: Money::zero(),
                    sales: 0,
                }
            })
            .collect();

        for vehicle in vehicles {
            if !vehicle.is_sold() {
                continue;
            }
            let Some(date) = vehicle.sold_date else {
                continue;
            };
            let key = month_key(date.year(), date.month());
            if key < first || key > current {
                continue;
            }
            let bucket = &mut buckets[(key - first) as usize];
            bucket.revenue += vehicle.sold_price;
            bucket.sales += 1;
        }

        Self { buckets }
    }

    /// The most recent completed month (the one before the current month)
    pub fn last_completed(&self) -> Option<&MonthlyBucket> {
        self.buckets.len().checked_sub(2).map(|i| &self.buckets[i])
    }

    /// The month before the most recent completed month
    pub fn previous_completed(&self) -> Option<&MonthlyBucket> {
        self.buckets.len().checked_sub(3).map(|i| &self.buckets[i])
    }

    /// Month-over-month revenue change in percent
    ///
    /// Compares the last completed month with the one before it. When the
    /// earlier month had no revenue the trend is 100 if the later one did,
    /// otherwise 0.
    pub fn month_over_month(&self) -> f64 {
        let (Some(current), Some(previous)) = (self.last_completed(), self.previous_completed())
        else {
            return 0.0;
        };
        debug_assert!(previous.key() < current.key());
        percent_change(current.revenue, previous.revenue)
    }

    pub fn max_revenue(&self) -> Money {
        self.buckets
            .iter()
            .map(|b| b.revenue)
            .max()
            .unwrap_or_default()
    }
}

/// Percent change guarded against a zero base
pub fn percent_change(current: Money, previous: Money) -> f64 {
    if previous.is_zero() {
        if current.is_zero() {
            0.0
        } else {
            100.0
        }
    } else {
        (current.cents() - previous.cents()) as f64 / previous.cents() as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleStatus;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sale(date: NaiveDate, amount: i64) -> Vehicle {
        let mut v = Vehicle::new("Ford", "Ka", 2019, Money::zero());
        v.status = VehicleStatus::Sold;
        v.sold_price = Money::from_units(amount);
        v.sold_date = Some(date);
        v
    }

    #[test]
    fn test_six_months_across_year_boundary() {
        let trend = SalesTrend::build(std::iter::empty(), d(2025, 3, 15), 6);
        let labels: Vec<_> = trend.buckets.iter().map(|b| b.label()).collect();
        assert_eq!(
            labels,
            vec!["out/2024", "nov/2024", "dez/2024", "jan/2025", "fev/2025", "mar/2025"]
        );
    }

    #[test]
    fn test_buckets_revenue_and_count() {
        let vehicles = vec![
            sale(d(2025, 2, 1), 10000),
            sale(d(2025, 2, 28), 5000),
            sale(d(2025, 3, 2), 7000),
            sale(d(2024, 9, 30), 99999),
        ];
        let mut unsold = sale(d(2025, 2, 10), 1234);
        unsold.status = VehicleStatus::Available;

        let mut all = vehicles.clone();
        all.push(unsold);
        let trend = SalesTrend::build(&all, d(2025, 3, 15), 6);

        let feb = &trend.buckets[4];
        assert_eq!((feb.year, feb.month), (2025, 2));
        assert_eq!(feb.revenue, Money::from_units(15000));
        assert_eq!(feb.sales, 2);
        assert_eq!(trend.buckets[5].sales, 1);
        assert_eq!(trend.buckets[0].sales, 0);
        assert_eq!(trend.max_revenue(), Money::from_units(15000));
    }

    #[test]
    fn test_month_over_month() {
        let vehicles = vec![sale(d(2025, 1, 5), 10000), sale(d(2025, 2, 5), 15000)];
        let trend = SalesTrend::build(&vehicles, d(2025, 3, 1), 6);
        assert!((trend.month_over_month() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_month_over_month_zero_base() {
        let vehicles = vec![sale(d(2025, 2, 5), 15000)];
        let trend = SalesTrend::build(&vehicles, d(2025, 3, 1), 6);
        assert_eq!(trend.month_over_month(), 100.0);

        let empty = SalesTrend::build(std::iter::empty(), d(2025, 3, 1), 6);
        assert_eq!(empty.month_over_month(), 0.0);
    }

    #[test]
    fn test_short_window_has_no_trend() {
        let trend = SalesTrend::build(std::iter::empty(), d(2025, 3, 1), 2);
        assert_eq!(trend.buckets.len(), 2);
        assert_eq!(trend.month_over_month(), 0.0);
    }

    #[test]
    fn test_window_is_clamped() {
        let huge = SalesTrend::build(std::iter::empty(), d(2025, 3, 1), u32::MAX);
        assert_eq!(huge.buckets.len(), MAX_TREND_MONTHS as usize);
        assert_eq!(huge.buckets.last().unwrap().label(), "mar/2025");

        let zero = SalesTrend::build(std::iter::empty(), d(2025, 3, 1), 0);
        assert_eq!(zero.buckets.len(), 1);
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(Money::from_units(50), Money::from_units(100)), -50.0);
        assert_eq!(percent_change(Money::zero(), Money::zero()), 0.0);
        assert_eq!(percent_change(Money::from_units(-5), Money::zero()), 100.0);
    }
}
