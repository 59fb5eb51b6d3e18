//! Reports module for dealer-desk
//!
//! Provides the sales reports behind the admin dashboard: period filtering,
//! per-vehicle financials, portfolio totals, salesperson leaderboard,
//! occurrence grouping and the monthly revenue trend.

pub mod filter;
pub mod financials;
pub mod grouping;
pub mod leaderboard;
pub mod summary;
pub mod trend;

pub use filter::{MonthFilter, PeriodParseError, SalesFilter, YearFilter};
pub use financials::{roi_percent, VehicleFinancials};
pub use grouping::{GroupCount, GroupCounts, GroupField, UNSPECIFIED};
pub use leaderboard::{Leaderboard, SalespersonStats};
pub use summary::{SalesSummary, StockSummary};
pub use trend::{
    percent_change, MonthlyBucket, SalesTrend, DEFAULT_TREND_MONTHS, MAX_TREND_MONTHS,
};
