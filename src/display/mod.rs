//! Display formatting for terminal output
//!
//! Tables for the catalogue, the role-aware vehicle detail view, and text
//! renderings of reports and the dashboard.

pub mod dashboard;
pub mod report;
pub mod vehicle;

pub use dashboard::format_dashboard;
pub use report::{
    format_bar, format_change, format_groups, format_leaderboard, format_percent, format_stock,
    format_summary, format_trend,
};
pub use vehicle::{format_expense_list, format_vehicle_details, format_vehicle_list, format_vehicle_page};
