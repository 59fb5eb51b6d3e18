//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod dashboard;
pub mod expense;
pub mod import;
pub mod link;
pub mod report;
pub mod vehicle;

pub use audit::handle_audit_command;
pub use dashboard::{handle_dashboard_command, DashboardCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use import::handle_import_command;
pub use link::{handle_link_command, LinkCommands};
pub use report::{handle_report_command, ReportCommands};
pub use vehicle::{handle_vehicle_command, VehicleCommands};

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::dashboard::{DashboardState, Role};
use crate::error::{DealerError, DealerResult};
use crate::models::{Money, ZERO_KM_YEAR};
use crate::storage::Storage;

/// Role stored with the dashboard, falling back to the configured one
pub fn active_role(storage: &Storage, settings: &Settings) -> DealerResult<Role> {
    Ok(DashboardState::load(storage.paths(), settings)?.role)
}

pub(crate) fn parse_money(value: &str) -> DealerResult<Money> {
    Money::parse(value)
        .map_err(|e| DealerError::Validation(format!("Invalid amount '{}': {}", value, e)))
}

/// Accepts ISO dates and the day-first form used on invoices
pub(crate) fn parse_date(value: &str) -> DealerResult<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .map_err(|_| {
            DealerError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or DD/MM/YYYY",
                value
            ))
        })
}

pub(crate) fn parse_date_or_today(value: Option<&str>) -> DealerResult<NaiveDate> {
    match value {
        Some(v) => parse_date(v),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Model year, with "0km" for brand-new vehicles
pub(crate) fn parse_year(value: &str) -> DealerResult<i32> {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    if normalized == "0km" {
        return Ok(ZERO_KM_YEAR);
    }
    normalized
        .parse()
        .map_err(|_| DealerError::Validation(format!("Invalid year: '{}'", value)))
}
