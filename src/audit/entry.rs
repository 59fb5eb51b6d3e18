//! Vehicle history entries
//!
//! Every entry is about one vehicle. It carries the vehicle's title and link
//! fragment as they were at the time, so history stays readable after the
//! vehicle is edited or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::link::EncodedLink;
use crate::models::{Expense, ExpenseId, Vehicle, VehicleId};

use super::diff::generate_diff;

/// What happened to the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Listed,
    Edited,
    Sold,
    Removed,
    ExpenseAdded,
    ExpenseRemoved,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Listed => "LISTED",
            Self::Edited => "EDITED",
            Self::Sold => "SOLD",
            Self::Removed => "REMOVED",
            Self::ExpenseAdded => "EXPENSE+",
            Self::ExpenseRemoved => "EXPENSE-",
        };
        f.pad(label)
    }
}

/// One line of vehicle history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub vehicle_id: VehicleId,
    /// "Make Model Year" at the time of the change
    pub vehicle: String,
    /// Deep-link fragment at the time of the change
    pub link: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<ExpenseId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    fn about(action: AuditAction, vehicle: &Vehicle) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            vehicle_id: vehicle.id.clone(),
            vehicle: vehicle.title(),
            link: EncodedLink::for_vehicle(vehicle).to_string(),
            expense_id: None,
            before: None,
            after: None,
            changes: None,
        }
    }

    /// A vehicle entered the inventory
    pub fn listed(vehicle: &Vehicle) -> Self {
        Self {
            after: serde_json::to_value(vehicle).ok(),
            ..Self::about(AuditAction::Listed, vehicle)
        }
    }

    /// A vehicle changed; recorded as a sale when it went from unsold to sold
    pub fn edited(before: &Vehicle, after: &Vehicle) -> Self {
        let action = if after.is_sold() && !before.is_sold() {
            AuditAction::Sold
        } else {
            AuditAction::Edited
        };
        let before = serde_json::to_value(before).ok();
        let after_value = serde_json::to_value(after).ok();
        let changes = match (&before, &after_value) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };
        Self {
            before,
            after: after_value,
            changes,
            ..Self::about(action, after)
        }
    }

    /// A vehicle left the inventory
    pub fn removed(vehicle: &Vehicle) -> Self {
        Self {
            before: serde_json::to_value(vehicle).ok(),
            ..Self::about(AuditAction::Removed, vehicle)
        }
    }

    pub fn expense_added(vehicle: &Vehicle, expense: &Expense) -> Self {
        Self {
            expense_id: Some(expense.id.clone()),
            after: serde_json::to_value(expense).ok(),
            changes: Some(format!("{}: {}", expense.description, expense.amount)),
            ..Self::about(AuditAction::ExpenseAdded, vehicle)
        }
    }

    pub fn expense_removed(vehicle: &Vehicle, expense: &Expense) -> Self {
        Self {
            expense_id: Some(expense.id.clone()),
            before: serde_json::to_value(expense).ok(),
            changes: Some(format!("{}: {}", expense.description, expense.amount)),
            ..Self::about(AuditAction::ExpenseRemoved, vehicle)
        }
    }

    /// Terminal rendering: a heading line, plus the changes when present
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {:<9} {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.action,
            self.vehicle,
            self.vehicle_id.short()
        );
        if let Some(changes) = &self.changes {
            output.push_str("\n  ");
            output.push_str(changes);
        }
        output
    }
}
