//! Per-vehicle cost model
//!
//! `cost = purchase + expenses`, `profit = revenue - cost` where revenue is
//! the sale price once sold and the list price before that.

use crate::models::{Money, Vehicle};

/// Return on investment as a percentage
///
/// Defined as 0 when there is no positive cost, never infinite or NaN.
pub fn roi_percent(profit: Money, cost: Money) -> f64 {
    if cost.is_positive() {
        profit.cents() as f64 / cost.cents() as f64 * 100.0
    } else {
        0.0
    }
}

/// Computed financial figures for one vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleFinancials {
    pub purchase: Money,
    pub expenses: Money,
    /// Purchase plus expenses
    pub cost: Money,
    /// Sale price if sold, otherwise list price
    pub revenue: Money,
    pub profit: Money,
    pub roi: f64,
}

impl VehicleFinancials {
    pub fn of(vehicle: &Vehicle) -> Self {
        let purchase = vehicle.purchase_price;
        let expenses = vehicle.total_expenses();
        let cost = purchase + expenses;
        let revenue = if vehicle.is_sold() {
            vehicle.sold_price
        } else {
            vehicle.price
        };
        let profit = revenue - cost;

        Self {
            purchase,
            expenses,
            cost,
            revenue,
            profit,
            roi: roi_percent(profit, cost),
        }
    }
}
