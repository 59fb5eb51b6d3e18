//! Sales totals and stock snapshot for the dashboard

use crate::models::{Money, Vehicle, VehicleStatus};

use super::financials::roi_percent;

/// Portfolio totals over a set of sales
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SalesSummary {
    pub sale_count: usize,
    pub total_purchase: Money,
    pub total_expenses: Money,
    /// Purchase plus expenses
    pub total_cost: Money,
    /// Sum of sale prices
    pub total_revenue: Money,
    pub net_profit: Money,
    /// Portfolio ROI percentage, 0 when there is no cost
    pub roi: f64,
    /// Revenue per sale, zero when there are no sales
    pub average_ticket: Money,
}

impl SalesSummary {
    /// Fold a set of (already filtered) sales into totals
    pub fn from_sales<'a, I>(sales: I) -> Self
    where
        I: IntoIterator<Item = &'a Vehicle>,
    {
        let mut summary = Self::default();

        for vehicle in sales {
            summary.sale_count += 1;
            summary.total_purchase += vehicle.purchase_price;
            summary.total_expenses += vehicle.total_expenses();
            summary.total_revenue += vehicle.sold_price;
        }

        summary.total_cost = summary.total_purchase + summary.total_expenses;
        summary.net_profit = summary.total_revenue - summary.total_cost;
        summary.roi = roi_percent(summary.net_profit, summary.total_cost);
        summary.average_ticket = if summary.sale_count == 0 {
            Money::zero()
        } else {
            Money::from_cents(summary.total_revenue.cents() / summary.sale_count as i64)
        };

        summary
    }
}

/// Inventory state across all vehicles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StockSummary {
    pub available: usize,
    pub sold: usize,
    pub maintenance: usize,
    pub unavailable: usize,
    /// List value of available vehicles
    pub stock_value: Money,
    /// Purchase plus expenses of vehicles not yet sold
    pub capital_tied_up: Money,
}

impl StockSummary {
    pub fn build<'a, I>(vehicles: I) -> Self
    where
        I: IntoIterator<Item = &'a Vehicle>,
    {
        let mut stock = Self::default();

        for vehicle in vehicles {
            match vehicle.status {
                VehicleStatus::Available => {
                    stock.available += 1;
                    stock.stock_value += vehicle.price;
                }
                VehicleStatus::Sold => stock.sold += 1,
                VehicleStatus::Maintenance => stock.maintenance += 1,
                VehicleStatus::Unavailable => stock.unavailable += 1,
            }
            if !vehicle.is_sold() {
                stock.capital_tied_up += vehicle.purchase_price + vehicle.total_expenses();
            }
        }

        stock
    }

    pub fn total(&self) -> usize {
        self.available + self.sold + self.maintenance + self.unavailable
    }
}
