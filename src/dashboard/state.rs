//! Dashboard state and derived view
//!
//! The dashboard keeps a small, serializable state (period filter,
//! leaderboard size, group-by field, selected vehicle, role). It changes only
//! through [`DashboardAction`] values applied by [`reduce`], and every figure
//! on screen is derived from that state plus the vehicle list by
//! [`DashboardView::build`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::paths::DealerPaths;
use crate::config::settings::Settings;
use crate::error::DealerResult;
use crate::models::{Vehicle, VehicleId};
use crate::reports::{
    GroupCounts, GroupField, Leaderboard, MonthFilter, SalesFilter, SalesSummary, SalesTrend,
    StockSummary, VehicleFinancials, YearFilter,
};
use crate::storage::{load_document, save_document};

use super::permissions::{FieldAccess, Role, VehicleField};

fn default_leaderboard_size() -> usize {
    5
}

/// Persisted dashboard selections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    #[serde(default)]
    pub filter: SalesFilter,

    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    #[serde(default)]
    pub group_by: GroupField,

    #[serde(default)]
    pub selected_vehicle: Option<VehicleId>,

    #[serde(default)]
    pub role: Role,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            filter: SalesFilter::default(),
            leaderboard_size: default_leaderboard_size(),
            group_by: GroupField::default(),
            selected_vehicle: None,
            role: Role::default(),
        }
    }
}

impl DashboardState {
    /// Fresh state seeded from user settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            leaderboard_size: settings.leaderboard_size.max(1),
            role: settings.role,
            ..Self::default()
        }
    }

    /// Load the saved state, or seed one from settings if none exists
    pub fn load(paths: &DealerPaths, settings: &Settings) -> DealerResult<Self> {
        Ok(load_document(&paths.dashboard_file())?
            .unwrap_or_else(|| Self::from_settings(settings)))
    }

    pub fn save(&self, paths: &DealerPaths) -> DealerResult<()> {
        save_document(&paths.dashboard_file(), self)
    }
}

/// A change to the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    SetMonth(MonthFilter),
    SetYear(YearFilter),
    SetPeriod(SalesFilter),
    SetLeaderboardSize(usize),
    SetGroupBy(GroupField),
    SelectVehicle(VehicleId),
    ClearSelection,
    SetRole(Role),
    Reset,
}

/// Apply an action, returning the next state
pub fn reduce(state: DashboardState, action: DashboardAction) -> DashboardState {
    match action {
        DashboardAction::SetMonth(month) => DashboardState {
            filter: SalesFilter::new(month, state.filter.year),
            ..state
        },
        DashboardAction::SetYear(year) => DashboardState {
            filter: SalesFilter::new(state.filter.month, year),
            ..state
        },
        DashboardAction::SetPeriod(filter) => DashboardState { filter, ..state },
        DashboardAction::SetLeaderboardSize(size) => DashboardState {
            leaderboard_size: size.max(1),
            ..state
        },
        DashboardAction::SetGroupBy(group_by) => DashboardState { group_by, ..state },
        DashboardAction::SelectVehicle(id) => DashboardState {
            selected_vehicle: Some(id),
            ..state
        },
        DashboardAction::ClearSelection => DashboardState {
            selected_vehicle: None,
            ..state
        },
        DashboardAction::SetRole(role) => DashboardState { role, ..state },
        DashboardAction::Reset => DashboardState {
            role: state.role,
            ..DashboardState::default()
        },
    }
}

/// The selected vehicle as the current role may see it
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedVehicle {
    pub vehicle: Vehicle,
    /// Absent when the role may not view financial results
    pub financials: Option<VehicleFinancials>,
}

/// Everything the dashboard renders, derived from state
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub filter: SalesFilter,
    pub access: FieldAccess,
    pub sale_count: usize,
    /// Absent when the role may not view financial results
    pub summary: Option<SalesSummary>,
    pub stock: StockSummary,
    pub leaderboard: Leaderboard,
    pub groups: GroupCounts,
    /// Absent when the role may not view financial results
    pub trend: Option<SalesTrend>,
    pub month_over_month: Option<f64>,
    pub selected: Option<SelectedVehicle>,
}

impl DashboardView {
    /// Derive the view for `today`
    ///
    /// Sales figures cover the filtered period; the trend always covers the
    /// `trend_months` ending at `today`. Roles without access to financial
    /// results get no summary and no trend. A selection pointing at a vehicle
    /// that no longer exists is ignored.
    pub fn build(
        state: &DashboardState,
        vehicles: &[Vehicle],
        today: NaiveDate,
        trend_months: u32,
    ) -> Self {
        let access = FieldAccess::for_role(state.role);
        let show_financials = access.can_view(VehicleField::Financials);

        let sales = state.filter.apply(vehicles);
        let summary = SalesSummary::from_sales(sales.iter().copied());
        let trend = show_financials.then(|| SalesTrend::build(vehicles, today, trend_months));

        let selected = state.selected_vehicle.as_ref().and_then(|id| {
            vehicles.iter().find(|v| &v.id == id).map(|v| SelectedVehicle {
                vehicle: v.clone(),
                financials: show_financials.then(|| VehicleFinancials::of(v)),
            })
        });

        Self {
            filter: state.filter,
            sale_count: summary.sale_count,
            summary: show_financials.then_some(summary),
            stock: StockSummary::build(vehicles),
            leaderboard: Leaderboard::build(sales.iter().copied(), Some(state.leaderboard_size)),
            groups: GroupCounts::by(state.group_by, sales.iter().copied()),
            month_over_month: trend.as_ref().map(SalesTrend::month_over_month),
            trend,
            selected,
            access,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, VehicleStatus};
    use tempfile::TempDir;

    fn sale(seller: &str, category: &str, y: i32, m: u32, amount: i64) -> Vehicle {
        let mut v = Vehicle::new("Jeep", "Renegade", 2021, Money::zero());
        v.status = VehicleStatus::Sold;
        v.purchase_price = Money::from_units(amount - 1000);
        v.sold_price = Money::from_units(amount);
        v.sold_date = NaiveDate::from_ymd_opt(y, m, 15);
        v.salesperson = Some(seller.to_string());
        v.category = Some(category.to_string());
        v
    }

    fn fixtures() -> Vec<Vehicle> {
        vec![
            sale("Ana", "suv", 2025, 1, 90000),
            sale("Bruno", "hatch", 2025, 1, 50000),
            sale("Bruno", "hatch", 2025, 2, 60000),
            Vehicle::new("Fiat", "Mobi", 2023, Money::from_units(55000)),
        ]
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_reduce_updates_one_field() {
        let state = DashboardState::default();
        let state = reduce(state, DashboardAction::SetMonth(MonthFilter::Month(1)));
        let state = reduce(state, DashboardAction::SetYear(YearFilter::Year(2025)));
        assert_eq!(state.filter, SalesFilter::month_of(2025, 1));

        let state = reduce(state, DashboardAction::SetLeaderboardSize(0));
        assert_eq!(state.leaderboard_size, 1);

        let id = VehicleId::from("v-1");
        let state = reduce(state, DashboardAction::SelectVehicle(id.clone()));
        assert_eq!(state.selected_vehicle, Some(id));
        let state = reduce(state, DashboardAction::ClearSelection);
        assert!(state.selected_vehicle.is_none());
    }

    #[test]
    fn test_reset_keeps_role() {
        let state = reduce(DashboardState::default(), DashboardAction::SetRole(Role::Editor));
        let state = reduce(state, DashboardAction::SetGroupBy(GroupField::Make));
        let state = reduce(state, DashboardAction::Reset);
        assert_eq!(state.role, Role::Editor);
        assert_eq!(state.group_by, GroupField::Category);
    }

    #[test]
    fn test_view_for_january() {
        let vehicles = fixtures();
        let state = reduce(
            DashboardState::default(),
            DashboardAction::SetPeriod(SalesFilter::month_of(2025, 1)),
        );
        let view = DashboardView::build(&state, &vehicles, today(), 6);

        assert_eq!(view.sale_count, 2);
        let summary = view.summary.unwrap();
        assert_eq!(summary.total_revenue, Money::from_units(140000));
        assert_eq!(view.leaderboard.leader().unwrap().name, "Ana");
        assert_eq!(view.groups.most_frequent().unwrap().value, "suv");
        assert_eq!(view.stock.available, 1);
        assert_eq!(view.trend.unwrap().buckets.len(), 6);
        // February (60k) against January (140k)
        assert!((view.month_over_month.unwrap() - (-57.142857)).abs() < 0.001);
    }

    #[test]
    fn test_editor_view_hides_financials() {
        let vehicles = fixtures();
        let target = vehicles[0].id.clone();
        let state = DashboardState {
            role: Role::Editor,
            selected_vehicle: Some(target),
            ..DashboardState::default()
        };
        let view = DashboardView::build(&state, &vehicles, today(), 6);

        assert_eq!(view.sale_count, 3);
        assert!(view.summary.is_none());
        assert!(view.trend.is_none());
        assert!(view.month_over_month.is_none());
        assert_eq!(view.leaderboard.leader().unwrap().name, "Bruno");
        let selected = view.selected.unwrap();
        assert!(selected.financials.is_none());
    }

    #[test]
    fn test_stale_selection_is_ignored() {
        let state = DashboardState {
            selected_vehicle: Some(VehicleId::from("gone")),
            ..DashboardState::default()
        };
        let view = DashboardView::build(&state, &fixtures(), today(), 6);
        assert!(view.selected.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DealerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        let fresh = DashboardState::load(&paths, &settings).unwrap();
        assert_eq!(fresh, DashboardState::from_settings(&settings));

        let state = reduce(fresh, DashboardAction::SetGroupBy(GroupField::Model));
        state.save(&paths).unwrap();
        let loaded = DashboardState::load(&paths, &settings).unwrap();
        assert_eq!(loaded.group_by, GroupField::Model);
    }
}
