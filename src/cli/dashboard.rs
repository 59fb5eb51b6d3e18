//! Dashboard CLI commands
//!
//! Each command maps to one [`DashboardAction`]; the reduced state is saved
//! so later commands and reports pick it up.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::dashboard::{reduce, DashboardAction, DashboardState, DashboardView, Role};
use crate::display::dashboard::format_dashboard;
use crate::error::{DealerError, DealerResult};
use crate::reports::{GroupField, MonthFilter, YearFilter};
use crate::services::VehicleService;
use crate::storage::Storage;

/// Dashboard subcommands
#[derive(Subcommand)]
pub enum DashboardCommands {
    /// Render the dashboard
    Show,
    /// Select the month (1-12, or "all")
    SetMonth { month: String },
    /// Select the year, or "all"
    SetYear { year: String },
    /// Number of salespeople on the leaderboard
    SetTop { size: usize },
    /// Field used for the sales breakdown
    SetGroupBy {
        #[arg(value_enum)]
        field: GroupField,
    },
    /// Select a vehicle for the detail panel
    Select {
        /// Vehicle id, short id, link or URL
        vehicle: String,
    },
    /// Clear the selected vehicle
    Clear,
    /// Switch the active role
    Role {
        #[arg(value_enum)]
        role: Role,
    },
    /// Restore defaults, keeping the role
    Reset,
}

/// Handle a dashboard command
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DashboardCommands,
) -> DealerResult<()> {
    let state = DashboardState::load(storage.paths(), settings)?;

    let action = match cmd {
        DashboardCommands::Show => {
            let vehicles = storage.vehicles.get_all()?;
            let today = chrono::Local::now().date_naive();
            let view = DashboardView::build(&state, &vehicles, today, settings.trend_months);
            print!("{}", format_dashboard(&view, &settings.money_format()));
            return Ok(());
        }
        DashboardCommands::SetMonth { month } => DashboardAction::SetMonth(
            MonthFilter::parse(&month).map_err(|e| DealerError::Validation(e.to_string()))?,
        ),
        DashboardCommands::SetYear { year } => DashboardAction::SetYear(
            YearFilter::parse(&year).map_err(|e| DealerError::Validation(e.to_string()))?,
        ),
        DashboardCommands::SetTop { size } => DashboardAction::SetLeaderboardSize(size),
        DashboardCommands::SetGroupBy { field } => DashboardAction::SetGroupBy(field),
        DashboardCommands::Select { vehicle } => {
            let vehicle = VehicleService::new(storage).require(&vehicle)?;
            DashboardAction::SelectVehicle(vehicle.id)
        }
        DashboardCommands::Clear => DashboardAction::ClearSelection,
        DashboardCommands::Role { role } => DashboardAction::SetRole(role),
        DashboardCommands::Reset => DashboardAction::Reset,
    };

    let next = reduce(state, action);
    next.save(storage.paths())?;

    println!(
        "Dashboard: {} | top {} | by {} | role {}",
        next.filter, next.leaderboard_size, next.group_by, next.role
    );
    if let Some(id) = &next.selected_vehicle {
        println!("Selected vehicle: {}", id);
    }

    Ok(())
}
