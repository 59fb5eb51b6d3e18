//! Admin dashboard: explicit state, derived view and role-gated fields

pub mod permissions;
pub mod state;

pub use permissions::{FieldAccess, Role, VehicleField};
pub use state::{reduce, DashboardAction, DashboardState, DashboardView, SelectedVehicle};
