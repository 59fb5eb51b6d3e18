//! Service layer for dealer-desk
//!
//! Business logic on top of the storage layer: validation, role checks,
//! audit logging, catalogue queries and imports.

pub mod import;
pub mod inventory;
pub mod vehicle;

pub use import::{ImportResult, ImportService};
pub use inventory::{InventoryQuery, Page, SortOrder, DEFAULT_PER_PAGE};
pub use vehicle::{NewExpense, NewVehicle, VehiclePatch, VehicleService};
