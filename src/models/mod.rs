//! Core data models for dealer-desk
//!
//! Vehicles, their expenses, money and identifiers, plus the forgiving
//! deserialization helpers that let backend records load even when some
//! fields are malformed.

pub mod dates;
pub mod expense;
pub mod ids;
pub mod lenient;
pub mod money;
pub mod vehicle;

pub use expense::{Expense, ExpenseCategory};
pub use ids::{ExpenseId, VehicleId};
pub use money::{Money, MoneyFormat};
pub use vehicle::{Vehicle, VehicleStatus, ZERO_KM_YEAR};
