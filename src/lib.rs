//! dealer-desk - Back-office tools for a used-car dealership
//!
//! This library provides the core functionality behind the `dealer` CLI:
//! shareable deep links for vehicle detail pages, a local copy of the
//! inventory with an audit trail, and the financial reports of the admin
//! dashboard.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Vehicles, expenses, money and identifiers
//! - `link`: Reversible vehicle deep links
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `reports`: Period filters and sales aggregation
//! - `export`: Spreadsheet-friendly CSV reports
//! - `dashboard`: Role permissions, dashboard state and derived view
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use dealer_desk::config::{paths::DealerPaths, settings::Settings};
//!
//! let paths = DealerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod export;
pub mod link;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::DealerError;
