//! Configuration module for dealer-desk
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::DealerPaths;
pub use settings::Settings;
