//! Path management for dealer-desk
//!
//! ## Path Resolution Order
//!
//! 1. `DEALER_DESK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/dealer-desk` or `~/.config/dealer-desk`
//! 3. Windows: `%APPDATA%\dealer-desk`

use std::path::PathBuf;

use crate::error::DealerError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "DEALER_DESK_DATA_DIR";

const APP_DIR_NAME: &str = "dealer-desk";

/// Manages all paths used by dealer-desk
#[derive(Debug, Clone)]
pub struct DealerPaths {
    base_dir: PathBuf,
}

impl DealerPaths {
    /// Resolve the base directory from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, DealerError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create DealerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Data directory (`<base>/data`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default directory for CSV reports (`<base>/exports`)
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Persisted dashboard state
    pub fn dashboard_file(&self) -> PathBuf {
        self.base_dir.join("dashboard.json")
    }

    /// Local copy of the vehicle inventory
    pub fn vehicles_file(&self) -> PathBuf {
        self.data_dir().join("vehicles.json")
    }

    /// Ensure the base, data and exports directories exist
    pub fn ensure_directories(&self) -> Result<(), DealerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DealerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| DealerError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.exports_dir())
            .map_err(|e| DealerError::Io(format!("Failed to create exports directory: {}", e)))?;

        Ok(())
    }

    /// Check if dealer-desk has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory for the current platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, DealerError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join(APP_DIR_NAME));
        }
    }

    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| DealerError::Config("Could not determine home directory".into()))?;
    Ok(dirs.home_dir().join(".config").join(APP_DIR_NAME))
}

/// Resolve the default base directory for the current platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, DealerError> {
    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| DealerError::Config("Could not determine APPDATA directory".into()))?;
    Ok(dirs.config_dir().join(APP_DIR_NAME))
}
