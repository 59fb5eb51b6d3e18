//! User settings for dealer-desk
//!
//! Locale formatting, report defaults, the active role and the public site
//! URL used when sharing vehicle links.

use serde::{Deserialize, Serialize};

use super::paths::DealerPaths;
use crate::dashboard::Role;
use crate::error::DealerError;
use crate::models::money::MoneyFormat;
use crate::reports::{DEFAULT_TREND_MONTHS, MAX_TREND_MONTHS};

/// Largest leaderboard the settings accept
pub const MAX_LEADERBOARD_SIZE: usize = 100;

/// User settings for dealer-desk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Decimal separator for currency and percentages
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,

    /// Thousands separator for terminal output
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,

    /// Field delimiter for CSV exports
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: char,

    /// Number of salespeople shown on the leaderboard
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    /// Number of months in the revenue trend
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,

    /// Role used for field visibility and edits
    #[serde(default)]
    pub role: Role,

    /// Public site base URL for share links
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_decimal_separator() -> char {
    ','
}

fn default_thousands_separator() -> char {
    '.'
}

fn default_csv_delimiter() -> char {
    ';'
}

fn default_leaderboard_size() -> usize {
    5
}

fn default_trend_months() -> u32 {
    DEFAULT_TREND_MONTHS
}

fn default_site_url() -> String {
    "http://localhost:5173".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            decimal_separator: default_decimal_separator(),
            thousands_separator: default_thousands_separator(),
            csv_delimiter: default_csv_delimiter(),
            leaderboard_size: default_leaderboard_size(),
            trend_months: default_trend_months(),
            role: Role::default(),
            site_url: default_site_url(),
        }
    }
}

impl Settings {
    /// Money formatting derived from the locale settings
    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat {
            symbol: self.currency_symbol.clone(),
            decimal_separator: self.decimal_separator,
            thousands_separator: Some(self.thousands_separator),
        }
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &DealerPaths) -> Result<Self, DealerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| DealerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| DealerError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;

        Ok(settings)
    }

    /// Check values that would break exports or reports
    pub fn validate(&self) -> Result<(), DealerError> {
        if !self.csv_delimiter.is_ascii() {
            return Err(DealerError::Config(format!(
                "CSV delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            )));
        }
        if !(1..=MAX_LEADERBOARD_SIZE).contains(&self.leaderboard_size) {
            return Err(DealerError::Config(format!(
                "leaderboard_size must be between 1 and {}, got {}",
                MAX_LEADERBOARD_SIZE, self.leaderboard_size
            )));
        }
        if !(1..=MAX_TREND_MONTHS).contains(&self.trend_months) {
            return Err(DealerError::Config(format!(
                "trend_months must be between 1 and {}, got {}",
                MAX_TREND_MONTHS, self.trend_months
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DealerPaths) -> Result<(), DealerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DealerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DealerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "R$");
        assert_eq!(settings.decimal_separator, ',');
        assert_eq!(settings.csv_delimiter, ';');
        assert_eq!(settings.leaderboard_size, 5);
        assert_eq!(settings.trend_months, 6);
        assert_eq!(settings.role, Role::Admin);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DealerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.role = Role::Editor;
        settings.leaderboard_size = 3;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.role, Role::Editor);
        assert_eq!(loaded.leaderboard_size, 3);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "US$"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "US$");
        assert_eq!(settings.csv_delimiter, ';');
        assert_eq!(settings.trend_months, 6);
    }

    #[test]
    fn test_rejects_non_ascii_delimiter() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DealerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"csv_delimiter": "§"}"#).unwrap();

        assert!(Settings::load_or_create(&paths).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_report_sizes() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DealerPaths::with_base_dir(temp_dir.path().to_path_buf());

        std::fs::write(paths.settings_file(), r#"{"trend_months": 4294967295}"#).unwrap();
        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(err.to_string().contains("trend_months"));

        std::fs::write(paths.settings_file(), r#"{"trend_months": 0}"#).unwrap();
        assert!(Settings::load_or_create(&paths).is_err());

        std::fs::write(paths.settings_file(), r#"{"leaderboard_size": 0}"#).unwrap();
        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(err.to_string().contains("leaderboard_size"));

        std::fs::write(paths.settings_file(), r#"{"trend_months": 120, "leaderboard_size": 10}"#)
            .unwrap();
        let ok = Settings::load_or_create(&paths).unwrap();
        assert_eq!(ok.trend_months, MAX_TREND_MONTHS);
    }
}
