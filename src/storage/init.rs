//! Storage initialization
//!
//! First-run setup: directories, settings, an empty inventory and the
//! dashboard state seeded from settings.

use crate::config::paths::DealerPaths;
use crate::config::settings::Settings;
use crate::dashboard::DashboardState;
use crate::error::DealerError;

use super::vehicles::VehicleRepository;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched, so running it twice is harmless.
pub fn initialize_storage(paths: &DealerPaths, settings: &Settings) -> Result<(), DealerError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    if !paths.vehicles_file().exists() {
        VehicleRepository::new(paths.vehicles_file()).save()?;
    }

    if !paths.dashboard_file().exists() {
        DashboardState::from_settings(settings).save(paths)?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &DealerPaths) -> bool {
    !paths.is_initialized() || !paths.vehicles_file().exists()
}
