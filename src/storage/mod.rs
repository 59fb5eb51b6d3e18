//! Storage layer for dealer-desk
//!
//! A local JSON copy of the dealership inventory, written atomically, plus
//! the audit log every mutation goes through.

pub mod file_io;
pub mod init;
pub mod vehicles;

pub use file_io::{load_document, save_document};
pub use vehicles::{normalize_plate, VehicleRepository};

use crate::audit::AuditLog;
use crate::config::paths::DealerPaths;
use crate::error::DealerError;

/// Main storage coordinator
pub struct Storage {
    paths: DealerPaths,
    pub vehicles: VehicleRepository,
    audit: AuditLog,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: DealerPaths) -> Result<Self, DealerError> {
        paths.ensure_directories()?;

        Ok(Self {
            vehicles: VehicleRepository::new(paths.vehicles_file()),
            audit: AuditLog::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &DealerPaths {
        &self.paths
    }

    /// Vehicle history written by every mutation
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), DealerError> {
        self.vehicles.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), DealerError> {
        self.vehicles.save()
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditAction, AuditEntry};
    use crate::models::{Money, Vehicle};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DealerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("exports").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_audit_log_records_edits() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DealerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let before = Vehicle::new("Fiat", "Uno", 2015, Money::from_units(25000));
        let mut after = before.clone();
        after.price = Money::from_units(23500);
        storage.audit().record(&AuditEntry::edited(&before, &after)).unwrap();

        assert_eq!(storage.audit().path(), storage.paths().audit_log());
        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries[0].action, AuditAction::Edited);
        assert_eq!(entries[0].changes.as_deref(), Some("price: 25000.0 -> 23500.0"));
    }
}
