//! Vehicle repository for JSON storage
//!
//! Manages loading and saving the inventory to vehicles.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DealerError;
use crate::models::{Vehicle, VehicleId};

use super::file_io::{load_document, save_document};

/// Serializable vehicle data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct VehicleData {
    #[serde(default)]
    vehicles: Vec<Vehicle>,
}

/// Repository for vehicle persistence
pub struct VehicleRepository {
    path: PathBuf,
    data: RwLock<HashMap<VehicleId, Vehicle>>,
}

impl VehicleRepository {
    /// Create a new vehicle repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load vehicles from disk
    pub fn load(&self) -> Result<(), DealerError> {
        let file_data: VehicleData = load_document(&self.path)?.unwrap_or_default();

        let mut data = self
            .data
            .write()
            .map_err(|e| DealerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for vehicle in file_data.vehicles {
            data.insert(vehicle.id.clone(), vehicle);
        }

        tracing::debug!(count = data.len(), path = %self.path.display(), "loaded vehicles");
        Ok(())
    }

    /// Save vehicles to disk, newest first
    pub fn save(&self) -> Result<(), DealerError> {
        let file_data = VehicleData {
            vehicles: self.get_all()?,
        };

        save_document(&self.path, &file_data)
    }

    /// Get a vehicle by ID
    pub fn get(&self, id: &VehicleId) -> Result<Option<Vehicle>, DealerError> {
        let data = self
            .data
            .read()
            .map_err(|e| DealerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(id).cloned())
    }

    /// Get all vehicles, most recently created first
    pub fn get_all(&self) -> Result<Vec<Vehicle>, DealerError> {
        let data = self
            .data
            .read()
            .map_err(|e| DealerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut vehicles: Vec<_> = data.values().cloned().collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(vehicles)
    }

    /// Find a vehicle by plate (case and spacing insensitive)
    pub fn get_by_plate(&self, plate: &str) -> Result<Option<Vehicle>, DealerError> {
        let data = self
            .data
            .read()
            .map_err(|e| DealerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let wanted = normalize_plate(plate);
        Ok(data
            .values()
            .find(|v| v.plate.as_deref().map(normalize_plate).as_deref() == Some(wanted.as_str()))
            .cloned())
    }

    /// Insert or update a vehicle
    pub fn upsert(&self, vehicle: Vehicle) -> Result<(), DealerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DealerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(vehicle.id.clone(), vehicle);
        Ok(())
    }

    /// Delete a vehicle
    pub fn delete(&self, id: &VehicleId) -> Result<bool, DealerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DealerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(id).is_some())
    }

    /// Replace the whole inventory
    pub fn replace_all(&self, vehicles: Vec<Vehicle>) -> Result<(), DealerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DealerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for vehicle in vehicles {
            data.insert(vehicle.id.clone(), vehicle);
        }
        Ok(())
    }

    pub fn exists(&self, id: &VehicleId) -> Result<bool, DealerError> {
        let data = self
            .data
            .read()
            .map_err(|e| DealerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.contains_key(id))
    }

    pub fn count(&self) -> Result<usize, DealerError> {
        let data = self
            .data
            .read()
            .map_err(|e| DealerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

/// Uppercase a plate and drop separators ("abc-1d23" == "ABC1D23")
pub fn normalize_plate(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, VehicleRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vehicles.json");
        let repo = VehicleRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_save_and_reload() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let vehicle = Vehicle::new("Toyota", "Corolla", 2022, Money::from_units(120000));
        let id = vehicle.id.clone();
        repo.upsert(vehicle).unwrap();
        repo.save().unwrap();

        repo.load().unwrap();
        let loaded = repo.get(&id).unwrap().unwrap();
        assert_eq!(loaded.model, "Corolla");
        assert!(repo.exists(&id).unwrap());
    }

    #[test]
    fn test_get_all_newest_first() {
        let (_temp_dir, repo) = create_test_repo();

        let mut older = Vehicle::new("Fiat", "Uno", 2010, Money::zero());
        older.created_at = Utc::now() - Duration::days(3);
        let newer = Vehicle::new("Fiat", "Pulse", 2024, Money::zero());
        repo.upsert(older).unwrap();
        repo.upsert(newer).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].model, "Pulse");
        assert_eq!(all[1].model, "Uno");
    }

    #[test]
    fn test_delete_and_replace_all() {
        let (_temp_dir, repo) = create_test_repo();
        let vehicle = Vehicle::new("VW", "Gol", 2015, Money::zero());
        let id = vehicle.id.clone();
        repo.upsert(vehicle).unwrap();

        assert!(repo.delete(&id).unwrap());
        assert!(!repo.delete(&id).unwrap());

        repo.replace_all(vec![
            Vehicle::new("A", "B", 2020, Money::zero()),
            Vehicle::new("C", "D", 2021, Money::zero()),
        ])
        .unwrap();
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_get_by_plate() {
        let (_temp_dir, repo) = create_test_repo();
        let mut vehicle = Vehicle::new("VW", "Gol", 2015, Money::zero());
        vehicle.plate = Some("ABC-1D23".to_string());
        repo.upsert(vehicle).unwrap();

        assert!(repo.get_by_plate("abc1d23").unwrap().is_some());
        assert!(repo.get_by_plate("XYZ9999").unwrap().is_none());
    }
}
