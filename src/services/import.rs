//! Inventory import from a backend JSON dump
//!
//! Accepts a top-level array of vehicle records, or an object wrapping that
//! array under `vehicles` or `data` (the shape of a hosted-backend response).
//! Each record is decoded on its own so one bad record only skips itself;
//! malformed amounts, dates, nulls and integer ids inside a record are
//! already tolerated by the model. When an id repeats, the later record wins.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::audit::AuditEntry;
use crate::error::{DealerError, DealerResult};
use crate::models::{ExpenseId, Vehicle, VehicleId, VehicleStatus};
use crate::storage::Storage;

/// Result of a completed import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// Records not previously stored
    pub imported: usize,
    /// Records that replaced a stored vehicle with the same id
    pub updated: usize,
    /// Records that could not be imported
    pub skipped: usize,
    /// Records dropped because a later record in the dump had the same id
    pub duplicates: usize,
    /// Error message per skipped record, by 0-based position
    pub errors: Vec<(usize, String)>,
}

/// Service for importing vehicle dumps
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import from a file on disk
    pub fn import_file(&self, path: &Path, replace: bool) -> DealerResult<ImportResult> {
        let file = std::fs::File::open(path).map_err(|e| {
            DealerError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_reader(file, replace)
    }

    /// Import from any reader
    ///
    /// With `replace`, the stored inventory becomes exactly the imported
    /// records; otherwise records are merged by id.
    pub fn import_reader<R: Read>(&self, reader: R, replace: bool) -> DealerResult<ImportResult> {
        let document: Value = serde_json::from_reader(reader)
            .map_err(|e| DealerError::Import(format!("Invalid JSON: {}", e)))?;
        let records = extract_records(document)?;

        let mut result = ImportResult::default();
        let mut accepted: Vec<Vehicle> = Vec::with_capacity(records.len());
        let mut positions: HashMap<VehicleId, usize> = HashMap::new();

        for (index, record) in records.into_iter().enumerate() {
            match parse_record(record) {
                Ok(vehicle) => match positions.get(&vehicle.id) {
                    Some(&pos) => {
                        tracing::warn!(
                            record = index,
                            id = %vehicle.id,
                            "duplicate vehicle id, keeping the later record"
                        );
                        result.duplicates += 1;
                        accepted[pos] = vehicle;
                    }
                    None => {
                        positions.insert(vehicle.id.clone(), accepted.len());
                        accepted.push(vehicle);
                    }
                },
                Err(message) => {
                    tracing::warn!(record = index, %message, "skipping vehicle record");
                    result.skipped += 1;
                    result.errors.push((index, message));
                }
            }
        }

        let mut history = Vec::with_capacity(accepted.len());
        for vehicle in &accepted {
            match self.storage.vehicles.get(&vehicle.id)? {
                Some(existing) => {
                    result.updated += 1;
                    history.push(AuditEntry::edited(&existing, vehicle));
                }
                None => {
                    result.imported += 1;
                    history.push(AuditEntry::listed(vehicle));
                }
            }
        }

        if replace {
            self.storage.vehicles.replace_all(accepted)?;
        } else {
            for vehicle in accepted {
                self.storage.vehicles.upsert(vehicle)?;
            }
        }
        self.storage.vehicles.save()?;
        self.storage.audit().append(&history)?;

        tracing::info!(
            imported = result.imported,
            updated = result.updated,
            skipped = result.skipped,
            duplicates = result.duplicates,
            replace,
            "import finished"
        );
        Ok(result)
    }
}

fn extract_records(document: Value) -> DealerResult<Vec<Value>> {
    match document {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove("vehicles").or_else(|| map.remove("data")) {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(DealerError::Import(
                "Expected an array of vehicles or an object with a 'vehicles' array".into(),
            )),
        },
        _ => Err(DealerError::Import("Expected an array of vehicles".into())),
    }
}

fn parse_record(record: Value) -> Result<Vehicle, String> {
    let Some(fields) = record.as_object() else {
        return Err("record is not an object".to_string());
    };
    let status_missing = fields.get("status").map_or(true, Value::is_null);

    let mut vehicle: Vehicle = serde_json::from_value(record).map_err(|e| e.to_string())?;
    if vehicle.id.is_empty() {
        vehicle.id = VehicleId::new();
    }
    for expense in &mut vehicle.expenses {
        if expense.id.is_empty() {
            expense.id = ExpenseId::new();
        }
    }
    // A recorded sale without a status is still a sale
    if status_missing && vehicle.sold_date.is_some() && vehicle.sold_price.is_positive() {
        vehicle.status = VehicleStatus::Sold;
    }
    vehicle.validate().map_err(|e| e.to_string())?;
    Ok(vehicle)
}
