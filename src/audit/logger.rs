//! The vehicle history file
//!
//! `audit.log` holds one JSON entry per line and is only ever appended to.
//! A line that no longer parses is skipped with a warning so one damaged
//! line does not hide the rest of the history.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{DealerError, DealerResult};
use crate::models::VehicleId;

use super::entry::AuditEntry;

/// Which entries to read back
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    /// Only entries about this vehicle
    pub vehicle: Option<VehicleId>,
    /// Keep only the most recent `limit` matches
    pub limit: Option<usize>,
}

impl AuditQuery {
    pub fn recent(limit: usize) -> Self {
        Self {
            vehicle: None,
            limit: Some(limit),
        }
    }

    pub fn for_vehicle(mut self, id: VehicleId) -> Self {
        self.vehicle = Some(id);
        self
    }

    fn matches(&self, entry: &AuditEntry) -> bool {
        self.vehicle.as_ref().map_or(true, |id| &entry.vehicle_id == id)
    }
}

/// Append-only vehicle history
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry
    pub fn record(&self, entry: &AuditEntry) -> DealerResult<()> {
        self.append(std::slice::from_ref(entry))
    }

    /// Append entries in order with a single flush
    pub fn append(&self, entries: &[AuditEntry]) -> DealerResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| DealerError::Io(format!("Failed to open {}: {}", self.path.display(), e)))?;
        let mut writer = BufWriter::new(file);

        for entry in entries {
            serde_json::to_writer(&mut writer, entry)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        tracing::debug!(count = entries.len(), "appended vehicle history");
        Ok(())
    }

    /// Entries matching `query`, oldest first
    pub fn entries(&self, query: &AuditQuery) -> DealerResult<Vec<AuditEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DealerError::Io(format!(
                    "Failed to open {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let mut matched = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) if query.matches(&entry) => matched.push(entry),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(line = index + 1, error = %e, "skipping unreadable history line")
                }
            }
        }

        if let Some(limit) = query.limit {
            let start = matched.len().saturating_sub(limit);
            matched.drain(..start);
        }
        Ok(matched)
    }

    /// Whole history, oldest first
    pub fn read_all(&self) -> DealerResult<Vec<AuditEntry>> {
        self.entries(&AuditQuery::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditAction;
    use crate::models::{Money, Vehicle};
    use tempfile::TempDir;

    fn history() -> (AuditLog, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log = AuditLog::new(temp_dir.path().join("audit.log"));
        (log, temp_dir)
    }

    fn gol(id: &str) -> Vehicle {
        let mut v = Vehicle::new("VW", "Gol", 2015, Money::from_units(30000));
        v.id = VehicleId::from(id);
        v
    }

    #[test]
    fn test_record_and_read() {
        let (log, _temp) = history();
        log.record(&AuditEntry::listed(&gol("v-1"))).unwrap();

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Listed);
        assert_eq!(entries[0].vehicle, "VW Gol 2015");
    }

    #[test]
    fn test_filter_by_vehicle_and_limit() {
        let (log, _temp) = history();
        let a = gol("a");
        let b = gol("b");
        let mut a_cheaper = a.clone();
        a_cheaper.price = Money::from_units(28000);
        log.append(&[
            AuditEntry::listed(&a),
            AuditEntry::listed(&b),
            AuditEntry::edited(&a, &a_cheaper),
            AuditEntry::removed(&b),
        ])
        .unwrap();
        log.append(&[]).unwrap();

        let only_a = log
            .entries(&AuditQuery::default().for_vehicle(VehicleId::from("a")))
            .unwrap();
        let actions: Vec<_> = only_a.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![AuditAction::Listed, AuditAction::Edited]);

        let last_two = log.entries(&AuditQuery::recent(2)).unwrap();
        assert_eq!(last_two[0].action, AuditAction::Edited);
        assert_eq!(last_two[1].action, AuditAction::Removed);

        let last_of_b = log
            .entries(&AuditQuery::recent(1).for_vehicle(VehicleId::from("b")))
            .unwrap();
        assert_eq!(last_of_b.len(), 1);
        assert_eq!(last_of_b[0].action, AuditAction::Removed);
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let (log, _temp) = history();
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_damaged_line_is_skipped() {
        let (log, _temp) = history();
        log.record(&AuditEntry::listed(&gol("v-1"))).unwrap();
        let mut contents = std::fs::read_to_string(log.path()).unwrap();
        contents.push_str("{\"truncated\n\n");
        std::fs::write(log.path(), contents).unwrap();
        log.record(&AuditEntry::removed(&gol("v-1"))).unwrap();

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, AuditAction::Removed);
    }
}
