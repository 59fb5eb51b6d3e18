//! Vehicle history CLI command

use crate::audit::AuditQuery;
use crate::error::DealerResult;
use crate::services::VehicleService;
use crate::storage::Storage;

/// Print the most recent history entries, oldest first
///
/// With `vehicle`, only that vehicle's history is shown.
pub fn handle_audit_command(
    storage: &Storage,
    limit: usize,
    vehicle: Option<&str>,
) -> DealerResult<()> {
    let mut query = AuditQuery::recent(limit);
    if let Some(identifier) = vehicle {
        let vehicle = VehicleService::new(storage).require(identifier)?;
        println!("History of {}", vehicle.title());
        query = query.for_vehicle(vehicle.id);
    }

    let entries = storage.audit().entries(&query)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
