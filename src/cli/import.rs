//! CLI command handler for inventory import
//!
//! Loads a JSON dump of the hosted inventory into local storage. Bad records
//! are reported and skipped; the rest are imported.

use std::path::Path;

use crate::error::{DealerError, DealerResult};
use crate::services::ImportService;
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, file: &str, replace: bool) -> DealerResult<()> {
    let path = Path::new(file);
    if !path.exists() {
        return Err(DealerError::Import(format!("File not found: {}", file)));
    }

    let result = ImportService::new(storage).import_file(path, replace)?;

    println!("Import complete");
    println!("{}", "=".repeat(40));
    println!("  New vehicles:      {}", result.imported);
    println!("  Updated vehicles:  {}", result.updated);
    println!("  Skipped records:   {}", result.skipped);
    if result.duplicates > 0 {
        println!("  Repeated ids:      {} (later record kept)", result.duplicates);
    }

    if !result.errors.is_empty() {
        println!();
        for (index, message) in &result.errors {
            println!("  record {}: {}", index, message);
        }
    }

    if replace {
        println!();
        println!("Inventory replaced with the imported records.");
    }

    Ok(())
}
