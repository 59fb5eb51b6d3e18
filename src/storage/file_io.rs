//! JSON documents on disk
//!
//! The inventory and the dashboard state are small documents rewritten
//! whole on every change. A save goes to a hidden sibling file, is synced,
//! then renamed over the document, so a reader sees either the old or the
//! new version and never half of one.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{DealerError, DealerResult};

fn storage_error(action: &str, path: &Path, err: impl Display) -> DealerError {
    DealerError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// `data/vehicles.json` stages as `data/.vehicles.json.saving`
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.saving", name))
}

/// Load a document; `None` when it has never been saved
pub fn load_document<T: DeserializeOwned>(path: &Path) -> DealerResult<Option<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| storage_error("parse", path, e))
}

/// Replace a document with `value`
pub fn save_document<T: Serialize>(path: &Path, value: &T) -> DealerResult<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create directory", dir, e))?;
    }

    let staging = staging_path(path);
    let written = File::create(&staging)
        .map_err(|e| storage_error("create", &staging, e))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)
                .map_err(|e| storage_error("serialize", path, e))?;
            writer.flush().map_err(|e| storage_error("write", &staging, e))?;
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| storage_error("sync", &staging, e))
        })
        .and_then(|()| fs::rename(&staging, path).map_err(|e| storage_error("replace", path, e)));

    if written.is_err() {
        let _ = fs::remove_file(&staging);
    }
    written?;

    tracing::debug!(path = %path.display(), "saved document");
    Ok(())
}
