//! Saving the last-known config snapshot to disk.

use std::path::Path;

use crate::data::snapshot::ConfigSnapshot;
use crate::error::PencilError;

/// Serialize the snapshot as pretty JSON.
pub fn snapshot_to_json(snapshot: &ConfigSnapshot) -> Result<String, PencilError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Save the snapshot as a JSON file at the given path.
pub fn save_snapshot_to_path(snapshot: &ConfigSnapshot, path: &Path) -> Result<(), PencilError> {
    let txt = snapshot_to_json(snapshot)?;
    std::fs::write(path, txt).map_err(|source| PencilError::Io {
        path: path.to_path_buf(),
        source,
    })
}
