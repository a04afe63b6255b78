// commands/snapshot.rs — Manual export/import of the whole store.
// The document format and its validation live in brandfactory-core.

use std::fs;
use std::path::Path;

use log::info;

use brandfactory_core::snapshot::{self, summarize};
use brandfactory_core::SnapshotSummary;

use crate::commands::fail;
use crate::engine::state::FactoryState;

/// Write the store to `path` as pretty JSON.
pub fn export_snapshot(state: &FactoryState, path: &Path) -> Result<SnapshotSummary, String> {
    let document = state.store.export().map_err(|e| fail("store")(e.into()))?;
    fs::write(path, document).map_err(|e| fail("store")(e.into()))?;
    info!("[store] exported {} profile(s) to {}", state.store.len(), path.display());
    Ok(summarize(&state.store))
}

/// Replace the store with the snapshot at `path`. On any error the current
/// state is kept as it was.
pub fn import_snapshot(state: &mut FactoryState, path: &Path) -> Result<SnapshotSummary, String> {
    let document = fs::read_to_string(path).map_err(|e| fail("store")(e.into()))?;
    state.import_snapshot(&document).map_err(fail("store"))?;
    info!("[store] imported {}", path.display());
    Ok(summarize(&state.store))
}

/// Validate a snapshot file without touching any session.
pub fn check_snapshot(path: &Path) -> Result<SnapshotSummary, String> {
    let document = fs::read_to_string(path).map_err(|e| fail("store")(e.into()))?;
    let store = snapshot::parse(&document).map_err(|e| fail("store")(e.into()))?;
    Ok(summarize(&store))
}
