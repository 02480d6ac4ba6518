use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// One manifest row. Only the annotation-file path is needed; any other
/// columns in the CSV are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestRow {
    pub chord_locations: PathBuf,
}

/// Load the manifest CSV. Row order defines processing order.
pub fn load_manifest(path: &Path) -> Result<Vec<ManifestRow>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open manifest {}", path.display()))?;

    let rows: Vec<ManifestRow> = rdr
        .deserialize()
        .collect::<Result<_, _>>()
        .with_context(|| format!("Failed to parse manifest {}", path.display()))?;

    log::info!("Manifest {}: {} rows", path.display(), rows.len());
    Ok(rows)
}
