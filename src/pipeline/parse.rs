//! Document loading.

use crate::config::DiffPaths;
use crate::error::JsonDiffError;
use anyhow::{Context, Result};
use std::path::Path;

/// Read a document's raw bytes. Decoding happens in the diff stage so that a
/// syntax error can name the side it came from.
pub fn read_document(path: &Path, quiet: bool) -> Result<Vec<u8>> {
    if !quiet {
        tracing::info!("Reading document: {}", path.display());
    }

    let bytes = std::fs::read(path).map_err(|e| JsonDiffError::io(path, e))?;

    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Read both documents of a comparison.
pub fn read_pair(paths: &DiffPaths, quiet: bool) -> Result<(Vec<u8>, Vec<u8>)> {
    let old = read_document(&paths.old, quiet).context("Failed to read old document")?;
    let new = read_document(&paths.new, quiet).context("Failed to read new document")?;
    Ok((old, new))
}
