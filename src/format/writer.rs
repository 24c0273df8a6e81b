//! Serializer for circuit files.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::ast::CircuitDocument;
use crate::error::{ComposerError, Result};

/// Render a document as file text, one record per line.
pub fn write(doc: &CircuitDocument) -> String {
    let mut out = String::new();
    for record in &doc.records {
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}

/// Write a document to `path`, creating the parent directory if missing.
pub fn write_file(path: &Path, doc: &CircuitDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ComposerError::file_write(parent, e))?;
    }
    fs::write(path, write(doc)).map_err(|e| ComposerError::file_write(path, e))?;
    debug!(path = %path.display(), records = doc.records.len(), "wrote circuit file");
    Ok(())
}
