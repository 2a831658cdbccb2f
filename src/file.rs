//! File collaborator: whole-file load and save.

use std::fs;
use std::path::Path;

use crate::document::Document;
use crate::error::Result;

/// Read a file as raw bytes and split it into document lines.
///
/// A missing file is an error; there is no empty-buffer fallback.
pub fn load(path: &Path) -> Result<Document> {
    let bytes = fs::read(path)?;
    Ok(Document::from_bytes(&bytes))
}

/// Write the document to the given path, joined with line feeds and no
/// trailing terminator. Returns the number of bytes written.
pub fn save(path: &Path, doc: &Document) -> Result<usize> {
    let bytes = doc.to_bytes();
    fs::write(path, &bytes)?;
    Ok(bytes.len())
}
