//! Document I/O for insertion

use crate::types::*;
use lopdf::Document;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Save a document, replacing `path` atomically
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || save_pdf_blocking(doc, &path)).await?
}

pub(crate) fn load_pdf_blocking(path: &Path) -> Result<Document> {
    let bytes = std::fs::read(path)?;
    Ok(Document::load_mem(&bytes)?)
}

/// Serialize to a temporary file next to `path`, then rename it into place.
/// A failure at any point leaves `path` untouched.
pub(crate) fn save_pdf_blocking(mut doc: Document, path: &Path) -> Result<()> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(&writer)?;
    temp.as_file().sync_all()?;
    temp.persist(path)?;
    Ok(())
}
