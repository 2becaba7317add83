//! Document I/O for the print passes

use crate::types::*;
use lopdf::Document;
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a single PDF document.
///
/// Unreadable or corrupt files are reported as `InvalidInput` so the batch
/// can move on to the next document.
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        DuplexError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes))
        .await?
        .map_err(|e| {
            DuplexError::InvalidInput(format!("Cannot parse {}: {}", path.display(), e))
        })?;
    Ok(doc)
}

/// Save a rendered document
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = serialize(doc).await?;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

/// Write a rendered document to a temporary `.pdf` file.
///
/// The file is removed when the returned handle is dropped, whichever way
/// the caller exits.
pub async fn write_temp_pdf(doc: Document) -> Result<NamedTempFile> {
    let bytes = serialize(doc).await?;
    let temp = tokio::task::spawn_blocking(move || {
        let mut temp = tempfile::Builder::new()
            .prefix("pdf-duplex-")
            .suffix(".pdf")
            .tempfile()?;
        std::io::Write::write_all(&mut temp, &bytes)?;
        temp.as_file().sync_all()?;
        Ok::<_, DuplexError>(temp)
    })
    .await??;
    Ok(temp)
}

async fn serialize(mut doc: Document) -> Result<Vec<u8>> {
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)
            .map_err(|e| DuplexError::Render(format!("Cannot serialize PDF: {}", e)))?;
        Ok::<_, DuplexError>(writer)
    })
    .await??;
    Ok(bytes)
}
