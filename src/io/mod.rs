//! PDF file I/O.
//!
//! Reading and writing happen through [`PdfReader`] and [`PdfWriter`];
//! both push the blocking lopdf work onto the blocking thread pool.

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

use crate::Result;
use lopdf::Document;
use std::path::Path;

/// Load a single PDF with default (lenient) settings.
///
/// Convenience wrapper around [`PdfReader::load`] for callers that only
/// need the document.
pub async fn load_pdf(path: &Path) -> Result<Document> {
    let reader = PdfReader::new();
    let loaded = reader.load(path).await?;
    Ok(loaded.document)
}
