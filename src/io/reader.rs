//! PDF reading and loading operations.
//!
//! Inputs are loaded one at a time, in list order, and the first failure
//! aborts the batch. Parsing is lenient by default; see
//! [`ParseMode`](crate::config::ParseMode) for what strict mode adds.

use lopdf::{Document, Object};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::ParseMode;
use crate::error::{JoinError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// PDF reader with configurable parsing strictness.
#[derive(Debug, Clone, Copy)]
pub struct PdfReader {
    mode: ParseMode,
}

impl PdfReader {
    /// Create a new reader with lenient parsing.
    pub fn new() -> Self {
        Self {
            mode: ParseMode::Lenient,
        }
    }

    /// Create a reader with the given parse mode.
    pub fn with_mode(mode: ParseMode) -> Self {
        Self { mode }
    }

    /// Load a single PDF document.
    ///
    /// The file is opened read-only; nothing on disk is modified.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the PDF file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The file is not a PDF the parser can recover a document from
    /// - Strict mode is active and the page tree is empty or malformed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfjoin::io::reader::PdfReader;
    /// # use std::path::Path;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let reader = PdfReader::new();
    /// let loaded = reader.load(Path::new("document.pdf")).await?;
    /// println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();

        if !path_buf.exists() {
            return Err(JoinError::file_not_found(path_buf));
        }

        let start = Instant::now();

        let load_path = path_buf.clone();
        let doc = task::spawn_blocking(move || Document::load(&load_path))
            .await
            .map_err(|e| JoinError::other(format!("Load task failed: {e}")))?
            .map_err(|e| JoinError::failed_to_read_pdf(path_buf.clone(), e.to_string()))?;

        if self.mode == ParseMode::Strict {
            verify_page_tree(&doc, &path_buf)?;
        }

        let load_time = start.elapsed();

        Ok(LoadedPdf::new(doc, path_buf, load_time))
    }

    /// Load multiple PDF documents sequentially, in the order provided.
    ///
    /// Fails fast: the first unreadable input aborts the batch and no
    /// partial result is returned.
    ///
    /// # Arguments
    ///
    /// * `paths` - Paths to PDF files, in join order
    pub async fn load_many(&self, paths: &[PathBuf]) -> Result<Vec<LoadedPdf>> {
        let mut loaded = Vec::with_capacity(paths.len());

        for path in paths {
            loaded.push(self.load(path).await?);
        }

        Ok(loaded)
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Strict-mode structural check: the page tree must be non-empty and every
/// entry must resolve to a page dictionary.
fn verify_page_tree(doc: &Document, path: &Path) -> Result<()> {
    let pages = doc.get_pages();

    if pages.is_empty() {
        return Err(JoinError::corrupted_pdf(
            path.to_path_buf(),
            "PDF has no pages",
        ));
    }

    for (number, page_id) in pages {
        let obj = doc.get_object(page_id).map_err(|e| {
            JoinError::corrupted_pdf(path.to_path_buf(), format!("Page {number}: {e}"))
        })?;

        if !matches!(obj, Object::Dictionary(_)) {
            return Err(JoinError::corrupted_pdf(
                path.to_path_buf(),
                format!("Page {number} is not a dictionary"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;
    use tempfile::TempDir;

    fn write_test_pdf(dir: &TempDir, name: &str, pages: usize) -> PathBuf {
        let path = dir.path().join(name);

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let mut kids: Vec<Object> = Vec::new();
        for _ in 0..pages {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
            }
            .into(),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        doc.save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_single_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let pdf_path = write_test_pdf(&temp_dir, "test.pdf", 1);

        let reader = PdfReader::new();
        let result = reader.load(&pdf_path).await;

        assert!(result.is_ok());
        let loaded = result.unwrap();
        assert_eq!(loaded.page_count, 1);
        assert_eq!(loaded.path, pdf_path);
        assert!(loaded.file_size > 0);
    }

    #[tokio::test]
    async fn test_load_nonexistent_pdf() {
        let reader = PdfReader::new();
        let result = reader.load(Path::new("/nonexistent.pdf")).await;

        assert!(matches!(result, Err(JoinError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_load_garbage_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbage.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let reader = PdfReader::new();
        let result = reader.load(&path).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().is_read());
    }

    #[tokio::test]
    async fn test_lenient_accepts_empty_page_tree() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_test_pdf(&temp_dir, "empty.pdf", 0);

        let reader = PdfReader::new();
        let loaded = reader.load(&path).await.unwrap();

        assert_eq!(loaded.page_count, 0);
    }

    #[tokio::test]
    async fn test_strict_rejects_empty_page_tree() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_test_pdf(&temp_dir, "empty.pdf", 0);

        let reader = PdfReader::with_mode(ParseMode::Strict);
        let result = reader.load(&path).await;

        assert!(matches!(result, Err(JoinError::CorruptedPdf { .. })));
    }

    #[tokio::test]
    async fn test_strict_accepts_well_formed_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_test_pdf(&temp_dir, "ok.pdf", 3);

        let reader = PdfReader::with_mode(ParseMode::Strict);
        let loaded = reader.load(&path).await.unwrap();

        assert_eq!(loaded.page_count, 3);
    }

    #[tokio::test]
    async fn test_load_many_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let pdf1 = write_test_pdf(&temp_dir, "first.pdf", 2);
        let pdf2 = write_test_pdf(&temp_dir, "second.pdf", 3);

        let reader = PdfReader::new();
        let loaded = reader
            .load_many(&[pdf1.clone(), pdf2.clone()])
            .await
            .unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].path, pdf1);
        assert_eq!(loaded[0].page_count, 2);
        assert_eq!(loaded[1].path, pdf2);
        assert_eq!(loaded[1].page_count, 3);
    }

    #[tokio::test]
    async fn test_load_many_fails_fast() {
        let temp_dir = TempDir::new().unwrap();
        let pdf1 = write_test_pdf(&temp_dir, "first.pdf", 1);
        let missing = temp_dir.path().join("missing.pdf");

        let reader = PdfReader::new();
        let result = reader.load_many(&[pdf1, missing]).await;

        assert!(matches!(result, Err(JoinError::FileNotFound { .. })));
    }
}
