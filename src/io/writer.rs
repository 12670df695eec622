//! PDF writing and saving operations.
//!
//! Writes are atomic by default: the document is serialized to a temporary
//! file which is renamed over the destination only once the write has
//! completed. A failed join therefore never leaves a half-written file at
//! the destination path, and the temporary file is removed on failure.

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{JoinError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compress the PDF before writing.
    pub compress: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self {
            options: WriteOptions::default(),
        }
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without compression (faster but larger files).
    pub fn without_compression() -> Self {
        Self {
            options: WriteOptions {
                compress: false,
                ..Default::default()
            },
        }
    }

    /// Save a PDF document to a file.
    ///
    /// # Arguments
    ///
    /// * `doc` - PDF document to save
    /// * `path` - Output file path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output directory doesn't exist
    /// - Insufficient permissions
    /// - Disk full
    /// - Write operation fails
    pub async fn save(&self, doc: &Document, path: &Path) -> Result<()> {
        let _stats = self.save_with_stats(doc, path).await?;
        Ok(())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// # Arguments
    ///
    /// * `doc` - PDF document to save
    /// * `path` - Output file path
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfjoin::io::writer::PdfWriter;
    /// # use lopdf::Document;
    /// # use std::path::Path;
    /// # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
    /// let writer = PdfWriter::new();
    /// let stats = writer.save_with_stats(&doc, Path::new("output.pdf")).await?;
    /// println!("Wrote {} in {:?}", stats.format_file_size(), stats.write_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn save_with_stats(&self, doc: &Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        // Serialization mutates the document, so work on a clone in the
        // blocking task.
        let mut doc_clone = doc.clone();

        let stats = task::spawn_blocking(move || {
            let start = Instant::now();

            if options.compress {
                doc_clone.compress();
            }

            let write_path = if options.atomic {
                path_buf.with_extension("tmp")
            } else {
                path_buf.clone()
            };

            let result = write_document(&mut doc_clone, &write_path, options.buffer_size);

            if let Err(err) = result {
                if options.atomic {
                    let _ = std::fs::remove_file(&write_path);
                }
                return Err(err);
            }

            if options.atomic
                && let Err(e) = std::fs::rename(&write_path, &path_buf)
            {
                let _ = std::fs::remove_file(&write_path);
                return Err(JoinError::FailedToWrite {
                    path: path_buf.clone(),
                    source: e,
                });
            }

            let write_time = start.elapsed();
            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok::<_, JoinError>(WriteStatistics {
                write_time,
                file_size,
                output_path: path_buf,
                compressed: options.compress,
            })
        })
        .await
        .map_err(|e| JoinError::other(format!("Write task failed: {e}")))??;

        Ok(stats)
    }

    /// Check if a file can be written to the given path.
    ///
    /// Performs pre-flight checks without actually writing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory doesn't exist
    /// - Parent directory is not writable
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            if !parent.exists() {
                return Err(JoinError::invalid_config(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }

            let metadata =
                tokio::fs::metadata(parent)
                    .await
                    .map_err(|e| JoinError::FileNotAccessible {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;

            if metadata.permissions().readonly() {
                return Err(JoinError::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize the document through a buffered file handle.
fn write_document(doc: &mut Document, path: &Path, buffer_size: usize) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| JoinError::FailedToCreateOutput {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);

    doc.save_to(&mut writer)
        .map_err(|e| JoinError::FailedToWrite {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;

    writer.flush().map_err(|e| JoinError::FailedToWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Object, dictionary};
    use tempfile::TempDir;

    fn create_test_document() -> Document {
        let mut doc = Document::with_version("1.4");

        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });

        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }
            .into(),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        doc
    }

    #[tokio::test]
    async fn test_save_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let doc = create_test_document();
        let writer = PdfWriter::new();

        let result = writer.save(&doc, &output_path).await;
        assert!(result.is_ok());
        assert!(output_path.exists());
    }

    #[tokio::test]
    async fn test_save_with_stats() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let doc = create_test_document();
        let writer = PdfWriter::new();

        let stats = writer.save_with_stats(&doc, &output_path).await.unwrap();

        assert!(stats.file_size > 0);
        assert_eq!(stats.output_path, output_path);
        assert!(stats.compressed);
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let doc = create_test_document();
        let writer = PdfWriter::new();
        writer.save(&doc, &output_path).await.unwrap();

        assert!(output_path.exists());
        assert!(!temp_dir.path().join("output.tmp").exists());
    }

    #[tokio::test]
    async fn test_without_compression() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let doc = create_test_document();
        let writer = PdfWriter::without_compression();

        let stats = writer.save_with_stats(&doc, &output_path).await.unwrap();
        assert!(!stats.compressed);
    }

    #[tokio::test]
    async fn test_save_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("no_such_dir").join("output.pdf");

        let doc = create_test_document();
        let writer = PdfWriter::new();

        let result = writer.save(&doc, &output_path).await;
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(err.is_write());
        assert!(!output_path.exists());
    }

    #[tokio::test]
    async fn test_can_write() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let writer = PdfWriter::new();
        let result = writer.can_write(&output_path).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_can_write_nonexistent_directory() {
        let writer = PdfWriter::new();
        let result = writer.can_write(Path::new("/nonexistent/output.pdf")).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_exists() {
        let temp_dir = TempDir::new().unwrap();
        let existing_path = temp_dir.path().join("existing.pdf");
        std::fs::File::create(&existing_path).unwrap();

        let writer = PdfWriter::new();

        assert!(writer.exists(&existing_path).await);
        assert!(
            !writer
                .exists(&temp_dir.path().join("nonexistent.pdf"))
                .await
        );
    }

    #[tokio::test]
    async fn test_custom_options() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.pdf");

        let options = WriteOptions {
            atomic: false,
            compress: false,
            buffer_size: 4096,
        };

        let doc = create_test_document();
        let writer = PdfWriter::with_options(options);

        let stats = writer.save_with_stats(&doc, &output_path).await.unwrap();
        assert!(!stats.compressed);
        assert!(output_path.exists());
    }
}
