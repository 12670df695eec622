//! Input validation for pdfjoin.
//!
//! Preflight checks run before a join touches the output path: every input
//! must exist, be a regular file, and parse as a PDF under the configured
//! mode; the destination directory must be writable and the overwrite mode
//! satisfied. A failed check aborts the whole request — there is no
//! skip-bad-file-and-continue.

use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::task;

use crate::config::{Config, OverwriteMode, ParseMode};
use crate::error::{JoinError, Result};
use crate::utils::format_file_size;

/// Result of validating a single PDF file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// Path to the validated file.
    pub path: PathBuf,

    /// Number of pages in the PDF.
    pub page_count: usize,

    /// PDF version (major, minor).
    pub version: Option<(u8, u8)>,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Number of objects in the PDF.
    pub object_count: usize,
}

impl FileReport {
    fn from_document(path: PathBuf, doc: &Document) -> Self {
        let page_count = doc.get_pages().len();

        let version = doc.version.split_once('.').map(|(major, minor)| {
            (
                major.parse::<u8>().unwrap_or_default(),
                minor.parse::<u8>().unwrap_or_default(),
            )
        });

        let object_count = doc.objects.len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            path,
            page_count,
            version,
            file_size,
            object_count,
        }
    }
}

/// Summary of validation results for the whole input list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputsReport {
    /// Individual reports for each file, in list order.
    pub reports: Vec<FileReport>,

    /// Total number of pages across all files.
    pub total_pages: usize,

    /// Total file size in bytes.
    pub total_size: u64,

    /// Number of files checked.
    pub files_checked: usize,
}

impl InputsReport {
    /// Create a summary from per-file reports.
    pub fn from_reports(reports: Vec<FileReport>) -> Self {
        let total_pages = reports.iter().map(|r| r.page_count).sum();
        let total_size = reports.iter().map(|r| r.file_size).sum();
        let files_checked = reports.len();

        Self {
            reports,
            total_pages,
            total_size,
            files_checked,
        }
    }

    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Validator for PDF files and join configurations.
pub struct Validator {
    mode: ParseMode,
}

impl Validator {
    /// Create a validator with lenient parsing.
    pub fn new() -> Self {
        Self {
            mode: ParseMode::Lenient,
        }
    }

    /// Create a validator with the given parse mode.
    pub fn with_mode(mode: ParseMode) -> Self {
        Self { mode }
    }

    /// Validate a single PDF file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - File is empty or cannot be parsed as a PDF
    /// - Strict mode is active and the page tree is empty
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfjoin::validation::Validator;
    /// # use std::path::Path;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let validator = Validator::new();
    /// let report = validator.validate_file(Path::new("doc.pdf")).await?;
    /// println!("Valid PDF with {} pages", report.page_count);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn validate_file(&self, path: &Path) -> Result<FileReport> {
        if !path.exists() {
            return Err(JoinError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(JoinError::not_a_file(path.to_path_buf()));
        }

        let metadata =
            tokio::fs::metadata(path)
                .await
                .map_err(|e| JoinError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        if metadata.len() == 0 {
            return Err(JoinError::corrupted_pdf(
                path.to_path_buf(),
                "File is empty",
            ));
        }

        let path_buf = path.to_path_buf();
        let load_path = path_buf.clone();
        let doc = task::spawn_blocking(move || Document::load(&load_path))
            .await
            .map_err(|e| JoinError::other(format!("Validation task failed: {e}")))?
            .map_err(|e| JoinError::failed_to_read_pdf(path_buf.clone(), e.to_string()))?;

        if self.mode == ParseMode::Strict && doc.get_pages().is_empty() {
            return Err(JoinError::corrupted_pdf(path_buf, "PDF has no pages"));
        }

        Ok(FileReport::from_document(path.to_path_buf(), &doc))
    }

    /// Validate every input file, in list order.
    ///
    /// Fails fast on the first bad input; an empty list is rejected before
    /// any file is opened.
    pub async fn validate_inputs(&self, paths: &[PathBuf]) -> Result<InputsReport> {
        if paths.is_empty() {
            return Err(JoinError::NoFilesToJoin);
        }

        let mut reports = Vec::with_capacity(paths.len());
        for path in paths {
            reports.push(self.validate_file(path).await?);
        }

        Ok(InputsReport::from_reports(reports))
    }

    /// Validate the output path.
    ///
    /// Checks the overwrite mode against an existing destination and the
    /// destination directory's writability.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output file exists and the mode is `NoClobber`
    /// - Output directory doesn't exist or is not writable
    pub async fn validate_output(&self, config: &Config) -> Result<()> {
        let output_path = &config.output;

        if output_path.exists() {
            match config.overwrite_mode {
                OverwriteMode::NoClobber => {
                    return Err(JoinError::output_exists(output_path.clone()));
                }
                OverwriteMode::Prompt => {
                    // Prompt is handled by the caller.
                }
                OverwriteMode::Force => {}
            }
        }

        if let Some(parent) = output_path.parent()
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

    /// Validate the complete configuration: inputs first, then output.
    pub async fn validate_config(&self, config: &Config) -> Result<InputsReport> {
        let report = self.validate_inputs(&config.inputs).await?;
        self.validate_output(config).await?;
        Ok(report)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
