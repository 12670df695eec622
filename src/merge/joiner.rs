//! Core page-concatenation implementation.
//!
//! The output document is the first input with every subsequent input's
//! pages appended to its page tree. Page order in the output is input-list
//! order; within one input, the pages keep their stored order and content.

use lopdf::{Document, Object, ObjectId};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{JoinError, Result};
use crate::io::{LoadedPdf, PdfReader};
use crate::utils::format_file_size;

/// Statistics about a join operation.
#[derive(Debug, Clone)]
pub struct JoinStatistics {
    /// Number of PDFs joined.
    pub files_joined: usize,

    /// Total number of pages in the joined document.
    pub total_pages: usize,

    /// Total time taken for the join.
    pub join_time: Duration,

    /// Time taken to load all inputs.
    pub load_time: Duration,

    /// Total size of input files.
    pub input_size: u64,
}

impl JoinStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a join operation.
#[derive(Debug)]
pub struct JoinResult {
    /// The joined PDF document.
    pub document: Document,

    /// Statistics about the join.
    pub statistics: JoinStatistics,

    /// Paths of the files that were joined, in order.
    pub joined_files: Vec<PathBuf>,
}

/// PDF joiner that concatenates multiple documents.
pub struct Joiner;

impl Joiner {
    /// Create a new joiner.
    pub fn new() -> Self {
        Self
    }

    /// Join the configured inputs into a single in-memory document.
    ///
    /// Inputs are loaded sequentially in list order, read-only. The first
    /// unreadable input aborts the join; nothing is written anywhere by
    /// this method.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input list is empty (`NoFilesToJoin`, before any I/O)
    /// - Any input cannot be loaded or parsed
    /// - The page-tree concatenation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfjoin::merge::Joiner;
    /// # use pdfjoin::config::Config;
    /// # async fn example(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    /// let joiner = Joiner::new();
    /// let result = joiner.join(&config).await?;
    /// println!("Joined {} files into {} pages",
    ///          result.statistics.files_joined,
    ///          result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn join(&self, config: &Config) -> Result<JoinResult> {
        if config.inputs.is_empty() {
            return Err(JoinError::NoFilesToJoin);
        }

        let join_start = Instant::now();

        let load_start = Instant::now();
        let reader = PdfReader::with_mode(config.parse_mode);
        let loaded = reader.load_many(&config.inputs).await?;
        let load_time = load_start.elapsed();

        let document = concat_documents(&loaded)?;

        let join_time = join_start.elapsed();

        let statistics = JoinStatistics {
            files_joined: loaded.len(),
            total_pages: document.get_pages().len(),
            join_time,
            load_time,
            input_size: loaded.iter().map(|p| p.file_size).sum(),
        };

        let joined_files: Vec<PathBuf> = loaded.into_iter().map(|p| p.path).collect();

        Ok(JoinResult {
            document,
            statistics,
            joined_files,
        })
    }
}

impl Default for Joiner {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenate loaded documents into one.
fn concat_documents(loaded: &[LoadedPdf]) -> Result<Document> {
    let Some((first, rest)) = loaded.split_first() else {
        return Err(JoinError::NoFilesToJoin);
    };

    // The first document is the base; everything else is appended to its
    // page tree.
    let mut merged = first.document.clone();
    let mut max_id = merged.max_id;

    for input in rest {
        let mut doc = input.document.clone();

        // Renumber objects past the current ceiling to avoid ID conflicts.
        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;

        let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

        merged.objects.extend(doc.objects);

        append_pages_to_tree(&mut merged, &doc_pages)?;
    }

    merged.renumber_objects();

    Ok(merged)
}

/// Append page references to the base document's page tree.
fn append_pages_to_tree(merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    if page_ids.is_empty() {
        return Ok(());
    }

    let catalog = merged
        .catalog_mut()
        .map_err(|e| JoinError::join_failed(format!("Failed to get catalog: {e}")))?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| JoinError::join_failed(format!("Failed to get pages reference: {e}")))?;

    let pages_dict = merged
        .get_object_mut(pages_id)
        .map_err(|e| JoinError::join_failed(format!("Failed to get pages object: {e}")))?;

    if let Object::Dictionary(dict) = pages_dict {
        let kids = dict
            .get_mut(b"Kids")
            .map_err(|_| JoinError::join_failed("Pages dictionary missing Kids array"))?;

        if let Object::Array(kids_array) = kids {
            for &page_id in page_ids {
                kids_array.push(Object::Reference(page_id));
            }
        } else {
            return Err(JoinError::join_failed("Kids is not an array"));
        }

        let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
        dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));
    } else {
        return Err(JoinError::join_failed("Pages object is not a dictionary"));
    }

    // Repoint the appended pages at the base tree root; their Parent still
    // references the page tree of the document they came from.
    for &page_id in page_ids {
        if let Ok(Object::Dictionary(page_dict)) = merged.get_object_mut(page_id) {
            page_dict.set("Parent", Object::Reference(pages_id));
        }
    }

    Ok(())
}
