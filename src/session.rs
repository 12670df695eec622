//! The top-level join controller.
//!
//! [`JoinSession`] owns the [`FileList`] and drives the whole pipeline the
//! way a front-end needs it: mutate the list in response to user actions,
//! then join the current snapshot to a destination. On success the list is
//! cleared so the next batch starts fresh; on failure it is left exactly
//! as it was, so the user can fix the problem and retry.

use std::path::{Path, PathBuf};

use crate::config::{Config, OverwriteMode, ParseMode};
use crate::error::{JoinError, Result};
use crate::io::WriteStatistics;
use crate::list::FileList;
use crate::merge::{JoinStatistics, join_pdfs};

/// Outcome of a completed session join.
#[derive(Debug, Clone)]
pub struct JoinReport {
    /// Statistics about the join itself.
    pub statistics: JoinStatistics,

    /// Statistics about the output write.
    pub write: WriteStatistics,

    /// Paths that were joined, in order.
    pub joined_files: Vec<PathBuf>,
}

/// Controller owning the input file list and the join policy.
#[derive(Debug, Clone)]
pub struct JoinSession {
    files: FileList,
    parse_mode: ParseMode,
    clear_on_success: bool,
}

impl JoinSession {
    /// Create a session with an empty file list.
    pub fn new() -> Self {
        Self {
            files: FileList::new(),
            parse_mode: ParseMode::default(),
            clear_on_success: true,
        }
    }

    /// Keep the file list after a successful join instead of clearing it.
    pub fn retain_list_after_join(mut self) -> Self {
        self.clear_on_success = false;
        self
    }

    /// Set the parse mode used for joins from this session.
    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    /// The current file list.
    pub fn files(&self) -> &FileList {
        &self.files
    }

    /// Add a file to the list; duplicates are ignored.
    ///
    /// Returns true if the path was added.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> bool {
        self.files.add(path)
    }

    /// Remove a file from the list; absent paths are ignored.
    ///
    /// Returns true if the path was present.
    pub fn remove_file(&mut self, path: &Path) -> bool {
        self.files.remove(path)
    }

    /// Empty the file list.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Build a join request for the current list.
    ///
    /// This is the snapshot point: the returned config captures the list as
    /// it is now and is unaffected by later mutations.
    ///
    /// # Errors
    ///
    /// Returns `NoFilesToJoin` if the list is empty; nothing is opened or
    /// created in that case.
    pub fn request(&self, output: &Path) -> Result<Config> {
        if self.files.is_empty() {
            return Err(JoinError::NoFilesToJoin);
        }

        let mut config = Config::new(self.files.snapshot(), output.to_path_buf());
        config.parse_mode = self.parse_mode;
        // The shell has already confirmed the destination by the time a
        // session join runs.
        config.overwrite_mode = OverwriteMode::Force;
        Ok(config)
    }

    /// Join the current list into `output`.
    ///
    /// On success the list is cleared (unless the session was built with
    /// [`retain_list_after_join`](Self::retain_list_after_join)). On any
    /// failure the list is left unmodified.
    pub async fn join_to(&mut self, output: &Path) -> Result<JoinReport> {
        let config = self.request(output)?;
        let (result, write) = join_pdfs(&config).await?;

        if self.clear_on_success {
            self.files.clear();
        }

        Ok(JoinReport {
            statistics: result.statistics,
            write,
            joined_files: result.joined_files,
        })
    }
}

impl Default for JoinSession {
    fn default() -> Self {
        Self::new()
    }
}
