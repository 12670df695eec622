//! Error types for pdfjoin.
//!
//! Every failure the library reports falls into one of two classes the
//! caller acts on: a *read* failure (an input could not be opened or its
//! page structure could not be parsed) or a *write* failure (the output
//! could not be created or written). The variants below keep enough context
//! for a useful message; [`JoinError::kind`] collapses them into the two
//! classes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pdfjoin operations.
pub type Result<T> = std::result::Result<T, JoinError>;

/// Coarse classification of a [`JoinError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input file could not be opened or parsed.
    Read,
    /// The output could not be created or written.
    Write,
    /// The request itself was invalid (empty list, bad flags, cancelled).
    Usage,
}

/// Main error type for pdfjoin operations.
#[derive(Debug, Error)]
pub enum JoinError {
    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {}\n  Reason: {source}", .path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Input path does not point at a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Failed to read or parse a PDF file.
    #[error("Failed to read PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToReadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is corrupted or its page structure is unusable.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", .path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// No files were provided for joining.
    #[error("No input files specified for joining")]
    NoFilesToJoin,

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create the output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write to the output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Join operation failed.
    #[error("Join operation failed: {reason}")]
    JoinFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for JoinError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for JoinError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl JoinError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToReadPdf error.
    pub fn failed_to_read_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToReadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a JoinFailed error.
    pub fn join_failed(reason: impl Into<String>) -> Self {
        Self::JoinFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify this error as a read, write, or usage failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. }
            | Self::FileNotAccessible { .. }
            | Self::NotAFile { .. }
            | Self::FailedToReadPdf { .. }
            | Self::CorruptedPdf { .. } => ErrorKind::Read,

            Self::OutputExists { .. }
            | Self::FailedToCreateOutput { .. }
            | Self::FailedToWrite { .. }
            | Self::Io { .. } => ErrorKind::Write,

            Self::NoFilesToJoin
            | Self::JoinFailed { .. }
            | Self::InvalidConfig { .. }
            | Self::Cancelled
            | Self::Other { .. } => ErrorKind::Usage,
        }
    }

    /// True if an input file is at fault.
    pub fn is_read(&self) -> bool {
        self.kind() == ErrorKind::Read
    }

    /// True if the output destination is at fault.
    pub fn is_write(&self) -> bool {
        self.kind() == ErrorKind::Write
    }

    /// Get the exit code for this error.
    ///
    /// Returns the appropriate process exit code based on error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToReadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::NoFilesToJoin => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::JoinFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
