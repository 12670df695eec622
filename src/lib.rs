//! pdfjoin - Join PDF files into a single document.
//!
//! This library implements the logical core of a PDF-join utility: an
//! ordered, duplicate-free list of input files and a join operation that
//! concatenates every page of every input, in list order, into one output
//! document. A thin shell (the `pdfjoin` binary) drives it; any other
//! front-end can do the same through [`JoinSession`].
//!
//! # Examples
//!
//! ## Joining through a session
//!
//! ```no_run
//! use pdfjoin::JoinSession;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = JoinSession::new();
//! session.add_file("a.pdf");
//! session.add_file("b.pdf");
//! session.add_file("a.pdf"); // duplicate, ignored
//!
//! let report = session.join_to(Path::new("joined.pdf")).await?;
//! println!("Wrote {} pages", report.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using individual components
//!
//! ```no_run
//! use pdfjoin::io::{PdfReader, PdfWriter};
//! use pdfjoin::validation::Validator;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! let report = validator.validate_file(Path::new("input.pdf")).await?;
//! println!("PDF has {} pages", report.page_count);
//!
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("input.pdf")).await?;
//!
//! let writer = PdfWriter::new();
//! writer.save(&loaded.document, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod list;
pub mod merge;
pub mod output;
pub mod session;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, ParseMode};
pub use error::{ErrorKind, JoinError, Result};
pub use list::FileList;
pub use session::JoinSession;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
