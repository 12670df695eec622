//! PDF joining.
//!
//! [`Joiner`] produces the in-memory concatenation of the inputs;
//! [`join_pdfs`] is the full pipeline (load, concatenate, write) used by
//! [`crate::session::JoinSession`] and most callers.

pub mod joiner;

pub use joiner::{JoinResult, JoinStatistics, Joiner};

use crate::Result;
use crate::config::Config;
use crate::io::{PdfWriter, WriteOptions, WriteStatistics};

/// Join the configured inputs and write the result to the configured output.
///
/// Zero inputs are rejected before any file is opened; a read failure
/// aborts before the output path is touched.
///
/// # Examples
///
/// ```no_run
/// use pdfjoin::config::Config;
/// use pdfjoin::merge::join_pdfs;
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::new(
///     vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
///     PathBuf::from("joined.pdf"),
/// );
///
/// let (result, write) = join_pdfs(&config).await?;
/// println!(
///     "{} pages written to {}",
///     result.statistics.total_pages,
///     write.output_path.display()
/// );
/// # Ok(())
/// # }
/// ```
pub async fn join_pdfs(config: &Config) -> Result<(JoinResult, WriteStatistics)> {
    let joiner = Joiner::new();
    let result = joiner.join(config).await?;

    let writer = PdfWriter::with_options(WriteOptions {
        compress: config.compress,
        ..Default::default()
    });
    let write_stats = writer.save_with_stats(&result.document, &config.output).await?;

    Ok((result, write_stats))
}
