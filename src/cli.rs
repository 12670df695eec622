//! CLI argument parsing for pdfjoin.
//!
//! This module defines the command-line interface structure using `clap`.
//! The CLI is the shell around the library core: it expands input patterns,
//! feeds them through the duplicate-suppressing file list, and builds the
//! join configuration.

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::{Config, OverwriteMode, ParseMode};
use crate::error::{JoinError, Result};
use crate::list::FileList;
use crate::utils::collect_paths_for_patterns;

/// Join PDF files into a single document.
///
/// pdfjoin concatenates every page of every input, in the order given,
/// into one output PDF. Inputs are parsed leniently by default so that
/// slightly malformed files found in the wild still join.
#[derive(Parser, Debug)]
#[command(name = "pdfjoin")]
#[command(version)]
#[command(about = "Join PDF files into a single document", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files to join (in order)
    ///
    /// Specify multiple files or use glob patterns.
    /// Files are joined in the order provided; a path given twice is
    /// only joined once.
    ///
    /// Examples:
    ///   pdfjoin file1.pdf file2.pdf -o output.pdf
    ///   pdfjoin chapter*.pdf -o book.pdf
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    ///
    /// The joined PDF will be written to this location.
    /// Use --force to overwrite existing files without confirmation.
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Dry run - validate inputs without creating output
    ///
    /// Validates that all input files exist and are readable PDFs,
    /// then stops without touching the output path.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Strict parsing - reject inputs with a malformed page tree
    ///
    /// By default inputs are parsed leniently, tolerating minor
    /// structural non-conformance. With this flag an input whose page
    /// tree is missing or empty is rejected.
    #[arg(long)]
    pub strict: bool,

    /// Force overwrite of existing output file without confirmation
    ///
    /// By default, pdfjoin will prompt before overwriting an existing file.
    /// Use this flag to skip the confirmation prompt.
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    ///
    /// If the output file already exists, exit with an error
    /// instead of prompting or overwriting.
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    /// Useful for scripts and automation.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output - show detailed information about each PDF
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not compress object streams in the output
    #[arg(long)]
    pub no_compress: bool,

    /// Print a machine-readable JSON summary to stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Expand the input patterns into concrete paths, in order, with
    /// duplicates suppressed.
    ///
    /// A pattern naming an existing file is taken as-is; anything else is
    /// treated as a glob. A pattern that matches nothing is an error.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` for a pattern with no matches, or a glob
    /// error for an unparseable pattern.
    pub fn expanded_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut list = FileList::new();

        for pattern in &self.inputs {
            if Path::new(pattern).exists() {
                list.add(PathBuf::from(pattern));
                continue;
            }

            let matches = collect_paths_for_patterns([pattern.as_str()])?;
            if matches.is_empty() {
                return Err(JoinError::file_not_found(PathBuf::from(pattern)));
            }
            for path in matches {
                list.add(path);
            }
        }

        Ok(list.snapshot())
    }

    /// Convert CLI arguments into a validated [`Config`].
    ///
    /// # Arguments
    ///
    /// * `inputs` - Expanded input paths (see [`Cli::expanded_inputs`])
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the resulting configuration fails
    /// validation.
    pub fn to_config(&self, inputs: Vec<PathBuf>) -> Result<Config> {
        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let parse_mode = if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        };

        let config = Config {
            inputs,
            output: self.output.clone(),
            parse_mode,
            overwrite_mode,
            dry_run: self.dry_run,
            quiet: self.quiet,
            verbose: self.verbose,
            compress: !self.no_compress,
        };

        config
            .validate()
            .map_err(|e| JoinError::invalid_config(e.to_string()))?;

        Ok(config)
    }
}
