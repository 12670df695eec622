//! Configuration module for pdfjoin.
//!
//! A [`Config`] is a complete, validated join request: the ordered input
//! list, the destination, and the handful of knobs the shell exposes. It is
//! constructed at join time from the current file list (see
//! [`crate::session::JoinSession::request`]) and never persisted.

use anyhow::{Result, bail};

use crate::JoinError;
use std::{path::PathBuf, str::FromStr};

/// How strictly input PDFs are parsed.
///
/// The lenient default tolerates minor structural non-conformance, which is
/// what files found in the wild need. Strict mode additionally requires a
/// well-formed, non-empty page tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Accept anything the parser can recover a document from.
    #[default]
    Lenient,
    /// Reject inputs whose page tree is missing, empty, or malformed.
    Strict,
}

impl FromStr for ParseMode {
    type Err = crate::JoinError;

    /// Parse a mode from string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation: "lenient" or "strict"
    ///
    /// # Errors
    ///
    /// Returns an error if the string doesn't match a valid mode.
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(JoinError::InvalidConfig {
                message: format!("Invalid parse mode: {s}. Must be one of: lenient, strict"),
            }),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for a join operation.
///
/// This structure contains all settings needed to perform a join: the
/// snapshot of input paths in merge order, the destination, and options.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input PDF file paths (in join order).
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// How strictly inputs are parsed.
    pub parse_mode: ParseMode,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Dry run mode - validate without creating output.
    pub dry_run: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Compress object streams in the output.
    pub compress: bool,
}

impl Config {
    /// Create a configuration with default options for the given request.
    ///
    /// `inputs` is a snapshot of the file list in join order; `output` is
    /// the destination path.
    pub fn new(inputs: Vec<PathBuf>, output: PathBuf) -> Self {
        Self {
            inputs,
            output,
            parse_mode: ParseMode::default(),
            overwrite_mode: OverwriteMode::default(),
            dry_run: false,
            quiet: false,
            verbose: false,
            compress: true,
        }
    }

    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// Checks for logical inconsistencies and invalid combinations. This
    /// runs before any file is opened, so an empty request is rejected
    /// without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        for input in &self.inputs {
            if input == &self.output {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("lenient", ParseMode::Lenient)]
    #[case("strict", ParseMode::Strict)]
    #[case("LENIENT", ParseMode::Lenient)]
    #[case("Strict", ParseMode::Strict)]
    fn test_parse_mode_from_str(#[case] input: &str, #[case] expected: ParseMode) {
        assert_eq!(ParseMode::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_mode_invalid() {
        assert!(ParseMode::from_str("sloppy").is_err());
        assert!(ParseMode::from_str("").is_err());
    }

    #[test]
    fn test_parse_mode_default_is_lenient() {
        assert_eq!(ParseMode::default(), ParseMode::Lenient);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::new(vec![PathBuf::from("a.pdf")], PathBuf::from("out.pdf"));

        assert_eq!(config.parse_mode, ParseMode::Lenient);
        assert_eq!(config.overwrite_mode, OverwriteMode::Prompt);
        assert!(!config.dry_run);
        assert!(!config.quiet);
        assert!(!config.verbose);
        assert!(config.compress);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::new(vec![PathBuf::from("a.pdf")], PathBuf::from("out.pdf"));

        assert!(config.validate().is_ok());

        // No inputs
        config.inputs.clear();
        assert!(config.validate().is_err());
        config.inputs = vec![PathBuf::from("a.pdf")];

        // Verbose + quiet conflict
        config.verbose = true;
        config.quiet = true;
        assert!(config.validate().is_err());
        config.verbose = false;
        config.quiet = false;

        // Output same as input
        config.output = PathBuf::from("a.pdf");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_should_print() {
        let mut config = Config::new(vec![PathBuf::from("a.pdf")], PathBuf::from("out.pdf"));

        assert!(config.should_print());

        config.quiet = true;
        assert!(!config.should_print());

        config.dry_run = true;
        assert!(config.should_print()); // Dry run always prints
    }
}
