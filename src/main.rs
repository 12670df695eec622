//! pdfjoin - Join PDF files into a single document.
//!
//! The command-line shell around the join core: expand inputs, validate,
//! confirm overwrites, join, write, report.

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process;

use pdfjoin::cli::Cli;
use pdfjoin::config::Config;
use pdfjoin::error::JoinError;
use pdfjoin::io::{PdfWriter, WriteOptions};
use pdfjoin::merge::Joiner;
use pdfjoin::output::{OutputFormatter, display_inputs_report};
use pdfjoin::validation::{InputsReport, Validator};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Machine-readable summary printed with --json.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    inputs: InputsReport,
    output: PathBuf,
    total_pages: usize,
    files_joined: usize,
    output_size: u64,
    dry_run: bool,
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), JoinError> {
    let inputs = cli.expanded_inputs()?;
    let config = cli.to_config(inputs)?;

    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfjoin::NAME, pdfjoin::VERSION));
        formatter.blank_line();
    }

    // Validate all inputs before anything touches the output path.
    formatter.info("Validating input files...");
    let validator = Validator::with_mode(config.parse_mode);
    let report = validator.validate_config(&config).await?;

    if formatter.should_print() {
        display_inputs_report(&formatter, &report);
        formatter.blank_line();
    }

    if !config.dry_run {
        handle_output_overwrite(&config, &formatter).await?;
    }

    if config.dry_run {
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", config.output.display()));
        formatter.info("  Run without --dry-run to create the joined PDF");

        if cli.json {
            print_json_summary(&report, &config, report.total_pages, 0)?;
        }
        return Ok(());
    }

    formatter.info("Joining documents...");

    let joiner = Joiner::new();
    let result = joiner.join(&config).await?;

    if formatter.should_print() {
        formatter.info(&format!(
            "Joined {} file(s) into {} pages in {:.2}s",
            result.statistics.files_joined,
            result.statistics.total_pages,
            result.statistics.join_time.as_secs_f64()
        ));
    }

    formatter.info(&format!("Writing to: {}", config.output.display()));

    let writer = PdfWriter::with_options(WriteOptions {
        compress: config.compress,
        ..Default::default()
    });
    let write_stats = writer
        .save_with_stats(&result.document, &config.output)
        .await?;

    if formatter.should_print() {
        formatter.blank_line();
        formatter.success(&format!(
            "Successfully created {} ({})",
            config.output.display(),
            write_stats.format_file_size()
        ));

        if formatter.is_verbose() {
            formatter.blank_line();
            formatter.section("Statistics");
            formatter.detail("Input files", &result.statistics.files_joined.to_string());
            formatter.detail("Total pages", &result.statistics.total_pages.to_string());
            formatter.detail("Input size", &result.statistics.format_input_size());
            formatter.detail("Output size", &write_stats.format_file_size());
            formatter.detail(
                "Load time",
                &format!("{:.2}s", result.statistics.load_time.as_secs_f64()),
            );
            formatter.detail(
                "Join time",
                &format!("{:.2}s", result.statistics.join_time.as_secs_f64()),
            );
            formatter.detail(
                "Write time",
                &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
            );
            formatter.detail(
                "Compression",
                if write_stats.compressed { "Yes" } else { "No" },
            );
        }
    }

    if cli.json {
        print_json_summary(
            &report,
            &config,
            result.statistics.total_pages,
            write_stats.file_size,
        )?;
    }

    Ok(())
}

/// Print the --json summary to stdout.
fn print_json_summary(
    report: &InputsReport,
    config: &Config,
    total_pages: usize,
    output_size: u64,
) -> Result<(), JoinError> {
    let summary = JsonSummary {
        inputs: report.clone(),
        output: config.output.clone(),
        total_pages,
        files_joined: report.files_checked,
        output_size,
        dry_run: config.dry_run,
    };

    let rendered = serde_json::to_string_pretty(&summary)
        .map_err(|e| JoinError::other(format!("Failed to render JSON summary: {e}")))?;
    println!("{rendered}");

    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), JoinError> {
    use pdfjoin::config::OverwriteMode;

    if !config.output.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(JoinError::output_exists(config.output.clone())),
        OverwriteMode::Prompt => {
            // In quiet mode there is nobody to ask; treat as no-clobber.
            if formatter.is_quiet() {
                return Err(JoinError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| JoinError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(JoinError::Cancelled)
            }
        }
    }
}
