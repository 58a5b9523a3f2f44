/// find-unwrapped-styles - report style objects missing StyleSheet.create
///
/// Walks a source tree and prints one line per file that declares style-like
/// object literals, marking whether the file uses the wrap call at all.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, LevelFilter};

use stylesheet_audit::utils::logging::setup_logging;
use stylesheet_audit::utils::output_formatter;
use stylesheet_audit::{Config, Scanner, StylePatterns};

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "find-unwrapped-styles",
    version,
    about = "Find style definitions that are not wrapped in StyleSheet.create"
)]
struct Args {
    /// Directory to scan (default: scan.root from the config, else "src")
    root: Option<PathBuf>,

    /// File extension to scan (can be used multiple times)
    #[arg(long = "ext", action = ArgAction::Append)]
    extensions: Option<Vec<String>>,

    /// Directory name to skip (can be used multiple times)
    #[arg(long = "exclude", action = ArgAction::Append)]
    exclude: Option<Vec<String>>,

    /// Path to JSON configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Export the scan report to a JSON file
    #[arg(long = "json")]
    json: Option<PathBuf>,

    /// Number of parallel workers (1 = sequential, 0 = one per CPU)
    #[arg(long = "parallel", default_value = "1")]
    parallel: usize,

    /// Exit with status 1 when any file has unwrapped styles
    #[arg(long = "check", action = ArgAction::SetTrue)]
    check: bool,

    /// Suppress per-file lines and the progress spinner
    #[arg(long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Set logging level
    #[arg(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,

    /// Write log records to this file instead of stderr
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.log_level, args.log_file.as_deref());

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(root) = &args.root {
        config.scan.root = root.clone();
    }
    if let Some(extensions) = &args.extensions {
        config.scan.extensions = extensions.clone();
    }
    if let Some(exclude) = &args.exclude {
        config.scan.exclude_dirs = exclude.clone();
    }

    let wrap_call = config.convention.wrap_call.clone();
    let root = config.scan.root.clone();
    let patterns = StylePatterns::new(&config.convention)?;
    let scanner = Scanner::new(patterns, config.scan).with_workers(args.parallel);

    if !args.quiet {
        println!(
            "🔍 Searching for style definitions that need {} wrapping...\n",
            wrap_call
        );
    }

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} files {wide_msg}")
                .context("Invalid progress template")?,
        );
        pb
    };

    let report = scanner
        .scan_with_progress(&root, |path| {
            progress.set_message(path.display().to_string());
            progress.inc(1);
        })
        .with_context(|| format!("Failed to scan {}", root.display()))?;
    progress.finish_and_clear();
    info!("Scanned {} files under {}", report.files_scanned, root.display());

    if !args.quiet {
        for entry in &report.entries {
            println!("{}", output_formatter::format_scan_entry(entry, &wrap_call));
        }
    }
    print!("{}", output_formatter::format_scan_summary(&report));

    if let Some(json_path) = &args.json {
        output_formatter::export_scan_json(&report, json_path)?;
        if !args.quiet {
            println!("\n{} {}", "Report written to".green(), json_path.display());
        }
    }

    if args.check && report.unwrapped_count() > 0 {
        process::exit(1);
    }

    Ok(())
}
