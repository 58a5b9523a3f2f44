/// fix-stylesheets - wrap style objects in StyleSheet.create in place
///
/// Takes an explicit ordered list of files, adds the StyleSheet import where
/// needed and wraps every style-like declaration. Files that need no change
/// are left untouched.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use log::{info, LevelFilter};

use stylesheet_audit::utils::logging::setup_logging;
use stylesheet_audit::utils::output_formatter;
use stylesheet_audit::{BraceStrategy, Config, Fixer, StylePatterns};

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "fix-stylesheets",
    version,
    about = "Wrap style definitions in StyleSheet.create and add the import"
)]
struct Args {
    /// Files to fix, in order (default: fix.files from the config)
    files: Vec<PathBuf>,

    /// Take the file list from a find-unwrapped-styles JSON report
    #[arg(long = "from-scan", conflicts_with = "files")]
    from_scan: Option<PathBuf>,

    /// Path to JSON configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// How closing braces are located
    #[arg(long = "strategy", value_enum)]
    strategy: Option<BraceStrategy>,

    /// Report changes without writing any file
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Set logging level
    #[arg(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,

    /// Write log records to this file instead of stderr
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// Resolve the fix list: CLI paths, then a scan report, then the config
fn files_to_fix(args: &Args, config: &Config) -> Result<Vec<PathBuf>> {
    if !args.files.is_empty() {
        return Ok(args.files.clone());
    }
    if let Some(report_path) = &args.from_scan {
        let report = output_formatter::load_scan_json(report_path)
            .with_context(|| format!("Failed to load scan report {}", report_path.display()))?;
        return Ok(report.unwrapped_paths());
    }
    Ok(config.fix.files.clone())
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.log_level, args.log_file.as_deref());

    let config = Config::load(args.config.as_deref())?;
    let files = files_to_fix(&args, &config)?;

    if files.is_empty() {
        eprintln!("{}", "Error: No files specified to fix".red());
        eprintln!("Pass paths, --from-scan <report.json>, or set fix.files in --config");
        process::exit(1);
    }

    let strategy = args.strategy.unwrap_or(config.fix.strategy);
    let convention = config.convention.clone();
    let patterns = StylePatterns::new(&convention)?;
    let fixer = Fixer::new(patterns, strategy).dry_run(args.dry_run);

    println!("🔧 Fixing {} wrapping for {} files...\n", convention.wrap_call, files.len());
    info!("Fixing {} files with {:?} strategy", files.len(), strategy);

    let summary = fixer.fix_files_with(&files, |result| {
        println!(
            "{}",
            output_formatter::format_fix_result(result, &convention.wrap_call, &convention.symbol)
        );
    });

    println!("{}", output_formatter::format_fix_summary(&summary, args.dry_run));

    Ok(())
}
