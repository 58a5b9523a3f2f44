/// Output formatter for scan and fix results
///
/// This module renders the human-readable status lines both tools print and
/// handles the JSON export of scan reports.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use colored::Colorize;

use crate::core::fixer::{FileFix, FixStatus, FixSummary};
use crate::core::imports::ImportOutcome;
use crate::core::scanner::{FileRecord, ScanEntry, ScanReport, ScanWarning};
use crate::core::wrapper::UnclosedDeclaration;
use crate::error::AuditError;

/// Scanner line for a file with style declarations
pub fn format_scan_record(record: &FileRecord, wrap_call: &str) -> String {
    let names = record.style_vars.join(", ");
    if record.is_compliant() {
        format!(
            "✅ {}: {} {}",
            record.path.display(),
            names,
            format!("(has {})", wrap_call).green()
        )
    } else {
        format!(
            "❌ {}: {} {}",
            record.path.display(),
            names,
            format!("(no {})", wrap_call).red()
        )
    }
}

pub fn format_scan_warning(warning: &ScanWarning) -> String {
    format!(
        "⚠️  {} {}: {}",
        "Error reading".yellow(),
        warning.path.display(),
        warning.message
    )
}

/// Scanner line for one report entry, record or warning
pub fn format_scan_entry(entry: &ScanEntry, wrap_call: &str) -> String {
    match entry {
        ScanEntry::Record(record) => format_scan_record(record, wrap_call),
        ScanEntry::Warning(warning) => format_scan_warning(warning),
    }
}

/// Closing summary of a scan, with the list of files that need fixing
pub fn format_scan_summary(report: &ScanReport) -> String {
    let mut output = String::new();
    let unwrapped = report.unwrapped_count();

    output.push_str(&format!("\n📊 {}\n", "Summary:".bold()));
    output.push_str(&format!("Files scanned: {}\n", report.files_scanned));
    output.push_str(&format!("Found {} files with unwrapped styles\n", unwrapped));

    if unwrapped > 0 {
        output.push_str(&format!("\n🔧 {}\n", "Files that need fixing:".yellow().bold()));
        for record in report.unwrapped() {
            output.push_str(&format!("  - {}\n", record.path.display()));
        }
    }

    output
}

fn format_unclosed(path: &Path, unclosed: &[UnclosedDeclaration]) -> Vec<String> {
    unclosed
        .iter()
        .map(|decl| {
            format!(
                "  ⚠️  {}: could not find closing brace for {} (line {})",
                path.display(),
                decl.name,
                decl.line
            )
            .yellow()
            .to_string()
        })
        .collect()
}

/// Fixer status line(s) for one file
pub fn format_fix_result(fix: &FileFix, wrap_call: &str, symbol: &str) -> String {
    let path = fix.path.display();
    let mut lines = Vec::new();

    match &fix.status {
        FixStatus::AlreadyWrapped => {
            lines.push(format!("  ✅ {} already uses {}", path, wrap_call));
        }
        FixStatus::Modified {
            style_vars,
            import,
            unclosed,
        } => {
            lines.push(format!(
                "  🔧 {} {}: {}",
                "Modified".cyan(),
                path,
                style_vars.join(", ")
            ));
            if *import == ImportOutcome::NoInsertionPoint {
                lines.push(
                    format!("  ⚠️  {}: no import of {} could be added", path, symbol)
                        .yellow()
                        .to_string(),
                );
            }
            lines.extend(format_unclosed(&fix.path, unclosed));
        }
        FixStatus::NoDeclarations => {
            lines.push(format!("  ➖ {}: no style declarations found", path));
        }
        FixStatus::Unclosed(unclosed) => {
            lines.push(
                format!("  ⚠️  {}: style declarations could not be wrapped", path)
                    .yellow()
                    .to_string(),
            );
            lines.extend(format_unclosed(&fix.path, unclosed));
        }
        FixStatus::Missing => {
            lines.push(format!("  ⚠️  {} {}", "File not found:".yellow(), path));
        }
        FixStatus::Failed(reason) => {
            lines.push(format!("  ⚠️  {} {}: {}", "Error processing".red(), path, reason));
        }
    }

    lines.join("\n")
}

pub fn format_fix_summary(summary: &FixSummary, dry_run: bool) -> String {
    let verb = if dry_run { "Would fix" } else { "Fixed" };
    format!(
        "\n📊 {} {} {} files",
        "Summary:".bold(),
        verb,
        summary.modified_count
    )
}

/// Export a scan report to a JSON file
pub fn export_scan_json(report: &ScanReport, output_path: &Path) -> Result<(), AuditError> {
    let file = File::create(output_path).map_err(|e| AuditError::Report {
        path: output_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::to_writer_pretty(file, report).map_err(|e| AuditError::Report {
        path: output_path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load a scan report previously written by `export_scan_json`
pub fn load_scan_json(input_path: &Path) -> Result<ScanReport, AuditError> {
    let file = File::open(input_path).map_err(|e| AuditError::Report {
        path: input_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| AuditError::Report {
        path: input_path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(path: &str, has_wrap_call: bool) -> FileRecord {
        FileRecord {
            path: PathBuf::from(path),
            style_vars: vec!["styles".to_string(), "rowStyle".to_string()],
            has_wrap_call,
        }
    }

    #[test]
    fn test_scan_record_lines() {
        let bad = format_scan_record(&record("src/a.js", false), "StyleSheet.create");
        assert!(bad.starts_with("❌ src/a.js: styles, rowStyle"));
        assert!(bad.contains("no StyleSheet.create"));

        let good = format_scan_record(&record("src/b.js", true), "StyleSheet.create");
        assert!(good.starts_with("✅ src/b.js"));
        assert!(good.contains("has StyleSheet.create"));
    }

    #[test]
    fn test_scan_entry_dispatch() {
        let warning = ScanEntry::Warning(ScanWarning { path: PathBuf::from("src/x.js"), message: "denied".into() });
        assert!(format_scan_entry(&warning, "StyleSheet.create").contains("src/x.js: denied"));
        let line = format_scan_entry(&ScanEntry::Record(record("src/a.js", false)), "StyleSheet.create");
        assert!(line.starts_with("❌ src/a.js"));
    }

    #[test]
    fn test_scan_summary_lists_unwrapped() {
        let report = ScanReport {
            root: PathBuf::from("src"),
            files_scanned: 2,
            entries: vec![
                ScanEntry::Record(record("src/a.js", false)),
                ScanEntry::Record(record("src/b.js", true)),
            ],
        };
        let summary = format_scan_summary(&report);
        assert!(summary.contains("Found 1 files with unwrapped styles"));
        assert!(summary.contains("  - src/a.js"));
        assert!(!summary.contains("  - src/b.js"));
    }

    #[test]
    fn test_fix_lines() {
        let missing = FileFix { path: PathBuf::from("gone.js"), status: FixStatus::Missing };
        assert!(format_fix_result(&missing, "StyleSheet.create", "StyleSheet").contains("gone.js"));

        let unclosed = FileFix {
            path: PathBuf::from("a.js"),
            status: FixStatus::Unclosed(vec![UnclosedDeclaration { name: "styles".into(), line: 3 }]),
        };
        let text = format_fix_result(&unclosed, "StyleSheet.create", "StyleSheet");
        assert!(text.contains("could not find closing brace for styles (line 3)"));
    }

    #[test]
    fn test_json_export_reloads() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("report.json");
        let report = ScanReport {
            root: PathBuf::from("src"),
            files_scanned: 1,
            entries: vec![
                ScanEntry::Warning(ScanWarning { path: PathBuf::from("src/0.js"), message: "bad".into() }),
                ScanEntry::Record(record("src/a.js", false)),
            ],
        };

        export_scan_json(&report, &path).expect("Failed to export report");
        let loaded = load_scan_json(&path).expect("Failed to load report");
        assert_eq!(loaded, report);
        assert_eq!(loaded.unwrapped_paths(), vec![PathBuf::from("src/a.js")]);
    }
}
