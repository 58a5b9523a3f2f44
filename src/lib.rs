/// Stylesheet Audit - find and wrap inline React Native style objects
///
/// This library backs two tools: a scanner that reports files declaring
/// style objects without `StyleSheet.create`, and a fixer that wraps those
/// declarations in place and adds the `StyleSheet` import.

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

// Re-export main types for convenience
pub use crate::config::{Config, FixSettings, ScanSettings, StyleConvention};
pub use crate::core::fixer::{FileFix, FixStatus, FixSummary, Fixer};
pub use crate::core::patterns::StylePatterns;
pub use crate::core::scanner::{FileRecord, ScanEntry, ScanReport, ScanWarning, Scanner};
pub use crate::core::wrapper::BraceStrategy;
pub use crate::error::AuditError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scan a directory with the default convention and settings
///
/// This is a convenience function for simple use cases.
pub fn scan_directory<P: AsRef<std::path::Path>>(root: P) -> Result<ScanReport, AuditError> {
    let patterns = StylePatterns::new(&StyleConvention::default())?;
    Scanner::new(patterns, ScanSettings::default()).scan(root.as_ref())
}

/// Fix a list of files with the default convention and brace strategy
pub fn fix_files<P: AsRef<std::path::Path>>(paths: &[P]) -> Result<FixSummary, AuditError> {
    let patterns = StylePatterns::new(&StyleConvention::default())?;
    Ok(Fixer::new(patterns, BraceStrategy::default()).fix_files(paths))
}
