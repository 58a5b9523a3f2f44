/// Scanner for style declarations that are not wrapped
///
/// Walks a source tree, finds style-like object declarations and classifies
/// each file by whether it uses the wrap call anywhere. Never modifies files.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ScanSettings;
use crate::core::patterns::{style_variable_names, StylePatterns};
use crate::error::AuditError;
use crate::utils::file_utils::{collect_source_files, read_source, SourceEntry};

/// A scanned file with at least one style-like declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Matched variable names in source order
    pub style_vars: Vec<String>,
    pub has_wrap_call: bool,
}

impl FileRecord {
    pub fn is_compliant(&self) -> bool {
        self.has_wrap_call
    }
}

/// A file or directory skipped during the scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub message: String,
}

/// One reported line of a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScanEntry {
    Record(FileRecord),
    Warning(ScanWarning),
}

/// Everything one scan produced
///
/// `entries` interleaves records and warnings in enumeration order, so a
/// skipped directory is reported where the walk met it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub root: PathBuf,
    pub files_scanned: usize,
    pub entries: Vec<ScanEntry>,
}

impl ScanReport {
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            ScanEntry::Record(record) => Some(record),
            ScanEntry::Warning(_) => None,
        })
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ScanWarning> {
        self.entries.iter().filter_map(|entry| match entry {
            ScanEntry::Warning(warning) => Some(warning),
            ScanEntry::Record(_) => None,
        })
    }

    /// Records of files that declare styles but never use the wrap call
    pub fn unwrapped(&self) -> impl Iterator<Item = &FileRecord> {
        self.records().filter(|record| !record.is_compliant())
    }

    pub fn unwrapped_count(&self) -> usize {
        self.unwrapped().count()
    }

    pub fn unwrapped_paths(&self) -> Vec<PathBuf> {
        self.unwrapped().map(|record| record.path.clone()).collect()
    }
}

/// Per-file scan outcome
enum FileScan {
    Record(FileRecord),
    NoDeclarations,
    Skipped(ScanWarning),
}

/// Directory scanner for unwrapped style declarations
pub struct Scanner {
    patterns: StylePatterns,
    settings: ScanSettings,
    /// Classification workers; 1 is sequential, 0 is one per logical CPU
    workers: usize,
}

impl Scanner {
    pub fn new(patterns: StylePatterns, settings: ScanSettings) -> Self {
        Self {
            patterns,
            settings,
            workers: 1,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Classify already-read content; `None` when it has no style declarations
    pub fn classify(&self, path: &Path, content: &str) -> Option<FileRecord> {
        let style_vars = style_variable_names(content);
        if style_vars.is_empty() {
            return None;
        }

        Some(FileRecord {
            path: path.to_path_buf(),
            style_vars,
            has_wrap_call: self.patterns.uses_wrap_call(content),
        })
    }

    /// Read and classify a single file
    pub fn scan_file(&self, path: &Path) -> Result<Option<FileRecord>, AuditError> {
        debug!("Scanning {}", path.display());
        let content = read_source(path)?;
        Ok(self.classify(path, &content))
    }

    /// Scan every matching file under `root`
    pub fn scan(&self, root: &Path) -> Result<ScanReport, AuditError> {
        self.scan_with_progress(root, |_| {})
    }

    /// Scan every matching file under `root`, calling `on_file` after each one
    pub fn scan_with_progress<F>(&self, root: &Path, on_file: F) -> Result<ScanReport, AuditError>
    where
        F: Fn(&Path) + Sync,
    {
        let sources = collect_source_files(
            root,
            &self.settings.extensions,
            &self.settings.exclude_dirs,
        )?;

        let visit = |entry: &SourceEntry| match entry {
            SourceEntry::File(path) => {
                let outcome = self.scan_one(path);
                on_file(path);
                outcome
            }
            SourceEntry::Unreadable(err) => FileScan::Skipped(ScanWarning {
                path: match err {
                    AuditError::Walk { path, .. } => path.clone(),
                    _ => root.to_path_buf(),
                },
                message: err.to_string(),
            }),
        };

        let outcomes: Vec<FileScan> = match self.build_pool() {
            Some(pool) => pool.install(|| sources.entries.par_iter().map(visit).collect()),
            None => sources.entries.iter().map(visit).collect(),
        };

        let entries = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                FileScan::Record(record) => Some(ScanEntry::Record(record)),
                FileScan::NoDeclarations => None,
                FileScan::Skipped(warning) => Some(ScanEntry::Warning(warning)),
            })
            .collect();

        let report = ScanReport {
            root: root.to_path_buf(),
            files_scanned: sources.file_count(),
            entries,
        };

        Ok(report)
    }

    fn scan_one(&self, path: &Path) -> FileScan {
        match self.scan_file(path) {
            Ok(Some(record)) => FileScan::Record(record),
            Ok(None) => FileScan::NoDeclarations,
            Err(e) => {
                warn!("Error reading {}: {}", path.display(), e);
                FileScan::Skipped(ScanWarning {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Local thread pool when more than one worker is requested
    fn build_pool(&self) -> Option<rayon::ThreadPool> {
        if self.workers == 1 {
            return None;
        }
        let workers = if self.workers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.workers
        };

        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!("Failed to build thread pool, scanning sequentially: {}", e);
                None
            }
        }
    }
}
