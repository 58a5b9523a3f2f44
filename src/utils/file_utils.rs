/// File handling utilities
///
/// This module provides functions for enumerating source files under a
/// directory and for reading and writing them as UTF-8 text.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::AuditError;

/// One step of the walk: a matching file, or an entry that could not be visited
#[derive(Debug)]
pub enum SourceEntry {
    File(PathBuf),
    Unreadable(AuditError),
}

/// Walk results under a root, in visit order
#[derive(Debug, Default)]
pub struct SourceFiles {
    pub entries: Vec<SourceEntry>,
}

impl SourceFiles {
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.iter().filter_map(|entry| match entry {
            SourceEntry::File(path) => Some(path),
            SourceEntry::Unreadable(_) => None,
        })
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }
}

/// Whether `path` ends in one of `extensions` (compared case-insensitively)
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map_or(false, |ext| {
            extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(&ext))
        })
}

fn is_excluded(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && exclude_dirs
            .iter()
            .any(|name| entry.file_name().to_string_lossy() == name.as_str())
}

/// Recursively collect files with one of `extensions` under `root`
///
/// Entries are visited in file-name order so runs are reproducible. Entries
/// that cannot be read are kept at their place in the walk instead of
/// aborting it.
pub fn collect_source_files(
    root: &Path,
    extensions: &[String],
    exclude_dirs: &[String],
) -> Result<SourceFiles, AuditError> {
    if !root.is_dir() {
        return Err(AuditError::RootNotFound(root.to_path_buf()));
    }

    let mut found = SourceFiles::default();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, exclude_dirs));

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                    found.entries.push(SourceEntry::File(entry.into_path()));
                }
            }
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                warn!("Skipping unreadable entry {}: {}", path.display(), e);
                found.entries.push(SourceEntry::Unreadable(AuditError::Walk {
                    path,
                    reason: e.to_string(),
                }));
            }
        }
    }

    debug!("Found {} source files under {}", found.file_count(), root.display());
    Ok(found)
}

/// Read a source file as UTF-8 text
pub fn read_source(path: &Path) -> Result<String, AuditError> {
    fs::read_to_string(path).map_err(|e| AuditError::from_read(path, e))
}

/// Overwrite a source file in place
pub fn write_source(path: &Path, content: &str) -> Result<(), AuditError> {
    fs::write(path, content).map_err(|source| AuditError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        let exts = vec!["js".to_string(), ".jsx".to_string()];
        assert!(has_extension(Path::new("a/b/View.js"), &exts));
        assert!(has_extension(Path::new("View.JSX"), &exts));
        assert!(!has_extension(Path::new("View.ts"), &exts));
        assert!(!has_extension(Path::new("Makefile"), &exts));
    }

    #[test]
    fn test_collect_sorted_and_excluded() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        for rel in ["b.js", "a/z.js", "node_modules/x.js", "c.ts"] {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().expect("parent")).expect("Failed to create directories");
            fs::write(&path, "").expect("Failed to write file");
        }

        let found = collect_source_files(root, &["js".to_string()], &["node_modules".to_string()])
            .expect("Failed to collect");
        let files: Vec<PathBuf> = found.files().cloned().collect();
        assert_eq!(files, vec![root.join("a/z.js"), root.join("b.js")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_keeps_walk_position() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let locked = root.join("b_locked");
        fs::create_dir_all(&locked).expect("Failed to create directories");
        fs::write(locked.join("inner.js"), "").expect("Failed to write file");
        fs::write(root.join("a.js"), "").expect("Failed to write file");
        fs::write(root.join("c.js"), "").expect("Failed to write file");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))
            .expect("Failed to set permissions");

        // Permission bits do not bind a privileged user
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))
                .expect("Failed to restore permissions");
            return;
        }

        let found = collect_source_files(root, &["js".to_string()], &[]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))
            .expect("Failed to restore permissions");
        let found = found.expect("Failed to collect");

        assert_eq!(found.entries.len(), 3);
        assert!(matches!(&found.entries[0], SourceEntry::File(p) if p.ends_with("a.js")));
        assert!(matches!(
            &found.entries[1],
            SourceEntry::Unreadable(AuditError::Walk { path, .. }) if path.ends_with("b_locked")
        ));
        assert!(matches!(&found.entries[2], SourceEntry::File(p) if p.ends_with("c.js")));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_source(Path::new("/no/such/file.js")).unwrap_err();
        assert!(matches!(err, AuditError::FileNotFound(_)));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("binary.js");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).expect("Failed to write file");

        let err = read_source(&path).unwrap_err();
        assert!(matches!(err, AuditError::Decode { .. }));
    }
}
