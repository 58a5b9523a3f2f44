/// Fixer that wraps style declarations in place
///
/// Each file on the fix list is read, its import normalized and every
/// style-like declaration wrapped. A file is written back only when at least
/// one declaration was rewritten.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::core::imports::{add_import, ImportOutcome};
use crate::core::patterns::StylePatterns;
use crate::core::wrapper::{wrap_declarations, BraceStrategy, UnclosedDeclaration};
use crate::error::AuditError;
use crate::utils::file_utils::{read_source, write_source};

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixStatus {
    /// The wrap call already appears in the file; nothing was touched
    AlreadyWrapped,
    /// At least one declaration was rewritten
    Modified {
        style_vars: Vec<String>,
        import: ImportOutcome,
        unclosed: Vec<UnclosedDeclaration>,
    },
    /// No style-like declaration in the file
    NoDeclarations,
    /// Declarations exist but none could be closed; nothing was written
    Unclosed(Vec<UnclosedDeclaration>),
    /// The path does not exist
    Missing,
    /// The file could not be read or written
    Failed(String),
}

/// Outcome for one path on the fix list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFix {
    pub path: PathBuf,
    pub status: FixStatus,
}

impl FileFix {
    pub fn is_modified(&self) -> bool {
        matches!(self.status, FixStatus::Modified { .. })
    }
}

/// Outcomes for a whole fix list, in list order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixSummary {
    pub results: Vec<FileFix>,
    pub modified_count: usize,
}

/// Result of transforming one source text, before anything is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFix {
    pub content: String,
    pub status: FixStatus,
}

/// Rewrites style declarations so they use the wrap call
pub struct Fixer {
    patterns: StylePatterns,
    strategy: BraceStrategy,
    dry_run: bool,
}

impl Fixer {
    pub fn new(patterns: StylePatterns, strategy: BraceStrategy) -> Self {
        Self {
            patterns,
            strategy,
            dry_run: false,
        }
    }

    /// Report what would change without writing any file
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Transform a source text; the caller decides whether to persist it
    pub fn fix_content(&self, content: &str) -> ContentFix {
        if self.patterns.uses_wrap_call(content) {
            return ContentFix {
                content: content.to_string(),
                status: FixStatus::AlreadyWrapped,
            };
        }

        // Wrap first so reported lines refer to the text as it was read
        let wrapped = wrap_declarations(content, &self.patterns, self.strategy);

        if !wrapped.declarations_found() {
            return ContentFix {
                content: content.to_string(),
                status: FixStatus::NoDeclarations,
            };
        }
        if wrapped.wrapped.is_empty() {
            return ContentFix {
                content: content.to_string(),
                status: FixStatus::Unclosed(wrapped.unclosed),
            };
        }

        let (content, import) = if content.contains(&self.patterns.convention().symbol) {
            (wrapped.content, ImportOutcome::AlreadyReferenced)
        } else {
            add_import(&wrapped.content, &self.patterns)
        };

        ContentFix {
            content,
            status: FixStatus::Modified {
                style_vars: wrapped.wrapped,
                import,
                unclosed: wrapped.unclosed,
            },
        }
    }

    /// Fix one file in place
    pub fn fix_file(&self, path: &Path) -> Result<FileFix, AuditError> {
        if !path.exists() {
            return Err(AuditError::FileNotFound(path.to_path_buf()));
        }

        debug!("Fixing {}", path.display());
        let original = read_source(path)?;
        let fixed = self.fix_content(&original);

        let unclosed = match &fixed.status {
            FixStatus::Modified { unclosed, .. } | FixStatus::Unclosed(unclosed) => unclosed.as_slice(),
            _ => &[],
        };
        for decl in unclosed {
            warn!(
                "Could not find closing brace for {} in {} (line {})",
                decl.name,
                path.display(),
                decl.line
            );
        }

        if let FixStatus::Modified { import, .. } = &fixed.status {
            if *import == ImportOutcome::NoInsertionPoint {
                warn!(
                    "No import of '{}' could be added to {}",
                    self.patterns.convention().symbol,
                    path.display()
                );
            }
            if self.dry_run {
                info!("Dry run, not writing {}", path.display());
            } else {
                write_source(path, &fixed.content)?;
                info!("Rewrote {}", path.display());
            }
        }

        Ok(FileFix {
            path: path.to_path_buf(),
            status: fixed.status,
        })
    }

    /// Fix every path in order; failures are recorded and do not stop the run
    pub fn fix_files<P: AsRef<Path>>(&self, paths: &[P]) -> FixSummary {
        self.fix_files_with(paths, |_| {})
    }

    /// Like `fix_files`, calling `on_result` as soon as each file is done
    pub fn fix_files_with<P, F>(&self, paths: &[P], mut on_result: F) -> FixSummary
    where
        P: AsRef<Path>,
        F: FnMut(&FileFix),
    {
        let mut summary = FixSummary::default();

        for path in paths {
            let path = path.as_ref();
            let result = match self.fix_file(path) {
                Ok(result) => result,
                Err(AuditError::FileNotFound(_)) => {
                    warn!("File not found: {}", path.display());
                    FileFix {
                        path: path.to_path_buf(),
                        status: FixStatus::Missing,
                    }
                }
                Err(e) => {
                    warn!("Error processing {}: {}", path.display(), e);
                    FileFix {
                        path: path.to_path_buf(),
                        status: FixStatus::Failed(e.to_string()),
                    }
                }
            };

            if result.is_modified() {
                summary.modified_count += 1;
            }
            on_result(&result);
            summary.results.push(result);
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixer() -> Fixer {
        Fixer::new(StylePatterns::default(), BraceStrategy::Lexical)
    }

    #[test]
    fn test_fix_content_scenario() {
        let fixed = fixer().fix_content("import React from 'react';\nconst styles = {\n  foo: 1,\n};");
        assert_eq!(
            fixed.content,
            "import React from 'react';\nimport { StyleSheet } from 'react-native';\nconst styles = StyleSheet.create({\n  foo: 1,\n});"
        );
        assert_eq!(
            fixed.status,
            FixStatus::Modified {
                style_vars: vec!["styles".to_string()],
                import: ImportOutcome::InsertedAfterFramework,
                unclosed: Vec::new(),
            }
        );
    }

    #[test]
    fn test_fix_content_already_wrapped() {
        let content = "const styles = StyleSheet.create({\n  foo: 1,\n});\n";
        let fixed = fixer().fix_content(content);
        assert_eq!(fixed.status, FixStatus::AlreadyWrapped);
        assert_eq!(fixed.content, content);
    }

    #[test]
    fn test_fix_content_without_declarations_discards_import() {
        let content = "import React from 'react';\nconst theme = {};\n";
        let fixed = fixer().fix_content(content);
        assert_eq!(fixed.status, FixStatus::NoDeclarations);
        assert_eq!(fixed.content, content);
    }

    #[test]
    fn test_fix_content_unclosed_is_reported() {
        let content = "import React from 'react';\nconst styles = {\n  a: {\n";
        let fixed = fixer().fix_content(content);
        assert!(matches!(fixed.status, FixStatus::Unclosed(ref u) if u[0].name == "styles"));
        assert_eq!(fixed.content, content);
    }

    #[test]
    fn test_unclosed_line_ignores_inserted_import() {
        let content = "import React from 'react';\nconst styles = {\n  a: 1,\n}; // a\nconst rowStyles = {\n  b: 2,\n};\n";
        let fixed = Fixer::new(StylePatterns::default(), BraceStrategy::Line).fix_content(content);
        assert_eq!(
            fixed.content,
            "import React from 'react';\nimport { StyleSheet } from 'react-native';\nconst styles = StyleSheet.create({\n  a: 1,\n}; // a\nconst rowStyles = StyleSheet.create({\n  b: 2,\n});\n"
        );
        assert_eq!(
            fixed.status,
            FixStatus::Modified {
                style_vars: vec!["rowStyles".to_string()],
                import: ImportOutcome::InsertedAfterFramework,
                unclosed: vec![UnclosedDeclaration { name: "styles".into(), line: 2 }],
            }
        );
    }

    #[test]
    fn test_fix_content_keeps_existing_symbol_import() {
        let content = "import { StyleSheet, View } from 'react-native';\nconst styles = {\n  a: 1,\n};\n";
        let fixed = fixer().fix_content(content);
        assert_eq!(
            fixed.content,
            "import { StyleSheet, View } from 'react-native';\nconst styles = StyleSheet.create({\n  a: 1,\n});\n"
        );
        assert!(matches!(
            fixed.status,
            FixStatus::Modified { import: ImportOutcome::AlreadyReferenced, .. }
        ));
    }

    #[test]
    fn test_fix_content_without_import_anchor() {
        let fixed = fixer().fix_content("const styles = {\n  foo: 1,\n};\n");
        assert_eq!(fixed.content, "const styles = StyleSheet.create({\n  foo: 1,\n});\n");
        assert!(matches!(
            fixed.status,
            FixStatus::Modified { import: ImportOutcome::NoInsertionPoint, .. }
        ));
    }
}
