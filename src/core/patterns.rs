/// Pattern definitions for style declarations and imports
///
/// The declaration pattern is shared by the scanner and the fixer so both
/// tools agree on what counts as a style-like object literal.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::StyleConvention;
use crate::error::AuditError;

/// Name fragment of a style-like binding: contains `style` or `styles`,
/// ASCII case-insensitive
pub const STYLE_NAME_PATTERN: &str = r"\w*(?i:styles?)\w*";

/// Pattern for a style-like binding whose value opens an object literal
pub fn declaration_pattern() -> String {
    format!(
        r"\b(?P<keyword>const|let|var)\s+(?P<name>{})\s*=\s*\{{",
        STYLE_NAME_PATTERN
    )
}

lazy_static! {
    /// Precompiled declaration pattern
    pub static ref STYLE_DECLARATION: Regex =
        Regex::new(&declaration_pattern()).expect("declaration pattern is valid");

    /// Any ES module import statement, possibly spanning several lines
    pub static ref IMPORT_STATEMENT: Regex = Regex::new(
        r#"(?m)^[ \t]*import\s+(?P<clause>[^;'"]+?)\s*from\s*(?P<quote>['"])(?P<module>[^'"\n]+)['"][ \t]*;?"#
    )
    .expect("import pattern is valid");
}

/// One style-like declaration found in a source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    /// `const`, `let` or `var`
    pub keyword: String,
    pub name: String,
    /// Byte offset of the keyword
    pub start: usize,
    /// Byte offset of the opening `{`
    pub open_brace: usize,
    /// 1-based line of the keyword
    pub line: usize,
}

/// Find every style-like declaration in source order
pub fn find_style_declarations(content: &str) -> Vec<StyleDeclaration> {
    STYLE_DECLARATION
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let keyword = caps.name("keyword")?;
            let name = caps.name("name")?;
            Some(StyleDeclaration {
                keyword: keyword.as_str().to_string(),
                name: name.as_str().to_string(),
                start: keyword.start(),
                open_brace: whole.end() - 1,
                line: line_number(content, keyword.start()),
            })
        })
        .collect()
}

/// Names of every style-like declaration in source order
pub fn style_variable_names(content: &str) -> Vec<String> {
    find_style_declarations(content)
        .into_iter()
        .map(|decl| decl.name)
        .collect()
}

/// 1-based line number of a byte offset
pub fn line_number(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

/// Convention-specific patterns, compiled once per run
#[derive(Debug, Clone)]
pub struct StylePatterns {
    convention: StyleConvention,
    /// The framework default import, e.g. `import React from 'react';`
    framework_import: Regex,
}

impl StylePatterns {
    pub fn new(convention: &StyleConvention) -> Result<Self, AuditError> {
        let framework_import = Regex::new(&format!(
            r"(?m)^[ \t]*import\s+{}\b[^;]*;",
            regex::escape(&convention.framework_import)
        ))?;

        Ok(Self {
            convention: convention.clone(),
            framework_import,
        })
    }

    pub fn convention(&self) -> &StyleConvention {
        &self.convention
    }

    /// Whether the wrap call appears anywhere in the content
    pub fn uses_wrap_call(&self, content: &str) -> bool {
        content.contains(&self.convention.wrap_call)
    }

    pub fn framework_import(&self) -> &Regex {
        &self.framework_import
    }
}

impl Default for StylePatterns {
    fn default() -> Self {
        Self::new(&StyleConvention::default()).expect("default convention compiles")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_names() {
        let source = "const styles = {\n};\nexport const headerStyle = { a: 1 };\nlet buttonStyles={};\nconst theme = {};\nconst STYLES = {};";
        assert_eq!(
            style_variable_names(source),
            vec!["styles", "headerStyle", "buttonStyles", "STYLES"]
        );
    }

    #[test]
    fn test_declaration_requires_object_literal() {
        assert!(style_variable_names("const styles = StyleSheet.create({});").is_empty());
        assert!(style_variable_names("const styles = makeStyles();").is_empty());
        assert!(style_variable_names("styles = {};").is_empty());
    }

    #[test]
    fn test_declaration_offsets() {
        let source = "// header\n  const styles = {\n};";
        let decls = find_style_declarations(source);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].line, 2);
        assert_eq!(decls[0].keyword, "const");
        assert_eq!(&source[decls[0].open_brace..decls[0].open_brace + 1], "{");
    }

    #[test]
    fn test_wrap_call_detection() {
        let patterns = StylePatterns::default();
        assert!(patterns.uses_wrap_call("const s = StyleSheet.create({});"));
        assert!(!patterns.uses_wrap_call("import { StyleSheet } from 'react-native';"));
    }

    #[test]
    fn test_framework_import_is_whole_word() {
        let patterns = StylePatterns::default();
        assert!(patterns.framework_import().is_match("import React from 'react';"));
        assert!(!patterns.framework_import().is_match("import ReactDOM from 'react-dom';"));
    }

    #[test]
    fn test_import_statement_spans_lines() {
        let source = "import {\n  View,\n  Text,\n} from 'react-native';\n";
        let caps = IMPORT_STATEMENT.captures(source).expect("import matched");
        assert_eq!(&caps["module"], "react-native");
        assert!(caps["clause"].contains("Text"));
    }
}
