/// Wrapping of style object literals in the convention's wrap call
///
/// Two boundary strategies are available. `Line` is the line-based brace
/// counting heuristic: it only closes a declaration whose closing line is a
/// bare `};`. `Lexical` tokenizes the source to find the matching brace and
/// rewrites opener and closer together.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::lexer::find_matching_brace;
use crate::core::patterns::{find_style_declarations, StylePatterns};

/// How the closing brace of a style object is located
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BraceStrategy {
    /// Line-by-line brace counting; closes only bare `};` lines
    Line,
    /// Tokenizer-based brace matching
    #[default]
    Lexical,
}

/// A declaration whose closing brace could not be rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnclosedDeclaration {
    pub name: String,
    /// 1-based line of the declaration
    pub line: usize,
}

/// Result of wrapping every declaration in one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapResult {
    pub content: String,
    /// Declarations rewritten with both opener and closer, in source order
    pub wrapped: Vec<String>,
    /// Declarations whose close was not found, in source order
    pub unclosed: Vec<UnclosedDeclaration>,
}

impl WrapResult {
    pub fn declarations_found(&self) -> bool {
        !self.wrapped.is_empty() || !self.unclosed.is_empty()
    }
}

/// Wrap every style-like declaration in `content`
pub fn wrap_declarations(
    content: &str,
    patterns: &StylePatterns,
    strategy: BraceStrategy,
) -> WrapResult {
    match strategy {
        BraceStrategy::Line => wrap_by_lines(content, patterns),
        BraceStrategy::Lexical => wrap_lexically(content, patterns),
    }
}

fn opener(keyword: &str, name: &str, wrap_call: &str) -> String {
    format!("{} {} = {}({{", keyword, name, wrap_call)
}

fn wrap_lexically(content: &str, patterns: &StylePatterns) -> WrapResult {
    let wrap_call = &patterns.convention().wrap_call;
    let mut current = content.to_string();
    let mut wrapped = Vec::new();
    let mut unclosed = Vec::new();

    // Back to front so earlier offsets stay valid after each splice
    for decl in find_style_declarations(content).into_iter().rev() {
        match find_matching_brace(&current, decl.open_brace) {
            Some(close) => {
                let mut updated = String::with_capacity(current.len() + wrap_call.len() + 4);
                updated.push_str(&current[..decl.start]);
                updated.push_str(&opener(&decl.keyword, &decl.name, wrap_call));
                updated.push_str(&current[decl.open_brace + 1..close]);
                updated.push_str("})");
                updated.push_str(&current[close + 1..]);
                current = updated;
                debug!("Wrapped {} (line {})", decl.name, decl.line);
                wrapped.push(decl.name);
            }
            None => unclosed.push(UnclosedDeclaration {
                name: decl.name,
                line: decl.line,
            }),
        }
    }

    wrapped.reverse();
    unclosed.reverse();
    WrapResult {
        content: current,
        wrapped,
        unclosed,
    }
}

fn wrap_by_lines(content: &str, patterns: &StylePatterns) -> WrapResult {
    let wrap_call = &patterns.convention().wrap_call;
    let declarations = find_style_declarations(content);
    if declarations.is_empty() {
        return WrapResult {
            content: content.to_string(),
            wrapped: Vec::new(),
            unclosed: Vec::new(),
        };
    }

    // An opener swallows any line breaks between `=` and `{`, so each
    // declaration's line in the rewritten text is counted as it is built
    let mut opened = String::with_capacity(content.len() + declarations.len() * wrap_call.len());
    let mut opener_lines = Vec::with_capacity(declarations.len());
    let mut last = 0;
    for decl in &declarations {
        opened.push_str(&content[last..decl.start]);
        opener_lines.push(opened.matches('\n').count());
        opened.push_str(&opener(&decl.keyword, &decl.name, wrap_call));
        last = decl.open_brace + 1;
    }
    opened.push_str(&content[last..]);
    let mut lines: Vec<String> = opened.split('\n').map(str::to_string).collect();

    let mut wrapped = Vec::new();
    let mut unclosed = Vec::new();
    for (decl, start) in declarations.into_iter().zip(opener_lines) {
        if close_by_lines(&mut lines, start) {
            wrapped.push(decl.name);
        } else {
            unclosed.push(UnclosedDeclaration {
                name: decl.name,
                line: decl.line,
            });
        }
    }

    WrapResult {
        content: lines.join("\n"),
        wrapped,
        unclosed,
    }
}

/// Rewrite the bare `};` that closes the object opened on line `start`
///
/// The first line at depth zero that contains `}` is the candidate; any
/// other shape of closing line leaves the declaration open.
fn close_by_lines(lines: &mut [String], start: usize) -> bool {
    let mut depth: i64 = 0;
    for line in lines.iter_mut().skip(start) {
        depth += line.matches('{').count() as i64 - line.matches('}').count() as i64;
        if depth == 0 && line.contains('}') {
            if line.trim() == "};" {
                *line = line.replacen("};", "});", 1);
                return true;
            }
            return false;
        }
    }
    false
}
