/// Import normalization for the wrapping symbol
///
/// Makes sure the symbol the wrap call hangs off (`StyleSheet`) is imported
/// from its module, either by extending an existing import from that module
/// or by inserting a new import line after the framework import.

use log::debug;

use crate::core::patterns::{StylePatterns, IMPORT_STATEMENT};

/// What the import step did to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The symbol already appears in the file; nothing changed
    AlreadyReferenced,
    /// An existing import from the module now includes the symbol
    ExtendedExisting,
    /// A new import line was inserted after the framework import
    InsertedAfterFramework,
    /// Neither import form exists; the symbol is still missing
    NoInsertionPoint,
}

impl ImportOutcome {
    pub fn changed(self) -> bool {
        matches!(self, ImportOutcome::ExtendedExisting | ImportOutcome::InsertedAfterFramework)
    }
}

/// Ensure the convention's symbol is imported, returning the new content
pub fn normalize_imports(content: &str, patterns: &StylePatterns) -> (String, ImportOutcome) {
    if content.contains(&patterns.convention().symbol) {
        return (content.to_string(), ImportOutcome::AlreadyReferenced);
    }
    add_import(content, patterns)
}

/// Import the symbol without first checking whether the content mentions it
///
/// For content that already carries the wrap call, so the symbol is present
/// in the code but not yet imported.
pub fn add_import(content: &str, patterns: &StylePatterns) -> (String, ImportOutcome) {
    let convention = patterns.convention();

    for caps in IMPORT_STATEMENT.captures_iter(content) {
        if &caps["module"] != convention.module {
            continue;
        }
        let clause = &caps["clause"];
        if let Some(extended) = extend_clause(clause, &convention.symbol) {
            let Some(clause_match) = caps.name("clause") else {
                continue;
            };
            debug!("Extending import from '{}'", convention.module);
            let mut updated = String::with_capacity(content.len() + convention.symbol.len() + 2);
            updated.push_str(&content[..clause_match.start()]);
            updated.push_str(&extended);
            updated.push_str(&content[clause_match.end()..]);
            return (updated, ImportOutcome::ExtendedExisting);
        }
    }

    if let Some(framework) = patterns.framework_import().find(content) {
        let line = new_import_line(&convention.symbol, &convention.module, quote_style(content));
        let mut updated = String::with_capacity(content.len() + line.len() + 1);
        updated.push_str(&content[..framework.end()]);
        updated.push('\n');
        updated.push_str(&line);
        updated.push_str(&content[framework.end()..]);
        return (updated, ImportOutcome::InsertedAfterFramework);
    }

    (content.to_string(), ImportOutcome::NoInsertionPoint)
}

fn new_import_line(symbol: &str, module: &str, quote: char) -> String {
    format!("import {{ {} }} from {}{}{};", symbol, quote, module, quote)
}

/// Quote character used by the file's first import, single quote otherwise
fn quote_style(content: &str) -> char {
    IMPORT_STATEMENT
        .captures(content)
        .and_then(|caps| caps["quote"].chars().next())
        .unwrap_or('\'')
}

/// Add `symbol` to an import clause
///
/// Handles `{ A, B }`, `Default, { A }` and `Default`. Namespace imports
/// (`* as RN`) cannot carry a named import and yield `None`, as do Flow and
/// TypeScript type-only imports, which would not bind the runtime value.
fn extend_clause(clause: &str, symbol: &str) -> Option<String> {
    if clause.trim_start().starts_with('*') || is_type_only(clause) {
        return None;
    }

    match (clause.find('{'), clause.rfind('}')) {
        (Some(open), Some(close)) if open < close => {
            let inner = &clause[open + 1..close];
            let extended = if inner.contains('\n') {
                extend_multiline(inner, symbol)
            } else {
                extend_inline(inner, symbol)
            };
            Some(format!("{}{{{}}}{}", &clause[..open], extended, &clause[close + 1..]))
        }
        (None, None) => {
            let default = clause.trim();
            if default.is_empty() || default.contains(char::is_whitespace) {
                return None;
            }
            Some(format!("{}, {{ {} }}", default, symbol))
        }
        _ => None,
    }
}

/// `type { A }`, `typeof B`; a default import named `type` does not count
fn is_type_only(clause: &str) -> bool {
    let clause = clause.trim_start();
    ["typeof", "type"].iter().any(|keyword| {
        clause.strip_prefix(keyword).map_or(false, |rest| {
            rest.starts_with(|c: char| c.is_whitespace() || c == '{') && !rest.trim().is_empty()
        })
    })
}

fn extend_inline(inner: &str, symbol: &str) -> String {
    let mut names: Vec<&str> = inner
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    names.push(symbol);
    format!(" {} ", names.join(", "))
}

/// Append to a brace list written one name per line, in its indentation
fn extend_multiline(inner: &str, symbol: &str) -> String {
    let indent: String = inner
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).collect())
        .unwrap_or_else(|| "  ".to_string());

    let body = inner.trim_end();
    let tail = &inner[body.len()..];
    if body.trim().is_empty() {
        return format!("\n{}{},{}", indent, symbol, tail);
    }
    if body.ends_with(',') {
        format!("{}\n{}{},{}", body, indent, symbol, tail)
    } else {
        format!("{},\n{}{}{}", body, indent, symbol, tail)
    }
}
