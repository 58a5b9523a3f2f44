/// Minimal JavaScript tokenizer for locating object-literal boundaries
///
/// Only the constructs that can hide a brace are understood: string
/// literals, template literals with `${...}` substitutions, line and block
/// comments, and regular-expression literals. Everything else is treated as
/// opaque bytes. Braces are ASCII, so byte offsets returned here are always
/// valid `str` boundaries.

/// Byte offset of the `}` matching the `{` at `open`
///
/// Returns `None` when `open` is not a `{` or the literal is never closed.
pub fn find_matching_brace(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }
    closing_brace(bytes, open + 1)
}

/// Scan from just after an opening `{` to its matching `}`
fn closing_brace(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut prev = Some(b'{');
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
                i += 1;
            }
            b'\'' | b'"' => i = skip_string(bytes, i, b),
            b'`' => i = skip_template(bytes, i)?,
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_line_comment(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i)?;
                continue;
            }
            b'/' if regex_allowed(prev) => i = skip_regex(bytes, i),
            _ => i += 1,
        }
        if !b.is_ascii_whitespace() {
            prev = Some(b);
        }
    }

    None
}

/// A `/` starts a regex literal only where an operand is expected
fn regex_allowed(prev: Option<u8>) -> bool {
    match prev {
        None => true,
        Some(c) => b"(,=:[!&|?{;+-*%<>~^".contains(&c),
    }
}

/// Offset just past a quoted string; an unterminated string ends at the newline
fn skip_string(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Offset just past a template literal, descending into substitutions
fn skip_template(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return Some(i + 1),
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                i = closing_brace(bytes, i + 2)? + 1;
            }
            _ => i += 1,
        }
    }
    None
}

fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| start + p)
}

fn skip_block_comment(bytes: &[u8], start: usize) -> Option<usize> {
    bytes[start + 2..]
        .windows(2)
        .position(|w| w == b"*/")
        .map(|p| start + 2 + p + 2)
}

/// Offset just past a regex literal and its flags
///
/// A `/` with no closing slash on the same line is taken as division.
fn skip_regex(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    let mut in_class = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return start + 1,
            b'[' => {
                in_class = true;
                i += 1;
            }
            b']' => {
                in_class = false;
                i += 1;
            }
            b'/' if !in_class => {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                    i += 1;
                }
                return i;
            }
            _ => i += 1,
        }
    }
    start + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_of(source: &str) -> Option<&str> {
        let open = source.find('{')?;
        find_matching_brace(source, open).map(|close| &source[close..])
    }

    #[test]
    fn test_nested_objects() {
        let source = "{ a: { b: { c: 1 } }, d: 2 }; tail";
        assert_eq!(close_of(source), Some("}; tail"));
    }

    #[test]
    fn test_braces_in_strings_and_comments() {
        let source = "{\n  a: '}',\n  b: \"{{\",\n  // }\n  /* } */\n  c: 1,\n} // end";
        assert_eq!(close_of(source), Some("} // end"));
    }

    #[test]
    fn test_template_substitution() {
        let source = "{ label: `${ {a: 1}.a } }`, x: 1 }!";
        assert_eq!(close_of(source), Some("}!"));
    }

    #[test]
    fn test_regex_literal_and_division() {
        let source = "{ re: /[}]+/g, half: width / 2 }!";
        assert_eq!(close_of(source), Some("}!"));
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(close_of("{ a: { b: 1 }"), None);
        assert_eq!(find_matching_brace("abc", 0), None);
    }
}
