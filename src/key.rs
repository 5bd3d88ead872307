//! Keys: parsing bare, quoted and dotted keys, and quoting them for output.

use crate::chars;
use crate::cursor::Cursor;
use crate::string;
use crate::{Error, Result};

/// Parses one possibly dotted key into its unquoted segments.
///
/// Leading whitespace is skipped, as is whitespace around each `.`. Parsing stops
/// at the first character that cannot continue the key (usually `=` or `]`), which
/// is left for the caller.
pub(crate) fn parse_key(cursor: &mut Cursor, line: usize) -> Result<Vec<String>> {
    let mut segments = Vec::new();
    loop {
        cursor.skip_whitespace();
        let segment = match cursor.peek() {
            Some(quote) if chars::is_quote(quote) => {
                let triple: String = [quote; 3].iter().collect();
                if cursor.starts_with(&triple) {
                    return Err(Error::TripleQuotedKey { line });
                }
                cursor.read();
                string::parse_single_line(cursor, quote, line)?
            }
            Some(c) if chars::is_bare_key_char(c) => cursor.read_while(chars::is_bare_key_char),
            _ if segments.is_empty() && cursor.peek() != Some('.') => {
                return Err(Error::NoKeyName { line })
            }
            _ => return Err(Error::InvalidDottedKey { line }),
        };
        segments.push(segment);

        let gap = cursor.skip_whitespace();
        if cursor.expect_and_consume('.') {
            continue;
        }
        if gap > 0
            && cursor
                .peek()
                .is_some_and(|c| chars::is_bare_key_char(c) || chars::is_quote(c))
        {
            return Err(Error::WhitespaceInKey { line });
        }
        return Ok(segments);
    }
}

/// Splits `text` as a dotted key, returning `None` unless it is a well-formed key with
/// more than one segment and nothing after it.
pub(crate) fn split_dotted(text: &str) -> Option<Vec<String>> {
    let mut cursor = Cursor::new(text);
    let segments = parse_key(&mut cursor, 1).ok()?;
    (cursor.is_at_end() && segments.len() > 1).then_some(segments)
}

/// Renders a single key segment, bare when possible.
///
/// Keys holding both `'` and `"` have no valid TOML spelling here and fail with
/// [`Error::InvalidKey`].
pub(crate) fn format_key(key: &str) -> Result<String> {
    if !key.is_empty() && key.chars().all(chars::is_bare_key_char) {
        return Ok(key.to_string());
    }
    let has_double = key.contains('"');
    if has_double && key.contains('\'') {
        return Err(Error::InvalidKey {
            key: key.to_string(),
        });
    }
    if has_double && !key.chars().any(chars::is_forbidden_control) {
        return Ok(format!("'{key}'"));
    }
    Ok(string::escape_basic(key))
}

/// Renders a header path such as `fruit.'a "b"'.color`.
pub(crate) fn format_path(segments: &[String]) -> Result<String> {
    let formatted = segments
        .iter()
        .map(|segment| format_key(segment))
        .collect::<Result<Vec<_>>>()?;
    Ok(formatted.join("."))
}
