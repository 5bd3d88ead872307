//! Parsing and quoting of TOML strings.
//!
//! Four kinds are recognised from the opening quotes:
//!
//! | Opening | Kind                | Escapes | Newlines |
//! |---------|---------------------|---------|----------|
//! | `"`     | basic               | yes     | no       |
//! | `'`     | literal             | no      | no       |
//! | `"""`   | multi-line basic    | yes     | yes      |
//! | `'''`   | multi-line literal  | no      | yes      |
//!
//! [`quote`] goes the other way and picks the representation used on output.

use crate::chars;
use crate::cursor::Cursor;
use crate::{Error, Result};
use log::trace;

/// Parses a string of any kind. The cursor must be on the opening quote; `line` is
/// advanced past every newline consumed inside a multi-line string.
pub(crate) fn parse_string(cursor: &mut Cursor, line: &mut usize) -> Result<String> {
    let mut opening = ['\0'; 3];
    let count = cursor.read_block(&mut opening);
    let quote = opening[0];

    if count == 3 && opening[1] == quote && opening[2] == quote {
        return parse_multi_line(cursor, quote, line);
    }
    if count >= 2 && opening[1] == quote {
        // `""` or `''`: an empty single-line string.
        cursor.backtrack(count - 2)?;
        return Ok(String::new());
    }
    cursor.backtrack(count - 1)?;
    parse_single_line(cursor, quote, *line)
}

/// Parses the body of a single-line basic or literal string whose opening quote has
/// already been consumed.
pub(crate) fn parse_single_line(cursor: &mut Cursor, quote: char, line: usize) -> Result<String> {
    let mut text = String::new();
    loop {
        match cursor.read() {
            None => return Err(Error::UnterminatedString { line }),
            Some(c) if chars::is_newline(c) => return Err(Error::UnterminatedString { line }),
            Some(c) if c == quote => return Ok(text),
            Some('\\') if quote == '"' => text.push(parse_escape(cursor, line)?),
            Some(c) if chars::is_forbidden_control(c) => {
                return Err(Error::UnescapedControlCharacter { line, ch: c })
            }
            Some(c) => text.push(c),
        }
    }
}

fn parse_multi_line(cursor: &mut Cursor, quote: char, line: &mut usize) -> Result<String> {
    let start_line = *line;
    let basic = quote == '"';

    // A newline straight after the opening delimiter is trimmed.
    if cursor.starts_with("\r\n") {
        cursor.read();
    }
    if cursor.expect_and_consume('\n') {
        *line += 1;
    }

    let mut text = String::new();
    loop {
        let Some(c) = cursor.read() else {
            return Err(Error::UnterminatedString { line: start_line });
        };
        match c {
            c if c == quote => {
                let run = 1 + cursor.skip_while(|next| next == quote);
                match run {
                    1 | 2 => text.extend(std::iter::repeat(quote).take(run)),
                    3..=5 => {
                        text.extend(std::iter::repeat(quote).take(run - 3));
                        return Ok(text);
                    }
                    _ => {
                        return Err(Error::UnexpectedCharacter {
                            line: *line,
                            expected: "at most five closing quotes",
                            found: quote,
                        })
                    }
                }
            }
            '\n' => {
                *line += 1;
                text.push('\n');
            }
            '\r' if cursor.expect_and_consume('\n') => {
                *line += 1;
                text.push('\n');
            }
            '\\' if basic => {
                if cursor
                    .peek()
                    .is_some_and(|next| chars::is_whitespace(next) || chars::is_newline(next))
                {
                    skip_line_continuation(cursor, line)?;
                } else {
                    text.push(parse_escape(cursor, *line)?);
                }
            }
            c if chars::is_forbidden_control(c) => {
                return Err(Error::UnescapedControlCharacter { line: *line, ch: c })
            }
            c => text.push(c),
        }
    }
}

/// A backslash at the end of a line swallows the newline and all whitespace and
/// newlines after it. Whitespace between the backslash and the newline is allowed.
fn skip_line_continuation(cursor: &mut Cursor, line: &mut usize) -> Result<()> {
    cursor.skip_whitespace();
    match cursor.peek() {
        Some(c) if chars::is_newline(c) => {}
        _ => {
            return Err(Error::InvalidEscape {
                line: *line,
                escape: " ".to_string(),
            })
        }
    }
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            Some('\n') => {
                cursor.read();
                *line += 1;
            }
            Some('\r') if cursor.starts_with("\r\n") => {
                cursor.read();
            }
            _ => return Ok(()),
        }
    }
}

fn parse_escape(cursor: &mut Cursor, line: usize) -> Result<char> {
    let Some(c) = cursor.read() else {
        return Err(Error::UnterminatedString { line });
    };
    match c {
        'b' => Ok('\u{8}'),
        't' => Ok('\t'),
        'n' => Ok('\n'),
        'f' => Ok('\u{c}'),
        'r' => Ok('\r'),
        '"' => Ok('"'),
        '\\' => Ok('\\'),
        'u' => parse_unicode_escape(cursor, 'u', 4, line),
        'U' => parse_unicode_escape(cursor, 'U', 8, line),
        other => Err(Error::InvalidEscape {
            line,
            escape: other.to_string(),
        }),
    }
}

fn parse_unicode_escape(cursor: &mut Cursor, kind: char, width: usize, line: usize) -> Result<char> {
    let mut digits = String::with_capacity(width);
    for _ in 0..width {
        match cursor.peek() {
            Some(c) if chars::is_hex_digit(c) => {
                digits.push(c);
                cursor.read();
            }
            _ => break,
        }
    }
    let invalid = || Error::InvalidEscape {
        line,
        escape: format!("{kind}{digits}"),
    };
    if digits.len() != width {
        return Err(invalid());
    }
    u32::from_str_radix(&digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(invalid)
}

/// Renders `value` as a TOML string literal, choosing in order:
///
/// 1. `'literal'` when the text has a backslash but no single quote and no control
///    characters, so paths stay readable;
/// 2. `'''multi-line literal'''` when it has double quotes and newlines but no single
///    quote and no other control characters;
/// 3. `"basic"` with escapes otherwise.
pub(crate) fn quote(value: &str) -> String {
    let has_single_quote = value.contains('\'');
    let has_control = value.chars().any(chars::is_forbidden_control);

    if value.contains('\\') && !has_single_quote && !has_control {
        trace!("quoting string as literal");
        return format!("'{value}'");
    }

    let only_newline_controls = value
        .chars()
        .all(|c| c == '\n' || !chars::is_forbidden_control(c));
    if value.contains('"') && value.contains('\n') && !has_single_quote && only_newline_controls {
        trace!("quoting string as multi-line literal");
        return format!("'''\n{value}'''");
    }

    escape_basic(value)
}

/// Double-quoted form with every character that needs it escaped.
pub(crate) fn escape_basic(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if chars::is_forbidden_control(c) => {
                out.push_str(&format!("\\u{:04X}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
