//! Single-character predicates used by the cursor and the parsers.
//!
//! TOML is picky about which characters count as whitespace: only space and tab.
//! Newlines are their own class and never satisfy [`is_whitespace`].

#[inline]
pub(crate) const fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[inline]
pub(crate) const fn is_newline(c: char) -> bool {
    c == '\n' || c == '\r'
}

#[inline]
pub(crate) const fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub(crate) const fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

#[inline]
pub(crate) const fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

#[inline]
pub(crate) const fn is_hash(c: char) -> bool {
    c == '#'
}

/// Characters allowed in an unquoted key segment: `A-Za-z0-9_-`.
#[inline]
pub(crate) const fn is_bare_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Characters that may appear inside a number or date/time literal.
#[inline]
pub(crate) const fn is_numeric_literal_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '.' | ':')
}

/// Characters that end an unquoted literal (numbers, dates, booleans).
#[inline]
pub(crate) const fn ends_literal(c: char) -> bool {
    is_whitespace(c) || is_newline(c) || matches!(c, '#' | ',' | ']' | '}' | '=')
}

/// Control characters that TOML requires to be escaped inside strings. Tab is the
/// single exception.
#[inline]
pub(crate) const fn is_forbidden_control(c: char) -> bool {
    (c <= '\u{1f}' && c != '\t') || c == '\u{7f}'
}
