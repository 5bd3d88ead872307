//! Error types for TOML parsing, tree access and serialization.
//!
//! ## Error Categories
//!
//! - **Structural Errors**: unterminated strings, arrays, tables and headers, missing
//!   `=` or newline, malformed keys
//! - **Value Errors**: invalid escapes, numbers, dates and value starts
//! - **Semantic Errors**: redefinition of keys and tables, writes into inline tables
//! - **Key-Formatting Errors**: keys that cannot be quoted for output
//! - **Tree Errors**: missing keys and type mismatches from the [`Table`](crate::Table) getters
//!
//! Every parse error carries the 1-based line on which the offending token began,
//! available uniformly through [`Error::line`]. The parser never recovers: the first
//! error aborts the whole document.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{parse, Error};
//!
//! let err = parse("a = 1\na = 2").unwrap_err();
//! assert!(matches!(err, Error::KeyRedefinition { .. }));
//! assert_eq!(err.line(), Some(2));
//! ```

use thiserror::Error;

/// Represents every failure the parser, the tree API and the serializer can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A string reached a newline or the end of input before its closing quote.
    #[error("Unterminated string starting on line {line}")]
    UnterminatedString { line: usize },

    /// An array reached the end of input before its closing `]`.
    #[error("Unterminated array starting on line {line}")]
    UnterminatedArray { line: usize },

    /// An inline table reached the end of input before its closing `}`.
    #[error("Unterminated inline table starting on line {line}")]
    UnterminatedInlineTable { line: usize },

    /// A `[table]` header is missing its closing `]`.
    #[error("Unterminated table name on line {line}")]
    UnterminatedTableName { line: usize },

    /// A `[[table-array]]` header is missing its closing `]]`.
    #[error("Unterminated table-array name on line {line}")]
    UnterminatedTableArray { line: usize },

    /// A statement was followed by something other than a comment or newline.
    #[error("Expected a newline after the statement on line {line}, found '{found}'")]
    MissingNewline { line: usize, found: char },

    /// A key was not followed by `=`.
    #[error("Expected '=' after key on line {line}, found '{found}'")]
    MissingEquals { line: usize, found: char },

    /// A key position held no key at all.
    #[error("Expected a key name on line {line}")]
    NoKeyName { line: usize },

    /// An unquoted key contained whitespace between two bare words.
    #[error("Unquoted key on line {line} contains whitespace")]
    WhitespaceInKey { line: usize },

    /// A key was written with triple quotes.
    #[error("Keys cannot be triple-quoted (line {line})")]
    TripleQuotedKey { line: usize },

    /// A dotted key had a leading, trailing or doubled dot.
    #[error("Invalid dotted key on line {line}: empty key segment")]
    InvalidDottedKey { line: usize },

    /// The input ended in the middle of a token.
    #[error("Unexpected end of input on line {line}, expected {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },

    /// A character that does not fit the surrounding construct.
    #[error("Unexpected character '{found}' on line {line}, expected {expected}")]
    UnexpectedCharacter {
        line: usize,
        expected: &'static str,
        found: char,
    },

    /// Inline tables must be written on a single line.
    #[error("Found a newline inside an inline table on line {line}")]
    NewlineInInlineTable { line: usize },

    /// Arrays and inline tables nested deeper than the parser accepts.
    #[error("Arrays and inline tables on line {line} are nested too deeply")]
    NestingTooDeep { line: usize },

    /// An escape sequence that TOML does not define.
    #[error("Invalid escape sequence '\\{escape}' on line {line}")]
    InvalidEscape { line: usize, escape: String },

    /// An integer or float literal that breaks TOML's numeric rules.
    #[error("Invalid number '{literal}' on line {line}")]
    InvalidNumber { line: usize, literal: String },

    /// A date or time literal with out-of-range or malformed components.
    #[error("Invalid date/time '{literal}' on line {line}")]
    InvalidDateTime { line: usize, literal: String },

    /// A literal with both a date and a time but no separator between them.
    #[error("Date/time '{literal}' on line {line} is missing the separator between date and time")]
    MissingDateTimeSeparator { line: usize, literal: String },

    /// A date/time separator without both a date and a time around it.
    #[error("Date/time '{literal}' on line {line} has a separator without both a date and a time")]
    UnnecessaryDateTimeSeparator { line: usize, literal: String },

    /// A UTC offset attached to a bare date or a bare time.
    #[error("Date/time '{literal}' on line {line} has an offset but is not a full date-time")]
    OffsetOnBareDateTime { line: usize, literal: String },

    /// A character that cannot begin any TOML value.
    #[error("Invalid start of value '{found}' on line {line}")]
    InvalidValueStart { line: usize, found: char },

    /// Something that began like `true`/`false` but was not.
    #[error("Invalid boolean '{literal}' on line {line}")]
    InvalidBoolean { line: usize, literal: String },

    /// A control character that must be escaped appeared raw inside a string.
    #[error("Unescaped control character U+{:04X} in string on line {line}", code_point(.ch))]
    UnescapedControlCharacter { line: usize, ch: char },

    /// A key was assigned twice in the same table.
    #[error("Key '{key}' on line {line} is already defined")]
    KeyRedefinition { line: usize, key: String },

    /// A `[table]` header named a table that was already defined.
    #[error("Table '{key}' on line {line} is already defined")]
    TableRedefinition { line: usize, key: String },

    /// A `[table]` header named an existing array of tables.
    #[error("'{key}' on line {line} is an array of tables and cannot be redefined as a table")]
    TableArrayRedefinedAsTable { line: usize, key: String },

    /// A `[[table-array]]` header named something that is not an array of tables.
    #[error("'{key}' on line {line} is already defined and is not an array of tables")]
    NotATableArray { line: usize, key: String },

    /// A statement tried to add keys to an inline table.
    #[error("Cannot modify inline table '{key}' on line {line}")]
    WriteToLockedTable { line: usize, key: String },

    /// A dotted key or header walked through a value that is not a table.
    #[error("Cannot treat '{key}' on line {line} as a table: it is already a value")]
    DottedKeyOverValue { line: usize, key: String },

    /// A `[[table-array]]` path walked through something that is not a table.
    #[error("Table-array path through '{key}' on line {line} does not lead to a table")]
    MissingIntermediateTable { line: usize, key: String },

    /// A failure inside an inline table, wrapping the underlying cause.
    #[error("Invalid inline table on line {line}: {source}")]
    InvalidInlineTable {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    /// A key containing both quote characters cannot be written as a TOML key.
    #[error("Key '{key}' contains both single and double quotes and cannot be serialized")]
    InvalidKey { key: String },

    /// A lookup for a key that is not present.
    #[error("Key '{key}' does not exist")]
    MissingKey { key: String },

    /// A typed getter found a different kind of value.
    #[error("Type mismatch for key '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// An integer that does not fit the requested width.
    #[error("Integer {value} for key '{key}' does not fit in the requested type")]
    IntegerOutOfRange { key: String, value: i64 },

    /// A mutation of a table that was defined inline and is locked.
    #[error("Table is locked; cannot set key '{key}'")]
    TableLocked { key: String },

    /// Inline comments must stay on one line.
    #[error("Inline comments cannot contain newlines")]
    InvalidInlineComment,

    /// The cursor was asked to move before the start of the input.
    #[error("Internal error: cannot backtrack {requested} characters from position {position}")]
    BacktrackOutOfRange { requested: usize, position: usize },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Input bytes that are not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(String),
}

impl Error {
    /// Returns the 1-based line the error was detected on, for errors produced while
    /// parsing. Tree, key-formatting and IO errors carry no position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::parse;
    ///
    /// let err = parse("[a]\n[a]").unwrap_err();
    /// assert_eq!(err.line(), Some(2));
    /// ```
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnterminatedString { line }
            | Error::UnterminatedArray { line }
            | Error::UnterminatedInlineTable { line }
            | Error::UnterminatedTableName { line }
            | Error::UnterminatedTableArray { line }
            | Error::MissingNewline { line, .. }
            | Error::MissingEquals { line, .. }
            | Error::NoKeyName { line }
            | Error::WhitespaceInKey { line }
            | Error::TripleQuotedKey { line }
            | Error::InvalidDottedKey { line }
            | Error::UnexpectedEof { line, .. }
            | Error::UnexpectedCharacter { line, .. }
            | Error::NewlineInInlineTable { line }
            | Error::NestingTooDeep { line }
            | Error::InvalidEscape { line, .. }
            | Error::InvalidNumber { line, .. }
            | Error::InvalidDateTime { line, .. }
            | Error::MissingDateTimeSeparator { line, .. }
            | Error::UnnecessaryDateTimeSeparator { line, .. }
            | Error::OffsetOnBareDateTime { line, .. }
            | Error::InvalidValueStart { line, .. }
            | Error::InvalidBoolean { line, .. }
            | Error::UnescapedControlCharacter { line, .. }
            | Error::KeyRedefinition { line, .. }
            | Error::TableRedefinition { line, .. }
            | Error::TableArrayRedefinedAsTable { line, .. }
            | Error::NotATableArray { line, .. }
            | Error::WriteToLockedTable { line, .. }
            | Error::DottedKeyOverValue { line, .. }
            | Error::MissingIntermediateTable { line, .. }
            | Error::InvalidInlineTable { line, .. } => Some(*line),
            Error::InvalidKey { .. }
            | Error::MissingKey { .. }
            | Error::TypeMismatch { .. }
            | Error::IntegerOutOfRange { .. }
            | Error::TableLocked { .. }
            | Error::InvalidInlineComment
            | Error::BacktrackOutOfRange { .. }
            | Error::Io(_)
            | Error::InvalidUtf8(_) => None,
        }
    }

    /// Follows [`Error::InvalidInlineTable`] wrappers down to the failure that caused them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{parse, Error};
    ///
    /// let err = parse("t = { a = 1, a = 2 }").unwrap_err();
    /// assert!(matches!(err, Error::InvalidInlineTable { .. }));
    /// assert!(matches!(err.root_cause(), Error::KeyRedefinition { .. }));
    /// ```
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Error::InvalidInlineTable { source, .. } = current {
            current = source;
        }
        current
    }

    /// Wraps a failure that happened inside an inline table. Newline, unterminated-table
    /// and nesting-depth errors pass through untouched so they stay recognisable
    /// wherever they occur.
    pub(crate) fn in_inline_table(self, line: usize) -> Self {
        match self {
            Error::NewlineInInlineTable { .. }
            | Error::UnterminatedInlineTable { .. }
            | Error::NestingTooDeep { .. } => self,
            other => Error::InvalidInlineTable {
                line,
                source: Box::new(other),
            },
        }
    }

    /// Creates a type mismatch error for a typed getter.
    pub(crate) fn type_mismatch(key: &str, expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch {
            key: key.to_string(),
            expected,
            found,
        }
    }

    /// Creates a missing-key error.
    pub(crate) fn missing_key(key: &str) -> Self {
        Error::MissingKey {
            key: key.to_string(),
        }
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

fn code_point(ch: &char) -> u32 {
    u32::from(*ch)
}

pub type Result<T> = std::result::Result<T, Error>;
