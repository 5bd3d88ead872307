//! # toml_tree
//!
//! A TOML parser and serializer built around an owned, commentable value tree.
//!
//! ## What does it keep?
//!
//! Parsing produces a [`Document`]: an insertion-ordered tree of [`Value`]s in which
//! every value carries the comment written above it, the comment written after it on
//! the same line, and the number of blank lines before it. Serializing the tree
//! writes those back, so a configuration file can be read, edited and saved without
//! losing its annotations.
//!
//! ## Key Features
//!
//! - **Full TOML syntax**: basic, literal and multi-line strings, every integer and
//!   float notation, the four date/time kinds, arrays, inline tables, dotted keys and
//!   arrays of tables
//! - **Comment preservation**: preceding, inline and trailing comments survive a
//!   parse/serialize round trip
//! - **Strict validation**: redefinitions, writes into inline tables and malformed
//!   literals are rejected with the line they occurred on
//! - **Layout heuristics**: small tables render inline, larger ones as sections,
//!   configurable through [`TomlOptions`]
//! - **Serde interop**: the tree implements `Serialize`/`Deserialize`, so it converts
//!   to and from formats such as JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use toml_tree::{parse, to_string};
//!
//! let input = r#"
//! # Fruit inventory
//! name = "Orange" # the colour, too
//!
//! [physical]
//! color = "orange"
//! shape = "round"
//! "#;
//!
//! let mut doc = parse(input).unwrap();
//! assert_eq!(doc.get_string("physical.color").unwrap(), "orange");
//!
//! let name = doc.get_value("name").unwrap();
//! assert_eq!(name.preceding_comment(), Some("Fruit inventory"));
//! assert_eq!(name.inline_comment(), Some("the colour, too"));
//!
//! doc.put("count", 12).unwrap();
//! let output = to_string(&doc).unwrap();
//! assert!(output.starts_with("# Fruit inventory\nname = \"Orange\" # the colour, too\n"));
//! ```
//!
//! ### Building Values with the toml! Macro
//!
//! ```rust
//! use toml_tree::{toml, Document};
//!
//! let server = toml!({
//!     "host": "localhost",
//!     "ports": [8080, 8081]
//! });
//!
//! let mut doc = Document::new();
//! doc.put_value("server", server).unwrap();
//! assert_eq!(
//!     toml_tree::to_string(&doc).unwrap(),
//!     "server = { host = \"localhost\", ports = [ 8080, 8081 ] }\n"
//! );
//! ```
//!
//! ## Error Handling
//!
//! Every failure is an [`Error`]. Parse errors carry the 1-based line they began on
//! ([`Error::line`]); the first error aborts the parse.
//!
//! ```rust
//! use toml_tree::{parse, Error};
//!
//! let err = parse("t = { a = 1\n }").unwrap_err();
//! assert_eq!(err, Error::NewlineInInlineTable { line: 1 });
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: one `debug!` line
//! per parsed or serialized document and `trace!` lines for structural decisions.
//! Install any `log` backend to see them.

pub mod array;
pub mod de;
pub mod document;
pub mod error;
pub mod macros;
pub mod options;
pub mod ser;
pub mod table;
pub mod value;

mod chars;
mod cursor;
mod key;
mod number;
mod string;

pub use array::Array;
pub use de::Parser;
pub use document::Document;
pub use error::{Error, Result};
pub use options::TomlOptions;
pub use ser::Serializer;
pub use table::{Table, DEFAULT_INLINE_TABLE_THRESHOLD};
pub use value::{CommentData, Value, ValueKind};

use std::io;

/// Parses TOML text into a [`Document`].
///
/// # Examples
///
/// ```rust
/// use toml_tree::parse;
///
/// let doc = parse("name = \"Orange\"\n[physical]\ncolor = \"orange\"\nshape = \"round\"\n").unwrap();
/// assert_eq!(doc.len(), 2);
/// assert_eq!(doc.get_sub_table("physical").unwrap().len(), 2);
/// ```
///
/// # Errors
///
/// Returns the first syntax, value or redefinition error found. Nothing is returned
/// for a partially valid document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<Document> {
    Parser::new(input).parse_document()
}

/// Same as [`parse`].
///
/// # Errors
///
/// See [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(input: &str) -> Result<Document> {
    parse(input)
}

/// Parses TOML from bytes, which must be valid UTF-8.
///
/// # Examples
///
/// ```rust
/// use toml_tree::from_slice;
///
/// let doc = from_slice(b"answer = 42").unwrap();
/// assert_eq!(doc.get_long("answer").unwrap(), 42);
/// assert!(from_slice(&[0xff, 0xfe]).is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] for undecodable input, otherwise as [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(bytes: &[u8]) -> Result<Document> {
    let input = std::str::from_utf8(bytes).map_err(|e| Error::InvalidUtf8(e.to_string()))?;
    parse(input)
}

/// Reads a reader to the end and parses its contents.
///
/// # Examples
///
/// ```rust
/// use toml_tree::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new("enabled = true")).unwrap();
/// assert!(doc.get_boolean("enabled").unwrap());
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise as [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|e| Error::io(&e.to_string()))?;
    parse(&input)
}

/// Serializes a document with default [`TomlOptions`].
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] if a key contains both quote characters.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(document: &Document) -> Result<String> {
    ser::to_string(document)
}

/// Serializes a document with custom options.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{parse, to_string_with_options, TomlOptions};
///
/// let doc = parse("a = 1\n\n\nb = 2\n").unwrap();
/// let compact = to_string_with_options(&doc, &TomlOptions::compact()).unwrap();
/// assert_eq!(compact, "a = 1\nb = 2\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] if a key contains both quote characters.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(document: &Document, options: &TomlOptions) -> Result<String> {
    ser::to_string_with_options(document, options)
}

/// Serializes a document into a writer.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{parse, to_writer};
///
/// let doc = parse("x = 1").unwrap();
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &doc).unwrap();
/// assert_eq!(buffer, b"x = 1\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, document: &Document) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, document, &TomlOptions::default())
}

/// Serializes a document into a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, document: &Document, options: &TomlOptions) -> Result<()>
where
    W: io::Write,
{
    let toml = to_string_with_options(document, options)?;
    writer
        .write_all(toml.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
