//! TOML parsing.
//!
//! This module provides the [`Parser`] that reads TOML text into a [`Document`].
//!
//! ## Overview
//!
//! The parser is a single-pass recursive descent over a [`Cursor`]:
//!
//! - **Statements**: the top-level loop reads key-value pairs and `[table]` /
//!   `[[table-array]]` headers, one per line
//! - **Insertion target**: headers produce a path from the root to the table that
//!   following key-values land in; the path is resolved from the root for every
//!   statement instead of holding a reference into the tree
//! - **Comments**: comment lines above a statement and a comment after it on the same
//!   line are attached to the value (or header table) they belong to
//! - **Errors**: the first error aborts parsing and carries the line it started on
//!
//! ## Usage
//!
//! Most users should use [`parse`](crate::parse) in the crate root:
//!
//! ```rust
//! use toml_tree::parse;
//!
//! let doc = parse("[package]\nname = \"demo\"\nversion = \"0.1.0\"\n").unwrap();
//! assert_eq!(doc.get_string("package.name").unwrap(), "demo");
//! ```

use crate::chars;
use crate::cursor::{Cursor, Trivia};
use crate::{key, number, string};
use crate::{Array, CommentData, Document, Error, Result, Table, Value, ValueKind};
use log::{debug, trace};

/// How deeply arrays and inline tables may nest inside one another.
pub const MAX_NESTING_DEPTH: usize = 128;

/// One hop on the way from the root to the current insertion table.
#[derive(Debug, Clone)]
enum Step {
    /// Into the table stored under this key.
    Table(String),
    /// Into the last table of the table array stored under this key.
    LastOfArray(String),
}

/// The TOML parser.
///
/// Created via [`Parser::new`] and consumed by [`Parser::parse_document`]; one parser
/// reads exactly one document.
pub struct Parser {
    cursor: Cursor,
    line: usize,
    depth: usize,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Parser {
            cursor: Cursor::new(input),
            line: 1,
            depth: 0,
        }
    }

    /// Reads the whole input.
    ///
    /// # Errors
    ///
    /// Returns the first syntax or redefinition error encountered; no partial document
    /// is produced.
    pub fn parse_document(mut self) -> Result<Document> {
        let mut document = Document::new();
        let mut current: Vec<Step> = Vec::new();

        loop {
            let trivia = self.read_trivia();
            if self.cursor.is_at_end() {
                document.set_trailing_comment(trivia.comment_text());
                break;
            }

            if self.cursor.peek() == Some('[') {
                current = self.parse_header(&mut document, &trivia)?;
            } else {
                let line = self.line;
                let target = resolve(&mut document, &current, line)?;
                self.parse_key_value(target, &trivia)?;
            }
        }

        debug!(
            "parsed document with {} top-level entries over {} lines",
            document.len(),
            self.line
        );
        Ok(document)
    }

    fn read_trivia(&mut self) -> Trivia {
        let trivia = self.cursor.read_trivia();
        self.line += trivia.newlines;
        trivia
    }

    /// Consumes optional whitespace and a comment, then a newline or the end of input.
    /// Returns the comment text.
    fn end_of_line(&mut self) -> Result<Option<String>> {
        self.cursor.skip_whitespace();
        let comment = self.cursor.read_comment();
        if self.cursor.starts_with("\r\n") {
            self.cursor.read();
        }
        match self.cursor.peek() {
            None => Ok(comment),
            Some('\n') => {
                self.cursor.read();
                self.line += 1;
                Ok(comment)
            }
            Some(found) => Err(Error::MissingNewline {
                line: self.line,
                found,
            }),
        }
    }

    fn expect_equals(&mut self, line: usize) -> Result<()> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            Some('=') => {
                self.cursor.read();
                self.cursor.skip_whitespace();
                Ok(())
            }
            Some(found) => Err(Error::MissingEquals { line, found }),
            None => Err(Error::UnexpectedEof {
                line,
                expected: "'='",
            }),
        }
    }

    fn parse_key_value(&mut self, target: &mut Table, trivia: &Trivia) -> Result<()> {
        let line = self.line;
        let segments = key::parse_key(&mut self.cursor, line)?;
        self.expect_equals(line)?;
        let mut value = self.parse_value()?;
        value.set_preceding_comment(trivia.comment_text());
        value.set_padding_lines(trivia.padding);
        value.set_inline_comment(self.end_of_line()?)?;
        insert_dotted(target, segments, value, line)
    }

    /// Parses `[a.b]` or `[[a.b]]` and returns the path to the table it opens.
    fn parse_header(&mut self, document: &mut Document, trivia: &Trivia) -> Result<Vec<Step>> {
        let line = self.line;
        self.cursor.read();
        let is_table_array = self.cursor.expect_and_consume('[');

        let segments = key::parse_key(&mut self.cursor, line)?;
        self.cursor.skip_whitespace();
        if is_table_array {
            if !(self.cursor.expect_and_consume(']') && self.cursor.expect_and_consume(']')) {
                return Err(Error::UnterminatedTableArray { line });
            }
        } else if !self.cursor.expect_and_consume(']') {
            return Err(Error::UnterminatedTableName { line });
        }

        let mut comments = CommentData::default();
        comments.set_preceding(trivia.comment_text());
        comments.set_padding_lines(trivia.padding);
        comments.set_inline(self.end_of_line()?)?;

        if is_table_array {
            trace!("appending to table array {segments:?} on line {line}");
            open_table_array(document, &segments, comments, line)
        } else {
            trace!("opening table {segments:?} on line {line}");
            open_table(document, &segments, comments, line)
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        let line = self.line;
        match self.cursor.peek() {
            None => Err(Error::UnexpectedEof {
                line,
                expected: "a value",
            }),
            Some('[') => self.nested(Self::parse_array),
            Some('{') => self.nested(Self::parse_inline_table),
            Some(c) if chars::is_quote(c) => {
                string::parse_string(&mut self.cursor, &mut self.line).map(Value::from)
            }
            Some('t' | 'f') => self.parse_boolean(),
            Some(c) if chars::is_digit(c) || matches!(c, '+' | '-' | 'i' | 'n') => {
                self.parse_number_or_date()
            }
            Some(found) => Err(Error::InvalidValueStart { line, found }),
        }
    }

    /// Runs `parse` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`].
    fn nested(&mut self, parse: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::NestingTooDeep { line: self.line });
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn read_literal(&mut self) -> String {
        self.cursor.read_while(|c| !chars::ends_literal(c))
    }

    fn parse_boolean(&mut self) -> Result<Value> {
        match self.read_literal().as_str() {
            "true" => Ok(Value::from(true)),
            "false" => Ok(Value::from(false)),
            other => Err(Error::InvalidBoolean {
                line: self.line,
                literal: other.to_string(),
            }),
        }
    }

    fn parse_number_or_date(&mut self) -> Result<Value> {
        let line = self.line;
        let mut literal = self.read_literal();

        // `1979-05-27 07:32:00`: a space may separate the date from the time.
        if number::is_bare_date(&literal) {
            let mut lookahead = ['\0'; 4];
            let count = self.cursor.read_block(&mut lookahead);
            let time_follows = count == 4
                && lookahead[0] == ' '
                && chars::is_digit(lookahead[1])
                && chars::is_digit(lookahead[2])
                && lookahead[3] == ':';
            if time_follows {
                self.cursor.backtrack(3)?;
                literal.push(' ');
                literal.push_str(&self.read_literal());
            } else {
                self.cursor.backtrack(count)?;
            }
        }

        number::parse_literal(&literal, line).map(Value::new)
    }

    fn parse_array(&mut self) -> Result<Value> {
        let start_line = self.line;
        self.cursor.read();
        let mut array = Array::new();

        loop {
            let trivia = self.read_trivia();
            match self.cursor.peek() {
                None => return Err(Error::UnterminatedArray { line: start_line }),
                Some(']') => {
                    self.cursor.read();
                    break;
                }
                _ => {}
            }

            let mut value = self.parse_value()?;
            value.set_preceding_comment(trivia.comment_text());
            value.set_padding_lines(trivia.padding);

            self.cursor.skip_whitespace();
            let mut inline = self.cursor.read_comment();
            self.line += self.cursor.skip_comments_newlines_whitespace();
            let closed = match self.cursor.peek() {
                Some(',') => {
                    self.cursor.read();
                    if inline.is_none() {
                        self.cursor.skip_whitespace();
                        inline = self.cursor.read_comment();
                    }
                    false
                }
                Some(']') => {
                    self.cursor.read();
                    true
                }
                None => return Err(Error::UnterminatedArray { line: start_line }),
                Some(found) => {
                    return Err(Error::UnexpectedCharacter {
                        line: self.line,
                        expected: "',' or ']'",
                        found,
                    })
                }
            };
            value.set_inline_comment(inline)?;
            array.push(value);
            if closed {
                break;
            }
        }

        Ok(Value::from(array))
    }

    fn parse_inline_table(&mut self) -> Result<Value> {
        let start_line = self.line;
        self.cursor.read();
        let mut table = Table::new();
        self.parse_inline_table_body(&mut table, start_line)
            .map_err(|err| err.in_inline_table(start_line))?;
        table.mark_defined();
        table.lock();
        Ok(Value::from(table))
    }

    fn parse_inline_table_body(&mut self, table: &mut Table, start_line: usize) -> Result<()> {
        self.skip_inline_whitespace(start_line)?;
        if self.cursor.expect_and_consume('}') {
            return Ok(());
        }

        loop {
            self.skip_inline_whitespace(start_line)?;
            let line = self.line;
            let segments = key::parse_key(&mut self.cursor, line)?;
            self.skip_inline_whitespace(start_line)?;
            self.expect_equals(line)?;
            self.skip_inline_whitespace(start_line)?;
            let value = self.parse_value()?;
            insert_dotted(table, segments, value, line)?;

            self.skip_inline_whitespace(start_line)?;
            match self.cursor.read() {
                Some(',') => {}
                Some('}') => return Ok(()),
                None => return Err(Error::UnterminatedInlineTable { line: start_line }),
                Some(found) => {
                    return Err(Error::UnexpectedCharacter {
                        line: self.line,
                        expected: "',' or '}'",
                        found,
                    })
                }
            }
        }
    }

    fn skip_inline_whitespace(&mut self, start_line: usize) -> Result<()> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            Some(c) if chars::is_newline(c) => Err(Error::NewlineInInlineTable { line: self.line }),
            None => Err(Error::UnterminatedInlineTable { line: start_line }),
            _ => Ok(()),
        }
    }
}

/// Follows `path` from the root to the current insertion table.
fn resolve<'a>(document: &'a mut Document, path: &[Step], line: usize) -> Result<&'a mut Table> {
    let mut table: &mut Table = document;
    for step in path {
        let (key, next) = match step {
            Step::Table(key) => (key, table.entry_mut(key).and_then(Value::as_table_mut)),
            Step::LastOfArray(key) => (
                key,
                table
                    .entry_mut(key)
                    .and_then(Value::as_array_mut)
                    .and_then(Array::last_mut)
                    .and_then(Value::as_table_mut),
            ),
        };
        table = next.ok_or_else(|| Error::MissingIntermediateTable {
            line,
            key: key.clone(),
        })?;
    }
    Ok(table)
}

/// Steps from `table` into the intermediate table `segment` of a header path,
/// creating it if absent. Table arrays are entered through their last element.
fn descend_header<'a>(
    table: &'a mut Table,
    segment: &str,
    path: &mut Vec<Step>,
    line: usize,
    for_table_array: bool,
) -> Result<&'a mut Table> {
    if table.get(segment).is_none() {
        table.insert_unchecked(segment.to_string(), Value::from(Table::new()));
    }
    let not_a_table = || {
        let key = segment.to_string();
        if for_table_array {
            Error::MissingIntermediateTable { line, key }
        } else {
            Error::DottedKeyOverValue { line, key }
        }
    };
    let Some(value) = table.entry_mut(segment) else {
        return Err(not_a_table());
    };

    match value.kind_mut() {
        ValueKind::Table(sub_table) if sub_table.is_locked() => Err(Error::WriteToLockedTable {
            line,
            key: segment.to_string(),
        }),
        ValueKind::Table(sub_table) => {
            path.push(Step::Table(segment.to_string()));
            Ok(sub_table)
        }
        ValueKind::Array(array) if array.is_table_array() => {
            match array.last_mut().and_then(Value::as_table_mut) {
                Some(last) => {
                    path.push(Step::LastOfArray(segment.to_string()));
                    Ok(last)
                }
                None => Err(not_a_table()),
            }
        }
        _ => Err(not_a_table()),
    }
}

fn open_table(
    document: &mut Document,
    segments: &[String],
    comments: CommentData,
    line: usize,
) -> Result<Vec<Step>> {
    let Some((last, parents)) = segments.split_last() else {
        return Err(Error::NoKeyName { line });
    };
    let mut path = Vec::with_capacity(segments.len());
    let mut table: &mut Table = document;
    for segment in parents {
        table = descend_header(table, segment, &mut path, line, false)?;
    }

    match table.entry_mut(last) {
        None => {
            let mut new_table = Table::new();
            new_table.mark_from_header();
            let mut value = Value::from(new_table);
            *value.comments_mut() = comments;
            table.insert_unchecked(last.clone(), value);
        }
        Some(existing) => {
            match existing.kind_mut() {
                ValueKind::Table(sub_table) if sub_table.is_defined() || sub_table.is_locked() => {
                    return Err(Error::TableRedefinition {
                        line,
                        key: last.clone(),
                    })
                }
                ValueKind::Table(sub_table) => sub_table.mark_from_header(),
                ValueKind::Array(array) if array.is_table_array() => {
                    return Err(Error::TableArrayRedefinedAsTable {
                        line,
                        key: last.clone(),
                    })
                }
                _ => {
                    return Err(Error::KeyRedefinition {
                        line,
                        key: last.clone(),
                    })
                }
            }
            *existing.comments_mut() = comments;
        }
    }

    path.push(Step::Table(last.clone()));
    Ok(path)
}

fn open_table_array(
    document: &mut Document,
    segments: &[String],
    comments: CommentData,
    line: usize,
) -> Result<Vec<Step>> {
    let Some((last, parents)) = segments.split_last() else {
        return Err(Error::NoKeyName { line });
    };
    let mut path = Vec::with_capacity(segments.len());
    let mut table: &mut Table = document;
    for segment in parents {
        table = descend_header(table, segment, &mut path, line, true)?;
    }

    let mut element_table = Table::new();
    element_table.mark_from_header();
    let mut element = Value::from(element_table);
    *element.comments_mut() = comments;

    match table.entry_mut(last) {
        None => {
            let mut array = Array::new_table_array();
            array.push(element);
            table.insert_unchecked(last.clone(), Value::from(array));
        }
        Some(existing) => match existing.as_array_mut() {
            Some(array) if array.is_table_array() => array.push(element),
            _ => {
                return Err(Error::NotATableArray {
                    line,
                    key: last.clone(),
                })
            }
        },
    }

    path.push(Step::LastOfArray(last.clone()));
    Ok(path)
}

/// Inserts a key-value pair whose key may be dotted. Intermediate tables are created
/// as needed and count as defined. A dotted key may not step into a table that a
/// `[header]` opened.
fn insert_dotted(table: &mut Table, segments: Vec<String>, value: Value, line: usize) -> Result<()> {
    let mut segments = segments;
    let Some(last) = segments.pop() else {
        return Err(Error::NoKeyName { line });
    };

    let mut table = table;
    for segment in segments {
        if table.get(&segment).is_none() {
            if table.is_locked() {
                return Err(Error::WriteToLockedTable { line, key: segment });
            }
            let mut intermediate = Table::new();
            intermediate.mark_defined();
            table.insert_unchecked(segment.clone(), Value::from(intermediate));
        }
        table = match table.entry_mut(&segment).map(Value::kind_mut) {
            Some(ValueKind::Table(sub_table)) if sub_table.is_locked() => {
                return Err(Error::WriteToLockedTable { line, key: segment })
            }
            Some(ValueKind::Table(sub_table)) if sub_table.is_from_header() => {
                return Err(Error::TableRedefinition { line, key: segment })
            }
            Some(ValueKind::Table(sub_table)) => sub_table,
            _ => return Err(Error::DottedKeyOverValue { line, key: segment }),
        };
    }

    table.insert_parsed(last, value, line)
}
