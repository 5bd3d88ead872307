//! TOML serialization.
//!
//! This module provides the [`Serializer`] that walks a value tree and writes it
//! back out as TOML text.
//!
//! ## Overview
//!
//! Each table body is written in three passes so that plain key-value pairs always
//! come before bracketed sections:
//!
//! 1. **Simple entries**: scalars, arrays, and tables small enough to inline
//! 2. **Sub-tables**: tables that expand into `[section]` blocks
//! 3. **Table arrays**: arrays of tables that expand into `[[section]]` blocks
//!
//! A table inlines as `{ k = v }` when [`Table::should_serialize_inline_with`] holds
//! for the configured threshold. Comments are written back where they were read:
//! preceding comments as `# text` lines above the entry or header, inline comments
//! after the value or header on the same line.
//!
//! ## Usage
//!
//! ```rust
//! use toml_tree::{parse, Serializer, TomlOptions};
//!
//! let doc = parse("[server]\nhost = \"localhost\"\nport = 8080\nworkers = 4\ntls = false\n").unwrap();
//!
//! let mut serializer = Serializer::new(TomlOptions::new());
//! serializer.serialize_document(&doc).unwrap();
//! assert_eq!(
//!     serializer.into_inner(),
//!     "[server]\nhost = \"localhost\"\nport = 8080\nworkers = 4\ntls = false\n"
//! );
//! ```

use crate::{key, string};
use crate::{Array, Document, Result, Table, TomlOptions, Value, ValueKind};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use log::{debug, trace};

/// The TOML serializer.
///
/// Created via [`Serializer::new`]; output accumulates until [`into_inner`](Self::into_inner).
pub struct Serializer {
    output: String,
    options: TomlOptions,
}

impl Serializer {
    pub fn new(options: TomlOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes a whole document: the root table's body followed by any trailing
    /// comment.
    pub fn serialize_document(&mut self, document: &Document) -> Result<()> {
        self.write_table_body(document.as_table(), &[])?;
        if let Some(trailing) = document.trailing_comment() {
            self.write_comment_lines(trailing, "");
        }
        debug!(
            "serialized document with {} top-level entries into {} bytes",
            document.len(),
            self.output.len()
        );
        Ok(())
    }

    /// Writes `value` in value position (right of `=` or inside an array).
    pub fn serialize_value(&mut self, value: &Value) -> Result<()> {
        self.write_value(value, 0, false)
    }

    fn is_expanded(&self, value: &Value) -> bool {
        match value.kind() {
            ValueKind::Table(table) => {
                !table.should_serialize_inline_with(self.options.inline_table_threshold)
            }
            ValueKind::Array(array) => array.should_expand(),
            _ => false,
        }
    }

    fn write_table_body(&mut self, table: &Table, path: &[String]) -> Result<()> {
        for (key, value) in table.iter() {
            if !self.is_expanded(value) {
                self.write_key_value(key, value)?;
            }
        }

        for (key, value) in table.iter() {
            if let ValueKind::Table(sub_table) = value.kind() {
                if self.is_expanded(value) {
                    trace!("expanding table '{key}' into a section");
                    self.write_section(sub_table, value, &child_path(path, key))?;
                }
            }
        }

        for (key, value) in table.iter() {
            if let ValueKind::Array(array) = value.kind() {
                if array.should_expand() {
                    trace!("expanding table array '{key}' ({} tables)", array.len());
                    self.write_table_array(array, value, &child_path(path, key))?;
                }
            }
        }
        Ok(())
    }

    fn write_key_value(&mut self, key: &str, value: &Value) -> Result<()> {
        if self.options.preserve_padding && !self.output.is_empty() {
            for _ in 0..value.padding_lines() {
                self.output.push('\n');
            }
        }
        if let Some(comment) = value.preceding_comment() {
            self.write_comment_lines(comment, "");
        }
        self.output.push_str(&key::format_key(key)?);
        self.output.push_str(" = ");
        self.write_value(value, 0, false)?;
        self.write_inline_comment(value);
        self.output.push('\n');
        Ok(())
    }

    /// Writes `[path]` and the table's body. The header is left out for a purely
    /// structural table, one with only sub-sections and no comments, since the
    /// sub-section headers define it implicitly.
    fn write_section(&mut self, table: &Table, value: &Value, path: &[String]) -> Result<()> {
        let has_simple_entries = table.values().any(|entry| !self.is_expanded(entry));
        if has_simple_entries || table.is_empty() || value.comments().has_comments() {
            self.write_section_separator(value.padding_lines());
            if let Some(comment) = value.preceding_comment() {
                self.write_comment_lines(comment, "");
            }
            self.output.push('[');
            self.output.push_str(&key::format_path(path)?);
            self.output.push(']');
            self.write_inline_comment(value);
            self.output.push('\n');
        }
        self.write_table_body(table, path)
    }

    fn write_table_array(&mut self, array: &Array, value: &Value, path: &[String]) -> Result<()> {
        let header = key::format_path(path)?;
        for (index, element) in array.iter().enumerate() {
            let Some(table) = element.as_table() else {
                continue;
            };
            self.write_section_separator(element.padding_lines());
            if index == 0 {
                if let Some(comment) = value.preceding_comment() {
                    self.write_comment_lines(comment, "");
                }
            }
            if let Some(comment) = element.preceding_comment() {
                self.write_comment_lines(comment, "");
            }
            self.output.push_str("[[");
            self.output.push_str(&header);
            self.output.push_str("]]");
            self.write_inline_comment(element);
            self.output.push('\n');
            self.write_table_body(table, path)?;
        }
        Ok(())
    }

    /// Ensures the blank lines before a section header: at least one, more if the
    /// value recorded more padding, none at the very start of the output.
    fn write_section_separator(&mut self, padding: usize) {
        if self.output.is_empty() {
            return;
        }
        let wanted = if self.options.preserve_padding {
            padding.max(1)
        } else {
            1
        };
        let existing = self
            .output
            .strip_suffix('\n')
            .map_or(0, |rest| rest.len() - rest.trim_end_matches('\n').len());
        for _ in existing..wanted {
            self.output.push('\n');
        }
    }

    /// Writes a value in value position. `in_inline` is set inside `{ ... }`, where
    /// nothing may span lines and comments cannot be represented.
    fn write_value(&mut self, value: &Value, depth: usize, in_inline: bool) -> Result<()> {
        match value.kind() {
            ValueKind::String(s) if in_inline && s.contains('\n') => {
                self.output.push_str(&string::escape_basic(s));
            }
            ValueKind::String(s) => self.output.push_str(&string::quote(s)),
            ValueKind::Integer(i) => self.output.push_str(&i.to_string()),
            ValueKind::Float(f) => self.output.push_str(&format_float(*f)),
            ValueKind::Boolean(b) => self.output.push_str(if *b { "true" } else { "false" }),
            ValueKind::LocalDate(d) => self.output.push_str(&format_local_date(d)),
            ValueKind::LocalTime(t) => self.output.push_str(&format_local_time(t)),
            ValueKind::LocalDateTime(dt) => self.output.push_str(&format_local_date_time(dt)),
            ValueKind::OffsetDateTime(dt) => self.output.push_str(&format_offset_date_time(dt)),
            ValueKind::Array(array) if array.has_element_comments() && !in_inline => {
                self.write_multi_line_array(array, depth)?;
            }
            ValueKind::Array(array) => self.write_inline_array(array, depth, in_inline)?,
            ValueKind::Table(table) => self.write_inline_table(table, depth)?,
        }
        Ok(())
    }

    fn write_inline_array(&mut self, array: &Array, depth: usize, in_inline: bool) -> Result<()> {
        if array.is_empty() {
            self.output.push_str("[]");
            return Ok(());
        }
        self.output.push_str("[ ");
        for (index, element) in array.iter().enumerate() {
            if index > 0 {
                self.output.push_str(", ");
            }
            self.write_value(element, depth + 1, in_inline)?;
        }
        self.output.push_str(" ]");
        Ok(())
    }

    fn write_multi_line_array(&mut self, array: &Array, depth: usize) -> Result<()> {
        let outer = " ".repeat(depth * self.options.indent);
        let inner = " ".repeat((depth + 1) * self.options.indent);
        self.output.push_str("[\n");
        for element in array.iter() {
            if let Some(comment) = element.preceding_comment() {
                self.write_comment_lines(comment, &inner);
            }
            self.output.push_str(&inner);
            self.write_value(element, depth + 1, false)?;
            self.output.push(',');
            self.write_inline_comment(element);
            self.output.push('\n');
        }
        self.output.push_str(&outer);
        self.output.push(']');
        Ok(())
    }

    fn write_inline_table(&mut self, table: &Table, depth: usize) -> Result<()> {
        if table.is_empty() {
            self.output.push_str("{}");
            return Ok(());
        }
        self.output.push_str("{ ");
        for (index, (key, value)) in table.iter().enumerate() {
            if index > 0 {
                self.output.push_str(", ");
            }
            self.output.push_str(&key::format_key(key)?);
            self.output.push_str(" = ");
            self.write_value(value, depth, true)?;
        }
        self.output.push_str(" }");
        Ok(())
    }

    fn write_comment_lines(&mut self, comment: &str, indent: &str) {
        for line in comment.split('\n') {
            self.output.push_str(indent);
            self.output.push('#');
            if !line.is_empty() {
                self.output.push(' ');
                self.output.push_str(line);
            }
            self.output.push('\n');
        }
    }

    fn write_inline_comment(&mut self, value: &Value) {
        if let Some(comment) = value.inline_comment() {
            self.output.push_str(" # ");
            self.output.push_str(comment);
        }
    }
}

fn child_path(path: &[String], key: &str) -> Vec<String> {
    let mut child = path.to_vec();
    child.push(key.to_string());
    child
}

pub(crate) fn to_string(document: &Document) -> Result<String> {
    to_string_with_options(document, &TomlOptions::default())
}

pub(crate) fn to_string_with_options(document: &Document, options: &TomlOptions) -> Result<String> {
    let mut serializer = Serializer::new(options.clone());
    serializer.serialize_document(document)?;
    Ok(serializer.into_inner())
}

pub(crate) fn value_to_string(value: &Value) -> Result<String> {
    let mut serializer = Serializer::new(TomlOptions::default());
    serializer.serialize_value(value)?;
    Ok(serializer.into_inner())
}

/// Floats always carry a `.` or an exponent so they read back as floats.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        let text = if value.is_sign_positive() { "inf" } else { "-inf" };
        text.to_string()
    } else {
        format!("{value:?}")
    }
}

pub(crate) fn format_local_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Fractional seconds are printed only when non-zero, without trailing zeros.
pub(crate) fn format_local_time(time: &NaiveTime) -> String {
    let mut text = time.format("%H:%M:%S").to_string();
    let nanos = time.nanosecond() % 1_000_000_000;
    if nanos != 0 {
        let digits = format!("{nanos:09}");
        text.push('.');
        text.push_str(digits.trim_end_matches('0'));
    }
    text
}

pub(crate) fn format_local_date_time(date_time: &NaiveDateTime) -> String {
    format!(
        "{}T{}",
        format_local_date(&date_time.date()),
        format_local_time(&date_time.time())
    )
}

/// A zero offset is written as `Z`.
pub(crate) fn format_offset_date_time(date_time: &DateTime<FixedOffset>) -> String {
    let local = format_local_date_time(&date_time.naive_local());
    if date_time.offset().local_minus_utc() == 0 {
        format!("{local}Z")
    } else {
        format!("{local}{}", date_time.format("%:z"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn round_trip(input: &str) -> String {
        parse(input).unwrap().serialized_text().unwrap()
    }

    #[test]
    fn test_simple_entries_before_sections() {
        let mut inner = Table::new();
        for (key, value) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
            inner.put(key, value).unwrap();
        }
        let mut doc = Document::new();
        doc.put("section", inner).unwrap();
        doc.put("title", "x").unwrap();

        assert_eq!(
            to_string(&doc).unwrap(),
            "title = \"x\"\n\n[section]\na = 1\nb = 2\nc = 3\nd = 4\n"
        );
    }

    #[test]
    fn test_small_table_is_inlined() {
        let mut point = Table::new();
        point.put("x", 1).unwrap();
        point.put("y", 2).unwrap();
        let mut doc = Document::new();
        doc.put("point", point).unwrap();
        assert_eq!(to_string(&doc).unwrap(), "point = { x = 1, y = 2 }\n");
    }

    #[test]
    fn test_structural_table_has_no_header() {
        let input = "[a.b]\nc = 1\nd = 2\ne = 3\nf = 4\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_table_array_blocks() {
        let input = "[[fruit]]\nname = \"apple\"\n\n[[fruit]]\nname = \"banana\"\n";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_comments_are_written_back() {
        let input = "# header\ntitle = \"TOML\" # inline\n\n# section comment\n[owner] # owner\nname = \"Tom\"\n";
        assert_eq!(
            round_trip(input),
            "# header\ntitle = \"TOML\" # inline\n\n# section comment\nowner = { name = \"Tom\" } # owner\n"
        );

        let mut owner = parse(input).unwrap().get_sub_table("owner").unwrap().clone();
        owner.set_force_no_inline(true);
        let mut doc = Document::new();
        doc.put("owner", owner).unwrap();
        assert_eq!(to_string(&doc).unwrap(), "[owner]\nname = \"Tom\"\n");
    }

    #[test]
    fn test_padding_is_preserved() {
        assert_eq!(round_trip("a = 1\n\n\nb = 2\n"), "a = 1\n\n\nb = 2\n");
        let doc = parse("a = 1\n\n\nb = 2\n").unwrap();
        assert_eq!(
            to_string_with_options(&doc, &TomlOptions::compact()).unwrap(),
            "a = 1\nb = 2\n"
        );
    }

    #[test]
    fn test_multi_line_array_with_comments() {
        let input = "ports = [\n    # primary\n    8080,\n    8081, # fallback\n]\n";
        assert_eq!(round_trip(input), input);

        let doc = parse(input).unwrap();
        let two_spaces = TomlOptions::new().with_indent(2);
        assert_eq!(
            to_string_with_options(&doc, &two_spaces).unwrap(),
            "ports = [\n  # primary\n  8080,\n  8081, # fallback\n]\n"
        );
    }

    #[test]
    fn test_trailing_comment() {
        assert_eq!(round_trip("a = 1\n# the end\n"), "a = 1\n# the end\n");
    }

    #[test]
    fn test_scalar_formatting() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(value_to_string(&Value::from(true)).unwrap(), "true");
        assert_eq!(
            value_to_string(&Value::from(vec![Value::from(1), Value::from("a")])).unwrap(),
            "[ 1, \"a\" ]"
        );
        assert_eq!(value_to_string(&Value::from(Array::new())).unwrap(), "[]");
        assert_eq!(value_to_string(&Value::from(Table::new())).unwrap(), "{}");
    }

    #[test]
    fn test_date_formatting() {
        for literal in [
            "1979-05-27",
            "07:32:00",
            "00:32:00.999999",
            "1979-05-27T07:32:00",
            "1979-05-27T07:32:00Z",
            "1979-05-27T00:32:00.999999-07:00",
            "07:32:00.5",
            "00:00:00.000001",
            "1979-05-27T07:32:00.25Z",
            "1979-05-27T07:32:00.123456789+05:30",
        ] {
            let doc = parse(&format!("d = {literal}")).unwrap();
            assert_eq!(doc.get_value("d").unwrap().serialized_text().unwrap(), literal);
        }
    }

    #[test]
    fn test_fraction_trailing_zeros_are_dropped() {
        assert_eq!(round_trip("t = 07:32:00.500\n"), "t = 07:32:00.5\n");
        assert_eq!(round_trip("t = 07:32:00.000\n"), "t = 07:32:00\n");
    }

    #[test]
    fn test_commented_array_nested_in_inline_array() {
        let mut one = Value::from(1);
        one.set_preceding_comment(Some("c"));
        let inner = Value::from(vec![one]);
        let outer = Value::from(vec![inner]);

        let text = value_to_string(&outer).unwrap();
        assert_eq!(text, "[ [\n        # c\n        1,\n    ] ]");

        let doc = parse(&format!("a = {text}\n")).unwrap();
        let inner = doc.get_array("a").unwrap().get(0).and_then(Value::as_array).unwrap();
        assert_eq!(inner.get(0).and_then(Value::preceding_comment), Some("c"));
    }

    #[test]
    fn test_space_separated_date_time_is_normalised() {
        assert_eq!(
            round_trip("d = 1979-05-27 07:32:00\n"),
            "d = 1979-05-27T07:32:00\n"
        );
    }

    #[test]
    fn test_invalid_key_fails_serialization() {
        let mut doc = Document::new();
        doc.put("both ' and \"", 1).unwrap();
        assert!(matches!(
            to_string(&doc),
            Err(crate::Error::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_nested_table_arrays_and_sub_tables() {
        let input = "[[fruit]]\nname = \"apple\"\n\n[fruit.physical]\ncolor = \"red\"\nshape = \"round\"\nsize = 3\nweight = 1.5\n\n[[fruit.variety]]\nname = \"red delicious\"\n";
        assert_eq!(round_trip(input), input);
    }
}
