//! The value tree produced by the parser and consumed by the serializer.
//!
//! A [`Value`] pairs a [`ValueKind`] payload with [`CommentData`], so every node in
//! the tree (table entries and array elements alike) can carry a preceding comment,
//! an inline comment and blank-line padding.
//!
//! ## Creating Values
//!
//! ```rust
//! use toml_tree::{Value, ValueKind};
//!
//! let text = Value::from("hello");
//! let number = Value::from(42);
//! let ratio = Value::from(0.5);
//!
//! assert!(text.is_string());
//! assert_eq!(number.as_integer(), Some(42));
//! assert!(matches!(ratio.kind(), ValueKind::Float(f) if *f == 0.5));
//! ```
//!
//! ## Comments
//!
//! ```rust
//! use toml_tree::Value;
//!
//! let mut value = Value::from(8080);
//! value.set_preceding_comment(Some("Port to listen on"));
//! value.set_inline_comment(Some("default")).unwrap();
//!
//! // Inline comments live on one line.
//! assert!(value.set_inline_comment(Some("two\nlines")).is_err());
//! assert_eq!(value.serialized_text().unwrap(), "8080");
//! ```

use crate::{ser, Array, Error, Result, Table};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Comment metadata attached to a [`Value`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentData {
    preceding: Option<String>,
    inline: Option<String>,
    padding_lines: usize,
}

impl CommentData {
    /// The comment lines written before the value, joined with `\n`.
    #[must_use]
    pub fn preceding(&self) -> Option<&str> {
        self.preceding.as_deref()
    }

    pub fn set_preceding<S: Into<String>>(&mut self, comment: Option<S>) {
        self.preceding = comment.map(Into::into).filter(|c| !c.is_empty());
    }

    /// The comment written after the value on the same line.
    #[must_use]
    pub fn inline(&self) -> Option<&str> {
        self.inline.as_deref()
    }

    /// Sets the inline comment. Fails with [`Error::InvalidInlineComment`] if the text
    /// spans more than one line.
    pub fn set_inline<S: Into<String>>(&mut self, comment: Option<S>) -> Result<()> {
        let comment = comment.map(Into::into);
        if comment
            .as_deref()
            .is_some_and(|c| c.contains('\n') || c.contains('\r'))
        {
            return Err(Error::InvalidInlineComment);
        }
        self.inline = comment.filter(|c| !c.is_empty());
        Ok(())
    }

    /// Number of blank lines emitted before the value (and its preceding comment).
    #[must_use]
    pub fn padding_lines(&self) -> usize {
        self.padding_lines
    }

    pub fn set_padding_lines(&mut self, lines: usize) {
        self.padding_lines = lines;
    }

    /// Returns `true` if there is a preceding or an inline comment. Padding alone
    /// does not count.
    #[must_use]
    pub fn has_comments(&self) -> bool {
        self.preceding.is_some() || self.inline.is_some()
    }
}

/// The payload of a [`Value`].
#[derive(Clone, Debug, PartialEq)]
pub enum ValueKind {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime),
    LocalDateTime(NaiveDateTime),
    OffsetDateTime(DateTime<FixedOffset>),
    Array(Array),
    Table(Table),
}

impl ValueKind {
    /// Human-readable name of the variant, as used in type-mismatch errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            ValueKind::String(_) => "string",
            ValueKind::Integer(_) => "integer",
            ValueKind::Float(_) => "float",
            ValueKind::Boolean(_) => "boolean",
            ValueKind::LocalDate(_) => "local date",
            ValueKind::LocalTime(_) => "local time",
            ValueKind::LocalDateTime(_) => "local date-time",
            ValueKind::OffsetDateTime(_) => "offset date-time",
            ValueKind::Array(_) => "array",
            ValueKind::Table(_) => "table",
        }
    }
}

/// A node of the TOML tree: a typed payload plus its comments.
///
/// Equality compares payloads only; comments are formatting, not data.
#[derive(Clone, Debug)]
pub struct Value {
    kind: ValueKind,
    comments: CommentData,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Value {
    #[must_use]
    pub fn new(kind: ValueKind) -> Self {
        Value {
            kind,
            comments: CommentData::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    #[inline]
    pub fn kind_mut(&mut self) -> &mut ValueKind {
        &mut self.kind
    }

    #[must_use]
    pub fn into_kind(self) -> ValueKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    #[inline]
    #[must_use]
    pub fn comments(&self) -> &CommentData {
        &self.comments
    }

    #[inline]
    pub fn comments_mut(&mut self) -> &mut CommentData {
        &mut self.comments
    }

    #[must_use]
    pub fn preceding_comment(&self) -> Option<&str> {
        self.comments.preceding()
    }

    pub fn set_preceding_comment<S: Into<String>>(&mut self, comment: Option<S>) {
        self.comments.set_preceding(comment);
    }

    #[must_use]
    pub fn inline_comment(&self) -> Option<&str> {
        self.comments.inline()
    }

    /// Sets the inline comment, rejecting text that contains a newline.
    pub fn set_inline_comment<S: Into<String>>(&mut self, comment: Option<S>) -> Result<()> {
        self.comments.set_inline(comment)
    }

    #[must_use]
    pub fn padding_lines(&self) -> usize {
        self.comments.padding_lines()
    }

    pub fn set_padding_lines(&mut self, lines: usize) {
        self.comments.set_padding_lines(lines);
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self.kind, ValueKind::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self.kind, ValueKind::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self.kind, ValueKind::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self.kind, ValueKind::Boolean(_))
    }

    /// Returns `true` for any of the four date/time variants.
    #[inline]
    #[must_use]
    pub const fn is_date_time(&self) -> bool {
        matches!(
            self.kind,
            ValueKind::LocalDate(_)
                | ValueKind::LocalTime(_)
                | ValueKind::LocalDateTime(_)
                | ValueKind::OffsetDateTime(_)
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.kind, ValueKind::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self.kind, ValueKind::Table(_))
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self.kind {
            ValueKind::Integer(i) => Some(i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Float(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ValueKind::Boolean(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_local_date(&self) -> Option<NaiveDate> {
        match self.kind {
            ValueKind::LocalDate(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_local_time(&self) -> Option<NaiveTime> {
        match self.kind {
            ValueKind::LocalTime(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_local_date_time(&self) -> Option<NaiveDateTime> {
        match self.kind {
            ValueKind::LocalDateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_offset_date_time(&self) -> Option<DateTime<FixedOffset>> {
        match self.kind {
            ValueKind::OffsetDateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match &self.kind {
            ValueKind::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match &mut self.kind {
            ValueKind::Array(array) => Some(array),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match &self.kind {
            ValueKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match &mut self.kind {
            ValueKind::Table(table) => Some(table),
            _ => None,
        }
    }

    /// The TOML text for this value in value position. Tables render in their inline
    /// `{ ... }` form and arrays as `[ ... ]`.
    ///
    /// Fails only when a table key cannot be quoted (see [`Error::InvalidKey`]).
    pub fn serialized_text(&self) -> Result<String> {
        ser::value_to_string(self)
    }

    /// A loose, human-readable rendering meant for diagnostics. Not guaranteed to be
    /// valid TOML.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// table.put("a", 1).unwrap();
    /// assert_eq!(Value::from(table).display_text(), "Table (1 entries)");
    /// assert_eq!(Value::from("plain").display_text(), "plain");
    /// ```
    #[must_use]
    pub fn display_text(&self) -> String {
        match &self.kind {
            ValueKind::String(s) => s.clone(),
            ValueKind::Integer(i) => i.to_string(),
            ValueKind::Float(f) => ser::format_float(*f),
            ValueKind::Boolean(b) => b.to_string(),
            ValueKind::LocalDate(d) => ser::format_local_date(d),
            ValueKind::LocalTime(t) => ser::format_local_time(t),
            ValueKind::LocalDateTime(dt) => ser::format_local_date_time(dt),
            ValueKind::OffsetDateTime(dt) => ser::format_offset_date_time(dt),
            ValueKind::Array(array) if array.is_table_array() => {
                format!("Table Array ({} tables)", array.len())
            }
            ValueKind::Array(array) => format!("Array ({} values)", array.len()),
            ValueKind::Table(table) => format!("Table ({} entries)", table.len()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl From<ValueKind> for Value {
    fn from(kind: ValueKind) -> Self {
        Value::new(kind)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::new(ValueKind::Boolean(value))
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::new(ValueKind::Integer(i64::from(value)))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::new(ValueKind::Integer(i64::from(value)))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::new(ValueKind::Integer(i64::from(value)))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::new(ValueKind::Integer(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::new(ValueKind::Integer(i64::from(value)))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::new(ValueKind::Integer(i64::from(value)))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::new(ValueKind::Integer(i64::from(value)))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::new(ValueKind::Float(f64::from(value)))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::new(ValueKind::Float(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::new(ValueKind::String(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::new(ValueKind::String(value.to_string()))
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::new(ValueKind::LocalDate(value))
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::new(ValueKind::LocalTime(value))
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::new(ValueKind::LocalDateTime(value))
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::new(ValueKind::OffsetDateTime(value))
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::new(ValueKind::Array(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::new(ValueKind::Array(Array::from(value)))
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::new(ValueKind::Table(value))
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        value
            .as_integer()
            .ok_or_else(|| Error::type_mismatch("<value>", "integer", value.type_name()))
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        value
            .as_float()
            .ok_or_else(|| Error::type_mismatch("<value>", "float", value.type_name()))
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| Error::type_mismatch("<value>", "boolean", value.type_name()))
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value.kind {
            ValueKind::String(s) => Ok(s),
            other => Err(Error::type_mismatch("<value>", "string", other.type_name())),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.kind {
            ValueKind::String(s) => serializer.serialize_str(s),
            ValueKind::Integer(i) => serializer.serialize_i64(*i),
            ValueKind::Float(f) => serializer.serialize_f64(*f),
            ValueKind::Boolean(b) => serializer.serialize_bool(*b),
            ValueKind::LocalDate(_)
            | ValueKind::LocalTime(_)
            | ValueKind::LocalDateTime(_)
            | ValueKind::OffsetDateTime(_) => serializer.serialize_str(&self.display_text()),
            ValueKind::Array(array) => array.serialize(serializer),
            ValueKind::Table(table) => table.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any value representable in TOML")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Value::from)
                    .map_err(|_| E::custom(format!("integer {value} is out of range for TOML")))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut array = Array::new();
                while let Some(element) = seq.next_element::<Value>()? {
                    array.push(element);
                }
                Ok(Value::from(array))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut table = Table::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    table.put_value(key, value).map_err(de::Error::custom)?;
                }
                Ok(Value::from(table))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
