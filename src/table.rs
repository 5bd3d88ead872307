//! Insertion-ordered TOML tables.
//!
//! [`Table`] wraps an [`IndexMap`] so entries come back out in the order they were
//! written, which keeps serialized output stable and close to the source document.
//!
//! Besides its entries a table carries three flags:
//!
//! - **locked**: set once an inline table `{ ... }` has been fully parsed. Any later
//!   mutation fails.
//! - **defined**: set once a `[header]` (or a dotted key) has introduced the table,
//!   so a second `[header]` for it can be rejected. Tables introduced by a header are
//!   also closed to dotted keys written under another header.
//! - **force_no_inline**: opts the table out of inline rendering.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{Table, Value};
//!
//! let mut table = Table::new();
//! table.put("name", "Orange").unwrap();
//! table.put("count", 3).unwrap();
//!
//! assert_eq!(table.get_string("name").unwrap(), "Orange");
//! assert_eq!(table.get_integer("count").unwrap(), 3);
//!
//! let keys: Vec<_> = table.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "count"]);
//! ```

use crate::{key, Array, Error, Result, Value, ValueKind};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default entry count at which a table stops rendering inline.
pub const DEFAULT_INLINE_TABLE_THRESHOLD: usize = 4;

/// An ordered map of string keys to TOML values.
///
/// Equality compares entries only; the locked/defined flags are parse bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct Table {
    entries: IndexMap<String, Value>,
    locked: bool,
    defined: bool,
    from_header: bool,
    force_no_inline: bool,
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Table {
    /// Creates an empty, unlocked `Table`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Table;
    ///
    /// let table = Table::new();
    /// assert!(table.is_empty());
    /// assert!(!table.is_locked());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table {
            entries: IndexMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the value stored under exactly `key`, without dotted-key navigation.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Mutable access to the value stored under exactly `key`.
    ///
    /// Returns `None` for every key of a locked table, so the values of a parsed
    /// inline table cannot be rewritten in place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{parse, Value};
    ///
    /// let mut doc = parse("point = { x = 1 }").unwrap();
    /// let point = doc.get_mut("point").and_then(Value::as_table_mut).unwrap();
    /// assert!(point.get_mut("x").is_none());
    /// ```
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        if self.locked {
            return None;
        }
        self.entries.get_mut(key)
    }

    /// Looks up `key`, first literally and then as a dotted path through sub-tables.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::parse;
    ///
    /// let doc = parse("[server]\nport = 8080\n").unwrap();
    /// assert_eq!(doc.try_get_value("server.port").and_then(|v| v.as_integer()), Some(8080));
    /// assert!(doc.try_get_value("server.host").is_none());
    /// ```
    #[must_use]
    pub fn try_get_value(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.entries.get(key) {
            return Some(value);
        }
        let segments = key::split_dotted(key)?;
        let (last, parents) = segments.split_last()?;
        let mut table = self;
        for segment in parents {
            table = table.entries.get(segment)?.as_table()?;
        }
        table.entries.get(last)
    }

    /// Returns `true` if [`try_get_value`](Self::try_get_value) would find something.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.try_get_value(key).is_some()
    }

    /// Like [`try_get_value`](Self::try_get_value) but fails with
    /// [`Error::MissingKey`] when nothing is found.
    pub fn get_value(&self, key: &str) -> Result<&Value> {
        self.try_get_value(key)
            .ok_or_else(|| Error::missing_key(key))
    }

    pub fn get_string(&self, key: &str) -> Result<&str> {
        let value = self.get_value(key)?;
        value
            .as_str()
            .ok_or_else(|| Error::type_mismatch(key, "string", value.type_name()))
    }

    /// Reads a 32-bit integer. Values outside `i32` fail with
    /// [`Error::IntegerOutOfRange`]; use [`get_long`](Self::get_long) for the full range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{parse, Error};
    ///
    /// let doc = parse("small = 7\nbig = 5000000000\n").unwrap();
    /// assert_eq!(doc.get_integer("small").unwrap(), 7);
    /// assert!(matches!(doc.get_integer("big"), Err(Error::IntegerOutOfRange { .. })));
    /// assert_eq!(doc.get_long("big").unwrap(), 5_000_000_000);
    /// ```
    pub fn get_integer(&self, key: &str) -> Result<i32> {
        let value = self.get_long(key)?;
        i32::try_from(value).map_err(|_| Error::IntegerOutOfRange {
            key: key.to_string(),
            value,
        })
    }

    pub fn get_long(&self, key: &str) -> Result<i64> {
        let value = self.get_value(key)?;
        value
            .as_integer()
            .ok_or_else(|| Error::type_mismatch(key, "integer", value.type_name()))
    }

    /// Reads a float. Integers are not widened; a stored `1` is a type mismatch.
    pub fn get_float(&self, key: &str) -> Result<f64> {
        let value = self.get_value(key)?;
        value
            .as_float()
            .ok_or_else(|| Error::type_mismatch(key, "float", value.type_name()))
    }

    pub fn get_boolean(&self, key: &str) -> Result<bool> {
        let value = self.get_value(key)?;
        value
            .as_bool()
            .ok_or_else(|| Error::type_mismatch(key, "boolean", value.type_name()))
    }

    pub fn get_array(&self, key: &str) -> Result<&Array> {
        let value = self.get_value(key)?;
        value
            .as_array()
            .ok_or_else(|| Error::type_mismatch(key, "array", value.type_name()))
    }

    pub fn get_sub_table(&self, key: &str) -> Result<&Table> {
        let value = self.get_value(key)?;
        value
            .as_table()
            .ok_or_else(|| Error::type_mismatch(key, "table", value.type_name()))
    }

    /// Stores `value` under `key`, replacing any previous value in place.
    ///
    /// Fails with [`Error::TableLocked`] if the table was parsed from an inline table.
    pub fn put_value(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        if self.locked {
            return Err(Error::TableLocked { key });
        }
        self.entries.insert(key, value);
        Ok(())
    }

    /// Convenience form of [`put_value`](Self::put_value) for anything convertible
    /// into a [`Value`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{parse, Error};
    ///
    /// let mut doc = parse("point = { x = 1 }").unwrap();
    /// doc.put("enabled", true).unwrap();
    ///
    /// let point = doc.get_mut("point").and_then(|v| v.as_table_mut()).unwrap();
    /// assert!(matches!(point.put("y", 2), Err(Error::TableLocked { .. })));
    /// ```
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.put_value(key, value.into())
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Result<Option<Value>> {
        if self.locked {
            return Err(Error::TableLocked {
                key: key.to_string(),
            });
        }
        Ok(self.entries.shift_remove(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the keys of the table, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    /// Returns an iterator over the values of the table, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.entries.values()
    }

    /// Returns an iterator over the key-value pairs of the table, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.defined
    }

    #[must_use]
    pub fn is_force_no_inline(&self) -> bool {
        self.force_no_inline
    }

    /// Forces the table to render as a `[section]` regardless of its contents.
    pub fn set_force_no_inline(&mut self, force: bool) {
        self.force_no_inline = force;
    }

    /// Whether this table renders as `{ ... }` under the default threshold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Table;
    ///
    /// let mut table = Table::new();
    /// for key in ["a", "b", "c"] {
    ///     table.put(key, 1).unwrap();
    /// }
    /// assert!(table.should_serialize_inline());
    ///
    /// table.put("d", 1).unwrap();
    /// assert!(!table.should_serialize_inline());
    /// ```
    #[must_use]
    pub fn should_serialize_inline(&self) -> bool {
        self.should_serialize_inline_with(DEFAULT_INLINE_TABLE_THRESHOLD)
    }

    /// Whether this table renders inline when tables with `threshold` or more entries
    /// must expand. Rules, in order: not forced expanded, fewer entries than
    /// `threshold`, no key containing a space, no entry with comments, and every entry
    /// a scalar or a simple array.
    #[must_use]
    pub fn should_serialize_inline_with(&self, threshold: usize) -> bool {
        if self.force_no_inline || self.entries.len() >= threshold {
            return false;
        }
        self.entries.iter().all(|(key, value)| {
            !key.contains(' ')
                && !value.comments().has_comments()
                && match value.kind() {
                    ValueKind::Table(_) => false,
                    ValueKind::Array(array) => array.is_simple_array(),
                    _ => true,
                }
        })
    }

    /// Inserts a freshly parsed key-value pair, rejecting duplicates and writes into
    /// inline tables.
    pub(crate) fn insert_parsed(&mut self, key: String, value: Value, line: usize) -> Result<()> {
        if self.locked {
            return Err(Error::WriteToLockedTable { line, key });
        }
        if self.entries.contains_key(&key) {
            return Err(Error::KeyRedefinition { line, key });
        }
        self.entries.insert(key, value);
        Ok(())
    }

    /// Entry access for the parser, which checks the lock itself so that it can report
    /// the line of the offending statement.
    pub(crate) fn entry_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Raw insertion for the parser's path resolution, which has already checked the
    /// redefinition rules.
    pub(crate) fn insert_unchecked(&mut self, key: String, value: Value) {
        self.entries.insert(key, value);
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    pub(crate) fn mark_defined(&mut self) {
        self.defined = true;
    }

    /// Marks the table as opened by a `[header]`.
    pub(crate) fn mark_from_header(&mut self) {
        self.defined = true;
        self.from_header = true;
    }

    pub(crate) fn is_from_header(&self) -> bool {
        self.from_header
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Table {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Self::default()
        }
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.entries.iter())
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        match Value::deserialize(deserializer)?.into_kind() {
            ValueKind::Table(table) => Ok(table),
            other => Err(D::Error::custom(format!(
                "expected a table, found {}",
                other.type_name()
            ))),
        }
    }
}
