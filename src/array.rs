//! TOML arrays and arrays of tables.
//!
//! One type covers both `[1, 2, 3]` literals and the arrays built by repeated
//! `[[name]]` headers; [`Array::is_table_array`] tells them apart. The flag decides
//! how the array is written back out and which redefinition errors apply to it.

use crate::{Value, ValueKind};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered sequence of independently commentable values.
#[derive(Debug, Clone, Default)]
pub struct Array {
    items: Vec<Value>,
    is_table_array: bool,
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Array {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty array of tables, rendered as `[[name]]` blocks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{Array, Document, Table};
    ///
    /// let mut fruits = Array::new_table_array();
    /// let mut apple = Table::new();
    /// apple.put("name", "apple").unwrap();
    /// fruits.push(apple);
    ///
    /// let mut doc = Document::new();
    /// doc.put("fruit", fruits).unwrap();
    /// assert_eq!(toml_tree::to_string(&doc).unwrap(), "[[fruit]]\nname = \"apple\"\n");
    /// ```
    #[must_use]
    pub fn new_table_array() -> Self {
        Array {
            items: Vec::new(),
            is_table_array: true,
        }
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.items.iter_mut()
    }

    #[must_use]
    pub fn is_table_array(&self) -> bool {
        self.is_table_array
    }

    pub fn set_table_array(&mut self, is_table_array: bool) {
        self.is_table_array = is_table_array;
    }

    /// An array that can sit inside an inline table: not an array of tables, holding
    /// no nested tables or arrays, and with no commented elements.
    #[must_use]
    pub fn is_simple_array(&self) -> bool {
        !self.is_table_array
            && self.items.iter().all(|item| {
                !item.comments().has_comments()
                    && !matches!(item.kind(), ValueKind::Table(_) | ValueKind::Array(_))
            })
    }

    /// Whether the array renders as `[[name]]` blocks rather than as a value.
    /// Only non-empty arrays of tables whose every element is a table qualify.
    #[must_use]
    pub fn should_expand(&self) -> bool {
        self.is_table_array && !self.items.is_empty() && self.items.iter().all(Value::is_table)
    }

    /// Whether any element carries a comment, which forces one element per line.
    #[must_use]
    pub fn has_element_comments(&self) -> bool {
        self.items.iter().any(|item| item.comments().has_comments())
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Value> {
        self.items.last_mut()
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        Array {
            items,
            is_table_array: false,
        }
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        Array::from(iter.into_iter().map(Into::into).collect::<Vec<_>>())
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for Array {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de> Deserialize<'de> for Array {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Value>::deserialize(deserializer).map(Array::from)
    }
}
