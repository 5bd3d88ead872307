//! The root of a parsed TOML file.
//!
//! A [`Document`] is a [`Table`] (it derefs to one) that always renders expanded,
//! plus any comment lines that trail the last value in the file.

use crate::{ser, Result, Table};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Table,
    trailing_comment: Option<String>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing table as a document root.
    #[must_use]
    pub fn from_table(root: Table) -> Self {
        Document {
            root,
            trailing_comment: None,
        }
    }

    #[must_use]
    pub fn as_table(&self) -> &Table {
        &self.root
    }

    #[must_use]
    pub fn into_table(self) -> Table {
        self.root
    }

    /// Comment lines found after the last statement, joined with `\n`.
    #[must_use]
    pub fn trailing_comment(&self) -> Option<&str> {
        self.trailing_comment.as_deref()
    }

    pub fn set_trailing_comment<S: Into<String>>(&mut self, comment: Option<S>) {
        self.trailing_comment = comment.map(Into::into).filter(|c| !c.is_empty());
    }

    /// Renders the whole document with default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::parse;
    ///
    /// let doc = parse("title = \"TOML\" # inline\n").unwrap();
    /// assert_eq!(doc.serialized_text().unwrap(), "title = \"TOML\" # inline\n");
    /// ```
    pub fn serialized_text(&self) -> Result<String> {
        ser::to_string(self)
    }
}

impl Deref for Document {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.root
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Table {
        &mut self.root
    }
}

impl From<Table> for Document {
    fn from(root: Table) -> Self {
        Document::from_table(root)
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Table::deserialize(deserializer).map(Document::from_table)
    }
}
