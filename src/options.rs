//! Configuration options for TOML serialization.
//!
//! [`TomlOptions`] controls the layout decisions the serializer makes on top of the
//! per-value rules: how far multi-line array elements are indented, how many entries
//! a table may have and still be written inline, and whether blank-line padding
//! recorded on values is reproduced.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{parse, to_string_with_options, TomlOptions};
//!
//! let doc = parse("point = { x = 1, y = 2 }\n").unwrap();
//!
//! // Force every table with two or more entries into its own section.
//! let options = TomlOptions::new().with_inline_table_threshold(2);
//! let toml = to_string_with_options(&doc, &options).unwrap();
//! assert_eq!(toml, "[point]\nx = 1\ny = 2\n");
//! ```

use crate::table::DEFAULT_INLINE_TABLE_THRESHOLD;

/// Configuration options for TOML serialization.
///
/// # Examples
///
/// ```rust
/// use toml_tree::TomlOptions;
///
/// // Defaults: 4-space indent, inline below 4 entries, padding kept
/// let options = TomlOptions::new();
///
/// // Same layout rules, no blank lines reproduced
/// let options = TomlOptions::compact();
///
/// // Custom configuration
/// let options = TomlOptions::new()
///     .with_indent(2)
///     .with_inline_table_threshold(8)
///     .with_preserve_padding(false);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TomlOptions {
    pub indent: usize,
    pub inline_table_threshold: usize,
    pub preserve_padding: bool,
}

impl Default for TomlOptions {
    fn default() -> Self {
        TomlOptions {
            indent: 4,
            inline_table_threshold: DEFAULT_INLINE_TABLE_THRESHOLD,
            preserve_padding: true,
        }
    }
}

impl TomlOptions {
    /// Creates default options (4-space indent, inline threshold of 4, padding kept).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::TomlOptions;
    ///
    /// let options = TomlOptions::new();
    /// assert_eq!(options.indent, 4);
    /// assert_eq!(options.inline_table_threshold, 4);
    /// assert!(options.preserve_padding);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that drop recorded blank-line padding.
    ///
    /// Sections are still separated by one blank line.
    #[must_use]
    pub fn compact() -> Self {
        TomlOptions {
            preserve_padding: false,
            ..Default::default()
        }
    }

    /// Sets the indentation (in spaces) of elements in multi-line arrays.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::TomlOptions;
    ///
    /// let options = TomlOptions::new().with_indent(2);
    /// assert_eq!(options.indent, 2);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the entry count at which tables stop rendering inline. A threshold of
    /// zero expands every table.
    #[must_use]
    pub fn with_inline_table_threshold(mut self, threshold: usize) -> Self {
        self.inline_table_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_preserve_padding(mut self, preserve: bool) -> Self {
        self.preserve_padding = preserve;
        self
    }
}
