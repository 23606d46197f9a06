//! Ordered field names of a record.
//!
//! A [`Schema`] fixes the column order of the token records a
//! [`Decoder`](crate::Decoder) reads and an [`Encoder`](crate::Encoder)
//! writes. Position `i` of every record belongs to the slot tagged
//! `schema[i]`.
//!
//! Schemas serialize as a plain list of names, so they can live in any
//! serde-backed configuration file:
//!
//! ```rust
//! use rowbind::Schema;
//!
//! let schema: Schema = serde_json::from_str(r#"["id", "age", "name"]"#).unwrap();
//! assert_eq!(schema.len(), 3);
//! assert_eq!(schema.position("name"), Some(2));
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Index;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Vec<String>);

impl Schema {
    /// Creates a schema from field names, in column order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowbind::Schema;
    ///
    /// let schema = Schema::new(["id", "name"]);
    /// assert_eq!(schema.names().collect::<Vec<_>>(), vec!["id", "name"]);
    /// ```
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema(fields.into_iter().map(Into::into).collect())
    }

    /// Creates a schema from a header row, trimming surrounding whitespace
    /// from each cell.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowbind::Schema;
    ///
    /// let schema = Schema::from_header(&[" id", "name "]);
    /// assert_eq!(schema, Schema::new(["id", "name"]));
    /// ```
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        Schema(header.iter().map(|s| s.as_ref().trim().to_string()).collect())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the name at `position`.
    #[inline]
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&str> {
        self.0.get(position).map(String::as_str)
    }

    /// Returns the column position of `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }

    /// Field names in column order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Index<usize> for Schema {
    type Output = str;

    fn index(&self, position: usize) -> &str {
        &self.0[position]
    }
}

impl From<Vec<String>> for Schema {
    fn from(fields: Vec<String>) -> Self {
        Schema(fields)
    }
}

impl<'a> From<&'a [&'a str]> for Schema {
    fn from(fields: &'a [&'a str]) -> Self {
        Schema::new(fields.iter().copied())
    }
}

impl<S: Into<String>> FromIterator<S> for Schema {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Schema::new(iter)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
