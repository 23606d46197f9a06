//! Records → token records.
//!
//! An [`Encoder`] holds a [`Schema`] and renders records into token rows,
//! one token per schema name. Formatting follows the built-in rules of
//! [`coerce::format`](crate::coerce::format) unless a custom formatter has
//! been registered for the tag.
//!
//! ## Usage
//!
//! ```rust
//! use rowbind::Encoder;
//!
//! #[derive(Default)]
//! struct Person {
//!     id: i64,
//!     age: Option<u32>,
//!     name: String,
//! }
//!
//! rowbind::impl_record! {
//!     Person {
//!         id: tag("id"),
//!         age: tag("age"),
//!         name: tag("name"),
//!     }
//! }
//!
//! let encoder = Encoder::new(["id", "age", "name"]);
//! let person = Person { id: 21, age: None, name: "Jane".to_string() };
//!
//! assert_eq!(encoder.encode(&person).unwrap(), vec!["21", "null", "Jane"]);
//! ```
//!
//! ## Custom formatters
//!
//! ```rust
//! use rowbind::{Encoder, Value};
//!
//! #[derive(Default)]
//! struct Item { name: String }
//!
//! rowbind::impl_record! { Item { name: tag("name") } }
//!
//! let encoder = Encoder::new(["name"]).with_formatter("name", |value: &Value| {
//!     let name = value.as_str().ok_or("expected a string")?;
//!     Ok(format!("custom_name_{}", name))
//! });
//!
//! let item = Item { name: "test1".to_string() };
//! assert_eq!(encoder.encode(&item).unwrap(), vec!["custom_name_test1"]);
//! ```

use crate::coerce;
use crate::error::{Error, Result};
use crate::index::{FieldIndex, FieldPath};
use crate::schema::Schema;
use crate::shape::{FieldRef, Fields};
use crate::slot::Slot;
use crate::value::{Kind, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Error type returned by custom formatters.
pub type FormatError = Box<dyn std::error::Error + Send + Sync>;

/// A caller-supplied formatter for one tag.
///
/// Receives the slot's current value ([`Value::Null`] for an absent optional)
/// and returns the token text.
pub type FormatFn = dyn Fn(&Value) -> std::result::Result<String, FormatError> + Send + Sync;

/// A value that can be encoded.
///
/// Implemented for every record, for references to records, and for
/// `Option` of a record. A `None` source is rejected with
/// [`Error::InvalidSource`].
pub trait Source {
    /// Borrows the record to read, or `None` if there is nothing to read.
    fn source(&self) -> Option<&dyn Fields>;

    /// Name of the source type for error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F: Fields> Source for F {
    fn source(&self) -> Option<&dyn Fields> {
        Some(self)
    }
}

impl<F: Fields> Source for Option<F> {
    fn source(&self) -> Option<&dyn Fields> {
        self.as_ref().map(|f| f as &dyn Fields)
    }
}

/// Encodes records into token records according to a fixed schema.
///
/// Encoders are immutable once built and may be shared across threads.
#[derive(Clone)]
pub struct Encoder {
    schema: Schema,
    formatters: HashMap<String, Arc<FormatFn>>,
}

impl Encoder {
    /// Creates an encoder producing columns named `fields`, in order.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Encoder::from(Schema::new(fields))
    }

    /// Registers a formatter for `tag`, replacing the built-in formatting for
    /// that column. Decoding the same tag is unaffected, and a slot of
    /// unsupported kind still fails with [`Error::UnsupportedKind`].
    #[must_use]
    pub fn with_formatter<F>(mut self, tag: impl Into<String>, formatter: F) -> Self
    where
        F: Fn(&Value) -> std::result::Result<String, FormatError> + Send + Sync + 'static,
    {
        self.formatters.insert(tag.into(), Arc::new(formatter));
        self
    }

    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns `true` if a custom formatter is registered for `tag`.
    #[inline]
    #[must_use]
    pub fn has_formatter(&self, tag: &str) -> bool {
        self.formatters.contains_key(tag)
    }

    /// Renders `source` as one token per schema name.
    ///
    /// `source` may be a record, a reference to one, or an `Option` of one;
    /// all produce the same output for the same field values.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSource`] if `source` is an empty `Option`
    /// - [`Error::DuplicateTag`] / [`Error::TagOnEmbedded`] if the source's shape is invalid
    /// - [`Error::UnresolvedTag`] if a schema name matches no slot
    /// - [`Error::MissingRecord`] if a slot sits behind an unset embedded reference
    /// - [`Error::UnsupportedKind`] if a slot has no coercion rule
    /// - [`Error::Formatter`] if a custom formatter fails
    pub fn encode<S: Source>(&self, source: S) -> Result<Vec<String>> {
        let record = source.source().ok_or(Error::InvalidSource {
            type_name: source.type_name(),
        })?;

        let index = FieldIndex::resolve(record.shape())?;
        let mut tokens = Vec::with_capacity(self.schema.len());

        for (position, tag) in self.schema.names().enumerate() {
            let path = index.get(tag).ok_or_else(|| Error::UnresolvedTag {
                tag: tag.to_string(),
                position,
            })?;

            let slot = slot_ref(record, path, tag, position)?;
            tokens.push(self.format(slot, tag, position)?);
            tracing::trace!(tag, position, "encoded field");
        }

        Ok(tokens)
    }

    // Unsupported slots have no value to hand a formatter, so they fail first.
    fn format(&self, slot: &dyn Slot, tag: &str, position: usize) -> Result<String> {
        if let Kind::Unsupported(kind) = slot.kind() {
            return Err(Error::UnsupportedKind {
                tag: tag.to_string(),
                position,
                kind,
            });
        }

        let value = slot.load();
        match self.formatters.get(tag) {
            Some(formatter) => formatter(&value).map_err(|e| Error::Formatter {
                tag: tag.to_string(),
                position,
                message: e.to_string(),
            }),
            None => Ok(coerce::format(&value)),
        }
    }
}

impl From<Schema> for Encoder {
    fn from(schema: Schema) -> Self {
        Encoder {
            schema,
            formatters: HashMap::new(),
        }
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatters: Vec<&str> = self.formatters.keys().map(String::as_str).collect();
        formatters.sort_unstable();
        f.debug_struct("Encoder")
            .field("schema", &self.schema)
            .field("formatters", &formatters)
            .finish()
    }
}

/// Walks `path` down from `record`. Unset embedded references are an error.
fn slot_ref<'a>(
    record: &'a dyn Fields,
    path: &FieldPath,
    tag: &str,
    position: usize,
) -> Result<&'a dyn Slot> {
    let mut current = record;
    for &step in path.parents() {
        current = match current.field(step) {
            Some(FieldRef::Record(Some(child))) => child,
            Some(FieldRef::Record(None)) => {
                return Err(Error::MissingRecord {
                    tag: tag.to_string(),
                    field: step,
                })
            }
            _ => return Err(broken_path(tag, position, path)),
        };
    }
    match current.field(path.leaf()) {
        Some(FieldRef::Slot(slot)) => Ok(slot),
        _ => Err(broken_path(tag, position, path)),
    }
}

fn broken_path(tag: &str, position: usize, path: &FieldPath) -> Error {
    tracing::debug!(tag, path = %path, "record accessors disagree with shape");
    Error::UnresolvedTag {
        tag: tag.to_string(),
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_encoder_is_shareable() {
        assert_send_sync::<Encoder>();
        assert_send_sync::<crate::Decoder>();
    }

    #[test]
    fn test_debug_lists_formatters() {
        let encoder = Encoder::new(["a", "b"])
            .with_formatter("b", |_: &Value| Ok(String::new()))
            .with_formatter("a", |_: &Value| Ok(String::new()));
        let debug = format!("{:?}", encoder);
        assert!(debug.contains(r#"formatters: ["a", "b"]"#), "{}", debug);
        assert!(encoder.has_formatter("a"));
        assert!(!encoder.has_formatter("c"));
    }
}
