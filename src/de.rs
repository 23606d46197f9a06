//! Token records → records.
//!
//! A [`Decoder`] holds a [`Schema`] and populates records from token rows.
//! Each call resolves the target's tags afresh, checks the row against the
//! schema, and then parses every token into the slot its schema name
//! resolves to.
//!
//! ## Usage
//!
//! ```rust
//! use rowbind::Decoder;
//!
//! #[derive(Default, Debug, PartialEq)]
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
//! let decoder = Decoder::new(["id", "age", "name"]);
//! let mut person = Person::default();
//! decoder.decode(&["21", "", "Jane"], &mut person).unwrap();
//!
//! assert_eq!(person, Person { id: 21, age: None, name: "Jane".to_string() });
//! ```
//!
//! ## Failure behaviour
//!
//! Decoding stops at the first error. Fields decoded before the failing one
//! keep their new values, and embedded references created on the way stay
//! attached; callers that need all-or-nothing semantics should decode into
//! a fresh value.

use crate::coerce;
use crate::error::{CoerceError, Error, Result};
use crate::index::{FieldIndex, FieldPath};
use crate::schema::Schema;
use crate::shape::{FieldMut, FieldsMut};
use crate::slot::Slot;

/// A value that can be decoded into.
///
/// Implemented for every record and for `Option` of a record. A `None`
/// target is rejected with [`Error::InvalidTarget`].
pub trait Target {
    /// Borrows the record to populate, or `None` if there is nothing to populate.
    fn target(&mut self) -> Option<&mut dyn FieldsMut>;

    /// Name of the target type for error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F: FieldsMut> Target for F {
    fn target(&mut self) -> Option<&mut dyn FieldsMut> {
        Some(self)
    }
}

impl<F: FieldsMut> Target for Option<F> {
    fn target(&mut self) -> Option<&mut dyn FieldsMut> {
        self.as_mut().map(|f| f as &mut dyn FieldsMut)
    }
}

/// Decodes token records into records according to a fixed schema.
///
/// A decoder holds no per-call state and may be shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    schema: Schema,
}

impl Decoder {
    /// Creates a decoder for records whose columns are named `fields`, in order.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Decoder {
            schema: Schema::new(fields),
        }
    }

    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Populates `target` from one token record.
    ///
    /// `values[i]` is parsed into the slot tagged `schema[i]`. Optional slots
    /// read `""` and `"null"` as absent.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTarget`] if `target` is an empty `Option`
    /// - [`Error::LengthMismatch`] if `values` and the schema differ in length
    /// - [`Error::DuplicateTag`] / [`Error::TagOnEmbedded`] if the target's shape is invalid
    /// - [`Error::UnresolvedTag`] if a schema name matches no slot
    /// - [`Error::Coerce`] / [`Error::UnsupportedKind`] if a token cannot be stored
    ///
    /// The target may be partially populated when an error is returned.
    pub fn decode<S, T>(&self, values: &[S], target: &mut T) -> Result<()>
    where
        S: AsRef<str>,
        T: Target + ?Sized,
    {
        let type_name = target.type_name();
        let record = target
            .target()
            .ok_or(Error::InvalidTarget { type_name })?;

        if values.len() != self.schema.len() {
            return Err(Error::LengthMismatch {
                fields: self.schema.len(),
                values: values.len(),
            });
        }

        let index = FieldIndex::resolve(record.shape())?;

        for (position, (tag, text)) in self.schema.names().zip(values).enumerate() {
            let text = text.as_ref();
            let path = index.get(tag).ok_or_else(|| Error::UnresolvedTag {
                tag: tag.to_string(),
                position,
            })?;

            let slot = slot_mut(&mut *record, path, tag, position)?;
            store(slot, tag, position, text)?;
            tracing::trace!(tag, position, "decoded field");
        }

        Ok(())
    }
}

impl From<Schema> for Decoder {
    fn from(schema: Schema) -> Self {
        Decoder { schema }
    }
}

/// Walks `path` down from `record`, creating unset embedded references.
fn slot_mut<'a>(
    record: &'a mut dyn FieldsMut,
    path: &FieldPath,
    tag: &str,
    position: usize,
) -> Result<&'a mut dyn Slot> {
    let mut current = record;
    for &step in path.parents() {
        current = match current.field_mut(step) {
            Some(FieldMut::Record(child)) => child,
            _ => return Err(broken_path(tag, position, path)),
        };
    }
    match current.field_mut(path.leaf()) {
        Some(FieldMut::Slot(slot)) => Ok(slot),
        _ => Err(broken_path(tag, position, path)),
    }
}

// The shape promised a field the accessor does not hand out.
fn broken_path(tag: &str, position: usize, path: &FieldPath) -> Error {
    tracing::debug!(tag, path = %path, "record accessors disagree with shape");
    Error::UnresolvedTag {
        tag: tag.to_string(),
        position,
    }
}

fn store(slot: &mut dyn Slot, tag: &str, position: usize, text: &str) -> Result<()> {
    let kind = slot.kind();
    let value = coerce::parse(kind, text).map_err(|source| match source {
        CoerceError::Unsupported(kind) => Error::UnsupportedKind {
            tag: tag.to_string(),
            position,
            kind,
        },
        source => Error::Coerce {
            tag: tag.to_string(),
            position,
            text: text.to_string(),
            source,
        },
    })?;

    slot.store(value).map_err(|_| Error::SlotMismatch {
        tag: tag.to_string(),
        position,
        kind,
    })
}
