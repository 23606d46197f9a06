//! Static descriptor tables and dynamic accessors for records.
//!
//! A record type describes itself twice:
//!
//! - statically, through a [`Shape`]: the ordered list of its fields, the tag
//!   each scalar field carries and which fields embed another record;
//! - dynamically, through [`Fields`] / [`FieldsMut`]: given a field name, hand
//!   out a reference to that field as a [`Slot`] or as an embedded record.
//!
//! The field resolver walks shapes only, so duplicate or misplaced tags are
//! found even inside embedded references that are currently unset. The
//! decoder and encoder then follow resolved paths through the accessors.
//!
//! Implementations are normally generated with [`impl_record!`](crate::impl_record).
//! Writing one by hand looks like this:
//!
//! ```rust
//! use rowbind::{FieldMut, FieldRef, FieldShape, Fields, FieldsMut, Layout, Record, Shape};
//!
//! #[derive(Default)]
//! struct Point { x: i32, y: i32 }
//!
//! impl Record for Point {
//!     const SHAPE: &'static Shape = &Shape {
//!         type_name: "Point",
//!         fields: &[
//!             FieldShape { name: "x", tag: Some("x"), layout: Layout::Slot },
//!             FieldShape { name: "y", tag: Some("y"), layout: Layout::Slot },
//!         ],
//!     };
//! }
//!
//! impl Fields for Point {
//!     fn shape(&self) -> &'static Shape {
//!         Self::SHAPE
//!     }
//!
//!     fn field(&self, name: &str) -> Option<FieldRef<'_>> {
//!         match name {
//!             "x" => Some(FieldRef::Slot(&self.x)),
//!             "y" => Some(FieldRef::Slot(&self.y)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! impl FieldsMut for Point {
//!     fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
//!         match name {
//!             "x" => Some(FieldMut::Slot(&mut self.x)),
//!             "y" => Some(FieldMut::Slot(&mut self.y)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let point = Point { x: 1, y: 2 };
//! assert_eq!(rowbind::to_record(["y", "x"], &point).unwrap(), vec!["2", "1"]);
//! ```

use crate::slot::Slot;

/// Static description of a record type.
#[derive(Debug)]
pub struct Shape {
    /// Type name used in error messages.
    pub type_name: &'static str,
    /// Fields in declaration order.
    pub fields: &'static [FieldShape],
}

impl Shape {
    /// Looks up a declared field by its Rust name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldShape> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Counts tagged slots, including those of embedded records. For a valid
    /// shape this is the number of tags its [`FieldIndex`](crate::FieldIndex) holds.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.fields
            .iter()
            .map(|f| match f.layout {
                Layout::Slot => usize::from(f.tag.is_some()),
                Layout::Embed(child) | Layout::EmbedRef(child) => child.slot_count(),
            })
            .sum()
    }
}

/// Static description of one field.
#[derive(Debug)]
pub struct FieldShape {
    /// Rust field name, used to address the field through [`Fields::field`].
    pub name: &'static str,
    /// External name used in the schema. Untagged scalar fields are not listed
    /// at all, so `None` only appears on embedded records.
    pub tag: Option<&'static str>,
    pub layout: Layout,
}

/// How a field is laid out.
#[derive(Debug, Clone, Copy)]
pub enum Layout {
    /// A scalar or optional scalar, exposed as a [`Slot`].
    Slot,
    /// A record stored by value; its tags join the parent's namespace.
    Embed(&'static Shape),
    /// A record stored behind an optional reference (`Option<Box<T>>`);
    /// created on first write during decode.
    EmbedRef(&'static Shape),
}

impl Layout {
    /// Returns the embedded record's shape, if this field embeds one.
    #[inline]
    #[must_use]
    pub const fn embedded(&self) -> Option<&'static Shape> {
        match self {
            Layout::Slot => None,
            Layout::Embed(shape) | Layout::EmbedRef(shape) => Some(shape),
        }
    }
}

/// A record type with a static descriptor table.
pub trait Record: FieldsMut {
    const SHAPE: &'static Shape;
}

/// Read access to a record's fields by name.
pub trait Fields {
    /// The descriptor table of the concrete type.
    fn shape(&self) -> &'static Shape;

    /// Returns the named field, or `None` if the record declares no such field.
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;
}

/// Write access to a record's fields by name.
pub trait FieldsMut: Fields {
    /// Returns the named field for writing.
    ///
    /// Embedded references that are unset are created with their `Default`
    /// value before being returned.
    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>>;
}

/// A borrowed field.
pub enum FieldRef<'a> {
    Slot(&'a dyn Slot),
    /// An embedded record; `None` for an unset embedded reference.
    Record(Option<&'a dyn Fields>),
}

/// A mutably borrowed field.
pub enum FieldMut<'a> {
    Slot(&'a mut dyn Slot),
    Record(&'a mut dyn FieldsMut),
}

impl<F: Fields + ?Sized> Fields for &F {
    fn shape(&self) -> &'static Shape {
        (**self).shape()
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        (**self).field(name)
    }
}

impl<F: Fields + ?Sized> Fields for &mut F {
    fn shape(&self) -> &'static Shape {
        (**self).shape()
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        (**self).field(name)
    }
}

impl<F: FieldsMut + ?Sized> FieldsMut for &mut F {
    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        (**self).field_mut(name)
    }
}

impl<F: Fields + ?Sized> Fields for Box<F> {
    fn shape(&self) -> &'static Shape {
        (**self).shape()
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        (**self).field(name)
    }
}

impl<F: FieldsMut + ?Sized> FieldsMut for Box<F> {
    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        (**self).field_mut(name)
    }
}

/// Helpers used by [`impl_record!`](crate::impl_record) to expose embedded
/// references. Implemented for `Option<T>` where `T` is a record (including
/// `Option<Box<T>>`).
pub trait EmbeddedRef {
    /// Borrows the embedded record if it is set.
    fn get(&self) -> Option<&dyn Fields>;

    /// Borrows the embedded record mutably, creating it first if unset.
    fn get_or_create(&mut self) -> &mut dyn FieldsMut;
}

impl<T> EmbeddedRef for Option<T>
where
    T: FieldsMut + Default,
{
    fn get(&self) -> Option<&dyn Fields> {
        self.as_ref().map(|r| r as &dyn Fields)
    }

    fn get_or_create(&mut self) -> &mut dyn FieldsMut {
        if self.is_none() {
            tracing::debug!(
                record = std::any::type_name::<T>(),
                "materializing embedded record"
            );
        }
        self.get_or_insert_with(T::default)
    }
}
