//! # rowbind
//!
//! Binds flat records of string tokens (rows of tabular text data) to
//! structured Rust values, in both directions.
//!
//! ## What does it do?
//!
//! A [`Schema`] names the columns of a row. Each scalar field of a record
//! carries a *tag*, the name of the column it belongs to. The
//! [`Decoder`] parses row tokens into the tagged fields and the
//! [`Encoder`] renders tagged fields back into tokens.
//!
//! Splitting lines into tokens (delimiters, quoting, escaping) is left to
//! whatever reader or writer produces the rows.
//!
//! ## Key Features
//!
//! - **Embedded records**: tags of embedded records join the parent's
//!   namespace, at any depth. Records embedded behind `Option<Box<_>>` are
//!   created on demand while decoding.
//! - **Optional fields**: `Option<T>` reads `""` and `"null"` as `None` and
//!   writes `None` as `"null"`.
//! - **Checked tags**: duplicate tags and tags on embedded records are
//!   rejected before any value is touched.
//! - **Custom formatters**: per-column overrides on the encoding side.
//! - **No reflection**: records describe themselves through static
//!   descriptor tables generated by [`impl_record!`].
//!
//! ## Quick Start
//!
//! ```rust
//! use rowbind::{Decoder, Encoder};
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
//! decoder.decode(&["20", "null", "John"], &mut person).unwrap();
//! assert_eq!(person, Person { id: 20, age: None, name: "John".to_string() });
//!
//! let encoder = Encoder::new(["name", "id"]);
//! assert_eq!(encoder.encode(&person).unwrap(), vec!["John", "20"]);
//! ```
//!
//! ## Supported field types
//!
//! | Rust type | Token text |
//! |---|---|
//! | `String` | as is |
//! | `bool` | `true`/`yes`/`1`/`1.0` and `false`/`no`/`0`/`0.0`, any case; written as `true`/`false` |
//! | `i8` … `i64`, `isize`, `u8` … `u64`, `usize` | base 10, range checked |
//! | `f32`, `f64` | decimal or scientific; written with the shortest round-trip digits, in exponent form for extreme magnitudes |
//! | `DateTime<FixedOffset>`, `DateTime<Utc>` | RFC 3339 |
//! | `BigInt` | base 10 |
//! | `Option<T>` of any of the above | `""` or `"null"` for `None` |
//!
//! Other field types can take part by implementing [`Slot`].
//!
//! ## Logging
//!
//! Resolution and per-field progress are reported through `tracing` at
//! `debug` and `trace` level. Install a subscriber to see them.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - decoding and encoding a flat record
//! - **`embedded.rs`** - embedded records, by value and by reference
//! - **`custom_formatter.rs`** - per-column formatting overrides
//!
//! Run any of them with: `cargo run --example <name>`

pub mod coerce;
pub mod de;
pub mod error;
pub mod index;
pub mod macros;
pub mod schema;
pub mod ser;
pub mod shape;
pub mod slot;
pub mod value;

pub use de::{Decoder, Target};
pub use error::{CoerceError, Error, Result};
pub use index::{FieldIndex, FieldPath};
pub use schema::Schema;
pub use ser::{Encoder, FormatError, FormatFn, Source};
pub use shape::{EmbeddedRef, FieldMut, FieldRef, FieldShape, Fields, FieldsMut, Layout, Record, Shape};
pub use slot::Slot;
pub use value::{Kind, Scalar, Value, NULL};

/// Decodes one token record into a fresh `R`.
///
/// Shorthand for building a [`Decoder`] and decoding into `R::default()`.
///
/// # Examples
///
/// ```rust
/// #[derive(Default, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// rowbind::impl_record! { Point { x: tag("x"), y: tag("y") } }
///
/// let point: Point = rowbind::from_record(["y", "x"], &["2", "1"]).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns any error [`Decoder::decode`] can return.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_record<R, I, S, V>(fields: I, values: &[V]) -> Result<R>
where
    R: Record + Default,
    I: IntoIterator<Item = S>,
    S: Into<String>,
    V: AsRef<str>,
{
    let mut record = R::default();
    Decoder::new(fields).decode(values, &mut record)?;
    Ok(record)
}

/// Encodes `source` into one token record.
///
/// Shorthand for building an [`Encoder`] without custom formatters.
///
/// # Examples
///
/// ```rust
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
///
/// rowbind::impl_record! { Point { x: tag("x"), y: tag("y") } }
///
/// let tokens = rowbind::to_record(["x", "y"], &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(tokens, vec!["1", "2"]);
/// ```
///
/// # Errors
///
/// Returns any error [`Encoder::encode`] can return.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_record<I, S, T>(fields: I, source: T) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    T: Source,
{
    Encoder::new(fields).encode(source)
}
