//! Error types for record decoding and encoding.
//!
//! Every failure is reported through the closed [`Error`] enum. Variants carry
//! structured context (tag, schema position, offending text) so callers can
//! match on the kind of failure instead of parsing messages.
//!
//! ## Error Categories
//!
//! - **Target/source errors**: the value handed to the decoder or encoder is absent
//! - **Schema errors**: record length mismatch, unresolved tags
//! - **Shape errors**: duplicate tags, tags on embedded records
//! - **Coercion errors**: token text that does not parse as the slot's kind
//! - **Formatter errors**: a caller-supplied formatter refused the value
//!
//! ## Examples
//!
//! ```rust
//! use rowbind::{Decoder, Error};
//!
//! #[derive(Default)]
//! struct Point { x: i32, y: i32 }
//!
//! rowbind::impl_record! {
//!     Point {
//!         x: tag("x"),
//!         y: tag("y"),
//!     }
//! }
//!
//! let decoder = Decoder::new(["x", "y"]);
//! let mut point = Point::default();
//!
//! let err = decoder.decode(&["1"], &mut point).unwrap_err();
//! assert!(matches!(err, Error::LengthMismatch { fields: 2, values: 1 }));
//! ```

use crate::value::{Kind, Scalar};
use thiserror::Error;

/// Represents all possible errors that can occur while binding records.
///
/// Decoding and encoding are fail-fast: the first error aborts the call.
/// A decode that fails part-way may leave the target partially populated.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The decode target is absent (for example an `Option` holding `None`).
    #[error("decode target must be a present record, but got an empty {type_name}")]
    InvalidTarget { type_name: &'static str },

    /// The encode source is absent.
    #[error("encode source must be a present record, but got an empty {type_name}")]
    InvalidSource { type_name: &'static str },

    /// The token record does not have one value per schema field.
    #[error("amount of fields ({fields}) does not match amount of values passed in ({values})")]
    LengthMismatch { fields: usize, values: usize },

    /// A schema name has no tagged slot anywhere in the record.
    #[error("could not find field {tag:?} (schema position {position}) in record; make sure a slot carries this tag")]
    UnresolvedTag { tag: String, position: usize },

    /// Two slots in the flattened namespace declare the same tag.
    #[error("tag {tag:?} is declared twice, on {first} and on {second}")]
    DuplicateTag {
        tag: &'static str,
        first: String,
        second: String,
    },

    /// A tag was attached to an embedded record instead of a scalar slot.
    #[error("tag {tag:?} on embedded field {type_name}.{field} is not supported")]
    TagOnEmbedded {
        tag: &'static str,
        field: &'static str,
        type_name: &'static str,
    },

    /// The token text could not be converted into the slot's kind.
    #[error("error setting field {tag:?} at position {position} from value {text:?}: {source}")]
    Coerce {
        tag: String,
        position: usize,
        text: String,
        #[source]
        source: CoerceError,
    },

    /// The slot's kind has no coercion rule.
    #[error("field {tag:?} at position {position} has unsupported kind {kind}")]
    UnsupportedKind {
        tag: String,
        position: usize,
        kind: &'static str,
    },

    /// A custom formatter returned an error.
    #[error("custom formatter for field {tag:?} at position {position} failed: {message}")]
    Formatter {
        tag: String,
        position: usize,
        message: String,
    },

    /// Encoding tried to read a tag through an embedded reference that is not set.
    #[error("cannot read field {tag:?}: embedded record {field} is not set")]
    MissingRecord { tag: String, field: &'static str },

    /// A `Slot` implementation rejected a value of the kind it declared.
    #[error(
        "slot for field {tag:?} at position {position} rejected a {kind} value it declared it accepts"
    )]
    SlotMismatch {
        tag: String,
        position: usize,
        kind: Kind,
    },
}

/// Failure converting one token into one scalar value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("invalid {kind} value: {source}")]
    Int {
        kind: Scalar,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid {kind} value: {source}")]
    Float {
        kind: Scalar,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("couldn't understand value that should be a boolean field")]
    Bool,

    #[error("invalid RFC 3339 timestamp: {0}")]
    DateTime(#[source] chrono::ParseError),

    #[error("invalid big integer: {0}")]
    BigInt(#[source] num_bigint::ParseBigIntError),

    #[error("field kind not implemented: {0}")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
