//! Dynamic scalar values and the kinds that describe them.
//!
//! A [`Value`] is what flows between a record's slots and the coercion layer:
//! the decoder parses token text into a `Value` and stores it in a slot, the
//! encoder loads a `Value` from a slot and formats it back into text.
//!
//! ## Core Types
//!
//! - [`Scalar`]: the closed set of scalar kinds that have coercion rules
//! - [`Kind`]: what a slot holds (a scalar, an optional scalar, or something unsupported)
//! - [`Value`]: a dynamically-typed scalar, or `Null` for an absent optional
//!
//! ## Examples
//!
//! ```rust
//! use rowbind::{Value, Scalar};
//!
//! let value = Value::from(42_i64);
//! assert_eq!(value.scalar(), Some(Scalar::I64));
//! assert_eq!(value.as_i64(), Some(42));
//! assert_eq!(value.to_string(), "42");
//!
//! assert!(Value::Null.is_null());
//! assert_eq!(Value::Null.to_string(), "null");
//! ```

use chrono::{DateTime, FixedOffset, SecondsFormat};
use num_bigint::BigInt;
use std::fmt;

/// Literal used for an absent optional value.
pub const NULL: &str = "null";

/// The scalar kinds that can be parsed from and formatted to a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scalar {
    String,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    DateTime,
    BigInt,
}

impl Scalar {
    /// Returns the Rust-facing name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Scalar::String => "string",
            Scalar::Bool => "bool",
            Scalar::I8 => "i8",
            Scalar::I16 => "i16",
            Scalar::I32 => "i32",
            Scalar::I64 => "i64",
            Scalar::Isize => "isize",
            Scalar::U8 => "u8",
            Scalar::U16 => "u16",
            Scalar::U32 => "u32",
            Scalar::U64 => "u64",
            Scalar::Usize => "usize",
            Scalar::F32 => "f32",
            Scalar::F64 => "f64",
            Scalar::DateTime => "datetime",
            Scalar::BigInt => "bigint",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a slot holds, as reported by [`Slot::kind`](crate::Slot::kind).
///
/// # Examples
///
/// ```rust
/// use rowbind::{Kind, Scalar, Slot};
///
/// assert_eq!(5_u32.kind(), Kind::Scalar(Scalar::U32));
/// assert_eq!(None::<u32>.kind(), Kind::Optional(Scalar::U32));
/// assert!(Vec::<u8>::new().kind().is_unsupported());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A required scalar.
    Scalar(Scalar),
    /// A scalar that may be absent; decodes `""`/`"null"` as `None`, encodes `None` as `"null"`.
    Optional(Scalar),
    /// A slot with no coercion rule. Carries a description of the offending type.
    Unsupported(&'static str),
}

impl Kind {
    /// Returns the wrapped scalar kind, if any.
    #[inline]
    #[must_use]
    pub const fn scalar(&self) -> Option<Scalar> {
        match self {
            Kind::Scalar(s) | Kind::Optional(s) => Some(*s),
            Kind::Unsupported(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Kind::Optional(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Kind::Unsupported(_))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Scalar(s) => write!(f, "{}", s),
            Kind::Optional(s) => write!(f, "optional {}", s),
            Kind::Unsupported(name) => f.write_str(name),
        }
    }
}

/// A dynamically-typed scalar value.
///
/// Each variant corresponds to one [`Scalar`] kind; `Null` stands for an
/// absent optional value.
///
/// # Examples
///
/// ```rust
/// use rowbind::Value;
///
/// let name = Value::from("Jane");
/// assert_eq!(name.as_str(), Some("Jane"));
/// assert!(!name.is_null());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    String(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    DateTime(DateTime<FixedOffset>),
    BigInt(BigInt),
}

impl Value {
    /// Returns the scalar kind of this value, or `None` for `Null`.
    #[must_use]
    pub const fn scalar(&self) -> Option<Scalar> {
        Some(match self {
            Value::Null => return None,
            Value::String(_) => Scalar::String,
            Value::Bool(_) => Scalar::Bool,
            Value::I8(_) => Scalar::I8,
            Value::I16(_) => Scalar::I16,
            Value::I32(_) => Scalar::I32,
            Value::I64(_) => Scalar::I64,
            Value::Isize(_) => Scalar::Isize,
            Value::U8(_) => Scalar::U8,
            Value::U16(_) => Scalar::U16,
            Value::U32(_) => Scalar::U32,
            Value::U64(_) => Scalar::U64,
            Value::Usize(_) => Scalar::Usize,
            Value::F32(_) => Scalar::F32,
            Value::F64(_) => Scalar::F64,
            Value::DateTime(_) => Scalar::DateTime,
            Value::BigInt(_) => Scalar::BigInt,
        })
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a signed or unsigned integer that fits in `i64`, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowbind::Value;
    ///
    /// assert_eq!(Value::U8(7).as_i64(), Some(7));
    /// assert_eq!(Value::U64(u64::MAX).as_i64(), None);
    /// assert_eq!(Value::from("7").as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I8(v) => Some(i64::from(*v)),
            Value::I16(v) => Some(i64::from(*v)),
            Value::I32(v) => Some(i64::from(*v)),
            Value::I64(v) => Some(*v),
            Value::Isize(v) => i64::try_from(*v).ok(),
            Value::U8(v) => Some(i64::from(*v)),
            Value::U16(v) => Some(i64::from(*v)),
            Value::U32(v) => Some(i64::from(*v)),
            Value::U64(v) => i64::try_from(*v).ok(),
            Value::Usize(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// If the value is a float, returns it widened to `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(v) => Some(f64::from(*v)),
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// If the value is a timestamp, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is a big integer, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(bi) => Some(bi),
            _ => None,
        }
    }
}

/// Renders the token text for this value, exactly as the encoder emits it.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str(NULL),
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::Isize(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::Usize(v) => write!(f, "{}", v),
            Value::F32(v) => write_float(f, *v, f64::from(v.abs())),
            Value::F64(v) => write_float(f, *v, v.abs()),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::BigInt(bi) => write!(f, "{}", bi),
        }
    }
}

/// Writes the shortest digits that parse back to the same bits. Magnitudes
/// at or above `1e21` or below `1e-7` use exponent form (`1e300`, `2.5e-8`).
fn write_float<T>(f: &mut fmt::Formatter<'_>, v: T, magnitude: f64) -> fmt::Result
where
    T: fmt::Display + fmt::LowerExp,
{
    if magnitude != 0.0 && (magnitude >= 1e21 || magnitude < 1e-7) {
        write!(f, "{:e}", v)
    } else {
        write!(f, "{}", v)
    }
}

macro_rules! impl_from_for_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from_for_value! {
    String => String,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    DateTime<FixedOffset> => DateTime,
    BigInt => BigInt,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
