//! String ⇄ scalar conversion.
//!
//! [`parse`] turns one token into a [`Value`] of the requested [`Kind`];
//! [`format`] turns a `Value` back into token text. Both are pure functions
//! with no configuration: the decoder and encoder call them for every slot
//! that has no custom formatter.
//!
//! ## Conversion rules
//!
//! | Kind | Parse | Format |
//! |------|-------|--------|
//! | String | identity | identity |
//! | Integers | base 10, range-checked for the width | base 10 |
//! | Floats | decimal or scientific | shortest round-trip digits, exponent form below `1e-7` or from `1e21` |
//! | Bool | `true`/`yes`/`1`/`1.0`, `false`/`no`/`0`/`0.0` (any case) | `true`/`false` |
//! | DateTime | RFC 3339, signed years beyond `0000..=9999` | RFC 3339 (`Z` for UTC) |
//! | BigInt | base 10 | base 10 |
//! | Optional | `""`/`"null"` → absent, else the wrapped kind | absent → `"null"` |
//!
//! ## Examples
//!
//! ```rust
//! use rowbind::coerce::{format, parse};
//! use rowbind::{Kind, Scalar, Value};
//!
//! assert_eq!(parse(Kind::Scalar(Scalar::U8), "200").unwrap(), Value::U8(200));
//! assert!(parse(Kind::Scalar(Scalar::U8), "300").is_err());
//!
//! assert_eq!(parse(Kind::Optional(Scalar::U8), "").unwrap(), Value::Null);
//! assert_eq!(format(&Value::Null), "null");
//! ```

use crate::error::CoerceError;
use crate::value::{Kind, Scalar, Value, NULL};
use chrono::{DateTime, FixedOffset};
use num_bigint::BigInt;
use std::str::FromStr;

/// Parses `text` as a value of `kind`.
///
/// # Errors
///
/// Returns [`CoerceError::Unsupported`] for kinds without a coercion rule and
/// the matching parse error when the text is not a valid value of the kind.
pub fn parse(kind: Kind, text: &str) -> Result<Value, CoerceError> {
    match kind {
        Kind::Scalar(scalar) => parse_scalar(scalar, text),
        Kind::Optional(_) if is_absent(text) => Ok(Value::Null),
        Kind::Optional(scalar) => parse_scalar(scalar, text),
        Kind::Unsupported(name) => Err(CoerceError::Unsupported(name)),
    }
}

/// Formats `value` as token text.
#[inline]
#[must_use]
pub fn format(value: &Value) -> String {
    value.to_string()
}

/// Returns `true` for the texts an optional slot reads as absent.
#[inline]
#[must_use]
pub fn is_absent(text: &str) -> bool {
    text.is_empty() || text == NULL
}

/// Parses `text` as a required value of `scalar`.
///
/// # Errors
///
/// Returns the parse error for the scalar kind.
pub fn parse_scalar(scalar: Scalar, text: &str) -> Result<Value, CoerceError> {
    let value = match scalar {
        Scalar::String => Value::String(text.to_string()),
        Scalar::Bool => Value::Bool(parse_bool(text)?),
        Scalar::I8 => Value::I8(parse_int(scalar, text)?),
        Scalar::I16 => Value::I16(parse_int(scalar, text)?),
        Scalar::I32 => Value::I32(parse_int(scalar, text)?),
        Scalar::I64 => Value::I64(parse_int(scalar, text)?),
        Scalar::Isize => Value::Isize(parse_int(scalar, text)?),
        Scalar::U8 => Value::U8(parse_int(scalar, text)?),
        Scalar::U16 => Value::U16(parse_int(scalar, text)?),
        Scalar::U32 => Value::U32(parse_int(scalar, text)?),
        Scalar::U64 => Value::U64(parse_int(scalar, text)?),
        Scalar::Usize => Value::Usize(parse_int(scalar, text)?),
        Scalar::F32 => Value::F32(parse_float(scalar, text)?),
        Scalar::F64 => Value::F64(parse_float(scalar, text)?),
        Scalar::DateTime => Value::DateTime(parse_datetime(text)?),
        Scalar::BigInt => Value::BigInt(BigInt::from_str(text).map_err(CoerceError::BigInt)?),
    };
    Ok(value)
}

/// Parses the accepted boolean spellings, ignoring ASCII case.
///
/// # Errors
///
/// Returns [`CoerceError::Bool`] for any other text.
pub fn parse_bool(text: &str) -> Result<bool, CoerceError> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "1.0" => Ok(true),
        "false" | "no" | "0" | "0.0" => Ok(false),
        _ => Err(CoerceError::Bool),
    }
}

/// Parses RFC 3339 text. Years outside `0000..=9999` are written with an
/// explicit sign (`+10000-01-01T00:00:00Z`), which RFC 3339 itself cannot
/// express, so signed text falls back to chrono's relaxed ISO 8601 reader.
fn parse_datetime(text: &str) -> Result<DateTime<FixedOffset>, CoerceError> {
    DateTime::parse_from_rfc3339(text).or_else(|err| {
        if text.starts_with(['+', '-']) {
            DateTime::parse_from_str(text, "%+").map_err(|_| CoerceError::DateTime(err))
        } else {
            Err(CoerceError::DateTime(err))
        }
    })
}

fn parse_int<T>(kind: Scalar, text: &str) -> Result<T, CoerceError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    text.parse::<T>()
        .map_err(|source| CoerceError::Int { kind, source })
}

fn parse_float<T>(kind: Scalar, text: &str) -> Result<T, CoerceError>
where
    T: FromStr<Err = std::num::ParseFloatError>,
{
    text.parse::<T>()
        .map_err(|source| CoerceError::Float { kind, source })
}
