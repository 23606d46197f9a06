//! Typed leaf slots of a record.
//!
//! A [`Slot`] is a single scalar field that a tag can point at. It reports its
//! [`Kind`], loads its current [`Value`] and stores a new one. Implementations
//! are provided for every supported scalar type and for `Option<_>` of each.
//!
//! Newtypes can take part by implementing `Slot` themselves:
//!
//! ```rust
//! use rowbind::{Kind, Scalar, Slot, Value};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Label(String);
//!
//! impl Slot for Label {
//!     fn kind(&self) -> Kind {
//!         Kind::Scalar(Scalar::String)
//!     }
//!
//!     fn load(&self) -> Value {
//!         Value::String(self.0.clone())
//!     }
//!
//!     fn store(&mut self, value: Value) -> Result<(), Value> {
//!         match value {
//!             Value::String(s) => {
//!                 self.0 = s;
//!                 Ok(())
//!             }
//!             other => Err(other),
//!         }
//!     }
//! }
//!
//! let mut label = Label::default();
//! label.store(Value::from("hello")).unwrap();
//! assert_eq!(label, Label("hello".to_string()));
//! ```

use crate::value::{Kind, Scalar, Value};
use chrono::{DateTime, FixedOffset, Utc};
use num_bigint::BigInt;

/// A scalar field that the decoder can write and the encoder can read.
pub trait Slot {
    /// The kind of value this slot holds.
    fn kind(&self) -> Kind;

    /// Returns the current value. Absent optionals load as [`Value::Null`].
    fn load(&self) -> Value;

    /// Replaces the current value.
    ///
    /// Optional slots accept [`Value::Null`]. A value of the wrong kind is
    /// handed back unchanged in the `Err` variant.
    fn store(&mut self, value: Value) -> Result<(), Value>;
}

macro_rules! impl_scalar_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Slot for $ty {
                #[inline]
                fn kind(&self) -> Kind {
                    Kind::Scalar(Scalar::$variant)
                }

                fn load(&self) -> Value {
                    Value::$variant(self.clone())
                }

                fn store(&mut self, value: Value) -> Result<(), Value> {
                    match value {
                        Value::$variant(v) => {
                            *self = v;
                            Ok(())
                        }
                        other => Err(other),
                    }
                }
            }

            impl Slot for Option<$ty> {
                #[inline]
                fn kind(&self) -> Kind {
                    Kind::Optional(Scalar::$variant)
                }

                fn load(&self) -> Value {
                    match self {
                        Some(v) => Value::$variant(v.clone()),
                        None => Value::Null,
                    }
                }

                fn store(&mut self, value: Value) -> Result<(), Value> {
                    match value {
                        Value::Null => {
                            *self = None;
                            Ok(())
                        }
                        Value::$variant(v) => {
                            *self = Some(v);
                            Ok(())
                        }
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_scalar_slot! {
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

impl Slot for DateTime<Utc> {
    fn kind(&self) -> Kind {
        Kind::Scalar(Scalar::DateTime)
    }

    fn load(&self) -> Value {
        Value::DateTime(self.fixed_offset())
    }

    fn store(&mut self, value: Value) -> Result<(), Value> {
        match value {
            Value::DateTime(dt) => {
                *self = dt.with_timezone(&Utc);
                Ok(())
            }
            other => Err(other),
        }
    }
}

impl Slot for Option<DateTime<Utc>> {
    fn kind(&self) -> Kind {
        Kind::Optional(Scalar::DateTime)
    }

    fn load(&self) -> Value {
        self.map_or(Value::Null, |dt| Value::DateTime(dt.fixed_offset()))
    }

    fn store(&mut self, value: Value) -> Result<(), Value> {
        match value {
            Value::Null => {
                *self = None;
                Ok(())
            }
            Value::DateTime(dt) => {
                *self = Some(dt.with_timezone(&Utc));
                Ok(())
            }
            other => Err(other),
        }
    }
}

/// Sequences have no token representation; tagging one is reported as an
/// unsupported kind when the slot is decoded or encoded, custom formatter or not.
impl<T> Slot for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::Unsupported(std::any::type_name::<Self>())
    }

    fn load(&self) -> Value {
        Value::Null
    }

    fn store(&mut self, value: Value) -> Result<(), Value> {
        Err(value)
    }
}
