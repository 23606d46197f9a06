/// Implements [`Record`](crate::Record), [`Fields`](crate::Fields) and
/// [`FieldsMut`](crate::FieldsMut) for a struct.
///
/// List the fields the mapper should see, in declaration order. Fields that
/// are left out are invisible to decoding and encoding.
///
/// - `field: tag("name")` binds a scalar or `Option<scalar>` field to the
///   schema name `"name"`.
/// - `field: embed(Child)` embeds a `Child` stored by value; its tags join
///   this record's namespace.
/// - `field: embed_ref(Child)` embeds an `Option<Child>` or `Option<Box<Child>>`;
///   decoding creates it with `Child::default()` when one of its tags is written.
///
/// # Examples
///
/// ```rust
/// use rowbind::{Decoder, Encoder};
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Audit { created_by: String }
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Order {
///     id: u64,
///     note: String,
///     audit: Option<Box<Audit>>,
/// }
///
/// rowbind::impl_record! { Audit { created_by: tag("created_by") } }
/// rowbind::impl_record! {
///     Order {
///         id: tag("id"),
///         audit: embed_ref(Audit),
///     }
/// }
///
/// let decoder = Decoder::new(["id", "created_by"]);
/// let mut order = Order::default();
/// decoder.decode(&["7", "ops"], &mut order).unwrap();
/// assert_eq!(order.audit.as_ref().unwrap().created_by, "ops");
///
/// let encoder = Encoder::new(["created_by", "id"]);
/// assert_eq!(encoder.encode(&order).unwrap(), vec!["ops", "7"]);
/// ```
#[macro_export]
macro_rules! impl_record {
    // Descriptor table entries
    (@shape $field:ident tag ($tag:literal)) => {
        $crate::FieldShape {
            name: stringify!($field),
            tag: ::core::option::Option::Some($tag),
            layout: $crate::Layout::Slot,
        }
    };
    (@shape $field:ident embed ($child:ty)) => {
        $crate::FieldShape {
            name: stringify!($field),
            tag: ::core::option::Option::None,
            layout: $crate::Layout::Embed(<$child as $crate::Record>::SHAPE),
        }
    };
    (@shape $field:ident embed_ref ($child:ty)) => {
        $crate::FieldShape {
            name: stringify!($field),
            tag: ::core::option::Option::None,
            layout: $crate::Layout::EmbedRef(<$child as $crate::Record>::SHAPE),
        }
    };

    // Shared accessors
    (@ref tag $e:expr) => {
        $crate::FieldRef::Slot(&$e)
    };
    (@ref embed $e:expr) => {
        $crate::FieldRef::Record(::core::option::Option::Some(&$e as &dyn $crate::Fields))
    };
    (@ref embed_ref $e:expr) => {
        $crate::FieldRef::Record($crate::EmbeddedRef::get(&$e))
    };

    // Mutable accessors
    (@mut tag $e:expr) => {
        $crate::FieldMut::Slot(&mut $e)
    };
    (@mut embed $e:expr) => {
        $crate::FieldMut::Record(&mut $e)
    };
    (@mut embed_ref $e:expr) => {
        $crate::FieldMut::Record($crate::EmbeddedRef::get_or_create(&mut $e))
    };

    ($ty:ty { $($field:ident : $how:ident ( $($arg:tt)* )),* $(,)? }) => {
        impl $crate::Record for $ty {
            const SHAPE: &'static $crate::Shape = &$crate::Shape {
                type_name: stringify!($ty),
                fields: &[
                    $( $crate::impl_record!(@shape $field $how ($($arg)*)) ),*
                ],
            };
        }

        impl $crate::Fields for $ty {
            fn shape(&self) -> &'static $crate::Shape {
                <Self as $crate::Record>::SHAPE
            }

            fn field(&self, name: &str) -> ::core::option::Option<$crate::FieldRef<'_>> {
                match name {
                    $(
                        stringify!($field) => ::core::option::Option::Some(
                            $crate::impl_record!(@ref $how self.$field)
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl $crate::FieldsMut for $ty {
            fn field_mut(&mut self, name: &str) -> ::core::option::Option<$crate::FieldMut<'_>> {
                match name {
                    $(
                        stringify!($field) => ::core::option::Option::Some(
                            $crate::impl_record!(@mut $how self.$field)
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}
