use crate::{Binary, Value};
use rust_decimal::Decimal;
use std::{borrow::Cow, rc::Rc, sync::Arc};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion from native Rust types into the dynamically typed [`Value`] that backs
/// statement parameters.
///
/// The variant picked here decides how the parameter travels: [`Value::Blob`] is sent in
/// binary form, every other variant is rendered as text. This is what replaces overload
/// resolution, the caller never passes a "binary" flag at runtime.
///
/// # Implementing `AsValue` for custom types
/// Pick the variant whose textual rendering the server understands for the column type,
/// usually `Value::Varchar` for enumerations or domain types:
/// ```rust
/// use lazyprep_core::{AsValue, Value};
///
/// enum Status {
///     Active,
///     Inactive,
/// }
///
/// impl AsValue for Status {
///     fn as_empty_value() -> Value {
///         Value::Varchar(None)
///     }
///     fn as_value(self) -> Value {
///         Value::Varchar(Some(
///             match self {
///                 Status::Active => "active",
///                 Status::Inactive => "inactive",
///             }
///             .into(),
///         ))
///     }
/// }
///
/// assert_eq!(Status::Active.as_value(), Value::Varchar(Some("active".into())));
/// ```
pub trait AsValue {
    /// The NULL of this type. Used by `Option::None` and for the element type of lists.
    fn as_empty_value() -> Value;
    /// Convert this value into its owned [`Value`] representation.
    fn as_value(self) -> Value;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self as _))
            }
        }
    };
}
impl_as_value!(i8, Value::Int8);
impl_as_value!(i16, Value::Int16);
impl_as_value!(i32, Value::Int32);
impl_as_value!(i64, Value::Int64);
impl_as_value!(i128, Value::Int128);
impl_as_value!(isize, Value::Int64);
impl_as_value!(u8, Value::UInt8);
impl_as_value!(u16, Value::UInt16);
impl_as_value!(u32, Value::UInt32);
impl_as_value!(u64, Value::UInt64);
impl_as_value!(u128, Value::UInt128);
impl_as_value!(usize, Value::UInt64);
impl_as_value!(f32, Value::Float32);
impl_as_value!(f64, Value::Float64);

macro_rules! impl_as_value {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
        }
    };
}
impl_as_value!(bool, Value::Boolean);
impl_as_value!(char, Value::Char);
impl_as_value!(String, Value::Varchar);
impl_as_value!(&str, Value::Varchar);
impl_as_value!(Decimal, Value::Decimal);
impl_as_value!(Date, Value::Date);
impl_as_value!(Time, Value::Time);
impl_as_value!(PrimitiveDateTime, Value::Timestamp);
impl_as_value!(OffsetDateTime, Value::TimestampWithTimezone);
impl_as_value!(Uuid, Value::Uuid);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(&[u8], Value::Blob);

impl<'a> AsValue for Cow<'a, str> {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.into()))
    }
}

impl AsValue for Binary {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.0))
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_empty_value() -> Value {
        Value::List(None, Box::new(T::as_empty_value()))
    }
    fn as_value(self) -> Value {
        Value::List(
            Some(self.into_iter().map(AsValue::as_value).collect()),
            Box::new(T::as_empty_value()),
        )
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
}

impl<T: AsValue> AsValue for Box<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        (*self).as_value()
    }
}

macro_rules! impl_as_value {
    ($source:ident) => {
        impl<T: AsValue + Clone> AsValue for $source<T> {
            fn as_empty_value() -> Value {
                T::as_empty_value()
            }
            fn as_value(self) -> Value {
                $source::try_unwrap(self)
                    .unwrap_or_else(|v| (*v).clone())
                    .as_value()
            }
        }
    };
}
impl_as_value!(Arc);
impl_as_value!(Rc);
