//! Dynamic Values
//!
//! The `Value` enum is the currency of the dynamic write paths: callers hand
//! a `Value` to a setter and the target field's registered conversion decides
//! whether it can be accepted. Exact-type assignment and best-effort coercion
//! are separate entry points; the coercion precedence is null handling, exact
//! match, stringification, enum-name parse, then generic conversion.

use crate::error::ReflectError;
use std::any::{type_name, Any};
use std::fmt;
use std::path::PathBuf;

/// A dynamically typed value handed to property setters, method arguments,
/// and constructors.
#[derive(Debug)]
pub enum Value {
    /// The absent value; assignable only to optional fields.
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// An arbitrary boxed value carrying its type name for diagnostics.
    Boxed(BoxedValue),
}

/// Type-erased payload for [`Value::Boxed`].
pub struct BoxedValue {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl fmt::Debug for BoxedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoxedValue").field(&self.type_name).finish()
    }
}

impl Value {
    /// Wrap an arbitrary value.
    pub fn boxed<T: Any + Send>(value: T) -> Self {
        Value::Boxed(BoxedValue {
            value: Box::new(value),
            type_name: type_name::<T>(),
        })
    }

    /// Name of the carried type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "i64",
            Value::UInt(_) => "u64",
            Value::Float(_) => "f64",
            Value::Str(_) => "String",
            Value::Boxed(b) => b.type_name,
        }
    }

    /// Take the payload as exactly `T`, consuming the value.
    ///
    /// Primitive variants carry their canonical Rust type (`Int` is `i64`,
    /// `Str` is `String`); anything else must have been boxed as `T`.
    pub fn take_exact<T: Any>(self) -> Result<T, ReflectError> {
        let actual = self.type_name();
        let boxed: Box<dyn Any> = match self {
            Value::Null => {
                return Err(ReflectError::mismatch(type_name::<T>(), "null"));
            }
            Value::Bool(v) => Box::new(v),
            Value::Int(v) => Box::new(v),
            Value::UInt(v) => Box::new(v),
            Value::Float(v) => Box::new(v),
            Value::Str(v) => Box::new(v),
            Value::Boxed(b) => b.value,
        };
        boxed
            .downcast::<T>()
            .map(|b| *b)
            .map_err(|_| ReflectError::mismatch(type_name::<T>(), actual))
    }

    /// Render the value as a string, for assignment to `String` targets.
    ///
    /// Boxed payloads are opaque and cannot be stringified.
    fn into_display_string(self) -> Result<String, ReflectError> {
        match self {
            Value::Null => Err(ReflectError::mismatch("String", "null")),
            Value::Bool(v) => Ok(v.to_string()),
            Value::Int(v) => Ok(v.to_string()),
            Value::UInt(v) => Ok(v.to_string()),
            Value::Float(v) => Ok(v.to_string()),
            Value::Str(v) => Ok(v),
            Value::Boxed(b) => {
                match b.value.downcast::<String>() {
                    Ok(s) => Ok(*s),
                    Err(value) => value
                        .downcast::<&'static str>()
                        .map(|s| s.to_string())
                        .map_err(|_| ReflectError::mismatch("String", b.type_name)),
                }
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// Conversion target for the coercing write paths.
///
/// Implementations decide which `Value` shapes they accept; failures surface
/// as [`ReflectError::TypeMismatch`] naming both sides. Unit enums gain an
/// implementation (parse by variant name) through `reflect_enum!`.
pub trait FromValue: Sized + 'static {
    fn from_value(value: Value) -> Result<Self, ReflectError>;

    /// Whether `Value::Null` is an acceptable input.
    fn accepts_null() -> bool {
        false
    }
}

/// Convert a value to `T`, trying an exact boxed match before falling back to
/// `T`'s own conversion.
pub fn coerce<T: FromValue>(value: Value) -> Result<T, ReflectError> {
    if let Value::Boxed(b) = value {
        return match b.value.downcast::<T>() {
            Ok(v) => Ok(*v),
            Err(inner) => T::from_value(Value::Boxed(BoxedValue {
                value: inner,
                type_name: b.type_name,
            })),
        };
    }
    T::from_value(value)
}

fn int_out_of_range(target: &'static str, value: impl fmt::Display) -> ReflectError {
    ReflectError::mismatch(target, format!("out-of-range integer {}", value))
}

macro_rules! from_value_int {
    ($($ty:ty),* $(,)?) => {$(
        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, ReflectError> {
                match value {
                    Value::Int(v) => <$ty>::try_from(v)
                        .map_err(|_| int_out_of_range(stringify!($ty), v)),
                    Value::UInt(v) => <$ty>::try_from(v)
                        .map_err(|_| int_out_of_range(stringify!($ty), v)),
                    Value::Float(v) => {
                        if v.fract() == 0.0
                            && v >= <$ty>::MIN as f64
                            && v <= <$ty>::MAX as f64
                        {
                            Ok(v as $ty)
                        } else {
                            Err(ReflectError::mismatch(
                                stringify!($ty),
                                format!("non-integral f64 {}", v),
                            ))
                        }
                    }
                    Value::Str(s) => s.trim().parse::<$ty>().map_err(|_| {
                        ReflectError::mismatch(stringify!($ty), format!("string '{}'", s))
                    }),
                    other => Err(ReflectError::mismatch(stringify!($ty), other.type_name())),
                }
            }
        }
    )*};
}

from_value_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, isize, usize);

macro_rules! from_value_float {
    ($($ty:ty),* $(,)?) => {$(
        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, ReflectError> {
                match value {
                    Value::Int(v) => Ok(v as $ty),
                    Value::UInt(v) => Ok(v as $ty),
                    Value::Float(v) => Ok(v as $ty),
                    Value::Str(s) => s.trim().parse::<$ty>().map_err(|_| {
                        ReflectError::mismatch(stringify!($ty), format!("string '{}'", s))
                    }),
                    other => Err(ReflectError::mismatch(stringify!($ty), other.type_name())),
                }
            }
        }
    )*};
}

from_value_float!(f32, f64);

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ReflectError> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::Str(s) => s.trim().parse::<bool>().map_err(|_| {
                ReflectError::mismatch("bool", format!("string '{}'", s))
            }),
            other => Err(ReflectError::mismatch("bool", other.type_name())),
        }
    }
}

impl FromValue for char {
    fn from_value(value: Value) -> Result<Self, ReflectError> {
        match value {
            Value::Str(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ReflectError::mismatch("char", format!("string '{}'", s))),
                }
            }
            other => Err(ReflectError::mismatch("char", other.type_name())),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ReflectError> {
        value.into_display_string()
    }
}

impl FromValue for PathBuf {
    fn from_value(value: Value) -> Result<Self, ReflectError> {
        match value {
            Value::Str(s) => Ok(PathBuf::from(s)),
            other => Err(ReflectError::mismatch("PathBuf", other.type_name())),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ReflectError> {
        match value {
            Value::Null => Ok(None),
            other => Ok(Some(coerce::<T>(other)?)),
        }
    }

    fn accepts_null() -> bool {
        true
    }
}
