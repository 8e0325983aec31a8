//! Property Access
//!
//! Name-based reads and writes against reflected values: dotted-path
//! traversal, exact and coercing assignment, the lenient legacy setter,
//! backing-field writes, static property reads, and method invocation.
//! Resolution always searches public and non-public members alike.

use crate::descriptor::TypeDescriptor;
use crate::error::ReflectError;
use crate::reflect::Reflect;
use crate::types::Case;
use crate::value::Value;
use std::any::Any;
use tracing::trace;

/// Read a property value through a dotted path, case-sensitively.
///
/// `"a.b"` resolves `a` on `obj`, then `b` on the result. Optional values
/// along the path are unwrapped; an absent one fails with
/// [`ReflectError::NullSegment`].
pub fn property_value<'a>(
    obj: &'a dyn Reflect,
    path: &str,
) -> Result<&'a dyn Reflect, ReflectError> {
    property_value_with(obj, path, Case::Sensitive)
}

/// Read a property value through a dotted path with an explicit matching
/// mode.
pub fn property_value_with<'a>(
    obj: &'a dyn Reflect,
    path: &str,
    case: Case,
) -> Result<&'a dyn Reflect, ReflectError> {
    if path.is_empty() {
        return Err(ReflectError::InvalidArgument(
            "Property path is empty.".to_string(),
        ));
    }
    let mut current = obj;
    for segment in path.split('.') {
        if segment.is_empty() {
            return Err(ReflectError::InvalidArgument(format!(
                "Property path '{}' contains an empty segment.",
                path
            )));
        }
        current = unwrap_if_nullable(current, path, segment)?;
        let descriptor = current.descriptor();
        let property = descriptor.require_property(segment, case)?;
        current = property.get(current)?;
        trace!(
            type_name = descriptor.name(),
            property = segment,
            "resolved property segment"
        );
    }
    Ok(current)
}

/// Read a property value through a dotted path and downcast it to `T`.
///
/// A `Some` leaf of an optional property unwraps transparently.
pub fn property_value_as<'a, T: Any>(
    obj: &'a dyn Reflect,
    path: &str,
) -> Result<&'a T, ReflectError> {
    property_value_as_with(obj, path, Case::Sensitive)
}

/// Typed dotted-path read with an explicit matching mode.
pub fn property_value_as_with<'a, T: Any>(
    obj: &'a dyn Reflect,
    path: &str,
    case: Case,
) -> Result<&'a T, ReflectError> {
    let value = property_value_with(obj, path, case)?;
    if let Some(typed) = value.downcast_ref::<T>() {
        return Ok(typed);
    }
    // Allow reading through a Some leaf without naming the wrapper type.
    if value.descriptor().is_nullable() {
        if let Some(inner) = value.descriptor().unwrap_nullable(value)? {
            if let Some(typed) = inner.downcast_ref::<T>() {
                return Ok(typed);
            }
        }
    }
    Err(ReflectError::mismatch(
        std::any::type_name::<T>(),
        value.descriptor().name(),
    ))
}

/// Assign a property with exact-type semantics.
///
/// The value must carry exactly the field's type; no conversion is applied.
pub fn set_property(
    obj: &mut dyn Reflect,
    name: &str,
    value: Value,
    case: Case,
) -> Result<(), ReflectError> {
    let property = obj.descriptor().require_property(name, case)?;
    property.set(obj, value)
}

/// Assign a property, coercing the value to the field type.
///
/// Precedence: null (optional fields only), exact type, stringification for
/// `String` fields, variant-name parse for enum fields, then generic
/// conversion; conversion failures propagate.
pub fn set_property_coerced(
    obj: &mut dyn Reflect,
    name: &str,
    value: Value,
    case: Case,
) -> Result<(), ReflectError> {
    let property = obj.descriptor().require_property(name, case)?;
    property.set_coerced(obj, value)
}

/// Lenient legacy setter: silently does nothing when the property is absent
/// or not writable.
///
/// Conversion failures still propagate; only resolution and writability are
/// forgiven. Callers that need the throwing behavior must use
/// [`set_property_coerced`].
pub fn set_property_lenient(
    obj: &mut dyn Reflect,
    name: &str,
    value: Value,
    case: Case,
) -> Result<(), ReflectError> {
    let descriptor = obj.descriptor();
    let property = match descriptor.property(name, case) {
        Some(property) => property,
        None => {
            trace!(
                type_name = descriptor.name(),
                property = name,
                "lenient set skipped absent property"
            );
            return Ok(());
        }
    };
    if property.is_writable() {
        property.set_coerced(obj, value)
    } else {
        trace!(
            type_name = descriptor.name(),
            property = name,
            "lenient set skipped non-writable property"
        );
        Ok(())
    }
}

/// Write directly to a read-only property's backing storage.
///
/// Fails with [`ReflectError::BackingFieldNotFound`] when the property exists
/// but registered no backing writer.
pub fn set_backing_field(
    obj: &mut dyn Reflect,
    name: &str,
    value: Value,
    case: Case,
) -> Result<(), ReflectError> {
    let property = obj.descriptor().require_property(name, case)?;
    property.set_backing(obj, value)
}

/// Read a static property of a type as `T`.
pub fn static_property_value<T: Any>(
    descriptor: &TypeDescriptor,
    name: &str,
    case: Case,
) -> Result<T, ReflectError> {
    descriptor.require_static_property(name, case)?.get_as::<T>()
}

/// Invoke a method by name (exact match) with dynamic arguments.
///
/// Returns `None` for unit-returning methods.
pub fn invoke_method(
    obj: &mut dyn Reflect,
    name: &str,
    args: Vec<Value>,
) -> Result<Option<Box<dyn Any>>, ReflectError> {
    let descriptor = obj.descriptor();
    let method = descriptor
        .method(name)
        .ok_or_else(|| ReflectError::MethodNotFound {
            type_name: descriptor.name().to_string(),
            method: name.to_string(),
        })?;
    method.invoke(obj, args)
}

fn unwrap_if_nullable<'a>(
    value: &'a dyn Reflect,
    path: &str,
    segment: &str,
) -> Result<&'a dyn Reflect, ReflectError> {
    let descriptor = value.descriptor();
    if !descriptor.is_nullable() {
        return Ok(value);
    }
    descriptor
        .unwrap_nullable(value)?
        .ok_or_else(|| ReflectError::NullSegment {
            path: path.to_string(),
            segment: segment.to_string(),
        })
}

/// Extension methods over any reflected value, mirroring the free functions.
pub trait ReflectExt: Reflect {
    /// Dotted-path read; see [`property_value`].
    fn property(&self, path: &str) -> Result<&dyn Reflect, ReflectError> {
        property_value(self.as_reflect(), path)
    }

    /// Dotted-path read with a matching mode.
    fn property_with(&self, path: &str, case: Case) -> Result<&dyn Reflect, ReflectError> {
        property_value_with(self.as_reflect(), path, case)
    }

    /// Typed dotted-path read; see [`property_value_as`].
    fn property_as<T: Any>(&self, path: &str) -> Result<&T, ReflectError> {
        property_value_as(self.as_reflect(), path)
    }

    /// Exact-type assignment; see [`set_property`].
    fn set_property(&mut self, name: &str, value: Value) -> Result<(), ReflectError> {
        set_property(self.as_reflect_mut(), name, value, Case::Sensitive)
    }

    /// Exact-type assignment with a matching mode.
    fn set_property_with(
        &mut self,
        name: &str,
        value: Value,
        case: Case,
    ) -> Result<(), ReflectError> {
        set_property(self.as_reflect_mut(), name, value, case)
    }

    /// Coercing assignment; see [`set_property_coerced`].
    fn set_property_coerced(&mut self, name: &str, value: Value) -> Result<(), ReflectError> {
        set_property_coerced(self.as_reflect_mut(), name, value, Case::Sensitive)
    }

    /// Lenient assignment; see [`set_property_lenient`].
    fn set_property_lenient(&mut self, name: &str, value: Value) -> Result<(), ReflectError> {
        set_property_lenient(self.as_reflect_mut(), name, value, Case::Sensitive)
    }

    /// Backing-field write; see [`set_backing_field`].
    fn set_backing_field(&mut self, name: &str, value: Value) -> Result<(), ReflectError> {
        set_backing_field(self.as_reflect_mut(), name, value, Case::Sensitive)
    }

    /// Method invocation; see [`invoke_method`].
    fn invoke(&mut self, name: &str, args: Vec<Value>) -> Result<Option<Box<dyn Any>>, ReflectError> {
        invoke_method(self.as_reflect_mut(), name, args)
    }

    /// Single attribute of type `A` on this value's type (or its base chain).
    fn attribute<A: Any>(&self) -> Result<Option<&'static A>, ReflectError> {
        self.as_reflect().descriptor().attribute::<A>()
    }

    /// Whether this value's type carries exactly one attribute of type `A`.
    fn has_attribute<A: Any>(&self) -> Result<bool, ReflectError> {
        self.as_reflect().descriptor().has_attribute::<A>()
    }
}

impl<T: Reflect + ?Sized> ReflectExt for T {}
