//! Descriptor Builder
//!
//! Typed registration surface for [`TypeDescriptor`]. Accessor functions are
//! registered against the concrete type and erased into the dynamic
//! signatures the resolution layer works with; the coercing setter is derived
//! from the same typed setter through [`FromValue`].
//!
//! Registration mistakes (attaching an attribute to a property that was never
//! registered) panic at descriptor-build time; they are programming errors in
//! static initialization, not runtime conditions.

use crate::attribute::AttributeSet;
use crate::descriptor::{
    Constant, Constructor, Getter, Method, Property, Setter, StaticProperty, TypeDescriptor,
};
use crate::error::ReflectError;
use crate::reflect::Reflect;
use crate::types::{TypeKind, Visibility};
use crate::value::{coerce, FromValue, Value};
use std::any::{type_name, Any, TypeId};
use std::marker::PhantomData;

/// Builder for a [`TypeDescriptor`] of `T`.
pub struct TypeDescriptorBuilder<T: Reflect> {
    inner: TypeDescriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Reflect> TypeDescriptorBuilder<T> {
    pub(crate) fn new(name: &'static str, module_path: &'static str) -> Self {
        let mut inner = TypeDescriptor::leaf::<T>(name, TypeKind::Struct);
        inner.module_path = module_path;
        TypeDescriptorBuilder {
            inner,
            _marker: PhantomData,
        }
    }

    /// Override the descriptor kind (structs are the default).
    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.inner.kind = kind;
        self
    }

    /// Declare a logical base type.
    pub fn base<B: crate::reflect::Described>(mut self) -> Self {
        self.inner.base = Some(<B as crate::reflect::Described>::descriptor);
        self
    }

    /// Record unit-enum variant names.
    pub fn variants(mut self, variants: &'static [&'static str]) -> Self {
        self.inner.variants = variants.to_vec();
        self
    }

    /// Register a read-only property.
    pub fn readonly<F: Reflect>(
        mut self,
        name: &'static str,
        visibility: Visibility,
        get: fn(&T) -> &F,
    ) -> Self {
        self.push_property(
            name,
            visibility,
            type_name::<F>(),
            Some(erase_getter::<T, F>(get)),
            None,
            None,
            None,
        );
        self
    }

    /// Register a readable and writable property with full coercion support.
    pub fn read_write<F: Reflect + FromValue>(
        mut self,
        name: &'static str,
        visibility: Visibility,
        get: fn(&T) -> &F,
        set: fn(&mut T, F),
    ) -> Self {
        self.push_property(
            name,
            visibility,
            type_name::<F>(),
            Some(erase_getter::<T, F>(get)),
            Some(erase_setter::<T, F>(set)),
            Some(erase_coercing_setter::<T, F>(set)),
            None,
        );
        self
    }

    /// Register a readable and writable property whose type has no generic
    /// conversion; the coercing path degrades to exact assignment.
    pub fn read_write_exact<F: Reflect>(
        mut self,
        name: &'static str,
        visibility: Visibility,
        get: fn(&T) -> &F,
        set: fn(&mut T, F),
    ) -> Self {
        self.push_property(
            name,
            visibility,
            type_name::<F>(),
            Some(erase_getter::<T, F>(get)),
            Some(erase_setter::<T, F>(set)),
            Some(erase_setter::<T, F>(set)),
            None,
        );
        self
    }

    /// Register a write-only property.
    pub fn write_only<F: Reflect + FromValue>(
        mut self,
        name: &'static str,
        visibility: Visibility,
        set: fn(&mut T, F),
    ) -> Self {
        self.push_property(
            name,
            visibility,
            type_name::<F>(),
            None,
            Some(erase_setter::<T, F>(set)),
            Some(erase_coercing_setter::<T, F>(set)),
            None,
        );
        self
    }

    /// Register a read-only property with a backing-field writer.
    ///
    /// The backing writer bypasses the absent setter with exact-type
    /// semantics, the way a compiler-synthesized field stands behind an
    /// auto-property.
    pub fn with_backing<F: Reflect>(
        mut self,
        name: &'static str,
        visibility: Visibility,
        get: fn(&T) -> &F,
        backing: fn(&mut T, F),
    ) -> Self {
        self.push_property(
            name,
            visibility,
            type_name::<F>(),
            Some(erase_getter::<T, F>(get)),
            None,
            None,
            Some(erase_setter::<T, F>(backing)),
        );
        self
    }

    /// Attach an attribute to the most recently suitable property by name.
    ///
    /// Panics if `name` was not registered first.
    pub fn property_attribute<A: Any + Send + Sync>(
        mut self,
        name: &'static str,
        attribute: A,
    ) -> Self {
        let property = self
            .inner
            .properties
            .iter_mut()
            .find(|property| property.name == name)
            .unwrap_or_else(|| panic!("no property '{}' registered on '{}'", name, self.inner.name));
        property.attributes.push(attribute);
        self
    }

    /// Register a static property.
    pub fn static_property<F: Any>(
        mut self,
        name: &'static str,
        visibility: Visibility,
        get: fn() -> F,
    ) -> Self {
        self.inner.static_properties.push(StaticProperty {
            name,
            owner: self.inner.name,
            visibility,
            type_name: type_name::<F>(),
            getter: Box::new(move || Box::new(get()) as Box<dyn Any>),
        });
        self
    }

    /// Register a constant value.
    pub fn constant<F: Any + Send + Sync>(
        mut self,
        name: &'static str,
        visibility: Visibility,
        value: F,
    ) -> Self {
        self.inner.constants.push(Constant {
            name,
            visibility,
            type_name: type_name::<F>(),
            value: Box::new(value),
        });
        self
    }

    /// Register a zero-argument method.
    pub fn method0<R: Any>(
        mut self,
        name: &'static str,
        visibility: Visibility,
        f: fn(&mut T) -> R,
    ) -> Self {
        let thunk = move |obj: &mut dyn Reflect, _args: Vec<Value>| {
            let receiver = downcast_receiver::<T>(obj)?;
            Ok(wrap_return(f(receiver)))
        };
        self.push_method(name, visibility, 0, Box::new(thunk));
        self
    }

    /// Register a one-argument method; the argument coerces via `FromValue`.
    pub fn method1<A: FromValue, R: Any>(
        mut self,
        name: &'static str,
        visibility: Visibility,
        f: fn(&mut T, A) -> R,
    ) -> Self {
        let thunk = move |obj: &mut dyn Reflect, mut args: Vec<Value>| {
            let a = coerce::<A>(args.remove(0))?;
            let receiver = downcast_receiver::<T>(obj)?;
            Ok(wrap_return(f(receiver, a)))
        };
        self.push_method(name, visibility, 1, Box::new(thunk));
        self
    }

    /// Register a two-argument method.
    pub fn method2<A: FromValue, B: FromValue, R: Any>(
        mut self,
        name: &'static str,
        visibility: Visibility,
        f: fn(&mut T, A, B) -> R,
    ) -> Self {
        let thunk = move |obj: &mut dyn Reflect, mut args: Vec<Value>| {
            let b = coerce::<B>(args.remove(1))?;
            let a = coerce::<A>(args.remove(0))?;
            let receiver = downcast_receiver::<T>(obj)?;
            Ok(wrap_return(f(receiver, a, b)))
        };
        self.push_method(name, visibility, 2, Box::new(thunk));
        self
    }

    /// Attach an attribute to a registered method by name.
    ///
    /// Panics if `name` was not registered first.
    pub fn method_attribute<A: Any + Send + Sync>(
        mut self,
        name: &'static str,
        attribute: A,
    ) -> Self {
        let method = self
            .inner
            .methods
            .iter_mut()
            .find(|method| method.name == name)
            .unwrap_or_else(|| panic!("no method '{}' registered on '{}'", name, self.inner.name));
        method.attributes.push(attribute);
        self
    }

    /// Register a parameterless constructor.
    pub fn ctor0(mut self, visibility: Visibility, f: fn() -> T) -> Self {
        let thunk = move |_args: Vec<Box<dyn Any>>| Ok(Box::new(f()) as Box<dyn Any>);
        self.push_ctor(visibility, Vec::new(), Vec::new(), Box::new(thunk));
        self
    }

    /// Register a one-parameter constructor.
    pub fn ctor1<A: Any>(mut self, visibility: Visibility, f: fn(A) -> T) -> Self {
        let thunk = move |mut args: Vec<Box<dyn Any>>| {
            let a = take_arg::<A>(&mut args, 0)?;
            Ok(Box::new(f(a)) as Box<dyn Any>)
        };
        self.push_ctor(
            visibility,
            vec![TypeId::of::<A>()],
            vec![type_name::<A>()],
            Box::new(thunk),
        );
        self
    }

    /// Register a two-parameter constructor.
    pub fn ctor2<A: Any, B: Any>(mut self, visibility: Visibility, f: fn(A, B) -> T) -> Self {
        let thunk = move |mut args: Vec<Box<dyn Any>>| {
            let b = take_arg::<B>(&mut args, 1)?;
            let a = take_arg::<A>(&mut args, 0)?;
            Ok(Box::new(f(a, b)) as Box<dyn Any>)
        };
        self.push_ctor(
            visibility,
            vec![TypeId::of::<A>(), TypeId::of::<B>()],
            vec![type_name::<A>(), type_name::<B>()],
            Box::new(thunk),
        );
        self
    }

    /// Attach an attribute to the type itself.
    pub fn attribute<A: Any + Send + Sync>(mut self, attribute: A) -> Self {
        self.inner.attributes.push(attribute);
        self
    }

    pub fn build(self) -> TypeDescriptor {
        self.inner
    }

    #[allow(clippy::too_many_arguments)]
    fn push_property(
        &mut self,
        name: &'static str,
        visibility: Visibility,
        type_name: &'static str,
        getter: Option<Getter>,
        setter: Option<Setter>,
        coercing_setter: Option<Setter>,
        backing: Option<Setter>,
    ) {
        self.inner.properties.push(Property {
            name,
            owner: self.inner.name,
            visibility,
            type_name,
            getter,
            setter,
            coercing_setter,
            backing,
            attributes: AttributeSet::new(format!("{}.{}", self.inner.name, name)),
        });
    }

    fn push_method(
        &mut self,
        name: &'static str,
        visibility: Visibility,
        arity: usize,
        thunk: Box<
            dyn Fn(&mut dyn Reflect, Vec<Value>) -> Result<Option<Box<dyn Any>>, ReflectError>
                + Send
                + Sync,
        >,
    ) {
        self.inner.methods.push(Method {
            name,
            owner: self.inner.name,
            visibility,
            arity,
            attributes: AttributeSet::new(format!("{}::{}", self.inner.name, name)),
            thunk,
        });
    }

    fn push_ctor(
        &mut self,
        visibility: Visibility,
        param_types: Vec<TypeId>,
        param_type_names: Vec<&'static str>,
        thunk: Box<dyn Fn(Vec<Box<dyn Any>>) -> Result<Box<dyn Any>, ReflectError> + Send + Sync>,
    ) {
        self.inner.constructors.push(Constructor {
            owner: self.inner.name,
            visibility,
            param_types,
            param_type_names,
            thunk,
        });
    }
}

fn hrtb<F>(f: F) -> F
where
    F: for<'a> Fn(&'a dyn Reflect) -> Result<&'a dyn Reflect, ReflectError>,
{
    f
}

fn receiver_error<T: Any>(actual: &str) -> ReflectError {
    ReflectError::mismatch(type_name::<T>(), actual.to_string())
}

fn downcast_receiver<T: Reflect>(obj: &mut dyn Reflect) -> Result<&mut T, ReflectError> {
    let actual = obj.descriptor().name();
    match obj.downcast_mut::<T>() {
        Some(receiver) => Ok(receiver),
        None => Err(receiver_error::<T>(actual)),
    }
}

fn erase_getter<T: Reflect, F: Reflect>(get: fn(&T) -> &F) -> Getter {
    Box::new(hrtb(move |obj: &dyn Reflect| {
        match obj.downcast_ref::<T>() {
            Some(receiver) => Ok(get(receiver).as_reflect()),
            None => Err(receiver_error::<T>(obj.descriptor().name())),
        }
    }))
}

fn erase_setter<T: Reflect, F: Reflect>(set: fn(&mut T, F)) -> Setter {
    Box::new(move |obj: &mut dyn Reflect, value: Value| {
        let field = value.take_exact::<F>()?;
        set(downcast_receiver::<T>(obj)?, field);
        Ok(())
    })
}

fn erase_coercing_setter<T: Reflect, F: Reflect + FromValue>(set: fn(&mut T, F)) -> Setter {
    Box::new(move |obj: &mut dyn Reflect, value: Value| {
        let field = coerce::<F>(value)?;
        set(downcast_receiver::<T>(obj)?, field);
        Ok(())
    })
}

fn wrap_return<R: Any>(out: R) -> Option<Box<dyn Any>> {
    let boxed: Box<dyn Any> = Box::new(out);
    if boxed.is::<()>() {
        None
    } else {
        Some(boxed)
    }
}

fn take_arg<A: Any>(args: &mut Vec<Box<dyn Any>>, index: usize) -> Result<A, ReflectError> {
    args.remove(index)
        .downcast::<A>()
        .map(|value| *value)
        .map_err(|_| ReflectError::mismatch(type_name::<A>(), "constructor argument"))
}
