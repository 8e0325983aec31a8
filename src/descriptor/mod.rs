//! Type Descriptors
//!
//! Static metadata for registered types: properties, static properties,
//! constants, methods, constructors, attributes, and an optional logical base
//! type. A descriptor is the resolution target for every name-based
//! operation in the crate; it is built once per type through
//! [`TypeDescriptorBuilder`] and then never mutated.

pub mod builder;

use crate::attribute::AttributeSet;
use crate::error::ReflectError;
use crate::reflect::Reflect;
use crate::types::{Case, TypeKind, Visibility};
use crate::value::Value;
use std::any::{type_name, Any, TypeId};

pub use builder::TypeDescriptorBuilder;

pub(crate) type Getter =
    Box<dyn Fn(&dyn Reflect) -> Result<&dyn Reflect, ReflectError> + Send + Sync>;
pub(crate) type Setter =
    Box<dyn Fn(&mut dyn Reflect, Value) -> Result<(), ReflectError> + Send + Sync>;
type StaticGetter = Box<dyn Fn() -> Box<dyn Any> + Send + Sync>;
type MethodThunk =
    Box<dyn Fn(&mut dyn Reflect, Vec<Value>) -> Result<Option<Box<dyn Any>>, ReflectError> + Send + Sync>;
type ConstructorThunk =
    Box<dyn Fn(Vec<Box<dyn Any>>) -> Result<Box<dyn Any>, ReflectError> + Send + Sync>;

/// Runtime metadata for a single type.
pub struct TypeDescriptor {
    name: &'static str,
    module_path: &'static str,
    type_id: TypeId,
    kind: TypeKind,
    base: Option<fn() -> &'static TypeDescriptor>,
    variants: Vec<&'static str>,
    properties: Vec<Property>,
    static_properties: Vec<StaticProperty>,
    constants: Vec<Constant>,
    methods: Vec<Method>,
    constructors: Vec<Constructor>,
    attributes: AttributeSet,
    unwrap_inner: Option<fn(&dyn Reflect) -> Option<&dyn Reflect>>,
}

impl TypeDescriptor {
    /// Start building a descriptor for `T`.
    ///
    /// `module_path` is normally `module_path!()` at the registration site.
    pub fn builder<T: Reflect>(
        name: &'static str,
        module_path: &'static str,
    ) -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder::new(name, module_path)
    }

    pub(crate) fn leaf<T: Any>(name: &'static str, kind: TypeKind) -> Self {
        TypeDescriptor {
            name,
            module_path: "std",
            type_id: TypeId::of::<T>(),
            kind,
            base: None,
            variants: Vec::new(),
            properties: Vec::new(),
            static_properties: Vec::new(),
            constants: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            attributes: AttributeSet::new(name),
            unwrap_inner: None,
        }
    }

    pub(crate) fn nullable<T: Any>(
        name: &'static str,
        unwrap: fn(&dyn Reflect) -> Option<&dyn Reflect>,
    ) -> Self {
        let mut descriptor = TypeDescriptor::leaf::<T>(name, TypeKind::Nullable);
        descriptor.unwrap_inner = Some(unwrap);
        descriptor
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    /// `TypeId` of the described type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Declared logical base type, if any.
    pub fn base(&self) -> Option<&'static TypeDescriptor> {
        self.base.map(|resolve| resolve())
    }

    /// Variant names of a unit enum; empty for other kinds.
    pub fn variants(&self) -> &[&'static str] {
        &self.variants
    }

    /// Whether `base` appears anywhere in this type's base chain.
    pub fn derives_from(&self, base: &TypeDescriptor) -> bool {
        let mut current = self.base();
        while let Some(ancestor) = current {
            if ancestor.type_id == base.type_id {
                return true;
            }
            current = ancestor.base();
        }
        false
    }

    /// Registered instance properties, in registration order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    /// Resolve an instance property by name.
    pub fn property(&self, name: &str, case: Case) -> Option<&Property> {
        self.properties
            .iter()
            .find(|property| case.matches(property.name, name))
    }

    /// Resolve an instance property by name or fail with
    /// [`ReflectError::PropertyNotFound`].
    pub fn require_property(&self, name: &str, case: Case) -> Result<&Property, ReflectError> {
        if name.is_empty() {
            return Err(ReflectError::InvalidArgument(
                "Property name is empty.".to_string(),
            ));
        }
        self.property(name, case).ok_or_else(|| {
            tracing::debug!(type_name = self.name, property = name, "property not found");
            ReflectError::property_not_found(self.name, name)
        })
    }

    /// Registered static properties, in registration order.
    pub fn static_properties(&self) -> impl Iterator<Item = &StaticProperty> {
        self.static_properties.iter()
    }

    /// Resolve a static property by name.
    pub fn static_property(&self, name: &str, case: Case) -> Option<&StaticProperty> {
        self.static_properties
            .iter()
            .find(|property| case.matches(property.name, name))
    }

    /// Resolve a static property by name or fail with
    /// [`ReflectError::PropertyNotFound`].
    pub fn require_static_property(
        &self,
        name: &str,
        case: Case,
    ) -> Result<&StaticProperty, ReflectError> {
        if name.is_empty() {
            return Err(ReflectError::InvalidArgument(
                "Property name is empty.".to_string(),
            ));
        }
        self.static_property(name, case)
            .ok_or_else(|| ReflectError::property_not_found(self.name, name))
    }

    /// Registered constants, optionally filtered by visibility.
    pub fn constants(&self, visibility: Option<Visibility>) -> impl Iterator<Item = &Constant> {
        self.constants
            .iter()
            .filter(move |constant| match visibility {
                Some(filter) => constant.visibility == filter,
                None => true,
            })
    }

    /// Values of constants of type `V`, in registration order.
    ///
    /// Constants of other types are skipped.
    pub fn constant_values<V: Any + Clone>(&self, visibility: Option<Visibility>) -> Vec<V> {
        self.constants(visibility)
            .filter_map(|constant| constant.value_as::<V>())
            .collect()
    }

    /// Registered methods, in registration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter()
    }

    /// Resolve a method by name (exact match, as declared).
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|method| method.name == name)
    }

    /// Registered constructors, in registration order.
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    /// Attributes attached directly to this type.
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Retrieve the single attribute of type `A` on this type or its base
    /// chain.
    ///
    /// Inherited attributes count toward the at-most-one policy: a duplicate
    /// anywhere in the chain is ambiguous.
    pub fn attribute<A: Any>(&self) -> Result<Option<&A>, ReflectError> {
        let ambiguous = || ReflectError::AmbiguousAttribute {
            attribute: type_name::<A>(),
            target: self.name.to_string(),
        };
        let mut found: Option<&A> = None;
        for attribute in self.attributes.iter_of::<A>() {
            if found.is_some() {
                return Err(ambiguous());
            }
            found = Some(attribute);
        }
        let mut current = self.base();
        while let Some(descriptor) = current {
            for attribute in descriptor.attributes.iter_of::<A>() {
                if found.is_some() {
                    return Err(ambiguous());
                }
                found = Some(attribute);
            }
            current = descriptor.base();
        }
        Ok(found)
    }

    /// Whether exactly one attribute of type `A` is attached to this type or
    /// its base chain.
    pub fn has_attribute<A: Any>(&self) -> Result<bool, ReflectError> {
        Ok(self.attribute::<A>()?.is_some())
    }

    /// Whether this type lives in `namespace` or a nested module of it.
    ///
    /// `a::b` matches `a::b` and `a::b::c` but not `a::bc`.
    pub fn is_in_module(&self, namespace: &str) -> Result<bool, ReflectError> {
        if namespace.is_empty() {
            return Err(ReflectError::InvalidArgument(
                "Namespace is empty.".to_string(),
            ));
        }
        Ok(module_matches(self.module_path, namespace))
    }

    /// Whether this describes a test fixture type, judged by name suffix.
    pub fn is_test_type(&self) -> bool {
        self.kind == TypeKind::Struct
            && (self.name.ends_with("Tests") || self.name.ends_with("Test"))
    }

    /// Unwrap a nullable wrapper value to its payload; `None` when absent.
    pub fn unwrap_nullable<'a>(
        &self,
        value: &'a dyn Reflect,
    ) -> Result<Option<&'a dyn Reflect>, ReflectError> {
        match self.unwrap_inner {
            Some(unwrap) => Ok(unwrap(value)),
            None => Err(ReflectError::InvalidArgument(format!(
                "Type '{}' is not nullable.",
                self.name
            ))),
        }
    }

    pub(crate) fn is_nullable(&self) -> bool {
        self.unwrap_inner.is_some()
    }
}

/// Strict segment-wise module prefix test.
pub(crate) fn module_matches(path: &str, namespace: &str) -> bool {
    path == namespace || (path.starts_with(namespace) && path[namespace.len()..].starts_with("::"))
}

/// A named instance property with registered accessors.
pub struct Property {
    pub(crate) name: &'static str,
    pub(crate) owner: &'static str,
    pub(crate) visibility: Visibility,
    pub(crate) type_name: &'static str,
    pub(crate) getter: Option<Getter>,
    pub(crate) setter: Option<Setter>,
    pub(crate) coercing_setter: Option<Setter>,
    pub(crate) backing: Option<Setter>,
    pub(crate) attributes: AttributeSet,
}

impl Property {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the type this property is declared on.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Name of the property's declared type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    pub fn has_backing(&self) -> bool {
        self.backing.is_some()
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Read the property from `obj`.
    pub fn get<'a>(&self, obj: &'a dyn Reflect) -> Result<&'a dyn Reflect, ReflectError> {
        match &self.getter {
            Some(getter) => getter(obj),
            None => Err(ReflectError::PropertyNotReadable {
                type_name: self.owner.to_string(),
                property: self.name.to_string(),
            }),
        }
    }

    /// Assign `value` with exact-type semantics.
    pub fn set(&self, obj: &mut dyn Reflect, value: Value) -> Result<(), ReflectError> {
        match &self.setter {
            Some(setter) => setter(obj, value),
            None => Err(self.not_writable()),
        }
    }

    /// Assign `value`, coercing it to the property type where possible.
    pub fn set_coerced(&self, obj: &mut dyn Reflect, value: Value) -> Result<(), ReflectError> {
        match &self.coercing_setter {
            Some(setter) => setter(obj, value),
            None => Err(self.not_writable()),
        }
    }

    /// Write directly to the backing storage, bypassing the absent setter.
    pub fn set_backing(&self, obj: &mut dyn Reflect, value: Value) -> Result<(), ReflectError> {
        match &self.backing {
            Some(setter) => setter(obj, value),
            None => Err(ReflectError::BackingFieldNotFound {
                type_name: self.owner.to_string(),
                property: self.name.to_string(),
            }),
        }
    }

    pub(crate) fn not_writable(&self) -> ReflectError {
        ReflectError::PropertyNotWritable {
            type_name: self.owner.to_string(),
            property: self.name.to_string(),
        }
    }
}

/// A named static property with a registered getter.
pub struct StaticProperty {
    pub(crate) name: &'static str,
    pub(crate) owner: &'static str,
    pub(crate) visibility: Visibility,
    pub(crate) type_name: &'static str,
    pub(crate) getter: StaticGetter,
}

impl StaticProperty {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the type this property is declared on.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Read the static value as `V`.
    pub fn get_as<V: Any>(&self) -> Result<V, ReflectError> {
        (self.getter)()
            .downcast::<V>()
            .map(|value| *value)
            .map_err(|_| ReflectError::mismatch(type_name::<V>(), self.type_name))
    }
}

/// A named constant value.
pub struct Constant {
    pub(crate) name: &'static str,
    pub(crate) visibility: Visibility,
    pub(crate) type_name: &'static str,
    pub(crate) value: Box<dyn Any + Send + Sync>,
}

impl Constant {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The constant's value, if it is a `V`.
    pub fn value_as<V: Any + Clone>(&self) -> Option<V> {
        self.value.as_ref().downcast_ref::<V>().cloned()
    }
}

/// A named invocable method.
pub struct Method {
    pub(crate) name: &'static str,
    pub(crate) owner: &'static str,
    pub(crate) visibility: Visibility,
    pub(crate) arity: usize,
    pub(crate) attributes: AttributeSet,
    pub(crate) thunk: MethodThunk,
}

impl Method {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Number of declared arguments.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Invoke the method on `obj`.
    ///
    /// Returns `None` for unit-returning methods.
    pub fn invoke(
        &self,
        obj: &mut dyn Reflect,
        args: Vec<Value>,
    ) -> Result<Option<Box<dyn Any>>, ReflectError> {
        if args.len() != self.arity {
            return Err(ReflectError::InvalidArgument(format!(
                "Method '{}' on '{}' expects {} argument(s), got {}.",
                self.name,
                self.owner,
                self.arity,
                args.len()
            )));
        }
        (self.thunk)(obj, args)
    }
}

/// A registered constructor with an exact parameter-type signature.
pub struct Constructor {
    pub(crate) owner: &'static str,
    pub(crate) visibility: Visibility,
    pub(crate) param_types: Vec<TypeId>,
    pub(crate) param_type_names: Vec<&'static str>,
    pub(crate) thunk: ConstructorThunk,
}

impl Constructor {
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Declared parameter type names, in order.
    pub fn param_type_names(&self) -> &[&'static str] {
        &self.param_type_names
    }

    /// Whether this constructor's signature equals `signature` exactly.
    pub fn matches(&self, signature: &[TypeId]) -> bool {
        self.param_types == signature
    }

    /// Invoke with pre-matched arguments.
    pub fn invoke(&self, args: Vec<Box<dyn Any>>) -> Result<Box<dyn Any>, ReflectError> {
        if args.len() != self.param_types.len() {
            return Err(ReflectError::InvalidArgument(format!(
                "Constructor of '{}' expects {} argument(s), got {}.",
                self.owner,
                self.param_types.len(),
                args.len()
            )));
        }
        (self.thunk)(args)
    }
}
