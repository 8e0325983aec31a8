//! Mirror: Runtime Type Metadata and Reflection Utilities
//!
//! A registry-backed reflection layer. Types describe themselves once through
//! a typed builder; name-based property reads and writes (including dotted
//! paths), attribute inspection with an at-most-one policy, constant
//! enumeration, constructor invocation regardless of visibility, and
//! embedded-resource extraction all resolve against those descriptors at
//! runtime.

pub mod access;
pub mod attribute;
pub mod construct;
pub mod descriptor;
pub mod error;
pub mod macros;
pub mod reflect;
pub mod registry;
pub mod resource;
pub mod types;
pub mod value;
pub mod views;

pub use access::{
    invoke_method, property_value, property_value_as, property_value_as_with, property_value_with,
    set_backing_field, set_property, set_property_coerced, set_property_lenient,
    static_property_value, ReflectExt,
};
pub use attribute::AttributeSet;
pub use construct::{construct, construct_default, ConstructorArg};
pub use descriptor::{
    Constant, Constructor, Method, Property, StaticProperty, TypeDescriptor, TypeDescriptorBuilder,
};
pub use error::ReflectError;
pub use reflect::{Described, Reflect};
pub use registry::{FileVersion, Registry, RegistryBuilder, ResourceEntry};
pub use resource::EmbeddedResource;
pub use types::{Case, TypeKind, Visibility};
pub use value::{coerce, FromValue, Value};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
