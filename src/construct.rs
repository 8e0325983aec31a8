//! Object Construction
//!
//! Invokes registered constructors by exact parameter-type signature,
//! regardless of their declared visibility. This is how callers instantiate
//! types whose constructors are not reachable through normal construction
//! syntax.

use crate::error::ReflectError;
use crate::reflect::Described;
use std::any::{type_name, Any, TypeId};
use tracing::trace;

/// One ordered constructor argument: the declared parameter type plus the
/// value.
pub struct ConstructorArg {
    type_id: TypeId,
    type_name: &'static str,
    value: Box<dyn Any>,
}

impl ConstructorArg {
    /// An argument whose declared parameter type is `A`.
    pub fn of<A: Any>(value: A) -> Self {
        ConstructorArg {
            type_id: TypeId::of::<A>(),
            type_name: type_name::<A>(),
            value: Box::new(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Construct a `T` through the registered constructor whose parameter-type
/// signature matches `args` exactly, in order.
///
/// Fails with [`ReflectError::ConstructorNotFound`] when no signature
/// matches.
pub fn construct<T: Described>(args: Vec<ConstructorArg>) -> Result<T, ReflectError> {
    let descriptor = <T as Described>::descriptor();
    let signature: Vec<TypeId> = args.iter().map(|arg| arg.type_id).collect();
    let constructor = descriptor
        .constructors()
        .iter()
        .find(|candidate| candidate.matches(&signature))
        .ok_or_else(|| ReflectError::ConstructorNotFound {
            type_name: descriptor.name().to_string(),
        })?;
    trace!(
        type_name = descriptor.name(),
        arity = args.len(),
        "invoking registered constructor"
    );
    let values = args.into_iter().map(|arg| arg.value).collect();
    constructor
        .invoke(values)?
        .downcast::<T>()
        .map(|instance| *instance)
        .map_err(|_| ReflectError::mismatch(type_name::<T>(), "constructed instance"))
}

/// Construct a `T` through its registered parameterless constructor.
pub fn construct_default<T: Described>() -> Result<T, ReflectError> {
    construct(Vec::new())
}
