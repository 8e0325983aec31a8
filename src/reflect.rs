//! The Reflect Trait
//!
//! `Reflect` is the dynamic object surface of the crate: any value behind
//! `&dyn Reflect` exposes its runtime [`TypeDescriptor`] and `Any`-based
//! downcasting. Leaf implementations for the standard value types live here;
//! user types implement [`Described`] (usually through a `Lazy` descriptor)
//! and pick up `Reflect` via `impl_reflect!`.

use crate::descriptor::TypeDescriptor;
use crate::types::TypeKind;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::PathBuf;

/// Dynamic access to a value and its type metadata.
pub trait Reflect: Any {
    /// Descriptor for the runtime type of this value.
    fn descriptor(&self) -> &'static TypeDescriptor;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn as_reflect(&self) -> &dyn Reflect;
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;
}

impl std::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reflect")
            .field("type", &self.descriptor().name())
            .finish()
    }
}

/// Type-level descriptor access for registered types.
pub trait Described: Reflect {
    /// The static descriptor for this type.
    fn descriptor() -> &'static TypeDescriptor;
}

impl dyn Reflect {
    /// Whether the underlying value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Intern table for descriptors of generic and leaf types, which cannot live
/// in per-type statics.
static INTERNED: Lazy<RwLock<HashMap<TypeId, &'static TypeDescriptor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub(crate) fn interned<T: 'static>(
    build: impl FnOnce() -> TypeDescriptor,
) -> &'static TypeDescriptor {
    let key = TypeId::of::<T>();
    if let Some(descriptor) = INTERNED.read().get(&key).copied() {
        return descriptor;
    }
    let mut map = INTERNED.write();
    *map.entry(key)
        .or_insert_with(|| Box::leak(Box::new(build())))
}

fn unwrap_option<T: Reflect>(obj: &dyn Reflect) -> Option<&dyn Reflect> {
    obj.downcast_ref::<Option<T>>()?
        .as_ref()
        .map(|inner| inner as &dyn Reflect)
}

macro_rules! reflect_leaf {
    ($($ty:ty),* $(,)?) => {$(
        impl Reflect for $ty {
            fn descriptor(&self) -> &'static TypeDescriptor {
                interned::<$ty>(|| {
                    TypeDescriptor::leaf::<$ty>(stringify!($ty), TypeKind::Primitive)
                })
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }

            fn as_reflect(&self) -> &dyn Reflect {
                self
            }

            fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
                self
            }
        }
    )*};
}

reflect_leaf!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl Reflect for String {
    fn descriptor(&self) -> &'static TypeDescriptor {
        interned::<String>(|| TypeDescriptor::leaf::<String>("String", TypeKind::Primitive))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }
}

impl Reflect for PathBuf {
    fn descriptor(&self) -> &'static TypeDescriptor {
        interned::<PathBuf>(|| TypeDescriptor::leaf::<PathBuf>("PathBuf", TypeKind::Primitive))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn descriptor(&self) -> &'static TypeDescriptor {
        interned::<Option<T>>(|| {
            let name = Box::leak(
                format!("Option<{}>", std::any::type_name::<T>()).into_boxed_str(),
            );
            TypeDescriptor::nullable::<Option<T>>(name, unwrap_option::<T>)
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn descriptor(&self) -> &'static TypeDescriptor {
        interned::<Vec<T>>(|| {
            let name =
                Box::leak(format!("Vec<{}>", std::any::type_name::<T>()).into_boxed_str());
            TypeDescriptor::leaf::<Vec<T>>(name, TypeKind::List)
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }
}
