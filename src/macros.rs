//! Registration Macros
//!
//! `impl_reflect!` generates the mechanical `Reflect` plumbing for a type
//! that implements [`Described`](crate::Described); `reflect_enum!` describes
//! a unit enum in one line, including variant-name parsing for the coercing
//! write paths.

/// Implement [`Reflect`](crate::Reflect) for a type that already implements
/// [`Described`](crate::Described).
#[macro_export]
macro_rules! impl_reflect {
    ($ty:ty) => {
        impl $crate::Reflect for $ty {
            fn descriptor(&self) -> &'static $crate::TypeDescriptor {
                <$ty as $crate::Described>::descriptor()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn as_reflect(&self) -> &dyn $crate::Reflect {
                self
            }

            fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
                self
            }
        }
    };
}

/// Describe a unit enum: descriptor with variant names, `Reflect`, and
/// variant-name parsing via [`FromValue`](crate::FromValue).
///
/// ```
/// use mirror::reflect_enum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// pub enum Color {
///     Red,
///     Green,
///     Blue,
/// }
///
/// reflect_enum!(Color { Red, Green, Blue });
/// ```
#[macro_export]
macro_rules! reflect_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::Described for $ty {
            fn descriptor() -> &'static $crate::TypeDescriptor {
                static DESCRIPTOR: $crate::__private::Lazy<$crate::TypeDescriptor> =
                    $crate::__private::Lazy::new(|| {
                        $crate::TypeDescriptor::builder::<$ty>(stringify!($ty), module_path!())
                            .kind($crate::TypeKind::Enum)
                            .variants(&[$(stringify!($variant)),+])
                            .build()
                    });
                &DESCRIPTOR
            }
        }

        $crate::impl_reflect!($ty);

        impl $crate::FromValue for $ty {
            fn from_value(value: $crate::Value) -> Result<Self, $crate::ReflectError> {
                match value {
                    $crate::Value::Str(name) => {
                        $(
                            if name == stringify!($variant) {
                                return Ok($ty::$variant);
                            }
                        )+
                        Err($crate::ReflectError::TypeMismatch {
                            expected: stringify!($ty).to_string(),
                            actual: format!("variant name '{}'", name),
                        })
                    }
                    other => Err($crate::ReflectError::TypeMismatch {
                        expected: stringify!($ty).to_string(),
                        actual: other.type_name().to_string(),
                    }),
                }
            }
        }
    };
}
