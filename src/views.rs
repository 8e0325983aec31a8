//! Metadata Views
//!
//! Read-only, serializable summaries of descriptors and registries for
//! diagnostics and tooling. Summaries are snapshots; they hold names and
//! shapes only, never live accessors.

use crate::descriptor::TypeDescriptor;
use crate::registry::Registry;
use crate::types::{TypeKind, Visibility};
use serde::{Deserialize, Serialize};

/// Summary of a single property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySummary {
    pub name: String,
    pub visibility: Visibility,
    pub type_name: String,
    pub readable: bool,
    pub writable: bool,
    pub has_backing: bool,
}

/// Summary of a described type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSummary {
    pub name: String,
    pub module_path: String,
    pub kind: TypeKind,
    pub base: Option<String>,
    pub properties: Vec<PropertySummary>,
    pub static_properties: Vec<String>,
    pub constants: Vec<String>,
    pub methods: Vec<String>,
    pub constructor_count: usize,
    pub variants: Vec<String>,
}

/// Summary of a resource name-table entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub name: String,
    pub size: Option<usize>,
}

/// Summary of a whole registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySummary {
    pub name: String,
    pub version: String,
    pub types: Vec<TypeSummary>,
    pub resources: Vec<ResourceSummary>,
}

/// Build a snapshot of one descriptor.
pub fn type_summary(descriptor: &TypeDescriptor) -> TypeSummary {
    TypeSummary {
        name: descriptor.name().to_string(),
        module_path: descriptor.module_path().to_string(),
        kind: descriptor.kind(),
        base: descriptor.base().map(|base| base.name().to_string()),
        properties: descriptor
            .properties()
            .map(|property| PropertySummary {
                name: property.name().to_string(),
                visibility: property.visibility(),
                type_name: property.type_name().to_string(),
                readable: property.is_readable(),
                writable: property.is_writable(),
                has_backing: property.has_backing(),
            })
            .collect(),
        static_properties: descriptor
            .static_properties()
            .map(|property| property.name().to_string())
            .collect(),
        constants: descriptor
            .constants(None)
            .map(|constant| constant.name().to_string())
            .collect(),
        methods: descriptor
            .methods()
            .map(|method| method.name().to_string())
            .collect(),
        constructor_count: descriptor.constructors().len(),
        variants: descriptor
            .variants()
            .iter()
            .map(|variant| variant.to_string())
            .collect(),
    }
}

/// Build a snapshot of a registry and every type in it.
pub fn registry_summary(registry: &Registry) -> RegistrySummary {
    RegistrySummary {
        name: registry.name().to_string(),
        version: registry.version().to_string(),
        types: registry.types().map(type_summary).collect(),
        resources: registry
            .resources()
            .iter()
            .map(|entry| ResourceSummary {
                name: entry.name().to_string(),
                size: entry.data().map(|data| data.len()),
            })
            .collect(),
    }
}
