//! Type Registry
//!
//! The registry is the compiled-unit analog: a named, versioned collection of
//! type descriptors in declaration order, plus embedded resources and
//! registry-level attributes. A host crate typically builds one in a `Lazy`
//! static and hands it to tooling.

use crate::attribute::AttributeSet;
use crate::descriptor::TypeDescriptor;
use crate::error::ReflectError;
use crate::reflect::Described;
use crate::types::Case;
use semver::Version;
use std::any::Any;

/// A declaration-ordered collection of described types with version and
/// resource metadata.
pub struct Registry {
    name: &'static str,
    version: Version,
    attributes: AttributeSet,
    types: Vec<&'static TypeDescriptor>,
    resources: Vec<ResourceEntry>,
}

/// One entry in the registry's resource name table.
///
/// The name table and the payload are independent: an entry can be listed
/// without carrying readable bytes.
#[derive(Debug, Clone, Copy)]
pub struct ResourceEntry {
    pub(crate) name: &'static str,
    pub(crate) data: Option<&'static [u8]>,
}

impl ResourceEntry {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn data(&self) -> Option<&'static [u8]> {
        self.data
    }
}

/// Registry-level version attribute, the file-version analog.
///
/// Retrieved through the single-attribute path; attaching two is ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileVersion(pub Version);

impl Registry {
    /// Start building a registry.
    pub fn builder(name: &'static str, version: Version) -> RegistryBuilder {
        RegistryBuilder {
            inner: Registry {
                name,
                version,
                attributes: AttributeSet::new(name),
                types: Vec::new(),
                resources: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The registry's own version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The file version, when a [`FileVersion`] attribute is attached.
    pub fn file_version(&self) -> Result<Option<&Version>, ReflectError> {
        Ok(self.attributes.get::<FileVersion>()?.map(|fv| &fv.0))
    }

    /// Registry-level attributes.
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Single registry-level attribute of type `A`; at-most-one semantics.
    pub fn attribute<A: Any>(&self) -> Result<Option<&A>, ReflectError> {
        self.attributes.get::<A>()
    }

    /// Registered descriptors, in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &'static TypeDescriptor> + '_ {
        self.types.iter().copied()
    }

    /// Find a registered type by name.
    pub fn find_type(&self, name: &str, case: Case) -> Option<&'static TypeDescriptor> {
        self.types
            .iter()
            .copied()
            .find(|descriptor| case.matches(descriptor.name(), name))
    }

    /// All registered types whose base chain contains `T`, in declaration
    /// order.
    pub fn subclasses_of<T: Described>(&self) -> Vec<&'static TypeDescriptor> {
        let target = <T as Described>::descriptor();
        self.types
            .iter()
            .copied()
            .filter(|descriptor| descriptor.derives_from(target))
            .collect()
    }

    /// All registered types living in `namespace` or nested modules of it.
    pub fn types_in_module(
        &self,
        namespace: &str,
    ) -> Result<Vec<&'static TypeDescriptor>, ReflectError> {
        let mut matches = Vec::new();
        for descriptor in self.types() {
            if descriptor.is_in_module(namespace)? {
                matches.push(descriptor);
            }
        }
        Ok(matches)
    }

    /// The resource name table, in declaration order.
    pub fn resources(&self) -> &[ResourceEntry] {
        &self.resources
    }
}

/// Builder for [`Registry`].
pub struct RegistryBuilder {
    inner: Registry,
}

impl RegistryBuilder {
    /// Register a described type. Declaration order is preserved.
    pub fn register<T: Described>(mut self) -> Self {
        self.inner.types.push(<T as Described>::descriptor());
        self
    }

    /// Attach a registry-level attribute.
    pub fn attribute<A: Any + Send + Sync>(mut self, attribute: A) -> Self {
        self.inner.attributes.push(attribute);
        self
    }

    /// Add a resource with payload bytes.
    pub fn resource(self, name: &'static str, data: &'static [u8]) -> Self {
        self.resource_entry(name, Some(data))
    }

    /// Add a resource name-table entry, optionally without payload.
    pub fn resource_entry(mut self, name: &'static str, data: Option<&'static [u8]>) -> Self {
        self.inner.resources.push(ResourceEntry { name, data });
        self
    }

    pub fn build(self) -> Registry {
        self.inner
    }
}
