//! Embedded Resources
//!
//! Resolution and extraction of named binary blobs bundled into a registry,
//! typically from `include_bytes!`. Lookup is a case-insensitive suffix match
//! over the registry's name table; extraction writes a new file and never
//! overwrites an existing one.
//!
//! Listing and payload retrieval fail independently: an entry present in the
//! name table may still carry no readable bytes, in which case saving it
//! produces an empty file rather than an error.

use crate::error::ReflectError;
use crate::registry::Registry;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A resolved embedded resource: registry, fully-qualified resource name, and
/// the file name it was looked up by.
pub struct EmbeddedResource<'r> {
    registry: &'r Registry,
    resource_name: &'static str,
    file_name: String,
}

impl<'r> std::fmt::Debug for EmbeddedResource<'r> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedResource")
            .field("resource_name", &self.resource_name)
            .field("file_name", &self.file_name)
            .finish()
    }
}

impl<'r> EmbeddedResource<'r> {
    /// Resolve `file_name` against the registry's resource name table.
    ///
    /// Exactly one entry must end with the file name, compared ignoring ASCII
    /// case; zero matches fail with [`ReflectError::ResourceNotFound`] and
    /// several with [`ReflectError::AmbiguousResource`].
    pub fn locate(registry: &'r Registry, file_name: &str) -> Result<Self, ReflectError> {
        if file_name.is_empty() {
            return Err(ReflectError::InvalidArgument(
                "File name is empty.".to_string(),
            ));
        }
        let needle = file_name.to_ascii_lowercase();
        let mut matches = registry
            .resources()
            .iter()
            .filter(|entry| entry.name().to_ascii_lowercase().ends_with(&needle));
        let resource_name = match (matches.next(), matches.next()) {
            (None, _) => {
                return Err(ReflectError::ResourceNotFound {
                    file_name: file_name.to_string(),
                    registry: registry.name().to_string(),
                })
            }
            (Some(entry), None) => entry.name(),
            (Some(_), Some(_)) => {
                return Err(ReflectError::AmbiguousResource {
                    file_name: file_name.to_string(),
                    registry: registry.name().to_string(),
                })
            }
        };
        debug!(
            registry = registry.name(),
            file_name, resource_name, "resolved embedded resource"
        );
        Ok(EmbeddedResource {
            registry,
            resource_name,
            file_name: file_name.to_string(),
        })
    }

    /// The registry this resource belongs to.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// The fully-qualified resource name that matched.
    pub fn resource_name(&self) -> &'static str {
        self.resource_name
    }

    /// The file name the resource was looked up by.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The resource payload, when the entry carries readable bytes.
    pub fn data(&self) -> Option<&'static [u8]> {
        self.registry
            .resources()
            .iter()
            .find(|entry| entry.name() == self.resource_name)
            .and_then(|entry| entry.data())
    }

    /// Save the resource to a new file at `path`.
    ///
    /// The destination must not exist; an existing file fails with
    /// [`ReflectError::ResourceExists`]. A payload-less entry still produces
    /// an empty file.
    pub fn save(&self, path: &Path) -> Result<PathBuf, ReflectError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::AlreadyExists => ReflectError::ResourceExists {
                    path: path.to_path_buf(),
                },
                _ => ReflectError::Io(err),
            })?;
        if let Some(data) = self.data() {
            file.write_all(data)?;
        }
        debug!(
            resource_name = self.resource_name,
            path = %path.display(),
            "saved embedded resource"
        );
        Ok(path.to_path_buf())
    }
}
