//! Error types for metadata resolution and dynamic access.
//!
//! Every operation in this crate fails synchronously at the point of
//! detection; there is no retry or partial-failure state. Messages name the
//! offending type and member so callers can surface them directly.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by descriptor lookup, dynamic access, and resource
/// extraction.
#[derive(Debug, Error)]
pub enum ReflectError {
    /// A required input was empty or otherwise unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No property with the given name exists on the type.
    #[error("Type '{type_name}' has no property called '{property}'.")]
    PropertyNotFound { type_name: String, property: String },

    /// The resolved property registered no getter.
    #[error("Type '{type_name}' property '{property}' cannot be read.")]
    PropertyNotReadable { type_name: String, property: String },

    /// The resolved property registered no setter.
    #[error("Type '{type_name}' property '{property}' cannot be written to.")]
    PropertyNotWritable { type_name: String, property: String },

    /// The property exists but registered no backing-field writer.
    #[error("Type '{type_name}' has no backing field for property '{property}'.")]
    BackingFieldNotFound { type_name: String, property: String },

    /// No method with the given name exists on the type.
    #[error("Type '{type_name}' does not contain method '{method}'.")]
    MethodNotFound { type_name: String, method: String },

    /// Dotted-path traversal reached an absent optional value.
    #[error("Value at segment '{segment}' of path '{path}' is None.")]
    NullSegment { path: String, segment: String },

    /// More than one attribute of the requested type where at most one was
    /// expected.
    #[error("Multiple attributes of type '{attribute}' exist on '{target}'.")]
    AmbiguousAttribute {
        attribute: &'static str,
        target: String,
    },

    /// A downcast or value conversion failed.
    #[error("Cannot convert value of type '{actual}' to '{expected}'.")]
    TypeMismatch { expected: String, actual: String },

    /// No registered constructor matches the given parameter signature.
    #[error("No matching constructor could be found for type '{type_name}'.")]
    ConstructorNotFound { type_name: String },

    /// No embedded resource name ends with the requested file name.
    #[error("Embedded resource for file '{file_name}' could not be found in registry '{registry}'.")]
    ResourceNotFound { file_name: String, registry: String },

    /// More than one embedded resource name ends with the requested file name.
    #[error("Multiple embedded resources in registry '{registry}' match file '{file_name}'.")]
    AmbiguousResource { file_name: String, registry: String },

    /// The destination file for a resource save already exists.
    #[error("Destination file already exists: {}", .path.display())]
    ResourceExists { path: PathBuf },

    /// An I/O failure during resource extraction.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReflectError {
    pub(crate) fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        ReflectError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub(crate) fn property_not_found(type_name: &str, property: &str) -> Self {
        ReflectError::PropertyNotFound {
            type_name: type_name.to_string(),
            property: property.to_string(),
        }
    }
}
