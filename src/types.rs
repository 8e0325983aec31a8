//! Core types shared across the metadata model.

use serde::{Deserialize, Serialize};

/// Declared accessibility of a registered member.
///
/// Lookup never filters on visibility (non-public members resolve the same
/// way public ones do); the value is carried as metadata and used where an
/// operation offers an explicit filter, such as constant enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
}

/// Name-matching mode for member resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Case {
    /// Names must match exactly.
    #[default]
    Sensitive,
    /// Names match ignoring ASCII case.
    Insensitive,
}

impl Case {
    /// Compare a registered member name against a queried name.
    pub fn matches(self, registered: &str, queried: &str) -> bool {
        match self {
            Case::Sensitive => registered == queried,
            Case::Insensitive => registered.eq_ignore_ascii_case(queried),
        }
    }
}

/// Shape of a described type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    /// A struct with registered properties.
    Struct,
    /// A unit enum with named variants.
    Enum,
    /// A leaf value type (numbers, strings, booleans).
    Primitive,
    /// An optional wrapper; traversal unwraps it to the payload.
    Nullable,
    /// A sequence leaf.
    List,
}
