//! Attribute Inspection
//!
//! Attributes are arbitrary values attached to types, members, and registries
//! at descriptor-build time. Retrieval enforces an at-most-one policy: zero
//! matches yield `None`, one match yields the instance, and two or more are
//! an error. The policy is applied as an explicit post-filter over the stored
//! entries, independent of how many were registered.

use crate::error::ReflectError;
use std::any::{type_name, Any};

/// Attributes attached to a single target.
pub struct AttributeSet {
    target: String,
    entries: Vec<Box<dyn Any + Send + Sync>>,
}

impl AttributeSet {
    pub(crate) fn new(target: impl Into<String>) -> Self {
        AttributeSet {
            target: target.into(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn push<A: Any + Send + Sync>(&mut self, attribute: A) {
        self.entries.push(Box::new(attribute));
    }

    /// The name of the type, member, or registry these attributes belong to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of attached attributes of any type.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter_of<A: Any>(&self) -> impl Iterator<Item = &A> {
        self.entries
            .iter()
            .filter_map(|entry| entry.as_ref().downcast_ref::<A>())
    }

    /// Retrieve the single attached attribute of type `A`.
    ///
    /// Returns `None` when absent and [`ReflectError::AmbiguousAttribute`]
    /// when more than one instance is attached.
    pub fn get<A: Any>(&self) -> Result<Option<&A>, ReflectError> {
        let mut matches = self.iter_of::<A>();
        match (matches.next(), matches.next()) {
            (None, _) => Ok(None),
            (Some(attribute), None) => Ok(Some(attribute)),
            (Some(_), Some(_)) => Err(ReflectError::AmbiguousAttribute {
                attribute: type_name::<A>(),
                target: self.target.clone(),
            }),
        }
    }

    /// Whether exactly one attribute of type `A` is attached.
    ///
    /// True iff [`get`](Self::get) would return a value; the ambiguity error
    /// propagates.
    pub fn has<A: Any>(&self) -> Result<bool, ReflectError> {
        Ok(self.get::<A>()?.is_some())
    }
}

impl std::fmt::Debug for AttributeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeSet")
            .field("target", &self.target)
            .field("len", &self.entries.len())
            .finish()
    }
}
