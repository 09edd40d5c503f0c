//! Opaque, type-keyed capability storage.
//!
//! A capability is an extractor-attached fact about an extension (an XML
//! namespace declaration, for example). The framework never interprets
//! capability values; it only stores one instance per capability type and
//! hands them back by type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// An opaque capability value.
pub type Capability = Arc<dyn Any + Send + Sync>;

/// One capability instance per capability type.
#[derive(Default, Clone)]
pub struct CapabilitySet {
    entries: HashMap<TypeId, Capability>,
}

impl CapabilitySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a capability. A later insert of the same type replaces the
    /// earlier instance.
    pub fn insert<T: Any + Send + Sync>(&mut self, capability: T) {
        self.entries.insert(TypeId::of::<T>(), Arc::new(capability));
    }

    /// Attach an already-boxed capability, keyed by its concrete type.
    pub fn insert_opaque(&mut self, capability: Capability) {
        self.entries.insert((*capability).type_id(), capability);
    }

    /// Look up the capability of type `T`, if attached.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|c| c.downcast_ref::<T>())
    }

    /// Whether a capability of type `T` is attached.
    pub fn has<T: Any + Send + Sync>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of attached capabilities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no capability is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilitySet")
            .field("len", &self.entries.len())
            .finish()
    }
}
