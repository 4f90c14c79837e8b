//! Component registry: bom-ref indexed lookup and content-id resolution.

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::cid::{ContentId, ContentRef};
use crate::model::document::{Component, IntegrityRecord};
use crate::model::metadata::HashAlgorithm;
use crate::store::StableId;

/// Index of components keyed by bom-ref, preserving document order.
///
/// Duplicate refs follow last-write-wins: the later component replaces the
/// earlier one in place, and the collision is counted. Lookup never fails;
/// a ref that is absent, or present without a usable SHA-256 hash, resolves
/// to [`ContentRef::Unresolved`].
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: IndexMap<String, Component>,
    collision_count: usize,
}

impl ComponentRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document's components in order.
    #[must_use]
    pub fn index(components: Vec<Component>) -> Self {
        let mut registry = Self::new();
        for component in components {
            registry.add_component(component);
        }
        registry
    }

    /// Add a component, replacing any earlier one with the same ref.
    ///
    /// Returns `true` if the component was newly added, `false` if it
    /// replaced an existing entry.
    pub fn add_component(&mut self, component: Component) -> bool {
        let key = component.bom_ref.clone();
        if let Some(previous) = self.components.insert(key, component) {
            self.collision_count += 1;
            debug!(
                bom_ref = %previous.bom_ref,
                "duplicate bom-ref, keeping the later component"
            );
            false
        } else {
            true
        }
    }

    /// Number of duplicate refs seen during indexing
    #[must_use]
    pub const fn collision_count(&self) -> usize {
        self.collision_count
    }

    /// Log a summary if any collisions were detected
    pub fn log_collision_summary(&self) {
        if self.collision_count > 0 {
            info!(
                collisions = self.collision_count,
                "duplicate bom-refs resolved last-write-wins"
            );
        }
    }

    /// Look up a component by ref
    #[must_use]
    pub fn get(&self, bom_ref: &str) -> Option<&Component> {
        self.components.get(bom_ref)
    }

    /// Mutable lookup by ref
    pub fn get_mut(&mut self, bom_ref: &str) -> Option<&mut Component> {
        self.components.get_mut(bom_ref)
    }

    /// Component name for a ref, when the ref is indexed
    #[must_use]
    pub fn name_of(&self, bom_ref: &str) -> Option<&str> {
        self.get(bom_ref).map(|c| c.name.as_str())
    }

    /// Derive the content id for a ref from its first SHA-256 hash.
    ///
    /// Returns `None` when the ref is absent, carries no SHA-256 hash, or
    /// carries one that is not valid hex.
    #[must_use]
    pub fn content_id_of(&self, bom_ref: &str) -> Option<ContentId> {
        let component = self.get(bom_ref)?;
        let hash = component
            .security
            .hashes
            .iter()
            .find(|h| h.algorithm == HashAlgorithm::Sha256)?;
        match ContentId::from_sha256_hex(&hash.value) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(bom_ref, error = %e, "unusable SHA-256 hash, treating as unresolved");
                None
            }
        }
    }

    /// Resolve a ref to a content address. Never fails.
    #[must_use]
    pub fn resolve(&self, bom_ref: &str) -> ContentRef {
        ContentRef::from(self.content_id_of(bom_ref))
    }

    /// Attach an integrity record to a component. Returns `false` when the
    /// ref is not indexed.
    pub fn attach_integrity(&mut self, bom_ref: &str, record: IntegrityRecord) -> bool {
        match self.get_mut(bom_ref) {
            Some(component) => {
                component.integrity = Some(record);
                true
            }
            None => false,
        }
    }

    /// Record a finalized declaration against a component's integrity
    /// record. Returns `false` when the ref or its record is missing.
    pub fn attach_declaration(&mut self, bom_ref: &str, declaration: StableId) -> bool {
        match self.get_mut(bom_ref).and_then(|c| c.integrity.as_mut()) {
            Some(integrity) => {
                integrity.add_declaration(declaration);
                true
            }
            None => false,
        }
    }

    /// Iterate components in document order
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Iterate refs in document order
    pub fn refs(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Number of indexed components
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when no components are indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
