//! Descriptor registry: lookup and change notification over component metadata.
//!
//! The registry keeps one descriptor per implementing type within a kind and
//! answers the lookups job readers need: by type name, by display name (with
//! alias fallback for renamed components), by super-category and, for
//! renderers, by rendering format.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::types::{ComponentDescriptor, ComponentKind, SuperCategory};

/// Handle identifying a registered listener, used to remove it again.
pub type ListenerId = u64;

/// Callback notified whenever a provider's descriptor set changes.
pub trait DescriptorsUpdatedListener: Send + Sync {
    fn descriptors_updated(&self);
}

/// Lookup contract over component descriptors.
///
/// Job readers resolve serialized component references through this trait
/// rather than constructing descriptors ad hoc, so one registry stays the
/// authority on what is available.
pub trait DescriptorProvider: Send + Sync {
    /// Re-derives the descriptor list and notifies listeners. Providers
    /// backed by an external source rebuild here; the in-memory registry is
    /// already authoritative and only re-notifies.
    fn refresh(&mut self);

    /// All descriptors known to this provider.
    fn descriptors(&self) -> Vec<Arc<ComponentDescriptor>>;

    /// All descriptors of one component kind.
    fn descriptors_of_kind(&self, kind: ComponentKind) -> Vec<Arc<ComponentDescriptor>>;

    /// Exact lookup by implementing type.
    fn descriptor_by_type_name(
        &self,
        kind: ComponentKind,
        type_name: &str,
    ) -> Option<Arc<ComponentDescriptor>>;

    /// Lookup by display name, falling back to aliases when no display name
    /// matches. Blank names resolve to nothing.
    fn descriptor_by_display_name(
        &self,
        kind: ComponentKind,
        name: &str,
    ) -> Option<Arc<ComponentDescriptor>>;

    /// The super-categories represented by the registered components, in
    /// their natural order.
    fn super_categories(&self) -> Vec<SuperCategory>;

    /// All descriptors carrying the given super-category.
    fn descriptors_of_super_category(
        &self,
        category: SuperCategory,
    ) -> Vec<Arc<ComponentDescriptor>>;

    /// Renderer descriptors targeting the given rendering format.
    fn renderers_for_format(&self, format: &str) -> Vec<Arc<ComponentDescriptor>>;

    fn add_listener(&mut self, listener: Arc<dyn DescriptorsUpdatedListener>) -> ListenerId;

    /// Removes a listener by its handle. Takes effect for subsequent
    /// notifications; returns whether the handle was known.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
}

/// In-memory [`DescriptorProvider`], keyed by `(kind, type_name)`.
pub struct DescriptorRegistry {
    descriptors: HashMap<(ComponentKind, String), Arc<ComponentDescriptor>>,
    listeners: Vec<(ListenerId, Arc<dyn DescriptorsUpdatedListener>)>,
    next_listener_id: ListenerId,
}

impl Default for DescriptorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        DescriptorRegistry {
            descriptors: HashMap::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Registers a descriptor, replacing any previous descriptor for the
    /// same implementing type. Listeners are notified.
    pub fn register(&mut self, descriptor: ComponentDescriptor) {
        tracing::debug!(
            type_name = %descriptor.type_name,
            display_name = %descriptor.display_name,
            "registering component descriptor"
        );
        let key = (descriptor.kind, descriptor.type_name.clone());
        self.descriptors.insert(key, Arc::new(descriptor));
        self.notify_listeners();
    }

    /// Removes the descriptor for the given type. Listeners are notified
    /// only when something was actually removed.
    pub fn remove(&mut self, kind: ComponentKind, type_name: &str) -> bool {
        let removed = self
            .descriptors
            .remove(&(kind, type_name.to_string()))
            .is_some();
        if removed {
            tracing::debug!(%type_name, "removed component descriptor");
            self.notify_listeners();
        }
        removed
    }

    pub fn count(&self) -> usize {
        self.descriptors.len()
    }

    fn notify_listeners(&self) {
        for (_, listener) in &self.listeners {
            listener.descriptors_updated();
        }
    }
}

impl DescriptorProvider for DescriptorRegistry {
    fn refresh(&mut self) {
        self.notify_listeners();
    }

    fn descriptors(&self) -> Vec<Arc<ComponentDescriptor>> {
        self.descriptors.values().cloned().collect()
    }

    fn descriptors_of_kind(&self, kind: ComponentKind) -> Vec<Arc<ComponentDescriptor>> {
        self.descriptors
            .values()
            .filter(|d| d.kind == kind)
            .cloned()
            .collect()
    }

    fn descriptor_by_type_name(
        &self,
        kind: ComponentKind,
        type_name: &str,
    ) -> Option<Arc<ComponentDescriptor>> {
        self.descriptors.get(&(kind, type_name.to_string())).cloned()
    }

    fn descriptor_by_display_name(
        &self,
        kind: ComponentKind,
        name: &str,
    ) -> Option<Arc<ComponentDescriptor>> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let of_kind = self.descriptors.values().filter(|d| d.kind == kind);
        // An exact display-name match wins over any alias match, even when
        // another component carries the queried name as an alias.
        if let Some(found) = of_kind.clone().find(|d| d.display_name == name) {
            return Some(found.clone());
        }
        of_kind
            .filter(|d| d.aliases.iter().any(|alias| alias == name))
            .cloned()
            .next()
    }

    fn super_categories(&self) -> Vec<SuperCategory> {
        let categories: BTreeSet<SuperCategory> = self
            .descriptors
            .values()
            .flat_map(|d| d.super_categories.iter().copied())
            .collect();
        categories.into_iter().collect()
    }

    fn descriptors_of_super_category(
        &self,
        category: SuperCategory,
    ) -> Vec<Arc<ComponentDescriptor>> {
        self.descriptors
            .values()
            .filter(|d| d.super_categories.contains(&category))
            .cloned()
            .collect()
    }

    fn renderers_for_format(&self, format: &str) -> Vec<Arc<ComponentDescriptor>> {
        self.descriptors
            .values()
            .filter(|d| d.kind == ComponentKind::Renderer)
            .filter(|d| d.rendering_format.as_deref() == Some(format))
            .cloned()
            .collect()
    }

    fn add_listener(&mut self, listener: Arc<dyn DescriptorsUpdatedListener>) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}
