use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rowkit_core::config::resolve_with_base;
use rowkit_core::registry::{
    DescriptorProvider, DescriptorRegistry, DescriptorsUpdatedListener,
};
use rowkit_core::types::{
    ComponentDescriptor, ComponentKind, InputColumn, InputRow, SuperCategory, ValueKind,
};
use tempfile::TempDir;

fn transformer(type_name: &str, display_name: &str) -> ComponentDescriptor {
    ComponentDescriptor::new(ComponentKind::Transformer, type_name, display_name)
}

struct CountingListener {
    calls: AtomicUsize,
}

impl CountingListener {
    fn new() -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0) })
    }

    fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DescriptorsUpdatedListener for CountingListener {
    fn descriptors_updated(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn register_and_lookup_by_type_name() {
    let mut registry = DescriptorRegistry::new();
    registry.register(transformer("demo::Concat", "Concatenate"));

    let found = registry
        .descriptor_by_type_name(ComponentKind::Transformer, "demo::Concat")
        .expect("registered type resolves");
    assert_eq!(found.display_name, "Concatenate");

    assert!(registry
        .descriptor_by_type_name(ComponentKind::Analyzer, "demo::Concat")
        .is_none(), "lookup is kind-scoped");
    assert!(registry
        .descriptor_by_type_name(ComponentKind::Transformer, "demo::Missing")
        .is_none());
}

#[test]
fn reregistering_same_type_replaces_descriptor() {
    let mut registry = DescriptorRegistry::new();
    registry.register(transformer("demo::Concat", "Concatenate"));
    registry.register(transformer("demo::Concat", "Concatenate fields"));

    assert_eq!(registry.count(), 1, "one descriptor per implementing type");
    let found = registry
        .descriptor_by_type_name(ComponentKind::Transformer, "demo::Concat")
        .expect("still resolvable");
    assert_eq!(found.display_name, "Concatenate fields");
}

#[test]
fn display_name_lookup_prefers_exact_match_over_alias() {
    let mut registry = DescriptorRegistry::new();
    registry.register(transformer("demo::Concat", "Concatenate"));
    // Another component carries "Concatenate" as a legacy alias.
    registry.register(transformer("demo::Join", "Join columns").with_alias("Concatenate"));

    let found = registry
        .descriptor_by_display_name(ComponentKind::Transformer, "Concatenate")
        .expect("resolves");
    assert_eq!(found.type_name, "demo::Concat", "exact display name wins");
}

#[test]
fn display_name_lookup_falls_back_to_alias() {
    let mut registry = DescriptorRegistry::new();
    registry.register(transformer("demo::Join", "Join columns").with_alias("Concatenate"));

    let found = registry
        .descriptor_by_display_name(ComponentKind::Transformer, "Concatenate")
        .expect("alias resolves");
    assert_eq!(found.type_name, "demo::Join");
}

#[test]
fn blank_display_name_resolves_to_nothing() {
    let mut registry = DescriptorRegistry::new();
    registry.register(transformer("demo::Concat", "Concatenate"));

    assert!(registry
        .descriptor_by_display_name(ComponentKind::Transformer, "")
        .is_none());
    assert!(registry
        .descriptor_by_display_name(ComponentKind::Transformer, "   ")
        .is_none());
}

#[test]
fn same_display_name_allowed_across_kinds() {
    let mut registry = DescriptorRegistry::new();
    registry.register(transformer("demo::Dedup", "Duplicate detection"));
    registry.register(ComponentDescriptor::new(
        ComponentKind::Analyzer,
        "demo::DedupAnalyzer",
        "Duplicate detection",
    ));

    let t = registry
        .descriptor_by_display_name(ComponentKind::Transformer, "Duplicate detection")
        .expect("transformer resolves");
    let a = registry
        .descriptor_by_display_name(ComponentKind::Analyzer, "Duplicate detection")
        .expect("analyzer resolves");
    assert_eq!(t.type_name, "demo::Dedup");
    assert_eq!(a.type_name, "demo::DedupAnalyzer");
}

#[test]
fn super_categories_are_deduplicated_and_ordered() {
    let mut registry = DescriptorRegistry::new();
    registry.register(
        transformer("demo::Concat", "Concatenate")
            .with_super_category(SuperCategory::Transformation),
    );
    registry.register(
        transformer("demo::Search", "Search").with_super_category(SuperCategory::Improvement),
    );
    registry.register(
        transformer("demo::Clean", "Clean").with_super_category(SuperCategory::Improvement),
    );

    assert_eq!(
        registry.super_categories(),
        vec![SuperCategory::Transformation, SuperCategory::Improvement]
    );

    let improving = registry.descriptors_of_super_category(SuperCategory::Improvement);
    assert_eq!(improving.len(), 2);
    let none = registry.descriptors_of_super_category(SuperCategory::Output);
    assert!(none.is_empty());
}

#[test]
fn renderers_resolve_by_rendering_format() {
    let mut registry = DescriptorRegistry::new();
    registry.register(
        ComponentDescriptor::new(ComponentKind::Renderer, "demo::HtmlTable", "HTML table")
            .with_rendering_format("html"),
    );
    registry.register(
        ComponentDescriptor::new(ComponentKind::Renderer, "demo::TextTable", "Text table")
            .with_rendering_format("text"),
    );
    // A transformer is never a renderer match, whatever its format field says.
    registry.register(transformer("demo::Concat", "Concatenate"));

    let html = registry.renderers_for_format("html");
    assert_eq!(html.len(), 1);
    assert_eq!(html[0].type_name, "demo::HtmlTable");
    assert!(registry.renderers_for_format("pdf").is_empty());
}

#[test]
fn listeners_are_notified_on_register_remove_and_refresh() {
    let mut registry = DescriptorRegistry::new();
    let listener = CountingListener::new();
    let id = registry.add_listener(listener.clone());

    registry.register(transformer("demo::Concat", "Concatenate"));
    assert_eq!(listener.count(), 1);

    assert!(registry.remove(ComponentKind::Transformer, "demo::Concat"));
    assert_eq!(listener.count(), 2);

    // Removing something absent changes nothing and stays silent.
    assert!(!registry.remove(ComponentKind::Transformer, "demo::Concat"));
    assert_eq!(listener.count(), 2);

    registry.refresh();
    assert_eq!(listener.count(), 3);

    assert!(registry.remove_listener(id));
    registry.register(transformer("demo::Join", "Join columns"));
    assert_eq!(listener.count(), 3, "removed listener is no longer notified");
    assert!(!registry.remove_listener(id), "handle is gone after removal");
}

#[test]
fn input_row_cell_access() {
    let row = InputRow::new()
        .with_cell("name", serde_json::Value::from("Ada"))
        .with_cell("age", serde_json::Value::from(36));

    assert_eq!(row.len(), 2);
    assert_eq!(row.text(&InputColumn::text("name")), Some("Ada"));
    assert_eq!(
        row.text(&InputColumn::text("age")),
        None,
        "non-text cells do not read as text"
    );
    assert_eq!(row.text(&InputColumn::text("missing")), None);
    assert_eq!(row.get("age"), Some(&serde_json::Value::from(36)));
}

#[test]
fn output_columns_keep_declaration_order() {
    let columns = rowkit_core::types::OutputColumns::new("Search result", ValueKind::Map)
        .and("Score", ValueKind::Number);
    assert_eq!(columns.len(), 2);
    assert_eq!(columns.names(), vec!["Search result", "Score"]);
}

#[test]
fn resolve_with_base_joins_relative_paths() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path();

    let resolved = resolve_with_base(base, "indexes/search");
    assert_eq!(resolved, base.join("indexes/search"));

    let absolute = base.join("elsewhere");
    let resolved = resolve_with_base(base, absolute.to_string_lossy());
    assert_eq!(resolved, absolute);
}
