//! Domain types shared by the component model and the descriptor registry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// The four pluggable component families the framework hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Analyzer,
    Transformer,
    Filter,
    Renderer,
}

/// Coarse grouping used to organize components in front-ends.
///
/// Ordered so category listings come out stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SuperCategory {
    Transformation,
    Improvement,
    Analysis,
    Output,
}

impl fmt::Display for SuperCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SuperCategory::Transformation => "Transformation",
            SuperCategory::Improvement => "Improvement",
            SuperCategory::Analysis => "Analysis",
            SuperCategory::Output => "Output",
        };
        f.write_str(label)
    }
}

/// Metadata record describing one pluggable component.
///
/// - `type_name`: stable identity of the implementing type; one descriptor
///   exists per type within a kind
/// - `display_name`: the human-facing name front-ends show and serialized
///   jobs refer to
/// - `aliases`: former display names kept so old job definitions still
///   resolve
/// - `rendering_format`: set for renderers only, identifies the output
///   format family the renderer targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub type_name: String,
    pub kind: ComponentKind,
    pub display_name: String,
    pub aliases: Vec<String>,
    pub super_categories: BTreeSet<SuperCategory>,
    pub description: Option<String>,
    pub rendering_format: Option<String>,
}

impl ComponentDescriptor {
    pub fn new(
        kind: ComponentKind,
        type_name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            kind,
            display_name: display_name.into(),
            aliases: Vec::new(),
            super_categories: BTreeSet::new(),
            description: None,
            rendering_format: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_super_category(mut self, category: SuperCategory) -> Self {
        self.super_categories.insert(category);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_rendering_format(mut self, format: impl Into<String>) -> Self {
        self.rendering_format = Some(format.into());
        self
    }
}

/// Coarse runtime type of a cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Text,
    Number,
    Bool,
    Map,
}

/// Named, typed reference to a column a component reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputColumn {
    pub name: String,
    pub kind: ValueKind,
}

impl InputColumn {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self { name: name.into(), kind }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Text)
    }
}

/// Ordered list of the columns a transformer emits.
///
/// A transformer always emits at least one column, so construction starts
/// from the first column and grows from there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputColumns {
    columns: Vec<(String, ValueKind)>,
}

impl OutputColumns {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self { columns: vec![(name.into(), kind)] }
    }

    pub fn and(mut self, name: impl Into<String>, kind: ValueKind) -> Self {
        self.columns.push((name.into(), kind));
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, ValueKind)> {
        self.columns.iter()
    }
}

/// One row under processing. Cells keep insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputRow {
    cells: serde_json::Map<String, Value>,
}

impl InputRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cell(mut self, column: impl Into<String>, value: Value) -> Self {
        self.put(column, value);
        self
    }

    pub fn put(&mut self, column: impl Into<String>, value: Value) {
        self.cells.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    /// Reads the cell under `column` as text, `None` when absent or non-text.
    pub fn text(&self, column: &InputColumn) -> Option<&str> {
        self.cells.get(&column.name).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
