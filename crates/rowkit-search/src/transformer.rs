//! The search transformer component: looks up each row's query text in the
//! index and emits the best-matching document with its score.

use serde_json::Value;

use rowkit_core::traits::Transformer;
use rowkit_core::types::{
    ComponentDescriptor, ComponentKind, InputColumn, InputRow, OutputColumns, SuperCategory,
    ValueKind,
};

use crate::index::IndexSearcher;

/// Display name the transformer is registered under.
pub const DISPLAY_NAME: &str = "Search in search index";

/// Former display name, kept as an alias so old job definitions resolve.
pub const ALIAS: &str = "Search index lookup";

pub struct SearchTransformer {
    search_input: InputColumn,
    searcher: IndexSearcher,
}

impl SearchTransformer {
    pub fn new(search_input: InputColumn, searcher: IndexSearcher) -> Self {
        Self {
            search_input,
            searcher,
        }
    }

    /// The descriptor this component is registered under.
    pub fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new(
            ComponentKind::Transformer,
            "rowkit_search::SearchTransformer",
            DISPLAY_NAME,
        )
        .with_alias(ALIAS)
        .with_super_category(SuperCategory::Improvement)
        .with_description(
            "Looks up each row's query text in a full-text search index and \
             emits the best match together with its score.",
        )
    }

    /// The output emitted when there is nothing to search for or no match:
    /// no document, score zero.
    fn empty_result() -> Vec<Value> {
        vec![Value::Null, Value::from(0)]
    }
}

impl Transformer for SearchTransformer {
    fn output_columns(&self) -> OutputColumns {
        OutputColumns::new("Search result", ValueKind::Map).and("Score", ValueKind::Number)
    }

    fn transform(&self, row: &InputRow) -> anyhow::Result<Vec<Value>> {
        let Some(query_text) = row.text(&self.search_input) else {
            return Ok(Self::empty_result());
        };
        let query_text = query_text.trim();
        if query_text.is_empty() {
            return Ok(Self::empty_result());
        }

        let Some(outcome) = self.searcher.search_best(query_text)? else {
            tracing::debug!(query = query_text, "no match in search index");
            return Ok(Self::empty_result());
        };

        let score = serde_json::Number::from_f64(f64::from(outcome.score))
            .map(Value::Number)
            .unwrap_or_else(|| Value::from(0));
        Ok(vec![Value::Object(outcome.fields), score])
    }
}
