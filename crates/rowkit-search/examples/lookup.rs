//! Build a throwaway index and run one lookup through the transformer.
//!
//! cargo run -p rowkit-search --example lookup

use rowkit_core::traits::Transformer;
use rowkit_core::types::{InputColumn, InputRow};
use rowkit_search::{SearchIndex, SearchTransformer};

fn main() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let fields = vec!["title".to_string(), "body".to_string()];
    let index = SearchIndex::create(dir.path(), &fields)?;
    index.add_documents(&[
        vec![
            ("title".to_string(), "Sourdough starter".to_string()),
            ("body".to_string(), "Feed the starter daily with flour and water.".to_string()),
        ],
        vec![
            ("title".to_string(), "Cast iron care".to_string()),
            ("body".to_string(), "Season the pan with a thin coat of oil.".to_string()),
        ],
    ])?;

    let transformer = SearchTransformer::new(InputColumn::text("query"), index.searcher()?);
    let row = InputRow::new().with_cell("query", serde_json::Value::from("feed the starter"));
    let cells = transformer.transform(&row)?;
    println!("{}", serde_json::to_string_pretty(&cells)?);
    Ok(())
}
