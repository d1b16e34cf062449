use crate::types::{InputRow, OutputColumns};
use serde_json::Value;

/// A transformer maps each input row to a fixed set of output cells.
///
/// The returned cells align positionally with `output_columns()`.
pub trait Transformer: Send + Sync {
    fn output_columns(&self) -> OutputColumns;

    fn init(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn transform(&self, row: &InputRow) -> anyhow::Result<Vec<Value>>;
}

/// An analyzer consumes every row and produces one result at the end.
pub trait Analyzer: Send + Sync {
    fn run(&mut self, row: &InputRow) -> anyhow::Result<()>;
    fn result(&self) -> anyhow::Result<Value>;
}

/// A filter routes each row into one of a fixed set of outcome categories.
pub trait Filter: Send + Sync {
    fn categories(&self) -> Vec<String>;
    fn categorize(&self, row: &InputRow) -> anyhow::Result<String>;
}

/// A renderer turns a component result into a representation for one
/// rendering format (identified by the same string carried on its descriptor).
pub trait Renderer: Send + Sync {
    fn rendering_format(&self) -> &str;
    fn render(&self, value: &Value) -> anyhow::Result<String>;
}
