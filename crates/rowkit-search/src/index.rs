use std::path::Path;

use serde_json::Map;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{Schema, Value as _};
use tantivy::{Index, TantivyDocument};

use crate::error::{Result, SearchError};
use crate::tantivy_utils::{build_schema, register_tokenizer, SEARCH_FIELD};

/// One document to index: field name → value, in insertion order. Field
/// names must match the schema the index was created with.
pub type SearchDocument = Vec<(String, String)>;

/// Tantivy index handle: creation, ingestion and searcher snapshots.
pub struct SearchIndex {
    index: Index,
    search_field: tantivy::schema::Field,
}

impl SearchIndex {
    /// Creates a fresh index at `dir`, replacing whatever was there.
    pub fn create(dir: &Path, field_names: &[String]) -> Result<Self> {
        if dir.exists() {
            std::fs::remove_dir_all(dir)?;
        }
        std::fs::create_dir_all(dir)?;
        let schema = build_schema(field_names);
        let index = Index::create_in_dir(dir, schema.clone())?;
        register_tokenizer(&index);
        let search_field = schema.get_field(SEARCH_FIELD)?;
        Ok(Self { index, search_field })
    }

    /// Opens an existing index, re-registering the tokenizer.
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.join("meta.json").exists() {
            return Err(SearchError::Index(format!(
                "no search index at {}",
                dir.display()
            )));
        }
        let index = Index::open_in_dir(dir)?;
        register_tokenizer(&index);
        let search_field = index.schema().get_field(SEARCH_FIELD)?;
        Ok(Self { index, search_field })
    }

    /// Batch-inserts documents and commits. Every field value is stored
    /// under its own field and folded into the catch-all search field.
    pub fn add_documents(&self, documents: &[SearchDocument]) -> Result<usize> {
        let schema = self.index.schema();
        let mut writer = self.index.writer(50_000_000)?;
        for document in documents {
            let mut doc = TantivyDocument::default();
            let mut folded = String::new();
            for (name, value) in document {
                let field = schema
                    .get_field(name)
                    .map_err(|_| SearchError::UnknownField(name.clone()))?;
                doc.add_text(field, value);
                if !folded.is_empty() {
                    folded.push(' ');
                }
                folded.push_str(value);
            }
            doc.add_text(self.search_field, &folded);
            writer.add_document(doc)?;
        }
        writer.commit()?;
        tracing::debug!(count = documents.len(), "indexed documents");
        Ok(documents.len())
    }

    /// Snapshot searcher over the current committed state.
    pub fn searcher(&self) -> Result<IndexSearcher> {
        let reader = self.index.reader()?;
        let searcher = reader.searcher();
        let query_parser = QueryParser::for_index(&self.index, vec![self.search_field]);
        Ok(IndexSearcher {
            searcher,
            query_parser,
            schema: self.index.schema(),
        })
    }
}

/// The best hit for a query: its stored fields in schema declaration order,
/// and the engine score (higher is better).
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub fields: Map<String, serde_json::Value>,
    pub score: f32,
}

/// Read-side handle the transformer holds: parses query text and returns
/// the single best match.
pub struct IndexSearcher {
    searcher: tantivy::Searcher,
    query_parser: QueryParser,
    schema: Schema,
}

impl IndexSearcher {
    /// Parses `query_text` and returns the best hit, `None` when nothing
    /// matches. An unparsable query is an error.
    pub fn search_best(&self, query_text: &str) -> Result<Option<SearchOutcome>> {
        let query = self.query_parser.parse_query(query_text)?;
        let top_docs = self.searcher.search(&query, &TopDocs::with_limit(1))?;
        let Some((score, address)) = top_docs.first().copied() else {
            return Ok(None);
        };
        let doc: TantivyDocument = self.searcher.doc(address)?;
        Ok(Some(SearchOutcome {
            fields: self.stored_fields(&doc),
            score,
        }))
    }

    pub fn num_docs(&self) -> u64 {
        self.searcher.num_docs()
    }

    fn stored_fields(&self, doc: &TantivyDocument) -> Map<String, serde_json::Value> {
        let mut fields = Map::new();
        for (field, entry) in self.schema.fields() {
            if entry.name() == SEARCH_FIELD {
                continue;
            }
            if let Some(value) = doc.get_first(field).and_then(|v| v.as_str()) {
                fields.insert(
                    entry.name().to_string(),
                    serde_json::Value::String(value.to_string()),
                );
            }
        }
        fields
    }
}
