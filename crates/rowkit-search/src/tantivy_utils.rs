use tantivy::schema::{IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, STRING};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer};
use tantivy::Index;

/// Catch-all field every document value is folded into; queries without an
/// explicit field target this one.
pub const SEARCH_FIELD: &str = "_search";

pub const TOKENIZER_NAME: &str = "simple_lowercase";

/// Builds the index schema: the `_search` catch-all first, then one stored
/// string field per declared document field, in declaration order.
pub fn build_schema(field_names: &[String]) -> Schema {
    let mut schema_builder = Schema::builder();
    let search_indexing = TextFieldIndexing::default()
        .set_tokenizer(TOKENIZER_NAME)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let search_options = TextOptions::default().set_indexing_options(search_indexing);
    schema_builder.add_text_field(SEARCH_FIELD, search_options);
    for name in field_names {
        schema_builder.add_text_field(name, STRING | STORED);
    }
    schema_builder.build()
}

/// Letters-only tokens, lowercased. Matches the simple analyzer behavior
/// the index was originally built around.
pub fn register_tokenizer(index: &Index) {
    let tokenizer = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .build();
    index.tokenizers().register(TOKENIZER_NAME, tokenizer);
}
