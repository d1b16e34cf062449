//! rowkit-search
//!
//! Tantivy-based search index plus the search transformer component. The
//! index, tokenization and ranking internals belong to tantivy; this crate
//! only declares the schema, feeds documents in and pulls the best match
//! back out.

pub mod error;
pub mod index;
pub mod tantivy_utils;
pub mod transformer;

pub use error::SearchError;
pub use index::{IndexSearcher, SearchDocument, SearchIndex, SearchOutcome};
pub use transformer::SearchTransformer;
