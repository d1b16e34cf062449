use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Index unavailable: {0}")]
    Index(String),

    #[error("Invalid query: {0}")]
    Query(#[from] tantivy::query::QueryParserError),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Index operation failed: {0}")]
    Tantivy(#[from] tantivy::TantivyError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
