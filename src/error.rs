//! Error types for ActiveRDF adapters

use thiserror::Error;

use crate::rdf::RdfError;

/// Errors that can occur when talking to a triple store
#[derive(Error, Debug)]
pub enum ActiveRdfError {
    /// Missing or invalid adapter construction parameters
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A triple component has the wrong capability (e.g. a literal subject)
    #[error("Invalid input: {0}")]
    InvalidInputError(String),

    /// Empty query, or the store rejected it
    #[error("Query error: {detail}: {query}")]
    QueryError { query: String, detail: String },

    /// Store response is not well-formed N3
    #[error("Parse error on line {line} ({content}): {reason}")]
    ParseError {
        line: usize,
        content: String,
        reason: String,
    },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Configuration file format error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl ActiveRdfError {
    pub(crate) fn query(query: &str, detail: impl Into<String>) -> Self {
        ActiveRdfError::QueryError {
            query: query.to_string(),
            detail: detail.into(),
        }
    }
}

impl From<RdfError> for ActiveRdfError {
    fn from(e: RdfError) -> Self {
        ActiveRdfError::InvalidInputError(e.to_string())
    }
}

pub type ActiveRdfResult<T> = Result<T, ActiveRdfError>;
