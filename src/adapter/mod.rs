//! Adapter trait: the interface between ActiveRDF and a triple store
//!
//! Every operation maps to exactly one request against the store; adapters
//! keep no local copy of the data, so `save` has nothing to flush.

use async_trait::async_trait;

use crate::error::{ActiveRdfError, ActiveRdfResult};
use crate::rdf::{Node, Resource, Triple};

pub mod config;
pub mod yars;

pub use config::YarsConfig;
pub use yars::YarsAdapter;

/// Unified interface for triple-store adapters.
///
/// Implemented by:
/// - `YarsAdapter`: a Yars store over HTTP, speaking N3
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Short adapter name, e.g. `yars`
    fn adapter_type(&self) -> &'static str;

    /// Query language accepted by `query` and `query_count`
    fn query_language(&self) -> &str;

    /// Store one triple. Returns false if the store did not accept it.
    async fn add(&self, subject: &Resource, predicate: &Resource, object: &Node)
        -> ActiveRdfResult<bool>;

    /// Delete all triples matching the pattern; `None` is a wildcard.
    ///
    /// Subject and predicate must be resources when given.
    async fn remove(
        &self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> ActiveRdfResult<bool>;

    /// Run a query and parse the resulting triples
    async fn query(&self, qs: &str) -> ActiveRdfResult<Vec<Triple>>;

    /// Run a query and count result lines
    async fn query_count(&self, qs: &str) -> ActiveRdfResult<usize>;

    /// Synchronise with the store. Mutations are flushed immediately.
    fn save(&self) -> bool {
        true
    }
}

/// Check a pattern position that must hold a resource when present
pub(crate) fn verify_resource<'a>(
    position: &str,
    node: Option<&'a Node>,
) -> ActiveRdfResult<Option<&'a Resource>> {
    node.map(|n| {
        <&Resource>::try_from(n).map_err(|e| {
            ActiveRdfError::InvalidInputError(format!("wrong type received for {}: {}", position, e))
        })
    })
    .transpose()
}
