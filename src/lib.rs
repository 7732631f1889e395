//! ActiveRDF
//!
//! An object-relational style mapping layer over RDF triple stores. Callers
//! work with typed resources and literals; adapters translate each operation
//! into the store's own protocol.
//!
//! # Architecture
//!
//! - `rdf`: value model (`Resource`, `Literal`, `Node`, `Triple`)
//! - `n3`: N3 serializer and the pest-based response parser
//! - `query`: `QueryEngine`, the N3 select/where query builder
//! - `adapter`: the `Adapter` trait and `YarsAdapter`, an HTTP client for Yars
//!
//! Each adapter operation issues exactly one HTTP request. Writes that the
//! store refuses are reported as `false`; malformed input and malformed
//! responses are errors.
//!
//! ## Example Usage
//!
//! ```no_run
//! use activerdf::{Adapter, Literal, Resource, YarsAdapter, YarsConfig};
//!
//! # async fn demo() -> activerdf::ActiveRdfResult<()> {
//! let adapter = YarsAdapter::new(YarsConfig::new("localhost").with_context("people"))?;
//!
//! let alice = Resource::new("http://example.org/alice")?;
//! let name = Resource::new("http://xmlns.com/foaf/0.1/name")?;
//! adapter.add(&alice, &name, &Literal::new("Alice").into()).await?;
//!
//! let triples = adapter
//!     .query("<> ql:select { ?s ?p ?o . } ; ql:where { ?s ?p ?o . } .")
//!     .await?;
//! println!("{} triples", triples.len());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod adapter;
pub mod error;
pub mod n3;
pub mod query;
pub mod rdf;

// Re-export main types for convenience
pub use adapter::{Adapter, YarsAdapter, YarsConfig};
pub use error::{ActiveRdfError, ActiveRdfResult};
pub use query::{QueryEngine, QueryTerm};
pub use rdf::{Literal, LiteralTag, Node, RdfError, Resource, Triple};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
