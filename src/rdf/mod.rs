//! RDF value model shared by adapters
//!
//! - `Resource`: a node identified by an absolute URI
//! - `Literal`: a plain string value (tags carried, ignored by equality)
//! - `Node`: either of the above, valid in object position
//! - `Triple`: (Resource, Resource, Node)
//!
//! # Example
//!
//! ```rust
//! use activerdf::rdf::{Literal, Resource, Triple};
//!
//! let subject = Resource::new("http://example.org/alice").unwrap();
//! let predicate = Resource::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! let triple = Triple::new(subject, predicate, Literal::new("Alice"));
//!
//! assert!(triple.object.is_literal());
//! ```

mod types;

pub use types::{Literal, LiteralTag, Node, RdfError, RdfResult, Resource, Triple};
