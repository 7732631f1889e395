//! Query construction for N3 stores

pub mod engine;

pub use engine::{deletion_query, QueryEngine, QueryTerm};
