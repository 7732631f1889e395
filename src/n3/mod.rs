//! N3 (Notation3) text format
//!
//! The subset spoken by Yars: one `subject predicate object .` statement per
//! line, URIs in angle brackets, literals in double quotes.

pub mod parser;
pub mod serializer;

pub use parser::{parse_statement, parse_term, parse_triples, N3Error, N3Result};
pub use serializer::{literal_to_n3, node_to_n3, resource_to_n3, triple_to_n3};
