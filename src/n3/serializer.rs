//! N3 rendering of RDF values
//!
//! URIs are wrapped in `<>`; literals are double-quoted with `\`, `"`, and
//! line-break characters escaped so a statement always fits on one line.

use crate::rdf::{Literal, LiteralTag, Node, Resource, Triple};

/// Render a resource as `<uri>`
pub fn resource_to_n3(resource: &Resource) -> String {
    format!("<{}>", resource.uri())
}

/// Render a literal as a quoted N3 string, keeping its tag
pub fn literal_to_n3(literal: &Literal) -> String {
    let quoted = format!("\"{}\"", escape(literal.value()));
    match literal.tag() {
        None => quoted,
        Some(LiteralTag::Language(lang)) => format!("{}@{}", quoted, lang),
        Some(LiteralTag::Datatype(dt)) => format!("{}^^{}", quoted, resource_to_n3(dt)),
    }
}

/// Render any node
pub fn node_to_n3(node: &Node) -> String {
    match node {
        Node::Resource(r) => resource_to_n3(r),
        Node::Literal(l) => literal_to_n3(l),
    }
}

/// Render one statement terminated by ` .`
pub fn triple_to_n3(triple: &Triple) -> String {
    format!(
        "{} {} {} .",
        resource_to_n3(&triple.subject),
        resource_to_n3(&triple.predicate),
        node_to_n3(&triple.object)
    )
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
