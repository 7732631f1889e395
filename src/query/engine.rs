//! N3 select/where query builder
//!
//! Yars queries are written as
//! `<> ql:select { template } ; ql:where { pattern } .`, where the select
//! template is itself a set of triple patterns instantiated for every match of
//! the where clause.

use std::fmt;

use crate::error::{ActiveRdfError, ActiveRdfResult};
use crate::n3::serializer;
use crate::rdf::{Literal, Node, Resource};

/// A position in a query triple pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTerm {
    /// Query variable, rendered as `?name`
    Variable(String),
    /// Concrete node
    Node(Node),
}

impl QueryTerm {
    /// Create a variable term
    pub fn var(name: impl Into<String>) -> Self {
        QueryTerm::Variable(name.into())
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, QueryTerm::Variable(_))
    }
}

impl fmt::Display for QueryTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryTerm::Variable(name) => write!(f, "?{}", name),
            QueryTerm::Node(node) => f.write_str(&serializer::node_to_n3(node)),
        }
    }
}

impl From<Node> for QueryTerm {
    fn from(node: Node) -> Self {
        QueryTerm::Node(node)
    }
}

impl From<Resource> for QueryTerm {
    fn from(resource: Resource) -> Self {
        QueryTerm::Node(Node::Resource(resource))
    }
}

impl From<Literal> for QueryTerm {
    fn from(literal: Literal) -> Self {
        QueryTerm::Node(Node::Literal(literal))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pattern {
    subject: QueryTerm,
    predicate: QueryTerm,
    object: QueryTerm,
}

impl Pattern {
    fn terms(&self) -> [&QueryTerm; 3] {
        [&self.subject, &self.predicate, &self.object]
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Builder for N3 select/where queries
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    bindings: Vec<Pattern>,
    conditions: Vec<Pattern>,
}

impl QueryEngine {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triple pattern to the select template
    pub fn add_binding_triple(
        &mut self,
        subject: impl Into<QueryTerm>,
        predicate: impl Into<QueryTerm>,
        object: impl Into<QueryTerm>,
    ) -> &mut Self {
        self.bindings.push(Pattern {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        });
        self
    }

    /// Add a triple pattern to the where clause
    pub fn add_condition(
        &mut self,
        subject: impl Into<QueryTerm>,
        predicate: impl Into<QueryTerm>,
        object: impl Into<QueryTerm>,
    ) -> &mut Self {
        self.conditions.push(Pattern {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        });
        self
    }

    /// Render the query text.
    ///
    /// Fails if either clause is empty or a variable name is not a plain
    /// identifier.
    pub fn generate(&self) -> ActiveRdfResult<String> {
        if self.bindings.is_empty() {
            return Err(ActiveRdfError::query("", "query has no select bindings"));
        }
        if self.conditions.is_empty() {
            return Err(ActiveRdfError::query("", "query has no where conditions"));
        }

        for term in self.bindings.iter().chain(&self.conditions).flat_map(Pattern::terms) {
            if let QueryTerm::Variable(name) = term {
                if !is_valid_variable(name) {
                    return Err(ActiveRdfError::query(
                        "",
                        format!("invalid variable name '{}'", name),
                    ));
                }
            }
        }

        Ok(format!(
            "<> ql:select {{ {} }} ; ql:where {{ {} }} .",
            join(&self.bindings),
            join(&self.conditions)
        ))
    }
}

/// Deletion query for a triple pattern; `None` positions become `?s`, `?p`, `?o`.
pub fn deletion_query(
    subject: Option<&Resource>,
    predicate: Option<&Resource>,
    object: Option<&Node>,
) -> ActiveRdfResult<String> {
    let s = subject.map_or_else(|| QueryTerm::var("s"), |r| r.clone().into());
    let p = predicate.map_or_else(|| QueryTerm::var("p"), |r| r.clone().into());
    let o = object.map_or_else(|| QueryTerm::var("o"), |n| n.clone().into());

    let mut qe = QueryEngine::new();
    qe.add_binding_triple(s.clone(), p.clone(), o.clone());
    qe.add_condition(s, p, o);
    qe.generate()
}

fn join(patterns: &[Pattern]) -> String {
    patterns
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_valid_variable(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(uri: &str) -> Resource {
        Resource::new(uri).unwrap()
    }

    #[test]
    fn test_all_wildcards() {
        let q = deletion_query(None, None, None).unwrap();
        assert_eq!(q, "<> ql:select { ?s ?p ?o . } ; ql:where { ?s ?p ?o . } .");
    }

    #[test]
    fn test_concrete_positions() {
        let s = res("http://example.org/alice");
        let o: Node = Literal::new("Alice").into();
        let q = deletion_query(Some(&s), None, Some(&o)).unwrap();
        assert_eq!(
            q,
            "<> ql:select { <http://example.org/alice> ?p \"Alice\" . } ; \
             ql:where { <http://example.org/alice> ?p \"Alice\" . } ."
        );
    }

    #[test]
    fn test_deterministic() {
        let p = res("http://xmlns.com/foaf/0.1/knows");
        let first = deletion_query(None, Some(&p), None).unwrap();
        let second = deletion_query(None, Some(&p), None).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("?s <http://xmlns.com/foaf/0.1/knows> ?o ."));
    }

    #[test]
    fn test_multiple_conditions() {
        let name = res("http://xmlns.com/foaf/0.1/name");
        let knows = res("http://xmlns.com/foaf/0.1/knows");

        let mut qe = QueryEngine::new();
        qe.add_binding_triple(QueryTerm::var("x"), name.clone(), QueryTerm::var("n"))
            .add_condition(QueryTerm::var("x"), knows, QueryTerm::var("y"))
            .add_condition(QueryTerm::var("x"), name, QueryTerm::var("n"));

        let q = qe.generate().unwrap();
        assert_eq!(
            q,
            "<> ql:select { ?x <http://xmlns.com/foaf/0.1/name> ?n . } ; \
             ql:where { ?x <http://xmlns.com/foaf/0.1/knows> ?y . \
             ?x <http://xmlns.com/foaf/0.1/name> ?n . } ."
        );
    }

    #[test]
    fn test_empty_clauses_rejected() {
        assert!(matches!(
            QueryEngine::new().generate(),
            Err(ActiveRdfError::QueryError { .. })
        ));

        let mut qe = QueryEngine::new();
        qe.add_binding_triple(QueryTerm::var("s"), QueryTerm::var("p"), QueryTerm::var("o"));
        assert!(qe.generate().is_err());
    }

    #[test]
    fn test_bad_variable_name() {
        let mut qe = QueryEngine::new();
        qe.add_binding_triple(QueryTerm::var("a b"), QueryTerm::var("p"), QueryTerm::var("o"))
            .add_condition(QueryTerm::var("a b"), QueryTerm::var("p"), QueryTerm::var("o"));
        assert!(qe.generate().is_err());
    }
}
