//! RDF value types
//!
//! Resources wrap the oxrdf `NamedNode` so every URI handed to a store has been
//! validated as an absolute IRI. Literals keep their optional language tag or
//! datatype, but compare by lexical value only: the Yars adapter discards tags
//! when reading responses back.

use oxrdf::{Literal as OxLiteral, NamedNode as OxNamedNode};
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::n3::serializer;

/// RDF value errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RdfError {
    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Invalid literal
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    /// A node was used in a position that requires a resource
    #[error("Expected a resource, got literal {0}")]
    NotAResource(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// RDF resource, identified by an absolute URI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource(OxNamedNode);

impl Resource {
    /// Create a new resource from a URI string
    pub fn new(uri: &str) -> RdfResult<Self> {
        OxNamedNode::new(uri)
            .map(Self)
            .map_err(|e| RdfError::InvalidIri(format!("{}: {}", uri, e)))
    }

    /// Get the URI string
    pub fn uri(&self) -> &str {
        self.0.as_str()
    }

    /// Get the inner oxrdf NamedNode
    pub fn inner(&self) -> &OxNamedNode {
        &self.0
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serializer::resource_to_n3(self))
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.uri())
    }
}

impl From<OxNamedNode> for Resource {
    fn from(node: OxNamedNode) -> Self {
        Self(node)
    }
}

impl From<Resource> for OxNamedNode {
    fn from(resource: Resource) -> Self {
        resource.0
    }
}

/// Optional annotation carried by a literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralTag {
    /// Language tag, e.g. `en`
    Language(String),
    /// Datatype IRI
    Datatype(Resource),
}

/// RDF literal value
#[derive(Debug, Clone, Serialize)]
pub struct Literal {
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<LiteralTag>,
}

impl Literal {
    /// Create a plain string literal
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tag: None,
        }
    }

    /// Create a literal with a language tag
    pub fn new_language_tagged(value: impl Into<String>, language: &str) -> RdfResult<Self> {
        let value = value.into();
        OxLiteral::new_language_tagged_literal(value.as_str(), language)
            .map_err(|e| RdfError::InvalidLiteral(format!("@{}: {}", language, e)))?;
        Ok(Self {
            value,
            tag: Some(LiteralTag::Language(language.to_string())),
        })
    }

    /// Create a typed literal
    pub fn new_typed(value: impl Into<String>, datatype: Resource) -> Self {
        Self {
            value: value.into(),
            tag: Some(LiteralTag::Datatype(datatype)),
        }
    }

    /// Get the lexical value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the language tag if present
    pub fn language(&self) -> Option<&str> {
        match &self.tag {
            Some(LiteralTag::Language(lang)) => Some(lang),
            _ => None,
        }
    }

    /// Get the datatype if present
    pub fn datatype(&self) -> Option<&Resource> {
        match &self.tag {
            Some(LiteralTag::Datatype(dt)) => Some(dt),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&LiteralTag> {
        self.tag.as_ref()
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serializer::literal_to_n3(self))
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::new(value)
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::new(value)
    }
}

/// Any RDF value that can appear in object position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Node {
    /// Resource (URI)
    Resource(Resource),
    /// Literal value
    Literal(Literal),
}

impl Node {
    /// Check if this is a resource
    pub fn is_resource(&self) -> bool {
        matches!(self, Node::Resource(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal(_))
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Node::Resource(r) => Some(r),
            Node::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(l) => Some(l),
            Node::Resource(_) => None,
        }
    }

    /// URI for resources, lexical value for literals
    pub fn value(&self) -> &str {
        match self {
            Node::Resource(r) => r.uri(),
            Node::Literal(l) => l.value(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Resource(r) => write!(f, "{}", r),
            Node::Literal(l) => write!(f, "{}", l),
        }
    }
}

impl From<Resource> for Node {
    fn from(resource: Resource) -> Self {
        Node::Resource(resource)
    }
}

impl From<Literal> for Node {
    fn from(literal: Literal) -> Self {
        Node::Literal(literal)
    }
}

impl TryFrom<Node> for Resource {
    type Error = RdfError;

    fn try_from(node: Node) -> RdfResult<Self> {
        match node {
            Node::Resource(r) => Ok(r),
            Node::Literal(l) => Err(RdfError::NotAResource(serializer::literal_to_n3(&l))),
        }
    }
}

impl<'a> TryFrom<&'a Node> for &'a Resource {
    type Error = RdfError;

    fn try_from(node: &'a Node) -> RdfResult<Self> {
        match node {
            Node::Resource(r) => Ok(r),
            Node::Literal(l) => Err(RdfError::NotAResource(serializer::literal_to_n3(l))),
        }
    }
}

/// RDF triple (subject-predicate-object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Triple {
    /// Subject
    pub subject: Resource,
    /// Predicate
    pub predicate: Resource,
    /// Object
    pub object: Node,
}

impl Triple {
    /// Create a new triple
    pub fn new(subject: Resource, predicate: Resource, object: impl Into<Node>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serializer::triple_to_n3(self))
    }
}
