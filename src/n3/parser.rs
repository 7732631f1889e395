//! N3 response parser using Pest
//!
//! A Yars store answers queries with one statement per line. The whole body is
//! parsed up front; the first malformed line aborts the parse.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use crate::error::{ActiveRdfError, ActiveRdfResult};
use crate::rdf::{Literal, Node, RdfError, Resource, Triple};

#[derive(Parser)]
#[grammar = "n3/n3.pest"]
struct N3Grammar;

/// Errors for a single N3 statement or term
#[derive(Error, Debug)]
pub enum N3Error {
    /// Pest syntax error
    #[error("Syntax error: {0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),

    /// URI rejected by IRI validation
    #[error(transparent)]
    Value(#[from] RdfError),

    /// Bad escape sequence inside a literal
    #[error("Invalid escape sequence: {0}")]
    Escape(String),

    /// Statement is missing a term
    #[error("Incomplete statement: missing {0}")]
    Incomplete(&'static str),
}

impl From<pest::error::Error<Rule>> for N3Error {
    fn from(e: pest::error::Error<Rule>) -> Self {
        N3Error::Syntax(Box::new(e))
    }
}

pub type N3Result<T> = Result<T, N3Error>;

/// Parse a complete response body into triples, preserving line order.
///
/// Blank lines are skipped. Any other line must be a full statement; otherwise
/// the parse fails with `ParseError` carrying the 1-based line number.
pub fn parse_triples(body: &str) -> ActiveRdfResult<Vec<Triple>> {
    let mut triples = Vec::new();

    for (index, raw) in body.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let triple = parse_statement(line).map_err(|e| ActiveRdfError::ParseError {
            line: index + 1,
            content: line.to_string(),
            reason: e.to_string(),
        })?;
        triples.push(triple);
    }

    Ok(triples)
}

/// Parse a single `<s> <p> o .` statement
pub fn parse_statement(line: &str) -> N3Result<Triple> {
    let statement = N3Grammar::parse(Rule::statement, line)?
        .next()
        .ok_or(N3Error::Incomplete("statement"))?;

    let mut subject = None;
    let mut predicate = None;
    let mut object = None;

    for part in statement.into_inner() {
        match part.as_rule() {
            Rule::subject => subject = Some(parse_uri(first_inner(part, "subject")?)?),
            Rule::predicate => predicate = Some(parse_uri(first_inner(part, "predicate")?)?),
            Rule::object => object = Some(parse_node(first_inner(part, "object")?)?),
            _ => {}
        }
    }

    Ok(Triple::new(
        subject.ok_or(N3Error::Incomplete("subject"))?,
        predicate.ok_or(N3Error::Incomplete("predicate"))?,
        object.ok_or(N3Error::Incomplete("object"))?,
    ))
}

/// Parse a single N3 term: `<uri>` or a quoted literal
pub fn parse_term(input: &str) -> N3Result<Node> {
    let term = N3Grammar::parse(Rule::term, input.trim())?
        .next()
        .ok_or(N3Error::Incomplete("term"))?;

    parse_node(first_inner(term, "term")?)
}

fn first_inner<'i>(pair: Pair<'i, Rule>, position: &'static str) -> N3Result<Pair<'i, Rule>> {
    pair.into_inner().next().ok_or(N3Error::Incomplete(position))
}

fn parse_node(pair: Pair<'_, Rule>) -> N3Result<Node> {
    match pair.as_rule() {
        Rule::uri => Ok(Node::Resource(parse_uri(pair)?)),
        Rule::literal => {
            // Language and datatype suffixes are not kept
            let raw = pair
                .into_inner()
                .find(|p| p.as_rule() == Rule::string)
                .map(|p| p.as_str())
                .unwrap_or_default();
            Ok(Node::Literal(Literal::new(unescape(raw)?)))
        }
        _ => Err(N3Error::Incomplete("term")),
    }
}

fn parse_uri(pair: Pair<'_, Rule>) -> N3Result<Resource> {
    let iri = pair.into_inner().next().map(|p| p.as_str()).unwrap_or_default();
    Ok(Resource::new(iri)?)
}

fn unescape(raw: &str) -> N3Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some('u') => out.push(read_code_point(&mut chars, 4)?),
            Some('U') => out.push(read_code_point(&mut chars, 8)?),
            Some(other) => return Err(N3Error::Escape(format!("\\{}", other))),
            None => return Err(N3Error::Escape("trailing backslash".to_string())),
        }
    }

    Ok(out)
}

fn read_code_point(chars: &mut std::str::Chars<'_>, len: usize) -> N3Result<char> {
    let digits: String = chars.by_ref().take(len).collect();
    if digits.len() != len {
        return Err(N3Error::Escape(format!("truncated \\u{}", digits)));
    }
    u32::from_str_radix(&digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| N3Error::Escape(format!("\\u{}", digits)))
}
