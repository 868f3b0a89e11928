use sophia::api::prelude::*;
use sophia::api::term::SimpleTerm;
use sophia::inmem::graph::FastGraph;

use super::literal::{Literal, LiteralValue};
use crate::ontology::iri_term;

/// An object position value, detached from the graph
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Node {
    Iri(String),
    Blank(String),
    Literal(Literal),
}

/// All `(predicate, object)` pairs whose subject is `iri`
///
/// Loading an entity only ever looks at its own statements.
pub fn statements_about(graph: &FastGraph, iri: &str) -> Vec<(String, Node)> {
    let subject = iri_term(iri);
    let mut statements: Vec<(String, Node)> = graph
        .triples_matching([&subject], Any, Any)
        .filter_map(Result::ok)
        .filter_map(|t| {
            let predicate = match t.p() {
                SimpleTerm::Iri(p) => p.to_string(),
                _ => return None,
            };
            let object = match t.o() {
                SimpleTerm::Iri(o) => Node::Iri(o.to_string()),
                SimpleTerm::BlankNode(b) => Node::Blank(b.as_str().to_string()),
                other => Node::Literal(Literal::from_term(other)?),
            };
            Some((predicate, object))
        })
        .collect();
    statements.sort();
    statements
}

fn literals<'a>(
    statements: &'a [(String, Node)],
    property: &'a str,
) -> impl Iterator<Item = &'a Literal> + 'a {
    statements.iter().filter_map(move |(p, o)| match o {
        Node::Literal(lit) if p == property => Some(lit),
        _ => None,
    })
}

/// First literal of `property` that converts to `T`
pub fn load_value<T: LiteralValue>(statements: &[(String, Node)], property: &str) -> Option<T> {
    literals(statements, property).find_map(|lit| lit.parse())
}

/// Every literal of `property` that converts to `T`
pub fn load_array<T: LiteralValue>(statements: &[(String, Node)], property: &str) -> Vec<T> {
    literals(statements, property).filter_map(|lit| lit.parse()).collect()
}

/// IRIs referenced through `property`
pub fn object_iris(statements: &[(String, Node)], property: &str) -> Vec<String> {
    statements
        .iter()
        .filter_map(|(p, o)| match o {
            Node::Iri(iri) if p == property => Some(iri.clone()),
            _ => None,
        })
        .collect()
}
