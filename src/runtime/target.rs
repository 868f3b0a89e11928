use std::collections::BTreeSet;

use sophia::api::graph::MutableGraph;
use sophia::inmem::graph::FastGraph;

use super::literal::{Literal, LiteralValue};
use super::{RuntimeError, RuntimeResult};
use crate::ontology::iri_term;

/// Destination graph for serialising entities
///
/// Keeps track of which entity IRIs were already written so that a
/// reachability closure over cyclic references terminates and writes every
/// entity exactly once.
pub struct TargetModel {
    graph: FastGraph,
    written: BTreeSet<String>,
}

impl Default for TargetModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetModel {
    pub fn new() -> Self {
        Self {
            graph: FastGraph::new(),
            written: BTreeSet::new(),
        }
    }

    /// Write into an existing graph
    pub fn from_graph(graph: FastGraph) -> Self {
        Self {
            graph,
            written: BTreeSet::new(),
        }
    }

    pub fn graph(&self) -> &FastGraph {
        &self.graph
    }

    pub fn into_graph(self) -> FastGraph {
        self.graph
    }

    /// Whether the entity with this IRI has been written
    pub fn contains_entity(&self, iri: &str) -> bool {
        self.written.contains(iri)
    }

    /// IRIs of all written entities
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.written.iter().map(String::as_str)
    }

    /// Record an entity as written; false when it already was
    pub(crate) fn mark_written(&mut self, iri: &str) -> bool {
        self.written.insert(iri.to_string())
    }

    pub fn add_literal(&mut self, subject: &str, property: &str, value: &Literal) -> RuntimeResult<()> {
        self.graph
            .insert(iri_term(subject), iri_term(property), value.to_term())
            .map_err(|e| RuntimeError::Graph(e.to_string()))?;
        Ok(())
    }

    pub fn add_value<T: LiteralValue>(
        &mut self,
        subject: &str,
        property: &str,
        value: Option<&T>,
    ) -> RuntimeResult<()> {
        match value {
            Some(value) => self.add_literal(subject, property, &Literal::typed(value)),
            None => Ok(()),
        }
    }

    pub fn add_array<T: LiteralValue>(
        &mut self,
        subject: &str,
        property: &str,
        values: &[T],
    ) -> RuntimeResult<()> {
        for value in values {
            self.add_literal(subject, property, &Literal::typed(value))?;
        }
        Ok(())
    }

    pub fn add_object(&mut self, subject: &str, property: &str, object: Option<&str>) -> RuntimeResult<()> {
        if let Some(object) = object {
            self.graph
                .insert(iri_term(subject), iri_term(property), iri_term(object))
                .map_err(|e| RuntimeError::Graph(e.to_string()))?;
        }
        Ok(())
    }

    pub fn add_collection<'a>(
        &mut self,
        subject: &str,
        property: &str,
        objects: impl IntoIterator<Item = &'a str>,
    ) -> RuntimeResult<()> {
        for object in objects {
            self.add_object(subject, property, Some(object))?;
        }
        Ok(())
    }
}
