//! Ontology model accessor
//!
//! Loads one or more RDF files into a single in-memory graph and answers the
//! structural questions the generators ask: which classes exist, which
//! properties attach to a class, what their ranges are, and which labels and
//! descriptions to use.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use sophia::api::graph::MutableGraph;
use sophia::api::prelude::*;
use sophia::api::term::{IriRef, SimpleTerm};
use sophia::inmem::graph::FastGraph;
use sophia::turtle::parser::{nt, turtle};

use crate::io::{GenError, GenResult, RdfFormat};
use crate::vocab::{self, owl, rdf, rdfs};

/// Which end of a property a class is looked up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Domain,
    Range,
}

impl Direction {
    fn predicate(self) -> &'static str {
        match self {
            Direction::Domain => rdfs::DOMAIN,
            Direction::Range => rdfs::RANGE,
        }
    }
}

/// Build an IRI term from a string
pub fn iri_term(iri: &str) -> SimpleTerm<'static> {
    SimpleTerm::Iri(IriRef::new_unchecked(iri.to_string().into()))
}

/// The merged ontology graph
pub struct Ontology {
    graph: FastGraph,
}

impl Default for Ontology {
    fn default() -> Self {
        Self {
            graph: FastGraph::new(),
        }
    }
}

impl Ontology {
    /// Create an empty ontology
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already populated graph
    pub fn from_graph(graph: FastGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &FastGraph {
        &self.graph
    }

    /// Parse a file and merge its statements into this ontology
    ///
    /// `mime_hint` selects the syntax; without it (or when it is not
    /// recognised) the file extension decides.
    pub fn load(&mut self, path: &Path, mime_hint: Option<&str>) -> GenResult<usize> {
        if !path.exists() {
            return Err(GenError::NotFound(path.to_path_buf()));
        }
        let format = RdfFormat::detect(path, mime_hint)?;
        let file = File::open(path)?;
        let added = self
            .parse_into(BufReader::new(file), format)
            .map_err(|message| GenError::Parse {
                path: path.to_path_buf(),
                message,
            })?;
        tracing::info!(path = %path.display(), ?format, added, "loaded ontology");
        Ok(added)
    }

    /// Parse RDF from a reader and merge it into this ontology
    pub fn load_reader<R: BufRead>(&mut self, reader: R, format: RdfFormat) -> GenResult<usize> {
        self.parse_into(reader, format)
            .map_err(|message| GenError::Parse {
                path: PathBuf::from("<reader>"),
                message,
            })
    }

    fn parse_into<R: BufRead>(&mut self, reader: R, format: RdfFormat) -> Result<usize, String> {
        match format {
            RdfFormat::Turtle => self
                .graph
                .insert_all(turtle::parse_bufread(reader))
                .map_err(|e| e.to_string()),
            RdfFormat::NTriples => self
                .graph
                .insert_all(nt::parse_bufread(reader))
                .map_err(|e| e.to_string()),
            RdfFormat::RdfXml => self
                .graph
                .insert_all(sophia::xml::parser::parse_bufread(reader))
                .map_err(|e| e.to_string()),
        }
    }

    /// Number of statements in the graph
    pub fn len(&self) -> usize {
        self.graph.triples().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// IRIs of all subjects typed with `type_iri`
    ///
    /// Blank-node subjects are skipped with a warning.
    pub fn subjects_of_type(&self, type_iri: &str) -> BTreeSet<String> {
        let rdf_type = iri_term(rdf::TYPE);
        let type_term = iri_term(type_iri);
        let mut subjects = BTreeSet::new();
        for t in self
            .graph
            .triples_matching(Any, [&rdf_type], [&type_term])
            .filter_map(Result::ok)
        {
            match t.s() {
                SimpleTerm::Iri(iri) => {
                    subjects.insert(iri.to_string());
                }
                _ => tracing::warn!(class_type = type_iri, "skipping non-IRI subject"),
            }
        }
        subjects
    }

    /// Whether `subject` is typed with `type_iri`
    pub fn has_type(&self, subject: &str, type_iri: &str) -> bool {
        let subject = iri_term(subject);
        let rdf_type = iri_term(rdf::TYPE);
        let type_term = iri_term(type_iri);
        self.graph
            .triples_matching([&subject], [&rdf_type], [&type_term])
            .filter_map(Result::ok)
            .next()
            .is_some()
    }

    /// All ontology classes (`rdfs:Class` or `owl:Class`), in IRI order
    pub fn find_classes(&self) -> BTreeSet<String> {
        vocab::CLASS_TYPES
            .iter()
            .flat_map(|t| self.subjects_of_type(t))
            .filter(|iri| !vocab::is_builtin(iri))
            .collect()
    }

    /// All ontology properties (`rdf:Property`, `owl:DatatypeProperty` or
    /// `owl:ObjectProperty`), in IRI order
    pub fn find_all_properties(&self) -> BTreeSet<String> {
        vocab::PROPERTY_TYPES
            .iter()
            .flat_map(|t| self.subjects_of_type(t))
            .filter(|iri| !vocab::is_builtin(iri))
            .collect()
    }

    /// Properties whose domain (or range) references `class_iri`
    pub fn find_properties(&self, class_iri: &str, direction: Direction) -> BTreeSet<String> {
        self.find_all_properties()
            .into_iter()
            .filter(|property| {
                self.referenced_types(property, direction.predicate())
                    .contains(class_iri)
            })
            .collect()
    }

    /// Every type referenced by `predicate` on `property`
    ///
    /// IRI objects are taken as-is; blank-node objects are dereferenced
    /// through their `owl:unionOf` member lists. More than one statement is
    /// tolerated and logged.
    pub fn referenced_types(&self, property: &str, predicate: &str) -> BTreeSet<String> {
        let subject = iri_term(property);
        let predicate_term = iri_term(predicate);
        let union_of = iri_term(owl::UNION_OF);

        let objects: Vec<SimpleTerm<'_>> = self
            .graph
            .triples_matching([&subject], [&predicate_term], Any)
            .filter_map(Result::ok)
            .map(|t| t.o().clone())
            .collect();
        if objects.len() > 1 {
            tracing::warn!(
                property,
                predicate,
                count = objects.len(),
                "multiple statements, using their union"
            );
        }

        let mut types = BTreeSet::new();
        for object in &objects {
            match object {
                SimpleTerm::Iri(iri) => {
                    types.insert(iri.to_string());
                }
                SimpleTerm::BlankNode(_) => {
                    let heads: Vec<SimpleTerm<'_>> = self
                        .graph
                        .triples_matching([object], [&union_of], Any)
                        .filter_map(Result::ok)
                        .map(|t| t.o().clone())
                        .collect();
                    for head in &heads {
                        types.extend(self.list_members(head));
                    }
                }
                _ => {}
            }
        }
        types
    }

    /// IRI members of an RDF list
    fn list_members(&self, head: &SimpleTerm<'_>) -> Vec<String> {
        let first = iri_term(rdf::FIRST);
        let rest = iri_term(rdf::REST);
        let mut members = Vec::new();
        let mut current = Some(head.clone());

        // a well-formed list cannot be longer than the graph
        for _ in 0..=self.len() {
            let Some(node) = current.take() else {
                break;
            };
            if matches!(&node, SimpleTerm::Iri(iri) if iri.to_string() == rdf::NIL) {
                break;
            }
            for t in self
                .graph
                .triples_matching([&node], [&first], Any)
                .filter_map(Result::ok)
            {
                if let SimpleTerm::Iri(iri) = t.o() {
                    members.push(iri.to_string());
                }
            }
            current = self
                .graph
                .triples_matching([&node], [&rest], Any)
                .filter_map(Result::ok)
                .map(|t| t.o().clone())
                .next();
        }
        members
    }

    /// IRI objects of `predicate` on `subject`, in IRI order
    pub fn object_iris(&self, subject: &str, predicate: &str) -> Vec<String> {
        let subject = iri_term(subject);
        let predicate = iri_term(predicate);
        let iris: BTreeSet<String> = self
            .graph
            .triples_matching([&subject], [&predicate], Any)
            .filter_map(Result::ok)
            .filter_map(|t| match t.o() {
                SimpleTerm::Iri(iri) => Some(iri.to_string()),
                _ => None,
            })
            .collect();
        iris.into_iter().collect()
    }

    /// First IRI object of `predicate` on `subject`
    pub fn first_object_iri(&self, subject: &str, predicate: &str) -> Option<String> {
        self.object_iris(subject, predicate).into_iter().next()
    }

    /// First literal among `predicates`, tried in order
    ///
    /// For each predicate a literal tagged with `language` wins; otherwise the
    /// lexically smallest literal is used. The first predicate carrying any
    /// literal answers.
    pub fn first_literal(
        &self,
        subject: &str,
        language: Option<&str>,
        predicates: &[&str],
    ) -> Option<String> {
        let subject = iri_term(subject);
        for predicate in predicates {
            let predicate = iri_term(predicate);
            let mut preferred: Option<String> = None;
            let mut fallback: Option<String> = None;

            for t in self
                .graph
                .triples_matching([&subject], [&predicate], Any)
                .filter_map(Result::ok)
            {
                let (lexical, tag) = match t.o() {
                    SimpleTerm::LiteralLanguage(lex, tag) => (lex.to_string(), Some(tag.as_str())),
                    SimpleTerm::LiteralDatatype(lex, _) => (lex.to_string(), None),
                    _ => continue,
                };
                let wanted = matches!(
                    (language, tag),
                    (Some(lang), Some(tag)) if tag.eq_ignore_ascii_case(lang)
                );
                let slot = if wanted { &mut preferred } else { &mut fallback };
                if slot.as_ref().is_none_or(|current| lexical < *current) {
                    *slot = Some(lexical);
                }
            }

            if preferred.is_some() {
                return preferred;
            }
            if fallback.is_some() {
                return fallback;
            }
        }
        None
    }

    pub fn is_functional(&self, property: &str) -> bool {
        self.has_type(property, owl::FUNCTIONAL_PROPERTY)
    }

    pub fn is_inverse_functional(&self, property: &str) -> bool {
        self.has_type(property, owl::INVERSE_FUNCTIONAL_PROPERTY)
    }

    /// The `rdfs:subClassOf` IRIs of `class_iri` in IRI order, without
    /// `owl:Thing` and the class itself
    pub fn superclasses(&self, class_iri: &str) -> Vec<String> {
        self.object_iris(class_iri, rdfs::SUB_CLASS_OF)
            .into_iter()
            .filter(|iri| iri != owl::THING && iri != class_iri)
            .collect()
    }

    /// `rdfs:seeAlso` links of a resource
    pub fn see_also(&self, subject: &str) -> Vec<String> {
        self.object_iris(subject, rdfs::SEE_ALSO)
    }

    /// The `owl:Ontology` IRI, if declared
    pub fn ontology_iri(&self) -> Option<String> {
        self.subjects_of_type(owl::ONTOLOGY).into_iter().next()
    }

    /// Count of classes and properties per namespace
    pub fn namespace_usage(&self) -> BTreeMap<String, usize> {
        let mut usage = BTreeMap::new();
        for iri in self.find_classes().iter().chain(self.find_all_properties().iter()) {
            *usage
                .entry(crate::naming::namespace(iri).to_string())
                .or_insert(0) += 1;
        }
        usage
    }
}
