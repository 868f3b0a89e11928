//! ontogen - generates source code from OWL/RDFS ontologies.
//!
//! The ontology is read into an RDF graph ([`ontology`]), each property is
//! classified by range and cardinality ([`classifier`]), and the resulting
//! [`owl_model::GenerationModel`] is rendered by the emitters in [`emit`]:
//! Java entity classes with a factory interface and a vocabulary class, or a
//! JavaScript mapper registry. [`runtime`] holds the support library the
//! generated entities rely on.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod emit;
pub mod generator;
pub mod io;
pub mod naming;
pub mod ontology;
pub mod order;
pub mod owl_model;
pub mod runtime;
pub mod vocab;
