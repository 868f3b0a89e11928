//! Well-known vocabulary IRIs
//!
//! Namespace constants and the predicate priority lists used when looking up
//! human-readable labels and descriptions.

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
pub const DCTERMS_NS: &str = "http://purl.org/dc/terms/";
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const VANN_NS: &str = "http://purl.org/vocab/vann/";

pub mod rdf {
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

pub mod rdfs {
    pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    pub const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
}

pub mod owl {
    pub const ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
    pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    pub const THING: &str = "http://www.w3.org/2002/07/owl#Thing";
    pub const DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    pub const OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    pub const FUNCTIONAL_PROPERTY: &str = "http://www.w3.org/2002/07/owl#FunctionalProperty";
    pub const INVERSE_FUNCTIONAL_PROPERTY: &str =
        "http://www.w3.org/2002/07/owl#InverseFunctionalProperty";
    pub const UNION_OF: &str = "http://www.w3.org/2002/07/owl#unionOf";
}

pub mod xsd {
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
}

pub mod vann {
    pub const PREFERRED_NAMESPACE_PREFIX: &str =
        "http://purl.org/vocab/vann/preferredNamespacePrefix";
}

/// Types whose instances are ontology classes.
pub const CLASS_TYPES: [&str; 2] = [rdfs::CLASS, owl::CLASS];

/// Types whose instances are ontology properties.
pub const PROPERTY_TYPES: [&str; 3] = [
    rdf::PROPERTY,
    owl::DATATYPE_PROPERTY,
    owl::OBJECT_PROPERTY,
];

/// Label predicates, most preferred first.
pub const LABEL_PROPERTIES: [&str; 5] = [
    rdfs::LABEL,
    "http://purl.org/dc/terms/title",
    "http://purl.org/dc/elements/1.1/title",
    "http://www.w3.org/2004/02/skos/core#prefLabel",
    "http://www.w3.org/2004/02/skos/core#altLabel",
];

/// Description predicates, most preferred first.
pub const COMMENT_PROPERTIES: [&str; 4] = [
    rdfs::COMMENT,
    "http://purl.org/dc/terms/description",
    "http://www.w3.org/2004/02/skos/core#definition",
    "http://purl.org/dc/elements/1.1/description",
];

/// Namespaces that never contribute generated classes or properties.
pub const BUILTIN_NAMESPACES: [&str; 8] = [
    RDF_NS,
    RDFS_NS,
    OWL_NS,
    XSD_NS,
    DC_NS,
    DCTERMS_NS,
    SKOS_NS,
    VANN_NS,
];

/// Whether the IRI belongs to one of the built-in vocabularies.
pub fn is_builtin(iri: &str) -> bool {
    BUILTIN_NAMESPACES.iter().any(|ns| iri.starts_with(ns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_properties_start_with_rdfs_label() {
        assert_eq!(LABEL_PROPERTIES[0], rdfs::LABEL);
        assert_eq!(COMMENT_PROPERTIES[0], rdfs::COMMENT);
    }

    #[test]
    fn builtin_detection() {
        assert!(is_builtin(owl::CLASS));
        assert!(is_builtin(xsd::STRING));
        assert!(!is_builtin("http://example.org/Person"));
    }
}
