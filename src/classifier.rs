//! Property type and cardinality classification
//!
//! Every property is reduced to a [`PropertyType`]: what its range is and
//! whether it is functional. From that the [`Classification`] follows, and
//! a [`TypeMapping`] turns it into a field type for one target language.

use std::fmt;

use crate::naming;
use crate::ontology::Ontology;
use crate::vocab::{XSD_NS, rdfs};

/// How a property is represented in generated code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Classification {
    /// Single literal value
    Value,
    /// Multiple literal values
    Array,
    /// Single reference to another generated class
    Object,
    /// Multiple references to another generated class
    Collection,
}

impl Classification {
    pub fn is_reference(self) -> bool {
        matches!(self, Classification::Object | Classification::Collection)
    }

    pub fn is_multi_valued(self) -> bool {
        matches!(self, Classification::Array | Classification::Collection)
    }

    /// Name used by the runtime helpers (`addValue`, `addCollection`, ...)
    pub fn name(self) -> &'static str {
        match self {
            Classification::Value => "Value",
            Classification::Array => "Array",
            Classification::Object => "Object",
            Classification::Collection => "Collection",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The XSD datatypes with a native mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum XsdType {
    Boolean,
    Byte,
    Date,
    DateTime,
    Time,
    Decimal,
    Double,
    Float,
    Int,
    Integer,
    Long,
    PositiveInteger,
    Short,
    String,
    AnyUri,
}

impl XsdType {
    pub const ALL: [XsdType; 15] = [
        XsdType::Boolean,
        XsdType::Byte,
        XsdType::Date,
        XsdType::DateTime,
        XsdType::Time,
        XsdType::Decimal,
        XsdType::Double,
        XsdType::Float,
        XsdType::Int,
        XsdType::Integer,
        XsdType::Long,
        XsdType::PositiveInteger,
        XsdType::Short,
        XsdType::String,
        XsdType::AnyUri,
    ];

    /// Local name in the XSD namespace
    pub fn local_name(self) -> &'static str {
        match self {
            XsdType::Boolean => "boolean",
            XsdType::Byte => "byte",
            XsdType::Date => "date",
            XsdType::DateTime => "dateTime",
            XsdType::Time => "time",
            XsdType::Decimal => "decimal",
            XsdType::Double => "double",
            XsdType::Float => "float",
            XsdType::Int => "int",
            XsdType::Integer => "integer",
            XsdType::Long => "long",
            XsdType::PositiveInteger => "positiveInteger",
            XsdType::Short => "short",
            XsdType::String => "string",
            XsdType::AnyUri => "anyURI",
        }
    }

    pub fn iri(self) -> String {
        format!("{XSD_NS}{}", self.local_name())
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        let local = iri.strip_prefix(XSD_NS)?;
        Self::ALL.into_iter().find(|t| t.local_name() == local)
    }
}

/// What a property's range points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeType {
    /// No `rdfs:range` given
    Unspecified,
    /// A known XSD datatype
    Datatype(XsdType),
    /// A class in the property's own namespace
    LocalClass(String),
    /// Anything else: unknown datatypes, classes of other vocabularies
    Foreign(String),
}

/// Classification input for one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyType {
    pub range: RangeType,
    pub functional: bool,
}

impl PropertyType {
    pub fn classification(&self) -> Classification {
        match (&self.range, self.functional) {
            (RangeType::Unspecified | RangeType::Foreign(_), _) => Classification::Value,
            (RangeType::Datatype(_), true) => Classification::Value,
            (RangeType::Datatype(_), false) => Classification::Array,
            (RangeType::LocalClass(_), true) => Classification::Object,
            (RangeType::LocalClass(_), false) => Classification::Collection,
        }
    }

    /// Range class IRI for reference classifications
    pub fn range_class(&self) -> Option<&str> {
        match &self.range {
            RangeType::LocalClass(iri) => Some(iri),
            _ => None,
        }
    }
}

/// Classify `property` against the loaded ontology
pub fn classify(ontology: &Ontology, property: &str) -> PropertyType {
    let functional = ontology.is_functional(property);
    let range = match ontology.first_object_iri(property, rdfs::RANGE) {
        None => RangeType::Unspecified,
        Some(iri) => {
            if let Some(xsd) = XsdType::from_iri(&iri) {
                RangeType::Datatype(xsd)
            } else if naming::namespace(&iri) == naming::namespace(property) {
                RangeType::LocalClass(iri)
            } else {
                RangeType::Foreign(iri)
            }
        }
    };
    tracing::debug!(property, ?range, functional, "classified property");
    PropertyType { range, functional }
}

/// Maps classified properties to field types of one target language
pub trait TypeMapping {
    /// Native type for a datatype, `None` when the language has no mapping
    fn scalar_type(&self, xsd: XsdType) -> Option<&'static str>;

    /// Type used when the range is unspecified or unmapped
    fn default_type(&self) -> String;

    /// Type of a single reference to `class_iri`
    fn object_type(&self, class_iri: &str) -> String;

    fn array_type(&self, item: &str) -> String;

    fn collection_type(&self, item: &str) -> String;

    /// Field type for a classified property
    fn field_type(&self, property: &PropertyType) -> String {
        let item = match &property.range {
            RangeType::Datatype(xsd) => self
                .scalar_type(*xsd)
                .map(str::to_string)
                .unwrap_or_else(|| self.default_type()),
            RangeType::LocalClass(iri) => self.object_type(iri),
            RangeType::Unspecified | RangeType::Foreign(_) => self.default_type(),
        };
        match property.classification() {
            Classification::Value | Classification::Object => item,
            Classification::Array => self.array_type(&item),
            Classification::Collection => self.collection_type(&item),
        }
    }
}

/// Java field types
pub struct JavaTypes;

impl TypeMapping for JavaTypes {
    fn scalar_type(&self, xsd: XsdType) -> Option<&'static str> {
        Some(match xsd {
            XsdType::Boolean => "boolean",
            XsdType::Byte => "byte",
            XsdType::Date | XsdType::DateTime | XsdType::Time => "java.util.Date",
            XsdType::Decimal | XsdType::Float => "float",
            XsdType::Double => "double",
            XsdType::Int | XsdType::Integer | XsdType::PositiveInteger => "int",
            XsdType::Long => "long",
            XsdType::Short => "short",
            XsdType::String => "String",
            XsdType::AnyUri => "java.net.URL",
        })
    }

    fn default_type(&self) -> String {
        "String".to_string()
    }

    fn object_type(&self, class_iri: &str) -> String {
        naming::java_identifier(naming::local_name(class_iri))
    }

    fn array_type(&self, item: &str) -> String {
        format!("{item}[]")
    }

    fn collection_type(&self, item: &str) -> String {
        format!("Set<{item}>")
    }
}

/// Type names understood by the JavaScript object creators
pub struct JsTypes;

impl TypeMapping for JsTypes {
    fn scalar_type(&self, xsd: XsdType) -> Option<&'static str> {
        Some(match xsd {
            XsdType::Boolean => "boolean",
            XsdType::Byte
            | XsdType::Int
            | XsdType::Integer
            | XsdType::Long
            | XsdType::PositiveInteger
            | XsdType::Short => "int",
            XsdType::Date | XsdType::DateTime | XsdType::Time => "date",
            XsdType::Decimal | XsdType::Double | XsdType::Float => "float",
            XsdType::String | XsdType::AnyUri => "string",
        })
    }

    fn default_type(&self) -> String {
        "object".to_string()
    }

    fn object_type(&self, class_iri: &str) -> String {
        format!("object<{class_iri}>")
    }

    fn array_type(&self, item: &str) -> String {
        format!("{item}[]")
    }

    fn collection_type(&self, item: &str) -> String {
        format!("{item}[]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::tests::ontology_from;

    const ONTOLOGY: &str = r#"
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix ex: <http://example.org/ns#> .
@prefix foaf: <http://xmlns.com/foaf/0.1/> .

ex:Person a owl:Class .
ex:name a owl:DatatypeProperty , owl:FunctionalProperty ; rdfs:range xsd:string .
ex:nickname a owl:DatatypeProperty ; rdfs:range xsd:string .
ex:spouse a owl:ObjectProperty , owl:FunctionalProperty ; rdfs:range ex:Person .
ex:knows a owl:ObjectProperty ; rdfs:range ex:Person .
ex:note a rdf:Property .
ex:account a owl:ObjectProperty ; rdfs:range foaf:OnlineAccount .
ex:mass a owl:DatatypeProperty ; rdfs:range xsd:nonNegativeInteger .
"#;

    fn classified(property: &str) -> PropertyType {
        let onto = ontology_from(ONTOLOGY);
        classify(&onto, &format!("http://example.org/ns#{property}"))
    }

    #[test]
    fn classification_table() {
        assert_eq!(classified("name").classification(), Classification::Value);
        assert_eq!(classified("nickname").classification(), Classification::Array);
        assert_eq!(classified("spouse").classification(), Classification::Object);
        assert_eq!(
            classified("knows").classification(),
            Classification::Collection
        );
        assert_eq!(classified("note").classification(), Classification::Value);
        assert_eq!(classified("account").classification(), Classification::Value);
        assert_eq!(classified("mass").classification(), Classification::Value);
    }

    #[test]
    fn range_kinds() {
        assert_eq!(classified("note").range, RangeType::Unspecified);
        assert_eq!(
            classified("name").range,
            RangeType::Datatype(XsdType::String)
        );
        assert_eq!(
            classified("knows").range_class(),
            Some("http://example.org/ns#Person")
        );
        assert!(matches!(classified("account").range, RangeType::Foreign(_)));
    }

    #[test]
    fn xsd_type_round_trips_iri() {
        for xsd in XsdType::ALL {
            assert_eq!(XsdType::from_iri(&xsd.iri()), Some(xsd));
        }
        assert_eq!(XsdType::from_iri("http://example.org/int"), None);
    }

    #[test]
    fn java_field_types() {
        let java = JavaTypes;
        assert_eq!(java.field_type(&classified("name")), "String");
        assert_eq!(java.field_type(&classified("nickname")), "String[]");
        assert_eq!(java.field_type(&classified("spouse")), "Person");
        assert_eq!(java.field_type(&classified("knows")), "Set<Person>");
        assert_eq!(java.field_type(&classified("note")), "String");
        assert_eq!(java.field_type(&classified("mass")), "String");
        assert_eq!(java.scalar_type(XsdType::DateTime), Some("java.util.Date"));
        assert_eq!(java.scalar_type(XsdType::AnyUri), Some("java.net.URL"));
    }

    #[test]
    fn js_field_types() {
        let js = JsTypes;
        assert_eq!(js.field_type(&classified("name")), "string");
        assert_eq!(js.field_type(&classified("nickname")), "string[]");
        assert_eq!(
            js.field_type(&classified("spouse")),
            "object<http://example.org/ns#Person>"
        );
        assert_eq!(
            js.field_type(&classified("knows")),
            "object<http://example.org/ns#Person>[]"
        );
        assert_eq!(js.field_type(&classified("note")), "object");
    }
}
