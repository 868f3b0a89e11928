//! Generation model
//!
//! A per-class view of the ontology with everything the emitters need:
//! documentation, the superclass, forward properties with their
//! classification, and the reverse properties pointing back at the class.

use std::collections::{BTreeMap, BTreeSet};

use crate::classifier::{Classification, PropertyType, classify};
use crate::naming;
use crate::ontology::Ontology;
use crate::runtime::{ClassBinding, PropertyBinding};
use crate::vocab::{self, rdfs};

/// A property attached to a class through its domain
#[derive(Debug, Clone)]
pub struct PropertyModel {
    pub iri: String,
    /// Field name
    pub name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub property_type: PropertyType,
    pub inverse_functional: bool,
}

impl PropertyModel {
    pub fn classification(&self) -> Classification {
        self.property_type.classification()
    }

    pub fn range_class(&self) -> Option<&str> {
        self.property_type.range_class()
    }
}

/// A property of another class whose range is this class
#[derive(Debug, Clone)]
pub struct ReverseProperty {
    pub property_iri: String,
    /// Field name of the property on the source class
    pub property_name: String,
    /// Classification of the forward property
    pub classification: Classification,
    pub source_class: String,
    pub source_name: String,
    /// Field name of the reverse collection
    pub name: String,
    /// Whether this class fits the forward field's type, so the reverse
    /// adder can also set the forward side
    pub updates_forward: bool,
}

/// One ontology class
#[derive(Debug, Clone)]
pub struct ClassModel {
    pub iri: String,
    /// Class name in generated code
    pub name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub see_also: Vec<String>,
    pub superclass: Option<String>,
    pub properties: Vec<PropertyModel>,
    pub reverse: Vec<ReverseProperty>,
}

impl ClassModel {
    /// Title for documentation: the label, else the class name
    pub fn title(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn has_references(&self) -> bool {
        self.properties
            .iter()
            .any(|p| p.classification().is_reference())
    }

    pub fn has_collections(&self) -> bool {
        self.properties
            .iter()
            .any(|p| p.classification() == Classification::Collection)
    }
}

/// The namespace and constant names of the generated vocabulary
#[derive(Debug, Clone, Default)]
pub struct VocabularyModel {
    pub namespace: String,
    pub prefix: Option<String>,
    /// Constant name per IRI
    pub constants: BTreeMap<String, String>,
}

impl VocabularyModel {
    /// Constant name for an IRI of the vocabulary namespace
    pub fn constant(&self, iri: &str) -> Option<&str> {
        self.constants.get(iri).map(String::as_str)
    }
}

/// Everything derived from the ontology for one generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationModel {
    /// Classes in IRI order
    pub classes: Vec<ClassModel>,
    pub vocabulary: VocabularyModel,
}

impl GenerationModel {
    /// Derive the model from a loaded ontology
    ///
    /// `language` selects which language-tagged labels and descriptions are
    /// preferred.
    pub fn build(ontology: &Ontology, language: Option<&str>) -> Self {
        let class_iris = ontology.find_classes();
        let property_iris = ontology.find_all_properties();

        let domains: BTreeMap<String, BTreeSet<String>> = property_iris
            .iter()
            .map(|p| (p.clone(), ontology.referenced_types(p, rdfs::DOMAIN)))
            .collect();

        let mut classes: Vec<ClassModel> = class_iris
            .iter()
            .map(|iri| build_class(ontology, &class_iris, &domains, iri, language))
            .collect();

        let reverse = reverse_properties(ontology, &class_iris, &domains, &classes);
        for class in &mut classes {
            if let Some(list) = reverse.get(&class.iri) {
                class.reverse = list.clone();
            }
        }

        let vocabulary = build_vocabulary(ontology, &class_iris, &property_iris);
        tracing::info!(
            classes = classes.len(),
            properties = property_iris.len(),
            namespace = %vocabulary.namespace,
            "built generation model"
        );
        Self {
            classes,
            vocabulary,
        }
    }

    pub fn class(&self, iri: &str) -> Option<&ClassModel> {
        self.classes.iter().find(|c| c.iri == iri)
    }

    /// The superclass chain of a class, nearest first
    pub fn ancestors(&self, iri: &str) -> Vec<&ClassModel> {
        let mut chain: Vec<&ClassModel> = Vec::new();
        let mut current = self.class(iri).and_then(|c| c.superclass.as_deref());
        while let Some(super_iri) = current {
            if super_iri == iri || chain.iter().any(|c| c.iri == super_iri) {
                tracing::warn!(class = iri, "superclass cycle");
                break;
            }
            let Some(class) = self.class(super_iri) else {
                break;
            };
            chain.push(class);
            current = class.superclass.as_deref();
        }
        chain
    }

    /// Runtime bindings for every class, inherited properties included
    pub fn bindings(&self) -> Vec<ClassBinding> {
        self.classes
            .iter()
            .map(|class| {
                let ancestors = self.ancestors(&class.iri);
                let mut properties: Vec<PropertyBinding> = Vec::new();
                let own = std::iter::once(class).chain(ancestors.iter().copied());
                for property in own.flat_map(|c| c.properties.iter()) {
                    if properties.iter().any(|p| p.iri == property.iri) {
                        continue;
                    }
                    properties.push(PropertyBinding {
                        iri: property.iri.clone(),
                        name: property.name.clone(),
                        classification: property.classification(),
                        range: property.range_class().map(str::to_string),
                        inverse_functional: property.inverse_functional,
                    });
                }
                ClassBinding {
                    class_iri: class.iri.clone(),
                    ancestors: ancestors.iter().map(|c| c.iri.clone()).collect(),
                    properties,
                }
            })
            .collect()
    }
}

fn build_class(
    ontology: &Ontology,
    class_iris: &BTreeSet<String>,
    domains: &BTreeMap<String, BTreeSet<String>>,
    iri: &str,
    language: Option<&str>,
) -> ClassModel {
    let (declared, external): (Vec<String>, Vec<String>) = ontology
        .superclasses(iri)
        .into_iter()
        .partition(|s| class_iris.contains(s));
    for s in &external {
        tracing::warn!(class = iri, superclass = %s, "superclass is not a declared class");
    }
    // single inheritance: the first declared superclass in IRI order wins
    if declared.len() > 1 {
        tracing::warn!(
            class = iri,
            honoured = %declared[0],
            ignored = declared.len() - 1,
            "multiple superclasses, only the first is used"
        );
    }
    let superclass = declared.into_iter().next();

    let properties: Vec<PropertyModel> = domains
        .iter()
        .filter(|(_, domain)| domain.contains(iri))
        .map(|(property, _)| PropertyModel {
            iri: property.clone(),
            name: naming::java_identifier(naming::local_name(property)),
            label: ontology.first_literal(property, language, &vocab::LABEL_PROPERTIES),
            description: ontology.first_literal(property, language, &vocab::COMMENT_PROPERTIES),
            property_type: classify(ontology, property),
            inverse_functional: ontology.is_inverse_functional(property),
        })
        .collect();
    tracing::debug!(
        class = iri,
        properties = ?properties.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        "class properties"
    );

    ClassModel {
        iri: iri.to_string(),
        name: naming::java_identifier(naming::local_name(iri)),
        label: ontology.first_literal(iri, language, &vocab::LABEL_PROPERTIES),
        description: ontology.first_literal(iri, language, &vocab::COMMENT_PROPERTIES),
        see_also: ontology.see_also(iri),
        superclass,
        properties,
        reverse: Vec::new(),
    }
}

/// Reverse properties keyed by the class they point at
fn reverse_properties(
    ontology: &Ontology,
    class_iris: &BTreeSet<String>,
    domains: &BTreeMap<String, BTreeSet<String>>,
    classes: &[ClassModel],
) -> BTreeMap<String, Vec<ReverseProperty>> {
    let mut by_target: BTreeMap<String, Vec<ReverseProperty>> = BTreeMap::new();

    for class in classes {
        for property in &class.properties {
            let Some(field_range) = property.range_class() else {
                continue;
            };
            if property.inverse_functional {
                continue;
            }
            // every range gets a reverse field, union members included
            let targets = ontology.referenced_types(&property.iri, rdfs::RANGE);
            for target in targets.iter().filter(|t| class_iris.contains(*t)) {
                let updates_forward = descends_from(classes, target, field_range);
                if !updates_forward {
                    tracing::warn!(
                        property = %property.iri,
                        range = %target,
                        field_range,
                        "range class does not fit the forward field, reverse adder only updates its own side"
                    );
                }
                by_target
                    .entry(target.clone())
                    .or_default()
                    .push(ReverseProperty {
                        property_iri: property.iri.clone(),
                        property_name: property.name.clone(),
                        classification: property.classification(),
                        source_class: class.iri.clone(),
                        source_name: class.name.clone(),
                        name: naming::plural(&naming::decapitalize(&class.name)),
                        updates_forward,
                    });
            }
        }
    }

    // reference properties of declared classes without any declared domain
    for (property, domain) in domains {
        if domain.iter().any(|d| class_iris.contains(d)) {
            continue;
        }
        let property_type = classify(ontology, property);
        if let Some(target) = property_type.range_class() {
            if class_iris.contains(target) && !ontology.is_inverse_functional(property) {
                tracing::warn!(
                    property = %property,
                    target,
                    "reference property without a domain class, no reverse field generated"
                );
            }
        }
    }

    for reverse in by_target.values_mut() {
        reverse.sort_by(|a, b| {
            (&a.name, &a.property_iri, &a.source_class).cmp(&(
                &b.name,
                &b.property_iri,
                &b.source_class,
            ))
        });
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for r in reverse.iter() {
            *counts.entry(r.name.clone()).or_insert(0) += 1;
        }
        for r in reverse.iter_mut() {
            if counts.get(&r.name).copied().unwrap_or(0) > 1 {
                r.name = format!("{}By{}", r.name, naming::capitalize(&r.property_name));
            }
        }
    }
    by_target
}

/// Whether `class` is `ancestor` or inherits from it
fn descends_from(classes: &[ClassModel], class: &str, ancestor: &str) -> bool {
    let mut current = Some(class);
    let mut hops = 0;
    while let Some(iri) = current {
        if iri == ancestor {
            return true;
        }
        hops += 1;
        if hops > classes.len() {
            break;
        }
        current = classes
            .iter()
            .find(|c| c.iri == iri)
            .and_then(|c| c.superclass.as_deref());
    }
    false
}

fn build_vocabulary(
    ontology: &Ontology,
    class_iris: &BTreeSet<String>,
    property_iris: &BTreeSet<String>,
) -> VocabularyModel {
    let namespace = match ontology.ontology_iri() {
        Some(iri) if iri.ends_with('#') || iri.ends_with('/') => iri,
        Some(iri) => format!("{iri}#"),
        None => ontology
            .namespace_usage()
            .into_iter()
            .max_by(|(ns_a, a), (ns_b, b)| a.cmp(b).then_with(|| ns_b.cmp(ns_a)))
            .map(|(ns, _)| ns)
            .unwrap_or_default(),
    };

    let prefix = ontology.ontology_iri().and_then(|iri| {
        ontology.first_literal(&iri, None, &[vocab::vann::PREFERRED_NAMESPACE_PREFIX])
    });

    let mut constants = BTreeMap::new();
    let mut used: BTreeSet<String> = ["NAMESPACE", "PREFIX", "NS"]
        .into_iter()
        .map(str::to_string)
        .collect();
    for iri in class_iris
        .iter()
        .chain(property_iris.iter())
        .filter(|iri| naming::namespace(iri) == namespace)
    {
        let base = naming::java_identifier(naming::local_name(iri));
        let mut name = base.clone();
        let mut n = 2;
        while used.contains(&name) {
            name = format!("{base}_{n}");
            n += 1;
        }
        used.insert(name.clone());
        constants.insert(iri.clone(), name);
    }

    VocabularyModel {
        namespace,
        prefix,
        constants,
    }
}
