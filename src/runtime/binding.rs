use crate::classifier::Classification;

/// Runtime description of one property of a generated class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBinding {
    pub iri: String,
    pub name: String,
    pub classification: Classification,
    /// Class IRI accepted by Object and Collection properties
    pub range: Option<String>,
    pub inverse_functional: bool,
}

/// Runtime description of one generated class
///
/// Properties inherited from superclasses are listed alongside the class's
/// own properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBinding {
    pub class_iri: String,
    /// Superclass chain, nearest first
    pub ancestors: Vec<String>,
    pub properties: Vec<PropertyBinding>,
}

impl ClassBinding {
    pub fn new(class_iri: impl Into<String>) -> Self {
        Self {
            class_iri: class_iri.into(),
            ancestors: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Add a property, builder style
    pub fn with_property(
        mut self,
        iri: impl Into<String>,
        classification: Classification,
        range: Option<&str>,
    ) -> Self {
        let iri = iri.into();
        self.properties.push(PropertyBinding {
            name: crate::naming::local_name(&iri).to_string(),
            iri,
            classification,
            range: range.map(str::to_string),
            inverse_functional: false,
        });
        self
    }

    pub fn property(&self, iri: &str) -> Option<&PropertyBinding> {
        self.properties.iter().find(|p| p.iri == iri)
    }

    /// Whether instances of this class are also instances of `class_iri`
    pub fn is_a(&self, class_iri: &str) -> bool {
        self.class_iri == class_iri || self.ancestors.iter().any(|a| a == class_iri)
    }
}
