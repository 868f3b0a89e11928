use std::collections::BTreeMap;
use std::sync::Arc;

use super::binding::ClassBinding;
use super::graph::Entity;
use super::{RuntimeError, RuntimeResult};

/// Builds an empty entity for an IRI
pub type Constructor = Box<dyn Fn(&str) -> Entity>;

/// Injected capability that creates entities by class IRI
///
/// Loading consults the factory whenever a reference property points at
/// another entity, so callers decide which classes can be materialised.
#[derive(Default)]
pub struct EntityFactory {
    constructors: BTreeMap<String, Constructor>,
}

impl EntityFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory with one constructor per binding
    pub fn from_bindings(bindings: impl IntoIterator<Item = ClassBinding>) -> Self {
        let mut factory = Self::new();
        for binding in bindings {
            let binding = Arc::new(binding);
            let class_iri = binding.class_iri.clone();
            factory.register(class_iri, move |iri| Entity::new(iri, Arc::clone(&binding)));
        }
        factory
    }

    pub fn register<F>(&mut self, class_iri: impl Into<String>, constructor: F)
    where
        F: Fn(&str) -> Entity + 'static,
    {
        self.constructors
            .insert(class_iri.into(), Box::new(constructor));
    }

    pub fn contains(&self, class_iri: &str) -> bool {
        self.constructors.contains_key(class_iri)
    }

    pub fn create(&self, class_iri: &str, iri: &str) -> RuntimeResult<Entity> {
        let constructor = self
            .constructors
            .get(class_iri)
            .ok_or_else(|| RuntimeError::MissingFactory(class_iri.to_string()))?;
        Ok(constructor(iri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_registered_classes_only() {
        let factory =
            EntityFactory::from_bindings([ClassBinding::new("http://example.org/ns#Person")]);
        assert!(factory.contains("http://example.org/ns#Person"));

        let entity = factory
            .create("http://example.org/ns#Person", "http://example.org/ns#alice")
            .unwrap();
        assert_eq!(entity.iri(), "http://example.org/ns#alice");
        assert_eq!(entity.class_iri(), "http://example.org/ns#Person");

        let err = factory
            .create("http://example.org/ns#Robot", "http://example.org/ns#r2")
            .unwrap_err();
        assert!(matches!(err, RuntimeError::MissingFactory(c) if c.ends_with("Robot")));
    }
}
