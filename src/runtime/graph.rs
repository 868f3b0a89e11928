use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use sophia::inmem::graph::FastGraph;

use super::binding::{ClassBinding, PropertyBinding};
use super::factory::EntityFactory;
use super::literal::{Literal, LiteralValue};
use super::load::{Node, statements_about};
use super::target::TargetModel;
use super::{RuntimeError, RuntimeResult};
use crate::classifier::Classification;
use crate::vocab::{rdf, rdfs};

/// Handle of an entity inside an [`EntityGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(usize);

impl EntityId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Current value of one property of an entity
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Value(Option<Literal>),
    Array(Vec<Literal>),
    Object(Option<EntityId>),
    Collection(BTreeSet<EntityId>),
}

impl FieldValue {
    fn empty(classification: Classification) -> Self {
        match classification {
            Classification::Value => FieldValue::Value(None),
            Classification::Array => FieldValue::Array(Vec::new()),
            Classification::Object => FieldValue::Object(None),
            Classification::Collection => FieldValue::Collection(BTreeSet::new()),
        }
    }
}

/// One instance of a generated class
#[derive(Debug, Clone)]
pub struct Entity {
    iri: String,
    binding: Arc<ClassBinding>,
    label: Option<String>,
    fields: BTreeMap<String, FieldValue>,
}

impl Entity {
    /// An entity with every field empty
    pub fn new(iri: impl Into<String>, binding: Arc<ClassBinding>) -> Self {
        let fields = binding
            .properties
            .iter()
            .map(|p| (p.iri.clone(), FieldValue::empty(p.classification)))
            .collect();
        Self {
            iri: iri.into(),
            binding,
            label: None,
            fields,
        }
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }

    pub fn class_iri(&self) -> &str {
        &self.binding.class_iri
    }

    pub fn binding(&self) -> &ClassBinding {
        &self.binding
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn field(&self, property: &str) -> Option<&FieldValue> {
        self.fields.get(property)
    }
}

/// Arena of entities with bidirectional reference bookkeeping
///
/// Every reference edge is created through [`EntityGraph::link`], which
/// updates the forward field of the source and the reverse index of the
/// target together, so the two views can never disagree.
#[derive(Debug, Default)]
pub struct EntityGraph {
    entities: Vec<Entity>,
    by_iri: BTreeMap<String, EntityId>,
    reverse: BTreeMap<(EntityId, String), BTreeSet<EntityId>>,
}

impl EntityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Add an entity; an entity with the same IRI already present wins
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        if let Some(id) = self.by_iri.get(&entity.iri) {
            return *id;
        }
        let id = EntityId(self.entities.len());
        self.by_iri.insert(entity.iri.clone(), id);
        self.entities.push(entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn entity(&self, id: EntityId) -> RuntimeResult<&Entity> {
        self.get(id).ok_or(RuntimeError::UnknownEntity(id.0))
    }

    fn entity_mut(&mut self, id: EntityId) -> RuntimeResult<&mut Entity> {
        self.entities
            .get_mut(id.0)
            .ok_or(RuntimeError::UnknownEntity(id.0))
    }

    pub fn id_of(&self, iri: &str) -> Option<EntityId> {
        self.by_iri.get(iri).copied()
    }

    pub fn set_label(&mut self, id: EntityId, label: impl Into<String>) -> RuntimeResult<()> {
        self.entity_mut(id)?.label = Some(label.into());
        Ok(())
    }

    fn property(
        &self,
        id: EntityId,
        property: &str,
        expected: Classification,
    ) -> RuntimeResult<PropertyBinding> {
        let entity = self.entity(id)?;
        let binding = entity
            .binding
            .property(property)
            .ok_or_else(|| RuntimeError::UnknownProperty {
                class: entity.class_iri().to_string(),
                property: property.to_string(),
            })?;
        let matches = binding.classification == expected
            || (expected.is_reference() && binding.classification.is_reference());
        if !matches {
            return Err(RuntimeError::ClassificationMismatch {
                property: property.to_string(),
                expected: expected.name().to_string(),
                actual: binding.classification,
            });
        }
        Ok(binding.clone())
    }

    fn field_mut(&mut self, id: EntityId, property: &str) -> RuntimeResult<&mut FieldValue> {
        let entity = self.entity_mut(id)?;
        let class = entity.class_iri().to_string();
        entity
            .fields
            .get_mut(property)
            .ok_or_else(|| RuntimeError::UnknownProperty {
                class,
                property: property.to_string(),
            })
    }

    /// Set (or clear) a single-valued literal property
    pub fn set_value<T: LiteralValue>(
        &mut self,
        id: EntityId,
        property: &str,
        value: Option<T>,
    ) -> RuntimeResult<()> {
        self.property(id, property, Classification::Value)?;
        *self.field_mut(id, property)? = FieldValue::Value(value.map(|v| Literal::typed(&v)));
        Ok(())
    }

    /// Append to a multi-valued literal property
    pub fn push_value<T: LiteralValue>(
        &mut self,
        id: EntityId,
        property: &str,
        value: T,
    ) -> RuntimeResult<()> {
        self.property(id, property, Classification::Array)?;
        if let FieldValue::Array(values) = self.field_mut(id, property)? {
            values.push(Literal::typed(&value));
        }
        Ok(())
    }

    pub fn value<T: LiteralValue>(&self, id: EntityId, property: &str) -> Option<T> {
        match self.get(id)?.field(property)? {
            FieldValue::Value(Some(lit)) => lit.parse(),
            _ => None,
        }
    }

    pub fn values<T: LiteralValue>(&self, id: EntityId, property: &str) -> Vec<T> {
        match self.get(id).and_then(|e| e.field(property)) {
            Some(FieldValue::Array(values)) => values.iter().filter_map(|lit| lit.parse()).collect(),
            _ => Vec::new(),
        }
    }

    /// Create a reference edge `source --property--> target`
    ///
    /// For an Object property the previous target (if any) is replaced and
    /// its reverse entry dropped; for a Collection property the target is
    /// added. The target's reverse index is updated in the same step.
    pub fn link(&mut self, source: EntityId, property: &str, target: EntityId) -> RuntimeResult<()> {
        let binding = self.property(source, property, Classification::Object)?;
        let target_entity = self.entity(target)?;
        if let Some(range) = &binding.range {
            if !target_entity.binding.is_a(range) {
                return Err(RuntimeError::RangeMismatch {
                    property: property.to_string(),
                    expected: range.clone(),
                    actual: target_entity.class_iri().to_string(),
                });
            }
        }

        let previous = match self.field_mut(source, property)? {
            FieldValue::Object(current) => current.replace(target),
            FieldValue::Collection(members) => {
                members.insert(target);
                None
            }
            _ => None,
        };
        if let Some(previous) = previous.filter(|p| *p != target) {
            self.remove_reverse(previous, property, source);
        }
        self.reverse
            .entry((target, property.to_string()))
            .or_default()
            .insert(source);
        Ok(())
    }

    /// Remove the edge `source --property--> target` if present
    pub fn unlink(&mut self, source: EntityId, property: &str, target: EntityId) -> RuntimeResult<()> {
        self.property(source, property, Classification::Object)?;
        let removed = match self.field_mut(source, property)? {
            FieldValue::Object(current) if *current == Some(target) => {
                *current = None;
                true
            }
            FieldValue::Collection(members) => members.remove(&target),
            _ => false,
        };
        if removed {
            self.remove_reverse(target, property, source);
        }
        Ok(())
    }

    fn remove_reverse(&mut self, target: EntityId, property: &str, source: EntityId) {
        let key = (target, property.to_string());
        if let Some(sources) = self.reverse.get_mut(&key) {
            sources.remove(&source);
            if sources.is_empty() {
                self.reverse.remove(&key);
            }
        }
    }

    /// The inverse adder: record that `source` refers to `target`
    ///
    /// Equivalent to `link(source, property, target)`; provided so callers
    /// holding the target can populate the relationship from its side.
    pub fn add_reverse(&mut self, target: EntityId, property: &str, source: EntityId) -> RuntimeResult<()> {
        self.link(source, property, target)
    }

    pub fn object(&self, id: EntityId, property: &str) -> Option<EntityId> {
        match self.get(id)?.field(property)? {
            FieldValue::Object(target) => *target,
            _ => None,
        }
    }

    pub fn collection(&self, id: EntityId, property: &str) -> Vec<EntityId> {
        match self.get(id).and_then(|e| e.field(property)) {
            Some(FieldValue::Collection(members)) => members.iter().copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Entities referring to `target` through `property`
    pub fn reverse(&self, target: EntityId, property: &str) -> Vec<EntityId> {
        self.reverse
            .get(&(target, property.to_string()))
            .map(|sources| sources.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Write `root` and everything reachable from it
    ///
    /// Reachability follows forward references and reverse references of
    /// properties that are not inverse-functional. Each entity is written
    /// once; the number of newly written entities is returned.
    pub fn write(&self, root: EntityId, target: &mut TargetModel) -> RuntimeResult<usize> {
        let mut pending = vec![root];
        let mut written = 0;

        while let Some(id) = pending.pop() {
            let entity = self.entity(id)?;
            if !target.mark_written(&entity.iri) {
                continue;
            }
            written += 1;

            target.add_object(&entity.iri, rdf::TYPE, Some(entity.class_iri()))?;
            if let Some(label) = &entity.label {
                target.add_literal(&entity.iri, rdfs::LABEL, &Literal::typed(label))?;
            }

            for (property, field) in &entity.fields {
                match field {
                    FieldValue::Value(value) => {
                        if let Some(lit) = value {
                            target.add_literal(&entity.iri, property, lit)?;
                        }
                    }
                    FieldValue::Array(values) => {
                        for lit in values {
                            target.add_literal(&entity.iri, property, lit)?;
                        }
                    }
                    FieldValue::Object(reference) => {
                        if let Some(reference) = reference {
                            let other = self.entity(*reference)?;
                            target.add_object(&entity.iri, property, Some(&other.iri))?;
                            pending.push(*reference);
                        }
                    }
                    FieldValue::Collection(members) => {
                        for member in members {
                            let other = self.entity(*member)?;
                            target.add_object(&entity.iri, property, Some(&other.iri))?;
                            pending.push(*member);
                        }
                    }
                }
            }

            for ((referenced, property), sources) in &self.reverse {
                if *referenced != id {
                    continue;
                }
                for source in sources {
                    let source_entity = self.entity(*source)?;
                    let follows = source_entity
                        .binding
                        .property(property)
                        .is_some_and(|p| !p.inverse_functional);
                    if follows {
                        pending.push(*source);
                    }
                }
            }
        }

        tracing::debug!(root = root.0, written, "wrote entity closure");
        Ok(written)
    }

    /// Load the entity `iri` of class `class_iri` from `source`
    ///
    /// Only statements whose subject is `iri` are read for the entity
    /// itself. Referenced entities are created through `factory` and loaded
    /// from the full source graph. Every IRI is loaded once, through a
    /// worklist, so reference cycles and long chains terminate. An Object
    /// property with several targets takes the first in IRI order.
    pub fn load(
        &mut self,
        source: &FastGraph,
        factory: &EntityFactory,
        class_iri: &str,
        iri: &str,
    ) -> RuntimeResult<EntityId> {
        if let Some(id) = self.id_of(iri) {
            return Ok(id);
        }
        let root = self.insert(factory.create(class_iri, iri)?);
        let mut pending = vec![root];
        let mut loaded = 0;
        while let Some(id) = pending.pop() {
            self.populate(source, factory, id, &mut pending)?;
            loaded += 1;
        }
        tracing::debug!(root = root.0, loaded, "loaded entity closure");
        Ok(root)
    }

    /// Fill the fields of `id` from its statements, queueing referenced
    /// entities that are new to this graph
    fn populate(
        &mut self,
        source: &FastGraph,
        factory: &EntityFactory,
        id: EntityId,
        pending: &mut Vec<EntityId>,
    ) -> RuntimeResult<()> {
        let entity = self.entity(id)?;
        let binding = Arc::clone(&entity.binding);
        let statements = statements_about(source, &entity.iri);

        let label = statements.iter().find_map(|(p, o)| match o {
            Node::Literal(lit) if p == rdfs::LABEL => Some(lit.lexical.clone()),
            _ => None,
        });
        if let Some(label) = label {
            self.set_label(id, label)?;
        }

        for property in &binding.properties {
            let literals = statements.iter().filter_map(|(p, o)| match o {
                Node::Literal(lit) if *p == property.iri => Some(lit.clone()),
                _ => None,
            });
            match property.classification {
                Classification::Value => {
                    let value = literals.into_iter().next();
                    *self.field_mut(id, &property.iri)? = FieldValue::Value(value);
                }
                Classification::Array => {
                    *self.field_mut(id, &property.iri)? = FieldValue::Array(literals.collect());
                }
                Classification::Object | Classification::Collection => {
                    let Some(range) = property.range.as_deref() else {
                        continue;
                    };
                    let mut targets = super::load::object_iris(&statements, &property.iri);
                    targets.sort();
                    targets.dedup();
                    if property.classification == Classification::Object && targets.len() > 1 {
                        tracing::warn!(
                            entity = %self.entity(id)?.iri,
                            property = %property.iri,
                            count = targets.len(),
                            "several objects for a single-valued property, using the first"
                        );
                        targets.truncate(1);
                    }
                    for target_iri in targets {
                        let target = match self.id_of(&target_iri) {
                            Some(target) => target,
                            None => {
                                let target = self.insert(factory.create(range, &target_iri)?);
                                pending.push(target);
                                target
                            }
                        };
                        self.link(id, &property.iri, target)?;
                    }
                }
            }
        }
        Ok(())
    }
}
