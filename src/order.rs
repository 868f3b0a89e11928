//! Superclass-first ordering of classes
//!
//! Some targets (the JavaScript mapper module) declare classes in file order
//! and need every superclass declared before its subclasses. Classes are
//! sorted by the depth of their superclass chain, which is a valid
//! topological order for single inheritance of any depth.

use std::collections::BTreeSet;

use crate::naming;
use crate::owl_model::ClassModel;

/// Number of superclass hops from `class` to a root
///
/// Superclasses outside `classes` end the chain; cycles are cut at the first
/// repeated class.
fn depth(classes: &[ClassModel], class: &ClassModel) -> usize {
    let mut seen = BTreeSet::new();
    seen.insert(class.iri.as_str());
    let mut depth = 0;
    let mut current = class.superclass.as_deref();
    while let Some(iri) = current {
        if !seen.insert(iri) {
            tracing::warn!(class = %class.iri, "superclass cycle");
            break;
        }
        let Some(parent) = classes.iter().find(|c| c.iri == iri) else {
            break;
        };
        depth += 1;
        current = parent.superclass.as_deref();
    }
    depth
}

/// Classes ordered so that each one follows all of its superclasses
///
/// Ties are broken by local name, then by IRI, so the order is stable across
/// runs.
pub fn order_classes(classes: &[ClassModel]) -> Vec<&ClassModel> {
    let mut keyed: Vec<(usize, &str, &ClassModel)> = classes
        .iter()
        .map(|c| (depth(classes, c), naming::local_name(&c.iri), c))
        .collect();
    keyed.sort_by(|a, b| (a.0, a.1, &a.2.iri).cmp(&(b.0, b.1, &b.2.iri)));
    keyed.into_iter().map(|(_, _, c)| c).collect()
}
