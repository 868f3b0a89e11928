//! JavaScript mapper registry emitter
//!
//! Renders `<Vocab>Mappers.js`: one creator class per ontology class that
//! maps property names to IRIs and type names, followed by a registry keyed
//! by class IRI. Creators are declared superclass-first.

use std::path::{Path, PathBuf};

use askama::Template;

use super::{Indent, escape_js_string};
use crate::classifier::{JsTypes, TypeMapping};
use crate::io::{Emitter, GenResult, require_dir, write_source_file};
use crate::naming;
use crate::order::order_classes;
use crate::owl_model::{ClassModel, GenerationModel};

/// Creator base class for classes without a superclass
const DEFAULT_JS_SUPERCLASS: &str = "Object";

#[derive(Template)]
#[template(path = "mappers.js", escape = "none")]
struct MappersTemplate {
    creators: Vec<CreatorView>,
    i1: String,
    i2: String,
    i3: String,
}

struct CreatorView {
    name: String,
    superclass: String,
    iri: String,
    mappings: Vec<MappingView>,
}

struct MappingView {
    key: String,
    iri: String,
    type_name: String,
}

pub struct JsEmitter {
    pub vocab_name: String,
    /// Only classes whose IRI starts with this prefix are emitted
    pub include_prefix: Option<String>,
    pub indent: Indent,
}

/// Object literal key for a property name, quoted unless it is a plain
/// identifier
fn js_key(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if plain {
        name.to_string()
    } else {
        format!("'{}'", escape_js_string(name))
    }
}

impl JsEmitter {
    pub fn new(vocab_name: impl Into<String>) -> Self {
        Self {
            vocab_name: vocab_name.into(),
            include_prefix: None,
            indent: Indent::default(),
        }
    }

    fn included(&self, class: &ClassModel) -> bool {
        self.include_prefix
            .as_deref()
            .is_none_or(|prefix| class.iri.starts_with(prefix))
    }

    pub fn file_name(&self) -> String {
        format!("{}Mappers.js", self.vocab_name)
    }

    pub fn generate(&self, model: &GenerationModel) -> GenResult<String> {
        let selected: Vec<ClassModel> = model
            .classes
            .iter()
            .filter(|c| self.included(c))
            .cloned()
            .collect();
        tracing::debug!(
            selected = selected.len(),
            total = model.classes.len(),
            "classes selected for mappers"
        );

        let creators = order_classes(&selected)
            .into_iter()
            .map(|class| {
                let superclass = match class.superclass.as_deref() {
                    Some(iri) => match selected.iter().find(|c| c.iri == iri) {
                        Some(parent) => parent.name.clone(),
                        None => {
                            tracing::warn!(
                                class = %class.iri,
                                superclass = iri,
                                "superclass not emitted, extending the default creator"
                            );
                            DEFAULT_JS_SUPERCLASS.to_string()
                        }
                    },
                    None => DEFAULT_JS_SUPERCLASS.to_string(),
                };
                CreatorView {
                    name: class.name.clone(),
                    superclass,
                    iri: escape_js_string(&class.iri),
                    mappings: class
                        .properties
                        .iter()
                        .map(|p| MappingView {
                            key: js_key(naming::local_name(&p.iri)),
                            iri: escape_js_string(&p.iri),
                            type_name: escape_js_string(&JsTypes.field_type(&p.property_type)),
                        })
                        .collect(),
                }
            })
            .collect();

        let template = MappersTemplate {
            creators,
            i1: self.indent.level(1),
            i2: self.indent.level(2),
            i3: self.indent.level(3),
        };
        let mut js = template.render()?;
        if !js.ends_with('\n') {
            js.push('\n');
        }
        Ok(js)
    }
}

impl Emitter for JsEmitter {
    fn emit(&self, model: &GenerationModel, output_dir: &Path) -> GenResult<Vec<PathBuf>> {
        require_dir(output_dir)?;
        let js = self.generate(model)?;
        Ok(vec![write_source_file(output_dir, &self.file_name(), &js)?])
    }

    fn target_id(&self) -> &str {
        "js"
    }
}
