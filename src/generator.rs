//! Generation driver
//!
//! Loads the input ontologies into one graph, builds the generation model
//! and runs the emitters of the selected target.

use std::path::{Path, PathBuf};

use crate::config::ResolvedConfig;
use crate::emit::{JavaEmitter, JsEmitter, VocabularyEmitter};
use crate::io::{Emitter, GenResult, require_dir};
use crate::ontology::Ontology;
use crate::owl_model::GenerationModel;

/// Which family of files to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Entity classes, factory interface and vocabulary class
    Java,
    /// Mapper registry module
    Js,
}

/// Parse every file into one merged ontology
pub fn load_ontology(files: &[PathBuf], format: Option<&str>) -> GenResult<Ontology> {
    let mut ontology = Ontology::new();
    for file in files {
        ontology.load(file, format)?;
    }
    tracing::debug!(statements = ontology.len(), "merged ontology graph");
    Ok(ontology)
}

fn java_emitters(config: &ResolvedConfig) -> (VocabularyEmitter, JavaEmitter) {
    let mut vocabulary = VocabularyEmitter::new(&config.vocab_name);
    vocabulary.vocab_package = config.vocab_package.clone();
    vocabulary.indent = config.indent.clone();

    let mut classes = JavaEmitter::new(&config.vocab_name);
    classes.vocab_package = config.vocab_package.clone();
    classes.class_package = config.class_package.clone();
    classes.runtime_package = config.runtime_package.clone();
    classes.indent = config.indent.clone();
    (vocabulary, classes)
}

fn js_emitter(config: &ResolvedConfig) -> JsEmitter {
    let mut emitter = JsEmitter::new(&config.vocab_name);
    emitter.include_prefix = config.include_prefix.clone();
    emitter.indent = config.indent.clone();
    emitter
}

fn run(emitter: &dyn Emitter, model: &GenerationModel, dir: &Path) -> GenResult<Vec<PathBuf>> {
    tracing::debug!(target_id = emitter.target_id(), dir = %dir.display(), "running emitter");
    emitter.emit(model, dir)
}

/// Generate the files of `target` from an already loaded ontology
pub fn generate_from(
    ontology: &Ontology,
    config: &ResolvedConfig,
    target: Target,
) -> GenResult<Vec<PathBuf>> {
    let model = GenerationModel::build(ontology, config.language.as_deref());
    tracing::info!(
        classes = ?model.classes.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        "found classes"
    );

    let mut written = Vec::new();
    match target {
        Target::Java => {
            let (vocabulary, classes) = java_emitters(config);
            written.extend(run(&vocabulary, &model, &config.vocab_dir)?);
            written.extend(run(&classes, &model, &config.class_dir)?);
        }
        Target::Js => {
            written.extend(run(&js_emitter(config), &model, &config.vocab_dir)?);
        }
    }
    Ok(written)
}

/// Load `files` and generate the files of `target`
///
/// Output directories are checked before any input is read, so a missing
/// directory fails without writing anything.
pub fn generate(
    files: &[PathBuf],
    config: &ResolvedConfig,
    target: Target,
) -> GenResult<Vec<PathBuf>> {
    require_dir(&config.vocab_dir)?;
    if target == Target::Java {
        require_dir(&config.class_dir)?;
    }
    let ontology = load_ontology(files, config.format.as_deref())?;
    let written = generate_from(&ontology, config, target)?;
    tracing::info!(files = written.len(), "generation finished");
    Ok(written)
}
