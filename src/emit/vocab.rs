//! Java vocabulary constants emitter
//!
//! Generates the class referenced by entity code as `<Vocab>.<term>`: one
//! `IRI` constant per class and property, plus the namespace and prefix.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{Indent, escape_java_string, escape_javadoc};
use crate::io::{Emitter, GenResult, require_dir, write_source_file};
use crate::owl_model::GenerationModel;

pub struct VocabularyEmitter {
    pub vocab_name: String,
    pub vocab_package: Option<String>,
    pub indent: Indent,
}

impl VocabularyEmitter {
    pub fn new(vocab_name: impl Into<String>) -> Self {
        Self {
            vocab_name: vocab_name.into(),
            vocab_package: None,
            indent: Indent::default(),
        }
    }

    fn prefix(&self, model: &GenerationModel) -> String {
        model
            .vocabulary
            .prefix
            .clone()
            .unwrap_or_else(|| self.vocab_name.to_lowercase())
    }

    pub fn generate(&self, model: &GenerationModel) -> String {
        let i1 = self.indent.level(1);
        let i2 = self.indent.level(2);
        let vocabulary = &model.vocabulary;

        let mut labels: BTreeMap<&str, &str> = BTreeMap::new();
        for class in &model.classes {
            labels.insert(&class.iri, class.title());
            for property in &class.properties {
                if let Some(label) = &property.label {
                    labels.insert(&property.iri, label);
                }
            }
        }
        let (classes, properties): (Vec<_>, Vec<_>) = vocabulary
            .constants
            .iter()
            .partition(|(iri, _)| model.class(iri).is_some());

        let mut out = String::new();
        if let Some(package) = &self.vocab_package {
            out.push_str(&format!("package {package};\n\n"));
        }
        out.push_str("import org.eclipse.rdf4j.model.IRI;\n");
        out.push_str("import org.eclipse.rdf4j.model.Namespace;\n");
        out.push_str("import org.eclipse.rdf4j.model.ValueFactory;\n");
        out.push_str("import org.eclipse.rdf4j.model.impl.SimpleNamespace;\n");
        out.push_str("import org.eclipse.rdf4j.model.impl.SimpleValueFactory;\n\n");

        out.push_str(&format!(
            "/**\n * Vocabulary constants for the {} vocabulary.\n * <p>\n * Namespace: {{@code <{}>}}\n */\n",
            self.vocab_name, vocabulary.namespace
        ));
        out.push_str(&format!("public class {}\n{{\n", self.vocab_name));
        out.push_str(&format!(
            "{i1}public static final String NAMESPACE = \"{}\";\n\n",
            escape_java_string(&vocabulary.namespace)
        ));
        out.push_str(&format!(
            "{i1}public static final String PREFIX = \"{}\";\n\n",
            escape_java_string(&self.prefix(model))
        ));
        out.push_str(&format!(
            "{i1}public static final Namespace NS = new SimpleNamespace(PREFIX, NAMESPACE);\n\n"
        ));

        for (heading, terms) in [("Classes", &classes), ("Properties", &properties)] {
            if terms.is_empty() {
                continue;
            }
            out.push_str(&format!("{i1}// {heading}\n\n"));
            for (iri, constant) in terms {
                let doc = match labels.get(iri.as_str()) {
                    Some(label) => format!("{} {{@code <{iri}>}}", escape_javadoc(label)),
                    None => format!("{{@code <{iri}>}}"),
                };
                out.push_str(&format!("{i1}/** {doc} */\n"));
                out.push_str(&format!("{i1}public static final IRI {constant};\n\n"));
            }
        }

        out.push_str(&format!("{i1}static\n{i1}{{\n"));
        out.push_str(&format!(
            "{i2}final ValueFactory factory = SimpleValueFactory.getInstance();\n"
        ));
        for (iri, constant) in &vocabulary.constants {
            out.push_str(&format!(
                "{i2}{constant} = factory.createIRI(\"{}\");\n",
                escape_java_string(iri)
            ));
        }
        out.push_str(&format!("{i1}}}\n"));
        out.push_str("}\n");
        out
    }
}

impl Emitter for VocabularyEmitter {
    fn emit(&self, model: &GenerationModel, output_dir: &Path) -> GenResult<Vec<PathBuf>> {
        require_dir(output_dir)?;
        let path = write_source_file(
            output_dir,
            &format!("{}.java", self.vocab_name),
            &self.generate(model),
        )?;
        Ok(vec![path])
    }

    fn target_id(&self) -> &str {
        "java-vocabulary"
    }
}
