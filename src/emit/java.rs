//! Java entity class and factory interface emitter

use std::path::{Path, PathBuf};

use super::{DEFAULT_JAVA_SUPERCLASS, DEFAULT_RUNTIME_PACKAGE, Indent, escape_java_string, escape_javadoc, wrap};
use crate::classifier::{Classification, JavaTypes, PropertyType, RangeType, TypeMapping};
use crate::io::{Emitter, GenError, GenResult, require_dir, write_source_file};
use crate::naming::{self, capitalize};
use crate::owl_model::{ClassModel, GenerationModel, PropertyModel, ReverseProperty};

/// Javadoc line width
const DOC_WIDTH: usize = 70;

/// Emits one Java class per ontology class plus the factory interface
pub struct JavaEmitter {
    pub vocab_name: String,
    pub vocab_package: Option<String>,
    pub class_package: Option<String>,
    pub runtime_package: String,
    pub indent: Indent,
}

impl JavaEmitter {
    pub fn new(vocab_name: impl Into<String>) -> Self {
        Self {
            vocab_name: vocab_name.into(),
            vocab_package: None,
            class_package: None,
            runtime_package: DEFAULT_RUNTIME_PACKAGE.to_string(),
            indent: Indent::default(),
        }
    }

    fn factory_name(&self) -> String {
        format!("{}Factory", self.vocab_name)
    }

    fn javadoc(
        &self,
        depth: usize,
        title: Option<&str>,
        description: Option<&str>,
        iri: Option<&str>,
        see_also: &[String],
    ) -> String {
        let ind = self.indent.level(depth);
        let mut blocks: Vec<Vec<String>> = Vec::new();
        if let Some(title) = title {
            let mut lines = wrap(&escape_javadoc(title), DOC_WIDTH);
            if let Some(last) = lines.last_mut() {
                if !last.ends_with('.') {
                    last.push('.');
                }
            }
            blocks.push(lines);
        }
        if let Some(description) = description {
            let lines = wrap(&escape_javadoc(description), DOC_WIDTH);
            if !lines.is_empty() {
                blocks.push(lines);
            }
        }
        if let Some(iri) = iri {
            blocks.push(vec![format!("IRI: {{@code <{iri}>}}")]);
        }

        let mut out = format!("{ind}/**\n");
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                out.push_str(&format!("{ind} * <p>\n"));
            }
            for line in block {
                out.push_str(&format!("{ind} * {line}\n"));
            }
        }
        if !see_also.is_empty() {
            out.push_str(&format!("{ind} *\n"));
            for link in see_also {
                out.push_str(&format!("{ind} * @see <a href=\"{link}\">{link}</a>\n"));
            }
        }
        out.push_str(&format!("{ind} */\n"));
        out
    }

    /// `Vocab.constant` for vocabulary terms, an inline IRI for foreign ones
    fn iri_reference(&self, model: &GenerationModel, iri: &str) -> String {
        match model.vocabulary.constant(iri) {
            Some(constant) => format!("{}.{constant}", self.vocab_name),
            None => format!("vf.createIRI(\"{}\")", escape_java_string(iri)),
        }
    }

    /// Generate the source of one entity class
    pub fn generate_class(&self, model: &GenerationModel, class: &ClassModel) -> GenResult<String> {
        for property in &class.properties {
            if let Some(range) = property.range_class() {
                if model.class(range).is_none() {
                    return Err(GenError::Generation(format!(
                        "property {} of class {} refers to undeclared class {range}",
                        property.iri, class.iri
                    )));
                }
            }
        }

        let mut out = String::new();
        out.push_str(&self.generate_header(class));
        out.push_str(&self.javadoc(
            0,
            Some(class.title()),
            class.description.as_deref(),
            Some(&class.iri),
            &class.see_also,
        ));

        let superclass = class
            .superclass
            .as_deref()
            .map(|iri| naming::java_identifier(naming::local_name(iri)))
            .unwrap_or_else(|| DEFAULT_JAVA_SUPERCLASS.to_string());
        out.push_str(&format!("public class {} extends {superclass}\n{{\n", class.name));
        out.push_str(&format!(
            "{}public static final IRI CLASS_IRI = vf.createIRI(\"{}\");\n\n",
            self.indent.level(1),
            escape_java_string(&class.iri)
        ));

        out.push_str(&self.generate_fields(class));
        out.push_str(&self.generate_constructor(class));
        out.push_str(&self.generate_accessors(class));
        out.push_str(&self.generate_reverse_accessors(class));
        out.push_str(&self.generate_add_to_model(model, class));
        out.push_str(&self.generate_load_from_model(model, class)?);
        out.push_str("}\n");
        Ok(out)
    }

    fn generate_header(&self, class: &ClassModel) -> String {
        let mut out = String::new();
        if let Some(package) = &self.class_package {
            out.push_str(&format!("package {package};\n\n"));
        }

        let needs_set = class.has_references() || !class.reverse.is_empty();
        let needs_hash_set = class.has_collections() || !class.reverse.is_empty();
        if needs_hash_set {
            out.push_str("import java.util.HashSet;\n");
        }
        if needs_set {
            out.push_str("import java.util.Set;\n");
        }
        if needs_set || needs_hash_set {
            out.push('\n');
        }

        out.push_str("import org.eclipse.rdf4j.model.IRI;\n");
        out.push_str("import org.eclipse.rdf4j.model.Model;\n");
        let runtime = &self.runtime_package;
        out.push_str(&format!("import {runtime}.EntityFactory;\n"));
        if class.superclass.is_none() {
            out.push_str(&format!("import {runtime}.{DEFAULT_JAVA_SUPERCLASS};\n"));
        }
        out.push_str(&format!("import {runtime}.TargetModel;\n"));
        if let Some(vocab_package) = &self.vocab_package {
            if self.class_package.as_ref() != Some(vocab_package) {
                out.push_str(&format!("import {vocab_package}.{};\n", self.vocab_name));
            }
        }
        out.push('\n');
        out
    }

    fn generate_fields(&self, class: &ClassModel) -> String {
        let i1 = self.indent.level(1);
        let mut out = String::new();
        for property in &class.properties {
            out.push_str(&self.javadoc(
                1,
                Some(property.label.as_deref().unwrap_or(&property.name)),
                property.description.as_deref(),
                Some(&property.iri),
                &[],
            ));
            out.push_str(&format!(
                "{i1}private {} {};\n\n",
                JavaTypes.field_type(&property.property_type),
                property.name
            ));
        }
        for reverse in &class.reverse {
            out.push_str(&format!(
                "{i1}/**\n{i1} * Inverse collection for {}.{}.\n{i1} */\n",
                reverse.source_name, reverse.property_name
            ));
            out.push_str(&format!(
                "{i1}private Set<{}> {};\n\n",
                reverse.source_name, reverse.name
            ));
        }
        out
    }

    fn generate_constructor(&self, class: &ClassModel) -> String {
        let i1 = self.indent.level(1);
        let i2 = self.indent.level(2);
        let mut out = String::new();
        out.push_str(&format!("{i1}public {}(IRI iri)\n{i1}{{\n", class.name));
        out.push_str(&format!("{i2}super(iri);\n"));
        for property in &class.properties {
            match property.classification() {
                Classification::Collection => {
                    out.push_str(&format!("{i2}{} = new HashSet<>();\n", property.name));
                }
                Classification::Array => {
                    let field_type = JavaTypes.field_type(&property.property_type);
                    let item = field_type.trim_end_matches("[]");
                    out.push_str(&format!("{i2}{} = new {item}[0];\n", property.name));
                }
                Classification::Value | Classification::Object => {}
            }
        }
        for reverse in &class.reverse {
            out.push_str(&format!("{i2}{} = new HashSet<>();\n", reverse.name));
        }
        out.push_str(&format!("{i1}}}\n\n"));

        out.push_str(&format!("{i1}@Override\n{i1}public IRI getClassIRI()\n{i1}{{\n"));
        out.push_str(&format!("{i2}return {}.CLASS_IRI;\n", class.name));
        out.push_str(&format!("{i1}}}\n\n"));
        out
    }

    fn generate_accessors(&self, class: &ClassModel) -> String {
        let i1 = self.indent.level(1);
        let i2 = self.indent.level(2);
        let mut out = String::new();
        for property in &class.properties {
            let field_type = JavaTypes.field_type(&property.property_type);
            let name = &property.name;
            let cap = capitalize(name);

            out.push_str(&format!(
                "{i1}public {field_type} get{cap}()\n{i1}{{\n{i2}return {name};\n{i1}}}\n\n"
            ));

            match property.classification() {
                Classification::Value | Classification::Object => {
                    out.push_str(&format!(
                        "{i1}public void set{cap}({field_type} {name})\n{i1}{{\n{i2}this.{name} = {name};\n{i1}}}\n\n"
                    ));
                }
                Classification::Array => {
                    let item = field_type.trim_end_matches("[]");
                    out.push_str(&format!("{i1}public void add{cap}({item} item)\n{i1}{{\n"));
                    out.push_str(&format!(
                        "{i2}{name} = java.util.Arrays.copyOf({name}, {name}.length + 1);\n"
                    ));
                    out.push_str(&format!("{i2}{name}[{name}.length - 1] = item;\n"));
                    out.push_str(&format!("{i1}}}\n\n"));
                }
                Classification::Collection => {
                    let item = JavaTypes.field_type(&PropertyType {
                        range: property.property_type.range.clone(),
                        functional: true,
                    });
                    out.push_str(&format!(
                        "{i1}public void add{cap}({item} item)\n{i1}{{\n{i2}{name}.add(item);\n{i1}}}\n\n"
                    ));
                }
            }
        }
        out
    }

    fn generate_reverse_accessors(&self, class: &ClassModel) -> String {
        let i1 = self.indent.level(1);
        let i2 = self.indent.level(2);
        let mut out = String::new();
        for reverse in &class.reverse {
            let source = &reverse.source_name;
            out.push_str(&format!(
                "{i1}public Set<{source}> get{}()\n{i1}{{\n{i2}return {};\n{i1}}}\n\n",
                capitalize(&reverse.name),
                reverse.name
            ));

            let param = naming::java_identifier(&naming::decapitalize(source));
            let adder = reverse_adder_name(class, reverse);
            out.push_str(&format!(
                "{i1}public void {adder}({source} {param})\n{i1}{{\n"
            ));
            out.push_str(&format!("{i2}{}.add({param});\n", reverse.name));
            let forward = capitalize(&reverse.property_name);
            if reverse.updates_forward {
                match reverse.classification {
                    Classification::Collection => {
                        out.push_str(&format!("{i2}{param}.get{forward}().add(this);\n"));
                    }
                    _ => {
                        out.push_str(&format!("{i2}{param}.set{forward}(this);\n"));
                    }
                }
            }
            out.push_str(&format!("{i1}}}\n\n"));
        }
        out
    }

    fn generate_add_to_model(&self, model: &GenerationModel, class: &ClassModel) -> String {
        let i1 = self.indent.level(1);
        let i2 = self.indent.level(2);
        let mut out = String::new();
        out.push_str(&format!(
            "{i1}@Override\n{i1}public void addToModel(TargetModel target)\n{i1}{{\n"
        ));
        out.push_str(&format!("{i2}super.addToModel(target);\n"));
        for property in &class.properties {
            out.push_str(&format!(
                "{i2}add{}(target, {}, {});\n",
                property.classification(),
                self.iri_reference(model, &property.iri),
                property.name
            ));
        }
        for reverse in &class.reverse {
            out.push_str(&format!("{i2}target.addAll({});\n", reverse.name));
        }
        out.push_str(&format!("{i1}}}\n\n"));
        out
    }

    fn generate_load_from_model(&self, model: &GenerationModel, class: &ClassModel) -> GenResult<String> {
        let i1 = self.indent.level(1);
        let i2 = self.indent.level(2);
        let i3 = self.indent.level(3);
        let i4 = self.indent.level(4);
        let factory = self.factory_name();
        let mut out = String::new();
        out.push_str(&format!(
            "{i1}@Override\n{i1}public void loadFromModel(Model model, EntityFactory efactory)\n{i1}{{\n"
        ));
        out.push_str(&format!("{i2}super.loadFromModel(model, efactory);\n"));

        if class.has_references() {
            out.push_str(&format!("{i2}if (!(efactory instanceof {factory}))\n"));
            out.push_str(&format!(
                "{i3}throw new IllegalArgumentException(\"Factory must be an instance of {factory}\");\n"
            ));
            out.push_str(&format!("{i2}final {factory} factory = ({factory}) efactory;\n"));
        }
        if !class.properties.is_empty() {
            out.push_str(&format!("\n{i2}final Model m = model.filter(getIRI(), null, null);\n"));
        }

        for property in &class.properties {
            let constant = self.iri_reference(model, &property.iri);
            let name = &property.name;
            match property.classification() {
                Classification::Value | Classification::Array => {
                    out.push_str(&format!(
                        "{i2}{name} = {}(m, {constant});\n",
                        load_method(property)
                    ));
                }
                Classification::Object | Classification::Collection => {
                    let range = property.range_class().ok_or_else(|| {
                        GenError::Generation(format!("property {} has no range class", property.iri))
                    })?;
                    let target = model.class(range).ok_or_else(|| {
                        GenError::Generation(format!("no factory method for class {range}"))
                    })?;
                    out.push_str(&format!("{i2}//{name}\n"));
                    if property.classification() == Classification::Collection {
                        out.push_str(&format!("{i2}{name} = new HashSet<>();\n"));
                    } else {
                        out.push_str(&format!("{i2}{name} = null;\n"));
                    }
                    out.push_str(&format!(
                        "{i2}for (IRI iri : getObjectIRIs(m, {constant}))\n{i2}{{\n"
                    ));
                    out.push_str(&format!(
                        "{i3}final {0} item = factory.create{0}(iri);\n",
                        target.name
                    ));
                    // nested entities read only the statements about this subject
                    out.push_str(&format!("{i3}if (!iri.equals(getIRI()))\n"));
                    out.push_str(&format!("{i4}item.loadFromModel(m, factory);\n"));
                    if property.classification() == Classification::Collection {
                        out.push_str(&format!("{i3}{name}.add(item);\n"));
                    } else {
                        out.push_str(&format!("{i3}{name} = item;\n{i3}break;\n"));
                    }
                    out.push_str(&format!("{i2}}}\n"));
                }
            }
        }
        out.push_str(&format!("{i1}}}\n"));
        Ok(out)
    }

    /// Generate the factory interface with one creation method per class
    pub fn generate_factory(&self, model: &GenerationModel) -> String {
        let i1 = self.indent.level(1);
        let mut out = String::new();
        if let Some(package) = &self.class_package {
            out.push_str(&format!("package {package};\n\n"));
        }
        out.push_str("import org.eclipse.rdf4j.model.IRI;\n");
        out.push_str(&format!("import {}.EntityFactory;\n\n", self.runtime_package));
        out.push_str(&format!(
            "/**\n * Creates the entities of the {} vocabulary.\n */\n",
            self.vocab_name
        ));
        out.push_str(&format!(
            "public interface {} extends EntityFactory\n{{\n",
            self.factory_name()
        ));
        for class in &model.classes {
            out.push_str(&format!(
                "{i1}public {0} create{0}(IRI iri);\n",
                class.name
            ));
        }
        out.push_str("}\n");
        out
    }
}

/// Name of the runtime loader for a literal property, e.g. `loadIntArray`
fn load_method(property: &PropertyModel) -> String {
    let scalar = match &property.property_type.range {
        RangeType::Datatype(xsd) => JavaTypes.scalar_type(*xsd).unwrap_or("String"),
        _ => "String",
    };
    let simple = scalar.rsplit('.').next().unwrap_or(scalar);
    let kind = if property.classification() == Classification::Array {
        "Array"
    } else {
        "Value"
    };
    format!("load{}{kind}", capitalize(simple))
}

/// Name of the inverse adder; disambiguated like the reverse field when
/// needed
fn reverse_adder_name(class: &ClassModel, reverse: &ReverseProperty) -> String {
    let base = format!("add{}", reverse.source_name);
    let default_field = naming::plural(&naming::decapitalize(&reverse.source_name));
    let clashes_with_forward = class
        .properties
        .iter()
        .filter(|p| p.classification().is_multi_valued())
        .any(|p| format!("add{}", capitalize(&p.name)) == base);
    if reverse.name != default_field || clashes_with_forward {
        format!("{base}By{}", capitalize(&reverse.property_name))
    } else {
        base
    }
}

impl Emitter for JavaEmitter {
    fn emit(&self, model: &GenerationModel, output_dir: &Path) -> GenResult<Vec<PathBuf>> {
        require_dir(output_dir)?;
        let mut written = Vec::new();
        for class in &model.classes {
            let source = self.generate_class(model, class)?;
            written.push(write_source_file(
                output_dir,
                &format!("{}.java", class.name),
                &source,
            )?);
        }
        written.push(write_source_file(
            output_dir,
            &format!("{}.java", self.factory_name()),
            &self.generate_factory(model),
        )?);
        Ok(written)
    }

    fn target_id(&self) -> &str {
        "java"
    }
}
