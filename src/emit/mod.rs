//! Code emitters
//!
//! Each emitter renders the [`GenerationModel`](crate::owl_model::GenerationModel)
//! into source files of one target language.

pub mod java;
pub mod js;
pub mod vocab;

pub use java::JavaEmitter;
pub use js::JsEmitter;
pub use vocab::VocabularyEmitter;

/// Package of the Java runtime library the generated classes extend
pub const DEFAULT_RUNTIME_PACKAGE: &str = "io.github.radkovo.rdf4j.builder";

/// Base class of generated Java entities without a superclass
pub const DEFAULT_JAVA_SUPERCLASS: &str = "RDFEntity";

/// Indentation unit used in generated files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indent(String);

impl Default for Indent {
    fn default() -> Self {
        Self::tab()
    }
}

impl Indent {
    pub fn tab() -> Self {
        Self("\t".to_string())
    }

    pub fn spaces(count: usize) -> Self {
        Self(" ".repeat(count))
    }

    /// The indentation string for nesting `depth`
    pub fn level(&self, depth: usize) -> String {
        self.0.repeat(depth)
    }
}

/// Collapse runs of whitespace and wrap greedily at `width` columns
///
/// Words longer than `width` are kept whole on their own line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Escape text for a Java string literal
pub fn escape_java_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Escape text placed inside a Javadoc comment
pub fn escape_javadoc(s: &str) -> String {
    s.replace("*/", "*&#47;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for a single-quoted JavaScript string literal
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
