//! Identifier helpers
//!
//! IRI splitting, case adjustments and English pluralisation for the names
//! that end up in generated source files.

/// Extract the local name (fragment or last path segment) from an IRI
pub fn local_name(iri: &str) -> &str {
    // Try fragment first (after #)
    if let Some(pos) = iri.rfind('#') {
        return &iri[pos + 1..];
    }
    // Fall back to last path segment (after /)
    if let Some(pos) = iri.rfind('/') {
        return &iri[pos + 1..];
    }
    iri
}

/// The namespace part of an IRI, including the trailing `#` or `/`
pub fn namespace(iri: &str) -> &str {
    let end = iri.len() - local_name(iri).len();
    &iri[..end]
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Nouns whose plural no suffix rule produces
const IRREGULAR: &[(&str, &str)] = &[("child", "children"), ("person", "people")];

/// English plural of a word, keeping the case of its first letter.
///
/// Suffix rules only (`-s`/`-x`/`-z`/`-ch`/`-sh` take `-es`, consonant + `y`
/// becomes `-ies`), plus the short irregular table above. Compound
/// camel-case words are pluralised on their last component (`ContactPerson`
/// becomes `ContactPeople`).
pub fn plural(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let split = word
        .char_indices()
        .skip(1)
        .filter(|(_, c)| c.is_uppercase())
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0);
    let (head, tail) = word.split_at(split);
    let lower = tail.to_lowercase();

    let plural_tail = match IRREGULAR.iter().find(|(s, _)| *s == lower) {
        Some((_, irregular)) if tail.starts_with(|c: char| c.is_uppercase()) => {
            capitalize(irregular)
        }
        Some((_, irregular)) => (*irregular).to_string(),
        None => regular_plural(tail),
    };

    format!("{head}{plural_tail}")
}

fn regular_plural(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{word}es");
    }
    if lower.ends_with('y') {
        let before = lower.chars().rev().nth(1);
        if before.is_some_and(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }
    format!("{word}s")
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
];

/// Turn an arbitrary local name into a valid Java identifier.
pub fn java_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if JAVA_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_name_prefers_fragment() {
        assert_eq!(local_name("http://example.org/ns#Person"), "Person");
        assert_eq!(local_name("http://example.org/ns/Person"), "Person");
        assert_eq!(local_name("urn:x"), "urn:x");
    }

    #[test]
    fn namespace_keeps_separator() {
        assert_eq!(namespace("http://example.org/ns#Person"), "http://example.org/ns#");
        assert_eq!(namespace("http://example.org/ns/name"), "http://example.org/ns/");
    }

    #[test]
    fn case_helpers() {
        assert_eq!(capitalize("name"), "Name");
        assert_eq!(decapitalize("Person"), "person");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn plural_regular_rules() {
        assert_eq!(plural("document"), "documents");
        assert_eq!(plural("address"), "addresses");
        assert_eq!(plural("box"), "boxes");
        assert_eq!(plural("branch"), "branches");
        assert_eq!(plural("category"), "categories");
        assert_eq!(plural("day"), "days");
        assert_eq!(plural("bus"), "buses");
    }

    #[test]
    fn plural_irregular() {
        assert_eq!(plural("person"), "people");
        assert_eq!(plural("Person"), "People");
        assert_eq!(plural("child"), "children");
    }

    #[test]
    fn plural_compound_word_uses_last_component() {
        assert_eq!(plural("ContactPerson"), "ContactPeople");
        assert_eq!(plural("webPage"), "webPages");
        assert_eq!(plural("DataCategory"), "DataCategories");
    }

    #[test]
    fn java_identifier_sanitizes() {
        assert_eq!(java_identifier("has-name"), "has_name");
        assert_eq!(java_identifier("3d"), "_3d");
        assert_eq!(java_identifier("class"), "class_");
        assert_eq!(java_identifier("name"), "name");
    }
}
