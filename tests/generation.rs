use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn ontogen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ontogen"))
        .args(args)
        .env("RUST_LOG", "ontogen=warn")
        .output()
        .expect("Failed to execute ontogen")
}

fn read(dir: &Path, file: &str) -> String {
    fs::read_to_string(dir.join(file)).unwrap_or_else(|e| panic!("{file}: {e}"))
}

fn generate_person(out: &Path) -> Output {
    ontogen(&[
        "java",
        "-v",
        "Ex",
        "-p",
        "org.example",
        "-o",
        out.to_str().unwrap(),
        "tests/fixtures/person.ttl",
    ])
}

#[test]
fn person_ontology_generates_java_sources() {
    let out = TempDir::new().unwrap();
    let output = generate_person(out.path());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let person = read(out.path(), "Person.java");
    assert!(person.starts_with("package org.example;\n"));
    assert!(person.contains("public class Person extends RDFEntity\n"));
    assert!(person.contains(" * Person.\n * <p>\n * A human being.\n"));
    assert!(person.contains("\tprivate String name;\n"));
    assert!(person.contains("\tpublic void setName(String name)\n"));
    assert!(person.contains("\tprivate Set<Person> knows;\n"));
    assert!(person.contains("\tpublic void addKnows(Person item)\n"));
    assert!(!person.contains("setKnows"));
    assert!(person.contains("\t\tname = loadStringValue(m, Ex.name);\n"));
    assert!(person.contains("\t\t\tfinal Person item = factory.createPerson(iri);\n"));

    let vocab = read(out.path(), "Ex.java");
    assert!(vocab.contains("public static final String NAMESPACE = \"http://example.org/person#\";"));
    assert!(vocab.contains("public static final IRI knows;"));

    let factory = read(out.path(), "ExFactory.java");
    assert!(factory.contains("public interface ExFactory extends EntityFactory\n"));
    assert!(factory.contains("\tpublic Person createPerson(IRI iri);\n"));
}

#[test]
fn regeneration_is_byte_identical() {
    let out = TempDir::new().unwrap();
    assert!(generate_person(out.path()).status.success());
    let first: Vec<(String, String)> = ["Person.java", "Ex.java", "ExFactory.java"]
        .iter()
        .map(|f| (f.to_string(), read(out.path(), f)))
        .collect();

    assert!(generate_person(out.path()).status.success());
    for (file, contents) in first {
        assert_eq!(read(out.path(), &file), contents, "{file} changed");
    }
}

#[test]
fn missing_vocab_name_prints_usage() {
    let output = ontogen(&["java", "tests/fixtures/person.ttl"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Vocabulary name is required"));
    assert!(stdout.contains("Usage: ontogen java"), "{stdout}");
    assert!(!stdout.contains("Commands:"));
}

#[test]
fn missing_output_directory_is_an_io_error() {
    let out = TempDir::new().unwrap();
    let missing = out.path().join("does-not-exist");
    let output = ontogen(&[
        "java",
        "-v",
        "Ex",
        "-o",
        missing.to_str().unwrap(),
        "tests/fixtures/person.ttl",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("I/O error"));
    assert!(!missing.exists());
}

#[test]
fn unparseable_input_fails() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.ttl");
    fs::write(&bad, "this is not turtle").unwrap();
    let output = ontogen(&[
        "java",
        "-v",
        "Ex",
        "-o",
        dir.path().to_str().unwrap(),
        bad.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
    assert!(!dir.path().join("ExFactory.java").exists());
}

#[test]
fn ntriples_input_with_format_hint() {
    let out = TempDir::new().unwrap();
    let output = ontogen(&[
        "java",
        "-f",
        "application/n-triples",
        "-v",
        "Ex",
        "-o",
        out.path().to_str().unwrap(),
        "tests/fixtures/person.nt",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(read(out.path(), "Person.java").contains("private String name;"));
}

#[test]
fn library_inheritance_and_union_domains() {
    let out = TempDir::new().unwrap();
    let output = ontogen(&[
        "java",
        "-v",
        "Lib",
        "-o",
        out.path().to_str().unwrap(),
        "tests/fixtures/library.ttl",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    assert!(read(out.path(), "Novel.java").contains("public class Novel extends Book\n"));
    assert!(read(out.path(), "Book.java").contains("public class Book extends Item\n"));
    assert!(read(out.path(), "Item.java").contains("public class Item extends RDFEntity\n"));

    for class in ["Book.java", "Magazine.java"] {
        assert!(read(out.path(), class).contains("\tprivate String title;\n"), "{class}");
    }
    let item = read(out.path(), "Item.java");
    assert!(item.contains("\tprivate String[] keyword;\n"));
    assert!(item.contains("\t\tkeyword = new String[0];\n"));

    let author = read(out.path(), "Author.java");
    assert!(author.contains("\tprivate Set<Book> books;\n"));
    assert!(author.contains("\tpublic void addBook(Book book)\n"));
    assert!(author.contains("\t\tbook.setAuthor(this);\n"));

    let vocab = read(out.path(), "Lib.java");
    assert!(vocab.contains("public static final String PREFIX = \"lib\";"));
}

#[test]
fn preferred_language_selects_labels() {
    let out = TempDir::new().unwrap();
    let output = ontogen(&[
        "java",
        "-v",
        "Lib",
        "-l",
        "cs",
        "-o",
        out.path().to_str().unwrap(),
        "tests/fixtures/library.ttl",
    ]);
    assert!(output.status.success());
    let item = read(out.path(), "Item.java");
    assert!(item.contains(" * Polozka.\n"));
    assert!(item.contains(" * Cokoli, co lze pujcit.\n"));
}

#[test]
fn config_file_supplies_defaults() {
    let vocab = TempDir::new().unwrap();
    let classes = TempDir::new().unwrap();
    let output = ontogen(&[
        "java",
        "-c",
        "tests/fixtures/ontogen.yaml",
        "-o",
        vocab.path().to_str().unwrap(),
        "-O",
        classes.path().to_str().unwrap(),
        "tests/fixtures/person.ttl",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    assert!(read(vocab.path(), "PersonVocab.java").starts_with("package org.example.vocab;\n"));
    let person = read(classes.path(), "Person.java");
    assert!(person.starts_with("package org.example.model;\n"));
    assert!(person.contains("import org.example.vocab.PersonVocab;\n"));
    assert!(person.contains("\n    private String name;\n"));
    assert!(classes.path().join("PersonVocabFactory.java").exists());
}

#[test]
fn js_mappers_declare_superclasses_first() {
    let out = TempDir::new().unwrap();
    let output = ontogen(&[
        "js",
        "-v",
        "Lib",
        "-o",
        out.path().to_str().unwrap(),
        "tests/fixtures/library.ttl",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let js = read(out.path(), "LibMappers.js");
    let position = |class: &str| {
        js.find(&format!("class {class}Creator "))
            .unwrap_or_else(|| panic!("{class} missing"))
    };
    assert!(position("Item") < position("Book"));
    assert!(position("Book") < position("Novel"));
    assert!(position("Item") < position("Magazine"));
    assert!(js.contains("class NovelCreator extends BookCreator {"));
    assert!(js.contains("pages: { name: 'http://example.org/library#pages', type: 'int' },"));
    assert!(js.contains("'http://example.org/library#Novel': new NovelCreator()"));
}

#[test]
fn js_include_prefix_limits_classes() {
    let out = TempDir::new().unwrap();
    let output = ontogen(&[
        "js",
        "-v",
        "Ex",
        "-I",
        "http://example.org/other#",
        "-o",
        out.path().to_str().unwrap(),
        "tests/fixtures/person.ttl",
    ]);
    assert!(output.status.success());
    let js = read(out.path(), "ExMappers.js");
    assert!(!js.contains("PersonCreator"));
    assert!(js.contains("export const registry = {"));
}
