use std::fs;
use std::path::PathBuf;

use ontogen::generator::load_ontology;
use ontogen::owl_model::GenerationModel;
use ontogen::runtime::{EntityFactory, EntityGraph, RuntimeError, TargetModel};
use tempfile::TempDir;

const PERSON: &str = "http://example.org/person#Person";
const NAME: &str = "http://example.org/person#name";
const KNOWS: &str = "http://example.org/person#knows";

const BOOK: &str = "http://example.org/library#Book";
const AUTHOR: &str = "http://example.org/library#Author";
const TITLE: &str = "http://example.org/library#title";
const PAGES: &str = "http://example.org/library#pages";
const KEYWORD: &str = "http://example.org/library#keyword";
const WRITTEN_BY: &str = "http://example.org/library#author";

const ORGANIZATION: &str = "http://example.org/staff#Organization";
const EMPLOYEE: &str = "http://example.org/staff#Employee";
const EMPLOYER: &str = "http://example.org/staff#employer";

const STAFF: &str = r#"
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix staff: <http://example.org/staff#> .
staff:Organization a owl:Class .
staff:Employee a owl:Class .
staff:employer a owl:ObjectProperty , owl:FunctionalProperty ;
    rdfs:domain staff:Employee ; rdfs:range staff:Organization .
"#;

fn factory_for(fixture: &str) -> EntityFactory {
    let ontology = load_ontology(&[PathBuf::from(fixture)], None).unwrap();
    EntityFactory::from_bindings(GenerationModel::build(&ontology, None).bindings())
}

#[test]
fn person_graph_survives_write_and_load() {
    let factory = factory_for("tests/fixtures/person.ttl");
    let mut graph = EntityGraph::new();
    let alice = graph.insert(factory.create(PERSON, "http://example.org/data#alice").unwrap());
    let bob = graph.insert(factory.create(PERSON, "http://example.org/data#bob").unwrap());
    graph.set_value(alice, NAME, Some("Alice".to_string())).unwrap();
    graph.set_value(bob, NAME, Some("Bob".to_string())).unwrap();
    graph.link(alice, KNOWS, bob).unwrap();
    assert_eq!(graph.reverse(bob, KNOWS), vec![alice]);

    // writing from the referenced side reaches alice through the reverse edge
    let mut target = TargetModel::new();
    assert_eq!(graph.write(bob, &mut target).unwrap(), 2);
    assert!(target.contains_entity("http://example.org/data#alice"));

    let mut loaded = EntityGraph::new();
    let alice = loaded
        .load(target.graph(), &factory, PERSON, "http://example.org/data#alice")
        .unwrap();
    assert_eq!(loaded.value::<String>(alice, NAME).as_deref(), Some("Alice"));
    let known = loaded.collection(alice, KNOWS);
    assert_eq!(known.len(), 1);
    assert_eq!(loaded.value::<String>(known[0], NAME).as_deref(), Some("Bob"));
    assert_eq!(loaded.reverse(known[0], KNOWS), vec![alice]);
}

#[test]
fn inherited_and_typed_literals_round_trip() {
    let factory = factory_for("tests/fixtures/library.ttl");
    let mut graph = EntityGraph::new();
    let book = graph.insert(factory.create(BOOK, "http://example.org/data#dune").unwrap());
    let author = graph.insert(factory.create(AUTHOR, "http://example.org/data#herbert").unwrap());
    graph.set_value(book, TITLE, Some("Dune".to_string())).unwrap();
    graph.set_value(book, PAGES, Some(412i32)).unwrap();
    graph.push_value(book, KEYWORD, "desert".to_string()).unwrap();
    graph.push_value(book, KEYWORD, "spice".to_string()).unwrap();
    graph.link(book, WRITTEN_BY, author).unwrap();

    let mut target = TargetModel::new();
    graph.write(book, &mut target).unwrap();

    let mut loaded = EntityGraph::new();
    let book = loaded
        .load(target.graph(), &factory, BOOK, "http://example.org/data#dune")
        .unwrap();
    assert_eq!(loaded.value::<i32>(book, PAGES), Some(412));
    let mut keywords = loaded.values::<String>(book, KEYWORD);
    keywords.sort();
    assert_eq!(keywords, vec!["desert", "spice"]);
    let author = loaded.object(book, WRITTEN_BY).unwrap();
    assert_eq!(loaded.reverse(author, WRITTEN_BY), vec![book]);
}

#[test]
fn references_are_range_checked() {
    let factory = factory_for("tests/fixtures/library.ttl");
    let mut graph = EntityGraph::new();
    let book = graph.insert(factory.create(BOOK, "http://example.org/data#a").unwrap());
    let other = graph.insert(factory.create(BOOK, "http://example.org/data#b").unwrap());
    let err = graph.link(book, WRITTEN_BY, other).unwrap_err();
    assert!(matches!(err, RuntimeError::RangeMismatch { .. }));
}

#[test]
fn unknown_class_has_no_factory() {
    let factory = factory_for("tests/fixtures/person.ttl");
    assert!(matches!(
        factory.create(BOOK, "http://example.org/data#x"),
        Err(RuntimeError::MissingFactory(_))
    ));
}

#[test]
fn reverse_adder_on_functional_reference_moves_the_edge() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("staff.ttl");
    fs::write(&path, STAFF).unwrap();
    let factory = factory_for(path.to_str().unwrap());

    let mut graph = EntityGraph::new();
    let acme = graph.insert(factory.create(ORGANIZATION, "http://example.org/data#acme").unwrap());
    let globex = graph.insert(factory.create(ORGANIZATION, "http://example.org/data#globex").unwrap());
    let homer = graph.insert(factory.create(EMPLOYEE, "http://example.org/data#homer").unwrap());

    // adding homer to acme's reverse set sets homer's forward field
    graph.add_reverse(acme, EMPLOYER, homer).unwrap();
    assert_eq!(graph.object(homer, EMPLOYER), Some(acme));
    assert_eq!(graph.reverse(acme, EMPLOYER), vec![homer]);

    // a second employer replaces the first on both sides
    graph.add_reverse(globex, EMPLOYER, homer).unwrap();
    assert_eq!(graph.object(homer, EMPLOYER), Some(globex));
    assert_eq!(graph.reverse(globex, EMPLOYER), vec![homer]);
    assert!(graph.reverse(acme, EMPLOYER).is_empty());

    // re-adding the current employer changes nothing
    graph.add_reverse(globex, EMPLOYER, homer).unwrap();
    assert_eq!(graph.reverse(globex, EMPLOYER), vec![homer]);
    assert!(graph.reverse(acme, EMPLOYER).is_empty());
}
