#![allow(clippy::unwrap_used)]

use std::fs;

use intermediary::classfile::ClassFile;
use intermediary::generator::PickFirst;
use intermediary::mapping::{COUNTER_PREFIX, EntryTriple, read_tiny_file};
use intermediary::{
    AccessFlags, ClassGraph, GenerationError, Generator, GeneratorConfig, MappingTable, MemberKey,
    SymbolKind, load_jar,
};
use rstest::rstest;
use tempfile::TempDir;

use crate::helpers::jar_fixtures::write_jar;

const PUBLIC: u16 = AccessFlags::PUBLIC;
const INTERFACE: u16 = AccessFlags::INTERFACE | AccessFlags::ABSTRACT;

/// A small obfuscated program: a base class with an override chain, an
/// interface with two implementers, nested classes and one named entry point.
fn program() -> Vec<ClassFile> {
    vec![
        ClassFile::new("a")
            .with_super("java/lang/Object")
            .with_field(AccessFlags::PRIVATE, "a", "I")
            .with_method(PUBLIC, "<init>", "()V")
            .with_method(PUBLIC, "a", "()V")
            .with_method(AccessFlags::STATIC, "b", "(La;)La;"),
        ClassFile::new("b").with_super("a").with_method(PUBLIC, "a", "()V"),
        ClassFile::new("c")
            .with_access(INTERFACE)
            .with_method(PUBLIC | AccessFlags::ABSTRACT, "a", "(Lb;)V"),
        ClassFile::new("d")
            .with_super("java/lang/Object")
            .with_interface("c")
            .with_method(PUBLIC, "a", "(Lb;)V"),
        ClassFile::new("e")
            .with_super("java/lang/Object")
            .with_interface("c")
            .with_method(PUBLIC, "a", "(Lb;)V"),
        ClassFile::new("e$a").nested_in("e", "a").with_field(0, "b", "Le;"),
        ClassFile::new("e$1").enclosed_by("e", None, None),
        ClassFile::new("net/minecraft/server/Main")
            .with_method(PUBLIC | AccessFlags::STATIC, "main", "([Ljava/lang/String;)V"),
    ]
}

fn load(dir: &TempDir) -> ClassGraph {
    load_jar(&write_jar(dir.path(), "input.jar", &program())).unwrap()
}

#[test]
fn test_generated_mapping_file() {
    let dir = TempDir::new().unwrap();
    let graph = load(&dir);
    let out = dir.path().join("out.tiny");

    Generator::new(&graph, GeneratorConfig::default())
        .unwrap()
        .generate_to(&out)
        .unwrap();

    let expected = "\
v1\tofficial\tintermediary
# INTERMEDIARY-COUNTER class 7
# INTERMEDIARY-COUNTER field 3
# INTERMEDIARY-COUNTER method 4
CLASS\ta\tnet/minecraft/class_1
FIELD\ta\tI\ta\tfield_1
METHOD\ta\t()V\ta\tmethod_1
METHOD\ta\t(La;)La;\tb\tmethod_2
CLASS\tb\tnet/minecraft/class_2
CLASS\tc\tnet/minecraft/class_3
METHOD\tc\t(Lb;)V\ta\tmethod_3
CLASS\td\tnet/minecraft/class_4
CLASS\te\tnet/minecraft/class_5
CLASS\te$1\tnet/minecraft/class_5$1
CLASS\te$a\tnet/minecraft/class_5$class_6
FIELD\te$a\tLe;\tb\tfield_2
CLASS\tnet/minecraft/server/Main\tnet/minecraft/server/Main
";
    assert_eq!(fs::read_to_string(&out).unwrap(), expected);
}

#[test]
fn test_edges_are_symmetric() {
    let dir = TempDir::new().unwrap();
    let graph = load(&dir);

    for (id, class) in graph.classes() {
        if let Some(super_id) = graph.super_class(id) {
            assert!(graph.class(super_id).subclasses.contains(&class.name));
        }
        for interface in graph.interfaces(id) {
            assert!(graph.class(interface).implementers.contains(&class.name));
        }
        for sub in graph.subtypes(id) {
            assert!(graph.supertypes(sub).any(|up| up == id));
        }
    }
}

#[test]
fn test_runs_are_deterministic() {
    let dir = TempDir::new().unwrap();
    let first = load(&dir);
    let second = load(&dir);

    let left = Generator::new(&first, GeneratorConfig::default())
        .unwrap()
        .generate()
        .unwrap();
    let right = Generator::new(&second, GeneratorConfig::default())
        .unwrap()
        .generate()
        .unwrap();
    assert_eq!(left, right);
}

#[test]
fn test_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let graph = load(&dir);
    let first_path = dir.path().join("first.tiny");
    let second_path = dir.path().join("second.tiny");

    Generator::new(&graph, GeneratorConfig::default())
        .unwrap()
        .generate_to(&first_path)
        .unwrap();
    let prior = read_tiny_file(&first_path, "official", "intermediary").unwrap();
    Generator::new(&graph, GeneratorConfig::default())
        .unwrap()
        .with_prior_mapping(prior)
        .unwrap()
        .generate_to(&second_path)
        .unwrap();

    assert_eq!(
        fs::read_to_string(&first_path).unwrap(),
        fs::read_to_string(&second_path).unwrap()
    );
}

#[rstest]
#[case::through_interface("c")]
#[case::through_first_implementer("d")]
#[case::through_second_implementer("e")]
fn test_family_name_from_any_member(#[case] owner: &str) {
    let dir = TempDir::new().unwrap();
    let graph = load(&dir);
    let mut generator = Generator::new(&graph, GeneratorConfig::default()).unwrap();
    generator.generate().unwrap();

    let key = MemberKey::new("a", "(Lb;)V");
    assert_eq!(generator.method_name(owner, &key), Some("method_3"));
}

#[test]
fn test_counters_never_decrease() {
    let dir = TempDir::new().unwrap();
    let graph = load(&dir);
    let counters = dir.path().join("counters.txt");
    let config = GeneratorConfig::default().with_counter_file(&counters);

    let mut previous = 0;
    for _ in 0..3 {
        let set = Generator::new(&graph, config.clone())
            .unwrap()
            .generate()
            .unwrap();
        let current = set.counters.get(SymbolKind::Class);
        assert!(current > previous);
        previous = current;
    }

    let content = fs::read_to_string(&counters).unwrap();
    assert!(content.contains(&format!("{COUNTER_PREFIX} class {previous}")));
}

#[test]
fn test_failed_run_commits_nothing() {
    let dir = TempDir::new().unwrap();
    let graph = load(&dir);
    let out = dir.path().join("out.tiny");
    let counters = dir.path().join("counters.txt");

    // `d` and `e` carry different names for the interface slot
    let mut prior = MappingTable::new("official", "intermediary");
    let key = MemberKey::new("a", "(Lb;)V");
    for (owner, name) in [("d", "method_20"), ("e", "method_21")] {
        prior
            .insert_method(owner, key.clone(), EntryTriple::new(owner, name, "(Lb;)V"))
            .unwrap();
    }

    let config = GeneratorConfig::default().with_counter_file(&counters);
    let err = Generator::new(&graph, config.clone())
        .unwrap()
        .with_prior_mapping(prior.clone())
        .unwrap()
        .generate_to(&out)
        .unwrap_err();
    assert!(matches!(err, GenerationError::NamingConflict { .. }));
    assert!(!out.exists());
    assert!(!counters.exists());

    let set = Generator::new(&graph, config)
        .unwrap()
        .with_prior_mapping(prior)
        .unwrap()
        .with_conflict_resolver(PickFirst)
        .generate_to(&out)
        .unwrap();
    assert!(out.exists());
    assert_eq!(set.counters.get(SymbolKind::Method), 22);
}

#[test]
fn test_remap_with_generated_mapping() {
    let dir = TempDir::new().unwrap();
    let mut graph = load(&dir);
    let set = Generator::new(&graph, GeneratorConfig::default())
        .unwrap()
        .generate()
        .unwrap();

    graph.remap(&set.to_table().unwrap());

    let base = graph.get("net/minecraft/class_1").unwrap();
    assert_eq!(base.subclasses, ["net/minecraft/class_2"]);
    assert!(base.declares_method(&MemberKey::new("method_1", "()V")));
    assert!(base.declares_method(&MemberKey::new(
        "method_2",
        "(Lnet/minecraft/class_1;)Lnet/minecraft/class_1;"
    )));

    // the override in `b` has no line of its own but follows its family
    let child = graph.get("net/minecraft/class_2").unwrap();
    assert!(child.declares_method(&MemberKey::new("method_1", "()V")));
    assert!(graph.contains("net/minecraft/class_5$class_6"));
    assert!(graph.contains("net/minecraft/server/Main"));
}
