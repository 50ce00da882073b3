#![allow(clippy::unwrap_used)]

use std::fs;

use intermediary::classfile::ClassFile;
use intermediary::mapping::{read_matches_file, read_tiny_file};
use intermediary::{AccessFlags, Generator, GeneratorConfig, MemberKey, SymbolKind, load_jar};
use tempfile::TempDir;

use crate::helpers::jar_fixtures::write_jar;

const PUBLIC: u16 = AccessFlags::PUBLIC;

/// Old build: `a` with field `b` and method `a`, overridden in `b`.
fn old_program() -> Vec<ClassFile> {
    vec![
        ClassFile::new("a")
            .with_field(AccessFlags::PRIVATE, "b", "I")
            .with_method(PUBLIC, "a", "()V"),
        ClassFile::new("b").with_super("a").with_method(PUBLIC, "a", "()V"),
    ]
}

/// New build: the obfuscator reshuffled every name and added `f`.
fn new_program() -> Vec<ClassFile> {
    vec![
        ClassFile::new("c")
            .with_field(AccessFlags::PRIVATE, "e", "I")
            .with_method(PUBLIC, "d", "()V"),
        ClassFile::new("a").with_super("c").with_method(PUBLIC, "d", "()V"),
        ClassFile::new("f").with_method(PUBLIC, "g", "()V"),
    ]
}

const MATCHES: &str = "\
Matches saved auto, version 2
c\tLa;\tLc;
\tf\tb;;I\te;;I
\tm\ta()V\td()V
c\tLb;\tLa;
\tm\ta()V\td()V
";

#[test]
fn test_names_carry_across_versions() {
    let dir = TempDir::new().unwrap();
    let old_graph = load_jar(&write_jar(dir.path(), "old.jar", &old_program())).unwrap();
    let new_graph = load_jar(&write_jar(dir.path(), "new.jar", &new_program())).unwrap();

    let old_path = dir.path().join("old.tiny");
    Generator::new(&old_graph, GeneratorConfig::default())
        .unwrap()
        .generate_to(&old_path)
        .unwrap();

    let matches_path = dir.path().join("old-new.match");
    fs::write(&matches_path, MATCHES).unwrap();

    let old_mapping = read_tiny_file(&old_path, "official", "intermediary").unwrap();
    let matches = read_matches_file(&matches_path).unwrap();
    let mut generator = Generator::new(&new_graph, GeneratorConfig::default())
        .unwrap()
        .with_update(&old_graph, matches, old_mapping);
    let set = generator.generate().unwrap();

    assert_eq!(generator.class_name("c"), Some("net/minecraft/class_1"));
    assert_eq!(generator.class_name("a"), Some("net/minecraft/class_2"));
    assert_eq!(generator.class_name("f"), Some("net/minecraft/class_3"));
    assert_eq!(
        generator.field_name("c", &MemberKey::new("e", "I")),
        Some("field_1")
    );

    // `a.d` only overrides `c.d`; its old counterpart `b.a` has no line of
    // its own, so the old family supplies the name
    let d = MemberKey::new("d", "()V");
    assert_eq!(generator.method_name("c", &d), Some("method_1"));
    assert_eq!(generator.method_name("a", &d), Some("method_1"));
    assert_eq!(
        generator.method_name("f", &MemberKey::new("g", "()V")),
        Some("method_2")
    );

    assert_eq!(set.counters.get(SymbolKind::Class), 4);
    assert_eq!(set.counters.get(SymbolKind::Method), 3);
}

#[test]
fn test_unmatched_classes_are_minted_past_old_counters() {
    let dir = TempDir::new().unwrap();
    let old_graph = load_jar(&write_jar(dir.path(), "old.jar", &old_program())).unwrap();
    let new_graph = load_jar(&write_jar(dir.path(), "new.jar", &new_program())).unwrap();

    let old_path = dir.path().join("old.tiny");
    Generator::new(&old_graph, GeneratorConfig::default())
        .unwrap()
        .generate_to(&old_path)
        .unwrap();
    let old_mapping = read_tiny_file(&old_path, "official", "intermediary").unwrap();

    // no matches at all: every new class is treated as new
    let matches_path = dir.path().join("empty.match");
    fs::write(&matches_path, "Matches saved auto, version 2\n").unwrap();
    let matches = read_matches_file(&matches_path).unwrap();

    let mut generator = Generator::new(&new_graph, GeneratorConfig::default())
        .unwrap()
        .with_update(&old_graph, matches, old_mapping);
    generator.generate().unwrap();

    assert_eq!(generator.class_name("a"), Some("net/minecraft/class_3"));
    assert_eq!(generator.class_name("c"), Some("net/minecraft/class_4"));
    assert_eq!(generator.class_name("f"), Some("net/minecraft/class_5"));
}
