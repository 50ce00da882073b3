#![allow(clippy::unwrap_used)]

use intermediary::classfile::{ClassFile, JarError, read_jar};
use intermediary::{AccessFlags, MemberKey, load_jar};
use tempfile::TempDir;

use crate::helpers::class_bytes::assemble;
use crate::helpers::jar_fixtures::{write_jar, write_jar_with};

const PUBLIC: u16 = AccessFlags::PUBLIC;

fn fixture_classes() -> Vec<ClassFile> {
    let mut generic = ClassFile::new("b")
        .with_access(PUBLIC)
        .with_super("java/lang/Object")
        .with_interface("java/lang/Comparable")
        .with_field(AccessFlags::PRIVATE, "a", "Ljava/util/List;")
        .with_method(PUBLIC, "<init>", "()V")
        .with_method(PUBLIC, "compareTo", "(Ljava/lang/Object;)I");
    generic.signature = Some("Ljava/lang/Object;Ljava/lang/Comparable<Lb;>;".to_string());
    generic.fields[0].signature = Some("Ljava/util/List<Ljava/lang/String;>;".to_string());

    vec![
        ClassFile::new("a").with_super("java/lang/Object"),
        generic,
        ClassFile::new("b$a")
            .with_super("java/lang/Object")
            .nested_in("b", "a"),
        ClassFile::new("b$1")
            .with_super("java/lang/Object")
            .enclosed_by("b", Some(MemberKey::new("compareTo", "(Ljava/lang/Object;)I")), None),
    ]
}

#[test]
fn test_read_jar_round_trips_records() {
    let dir = TempDir::new().unwrap();
    let classes = fixture_classes();
    let path = write_jar(dir.path(), "input.jar", &classes);

    assert_eq!(read_jar(&path).unwrap(), classes);
}

#[test]
fn test_read_jar_skips_non_class_entries() {
    let dir = TempDir::new().unwrap();
    let a = ClassFile::new("a");
    let versioned = assemble(&ClassFile::new("z"));
    let module_info = assemble(&ClassFile::new("module-info"));
    let path = write_jar_with(
        dir.path(),
        "input.jar",
        &[a.clone()],
        &[
            ("META-INF/versions/9/z.class", versioned.as_slice()),
            ("module-info.class", module_info.as_slice()),
            ("assets/lang.json", b"{}".as_slice()),
        ],
    );

    assert_eq!(read_jar(&path).unwrap(), [a]);
}

#[test]
fn test_corrupt_entry_names_the_entry() {
    let dir = TempDir::new().unwrap();
    let path = write_jar_with(
        dir.path(),
        "input.jar",
        &[],
        &[("broken.class", [0xCA_u8, 0xFE, 0x00, 0x00].as_slice())],
    );

    match read_jar(&path).unwrap_err() {
        JarError::ClassFile { entry, .. } => assert_eq!(entry, "broken.class"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_archive_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_jar(&dir.path().join("absent.jar")).unwrap_err();
    assert!(matches!(err, JarError::Io { .. }));
}

#[test]
fn test_not_a_zip_is_zip_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.jar");
    std::fs::write(&path, b"definitely not a zip archive").unwrap();
    assert!(matches!(read_jar(&path).unwrap_err(), JarError::Zip { .. }));
}

#[test]
fn test_load_jar_builds_related_graph() {
    let dir = TempDir::new().unwrap();
    let path = write_jar(dir.path(), "input.jar", &fixture_classes());
    let graph = load_jar(&path).unwrap();

    let b = graph.id_of("b").unwrap();
    let inner: Vec<&str> = graph
        .inner_classes(b)
        .into_iter()
        .map(|id| graph.class(id).name.as_str())
        .collect();
    assert_eq!(inner, ["b$1", "b$a"]);

    let anonymous = graph.get("b$1").unwrap();
    assert!(anonymous.is_anonymous());
    assert_eq!(
        anonymous.enclosing_method,
        Some(MemberKey::new("compareTo", "(Ljava/lang/Object;)I"))
    );
    assert_eq!(graph.top_level().count(), 2);
}
