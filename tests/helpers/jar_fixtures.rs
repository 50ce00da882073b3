//! JAR fixtures built from [`ClassFile`] records.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use intermediary::classfile::ClassFile;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::class_bytes::assemble;

/// Write `classes` to `dir/name` as `<class>.class` entries, plus a manifest
/// and a directory entry the reader must skip.
pub fn write_jar(dir: &Path, name: &str, classes: &[ClassFile]) -> PathBuf {
    write_jar_with(dir, name, classes, &[])
}

/// Like [`write_jar`], with extra raw entries appended.
pub fn write_jar_with(
    dir: &Path,
    name: &str,
    classes: &[ClassFile],
    extra: &[(&str, &[u8])],
) -> PathBuf {
    let path = dir.join(name);
    let mut writer = ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer.add_directory("META-INF/", options).unwrap();
    writer.start_file("META-INF/MANIFEST.MF", options).unwrap();
    writer.write_all(b"Manifest-Version: 1.0\n").unwrap();

    for class in classes {
        writer
            .start_file(format!("{}.class", class.name), options)
            .unwrap();
        writer.write_all(&assemble(class)).unwrap();
    }
    for (entry, bytes) in extra {
        writer.start_file(*entry, options).unwrap();
        writer.write_all(bytes).unwrap();
    }

    writer.finish().unwrap();
    path
}
