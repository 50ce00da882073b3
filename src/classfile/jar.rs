use super::{ClassFile, JarError, parse_class};
use crate::graph::{ClassGraph, GraphBuilder};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// Read every class file of a JAR, in archive order.
///
/// Entry bytes are read sequentially and decoded in parallel; the first
/// structural error aborts the read.
pub fn read_jar(path: &Path) -> Result<Vec<ClassFile>, JarError> {
    let file = File::open(path).map_err(|source| JarError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|source| JarError::Zip {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries: Vec<(String, Vec<u8>)> = Vec::new();
    for idx in 0..archive.len() {
        let mut entry = archive.by_index(idx).map_err(|source| JarError::Zip {
            path: path.to_path_buf(),
            source,
        })?;

        if !entry.is_file() {
            continue;
        }
        let name = entry.name().to_string();
        if should_skip_entry(&name) {
            continue;
        }

        let mut buffer = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut buffer)
            .map_err(|source| JarError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        entries.push((name, buffer));
    }

    debug!("read {} class entries from {}", entries.len(), path.display());

    entries
        .par_iter()
        .map(|(name, bytes)| {
            parse_class(bytes).map_err(|source| JarError::ClassFile {
                entry: name.clone(),
                source,
            })
        })
        .collect()
}

/// Read a JAR and build its fully related and joined class graph.
pub fn load_jar(path: &Path) -> Result<ClassGraph, JarError> {
    let classes = read_jar(path)?;
    Ok(GraphBuilder::build(classes))
}

fn should_skip_entry(name: &str) -> bool {
    !name.ends_with(".class")
        || name.starts_with("META-INF/versions/")
        || name == "module-info.class"
        || name.ends_with("/module-info.class")
        || name.ends_with("package-info.class")
}
