//! Tiny v1 mapping files.
//!
//! ```text
//! v1	official	intermediary
//! # INTERMEDIARY-COUNTER class 3
//! CLASS	a	net/minecraft/class_1
//! FIELD	a	Lb;	c	field_1
//! METHOD	a	(Lb;)V	d	method_1
//! ```
//!
//! Member owners and descriptors are always written in the first namespace.
//! Lines starting with `#` are comments; counter comments are collected.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::commit::write_atomically;
use super::{Counters, EntryTriple, MappingError, MappingSet, MappingTable};
use crate::base::{MemberKey, remap_descriptor, validate_field, validate_method};

const VERSION: &str = "v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Class,
    Field,
    Method,
}

impl LineKind {
    fn parse(tag: &str) -> Option<Self> {
        match tag {
            "CLASS" => Some(LineKind::Class),
            "FIELD" => Some(LineKind::Field),
            "METHOD" => Some(LineKind::Method),
            _ => None,
        }
    }

    /// Columns before the per-namespace names.
    fn prefix_columns(self) -> usize {
        match self {
            LineKind::Class => 1,
            LineKind::Field | LineKind::Method => 3,
        }
    }
}

struct Line {
    kind: LineKind,
    columns: Vec<String>,
}

impl Line {
    fn names(&self) -> &[String] {
        &self.columns[self.kind.prefix_columns()..]
    }
}

/// Load a tiny v1 stream as a `from` -> `to` table.
pub fn read_tiny<R: BufRead>(
    reader: R,
    from: &str,
    to: &str,
) -> Result<MappingTable, MappingError> {
    let mut lines = reader.lines().enumerate();

    let namespaces = loop {
        let Some((_, header)) = lines.next() else {
            return Err(MappingError::InvalidHeader("empty mapping file".to_string()));
        };
        let header = header?;
        if header.trim().is_empty() {
            continue;
        }
        break parse_header(&header)?;
    };
    let from_index = namespace_index(&namespaces, from)?;
    let to_index = namespace_index(&namespaces, to)?;
    let width = namespaces.len();

    let mut table = MappingTable::new(from, to);
    let mut entries = Vec::new();

    for (index, line) in lines {
        let number = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with('#') {
            if let Some((kind, value)) = Counters::parse_line(&line)? {
                table.counters_mut().observe(kind, value);
            }
            continue;
        }

        let columns: Vec<String> = line.split('\t').map(str::to_string).collect();
        let kind = LineKind::parse(&columns[0]).ok_or_else(|| {
            MappingError::malformed(number, format!("unknown entry `{}`", columns[0]))
        })?;
        let expected = kind.prefix_columns() + width;
        if columns.len() < expected {
            return Err(MappingError::MissingColumn {
                line: number,
                expected,
                found: columns.len(),
            });
        }
        if kind != LineKind::Class {
            check_descriptor(kind, &columns[2], number)?;
        }
        entries.push(Line { kind, columns });
    }

    // Member owners and descriptors are in the first namespace; class lines
    // give their translation into `from` and `to`.
    let mut to_from: FxHashMap<String, String> = FxHashMap::default();
    let mut to_target: FxHashMap<String, String> = FxHashMap::default();
    for line in entries.iter().filter(|l| l.kind == LineKind::Class) {
        let names = line.names();
        let base = &names[0];
        to_from.insert(base.clone(), or_base(&names[from_index], base).to_string());
        to_target.insert(base.clone(), or_base(&names[to_index], base).to_string());
        if !names[to_index].is_empty() {
            table.insert_class(or_base(&names[from_index], base), &names[to_index])?;
        }
    }

    for line in entries.iter().filter(|l| l.kind != LineKind::Class) {
        let names = line.names();
        if names[to_index].is_empty() {
            continue;
        }
        let owner = &line.columns[1];
        let desc = &line.columns[2];
        let base = &names[0];

        let key = MemberKey::new(
            or_base(&names[from_index], base),
            remap_descriptor(desc, |class| to_from.get(class).cloned()),
        );
        let target = EntryTriple::new(
            to_target.get(owner).map_or(owner.as_str(), String::as_str),
            &names[to_index],
            remap_descriptor(desc, |class| to_target.get(class).cloned()),
        );
        let owner = to_from.get(owner).map_or(owner.as_str(), String::as_str);

        match line.kind {
            LineKind::Field => table.insert_field(owner, key, target)?,
            _ => table.insert_method(owner, key, target)?,
        }
    }

    debug!(
        "loaded tiny mappings {} -> {}: {} classes",
        from,
        to,
        table.class_count()
    );
    Ok(table)
}

pub fn read_tiny_file(path: &Path, from: &str, to: &str) -> Result<MappingTable, MappingError> {
    let file = File::open(path).map_err(|e| MappingError::io(path, e))?;
    read_tiny(BufReader::new(file), from, to).map_err(|e| match e {
        MappingError::Stream(source) => MappingError::io(path, source),
        other => other,
    })
}

fn parse_header(header: &str) -> Result<Vec<String>, MappingError> {
    let mut columns = header.trim_end().split('\t');
    if columns.next() != Some(VERSION) {
        return Err(MappingError::InvalidHeader(format!(
            "expected `{VERSION}` header, found `{header}`"
        )));
    }
    let namespaces: Vec<String> = columns.map(str::to_string).collect();
    if namespaces.len() < 2 {
        return Err(MappingError::InvalidHeader(format!(
            "at least two namespaces required, found {}",
            namespaces.len()
        )));
    }
    Ok(namespaces)
}

fn namespace_index(namespaces: &[String], namespace: &str) -> Result<usize, MappingError> {
    namespaces
        .iter()
        .position(|ns| ns == namespace)
        .ok_or_else(|| MappingError::UnknownNamespace {
            namespace: namespace.to_string(),
            available: namespaces.to_vec(),
        })
}

fn check_descriptor(kind: LineKind, desc: &str, line: usize) -> Result<(), MappingError> {
    let checked = match kind {
        LineKind::Method => validate_method(desc),
        _ => validate_field(desc),
    };
    checked.map_err(|e| MappingError::malformed(line, e.to_string()))
}

fn or_base<'a>(name: &'a str, base: &'a str) -> &'a str {
    if name.is_empty() { base } else { name }
}

/// Write a generated mapping: header, counters, then each class followed by
/// its fields and methods.
pub fn write_tiny<W: Write>(out: &mut W, set: &MappingSet) -> io::Result<()> {
    writeln!(
        out,
        "{VERSION}\t{}\t{}",
        set.source_namespace, set.target_namespace
    )?;
    for line in set.counters.lines() {
        writeln!(out, "{line}")?;
    }
    for class in &set.classes {
        writeln!(out, "CLASS\t{}\t{}", class.name, class.target)?;
        for field in &class.fields {
            writeln!(
                out,
                "FIELD\t{}\t{}\t{}\t{}",
                class.name, field.desc, field.name, field.target
            )?;
        }
        for method in &class.methods {
            writeln!(
                out,
                "METHOD\t{}\t{}\t{}\t{}",
                class.name, method.desc, method.name, method.target
            )?;
        }
    }
    Ok(())
}

/// Write `set` to `path`, replacing it only once the whole file is written.
pub fn write_tiny_file(path: &Path, set: &MappingSet) -> Result<(), MappingError> {
    write_atomically(path, |out| write_tiny(out, set))?;
    debug!(
        "wrote {} classes, {} members to {}",
        set.classes.len(),
        set.member_count(),
        path.display()
    );
    Ok(())
}
