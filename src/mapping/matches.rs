//! Cross-version match files.
//!
//! ```text
//! c	La;	Lb;
//! 	f	c;;I	d;;I
//! 	m	e()V	f()V
//! ```
//!
//! Class names carry one quoting character on each side. Member lines
//! belong to the class line above them. Everything else (headers,
//! argument and variable lines, unmatched markers) is skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::{EntryTriple, MappingError, MappingTable};
use crate::base::{MemberKey, validate_field, validate_method};

pub const OLD_NAMESPACE: &str = "old";
pub const NEW_NAMESPACE: &str = "new";

/// Load a match file as a new -> old table. Member targets are full old
/// triples (old owner, old name, old descriptor).
pub fn read_matches<R: BufRead>(reader: R) -> Result<MappingTable, MappingError> {
    let mut table = MappingTable::new(NEW_NAMESPACE, OLD_NAMESPACE);
    // (old, new) of the current class
    let mut current: Option<(String, String)> = None;

    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line?;
        let columns: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();

        match columns.as_slice() {
            ["c", old, new] => {
                let old = unquote(old).ok_or_else(|| bad_class(number, old))?;
                let new = unquote(new).ok_or_else(|| bad_class(number, new))?;
                table.insert_class(new, old)?;
                current = Some((old.to_string(), new.to_string()));
            }
            ["", tag @ ("f" | "m"), old, new] => {
                let Some((old_class, new_class)) = &current else {
                    return Err(MappingError::malformed(
                        number,
                        "member line before any class line",
                    ));
                };
                let split: fn(&str) -> Option<(&str, &str)> =
                    if *tag == "f" { split_field } else { split_method };
                let (old_name, old_desc) = split(*old).ok_or_else(|| bad_member(number, old))?;
                let (new_name, new_desc) = split(*new).ok_or_else(|| bad_member(number, new))?;

                let key = MemberKey::new(new_name, new_desc);
                let target = EntryTriple::new(old_class, old_name, old_desc);
                if *tag == "f" {
                    table.insert_field(new_class, key, target)?;
                } else {
                    table.insert_method(new_class, key, target)?;
                }
            }
            _ => {}
        }
    }

    debug!("loaded {} class matches", table.class_count());
    Ok(table)
}

pub fn read_matches_file(path: &Path) -> Result<MappingTable, MappingError> {
    let file = File::open(path).map_err(|e| MappingError::io(path, e))?;
    read_matches(BufReader::new(file)).map_err(|e| match e {
        MappingError::Stream(source) => MappingError::io(path, source),
        other => other,
    })
}

/// Strip one character from each side.
fn unquote(name: &str) -> Option<&str> {
    let mut chars = name.chars();
    chars.next()?;
    chars.next_back()?;
    let inner = chars.as_str();
    (!inner.is_empty()).then_some(inner)
}

/// `name;;desc`
fn split_field(member: &str) -> Option<(&str, &str)> {
    member
        .split_once(";;")
        .filter(|(name, desc)| !name.is_empty() && validate_field(desc).is_ok())
}

/// `name(args)ret`
fn split_method(member: &str) -> Option<(&str, &str)> {
    let start = member.find('(')?;
    let (name, desc) = member.split_at(start);
    (start > 0 && validate_method(desc).is_ok()).then_some((name, desc))
}

fn bad_class(line: usize, name: &str) -> MappingError {
    MappingError::malformed(line, format!("invalid class name `{name}`"))
}

fn bad_member(line: usize, member: &str) -> MappingError {
    MappingError::malformed(line, format!("invalid member `{member}`"))
}
