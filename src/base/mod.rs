//! Foundation types shared by every layer.
//!
//! This module provides the small vocabulary used throughout the crate:
//! - [`AccessFlags`] - JVM access flag bitmask
//! - [`MemberKey`] - name + descriptor identity of a field or method
//! - [`SymbolKind`] - class / field / method, with its generated-name infix
//! - descriptor parsing and remapping
//!
//! This module has NO dependencies on other crate modules.

mod access;
pub mod descriptor;
mod key;

pub use access::AccessFlags;
pub use descriptor::{DescriptorError, remap_descriptor, validate_field, validate_method};
pub use key::{MemberKey, SymbolKind};

/// Separator between an outer class name and a nested class segment.
pub const NESTED_SEPARATOR: char = '$';

/// Returns the last `$`-separated segment of a class name.
pub fn simple_segment(name: &str) -> &str {
    name.rsplit_once(NESTED_SEPARATOR)
        .map(|(_, tail)| tail)
        .unwrap_or(name)
}
