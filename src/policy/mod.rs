//! # Obfuscation policy
//!
//! Decides which symbols need a generated name, and which package a
//! generated top-level class name goes to.
//!
//! Policies report a signed priority per symbol: positive means "needs a
//! generated name", negative means "keep the existing name", zero means
//! "no opinion". [`PolicyChain`] folds the built-in [`DefaultPolicy`] with
//! any number of plugins:
//!
//! - the default always answers with magnitude 1
//! - a plugin answer of magnitude 2 or more overrides the default
//! - the highest plugin magnitude wins; plugins disagreeing at that
//!   magnitude are a configuration error
//! - plugin answers of magnitude 1 leave the decision to the default

mod chain;
mod default;

pub use chain::{PolicyChain, PolicyError};
pub use default::{
    DEFAULT_CLASS_PATTERN, DEFAULT_MEMBER_PATTERN, DefaultPolicy, ObfuscationPatterns,
};

use crate::graph::{ClassSymbol, FieldSymbol, MethodSymbol};

/// A pluggable obfuscation predicate.
///
/// Every method defaults to "no opinion".
pub trait ObfuscationPolicy: Send + Sync {
    /// Label used in tie reports.
    fn name(&self) -> &str;

    fn class_priority(&self, _class: &ClassSymbol) -> i32 {
        0
    }

    fn field_priority(&self, _class: &ClassSymbol, _field: &FieldSymbol) -> i32 {
        0
    }

    fn method_priority(&self, _class: &ClassSymbol, _method: &MethodSymbol) -> i32 {
        0
    }

    /// Package (with trailing `/`) for a generated top-level class name.
    fn target_package(&self, _class: &ClassSymbol) -> Option<String> {
        None
    }
}
