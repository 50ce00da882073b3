//! # intermediary
//!
//! Stable synthetic names for obfuscated JVM programs.
//!
//! Reads the class files of a JAR into a symbol graph, resolves which methods
//! share a virtual-dispatch slot, and assigns every obfuscated class, field
//! and method an intermediary name (`class_12`, `field_7`, `method_40`) that
//! is carried forward across successive obfuscated builds.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! generator → Name allocation, carry-forward, conflict resolution
//!   ↓
//! policy    → Which symbols need names, and where classes go
//!   ↓
//! mapping   → Mapping tables, tiny v1, match files, counters
//!   ↓
//! resolver  → Override families, class propagation trees
//!   ↓
//! graph     → Class graph arena and its three-pass builder
//!   ↓
//! classfile → Class-file reader, JAR walker
//!   ↓
//! base      → Access flags, member keys, descriptors
//! ```

// ============================================================================
// MODULES (dependency order: base → classfile → graph → resolver → mapping
// → policy → generator)
// ============================================================================

/// Foundation types: access flags, member keys, descriptors
pub mod base;

/// Class-file parsing and JAR loading
pub mod classfile;

/// Symbol graph: classes, fields, methods and their edges
pub mod graph;

/// Override families and class propagation trees
pub mod resolver;

/// Mapping tables and their file formats
pub mod mapping;

/// Obfuscation policies
pub mod policy;

/// Intermediary name generation
pub mod generator;

// Re-export the types most callers need
pub use base::{AccessFlags, MemberKey, SymbolKind};
pub use classfile::{load_jar, read_jar};
pub use generator::{GenerationError, Generator, GeneratorConfig};
pub use graph::{ClassGraph, GraphBuilder};
pub use mapping::{MappingSet, MappingTable};
