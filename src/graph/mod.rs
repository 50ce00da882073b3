//! # Symbol graph
//!
//! Every class, field and method discovered in one JAR, cross-referenced by
//! inheritance, interface and nesting edges.
//!
//! ## Structure
//!
//! ```text
//! graph/
//! ├── symbol.rs       # ClassSymbol, FieldSymbol, MethodSymbol, arena IDs
//! ├── class_graph.rs  # ClassGraph arena and lookups
//! ├── builder.rs      # structural, relation and join passes
//! └── remap.rs        # in-place rename through a mapping table
//! ```
//!
//! ## Edges
//!
//! Hierarchy edges are stored as class names and resolved through
//! [`ClassGraph::id_of`]. A name with no class in the graph (a JDK or
//! library type) simply resolves to nothing. Nesting is kept as arena IDs
//! (`outer` / `inner_classes`) because it forms a tree.
//!
//! After [`GraphBuilder::finish`] the graph is read-only, apart from
//! [`ClassGraph::remap`].

mod builder;
mod class_graph;
mod remap;
mod symbol;

pub use builder::GraphBuilder;
pub use class_graph::ClassGraph;
pub use symbol::{ClassId, ClassSymbol, FieldSymbol, MethodId, MethodSymbol};
