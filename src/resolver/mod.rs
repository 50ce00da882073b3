//! Override-family resolution over a [`ClassGraph`](crate::graph::ClassGraph).
//!
//! ## Structure
//!
//! ```text
//! resolver/
//! ├── override_resolver.rs  # matching entries / sources, is_source
//! └── propagation.rs        # connected hierarchy component (BFS)
//! ```
//!
//! A method's *family* is the set of classes across which one
//! virtual-dispatch slot is shared: declaring ancestors upward, every
//! subtype downward, grown to a fixed point. Private and static methods
//! never leave their class.

mod override_resolver;
mod propagation;

pub use override_resolver::OverrideResolver;
pub use propagation::ClassPropagationTree;

#[cfg(test)]
mod tests;
