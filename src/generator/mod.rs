//! # Name generator
//!
//! Walks a [`ClassGraph`](crate::graph::ClassGraph) top-down and assigns every
//! obfuscated class, field and method an intermediary name, carrying names
//! forward from earlier mappings where possible.
//!
//! ## Structure
//!
//! ```text
//! generator/
//! ├── config.rs     # GeneratorConfig, PatternConfig
//! ├── context.rs    # Per-run counters and name caches
//! ├── conflict.rs   # NamingConflict and the resolver strategies
//! ├── error.rs      # GenerationError
//! └── naming.rs     # Generator: the walk and the carry-forward paths
//! ```
//!
//! ## Naming rules
//!
//! - anonymous classes keep their numeric segment under the parent's name
//! - local classes keep their numeric prefix; only the inner name is generated
//! - nested classes are named relative to the parent's emitted name
//! - generated top-level names go into the policy's target package
//! - a method family gets one name, emitted at its source declaration only
//!
//! Generated names have the form `<kind>_<counter>`, e.g. `method_12`.

mod config;
mod conflict;
mod context;
mod error;
mod naming;

pub use config::{GeneratorConfig, PatternConfig};
pub use conflict::{
    CandidateOrigin, ConflictResolver, FailOnConflict, InteractiveResolver, NamingConflict,
    PickFirst,
};
pub use context::GenerationContext;
pub use error::GenerationError;
pub use naming::Generator;
