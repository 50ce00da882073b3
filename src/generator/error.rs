//! Error type for generation runs.

use std::io;
use thiserror::Error;

use crate::classfile::JarError;
use crate::mapping::MappingError;
use crate::policy::PolicyError;

/// Anything that aborts a generation run. No output is committed after one.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Carried names disagree and the resolver refused to pick one.
    #[error("conflicting names for {owner}.{member}: {}", .names.join(", "))]
    NamingConflict {
        owner: String,
        member: String,
        names: Vec<String>,
    },

    /// Interactive input ended before a choice was made.
    #[error("naming conflict resolution aborted")]
    ConflictAborted,

    /// A resolver returned an index outside the candidate list.
    #[error("choice {index} out of range for {count} candidates")]
    InvalidChoice { index: usize, count: usize },

    /// Policies tied on a decision.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// A mapping, match or counter file was unusable.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The input JAR could not be read.
    #[error(transparent)]
    Jar(#[from] JarError),

    /// A configured pattern is not a valid regex.
    #[error("invalid obfuscation pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Terminal or stream IO failed outside any mapping file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
