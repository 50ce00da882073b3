//! Error types for mapping, match and counter files.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::base::SymbolKind;

/// Mapping consistency and format errors. All are fatal for a run.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A file could not be read or written.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Stream-level IO error with no file attached.
    #[error("IO error: {0}")]
    Stream(#[from] io::Error),

    /// The first line is not a `v1` header with two or more namespaces.
    #[error("invalid mapping header: {0}")]
    InvalidHeader(String),

    /// A requested namespace is missing from the header.
    #[error("namespace `{namespace}` not in header (available: {})", .available.join(", "))]
    UnknownNamespace {
        namespace: String,
        available: Vec<String>,
    },

    /// A line that does not parse, including bad descriptors.
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    /// The same class or member key mapped twice.
    #[error("duplicate {kind} mapping for {key}")]
    DuplicateEntry { kind: SymbolKind, key: String },

    /// Two tables with different namespaces.
    #[error("cannot merge {left} with {right}")]
    NamespaceMismatch { left: String, right: String },

    /// An entry line with fewer columns than the header needs.
    #[error("line {line}: expected {expected} columns, found {found}")]
    MissingColumn {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A counter comment with an unknown kind or a bad value.
    #[error("invalid counter line `{0}`")]
    InvalidCounter(String),
}

impl MappingError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }

    pub fn duplicate(kind: SymbolKind, key: impl Into<String>) -> Self {
        Self::DuplicateEntry {
            kind,
            key: key.into(),
        }
    }
}
