//! Error types for class-file and JAR reading.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

/// Structural errors in a single class file. Always fatal for the run.
#[derive(Debug, Error)]
pub enum ClassFileError {
    /// The bytes ran out mid-structure.
    #[error("unexpected end of class file")]
    UnexpectedEof,
    /// The first four bytes are not `0xCAFEBABE`.
    #[error("invalid class file magic header {0:#010x}")]
    InvalidMagic(u32),
    /// A constant pool tag this reader does not know.
    #[error("unsupported constant pool tag {tag}")]
    UnsupportedConstant { tag: u8 },
    /// An index pointing outside the pool or at the wrong kind of entry.
    #[error("invalid constant pool index {index}")]
    InvalidConstantIndex { index: u16 },
    /// A `CONSTANT_Utf8` entry that does not decode.
    #[error("malformed modified UTF-8 in constant pool entry {index}")]
    InvalidUtf8 { index: u16 },
}

/// Errors while walking a JAR archive.
#[derive(Debug, Error)]
pub enum JarError {
    /// The archive could not be opened or an entry could not be read.
    #[error("IO error while reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not a readable ZIP archive.
    #[error("ZIP error while reading {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: ZipError,
    },
    /// One `.class` entry failed to parse.
    #[error("class parse error in {entry}: {source}")]
    ClassFile {
        entry: String,
        #[source]
        source: ClassFileError,
    },
}
