//! # Mappings
//!
//! Name tables between two namespaces, and the file formats they are read
//! from and written to.
//!
//! ## Structure
//!
//! ```text
//! mapping/
//! ├── table.rs     # MappingTable: owner + name + descriptor lookup
//! ├── set.rs       # MappingSet: generated output in emission order
//! ├── tiny.rs      # tiny v1 reader / writer
//! ├── matches.rs   # cross-version match files (new -> old)
//! ├── counters.rs  # per-kind allocation counters
//! └── commit.rs    # temp file + rename writes
//! ```

mod commit;
mod counters;
mod error;
mod matches;
mod set;
mod table;
mod tiny;

pub use counters::{COUNTER_PREFIX, Counters};
pub use error::MappingError;
pub use matches::{NEW_NAMESPACE, OLD_NAMESPACE, read_matches, read_matches_file};
pub use set::{ClassEntry, MappingSet, MemberEntry};
pub use table::{EntryTriple, MappingTable, MemberTarget};
pub use tiny::{read_tiny, read_tiny_file, write_tiny, write_tiny_file};
