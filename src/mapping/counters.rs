use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::MappingError;
use super::commit::write_atomically;
use crate::base::SymbolKind;

/// Comment prefix that carries counters inside a tiny file.
pub const COUNTER_PREFIX: &str = "# INTERMEDIARY-COUNTER";

/// Next integer suffix to allocate, per symbol kind.
///
/// Counters only move forward: loading merges by maximum and allocation
/// increments. A fresh set starts every kind at 1.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Counters {
    values: BTreeMap<SymbolKind, u64>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value the next allocation of `kind` will use.
    pub fn get(&self, kind: SymbolKind) -> u64 {
        self.values.get(&kind).copied().unwrap_or(1)
    }

    /// Allocate one suffix for `kind`.
    pub fn next(&mut self, kind: SymbolKind) -> u64 {
        let value = self.get(kind);
        self.values.insert(kind, value + 1);
        value
    }

    /// Raise `kind` to at least `value`.
    pub fn observe(&mut self, kind: SymbolKind, value: u64) {
        if value > self.get(kind) {
            self.values.insert(kind, value);
        }
    }

    pub fn merge(&mut self, other: &Counters) {
        for (kind, value) in &other.values {
            self.observe(*kind, *value);
        }
    }

    /// Parse one `# INTERMEDIARY-COUNTER <kind> <value>` line.
    ///
    /// Returns `Ok(None)` for lines without the prefix.
    pub fn parse_line(line: &str) -> Result<Option<(SymbolKind, u64)>, MappingError> {
        let Some(rest) = line.trim_end().strip_prefix(COUNTER_PREFIX) else {
            return Ok(None);
        };
        let invalid = || MappingError::InvalidCounter(line.to_string());

        let mut parts = rest.split_whitespace();
        let kind = parts.next().and_then(SymbolKind::parse).ok_or_else(invalid)?;
        let value = parts
            .next()
            .and_then(|v| v.parse::<u64>().ok())
            .ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Some((kind, value)))
    }

    /// Counter comment lines for every kind, in kind order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        SymbolKind::ALL
            .into_iter()
            .map(|kind| format!("{COUNTER_PREFIX} {} {}", kind.as_str(), self.get(kind)))
    }

    pub fn read_from_path(path: &Path) -> Result<Counters, MappingError> {
        let content = fs::read_to_string(path).map_err(|e| MappingError::io(path, e))?;
        let mut counters = Counters::new();
        for line in content.lines() {
            if let Some((kind, value)) = Self::parse_line(line)? {
                counters.observe(kind, value);
            }
        }
        debug!("loaded counters from {}", path.display());
        Ok(counters)
    }

    /// Replace `path` with the current counters.
    pub fn write_to_path(&self, path: &Path) -> Result<(), MappingError> {
        write_atomically(path, |out| {
            for line in self.lines() {
                writeln!(out, "{line}")?;
            }
            Ok(())
        })
    }
}
