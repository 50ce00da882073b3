use std::path::PathBuf;

use crate::base::SymbolKind;
use crate::policy::{DEFAULT_CLASS_PATTERN, DEFAULT_MEMBER_PATTERN, ObfuscationPatterns};

/// Name patterns per symbol kind, uncompiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternConfig {
    pub classes: Vec<String>,
    pub fields: Vec<String>,
    pub methods: Vec<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            classes: vec![DEFAULT_CLASS_PATTERN.to_string()],
            fields: vec![DEFAULT_MEMBER_PATTERN.to_string()],
            methods: vec![DEFAULT_MEMBER_PATTERN.to_string()],
        }
    }
}

impl PatternConfig {
    fn list_mut(&mut self, kind: SymbolKind) -> &mut Vec<String> {
        match kind {
            SymbolKind::Class => &mut self.classes,
            SymbolKind::Field => &mut self.fields,
            SymbolKind::Method => &mut self.methods,
        }
    }

    pub fn compile(&self) -> Result<ObfuscationPatterns, regex::Error> {
        ObfuscationPatterns::compile(&self.classes, &self.fields, &self.methods)
    }
}

/// Caller knobs for one generation run.
///
/// ```
/// use intermediary::base::SymbolKind;
/// use intermediary::generator::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_default_package("com/example/")
///     .extend_patterns(SymbolKind::Method, ["^[a-z]{3}$"])
///     .with_write_all(true);
/// assert_eq!(config.patterns.methods.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Namespace of the input JAR.
    pub source_namespace: String,
    pub target_namespace: String,
    /// Package (with trailing `/`) for generated top-level class names.
    pub default_package: String,
    pub patterns: PatternConfig,
    /// Also emit lines for symbols that keep their name.
    pub write_all: bool,
    /// Ask on the terminal instead of failing on naming conflicts.
    pub interactive: bool,
    /// External file mirroring the counters.
    pub counter_file: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source_namespace: "official".to_string(),
            target_namespace: "intermediary".to_string(),
            default_package: "net/minecraft/".to_string(),
            patterns: PatternConfig::default(),
            write_all: false,
            interactive: false,
            counter_file: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_source_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.source_namespace = namespace.into();
        self
    }

    pub fn with_target_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.target_namespace = namespace.into();
        self
    }

    pub fn with_default_package(mut self, package: impl Into<String>) -> Self {
        self.default_package = package.into();
        self
    }

    /// Replace the patterns of `kind`.
    pub fn with_patterns<I, S>(mut self, kind: SymbolKind, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.patterns.list_mut(kind) = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Append to the patterns of `kind`.
    pub fn extend_patterns<I, S>(mut self, kind: SymbolKind, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns
            .list_mut(kind)
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_write_all(mut self, write_all: bool) -> Self {
        self.write_all = write_all;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_counter_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.counter_file = Some(path.into());
        self
    }
}
