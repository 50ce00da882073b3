use regex::Regex;

use super::ObfuscationPolicy;
use crate::graph::{ClassSymbol, FieldSymbol, MethodSymbol};

/// Class names without a package are obfuscated.
pub const DEFAULT_CLASS_PATTERN: &str = "^[^/]*$";

/// One or two characters, or two characters and an underscore.
pub const DEFAULT_MEMBER_PATTERN: &str = "^(.{1,2}|.{2}_)$";

/// Compiled name patterns, one list per symbol kind.
#[derive(Debug, Clone)]
pub struct ObfuscationPatterns {
    pub classes: Vec<Regex>,
    pub fields: Vec<Regex>,
    pub methods: Vec<Regex>,
}

impl ObfuscationPatterns {
    pub fn compile<S: AsRef<str>>(
        classes: &[S],
        fields: &[S],
        methods: &[S],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            classes: compile_all(classes)?,
            fields: compile_all(fields)?,
            methods: compile_all(methods)?,
        })
    }
}

fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|p| Regex::new(p.as_ref())).collect()
}

fn any_match(patterns: &[Regex], name: &str) -> bool {
    patterns.iter().any(|p| p.is_match(name))
}

/// The baseline policy: a symbol needs a generated name when its name
/// matches one of the configured patterns.
#[derive(Debug, Clone)]
pub struct DefaultPolicy {
    patterns: ObfuscationPatterns,
}

impl DefaultPolicy {
    pub fn new(patterns: ObfuscationPatterns) -> Self {
        Self { patterns }
    }

    fn vote(matched: bool) -> i32 {
        if matched { 1 } else { -1 }
    }
}

impl ObfuscationPolicy for DefaultPolicy {
    fn name(&self) -> &str {
        "default"
    }

    fn class_priority(&self, class: &ClassSymbol) -> i32 {
        Self::vote(any_match(&self.patterns.classes, &class.name))
    }

    fn field_priority(&self, _class: &ClassSymbol, field: &FieldSymbol) -> i32 {
        Self::vote(any_match(&self.patterns.fields, &field.name))
    }

    fn method_priority(&self, _class: &ClassSymbol, method: &MethodSymbol) -> i32 {
        let obfuscated = any_match(&self.patterns.methods, &method.name);
        Self::vote(obfuscated && !method.key().is_initializer())
    }
}
