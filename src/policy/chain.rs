use thiserror::Error;
use tracing::trace;

use super::{DefaultPolicy, ObfuscationPolicy};
use crate::graph::{ClassSymbol, FieldSymbol, MethodSymbol};

#[derive(Debug, Error)]
pub enum PolicyError {
    /// The strongest votes for a symbol point in opposite directions.
    #[error("policies {} disagree on {symbol} at priority {priority}", .policies.join(", "))]
    Tie {
        symbol: String,
        priority: i32,
        policies: Vec<String>,
    },
}

/// The default policy plus ordered plugins, folded by greatest absolute
/// priority.
pub struct PolicyChain {
    default: DefaultPolicy,
    plugins: Vec<Box<dyn ObfuscationPolicy>>,
    default_package: String,
}

impl PolicyChain {
    pub fn new(default: DefaultPolicy, default_package: impl Into<String>) -> Self {
        Self {
            default,
            plugins: Vec::new(),
            default_package: default_package.into(),
        }
    }

    pub fn push(&mut self, plugin: Box<dyn ObfuscationPolicy>) {
        self.plugins.push(plugin);
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    pub fn needs_class_name(&self, class: &ClassSymbol) -> Result<bool, PolicyError> {
        let baseline = self.default.class_priority(class);
        self.decide(baseline, |p| p.class_priority(class), || class.name.clone())
    }

    pub fn needs_field_name(
        &self,
        class: &ClassSymbol,
        field: &FieldSymbol,
    ) -> Result<bool, PolicyError> {
        let baseline = self.default.field_priority(class, field);
        self.decide(
            baseline,
            |p| p.field_priority(class, field),
            || format!("{}.{}", class.name, field.key()),
        )
    }

    pub fn needs_method_name(
        &self,
        class: &ClassSymbol,
        method: &MethodSymbol,
    ) -> Result<bool, PolicyError> {
        let baseline = self.default.method_priority(class, method);
        self.decide(
            baseline,
            |p| p.method_priority(class, method),
            || format!("{}.{}", class.name, method.key()),
        )
    }

    /// First plugin package for `class`, else the configured default.
    pub fn target_package(&self, class: &ClassSymbol) -> String {
        self.plugins
            .iter()
            .find_map(|p| p.target_package(class))
            .unwrap_or_else(|| self.default_package.clone())
    }

    fn decide<P, S>(&self, baseline: i32, priority: P, symbol: S) -> Result<bool, PolicyError>
    where
        P: Fn(&dyn ObfuscationPolicy) -> i32,
        S: FnOnce() -> String,
    {
        let votes: Vec<(&str, i32)> = self
            .plugins
            .iter()
            .map(|p| (p.name(), priority(&**p)))
            .filter(|(_, vote)| *vote != 0)
            .collect();

        let top = votes.iter().map(|(_, v)| v.abs()).max().unwrap_or(0);
        if top < 2 {
            return Ok(baseline > 0);
        }

        let leaders: Vec<&(&str, i32)> = votes.iter().filter(|(_, v)| v.abs() == top).collect();
        let positive = leaders[0].1 > 0;
        if leaders.iter().any(|(_, v)| (*v > 0) != positive) {
            return Err(PolicyError::Tie {
                symbol: symbol(),
                priority: top,
                policies: leaders.iter().map(|(name, _)| name.to_string()).collect(),
            });
        }

        trace!("plugin override at priority {}: {}", top, positive);
        Ok(positive)
    }
}

impl std::fmt::Debug for PolicyChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyChain")
            .field("default", &self.default)
            .field(
                "plugins",
                &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("default_package", &self.default_package)
            .finish()
    }
}
