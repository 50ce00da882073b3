use rustc_hash::FxHashMap;

use crate::base::MemberKey;
use crate::graph::MethodId;
use crate::mapping::Counters;

/// Mutable state of one generation run: counters and the names decided
/// so far.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    pub counters: Counters,
    class_names: FxHashMap<String, String>,
    field_names: FxHashMap<(String, MemberKey), String>,
    method_names: FxHashMap<MethodId, String>,
}

impl GenerationContext {
    pub fn new(counters: Counters) -> Self {
        Self {
            counters,
            ..Self::default()
        }
    }

    pub fn class_name(&self, class: &str) -> Option<&str> {
        self.class_names.get(class).map(String::as_str)
    }

    pub fn set_class_name(&mut self, class: impl Into<String>, name: impl Into<String>) {
        self.class_names.insert(class.into(), name.into());
    }

    pub fn field_name(&self, owner: &str, key: &MemberKey) -> Option<&str> {
        self.field_names
            .get(&(owner.to_string(), key.clone()))
            .map(String::as_str)
    }

    pub fn set_field_name(&mut self, owner: impl Into<String>, key: MemberKey, name: String) {
        self.field_names.insert((owner.into(), key), name);
    }

    pub fn method_name(&self, method: MethodId) -> Option<&str> {
        self.method_names.get(&method).map(String::as_str)
    }

    pub fn set_method_name(&mut self, method: MethodId, name: impl Into<String>) {
        self.method_names.insert(method, name.into());
    }
}
