use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use super::symbol::{ClassId, ClassSymbol, MethodId, MethodSymbol};
use crate::base::{MemberKey, NESTED_SEPARATOR};

/// Arena of every class and method discovered in one JAR.
///
/// Classes are stored once and referenced by [`ClassId`]; hierarchy edges are
/// kept as names on the symbols and resolved through [`ClassGraph::id_of`].
/// Methods live in their own arena so the join pass can point several
/// classes at one [`MethodSymbol`].
#[derive(Debug, Clone, Default)]
pub struct ClassGraph {
    /// Discovery order.
    pub(super) classes: Vec<ClassSymbol>,
    pub(super) methods: Vec<MethodSymbol>,
    /// Index for O(1) name lookups: name -> ClassId
    pub(super) by_name: FxHashMap<String, ClassId>,
    /// Top-level classes in natural name order.
    pub(super) top_level: BTreeMap<String, ClassId>,
}

impl ClassGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================
    // Lookup
    // ============================================================

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn id_of(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&ClassSymbol> {
        self.id_of(name).map(|id| self.class(id))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn class(&self, id: ClassId) -> &ClassSymbol {
        &self.classes[id.index()]
    }

    pub fn method(&self, id: MethodId) -> &MethodSymbol {
        &self.methods[id.index()]
    }

    /// The method a class holds under `key`, after joining.
    pub fn method_in(&self, class: ClassId, key: &MemberKey) -> Option<&MethodSymbol> {
        self.class(class).method_id(key).map(|id| self.method(id))
    }

    // ============================================================
    // Enumeration
    // ============================================================

    /// Top-level classes in natural name order.
    pub fn top_level(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.top_level.values().copied()
    }

    /// Every class in discovery order.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassSymbol)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(index, class)| (ClassId::new(index), class))
    }

    /// Inner classes of `id`, sorted by name.
    pub fn inner_classes(&self, id: ClassId) -> Vec<ClassId> {
        let mut inner = self.class(id).inner_classes.clone();
        inner.sort_by(|a, b| self.class(*a).name.cmp(&self.class(*b).name));
        inner
    }

    // ============================================================
    // Hierarchy edges (resolved against the arena)
    // ============================================================

    pub fn super_class(&self, id: ClassId) -> Option<ClassId> {
        self.class(id)
            .super_name
            .as_deref()
            .and_then(|name| self.id_of(name))
    }

    /// In-graph interfaces of `id`; names outside the JAR are skipped.
    pub fn interfaces(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        self.resolve_all(&self.class(id).interfaces)
    }

    /// Super class followed by interfaces, in-graph only.
    pub fn supertypes(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        self.super_class(id).into_iter().chain(self.interfaces(id))
    }

    /// Subclasses followed by implementers.
    pub fn subtypes(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        let class = self.class(id);
        self.resolve_all(&class.subclasses)
            .chain(self.resolve_all(&class.implementers))
    }

    fn resolve_all<'a>(&'a self, names: &'a [String]) -> impl Iterator<Item = ClassId> + 'a {
        names.iter().filter_map(|name| self.id_of(name))
    }

    // ============================================================
    // Mutation (ingestion only)
    // ============================================================

    /// Fetch a class by name, creating it and its `$`-separated outer
    /// containers when missing. Callers hold the builder lock.
    pub(super) fn get_or_create_class(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.id_of(name) {
            return id;
        }

        let outer = match name.rsplit_once(NESTED_SEPARATOR) {
            Some((head, tail)) if !head.is_empty() && !tail.is_empty() => {
                Some(self.get_or_create_class(head))
            }
            _ => None,
        };

        let id = ClassId::new(self.classes.len());
        let mut class = ClassSymbol::new(name);
        class.outer = outer;
        self.classes.push(class);
        self.by_name.insert(name.to_string(), id);

        match outer {
            Some(outer) => self.classes[outer.index()].inner_classes.push(id),
            None => {
                self.top_level.insert(name.to_string(), id);
            }
        }
        id
    }

    pub(super) fn class_mut(&mut self, id: ClassId) -> &mut ClassSymbol {
        &mut self.classes[id.index()]
    }

    pub(super) fn push_method(&mut self, method: MethodSymbol) -> MethodId {
        let id = MethodId::new(self.methods.len());
        self.methods.push(method);
        id
    }

    /// Move `id` under `outer` in the nesting tree.
    pub(super) fn reparent(&mut self, id: ClassId, outer: ClassId) {
        match self.classes[id.index()].outer {
            Some(current) if current == outer => return,
            Some(current) => self.classes[current.index()]
                .inner_classes
                .retain(|inner| *inner != id),
            None => {
                let name = self.classes[id.index()].name.clone();
                self.top_level.remove(&name);
            }
        }
        self.classes[id.index()].outer = Some(outer);
        self.classes[outer.index()].inner_classes.push(id);
    }

    /// Whether `ancestor` is `id` or contains it in the nesting tree.
    pub(super) fn is_nested_within(&self, id: ClassId, ancestor: ClassId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.classes[c.index()].outer;
        }
        false
    }
}
