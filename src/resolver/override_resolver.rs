use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::base::MemberKey;
use crate::graph::{ClassGraph, ClassId};

/// Answers override-family questions for methods of one [`ClassGraph`].
///
/// Families are computed from the hierarchy edges on demand. Once the join
/// pass has filled [`MethodSymbol::related`](crate::graph::MethodSymbol),
/// lookups for a joined method read that side table instead.
#[derive(Debug, Clone, Copy)]
pub struct OverrideResolver<'g> {
    graph: &'g ClassGraph,
}

impl<'g> OverrideResolver<'g> {
    pub fn new(graph: &'g ClassGraph) -> Self {
        Self { graph }
    }

    /// Every class sharing the virtual-dispatch slot of `key` as declared by
    /// `class`, sorted by name.
    ///
    /// Private and static methods resolve to `[class]`. A class that does not
    /// declare `key` has no family and yields an empty list.
    pub fn matching_entries(&self, class: ClassId, key: &MemberKey) -> Vec<ClassId> {
        let Some(method) = self.graph.method_in(class, key) else {
            return Vec::new();
        };
        if method.is_private_or_static() {
            return vec![class];
        }

        let name = &self.graph.class(class).name;
        if method.related.iter().any(|related| related == name) {
            let ids: Vec<ClassId> = method
                .related
                .iter()
                .filter_map(|related| self.graph.id_of(related))
                .collect();
            return ids;
        }

        let mut members: FxHashSet<ClassId> = FxHashSet::default();
        members.insert(class);
        let mut work_queue: VecDeque<ClassId> = VecDeque::new();
        work_queue.push_back(class);

        // Grow until stable: each new member contributes its declaring
        // ancestors and all of its subtypes.
        while let Some(current) = work_queue.pop_front() {
            for ancestor in self.declaring_ancestors(current, key) {
                if members.insert(ancestor) {
                    work_queue.push_back(ancestor);
                }
            }
            for sub in self.graph.subtypes(current) {
                if members.insert(sub) {
                    work_queue.push_back(sub);
                }
            }
        }

        let mut entries: Vec<ClassId> = members
            .into_iter()
            .filter(|id| *id == class || self.overridable_in(*id, key))
            .collect();
        self.sort_by_name(&mut entries);

        trace!("matching entries for {}.{}: {}", name, key, entries.len());
        entries
    }

    /// The root declarations `key` inherits from when looked up in `class`,
    /// sorted by name.
    ///
    /// Walks supertypes only. A class declaring `key` with no overridable
    /// declaration above it is its own source.
    pub fn matching_sources(&self, class: ClassId, key: &MemberKey) -> Vec<ClassId> {
        let declares = self.graph.class(class).declares_method(key);
        if declares && !self.overridable_in(class, key) {
            return vec![class];
        }

        let mut sources: FxHashSet<ClassId> = FxHashSet::default();
        let mut visited: FxHashSet<ClassId> = FxHashSet::default();
        let mut work_queue = VecDeque::from(self.declaring_ancestors(class, key));

        while let Some(current) = work_queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let above = self.declaring_ancestors(current, key);
            if above.is_empty() {
                sources.insert(current);
            }
            work_queue.extend(above);
        }

        if sources.is_empty() && declares {
            sources.insert(class);
        }

        let mut sources: Vec<ClassId> = sources.into_iter().collect();
        self.sort_by_name(&mut sources);
        sources
    }

    /// Whether `class` declares `key` without overriding anything in the
    /// graph, so the method's name is its own.
    pub fn is_source(&self, class: ClassId, key: &MemberKey) -> bool {
        self.graph.class(class).declares_method(key)
            && self.matching_sources(class, key) == [class]
    }

    /// Nearest ancestors of `class` declaring `key` as an overridable
    /// method, walking transitively through ancestors that do not.
    fn declaring_ancestors(&self, class: ClassId, key: &MemberKey) -> Vec<ClassId> {
        let mut found = Vec::new();
        let mut visited: FxHashSet<ClassId> = FxHashSet::default();
        let mut work_queue: VecDeque<ClassId> = self.graph.supertypes(class).collect();

        while let Some(current) = work_queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            if self.overridable_in(current, key) {
                found.push(current);
            } else {
                work_queue.extend(self.graph.supertypes(current));
            }
        }

        found
    }

    /// `class` declares `key` as a method that takes part in dispatch.
    fn overridable_in(&self, class: ClassId, key: &MemberKey) -> bool {
        self.graph
            .method_in(class, key)
            .is_some_and(|method| !method.is_private_or_static())
    }

    fn sort_by_name(&self, ids: &mut [ClassId]) {
        ids.sort_by(|a, b| self.graph.class(*a).name.cmp(&self.graph.class(*b).name));
    }
}
