use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::graph::{ClassGraph, ClassId};

/// The connected hierarchy component around a seed class.
///
/// Built by a breadth-first walk over super class, interface, subclass and
/// implementer edges. Owns its class list, so the graph can be mutated while
/// a tree is being consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPropagationTree {
    /// Discovery order, seed first.
    classes: Vec<ClassId>,
    /// Classes with no in-graph supertype.
    topmost: Vec<ClassId>,
    /// Classes with no in-graph subtype.
    leaves: Vec<ClassId>,
}

impl ClassPropagationTree {
    pub fn new(graph: &ClassGraph, seed: ClassId) -> Self {
        let mut classes = Vec::new();
        let mut topmost = Vec::new();
        let mut leaves = Vec::new();

        let mut visited: FxHashSet<ClassId> = FxHashSet::default();
        let mut work_queue: VecDeque<ClassId> = VecDeque::new();
        visited.insert(seed);
        work_queue.push_back(seed);

        while let Some(current) = work_queue.pop_front() {
            classes.push(current);

            let mut has_super = false;
            for up in graph.supertypes(current) {
                has_super = true;
                if visited.insert(up) {
                    work_queue.push_back(up);
                }
            }
            let mut has_sub = false;
            for down in graph.subtypes(current) {
                has_sub = true;
                if visited.insert(down) {
                    work_queue.push_back(down);
                }
            }

            if !has_super {
                topmost.push(current);
            }
            if !has_sub {
                leaves.push(current);
            }
        }

        Self {
            classes,
            topmost,
            leaves,
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &[ClassId] {
        &self.classes
    }

    pub fn contains(&self, id: ClassId) -> bool {
        self.classes.contains(&id)
    }

    pub fn topmost(&self) -> &[ClassId] {
        &self.topmost
    }

    pub fn leaves(&self) -> &[ClassId] {
        &self.leaves
    }

    /// Component members ordered by class name.
    pub fn sorted_by_name(&self, graph: &ClassGraph) -> Vec<ClassId> {
        let mut sorted = self.classes.clone();
        sorted.sort_by(|a, b| graph.class(*a).name.cmp(&graph.class(*b).name));
        sorted
    }
}
