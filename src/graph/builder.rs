//! Graph construction in three passes.
//!
//! 1. **Structural**: one [`ClassFile`] at a time, create or fetch its symbol
//!    and record flags, hierarchy names and members.
//! 2. **Relation**: derive subclass/implementer back-edges and attach classes
//!    to their declaring or enclosing class.
//! 3. **Join**: point every class of a multi-class override family at one
//!    canonical [`MethodSymbol`].
//!
//! No pass starts before the previous one has covered the whole graph.

use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use super::class_graph::ClassGraph;
use super::symbol::{ClassId, FieldSymbol, MethodId, MethodSymbol};
use crate::classfile::ClassFile;
use crate::resolver::{ClassPropagationTree, OverrideResolver};

/// Collects class files into a [`ClassGraph`].
///
/// Symbol creation goes through a lock so the structural pass may be fed
/// from several threads without two of them creating the same outer class.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Mutex<ClassGraph>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all three passes over `classes`.
    pub fn build<I>(classes: I) -> ClassGraph
    where
        I: IntoIterator<Item = ClassFile>,
    {
        let builder = Self::new();
        for class in classes {
            builder.add_class(class);
        }
        builder.finish()
    }

    /// Fetch or create a class symbol by name (check-then-insert under the lock).
    pub fn get_or_create_class(&self, name: &str) -> ClassId {
        self.graph.lock().get_or_create_class(name)
    }

    /// Structural pass for one class file.
    pub fn add_class(&self, file: ClassFile) -> ClassId {
        let mut graph = self.graph.lock();
        let id = graph.get_or_create_class(&file.name);

        if graph.class(id).loaded {
            warn!("duplicate class file for {}, keeping the first", file.name);
            return id;
        }

        let mut method_ids = Vec::with_capacity(file.methods.len());
        for method in &file.methods {
            let method_id = graph.push_method(MethodSymbol {
                name: method.name.clone(),
                desc: method.desc.clone(),
                access: method.access,
                signature: method.signature.clone(),
                owner: file.name.clone(),
                related: Vec::new(),
            });
            method_ids.push((method.key(), method_id));
        }

        let class = graph.class_mut(id);
        class.loaded = true;
        class.access = file.access;
        class.signature = file.signature;
        class.super_name = file.super_name;
        class.interfaces = file.interfaces;
        class.declaring_class = file.declaring_class;
        class.inner_name = file.inner_name;
        if let Some(enclosing) = file.enclosing {
            class.enclosing_class = Some(enclosing.class);
            class.enclosing_method = enclosing.method;
        }
        for field in file.fields {
            let symbol = FieldSymbol {
                name: field.name,
                desc: field.desc,
                access: field.access,
                signature: field.signature,
            };
            class.fields.insert(symbol.key(), symbol);
        }
        class.methods.extend(method_ids);

        trace!("structural: {}", file.name);
        id
    }

    /// Run the relation and join passes and hand out the finished graph.
    pub fn finish(self) -> ClassGraph {
        let mut graph = self.graph.into_inner();
        relate(&mut graph);
        join(&mut graph);
        graph
    }
}

/// Relation pass: derive back-edges and containment.
fn relate(graph: &mut ClassGraph) {
    let mut dropped = 0usize;

    for index in 0..graph.len() {
        let id = ClassId::new(index);
        let class = graph.class(id);
        let name = class.name.clone();
        let super_name = class.super_name.clone();
        let interfaces = class.interfaces.clone();
        let container = class
            .declaring_class
            .clone()
            .or_else(|| class.enclosing_class.clone());

        match super_name.as_deref().and_then(|s| graph.id_of(s)) {
            Some(super_id) => push_unique(&mut graph.class_mut(super_id).subclasses, &name),
            None => dropped += super_name.is_some() as usize,
        }

        for interface in &interfaces {
            match graph.id_of(interface) {
                Some(interface_id) => {
                    push_unique(&mut graph.class_mut(interface_id).implementers, &name)
                }
                None => dropped += 1,
            }
        }

        if let Some(container) = container {
            match graph.id_of(&container) {
                Some(outer) if graph.is_nested_within(outer, id) => {
                    warn!("{name} cannot be nested in its own inner class {container}");
                }
                Some(outer) => graph.reparent(id, outer),
                None => dropped += 1,
            }
        }
    }

    debug!(
        "relation pass: {} classes, {} references outside the graph",
        graph.len(),
        dropped
    );
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

/// Join pass: unify method identity across override families.
fn join(graph: &mut ClassGraph) {
    let mut traversed: FxHashSet<ClassId> = FxHashSet::default();
    let mut visited: FxHashSet<MethodId> = FxHashSet::default();
    let mut joined = 0usize;

    for index in 0..graph.len() {
        let seed = ClassId::new(index);
        if traversed.contains(&seed) {
            continue;
        }

        let tree = ClassPropagationTree::new(graph, seed);
        traversed.extend(tree.classes().iter().copied());
        if tree.len() == 1 {
            continue;
        }

        for class_id in tree.sorted_by_name(graph) {
            let methods: Vec<_> = graph
                .class(class_id)
                .methods
                .iter()
                .map(|(key, id)| (key.clone(), *id))
                .collect();

            for (key, method_id) in methods {
                if !visited.insert(method_id) {
                    continue;
                }

                let entries = OverrideResolver::new(graph).matching_entries(class_id, &key);
                if entries.len() < 2 {
                    continue;
                }

                let related: Vec<String> = entries
                    .iter()
                    .map(|id| graph.class(*id).name.clone())
                    .collect();
                for entry in entries {
                    if let Some(slot) = graph.class_mut(entry).methods.get_mut(&key) {
                        if *slot != method_id {
                            visited.insert(*slot);
                            *slot = method_id;
                            joined += 1;
                        }
                    }
                }
                graph.methods[method_id.index()].related = related;
            }
        }
    }

    debug!("join pass: {} method slots unified", joined);
}
