use std::iter;
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, info, trace};

use super::conflict::{CandidateOrigin, ConflictResolver, FailOnConflict, InteractiveResolver};
use super::{GenerationContext, GenerationError, GeneratorConfig, NamingConflict};
use crate::base::{MemberKey, SymbolKind, simple_segment};
use crate::graph::{ClassGraph, ClassId, ClassSymbol};
use crate::mapping::{
    ClassEntry, Counters, MappingError, MappingSet, MappingTable, MemberEntry, write_tiny_file,
};
use crate::policy::{DefaultPolicy, ObfuscationPolicy, PolicyChain};
use crate::resolver::OverrideResolver;

/// Outcome of looking a symbol up on one carry-forward path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Carried {
    /// The path does not know the symbol.
    Missing,
    /// The path yields a name the generator produced before.
    Generated(String),
    /// The path yields a hand-written name: the symbol was renamed away.
    Renamed(String),
}

impl Carried {
    fn judge(kind: SymbolKind, input: &str, found: Option<&str>) -> Self {
        match found {
            None => Carried::Missing,
            Some(found) if found == input => Carried::Missing,
            Some(found) if kind.is_generated(innermost_name(found)) => {
                Carried::Generated(found.to_string())
            }
            Some(found) => Carried::Renamed(found.to_string()),
        }
    }
}

/// An old-version member a new-version member corresponds to.
struct OldMember {
    owner: String,
    key: MemberKey,
}

/// Assigns intermediary names to every class, field and method of a graph.
///
/// Names are carried forward from up to two earlier mappings before new ones
/// are minted:
///
/// 1. `new -> intermediary`: a prior generated mapping of this same JAR
/// 2. `new -> old -> intermediary`: a match file into an older JAR, then
///    that JAR's mapping
///
/// Both default to the identity table, which knows nothing, so a bare
/// generator mints every name.
///
/// ```text
/// generate()
///   ├── load counter file (optional)
///   ├── per top-level class, pre-order over inner classes
///   │     ├── class name
///   │     ├── field names
///   │     └── method names (one per override family)
///   └── write counter file (optional)
/// ```
pub struct Generator<'g> {
    graph: &'g ClassGraph,
    old_graph: &'g ClassGraph,
    config: GeneratorConfig,
    chain: PolicyChain,
    new_to_intermediary: MappingTable,
    new_to_old: MappingTable,
    old_to_intermediary: MappingTable,
    resolver: Box<dyn ConflictResolver + 'g>,
    context: GenerationContext,
}

impl<'g> Generator<'g> {
    pub fn new(graph: &'g ClassGraph, config: GeneratorConfig) -> Result<Self, GenerationError> {
        let patterns = config.patterns.compile()?;
        let chain = PolicyChain::new(DefaultPolicy::new(patterns), &config.default_package);
        let resolver: Box<dyn ConflictResolver + 'g> = if config.interactive {
            Box::new(InteractiveResolver::stdio())
        } else {
            Box::new(FailOnConflict)
        };

        Ok(Self {
            graph,
            old_graph: graph,
            config,
            chain,
            new_to_intermediary: MappingTable::identity(),
            new_to_old: MappingTable::identity(),
            old_to_intermediary: MappingTable::identity(),
            resolver,
            context: GenerationContext::default(),
        })
    }

    /// Carry names from an earlier mapping of this JAR, keyed in the source
    /// namespace.
    pub fn with_prior_mapping(mut self, table: MappingTable) -> Result<Self, GenerationError> {
        let expected = (
            self.config.source_namespace.as_str(),
            self.config.target_namespace.as_str(),
        );
        if (table.from_namespace(), table.to_namespace()) != expected {
            return Err(MappingError::NamespaceMismatch {
                left: format!("{} -> {}", expected.0, expected.1),
                right: format!("{} -> {}", table.from_namespace(), table.to_namespace()),
            }
            .into());
        }
        self.context.counters.merge(table.counters());
        self.new_to_intermediary = table;
        Ok(self)
    }

    /// Carry names across versions: `matches` maps this JAR to `old_graph`,
    /// `old_mapping` holds the intermediary names of `old_graph`.
    pub fn with_update(
        mut self,
        old_graph: &'g ClassGraph,
        matches: MappingTable,
        old_mapping: MappingTable,
    ) -> Self {
        self.context.counters.merge(old_mapping.counters());
        self.old_graph = old_graph;
        self.new_to_old = matches;
        self.old_to_intermediary = old_mapping;
        self
    }

    pub fn with_policy(mut self, policy: Box<dyn ObfuscationPolicy>) -> Self {
        self.chain.push(policy);
        self
    }

    pub fn with_conflict_resolver(mut self, resolver: impl ConflictResolver + 'g) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Start counting from at least `counters`.
    pub fn with_counters(mut self, counters: &Counters) -> Self {
        self.context.counters.merge(counters);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn counters(&self) -> &Counters {
        &self.context.counters
    }

    // ============================================================
    // Runs
    // ============================================================

    /// Name every symbol of the graph and mirror the counters to the
    /// configured counter file.
    pub fn generate(&mut self) -> Result<MappingSet, GenerationError> {
        let set = self.run()?;
        self.write_counter_file()?;
        Ok(set)
    }

    /// [`generate`](Self::generate), then write the result as tiny v1 to
    /// `path`. Nothing is written when naming fails.
    pub fn generate_to(&mut self, path: &Path) -> Result<MappingSet, GenerationError> {
        let set = self.run()?;
        write_tiny_file(path, &set)?;
        self.write_counter_file()?;
        Ok(set)
    }

    fn run(&mut self) -> Result<MappingSet, GenerationError> {
        if let Some(path) = self.config.counter_file.as_deref() {
            if path.exists() {
                let counters = Counters::read_from_path(path)?;
                self.context.counters.merge(&counters);
            }
        }

        let mut set = MappingSet::new(
            &self.config.source_namespace,
            &self.config.target_namespace,
        );
        let graph = self.graph;
        for id in graph.top_level() {
            self.visit_class(id, None, &mut set)?;
        }
        set.counters = self.context.counters.clone();

        debug!(
            "generated {} class and {} member entries",
            set.classes.len(),
            set.member_count()
        );
        Ok(set)
    }

    fn write_counter_file(&self) -> Result<(), GenerationError> {
        if let Some(path) = self.config.counter_file.as_deref() {
            self.context.counters.write_to_path(path)?;
        }
        Ok(())
    }

    // ============================================================
    // Queries
    // ============================================================

    pub fn class_name(&self, name: &str) -> Option<&str> {
        self.context.class_name(name)
    }

    pub fn field_name(&self, owner: &str, key: &MemberKey) -> Option<&str> {
        self.context.field_name(owner, key)
    }

    /// Any class of an override family yields the family's name.
    pub fn method_name(&self, owner: &str, key: &MemberKey) -> Option<&str> {
        let id = self.graph.get(owner)?.method_id(key)?;
        self.context.method_name(id)
    }

    // ============================================================
    // Per-class walk
    // ============================================================

    fn visit_class(
        &mut self,
        id: ClassId,
        parent: Option<&str>,
        set: &mut MappingSet,
    ) -> Result<(), GenerationError> {
        let graph = self.graph;
        let class = graph.class(id);

        let target = match self.context.class_name(&class.name) {
            Some(known) => known.to_string(),
            None => {
                let target = self.class_target(class, parent)?;
                self.context.set_class_name(&class.name, &target);
                target
            }
        };
        trace!("class {} -> {}", class.name, target);

        if class.loaded {
            let mut entry = ClassEntry::new(&class.name, &target);
            self.name_fields(class, &mut entry)?;
            self.name_methods(id, class, &mut entry)?;
            set.classes.push(entry);
        }

        for inner in graph.inner_classes(id) {
            self.visit_class(inner, Some(&target), set)?;
        }
        Ok(())
    }

    fn class_target(
        &mut self,
        class: &ClassSymbol,
        parent: Option<&str>,
    ) -> Result<String, GenerationError> {
        if let (Some(parent), true) = (parent, class.is_anonymous()) {
            return Ok(format!("{parent}${}", class.simple_name()));
        }

        if !self.chain.needs_class_name(class)? {
            return Ok(match parent {
                Some(parent) => format!("{parent}${}", class.simple_name()),
                None => class.name.clone(),
            });
        }

        let prefix = match parent {
            Some(parent) => format!("{parent}$"),
            None => self.chain.target_package(class),
        };
        let local_prefix = if class.is_local() {
            leading_digits(class.simple_name())
        } else {
            ""
        };

        if let Some(found) = self.carried_class_name(&class.name) {
            self.observe(SymbolKind::Class, &found);
            if parent.is_none() && !found.contains('$') {
                return Ok(found);
            }
            let segment = innermost_name(&found).trim_start_matches(|c: char| c.is_ascii_digit());
            return Ok(format!("{prefix}{local_prefix}{segment}"));
        }

        let minted = self.mint(SymbolKind::Class);
        Ok(format!("{prefix}{local_prefix}{minted}"))
    }

    fn carried_class_name(&self, name: &str) -> Option<String> {
        let direct = self.new_to_intermediary.class(name);
        match Carried::judge(SymbolKind::Class, name, direct) {
            Carried::Generated(found) => return Some(found),
            Carried::Renamed(found) => {
                report_rename(SymbolKind::Class, name, &found);
                return None;
            }
            Carried::Missing => {}
        }

        let old = self.new_to_old.class(name)?;
        let found = self.old_to_intermediary.class(old);
        match Carried::judge(SymbolKind::Class, old, found) {
            Carried::Generated(found) => Some(found),
            Carried::Renamed(found) => {
                report_rename(SymbolKind::Class, name, &found);
                None
            }
            Carried::Missing => None,
        }
    }

    // ============================================================
    // Fields
    // ============================================================

    fn name_fields(
        &mut self,
        class: &ClassSymbol,
        entry: &mut ClassEntry,
    ) -> Result<(), GenerationError> {
        for (key, field) in &class.fields {
            if !self.chain.needs_field_name(class, field)? {
                if self.config.write_all {
                    entry.fields.push(MemberEntry::new(&key.name, &key.desc, &key.name));
                }
                continue;
            }

            let name = match self.context.field_name(&class.name, key) {
                Some(known) => known.to_string(),
                None => {
                    let name = match self.carried_field_name(&class.name, key) {
                        Some(found) => {
                            self.observe(SymbolKind::Field, &found);
                            found
                        }
                        None => self.mint(SymbolKind::Field),
                    };
                    self.context
                        .set_field_name(&class.name, key.clone(), name.clone());
                    name
                }
            };
            trace!("field {}.{} -> {}", class.name, key, name);
            entry.fields.push(MemberEntry::new(&key.name, &key.desc, name));
        }
        Ok(())
    }

    fn carried_field_name(&self, owner: &str, key: &MemberKey) -> Option<String> {
        let direct = self
            .new_to_intermediary
            .field(owner, key)
            .map(|target| target.name.to_string());
        match Carried::judge(SymbolKind::Field, &key.name, direct.as_deref()) {
            Carried::Generated(found) => return Some(found),
            Carried::Renamed(found) => {
                report_rename(SymbolKind::Field, &key.name, &found);
                return None;
            }
            Carried::Missing => {}
        }

        let old = self.old_field(owner, key)?;
        let found = self
            .old_to_intermediary
            .field(&old.owner, &old.key)
            .map(|target| target.name.to_string());
        match Carried::judge(SymbolKind::Field, &old.key.name, found.as_deref()) {
            Carried::Generated(found) => Some(found),
            Carried::Renamed(found) => {
                report_rename(SymbolKind::Field, &key.name, &found);
                None
            }
            Carried::Missing => None,
        }
    }

    fn old_field(&self, owner: &str, key: &MemberKey) -> Option<OldMember> {
        if let Some(target) = self.new_to_old.field(owner, key) {
            return Some(OldMember {
                owner: target.owner.to_string(),
                key: MemberKey::new(target.name, target.desc),
            });
        }
        self.derived_old_member(owner, key)
    }

    // ============================================================
    // Methods
    // ============================================================

    fn name_methods(
        &mut self,
        id: ClassId,
        class: &ClassSymbol,
        entry: &mut ClassEntry,
    ) -> Result<(), GenerationError> {
        let resolver = OverrideResolver::new(self.graph);

        for (key, method_id) in &class.methods {
            if key.is_initializer() || !resolver.is_source(id, key) {
                continue;
            }
            let method = self.graph.method(*method_id);
            if !self.chain.needs_method_name(class, method)? {
                if self.config.write_all {
                    entry.methods.push(MemberEntry::new(&key.name, &key.desc, &key.name));
                }
                continue;
            }

            let name = self.method_name_for(id, key)?;
            trace!("method {}.{} -> {}", class.name, key, name);
            entry.methods.push(MemberEntry::new(&key.name, &key.desc, name));
        }
        Ok(())
    }

    /// The name of the override family `key` belongs to in `class`, shared
    /// by every class of the family once decided.
    fn method_name_for(
        &mut self,
        class: ClassId,
        key: &MemberKey,
    ) -> Result<String, GenerationError> {
        let graph = self.graph;
        let Some(method_id) = graph.class(class).method_id(key) else {
            return Ok(self.mint(SymbolKind::Method));
        };
        if let Some(known) = self.context.method_name(method_id) {
            return Ok(known.to_string());
        }

        let family = OverrideResolver::new(graph).matching_entries(class, key);
        let mut candidates: IndexMap<String, Vec<CandidateOrigin>> = IndexMap::new();
        for member in &family {
            let symbol = graph.class(*member);
            if let Some((name, found)) = self.carried_method_name(&symbol.name, key) {
                candidates.entry(name).or_default().push(CandidateOrigin {
                    class: symbol.name.clone(),
                    hierarchy: symbol.hierarchy_signature(),
                    member: found,
                });
            }
        }

        let names: Vec<String> = candidates.keys().cloned().collect();
        for name in &names {
            self.observe(SymbolKind::Method, name);
        }
        let name = match names.as_slice() {
            [] => self.mint(SymbolKind::Method),
            [only] => only.clone(),
            _ => {
                let conflict = NamingConflict {
                    owner: graph.class(class).name.clone(),
                    key: key.clone(),
                    candidates,
                };
                let index = self.resolver.resolve(&conflict)?;
                names
                    .get(index)
                    .cloned()
                    .ok_or(GenerationError::InvalidChoice {
                        index,
                        count: names.len(),
                    })?
            }
        };
        let shared = iter::once(method_id).chain(
            family
                .iter()
                .filter_map(|member| graph.class(*member).method_id(key)),
        );
        for id in shared {
            self.context.set_method_name(id, name.clone());
        }
        Ok(name)
    }

    /// A carried name for `owner.key`, with the member it was found under.
    fn carried_method_name(&self, owner: &str, key: &MemberKey) -> Option<(String, String)> {
        let direct = self
            .new_to_intermediary
            .method(owner, key)
            .map(|target| target.name.to_string());
        match Carried::judge(SymbolKind::Method, &key.name, direct.as_deref()) {
            Carried::Generated(found) => return Some((found, format!("{owner}.{key}"))),
            Carried::Renamed(found) => {
                report_rename(SymbolKind::Method, &key.name, &found);
                return None;
            }
            Carried::Missing => {}
        }

        let old = self.old_method(owner, key)?;
        let found = self
            .old_to_intermediary
            .method(&old.owner, &old.key)
            .map(|target| target.name.to_string());
        let carried = match Carried::judge(SymbolKind::Method, &old.key.name, found.as_deref()) {
            Carried::Missing => self.old_family_name(&old),
            carried => carried,
        };
        match carried {
            Carried::Generated(found) => Some((found, format!("{}.{}", old.owner, old.key))),
            Carried::Renamed(found) => {
                report_rename(SymbolKind::Method, &key.name, &found);
                None
            }
            Carried::Missing => None,
        }
    }

    fn old_method(&self, owner: &str, key: &MemberKey) -> Option<OldMember> {
        if let Some(target) = self.new_to_old.method(owner, key) {
            return Some(OldMember {
                owner: target.owner.to_string(),
                key: MemberKey::new(target.name, target.desc),
            });
        }
        self.derived_old_member(owner, key)
    }

    /// Look the old member up on the rest of its override family in the old
    /// graph, for overrides the old mapping only records at the source.
    fn old_family_name(&self, old: &OldMember) -> Carried {
        let Some(old_id) = self.old_graph.id_of(&old.owner) else {
            return Carried::Missing;
        };
        OverrideResolver::new(self.old_graph)
            .matching_entries(old_id, &old.key)
            .into_iter()
            .map(|member| {
                let owner = &self.old_graph.class(member).name;
                let found = self
                    .old_to_intermediary
                    .method(owner, &old.key)
                    .map(|target| target.name);
                Carried::judge(SymbolKind::Method, &old.key.name, found)
            })
            .find(|carried| *carried != Carried::Missing)
            .unwrap_or(Carried::Missing)
    }

    /// A member the match file does not list keeps its name; only the owner
    /// and the descriptor move to the old namespace.
    fn derived_old_member(&self, owner: &str, key: &MemberKey) -> Option<OldMember> {
        let old_owner = self.new_to_old.class(owner)?;
        Some(OldMember {
            owner: old_owner.to_string(),
            key: MemberKey::new(key.name.clone(), self.new_to_old.map_descriptor(&key.desc)),
        })
    }

    // ============================================================
    // Counters
    // ============================================================

    fn mint(&mut self, kind: SymbolKind) -> String {
        let value = self.context.counters.next(kind);
        format!("{}{}", kind.infix(), value)
    }

    /// Keep the counter of `kind` past a carried name's suffix.
    fn observe(&mut self, kind: SymbolKind, name: &str) {
        if let Some(value) = generated_suffix(kind, name) {
            self.context.counters.observe(kind, value + 1);
        }
    }
}

impl std::fmt::Debug for Generator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .field("chain", &self.chain)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

fn report_rename(kind: SymbolKind, name: &str, found: &str) {
    info!("{} {} was renamed to {}, minting a new name", kind, name, found);
}

fn leading_digits(segment: &str) -> &str {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    &segment[..end]
}

/// `class_5` for both `net/minecraft/class_5` and `net/minecraft/class_1$class_5`.
fn innermost_name(name: &str) -> &str {
    let name = name.rsplit_once('/').map_or(name, |(_, tail)| tail);
    simple_segment(name)
}

/// `7` for `net/minecraft/class_7`.
fn generated_suffix(kind: SymbolKind, name: &str) -> Option<u64> {
    let (_, digits) = innermost_name(name).rsplit_once(kind.infix())?;
    digits.parse().ok()
}
