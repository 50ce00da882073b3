use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxHashMap;

use super::{Counters, MappingError};
use crate::base::{MemberKey, SymbolKind, remap_descriptor};

/// A member as it appears in the target namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryTriple {
    pub owner: String,
    pub name: String,
    pub desc: String,
}

impl EntryTriple {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            desc: desc.into(),
        }
    }
}

/// Borrowed view of a member lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberTarget<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub desc: &'a str,
}

impl<'a> From<&'a EntryTriple> for MemberTarget<'a> {
    fn from(triple: &'a EntryTriple) -> Self {
        Self {
            owner: &triple.owner,
            name: &triple.name,
            desc: &triple.desc,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct ClassMembers {
    fields: IndexMap<MemberKey, EntryTriple>,
    methods: IndexMap<MemberKey, EntryTriple>,
}

/// Lookup from `from`-namespace symbols to `to`-namespace symbols.
///
/// Members are indexed per owner class, keyed by name and descriptor in the
/// `from` namespace. The identity table answers every query with its input.
#[derive(Debug, Clone)]
pub struct MappingTable {
    from: String,
    to: String,
    identity: bool,
    classes: FxHashMap<String, String>,
    members: FxHashMap<String, ClassMembers>,
    counters: Counters,
}

impl MappingTable {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            identity: false,
            classes: FxHashMap::default(),
            members: FxHashMap::default(),
            counters: Counters::new(),
        }
    }

    /// Pass-through table: every lookup yields its input.
    pub fn identity() -> Self {
        Self {
            identity: true,
            ..Self::new("", "")
        }
    }

    pub fn is_identity(&self) -> bool {
        self.identity
    }

    pub fn from_namespace(&self) -> &str {
        &self.from
    }

    pub fn to_namespace(&self) -> &str {
        &self.to
    }

    /// Counters found alongside the mappings, if any.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub(crate) fn counters_mut(&mut self) -> &mut Counters {
        &mut self.counters
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    // ============================================================
    // Insertion
    // ============================================================

    pub fn insert_class(
        &mut self,
        name: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<(), MappingError> {
        let name = name.into();
        if self.classes.contains_key(&name) {
            return Err(MappingError::duplicate(SymbolKind::Class, name));
        }
        self.classes.insert(name, target.into());
        Ok(())
    }

    pub fn insert_field(
        &mut self,
        owner: impl Into<String>,
        key: MemberKey,
        target: EntryTriple,
    ) -> Result<(), MappingError> {
        let owner = owner.into();
        let members = &mut self.members.entry(owner.clone()).or_default().fields;
        insert_member(members, SymbolKind::Field, &owner, key, target)
    }

    pub fn insert_method(
        &mut self,
        owner: impl Into<String>,
        key: MemberKey,
        target: EntryTriple,
    ) -> Result<(), MappingError> {
        let owner = owner.into();
        let members = &mut self.members.entry(owner.clone()).or_default().methods;
        insert_member(members, SymbolKind::Method, &owner, key, target)
    }

    // ============================================================
    // Lookup
    // ============================================================

    pub fn class<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.identity {
            return Some(name);
        }
        self.classes.get(name).map(String::as_str)
    }

    pub fn field<'a>(&'a self, owner: &'a str, key: &'a MemberKey) -> Option<MemberTarget<'a>> {
        self.member(owner, key, |members| &members.fields)
    }

    pub fn method<'a>(&'a self, owner: &'a str, key: &'a MemberKey) -> Option<MemberTarget<'a>> {
        self.member(owner, key, |members| &members.methods)
    }

    fn member<'a>(
        &'a self,
        owner: &'a str,
        key: &'a MemberKey,
        select: impl FnOnce(&'a ClassMembers) -> &'a IndexMap<MemberKey, EntryTriple>,
    ) -> Option<MemberTarget<'a>> {
        if self.identity {
            return Some(MemberTarget {
                owner,
                name: &key.name,
                desc: &key.desc,
            });
        }
        let members = self.members.get(owner)?;
        select(members).get(key).map(MemberTarget::from)
    }

    /// Rewrite every class reference in `desc`; unknown classes stay as they are.
    pub fn map_descriptor(&self, desc: &str) -> String {
        if self.identity {
            return desc.to_string();
        }
        remap_descriptor(desc, |class| self.classes.get(class).cloned())
    }

    /// Class mappings in no particular order.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.classes
            .iter()
            .map(|(name, target)| (name.as_str(), target.as_str()))
    }

    // ============================================================
    // Merge
    // ============================================================

    /// Fold `other` into `self`. Both must map between the same namespaces;
    /// an entry present in both must agree.
    pub fn merge(&mut self, other: MappingTable) -> Result<(), MappingError> {
        if self.identity || other.identity || self.from != other.from || self.to != other.to {
            return Err(MappingError::NamespaceMismatch {
                left: self.describe(),
                right: other.describe(),
            });
        }

        for (name, target) in other.classes {
            match self.classes.get(&name) {
                Some(existing) if *existing != target => {
                    return Err(MappingError::duplicate(SymbolKind::Class, name));
                }
                Some(_) => {}
                None => {
                    self.classes.insert(name, target);
                }
            }
        }

        for (owner, theirs) in other.members {
            let ours = self.members.entry(owner.clone()).or_default();
            merge_members(&mut ours.fields, theirs.fields, SymbolKind::Field, &owner)?;
            merge_members(&mut ours.methods, theirs.methods, SymbolKind::Method, &owner)?;
        }

        self.counters.merge(&other.counters);
        Ok(())
    }

    fn describe(&self) -> String {
        if self.identity {
            "identity".to_string()
        } else {
            format!("{} -> {}", self.from, self.to)
        }
    }
}

fn insert_member(
    members: &mut IndexMap<MemberKey, EntryTriple>,
    kind: SymbolKind,
    owner: &str,
    key: MemberKey,
    target: EntryTriple,
) -> Result<(), MappingError> {
    match members.entry(key) {
        Entry::Occupied(entry) => Err(MappingError::duplicate(
            kind,
            format!("{owner}.{}", entry.key()),
        )),
        Entry::Vacant(entry) => {
            entry.insert(target);
            Ok(())
        }
    }
}

fn merge_members(
    ours: &mut IndexMap<MemberKey, EntryTriple>,
    theirs: IndexMap<MemberKey, EntryTriple>,
    kind: SymbolKind,
    owner: &str,
) -> Result<(), MappingError> {
    for (key, target) in theirs {
        match ours.get(&key) {
            Some(existing) if *existing != target => {
                return Err(MappingError::duplicate(kind, format!("{owner}.{key}")));
            }
            Some(_) => {}
            None => {
                ours.insert(key, target);
            }
        }
    }
    Ok(())
}
