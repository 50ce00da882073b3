use std::collections::BTreeMap;

use crate::base::{AccessFlags, MemberKey, simple_segment};

/// Index of a class in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a method in the graph arena.
///
/// After the join pass every class sharing an override slot holds the same
/// `MethodId`, so anything keyed by it (names, caches) is shared too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(pub u32);

impl MethodId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSymbol {
    pub name: String,
    pub desc: String,
    pub access: AccessFlags,
    pub signature: Option<String>,
}

impl FieldSymbol {
    pub fn key(&self) -> MemberKey {
        MemberKey::new(self.name.clone(), self.desc.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    pub name: String,
    pub desc: String,
    pub access: AccessFlags,
    pub signature: Option<String>,
    /// Class whose class file declared this symbol.
    pub owner: String,
    /// Classes sharing this method's override slot, sorted by name.
    ///
    /// Filled by the join pass for multi-class families; empty otherwise.
    pub related: Vec<String>,
}

impl MethodSymbol {
    pub fn key(&self) -> MemberKey {
        MemberKey::new(self.name.clone(), self.desc.clone())
    }

    pub fn is_private_or_static(&self) -> bool {
        self.access.is_private_or_static()
    }
}

/// A class discovered in the JAR, or a container created for a nested class
/// whose outer class file has not been seen (yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSymbol {
    /// Fully qualified internal name, `$`-joined for nested classes.
    pub name: String,
    pub access: AccessFlags,
    pub signature: Option<String>,
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    /// Derived: in-graph classes whose super class is this one.
    pub subclasses: Vec<String>,
    /// Derived: in-graph classes listing this one among their interfaces.
    pub implementers: Vec<String>,
    pub declaring_class: Option<String>,
    pub enclosing_class: Option<String>,
    pub enclosing_method: Option<MemberKey>,
    pub inner_name: Option<String>,
    pub fields: BTreeMap<MemberKey, FieldSymbol>,
    pub methods: BTreeMap<MemberKey, MethodId>,
    pub inner_classes: Vec<ClassId>,
    /// Containing class in the nesting tree; `None` for top-level classes.
    pub outer: Option<ClassId>,
    /// Whether a class file populated this symbol.
    pub loaded: bool,
}

impl ClassSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: AccessFlags::default(),
            signature: None,
            super_name: None,
            interfaces: Vec::new(),
            subclasses: Vec::new(),
            implementers: Vec::new(),
            declaring_class: None,
            enclosing_class: None,
            enclosing_method: None,
            inner_name: None,
            fields: BTreeMap::new(),
            methods: BTreeMap::new(),
            inner_classes: Vec::new(),
            outer: None,
            loaded: false,
        }
    }

    /// Last `$` segment of the name.
    pub fn simple_name(&self) -> &str {
        simple_segment(&self.name)
    }

    /// Enclosing class present, no inner name.
    pub fn is_anonymous(&self) -> bool {
        self.enclosing_class.is_some() && self.inner_name.is_none()
    }

    /// Enclosing class present, with an inner name.
    pub fn is_local(&self) -> bool {
        self.enclosing_class.is_some() && self.inner_name.is_some()
    }

    pub fn is_interface(&self) -> bool {
        self.access.is_interface()
    }

    pub fn declares_method(&self, key: &MemberKey) -> bool {
        self.methods.contains_key(key)
    }

    pub fn method_id(&self, key: &MemberKey) -> Option<MethodId> {
        self.methods.get(key).copied()
    }

    /// `Name extends Super implements A, B`, used to annotate conflicts.
    pub fn hierarchy_signature(&self) -> String {
        let mut out = self.name.clone();
        if let Some(super_name) = &self.super_name {
            out.push_str(" extends ");
            out.push_str(super_name);
        }
        if !self.interfaces.is_empty() {
            out.push_str(if self.is_interface() {
                " extends "
            } else {
                " implements "
            });
            out.push_str(&self.interfaces.join(", "));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_and_local() {
        let mut class = ClassSymbol::new("a$1");
        class.enclosing_class = Some("a".into());
        assert!(class.is_anonymous());
        assert!(!class.is_local());

        class.inner_name = Some("b".into());
        assert!(class.is_local());
        assert!(!class.is_anonymous());
    }

    #[test]
    fn test_hierarchy_signature() {
        let mut class = ClassSymbol::new("x");
        class.super_name = Some("java/lang/Object".into());
        class.interfaces = vec!["i".into(), "j".into()];
        assert_eq!(
            class.hierarchy_signature(),
            "x extends java/lang/Object implements i, j"
        );
    }
}
