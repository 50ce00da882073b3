use super::{Counters, EntryTriple, MappingError, MappingTable};
use crate::base::MemberKey;

/// A field or method line of a generated mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    pub name: String,
    /// Descriptor in the source namespace.
    pub desc: String,
    pub target: String,
}

impl MemberEntry {
    pub fn new(
        name: impl Into<String>,
        desc: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            target: target.into(),
        }
    }

    pub fn key(&self) -> MemberKey {
        MemberKey::new(self.name.clone(), self.desc.clone())
    }
}

/// A CLASS line followed by its member lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    pub name: String,
    pub target: String,
    pub fields: Vec<MemberEntry>,
    pub methods: Vec<MemberEntry>,
}

impl ClassEntry {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }
}

/// The output of one generation run, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSet {
    pub source_namespace: String,
    pub target_namespace: String,
    pub counters: Counters,
    pub classes: Vec<ClassEntry>,
}

impl MappingSet {
    pub fn new(source_namespace: impl Into<String>, target_namespace: impl Into<String>) -> Self {
        Self {
            source_namespace: source_namespace.into(),
            target_namespace: target_namespace.into(),
            counters: Counters::new(),
            classes: Vec::new(),
        }
    }

    pub fn class(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.iter().find(|class| class.name == name)
    }

    /// Number of FIELD and METHOD lines.
    pub fn member_count(&self) -> usize {
        self.classes
            .iter()
            .map(|class| class.fields.len() + class.methods.len())
            .sum()
    }

    /// Index the set as a source -> target lookup table.
    pub fn to_table(&self) -> Result<MappingTable, MappingError> {
        let mut table = MappingTable::new(&self.source_namespace, &self.target_namespace);
        for class in &self.classes {
            table.insert_class(&class.name, &class.target)?;
        }

        for class in &self.classes {
            for field in &class.fields {
                let target = EntryTriple::new(
                    &class.target,
                    &field.target,
                    table.map_descriptor(&field.desc),
                );
                table.insert_field(&class.name, field.key(), target)?;
            }
            for method in &class.methods {
                let target = EntryTriple::new(
                    &class.target,
                    &method.target,
                    table.map_descriptor(&method.desc),
                );
                table.insert_method(&class.name, method.key(), target)?;
            }
        }

        table.counters_mut().merge(&self.counters);
        Ok(table)
    }
}
