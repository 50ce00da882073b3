use std::collections::BTreeMap;
use std::iter;

use tracing::debug;

use super::class_graph::ClassGraph;
use super::symbol::ClassId;
use crate::base::MemberKey;
use crate::mapping::MappingTable;

impl ClassGraph {
    /// Rename every class, member, descriptor and edge through `table`.
    ///
    /// Names the table does not know are kept. Member lookups use the
    /// pre-rename owner and key. A joined method is looked up on its
    /// declaring class first, then on the other classes of its family.
    pub fn remap(&mut self, table: &MappingTable) {
        let map_class = |name: &str| table.class(name).unwrap_or(name).to_string();
        let map_opt = |name: &Option<String>| name.as_deref().map(map_class);
        let map_all = |names: &[String]| names.iter().map(|n| map_class(n)).collect::<Vec<_>>();

        for method in &mut self.methods {
            let key = MemberKey::new(method.name.clone(), method.desc.clone());
            let renamed = iter::once(&method.owner)
                .chain(&method.related)
                .find_map(|owner| table.method(owner, &key))
                .map(|target| target.name.to_string());
            if let Some(name) = renamed {
                method.name = name;
            }
            method.desc = table.map_descriptor(&method.desc);
            method.owner = map_class(&method.owner);
            method.related = map_all(&method.related);
        }

        for class in &mut self.classes {
            let old_name = class.name.clone();
            let old_enclosing = class.enclosing_class.clone();

            class.fields = std::mem::take(&mut class.fields)
                .into_values()
                .map(|mut field| {
                    let key = field.key();
                    if let Some(target) = table.field(&old_name, &key) {
                        field.name = target.name.to_string();
                    }
                    field.desc = table.map_descriptor(&field.desc);
                    (field.key(), field)
                })
                .collect();

            class.methods = std::mem::take(&mut class.methods)
                .into_values()
                .map(|id| (self.methods[id.index()].key(), id))
                .collect();

            let enclosing_method = class.enclosing_method.as_mut();
            if let (Some(enclosing), Some(method)) = (old_enclosing, enclosing_method) {
                let renamed = table
                    .method(&enclosing, method)
                    .map(|target| target.name.to_string());
                if let Some(name) = renamed {
                    method.name = name;
                }
                method.desc = table.map_descriptor(&method.desc);
            }

            class.name = map_class(&class.name);
            class.super_name = map_opt(&class.super_name);
            class.interfaces = map_all(&class.interfaces);
            class.subclasses = map_all(&class.subclasses);
            class.implementers = map_all(&class.implementers);
            class.declaring_class = map_opt(&class.declaring_class);
            class.enclosing_class = map_opt(&class.enclosing_class);
        }

        self.reindex();
        debug!("remapped {} classes", self.classes.len());
    }

    fn reindex(&mut self) {
        self.by_name.clear();
        self.top_level = BTreeMap::new();
        for (index, class) in self.classes.iter().enumerate() {
            let id = ClassId::new(index);
            self.by_name.insert(class.name.clone(), id);
            if class.outer.is_none() {
                self.top_level.insert(class.name.clone(), id);
            }
        }
    }
}
