//! # Class-file input
//!
//! Turns raw class-file bytes into [`ClassFile`] records, the structural input
//! of the graph builder, and walks JAR archives for them.
//!
//! Only what the symbol model needs is decoded: names, access flags,
//! signatures, hierarchy edges, members and the nesting attributes
//! (`InnerClasses`, `EnclosingMethod`). Code and annotations are skipped.

mod error;
mod jar;
mod reader;

pub use error::{ClassFileError, JarError};
pub use jar::{load_jar, read_jar};

use crate::base::{AccessFlags, MemberKey};
use reader::{ClassReader, ConstantPool};

/// A field or method as declared in a class file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub access: AccessFlags,
    pub name: String,
    pub desc: String,
    pub signature: Option<String>,
}

impl MemberInfo {
    pub fn new(access: u16, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            access: AccessFlags::new(access),
            name: name.into(),
            desc: desc.into(),
            signature: None,
        }
    }

    pub fn key(&self) -> MemberKey {
        MemberKey::new(self.name.clone(), self.desc.clone())
    }
}

/// Outer class (and method, when inside one) of a local or anonymous class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosingInfo {
    pub class: String,
    pub method: Option<MemberKey>,
}

/// Structural record of one class file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassFile {
    pub name: String,
    pub access: AccessFlags,
    pub signature: Option<String>,
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    /// Declaring class from this class's own `InnerClasses` entry.
    pub declaring_class: Option<String>,
    /// Simple inner name; absent for anonymous classes.
    pub inner_name: Option<String>,
    pub enclosing: Option<EnclosingInfo>,
    pub fields: Vec<MemberInfo>,
    pub methods: Vec<MemberInfo>,
}

impl ClassFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_access(mut self, access: u16) -> Self {
        self.access = AccessFlags::new(access);
        self
    }

    pub fn with_super(mut self, super_name: impl Into<String>) -> Self {
        self.super_name = Some(super_name.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_field(mut self, access: u16, name: &str, desc: &str) -> Self {
        self.fields.push(MemberInfo::new(access, name, desc));
        self
    }

    pub fn with_method(mut self, access: u16, name: &str, desc: &str) -> Self {
        self.methods.push(MemberInfo::new(access, name, desc));
        self
    }

    /// Mark as a member class of `declaring` named `inner_name`.
    pub fn nested_in(
        mut self,
        declaring: impl Into<String>,
        inner_name: impl Into<String>,
    ) -> Self {
        self.declaring_class = Some(declaring.into());
        self.inner_name = Some(inner_name.into());
        self
    }

    /// Mark as a local (`inner_name` given) or anonymous class inside `class`.
    pub fn enclosed_by(
        mut self,
        class: impl Into<String>,
        method: Option<MemberKey>,
        inner_name: Option<&str>,
    ) -> Self {
        self.enclosing = Some(EnclosingInfo {
            class: class.into(),
            method,
        });
        self.inner_name = inner_name.map(str::to_string);
        self
    }
}

/// Parse one class file.
pub fn parse_class(bytes: &[u8]) -> Result<ClassFile, ClassFileError> {
    let mut reader = ClassReader::new(bytes);
    reader.expect_magic()?;
    let _minor_version = reader.read_u2()?;
    let _major_version = reader.read_u2()?;
    let pool = ConstantPool::parse(&mut reader)?;

    let access = AccessFlags::new(reader.read_u2()?);
    let this_class = reader.read_u2()?;
    let super_class = reader.read_u2()?;
    let name = pool.class_name(this_class)?;

    let interfaces_count = reader.read_u2()?;
    let mut interfaces = Vec::with_capacity(interfaces_count as usize);
    for _ in 0..interfaces_count {
        interfaces.push(pool.class_name(reader.read_u2()?)?);
    }

    let fields = read_members(&mut reader, &pool)?;
    let methods = read_members(&mut reader, &pool)?;

    let mut class = ClassFile {
        super_name: pool.optional_class_name(super_class)?,
        name,
        access,
        interfaces,
        fields,
        methods,
        ..Default::default()
    };

    let attributes_count = reader.read_u2()?;
    for _ in 0..attributes_count {
        let attribute_name = pool.utf8(reader.read_u2()?)?.to_string();
        let length = reader.read_u4()? as usize;
        let body = reader.read_slice(length)?;
        let mut sub = ClassReader::new(body);

        match attribute_name.as_str() {
            "Signature" => {
                class.signature = Some(pool.utf8(sub.read_u2()?)?.to_string());
            }
            "InnerClasses" => {
                let count = sub.read_u2()?;
                for _ in 0..count {
                    let inner_info = sub.read_u2()?;
                    let outer_info = sub.read_u2()?;
                    let inner_name = sub.read_u2()?;
                    let _inner_access = sub.read_u2()?;
                    if pool.class_name(inner_info)? != class.name {
                        continue;
                    }
                    class.declaring_class = pool.optional_class_name(outer_info)?;
                    class.inner_name = pool.optional_utf8(inner_name)?;
                }
            }
            "EnclosingMethod" => {
                let class_index = sub.read_u2()?;
                let method_index = sub.read_u2()?;
                let method = if method_index == 0 {
                    None
                } else {
                    let (name, desc) = pool.name_and_type(method_index)?;
                    Some(MemberKey::new(name, desc))
                };
                class.enclosing = Some(EnclosingInfo {
                    class: pool.class_name(class_index)?,
                    method,
                });
            }
            _ => {}
        }
    }

    Ok(class)
}

fn read_members(
    reader: &mut ClassReader<'_>,
    pool: &ConstantPool,
) -> Result<Vec<MemberInfo>, ClassFileError> {
    let count = reader.read_u2()?;
    let mut members = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let access = AccessFlags::new(reader.read_u2()?);
        let name = pool.utf8(reader.read_u2()?)?.to_string();
        let desc = pool.utf8(reader.read_u2()?)?.to_string();
        let mut signature = None;

        let attributes_count = reader.read_u2()?;
        for _ in 0..attributes_count {
            let attribute_name_index = reader.read_u2()?;
            let length = reader.read_u4()? as usize;
            let body = reader.read_slice(length)?;
            if pool.utf8(attribute_name_index)? == "Signature" {
                let mut sub = ClassReader::new(body);
                signature = Some(pool.utf8(sub.read_u2()?)?.to_string());
            }
        }

        members.push(MemberInfo {
            access,
            name,
            desc,
            signature,
        });
    }
    Ok(members)
}

#[cfg(test)]
mod tests;
