//! Minimal class-file assembler for fixtures.
//!
//! Emits just enough structure (constant pool, members, `Signature`,
//! `InnerClasses`, `EnclosingMethod`) for the reader to see the same
//! [`ClassFile`] record it was built from.

#![allow(dead_code)]

use std::collections::HashMap;

use intermediary::classfile::{ClassFile, MemberInfo};

#[derive(Default)]
struct Pool {
    bytes: Vec<u8>,
    next: u16,
    utf8: HashMap<String, u16>,
    classes: HashMap<String, u16>,
}

impl Pool {
    fn new() -> Self {
        Self {
            next: 1,
            ..Default::default()
        }
    }

    fn utf8(&mut self, value: &str) -> u16 {
        if let Some(&index) = self.utf8.get(value) {
            return index;
        }
        self.bytes.push(1);
        self.bytes
            .extend_from_slice(&(value.len() as u16).to_be_bytes());
        self.bytes.extend_from_slice(value.as_bytes());
        let index = self.take();
        self.utf8.insert(value.to_string(), index);
        index
    }

    fn class(&mut self, name: &str) -> u16 {
        if let Some(&index) = self.classes.get(name) {
            return index;
        }
        let name_index = self.utf8(name);
        self.bytes.push(7);
        self.bytes.extend_from_slice(&name_index.to_be_bytes());
        let index = self.take();
        self.classes.insert(name.to_string(), index);
        index
    }

    fn name_and_type(&mut self, name: &str, desc: &str) -> u16 {
        let name_index = self.utf8(name);
        let desc_index = self.utf8(desc);
        self.bytes.push(12);
        self.bytes.extend_from_slice(&name_index.to_be_bytes());
        self.bytes.extend_from_slice(&desc_index.to_be_bytes());
        self.take()
    }

    /// A long constant, to exercise two-slot entries.
    fn long(&mut self, value: i64) -> u16 {
        self.bytes.push(5);
        self.bytes.extend_from_slice(&value.to_be_bytes());
        let index = self.take();
        self.next += 1;
        index
    }

    fn take(&mut self) -> u16 {
        let index = self.next;
        self.next += 1;
        index
    }
}

fn u2(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn u4(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn write_members(pool: &mut Pool, out: &mut Vec<u8>, members: &[MemberInfo]) {
    u2(out, members.len() as u16);
    for member in members {
        u2(out, member.access.bits());
        u2(out, pool.utf8(&member.name));
        u2(out, pool.utf8(&member.desc));
        match &member.signature {
            Some(signature) => {
                u2(out, 1);
                u2(out, pool.utf8("Signature"));
                u4(out, 2);
                u2(out, pool.utf8(signature));
            }
            None => u2(out, 0),
        }
    }
}

/// Assemble a class file whose parse yields `class` back.
pub fn assemble(class: &ClassFile) -> Vec<u8> {
    let mut pool = Pool::new();
    let mut body = Vec::new();

    // keep a two-slot constant in every fixture
    pool.long(42);

    u2(&mut body, class.access.bits());
    u2(&mut body, pool.class(&class.name));
    let super_index = class
        .super_name
        .as_deref()
        .map(|name| pool.class(name))
        .unwrap_or(0);
    u2(&mut body, super_index);

    u2(&mut body, class.interfaces.len() as u16);
    for interface in &class.interfaces {
        u2(&mut body, pool.class(interface));
    }

    write_members(&mut pool, &mut body, &class.fields);
    write_members(&mut pool, &mut body, &class.methods);

    let mut attributes: Vec<(u16, Vec<u8>)> = Vec::new();
    if let Some(signature) = &class.signature {
        let mut data = Vec::new();
        u2(&mut data, pool.utf8(signature));
        attributes.push((pool.utf8("Signature"), data));
    }
    if class.declaring_class.is_some() || class.inner_name.is_some() || class.enclosing.is_some() {
        let mut data = Vec::new();
        u2(&mut data, 1);
        u2(&mut data, pool.class(&class.name));
        u2(
            &mut data,
            class
                .declaring_class
                .as_deref()
                .map(|name| pool.class(name))
                .unwrap_or(0),
        );
        u2(
            &mut data,
            class
                .inner_name
                .as_deref()
                .map(|name| pool.utf8(name))
                .unwrap_or(0),
        );
        u2(&mut data, class.access.bits());
        attributes.push((pool.utf8("InnerClasses"), data));
    }
    if let Some(enclosing) = &class.enclosing {
        let mut data = Vec::new();
        u2(&mut data, pool.class(&enclosing.class));
        let method_index = enclosing
            .method
            .as_ref()
            .map(|key| pool.name_and_type(&key.name, &key.desc))
            .unwrap_or(0);
        u2(&mut data, method_index);
        attributes.push((pool.utf8("EnclosingMethod"), data));
    }

    u2(&mut body, attributes.len() as u16);
    for (name_index, data) in attributes {
        u2(&mut body, name_index);
        u4(&mut body, data.len() as u32);
        body.extend_from_slice(&data);
    }

    let mut out = Vec::new();
    u4(&mut out, 0xCAFE_BABE);
    u2(&mut out, 0);
    u2(&mut out, 52);
    u2(&mut out, pool.next);
    out.extend_from_slice(&pool.bytes);
    out.extend_from_slice(&body);
    out
}
