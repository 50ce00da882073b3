#![allow(clippy::unwrap_used)]

use super::*;

/// `public class a extends java/lang/Object { int b; void c(); }`
fn minimal_class() -> Vec<u8> {
    let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34];
    // constant pool: 8 entries -> count 9
    bytes.extend_from_slice(&[0x00, 0x09]);
    let utf8 = |out: &mut Vec<u8>, s: &str| {
        out.push(1);
        out.extend_from_slice(&(s.len() as u16).to_be_bytes());
        out.extend_from_slice(s.as_bytes());
    };
    utf8(&mut bytes, "a"); // #1
    bytes.extend_from_slice(&[7, 0x00, 0x01]); // #2 Class a
    utf8(&mut bytes, "java/lang/Object"); // #3
    bytes.extend_from_slice(&[7, 0x00, 0x03]); // #4 Class Object
    utf8(&mut bytes, "b"); // #5
    utf8(&mut bytes, "I"); // #6
    utf8(&mut bytes, "c"); // #7
    utf8(&mut bytes, "()V"); // #8

    bytes.extend_from_slice(&[0x00, 0x21]); // access
    bytes.extend_from_slice(&[0x00, 0x02]); // this
    bytes.extend_from_slice(&[0x00, 0x04]); // super
    bytes.extend_from_slice(&[0x00, 0x00]); // interfaces

    bytes.extend_from_slice(&[0x00, 0x01]); // fields
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x05, 0x00, 0x06, 0x00, 0x00]);

    bytes.extend_from_slice(&[0x00, 0x01]); // methods
    bytes.extend_from_slice(&[0x00, 0x01, 0x00, 0x07, 0x00, 0x08, 0x00, 0x00]);

    bytes.extend_from_slice(&[0x00, 0x00]); // attributes
    bytes
}

#[test]
fn test_parse_minimal_class() {
    let class = parse_class(&minimal_class()).unwrap();
    assert_eq!(class.name, "a");
    assert_eq!(class.super_name.as_deref(), Some("java/lang/Object"));
    assert!(class.interfaces.is_empty());
    assert_eq!(class.fields, vec![MemberInfo::new(0, "b", "I")]);
    assert_eq!(class.methods, vec![MemberInfo::new(1, "c", "()V")]);
    assert!(class.enclosing.is_none());
    assert!(class.inner_name.is_none());
}

#[test]
fn test_truncated_class_is_error() {
    let bytes = minimal_class();
    for cut in [4, 10, 30, bytes.len() - 1] {
        assert!(
            parse_class(&bytes[..cut]).is_err(),
            "truncation at {cut} should fail"
        );
    }
}

#[test]
fn test_unsupported_constant_tag() {
    let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34, 0x00, 0x02];
    bytes.push(2); // tag 2 does not exist
    assert!(matches!(
        parse_class(&bytes),
        Err(ClassFileError::UnsupportedConstant { tag: 2 })
    ));
}

#[test]
fn test_this_class_must_be_class_constant() {
    let mut bytes = minimal_class();
    // point this_class at a UTF-8 entry
    let this_pos = bytes.len() - 2 - 10 - 10 - 2 - 2 - 2;
    bytes[this_pos] = 0x00;
    bytes[this_pos + 1] = 0x01;
    assert!(matches!(
        parse_class(&bytes),
        Err(ClassFileError::InvalidConstantIndex { index: 1 })
    ));
}

#[test]
fn test_member_key() {
    let member = MemberInfo::new(0, "a", "()V");
    assert_eq!(member.key(), MemberKey::new("a", "()V"));
}
