//! Field and method descriptor handling.
//!
//! Descriptors are validated byte by byte and class references inside them
//! (`Lpkg/Name;`) can be rewritten through a naming function.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The descriptor stops inside a type.
    #[error("unexpected end of descriptor '{0}'")]
    UnexpectedEnd(String),
    /// A byte that cannot start a type here.
    #[error("unexpected tag '{tag}' in descriptor '{descriptor}'")]
    UnexpectedTag { tag: char, descriptor: String },
    /// Input left over after a complete descriptor.
    #[error("trailing data in descriptor '{0}'")]
    TrailingData(String),
}

/// Validate a field descriptor such as `I` or `[Ljava/lang/String;`.
pub fn validate_field(descriptor: &str) -> Result<(), DescriptorError> {
    let mut parser = DescriptorParser::new(descriptor);
    parser.parse_type(false)?;
    parser.finish()
}

/// Validate a method descriptor such as `(IJ)V`.
pub fn validate_method(descriptor: &str) -> Result<(), DescriptorError> {
    let mut parser = DescriptorParser::new(descriptor);
    parser.expect(b'(')?;
    while parser.peek()? != b')' {
        parser.parse_type(false)?;
    }
    parser.expect(b')')?;
    parser.parse_type(true)?;
    parser.finish()
}

/// Rewrite every class reference of a descriptor through `map`.
///
/// `map` returns the new internal name for a class, or `None` to keep it.
/// Malformed references are copied through untouched.
pub fn remap_descriptor<F>(descriptor: &str, mut map: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(descriptor.len());
    let mut rest = descriptor;

    while let Some(start) = rest.find('L') {
        out.push_str(&rest[..=start]);
        let tail = &rest[start + 1..];
        match tail.find(';') {
            Some(end) => {
                let class = &tail[..end];
                match map(class) {
                    Some(mapped) => out.push_str(&mapped),
                    None => out.push_str(class),
                }
                out.push(';');
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

struct DescriptorParser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> DescriptorParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Result<u8, DescriptorError> {
        self.bytes
            .get(self.pos)
            .copied()
            .ok_or_else(|| DescriptorError::UnexpectedEnd(self.source.to_string()))
    }

    fn expect(&mut self, byte: u8) -> Result<(), DescriptorError> {
        let found = self.peek()?;
        if found != byte {
            return Err(self.unexpected(found));
        }
        self.pos += 1;
        Ok(())
    }

    fn unexpected(&self, tag: u8) -> DescriptorError {
        DescriptorError::UnexpectedTag {
            tag: tag as char,
            descriptor: self.source.to_string(),
        }
    }

    fn parse_type(&mut self, allow_void: bool) -> Result<(), DescriptorError> {
        let tag = self.peek()?;
        match tag {
            b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => {
                self.pos += 1;
                Ok(())
            }
            b'V' if allow_void => {
                self.pos += 1;
                Ok(())
            }
            b'L' => {
                self.pos += 1;
                let start = self.pos;
                while self.peek()? != b';' {
                    self.pos += 1;
                }
                if self.pos == start {
                    return Err(self.unexpected(b';'));
                }
                self.pos += 1;
                Ok(())
            }
            b'[' => {
                while self.peek()? == b'[' {
                    self.pos += 1;
                }
                self.parse_type(false)
            }
            other => Err(self.unexpected(other)),
        }
    }

    fn finish(&self) -> Result<(), DescriptorError> {
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(DescriptorError::TrailingData(self.source.to_string()))
        }
    }
}
