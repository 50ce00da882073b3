use super::error::ClassFileError;

/// Constant pool entries the symbol model needs; everything else is `Other`.
#[derive(Debug, Clone)]
enum Constant {
    Utf8(String),
    Class { name_index: u16 },
    NameAndType { name_index: u16, descriptor_index: u16 },
    Other,
    Unusable,
}

pub(super) struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    pub(super) fn parse(reader: &mut ClassReader<'_>) -> Result<Self, ClassFileError> {
        let count = reader.read_u2()? as usize;
        let mut entries = Vec::with_capacity(count);
        entries.push(Constant::Unusable); // index 0 unused

        let mut index = 1;
        while index < count {
            let tag = reader.read_u1()?;
            let entry = match tag {
                1 => {
                    let length = reader.read_u2()? as usize;
                    let bytes = reader.read_slice(length)?;
                    let string = decode_modified_utf8(bytes).ok_or(ClassFileError::InvalidUtf8 {
                        index: index as u16,
                    })?;
                    Constant::Utf8(string)
                }
                3 | 4 => {
                    reader.skip(4)?;
                    Constant::Other
                }
                5 | 6 => {
                    // long and double take two slots
                    reader.skip(8)?;
                    entries.push(Constant::Other);
                    index += 1;
                    Constant::Unusable
                }
                7 => Constant::Class {
                    name_index: reader.read_u2()?,
                },
                8 | 16 | 19 | 20 => {
                    reader.read_u2()?;
                    Constant::Other
                }
                9 | 10 | 11 | 17 | 18 => {
                    reader.skip(4)?;
                    Constant::Other
                }
                12 => Constant::NameAndType {
                    name_index: reader.read_u2()?,
                    descriptor_index: reader.read_u2()?,
                },
                15 => {
                    reader.skip(3)?;
                    Constant::Other
                }
                other => return Err(ClassFileError::UnsupportedConstant { tag: other }),
            };

            entries.push(entry);
            index += 1;
        }

        Ok(Self { entries })
    }

    fn get(&self, index: u16) -> Result<&Constant, ClassFileError> {
        self.entries
            .get(index as usize)
            .ok_or(ClassFileError::InvalidConstantIndex { index })
    }

    pub(super) fn utf8(&self, index: u16) -> Result<&str, ClassFileError> {
        match self.get(index)? {
            Constant::Utf8(value) => Ok(value.as_str()),
            _ => Err(ClassFileError::InvalidConstantIndex { index }),
        }
    }

    /// Index 0 means "absent" for optional class references.
    pub(super) fn optional_utf8(&self, index: u16) -> Result<Option<String>, ClassFileError> {
        if index == 0 {
            return Ok(None);
        }
        self.utf8(index).map(|s| Some(s.to_string()))
    }

    pub(super) fn class_name(&self, index: u16) -> Result<String, ClassFileError> {
        match self.get(index)? {
            Constant::Class { name_index } => Ok(self.utf8(*name_index)?.to_string()),
            _ => Err(ClassFileError::InvalidConstantIndex { index }),
        }
    }

    pub(super) fn optional_class_name(&self, index: u16) -> Result<Option<String>, ClassFileError> {
        if index == 0 {
            return Ok(None);
        }
        self.class_name(index).map(Some)
    }

    pub(super) fn name_and_type(&self, index: u16) -> Result<(String, String), ClassFileError> {
        match self.get(index)? {
            Constant::NameAndType {
                name_index,
                descriptor_index,
            } => Ok((
                self.utf8(*name_index)?.to_string(),
                self.utf8(*descriptor_index)?.to_string(),
            )),
            _ => Err(ClassFileError::InvalidConstantIndex { index }),
        }
    }
}

pub(super) struct ClassReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ClassReader<'a> {
    pub(super) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(super) fn expect_magic(&mut self) -> Result<(), ClassFileError> {
        const MAGIC: u32 = 0xCAFE_BABE;
        let magic = self.read_u4()?;
        if magic != MAGIC {
            return Err(ClassFileError::InvalidMagic(magic));
        }
        Ok(())
    }

    pub(super) fn read_u1(&mut self) -> Result<u8, ClassFileError> {
        let value = *self.data.get(self.pos).ok_or(ClassFileError::UnexpectedEof)?;
        self.pos += 1;
        Ok(value)
    }

    pub(super) fn read_u2(&mut self) -> Result<u16, ClassFileError> {
        let bytes = self.read_slice(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub(super) fn read_u4(&mut self) -> Result<u32, ClassFileError> {
        let bytes = self.read_slice(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(super) fn read_slice(&mut self, len: usize) -> Result<&'a [u8], ClassFileError> {
        let end = self.pos.checked_add(len).ok_or(ClassFileError::UnexpectedEof)?;
        if end > self.data.len() {
            return Err(ClassFileError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub(super) fn skip(&mut self, len: usize) -> Result<(), ClassFileError> {
        self.read_slice(len).map(|_| ())
    }
}

/// Decode the JVM's modified UTF-8 (`\0` as two bytes, surrogate pairs as
/// two three-byte sequences).
fn decode_modified_utf8(bytes: &[u8]) -> Option<String> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Some(s.to_string());
    }

    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b0 = bytes[i] as u16;
        if b0 & 0x80 == 0 {
            units.push(b0);
            i += 1;
        } else if b0 & 0xE0 == 0xC0 {
            let b1 = *bytes.get(i + 1)? as u16;
            units.push(((b0 & 0x1F) << 6) | (b1 & 0x3F));
            i += 2;
        } else if b0 & 0xF0 == 0xE0 {
            let b1 = *bytes.get(i + 1)? as u16;
            let b2 = *bytes.get(i + 2)? as u16;
            units.push(((b0 & 0x0F) << 12) | ((b1 & 0x3F) << 6) | (b2 & 0x3F));
            i += 3;
        } else {
            return None;
        }
    }
    String::from_utf16(&units).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_bounds() {
        let mut reader = ClassReader::new(&[0x00, 0x01, 0x02]);
        assert_eq!(reader.read_u2().unwrap(), 1);
        assert!(matches!(reader.read_u2(), Err(ClassFileError::UnexpectedEof)));
    }

    #[test]
    fn test_bad_magic() {
        let mut reader = ClassReader::new(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert!(matches!(
            reader.expect_magic(),
            Err(ClassFileError::InvalidMagic(0xDEAD_BEEF))
        ));
    }

    #[test]
    fn test_modified_utf8_null() {
        // U+0000 is encoded as C0 80 in modified UTF-8
        assert_eq!(decode_modified_utf8(&[b'a', 0xC0, 0x80]).unwrap(), "a\0");
    }

    #[test]
    fn test_modified_utf8_surrogate_pair() {
        // U+1F600 as a CESU-8 surrogate pair
        let bytes = [0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80];
        assert_eq!(decode_modified_utf8(&bytes).unwrap(), "\u{1F600}");
    }
}
