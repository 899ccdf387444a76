//! Definition messages and their field layouts.

use zerocopy::FromBytes;

use super::stream::{Cursor, Endianness, StreamError};

/// Base types a field's bytes may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Enum,
    SInt8,
    UInt8,
    SInt16,
    UInt16,
    SInt32,
    UInt32,
    String,
    Float32,
    Float64,
    UInt8z,
    UInt16z,
    UInt32z,
    Byte,
    SInt64,
    UInt64,
    UInt64z,
}

impl BaseType {
    /// Resolve a base type byte from a definition field.
    pub fn from_byte(b: u8) -> Option<Self> {
        Some(match b {
            0x00 => Self::Enum,
            0x01 => Self::SInt8,
            0x02 => Self::UInt8,
            0x83 => Self::SInt16,
            0x84 => Self::UInt16,
            0x85 => Self::SInt32,
            0x86 => Self::UInt32,
            0x07 => Self::String,
            0x88 => Self::Float32,
            0x89 => Self::Float64,
            0x0A => Self::UInt8z,
            0x8B => Self::UInt16z,
            0x8C => Self::UInt32z,
            0x0D => Self::Byte,
            0x8E => Self::SInt64,
            0x8F => Self::UInt64,
            0x90 => Self::UInt64z,
            _ => return None,
        })
    }

    /// Width in bytes of a single value of this type.
    pub fn size(self) -> usize {
        match self {
            Self::Enum | Self::SInt8 | Self::UInt8 | Self::String | Self::UInt8z | Self::Byte => 1,
            Self::SInt16 | Self::UInt16 | Self::UInt16z => 2,
            Self::SInt32 | Self::UInt32 | Self::UInt32z | Self::Float32 => 4,
            Self::SInt64 | Self::UInt64 | Self::UInt64z | Self::Float64 => 8,
        }
    }
}

/// Layout of one field within a data message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    pub number: u8,
    pub size: u8,
    pub base_type: BaseType,
}

/// Layout of one developer field within a data message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeveloperFieldDefinition {
    pub number: u8,
    pub size: u8,
    pub developer_data_index: u8,
}

/// The active schema for a local message type.
///
/// Established by a definition record; remains in force for its local type
/// until another definition record overwrites the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDefinition {
    pub architecture: Endianness,
    pub global: u16,
    pub fields: Vec<FieldDefinition>,
    pub developer_fields: Vec<DeveloperFieldDefinition>,
}

impl MessageDefinition {
    /// Decode a definition message from the tip of the cursor.
    ///
    /// The record header byte must already have been consumed; `developer`
    /// is its developer data flag.
    pub fn decode(r: &mut Cursor, developer: bool) -> Result<Self, StreamError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct Prefix {
            _reserved: u8,
            architecture: u8,
            global_message: [u8; 2],
            field_count: u8,
        }

        let Prefix {
            architecture,
            global_message,
            field_count,
            ..
        } = zerocopy::transmute!(r.take::<5>()?);

        let architecture = if architecture == 0 {
            Endianness::Little
        } else {
            Endianness::Big
        };
        let global = architecture.u16(global_message);

        let mut fields = Vec::with_capacity(field_count as usize);
        for _ in 0..field_count {
            let [number, size, base_type] = r.take::<3>()?;
            // A base type byte outside the known set decodes as opaque bytes.
            let base_type = BaseType::from_byte(base_type).unwrap_or(BaseType::Byte);
            fields.push(FieldDefinition {
                number,
                size,
                base_type,
            });
        }

        let mut developer_fields = Vec::new();
        if developer {
            let [count] = r.take::<1>()?;
            developer_fields.reserve(count as usize);
            for _ in 0..count {
                let [number, size, developer_data_index] = r.take::<3>()?;
                developer_fields.push(DeveloperFieldDefinition {
                    number,
                    size,
                    developer_data_index,
                });
            }
        }

        Ok(Self {
            architecture,
            global,
            fields,
            developer_fields,
        })
    }

    /// Total byte length of a data message using this definition.
    pub fn payload_len(&self) -> usize {
        self.fields.iter().map(|f| f.size as usize).sum::<usize>()
            + self
                .developer_fields
                .iter()
                .map(|f| f.size as usize)
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_definition_message() {
        // Reserved, little endian, global 20, two fields.
        let bytes = [0x00, 0x00, 20, 0, 2, 253, 4, 0x86, 3, 1, 0x02];
        let mut cursor = Cursor::new(&bytes);

        let definition = MessageDefinition::decode(&mut cursor, false).unwrap();
        assert_eq!(definition.architecture, Endianness::Little);
        assert_eq!(definition.global, 20);
        assert_eq!(definition.fields.len(), 2);
        assert_eq!(definition.fields[0].base_type, BaseType::UInt32);
        assert_eq!(definition.payload_len(), 5);
    }

    #[test]
    fn big_endian_global_number() {
        let bytes = [0x00, 0x01, 0, 20, 0];
        let mut cursor = Cursor::new(&bytes);

        let definition = MessageDefinition::decode(&mut cursor, false).unwrap();
        assert_eq!(definition.architecture, Endianness::Big);
        assert_eq!(definition.global, 20);
    }

    #[test]
    fn developer_fields_extend_payload() {
        let bytes = [0x00, 0x00, 20, 0, 1, 3, 1, 0x02, 1, 5, 2, 0];
        let mut cursor = Cursor::new(&bytes);

        let definition = MessageDefinition::decode(&mut cursor, true).unwrap();
        assert_eq!(definition.developer_fields.len(), 1);
        assert_eq!(definition.developer_fields[0].developer_data_index, 0);
        assert_eq!(definition.payload_len(), 3);
    }
}
