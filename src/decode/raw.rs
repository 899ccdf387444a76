//! Raw field payloads, decoded to primitives before profile interpretation.

use crate::wire::definition::{BaseType, DeveloperFieldDefinition, FieldDefinition};
use crate::wire::stream::Endianness;

/// A standard field sliced out of a data message payload.
#[derive(Debug)]
pub(crate) struct RawField<'a> {
    pub definition: FieldDefinition,
    pub bytes: &'a [u8],
    pub value: Raw,
}

/// A developer field sliced out of a data message payload.
///
/// Decoding is deferred until the field's description is consulted.
#[derive(Debug)]
pub(crate) struct RawDeveloperField<'a> {
    pub definition: DeveloperFieldDefinition,
    pub bytes: &'a [u8],
}

/// A field's payload decoded to primitives.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Raw {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    UnsignedArray(Vec<u64>),
    SignedArray(Vec<i64>),
    FloatArray(Vec<f64>),
    Text(String),
    Bytes(Vec<u8>),
    /// Every element held its type's invalid marker.
    Invalid,
}

impl Raw {
    /// The single unsigned integer behind this payload, when it has one.
    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            Raw::Unsigned(v) => Some(*v),
            _ => None,
        }
    }
}

/// Decode a field's bytes according to its declared base type.
///
/// Fields wider than their base type decode as arrays; elements holding the
/// type's invalid marker are dropped.
pub(crate) fn decode(bytes: &[u8], base_type: BaseType, endianness: Endianness) -> Raw {
    match base_type {
        BaseType::String => decode_string(bytes),
        BaseType::Byte => {
            if bytes.is_empty() || bytes.iter().all(|&b| b == 0xFF) {
                Raw::Invalid
            } else {
                Raw::Bytes(bytes.to_vec())
            }
        }
        BaseType::SInt8 | BaseType::SInt16 | BaseType::SInt32 | BaseType::SInt64 => {
            let values = elements(bytes, base_type, |c| decode_signed(c, base_type, endianness));
            collapse(values, bytes.len() / base_type.size(), Raw::Signed, Raw::SignedArray)
        }
        BaseType::Float32 | BaseType::Float64 => {
            let values = elements(bytes, base_type, |c| decode_float(c, base_type, endianness));
            collapse(values, bytes.len() / base_type.size(), Raw::Float, Raw::FloatArray)
        }
        _ => {
            let values = elements(bytes, base_type, |c| decode_unsigned(c, base_type, endianness));
            collapse(values, bytes.len() / base_type.size(), Raw::Unsigned, Raw::UnsignedArray)
        }
    }
}

fn decode_string(bytes: &[u8]) -> Raw {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    if end == 0 {
        return Raw::Invalid;
    }
    Raw::Text(String::from_utf8_lossy(&bytes[..end]).into_owned())
}

fn elements<T>(
    bytes: &[u8],
    base_type: BaseType,
    decode_one: impl Fn(&[u8]) -> Option<T>,
) -> Vec<T> {
    bytes
        .chunks_exact(base_type.size())
        .filter_map(|c| decode_one(c))
        .collect()
}

fn collapse<T>(
    values: Vec<T>,
    element_count: usize,
    single: impl Fn(T) -> Raw,
    array: impl Fn(Vec<T>) -> Raw,
) -> Raw {
    match (element_count, values.len()) {
        (_, 0) => Raw::Invalid,
        (1, _) => single(values.into_iter().next().unwrap()),
        _ => array(values),
    }
}

fn decode_unsigned(chunk: &[u8], base_type: BaseType, endianness: Endianness) -> Option<u64> {
    match base_type {
        BaseType::Enum | BaseType::UInt8 => {
            let v = chunk[0];
            (v != u8::MAX).then_some(v as u64)
        }
        BaseType::UInt8z => {
            let v = chunk[0];
            (v != 0).then_some(v as u64)
        }
        BaseType::UInt16 => {
            let v = endianness.u16(chunk.try_into().unwrap());
            (v != u16::MAX).then_some(v as u64)
        }
        BaseType::UInt16z => {
            let v = endianness.u16(chunk.try_into().unwrap());
            (v != 0).then_some(v as u64)
        }
        BaseType::UInt32 => {
            let v = endianness.u32(chunk.try_into().unwrap());
            (v != u32::MAX).then_some(v as u64)
        }
        BaseType::UInt32z => {
            let v = endianness.u32(chunk.try_into().unwrap());
            (v != 0).then_some(v as u64)
        }
        BaseType::UInt64 => {
            let v = endianness.u64(chunk.try_into().unwrap());
            (v != u64::MAX).then_some(v)
        }
        BaseType::UInt64z => {
            let v = endianness.u64(chunk.try_into().unwrap());
            (v != 0).then_some(v)
        }
        _ => None,
    }
}

fn decode_signed(chunk: &[u8], base_type: BaseType, endianness: Endianness) -> Option<i64> {
    match base_type {
        BaseType::SInt8 => {
            let v = chunk[0] as i8;
            (v != i8::MAX).then_some(v as i64)
        }
        BaseType::SInt16 => {
            let v = endianness.i16(chunk.try_into().unwrap());
            (v != i16::MAX).then_some(v as i64)
        }
        BaseType::SInt32 => {
            let v = endianness.i32(chunk.try_into().unwrap());
            (v != i32::MAX).then_some(v as i64)
        }
        BaseType::SInt64 => {
            let v = endianness.i64(chunk.try_into().unwrap());
            (v != i64::MAX).then_some(v)
        }
        _ => None,
    }
}

fn decode_float(chunk: &[u8], base_type: BaseType, endianness: Endianness) -> Option<f64> {
    match base_type {
        BaseType::Float32 => {
            let bits = endianness.u32(chunk.try_into().unwrap());
            (bits != u32::MAX).then(|| f32::from_bits(bits) as f64)
        }
        BaseType::Float64 => {
            let bits = endianness.u64(chunk.try_into().unwrap());
            (bits != u64::MAX).then(|| f64::from_bits(bits))
        }
        _ => None,
    }
}

/// Extract a component's bits from a field's payload.
///
/// Components are packed into the field's numeric value least significant
/// bit first; `offset` counts bits already consumed by earlier components.
pub(crate) fn component_bits(
    bytes: &[u8],
    endianness: Endianness,
    offset: u32,
    bits: u8,
) -> u64 {
    let mut accumulator: u64 = 0;
    match endianness {
        Endianness::Little => {
            for (i, &b) in bytes.iter().take(8).enumerate() {
                accumulator |= (b as u64) << (8 * i);
            }
        }
        Endianness::Big => {
            for (i, &b) in bytes.iter().rev().take(8).enumerate() {
                accumulator |= (b as u64) << (8 * i);
            }
        }
    }

    let mask = if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    };

    (accumulator >> offset.min(63)) & mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_values_are_invalid() {
        assert_eq!(decode(&[0xFF], BaseType::UInt8, Endianness::Little), Raw::Invalid);
        assert_eq!(
            decode(&[0xFF, 0x7F], BaseType::SInt16, Endianness::Little),
            Raw::Invalid
        );
        assert_eq!(decode(&[0x00], BaseType::UInt8z, Endianness::Little), Raw::Invalid);
        assert_eq!(
            decode(&[150], BaseType::UInt8, Endianness::Little),
            Raw::Unsigned(150)
        );
    }

    #[test]
    fn arrays_drop_invalid_elements() {
        let raw = decode(&[1, 0xFF, 3], BaseType::UInt8, Endianness::Little);
        assert_eq!(raw, Raw::UnsignedArray(vec![1, 3]));

        let raw = decode(&[0xFF, 0xFF], BaseType::UInt8, Endianness::Little);
        assert_eq!(raw, Raw::Invalid);
    }

    #[test]
    fn strings_stop_at_nul() {
        assert_eq!(
            decode(b"Run\0\0\0", BaseType::String, Endianness::Little),
            Raw::Text("Run".into())
        );
        assert_eq!(decode(b"\0\0", BaseType::String, Endianness::Little), Raw::Invalid);
    }

    #[test]
    fn component_bit_extraction() {
        // 24-bit little-endian stream holding 1234 (12 bits) then 2345.
        let v: u64 = 1234 | (2345 << 12);
        let bytes = [v as u8, (v >> 8) as u8, (v >> 16) as u8];

        assert_eq!(component_bits(&bytes, Endianness::Little, 0, 12), 1234);
        assert_eq!(component_bits(&bytes, Endianness::Little, 12, 12), 2345);

        let swapped = [(v >> 16) as u8, (v >> 8) as u8, v as u8];
        assert_eq!(component_bits(&swapped, Endianness::Big, 0, 12), 1234);
    }
}
