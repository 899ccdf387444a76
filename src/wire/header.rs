//! File and record headers.

use tartan_bitfield::bitfield;
use thiserror::Error;
use zerocopy::FromBytes;

/// An error decoding a file header.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// Incorrect file type marker.
    #[error("Incorrect file type marker.")]
    NotFitData,
    /// Unknown header length.
    #[error("Unknown header length ({0}).")]
    UnknownHeaderLength(u8),
    /// The stream ended inside the header.
    #[error("Truncated file header.")]
    Truncated,
}

/// Protocol metadata and the record section length from a file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub protocol_version: u8,
    pub profile_version: u16,
    /// Length of the record section in bytes, excluding headers and the
    /// trailing checksum.
    pub data_size: u32,
    pub header_size: u8,
    /// Checksum over the first twelve header bytes, when the header carries
    /// one.
    pub checksum: Option<u16>,
}

impl FileHeader {
    /// Decode the fixed twelve-byte prefix of a file header.
    ///
    /// A fourteen-byte header carries two further bytes holding a checksum;
    /// [`FileHeader::with_checksum`] folds them in.
    pub fn decode(r: [u8; 12]) -> Result<Self, HeaderError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawHeader {
            header_size: u8,
            protocol_version: u8,
            profile_version: [u8; 2],
            data_size: [u8; 4],
            data_type: [u8; 4],
        }

        let RawHeader {
            header_size,
            protocol_version,
            profile_version,
            data_size,
            data_type,
        } = zerocopy::transmute!(r);

        if &data_type != b".FIT" {
            Err(HeaderError::NotFitData)?;
        }

        if header_size != 12 && header_size != 14 {
            Err(HeaderError::UnknownHeaderLength(header_size))?;
        }

        Ok(Self {
            protocol_version,
            profile_version: u16::from_le_bytes(profile_version),
            data_size: u32::from_le_bytes(data_size),
            header_size,
            checksum: None,
        })
    }

    /// Whether two further checksum bytes remain to be read.
    pub fn is_extended(&self) -> bool {
        self.header_size == 14
    }

    /// Fold in the trailing checksum bytes of a fourteen-byte header.
    ///
    /// A zero value marks the checksum as absent.
    pub fn with_checksum(mut self, r: [u8; 2]) -> Self {
        let checksum = u16::from_le_bytes(r);
        self.checksum = (checksum != 0).then_some(checksum);
        self
    }
}

/// Classification of a single record header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A definition message follows, establishing the schema for a local
    /// type.
    Definition {
        local: u8,
        /// Developer field definitions follow the standard ones.
        developer: bool,
    },
    /// A data message follows, decoded against its local type's schema.
    Data {
        local: u8,
        /// Five-bit offset from a compressed timestamp header.
        time_offset: Option<u8>,
    },
}

impl RecordKind {
    /// Classify a record header byte.
    pub fn decode(r: [u8; 1]) -> Self {
        let r = r[0];

        bitfield! {
            struct Header(u8) {
                [7] is_compressed,
            }
        }

        if Header(r).is_compressed() {
            bitfield! {
                struct CompressedHeader(u8) {
                    [0..5] time_offset: u8,
                    [5..7] local_message: u8,
                }
            }

            let header = CompressedHeader(r);

            RecordKind::Data {
                local: header.local_message(),
                time_offset: Some(header.time_offset()),
            }
        } else {
            bitfield! {
                struct NormalHeader(u8) {
                    [0..4] local_message: u8,
                    [5] is_developer,
                    [6] is_definition,
                }
            }

            let header = NormalHeader(r);
            let local = header.local_message();

            if header.is_definition() {
                RecordKind::Definition {
                    local,
                    developer: header.is_developer(),
                }
            } else {
                RecordKind::Data {
                    local,
                    time_offset: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_header_rejects_bad_marker() {
        let mut r = *b"\x0e\x20\x54\x08\x10\x00\x00\x00.FIT";
        assert!(FileHeader::decode(r).is_ok());

        r[8] = b'!';
        assert!(matches!(
            FileHeader::decode(r),
            Err(HeaderError::NotFitData)
        ));
    }

    #[test]
    fn file_header_rejects_bad_length() {
        let r = *b"\x0d\x20\x54\x08\x10\x00\x00\x00.FIT";
        assert!(matches!(
            FileHeader::decode(r),
            Err(HeaderError::UnknownHeaderLength(13))
        ));
    }

    #[test]
    fn record_kinds() {
        assert_eq!(
            RecordKind::decode([0x40]),
            RecordKind::Definition {
                local: 0,
                developer: false
            }
        );
        assert_eq!(
            RecordKind::decode([0x63]),
            RecordKind::Definition {
                local: 3,
                developer: true
            }
        );
        assert_eq!(
            RecordKind::decode([0x02]),
            RecordKind::Data {
                local: 2,
                time_offset: None
            }
        );
        // Compressed: bit 7 set, local in bits 5..7, offset in bits 0..5.
        assert_eq!(
            RecordKind::decode([0x80 | (1 << 5) | 0x11]),
            RecordKind::Data {
                local: 1,
                time_offset: Some(0x11)
            }
        );
    }
}
