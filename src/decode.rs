//! Decoding FIT documents into tables.
//!
//! [`decode_slice`] and friends run the record stream through three layers:
//! the protocol state machine, the value transforms, and table assembly
//! ([`crate::table`]). Tolerated problems are collected as [`Diagnostic`]
//! values in the returned [`Report`] rather than ending the decode.

pub(crate) mod developer;
pub(crate) mod machine;
pub(crate) mod raw;
pub(crate) mod transform;

use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::table::TableCollection;
use crate::value::Value;
use crate::wire::header::HeaderError;

/// Switches controlling the value transform layer.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Divide by declared scales and subtract declared offsets.
    pub apply_scale_and_offset: bool,
    /// Convert date-time fields from the FIT epoch to calendar timestamps.
    pub convert_datetimes: bool,
    /// Resolve enum fields to their labels.
    pub convert_enums_to_strings: bool,
    /// Re-interpret fields through matching sub-field alternatives.
    pub expand_sub_fields: bool,
    /// Split component fields into their logical parts.
    pub expand_components: bool,
    /// Fail decoding on a checksum mismatch instead of warning.
    pub strict_crc: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            apply_scale_and_offset: true,
            convert_datetimes: true,
            convert_enums_to_strings: true,
            expand_sub_fields: true,
            expand_components: true,
            strict_crc: false,
        }
    }
}

impl DecodeOptions {
    /// Options that fail hard on a checksum mismatch.
    pub fn strict() -> Self {
        Self {
            strict_crc: true,
            ..Self::default()
        }
    }
}

/// A single decoded message, consumed by table assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    /// Name of the table this message belongs to (`<message>_mesgs`).
    pub table: String,
    /// Field names and values in decode order; names are unique.
    pub fields: Vec<(String, Value)>,
}

/// A decoded document: tables plus collected diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub tables: TableCollection,
    pub diagnostics: Vec<Diagnostic>,
}

/// A tolerated problem encountered while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Calculated and found CRC values do not match.
    CrcMismatch { found: u16, calculated: u16 },
    /// The stream ended before the declared data size.
    TruncatedStream { offset: usize },
    /// A data record referenced a local type with no prior definition.
    UndefinedLocalType { local: u8, offset: usize },
    /// A global message number missing from the profile; raw field names
    /// are used for its rows.
    UnknownMessage { global: u16 },
    /// A message type whose rows could not share one schema was dropped.
    SchemaConflict { table: String, column: String },
}

/// An error ending decoding with no usable output.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Incorrect file header.
    #[error("Incorrect file header: {0}")]
    Header(#[from] HeaderError),
    /// Calculated and found CRC values do not match.
    #[error("Calculated ({calculated}) and found ({found}) CRC values do not match.")]
    Crc { found: u16, calculated: u16 },
    /// An error reading the document.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Decode a FIT document from a byte slice.
pub fn decode_slice(data: &[u8], options: &DecodeOptions) -> Result<Report, DecodeError> {
    machine::run(data, options)
}

/// Decode a FIT document from a reader.
pub fn decode_reader(r: &mut impl Read, options: &DecodeOptions) -> Result<Report, DecodeError> {
    let mut data = Vec::new();
    r.read_to_end(&mut data)?;
    machine::run(&data, options)
}

/// Decode a FIT document from a file path.
pub fn decode_file(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Report, DecodeError> {
    let data = std::fs::read(path)?;
    machine::run(&data, options)
}
