//! A decoder for Garmin's Flexible and Interoperable Data Transfer protocol.
//!
//! Groupset reads a FIT document and collects its data messages into one
//! table per message type, ready for delimited-text export or further
//! processing. Decoding is driven by a compiled-in profile of the common
//! activity messages; messages missing from the profile are kept with raw
//! field names rather than rejected.
//!
//! Most users should begin with [`decode_file`] or [`decode_slice`] and the
//! returned [`Report`]. Tolerated problems, such as checksum mismatches,
//! data records without a definition, and message types whose rows cannot
//! share one schema, are collected as [`Diagnostic`] values alongside the
//! tables. Only a malformed file header, an I/O failure, or a checksum
//! mismatch under [`DecodeOptions::strict`] end decoding with an error.

pub mod decode;
pub mod export;
pub mod profile;
pub mod table;
pub mod value;
pub mod wire;

pub use decode::{
    DecodeError, DecodeOptions, DecodedMessage, Diagnostic, Report, decode_file, decode_reader,
    decode_slice,
};
pub use table::{Table, TableCollection};
pub use value::{Value, ValueKind};
