//! The record-stream state machine.
//!
//! Reads the file header, then iterates records until the declared data
//! size is consumed: definition records fill one of sixteen local type
//! slots, data records decode against the slot's schema. Ordering matters
//! throughout (definitions precede their data, compressed timestamps roll
//! forward from the last absolute one), so a stream decodes strictly
//! sequentially.

use tracing::{debug, warn};

use crate::profile::{self, TIMESTAMP_FIELD, messages};
use crate::table::Assembler;
use crate::wire::check::compute_crc;
use crate::wire::definition::MessageDefinition;
use crate::wire::header::{FileHeader, HeaderError, RecordKind};
use crate::wire::stream::{Cursor, StreamError};

use super::developer::DeveloperRegistry;
use super::raw::{self, RawDeveloperField, RawField};
use super::transform;
use super::{DecodeError, DecodeOptions, Diagnostic, Report};

/// Number of local message type slots addressable by a record header.
const LOCAL_SLOTS: usize = 16;

pub(crate) fn run(data: &[u8], options: &DecodeOptions) -> Result<Report, DecodeError> {
    let mut cursor = Cursor::new(data);
    let mut diagnostics = Vec::new();

    let mut header =
        FileHeader::decode(cursor.take().map_err(|_| HeaderError::Truncated)?)?;
    if header.is_extended() {
        header = header.with_checksum(cursor.take().map_err(|_| HeaderError::Truncated)?);
    }

    if let Some(found) = header.checksum {
        let calculated = compute_crc(0, &data[..12]);
        if found != calculated {
            checksum_mismatch(found, calculated, options, &mut diagnostics)?;
        }
    }

    let end = cursor.position() + header.data_size as usize;

    // Verify the trailing checksum up front when the stream carries one.
    if data.len() >= end + 2 {
        let found = u16::from_le_bytes([data[end], data[end + 1]]);
        let calculated = compute_crc(0, &data[..end]);
        if found != calculated {
            checksum_mismatch(found, calculated, options, &mut diagnostics)?;
        }
    } else if data.len() >= end {
        debug!("record section ends without a trailing checksum");
    }

    let mut definitions: [Option<MessageDefinition>; LOCAL_SLOTS] = Default::default();
    let mut developers = DeveloperRegistry::default();
    let mut assembler = Assembler::default();
    let mut last_timestamp: Option<u32> = None;
    let mut unknown_reported: Vec<u16> = Vec::new();

    while cursor.position() < end {
        let kind = match cursor.take() {
            Ok(r) => RecordKind::decode(r),
            Err(StreamError::EndOfStream(offset)) => {
                diagnostics.push(Diagnostic::TruncatedStream { offset });
                break;
            }
        };

        match kind {
            RecordKind::Definition { local, developer } => {
                match MessageDefinition::decode(&mut cursor, developer) {
                    Ok(definition) => {
                        // Overwriting an earlier definition for this slot is
                        // normal protocol behavior.
                        definitions[local as usize] = Some(definition);
                    }
                    Err(StreamError::EndOfStream(offset)) => {
                        diagnostics.push(Diagnostic::TruncatedStream { offset });
                        break;
                    }
                }
            }
            RecordKind::Data { local, time_offset } => {
                let Some(definition) = definitions[local as usize].as_ref() else {
                    // The record's length is unknowable without a definition;
                    // resynchronize at the next byte.
                    diagnostics.push(Diagnostic::UndefinedLocalType {
                        local,
                        offset: cursor.position() - 1,
                    });
                    continue;
                };

                let payload = match cursor.take_slice(definition.payload_len()) {
                    Ok(payload) => payload,
                    Err(StreamError::EndOfStream(offset)) => {
                        diagnostics.push(Diagnostic::TruncatedStream { offset });
                        break;
                    }
                };

                let (raws, developer_raws) = slice_fields(definition, payload);

                let compressed_timestamp = match time_offset {
                    Some(offset) => match last_timestamp {
                        Some(base) => {
                            let timestamp = advance_timestamp(base, offset);
                            last_timestamp = Some(timestamp);
                            Some(timestamp)
                        }
                        None => {
                            debug!(local, "compressed timestamp with no rolling base");
                            None
                        }
                    },
                    None => None,
                };

                if let Some(absolute) = raws
                    .iter()
                    .find(|f| f.definition.number == TIMESTAMP_FIELD)
                    .and_then(|f| f.value.as_unsigned())
                {
                    last_timestamp = Some(absolute as u32);
                }

                let schema = profile::message(definition.global);
                if schema.is_none() && !unknown_reported.contains(&definition.global) {
                    debug!(global = definition.global, "message missing from profile");
                    unknown_reported.push(definition.global);
                    diagnostics.push(Diagnostic::UnknownMessage {
                        global: definition.global,
                    });
                }

                if definition.global == messages::FIELD_DESCRIPTION {
                    developers.register(&raws);
                }

                let message = transform::apply(
                    definition,
                    schema,
                    &raws,
                    &developer_raws,
                    compressed_timestamp,
                    &developers,
                    options,
                );
                assembler.push(message);
            }
        }
    }

    let (tables, dropped) = assembler.finish();
    for (table, column) in dropped {
        warn!(%table, %column, "dropping message type with conflicting schema");
        diagnostics.push(Diagnostic::SchemaConflict { table, column });
    }

    Ok(Report {
        tables,
        diagnostics,
    })
}

/// Slice a data message payload into per-field byte runs and raw values.
fn slice_fields<'a>(
    definition: &MessageDefinition,
    payload: &'a [u8],
) -> (Vec<RawField<'a>>, Vec<RawDeveloperField<'a>>) {
    let mut rest = payload;

    let mut raws = Vec::with_capacity(definition.fields.len());
    for &field in &definition.fields {
        let (bytes, tail) = rest.split_at(field.size as usize);
        rest = tail;

        let value = raw::decode(bytes, field.base_type, definition.architecture);
        raws.push(RawField {
            definition: field,
            bytes,
            value,
        });
    }

    let mut developer_raws = Vec::with_capacity(definition.developer_fields.len());
    for &field in &definition.developer_fields {
        let (bytes, tail) = rest.split_at(field.size as usize);
        rest = tail;

        developer_raws.push(RawDeveloperField {
            definition: field,
            bytes,
        });
    }

    (raws, developer_raws)
}

/// Roll a compressed five-bit time offset forward from the last absolute
/// timestamp, accounting for wraparound.
fn advance_timestamp(base: u32, offset: u8) -> u32 {
    let low = base & 0x1F;
    let offset = offset as u32;

    let mut timestamp = base - low + offset;
    if offset < low {
        timestamp += 32;
    }
    timestamp
}

fn checksum_mismatch(
    found: u16,
    calculated: u16,
    options: &DecodeOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), DecodeError> {
    if options.strict_crc {
        return Err(DecodeError::Crc { found, calculated });
    }

    warn!(found, calculated, "checksum mismatch tolerated");
    diagnostics.push(Diagnostic::CrcMismatch { found, calculated });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_rolls_forward() {
        // Base 1000: low five bits are 8.
        assert_eq!(advance_timestamp(1000, 12), 1004);
        assert_eq!(advance_timestamp(1000, 8), 1000);
        // An offset below the base's low bits wraps into the next window.
        assert_eq!(advance_timestamp(1000, 4), 1028);
    }
}
