//! Interpretation of raw fields through the message profile.
//!
//! This layer turns a data message's raw payload into named, typed values:
//! sub-field selection, component expansion, scale and offset, enum labels,
//! and FIT epoch conversion. Logical names recurring within one message
//! (a direct field and a component target, say) merge last write wins.

use chrono::{DateTime, Utc};
use either::Either::{self, Left, Right};

use crate::profile::types::EPOCH_OFFSET_SECS;
use crate::profile::{Component, FieldKind, MessageSchema};
use crate::value::Value;
use crate::wire::definition::{BaseType, MessageDefinition};

use super::developer::DeveloperRegistry;
use super::raw::{self, Raw, RawDeveloperField, RawField};
use super::{DecodeOptions, DecodedMessage};

/// The interpretation chosen for a field after sub-field selection.
struct FieldView {
    name: &'static str,
    kind: FieldKind,
    scale: f64,
    offset: f64,
    components: &'static [Component],
}

/// Interpret one data message's raw fields as a decoded message.
pub(crate) fn apply(
    definition: &MessageDefinition,
    schema: Option<&'static MessageSchema>,
    raws: &[RawField],
    developer_raws: &[RawDeveloperField],
    compressed_timestamp: Option<u32>,
    developers: &DeveloperRegistry,
    options: &DecodeOptions,
) -> DecodedMessage {
    let table = match schema {
        Some(schema) => format!("{}_mesgs", schema.name),
        None => format!("{}_mesgs", definition.global),
    };

    let mut fields: Vec<(String, Value)> = Vec::with_capacity(raws.len() + 1);

    if let Some(seconds) = compressed_timestamp {
        let value = if options.convert_datetimes {
            to_datetime(seconds as u64)
                .map(Value::Timestamp)
                .unwrap_or(Value::Unsigned(seconds as u64))
        } else {
            Value::Unsigned(seconds as u64)
        };
        push_field(&mut fields, "timestamp".to_string(), value);
    }

    for field in raws {
        if matches!(field.value, Raw::Invalid) {
            continue;
        }

        match resolve(schema, field.definition.number, raws, options) {
            Left(view) => {
                let value = interpret(&field.value, &view, options);
                push_field(&mut fields, view.name.to_string(), value);

                if options.expand_components {
                    expand_components(&mut fields, &view, field.bytes, definition, options);
                }
            }
            Right(number) => {
                let value = plain_value(&field.value);
                push_field(&mut fields, format!("field_{number}"), value);
            }
        }
    }

    for field in developer_raws {
        let description = developers.describe(
            field.definition.developer_data_index,
            field.definition.number,
        );
        let base_type = description
            .and_then(|d| d.base_type)
            .unwrap_or(BaseType::Byte);

        let value = raw::decode(field.bytes, base_type, definition.architecture);
        if matches!(value, Raw::Invalid) {
            continue;
        }

        let name = match description.and_then(|d| d.name.as_deref()) {
            Some(name) => name.to_string(),
            None => format!(
                "developer_{}_{}",
                field.definition.developer_data_index, field.definition.number
            ),
        };
        push_field(&mut fields, name, plain_value(&value));
    }

    DecodedMessage { table, fields }
}

/// Choose the interpretation for a field, preferring a matching sub-field.
fn resolve(
    schema: Option<&'static MessageSchema>,
    number: u8,
    raws: &[RawField],
    options: &DecodeOptions,
) -> Either<FieldView, u8> {
    let Some(field) = schema.and_then(|s| s.field(number)) else {
        return Right(number);
    };

    if options.expand_sub_fields {
        for subfield in field.subfields {
            let selected = subfield.refs.iter().any(|&(ref_number, ref_value)| {
                raws.iter().any(|r| {
                    r.definition.number == ref_number && r.value.as_unsigned() == Some(ref_value)
                })
            });

            if selected {
                return Left(FieldView {
                    name: subfield.name,
                    kind: subfield.kind,
                    scale: subfield.scale,
                    offset: subfield.offset,
                    components: &[],
                });
            }
        }
    }

    Left(FieldView {
        name: field.name,
        kind: field.kind,
        scale: field.scale,
        offset: field.offset,
        components: field.components,
    })
}

fn interpret(raw: &Raw, view: &FieldView, options: &DecodeOptions) -> Value {
    match view.kind {
        FieldKind::DateTime if options.convert_datetimes => {
            match raw.as_unsigned().and_then(to_datetime) {
                Some(timestamp) => Value::Timestamp(timestamp),
                None => plain_value(raw),
            }
        }
        FieldKind::Enum(table) if options.convert_enums_to_strings => {
            match raw.as_unsigned().and_then(|v| table.label(v)) {
                Some(label) => Value::Text(label.to_string()),
                None => plain_value(raw),
            }
        }
        _ => scaled_value(raw, view.scale, view.offset, options),
    }
}

fn expand_components(
    fields: &mut Vec<(String, Value)>,
    view: &FieldView,
    bytes: &[u8],
    definition: &MessageDefinition,
    options: &DecodeOptions,
) {
    let mut bit_offset = 0u32;
    for component in view.components {
        let raw_bits = raw::component_bits(bytes, definition.architecture, bit_offset, component.bits);
        bit_offset += component.bits as u32;

        let invalid = if component.bits >= 64 {
            u64::MAX
        } else {
            (1u64 << component.bits) - 1
        };
        if raw_bits == invalid {
            continue;
        }

        let value =
            if options.apply_scale_and_offset && (component.scale != 1.0 || component.offset != 0.0)
            {
                Value::Float(raw_bits as f64 / component.scale - component.offset)
            } else {
                Value::Unsigned(raw_bits)
            };
        push_field(fields, component.name.to_string(), value);
    }
}

fn scaled_value(raw: &Raw, scale: f64, offset: f64, options: &DecodeOptions) -> Value {
    if !options.apply_scale_and_offset || (scale == 1.0 && offset == 0.0) {
        return plain_value(raw);
    }

    let apply = |v: f64| Value::Float(v / scale - offset);
    match raw {
        Raw::Unsigned(v) => apply(*v as f64),
        Raw::Signed(v) => apply(*v as f64),
        Raw::Float(v) => apply(*v),
        Raw::UnsignedArray(vs) => Value::Array(vs.iter().map(|&v| apply(v as f64)).collect()),
        Raw::SignedArray(vs) => Value::Array(vs.iter().map(|&v| apply(v as f64)).collect()),
        Raw::FloatArray(vs) => Value::Array(vs.iter().map(|&v| apply(v)).collect()),
        _ => plain_value(raw),
    }
}

fn plain_value(raw: &Raw) -> Value {
    match raw {
        Raw::Unsigned(v) => Value::Unsigned(*v),
        Raw::Signed(v) => Value::Signed(*v),
        Raw::Float(v) => Value::Float(*v),
        Raw::UnsignedArray(vs) => Value::Array(vs.iter().map(|&v| Value::Unsigned(v)).collect()),
        Raw::SignedArray(vs) => Value::Array(vs.iter().map(|&v| Value::Signed(v)).collect()),
        Raw::FloatArray(vs) => Value::Array(vs.iter().map(|&v| Value::Float(v)).collect()),
        Raw::Text(s) => Value::Text(s.clone()),
        Raw::Bytes(b) => Value::Bytes(b.clone()),
        // Callers skip invalid payloads before interpreting them.
        Raw::Invalid => unreachable!(),
    }
}

/// Convert seconds since the FIT epoch to a calendar timestamp.
pub(crate) fn to_datetime(seconds: u64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(EPOCH_OFFSET_SECS.checked_add(seconds as i64)?, 0)
}

/// Insert a field, replacing any earlier value under the same name.
fn push_field(fields: &mut Vec<(String, Value)>, name: String, value: Value) {
    match fields.iter_mut().find(|(n, _)| *n == name) {
        Some(slot) => slot.1 = value,
        None => fields.push((name, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_conversion() {
        let timestamp = to_datetime(0).unwrap();
        assert_eq!(timestamp.to_rfc3339(), "1989-12-31T00:00:00+00:00");
    }

    #[test]
    fn push_field_merges_by_name() {
        let mut fields = vec![("speed".to_string(), Value::Unsigned(1))];
        push_field(&mut fields, "speed".to_string(), Value::Unsigned(2));
        push_field(&mut fields, "distance".to_string(), Value::Unsigned(3));

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].1, Value::Unsigned(2));
    }
}
