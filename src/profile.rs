//! The compiled-in message profile.
//!
//! Static reference data mapping global message numbers to field schemas:
//! names, scales, offsets, units, component decompositions, and sub-field
//! alternatives. The catalog covers the common activity messages; lookups
//! for anything else return `None` and the decoder falls back to raw field
//! names. Everything here is `'static` and may be shared freely across
//! threads.

pub mod messages;
pub mod types;

use types::EnumTable;

/// Field number carrying the absolute timestamp in any message.
pub const TIMESTAMP_FIELD: u8 = 253;

/// Schema of a global message.
pub struct MessageSchema {
    pub number: u16,
    pub name: &'static str,
    pub fields: &'static [FieldSchema],
}

impl MessageSchema {
    /// Look up a field schema by definition number.
    pub fn field(&self, number: u8) -> Option<&'static FieldSchema> {
        self.fields.iter().find(|f| f.number == number)
    }
}

/// How a field's decoded value is to be interpreted.
#[derive(Clone, Copy)]
pub enum FieldKind {
    /// No interpretation beyond scale and offset.
    Plain,
    /// Seconds since the FIT epoch.
    DateTime,
    /// Labelled by an enum table.
    Enum(&'static EnumTable),
    /// Semicircle coordinate, left unconverted.
    Coordinate,
}

/// Schema of one field of a message.
pub struct FieldSchema {
    pub number: u8,
    pub name: &'static str,
    pub kind: FieldKind,
    pub scale: f64,
    pub offset: f64,
    pub units: &'static str,
    pub components: &'static [Component],
    pub subfields: &'static [SubField],
}

impl FieldSchema {
    pub const fn plain(number: u8, name: &'static str, units: &'static str) -> Self {
        Self {
            number,
            name,
            kind: FieldKind::Plain,
            scale: 1.0,
            offset: 0.0,
            units,
            components: &[],
            subfields: &[],
        }
    }

    pub const fn scaled(
        number: u8,
        name: &'static str,
        scale: f64,
        offset: f64,
        units: &'static str,
    ) -> Self {
        let mut field = Self::plain(number, name, units);
        field.scale = scale;
        field.offset = offset;
        field
    }

    pub const fn date_time(number: u8, name: &'static str) -> Self {
        let mut field = Self::plain(number, name, "s");
        field.kind = FieldKind::DateTime;
        field
    }

    pub const fn enumerated(number: u8, name: &'static str, table: &'static EnumTable) -> Self {
        let mut field = Self::plain(number, name, "");
        field.kind = FieldKind::Enum(table);
        field
    }

    pub const fn coordinate(number: u8, name: &'static str) -> Self {
        let mut field = Self::plain(number, name, "semicircles");
        field.kind = FieldKind::Coordinate;
        field
    }

    pub const fn with_components(mut self, components: &'static [Component]) -> Self {
        self.components = components;
        self
    }

    pub const fn with_subfields(mut self, subfields: &'static [SubField]) -> Self {
        self.subfields = subfields;
        self
    }
}

/// A logical field bit-sliced out of a raw field.
///
/// Components are packed least significant bit first; an all-ones slice
/// marks the component as absent.
pub struct Component {
    pub name: &'static str,
    pub bits: u8,
    pub scale: f64,
    pub offset: f64,
    pub units: &'static str,
}

impl Component {
    pub const fn new(
        name: &'static str,
        bits: u8,
        scale: f64,
        offset: f64,
        units: &'static str,
    ) -> Self {
        Self {
            name,
            bits,
            scale,
            offset,
            units,
        }
    }
}

/// An alternative field interpretation selected by a sibling field's value.
pub struct SubField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub scale: f64,
    pub offset: f64,
    pub units: &'static str,
    /// Reference field number and raw value pairs; any match selects this
    /// interpretation.
    pub refs: &'static [(u8, u64)],
}

impl SubField {
    pub const fn new(
        name: &'static str,
        kind: FieldKind,
        scale: f64,
        offset: f64,
        units: &'static str,
        refs: &'static [(u8, u64)],
    ) -> Self {
        Self {
            name,
            kind,
            scale,
            offset,
            units,
            refs,
        }
    }
}

/// Look up the schema for a global message number.
pub fn message(number: u16) -> Option<&'static MessageSchema> {
    messages::MESSAGES
        .binary_search_by_key(&number, |m| m.number)
        .ok()
        .map(|i| &messages::MESSAGES[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted_for_lookup() {
        assert!(
            messages::MESSAGES
                .windows(2)
                .all(|w| w[0].number < w[1].number)
        );
    }

    #[test]
    fn label_tables_are_sorted_for_lookup() {
        for message in messages::MESSAGES {
            for field in message.fields {
                if let FieldKind::Enum(table) = field.kind {
                    assert!(
                        table.labels.windows(2).all(|w| w[0].0 < w[1].0),
                        "labels of {} out of order",
                        table.name
                    );
                }
            }
        }
    }

    #[test]
    fn known_lookups() {
        let record = message(20).unwrap();
        assert_eq!(record.name, "record");
        assert_eq!(record.field(5).unwrap().name, "distance");
        assert_eq!(record.field(5).unwrap().scale, 100.0);

        assert!(message(280).is_none());
    }
}
