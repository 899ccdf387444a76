//! Developer field descriptions collected from the stream.

use std::collections::HashMap;

use crate::wire::definition::BaseType;

use super::raw::{Raw, RawField};

// Field numbers within the field_description message.
const DEVELOPER_DATA_INDEX: u8 = 0;
const FIELD_DEFINITION_NUMBER: u8 = 1;
const FIT_BASE_TYPE_ID: u8 = 2;
const FIELD_NAME: u8 = 3;
const UNITS: u8 = 8;

/// Metadata for one developer field, from a field_description message.
#[derive(Debug, Default)]
pub(crate) struct FieldDescription {
    pub name: Option<String>,
    pub units: Option<String>,
    pub base_type: Option<BaseType>,
}

/// Developer field metadata keyed by data index and field number.
///
/// Descriptions arrive as ordinary data messages and apply to developer
/// fields decoded later in the same stream.
#[derive(Debug, Default)]
pub(crate) struct DeveloperRegistry {
    descriptions: HashMap<(u8, u8), FieldDescription>,
}

impl DeveloperRegistry {
    /// Record metadata from a field_description message's raw fields.
    pub fn register(&mut self, raws: &[RawField]) {
        let mut index = None;
        let mut number = None;
        let mut description = FieldDescription::default();

        for field in raws {
            match field.definition.number {
                DEVELOPER_DATA_INDEX => {
                    index = field.value.as_unsigned().map(|v| v as u8);
                }
                FIELD_DEFINITION_NUMBER => {
                    number = field.value.as_unsigned().map(|v| v as u8);
                }
                FIT_BASE_TYPE_ID => {
                    description.base_type = field
                        .value
                        .as_unsigned()
                        .and_then(|v| BaseType::from_byte(v as u8));
                }
                FIELD_NAME => {
                    if let Raw::Text(name) = &field.value {
                        description.name = Some(name.clone());
                    }
                }
                UNITS => {
                    if let Raw::Text(units) = &field.value {
                        description.units = Some(units.clone());
                    }
                }
                _ => {}
            }
        }

        if let (Some(index), Some(number)) = (index, number) {
            self.descriptions.insert((index, number), description);
        }
    }

    /// Look up the description for a developer field.
    pub fn describe(&self, index: u8, number: u8) -> Option<&FieldDescription> {
        self.descriptions.get(&(index, number))
    }
}
