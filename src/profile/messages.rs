//! The message schema catalog, sorted by global message number.

use super::types::{
    ACTIVITY, BATTERY_STATUS, EVENT, EVENT_TYPE, FILE, GARMIN_PRODUCT, MANUFACTURER, SPORT,
    SUB_SPORT, TIMER_TRIGGER,
};
use super::{Component, FieldKind, FieldSchema, MessageSchema, SubField};

pub const FILE_ID: u16 = 0;
pub const SPORT_MESG: u16 = 12;
pub const SESSION: u16 = 18;
pub const LAP: u16 = 19;
pub const RECORD: u16 = 20;
pub const EVENT_MESG: u16 = 21;
pub const DEVICE_INFO: u16 = 23;
pub const ACTIVITY_MESG: u16 = 34;
pub const FILE_CREATOR: u16 = 49;
pub const FIELD_DESCRIPTION: u16 = 206;
pub const DEVELOPER_DATA_ID: u16 = 207;

// Manufacturers whose product numbers resolve through the Garmin catalog.
const GARMIN_MANUFACTURERS: &[(u8, u64)] = &[(1, 1), (1, 13), (1, 15)];
const GARMIN_MANUFACTURERS_DEVICE_INFO: &[(u8, u64)] = &[(2, 1), (2, 13), (2, 15)];

pub static MESSAGES: &[MessageSchema] = &[
    MessageSchema {
        number: FILE_ID,
        name: "file_id",
        fields: &[
            FieldSchema::enumerated(0, "type", &FILE),
            FieldSchema::enumerated(1, "manufacturer", &MANUFACTURER),
            FieldSchema::plain(2, "product", "").with_subfields(&[SubField::new(
                "garmin_product",
                FieldKind::Enum(&GARMIN_PRODUCT),
                1.0,
                0.0,
                "",
                GARMIN_MANUFACTURERS,
            )]),
            FieldSchema::plain(3, "serial_number", ""),
            FieldSchema::date_time(4, "time_created"),
            FieldSchema::plain(5, "number", ""),
            FieldSchema::plain(8, "product_name", ""),
        ],
    },
    MessageSchema {
        number: SPORT_MESG,
        name: "sport",
        fields: &[
            FieldSchema::enumerated(0, "sport", &SPORT),
            FieldSchema::enumerated(1, "sub_sport", &SUB_SPORT),
            FieldSchema::plain(3, "name", ""),
        ],
    },
    MessageSchema {
        number: SESSION,
        name: "session",
        fields: &[
            FieldSchema::date_time(253, "timestamp"),
            FieldSchema::enumerated(0, "event", &EVENT),
            FieldSchema::enumerated(1, "event_type", &EVENT_TYPE),
            FieldSchema::date_time(2, "start_time"),
            FieldSchema::coordinate(3, "start_position_lat"),
            FieldSchema::coordinate(4, "start_position_long"),
            FieldSchema::enumerated(5, "sport", &SPORT),
            FieldSchema::enumerated(6, "sub_sport", &SUB_SPORT),
            FieldSchema::scaled(7, "total_elapsed_time", 1000.0, 0.0, "s"),
            FieldSchema::scaled(8, "total_timer_time", 1000.0, 0.0, "s"),
            FieldSchema::scaled(9, "total_distance", 100.0, 0.0, "m"),
            FieldSchema::plain(10, "total_cycles", "cycles").with_subfields(&[SubField::new(
                "total_strides",
                FieldKind::Plain,
                1.0,
                0.0,
                "strides",
                &[(5, 1), (5, 11)],
            )]),
            FieldSchema::plain(11, "total_calories", "kcal"),
            FieldSchema::scaled(14, "avg_speed", 1000.0, 0.0, "m/s").with_components(&[
                Component::new("enhanced_avg_speed", 16, 1000.0, 0.0, "m/s"),
            ]),
            FieldSchema::scaled(15, "max_speed", 1000.0, 0.0, "m/s").with_components(&[
                Component::new("enhanced_max_speed", 16, 1000.0, 0.0, "m/s"),
            ]),
            FieldSchema::plain(16, "avg_heart_rate", "bpm"),
            FieldSchema::plain(17, "max_heart_rate", "bpm"),
            FieldSchema::plain(18, "avg_cadence", "rpm"),
            FieldSchema::plain(19, "max_cadence", "rpm"),
            FieldSchema::scaled(124, "enhanced_avg_speed", 1000.0, 0.0, "m/s"),
            FieldSchema::scaled(125, "enhanced_max_speed", 1000.0, 0.0, "m/s"),
        ],
    },
    MessageSchema {
        number: LAP,
        name: "lap",
        fields: &[
            FieldSchema::date_time(253, "timestamp"),
            FieldSchema::enumerated(0, "event", &EVENT),
            FieldSchema::enumerated(1, "event_type", &EVENT_TYPE),
            FieldSchema::date_time(2, "start_time"),
            FieldSchema::coordinate(3, "start_position_lat"),
            FieldSchema::coordinate(4, "start_position_long"),
            FieldSchema::coordinate(5, "end_position_lat"),
            FieldSchema::coordinate(6, "end_position_long"),
            FieldSchema::scaled(7, "total_elapsed_time", 1000.0, 0.0, "s"),
            FieldSchema::scaled(8, "total_timer_time", 1000.0, 0.0, "s"),
            FieldSchema::scaled(9, "total_distance", 100.0, 0.0, "m"),
            FieldSchema::plain(10, "total_cycles", "cycles").with_subfields(&[SubField::new(
                "total_strides",
                FieldKind::Plain,
                1.0,
                0.0,
                "strides",
                &[(25, 1), (25, 11)],
            )]),
            FieldSchema::scaled(13, "avg_speed", 1000.0, 0.0, "m/s").with_components(&[
                Component::new("enhanced_avg_speed", 16, 1000.0, 0.0, "m/s"),
            ]),
            FieldSchema::scaled(14, "max_speed", 1000.0, 0.0, "m/s").with_components(&[
                Component::new("enhanced_max_speed", 16, 1000.0, 0.0, "m/s"),
            ]),
            FieldSchema::plain(15, "avg_heart_rate", "bpm"),
            FieldSchema::plain(16, "max_heart_rate", "bpm"),
            FieldSchema::plain(17, "avg_cadence", "rpm"),
            FieldSchema::plain(18, "max_cadence", "rpm"),
            FieldSchema::enumerated(25, "sport", &SPORT),
            FieldSchema::scaled(110, "enhanced_avg_speed", 1000.0, 0.0, "m/s"),
            FieldSchema::scaled(111, "enhanced_max_speed", 1000.0, 0.0, "m/s"),
        ],
    },
    MessageSchema {
        number: RECORD,
        name: "record",
        fields: &[
            FieldSchema::date_time(253, "timestamp"),
            FieldSchema::coordinate(0, "position_lat"),
            FieldSchema::coordinate(1, "position_long"),
            FieldSchema::scaled(2, "altitude", 5.0, 500.0, "m").with_components(&[
                Component::new("enhanced_altitude", 16, 5.0, 500.0, "m"),
            ]),
            FieldSchema::plain(3, "heart_rate", "bpm"),
            FieldSchema::plain(4, "cadence", "rpm"),
            FieldSchema::scaled(5, "distance", 100.0, 0.0, "m"),
            FieldSchema::scaled(6, "speed", 1000.0, 0.0, "m/s").with_components(&[
                Component::new("enhanced_speed", 16, 1000.0, 0.0, "m/s"),
            ]),
            FieldSchema::plain(7, "power", "watts"),
            FieldSchema::plain(8, "compressed_speed_distance", "").with_components(&[
                Component::new("speed", 12, 100.0, 0.0, "m/s"),
                Component::new("distance", 12, 16.0, 0.0, "m"),
            ]),
            FieldSchema::scaled(9, "grade", 100.0, 0.0, "%"),
            FieldSchema::plain(13, "temperature", "C"),
            FieldSchema::scaled(53, "fractional_cadence", 128.0, 0.0, "rpm"),
            FieldSchema::scaled(73, "enhanced_speed", 1000.0, 0.0, "m/s"),
            FieldSchema::scaled(78, "enhanced_altitude", 5.0, 500.0, "m"),
        ],
    },
    MessageSchema {
        number: EVENT_MESG,
        name: "event",
        fields: &[
            FieldSchema::date_time(253, "timestamp"),
            FieldSchema::enumerated(0, "event", &EVENT),
            FieldSchema::enumerated(1, "event_type", &EVENT_TYPE),
            FieldSchema::plain(2, "data16", "")
                .with_components(&[Component::new("data", 16, 1.0, 0.0, "")]),
            FieldSchema::plain(3, "data", "").with_subfields(&[
                SubField::new(
                    "timer_trigger",
                    FieldKind::Enum(&TIMER_TRIGGER),
                    1.0,
                    0.0,
                    "",
                    &[(0, 0)],
                ),
                SubField::new("battery_level", FieldKind::Plain, 1000.0, 0.0, "V", &[(0, 11)]),
                SubField::new(
                    "gear_change_data",
                    FieldKind::Plain,
                    1.0,
                    0.0,
                    "",
                    &[(0, 42), (0, 43)],
                ),
            ]),
            FieldSchema::plain(4, "event_group", ""),
        ],
    },
    MessageSchema {
        number: DEVICE_INFO,
        name: "device_info",
        fields: &[
            FieldSchema::date_time(253, "timestamp"),
            FieldSchema::plain(0, "device_index", ""),
            FieldSchema::enumerated(2, "manufacturer", &MANUFACTURER),
            FieldSchema::plain(3, "serial_number", ""),
            FieldSchema::plain(4, "product", "").with_subfields(&[SubField::new(
                "garmin_product",
                FieldKind::Enum(&GARMIN_PRODUCT),
                1.0,
                0.0,
                "",
                GARMIN_MANUFACTURERS_DEVICE_INFO,
            )]),
            FieldSchema::scaled(5, "software_version", 100.0, 0.0, ""),
            FieldSchema::scaled(10, "battery_voltage", 256.0, 0.0, "V"),
            FieldSchema::enumerated(11, "battery_status", &BATTERY_STATUS),
            FieldSchema::plain(27, "product_name", ""),
        ],
    },
    MessageSchema {
        number: ACTIVITY_MESG,
        name: "activity",
        fields: &[
            FieldSchema::date_time(253, "timestamp"),
            FieldSchema::scaled(0, "total_timer_time", 1000.0, 0.0, "s"),
            FieldSchema::plain(1, "num_sessions", ""),
            FieldSchema::enumerated(2, "type", &ACTIVITY),
            FieldSchema::enumerated(3, "event", &EVENT),
            FieldSchema::enumerated(4, "event_type", &EVENT_TYPE),
            FieldSchema::date_time(5, "local_timestamp"),
        ],
    },
    MessageSchema {
        number: FILE_CREATOR,
        name: "file_creator",
        fields: &[
            FieldSchema::plain(0, "software_version", ""),
            FieldSchema::plain(1, "hardware_version", ""),
        ],
    },
    MessageSchema {
        number: FIELD_DESCRIPTION,
        name: "field_description",
        fields: &[
            FieldSchema::plain(0, "developer_data_index", ""),
            FieldSchema::plain(1, "field_definition_number", ""),
            FieldSchema::plain(2, "fit_base_type_id", ""),
            FieldSchema::plain(3, "field_name", ""),
            FieldSchema::plain(8, "units", ""),
            FieldSchema::plain(14, "native_mesg_num", ""),
            FieldSchema::plain(15, "native_field_num", ""),
        ],
    },
    MessageSchema {
        number: DEVELOPER_DATA_ID,
        name: "developer_data_id",
        fields: &[
            FieldSchema::plain(0, "developer_id", ""),
            FieldSchema::plain(1, "application_id", ""),
            FieldSchema::plain(3, "developer_data_index", ""),
            FieldSchema::plain(4, "application_version", ""),
        ],
    },
];
