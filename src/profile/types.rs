//! Enum label tables and protocol constants.

/// Seconds between the Unix epoch and the FIT epoch (1989-12-31T00:00:00Z).
pub const EPOCH_OFFSET_SECS: i64 = 631_065_600;

/// Labels for an enum-typed field, sorted by raw value.
pub struct EnumTable {
    pub name: &'static str,
    pub labels: &'static [(u64, &'static str)],
}

impl EnumTable {
    /// Look up the label for a raw value.
    pub fn label(&self, value: u64) -> Option<&'static str> {
        self.labels
            .binary_search_by_key(&value, |&(v, _)| v)
            .ok()
            .map(|i| self.labels[i].1)
    }
}

pub static FILE: EnumTable = EnumTable {
    name: "file",
    labels: &[
        (1, "device"),
        (2, "settings"),
        (3, "sport"),
        (4, "activity"),
        (5, "workout"),
        (6, "course"),
    ],
};

pub static MANUFACTURER: EnumTable = EnumTable {
    name: "manufacturer",
    labels: &[
        (1, "garmin"),
        (3, "zephyr"),
        (6, "srm"),
        (7, "quarq"),
        (13, "dynastream_oem"),
        (15, "dynastream"),
        (23, "suunto"),
        (32, "wahoo_fitness"),
        (255, "development"),
        (260, "zwift"),
        (265, "strava"),
    ],
};

pub static GARMIN_PRODUCT: EnumTable = EnumTable {
    name: "garmin_product",
    labels: &[
        (1, "hrm1"),
        (1036, "edge500"),
        (1124, "fr110"),
        (1551, "fenix"),
        (2067, "edge_520"),
        (2691, "fr935"),
        (2697, "fenix5"),
        (3121, "edge_530"),
    ],
};

pub static SPORT: EnumTable = EnumTable {
    name: "sport",
    labels: &[
        (0, "generic"),
        (1, "running"),
        (2, "cycling"),
        (3, "transition"),
        (4, "fitness_equipment"),
        (5, "swimming"),
        (6, "basketball"),
        (7, "soccer"),
        (8, "tennis"),
        (9, "american_football"),
        (10, "training"),
        (11, "walking"),
        (12, "cross_country_skiing"),
        (13, "alpine_skiing"),
        (14, "snowboarding"),
        (15, "rowing"),
        (16, "mountaineering"),
        (17, "hiking"),
        (18, "multisport"),
        (19, "paddling"),
    ],
};

pub static SUB_SPORT: EnumTable = EnumTable {
    name: "sub_sport",
    labels: &[
        (0, "generic"),
        (1, "treadmill"),
        (2, "street"),
        (3, "trail"),
        (4, "track"),
        (5, "spin"),
        (6, "indoor_cycling"),
        (7, "road"),
        (8, "mountain"),
        (9, "downhill"),
        (10, "recumbent"),
        (11, "cyclocross"),
        (12, "hand_cycling"),
        (13, "track_cycling"),
        (14, "indoor_rowing"),
        (15, "elliptical"),
        (16, "stair_climbing"),
        (17, "lap_swimming"),
        (18, "open_water"),
    ],
};

pub static EVENT: EnumTable = EnumTable {
    name: "event",
    labels: &[
        (0, "timer"),
        (3, "workout"),
        (4, "workout_step"),
        (5, "power_down"),
        (6, "power_up"),
        (7, "off_course"),
        (8, "session"),
        (9, "lap"),
        (10, "course_point"),
        (11, "battery"),
        (12, "virtual_partner_pace"),
        (42, "front_gear_change"),
        (43, "rear_gear_change"),
    ],
};

pub static EVENT_TYPE: EnumTable = EnumTable {
    name: "event_type",
    labels: &[
        (0, "start"),
        (1, "stop"),
        (2, "consecutive_depreciated"),
        (3, "marker"),
        (4, "stop_all"),
        (5, "begin_depreciated"),
        (6, "end_depreciated"),
        (7, "end_all_depreciated"),
        (8, "stop_disable"),
        (9, "stop_disable_all"),
    ],
};

pub static TIMER_TRIGGER: EnumTable = EnumTable {
    name: "timer_trigger",
    labels: &[(0, "manual"), (1, "auto"), (2, "fitness_equipment")],
};

pub static BATTERY_STATUS: EnumTable = EnumTable {
    name: "battery_status",
    labels: &[
        (1, "new"),
        (2, "good"),
        (3, "ok"),
        (4, "low"),
        (5, "critical"),
        (6, "charging"),
        (7, "unknown"),
    ],
};

pub static ACTIVITY: EnumTable = EnumTable {
    name: "activity",
    labels: &[(0, "manual"), (1, "auto_multi_sport")],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_lookup() {
        assert_eq!(SPORT.label(2), Some("cycling"));
        assert_eq!(SPORT.label(200), None);
        assert_eq!(MANUFACTURER.label(265), Some("strava"));
    }
}
