//! Protocol enumeration tables (ANSI E1.20).
//!
//! Each table is an explicit, precomputed bidirectional mapping built
//! once as a static. Lookups return `Option` so callers choose the
//! fallback for unregistered values or names.

/// Read-only value↔name table for a protocol enumeration.
///
/// # Examples
/// ```
/// use rdmshark_core::tables::COMMAND_CLASSES;
///
/// assert_eq!(COMMAND_CLASSES.get_name(0x20), Some("GET"));
/// assert_eq!(COMMAND_CLASSES.get_value("GET"), Some(0x20));
/// assert_eq!(COMMAND_CLASSES.get_name(0x99), None);
/// ```
#[derive(Debug)]
pub struct EnumTable {
    entries: &'static [(u64, &'static str)],
}

impl EnumTable {
    pub const fn new(entries: &'static [(u64, &'static str)]) -> Self {
        Self { entries }
    }

    /// Name registered for `value`. First match wins if duplicates were
    /// ever registered (none are in practice).
    pub fn get_name(&self, value: u64) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, name)| *name)
    }

    /// Value registered for `name`.
    pub fn get_value(&self, name: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(value, _)| *value)
    }

    pub fn entries(&self) -> impl Iterator<Item = (u64, &'static str)> {
        self.entries.iter().copied()
    }
}

/// DMX512 alternate start codes understood by this decoder.
pub static START_CODES: EnumTable = EnumTable::new(&[(0xCC, "RDM")]);

/// RDM command classes.
pub static COMMAND_CLASSES: EnumTable = EnumTable::new(&[
    (0x10, "DISCOVERY"),
    (0x11, "DISCOVERY_RESPONSE"),
    (0x20, "GET"),
    (0x21, "GET_RESPONSE"),
    (0x30, "SET"),
    (0x31, "SET_RESPONSE"),
]);

/// RDM response types carried in the port-ID slot of responses.
pub static RESPONSE_TYPES: EnumTable = EnumTable::new(&[
    (0x00, "ACK"),
    (0x01, "ACK_TIMER"),
    (0x02, "NACK_REASON"),
    (0x03, "ACK_OVERFLOW"),
]);

/// E1.20 parameter IDs, the subset named by the standard itself.
pub static PIDS: EnumTable = EnumTable::new(&[
    (0x0001, "DISC_UNIQUE_BRANCH"),
    (0x0002, "DISC_MUTE"),
    (0x0003, "DISC_UN_MUTE"),
    (0x0010, "PROXIED_DEVICES"),
    (0x0011, "PROXIED_DEVICE_COUNT"),
    (0x0015, "COMMS_STATUS"),
    (0x0020, "QUEUED_MESSAGE"),
    (0x0030, "STATUS_MESSAGES"),
    (0x0031, "STATUS_ID_DESCRIPTION"),
    (0x0032, "CLEAR_STATUS_ID"),
    (0x0033, "SUB_DEVICE_STATUS_REPORT_THRESHOLD"),
    (0x0050, "SUPPORTED_PARAMETERS"),
    (0x0051, "PARAMETER_DESCRIPTION"),
    (0x0060, "DEVICE_INFO"),
    (0x0070, "PRODUCT_DETAIL_ID_LIST"),
    (0x0080, "DEVICE_MODEL_DESCRIPTION"),
    (0x0081, "MANUFACTURER_LABEL"),
    (0x0082, "DEVICE_LABEL"),
    (0x0090, "FACTORY_DEFAULTS"),
    (0x00A0, "LANGUAGE_CAPABILITIES"),
    (0x00B0, "LANGUAGE"),
    (0x00C0, "SOFTWARE_VERSION_LABEL"),
    (0x00C1, "BOOT_SOFTWARE_VERSION_ID"),
    (0x00C2, "BOOT_SOFTWARE_VERSION_LABEL"),
    (0x00E0, "DMX_PERSONALITY"),
    (0x00E1, "DMX_PERSONALITY_DESCRIPTION"),
    (0x00F0, "DMX_START_ADDRESS"),
    (0x0120, "SLOT_INFO"),
    (0x0121, "SLOT_DESCRIPTION"),
    (0x0122, "DEFAULT_SLOT_VALUE"),
    (0x0200, "SENSOR_DEFINITION"),
    (0x0201, "SENSOR_VALUE"),
    (0x0202, "RECORD_SENSORS"),
    (0x0400, "DEVICE_HOURS"),
    (0x0401, "LAMP_HOURS"),
    (0x0402, "LAMP_STRIKES"),
    (0x0403, "LAMP_STATE"),
    (0x0404, "LAMP_ON_MODE"),
    (0x0405, "DEVICE_POWER_CYCLES"),
    (0x0500, "DISPLAY_INVERT"),
    (0x0501, "DISPLAY_LEVEL"),
    (0x0600, "PAN_INVERT"),
    (0x0601, "TILT_INVERT"),
    (0x0602, "PAN_TILT_SWAP"),
    (0x0603, "REAL_TIME_CLOCK"),
    (0x1000, "IDENTIFY_DEVICE"),
    (0x1001, "RESET_DEVICE"),
    (0x1010, "POWER_STATE"),
    (0x1020, "PERFORM_SELFTEST"),
    (0x1021, "SELF_TEST_DESCRIPTION"),
    (0x1030, "CAPTURE_PRESET"),
    (0x1031, "PRESET_PLAYBACK"),
]);
