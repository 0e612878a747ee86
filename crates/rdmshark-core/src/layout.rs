//! RDM wire-format constants (ANSI E1.20). Source of truth for field
//! sizes and sentinel values; no logic lives here.

/// RDM alternate start code.
pub const SC_RDM: u8 = 0xCC;
/// Sub start code for standard RDM messages.
pub const SC_SUB_MESSAGE: u8 = 0x01;

pub const START_CODE_SIZE: usize = 1;
pub const SUB_START_CODE_SIZE: usize = 1;
pub const LENGTH_SIZE: usize = 1;
/// Destination and source UIDs are 48-bit.
pub const UID_SIZE: usize = 6;
pub const TRANSACTION_NUMBER_SIZE: usize = 1;
pub const PORT_ID_SIZE: usize = 1;
pub const MESSAGE_COUNT_SIZE: usize = 1;
pub const SUB_DEVICE_SIZE: usize = 2;
pub const CHECKSUM_SIZE: usize = 2;

pub const COMMAND_CLASS_SIZE: usize = 1;
pub const PARAMETER_ID_SIZE: usize = 2;
pub const PARAMETER_DATA_LENGTH_SIZE: usize = 1;
/// Command class + parameter ID + parameter data length.
pub const MESSAGE_HEADER_SIZE: usize =
    COMMAND_CLASS_SIZE + PARAMETER_ID_SIZE + PARAMETER_DATA_LENGTH_SIZE;

/// All-ones 48-bit destination UID addressing every device.
pub const BROADCAST_UID: u64 = 0xFFFF_FFFF_FFFF;
/// Low 32 bits all ones: manufacturer-wide wildcard UID.
pub const MANUF_ALL_MASK: u64 = 0xFFFF_FFFF;
