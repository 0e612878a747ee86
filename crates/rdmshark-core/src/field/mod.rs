//! Composable binary-field descriptors.
//!
//! Fields consume an ordered slice of byte samples exactly once, track
//! their source span, and render through a uniform formatting interface.
//! Wire order is carried by explicit ordered field enumerations on the
//! containers ([`RdmPacket::fields`](crate::RdmPacket::fields),
//! [`MessageField::fields`](crate::MessageField::fields)), never by
//! declaration accident, and field identity is a closed tag enum per
//! structural level.

mod data;
mod scalar;

pub use data::{DataField, DataStyle};
pub use scalar::{EnumField, ScalarField};

use serde::{Deserialize, Serialize};

use crate::message::MessageField;
use crate::sample::Span;

/// Rendering mode for field values. Affects display only, never
/// decoding or validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    Dec,
    Hex,
    Bin,
}

/// Render `value` as decimal, zero-padded uppercase hex of width
/// `2 * size` digits, or zero-padded binary of width `8 * size` bits.
///
/// # Examples
/// ```
/// use rdmshark_core::{DisplayFormat, format_value};
///
/// assert_eq!(format_value(255, DisplayFormat::Hex, 2), "00FF");
/// assert_eq!(format_value(5, DisplayFormat::Bin, 1), "00000101");
/// ```
pub fn format_value(value: u64, fmt: DisplayFormat, size: usize) -> String {
    match fmt {
        DisplayFormat::Dec => format!("{value}"),
        DisplayFormat::Hex => format!("{value:0width$X}", width = size * 2),
        DisplayFormat::Bin => format!("{value:0width$b}", width = size * 8),
    }
}

/// Packet-level field identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketFieldKind {
    StartCode,
    SubStartCode,
    Length,
    Destination,
    Source,
    TransactionNumber,
    PortId,
    MessageCount,
    SubDevice,
    Data,
    Checksum,
}

impl PacketFieldKind {
    /// Short wire-layout label, as used in annotation long forms.
    pub fn wire_label(self) -> &'static str {
        match self {
            PacketFieldKind::StartCode => "START_CODE",
            PacketFieldKind::SubStartCode => "SUB_START_CODE",
            PacketFieldKind::Length => "LENGTH",
            PacketFieldKind::Destination => "DESTINATION",
            PacketFieldKind::Source => "SOURCE",
            PacketFieldKind::TransactionNumber => "TN",
            PacketFieldKind::PortId => "PORT_ID",
            PacketFieldKind::MessageCount => "COUNT",
            PacketFieldKind::SubDevice => "SUB_DEVICE",
            PacketFieldKind::Data => "DATA",
            PacketFieldKind::Checksum => "CHECKSUM",
        }
    }

    /// Human-readable label.
    pub fn display_label(self) -> &'static str {
        match self {
            PacketFieldKind::StartCode => "Start Code",
            PacketFieldKind::SubStartCode => "Sub Start Code",
            PacketFieldKind::Length => "Length",
            PacketFieldKind::Destination => "Destination",
            PacketFieldKind::Source => "Source",
            PacketFieldKind::TransactionNumber => "Transaction Number",
            PacketFieldKind::PortId => "Port ID",
            PacketFieldKind::MessageCount => "Message Count",
            PacketFieldKind::SubDevice => "Sub-Device",
            PacketFieldKind::Data => "Data",
            PacketFieldKind::Checksum => "Checksum",
        }
    }
}

/// Message-level field identity, distinct from the packet level so the
/// two tag sets cannot collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFieldKind {
    CommandClass,
    ParameterId,
    ParameterDataLength,
    ParameterData,
}

impl MessageFieldKind {
    pub fn wire_label(self) -> &'static str {
        match self {
            MessageFieldKind::CommandClass => "CC",
            MessageFieldKind::ParameterId => "PID",
            MessageFieldKind::ParameterDataLength => "PDL",
            MessageFieldKind::ParameterData => "PD",
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            MessageFieldKind::CommandClass => "Command Class",
            MessageFieldKind::ParameterId => "Parameter ID",
            MessageFieldKind::ParameterDataLength => "Parameter Data Length",
            MessageFieldKind::ParameterData => "Parameter Data",
        }
    }
}

/// Field identity across both structural levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldTag {
    Packet(PacketFieldKind),
    Message(MessageFieldKind),
}

impl FieldTag {
    pub fn wire_label(self) -> &'static str {
        match self {
            FieldTag::Packet(kind) => kind.wire_label(),
            FieldTag::Message(kind) => kind.wire_label(),
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            FieldTag::Packet(kind) => kind.display_label(),
            FieldTag::Message(kind) => kind.display_label(),
        }
    }
}

/// Borrowed view over one field of a container, in wire order.
///
/// Absent optional fields (a zero-length parameter-data slot) never
/// appear in a container's enumeration, so consumers see only fields
/// that occupy bytes.
#[derive(Debug, Clone, Copy)]
pub enum FieldRef<'a> {
    Scalar(&'a ScalarField),
    Enum(&'a EnumField),
    Data(&'a DataField),
    Message(&'a MessageField),
}

impl<'a> FieldRef<'a> {
    pub fn tag(&self) -> FieldTag {
        match self {
            FieldRef::Scalar(field) => field.tag(),
            FieldRef::Enum(field) => field.tag(),
            FieldRef::Data(field) => field.tag(),
            FieldRef::Message(field) => field.tag(),
        }
    }

    /// Declared or resolved byte size; `None` while unresolved.
    pub fn size(&self) -> Option<usize> {
        match self {
            FieldRef::Scalar(field) => field.size(),
            FieldRef::Enum(field) => field.size(),
            FieldRef::Data(field) => field.size(),
            FieldRef::Message(field) => field.size(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            FieldRef::Scalar(field) => field.span(),
            FieldRef::Enum(field) => field.span(),
            FieldRef::Data(field) => field.span(),
            FieldRef::Message(field) => field.span(),
        }
    }

    pub fn format(&self, fmt: DisplayFormat) -> String {
        match self {
            FieldRef::Scalar(field) => field.format(fmt),
            FieldRef::Enum(field) => field.format(fmt),
            FieldRef::Data(field) => field.format(fmt),
            FieldRef::Message(field) => field.format(fmt),
        }
    }
}

/// Sum of the sizes of all fields whose size is already resolved.
/// Unresolved fields contribute nothing until a length field fixes them.
pub(crate) fn static_size(fields: &[FieldRef<'_>]) -> usize {
    fields.iter().filter_map(FieldRef::size).sum()
}
