use serde::{Deserialize, Serialize};

use crate::field::{
    DisplayFormat, FieldRef, FieldTag, MessageFieldKind, PacketFieldKind,
};
use crate::packet::RdmPacket;

/// Category tag for one annotation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    PacketType,
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
    CommandClass,
    ParameterId,
    ParameterDataLength,
    ParameterData,
    ChecksumPass,
    ChecksumFail,
}

impl AnnotationKind {
    fn for_tag(tag: FieldTag) -> AnnotationKind {
        match tag {
            FieldTag::Packet(kind) => match kind {
                PacketFieldKind::StartCode => AnnotationKind::StartCode,
                PacketFieldKind::SubStartCode => AnnotationKind::SubStartCode,
                PacketFieldKind::Length => AnnotationKind::Length,
                PacketFieldKind::Destination => AnnotationKind::Destination,
                PacketFieldKind::Source => AnnotationKind::Source,
                PacketFieldKind::TransactionNumber => AnnotationKind::TransactionNumber,
                PacketFieldKind::PortId => AnnotationKind::PortId,
                PacketFieldKind::MessageCount => AnnotationKind::MessageCount,
                PacketFieldKind::SubDevice => AnnotationKind::SubDevice,
                PacketFieldKind::Data => AnnotationKind::Data,
                PacketFieldKind::Checksum => AnnotationKind::Checksum,
            },
            FieldTag::Message(kind) => match kind {
                MessageFieldKind::CommandClass => AnnotationKind::CommandClass,
                MessageFieldKind::ParameterId => AnnotationKind::ParameterId,
                MessageFieldKind::ParameterDataLength => AnnotationKind::ParameterDataLength,
                MessageFieldKind::ParameterData => AnnotationKind::ParameterData,
            },
        }
    }
}

/// One annotation event for the host visualization channel: a category
/// tag, the source span, and label variants ordered longest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub ss: u64,
    pub es: u64,
    pub labels: Vec<String>,
}

/// Build the annotation stream for a decoded packet: one whole-packet
/// event, one event per present field (message sub-fields included),
/// and a checksum pass/fail event over the checksum span.
///
/// # Examples
/// ```
/// use rdmshark_core::{ByteSample, DisplayFormat, annotate, decode_packet};
///
/// let mut bytes = vec![
///     0xCC, 0x01, 0x18, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x1A,
///     0x2B, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x20, 0x00,
///     0x60, 0x00,
/// ];
/// let sum: u64 = bytes.iter().map(|&b| u64::from(b)).sum();
/// bytes.push((sum >> 8) as u8);
/// bytes.push((sum & 0xFF) as u8);
///
/// let packet = decode_packet(&ByteSample::sequence(&bytes))?.expect("rdm packet");
/// let annotations = annotate(&packet, DisplayFormat::Hex);
/// assert!(annotations.iter().any(|a| a.labels.contains(&"BROADCAST".to_string())));
/// # Ok::<(), rdmshark_core::DecodeError>(())
/// ```
pub fn annotate(packet: &RdmPacket, fmt: DisplayFormat) -> Vec<Annotation> {
    let mut annotations = Vec::new();

    if let (Some(first), Some(last)) = (packet.start_code().span(), packet.checksum().span()) {
        annotations.push(Annotation {
            kind: AnnotationKind::PacketType,
            ss: first.ss,
            es: last.es,
            labels: vec![
                "RDM Packet".to_string(),
                "Packet".to_string(),
                "P".to_string(),
            ],
        });
    }

    for field in packet.fields() {
        push_field(&mut annotations, &field, fmt);
        if let FieldRef::Message(message) = field {
            for sub_field in message.fields() {
                push_field(&mut annotations, &sub_field, fmt);
            }
        }
    }

    if let Some(span) = packet.checksum().span() {
        let (kind, label) = if packet.is_checksum_valid() {
            (AnnotationKind::ChecksumPass, "Pass")
        } else {
            (AnnotationKind::ChecksumFail, "Fail")
        };
        annotations.push(Annotation {
            kind,
            ss: span.ss,
            es: span.es,
            labels: vec![
                format!("RDM Checksum {label}"),
                format!("Checksum {label}"),
                label.to_string(),
                label[..1].to_string(),
            ],
        });
    }

    annotations
}

fn push_field(annotations: &mut Vec<Annotation>, field: &FieldRef<'_>, fmt: DisplayFormat) {
    let Some(span) = field.span() else {
        return;
    };
    let value = field.format(fmt);
    annotations.push(Annotation {
        kind: AnnotationKind::for_tag(field.tag()),
        ss: span.ss,
        es: span.es,
        labels: vec![format!("{}: {}", field.tag().wire_label(), value), value],
    });
}
