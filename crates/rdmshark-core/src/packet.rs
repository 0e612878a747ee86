use crate::error::DecodeError;
use crate::field::{DataField, FieldRef, FieldTag, PacketFieldKind, ScalarField, static_size};
use crate::layout;
use crate::message::MessageField;
use crate::sample::ByteSample;

/// A fully decoded RDM packet.
///
/// Constructed once by [`RdmPacket::parse`] and immutable afterward.
/// Fields are walked in wire order with an advancing cursor; the data
/// field's size is derived from the declared length field before the
/// cursor reaches it, so every later field consumes exactly the slice
/// it owns. The full raw byte sequence is retained for checksum
/// arithmetic.
#[derive(Debug, Clone)]
pub struct RdmPacket {
    start_code: ScalarField,
    sub_start_code: ScalarField,
    length: ScalarField,
    destination: DataField,
    source: DataField,
    transaction_number: ScalarField,
    port_id: ScalarField,
    message_count: ScalarField,
    sub_device: ScalarField,
    data: MessageField,
    checksum: ScalarField,
    raw: Vec<u8>,
}

impl RdmPacket {
    fn empty() -> Self {
        use PacketFieldKind as Kind;
        Self {
            start_code: ScalarField::new(FieldTag::Packet(Kind::StartCode), layout::START_CODE_SIZE),
            sub_start_code: ScalarField::new(
                FieldTag::Packet(Kind::SubStartCode),
                layout::SUB_START_CODE_SIZE,
            ),
            length: ScalarField::new(FieldTag::Packet(Kind::Length), layout::LENGTH_SIZE),
            destination: DataField::destination(FieldTag::Packet(Kind::Destination)),
            source: DataField::new(FieldTag::Packet(Kind::Source), layout::UID_SIZE),
            transaction_number: ScalarField::new(
                FieldTag::Packet(Kind::TransactionNumber),
                layout::TRANSACTION_NUMBER_SIZE,
            ),
            port_id: ScalarField::new(FieldTag::Packet(Kind::PortId), layout::PORT_ID_SIZE),
            message_count: ScalarField::new(
                FieldTag::Packet(Kind::MessageCount),
                layout::MESSAGE_COUNT_SIZE,
            ),
            sub_device: ScalarField::new(FieldTag::Packet(Kind::SubDevice), layout::SUB_DEVICE_SIZE),
            data: MessageField::unresolved(),
            checksum: ScalarField::new(FieldTag::Packet(Kind::Checksum), layout::CHECKSUM_SIZE),
            raw: Vec::new(),
        }
    }

    /// Decode one packet from an ordered, fully buffered sample slice.
    ///
    /// Staged load: the fixed prefix up to the length field first, then
    /// the data field size is resolved as `length − (static size −
    /// checksum size)`, then the remaining fields. Failure at any stage
    /// discards the instance; a partially loaded packet is never
    /// returned.
    pub fn parse(samples: &[ByteSample]) -> Result<RdmPacket, DecodeError> {
        let mut packet = RdmPacket::empty();
        packet.raw = samples.iter().map(|sample| sample.value).collect();

        let mut cursor = 0usize;
        packet
            .start_code
            .load(take(samples, &mut cursor, layout::START_CODE_SIZE)?);
        packet
            .sub_start_code
            .load(take(samples, &mut cursor, layout::SUB_START_CODE_SIZE)?);
        packet
            .length
            .load(take(samples, &mut cursor, layout::LENGTH_SIZE)?);

        // The declared length covers everything up to and including the
        // message data; the data size is what remains after the fixed
        // fields (checksum excluded, it trails the declared length).
        let overhead = packet.static_size() - layout::CHECKSUM_SIZE;
        let declared = packet.length.value() as usize;
        if declared < overhead + layout::MESSAGE_HEADER_SIZE {
            return Err(DecodeError::LengthTooSmall {
                length: declared,
                minimum: overhead + layout::MESSAGE_HEADER_SIZE,
            });
        }
        packet.data.set_size(declared - overhead);

        packet
            .destination
            .load(take(samples, &mut cursor, layout::UID_SIZE)?);
        packet
            .source
            .load(take(samples, &mut cursor, layout::UID_SIZE)?);
        packet
            .transaction_number
            .load(take(samples, &mut cursor, layout::TRANSACTION_NUMBER_SIZE)?);
        packet
            .port_id
            .load(take(samples, &mut cursor, layout::PORT_ID_SIZE)?);
        packet
            .message_count
            .load(take(samples, &mut cursor, layout::MESSAGE_COUNT_SIZE)?);
        packet
            .sub_device
            .load(take(samples, &mut cursor, layout::SUB_DEVICE_SIZE)?);

        let data_size = declared - overhead;
        packet.data.load(take(samples, &mut cursor, data_size)?)?;
        packet
            .checksum
            .load(take(samples, &mut cursor, layout::CHECKSUM_SIZE)?);

        Ok(packet)
    }

    pub fn start_code(&self) -> &ScalarField {
        &self.start_code
    }

    pub fn sub_start_code(&self) -> &ScalarField {
        &self.sub_start_code
    }

    pub fn length(&self) -> &ScalarField {
        &self.length
    }

    pub fn destination(&self) -> &DataField {
        &self.destination
    }

    pub fn source(&self) -> &DataField {
        &self.source
    }

    pub fn transaction_number(&self) -> &ScalarField {
        &self.transaction_number
    }

    pub fn port_id(&self) -> &ScalarField {
        &self.port_id
    }

    pub fn message_count(&self) -> &ScalarField {
        &self.message_count
    }

    pub fn sub_device(&self) -> &ScalarField {
        &self.sub_device
    }

    pub fn data(&self) -> &MessageField {
        &self.data
    }

    pub fn checksum(&self) -> &ScalarField {
        &self.checksum
    }

    /// Every byte consumed for this packet, in wire order.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Packet-level fields in wire order.
    pub fn fields(&self) -> Vec<FieldRef<'_>> {
        vec![
            FieldRef::Scalar(&self.start_code),
            FieldRef::Scalar(&self.sub_start_code),
            FieldRef::Scalar(&self.length),
            FieldRef::Data(&self.destination),
            FieldRef::Data(&self.source),
            FieldRef::Scalar(&self.transaction_number),
            FieldRef::Scalar(&self.port_id),
            FieldRef::Scalar(&self.message_count),
            FieldRef::Scalar(&self.sub_device),
            FieldRef::Message(&self.data),
            FieldRef::Scalar(&self.checksum),
        ]
    }

    /// Sum of the sizes of all fields whose size is resolved.
    pub fn static_size(&self) -> usize {
        static_size(&self.fields())
    }

    /// Sum every raw byte except the two-byte checksum trailer and
    /// compare against the checksum value. The accumulation is not
    /// reduced modulo 65536; this matches the observed wire behavior
    /// for packets whose byte sum stays below 0x10000.
    pub fn is_checksum_valid(&self) -> bool {
        let end = self.raw.len().saturating_sub(layout::CHECKSUM_SIZE);
        let sum: u64 = self.raw[..end].iter().map(|&byte| u64::from(byte)).sum();
        sum == self.checksum.value()
    }
}

/// Decode one RDM packet from the upstream decoder's sample sequence.
///
/// Returns `Ok(None)` when the input is not an RDM packet at all: no
/// samples, an untrusted leading sample, or a start code other than
/// `0xCC`. Structural failures in something that does look like an RDM
/// packet surface as [`DecodeError`].
pub fn decode_packet(samples: &[ByteSample]) -> Result<Option<RdmPacket>, DecodeError> {
    let Some(first) = samples.first() else {
        return Ok(None);
    };
    if !first.valid || first.value != layout::SC_RDM {
        return Ok(None);
    }
    RdmPacket::parse(samples).map(Some)
}

fn take<'a>(
    samples: &'a [ByteSample],
    cursor: &mut usize,
    size: usize,
) -> Result<&'a [ByteSample], DecodeError> {
    let end = *cursor + size;
    let slice = samples.get(*cursor..end).ok_or(DecodeError::TooShort {
        needed: end,
        actual: samples.len(),
    })?;
    *cursor = end;
    Ok(slice)
}

#[cfg(test)]
mod tests {
    use super::{RdmPacket, decode_packet};
    use crate::error::DecodeError;
    use crate::field::DisplayFormat;
    use crate::sample::ByteSample;

    fn with_checksum(mut bytes: Vec<u8>) -> Vec<u8> {
        let sum: u64 = bytes.iter().map(|&b| u64::from(b)).sum();
        bytes.push((sum >> 8) as u8);
        bytes.push((sum & 0xFF) as u8);
        bytes
    }

    fn get_device_info_bytes() -> Vec<u8> {
        with_checksum(vec![
            0xCC, 0x01, 0x18, // start, sub-start, length = 24
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // destination: broadcast
            0x00, 0x1A, 0x2B, 0x00, 0x00, 0x01, // source UID
            0x00, 0x01, 0x00, // tn, port, count
            0x00, 0x00, // sub-device
            0x20, 0x00, 0x60, 0x00, // GET DEVICE_INFO, pdl = 0
        ])
    }

    #[test]
    fn parse_resolves_data_size_from_length() {
        let packet = RdmPacket::parse(&ByteSample::sequence(&get_device_info_bytes())).unwrap();
        assert_eq!(packet.length().value(), 24);
        assert_eq!(packet.data().size(), Some(4));
        assert_eq!(packet.static_size(), 26);
    }

    #[test]
    fn parse_walks_fields_in_wire_order() {
        let packet = RdmPacket::parse(&ByteSample::sequence(&get_device_info_bytes())).unwrap();
        assert_eq!(packet.start_code().value(), 0xCC);
        assert_eq!(packet.sub_start_code().value(), 0x01);
        assert_eq!(packet.destination().format(DisplayFormat::Hex), "BROADCAST");
        assert_eq!(packet.source().compact(), Some(0x001A_2B00_0001));
        assert_eq!(packet.transaction_number().value(), 0);
        assert_eq!(packet.port_id().value(), 1);
        assert_eq!(packet.message_count().value(), 0);
        assert_eq!(packet.sub_device().value(), 0);
        assert_eq!(packet.data().command_class().format(DisplayFormat::Hex), "GET");
        assert_eq!(packet.data().pid().format(DisplayFormat::Hex), "DEVICE_INFO");
        assert!(packet.data().pd().is_none());
    }

    #[test]
    fn field_spans_are_contiguous() {
        let packet = RdmPacket::parse(&ByteSample::sequence(&get_device_info_bytes())).unwrap();
        let fields = packet.fields();
        let mut expected_start = 0u64;
        for field in &fields {
            let span = field.span().unwrap();
            assert_eq!(span.ss, expected_start);
            expected_start = span.es;
        }
        assert_eq!(expected_start, packet.raw().len() as u64);
    }

    #[test]
    fn checksum_validates_against_byte_sum() {
        let packet = RdmPacket::parse(&ByteSample::sequence(&get_device_info_bytes())).unwrap();
        assert!(packet.is_checksum_valid());

        let mut corrupted = get_device_info_bytes();
        let last = corrupted.len() - 1;
        corrupted[last] ^= 0x01;
        let packet = RdmPacket::parse(&ByteSample::sequence(&corrupted)).unwrap();
        assert!(!packet.is_checksum_valid());
        // A checksum failure is still a fully decoded packet.
        assert_eq!(packet.data().pid().format(DisplayFormat::Hex), "DEVICE_INFO");
    }

    #[test]
    fn truncated_packet_is_too_short() {
        let bytes = get_device_info_bytes();
        let err = RdmPacket::parse(&ByteSample::sequence(&bytes[..10])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("packet too short"));
    }

    #[test]
    fn undersized_length_field_is_rejected() {
        let mut bytes = get_device_info_bytes();
        bytes[2] = 0x10; // below the 20-byte fixed overhead + header
        let err = RdmPacket::parse(&ByteSample::sequence(&bytes)).unwrap_err();
        match err {
            DecodeError::LengthTooSmall { length, minimum } => {
                assert_eq!(length, 0x10);
                assert_eq!(minimum, 24);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_declines_non_rdm_input() {
        assert!(decode_packet(&[]).unwrap().is_none());

        let wrong_start = ByteSample::sequence(&[0x00, 0x01, 0x18]);
        assert!(decode_packet(&wrong_start).unwrap().is_none());

        let mut untrusted = ByteSample::sequence(&get_device_info_bytes());
        untrusted[0].valid = false;
        assert!(decode_packet(&untrusted).unwrap().is_none());
    }

    #[test]
    fn decode_accepts_rdm_input() {
        let packet = decode_packet(&ByteSample::sequence(&get_device_info_bytes()))
            .unwrap()
            .unwrap();
        assert!(packet.is_checksum_valid());
    }
}
