use rdmshark_core::{
    AnnotationKind, ByteSample, DecodeError, DisplayFormat, annotate, decode_packet, layout,
};

fn with_checksum(mut bytes: Vec<u8>) -> Vec<u8> {
    let sum: u64 = bytes.iter().map(|&b| u64::from(b)).sum();
    bytes.push((sum >> 8) as u8);
    bytes.push((sum & 0xFF) as u8);
    bytes
}

fn get_device_info_packet() -> Vec<u8> {
    with_checksum(vec![
        0xCC, 0x01, 0x18, // start, sub-start, length = 24
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // destination: broadcast
        0x00, 0x1A, 0x2B, 0x00, 0x00, 0x01, // source
        0x00, 0x01, 0x00, // tn, port, count
        0x00, 0x00, // sub-device
        0x20, 0x00, 0x60, 0x00, // GET DEVICE_INFO, pdl = 0
    ])
}

#[test]
fn end_to_end_get_device_info() {
    let samples = ByteSample::sequence(&get_device_info_packet());
    let packet = decode_packet(&samples).unwrap().expect("rdm packet");

    assert_eq!(packet.start_code().value(), u64::from(layout::SC_RDM));
    assert_eq!(
        packet.sub_start_code().value(),
        u64::from(layout::SC_SUB_MESSAGE)
    );
    assert_eq!(packet.destination().format(DisplayFormat::Hex), "BROADCAST");
    assert_eq!(
        packet.source().format(DisplayFormat::Hex),
        "00 1A 2B 00 00 01"
    );
    assert_eq!(packet.data().size(), Some(4));
    assert_eq!(
        packet.data().command_class().format(DisplayFormat::Hex),
        "GET"
    );
    assert_eq!(packet.data().pid().format(DisplayFormat::Hex), "DEVICE_INFO");
    assert!(packet.data().pd().is_none());
    assert!(packet.is_checksum_valid());

    let annotations = annotate(&packet, DisplayFormat::Hex);
    assert_eq!(
        annotations.last().unwrap().kind,
        AnnotationKind::ChecksumPass
    );
}

#[test]
fn size_invariant_holds_for_varied_pdl() {
    for pdl in [0u8, 1, 4, 32] {
        let mut bytes = vec![
            0xCC,
            0x01,
            24 + pdl, // length
            0x00,
            0x1A,
            0x2B,
            0x00,
            0x00,
            0x02,
            0x00,
            0x1A,
            0x2B,
            0x00,
            0x00,
            0x01,
            0x05,
            0x01,
            0x00,
            0x00,
            0x00,
            0x21, // GET_RESPONSE
            0x00,
            0x60,
            pdl,
        ];
        bytes.extend(std::iter::repeat_n(0xAA, pdl as usize));
        let bytes = with_checksum(bytes);

        let packet = decode_packet(&ByteSample::sequence(&bytes))
            .unwrap()
            .expect("rdm packet");
        let length = packet.length().value() as usize;
        assert_eq!(packet.data().size(), Some(length - 20));
        assert_eq!(packet.static_size(), length + 2);
        assert!(packet.is_checksum_valid());

        match pdl {
            0 => assert!(packet.data().pd().is_none()),
            n => assert_eq!(packet.data().pd().unwrap().size(), Some(n as usize)),
        }
    }
}

#[test]
fn non_rdm_inputs_yield_no_packet() {
    // Empty input.
    assert!(decode_packet(&[]).unwrap().is_none());

    // DMX null start code.
    let dimmer_frame = ByteSample::sequence(&[0x00, 0x10, 0x20, 0x30]);
    assert!(decode_packet(&dimmer_frame).unwrap().is_none());

    // Untrusted leading sample.
    let mut samples = ByteSample::sequence(&get_device_info_packet());
    samples[0].valid = false;
    assert!(decode_packet(&samples).unwrap().is_none());
}

#[test]
fn structural_failures_are_errors_not_silence() {
    // Packet cut off inside the source UID.
    let bytes = get_device_info_packet();
    let err = decode_packet(&ByteSample::sequence(&bytes[..12])).unwrap_err();
    assert!(matches!(err, DecodeError::TooShort { .. }));

    // PDL pointing past the end of the message region.
    let mut bytes = get_device_info_packet();
    bytes[23] = 0x10; // pdl, but data region only holds the header
    let bytes = with_checksum(bytes[..24].to_vec());
    let err = decode_packet(&ByteSample::sequence(&bytes)).unwrap_err();
    assert!(matches!(err, DecodeError::PdlOverrun { pdl: 0x10, .. }));
}

#[test]
fn checksum_mismatch_is_a_decoded_outcome() {
    let mut bytes = get_device_info_packet();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x04;

    let packet = decode_packet(&ByteSample::sequence(&bytes))
        .unwrap()
        .expect("rdm packet");
    assert!(!packet.is_checksum_valid());
    // The packet stays fully inspectable.
    assert_eq!(packet.data().pid().format(DisplayFormat::Hex), "DEVICE_INFO");

    let annotations = annotate(&packet, DisplayFormat::Hex);
    assert_eq!(
        annotations.last().unwrap().kind,
        AnnotationKind::ChecksumFail
    );
}

// The checksum comparison sums bytes without reducing modulo 0x10000.
// With a one-byte length field the pre-checksum region holds at most
// 255 bytes, so the sum is bounded below 0x10000 and the literal and
// modular semantics cannot disagree on any well-formed packet. This
// pins that bound with the maximal-sum packet the layout permits.
#[test]
fn checksum_sum_cannot_reach_the_modulus() {
    let mut bytes = vec![0xCC, 0x01, 0xFF]; // length = 255, the maximum
    bytes.extend([0xFF; 6]); // destination
    bytes.extend([0xFF; 6]); // source
    bytes.extend([0xFF, 0xFF, 0xFF]); // tn, port, count
    bytes.extend([0xFF, 0xFF]); // sub-device
    bytes.extend([0xFF, 0xFF, 0xFF]); // cc, pid
    bytes.push(0xE7); // pdl = 231 fills the message region
    bytes.extend(std::iter::repeat_n(0xFF, 231));
    assert_eq!(bytes.len(), 255);

    let sum: u64 = bytes.iter().map(|&b| u64::from(b)).sum();
    assert!(sum < 0x10000);

    let bytes = with_checksum(bytes);
    let packet = decode_packet(&ByteSample::sequence(&bytes))
        .unwrap()
        .expect("rdm packet");
    assert_eq!(packet.data().pd().unwrap().size(), Some(231));
    assert!(packet.is_checksum_valid());
}

#[test]
fn spans_carry_upstream_coordinates() {
    // Samples at DMX slot timing: 44µs per slot, starting at t = 1000.
    let bytes = get_device_info_packet();
    let samples: Vec<ByteSample> = bytes
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let start = 1000 + (i as u64) * 44;
            ByteSample::new(start, start + 44, value, true)
        })
        .collect();

    let packet = decode_packet(&samples).unwrap().expect("rdm packet");
    let span = packet.length().span().unwrap();
    assert_eq!(span.ss, 1000 + 2 * 44);
    assert_eq!(span.es, 1000 + 3 * 44);

    let message_span = packet.data().span().unwrap();
    assert_eq!(message_span.ss, 1000 + 20 * 44);
    assert_eq!(message_span.es, 1000 + 24 * 44);
}
