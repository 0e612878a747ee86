use thiserror::Error;

/// Structural decode failures.
///
/// These cover malformed packets only: inputs that do not look like an
/// RDM packet at all yield "no packet" (`Ok(None)` from
/// [`decode_packet`](crate::decode_packet)) rather than an error, and a
/// checksum mismatch is a normal decoded outcome reported through
/// [`RdmPacket::is_checksum_valid`](crate::RdmPacket::is_checksum_valid).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("packet too short: need {needed} samples, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("declared length {length} below fixed overhead {minimum}")]
    LengthTooSmall { length: usize, minimum: usize },
    #[error("message data too short: need {needed} bytes, got {actual}")]
    TruncatedMessage { needed: usize, actual: usize },
    #[error("parameter data length {pdl} exceeds remaining {remaining} message bytes")]
    PdlOverrun { pdl: usize, remaining: usize },
}
