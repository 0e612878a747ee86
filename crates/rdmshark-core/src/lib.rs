//! RDMShark core library: RDM (ANSI E1.20) packet decoding over DMX512.
//!
//! This crate turns the timestamped byte samples produced by an upstream
//! DMX512 signal decoder into a typed, hierarchical field tree with
//! per-field source provenance, plus an annotation stream for host
//! visualization. Decoding is byte-oriented and side-effect free; all
//! I/O lives in the CLI. Wire-format constants are captured in `layout`
//! and protocol enumerations in `tables`, so field types stay minimal
//! and consistent with the standard.
//!
//! Invariants:
//! - Each decode call is stateless: one fully buffered sample sequence
//!   in, one immutable packet out, nothing shared but the read-only
//!   enumeration tables.
//! - Field sizes that depend on earlier sibling values (message data,
//!   parameter data) are resolved in a staged load before the cursor
//!   reaches them; no field ever reads past its slice.
//! - A checksum mismatch is a decoded outcome, never an error; inputs
//!   that are not RDM at all yield "no packet", never an error.
//!
//! # Examples
//! ```
//! use rdmshark_core::{ByteSample, DisplayFormat, decode_packet};
//!
//! let mut bytes = vec![
//!     0xCC, 0x01, 0x18, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x1A,
//!     0x2B, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x20, 0x00,
//!     0x60, 0x00,
//! ];
//! let sum: u64 = bytes.iter().map(|&b| u64::from(b)).sum();
//! bytes.push((sum >> 8) as u8);
//! bytes.push((sum & 0xFF) as u8);
//!
//! let packet = decode_packet(&ByteSample::sequence(&bytes))?.expect("rdm packet");
//! assert_eq!(packet.destination().format(DisplayFormat::Hex), "BROADCAST");
//! assert_eq!(packet.data().pid().format(DisplayFormat::Hex), "DEVICE_INFO");
//! assert!(packet.is_checksum_valid());
//! # Ok::<(), rdmshark_core::DecodeError>(())
//! ```

mod annotate;
mod error;
pub mod field;
pub mod layout;
mod message;
mod packet;
mod sample;
pub mod tables;

pub use annotate::{Annotation, AnnotationKind, annotate};
pub use error::DecodeError;
pub use field::{DisplayFormat, FieldRef, FieldTag, format_value};
pub use message::MessageField;
pub use packet::{RdmPacket, decode_packet};
pub use sample::{ByteSample, Span};
