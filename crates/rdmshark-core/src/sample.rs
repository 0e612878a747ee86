use serde::{Deserialize, Serialize};

/// One reconstructed DMX slot byte with sample-stream provenance.
///
/// Samples come from the upstream signal decoder: `ss`/`es` are the
/// monotonically non-decreasing start and end coordinates of the slot
/// within the sample stream, and `valid` reports whether the upstream
/// reconstruction trusts the byte.
///
/// # Examples
/// ```
/// use rdmshark_core::ByteSample;
///
/// let sample = ByteSample::new(0, 44, 0xCC, true);
/// assert_eq!(sample.value, 0xCC);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteSample {
    /// Start position within the sample stream.
    pub ss: u64,
    /// End position within the sample stream.
    pub es: u64,
    /// The reconstructed byte value.
    pub value: u8,
    /// Whether the upstream decoder trusts this byte.
    pub valid: bool,
}

impl ByteSample {
    pub fn new(ss: u64, es: u64, value: u8, valid: bool) -> Self {
        Self {
            ss,
            es,
            value,
            valid,
        }
    }

    /// Build a valid sample sequence from raw bytes, one stream unit per
    /// byte. Intended for tests and synthetic captures; real captures carry
    /// the upstream decoder's coordinates.
    ///
    /// # Examples
    /// ```
    /// use rdmshark_core::ByteSample;
    ///
    /// let samples = ByteSample::sequence(&[0xCC, 0x01]);
    /// assert_eq!(samples[1].ss, 1);
    /// assert!(samples[1].valid);
    /// ```
    pub fn sequence(bytes: &[u8]) -> Vec<ByteSample> {
        bytes
            .iter()
            .enumerate()
            .map(|(i, &value)| ByteSample::new(i as u64, i as u64 + 1, value, true))
            .collect()
    }
}

/// Source provenance of a loaded field: the start position of its first
/// consumed sample and the end position of its last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub ss: u64,
    pub es: u64,
}

impl Span {
    pub(crate) fn over(samples: &[ByteSample]) -> Option<Span> {
        let first = samples.first()?;
        let last = samples.last()?;
        Some(Span {
            ss: first.ss,
            es: last.es,
        })
    }
}
