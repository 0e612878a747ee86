use super::scalar::big_endian_value;
use super::{DisplayFormat, FieldTag, format_value};
use crate::layout;
use crate::sample::{ByteSample, Span};

/// Rendering variant for a raw-data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStyle {
    /// Per-byte rendering joined by single spaces.
    Bytes,
    /// UID rendering with broadcast and manufacturer-wildcard sentinels.
    Destination,
}

/// Raw byte-sequence field.
///
/// Keeps both the ordered raw bytes (for per-byte rendering) and the
/// big-endian compact value computed independently from the same bytes,
/// so the two representations can diverge in derived variants. The
/// compact value is defined only for regions of at most eight bytes;
/// longer regions (a large parameter-data block) carry no compact form
/// rather than a truncated one. A field constructed with an unresolved
/// size fixes its size to the slice length at load.
#[derive(Debug, Clone)]
pub struct DataField {
    tag: FieldTag,
    size: Option<usize>,
    span: Option<Span>,
    bytes: Vec<u8>,
    compact: Option<u64>,
    style: DataStyle,
}

impl DataField {
    pub fn new(tag: FieldTag, size: usize) -> Self {
        Self::with_style(tag, Some(size), DataStyle::Bytes)
    }

    pub fn unresolved(tag: FieldTag) -> Self {
        Self::with_style(tag, None, DataStyle::Bytes)
    }

    /// 48-bit UID field rendered with destination sentinels.
    pub fn destination(tag: FieldTag) -> Self {
        Self::with_style(tag, Some(layout::UID_SIZE), DataStyle::Destination)
    }

    fn with_style(tag: FieldTag, size: Option<usize>, style: DataStyle) -> Self {
        Self {
            tag,
            size,
            span: None,
            bytes: Vec::new(),
            compact: None,
            style,
        }
    }

    pub fn tag(&self) -> FieldTag {
        self.tag
    }

    pub fn size(&self) -> Option<usize> {
        self.size
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Ordered raw bytes consumed at load. Empty before load.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Big-endian composition of the raw bytes. `None` before load and
    /// for regions longer than eight bytes, which have no compact form.
    pub fn compact(&self) -> Option<u64> {
        self.compact
    }

    pub fn style(&self) -> DataStyle {
        self.style
    }

    pub fn is_loaded(&self) -> bool {
        self.span.is_some()
    }

    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = Some(size);
    }

    /// Record span and raw bytes, and compose the compact value. An
    /// unresolved size becomes the slice length.
    pub fn load(&mut self, samples: &[ByteSample]) {
        if let Some(size) = self.size {
            debug_assert_eq!(size, samples.len());
        } else {
            self.size = Some(samples.len());
        }
        self.span = Span::over(samples);
        self.bytes = samples.iter().map(|sample| sample.value).collect();
        self.compact = if samples.len() <= 8 {
            Some(big_endian_value(samples))
        } else {
            None
        };
    }

    pub fn format(&self, fmt: DisplayFormat) -> String {
        if self.style == DataStyle::Destination {
            if let Some(compact) = self.compact {
                if compact == layout::BROADCAST_UID {
                    return "BROADCAST".to_string();
                }
                if compact & layout::MANUF_ALL_MASK == layout::MANUF_ALL_MASK {
                    let manufacturer = (compact >> 32) & 0xFFFF;
                    return format!("MANUFACTURER {}", format_value(manufacturer, fmt, 2));
                }
            }
        }

        self.bytes
            .iter()
            .map(|&byte| format_value(u64::from(byte), fmt, 1))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
