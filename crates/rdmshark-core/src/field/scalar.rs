use super::{DisplayFormat, FieldTag, format_value};
use crate::sample::{ByteSample, Span};
use crate::tables::EnumTable;

/// Fixed-size big-endian integer field with source-position tracking.
///
/// A field is loaded exactly once from an immutable slice of byte
/// samples and never mutated afterward. The containing structure's
/// cursor discipline guarantees the slice length matches the resolved
/// size; a mismatch is a container bug, not a runtime condition.
///
/// # Examples
/// ```
/// use rdmshark_core::{ByteSample, DisplayFormat};
/// use rdmshark_core::field::ScalarField;
/// use rdmshark_core::field::{FieldTag, PacketFieldKind};
///
/// let mut field = ScalarField::new(FieldTag::Packet(PacketFieldKind::SubDevice), 2);
/// field.load(&ByteSample::sequence(&[0x01, 0x02]));
/// assert_eq!(field.value(), 0x0102);
/// assert_eq!(field.format(DisplayFormat::Hex), "0102");
/// ```
#[derive(Debug, Clone)]
pub struct ScalarField {
    tag: FieldTag,
    size: Option<usize>,
    span: Option<Span>,
    value: u64,
}

impl ScalarField {
    pub fn new(tag: FieldTag, size: usize) -> Self {
        Self {
            tag,
            size: Some(size),
            span: None,
            value: 0,
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

    /// Big-endian composition of the consumed bytes. Zero before load.
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn is_loaded(&self) -> bool {
        self.span.is_some()
    }

    /// Consume exactly `size` samples: record the source span and compose
    /// the big-endian value.
    pub fn load(&mut self, samples: &[ByteSample]) {
        debug_assert_eq!(self.size, Some(samples.len()));
        self.span = Span::over(samples);
        self.value = big_endian_value(samples);
    }

    pub fn format(&self, fmt: DisplayFormat) -> String {
        format_value(self.value, fmt, self.size.unwrap_or(1))
    }
}

/// Scalar field whose value renders through a protocol enumeration
/// table when registered there, and as a plain scalar otherwise.
#[derive(Debug, Clone)]
pub struct EnumField {
    scalar: ScalarField,
    table: &'static EnumTable,
}

impl EnumField {
    pub fn new(tag: FieldTag, size: usize, table: &'static EnumTable) -> Self {
        Self {
            scalar: ScalarField::new(tag, size),
            table,
        }
    }

    pub fn tag(&self) -> FieldTag {
        self.scalar.tag()
    }

    pub fn size(&self) -> Option<usize> {
        self.scalar.size()
    }

    pub fn span(&self) -> Option<Span> {
        self.scalar.span()
    }

    pub fn value(&self) -> u64 {
        self.scalar.value()
    }

    pub fn load(&mut self, samples: &[ByteSample]) {
        self.scalar.load(samples);
    }

    pub fn format(&self, fmt: DisplayFormat) -> String {
        match self.table.get_name(self.scalar.value()) {
            Some(name) => name.to_string(),
            None => self.scalar.format(fmt),
        }
    }
}

// Callers never compose more than eight bytes; longer raw-data regions
// carry no compact value.
pub(crate) fn big_endian_value(samples: &[ByteSample]) -> u64 {
    debug_assert!(samples.len() <= 8);
    samples
        .iter()
        .fold(0u64, |acc, sample| (acc << 8) | u64::from(sample.value))
}

#[cfg(test)]
mod tests {
    use super::{EnumField, ScalarField};
    use crate::field::{DisplayFormat, FieldTag, MessageFieldKind, PacketFieldKind};
    use crate::sample::ByteSample;
    use crate::tables::COMMAND_CLASSES;

    fn scalar(size: usize) -> ScalarField {
        ScalarField::new(FieldTag::Packet(PacketFieldKind::Length), size)
    }

    #[test]
    fn load_composes_big_endian_value() {
        for len in 1..=6usize {
            let bytes: Vec<u8> = (0..len).map(|i| 0xA1 + (i as u8) * 0x11).collect();
            let mut field = scalar(len);
            field.load(&ByteSample::sequence(&bytes));

            let mut expected = 0u64;
            for &b in &bytes {
                expected = (expected << 8) | u64::from(b);
            }
            assert_eq!(field.value(), expected);

            // Re-encoding most-significant-first reproduces the input.
            let rendered: Vec<u8> = (0..bytes.len())
                .rev()
                .map(|i| ((field.value() >> (8 * i)) & 0xFF) as u8)
                .collect();
            assert_eq!(rendered, bytes);
        }
    }

    #[test]
    fn load_records_span_from_slice_bounds() {
        let samples = vec![
            ByteSample::new(100, 144, 0x12, true),
            ByteSample::new(144, 188, 0x34, true),
        ];
        let mut field = scalar(2);
        field.load(&samples);
        let span = field.span().unwrap();
        assert_eq!((span.ss, span.es), (100, 188));
        assert!(field.is_loaded());
    }

    #[test]
    fn format_pads_to_declared_size() {
        let mut field = scalar(2);
        field.load(&ByteSample::sequence(&[0x00, 0xFF]));
        assert_eq!(field.format(DisplayFormat::Dec), "255");
        assert_eq!(field.format(DisplayFormat::Hex), "00FF");
        assert_eq!(
            field.format(DisplayFormat::Bin),
            "0000000011111111"
        );
    }

    #[test]
    fn enum_field_renders_registered_name() {
        let mut field = EnumField::new(
            FieldTag::Message(MessageFieldKind::CommandClass),
            1,
            &COMMAND_CLASSES,
        );
        field.load(&ByteSample::sequence(&[0x20]));
        assert_eq!(field.format(DisplayFormat::Hex), "GET");
    }

    #[test]
    fn enum_field_falls_back_to_scalar_rendering() {
        let mut field = EnumField::new(
            FieldTag::Message(MessageFieldKind::CommandClass),
            1,
            &COMMAND_CLASSES,
        );
        field.load(&ByteSample::sequence(&[0x7F]));
        assert_eq!(field.format(DisplayFormat::Hex), "7F");
        assert_eq!(field.format(DisplayFormat::Dec), "127");
    }
}
