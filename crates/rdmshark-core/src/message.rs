use crate::error::DecodeError;
use crate::field::{
    DataField, DisplayFormat, EnumField, FieldRef, FieldTag, MessageFieldKind, PacketFieldKind,
    ScalarField, static_size,
};
use crate::layout;
use crate::sample::{ByteSample, Span};
use crate::tables::{COMMAND_CLASSES, PIDS};

/// The message data block of an RDM packet: command class, parameter
/// ID, parameter data length, and the variable-length parameter data.
///
/// The whole block is also retained as a raw-data region (span, bytes,
/// compact value) so the packet can treat it as one field. The
/// parameter-data slot is tagged optional: a parameter data length of
/// zero removes it from every subsequent operation, so sizing and
/// enumeration only ever see fields that occupy bytes.
#[derive(Debug, Clone)]
pub struct MessageField {
    region: DataField,
    command_class: EnumField,
    pid: EnumField,
    pdl: ScalarField,
    pd: Option<DataField>,
}

impl MessageField {
    pub(crate) fn unresolved() -> Self {
        Self {
            region: DataField::unresolved(FieldTag::Packet(PacketFieldKind::Data)),
            command_class: EnumField::new(
                FieldTag::Message(MessageFieldKind::CommandClass),
                layout::COMMAND_CLASS_SIZE,
                &COMMAND_CLASSES,
            ),
            pid: EnumField::new(
                FieldTag::Message(MessageFieldKind::ParameterId),
                layout::PARAMETER_ID_SIZE,
                &PIDS,
            ),
            pdl: ScalarField::new(
                FieldTag::Message(MessageFieldKind::ParameterDataLength),
                layout::PARAMETER_DATA_LENGTH_SIZE,
            ),
            pd: Some(DataField::unresolved(FieldTag::Message(
                MessageFieldKind::ParameterData,
            ))),
        }
    }

    pub fn tag(&self) -> FieldTag {
        self.region.tag()
    }

    /// Size of the whole message region; resolved by the packet from its
    /// length field before load.
    pub fn size(&self) -> Option<usize> {
        self.region.size()
    }

    pub fn span(&self) -> Option<Span> {
        self.region.span()
    }

    /// Raw bytes of the whole message region.
    pub fn bytes(&self) -> &[u8] {
        self.region.bytes()
    }

    /// Compact value of the region, when it is at most eight bytes.
    pub fn compact(&self) -> Option<u64> {
        self.region.compact()
    }

    pub fn command_class(&self) -> &EnumField {
        &self.command_class
    }

    pub fn pid(&self) -> &EnumField {
        &self.pid
    }

    pub fn pdl(&self) -> &ScalarField {
        &self.pdl
    }

    /// Parameter data, absent when the parameter data length is zero.
    pub fn pd(&self) -> Option<&DataField> {
        self.pd.as_ref()
    }

    /// Present sub-fields in wire order.
    pub fn fields(&self) -> Vec<FieldRef<'_>> {
        let mut fields = vec![
            FieldRef::Enum(&self.command_class),
            FieldRef::Enum(&self.pid),
            FieldRef::Scalar(&self.pdl),
        ];
        if let Some(pd) = &self.pd {
            fields.push(FieldRef::Data(pd));
        }
        fields
    }

    /// Sum of the resolved sub-field sizes.
    pub fn static_size(&self) -> usize {
        static_size(&self.fields())
    }

    pub fn format(&self, fmt: DisplayFormat) -> String {
        self.region.format(fmt)
    }

    pub(crate) fn set_size(&mut self, size: usize) {
        self.region.set_size(size);
    }

    /// Staged load: capture the whole region first, then walk the fixed
    /// header with an advancing cursor and resolve the parameter-data
    /// size from the decoded parameter data length.
    pub(crate) fn load(&mut self, samples: &[ByteSample]) -> Result<(), DecodeError> {
        self.region.load(samples);

        let mut cursor = 0usize;
        self.command_class
            .load(take(samples, &mut cursor, layout::COMMAND_CLASS_SIZE)?);
        self.pid
            .load(take(samples, &mut cursor, layout::PARAMETER_ID_SIZE)?);
        self.pdl
            .load(take(samples, &mut cursor, layout::PARAMETER_DATA_LENGTH_SIZE)?);

        let pdl = self.pdl.value() as usize;
        if pdl == 0 {
            self.pd = None;
            return Ok(());
        }

        let remaining = samples.len() - cursor;
        if pdl > remaining {
            return Err(DecodeError::PdlOverrun { pdl, remaining });
        }
        if let Some(pd) = self.pd.as_mut() {
            pd.set_size(pdl);
            pd.load(&samples[cursor..cursor + pdl]);
        }
        Ok(())
    }
}

fn take<'a>(
    samples: &'a [ByteSample],
    cursor: &mut usize,
    size: usize,
) -> Result<&'a [ByteSample], DecodeError> {
    let end = *cursor + size;
    let slice = samples
        .get(*cursor..end)
        .ok_or(DecodeError::TruncatedMessage {
            needed: end,
            actual: samples.len(),
        })?;
    *cursor = end;
    Ok(slice)
}
