//! Attribute tag values (AT).

use super::{cast_value, cast_values, Element, ElementBase};
use crate::buffer::ByteBuffer;
use crate::error::{IndexOutOfRangeSnafu, Result, WriteValueSnafu};
use crate::header::{Tag, VR};
use crate::value::{DicomValue, ValueType};
use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use byteordered::Endianness;
use snafu::{OptionExt, ResultExt};

/// Number of bytes of one tag value: a group and an element number.
const TAG_SIZE: usize = 4;

fn read_tag(bytes: &[u8], endianness: Endianness) -> Tag {
    match endianness {
        Endianness::Little => Tag(
            LittleEndian::read_u16(&bytes[0..2]),
            LittleEndian::read_u16(&bytes[2..4]),
        ),
        Endianness::Big => Tag(
            BigEndian::read_u16(&bytes[0..2]),
            BigEndian::read_u16(&bytes[2..4]),
        ),
    }
}

/// Parse a tag written as `GGGGEEEE`.
fn parse_tag(text: &str) -> Option<Tag> {
    let text = text.trim();
    if text.len() != 8 || !text.is_ascii() {
        return None;
    }
    let group = u16::from_str_radix(&text[0..4], 16).ok()?;
    let element = u16::from_str_radix(&text[4..8], 16).ok()?;
    Some(Tag(group, element))
}

/// An element holding attribute tags.
///
/// Each value is a pair of 16-bit numbers,
/// so a change of byte order swaps 2-byte units.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeTagElement {
    base: ElementBase,
}

impl AttributeTagElement {
    /// Create an empty element in the machine's byte order.
    pub fn new(tag: Tag) -> Self {
        AttributeTagElement::from_parts(tag, VR::AT, 0, ByteBuffer::new())
    }

    /// Create an element over an existing value buffer.
    pub fn from_parts(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> Self {
        AttributeTagElement {
            base: ElementBase::new(tag, vr, position, buffer),
        }
    }

    fn len(&self) -> usize {
        self.base.buffer.len() / TAG_SIZE
    }

    /// The tag at the given index.
    pub fn get_value(&self, index: usize) -> Result<Tag> {
        let len = self.len();
        if index >= len {
            return IndexOutOfRangeSnafu { index, len }.fail();
        }
        let bytes = self.base.buffer.bytes()?;
        let at = index * TAG_SIZE;
        let chunk = bytes.get(at..at + TAG_SIZE).context(IndexOutOfRangeSnafu {
            index,
            len: bytes.len() / TAG_SIZE,
        })?;
        Ok(read_tag(chunk, self.base.buffer.endianness()))
    }

    /// All tags.
    pub fn get_values(&self) -> Result<Vec<Tag>> {
        let bytes = self.base.buffer.bytes()?;
        let endianness = self.base.buffer.endianness();
        Ok(bytes
            .chunks_exact(TAG_SIZE)
            .map(|chunk| read_tag(chunk, endianness))
            .collect())
    }

    /// Replace the value with a single tag.
    pub fn set_value(&mut self, value: Tag) -> Result<()> {
        self.set_values(&[value])
    }

    /// Replace the value with the given tags,
    /// written in the buffer's byte order.
    pub fn set_values(&mut self, values: &[Tag]) -> Result<()> {
        let buffer = &mut self.base.buffer;
        buffer.clear();
        let mut writer = buffer.writer()?;
        for tag in values {
            writer.write_u16(tag.group()).context(WriteValueSnafu)?;
            writer.write_u16(tag.element()).context(WriteValueSnafu)?;
        }
        Ok(())
    }
}

impl Element for AttributeTagElement {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn value_multiplicity(&self) -> Result<usize> {
        Ok(self.len())
    }

    fn value_as_string(&self) -> Result<String> {
        let values = self.get_values()?;
        Ok(itertools::join(
            values
                .into_iter()
                .map(|t| format!("{:04X}{:04X}", t.group(), t.element())),
            "\\",
        ))
    }

    fn set_value_from_string(&mut self, value: &str) -> Result<()> {
        if value.is_empty() {
            return self.set_values(&[]);
        }
        let tags: Vec<Tag> = value
            .split('\\')
            .map(|item| {
                parse_tag(item).unwrap_or_else(|| {
                    tracing::warn!(
                        "Malformed attribute tag `{}` in element {}, using (0000,0000)",
                        item,
                        self.base.tag
                    );
                    Tag::default()
                })
            })
            .collect();
        self.set_values(&tags)
    }

    fn value_type(&self) -> ValueType {
        ValueType::Tag
    }

    fn value_as_object(&self) -> Result<Option<DicomValue>> {
        if self.len() == 0 {
            return Ok(None);
        }
        self.get_value(0).map(|t| Some(DicomValue::Tag(t)))
    }

    fn value_as_object_array(&self) -> Result<Vec<DicomValue>> {
        Ok(self.get_values()?.into_iter().map(DicomValue::Tag).collect())
    }

    fn set_value_from_object(&mut self, value: DicomValue) -> Result<()> {
        let tag: Tag = cast_value(self.base.vr, ValueType::Tag, value)?;
        self.set_value(tag)
    }

    fn set_value_from_object_array(&mut self, values: Vec<DicomValue>) -> Result<()> {
        let tags: Vec<Tag> = cast_values(self.base.vr, ValueType::Tag, values)?;
        self.set_values(&tags)
    }

    fn swap_unit_size(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        let mut el = AttributeTagElement::new(Tag(0x0028, 0x0009));
        el.set_values(&[Tag(0x0008, 0x0010)]).unwrap();
        assert_eq!(el.value_multiplicity().unwrap(), 1);
        assert_eq!(el.get_values().unwrap(), vec![Tag(0x0008, 0x0010)]);
        assert_eq!(el.value_as_string().unwrap(), "00080010");
    }

    #[test]
    fn writes_follow_the_buffer_byte_order() {
        let buffer = ByteBuffer::with_endianness(Endianness::Big);
        let mut el = AttributeTagElement::from_parts(Tag(0x0028, 0x0009), VR::AT, 0, buffer);
        el.set_value(Tag(0x0018, 0x1063)).unwrap();
        assert_eq!(el.buffer().to_bytes().unwrap(), vec![0x00, 0x18, 0x10, 0x63]);

        el.change_endian().unwrap();
        assert_eq!(el.buffer().endianness(), Endianness::Little);
        assert_eq!(el.buffer().to_bytes().unwrap(), vec![0x18, 0x00, 0x63, 0x10]);
        assert_eq!(el.get_value(0).unwrap(), Tag(0x0018, 0x1063));
    }

    #[test]
    fn malformed_items_become_the_default_tag() {
        let mut el = AttributeTagElement::new(Tag(0x0028, 0x0009));
        el.set_value_from_string("00181063\\bad\\0018106g\\00540080")
            .unwrap();
        assert_eq!(
            el.get_values().unwrap(),
            vec![Tag(0x0018, 0x1063), Tag(0, 0), Tag(0, 0), Tag(0x0054, 0x0080)]
        );
        assert_eq!(
            el.value_as_string().unwrap(),
            "00181063\\00000000\\00000000\\00540080"
        );

        el.set_value_from_string("").unwrap();
        assert_eq!(el.value_multiplicity().unwrap(), 0);
        assert!(el.get_value(0).is_err());
    }

    #[test]
    fn object_access() {
        let mut el = AttributeTagElement::new(Tag(0x0028, 0x0009));
        el.set_value_from_object(DicomValue::Tag(Tag(0x0054, 0x0080)))
            .unwrap();
        assert_eq!(
            el.value_as_object().unwrap(),
            Some(DicomValue::Tag(Tag(0x0054, 0x0080)))
        );
        assert!(el.set_value_from_object(DicomValue::U32(0x0054_0080)).is_err());
    }
}
