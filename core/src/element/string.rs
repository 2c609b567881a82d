//! Text elements, single-valued and `\`-delimited multi-valued.

use super::{cast_value, cast_values, Element, ElementBase};
use crate::buffer::ByteBuffer;
use crate::error::{IndexOutOfRangeSnafu, Result};
use crate::header::{Tag, VR};
use crate::value::{DicomValue, ValueType};
use snafu::ensure;
use std::cell::Cell;

/// The value separator of multi-valued text.
const SEPARATOR: char = '\\';

fn trim_padding(text: &str) -> &str {
    text.trim_end_matches(|c: char| c == ' ' || c == '\0')
}

fn read_text(base: &ElementBase) -> Result<String> {
    let text = base.buffer.get_string()?;
    Ok(trim_padding(&text).to_string())
}

fn write_text(base: &mut ElementBase, text: &str) -> Result<()> {
    let padding = base.vr.padding();
    base.buffer.set_string(text, padding)
}

/// A text element holding a single value (LO, LT, PN, SH, ST, UT).
///
/// Backslashes are part of the text: the value multiplicity is always 1.
#[derive(Debug, Clone, PartialEq)]
pub struct StringElement {
    base: ElementBase,
}

impl StringElement {
    /// Create an empty element in the machine's byte order.
    pub fn new(tag: Tag, vr: VR) -> Self {
        StringElement::from_parts(tag, vr, 0, ByteBuffer::new())
    }

    /// Create an element over an existing value buffer.
    pub fn from_parts(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> Self {
        StringElement {
            base: ElementBase::new(tag, vr, position, buffer),
        }
    }

    /// The value, which is only found at index 0.
    pub fn get_value(&self, index: usize) -> Result<String> {
        ensure!(index == 0, IndexOutOfRangeSnafu { index, len: 1_usize });
        self.value_as_string()
    }

    /// The value as a one-item list.
    pub fn get_values(&self) -> Result<Vec<String>> {
        Ok(vec![self.value_as_string()?])
    }

    /// Replace the value.
    pub fn set_value(&mut self, value: &str) -> Result<()> {
        write_text(&mut self.base, value)
    }

    /// Replace the value with the given texts joined by `\`.
    pub fn set_values<S: AsRef<str>>(&mut self, values: &[S]) -> Result<()> {
        let text = itertools::join(values.iter().map(|s| s.as_ref()), "\\");
        write_text(&mut self.base, &text)
    }
}

impl Element for StringElement {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn value_multiplicity(&self) -> Result<usize> {
        Ok(1)
    }

    fn value_as_string(&self) -> Result<String> {
        read_text(&self.base)
    }

    fn set_value_from_string(&mut self, value: &str) -> Result<()> {
        self.set_value(value)
    }

    fn value_type(&self) -> ValueType {
        ValueType::Str
    }

    fn value_as_object(&self) -> Result<Option<DicomValue>> {
        self.get_value(0).map(|v| Some(DicomValue::Str(v)))
    }

    fn value_as_object_array(&self) -> Result<Vec<DicomValue>> {
        Ok(self.get_values()?.into_iter().map(DicomValue::Str).collect())
    }

    fn set_value_from_object(&mut self, value: DicomValue) -> Result<()> {
        let text: String = cast_value(self.base.vr, ValueType::Str, value)?;
        self.set_value(&text)
    }

    fn set_value_from_object_array(&mut self, values: Vec<DicomValue>) -> Result<()> {
        let texts: Vec<String> = cast_values(self.base.vr, ValueType::Str, values)?;
        self.set_values(&texts)
    }
}

/// A text element holding `\`-delimited values
/// (AE, AS, CS, and the base of DA, DS, DT, IS, TM, UI).
///
/// The value multiplicity is cached until the buffer changes.
#[derive(Debug, Clone)]
pub struct MultiStringElement {
    base: ElementBase,
    /// buffer generation and value multiplicity
    vm: Cell<Option<(u64, usize)>>,
}

impl PartialEq for MultiStringElement {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl MultiStringElement {
    /// Create an empty element in the machine's byte order.
    pub fn new(tag: Tag, vr: VR) -> Self {
        MultiStringElement::from_parts(tag, vr, 0, ByteBuffer::new())
    }

    /// Create an element over an existing value buffer.
    pub fn from_parts(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> Self {
        MultiStringElement {
            base: ElementBase::new(tag, vr, position, buffer),
            vm: Cell::new(None),
        }
    }

    /// The value at the given index, without trailing spaces or nulls.
    pub fn get_value(&self, index: usize) -> Result<String> {
        let values = self.get_values()?;
        let len = values.len();
        match values.into_iter().nth(index) {
            Some(value) => Ok(trim_padding(&value).to_string()),
            None => IndexOutOfRangeSnafu { index, len }.fail(),
        }
    }

    /// All values, split at each `\`.
    ///
    /// Empty text holds a single empty value.
    pub fn get_values(&self) -> Result<Vec<String>> {
        let text = self.value_as_string()?;
        Ok(text.split(SEPARATOR).map(str::to_string).collect())
    }

    /// Replace the value with a single text value.
    pub fn set_value(&mut self, value: &str) -> Result<()> {
        write_text(&mut self.base, value)
    }

    /// Replace the value with several text values, joined by `\`.
    pub fn set_values<S: AsRef<str>>(&mut self, values: &[S]) -> Result<()> {
        let text = itertools::join(values.iter().map(|s| s.as_ref()), "\\");
        write_text(&mut self.base, &text)
    }
}

impl Element for MultiStringElement {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn value_multiplicity(&self) -> Result<usize> {
        let generation = self.base.buffer.generation();
        if let Some((cached_at, vm)) = self.vm.get() {
            if cached_at == generation {
                return Ok(vm);
            }
        }
        let vm = self.get_values()?.len();
        self.vm.set(Some((generation, vm)));
        Ok(vm)
    }

    fn value_as_string(&self) -> Result<String> {
        read_text(&self.base)
    }

    fn set_value_from_string(&mut self, value: &str) -> Result<()> {
        self.set_value(value)
    }

    fn value_type(&self) -> ValueType {
        ValueType::Str
    }

    fn value_as_object(&self) -> Result<Option<DicomValue>> {
        self.get_value(0).map(|v| Some(DicomValue::Str(v)))
    }

    fn value_as_object_array(&self) -> Result<Vec<DicomValue>> {
        Ok(self.get_values()?.into_iter().map(DicomValue::Str).collect())
    }

    fn set_value_from_object(&mut self, value: DicomValue) -> Result<()> {
        let text: String = cast_value(self.base.vr, ValueType::Str, value)?;
        self.set_value(&text)
    }

    fn set_value_from_object_array(&mut self, values: Vec<DicomValue>) -> Result<()> {
        let texts: Vec<String> = cast_values(self.base.vr, ValueType::Str, values)?;
        self.set_values(&texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::text::SpecificCharacterSet;

    #[test]
    fn single_valued_text_is_not_split() {
        let mut el = StringElement::new(Tag(0x0010, 0x0010), VR::PN);
        el.set_value("Doe^John\\Smith").unwrap();
        assert_eq!(el.value_multiplicity().unwrap(), 1);
        assert_eq!(el.get_value(0).unwrap(), "Doe^John\\Smith");
        assert!(matches!(
            el.get_value(1),
            Err(Error::IndexOutOfRange { index: 1, len: 1, .. })
        ));
    }

    #[test]
    fn text_is_padded_and_trimmed() {
        let mut el = StringElement::new(Tag(0x0008, 0x0070), VR::LO);
        el.set_value("ACME").unwrap();
        assert_eq!(el.length(), 4);
        el.set_value("ACME5").unwrap();
        assert_eq!(el.length(), 6);
        assert_eq!(el.buffer().to_bytes().unwrap(), b"ACME5 ");
        assert_eq!(el.value_as_string().unwrap(), "ACME5");
    }

    #[test]
    fn multiplicity_counts_separators() {
        let mut el = MultiStringElement::new(Tag(0x0008, 0x0008), VR::CS);
        assert_eq!(el.value_multiplicity().unwrap(), 1);
        assert_eq!(el.get_value(0).unwrap(), "");

        el.set_values(&["ORIGINAL", "PRIMARY", "AXIAL"]).unwrap();
        assert_eq!(el.value_multiplicity().unwrap(), 3);
        assert_eq!(el.get_value(2).unwrap(), "AXIAL");
        assert!(el.get_value(3).is_err());

        // cached multiplicity follows mutations
        el.set_value("DERIVED").unwrap();
        assert_eq!(el.value_multiplicity().unwrap(), 1);
        el.set_value_from_string("A\\B").unwrap();
        assert_eq!(el.value_multiplicity().unwrap(), 2);
    }

    #[test]
    fn multiplicity_follows_a_replaced_buffer() {
        let mut el = MultiStringElement::new(Tag(0x0008, 0x0008), VR::CS);
        assert_eq!(el.value_multiplicity().unwrap(), 1);

        *el.buffer_mut() = ByteBuffer::from_vec(b"A\\B\\C ".to_vec(), byteordered::Endianness::Little);
        assert_eq!(el.value_multiplicity().unwrap(), 3);

        el.base_mut().buffer = ByteBuffer::new();
        assert_eq!(el.value_multiplicity().unwrap(), 1);
    }

    #[test]
    fn undecodable_bytes_do_not_add_values() {
        let buffer = ByteBuffer::from_vec(b"AB\xFF ".to_vec(), byteordered::Endianness::Little)
            .with_charset(SpecificCharacterSet::IsoIr192);
        let mut el = MultiStringElement::from_parts(Tag(0x0008, 0x0060), VR::CS, 0, buffer);
        assert_eq!(el.value_multiplicity().unwrap(), 1);
        assert_eq!(el.get_value(0).unwrap(), "AB\u{FFFD}");

        el.set_value("ÁB").unwrap();
        assert_eq!(el.buffer().to_bytes().unwrap(), "ÁB ".as_bytes());
        assert_eq!(el.value_multiplicity().unwrap(), 1);
    }

    #[test]
    fn values_are_trimmed_individually() {
        let buffer = ByteBuffer::from_vec(b"AB \\CD\0".to_vec(), byteordered::Endianness::Little);
        let el = MultiStringElement::from_parts(Tag(0x0008, 0x0061), VR::CS, 0, buffer);
        assert_eq!(el.get_value(0).unwrap(), "AB");
        assert_eq!(el.get_value(1).unwrap(), "CD");
    }

    #[test]
    fn object_access_checks_types() {
        let mut el = MultiStringElement::new(Tag(0x0008, 0x0060), VR::CS);
        el.set_value_from_object(DicomValue::from("MR")).unwrap();
        assert_eq!(el.value_as_object().unwrap(), Some(DicomValue::from("MR")));
        assert!(el.set_value_from_object(DicomValue::U16(1)).is_err());
        assert!(el
            .set_value_from_object_array(vec![DicomValue::from("CT"), DicomValue::F32(1.)])
            .is_err());
        // failed setters leave the value alone
        assert_eq!(el.value_as_string().unwrap(), "MR");

        el.set_value_from_object_array(vec![]).unwrap();
        assert_eq!(el.length(), 0);
    }
}
