//! Unique identifier elements (UI).

use super::{Element, MultiStringElement};
use crate::buffer::ByteBuffer;
use crate::dictionary::{StandardUidDictionary, UidDictionary, UidDictionaryEntry, UidDictionaryEntryRef};
use crate::error::Result;
use crate::header::{Tag, VR};
use crate::transfer_syntax::{TransferSyntax, TransferSyntaxIndex, TransferSyntaxRegistry};
use crate::value::{DicomValue, ValueType};

/// An element holding unique identifiers,
/// which can be resolved to their registry entries.
///
/// An identifier missing from the registry is not an error:
/// the lookup yields `None` and the text stays available.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueIdentifierElement {
    inner: MultiStringElement,
}

super::multi_string_accessors!(UniqueIdentifierElement, VR::UI);

impl UniqueIdentifierElement {
    /// Create an element over an existing value buffer.
    pub fn from_parts(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> Self {
        UniqueIdentifierElement {
            inner: MultiStringElement::from_parts(tag, vr, position, buffer),
        }
    }

    /// Look up the first value in the standard UID dictionary.
    pub fn uid(&self) -> Result<Option<&'static UidDictionaryEntryRef<'static>>> {
        self.uid_with(&StandardUidDictionary)
    }

    /// Look up the first value in the given UID dictionary.
    pub fn uid_with<'d, D>(&self, dict: &'d D) -> Result<Option<&'d D::Entry>>
    where
        D: UidDictionary,
    {
        let uid = self.inner.get_value(0)?;
        Ok(dict.by_uid(&uid))
    }

    /// Resolve the first value to a known transfer syntax.
    pub fn transfer_syntax(&self) -> Result<Option<&'static TransferSyntax>> {
        self.transfer_syntax_with(&StandardUidDictionary, &TransferSyntaxRegistry)
    }

    /// Resolve the first value to a transfer syntax,
    /// going through the given UID dictionary and transfer syntax index.
    pub fn transfer_syntax_with<'i, D, I>(
        &self,
        dict: &D,
        index: &'i I,
    ) -> Result<Option<&'i TransferSyntax>>
    where
        D: UidDictionary,
        I: TransferSyntaxIndex,
    {
        Ok(self
            .uid_with(dict)?
            .and_then(|entry| index.get(entry.uid())))
    }

    /// Replace the value with a single identifier.
    pub fn set_uid(&mut self, uid: &str) -> Result<()> {
        self.inner.set_value(uid)
    }

    /// Replace the value with the identifier of a transfer syntax.
    pub fn set_transfer_syntax(&mut self, ts: &TransferSyntax) -> Result<()> {
        self.inner.set_value(ts.uid())
    }
}

impl Element for UniqueIdentifierElement {
    crate::element::delegate_string_element!(inner);

    fn value_type(&self) -> ValueType {
        ValueType::Str
    }

    fn value_as_object(&self) -> Result<Option<DicomValue>> {
        self.inner.value_as_object()
    }

    fn value_as_object_array(&self) -> Result<Vec<DicomValue>> {
        self.inner.value_as_object_array()
    }

    fn set_value_from_object(&mut self, value: DicomValue) -> Result<()> {
        self.inner.set_value_from_object(value)
    }

    fn set_value_from_object_array(&mut self, values: Vec<DicomValue>) -> Result<()> {
        self.inner.set_value_from_object_array(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::UidType;
    use crate::transfer_syntax::EXPLICIT_VR_BIG_ENDIAN;
    use byteordered::Endianness;

    #[test]
    fn known_uid_is_resolved() {
        let mut el = UniqueIdentifierElement::new(Tag(0x0008, 0x0016));
        el.set_uid("1.2.840.10008.5.1.4.1.1.2").unwrap();
        // odd length, padded with a null byte
        assert_eq!(el.length(), 26);
        let entry = el.uid().unwrap().unwrap();
        assert_eq!(entry.name(), "CT Image Storage");
        assert_eq!(entry.uid_type(), UidType::SopClass);
        assert_eq!(el.transfer_syntax().unwrap(), None);
    }

    #[test]
    fn unknown_uid_is_not_an_error() {
        let mut el = UniqueIdentifierElement::new(Tag(0x0020, 0x000D));
        el.set_uid("1.2.3.4.5").unwrap();
        assert_eq!(el.uid().unwrap(), None);
        assert_eq!(el.get_value(0).unwrap(), "1.2.3.4.5");
    }

    #[test]
    fn transfer_syntax_round_trip() {
        let mut el = UniqueIdentifierElement::new(Tag(0x0002, 0x0010));
        el.set_transfer_syntax(&EXPLICIT_VR_BIG_ENDIAN).unwrap();
        let ts = el.transfer_syntax().unwrap().unwrap();
        assert_eq!(ts.endianness(), Endianness::Big);
        assert!(ts.is_explicit_vr());

        el.set_value_from_string("1.2.840.10008.1.2").unwrap();
        let ts = el.transfer_syntax().unwrap().unwrap();
        assert!(!ts.is_explicit_vr());
    }
}
