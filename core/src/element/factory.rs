//! Construction of elements from a tag and a value representation.
//!
//! The value representation picks the concrete element type
//! through a static mapping, see [`constructor_for`].
//! Sequences (SQ) hold nested data sets
//! and cannot be built here.

use super::{
    AnyElement, AttributeTagElement, DateElement, DateTimeElement, DecimalStringElement,
    IntegerStringElement, MultiStringElement, StringElement, TimeElement,
    UniqueIdentifierElement, ValueElement,
};
use crate::buffer::ByteBuffer;
use crate::dictionary::{DataDictionary, StandardDataDictionary};
use crate::error::{Result, UnsupportedVrSnafu};
use crate::header::{Tag, VR};
use byteordered::Endianness;
use snafu::OptionExt;
use std::str::FromStr;

/// A function building an element of one concrete type
/// from its tag, VR, stream position and value buffer.
pub type ElementConstructor = fn(Tag, VR, u64, ByteBuffer) -> AnyElement;

fn string(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> AnyElement {
    AnyElement::Str(StringElement::from_parts(tag, vr, position, buffer))
}

fn multi_string(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> AnyElement {
    AnyElement::MultiStr(MultiStringElement::from_parts(tag, vr, position, buffer))
}

fn date(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> AnyElement {
    AnyElement::Date(DateElement::from_parts(tag, vr, position, buffer))
}

fn time(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> AnyElement {
    AnyElement::Time(TimeElement::from_parts(tag, vr, position, buffer))
}

fn date_time(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> AnyElement {
    AnyElement::DateTime(DateTimeElement::from_parts(tag, vr, position, buffer))
}

fn decimal_string(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> AnyElement {
    AnyElement::DecimalString(DecimalStringElement::from_parts(tag, vr, position, buffer))
}

fn integer_string(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> AnyElement {
    AnyElement::IntegerString(IntegerStringElement::from_parts(tag, vr, position, buffer))
}

fn uid(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> AnyElement {
    AnyElement::Uid(UniqueIdentifierElement::from_parts(tag, vr, position, buffer))
}

fn attribute_tag(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> AnyElement {
    AnyElement::AttributeTag(AttributeTagElement::from_parts(tag, vr, position, buffer))
}

macro_rules! numeric_constructor {
    ($name: ident, $variant: ident, $typ: ty) => {
        fn $name(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> AnyElement {
            AnyElement::$variant(ValueElement::<$typ>::from_parts(tag, vr, position, buffer))
        }
    };
}

numeric_constructor!(bytes, U8, u8);
numeric_constructor!(signed_short, I16, i16);
numeric_constructor!(unsigned_short, U16, u16);
numeric_constructor!(signed_long, I32, i32);
numeric_constructor!(unsigned_long, U32, u32);
numeric_constructor!(float, F32, f32);
numeric_constructor!(double, F64, f64);

/// The constructor of the concrete element type for a VR,
/// or `None` for sequences.
pub fn constructor_for(vr: VR) -> Option<ElementConstructor> {
    let ctor: ElementConstructor = match vr {
        VR::LO | VR::LT | VR::PN | VR::SH | VR::ST | VR::UT => string,
        VR::AE | VR::AS | VR::CS => multi_string,
        VR::DA => date,
        VR::TM => time,
        VR::DT => date_time,
        VR::DS => decimal_string,
        VR::IS => integer_string,
        VR::UI => uid,
        VR::AT => attribute_tag,
        VR::OB | VR::UN => bytes,
        VR::SS => signed_short,
        VR::US | VR::OW => unsigned_short,
        VR::SL => signed_long,
        VR::UL => unsigned_long,
        VR::FL | VR::OF => float,
        VR::FD => double,
        VR::SQ => return None,
    };
    Some(ctor)
}

/// Create an empty element,
/// with the VR given by the standard data dictionary.
///
/// Tags unknown to the dictionary get the VR UN.
pub fn create(tag: Tag) -> Result<AnyElement> {
    create_with_dictionary(&StandardDataDictionary, tag)
}

/// Create an empty element,
/// with the VR given by the provided data dictionary.
pub fn create_with_dictionary<D>(dict: &D, tag: Tag) -> Result<AnyElement>
where
    D: DataDictionary,
{
    create_with_vr(tag, dict.default_vr(tag))
}

/// Create an empty element in the machine's byte order.
pub fn create_with_vr(tag: Tag, vr: VR) -> Result<AnyElement> {
    create_at(tag, vr, 0, Endianness::native(), None)
}

/// Create an element read from a stream.
///
/// Without a buffer, the element starts empty
/// with the given byte order.
pub fn create_at(
    tag: Tag,
    vr: VR,
    position: u64,
    endianness: Endianness,
    buffer: Option<ByteBuffer>,
) -> Result<AnyElement> {
    let ctor = constructor_for(vr).context(UnsupportedVrSnafu { vr: vr.to_string() })?;
    let buffer = buffer.unwrap_or_else(|| ByteBuffer::with_endianness(endianness));
    Ok(ctor(tag, vr, position, buffer))
}

/// Create an element from the two-letter code of its VR.
pub fn create_from_code(
    tag: Tag,
    code: &str,
    position: u64,
    endianness: Endianness,
    buffer: Option<ByteBuffer>,
) -> Result<AnyElement> {
    let vr = VR::from_str(code)
        .ok()
        .context(UnsupportedVrSnafu { vr: code })?;
    create_at(tag, vr, position, endianness, buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::error::Error;

    #[test]
    fn every_vr_but_sequences_has_a_constructor() {
        for vr in VR::ALL.iter().copied() {
            match create_with_vr(Tag(0x0009, 0x1010), vr) {
                Ok(element) => {
                    assert_ne!(vr, VR::SQ);
                    assert_eq!(element.vr(), vr);
                    assert_eq!(element.length(), 0);
                }
                Err(Error::UnsupportedVr { vr: code, .. }) => {
                    assert_eq!(vr, VR::SQ);
                    assert_eq!(code, "SQ");
                }
                Err(e) => panic!("unexpected error {}", e),
            }
        }
    }

    #[test]
    fn dictionary_picks_the_element_type() {
        let name = create(Tag(0x0010, 0x0010)).unwrap();
        assert!(matches!(name, AnyElement::Str(_)));
        assert_eq!(name.vr(), VR::PN);

        let rows = create(Tag(0x0028, 0x0010)).unwrap();
        assert!(matches!(rows, AnyElement::U16(_)));

        let unknown = create(Tag(0x0011, 0x0001)).unwrap();
        assert_eq!(unknown.vr(), VR::UN);
        assert!(matches!(unknown, AnyElement::U8(_)));

        assert!(create(Tag(0xFFFE, 0xE000)).is_ok());
    }

    #[test]
    fn codes_are_checked() {
        let el = create_from_code(Tag(0x0008, 0x0060), "CS", 132, Endianness::Big, None).unwrap();
        assert!(matches!(el, AnyElement::MultiStr(_)));
        assert_eq!(el.position(), 132);
        assert_eq!(el.buffer().endianness(), Endianness::Big);

        assert!(matches!(
            create_from_code(Tag(0x0008, 0x0060), "XX", 0, Endianness::Little, None),
            Err(Error::UnsupportedVr { .. })
        ));
        assert!(matches!(
            create_from_code(Tag(0x0008, 0x1115), "SQ", 0, Endianness::Little, None),
            Err(Error::UnsupportedVr { .. })
        ));
    }

    #[test]
    fn buffer_is_kept() {
        let buffer = ByteBuffer::from_vec(vec![0x00, 0x02], Endianness::Big);
        let el = create_at(Tag(0x0028, 0x0010), VR::US, 0, Endianness::Little, Some(buffer)).unwrap();
        assert_eq!(el.value_as_string().unwrap(), "2");
    }
}
