//! Behavior shared by all element types,
//! exercised through the public API.

use dicom_element::element::{
    self, AttributeTagElement, DateElement, Element, MultiStringElement, NumericValue,
    StringElement, ValueElement,
};
use dicom_element::error::Error;
use dicom_element::transfer_syntax::{
    TransferSyntaxIndex, TransferSyntaxRegistry, EXPLICIT_VR_LITTLE_ENDIAN,
    IMPLICIT_VR_LITTLE_ENDIAN,
};
use dicom_element::value::{DateRange, DateValue, MIN_VALUE};
use dicom_element::{AnyElement, DicomValue, Endianness, Tag, VR};

fn round_trip<T: NumericValue>(vr: VR, values: &[T]) {
    let mut el = ValueElement::<T>::new(Tag(0x0009, 0x1002), vr);
    el.set_values(values).unwrap();
    assert_eq!(el.get_values().unwrap(), values, "{}", vr);
    assert_eq!(el.value_multiplicity().unwrap(), values.len());
    assert_eq!(el.length() as usize, values.len() * T::SIZE);

    // same values after a trip through the opposite byte order
    el.select_byte_order(Endianness::native().to_opposite())
        .unwrap();
    assert_eq!(el.get_values().unwrap(), values, "{}", vr);
}

#[test]
fn numeric_values_round_trip() {
    round_trip::<u8>(VR::OB, &[0, 1, 0x7F, 0xFF]);
    round_trip::<u8>(VR::UN, &[0xAA]);
    round_trip::<u16>(VR::OW, &[0, 0xFFFF, 0x1234]);
    round_trip::<u16>(VR::US, &[512, 1]);
    round_trip::<i16>(VR::SS, &[i16::MIN, -1, 0, i16::MAX]);
    round_trip::<i32>(VR::SL, &[i32::MIN, 7]);
    round_trip::<u32>(VR::UL, &[u32::MAX, 0]);
    round_trip::<f32>(VR::FL, &[0.5, -1.25, f32::MAX]);
    round_trip::<f32>(VR::OF, &[3.0]);
    round_trip::<f64>(VR::FD, &[std::f64::consts::PI, -0.0, 1e300]);
}

#[test]
fn multiplicity_of_multi_valued_text() {
    for text in &["", "A", "A\\B", "A\\\\C", "\\"] {
        let mut el = MultiStringElement::new(Tag(0x0008, 0x0008), VR::CS);
        el.set_value(text).unwrap();
        assert_eq!(
            el.value_multiplicity().unwrap(),
            text.split('\\').count(),
            "`{}`",
            text
        );
    }
}

#[test]
fn single_valued_text_is_never_split() {
    let mut el = StringElement::new(Tag(0x0008, 0x103E), VR::LO);
    el.set_value("A\\B\\C").unwrap();
    assert_eq!(el.value_multiplicity().unwrap(), 1);
    assert!(matches!(
        el.get_value(1),
        Err(Error::IndexOutOfRange { .. })
    ));
}

#[test]
fn write_length() {
    let mut us = ValueElement::<u16>::new(Tag(0x0028, 0x0010), VR::US);
    us.set_values(&[1, 2]).unwrap();
    assert_eq!(us.write_length(&EXPLICIT_VR_LITTLE_ENDIAN), 4 + 2 + 2 + 4);

    let mut ob = ValueElement::<u8>::new(Tag(0x7FE0, 0x0010), VR::OB);
    ob.set_values(&[1, 2, 3, 4]).unwrap();
    assert_eq!(ob.write_length(&EXPLICIT_VR_LITTLE_ENDIAN), 4 + 2 + 6 + 4);
    assert_eq!(ob.write_length(&IMPLICIT_VR_LITTLE_ENDIAN), 4 + 4 + 4);

    let big = TransferSyntaxRegistry.get("1.2.840.10008.1.2.2").unwrap();
    let mut text = StringElement::new(Tag(0x0040, 0xA160), VR::UT);
    text.set_value("report").unwrap();
    assert_eq!(text.write_length(big), 4 + 2 + 6 + 6);
}

#[test]
fn date_parsing() {
    let mut el = DateElement::new(Tag(0x0008, 0x0020));
    el.set_value("20230615").unwrap();
    let date = el.get_date_time(0).unwrap().parsed().unwrap();
    assert_eq!(date.to_string(), "2023-06-15 00:00:00");

    el.set_value("").unwrap();
    let range = el.get_date_time_range().unwrap();
    assert_eq!(range.bounds().as_slice(), &[MIN_VALUE, MIN_VALUE]);

    el.set_value("20230101-20231231").unwrap();
    let range = el.get_date_time_range().unwrap();
    assert!(range.lower().is_some());
    assert!(range.upper().is_some());

    el.set_value("bogus").unwrap();
    assert_eq!(el.get_date_time(0).unwrap(), DateValue::Unparseable);
    assert_eq!(
        el.get_date_time_range().unwrap(),
        DateRange::Exact(DateValue::Unparseable)
    );
}

#[test]
fn attribute_tags() {
    let mut el = AttributeTagElement::new(Tag(0x0020, 0x9165));
    el.set_values(&[Tag(0x0008, 0x0010)]).unwrap();
    assert_eq!(el.get_values().unwrap(), vec![Tag(0x0008, 0x0010)]);
    assert_eq!(el.value_as_string().unwrap(), "00080010");
}

#[test]
fn factory() {
    let name = element::create(Tag(0x0010, 0x0010)).unwrap();
    assert!(matches!(name, AnyElement::Str(_)));
    assert_eq!(name.value_type(), dicom_element::value::ValueType::Str);

    assert!(matches!(
        element::create_with_vr(Tag(0x0008, 0x1115), VR::SQ),
        Err(Error::UnsupportedVr { .. })
    ));
}

#[test]
fn factory_maps_each_vr_once() {
    let mut kinds = std::collections::HashMap::new();
    for vr in VR::ALL.iter().copied().filter(|vr| *vr != VR::SQ) {
        let ctor = element::constructor_for(vr).unwrap();
        let built = ctor(Tag(0x0009, 0x1010), vr, 0, Default::default());
        assert_eq!(built.vr(), vr);
        kinds
            .entry(std::mem::discriminant(&built))
            .or_insert_with(Vec::new)
            .push(vr);
    }
    // 26 leaf VRs over 16 element kinds
    assert_eq!(kinds.values().map(Vec::len).sum::<usize>(), 26);
    assert_eq!(kinds.len(), 16);
    assert!(element::constructor_for(VR::SQ).is_none());
}

#[test]
fn change_endian_twice_is_identity() {
    let mut elements: Vec<AnyElement> = vec![
        element::create_with_vr(Tag(0x0018, 0x9087), VR::FD).unwrap(),
        element::create_with_vr(Tag(0x0028, 0x0009), VR::AT).unwrap(),
        element::create_with_vr(Tag(0x0010, 0x0010), VR::PN).unwrap(),
    ];
    elements[0]
        .set_value_from_object_array(vec![DicomValue::F64(1.5), DicomValue::F64(-2.0)])
        .unwrap();
    elements[1].set_value_from_string("00181063\\00540080").unwrap();
    elements[2].set_value_from_string("Doe^John").unwrap();

    for el in &mut elements {
        let original = el.buffer().to_bytes().unwrap();
        let order = el.buffer().endianness();
        el.change_endian().unwrap();
        assert_eq!(el.buffer().endianness(), order.to_opposite());
        el.change_endian().unwrap();
        assert_eq!(el.buffer().to_bytes().unwrap(), original);
        assert_eq!(el.buffer().endianness(), order);
    }
}

#[test]
fn malformed_text_never_fails() {
    let mut us = element::create_with_vr(Tag(0x0028, 0x0010), VR::US).unwrap();
    us.set_value_from_string("12\\abc\\34").unwrap();
    assert_eq!(us.value_as_string().unwrap(), "12\\34");

    let mut at = element::create_with_vr(Tag(0x0028, 0x0009), VR::AT).unwrap();
    at.set_value_from_string("nonsense").unwrap();
    assert_eq!(at.value_as_string().unwrap(), "00000000");

    let mut tm = element::create_with_vr(Tag(0x0008, 0x0030), VR::TM).unwrap();
    tm.set_value_from_string("noon").unwrap();
    assert_eq!(
        tm.value_as_object().unwrap(),
        Some(DicomValue::DateTime(DateValue::Unparseable))
    );

    // structural misuse is always reported
    assert!(matches!(
        us.set_value_from_object(DicomValue::from("12")),
        Err(Error::TypeMismatch { .. })
    ));
}
