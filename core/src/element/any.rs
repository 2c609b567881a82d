//! A closed sum of every concrete element type.

use super::{
    AttributeTagElement, DateElement, DateTimeElement, DecimalStringElement, Element, ElementBase,
    IntegerStringElement, MultiStringElement, StringElement, TimeElement,
    UniqueIdentifierElement, ValueElement,
};
use crate::error::Result;
use crate::value::{DicomValue, ValueType};

/// An element of any supported value representation,
/// as built by the [factory](super::factory).
#[derive(Debug, Clone, PartialEq)]
pub enum AnyElement {
    /// LO, LT, PN, SH, ST, UT
    Str(StringElement),
    /// AE, AS, CS
    MultiStr(MultiStringElement),
    /// DA
    Date(DateElement),
    /// TM
    Time(TimeElement),
    /// DT
    DateTime(DateTimeElement),
    /// DS
    DecimalString(DecimalStringElement),
    /// IS
    IntegerString(IntegerStringElement),
    /// UI
    Uid(UniqueIdentifierElement),
    /// AT
    AttributeTag(AttributeTagElement),
    /// OB, UN
    U8(ValueElement<u8>),
    /// SS
    I16(ValueElement<i16>),
    /// US, OW
    U16(ValueElement<u16>),
    /// SL
    I32(ValueElement<i32>),
    /// UL
    U32(ValueElement<u32>),
    /// FL, OF
    F32(ValueElement<f32>),
    /// FD
    F64(ValueElement<f64>),
}

macro_rules! dispatch {
    ($self: expr, $e: ident => $body: expr) => {
        match $self {
            AnyElement::Str($e) => $body,
            AnyElement::MultiStr($e) => $body,
            AnyElement::Date($e) => $body,
            AnyElement::Time($e) => $body,
            AnyElement::DateTime($e) => $body,
            AnyElement::DecimalString($e) => $body,
            AnyElement::IntegerString($e) => $body,
            AnyElement::Uid($e) => $body,
            AnyElement::AttributeTag($e) => $body,
            AnyElement::U8($e) => $body,
            AnyElement::I16($e) => $body,
            AnyElement::U16($e) => $body,
            AnyElement::I32($e) => $body,
            AnyElement::U32($e) => $body,
            AnyElement::F32($e) => $body,
            AnyElement::F64($e) => $body,
        }
    };
}

impl AnyElement {
    /// Borrow the element as a trait object.
    pub fn as_element(&self) -> &dyn Element {
        dispatch!(self, e => e as &dyn Element)
    }

    /// Mutably borrow the element as a trait object.
    pub fn as_element_mut(&mut self) -> &mut dyn Element {
        dispatch!(self, e => e as &mut dyn Element)
    }
}

impl Element for AnyElement {
    fn base(&self) -> &ElementBase {
        dispatch!(self, e => e.base())
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        dispatch!(self, e => e.base_mut())
    }

    fn value_multiplicity(&self) -> Result<usize> {
        dispatch!(self, e => e.value_multiplicity())
    }

    fn value_as_string(&self) -> Result<String> {
        dispatch!(self, e => e.value_as_string())
    }

    fn set_value_from_string(&mut self, value: &str) -> Result<()> {
        dispatch!(self, e => e.set_value_from_string(value))
    }

    fn value_type(&self) -> ValueType {
        dispatch!(self, e => e.value_type())
    }

    fn value_as_object(&self) -> Result<Option<DicomValue>> {
        dispatch!(self, e => e.value_as_object())
    }

    fn value_as_object_array(&self) -> Result<Vec<DicomValue>> {
        dispatch!(self, e => e.value_as_object_array())
    }

    fn set_value_from_object(&mut self, value: DicomValue) -> Result<()> {
        dispatch!(self, e => e.set_value_from_object(value))
    }

    fn set_value_from_object_array(&mut self, values: Vec<DicomValue>) -> Result<()> {
        dispatch!(self, e => e.set_value_from_object_array(values))
    }

    fn swap_unit_size(&self) -> usize {
        dispatch!(self, e => e.swap_unit_size())
    }
}
