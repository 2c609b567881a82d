//! Numbers written as text: decimal strings (DS) and integer strings (IS).
//!
//! Their native value type is text.
//! The numeric accessors here are strict
//! and report malformed numbers as errors.

use super::{Element, MultiStringElement};
use crate::buffer::ByteBuffer;
use crate::error::{ParseNumberSnafu, Result};
use crate::header::{Tag, VR};
use crate::value::{DicomValue, ValueType};
use snafu::OptionExt;
use std::str::FromStr;

fn parse_number<T: FromStr>(text: &str) -> Result<T> {
    let text = text.trim();
    text.parse().ok().context(ParseNumberSnafu { value: text })
}

fn parse_all<T: FromStr>(inner: &MultiStringElement) -> Result<Vec<T>> {
    if inner.length() == 0 {
        return Ok(Vec::new());
    }
    inner
        .get_values()?
        .iter()
        .map(|v| parse_number(v))
        .collect()
}

/// Implement [`Element`] for a number string type,
/// with text as the native value type.
macro_rules! impl_number_string_element {
    ($typ: ident) => {
        impl Element for $typ {
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
    };
}

/// A decimal string element (DS).
#[derive(Debug, Clone, PartialEq)]
pub struct DecimalStringElement {
    inner: MultiStringElement,
}

super::multi_string_accessors!(DecimalStringElement, VR::DS);

impl DecimalStringElement {
    /// Create an element over an existing value buffer.
    pub fn from_parts(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> Self {
        DecimalStringElement {
            inner: MultiStringElement::from_parts(tag, vr, position, buffer),
        }
    }

    /// The value at the given index as a number.
    pub fn get_f64(&self, index: usize) -> Result<f64> {
        parse_number(&self.inner.get_value(index)?)
    }

    /// All values as numbers.
    /// An empty element has no values.
    pub fn get_f64s(&self) -> Result<Vec<f64>> {
        parse_all(&self.inner)
    }

    /// Replace the value with a single number.
    pub fn set_f64(&mut self, value: f64) -> Result<()> {
        self.inner.set_value(&value.to_string())
    }

    /// Replace the value with several numbers.
    pub fn set_f64s(&mut self, values: &[f64]) -> Result<()> {
        let texts: Vec<String> = values.iter().map(f64::to_string).collect();
        self.inner.set_values(&texts)
    }
}

impl_number_string_element!(DecimalStringElement);

/// An integer string element (IS).
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerStringElement {
    inner: MultiStringElement,
}

super::multi_string_accessors!(IntegerStringElement, VR::IS);

impl IntegerStringElement {
    /// Create an element over an existing value buffer.
    pub fn from_parts(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> Self {
        IntegerStringElement {
            inner: MultiStringElement::from_parts(tag, vr, position, buffer),
        }
    }

    /// The value at the given index as a number.
    pub fn get_i32(&self, index: usize) -> Result<i32> {
        parse_number(&self.inner.get_value(index)?)
    }

    /// All values as numbers.
    /// An empty element has no values.
    pub fn get_i32s(&self) -> Result<Vec<i32>> {
        parse_all(&self.inner)
    }

    /// Replace the value with a single number.
    pub fn set_i32(&mut self, value: i32) -> Result<()> {
        self.inner.set_value(&value.to_string())
    }

    /// Replace the value with several numbers.
    pub fn set_i32s(&mut self, values: &[i32]) -> Result<()> {
        let texts: Vec<String> = values.iter().map(i32::to_string).collect();
        self.inner.set_values(&texts)
    }
}

impl_number_string_element!(IntegerStringElement);
