//! Fixed-width binary values (OB, OF, OW, FD, FL, SL, SS, UL, UN, US).
//!
//! A single generic element type serves every binary VR,
//! parameterized by the primitive type of one value.
//! Bytes are decoded from and encoded to the buffer
//! with explicit byte order codecs.

use super::{cast_value, cast_values, Element, ElementBase};
use crate::buffer::ByteBuffer;
use crate::error::{IndexOutOfRangeSnafu, NarrowConvertSnafu, Result};
use crate::header::{Tag, VR};
use crate::value::{DicomValue, ValueType};
use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian};
use byteordered::Endianness;
use num_traits::NumCast;
use snafu::OptionExt;
use std::convert::TryFrom;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// How numbers are written in the text form of a value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NumberStyle {
    /// Plain decimal numbers.
    Decimal,
    /// Zero-padded upper case hexadecimal digits,
    /// two per byte of the value type.
    Hex,
}

impl NumberStyle {
    /// The style used for values of the given VR.
    pub fn for_vr(vr: VR) -> Self {
        match vr {
            VR::OB | VR::OW | VR::UN => NumberStyle::Hex,
            _ => NumberStyle::Decimal,
        }
    }
}

/// A primitive type which can be held by a [`ValueElement`].
pub trait NumericValue:
    Copy
    + Default
    + PartialEq
    + fmt::Debug
    + fmt::Display
    + FromStr
    + NumCast
    + Into<DicomValue>
    + TryFrom<DicomValue, Error = DicomValue>
    + 'static
{
    /// The number of bytes of one value.
    const SIZE: usize;

    /// The value type reported by elements of this type.
    const VALUE_TYPE: ValueType;

    /// Decode `dst.len()` values from `src`.
    fn read_into<B: ByteOrder>(src: &[u8], dst: &mut [Self]);

    /// Encode all of `src` into `dst`.
    fn write_into<B: ByteOrder>(src: &[Self], dst: &mut [u8]);

    /// Parse hexadecimal digits.
    fn from_hex(text: &str) -> Option<Self>;

    /// Write the value in upper case hexadecimal digits.
    fn to_hex(self) -> String;
}

macro_rules! impl_numeric_value {
    (int $typ: ty, $variant: ident, $read: ident, $write: ident) => {
        impl NumericValue for $typ {
            const SIZE: usize = std::mem::size_of::<$typ>();
            const VALUE_TYPE: ValueType = ValueType::$variant;

            fn read_into<B: ByteOrder>(src: &[u8], dst: &mut [Self]) {
                B::$read(src, dst)
            }

            fn write_into<B: ByteOrder>(src: &[Self], dst: &mut [u8]) {
                B::$write(src, dst)
            }

            fn from_hex(text: &str) -> Option<Self> {
                <$typ>::from_str_radix(text, 16).ok()
            }

            fn to_hex(self) -> String {
                format!("{:0width$X}", self, width = Self::SIZE * 2)
            }
        }
    };
    (float $typ: ty, $variant: ident, $read: ident, $write: ident) => {
        impl NumericValue for $typ {
            const SIZE: usize = std::mem::size_of::<$typ>();
            const VALUE_TYPE: ValueType = ValueType::$variant;

            fn read_into<B: ByteOrder>(src: &[u8], dst: &mut [Self]) {
                B::$read(src, dst)
            }

            fn write_into<B: ByteOrder>(src: &[Self], dst: &mut [u8]) {
                B::$write(src, dst)
            }

            fn from_hex(_text: &str) -> Option<Self> {
                None
            }

            fn to_hex(self) -> String {
                self.to_string()
            }
        }
    };
}

impl_numeric_value!(int i16, I16, read_i16_into, write_i16_into);
impl_numeric_value!(int u16, U16, read_u16_into, write_u16_into);
impl_numeric_value!(int i32, I32, read_i32_into, write_i32_into);
impl_numeric_value!(int u32, U32, read_u32_into, write_u32_into);
impl_numeric_value!(int i64, I64, read_i64_into, write_i64_into);
impl_numeric_value!(int u64, U64, read_u64_into, write_u64_into);
impl_numeric_value!(float f32, F32, read_f32_into, write_f32_into);
impl_numeric_value!(float f64, F64, read_f64_into, write_f64_into);

// single bytes have no byte order
impl NumericValue for u8 {
    const SIZE: usize = 1;
    const VALUE_TYPE: ValueType = ValueType::U8;

    fn read_into<B: ByteOrder>(src: &[u8], dst: &mut [Self]) {
        dst.copy_from_slice(src);
    }

    fn write_into<B: ByteOrder>(src: &[Self], dst: &mut [u8]) {
        dst.copy_from_slice(src);
    }

    fn from_hex(text: &str) -> Option<Self> {
        u8::from_str_radix(text, 16).ok()
    }

    fn to_hex(self) -> String {
        format!("{:02X}", self)
    }
}

impl NumericValue for i8 {
    const SIZE: usize = 1;
    const VALUE_TYPE: ValueType = ValueType::I8;

    fn read_into<B: ByteOrder>(src: &[u8], dst: &mut [Self]) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = *s as i8;
        }
    }

    fn write_into<B: ByteOrder>(src: &[Self], dst: &mut [u8]) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = *s as u8;
        }
    }

    fn from_hex(text: &str) -> Option<Self> {
        i8::from_str_radix(text, 16).ok()
    }

    fn to_hex(self) -> String {
        format!("{:02X}", self)
    }
}

/// Decode all whole values in `bytes`, stored in the given byte order.
fn decode<T: NumericValue>(bytes: &[u8], endianness: Endianness) -> Vec<T> {
    let mut values = vec![T::default(); bytes.len() / T::SIZE];
    let src = &bytes[..values.len() * T::SIZE];
    match endianness {
        Endianness::Little => T::read_into::<LittleEndian>(src, &mut values),
        Endianness::Big => T::read_into::<BigEndian>(src, &mut values),
    }
    values
}

/// Encode values in the machine's byte order.
fn encode_native<T: NumericValue>(values: &[T]) -> Vec<u8> {
    let mut bytes = vec![0; values.len() * T::SIZE];
    T::write_into::<NativeEndian>(values, &mut bytes);
    bytes
}

/// Parse one item of a value's text form.
fn parse_item<T: NumericValue>(text: &str, style: NumberStyle) -> Option<T> {
    let text = text.trim();
    match style {
        NumberStyle::Hex => T::from_hex(text),
        NumberStyle::Decimal => text.parse().ok().or_else(|| {
            // integral numbers written with a fraction or exponent
            text.parse::<f64>()
                .ok()
                .filter(|v| v.fract() == 0.)
                .and_then(|v| <T as NumCast>::from(v))
        }),
    }
}

/// A binary element holding a sequence of fixed-width values.
///
/// Reads decode the bytes as they are stored,
/// so the buffer is never changed by an accessor.
/// Writes replace the whole buffer with bytes in the machine's byte order.
///
/// # Example
///
/// ```
/// # use dicom_element::element::{Element, ValueElement};
/// # use dicom_element::header::{Tag, VR};
/// let mut rows = ValueElement::<u16>::new(Tag(0x0028, 0x0010), VR::US);
/// rows.set_values(&[512, 256])?;
/// assert_eq!(rows.value_multiplicity()?, 2);
/// assert_eq!(rows.value_as_string()?, "512\\256");
/// # Ok::<(), dicom_element::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValueElement<T> {
    base: ElementBase,
    style: NumberStyle,
    phantom: PhantomData<T>,
}

impl<T: NumericValue> ValueElement<T> {
    /// Create an empty element in the machine's byte order.
    pub fn new(tag: Tag, vr: VR) -> Self {
        ValueElement::from_parts(tag, vr, 0, ByteBuffer::new())
    }

    /// Create an element over an existing value buffer.
    pub fn from_parts(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> Self {
        ValueElement {
            base: ElementBase::new(tag, vr, position, buffer),
            style: NumberStyle::for_vr(vr),
            phantom: PhantomData,
        }
    }

    /// The style of the value's text form.
    pub fn style(&self) -> NumberStyle {
        self.style
    }

    fn len(&self) -> usize {
        self.base.buffer.len() / T::SIZE
    }

    /// The value at the given index.
    pub fn get_value(&self, index: usize) -> Result<T> {
        let len = self.len();
        if index >= len {
            return IndexOutOfRangeSnafu { index, len }.fail();
        }
        let bytes = self.base.buffer.bytes()?;
        let at = index * T::SIZE;
        // a source may yield fewer bytes than recorded
        let chunk = bytes.get(at..at + T::SIZE).context(IndexOutOfRangeSnafu {
            index,
            len: bytes.len() / T::SIZE,
        })?;
        let value = decode::<T>(chunk, self.base.buffer.endianness());
        Ok(value[0])
    }

    /// All values.
    pub fn get_values(&self) -> Result<Vec<T>> {
        let bytes = self.base.buffer.bytes()?;
        Ok(decode(&bytes, self.base.buffer.endianness()))
    }

    /// Replace the value with a single value.
    pub fn set_value(&mut self, value: T) -> Result<()> {
        self.set_values(&[value])
    }

    /// Replace the value with the given values.
    pub fn set_values(&mut self, values: &[T]) -> Result<()> {
        let buffer = &mut self.base.buffer;
        buffer.set_bytes(encode_native(values));
        buffer.set_endianness(Endianness::native());
        Ok(())
    }

    /// All values converted to another numeric type.
    ///
    /// Fails if a value cannot be represented in the target type.
    pub fn values_as<U: NumCast>(&self) -> Result<Vec<U>> {
        self.get_values()?
            .into_iter()
            .map(|v| {
                U::from(v).context(NarrowConvertSnafu {
                    value: v.to_string(),
                })
            })
            .collect()
    }

    fn format(&self, value: T) -> String {
        match self.style {
            NumberStyle::Decimal => value.to_string(),
            NumberStyle::Hex => value.to_hex(),
        }
    }
}

impl<T: NumericValue> Element for ValueElement<T> {
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
        Ok(itertools::join(values.into_iter().map(|v| self.format(v)), "\\"))
    }

    fn set_value_from_string(&mut self, value: &str) -> Result<()> {
        if value.is_empty() {
            return self.set_values(&[]);
        }
        let style = self.style;
        let values: Vec<T> = value
            .split('\\')
            .filter_map(|item| {
                let parsed = parse_item(item, style);
                if parsed.is_none() {
                    tracing::warn!(
                        "Dropping malformed {} value `{}` of element {}",
                        self.base.vr,
                        item,
                        self.base.tag
                    );
                }
                parsed
            })
            .collect();
        self.set_values(&values)
    }

    fn value_type(&self) -> ValueType {
        T::VALUE_TYPE
    }

    fn value_as_object(&self) -> Result<Option<DicomValue>> {
        if self.len() == 0 {
            return Ok(None);
        }
        self.get_value(0).map(|v| Some(v.into()))
    }

    fn value_as_object_array(&self) -> Result<Vec<DicomValue>> {
        Ok(self.get_values()?.into_iter().map(Into::into).collect())
    }

    fn set_value_from_object(&mut self, value: DicomValue) -> Result<()> {
        let value: T = cast_value(self.base.vr, T::VALUE_TYPE, value)?;
        self.set_value(value)
    }

    fn set_value_from_object_array(&mut self, values: Vec<DicomValue>) -> Result<()> {
        let values: Vec<T> = cast_values(self.base.vr, T::VALUE_TYPE, values)?;
        self.set_values(&values)
    }
}
