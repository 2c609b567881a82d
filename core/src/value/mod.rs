//! Typed values exchanged with data elements.
//!
//! [`DicomValue`] is the type-erased path used by generic data set code:
//! each element declares its native [`ValueType`]
//! and refuses values of any other type.

use crate::header::Tag;
use smallvec::SmallVec;
use std::convert::TryFrom;

pub mod range;

pub use self::range::{DateRange, DateValue, MIN_VALUE};

/// An aggregation of one or more elements in a value.
pub type C<T> = SmallVec<[T; 2]>;

/// The type of a single [`DicomValue`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Text
    Str,
    /// Date, time or date-time
    DateTime,
    /// Range of date, time or date-time values
    DateRange,
    /// Attribute tag
    Tag,
    /// Unsigned 8-bit integer
    U8,
    /// Signed 8-bit integer
    I8,
    /// Signed 16-bit integer
    I16,
    /// Unsigned 16-bit integer
    U16,
    /// Signed 32-bit integer
    I32,
    /// Unsigned 32-bit integer
    U32,
    /// Signed 64-bit integer
    I64,
    /// Unsigned 64-bit integer
    U64,
    /// 32-bit floating point number
    F32,
    /// 64-bit floating point number
    F64,
}

/// A single element value in its native type.
///
/// # Example
///
/// ```
/// # use dicom_element::value::{DicomValue, ValueType};
/// let value = DicomValue::from(512_u16);
/// assert_eq!(value, DicomValue::U16(512));
/// assert_eq!(value.value_type(), ValueType::U16);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DicomValue {
    /// Text, for the string VRs
    Str(String),
    /// A date, time or date-time, for DA, TM and DT
    DateTime(DateValue),
    /// A range query value, for DA, TM and DT
    DateRange(DateRange),
    /// An attribute tag, for AT
    Tag(Tag),
    /// Used for OB and UN
    U8(u8),
    /// A signed byte
    I8(i8),
    /// Used for SS
    I16(i16),
    /// Used for US and OW
    U16(u16),
    /// Used for SL
    I32(i32),
    /// Used for UL
    U32(u32),
    /// A signed 64-bit integer
    I64(i64),
    /// An unsigned 64-bit integer
    U64(u64),
    /// Used for FL and OF
    F32(f32),
    /// Used for FD
    F64(f64),
}

impl DicomValue {
    /// The type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            DicomValue::Str(_) => ValueType::Str,
            DicomValue::DateTime(_) => ValueType::DateTime,
            DicomValue::DateRange(_) => ValueType::DateRange,
            DicomValue::Tag(_) => ValueType::Tag,
            DicomValue::U8(_) => ValueType::U8,
            DicomValue::I8(_) => ValueType::I8,
            DicomValue::I16(_) => ValueType::I16,
            DicomValue::U16(_) => ValueType::U16,
            DicomValue::I32(_) => ValueType::I32,
            DicomValue::U32(_) => ValueType::U32,
            DicomValue::I64(_) => ValueType::I64,
            DicomValue::U64(_) => ValueType::U64,
            DicomValue::F32(_) => ValueType::F32,
            DicomValue::F64(_) => ValueType::F64,
        }
    }
}

/// Implement the conversions between a native type and a [`DicomValue`].
/// Extracting the wrong variant gives back the original value.
macro_rules! impl_from_for_value {
    ($typ: ty, $variant: ident) => {
        impl From<$typ> for DicomValue {
            fn from(value: $typ) -> Self {
                DicomValue::$variant(value)
            }
        }

        impl TryFrom<DicomValue> for $typ {
            type Error = DicomValue;

            fn try_from(value: DicomValue) -> Result<Self, Self::Error> {
                match value {
                    DicomValue::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }
    };
}

impl_from_for_value!(String, Str);
impl_from_for_value!(DateValue, DateTime);
impl_from_for_value!(DateRange, DateRange);
impl_from_for_value!(Tag, Tag);
impl_from_for_value!(u8, U8);
impl_from_for_value!(i8, I8);
impl_from_for_value!(i16, I16);
impl_from_for_value!(u16, U16);
impl_from_for_value!(i32, I32);
impl_from_for_value!(u32, U32);
impl_from_for_value!(i64, I64);
impl_from_for_value!(u64, U64);
impl_from_for_value!(f32, F32);
impl_from_for_value!(f64, F64);

impl From<&str> for DicomValue {
    fn from(value: &str) -> Self {
        DicomValue::Str(value.to_owned())
    }
}

impl From<chrono::NaiveDateTime> for DicomValue {
    fn from(value: chrono::NaiveDateTime) -> Self {
        DicomValue::DateTime(DateValue::Parsed(value))
    }
}
