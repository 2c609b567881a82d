//! The data element family.
//!
//! Every element holds a [`Tag`], a [`VR`] and a [`ByteBuffer`]
//! with the encoded value,
//! and converts between those bytes and typed values on demand.
//! The [`Element`] trait is the uniform contract
//! used by generic data set code;
//! each concrete type adds typed accessors for its value representation:
//!
//! | VR | type |
//! |----|------|
//! | LO, LT, PN, SH, ST, UT | [`StringElement`] |
//! | AE, AS, CS | [`MultiStringElement`] |
//! | DA, TM, DT | [`DateElement`], [`TimeElement`], [`DateTimeElement`] |
//! | DS, IS | [`DecimalStringElement`], [`IntegerStringElement`] |
//! | UI | [`UniqueIdentifierElement`] |
//! | AT | [`AttributeTagElement`] |
//! | OB, UN, OW, US, SS, SL, UL, FL, OF, FD | [`ValueElement`] |
//!
//! Elements are usually obtained through the [`factory`],
//! which picks the right type for a VR.

use crate::buffer::ByteBuffer;
use crate::error::{Result, TypeMismatchSnafu};
use crate::header::{Tag, VR};
use crate::transfer_syntax::TransferSyntax;
use crate::value::{DicomValue, ValueType};
use byteordered::Endianness;
use std::convert::TryFrom;
use std::fmt;

pub mod factory;
mod any;
mod date;
mod number_string;
mod numeric;
mod string;
mod tag;
mod uid;

pub use self::any::AnyElement;
pub use self::date::{
    DateElement, DateLayouts, DateTimeElement, DateTimeLayouts, Layouts, TemporalElement,
    TimeElement, TimeLayouts,
};
pub use self::factory::{
    constructor_for, create, create_at, create_from_code, create_with_dictionary, create_with_vr,
    ElementConstructor,
};
pub use self::number_string::{DecimalStringElement, IntegerStringElement};
pub use self::numeric::{NumberStyle, NumericValue, ValueElement};
pub use self::string::{MultiStringElement, StringElement};
pub use self::tag::AttributeTagElement;
pub use self::uid::UniqueIdentifierElement;

/// The state shared by all element types.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBase {
    /// the attribute tag
    pub tag: Tag,
    /// the value representation
    pub vr: VR,
    /// byte offset of the element in its source stream, 0 if built in memory
    pub position: u64,
    /// the encoded value
    pub buffer: ByteBuffer,
}

impl ElementBase {
    /// Create the base of an element.
    pub fn new(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> Self {
        ElementBase {
            tag,
            vr,
            position,
            buffer,
        }
    }
}

/// The uniform access contract of a data element.
///
/// Value accessors never change the stored bytes.
/// Byte order changes happen only through
/// [`change_endian`](Element::change_endian) and
/// [`select_byte_order`](Element::select_byte_order).
pub trait Element: fmt::Debug {
    /// The shared element state.
    fn base(&self) -> &ElementBase;

    /// Mutable access to the shared element state.
    fn base_mut(&mut self) -> &mut ElementBase;

    /// The attribute tag.
    fn tag(&self) -> Tag {
        self.base().tag
    }

    /// The value representation.
    fn vr(&self) -> VR {
        self.base().vr
    }

    /// The byte offset of the element in its source stream.
    fn position(&self) -> u64 {
        self.base().position
    }

    /// The value bytes.
    fn buffer(&self) -> &ByteBuffer {
        &self.base().buffer
    }

    /// Mutable access to the value bytes.
    fn buffer_mut(&mut self) -> &mut ByteBuffer {
        &mut self.base_mut().buffer
    }

    /// The byte length of the stored value.
    fn length(&self) -> u32 {
        self.buffer().len() as u32
    }

    /// The number of values held.
    fn value_multiplicity(&self) -> Result<usize>;

    /// The value in its canonical text form,
    /// several values separated by `\`.
    fn value_as_string(&self) -> Result<String>;

    /// Replace the value with the one described by the given text.
    ///
    /// Malformed numeric, date or tag items do not fail:
    /// they are dropped or replaced by a placeholder.
    fn set_value_from_string(&mut self, value: &str) -> Result<()>;

    /// The native type of the element's values.
    fn value_type(&self) -> ValueType;

    /// The first value, or `None` if there are none.
    fn value_as_object(&self) -> Result<Option<DicomValue>>;

    /// All values.
    fn value_as_object_array(&self) -> Result<Vec<DicomValue>>;

    /// Replace the value with a single value.
    ///
    /// Fails with a type mismatch error
    /// if the value is not of the element's native type.
    fn set_value_from_object(&mut self, value: DicomValue) -> Result<()>;

    /// Replace the value with the given values.
    /// An empty list clears the value.
    ///
    /// Fails with a type mismatch error
    /// if any value is not of the element's native type.
    fn set_value_from_object_array(&mut self, values: Vec<DicomValue>) -> Result<()>;

    /// The size of the byte groups reversed when changing byte order.
    fn swap_unit_size(&self) -> usize {
        self.vr().unit_size()
    }

    /// The number of bytes this element takes when written
    /// in the given transfer syntax: tag, header and value.
    fn write_length(&self, ts: &TransferSyntax) -> u32 {
        let header = if ts.is_explicit_vr() {
            if self.vr().has_16bit_length_field() {
                2 + 2
            } else {
                2 + 6
            }
        } else {
            4
        };
        4 + header + self.length()
    }

    /// Swap the value bytes to the opposite byte order.
    ///
    /// The buffer must be loaded.
    fn change_endian(&mut self) -> Result<()> {
        let unit_size = self.swap_unit_size();
        let buffer = self.buffer_mut();
        buffer.swap(unit_size)?;
        let opposite = buffer.endianness().to_opposite();
        buffer.set_endianness(opposite);
        tracing::trace!("Value bytes swapped to {:?}", opposite);
        Ok(())
    }

    /// Bring the value bytes to the given byte order,
    /// loading them if needed.
    /// Does nothing if they are already in that order.
    fn select_byte_order(&mut self, endianness: Endianness) -> Result<()> {
        if self.buffer().endianness() == endianness {
            return Ok(());
        }
        self.buffer_mut().preload()?;
        self.change_endian()
    }

    /// Bring the value bytes to the machine's byte order.
    fn to_native_order(&mut self) -> Result<()> {
        self.select_byte_order(Endianness::native())
    }

    /// Load the value bytes into memory.
    fn preload(&mut self) -> Result<()> {
        self.buffer_mut().preload()
    }

    /// Release the value bytes if they can be read again later.
    fn unload(&mut self) {
        self.buffer_mut().unload()
    }
}

/// Extract a value of the element's native type,
/// or report a type mismatch.
pub(crate) fn cast_value<T>(vr: VR, expected: ValueType, value: DicomValue) -> Result<T>
where
    T: TryFrom<DicomValue, Error = DicomValue>,
{
    T::try_from(value).map_err(|other| {
        TypeMismatchSnafu {
            vr,
            expected,
            got: other.value_type(),
        }
        .build()
    })
}

/// Extract all values as the element's native type.
/// Fails on the first value of another type.
pub(crate) fn cast_values<T>(vr: VR, expected: ValueType, values: Vec<DicomValue>) -> Result<Vec<T>>
where
    T: TryFrom<DicomValue, Error = DicomValue>,
{
    values
        .into_iter()
        .map(|v| cast_value(vr, expected, v))
        .collect()
}

/// Implement the parts of [`Element`]
/// which a wrapper type delegates to its inner string element.
macro_rules! delegate_string_element {
    ($inner: ident) => {
        fn base(&self) -> &$crate::element::ElementBase {
            self.$inner.base()
        }

        fn base_mut(&mut self) -> &mut $crate::element::ElementBase {
            self.$inner.base_mut()
        }

        fn value_multiplicity(&self) -> $crate::error::Result<usize> {
            self.$inner.value_multiplicity()
        }

        fn value_as_string(&self) -> $crate::error::Result<String> {
            self.$inner.value_as_string()
        }

        fn set_value_from_string(&mut self, value: &str) -> $crate::error::Result<()> {
            self.$inner.set_value_from_string(value)
        }
    };
}

/// Implement the inherent text accessors of a wrapper
/// around a [`MultiStringElement`].
macro_rules! multi_string_accessors {
    ($typ: ident, $vr: expr) => {
        impl $typ {
            /// Create an empty element in the machine's byte order.
            pub fn new(tag: $crate::header::Tag) -> Self {
                $typ::from_parts(
                    tag,
                    $vr,
                    0,
                    $crate::buffer::ByteBuffer::new(),
                )
            }

            /// The underlying multi-valued string element.
            pub fn as_multi_string(&self) -> &$crate::element::MultiStringElement {
                &self.inner
            }

            /// The value at the given index, without trailing padding.
            pub fn get_value(&self, index: usize) -> $crate::error::Result<String> {
                self.inner.get_value(index)
            }

            /// All values.
            pub fn get_values(&self) -> $crate::error::Result<Vec<String>> {
                self.inner.get_values()
            }

            /// Replace the value with a single text value.
            pub fn set_value(&mut self, value: &str) -> $crate::error::Result<()> {
                self.inner.set_value(value)
            }

            /// Replace the value with several text values.
            pub fn set_values<S: AsRef<str>>(&mut self, values: &[S]) -> $crate::error::Result<()> {
                self.inner.set_values(values)
            }
        }
    };
}

pub(crate) use delegate_string_element;
pub(crate) use multi_string_accessors;
