//! This module aggregates errors that may emerge from the library.
use crate::header::VR;
use crate::value::ValueType;
use snafu::{Backtrace, Snafu};

/// The main data type for errors in the library.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The element factory was asked for a value representation
    /// which it cannot build.
    /// Sequences (SQ) must be constructed through a data set container.
    #[snafu(display("Unsupported value representation {}", vr))]
    UnsupportedVr {
        /// The offending value representation code
        vr: String,
        backtrace: Backtrace,
    },
    /// A typed value was given to an element
    /// whose native value type is a different one.
    #[snafu(display(
        "Invalid value type for element of VR {}: expected {:?}, got {:?}",
        vr,
        expected,
        got
    ))]
    TypeMismatch {
        /// The value representation of the element
        vr: VR,
        /// The native value type of the element
        expected: ValueType,
        /// The type of the value provided
        got: ValueType,
        backtrace: Backtrace,
    },
    /// An indexed accessor went past the value multiplicity.
    #[snafu(display("Value index {} out of range (multiplicity is {})", index, len))]
    IndexOutOfRange {
        index: usize,
        len: usize,
        backtrace: Backtrace,
    },
    /// The operation requires the value bytes to be materialized.
    #[snafu(display("Buffer is not loaded, call `preload` first"))]
    NotLoaded { backtrace: Backtrace },
    /// The bytes of an unloaded buffer could not be read back.
    #[snafu(display("Could not load value bytes"))]
    LoadBuffer {
        source: std::io::Error,
        backtrace: Backtrace,
    },
    /// The value bytes could not be decoded into text.
    #[snafu(display("Could not decode text"))]
    DecodeText {
        #[snafu(backtrace)]
        source: crate::text::DecodeTextError,
    },
    /// The text could not be encoded into value bytes.
    #[snafu(display("Could not encode text"))]
    EncodeText {
        #[snafu(backtrace)]
        source: crate::text::EncodeTextError,
    },
    /// A number string (DS or IS) could not be converted.
    #[snafu(display("Could not parse `{}` as a number", value))]
    ParseNumber { value: String, backtrace: Backtrace },
    /// A numeric value does not fit in the requested type.
    #[snafu(display("Value {} cannot be represented in the requested type", value))]
    NarrowConvert { value: String, backtrace: Backtrace },
    /// Value bytes could not be written to the buffer.
    #[snafu(display("Could not write value bytes"))]
    WriteValue {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

/// Type alias for a result from this library.
pub type Result<T, E = Error> = std::result::Result<T, E>;
