#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! This crate holds the typed value model of DICOM data elements:
//! each element keeps its value as raw, byte order aware bytes
//! and converts them to and from typed values on demand.
//!
//! The current structure of this crate is as follows:
//!
//! - [`header`] comprises the attribute tag and value representation types,
//!   along with the static layout metadata of each representation.
//! - [`buffer`] holds the raw value storage,
//!   which can be released and read again from its source.
//! - [`text`] converts text values according to the character set.
//! - [`element`] contains the element types, one per family of
//!   value representations, and the factory building them.
//! - [`value`] holds the typed values exchanged with elements,
//!   including date and time ranges.
//! - [`dictionary`] describes DICOM data dictionaries
//!   and the built-in dictionaries of attributes and unique identifiers.
//! - [`transfer_syntax`] describes transfer syntaxes
//!   as far as the element layout is concerned.
//! - [`dump`] prints elements in a human readable way.
//! - [`error`] contains crate-level error and result types.
//!
//! # Example
//!
//! ```
//! use dicom_element::element::{self, Element};
//! use dicom_element::{DicomValue, Tag};
//!
//! let mut rows = element::create(Tag(0x0028, 0x0010))?;
//! rows.set_value_from_string("512")?;
//! assert_eq!(rows.value_as_object()?, Some(DicomValue::U16(512)));
//! # Ok::<(), dicom_element::Error>(())
//! ```

pub mod buffer;
pub mod dictionary;
pub mod dump;
pub mod element;
pub mod error;
pub mod header;
pub mod text;
pub mod transfer_syntax;
pub mod value;

pub use buffer::ByteBuffer;
pub use byteordered::Endianness;
pub use dictionary::DataDictionary;
pub use element::{AnyElement, Element};
pub use error::{Error, Result};
pub use header::{Tag, VR};
pub use value::DicomValue;

// re-export crates that are part of the public API
pub use chrono;
pub use smallvec;
