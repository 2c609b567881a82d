//! This module contains the concept of a DICOM data dictionary,
//! and the built-in dictionaries of attributes and unique identifiers.
//!
//! Elements do not hold a reference to a dictionary.
//! Operations which need attribute information,
//! such as the element factory or the dump formatter,
//! take the dictionary as a parameter
//! and default to [`StandardDataDictionary`].

pub mod standard;
pub mod stub;
pub mod uid;

pub use self::standard::StandardDataDictionary;
pub use self::stub::StubDataDictionary;
pub use self::uid::{
    StandardUidDictionary, UidDictionary, UidDictionaryEntry, UidDictionaryEntryRef, UidType,
};

use crate::header::{Tag, VR};
use std::fmt::Debug;

/// The name reported for attributes missing from a dictionary.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Type trait for a dictionary of DICOM attributes.
///
/// Attribute dictionaries provide the means to convert a tag to an alias
/// and vice versa,
/// as well as the value representation typically used by the attribute.
pub trait DataDictionary: Debug {
    /// The type of the dictionary entry.
    type Entry: DataDictionaryEntry;

    /// Fetch an entry by its usual alias (e.g. "PatientName" or "SOPInstanceUID").
    /// Aliases are usually case sensitive and not separated by spaces.
    fn by_name(&self, name: &str) -> Option<&Self::Entry>;

    /// Fetch an entry by its tag.
    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry>;

    /// The value representation of the attribute,
    /// or `UN` if the tag is not in the dictionary.
    fn default_vr(&self, tag: Tag) -> VR {
        self.by_tag(tag).map(|e| e.vr()).unwrap_or(VR::UN)
    }

    /// The alias of the attribute,
    /// or [`UNKNOWN_NAME`] if the tag is not in the dictionary.
    fn name_of(&self, tag: Tag) -> &str {
        self.by_tag(tag).map(|e| e.alias()).unwrap_or(UNKNOWN_NAME)
    }
}

impl<'a, D: ?Sized> DataDictionary for &'a D
where
    D: DataDictionary,
{
    type Entry = D::Entry;

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        (**self).by_name(name)
    }

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        (**self).by_tag(tag)
    }
}

/// The dictionary entry data type, representing a DICOM attribute.
pub trait DataDictionaryEntry {
    /// The attribute tag.
    fn tag(&self) -> Tag;
    /// The alias of the attribute, with no spaces, usually in UpperCamelCase.
    fn alias(&self) -> &str;
    /// The _typical_ value representation of the attribute.
    fn vr(&self) -> VR;
}

/// A data type for a dictionary entry with a string slice for its alias.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DataDictionaryEntryRef<'a> {
    /// The attribute tag
    pub tag: Tag,
    /// The alias of the attribute, with no spaces, usually InCapitalizedCamelCase
    pub alias: &'a str,
    /// The _typical_ value representation of the attribute
    pub vr: VR,
}

impl<'a> DataDictionaryEntry for DataDictionaryEntryRef<'a> {
    fn tag(&self) -> Tag {
        self.tag
    }
    fn alias(&self) -> &str {
        self.alias
    }
    fn vr(&self) -> VR {
        self.vr
    }
}
