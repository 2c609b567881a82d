//! This module contains the basic data types for interpreting DICOM data elements:
//! the attribute tag and the value representation,
//! along with the static metadata attached to each representation.

use std::fmt;
use std::str::{from_utf8, FromStr};

/// Idiomatic alias for a tag's group number.
pub type GroupNumber = u16;
/// Idiomatic alias for a tag's element number.
pub type ElementNumber = u16;

/// The data type for DICOM data element tags.
///
/// Both `(u16, u16)` and `[u16; 2]` can be
/// efficiently converted to this type as well.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Tag(pub GroupNumber, pub ElementNumber);

impl Tag {
    /// Getter for the tag's group value.
    #[inline]
    pub fn group(self) -> GroupNumber {
        self.0
    }

    /// Getter for the tag's element value.
    #[inline]
    pub fn element(self) -> ElementNumber {
        self.1
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({:#06X?}, {:#06X?})", self.0, self.1)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.0, self.1)
    }
}

impl PartialEq<(u16, u16)> for Tag {
    fn eq(&self, other: &(u16, u16)) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl PartialEq<[u16; 2]> for Tag {
    fn eq(&self, other: &[u16; 2]) -> bool {
        self.0 == other[0] && self.1 == other[1]
    }
}

impl From<(u16, u16)> for Tag {
    #[inline]
    fn from(value: (u16, u16)) -> Tag {
        Tag(value.0, value.1)
    }
}

impl From<[u16; 2]> for Tag {
    #[inline]
    fn from(value: [u16; 2]) -> Tag {
        Tag(value[0], value[1])
    }
}

/// An enum type for a DICOM value representation.
///
/// Only the representations handled by the element model are listed.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub enum VR {
    /// Application Entity
    AE,
    /// Age String
    AS,
    /// Attribute Tag
    AT,
    /// Code String
    CS,
    /// Date
    DA,
    /// Decimal String
    DS,
    /// Date Time
    DT,
    /// Floating Point Single
    FL,
    /// Floating Point Double
    FD,
    /// Integer String
    IS,
    /// Long String
    LO,
    /// Long Text
    LT,
    /// Other Byte
    OB,
    /// Other Float
    OF,
    /// Other Word
    OW,
    /// Person Name
    PN,
    /// Short String
    SH,
    /// Signed Long
    SL,
    /// Sequence of Items
    SQ,
    /// Signed Short
    SS,
    /// Short Text
    ST,
    /// Time
    TM,
    /// Unique Identifier (UID)
    UI,
    /// Unsigned Long
    UL,
    /// Unknown
    UN,
    /// Unsigned Short
    US,
    /// Unlimited Text
    UT,
}

/// Padding character appended to odd-length values.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Padding {
    /// A space character (`' '`), used by most text VRs.
    Space,
    /// A null character (`'\0'`).
    Null,
}

impl Padding {
    /// The padding byte as written to the value.
    pub fn byte(self) -> u8 {
        match self {
            Padding::Space => b' ',
            Padding::Null => 0,
        }
    }
}

/// Static metadata describing how values of a VR are laid out.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct VrInfo {
    /// Number of bytes per atomic value (1 for variable-width text).
    pub unit_size: usize,
    /// Whether the value is text.
    pub is_string: bool,
    /// Whether the text holds several `\`-delimited values.
    pub is_multi_valued_string: bool,
    /// Character used to pad values to an even length.
    pub padding: Padding,
    /// Whether explicit VR encoding uses the compact header
    /// with a 16-bit length field,
    /// as opposed to 2 reserved bytes and a 32-bit length.
    pub has_16bit_length_field: bool,
}

const fn text(multi: bool, padding: Padding, short_len: bool) -> VrInfo {
    VrInfo {
        unit_size: 1,
        is_string: true,
        is_multi_valued_string: multi,
        padding,
        has_16bit_length_field: short_len,
    }
}

const fn binary(unit_size: usize, short_len: bool) -> VrInfo {
    VrInfo {
        unit_size,
        is_string: false,
        is_multi_valued_string: false,
        padding: Padding::Null,
        has_16bit_length_field: short_len,
    }
}

impl VR {
    /// All value representations, in alphabetical order.
    pub const ALL: [VR; 27] = [
        VR::AE,
        VR::AS,
        VR::AT,
        VR::CS,
        VR::DA,
        VR::DS,
        VR::DT,
        VR::FD,
        VR::FL,
        VR::IS,
        VR::LO,
        VR::LT,
        VR::OB,
        VR::OF,
        VR::OW,
        VR::PN,
        VR::SH,
        VR::SL,
        VR::SQ,
        VR::SS,
        VR::ST,
        VR::TM,
        VR::UI,
        VR::UL,
        VR::UN,
        VR::US,
        VR::UT,
    ];

    /// Obtain the value representation corresponding to the given two bytes.
    /// Each byte should represent an alphabetic character in upper case.
    pub fn from_binary(chars: [u8; 2]) -> Option<Self> {
        from_utf8(chars.as_ref())
            .ok()
            .and_then(|s| VR::from_str(s).ok())
    }

    /// Retrieve a string representation of this VR.
    pub fn to_string(self) -> &'static str {
        use VR::*;
        match self {
            AE => "AE",
            AS => "AS",
            AT => "AT",
            CS => "CS",
            DA => "DA",
            DS => "DS",
            DT => "DT",
            FL => "FL",
            FD => "FD",
            IS => "IS",
            LO => "LO",
            LT => "LT",
            OB => "OB",
            OF => "OF",
            OW => "OW",
            PN => "PN",
            SH => "SH",
            SL => "SL",
            SQ => "SQ",
            SS => "SS",
            ST => "ST",
            TM => "TM",
            UI => "UI",
            UL => "UL",
            UN => "UN",
            US => "US",
            UT => "UT",
        }
    }

    /// Retrieve a copy of this VR's byte representation.
    /// The function returns two alphabetic characters in upper case.
    pub fn to_bytes(self) -> [u8; 2] {
        let bytes = self.to_string().as_bytes();
        [bytes[0], bytes[1]]
    }

    /// Retrieve the static layout metadata of this VR.
    pub fn info(self) -> VrInfo {
        use Padding::*;
        use VR::*;
        match self {
            AE | AS | CS | DA | DS | DT | IS | TM => text(true, Space, true),
            LO | LT | PN | SH | ST => text(false, Space, true),
            UI => text(true, Null, true),
            UT => text(false, Space, false),
            AT => binary(4, true),
            FD => binary(8, true),
            FL | SL | UL => binary(4, true),
            SS | US => binary(2, true),
            OB | UN => binary(1, false),
            OW => binary(2, false),
            OF => binary(4, false),
            SQ => binary(1, false),
        }
    }

    /// Number of bytes per atomic value.
    #[inline]
    pub fn unit_size(self) -> usize {
        self.info().unit_size
    }

    /// Whether values of this VR are text.
    #[inline]
    pub fn is_string(self) -> bool {
        self.info().is_string
    }

    /// The padding character of this VR.
    #[inline]
    pub fn padding(self) -> Padding {
        self.info().padding
    }

    /// Whether explicit VR headers of this VR use a 16-bit length field.
    #[inline]
    pub fn has_16bit_length_field(self) -> bool {
        self.info().has_16bit_length_field
    }
}

/// Obtain the value representation corresponding to the given string.
/// The string should hold exactly two UTF-8 encoded alphabetic characters
/// in upper case, otherwise no match is made.
impl FromStr for VR {
    type Err = &'static str;

    fn from_str(string: &str) -> std::result::Result<Self, Self::Err> {
        VR::ALL
            .iter()
            .copied()
            .find(|vr| vr.to_string() == string)
            .ok_or("no such value representation")
    }
}

impl fmt::Display for VR {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(VR::to_string(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_from_u16_pair() {
        let t = Tag::from((0x0010u16, 0x0020u16));
        assert_eq!(0x0010u16, t.group());
        assert_eq!(0x0020u16, t.element());
    }

    #[test]
    fn tag_display() {
        assert_eq!(Tag(0x0008, 0x0010).to_string(), "(0008,0010)");
        assert_eq!(Tag(0x7FE0, 0x0010).to_string(), "(7FE0,0010)");
    }

    #[test]
    fn vr_codes_round_trip() {
        for vr in VR::ALL {
            assert_eq!(VR::from_str(vr.to_string()), Ok(vr));
            assert_eq!(VR::from_binary(vr.to_bytes()), Some(vr));
        }
        assert!(VR::from_str("XX").is_err());
        assert!(VR::from_str("OD").is_err());
    }

    #[test]
    fn vr_layout_metadata() {
        assert_eq!(VR::US.unit_size(), 2);
        assert_eq!(VR::FD.unit_size(), 8);
        assert_eq!(VR::AT.unit_size(), 4);
        assert_eq!(VR::LO.unit_size(), 1);

        assert!(VR::US.has_16bit_length_field());
        assert!(!VR::OB.has_16bit_length_field());
        assert!(!VR::UT.has_16bit_length_field());
        assert!(!VR::UN.has_16bit_length_field());

        assert_eq!(VR::UI.padding(), Padding::Null);
        assert_eq!(VR::PN.padding(), Padding::Space);
        assert!(VR::PN.is_string());
        assert!(!VR::PN.info().is_multi_valued_string);
        assert!(VR::CS.info().is_multi_valued_string);
        assert!(!VR::OW.is_string());
    }
}
