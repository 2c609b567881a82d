//! Character set support for text values held in element buffers.
//!
//! A [`ByteBuffer`](crate::buffer::ByteBuffer) decodes and encodes its text
//! through a [`TextCodec`],
//! usually the [`SpecificCharacterSet`] declared by the enclosing data set.

use encoding::all::{ISO_8859_1, ISO_8859_2, ISO_8859_5, UTF_8};
use encoding::{DecoderTrap, EncoderTrap, Encoding, EncodingRef};
use snafu::{Backtrace, Snafu};
use std::borrow::Cow;

/// An error type for text encoding issues.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum EncodeTextError {
    /// The text has characters outside of the character set.
    #[snafu(display("could not encode text with {}: {}", charset, message))]
    Unencodable {
        charset: &'static str,
        message: Cow<'static, str>,
        backtrace: Backtrace,
    },
}

/// An error type for text decoding issues.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum DecodeTextError {
    /// The bytes are not valid in the character set.
    #[snafu(display("could not decode text with {}: {}", charset, message))]
    Undecodable {
        charset: &'static str,
        message: Cow<'static, str>,
        backtrace: Backtrace,
    },
}

/// Encoding and decoding of element text.
pub trait TextCodec {
    /// The defined term of the character set,
    /// as it would appear in Specific Character Set (0008,0005).
    fn name(&self) -> &'static str;

    /// Decode the given bytes into a single string.
    /// The string may hold several `\`-delimited values.
    /// Undecodable bytes become U+FFFD.
    fn decode(&self, text: &[u8]) -> Result<String, DecodeTextError>;

    /// Encode a text value into bytes.
    fn encode(&self, text: &str) -> Result<Vec<u8>, EncodeTextError>;
}

impl<T: ?Sized> TextCodec for &T
where
    T: TextCodec,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn decode(&self, text: &[u8]) -> Result<String, DecodeTextError> {
        (**self).decode(text)
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>, EncodeTextError> {
        (**self).encode(text)
    }
}

/// The character sets supported for element text.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum SpecificCharacterSet {
    /// **ISO-IR 6**: the default repertoire.
    Default,
    /// **ISO-IR 100** (ISO-8859-1), Latin alphabet no. 1.
    IsoIr100,
    /// **ISO-IR 101** (ISO-8859-2), Latin alphabet no. 2.
    IsoIr101,
    /// **ISO-IR 144** (ISO-8859-5), Latin/Cyrillic.
    IsoIr144,
    /// **ISO-IR 192**: Unicode in UTF-8.
    IsoIr192,
}

impl Default for SpecificCharacterSet {
    fn default() -> Self {
        SpecificCharacterSet::Default
    }
}

impl SpecificCharacterSet {
    /// Obtain the character set identified by the given code string,
    /// as found in Specific Character Set (0008,0005).
    pub fn from_code(code: &str) -> Option<Self> {
        use SpecificCharacterSet::*;
        match code.trim_end() {
            "" | "Default" | "ISO_IR 6" | "ISO 2022 IR 6" => Some(Default),
            "ISO_IR 100" | "ISO 2022 IR 100" => Some(IsoIr100),
            "ISO_IR 101" | "ISO 2022 IR 101" => Some(IsoIr101),
            "ISO_IR 144" | "ISO 2022 IR 144" => Some(IsoIr144),
            "ISO_IR 192" => Some(IsoIr192),
            _ => None,
        }
    }

    fn encoding(self) -> EncodingRef {
        match self {
            // 8859-1 is a superset of the default repertoire
            SpecificCharacterSet::Default | SpecificCharacterSet::IsoIr100 => ISO_8859_1,
            SpecificCharacterSet::IsoIr101 => ISO_8859_2,
            SpecificCharacterSet::IsoIr144 => ISO_8859_5,
            SpecificCharacterSet::IsoIr192 => UTF_8,
        }
    }
}

impl TextCodec for SpecificCharacterSet {
    fn name(&self) -> &'static str {
        match self {
            SpecificCharacterSet::Default => "ISO_IR 6",
            SpecificCharacterSet::IsoIr100 => "ISO_IR 100",
            SpecificCharacterSet::IsoIr101 => "ISO_IR 101",
            SpecificCharacterSet::IsoIr144 => "ISO_IR 144",
            SpecificCharacterSet::IsoIr192 => "ISO_IR 192",
        }
    }

    fn decode(&self, text: &[u8]) -> Result<String, DecodeTextError> {
        self.encoding()
            .decode(text, DecoderTrap::Replace)
            .map_err(|message| {
                UndecodableSnafu {
                    charset: self.name(),
                    message,
                }
                .build()
            })
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>, EncodeTextError> {
        self.encoding()
            .encode(text, EncoderTrap::Strict)
            .map_err(|message| {
                UnencodableSnafu {
                    charset: self.name(),
                    message,
                }
                .build()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_both_ways(codec: SpecificCharacterSet, text: &str, bytes: &[u8]) {
        assert_eq!(codec.encode(text).unwrap(), bytes);
        assert_eq!(codec.decode(bytes).unwrap(), text);
    }

    #[test]
    fn default_repertoire() {
        assert_both_ways(SpecificCharacterSet::Default, "Doe^Jane", b"Doe^Jane");
    }

    #[test]
    fn latin1_person_name() {
        assert_both_ways(
            SpecificCharacterSet::IsoIr100,
            "Gonçalves^Inês",
            b"Gon\xE7alves^In\xEAs",
        );
    }

    #[test]
    fn utf8_person_name() {
        assert_both_ways(
            SpecificCharacterSet::IsoIr192,
            "Петрова^Ольга",
            "Петрова^Ольга".as_bytes(),
        );
    }

    #[test]
    fn undecodable_bytes_are_replaced() {
        assert_eq!(
            SpecificCharacterSet::IsoIr192.decode(b"AB\xFF ").unwrap(),
            "AB\u{FFFD} "
        );
    }

    #[test]
    fn unencodable_text_fails() {
        assert!(SpecificCharacterSet::IsoIr100.encode("Петрова").is_err());
    }

    #[test]
    fn codes_are_recognized() {
        assert_eq!(
            SpecificCharacterSet::from_code("ISO_IR 192 "),
            Some(SpecificCharacterSet::IsoIr192)
        );
        assert_eq!(
            SpecificCharacterSet::from_code(""),
            Some(SpecificCharacterSet::Default)
        );
        assert_eq!(SpecificCharacterSet::from_code("ISO_IR 999"), None);
    }
}
