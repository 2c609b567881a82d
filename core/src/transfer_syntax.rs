//! Transfer syntax descriptors and the registry of known transfer syntaxes.
//!
//! The element model only needs to know
//! whether a transfer syntax encodes the VR explicitly
//! and which byte order it uses,
//! which is what [`TransferSyntax`] describes.
//! Encoding and decoding of whole data sets is left to the surrounding codec.

use byteordered::Endianness;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// How the data of a transfer syntax is encoded beyond its byte order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Codec {
    /// Native encoding, no further transformation.
    None,
    /// The whole data set is deflated.
    Dataset,
    /// Pixel data is encapsulated in compressed fragments.
    EncapsulatedPixelData,
}

/// A DICOM transfer syntax specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSyntax {
    /// The unique identifier of the transfer syntax.
    uid: &'static str,
    /// The name of the transfer syntax.
    name: &'static str,
    /// The byte order of data.
    byte_order: Endianness,
    /// Whether the transfer syntax mandates an explicit value representation,
    /// or the VR is implicit.
    explicit_vr: bool,
    codec: Codec,
}

impl TransferSyntax {
    /// Create a new transfer syntax descriptor.
    pub const fn new(
        uid: &'static str,
        name: &'static str,
        byte_order: Endianness,
        explicit_vr: bool,
        codec: Codec,
    ) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order,
            explicit_vr,
            codec,
        }
    }

    /// Create a new descriptor for an explicit VR little endian
    /// transfer syntax.
    pub const fn new_ele(uid: &'static str, name: &'static str, codec: Codec) -> Self {
        TransferSyntax::new(uid, name, Endianness::Little, true, codec)
    }

    /// Obtain this transfer syntax' unique identifier.
    pub const fn uid(&self) -> &'static str {
        self.uid
    }

    /// Obtain the name of this transfer syntax.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Obtain this transfer syntax' expected endianness.
    pub const fn endianness(&self) -> Endianness {
        self.byte_order
    }

    /// Whether the VR of each element is written out.
    pub const fn is_explicit_vr(&self) -> bool {
        self.explicit_vr
    }

    /// Obtain this transfer syntax' codec specification.
    pub const fn codec(&self) -> Codec {
        self.codec
    }

    /// Whether data sets in this transfer syntax
    /// can be read without any codec.
    pub fn is_codec_free(&self) -> bool {
        self.codec == Codec::None
    }
}

impl fmt::Display for TransferSyntax {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Implicit VR Little Endian: Default Transfer Syntax for DICOM
pub const IMPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax::new(
    "1.2.840.10008.1.2",
    "Implicit VR Little Endian",
    Endianness::Little,
    false,
    Codec::None,
);

/// Explicit VR Little Endian
pub const EXPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax::new_ele(
    "1.2.840.10008.1.2.1",
    "Explicit VR Little Endian",
    Codec::None,
);

/// Explicit VR Big Endian
pub const EXPLICIT_VR_BIG_ENDIAN: TransferSyntax = TransferSyntax::new(
    "1.2.840.10008.1.2.2",
    "Explicit VR Big Endian",
    Endianness::Big,
    true,
    Codec::None,
);

/// Deflated Explicit VR Little Endian
pub const DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax::new_ele(
    "1.2.840.10008.1.2.1.99",
    "Deflated Explicit VR Little Endian",
    Codec::Dataset,
);

/// Create a descriptor for an encapsulated pixel data transfer syntax.
macro_rules! encapsulated_ts {
    ($(#[$doc:meta])* $name: ident, $uid: expr, $display: expr) => {
        $(#[$doc])*
        pub const $name: TransferSyntax =
            TransferSyntax::new_ele($uid, $display, Codec::EncapsulatedPixelData);
    };
}

encapsulated_ts!(
    /// JPEG Baseline (Process 1)
    JPEG_BASELINE,
    "1.2.840.10008.1.2.4.50",
    "JPEG Baseline (Process 1)"
);
encapsulated_ts!(
    /// JPEG Extended (Process 2 & 4)
    JPEG_EXTENDED,
    "1.2.840.10008.1.2.4.51",
    "JPEG Extended (Process 2 & 4)"
);
encapsulated_ts!(
    /// JPEG Lossless, Non-Hierarchical (Process 14)
    JPEG_LOSSLESS_NON_HIERARCHICAL,
    "1.2.840.10008.1.2.4.57",
    "JPEG Lossless, Non-Hierarchical (Process 14)"
);
encapsulated_ts!(
    /// JPEG Lossless, Non-Hierarchical, First-Order Prediction
    JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION,
    "1.2.840.10008.1.2.4.70",
    "JPEG Lossless, Non-Hierarchical, First-Order Prediction"
);
encapsulated_ts!(
    /// JPEG-LS Lossless Image Compression
    JPEG_LS_LOSSLESS,
    "1.2.840.10008.1.2.4.80",
    "JPEG-LS Lossless Image Compression"
);
encapsulated_ts!(
    /// JPEG-LS Lossy (Near-Lossless) Image Compression
    JPEG_LS_LOSSY,
    "1.2.840.10008.1.2.4.81",
    "JPEG-LS Lossy (Near-Lossless) Image Compression"
);
encapsulated_ts!(
    /// JPEG 2000 Image Compression (Lossless Only)
    JPEG_2000_LOSSLESS,
    "1.2.840.10008.1.2.4.90",
    "JPEG 2000 Image Compression (Lossless Only)"
);
encapsulated_ts!(
    /// JPEG 2000 Image Compression
    JPEG_2000,
    "1.2.840.10008.1.2.4.91",
    "JPEG 2000 Image Compression"
);
encapsulated_ts!(
    /// RLE Lossless
    RLE_LOSSLESS,
    "1.2.840.10008.1.2.5",
    "RLE Lossless"
);

/// Trait for a container of transfer syntax specifiers.
pub trait TransferSyntaxIndex {
    /// Obtain a DICOM transfer syntax by its respective UID.
    ///
    /// Implementations of this method should be robust to the possible
    /// presence of trailing null characters (`\0`) in `uid`.
    fn get(&self, uid: &str) -> Option<&TransferSyntax>;
}

impl<T: ?Sized> TransferSyntaxIndex for &T
where
    T: TransferSyntaxIndex,
{
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        (**self).get(uid)
    }
}

static REGISTRY: Lazy<HashMap<&'static str, TransferSyntax>> = Lazy::new(|| {
    [
        IMPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_BIG_ENDIAN,
        DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
        JPEG_BASELINE,
        JPEG_EXTENDED,
        JPEG_LOSSLESS_NON_HIERARCHICAL,
        JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION,
        JPEG_LS_LOSSLESS,
        JPEG_LS_LOSSY,
        JPEG_2000_LOSSLESS,
        JPEG_2000,
        RLE_LOSSLESS,
    ]
    .iter()
    .map(|ts| (ts.uid(), ts.clone()))
    .collect()
});

/// Zero-sized representative of the built-in transfer syntax registry.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub struct TransferSyntaxRegistry;

impl TransferSyntaxRegistry {
    /// Obtain an iterator over all registered transfer syntaxes.
    pub fn iter(&self) -> impl Iterator<Item = &'static TransferSyntax> {
        REGISTRY.values()
    }
}

impl TransferSyntaxIndex for TransferSyntaxRegistry {
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        let ts_uid = uid.trim_end_matches(|c: char| c == '\0' || c == ' ');
        REGISTRY.get(ts_uid)
    }
}
