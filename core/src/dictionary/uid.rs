//! UID dictionary types and the built-in dictionary of well-known UIDs.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::Debug;
use std::str::FromStr;

/// Type trait for a dictionary of known DICOM unique identifiers (UIDs).
///
/// UID dictionaries provide the means to
/// look up information at run-time about a certain UID.
/// A UID missing from the dictionary is not an error:
/// the raw UID remains usable as is.
pub trait UidDictionary: Debug {
    /// The type of the dictionary entry.
    type Entry: UidDictionaryEntry;

    /// Fetch an entry by its usual keyword (e.g. CTImageStorage).
    /// Keywords are usually in UpperCamelCase,
    /// not separated by spaces,
    /// and are case sensitive.
    fn by_keyword(&self, keyword: &str) -> Option<&Self::Entry>;

    /// Fetch an entry by its UID.
    fn by_uid(&self, uid: &str) -> Option<&Self::Entry>;
}

impl<'a, D: ?Sized> UidDictionary for &'a D
where
    D: UidDictionary,
{
    type Entry = D::Entry;

    fn by_keyword(&self, keyword: &str) -> Option<&Self::Entry> {
        (**self).by_keyword(keyword)
    }

    fn by_uid(&self, uid: &str) -> Option<&Self::Entry> {
        (**self).by_uid(uid)
    }
}

/// UID dictionary entry type
pub trait UidDictionaryEntry {
    /// Get the UID proper.
    fn uid(&self) -> &str;

    /// Get the full name of the identifier.
    fn name(&self) -> &str;

    /// The alias of the UID, with no spaces, usually in UpperCamelCase.
    fn alias(&self) -> &str;

    /// The kind of object identified.
    fn uid_type(&self) -> UidType;

    /// Get whether the UID is retired.
    fn is_retired(&self) -> bool;
}

/// A data type for a dictionary entry using string slices
/// for its data.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct UidDictionaryEntryRef<'a> {
    /// The UID proper
    pub uid: &'a str,
    /// The full name of the identifier,
    /// which may contain spaces
    pub name: &'a str,
    /// The alias of the identifier,
    /// with no spaces, usually in UpperCamelCase
    pub alias: &'a str,
    /// The type of UID
    pub r#type: UidType,
    /// Whether this UID is retired
    pub retired: bool,
}

impl<'a> UidDictionaryEntryRef<'a> {
    /// Create a new entry.
    pub const fn new(
        uid: &'a str,
        name: &'a str,
        alias: &'a str,
        r#type: UidType,
        retired: bool,
    ) -> Self {
        UidDictionaryEntryRef {
            uid,
            name,
            alias,
            r#type,
            retired,
        }
    }
}

impl<'a> UidDictionaryEntry for UidDictionaryEntryRef<'a> {
    fn uid(&self) -> &str {
        self.uid
    }

    fn name(&self) -> &str {
        self.name
    }

    fn alias(&self) -> &str {
        self.alias
    }

    fn uid_type(&self) -> UidType {
        self.r#type
    }

    fn is_retired(&self) -> bool {
        self.retired
    }
}

/// Enum for the UID types known to the built-in dictionary.
#[non_exhaustive]
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum UidType {
    /// SOP Class
    SopClass,
    /// Meta SOP Class
    MetaSopClass,
    /// Transfer Syntax
    TransferSyntax,
    /// Well-known SOP Instance
    WellKnownSopInstance,
    /// Application Context Name
    ApplicationContextName,
}

impl FromStr for UidType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "SOP Class" => Ok(UidType::SopClass),
            "Meta SOP Class" => Ok(UidType::MetaSopClass),
            "Transfer Syntax" => Ok(UidType::TransferSyntax),
            "Well-known SOP Instance" => Ok(UidType::WellKnownSopInstance),
            "Application Context Name" => Ok(UidType::ApplicationContextName),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for UidType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            UidType::SopClass => "SOP Class",
            UidType::MetaSopClass => "Meta SOP Class",
            UidType::TransferSyntax => "Transfer Syntax",
            UidType::WellKnownSopInstance => "Well-known SOP Instance",
            UidType::ApplicationContextName => "Application Context Name",
        };
        f.write_str(str)
    }
}

static REGISTRY: Lazy<UidRegistry> = Lazy::new(|| {
    let mut registry = UidRegistry {
        by_uid: HashMap::with_capacity(UIDS.len()),
        by_keyword: HashMap::with_capacity(UIDS.len()),
    };
    for entry in UIDS {
        registry.by_uid.insert(entry.uid, entry);
        registry.by_keyword.insert(entry.alias, entry);
    }
    registry
});

#[derive(Debug)]
struct UidRegistry {
    by_uid: HashMap<&'static str, &'static UidDictionaryEntryRef<'static>>,
    by_keyword: HashMap<&'static str, &'static UidDictionaryEntryRef<'static>>,
}

/// A UID dictionary which consults
/// the library's global registry of well-known UIDs.
///
/// The index is automatically initialized upon the first use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StandardUidDictionary;

impl UidDictionary for StandardUidDictionary {
    type Entry = UidDictionaryEntryRef<'static>;

    fn by_keyword(&self, keyword: &str) -> Option<&Self::Entry> {
        REGISTRY.by_keyword.get(keyword).copied()
    }

    fn by_uid(&self, uid: &str) -> Option<&Self::Entry> {
        REGISTRY.by_uid.get(uid).copied()
    }
}

type U = UidDictionaryEntryRef<'static>;

use UidType::*;

#[rustfmt::skip]
const UIDS: &[U] = &[
    U::new("1.2.840.10008.1.1", "Verification SOP Class", "Verification", SopClass, false),
    U::new("1.2.840.10008.1.2", "Implicit VR Little Endian", "ImplicitVRLittleEndian", TransferSyntax, false),
    U::new("1.2.840.10008.1.2.1", "Explicit VR Little Endian", "ExplicitVRLittleEndian", TransferSyntax, false),
    U::new("1.2.840.10008.1.2.1.99", "Deflated Explicit VR Little Endian", "DeflatedExplicitVRLittleEndian", TransferSyntax, false),
    U::new("1.2.840.10008.1.2.2", "Explicit VR Big Endian", "ExplicitVRBigEndian", TransferSyntax, true),
    U::new("1.2.840.10008.1.2.4.50", "JPEG Baseline (Process 1)", "JPEGBaseline8Bit", TransferSyntax, false),
    U::new("1.2.840.10008.1.2.4.51", "JPEG Extended (Process 2 & 4)", "JPEGExtended12Bit", TransferSyntax, false),
    U::new("1.2.840.10008.1.2.4.57", "JPEG Lossless, Non-Hierarchical (Process 14)", "JPEGLossless", TransferSyntax, false),
    U::new("1.2.840.10008.1.2.4.70", "JPEG Lossless, Non-Hierarchical, First-Order Prediction", "JPEGLosslessSV1", TransferSyntax, false),
    U::new("1.2.840.10008.1.2.4.80", "JPEG-LS Lossless Image Compression", "JPEGLSLossless", TransferSyntax, false),
    U::new("1.2.840.10008.1.2.4.81", "JPEG-LS Lossy (Near-Lossless) Image Compression", "JPEGLSNearLossless", TransferSyntax, false),
    U::new("1.2.840.10008.1.2.4.90", "JPEG 2000 Image Compression (Lossless Only)", "JPEG2000Lossless", TransferSyntax, false),
    U::new("1.2.840.10008.1.2.4.91", "JPEG 2000 Image Compression", "JPEG2000", TransferSyntax, false),
    U::new("1.2.840.10008.1.2.5", "RLE Lossless", "RLELossless", TransferSyntax, false),
    U::new("1.2.840.10008.3.1.1.1", "DICOM Application Context Name", "DICOMApplicationContext", ApplicationContextName, false),
    U::new("1.2.840.10008.3.1.2.3.3", "Modality Performed Procedure Step SOP Class", "ModalityPerformedProcedureStep", SopClass, false),
    U::new("1.2.840.10008.5.1.1.9", "Basic Grayscale Print Management Meta SOP Class", "BasicGrayscalePrintManagementMeta", MetaSopClass, false),
    U::new("1.2.840.10008.5.1.1.40", "Printer SOP Class", "Printer", SopClass, false),
    U::new("1.2.840.10008.5.1.1.17", "Printer SOP Instance", "PrinterInstance", WellKnownSopInstance, false),
    U::new("1.2.840.10008.5.1.4.1.1.1", "Computed Radiography Image Storage", "ComputedRadiographyImageStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.1.1", "Digital X-Ray Image Storage - For Presentation", "DigitalXRayImageStorageForPresentation", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.2", "CT Image Storage", "CTImageStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.2.1", "Enhanced CT Image Storage", "EnhancedCTImageStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.4", "MR Image Storage", "MRImageStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.4.1", "Enhanced MR Image Storage", "EnhancedMRImageStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.6.1", "Ultrasound Image Storage", "UltrasoundImageStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.7", "Secondary Capture Image Storage", "SecondaryCaptureImageStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.12.1", "X-Ray Angiographic Image Storage", "XRayAngiographicImageStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.20", "Nuclear Medicine Image Storage", "NuclearMedicineImageStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.88.11", "Basic Text SR Storage", "BasicTextSRStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.104.1", "Encapsulated PDF Storage", "EncapsulatedPDFStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.128", "Positron Emission Tomography Image Storage", "PositronEmissionTomographyImageStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.1.481.1", "RT Image Storage", "RTImageStorage", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.2.1.1", "Patient Root Query/Retrieve Information Model - FIND", "PatientRootQueryRetrieveInformationModelFind", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.2.2.1", "Study Root Query/Retrieve Information Model - FIND", "StudyRootQueryRetrieveInformationModelFind", SopClass, false),
    U::new("1.2.840.10008.5.1.4.1.2.2.2", "Study Root Query/Retrieve Information Model - MOVE", "StudyRootQueryRetrieveInformationModelMove", SopClass, false),
    U::new("1.2.840.10008.5.1.4.31", "Modality Worklist Information Model - FIND", "ModalityWorklistInformationModelFind", SopClass, false),
];
