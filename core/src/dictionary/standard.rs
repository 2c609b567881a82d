//! The built-in dictionary of commonly used standard attributes.
//!
//! The registry is built on first use
//! and covers the file meta group, patient, study, series and image modules,
//! plus generic group length and private creator elements.

use super::{DataDictionary, DataDictionaryEntryRef};
use crate::header::{Tag, VR};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

static DICT: Lazy<StandardDataDictionaryRegistry> = Lazy::new(init_dictionary);

/// Retrieve a singleton instance of the standard dictionary registry.
#[inline]
pub fn registry() -> &'static StandardDataDictionaryRegistry {
    &DICT
}

/// The data struct actually containing the standard dictionary.
#[derive(Debug)]
pub struct StandardDataDictionaryRegistry {
    /// mapping: name → entry
    by_name: HashMap<&'static str, &'static DataDictionaryEntryRef<'static>>,
    /// mapping: tag → entry
    by_tag: HashMap<Tag, &'static DataDictionaryEntryRef<'static>>,
}

impl StandardDataDictionaryRegistry {
    fn new() -> StandardDataDictionaryRegistry {
        StandardDataDictionaryRegistry {
            by_name: HashMap::with_capacity(ENTRIES.len()),
            by_tag: HashMap::with_capacity(ENTRIES.len()),
        }
    }

    /// record the given dictionary entry reference
    fn index(&mut self, entry: &'static DataDictionaryEntryRef<'static>) -> &mut Self {
        self.by_name.insert(entry.alias, entry);
        self.by_tag.insert(entry.tag, entry);
        self
    }
}

fn init_dictionary() -> StandardDataDictionaryRegistry {
    let mut d = StandardDataDictionaryRegistry::new();
    for entry in ENTRIES {
        d.index(entry);
    }
    d
}

/// Generic Group Length dictionary entry.
static GROUP_LENGTH_ENTRY: DataDictionaryEntryRef<'static> = DataDictionaryEntryRef {
    tag: Tag(0x0000, 0x0000),
    alias: "GenericGroupLength",
    vr: VR::UL,
};

/// Generic Private Creator dictionary entry.
static PRIVATE_CREATOR_ENTRY: DataDictionaryEntryRef<'static> = DataDictionaryEntryRef {
    tag: Tag(0x0009, 0x0010),
    alias: "PrivateCreator",
    vr: VR::LO,
};

/// A data element dictionary which consults
/// the library's global attribute registry.
///
/// The dictionary index is automatically initialized upon the first use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StandardDataDictionary;

impl DataDictionary for StandardDataDictionary {
    type Entry = DataDictionaryEntryRef<'static>;

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        registry().by_name.get(name).copied()
    }

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        registry().by_tag.get(&tag).copied().or_else(|| {
            // check for private creator
            if tag.0 & 1 == 1 && (0x0010..=0x00FF).contains(&tag.1) {
                return Some(&PRIVATE_CREATOR_ENTRY);
            }
            // check for group length
            if tag.element() == 0x0000 {
                return Some(&GROUP_LENGTH_ENTRY);
            }
            None
        })
    }
}

impl fmt::Display for StandardDataDictionary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Standard Data Dictionary")
    }
}

type E = DataDictionaryEntryRef<'static>;

#[rustfmt::skip]
const ENTRIES: &[E] = &[
    // file meta information
    E { tag: Tag(0x0002, 0x0000), alias: "FileMetaInformationGroupLength", vr: VR::UL },
    E { tag: Tag(0x0002, 0x0001), alias: "FileMetaInformationVersion", vr: VR::OB },
    E { tag: Tag(0x0002, 0x0002), alias: "MediaStorageSOPClassUID", vr: VR::UI },
    E { tag: Tag(0x0002, 0x0003), alias: "MediaStorageSOPInstanceUID", vr: VR::UI },
    E { tag: Tag(0x0002, 0x0010), alias: "TransferSyntaxUID", vr: VR::UI },
    E { tag: Tag(0x0002, 0x0012), alias: "ImplementationClassUID", vr: VR::UI },
    E { tag: Tag(0x0002, 0x0013), alias: "ImplementationVersionName", vr: VR::SH },
    E { tag: Tag(0x0002, 0x0016), alias: "SourceApplicationEntityTitle", vr: VR::AE },
    // identification
    E { tag: Tag(0x0008, 0x0005), alias: "SpecificCharacterSet", vr: VR::CS },
    E { tag: Tag(0x0008, 0x0008), alias: "ImageType", vr: VR::CS },
    E { tag: Tag(0x0008, 0x0012), alias: "InstanceCreationDate", vr: VR::DA },
    E { tag: Tag(0x0008, 0x0013), alias: "InstanceCreationTime", vr: VR::TM },
    E { tag: Tag(0x0008, 0x0016), alias: "SOPClassUID", vr: VR::UI },
    E { tag: Tag(0x0008, 0x0018), alias: "SOPInstanceUID", vr: VR::UI },
    E { tag: Tag(0x0008, 0x0020), alias: "StudyDate", vr: VR::DA },
    E { tag: Tag(0x0008, 0x0021), alias: "SeriesDate", vr: VR::DA },
    E { tag: Tag(0x0008, 0x0022), alias: "AcquisitionDate", vr: VR::DA },
    E { tag: Tag(0x0008, 0x0023), alias: "ContentDate", vr: VR::DA },
    E { tag: Tag(0x0008, 0x002A), alias: "AcquisitionDateTime", vr: VR::DT },
    E { tag: Tag(0x0008, 0x0030), alias: "StudyTime", vr: VR::TM },
    E { tag: Tag(0x0008, 0x0031), alias: "SeriesTime", vr: VR::TM },
    E { tag: Tag(0x0008, 0x0032), alias: "AcquisitionTime", vr: VR::TM },
    E { tag: Tag(0x0008, 0x0033), alias: "ContentTime", vr: VR::TM },
    E { tag: Tag(0x0008, 0x0050), alias: "AccessionNumber", vr: VR::SH },
    E { tag: Tag(0x0008, 0x0052), alias: "QueryRetrieveLevel", vr: VR::CS },
    E { tag: Tag(0x0008, 0x0054), alias: "RetrieveAETitle", vr: VR::AE },
    E { tag: Tag(0x0008, 0x0060), alias: "Modality", vr: VR::CS },
    E { tag: Tag(0x0008, 0x0061), alias: "ModalitiesInStudy", vr: VR::CS },
    E { tag: Tag(0x0008, 0x0064), alias: "ConversionType", vr: VR::CS },
    E { tag: Tag(0x0008, 0x0070), alias: "Manufacturer", vr: VR::LO },
    E { tag: Tag(0x0008, 0x0080), alias: "InstitutionName", vr: VR::LO },
    E { tag: Tag(0x0008, 0x0081), alias: "InstitutionAddress", vr: VR::ST },
    E { tag: Tag(0x0008, 0x0090), alias: "ReferringPhysicianName", vr: VR::PN },
    E { tag: Tag(0x0008, 0x1010), alias: "StationName", vr: VR::SH },
    E { tag: Tag(0x0008, 0x1030), alias: "StudyDescription", vr: VR::LO },
    E { tag: Tag(0x0008, 0x103E), alias: "SeriesDescription", vr: VR::LO },
    E { tag: Tag(0x0008, 0x1090), alias: "ManufacturerModelName", vr: VR::LO },
    E { tag: Tag(0x0008, 0x1150), alias: "ReferencedSOPClassUID", vr: VR::UI },
    E { tag: Tag(0x0008, 0x1155), alias: "ReferencedSOPInstanceUID", vr: VR::UI },
    E { tag: Tag(0x0008, 0x2111), alias: "DerivationDescription", vr: VR::ST },
    // patient
    E { tag: Tag(0x0010, 0x0010), alias: "PatientName", vr: VR::PN },
    E { tag: Tag(0x0010, 0x0020), alias: "PatientID", vr: VR::LO },
    E { tag: Tag(0x0010, 0x0030), alias: "PatientBirthDate", vr: VR::DA },
    E { tag: Tag(0x0010, 0x0032), alias: "PatientBirthTime", vr: VR::TM },
    E { tag: Tag(0x0010, 0x0040), alias: "PatientSex", vr: VR::CS },
    E { tag: Tag(0x0010, 0x1010), alias: "PatientAge", vr: VR::AS },
    E { tag: Tag(0x0010, 0x1020), alias: "PatientSize", vr: VR::DS },
    E { tag: Tag(0x0010, 0x1030), alias: "PatientWeight", vr: VR::DS },
    E { tag: Tag(0x0010, 0x21B0), alias: "AdditionalPatientHistory", vr: VR::LT },
    E { tag: Tag(0x0010, 0x4000), alias: "PatientComments", vr: VR::LT },
    // acquisition
    E { tag: Tag(0x0018, 0x0015), alias: "BodyPartExamined", vr: VR::CS },
    E { tag: Tag(0x0018, 0x0050), alias: "SliceThickness", vr: VR::DS },
    E { tag: Tag(0x0018, 0x0060), alias: "KVP", vr: VR::DS },
    E { tag: Tag(0x0018, 0x0088), alias: "SpacingBetweenSlices", vr: VR::DS },
    E { tag: Tag(0x0018, 0x1020), alias: "SoftwareVersions", vr: VR::LO },
    E { tag: Tag(0x0018, 0x1030), alias: "ProtocolName", vr: VR::LO },
    E { tag: Tag(0x0018, 0x1151), alias: "XRayTubeCurrent", vr: VR::IS },
    E { tag: Tag(0x0018, 0x5100), alias: "PatientPosition", vr: VR::CS },
    // relationship
    E { tag: Tag(0x0020, 0x000D), alias: "StudyInstanceUID", vr: VR::UI },
    E { tag: Tag(0x0020, 0x000E), alias: "SeriesInstanceUID", vr: VR::UI },
    E { tag: Tag(0x0020, 0x0010), alias: "StudyID", vr: VR::SH },
    E { tag: Tag(0x0020, 0x0011), alias: "SeriesNumber", vr: VR::IS },
    E { tag: Tag(0x0020, 0x0012), alias: "AcquisitionNumber", vr: VR::IS },
    E { tag: Tag(0x0020, 0x0013), alias: "InstanceNumber", vr: VR::IS },
    E { tag: Tag(0x0020, 0x0032), alias: "ImagePositionPatient", vr: VR::DS },
    E { tag: Tag(0x0020, 0x0037), alias: "ImageOrientationPatient", vr: VR::DS },
    E { tag: Tag(0x0020, 0x0052), alias: "FrameOfReferenceUID", vr: VR::UI },
    E { tag: Tag(0x0020, 0x1041), alias: "SliceLocation", vr: VR::DS },
    E { tag: Tag(0x0020, 0x4000), alias: "ImageComments", vr: VR::LT },
    // image pixel
    E { tag: Tag(0x0028, 0x0002), alias: "SamplesPerPixel", vr: VR::US },
    E { tag: Tag(0x0028, 0x0004), alias: "PhotometricInterpretation", vr: VR::CS },
    E { tag: Tag(0x0028, 0x0006), alias: "PlanarConfiguration", vr: VR::US },
    E { tag: Tag(0x0028, 0x0008), alias: "NumberOfFrames", vr: VR::IS },
    E { tag: Tag(0x0028, 0x0009), alias: "FrameIncrementPointer", vr: VR::AT },
    E { tag: Tag(0x0028, 0x0010), alias: "Rows", vr: VR::US },
    E { tag: Tag(0x0028, 0x0011), alias: "Columns", vr: VR::US },
    E { tag: Tag(0x0028, 0x0030), alias: "PixelSpacing", vr: VR::DS },
    E { tag: Tag(0x0028, 0x0100), alias: "BitsAllocated", vr: VR::US },
    E { tag: Tag(0x0028, 0x0101), alias: "BitsStored", vr: VR::US },
    E { tag: Tag(0x0028, 0x0102), alias: "HighBit", vr: VR::US },
    E { tag: Tag(0x0028, 0x0103), alias: "PixelRepresentation", vr: VR::US },
    E { tag: Tag(0x0028, 0x0106), alias: "SmallestImagePixelValue", vr: VR::SS },
    E { tag: Tag(0x0028, 0x0107), alias: "LargestImagePixelValue", vr: VR::SS },
    E { tag: Tag(0x0028, 0x1050), alias: "WindowCenter", vr: VR::DS },
    E { tag: Tag(0x0028, 0x1051), alias: "WindowWidth", vr: VR::DS },
    E { tag: Tag(0x0028, 0x1052), alias: "RescaleIntercept", vr: VR::DS },
    E { tag: Tag(0x0028, 0x1053), alias: "RescaleSlope", vr: VR::DS },
    E { tag: Tag(0x0028, 0x1054), alias: "RescaleType", vr: VR::LO },
    E { tag: Tag(0x0028, 0x1201), alias: "RedPaletteColorLookupTableData", vr: VR::OW },
    E { tag: Tag(0x0028, 0x2110), alias: "LossyImageCompression", vr: VR::CS },
    // miscellaneous
    E { tag: Tag(0x0018, 0x9219), alias: "TagAngleSecondAxis", vr: VR::SS },
    E { tag: Tag(0x0018, 0x9087), alias: "DiffusionBValue", vr: VR::FD },
    E { tag: Tag(0x0018, 0x9089), alias: "DiffusionGradientOrientation", vr: VR::FD },
    E { tag: Tag(0x0018, 0x9306), alias: "SingleCollimationWidth", vr: VR::FD },
    E { tag: Tag(0x0040, 0x0244), alias: "PerformedProcedureStepStartDate", vr: VR::DA },
    E { tag: Tag(0x0040, 0x0245), alias: "PerformedProcedureStepStartTime", vr: VR::TM },
    E { tag: Tag(0x0040, 0xA30A), alias: "NumericValue", vr: VR::DS },
    E { tag: Tag(0x0054, 0x1330), alias: "ImageIndex", vr: VR::US },
    E { tag: Tag(0x0066, 0x0016), alias: "PointCoordinatesData", vr: VR::OF },
    E { tag: Tag(0x0072, 0x0078), alias: "SelectorULValue", vr: VR::UL },
    E { tag: Tag(0x0072, 0x007C), alias: "SelectorSLValue", vr: VR::SL },
    E { tag: Tag(0x0072, 0x0076), alias: "SelectorFLValue", vr: VR::FL },
    E { tag: Tag(0x0040, 0xA160), alias: "TextValue", vr: VR::UT },
    E { tag: Tag(0x0040, 0xA730), alias: "ContentSequence", vr: VR::SQ },
    E { tag: Tag(0x0008, 0x1140), alias: "ReferencedImageSequence", vr: VR::SQ },
    E { tag: Tag(0x7FE0, 0x0010), alias: "PixelData", vr: VR::OB },
    E { tag: Tag(0xFFFE, 0xE000), alias: "Item", vr: VR::UN },
];
