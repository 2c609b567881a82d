//! Elements backed by a file region
//! behave the same whether their bytes are loaded or not.

use dicom_element::buffer::{BufferSource, ByteBuffer, FileRegion};
use dicom_element::element::{self, AttributeTagElement, Element, ValueElement};
use dicom_element::{Endianness, Tag, VR};
use std::io::{self, Write};
use std::path::PathBuf;

fn write_temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    path
}

#[test]
fn unloaded_values_read_the_same() {
    // 4 bytes of preamble, then 3 big endian US values
    let path = write_temp_file("us-values.bin", &[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x01, 0x02, 0x00, 0xFF, 0xFF]);
    let buffer = ByteBuffer::from_source(FileRegion::new(&path, 4, 6), 6, Endianness::Big);
    let mut el = element::create_at(Tag(0x0028, 0x1101), VR::US, 4, Endianness::Big, Some(buffer))
        .unwrap();

    assert!(!el.buffer().is_loaded());
    assert_eq!(el.length(), 6);
    let unloaded = el.value_as_string().unwrap();
    assert_eq!(unloaded, "1\\512\\65535");
    assert_eq!(el.value_multiplicity().unwrap(), 3);

    el.preload().unwrap();
    assert!(el.buffer().is_loaded());
    assert_eq!(el.value_as_string().unwrap(), unloaded);

    el.unload();
    assert!(!el.buffer().is_loaded());
    assert_eq!(el.value_as_string().unwrap(), unloaded);

    // normalization loads the bytes and keeps them
    el.to_native_order().unwrap();
    assert_eq!(el.buffer().endianness(), Endianness::native());
    assert_eq!(el.value_as_string().unwrap(), unloaded);
    el.unload();
    if Endianness::native() != Endianness::Big {
        assert!(el.buffer().is_loaded());
    }

    std::fs::remove_file(path).unwrap();
}

#[test]
fn swapping_unloaded_bytes_is_refused() {
    let path = write_temp_file("ow-values.bin", &[0x01, 0x02]);
    let buffer = ByteBuffer::from_source(FileRegion::new(&path, 0, 2), 2, Endianness::Little);
    let mut el = element::create_at(Tag(0x0028, 0x1201), VR::OW, 0, Endianness::Little, Some(buffer))
        .unwrap();

    assert!(matches!(
        el.change_endian(),
        Err(dicom_element::Error::NotLoaded { .. })
    ));
    el.select_byte_order(Endianness::Big).unwrap();
    assert_eq!(el.buffer().to_bytes().unwrap(), vec![0x02, 0x01]);
    assert_eq!(el.value_as_string().unwrap(), "0201");

    std::fs::remove_file(path).unwrap();
}

#[test]
fn missing_source_is_reported() {
    let region = FileRegion::new(std::env::temp_dir().join("no-such-dicom-value.bin"), 0, 4);
    let buffer = ByteBuffer::from_source(region, 4, Endianness::Little);
    let el = element::create_at(Tag(0x0018, 0x9087), VR::FD, 0, Endianness::Little, Some(buffer))
        .unwrap();
    assert!(matches!(
        el.value_as_string(),
        Err(dicom_element::Error::LoadBuffer { .. })
    ));
}

/// A source which yields fewer bytes than the buffer recorded.
#[derive(Debug)]
struct TruncatedSource(Vec<u8>);

impl BufferSource for TruncatedSource {
    fn load(&self) -> io::Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

#[test]
fn short_source_is_an_index_error() {
    let buffer = ByteBuffer::from_source(TruncatedSource(vec![0x01, 0x00]), 8, Endianness::Little);
    let el = ValueElement::<u16>::from_parts(Tag(0x0028, 0x1101), VR::US, 0, buffer);
    assert_eq!(el.value_multiplicity().unwrap(), 4);
    assert_eq!(el.get_value(0).unwrap(), 1);
    assert!(matches!(
        el.get_value(3),
        Err(dicom_element::Error::IndexOutOfRange { index: 3, len: 1, .. })
    ));
    assert_eq!(el.get_values().unwrap(), vec![1]);

    let buffer = ByteBuffer::from_source(
        TruncatedSource(vec![0x28, 0x00, 0x10, 0x00]),
        8,
        Endianness::Little,
    );
    let el = AttributeTagElement::from_parts(Tag(0x0028, 0x0009), VR::AT, 0, buffer);
    assert_eq!(el.get_value(0).unwrap(), Tag(0x0028, 0x0010));
    assert!(matches!(
        el.get_value(1),
        Err(dicom_element::Error::IndexOutOfRange { index: 1, len: 1, .. })
    ));
}
