//! Raw value storage for data elements.
//!
//! A [`ByteBuffer`] keeps the encoded bytes of one element value
//! together with the byte order they are currently in
//! and the character set used for text.
//! Buffers bound to a [`BufferSource`] can drop their bytes
//! to reclaim memory and fetch them again on demand.

use crate::error::{DecodeTextSnafu, EncodeTextSnafu, LoadBufferSnafu, NotLoadedSnafu, Result};
use crate::header::Padding;
use crate::text::{SpecificCharacterSet, TextCodec};
use byteordered::{ByteOrdered, Endianness};
use snafu::{ensure, OptionExt, ResultExt};
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of buffer generations, unique across all buffers.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// A provider of value bytes which can be read again at any time,
/// such as a region of a file.
pub trait BufferSource: fmt::Debug {
    /// Read the full value bytes.
    fn load(&self) -> io::Result<Vec<u8>>;
}

/// A value stored at a fixed region of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRegion {
    path: PathBuf,
    offset: u64,
    length: u64,
}

impl FileRegion {
    /// Describe the `length` bytes of the file at `path`
    /// starting at byte `offset`.
    pub fn new(path: impl Into<PathBuf>, offset: u64, length: u64) -> Self {
        FileRegion {
            path: path.into(),
            offset,
            length,
        }
    }
}

impl BufferSource for FileRegion {
    fn load(&self) -> io::Result<Vec<u8>> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(self.offset))?;
        let mut data = vec![0; self.length as usize];
        file.read_exact(&mut data)?;
        Ok(data)
    }
}

impl<T: ?Sized> BufferSource for Arc<T>
where
    T: BufferSource,
{
    fn load(&self) -> io::Result<Vec<u8>> {
        (**self).load()
    }
}

/// The byte storage of a single element value.
#[derive(Debug, Clone)]
pub struct ByteBuffer {
    /// the bytes, `None` while unloaded
    data: Option<Vec<u8>>,
    /// length recorded when the bytes were unloaded
    unloaded_len: usize,
    endianness: Endianness,
    charset: SpecificCharacterSet,
    source: Option<Arc<dyn BufferSource>>,
    /// whether the bytes differ from what `source` would yield
    modified: bool,
    /// replaced by a fresh value on every mutation
    generation: u64,
}

impl Default for ByteBuffer {
    fn default() -> Self {
        ByteBuffer::new()
    }
}

impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.endianness == other.endianness
            && match (self.bytes(), other.bytes()) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            }
    }
}

impl ByteBuffer {
    /// Create an empty buffer in the machine's native byte order.
    pub fn new() -> Self {
        ByteBuffer::with_endianness(Endianness::native())
    }

    /// Create an empty buffer in the given byte order.
    pub fn with_endianness(endianness: Endianness) -> Self {
        ByteBuffer::from_vec(Vec::new(), endianness)
    }

    /// Create a buffer holding the given bytes,
    /// which are in the given byte order.
    pub fn from_vec(data: Vec<u8>, endianness: Endianness) -> Self {
        ByteBuffer {
            data: Some(data),
            unloaded_len: 0,
            endianness,
            charset: SpecificCharacterSet::default(),
            source: None,
            modified: false,
            generation: next_generation(),
        }
    }

    /// Create an unloaded buffer of `len` bytes,
    /// which are fetched from `source` when needed.
    pub fn from_source<S>(source: S, len: usize, endianness: Endianness) -> Self
    where
        S: BufferSource + 'static,
    {
        ByteBuffer {
            data: None,
            unloaded_len: len,
            endianness,
            charset: SpecificCharacterSet::default(),
            source: Some(Arc::new(source)),
            modified: false,
            generation: next_generation(),
        }
    }

    /// Use the given character set for text values.
    pub fn with_charset(mut self, charset: SpecificCharacterSet) -> Self {
        self.charset = charset;
        self.generation = next_generation();
        self
    }

    /// The number of value bytes, whether loaded or not.
    pub fn len(&self) -> usize {
        match &self.data {
            Some(data) => data.len(),
            None => self.unloaded_len,
        }
    }

    /// Whether the value has no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The byte order of the stored bytes.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Declare the byte order of the stored bytes,
    /// without changing them.
    pub fn set_endianness(&mut self, endianness: Endianness) {
        if self.endianness != endianness {
            self.endianness = endianness;
            self.touch();
        }
    }

    /// The character set used for text values.
    pub fn charset(&self) -> SpecificCharacterSet {
        self.charset
    }

    /// Whether the bytes are currently held in memory.
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// An identifier of the current content,
    /// never shared by two different contents of any buffers.
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    fn touch(&mut self) {
        self.modified = true;
        self.generation = next_generation();
    }

    /// Obtain the value bytes,
    /// reading them from the source if the buffer is unloaded.
    /// The buffer itself stays unloaded.
    pub fn bytes(&self) -> Result<Cow<'_, [u8]>> {
        match (&self.data, &self.source) {
            (Some(data), _) => Ok(Cow::Borrowed(data)),
            (None, Some(source)) => {
                tracing::trace!("Reading {} unloaded bytes from {:?}", self.unloaded_len, source);
                source.load().context(LoadBufferSnafu).map(Cow::Owned)
            }
            (None, None) => Ok(Cow::Borrowed(&[])),
        }
    }

    /// Obtain a copy of the value bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.bytes().map(Cow::into_owned)
    }

    /// Replace the whole value with the given bytes.
    pub fn set_bytes(&mut self, data: Vec<u8>) {
        self.data = Some(data);
        self.touch();
    }

    /// Remove all value bytes.
    pub fn clear(&mut self) {
        self.set_bytes(Vec::new());
    }

    /// Decode the value as text using the buffer's character set.
    pub fn get_string(&self) -> Result<String> {
        let bytes = self.bytes()?;
        self.charset.decode(&bytes).context(DecodeTextSnafu)
    }

    /// Encode the given text as the new value,
    /// padding it to an even length.
    pub fn set_string(&mut self, text: &str, padding: Padding) -> Result<()> {
        let mut data = self.charset.encode(text).context(EncodeTextSnafu)?;
        if data.len() % 2 == 1 {
            data.push(padding.byte());
        }
        self.set_bytes(data);
        Ok(())
    }

    /// Reverse the byte order of every `unit_size`-byte group in place.
    ///
    /// The declared byte order is left untouched.
    /// The buffer must be loaded.
    pub fn swap(&mut self, unit_size: usize) -> Result<()> {
        let data = self.data.as_mut().context(NotLoadedSnafu)?;
        if unit_size > 1 {
            for chunk in data.chunks_exact_mut(unit_size) {
                chunk.reverse();
            }
        }
        self.touch();
        Ok(())
    }

    /// Obtain a writer which appends primitive values to the buffer
    /// in its byte order.
    /// The buffer must be loaded.
    pub fn writer(&mut self) -> Result<ByteOrdered<&mut Vec<u8>, Endianness>> {
        ensure!(self.data.is_some(), NotLoadedSnafu);
        self.touch();
        let endianness = self.endianness;
        let data = self.data.get_or_insert_with(Vec::new);
        Ok(ByteOrdered::runtime(data, endianness))
    }

    /// Bring the value bytes into memory if they were unloaded.
    pub fn preload(&mut self) -> Result<()> {
        if self.data.is_none() {
            if let Some(source) = &self.source {
                let data = source.load().context(LoadBufferSnafu)?;
                tracing::debug!("Loaded {} bytes from {:?}", data.len(), source);
                self.data = Some(data);
            }
        }
        Ok(())
    }

    /// Release the value bytes if they can be read again later.
    ///
    /// Buffers without a source, or with changes not present in the source,
    /// are left loaded.
    pub fn unload(&mut self) {
        if self.data.is_none() {
            return;
        }
        if self.source.is_none() || self.modified {
            tracing::trace!("Buffer kept in memory: no source or local changes");
            return;
        }
        self.unloaded_len = self.len();
        self.data = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct CountingSource {
        bytes: Vec<u8>,
        loads: Rc<Cell<u32>>,
    }

    impl BufferSource for CountingSource {
        fn load(&self) -> io::Result<Vec<u8>> {
            self.loads.set(self.loads.get() + 1);
            Ok(self.bytes.clone())
        }
    }

    #[test]
    fn text_is_padded_to_even_length() {
        let mut buf = ByteBuffer::new();
        buf.set_string("ABC", Padding::Space).unwrap();
        assert_eq!(buf.to_bytes().unwrap(), b"ABC ");
        buf.set_string("1.2.3", Padding::Null).unwrap();
        assert_eq!(buf.to_bytes().unwrap(), b"1.2.3\0");
        buf.set_string("ABCD", Padding::Space).unwrap();
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn swap_reverses_each_group() {
        let mut buf = ByteBuffer::from_vec(vec![1, 2, 3, 4, 5, 6, 7, 8], Endianness::Little);
        buf.swap(2).unwrap();
        assert_eq!(buf.to_bytes().unwrap(), vec![2, 1, 4, 3, 6, 5, 8, 7]);
        buf.swap(4).unwrap();
        assert_eq!(buf.to_bytes().unwrap(), vec![3, 4, 1, 2, 7, 8, 5, 6]);
        // declared order is not changed by a raw swap
        assert_eq!(buf.endianness(), Endianness::Little);
    }

    #[test]
    fn unloaded_buffer_reads_through_source() {
        let loads = Rc::new(Cell::new(0));
        let source = CountingSource {
            bytes: vec![9, 8, 7, 6],
            loads: loads.clone(),
        };
        let mut buf = ByteBuffer::from_source(source, 4, Endianness::Big);
        assert!(!buf.is_loaded());
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.to_bytes().unwrap(), vec![9, 8, 7, 6]);
        assert!(!buf.is_loaded());

        buf.preload().unwrap();
        assert!(buf.is_loaded());
        assert_eq!(loads.get(), 2);

        buf.unload();
        assert!(!buf.is_loaded());
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.to_bytes().unwrap(), vec![9, 8, 7, 6]);
    }

    #[test]
    fn modified_buffer_is_not_unloaded() {
        let source = CountingSource {
            bytes: vec![1, 2],
            loads: Rc::new(Cell::new(0)),
        };
        let mut buf = ByteBuffer::from_source(source, 2, Endianness::Little);
        buf.preload().unwrap();
        buf.swap(2).unwrap();
        buf.unload();
        assert!(buf.is_loaded());
        assert_eq!(buf.to_bytes().unwrap(), vec![2, 1]);
    }

    #[test]
    fn swap_requires_loaded_bytes() {
        let source = CountingSource {
            bytes: vec![1, 2],
            loads: Rc::new(Cell::new(0)),
        };
        let mut buf = ByteBuffer::from_source(source, 2, Endianness::Little);
        assert!(buf.swap(2).is_err());
    }

    #[test]
    fn writer_appends_in_buffer_order() {
        let mut buf = ByteBuffer::with_endianness(Endianness::Big);
        buf.writer().unwrap().write_u16(0x0102).unwrap();
        buf.writer().unwrap().write_u16(0x0304).unwrap();
        assert_eq!(buf.to_bytes().unwrap(), vec![1, 2, 3, 4]);
    }
}
