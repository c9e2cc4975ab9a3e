//! TIFF file reader implementation
//!
//! This module implements the loader that turns a raw buffer into a
//! [`TIFF`] document: the magic selects the byte order, the directory chain
//! is walked into a [`TagTable`] and every indirect payload is bounds
//! checked before the document is handed out. Any failure discards all
//! partial state.

use log::{debug, info};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::tiff::constants::{header, layout};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::{IFDEntry, TagTable};
use crate::tiff::types::TIFF;
use crate::tiff::validation;

/// Builder for TiffReader
///
/// Provides a clean way to construct a TiffReader with various configurations.
pub struct TiffReaderBuilder {
    max_directories: usize,
}

impl TiffReaderBuilder {
    /// Create a new TiffReaderBuilder with default settings
    pub fn new() -> Self {
        TiffReaderBuilder {
            max_directories: layout::DEFAULT_MAX_DIRECTORIES,
        }
    }

    /// Limit the number of directories a chain may contain
    pub fn max_directories(mut self, max_directories: usize) -> Self {
        self.max_directories = max_directories;
        self
    }

    /// Build the TiffReader
    pub fn build(self) -> TiffReader {
        TiffReader {
            max_directories: self.max_directories,
        }
    }
}

impl Default for TiffReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Reader for classic TIFF files
///
/// The reader holds only configuration; every call produces an
/// independently owned document.
#[derive(Debug, Clone)]
pub struct TiffReader {
    max_directories: usize,
}

impl Default for TiffReader {
    fn default() -> Self {
        TiffReaderBuilder::new().build()
    }
}

impl TiffReader {
    /// Creates a reader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the directory limit of this reader
    pub fn max_directories(&self) -> usize {
        self.max_directories
    }

    /// Loads a TIFF file from the given path
    ///
    /// The whole file is read into memory and handed to [`TiffReader::read`].
    pub fn load<P: AsRef<Path>>(&self, path: P) -> TiffResult<TIFF> {
        let path = path.as_ref();
        info!("Loading TIFF file: {}", path.display());

        let data = fs::read(path)?;
        self.read(data)
    }

    /// Parses a TIFF document from an in-memory buffer
    ///
    /// This method handles the core process of reading a TIFF file:
    /// 1. Detect byte order from the magic
    /// 2. Read the first IFD offset
    /// 3. Walk the IFD chain into a tag table
    /// 4. Verify that all indirect tag data lies inside the buffer
    pub fn read(&self, data: Vec<u8>) -> TiffResult<TIFF> {
        let byte_order = match ByteOrder::detect(&data) {
            Some(byte_order) => byte_order,
            None => {
                let magic = data.iter().take(4).copied().collect();
                return Err(TiffError::FormatMismatch(magic));
            }
        };
        debug!("Detected byte order: {}", byte_order.name());

        let handler = byte_order.create_handler();
        let first_ifd_offset = data
            .get(4..header::HEADER_SIZE)
            .and_then(|mut p| handler.read_u32(&mut p).ok())
            .ok_or(TiffError::TruncatedHeader(data.len()))?;
        debug!("First IFD offset: {}", first_ifd_offset);

        let tags = self.read_ifd_chain(&data, first_ifd_offset as u64, byte_order, handler.as_ref())?;
        validation::validate_tag_positions(&tags, data.len())?;

        info!("Read {} IFDs with {} entries", tags.directory_count(), tags.len());
        Ok(TIFF::new(data, byte_order, tags))
    }

    /// Reads a chain of IFDs starting from the given offset
    ///
    /// The first directory is always read; the walk ends at the first zero
    /// next pointer. Revisiting an offset or exceeding the directory limit
    /// fails the whole chain.
    fn read_ifd_chain(&self, data: &[u8], first_ifd_offset: u64, byte_order: ByteOrder,
                      handler: &dyn ByteOrderHandler) -> TiffResult<TagTable> {
        let mut tags = TagTable::new();
        let mut visited = HashSet::new();
        let mut offset = first_ifd_offset;

        loop {
            let index = tags.directory_count();
            if index >= self.max_directories {
                return Err(TiffError::TooManyDirectories(self.max_directories));
            }
            if !visited.insert(offset) {
                return Err(TiffError::DirectoryLoop { index, offset });
            }

            offset = self.read_ifd(data, offset, index, byte_order, handler, &mut tags)?;
            debug!("Next IFD offset: {}", offset);

            if offset == 0 {
                break;
            }
        }

        Ok(tags)
    }

    /// Reads the IFD at `offset` into `tags`, returns the next IFD offset
    fn read_ifd(&self, data: &[u8], offset: u64, index: usize, byte_order: ByteOrder,
                handler: &dyn ByteOrderHandler, tags: &mut TagTable) -> TiffResult<u64> {
        let truncated = || TiffError::TruncatedDirectory { index, offset };

        validation::validate_directory_header(offset, index, data.len())?;
        let mut p = data.get(offset as usize..).ok_or_else(truncated)?;

        let nentries = handler.read_u16(&mut p).map_err(|_| truncated())?;
        debug!("IFD {} at offset {}: {} entries", index, offset, nentries);
        validation::validate_directory_size(offset, nentries, index, data.len())?;

        tags.begin_directory(offset);
        for _ in 0..nentries {
            let entry = Self::read_ifd_entry(&mut p, index, byte_order, handler)
                .map_err(|_| truncated())?;
            tags.add_entry(entry);
        }

        let next = handler.read_u32(&mut p).map_err(|_| truncated())?;
        Ok(next as u64)
    }

    /// Reads a single IFD entry
    fn read_ifd_entry(p: &mut &[u8], directory: usize, byte_order: ByteOrder,
                      handler: &dyn ByteOrderHandler) -> io::Result<IFDEntry> {
        let tag = handler.read_u16(p)?;
        let field_type = handler.read_u16(p)?;
        let count = handler.read_u32(p)?;

        let mut value = [0u8; 4];
        p.read_exact(&mut value)?;

        Ok(IFDEntry::new(tag, field_type, count, value, directory, byte_order))
    }
}
