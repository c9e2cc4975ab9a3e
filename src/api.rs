//! Public entry points
//!
//! Thin wrappers around a default-configured [`TiffReader`] for callers
//! that do not need to tune the reader.

use std::path::Path;

use crate::tiff::errors::TiffResult;
use crate::tiff::reader::TiffReader;
use crate::tiff::types::TIFF;

/// Parses a TIFF document from an in-memory buffer
///
/// The buffer is owned by the returned document for its whole lifetime.
/// On failure nothing of the partial parse is kept.
pub fn load(buffer: Vec<u8>) -> TiffResult<TIFF> {
    TiffReader::default().read(buffer)
}

/// Reads a file and parses it as a TIFF document
pub fn load_file<P: AsRef<Path>>(path: P) -> TiffResult<TIFF> {
    TiffReader::default().load(path)
}
