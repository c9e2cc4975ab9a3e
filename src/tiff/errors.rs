//! Custom error types for TIFF processing

use std::fmt;
use std::io;

/// Broad failure classes reported by [`TiffError::kind`]
///
/// Callers probing several file formats usually only care which class a
/// failure falls into: a `FormatMismatch` means "try the next detector",
/// everything else means the file looked like TIFF but is corrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The leading magic bytes are not a TIFF magic
    FormatMismatch,
    /// The header or a directory extends past the end of the buffer
    Truncated,
    /// An indirect tag payload lies outside the buffer
    InvalidTagPosition,
    /// The directory chain loops or is unreasonably long
    DirectoryChain,
    /// The file could not be read
    Io,
    /// Anything else
    Other,
}

/// TIFF-specific error types
#[derive(Debug)]
pub enum TiffError {
    /// I/O error
    IoError(io::Error),
    /// Unrecognized magic, carries the leading bytes that were found
    FormatMismatch(Vec<u8>),
    /// Buffer holds a valid magic but no room for the first IFD offset
    TruncatedHeader(usize),
    /// Directory `index` at `offset` does not fit in the buffer
    TruncatedDirectory { index: usize, offset: u64 },
    /// A tag's out-of-line data does not fit in the buffer
    InvalidTagPosition { directory: usize, tag: u16 },
    /// Directory `index` points back to an already visited offset
    DirectoryLoop { index: usize, offset: u64 },
    /// The chain holds more directories than the configured limit
    TooManyDirectories(usize),
    /// Generic error with message
    GenericError(String),
}

impl TiffError {
    /// Returns the failure class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TiffError::IoError(_) => ErrorKind::Io,
            TiffError::FormatMismatch(_) => ErrorKind::FormatMismatch,
            TiffError::TruncatedHeader(_) | TiffError::TruncatedDirectory { .. } => ErrorKind::Truncated,
            TiffError::InvalidTagPosition { .. } => ErrorKind::InvalidTagPosition,
            TiffError::DirectoryLoop { .. } | TiffError::TooManyDirectories(_) => ErrorKind::DirectoryChain,
            TiffError::GenericError(_) => ErrorKind::Other,
        }
    }
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::FormatMismatch(magic) => write!(f, "Not a TIFF file (leading bytes {:02x?})", magic),
            TiffError::TruncatedHeader(len) => write!(f, "TIFF header ended unexpectedly ({} bytes)", len),
            TiffError::TruncatedDirectory { index, offset } =>
                write!(f, "TIFF directory {} ended unexpectedly (offset {})", index, offset),
            TiffError::InvalidTagPosition { directory, tag } =>
                write!(f, "Invalid tag data positions were found (tag {} in directory {})", tag, directory),
            TiffError::DirectoryLoop { index, offset } =>
                write!(f, "TIFF directory {} points back to offset {}", index, offset),
            TiffError::TooManyDirectories(limit) => write!(f, "More than {} TIFF directories", limit),
            TiffError::GenericError(msg) => write!(f, "TIFF error: {}", msg),
        }
    }
}

impl std::error::Error for TiffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TiffError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        TiffError::IoError(error)
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;

impl From<String> for TiffError {
    fn from(msg: String) -> Self {
        TiffError::GenericError(msg)
    }
}
