//! TIFF format constants
//!
//! This module defines the layout constants of classic TIFF used by the
//! reader, replacing magic numbers with descriptive names.

/// TIFF header constants
pub mod header {
    /// "II" followed by version 42, little-endian
    pub const LITTLE_ENDIAN_MAGIC: [u8; 4] = [0x49, 0x49, 0x2A, 0x00];

    /// "MM" followed by version 42, big-endian
    pub const BIG_ENDIAN_MAGIC: [u8; 4] = [0x4D, 0x4D, 0x00, 0x2A];

    /// Magic (4 bytes) plus the first IFD offset (4 bytes)
    pub const HEADER_SIZE: usize = 8;
}

/// Directory layout constants
pub mod layout {
    /// Size of the entry count at the start of a directory
    pub const ENTRY_COUNT_SIZE: usize = 2;

    /// Size of one directory entry: tag, type, count, value slot
    pub const ENTRY_SIZE: usize = 12;

    /// Size of the next-directory pointer ending a directory
    pub const NEXT_OFFSET_SIZE: usize = 4;

    /// Size of the value slot of an entry
    pub const VALUE_SLOT_SIZE: usize = 4;

    /// Default cap on the number of directories in one chain
    pub const DEFAULT_MAX_DIRECTORIES: usize = 1024;
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
    pub const IFD: u16 = 13;       // 32-bit offset of a sub-IFD
}
