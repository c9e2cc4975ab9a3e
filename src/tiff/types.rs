//! Core TIFF data structures

use std::fmt;

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::tiff::constants::field_types;
use crate::tiff::ifd::TagTable;

/// TIFF field (data) types understood by the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
    Ifd,
}

impl FieldType {
    /// Maps a raw type code to a field type, `None` for unknown codes
    pub fn from_code(code: u16) -> Option<Self> {
        let field_type = match code {
            field_types::BYTE => FieldType::Byte,
            field_types::ASCII => FieldType::Ascii,
            field_types::SHORT => FieldType::Short,
            field_types::LONG => FieldType::Long,
            field_types::RATIONAL => FieldType::Rational,
            field_types::SBYTE => FieldType::SByte,
            field_types::UNDEFINED => FieldType::Undefined,
            field_types::SSHORT => FieldType::SShort,
            field_types::SLONG => FieldType::SLong,
            field_types::SRATIONAL => FieldType::SRational,
            field_types::FLOAT => FieldType::Float,
            field_types::DOUBLE => FieldType::Double,
            field_types::IFD => FieldType::Ifd,
            _ => return None,
        };
        Some(field_type)
    }

    /// Returns the raw type code
    pub fn code(&self) -> u16 {
        match self {
            FieldType::Byte => field_types::BYTE,
            FieldType::Ascii => field_types::ASCII,
            FieldType::Short => field_types::SHORT,
            FieldType::Long => field_types::LONG,
            FieldType::Rational => field_types::RATIONAL,
            FieldType::SByte => field_types::SBYTE,
            FieldType::Undefined => field_types::UNDEFINED,
            FieldType::SShort => field_types::SSHORT,
            FieldType::SLong => field_types::SLONG,
            FieldType::SRational => field_types::SRATIONAL,
            FieldType::Float => field_types::FLOAT,
            FieldType::Double => field_types::DOUBLE,
            FieldType::Ifd => field_types::IFD,
        }
    }

    /// Size in bytes of one element of this type
    pub fn size(&self) -> usize {
        match self {
            FieldType::Byte | FieldType::SByte | FieldType::Ascii | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float | FieldType::Ifd => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
        }
    }

    /// Returns the TIFF name of this type
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::SByte => "SBYTE",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SShort => "SSHORT",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::Ifd => "IFD",
        }
    }
}

/// A parsed TIFF document
///
/// Owns the raw file bytes together with the tag table built from them.
/// Instances only exist after the whole directory chain was read and every
/// indirect tag payload was checked to lie inside the buffer, so the typed
/// accessors never read out of bounds. The document is immutable and can be
/// shared between threads.
pub struct TIFF {
    /// Raw file contents, every offset indexes into this
    data: Vec<u8>,
    /// Byte order selected by the magic
    byte_order: ByteOrder,
    /// Decoder for `byte_order`
    pub(crate) handler: Box<dyn ByteOrderHandler>,
    /// All directory entries in traversal order
    tags: TagTable,
}

impl TIFF {
    pub(crate) fn new(data: Vec<u8>, byte_order: ByteOrder, tags: TagTable) -> Self {
        TIFF {
            data,
            byte_order,
            handler: byte_order.create_handler(),
            tags,
        }
    }

    /// Returns the raw file contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the size of the raw file contents
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the byte order of the file
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Returns the table of all directory entries
    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    /// Returns the number of IFDs in the chain
    pub fn directory_count(&self) -> usize {
        self.tags.directory_count()
    }

    /// Returns `len` bytes starting at `offset`, or `None` if out of range
    pub(crate) fn bytes_at(&self, offset: u32, len: usize) -> Option<&[u8]> {
        let start = offset as usize;
        let end = start.checked_add(len)?;
        self.data.get(start..end)
    }
}

impl fmt::Debug for TIFF {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TIFF")
            .field("size", &self.data.len())
            .field("byte_order", &self.byte_order)
            .field("tags", &self.tags)
            .finish()
    }
}

impl fmt::Display for TIFF {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TIFF File:")?;
        writeln!(f, "  Size: {} bytes", self.data.len())?;
        writeln!(f, "  Byte order: {}", self.byte_order.name())?;
        writeln!(f, "  Number of IFDs: {}", self.tags.directory_count())?;
        writeln!(f, "  Number of entries: {}", self.tags.len())?;

        Ok(())
    }
}
