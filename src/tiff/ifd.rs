//! Image File Directory (IFD) structures and methods
//!
//! Every directory entry of every IFD in the chain ends up in one flat
//! [`TagTable`], in the order the entries were read. Each entry remembers
//! which directory contributed it, and [`IFD`] records the span of entries
//! belonging to one directory.

use std::collections::HashMap;
use std::ops::Range;

use log::trace;

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::layout;
use crate::tiff::types::FieldType;

/// Where the payload of an entry lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSlot {
    /// The payload fits in the 4-byte value slot and is stored there
    Inline([u8; 4]),
    /// The value slot holds the file offset of the payload
    Offset(u32),
}

/// Represents an entry in an Image File Directory (IFD)
///
/// The raw tag, type, count and value bytes are kept verbatim. The value
/// slot interpretation is decided once at construction: entries of a known
/// type whose payload exceeds four bytes are [`ValueSlot::Offset`], all
/// others are [`ValueSlot::Inline`]. Entries of unknown type are always
/// inline since nothing can dereference them. The fields are read-only so
/// the slot always agrees with the type and count it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct IFDEntry {
    /// TIFF tag identifier
    tag: u16,
    /// Raw field type code
    field_type: u16,
    /// Number of values
    count: u32,
    /// Raw value slot bytes, in file byte order
    value: [u8; 4],
    /// Index of the IFD this entry was read from
    directory: usize,
    slot: ValueSlot,
}

impl IFDEntry {
    /// Creates a new IFD entry, classifying its value slot
    pub fn new(tag: u16, field_type: u16, count: u32, value: [u8; 4],
               directory: usize, byte_order: ByteOrder) -> Self {
        let inline = match FieldType::from_code(field_type) {
            Some(kind) => (count as u64) * (kind.size() as u64) <= layout::VALUE_SLOT_SIZE as u64,
            None => true,
        };

        let slot = if inline {
            ValueSlot::Inline(value)
        } else {
            ValueSlot::Offset(byte_order.u32_from_bytes(value))
        };

        IFDEntry {
            tag,
            field_type,
            count,
            value,
            directory,
            slot,
        }
    }

    pub fn tag(&self) -> u16 {
        self.tag
    }

    /// Raw field type code as stored in the file
    pub fn field_type(&self) -> u16 {
        self.field_type
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Raw value slot bytes, in file byte order
    pub fn value(&self) -> [u8; 4] {
        self.value
    }

    /// Index of the IFD this entry was read from
    pub fn directory(&self) -> usize {
        self.directory
    }

    /// Returns the field type, `None` if the type code is unknown
    pub fn kind(&self) -> Option<FieldType> {
        FieldType::from_code(self.field_type)
    }

    /// Returns the payload size in bytes, `None` if the type is unknown
    pub fn byte_size(&self) -> Option<u64> {
        self.kind().map(|kind| self.count as u64 * kind.size() as u64)
    }

    /// Returns where the payload of this entry is stored
    pub fn slot(&self) -> ValueSlot {
        self.slot
    }

    /// Determines if the value is stored inline in the value slot
    pub fn is_value_inline(&self) -> bool {
        matches!(self.slot, ValueSlot::Inline(_))
    }

    /// Returns a human-readable description of this entry
    pub fn description(&self) -> String {
        let type_name = self.kind().map(|k| k.name()).unwrap_or("UNKNOWN");
        let storage = match self.slot {
            ValueSlot::Inline(bytes) => format!("inline {:02x?}", bytes),
            ValueSlot::Offset(offset) => format!("at offset {}", offset),
        };

        format!("Tag: {}, Type: {} ({}), Count: {}, Value: {}",
                self.tag, self.field_type, type_name, self.count, storage)
    }
}

/// Represents one Image File Directory in the chain
///
/// The entries themselves live in the owning [`TagTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IFD {
    /// IFD number (0-based)
    pub number: usize,
    /// Offset to this IFD in the file
    pub offset: u64,
    /// Range of this IFD's entries within the tag table
    pub entries: Range<usize>,
}

impl IFD {
    /// Gets the number of entries in this IFD
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// Ordered table of all directory entries
///
/// Built in a single pass by the reader and never mutated afterwards.
/// Duplicate tags are kept; lookups return the first one in traversal order.
#[derive(Debug, Clone, Default)]
pub struct TagTable {
    entries: Vec<IFDEntry>,
    directories: Vec<IFD>,
    /// Index of the first entry for each tag
    first_index: HashMap<u16, usize>,
}

impl TagTable {
    pub(crate) fn new() -> Self {
        TagTable::default()
    }

    /// Starts a new directory at `offset`, returns its number
    pub(crate) fn begin_directory(&mut self, offset: u64) -> usize {
        let number = self.directories.len();
        let start = self.entries.len();
        self.directories.push(IFD {
            number,
            offset,
            entries: start..start,
        });
        number
    }

    /// Appends an entry to the most recently started directory
    pub(crate) fn add_entry(&mut self, entry: IFDEntry) {
        trace!("Adding entry: {}", entry.description());

        let index = self.entries.len();
        self.first_index.entry(entry.tag()).or_insert(index);
        self.entries.push(entry);

        if let Some(dir) = self.directories.last_mut() {
            dir.entries.end = self.entries.len();
        }
    }

    /// Finds the first entry with `tag` in any directory
    pub fn find(&self, tag: u16) -> Option<&IFDEntry> {
        self.first_index.get(&tag).and_then(|&i| self.entries.get(i))
    }

    /// Finds the first entry with `tag` in directory `dir`
    pub fn find_in(&self, dir: usize, tag: u16) -> Option<&IFDEntry> {
        self.directory_entries(dir)?.iter().find(|e| e.tag() == tag)
    }

    /// Gets all entries in traversal order
    pub fn entries(&self) -> &[IFDEntry] {
        &self.entries
    }

    /// Gets all directories in chain order
    pub fn directories(&self) -> &[IFD] {
        &self.directories
    }

    /// Gets directory `dir`, if it exists
    pub fn directory(&self, dir: usize) -> Option<&IFD> {
        self.directories.get(dir)
    }

    /// Gets the entries of directory `dir`
    pub fn directory_entries(&self, dir: usize) -> Option<&[IFDEntry]> {
        let ifd = self.directories.get(dir)?;
        self.entries.get(ifd.entries.clone())
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
