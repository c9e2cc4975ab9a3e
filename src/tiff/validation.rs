//! TIFF validation utilities
//!
//! Overflow-safe bounds checks used while walking the directory chain and
//! after the tag table is complete. All arithmetic is done with checked
//! operations so hostile offsets and counts cannot wrap around.

use log::{debug, warn};

use crate::tiff::constants::layout;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::{TagTable, ValueSlot};

/// Checks that `nitems` elements of `item_size` bytes at `offset` fit in a
/// buffer of `size` bytes
///
/// Returns false when the byte size or the end position overflows.
pub fn data_fits(offset: u64, item_size: u64, nitems: u64, size: usize) -> bool {
    let end = match item_size.checked_mul(nitems).and_then(|n| offset.checked_add(n)) {
        Some(end) => end,
        None => return false,
    };

    end <= size as u64
}

/// Checks that the entry count and next pointer of a directory at `offset`
/// fit in the buffer
pub fn validate_directory_header(offset: u64, index: usize, size: usize) -> TiffResult<()> {
    let header_size = (layout::ENTRY_COUNT_SIZE + layout::NEXT_OFFSET_SIZE) as u64;
    if !data_fits(offset, 1, header_size, size) {
        warn!("TIFF directory {} at offset {} has no room for its header", index, offset);
        return Err(TiffError::TruncatedDirectory { index, offset });
    }

    Ok(())
}

/// Checks that a directory of `nentries` entries at `offset` fits in the
/// buffer, including its entry count and next pointer
pub fn validate_directory_size(offset: u64, nentries: u16, index: usize, size: usize) -> TiffResult<()> {
    let fixed = (layout::ENTRY_COUNT_SIZE + layout::NEXT_OFFSET_SIZE) as u64;
    let fits = (layout::ENTRY_SIZE as u64)
        .checked_mul(nentries as u64)
        .and_then(|n| n.checked_add(fixed))
        .map(|total| data_fits(offset, 1, total, size))
        .unwrap_or(false);

    if !fits {
        warn!("TIFF directory {} at offset {} with {} entries exceeds {} bytes",
              index, offset, nentries, size);
        return Err(TiffError::TruncatedDirectory { index, offset });
    }

    Ok(())
}

/// Verifies that every out-of-line payload lies inside the buffer
///
/// Only entries classified as [`ValueSlot::Offset`] are checked. Entries of
/// unknown type are inline by construction and never dereferenced, so their
/// value slot is not looked at. The first violation rejects the whole table.
pub fn validate_tag_positions(tags: &TagTable, size: usize) -> TiffResult<()> {
    for entry in tags.entries() {
        let offset = match entry.slot() {
            ValueSlot::Offset(offset) => offset,
            ValueSlot::Inline(_) => continue,
        };

        let item_size = match entry.kind() {
            Some(kind) => kind.size() as u64,
            None => continue,
        };

        if !data_fits(offset as u64, item_size, entry.count() as u64, size) {
            warn!("Tag {} in directory {}: {} x {} bytes at offset {} exceed {} bytes",
                  entry.tag(), entry.directory(), entry.count(), item_size, offset, size);
            return Err(TiffError::InvalidTagPosition {
                directory: entry.directory(),
                tag: entry.tag(),
            });
        }
    }

    debug!("All {} tag positions are valid", tags.len());
    Ok(())
}
