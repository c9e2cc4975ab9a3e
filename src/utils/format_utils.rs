//! Value formatting utilities
//!
//! Renders entry values for command output using the typed accessors.

use crate::tiff::ifd::{IFDEntry, ValueSlot};
use crate::tiff::types::{FieldType, TIFF};

/// Longest integer array rendered element by element
const MAX_ARRAY_DISPLAY: u32 = 16;

/// Formats the value of an entry for display
///
/// Scalars, strings and short integer arrays are decoded; anything else is
/// shown as raw value slot bytes or as the location of its payload.
pub fn format_entry_value(tiff: &TIFF, entry: &IFDEntry) -> String {
    let decoded = match entry.kind() {
        Some(FieldType::Ascii) => tiff.text_value(entry).map(|s| format!("{:?}", s)),
        Some(FieldType::Float) | Some(FieldType::Double) => {
            tiff.float_value(entry).map(|v| v.to_string())
        }
        Some(FieldType::Byte) | Some(FieldType::Short) | Some(FieldType::Long)
            if entry.count() > 1 && entry.count() <= MAX_ARRAY_DISPLAY =>
        {
            tiff.uints_value(entry, entry.count()).map(|values| format_list(&values))
        }
        Some(_) => tiff.sint_value(entry).map(|v| v.to_string()),
        None => None,
    };

    decoded.unwrap_or_else(|| format_raw(entry))
}

/// Formats the storage of an entry without decoding it
pub fn format_raw(entry: &IFDEntry) -> String {
    match entry.slot() {
        ValueSlot::Inline(bytes) => format!("{:02x?}", bytes),
        ValueSlot::Offset(offset) => match entry.byte_size() {
            Some(size) => format!("<{} bytes at offset {}>", size, offset),
            None => format!("<offset {}>", offset),
        },
    }
}

fn format_list(values: &[u32]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::load;

    #[test]
    fn test_format_entry_values() {
        let mut data = b"II*\0\x08\0\0\0\x03\0".to_vec();
        // ImageWidth SHORT 640, BitsPerSample SHORT[2], unknown type 99
        data.extend_from_slice(&[0, 1, 3, 0, 1, 0, 0, 0, 0x80, 2, 0, 0]);
        data.extend_from_slice(&[2, 1, 3, 0, 2, 0, 0, 0, 8, 0, 16, 0]);
        data.extend_from_slice(&[0x50, 0xC3, 99, 0, 1, 0, 0, 0, 1, 2, 3, 4]);
        data.extend_from_slice(&[0, 0, 0, 0]);

        let tiff = load(data).unwrap();
        let values: Vec<String> = tiff.tags().entries().iter()
            .map(|e| format_entry_value(&tiff, e))
            .collect();

        assert_eq!(values, vec!["640", "[8, 16]", "[01, 02, 03, 04]"]);
    }
}
