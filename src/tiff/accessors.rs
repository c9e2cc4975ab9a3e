//! Typed tag accessors
//!
//! Read-only getters that interpret the raw bytes of an entry as integers,
//! floats or strings. They never fail hard: a missing tag, an unexpected
//! type or count, or payload bytes that cannot be read all come back as
//! `None`, so callers can fall back to another accessor or a default.
//!
//! The `get_*` methods look the tag up across all directories (first match
//! in traversal order). The `*_value` methods decode an entry the caller
//! already holds, e.g. one obtained from [`TIFF::find_tag_in`].

use crate::tiff::ifd::{IFDEntry, ValueSlot};
use crate::tiff::types::{FieldType, TIFF};
use crate::utils::string_utils;

impl TIFF {
    /// Finds the first entry with `tag` in any directory
    pub fn find_tag(&self, tag: u16) -> Option<&IFDEntry> {
        self.tags().find(tag)
    }

    /// Finds the first entry with `tag` in directory `dir`
    pub fn find_tag_in(&self, dir: usize, tag: u16) -> Option<&IFDEntry> {
        self.tags().find_in(dir, tag)
    }

    /// Gets a single unsigned integer (BYTE, SHORT or LONG)
    pub fn get_uint(&self, tag: u16) -> Option<u32> {
        self.find_tag(tag).and_then(|e| self.uint_value(e))
    }

    /// Gets a single unsigned integer (BYTE, SHORT or LONG) widened to `i64`
    pub fn get_int(&self, tag: u16) -> Option<i64> {
        self.find_tag(tag).and_then(|e| self.int_value(e))
    }

    /// Gets a single integer of any integer type, signed or not
    pub fn get_sint(&self, tag: u16) -> Option<i64> {
        self.find_tag(tag).and_then(|e| self.sint_value(e))
    }

    /// Gets a single FLOAT or DOUBLE value
    pub fn get_float(&self, tag: u16) -> Option<f64> {
        self.find_tag(tag).and_then(|e| self.float_value(e))
    }

    /// Gets the raw bytes of an ASCII tag
    pub fn get_string(&self, tag: u16) -> Option<Vec<u8>> {
        self.find_tag(tag).and_then(|e| self.string_value(e))
    }

    /// Gets an ASCII tag as text, cut at the first NUL
    pub fn get_text(&self, tag: u16) -> Option<String> {
        self.find_tag(tag).and_then(|e| self.text_value(e))
    }

    /// Gets exactly `expected_count` unsigned integers (BYTE, SHORT or LONG)
    pub fn get_uints(&self, tag: u16, expected_count: u32) -> Option<Vec<u32>> {
        self.find_tag(tag).and_then(|e| self.uints_value(e, expected_count))
    }

    /// Gets a single flag stored as BYTE, SBYTE, SHORT or SSHORT
    pub fn get_bool(&self, tag: u16) -> Option<bool> {
        self.find_tag(tag).and_then(|e| self.bool_value(e))
    }

    /// Decodes a count-1 BYTE, SHORT or LONG entry
    pub fn uint_value(&self, entry: &IFDEntry) -> Option<u32> {
        if entry.count() != 1 {
            return None;
        }

        let value = entry.value();
        let mut p = &value[..];
        match entry.kind()? {
            FieldType::Byte => Some(value[0] as u32),
            FieldType::Short => self.handler.read_u16(&mut p).ok().map(u32::from),
            FieldType::Long => self.handler.read_u32(&mut p).ok(),
            _ => None,
        }
    }

    /// Decodes a count-1 BYTE, SHORT or LONG entry as `i64`
    pub fn int_value(&self, entry: &IFDEntry) -> Option<i64> {
        self.uint_value(entry).map(i64::from)
    }

    /// Decodes a count-1 integer entry of any signedness
    pub fn sint_value(&self, entry: &IFDEntry) -> Option<i64> {
        if entry.count() != 1 {
            return None;
        }

        let value = entry.value();
        let mut p = &value[..];
        match entry.kind()? {
            FieldType::Byte => Some(value[0] as i64),
            FieldType::SByte => Some(value[0] as i8 as i64),
            FieldType::Short => self.handler.read_u16(&mut p).ok().map(i64::from),
            FieldType::SShort => self.handler.read_i16(&mut p).ok().map(i64::from),
            FieldType::Long => self.handler.read_u32(&mut p).ok().map(i64::from),
            FieldType::SLong => self.handler.read_i32(&mut p).ok().map(i64::from),
            _ => None,
        }
    }

    /// Decodes a count-1 FLOAT (inline) or DOUBLE (out of line) entry
    pub fn float_value(&self, entry: &IFDEntry) -> Option<f64> {
        if entry.count() != 1 {
            return None;
        }

        match (entry.kind()?, entry.slot()) {
            (FieldType::Float, ValueSlot::Inline(bytes)) => {
                self.handler.read_f32(&mut &bytes[..]).ok().map(f64::from)
            }
            (FieldType::Double, ValueSlot::Offset(offset)) => {
                let mut p = self.bytes_at(offset, 8)?;
                self.handler.read_f64(&mut p).ok()
            }
            _ => None,
        }
    }

    /// Copies the bytes of an ASCII entry
    ///
    /// Up to four bytes are taken from the value slot as they are. Longer
    /// strings are copied from the referenced offset and their last byte is
    /// forced to NUL, whatever the file holds there.
    pub fn string_value(&self, entry: &IFDEntry) -> Option<Vec<u8>> {
        if entry.kind()? != FieldType::Ascii {
            return None;
        }

        match entry.slot() {
            ValueSlot::Inline(bytes) => bytes.get(..entry.count() as usize).map(<[u8]>::to_vec),
            ValueSlot::Offset(offset) => {
                let mut buffer = self.bytes_at(offset, entry.count() as usize)?.to_vec();
                if let Some(last) = buffer.last_mut() {
                    *last = 0;
                }
                Some(buffer)
            }
        }
    }

    /// Decodes an ASCII entry as text, lossily converting invalid UTF-8
    pub fn text_value(&self, entry: &IFDEntry) -> Option<String> {
        let bytes = self.string_value(entry)?;
        let text = string_utils::until_nul(&bytes);
        Some(String::from_utf8_lossy(text).into_owned())
    }

    /// Decodes a BYTE, SHORT or LONG array holding exactly `expected_count`
    /// elements
    pub fn uints_value(&self, entry: &IFDEntry, expected_count: u32) -> Option<Vec<u32>> {
        if entry.count() != expected_count {
            return None;
        }

        let kind = entry.kind()?;
        if !matches!(kind, FieldType::Byte | FieldType::Short | FieldType::Long) {
            return None;
        }

        let size = usize::try_from(entry.byte_size()?).ok()?;
        let value = entry.value();
        let mut p = match entry.slot() {
            ValueSlot::Inline(_) => value.get(..size)?,
            ValueSlot::Offset(offset) => self.bytes_at(offset, size)?,
        };

        let mut values = Vec::with_capacity(expected_count as usize);
        for _ in 0..expected_count {
            let value = match kind {
                FieldType::Byte => {
                    let (&first, rest) = p.split_first()?;
                    p = rest;
                    first as u32
                }
                FieldType::Short => self.handler.read_u16(&mut p).ok()? as u32,
                _ => self.handler.read_u32(&mut p).ok()?,
            };
            values.push(value);
        }

        Some(values)
    }

    /// Decodes a count-1 BYTE, SBYTE, SHORT or SSHORT entry as a flag
    pub fn bool_value(&self, entry: &IFDEntry) -> Option<bool> {
        if entry.count() != 1 {
            return None;
        }

        let value = entry.value();
        match entry.kind()? {
            FieldType::Byte | FieldType::SByte => Some(value[0] != 0),
            FieldType::Short | FieldType::SShort => {
                self.handler.read_u16(&mut &value[..]).ok().map(|v| v != 0)
            }
            _ => None,
        }
    }
}
