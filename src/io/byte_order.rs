//! Byte order handling for TIFF files
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian) when decoding TIFF data.
//! Readers operate on byte slices and advance them as they go, so a
//! short slice yields an `UnexpectedEof` error instead of a panic.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian, ReadBytesExt};
use std::io::Result;

use crate::tiff::constants::header;

/// Represents the byte order of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the four leading magic bytes
    ///
    /// Only "II*\0" and "MM\0*" are recognized. Anything else, including a
    /// buffer shorter than four bytes, returns `None`.
    pub fn detect(data: &[u8]) -> Option<Self> {
        let magic: [u8; 4] = data.get(..4)?.try_into().ok()?;
        match magic {
            header::LITTLE_ENDIAN_MAGIC => Some(ByteOrder::LittleEndian),
            header::BIG_ENDIAN_MAGIC => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Decodes a 4-byte value slot as a u32 in this byte order
    pub fn u32_from_bytes(&self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => LittleEndian::read_u32(&bytes),
            ByteOrder::BigEndian => BigEndian::read_u32(&bytes),
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order handling strategies
///
/// Each method consumes bytes from the front of `data`.
pub trait ByteOrderHandler: Send + Sync {
    /// Read a u16 value
    fn read_u16(&self, data: &mut &[u8]) -> Result<u16>;

    /// Read an i16 value
    fn read_i16(&self, data: &mut &[u8]) -> Result<i16>;

    /// Read a u32 value
    fn read_u32(&self, data: &mut &[u8]) -> Result<u32>;

    /// Read an i32 value
    fn read_i32(&self, data: &mut &[u8]) -> Result<i32>;

    /// Read an f32 value
    fn read_f32(&self, data: &mut &[u8]) -> Result<f32>;

    /// Read an f64 value
    fn read_f64(&self, data: &mut &[u8]) -> Result<f64>;
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_u16(&self, data: &mut &[u8]) -> Result<u16> {
        data.read_u16::<LittleEndian>()
    }

    fn read_i16(&self, data: &mut &[u8]) -> Result<i16> {
        data.read_i16::<LittleEndian>()
    }

    fn read_u32(&self, data: &mut &[u8]) -> Result<u32> {
        data.read_u32::<LittleEndian>()
    }

    fn read_i32(&self, data: &mut &[u8]) -> Result<i32> {
        data.read_i32::<LittleEndian>()
    }

    fn read_f32(&self, data: &mut &[u8]) -> Result<f32> {
        data.read_f32::<LittleEndian>()
    }

    fn read_f64(&self, data: &mut &[u8]) -> Result<f64> {
        data.read_f64::<LittleEndian>()
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_u16(&self, data: &mut &[u8]) -> Result<u16> {
        data.read_u16::<BigEndian>()
    }

    fn read_i16(&self, data: &mut &[u8]) -> Result<i16> {
        data.read_i16::<BigEndian>()
    }

    fn read_u32(&self, data: &mut &[u8]) -> Result<u32> {
        data.read_u32::<BigEndian>()
    }

    fn read_i32(&self, data: &mut &[u8]) -> Result<i32> {
        data.read_i32::<BigEndian>()
    }

    fn read_f32(&self, data: &mut &[u8]) -> Result<f32> {
        data.read_f32::<BigEndian>()
    }

    fn read_f64(&self, data: &mut &[u8]) -> Result<f64> {
        data.read_f64::<BigEndian>()
    }
}
