//! TIFF file format parsing module
//!
//! This module provides structures and functions for reading the
//! directory structure of classic TIFF files.

pub mod errors;
pub mod ifd;
pub mod types;
pub mod reader;
pub mod accessors;
pub(crate) mod constants;
pub(crate) mod validation;
pub mod tag_names;
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use errors::{ErrorKind, TiffError, TiffResult};
pub use ifd::{IFD, IFDEntry, TagTable, ValueSlot};
pub use reader::{TiffReader, TiffReaderBuilder};
pub use types::{FieldType, TIFF};
pub use tag_names::TagNames;
