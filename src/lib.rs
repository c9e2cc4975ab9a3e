pub mod io;
pub mod tiff;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::{load, load_file};

pub use tiff::{ErrorKind, FieldType, IFDEntry, TiffError, TiffReader, TiffResult, TIFF};
