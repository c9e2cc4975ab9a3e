//! Single tag query command
//!
//! Looks up one tag and prints its value through the requested accessor.

use std::str::FromStr;

use clap::ArgMatches;
use log::debug;

use crate::commands::command_traits::Command;
use crate::commands::{input_file, parse_arg, parse_tag_id, reader_from_args};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFDEntry;
use crate::tiff::reader::TiffReader;
use crate::tiff::types::TIFF;
use crate::utils::format_utils;

/// Accessor used to decode the queried tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Pick a rendering from the entry type
    Auto,
    Uint,
    Int,
    /// Any integer type, signed or not
    Sint,
    Float,
    String,
    Uints,
    Bool,
}

impl FromStr for ValueKind {
    type Err = TiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ValueKind::Auto),
            "uint" => Ok(ValueKind::Uint),
            "int" => Ok(ValueKind::Int),
            "sint" => Ok(ValueKind::Sint),
            "float" => Ok(ValueKind::Float),
            "string" => Ok(ValueKind::String),
            "uints" => Ok(ValueKind::Uints),
            "bool" => Ok(ValueKind::Bool),
            other => Err(TiffError::GenericError(format!("Unknown value kind: {}", other))),
        }
    }
}

/// Command for printing the value of one tag
pub struct TagCommand {
    input_file: String,
    tag: u16,
    kind: ValueKind,
    /// Element count required by `uints`, defaults to the entry count
    count: Option<u32>,
    /// Restrict the lookup to one directory
    directory: Option<usize>,
    reader: TiffReader,
}

impl TagCommand {
    /// Create a new tag command from CLI arguments
    pub fn new(args: &ArgMatches) -> TiffResult<Self> {
        let raw_tag = args.get_one::<String>("tag")
            .ok_or_else(|| TiffError::GenericError("Missing tag id".to_string()))?;

        Ok(TagCommand {
            input_file: input_file(args)?,
            tag: parse_tag_id(raw_tag)?,
            kind: parse_arg::<ValueKind>(args, "as")?.unwrap_or(ValueKind::Auto),
            count: parse_arg::<u32>(args, "count")?,
            directory: parse_arg::<usize>(args, "dir")?,
            reader: reader_from_args(args)?,
        })
    }

    /// Decodes `entry` with the selected accessor
    fn render(&self, tiff: &TIFF, entry: &IFDEntry) -> Option<String> {
        match self.kind {
            ValueKind::Auto => Some(format_utils::format_entry_value(tiff, entry)),
            ValueKind::Uint => tiff.uint_value(entry).map(|v| v.to_string()),
            ValueKind::Int => tiff.int_value(entry).map(|v| v.to_string()),
            ValueKind::Sint => tiff.sint_value(entry).map(|v| v.to_string()),
            ValueKind::Float => tiff.float_value(entry).map(|v| v.to_string()),
            ValueKind::String => tiff.text_value(entry),
            ValueKind::Bool => tiff.bool_value(entry).map(|v| v.to_string()),
            ValueKind::Uints => {
                let count = self.count.unwrap_or(entry.count());
                tiff.uints_value(entry, count).map(|values| {
                    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
                })
            }
        }
    }
}

impl Command for TagCommand {
    fn execute(&self) -> TiffResult<()> {
        debug!("Querying tag {} in {}", self.tag, self.input_file);
        let tiff = self.reader.load(&self.input_file)?;

        let entry = match self.directory {
            Some(dir) => tiff.find_tag_in(dir, self.tag),
            None => tiff.find_tag(self.tag),
        };
        let entry = entry.ok_or_else(|| TiffError::GenericError(format!("Tag {} not found", self.tag)))?;

        match self.render(&tiff, entry) {
            Some(value) => {
                println!("{}", value);
                Ok(())
            }
            None => Err(TiffError::GenericError(format!(
                "Tag {} ({} x type {}) has no {:?} value",
                self.tag, entry.count(), entry.field_type(), self.kind
            ))),
        }
    }
}
