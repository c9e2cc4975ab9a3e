//! TIFF structure analysis command
//!
//! This module implements the command for displaying the directory
//! chain of a TIFF file and every entry it holds.

use clap::ArgMatches;
use log::debug;

use crate::commands::command_traits::Command;
use crate::commands::{input_file, reader_from_args, tag_names_from_args};
use crate::tiff::errors::TiffResult;
use crate::tiff::ifd::IFDEntry;
use crate::tiff::reader::TiffReader;
use crate::tiff::tag_names::TagNames;
use crate::tiff::types::TIFF;
use crate::utils::format_utils;

/// Command for analyzing TIFF file structure
pub struct AnalyzeCommand {
    /// Path to the input file
    input_file: String,
    /// Whether to show raw value slots next to decoded values
    verbose: bool,
    /// Reader configured from the command line
    reader: TiffReader,
    /// Names used to label tags
    tag_names: TagNames,
}

impl AnalyzeCommand {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches) -> TiffResult<Self> {
        Ok(AnalyzeCommand {
            input_file: input_file(args)?,
            verbose: args.get_flag("verbose"),
            reader: reader_from_args(args)?,
            tag_names: tag_names_from_args(args)?,
        })
    }

    /// Formats one entry line
    fn format_entry(&self, tiff: &TIFF, entry: &IFDEntry) -> String {
        let type_name = entry.kind().map(|k| k.name()).unwrap_or("UNKNOWN");
        let mut line = format!("    {} ({}) {}[{}] = {}",
                               entry.tag(),
                               self.tag_names.get_tag_name(entry.tag()),
                               type_name,
                               entry.count(),
                               format_utils::format_entry_value(tiff, entry));

        if self.verbose {
            line.push_str(&format!("  raw {}", format_utils::format_raw(entry)));
        }

        line
    }
}

impl Command for AnalyzeCommand {
    fn execute(&self) -> TiffResult<()> {
        debug!("Analyzing {}", self.input_file);
        let tiff = self.reader.load(&self.input_file)?;

        print!("{}", tiff);
        for dir in tiff.tags().directories() {
            println!();
            println!("IFD #{} (offset: {})", dir.number, dir.offset);
            println!("  Number of entries: {}", dir.entry_count());

            for entry in tiff.tags().directory_entries(dir.number).unwrap_or(&[]) {
                println!("{}", self.format_entry(&tiff, entry));
            }
        }

        Ok(())
    }
}
