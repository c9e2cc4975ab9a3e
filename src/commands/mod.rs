//! CLI command implementations
//!
//! This module contains implementations of the commands supported by the
//! CLI application using the Command pattern.

pub mod command_traits;
pub mod analyze_command;
pub mod tag_command;

pub use command_traits::{Command, CommandFactory};
pub use analyze_command::AnalyzeCommand;
pub use tag_command::TagCommand;

use std::str::FromStr;

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use log::debug;

use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::reader::{TiffReader, TiffReaderBuilder};
use crate::tiff::tag_names::TagNames;

/// Factory for creating command instances based on CLI arguments
///
/// A `--tag` argument selects the single-tag query, everything else is
/// a structure dump.
pub struct TiffprobeCommandFactory;

impl TiffprobeCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        TiffprobeCommandFactory
    }
}

impl Default for TiffprobeCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for TiffprobeCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> TiffResult<Box<dyn Command>> {
        if args.contains_id("tag") {
            Ok(Box::new(TagCommand::new(args)?))
        } else {
            Ok(Box::new(AnalyzeCommand::new(args)?))
        }
    }
}

/// Builds the command line interface
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("tiffprobe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect the directory structure of TIFF-based instrument files")
        .arg(
            Arg::new("input")
                .help("Input TIFF file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tag")
                .short('t')
                .long("tag")
                .help("Print the value of this tag (decimal or 0x hex)")
                .value_name("ID")
                .required(false),
        )
        .arg(
            Arg::new("as")
                .long("as")
                .help("Accessor for --tag (auto, uint, int, sint, float, string, uints, bool)")
                .value_name("KIND")
                .requires("tag"),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .help("Expected element count for --as uints")
                .value_name("N")
                .requires("tag"),
        )
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .help("Only look for --tag in this directory")
                .value_name("N")
                .requires("tag"),
        )
        .arg(
            Arg::new("tag-names")
                .long("tag-names")
                .help("TOML file with additional [tag_ids] names")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("max-dirs")
                .long("max-dirs")
                .help("Maximum number of directories to follow")
                .value_name("N")
                .required(false),
        )
}

/// Gets the required input file argument
pub(crate) fn input_file(args: &ArgMatches) -> TiffResult<String> {
    args.get_one::<String>("input")
        .cloned()
        .ok_or_else(|| TiffError::GenericError("Missing input file".to_string()))
}

/// Parses an optional argument with `FromStr`
pub(crate) fn parse_arg<T: FromStr>(args: &ArgMatches, name: &str) -> TiffResult<Option<T>> {
    match args.get_one::<String>(name) {
        Some(raw) => raw.parse::<T>()
            .map(Some)
            .map_err(|_| TiffError::GenericError(format!("Invalid value for --{}: {}", name, raw))),
        None => Ok(None),
    }
}

/// Parses a tag id given in decimal or as 0x-prefixed hex
pub fn parse_tag_id(raw: &str) -> TiffResult<u16> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => raw.parse::<u16>(),
    };

    parsed.map_err(|_| TiffError::GenericError(format!("Invalid tag id: {}", raw)))
}

/// Builds a reader from the `--max-dirs` argument
pub(crate) fn reader_from_args(args: &ArgMatches) -> TiffResult<TiffReader> {
    let mut builder = TiffReaderBuilder::new();
    if let Some(max) = parse_arg::<usize>(args, "max-dirs")? {
        builder = builder.max_directories(max);
    }

    Ok(builder.build())
}

/// Builds the tag dictionary, merging a `--tag-names` file over the
/// built-in names
pub(crate) fn tag_names_from_args(args: &ArgMatches) -> TiffResult<TagNames> {
    let mut names = TagNames::builtin();
    if let Some(path) = args.get_one::<String>("tag-names") {
        let custom = TagNames::from_file(path)?;
        debug!("Loaded {} tag names from {}", custom.len(), path);
        names.merge(custom);
    }

    Ok(names)
}
