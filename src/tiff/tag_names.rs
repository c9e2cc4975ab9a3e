//! Tag name dictionary
//!
//! Maps tag ids to display names for diagnostic output. The built-in table
//! is embedded from `tag_names.toml`; users can merge their own vendor tag
//! names over it. Nothing in the reader depends on these names.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::warn;

use crate::tiff::errors::{TiffError, TiffResult};

lazy_static! {
    // Parse the embedded TOML table on first use
    static ref DEFAULT_TAG_NAMES: TagNames = {
        let content = include_str!("../../tag_names.toml");
        TagNames::from_str(content).unwrap_or_else(|e| {
            warn!("Failed to parse built-in tag names: {}", e);
            TagNames::default()
        })
    };
}

/// Table of tag id to name mappings
#[derive(Debug, Clone, Default)]
pub struct TagNames {
    names: HashMap<u16, String>,
}

impl TagNames {
    /// Returns a copy of the built-in table
    pub fn builtin() -> Self {
        DEFAULT_TAG_NAMES.clone()
    }

    /// Parse tag names from a TOML string with a `[tag_ids]` table
    pub fn from_str(content: &str) -> TiffResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| TiffError::GenericError(format!("Failed to parse TOML: {}", e)))?;

        let mut names = HashMap::new();
        if let Some(table) = toml_value.get("tag_ids").and_then(|v| v.as_table()) {
            for (k, v) in table {
                match (k.parse::<u16>(), v.as_str()) {
                    (Ok(id), Some(name)) => {
                        names.insert(id, name.to_string());
                    }
                    _ => warn!("Ignoring tag name entry {} = {}", k, v),
                }
            }
        }

        Ok(TagNames { names })
    }

    /// Load tag names from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> TiffResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Adds every name of `other`, replacing existing ones
    pub fn merge(&mut self, other: TagNames) {
        self.names.extend(other.names);
    }

    /// Get a tag name by ID
    pub fn get_tag_name(&self, tag_id: u16) -> String {
        self.names
            .get(&tag_id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown-{}", tag_id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
