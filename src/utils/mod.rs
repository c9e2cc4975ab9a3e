//! Utility modules for common functionality

pub(crate) mod string_utils;
pub(crate) mod format_utils;
