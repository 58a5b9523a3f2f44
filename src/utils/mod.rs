/// Utility modules for the style auditor
///
/// This module contains utility functions for file handling, console output
/// formatting, and logging setup.

pub mod file_utils;
pub mod logging;
pub mod output_formatter;
