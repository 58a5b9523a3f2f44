/// Configuration for the scanner and the fixer
///
/// Everything the tools used to hard-code (the scan root, the fix list and
/// the convention strings) lives here and can be supplied as a JSON file.
/// Every field is optional; missing fields take the defaults below.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::wrapper::BraceStrategy;
use crate::error::AuditError;

/// The convention being enforced: which call wraps style objects and where
/// its symbol is imported from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConvention {
    /// Wrapping call, e.g. `StyleSheet.create`
    pub wrap_call: String,
    /// Symbol the wrapping call is defined on, e.g. `StyleSheet`
    pub symbol: String,
    /// Module the symbol is imported from
    pub module: String,
    /// Default import after which a new import line is inserted
    pub framework_import: String,
}

impl Default for StyleConvention {
    fn default() -> Self {
        Self {
            wrap_call: "StyleSheet.create".to_string(),
            symbol: "StyleSheet".to_string(),
            module: "react-native".to_string(),
            framework_import: "React".to_string(),
        }
    }
}

/// Scanner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    pub root: PathBuf,
    /// File extensions to scan, without the leading dot
    pub extensions: Vec<String>,
    /// Directory names that are never descended into
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("src"),
            extensions: vec!["js".to_string()],
            exclude_dirs: vec!["node_modules".to_string(), ".git".to_string()],
        }
    }
}

/// Fixer settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixSettings {
    /// Ordered list of files to rewrite
    pub files: Vec<PathBuf>,
    pub strategy: BraceStrategy,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub convention: StyleConvention,
    pub scan: ScanSettings,
    pub fix: FixSettings,
}

impl Config {
    /// Load configuration from `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, AuditError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|e| AuditError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::from_json(&raw).map_err(|e| AuditError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
