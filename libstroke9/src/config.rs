//! Stroke9 configuration layered over the core engine config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stroke9_core::{TableKind, TablePaths};

/// Stroke9-specific configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `stroke9_core::Config` (flattened via serde)
/// - Where the stroke dictionary and quick-code table live
/// - Whether missing tables are bootstrapped from the built-in seeds
///
/// # Example
///
/// ```rust
/// use libstroke9::Stroke9Config;
///
/// let config = Stroke9Config::from_toml_str("data_dir = \"/tmp/stroke9\"\ncandidate_limit = 5").unwrap();
/// assert_eq!(config.base().candidate_limit, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Stroke9Config {
    /// Base engine configuration (limit, quick codes, key policy, cache)
    #[serde(flatten)]
    pub base: stroke9_core::Config,

    /// Directory holding the tables when no explicit path is given
    pub data_dir: PathBuf,

    /// Explicit stroke dictionary path (overrides `data_dir`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_path: Option<PathBuf>,

    /// Explicit quick-code table path (overrides `data_dir`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_codes_path: Option<PathBuf>,

    /// Write the built-in tables when a table file is missing
    pub bootstrap_missing_tables: bool,
}

impl Default for Stroke9Config {
    fn default() -> Self {
        Self {
            base: stroke9_core::Config::default(),
            data_dir: PathBuf::from("."),
            dictionary_path: None,
            quick_codes_path: None,
            bootstrap_missing_tables: true,
        }
    }
}

impl Stroke9Config {
    /// Convert this config into the base config for use with `Engine::new()`
    pub fn into_base(self) -> stroke9_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &stroke9_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut stroke9_core::Config {
        &mut self.base
    }

    /// Resolved table locations.
    pub fn table_paths(&self) -> TablePaths {
        let resolve = |explicit: &Option<PathBuf>, kind: TableKind| {
            explicit
                .clone()
                .unwrap_or_else(|| self.data_dir.join(kind.default_file_name()))
        };
        TablePaths {
            dictionary: resolve(&self.dictionary_path, TableKind::StrokeDictionary),
            quick_codes: resolve(&self.quick_codes_path, TableKind::QuickCodes),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
