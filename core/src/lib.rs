//! stroke9-core
//!
//! Candidate engine for nine-key stroke input: stroke digits in, ordered
//! candidate characters out.
//!
//! Public API:
//! - `StrokeCode`, `StrokeClass`, `StrokeLookup` - the stroke alphabet and char -> code lookup
//! - `CodeTable`, `Tables` - stroke dictionary and quick-code overlay
//! - `load_table`, `write_table`, `load_or_bootstrap` - table persistence
//! - `resolve` - three-tier candidate resolution
//! - `Engine` - input buffer + resolver + selection
//! - `Session` - key-event driver for front ends
//! - `Config` - configuration and policy flags
use serde::{Deserialize, Serialize};

pub mod stroke;
pub use stroke::{
    is_stroke_digit, quick_code_for, LayeredLookup, StrokeClass, StrokeCode, StrokeCodeError,
    StrokeLookup, TableStrokeLookup,
};

pub mod error;
pub use error::{InvalidKey, LoadError, TableError};

pub mod candidate;
pub use candidate::{CandidateList, DEFAULT_CANDIDATE_LIMIT};

pub mod table;
pub use table::{CodeTable, TableKind, Tables};

pub mod defaults;

pub mod store;
pub use store::{load_or_bootstrap, load_table, load_tables, write_table, TableFormat, TablePaths};

pub mod resolver;
pub use resolver::{resolve, resolve_with_tier, Resolution, Tier};

pub mod input_buffer;
pub use input_buffer::{BufferState, InputBuffer};

pub mod engine;
pub use engine::Engine;

pub mod session;
pub use session::{KeyEvent, KeyResult, Session};

/// What to do with a keystroke outside `1`-`9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidKeyPolicy {
    /// Drop the key silently; the buffer is unchanged.
    #[default]
    Ignore,
    /// Return `InvalidKey` to the caller; the buffer is unchanged.
    Reject,
}

/// Engine configuration.
///
/// Deserialized from TOML; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Maximum candidates returned per lookup, capped at `DEFAULT_CANDIDATE_LIMIT`.
    pub candidate_limit: usize,

    /// Consult the quick-code table for buffer lookups.
    pub use_quick_codes: bool,

    pub invalid_key_policy: InvalidKeyPolicy,

    /// Maximum entries in the per-engine result cache (0 disables it).
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            use_quick_codes: true,
            invalid_key_policy: InvalidKeyPolicy::Ignore,
            max_cache_size: 256,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = Config::from_toml_str("invalid_key_policy = \"reject\"\ncandidate_limit = 5\n").unwrap();
        assert_eq!(cfg.invalid_key_policy, InvalidKeyPolicy::Reject);
        assert_eq!(cfg.candidate_limit, 5);
        assert!(cfg.use_quick_codes);
        assert_eq!(cfg.max_cache_size, 256);
    }

    #[test]
    fn toml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stroke9.toml");
        let cfg = Config {
            use_quick_codes: false,
            ..Config::default()
        };
        cfg.save_toml(&path).unwrap();
        assert_eq!(Config::load_toml(&path).unwrap(), cfg);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(Config::from_toml_str("invalid_key_policy = \"shout\"").is_err());
    }
}
