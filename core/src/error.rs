//! Error types for table loading and keystroke handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::table::TableKind;

/// A table whose content breaks the key or entry rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("{kind}: invalid code {key:?}")]
    InvalidKey { kind: TableKind, key: String },

    #[error("{kind}: code {key:?} has no candidates")]
    EmptyEntry { kind: TableKind, key: String },
}

/// Failure to load or persist a table.
///
/// Only `NotFound` is eligible for bootstrapping with the built-in table;
/// everything else is fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{kind} not found at {}", .path.display())]
    NotFound { kind: TableKind, path: PathBuf },

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON table {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed bincode table {}: {source}", .path.display())]
    Bincode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("unsupported table format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid table {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: TableError,
    },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

/// A keystroke outside the stroke alphabet `1`-`9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid stroke key {0:?}")]
pub struct InvalidKey(pub char);
