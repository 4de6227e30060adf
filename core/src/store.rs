//! Reading and writing code tables.
//!
//! Loading and first-run bootstrap are separate steps: `load_table` only
//! reads, `write_table` only writes, and `load_or_bootstrap` composes them,
//! falling back to the built-in table when (and only when) the file is absent.
//! A file that exists but cannot be parsed is always a hard error.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::defaults;
use crate::error::LoadError;
use crate::table::{CodeTable, TableKind, Tables};

/// On-disk encoding, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Pretty-printed UTF-8 JSON object (the default, human-diffable).
    Json,
    /// bincode-encoded `CodeTable`, for large compiled dictionaries.
    Bincode,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(TableFormat::Json),
            Some("bin") | Some("bincode") => Ok(TableFormat::Bincode),
            _ => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Load and validate a table.
///
/// A missing file yields `LoadError::NotFound`; callers decide whether to
/// bootstrap.
pub fn load_table<P: AsRef<Path>>(path: P, kind: TableKind) -> Result<CodeTable, LoadError> {
    let path = path.as_ref();
    let format = TableFormat::from_path(path)?;

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LoadError::NotFound {
                kind,
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let reader = BufReader::new(file);

    let table: CodeTable = match format {
        TableFormat::Json => serde_json::from_reader(reader).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        TableFormat::Bincode => {
            bincode::deserialize_from(reader).map_err(|source| LoadError::Bincode {
                path: path.to_path_buf(),
                source,
            })?
        }
    };

    table.validate(kind).map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        table = %kind,
        path = %path.display(),
        codes = table.len(),
        entries = table.entry_count(),
        "loaded table"
    );
    Ok(table)
}

/// Persist a table, creating parent directories as needed.
pub fn write_table<P: AsRef<Path>>(path: P, table: &CodeTable) -> Result<(), LoadError> {
    let path = path.as_ref();
    let format = TableFormat::from_path(path)?;
    let io_err = |source: std::io::Error| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    match format {
        TableFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, table).map_err(|source| {
                LoadError::Json {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            writer.write_all(b"\n").map_err(io_err)?;
        }
        TableFormat::Bincode => {
            bincode::serialize_into(&mut writer, table).map_err(|source| LoadError::Bincode {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    writer.flush().map_err(io_err)?;
    debug!(path = %path.display(), codes = table.len(), "wrote table");
    Ok(())
}

/// Load `path`, or write and return the built-in table for `kind` if the
/// file does not exist.
pub fn load_or_bootstrap<P: AsRef<Path>>(path: P, kind: TableKind) -> Result<CodeTable, LoadError> {
    let path = path.as_ref();
    match load_table(path, kind) {
        Err(LoadError::NotFound { .. }) => {
            let table = defaults::table(kind);
            write_table(path, &table)?;
            info!(table = %kind, path = %path.display(), "bootstrapped built-in table");
            Ok(table)
        }
        other => other,
    }
}

/// Where the two tables live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePaths {
    pub dictionary: PathBuf,
    pub quick_codes: PathBuf,
}

impl TablePaths {
    /// Default file names inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            dictionary: dir.join(TableKind::StrokeDictionary.default_file_name()),
            quick_codes: dir.join(TableKind::QuickCodes.default_file_name()),
        }
    }
}

/// Load both tables. Either both load or the whole call fails.
pub fn load_tables(paths: &TablePaths, bootstrap: bool) -> Result<Tables, LoadError> {
    let load = |path: &Path, kind| {
        if bootstrap {
            load_or_bootstrap(path, kind)
        } else {
            load_table(path, kind)
        }
    };
    let dictionary = load(&paths.dictionary, TableKind::StrokeDictionary)?;
    let quick_codes = load(&paths.quick_codes, TableKind::QuickCodes)?;
    Ok(Tables::new(dictionary, quick_codes))
}
