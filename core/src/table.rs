//! Code tables: the stroke dictionary and the quick-code overlay.
//!
//! Both tables share one representation, a code -> ordered characters map
//! kept in a `BTreeMap` so that iteration (and therefore the prefix fallback
//! scan) follows lexicographic key order and is reproducible.
//!
//! The two tables are independent namespaces. `TableKind` carries the
//! identity used for key validation, default file names and error messages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

use crate::error::TableError;
use crate::stroke::StrokeCode;

/// Which of the two tables a `CodeTable` plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    StrokeDictionary,
    QuickCodes,
}

impl TableKind {
    /// File name used when no explicit path is configured.
    pub fn default_file_name(self) -> &'static str {
        match self {
            TableKind::StrokeDictionary => "stroke_dict.json",
            TableKind::QuickCodes => "quick_codes.json",
        }
    }

    /// Check a key against this table's alphabet.
    ///
    /// Dictionary keys must be full stroke codes (`1`-`9`). Quick-code keys
    /// may also use `0`, which is reserved for the most frequent characters.
    /// The empty key is invalid in both.
    pub fn validate_key(self, key: &str) -> Result<(), TableError> {
        let ok = match self {
            TableKind::StrokeDictionary => StrokeCode::parse(key).is_ok(),
            TableKind::QuickCodes => !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()),
        };
        if ok {
            Ok(())
        } else {
            Err(TableError::InvalidKey {
                kind: self,
                key: key.to_string(),
            })
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::StrokeDictionary => f.write_str("stroke dictionary"),
            TableKind::QuickCodes => f.write_str("quick-code table"),
        }
    }
}

/// Code -> ordered candidate characters.
///
/// Serialized transparently as a JSON object `{"121": ["工"], ...}`. Serde
/// rejects candidate strings that are not exactly one character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeTable {
    map: BTreeMap<String, Vec<char>>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Build a table from `(code, chars)` pairs. Later pairs for the same code
    /// append to the earlier list.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Vec<char>)>,
    {
        let mut table = Self::new();
        for (key, chars) in entries {
            let bucket = table.map.entry(key.into()).or_default();
            bucket.extend(chars);
        }
        table
    }

    /// Append a character under `code` unless it is already listed there.
    pub fn insert<K: Into<String>>(&mut self, code: K, ch: char) -> bool {
        let bucket = self.map.entry(code.into()).or_default();
        if bucket.contains(&ch) {
            return false;
        }
        bucket.push(ch);
        true
    }

    pub fn get(&self, code: &str) -> Option<&[char]> {
        self.map.get(code).map(Vec::as_slice)
    }

    pub fn contains_key(&self, code: &str) -> bool {
        self.map.contains_key(code)
    }

    /// Number of codes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Total number of (code, character) entries.
    pub fn entry_count(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[char])> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// All entries whose code starts with `prefix` (the exact code included),
    /// in lexicographic order.
    pub fn prefix_matches<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [char])> + 'a {
        self.map
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Check every key against `kind`'s alphabet and reject empty buckets.
    pub fn validate(&self, kind: TableKind) -> Result<(), TableError> {
        for (key, chars) in &self.map {
            kind.validate_key(key)?;
            if chars.is_empty() {
                return Err(TableError::EmptyEntry {
                    kind,
                    key: key.clone(),
                });
            }
        }
        Ok(())
    }
}

/// The two loaded tables. Immutable after load; share behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub dictionary: CodeTable,
    pub quick_codes: CodeTable,
}

impl Tables {
    pub fn new(dictionary: CodeTable, quick_codes: CodeTable) -> Self {
        Self {
            dictionary,
            quick_codes,
        }
    }

    pub fn get(&self, kind: TableKind) -> &CodeTable {
        match kind {
            TableKind::StrokeDictionary => &self.dictionary,
            TableKind::QuickCodes => &self.quick_codes,
        }
    }
}
