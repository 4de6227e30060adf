//! Candidate lists.
//!
//! A `CandidateList` is an ordered, duplicate-free, length-capped sequence of
//! single characters. Insertion order is relevance order; the resolver fills
//! it tier by tier and relies on `push` to drop repeats and stop at the cap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default maximum number of candidates returned for one code.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;

/// Serialized as `{"items": [...], "limit": n}`. Deserialization re-applies
/// the cap and drops repeats, so a decoded list obeys the same rules as one
/// built with `push`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCandidateList")]
pub struct CandidateList {
    items: Vec<char>,
    limit: usize,
}

#[derive(Deserialize)]
struct RawCandidateList {
    items: Vec<char>,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_CANDIDATE_LIMIT
}

impl From<RawCandidateList> for CandidateList {
    fn from(raw: RawCandidateList) -> Self {
        let mut list = CandidateList::with_limit(raw.limit);
        list.extend_from(&raw.items);
        list
    }
}

impl CandidateList {
    /// Create an empty list capped at `DEFAULT_CANDIDATE_LIMIT`.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_CANDIDATE_LIMIT)
    }

    /// Create an empty list with a custom cap, clamped to
    /// `1..=DEFAULT_CANDIDATE_LIMIT`.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            limit: limit.clamp(1, DEFAULT_CANDIDATE_LIMIT),
        }
    }

    /// Append `ch` if it is not already present and the list is not full.
    /// Returns true if the character was added.
    pub fn push(&mut self, ch: char) -> bool {
        if self.is_full() || self.items.contains(&ch) {
            return false;
        }
        self.items.push(ch);
        true
    }

    /// Append characters in order, skipping duplicates. Returns how many were added.
    pub fn extend_from(&mut self, chars: &[char]) -> usize {
        let mut added = 0;
        for &ch in chars {
            if self.is_full() {
                break;
            }
            if self.push(ch) {
                added += 1;
            }
        }
        added
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.limit
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.items.get(index).copied()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.items.contains(&ch)
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.items.iter().copied()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<char> {
        self.items
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new()
    }
}

/// Numbered, one-based listing: `1.一 2.二`.
impl fmt::Display for CandidateList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ch) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}.{}", i + 1, ch)?;
        }
        Ok(())
    }
}

impl PartialEq<[char]> for CandidateList {
    fn eq(&self, other: &[char]) -> bool {
        self.items == other
    }
}

impl<const N: usize> PartialEq<[char; N]> for CandidateList {
    fn eq(&self, other: &[char; N]) -> bool {
        self.items == other[..]
    }
}
