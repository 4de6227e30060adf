//! Stroke classes and stroke codes.
//!
//! A stroke code is the digit string a user types on the nine-key pad: each
//! digit `1`-`9` names one coarse stroke class. This module owns the
//! validated `StrokeCode` type and the `StrokeLookup` capability used to map
//! a character back to its code (for quick-code generation and reverse lookup).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::table::CodeTable;

/// One of the nine stroke classes on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrokeClass {
    Horizontal,
    Vertical,
    LeftFalling,
    Dot,
    Turning,
    HorizontalTurning,
    VerticalHook,
    LeftFallingDot,
    TurningHook,
}

impl StrokeClass {
    pub const ALL: [StrokeClass; 9] = [
        StrokeClass::Horizontal,
        StrokeClass::Vertical,
        StrokeClass::LeftFalling,
        StrokeClass::Dot,
        StrokeClass::Turning,
        StrokeClass::HorizontalTurning,
        StrokeClass::VerticalHook,
        StrokeClass::LeftFallingDot,
        StrokeClass::TurningHook,
    ];

    /// Map a keypad digit to its stroke class. Only `1`-`9` are valid.
    pub fn from_digit(ch: char) -> Option<Self> {
        match ch {
            '1'..='9' => Some(Self::ALL[(ch as u8 - b'1') as usize]),
            _ => None,
        }
    }

    /// The keypad digit for this class.
    pub fn digit(self) -> char {
        (b'1' + self as u8) as char
    }

    /// Display label shown next to the key.
    pub fn label(self) -> &'static str {
        match self {
            StrokeClass::Horizontal => "橫",
            StrokeClass::Vertical => "豎",
            StrokeClass::LeftFalling => "撇",
            StrokeClass::Dot => "點",
            StrokeClass::Turning => "折",
            StrokeClass::HorizontalTurning => "橫折",
            StrokeClass::VerticalHook => "豎鉤",
            StrokeClass::LeftFallingDot => "撇點",
            StrokeClass::TurningHook => "折鉤",
        }
    }
}

/// Returns true if `ch` is a valid stroke digit (`1`-`9`).
pub fn is_stroke_digit(ch: char) -> bool {
    StrokeClass::from_digit(ch).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrokeCodeError {
    #[error("stroke code is empty")]
    Empty,
    #[error("invalid stroke digit {ch:?} at position {position}")]
    InvalidDigit { ch: char, position: usize },
}

/// A non-empty sequence of stroke digits `1`-`9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StrokeCode(String);

impl StrokeCode {
    pub fn parse(s: &str) -> Result<Self, StrokeCodeError> {
        if s.is_empty() {
            return Err(StrokeCodeError::Empty);
        }
        if let Some((position, ch)) = s.chars().enumerate().find(|(_, c)| !is_stroke_digit(*c)) {
            return Err(StrokeCodeError::InvalidDigit { ch, position });
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of strokes (digits are ASCII, so bytes == chars).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> StrokeClass {
        self.classes().next().unwrap_or(StrokeClass::Horizontal)
    }

    pub fn last(&self) -> StrokeClass {
        self.classes().last().unwrap_or(StrokeClass::Horizontal)
    }

    pub fn classes(&self) -> impl Iterator<Item = StrokeClass> + '_ {
        self.0.chars().filter_map(StrokeClass::from_digit)
    }
}

impl fmt::Display for StrokeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StrokeCode {
    type Err = StrokeCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StrokeCode {
    type Error = StrokeCodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StrokeCode> for String {
    fn from(code: StrokeCode) -> String {
        code.0
    }
}

impl AsRef<str> for StrokeCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Character -> stroke code lookup.
///
/// Real deployments back this with a full stroke database; `None` means the
/// character is unknown.
pub trait StrokeLookup {
    fn stroke_code(&self, ch: char) -> Option<StrokeCode>;
}

impl<T: StrokeLookup + ?Sized> StrokeLookup for &T {
    fn stroke_code(&self, ch: char) -> Option<StrokeCode> {
        (**self).stroke_code(ch)
    }
}

impl StrokeLookup for HashMap<char, StrokeCode> {
    fn stroke_code(&self, ch: char) -> Option<StrokeCode> {
        self.get(&ch).cloned()
    }
}

/// Reverse index over a stroke dictionary.
///
/// When a character is listed under several codes, the lexicographically
/// smallest code wins.
#[derive(Debug, Clone, Default)]
pub struct TableStrokeLookup {
    index: HashMap<char, StrokeCode>,
}

impl TableStrokeLookup {
    pub fn from_table(table: &CodeTable) -> Self {
        let mut index = HashMap::new();
        // BTreeMap iteration is ordered, so the first insert is the smallest code.
        for (code, chars) in table.iter() {
            let Ok(code) = StrokeCode::parse(code) else {
                continue;
            };
            for &ch in chars {
                index.entry(ch).or_insert_with(|| code.clone());
            }
        }
        Self { index }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl StrokeLookup for TableStrokeLookup {
    fn stroke_code(&self, ch: char) -> Option<StrokeCode> {
        self.index.get(&ch).cloned()
    }
}

/// Chain of lookups; the first one that knows the character answers.
pub struct LayeredLookup<'a> {
    layers: Vec<&'a dyn StrokeLookup>,
}

impl<'a> LayeredLookup<'a> {
    pub fn new(layers: Vec<&'a dyn StrokeLookup>) -> Self {
        Self { layers }
    }
}

impl StrokeLookup for LayeredLookup<'_> {
    fn stroke_code(&self, ch: char) -> Option<StrokeCode> {
        self.layers.iter().find_map(|l| l.stroke_code(ch))
    }
}

/// Quick code for a character: its first stroke followed by its last stroke.
pub fn quick_code_for<L: StrokeLookup + ?Sized>(lookup: &L, ch: char) -> Option<String> {
    let code = lookup.stroke_code(ch)?;
    let mut out = String::with_capacity(2);
    out.push(code.first().digit());
    out.push(code.last().digit());
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_round_trip_through_classes() {
        for (i, class) in StrokeClass::ALL.iter().enumerate() {
            let digit = char::from(b'1' + i as u8);
            assert_eq!(StrokeClass::from_digit(digit), Some(*class));
            assert_eq!(class.digit(), digit);
        }
        assert_eq!(StrokeClass::from_digit('0'), None);
        assert_eq!(StrokeClass::from_digit('a'), None);
        assert_eq!(StrokeClass::Dot.label(), "點");
    }

    #[test]
    fn parse_rejects_empty_and_foreign_digits() {
        assert_eq!(StrokeCode::parse(""), Err(StrokeCodeError::Empty));
        assert_eq!(
            StrokeCode::parse("120"),
            Err(StrokeCodeError::InvalidDigit { ch: '0', position: 2 })
        );
        assert!(StrokeCode::parse("x").is_err());
        let code: StrokeCode = "3414".parse().unwrap();
        assert_eq!(code.len(), 4);
        assert_eq!(code.first(), StrokeClass::LeftFalling);
        assert_eq!(code.last(), StrokeClass::Dot);
    }

    #[test]
    fn serde_goes_through_validation() {
        let code: StrokeCode = serde_json::from_str("\"121\"").unwrap();
        assert_eq!(code.as_str(), "121");
        assert!(serde_json::from_str::<StrokeCode>("\"1a\"").is_err());
    }

    #[test]
    fn table_lookup_prefers_smallest_code() {
        let table = CodeTable::from_entries([("2111", vec!['下']), ("12", vec!['丁', '下'])]);
        let lookup = TableStrokeLookup::from_table(&table);
        assert_eq!(lookup.stroke_code('下').unwrap().as_str(), "12");
        assert_eq!(lookup.stroke_code('丁').unwrap().as_str(), "12");
        assert_eq!(lookup.stroke_code('國'), None);
    }

    #[test]
    fn quick_code_is_first_and_last_stroke() {
        let table = CodeTable::from_entries([("121341", vec!['國']), ("1", vec!['一'])]);
        let lookup = TableStrokeLookup::from_table(&table);
        assert_eq!(quick_code_for(&lookup, '國').as_deref(), Some("11"));
        assert_eq!(quick_code_for(&lookup, '一').as_deref(), Some("11"));
        assert_eq!(quick_code_for(&lookup, '家'), None);
    }

    #[test]
    fn layered_lookup_consults_layers_in_order() {
        let mut overrides: HashMap<char, StrokeCode> = HashMap::new();
        overrides.insert('國', StrokeCode::parse("2514").unwrap());
        let table = CodeTable::from_entries([("121341", vec!['國', '工'])]);
        let base = TableStrokeLookup::from_table(&table);
        let layered = LayeredLookup::new(vec![&overrides as &dyn StrokeLookup, &base]);
        assert_eq!(layered.stroke_code('國').unwrap().as_str(), "2514");
        assert_eq!(layered.stroke_code('工').unwrap().as_str(), "121341");
    }
}
