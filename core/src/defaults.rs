//! Built-in seed tables.
//!
//! These small tables are written out on first run when no table file exists,
//! and give tests a realistic fixture without touching the filesystem.

use crate::table::{CodeTable, TableKind};

const SEED_DICTIONARY: &[(&str, &str)] = &[
    // single strokes
    ("1", "一"),
    ("2", "丨"),
    ("3", "丿"),
    ("4", "丶"),
    // two strokes
    ("11", "二十"),
    ("12", "丁下"),
    ("13", "丈"),
    ("14", "七"),
    ("21", "上"),
    ("31", "人入"),
    ("34", "八"),
    // three strokes
    ("111", "三王"),
    ("121", "工"),
    ("131", "大"),
    ("134", "太"),
    ("211", "土"),
    ("311", "久"),
    ("312", "小"),
    ("314", "少"),
    ("341", "不"),
    ("414", "心"),
    // four strokes
    ("1111", "開"),
    ("1121", "天"),
    ("1211", "井"),
    ("1312", "水"),
    ("1341", "木"),
    ("2111", "下"),
    ("3112", "小"),
    ("3134", "今"),
    ("3414", "心"),
    ("4134", "文"),
    // five strokes
    ("11121", "正"),
    ("12134", "生"),
    ("31134", "出"),
    ("31214", "世"),
    ("34134", "本"),
    // longer
    ("1111234", "開"),
    ("121341", "國"),
    ("312341", "家"),
];

// First stroke + last stroke; "0" holds the most frequent characters.
const SEED_QUICK_CODES: &[(&str, &str)] = &[
    ("11", "二三王開"),
    ("12", "丁天未"),
    ("13", "大夫"),
    ("14", "不木本"),
    ("15", "也電"),
    ("21", "上土正"),
    ("22", "日田里"),
    ("23", "山"),
    ("24", "止此"),
    ("31", "人入久今"),
    ("32", "八公"),
    ("33", "多"),
    ("34", "文方"),
    ("41", "下不"),
    ("42", "之心"),
    ("43", "水"),
    ("44", "小少為"),
    ("51", "也已"),
    ("52", "弓"),
    ("54", "女"),
    ("0", "的了是在我有他這你們"),
];

fn build(rows: &[(&str, &str)]) -> CodeTable {
    CodeTable::from_entries(rows.iter().map(|(code, chars)| (*code, chars.chars().collect())))
}

/// The built-in stroke dictionary.
pub fn seed_dictionary() -> CodeTable {
    build(SEED_DICTIONARY)
}

/// The built-in quick-code table.
pub fn seed_quick_codes() -> CodeTable {
    build(SEED_QUICK_CODES)
}

/// The built-in table for `kind`.
pub fn table(kind: TableKind) -> CodeTable {
    match kind {
        TableKind::StrokeDictionary => seed_dictionary(),
        TableKind::QuickCodes => seed_quick_codes(),
    }
}
