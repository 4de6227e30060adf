//! Candidate resolution.
//!
//! `resolve` turns a code into candidates in three tiers, appending to one
//! running list that drops duplicates and stops at the cap:
//!
//! 1. quick-code table (when enabled)
//! 2. exact stroke-dictionary entry
//! 3. prefix fallback over the dictionary, only when tiers 1 and 2 found nothing
//!
//! The prefix tier walks dictionary keys in lexicographic order and stops as
//! soon as the list is full, so the fallback result is deterministic.

use tracing::debug;

use crate::candidate::CandidateList;
use crate::table::Tables;

/// Which tier produced the first candidates of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    QuickCode,
    Exact,
    Prefix,
    /// Nothing matched.
    None,
}

/// Resolved candidates plus the tier that supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub candidates: CandidateList,
    pub tier: Tier,
}

/// Resolve `code` against both tables.
///
/// The empty code is never a table key, so it always resolves to an empty
/// list. Unknown codes are not an error either.
pub fn resolve(tables: &Tables, code: &str, use_quick_codes: bool, limit: usize) -> CandidateList {
    resolve_with_tier(tables, code, use_quick_codes, limit).candidates
}

/// Like `resolve`, but also reports the tier that contributed first.
pub fn resolve_with_tier(
    tables: &Tables,
    code: &str,
    use_quick_codes: bool,
    limit: usize,
) -> Resolution {
    let mut out = CandidateList::with_limit(limit);
    let mut tier = Tier::None;

    if code.is_empty() {
        return Resolution {
            candidates: out,
            tier,
        };
    }

    if use_quick_codes {
        if let Some(chars) = tables.quick_codes.get(code) {
            let added = out.extend_from(chars);
            debug!(code, added, "quick-code tier");
            if !out.is_empty() {
                tier = Tier::QuickCode;
            }
        }
    }

    if let Some(chars) = tables.dictionary.get(code) {
        let added = out.extend_from(chars);
        debug!(code, added, "exact tier");
        if tier == Tier::None && !out.is_empty() {
            tier = Tier::Exact;
        }
    }

    if out.is_empty() {
        let mut scanned = 0usize;
        for (_, chars) in tables.dictionary.prefix_matches(code) {
            scanned += 1;
            out.extend_from(chars);
            if out.is_full() {
                break;
            }
        }
        debug!(code, scanned, found = out.len(), "prefix tier");
        if !out.is_empty() {
            tier = Tier::Prefix;
        }
    }

    Resolution {
        candidates: out,
        tier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CodeTable;
    use pretty_assertions::assert_eq;

    fn build(rows: &[(&str, &str)]) -> CodeTable {
        CodeTable::from_entries(rows.iter().map(|(k, v)| (*k, v.chars().collect())))
    }

    fn tables(dict: &[(&str, &str)], quick: &[(&str, &str)]) -> Tables {
        Tables::new(build(dict), build(quick))
    }

    #[test]
    fn exact_matches_at_every_step() {
        let t = tables(&[("1", "一"), ("11", "二十"), ("111", "三王")], &[]);
        assert_eq!(resolve(&t, "1", true, 10), ['一']);
        assert_eq!(resolve(&t, "11", true, 10), ['二', '十']);
        assert_eq!(resolve(&t, "111", true, 10), ['三', '王']);
    }

    #[test]
    fn quick_codes_only_when_enabled() {
        let t = tables(&[("1", "一")], &[("0", "的了是")]);
        assert_eq!(resolve(&t, "0", true, 10), ['的', '了', '是']);
        assert!(resolve(&t, "0", false, 10).is_empty());
    }

    #[test]
    fn quick_codes_come_first_and_merge_without_duplicates() {
        let t = tables(&[("11", "二十")], &[("11", "二三王開")]);
        let r = resolve_with_tier(&t, "11", true, 10);
        assert_eq!(r.candidates, ['二', '三', '王', '開', '十']);
        assert_eq!(r.tier, Tier::QuickCode);

        let r = resolve_with_tier(&t, "11", false, 10);
        assert_eq!(r.candidates, ['二', '十']);
        assert_eq!(r.tier, Tier::Exact);
    }

    #[test]
    fn prefix_fallback_when_no_exact_match() {
        let t = tables(&[("121", "工")], &[]);
        let r = resolve_with_tier(&t, "12", true, 10);
        assert_eq!(r.candidates, ['工']);
        assert_eq!(r.tier, Tier::Prefix);
    }

    #[test]
    fn prefix_fallback_skipped_when_exact_found() {
        let t = tables(&[("12", "丁"), ("121", "工")], &[]);
        assert_eq!(resolve(&t, "12", false, 10), ['丁']);
    }

    #[test]
    fn prefix_fallback_is_ordered_and_capped() {
        let t = tables(
            &[
                ("2111", "下"),
                ("21", "上"),
                ("211", "土甲乙丙丁戊己庚"),
                ("2121", "辛壬癸"),
                ("3", "丿"),
            ],
            &[],
        );
        let r = resolve(&t, "2", true, 10);
        // "21" < "211" < "2111" < "2121"; the list fills at "2111"
        assert_eq!(
            r,
            ['上', '土', '甲', '乙', '丙', '丁', '戊', '己', '庚', '下']
        );
        assert_eq!(r.len(), 10);
    }

    #[test]
    fn prefix_fallback_deduplicates_across_keys() {
        let t = tables(&[("1211", "井下"), ("1212", "下土")], &[]);
        assert_eq!(resolve(&t, "12", true, 10), ['井', '下', '土']);
    }

    #[test]
    fn merged_tiers_are_capped() {
        let t = tables(&[("0", "一")], &[("0", "的了是在我有他這你們")]);
        let r = resolve(&t, "0", true, 10);
        assert_eq!(r.len(), 10);
        assert!(!r.contains('一'));
    }

    #[test]
    fn unknown_and_empty_codes_yield_nothing() {
        let t = tables(&[("1", "一")], &[("0", "的")]);
        let r = resolve_with_tier(&t, "9", true, 10);
        assert!(r.candidates.is_empty());
        assert_eq!(r.tier, Tier::None);
        // "" is a prefix of every key, but it is never resolved
        assert!(resolve(&t, "", true, 10).is_empty());
    }

    #[test]
    fn custom_limit_applies() {
        let t = tables(&[("1", "一二三四五")], &[]);
        assert_eq!(resolve(&t, "1", true, 3), ['一', '二', '三']);
    }
}
