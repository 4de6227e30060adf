use anyhow::{Context, Result};
use clap::Parser;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use stroke9_core::{
    load_table, quick_code_for, write_table, CodeTable, LayeredLookup, StrokeCode, StrokeLookup,
    TableKind, TableStrokeLookup,
};
use tracing::warn;

/// Build a quick-code table (first stroke + last stroke) from a frequency-ranked character list.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Characters in descending frequency order (whitespace is ignored);
    /// defaults to the built-in list of common characters
    #[arg(short, long)]
    chars: Option<PathBuf>,

    /// Stroke dictionary used to look up each character's strokes
    #[arg(short, long)]
    dict: PathBuf,

    /// Optional JSON object of extra strokes: {"的": "32511354"}
    #[arg(long)]
    strokes: Option<PathBuf>,

    /// Output quick-code table (.json or .bin)
    #[arg(short, long, default_value = "quick_codes_generated.json")]
    output: PathBuf,

    /// Maximum characters kept per quick code
    #[arg(long, default_value_t = 10)]
    per_code: usize,
}

/// Most frequent traditional characters, most frequent first.
const FREQUENT_CHARS: &str = "的一是不了人我在有他這為之大來以個中上們到說國和地也子時道出而要於就下得可你年生自會那後能對著事其裡所去行過家十用發天如然作方成者多日都三小軍二無同麼經法當起與好看學進種將還分此心前面又定見只主沒公從";

/// Result of a generation run.
#[derive(Debug, Default)]
struct Summary {
    table: CodeTable,
    placed: usize,
    skipped: Vec<char>,
}

fn read_ranked_chars(path: Option<&Path>) -> Result<Vec<char>> {
    let text = match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => FREQUENT_CHARS.to_string(),
    };
    Ok(text.chars().filter(|c| !c.is_whitespace()).collect())
}

fn read_stroke_overrides(path: &Path) -> Result<HashMap<char, StrokeCode>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let overrides: HashMap<char, StrokeCode> = serde_json::from_str(&text)
        .with_context(|| format!("parsing stroke overrides {}", path.display()))?;
    Ok(overrides)
}

/// Assign each character to its quick code in rank order.
///
/// Characters without known strokes are skipped; a character already placed
/// is not placed again; each code keeps at most `per_code` characters.
fn build_quick_codes<L: StrokeLookup + ?Sized>(
    lookup: &L,
    ranked: &[char],
    per_code: usize,
) -> Summary {
    let mut summary = Summary::default();
    let mut seen = HashSet::new();

    for &ch in ranked {
        if !seen.insert(ch) {
            continue;
        }
        let Some(code) = quick_code_for(lookup, ch) else {
            summary.skipped.push(ch);
            continue;
        };
        if summary.table.get(&code).map_or(0, <[char]>::len) >= per_code {
            continue;
        }
        if summary.table.insert(code, ch) {
            summary.placed += 1;
        }
    }
    summary
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let ranked = read_ranked_chars(args.chars.as_deref())?;
    let dict = load_table(&args.dict, TableKind::StrokeDictionary)
        .with_context(|| format!("loading stroke dictionary {}", args.dict.display()))?;
    let from_dict = TableStrokeLookup::from_table(&dict);
    let overrides = match &args.strokes {
        Some(path) => read_stroke_overrides(path)?,
        None => HashMap::new(),
    };
    let lookup = LayeredLookup::new(vec![&overrides as &dyn StrokeLookup, &from_dict]);

    let summary = build_quick_codes(&lookup, &ranked, args.per_code.max(1));
    if !summary.skipped.is_empty() {
        warn!(
            count = summary.skipped.len(),
            "characters without stroke data were skipped"
        );
    }

    write_table(&args.output, &summary.table)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("generated quick-code table: {}", args.output.display());
    println!("  codes:      {}", summary.table.len());
    println!("  characters: {}", summary.placed);
    println!("  skipped:    {}", summary.skipped.len());
    for (code, chars) in summary.table.iter().take(10) {
        let preview: String = chars.iter().take(5).collect();
        println!("  {}: {}", code, preview);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> TableStrokeLookup {
        TableStrokeLookup::from_table(&CodeTable::from_entries([
            ("1", vec!['一']),
            ("11", vec!['二']),
            ("111", vec!['三', '王']),
            ("1121", vec!['天']),
            ("121341", vec!['國']),
        ]))
    }

    #[test]
    fn codes_are_first_plus_last_stroke_in_rank_order() {
        let s = build_quick_codes(&lookup(), &['國', '天', '一', '王'], 10);
        // 國 121341, 天 1121, 一 1, 王 111 all start and end with 橫
        assert_eq!(s.table.get("11"), Some(&['國', '天', '一', '王'][..]));
        assert_eq!(s.table.len(), 1);
        assert_eq!(s.placed, 4);
        assert!(s.skipped.is_empty());
    }

    #[test]
    fn unknown_characters_are_skipped_not_guessed() {
        let s = build_quick_codes(&lookup(), &['的', '一'], 10);
        assert_eq!(s.skipped, vec!['的']);
        assert_eq!(s.placed, 1);
        assert!(s.table.validate(TableKind::QuickCodes).is_ok());
    }

    #[test]
    fn per_code_limit_and_repeats() {
        let s = build_quick_codes(&lookup(), &['一', '一', '二', '三', '王'], 2);
        assert_eq!(s.table.get("11"), Some(&['一', '二'][..]));
        assert_eq!(s.placed, 2);
    }

    #[test]
    fn overrides_take_precedence() {
        let base = lookup();
        let mut extra = HashMap::new();
        extra.insert('國', StrokeCode::parse("2514").unwrap());
        let layered = LayeredLookup::new(vec![&extra as &dyn StrokeLookup, &base]);
        let s = build_quick_codes(&layered, &['國'], 10);
        assert_eq!(s.table.get("24"), Some(&['國'][..]));
    }

    #[test]
    fn builtin_list_is_used_without_chars_file() {
        let ranked = read_ranked_chars(None).unwrap();
        assert_eq!(&ranked[..3], &['的', '一', '是']);
        assert_eq!(ranked.len(), FREQUENT_CHARS.chars().count());

        let args = Args::parse_from(["gen_quick_codes", "--dict", "stroke_dict.json"]);
        assert!(args.chars.is_none());

        // only characters with known strokes get a code
        let s = build_quick_codes(&lookup(), &ranked, 10);
        assert_eq!(s.table.get("11"), Some(&['一', '國', '天', '三', '二'][..]));
        assert_eq!(s.placed + s.skipped.len(), ranked.len());
    }

    #[test]
    fn reads_inputs_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let chars = dir.path().join("top.txt");
        fs::write(&chars, "的一\n是 不\n").unwrap();
        assert_eq!(
            read_ranked_chars(Some(&chars)).unwrap(),
            vec!['的', '一', '是', '不']
        );

        let strokes = dir.path().join("strokes.json");
        fs::write(&strokes, r#"{"的": "32511354"}"#).unwrap();
        let map = read_stroke_overrides(&strokes).unwrap();
        assert_eq!(map[&'的'].as_str(), "32511354");

        fs::write(&strokes, r#"{"的": "0"}"#).unwrap();
        assert!(read_stroke_overrides(&strokes).is_err());
    }
}
