use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use libstroke9::{
    create_engine, create_session, defaults, load_table, write_table, CandidateList, KeyEvent,
    Session, Stroke9Config, StrokeClass, TableKind, Tier,
};

#[derive(Parser)]
#[command(name = "stroke9")]
#[command(about = "Nine-key stroke input method")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding stroke_dict.json and quick_codes.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Stroke dictionary path (overrides --data-dir)
    #[arg(long, global = true)]
    dict: Option<PathBuf>,

    /// Quick-code table path (overrides --data-dir)
    #[arg(long, global = true)]
    quick: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive REPL mode
    Repl,
    /// Show candidates for a stroke code
    Lookup {
        /// Stroke code, e.g. 121
        code: String,
        /// Skip the quick-code table
        #[arg(long)]
        no_quick: bool,
    },
    /// Write the built-in tables
    Init {
        /// Overwrite existing table files
        #[arg(long)]
        force: bool,
    },
    /// Run the built-in lookup checks against the loaded tables
    Check,
    /// Convert a table between JSON and bincode (by file extension)
    Convert {
        /// Input table file
        #[arg(short, long)]
        input: PathBuf,
        /// Output table file
        #[arg(short, long)]
        output: PathBuf,
        /// Which table the file holds
        #[arg(long, value_enum, default_value_t = KindArg::Dictionary)]
        kind: KindArg,
    },
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum KindArg {
    Dictionary,
    Quick,
}

impl From<KindArg> for TableKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Dictionary => TableKind::StrokeDictionary,
            KindArg::Quick => TableKind::QuickCodes,
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn build_config(cli: &Cli) -> Result<Stroke9Config> {
    let mut config = match &cli.config {
        Some(path) => Stroke9Config::load_toml(path)
            .map_err(|e| anyhow::anyhow!("failed to load config {}: {}", path.display(), e))?,
        None => Stroke9Config::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dict) = &cli.dict {
        config.dictionary_path = Some(dict.clone());
    }
    if let Some(quick) = &cli.quick {
        config.quick_codes_path = Some(quick.clone());
    }
    Ok(config)
}

fn print_help() {
    println!("Strokes:");
    for class in StrokeClass::ALL {
        println!("  {} {}", class.digit(), class.label());
    }
    println!("Commands:");
    println!("  <digits>  type strokes (1-9), appended to the current composition");
    println!("            (use clear first to start a new code)");
    println!("  /N        commit candidate N");
    println!("  -         delete last stroke");
    println!("  clear     discard the composition");
    println!("  help      show this text");
    println!("  quit      exit");
}

fn print_state(session: &Session) {
    if session.preedit().is_empty() {
        return;
    }
    println!("[{}]", session.preedit());
    if session.candidates().is_empty() {
        println!("  (no candidates)");
    } else {
        println!("  {}", session.candidates());
    }
}

fn run_repl(mut session: Session) -> Result<()> {
    println!("stroke9 - type stroke digits, /N to commit, help for more, quit to exit");
    let mut committed = String::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" => break,
            "help" => print_help(),
            "clear" => session.reset(),
            "-" => {
                session.process_key(KeyEvent::Backspace)?;
            }
            _ if input.starts_with('/') => {
                let Ok(n) = input[1..].parse::<usize>() else {
                    println!("  usage: /N (N starts at 1)");
                    continue;
                };
                if n == 0 {
                    println!("  usage: /N (N starts at 1)");
                    continue;
                }
                session.process_key(KeyEvent::Select(n - 1))?;
                if session.commit_text().is_empty() {
                    println!("  no candidate {}", n);
                } else {
                    committed.push_str(session.commit_text());
                    println!("  => {}   (text: {})", session.commit_text(), committed);
                }
            }
            _ => {
                for ch in input.chars() {
                    if let Err(e) = session.process_key(KeyEvent::Stroke(ch)) {
                        println!("  {}", e);
                    }
                }
            }
        }
        print_state(&session);
    }
    Ok(())
}

fn run_lookup(config: &Stroke9Config, code: &str, no_quick: bool) -> Result<()> {
    let engine = create_engine(config)?;
    let resolution = engine.explain(code, !no_quick);
    let tier = match resolution.tier {
        Tier::QuickCode => "quick code",
        Tier::Exact => "exact",
        Tier::Prefix => "prefix",
        Tier::None => "none",
    };
    if resolution.candidates.is_empty() {
        println!("{}: (no candidates)", code);
    } else {
        println!("{}: {}  [{}]", code, resolution.candidates, tier);
    }
    Ok(())
}

fn write_if_absent(path: &Path, kind: TableKind, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("kept existing {} at {}", kind, path.display());
        return Ok(());
    }
    write_table(path, &defaults::table(kind))?;
    println!("wrote {} to {}", kind, path.display());
    Ok(())
}

fn run_init(config: &Stroke9Config, force: bool) -> Result<()> {
    let paths = config.table_paths();
    write_if_absent(&paths.dictionary, TableKind::StrokeDictionary, force)?;
    write_if_absent(&paths.quick_codes, TableKind::QuickCodes, force)?;
    Ok(())
}

const CHECK_CASES: &[(&str, &str)] = &[
    ("1", "一"),
    ("11", "二十"),
    ("111", "三王"),
    ("31", "人入"),
    ("121", "工"),
    ("312", "小"),
];

fn check_case(candidates: &CandidateList, expected: &str) -> bool {
    expected.chars().any(|c| candidates.contains(c))
}

fn run_check(config: &Stroke9Config) -> Result<()> {
    let engine = create_engine(config)?;
    let mut failures = 0;
    for (code, expected) in CHECK_CASES {
        let got = engine.search(code, true);
        let ok = check_case(&got, expected);
        if !ok {
            failures += 1;
        }
        println!(
            "{} {:<6} {}  (expect one of {})",
            if ok { "ok  " } else { "FAIL" },
            code,
            got,
            expected
        );
    }
    for code in ["11", "31", "0"] {
        println!("quick {:<4} {}", code, engine.search(code, true));
    }
    if failures > 0 {
        bail!("{} of {} checks failed", failures, CHECK_CASES.len());
    }
    Ok(())
}

fn run_convert(input: &Path, output: &Path, kind: TableKind) -> Result<()> {
    let table = load_table(input, kind)
        .with_context(|| format!("reading {}", input.display()))?;
    write_table(output, &table).with_context(|| format!("writing {}", output.display()))?;
    println!(
        "converted {} codes ({} entries) -> {}",
        table.len(),
        table.entry_count(),
        output.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    match cli.command {
        Some(Commands::Lookup { code, no_quick }) => run_lookup(&config, &code, no_quick),
        Some(Commands::Init { force }) => run_init(&config, force),
        Some(Commands::Check) => run_check(&config),
        Some(Commands::Convert {
            input,
            output,
            kind,
        }) => run_convert(&input, &output, kind.into()),
        Some(Commands::Repl) | None => {
            let session = create_session(&config).context("loading stroke tables")?;
            run_repl(session)
        }
    }
}
