//! End-to-end engine tests: load tables from disk, type, select.

use std::sync::Arc;
use std::thread;

use stroke9_core::{
    load_tables, write_table, BufferState, CodeTable, Config, Engine, InvalidKeyPolicy,
    KeyEvent, KeyResult, LoadError, Session, TablePaths, Tables,
};

fn table(rows: &[(&str, &str)]) -> CodeTable {
    CodeTable::from_entries(rows.iter().map(|(k, v)| (*k, v.chars().collect())))
}

#[test]
fn test_typing_one_one_one() {
    let tables = Tables::new(
        table(&[("1", "一"), ("11", "二十"), ("111", "三王")]),
        CodeTable::new(),
    );
    let mut engine = Engine::with_tables(tables);
    let outputs: Vec<Vec<char>> = "111"
        .chars()
        .map(|k| engine.input_key(k).unwrap().into_vec())
        .collect();
    assert_eq!(outputs, vec![vec!['一'], vec!['二', '十'], vec!['三', '王']]);
}

#[test]
fn test_select_then_resolve_buffer_is_empty() {
    let tables = Tables::new(table(&[("121", "工")]), CodeTable::new());
    let mut engine = Engine::with_tables(tables);
    engine.input_key('1').unwrap();
    let cands = engine.input_key('2').unwrap();
    assert_eq!(cands.as_slice(), &['工']);

    assert_eq!(engine.select(0, &cands), Some('工'));
    assert_eq!(engine.state(), BufferState::Empty);
    assert!(engine.candidates().is_empty());
}

#[test]
fn test_clear_is_idempotent() {
    let mut engine = Engine::with_tables(Tables::default());
    engine.input_key('4').unwrap();
    engine.clear();
    let once = engine.buffer().to_string();
    engine.clear();
    assert_eq!(engine.buffer(), once);
    assert_eq!(engine.state(), BufferState::Empty);
}

#[test]
fn test_engine_from_bootstrapped_files() {
    let dir = tempfile::tempdir().unwrap();
    let paths = TablePaths::in_dir(dir.path());

    let tables = load_tables(&paths, true).unwrap();
    let mut engine = Engine::new(Arc::new(tables), Config::default());
    let cands = engine.input_key('0').unwrap();
    // '0' is not a stroke digit: ignored, buffer stays empty
    assert!(cands.is_empty());
    assert_eq!(engine.search("0", true).get(0), Some('的'));

    // second start reads what the first one wrote
    let again = load_tables(&paths, false).unwrap();
    assert_eq!(again.dictionary.len(), engine.tables().dictionary.len());
}

#[test]
fn test_corrupt_table_stops_startup() {
    let dir = tempfile::tempdir().unwrap();
    let paths = TablePaths::in_dir(dir.path());
    write_table(&paths.dictionary, &table(&[("1", "一")])).unwrap();
    std::fs::write(&paths.quick_codes, "not json").unwrap();

    let err = load_tables(&paths, true).unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }), "{err}");
}

#[test]
fn test_engines_share_tables_across_threads() {
    let tables = Arc::new(Tables::new(
        table(&[("1", "一"), ("11", "二十"), ("12", "丁下")]),
        CodeTable::new(),
    ));

    let handles: Vec<_> = ["11", "12"]
        .into_iter()
        .map(|keys| {
            let tables = Arc::clone(&tables);
            thread::spawn(move || {
                let mut engine = Engine::new(tables, Config::default());
                let mut last = Vec::new();
                for k in keys.chars() {
                    last = engine.input_key(k).unwrap().into_vec();
                }
                last
            })
        })
        .collect();

    let results: Vec<Vec<char>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![vec!['二', '十'], vec!['丁', '下']]);
}

#[test]
fn test_session_with_reject_policy() {
    let config = Config {
        invalid_key_policy: InvalidKeyPolicy::Reject,
        ..Config::default()
    };
    let tables = Tables::new(table(&[("3", "丿"), ("34", "八")]), CodeTable::new());
    let mut session = Session::new(Engine::new(Arc::new(tables), config));

    assert_eq!(session.process_key(KeyEvent::Stroke('3')), Ok(KeyResult::Handled));
    assert!(session.process_key(KeyEvent::Stroke('a')).is_err());
    assert_eq!(session.preedit(), "3");
    assert_eq!(session.process_key(KeyEvent::Stroke('4')), Ok(KeyResult::Handled));
    assert_eq!(session.process_key(KeyEvent::Select(0)), Ok(KeyResult::Handled));
    assert_eq!(session.commit_text(), "八");
}
