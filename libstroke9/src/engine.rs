//! Engine factories for the nine-key stroke input method.
//!
//! These wire a `Stroke9Config` to the core: load (or bootstrap) both tables
//! once, then hand out engines and sessions that share them.

use std::sync::Arc;

use stroke9_core::{load_tables, Engine, LoadError, Session, Tables};
use tracing::info;

use crate::config::Stroke9Config;

/// Load the tables named by `config`.
///
/// Missing files are bootstrapped from the built-in seeds when
/// `bootstrap_missing_tables` is set; malformed files always fail.
pub fn load_shared_tables(config: &Stroke9Config) -> Result<Arc<Tables>, LoadError> {
    let paths = config.table_paths();
    let tables = load_tables(&paths, config.bootstrap_missing_tables)?;
    info!(
        dictionary = %paths.dictionary.display(),
        quick_codes = %paths.quick_codes.display(),
        "stroke tables ready"
    );
    Ok(Arc::new(tables))
}

/// Build an engine from configuration.
pub fn create_engine(config: &Stroke9Config) -> Result<Engine, LoadError> {
    let tables = load_shared_tables(config)?;
    Ok(Engine::new(tables, config.base.clone()))
}

/// Build a key-event session from configuration.
pub fn create_session(config: &Stroke9Config) -> Result<Session, LoadError> {
    create_engine(config).map(Session::new)
}

/// Build one session per user over a single copy of the tables.
pub fn create_sessions(config: &Stroke9Config, count: usize) -> Result<Vec<Session>, LoadError> {
    let tables = load_shared_tables(config)?;
    Ok((0..count)
        .map(|_| Session::new(Engine::new(Arc::clone(&tables), config.base.clone())))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stroke9_core::{KeyEvent, KeyResult};

    fn config_in(dir: &std::path::Path) -> Stroke9Config {
        Stroke9Config {
            data_dir: dir.to_path_buf(),
            ..Stroke9Config::default()
        }
    }

    #[test]
    fn engine_bootstraps_seed_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = create_engine(&config_in(dir.path())).unwrap();
        assert_eq!(engine.input_key('1').unwrap().as_slice(), &['一']);
        assert!(dir.path().join("stroke_dict.json").exists());
        assert!(dir.path().join("quick_codes.json").exists());
    }

    #[test]
    fn missing_tables_fail_without_bootstrap() {
        let dir = tempfile::tempdir().unwrap();
        let config = Stroke9Config {
            bootstrap_missing_tables: false,
            ..config_in(dir.path())
        };
        assert!(create_engine(&config).unwrap_err().is_not_found());
    }

    #[test]
    fn sessions_share_tables_but_not_buffers() {
        let dir = tempfile::tempdir().unwrap();
        let mut sessions = create_sessions(&config_in(dir.path()), 2).unwrap();
        assert!(Arc::ptr_eq(
            sessions[0].engine().tables(),
            sessions[1].engine().tables()
        ));

        assert_eq!(
            sessions[0].process_key(KeyEvent::Stroke('3')),
            Ok(KeyResult::Handled)
        );
        assert_eq!(sessions[0].preedit(), "3");
        assert_eq!(sessions[1].preedit(), "");
    }
}
