//! # libstroke9
//!
//! Nine-key stroke input method built on stroke9-core.

pub mod config;
pub mod engine;

// Re-export the core API
pub use stroke9_core::*;

pub use config::Stroke9Config;
pub use engine::{create_engine, create_session, create_sessions, load_shared_tables};
