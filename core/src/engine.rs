// core/src/engine.rs
//
// Stroke input engine: one composition buffer over shared, read-only tables.

use std::cell::{Cell, RefCell};
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tracing::debug;

use crate::candidate::CandidateList;
use crate::error::InvalidKey;
use crate::input_buffer::{BufferState, InputBuffer};
use crate::resolver::{self, Resolution};
use crate::table::Tables;
use crate::{Config, InvalidKeyPolicy};

/// Stroke input engine.
///
/// Each engine owns exactly one input buffer. Several engines may share the
/// same `Arc<Tables>`; the tables are never mutated after load.
///
/// Results of `search` are memoized in a per-engine LRU cache keyed by
/// (code, quick-code flag). Since the tables are immutable the cache never
/// needs invalidation.
#[derive(Debug)]
pub struct Engine {
    tables: Arc<Tables>,
    config: Config,
    buffer: InputBuffer,
    cache: Option<RefCell<LruCache<(String, bool), CandidateList>>>,
    cache_hits: Cell<usize>,
    cache_misses: Cell<usize>,
}

impl Engine {
    /// Create an engine over shared tables.
    pub fn new(tables: Arc<Tables>, config: Config) -> Self {
        let cache =
            NonZeroUsize::new(config.max_cache_size).map(|cap| RefCell::new(LruCache::new(cap)));
        Self {
            tables,
            config,
            buffer: InputBuffer::new(),
            cache,
            cache_hits: Cell::new(0),
            cache_misses: Cell::new(0),
        }
    }

    /// Create an engine that owns its tables, with default configuration.
    pub fn with_tables(tables: Tables) -> Self {
        Self::new(Arc::new(tables), Config::default())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tables(&self) -> &Arc<Tables> {
        &self.tables
    }

    /// The current composition (stroke digits).
    pub fn buffer(&self) -> &str {
        self.buffer.text()
    }

    pub fn state(&self) -> BufferState {
        self.buffer.state()
    }

    /// Append a stroke digit to the composition.
    ///
    /// With `InvalidKeyPolicy::Ignore` a non-stroke key is dropped and `Ok`
    /// is returned; with `Reject` the key is reported back. Either way the
    /// buffer is unchanged.
    pub fn append_digit(&mut self, ch: char) -> Result<(), InvalidKey> {
        match self.buffer.append_digit(ch) {
            Ok(()) => Ok(()),
            Err(err) => match self.config.invalid_key_policy {
                InvalidKeyPolicy::Ignore => {
                    debug!(key = ?ch, "ignoring non-stroke key");
                    Ok(())
                }
                InvalidKeyPolicy::Reject => Err(err),
            },
        }
    }

    /// Discard the composition. Idempotent.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Remove the last stroke. Returns true if one was removed.
    pub fn backspace(&mut self) -> bool {
        self.buffer.backspace()
    }

    /// Feed one keystroke and return the candidates for the updated buffer.
    pub fn input_key(&mut self, ch: char) -> Result<CandidateList, InvalidKey> {
        self.append_digit(ch)?;
        Ok(self.candidates())
    }

    /// Candidates for the current composition.
    pub fn candidates(&self) -> CandidateList {
        self.search(self.buffer.text(), self.config.use_quick_codes)
    }

    /// Resolve an arbitrary code, independent of the buffer.
    pub fn search(&self, code: &str, use_quick_codes: bool) -> CandidateList {
        let Some(cache) = &self.cache else {
            return self.resolve_uncached(code, use_quick_codes);
        };

        let key = (code.to_string(), use_quick_codes);
        if let Some(hit) = cache.borrow_mut().get(&key) {
            self.cache_hits.set(self.cache_hits.get() + 1);
            return hit.clone();
        }
        self.cache_misses.set(self.cache_misses.get() + 1);

        let result = self.resolve_uncached(code, use_quick_codes);
        cache.borrow_mut().put(key, result.clone());
        result
    }

    /// Resolve without the cache and report which tier answered.
    pub fn explain(&self, code: &str, use_quick_codes: bool) -> Resolution {
        resolver::resolve_with_tier(
            &self.tables,
            code,
            use_quick_codes,
            self.config.candidate_limit,
        )
    }

    fn resolve_uncached(&self, code: &str, use_quick_codes: bool) -> CandidateList {
        resolver::resolve(
            &self.tables,
            code,
            use_quick_codes,
            self.config.candidate_limit,
        )
    }

    /// Commit `candidates[index]`.
    ///
    /// On success the composition is cleared. An out-of-range index returns
    /// `None` and leaves the composition untouched.
    pub fn select(&mut self, index: usize, candidates: &CandidateList) -> Option<char> {
        let ch = candidates.get(index)?;
        debug!(index, selected = %ch, code = self.buffer.text(), "commit");
        self.buffer.clear();
        Some(ch)
    }

    /// Cache statistics as (hits, misses).
    pub fn cache_stats(&self) -> (usize, usize) {
        (self.cache_hits.get(), self.cache_misses.get())
    }

    /// Cache hit rate as a percentage, or `None` before the first lookup.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.cache_stats();
        let total = hits + misses;
        if total == 0 {
            None
        } else {
            Some((hits as f32 / total as f32) * 100.0)
        }
    }

    /// Current number of cached entries.
    pub fn cache_size(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.borrow().len())
    }

    /// Maximum number of cached entries (0 when caching is disabled).
    pub fn cache_capacity(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.borrow().cap().get())
    }

    /// Drop cached results and reset statistics.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.borrow_mut().clear();
        }
        self.cache_hits.set(0);
        self.cache_misses.set(0);
    }
}
