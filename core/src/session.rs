//! Key-event session.
//!
//! `Session` drives an `Engine` from abstract key events the way a platform
//! shim would: it keeps the candidate list currently on screen, so that a
//! selection always refers to what the user saw, and records the text
//! committed by the last key.

use crate::candidate::CandidateList;
use crate::engine::Engine;
use crate::error::InvalidKey;

/// Key events a front end can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A keypad stroke key (`1`-`9`).
    Stroke(char),
    /// Remove the last stroke.
    Backspace,
    /// Abandon the composition.
    Escape,
    /// Commit the first candidate.
    Space,
    /// Commit the candidate at this 0-based index.
    Select(usize),
}

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled by the IME
    Handled,
    /// Key was not handled (pass through to application)
    NotHandled,
}

pub struct Session {
    engine: Engine,
    candidates: CandidateList,
    commit_text: String,
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        let limit = engine.config().candidate_limit;
        Self {
            engine,
            candidates: CandidateList::with_limit(limit),
            commit_text: String::new(),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Candidates currently offered.
    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    /// Stroke digits typed so far.
    pub fn preedit(&self) -> &str {
        self.engine.buffer()
    }

    /// Text committed by the most recent key, empty if none.
    pub fn commit_text(&self) -> &str {
        &self.commit_text
    }

    /// Process one key event.
    ///
    /// Invalid stroke keys follow the engine's policy: ignored keys are
    /// reported as `Handled`, rejected ones surface as `Err`.
    pub fn process_key(&mut self, key: KeyEvent) -> Result<KeyResult, InvalidKey> {
        self.commit_text.clear();

        match key {
            KeyEvent::Stroke(ch) => {
                self.candidates = self.engine.input_key(ch)?;
                Ok(KeyResult::Handled)
            }
            KeyEvent::Backspace => {
                if !self.engine.backspace() {
                    return Ok(KeyResult::NotHandled);
                }
                self.refresh();
                Ok(KeyResult::Handled)
            }
            KeyEvent::Escape => {
                if self.engine.buffer().is_empty() {
                    return Ok(KeyResult::NotHandled);
                }
                self.reset();
                Ok(KeyResult::Handled)
            }
            KeyEvent::Space => Ok(self.commit(0)),
            KeyEvent::Select(index) => Ok(self.commit(index)),
        }
    }

    /// Clear composition and candidates.
    pub fn reset(&mut self) {
        self.engine.clear();
        self.candidates = CandidateList::with_limit(self.engine.config().candidate_limit);
    }

    fn refresh(&mut self) {
        self.candidates = self.engine.candidates();
    }

    fn commit(&mut self, index: usize) -> KeyResult {
        if self.engine.buffer().is_empty() {
            return KeyResult::NotHandled;
        }
        match self.engine.select(index, &self.candidates) {
            Some(ch) => {
                self.commit_text.push(ch);
                self.refresh();
                KeyResult::Handled
            }
            // keep the composition; the key is still consumed
            None => KeyResult::Handled,
        }
    }
}
