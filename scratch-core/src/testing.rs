//! Testing utilities for scratch card scenarios.
//!
//! `TestHarness` drives a [`RevealEngine`] with command lines, the same way
//! the terminal does, and exposes assertion helpers for the game state.

use crate::engine::{GameSetup, GameStatus, Outcome, RevealEngine, TurnError};
use crate::mask;
use crate::sampler::{AnswerSet, SampleError};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Test harness for scripted games.
pub struct TestHarness {
    pub engine: RevealEngine,
    /// Every line sent so far, with its result.
    pub transcript: Vec<(String, Result<Outcome, TurnError>)>,
}

impl TestHarness {
    /// Hide exactly `titles`, in this order.
    pub fn new(titles: &[&str], budget: i64) -> Self {
        let answers = AnswerSet::from_titles(titles.iter().copied());
        Self::with_engine(RevealEngine::new(answers, budget))
    }

    /// Draw the answers from a setup with a fixed seed.
    pub fn seeded(setup: GameSetup, seed: u64) -> Result<Self, SampleError> {
        let engine = RevealEngine::start_with_rng(setup, &mut StdRng::seed_from_u64(seed))?;
        Ok(Self::with_engine(engine))
    }

    pub fn with_engine(engine: RevealEngine) -> Self {
        Self {
            engine,
            transcript: Vec::new(),
        }
    }

    /// Send one command line.
    pub fn input(&mut self, line: &str) -> Result<Outcome, TurnError> {
        let result = self.engine.run_line(line);
        self.transcript.push((line.to_string(), result.clone()));
        result
    }

    /// Send several command lines, returning the last result.
    pub fn script(&mut self, lines: &[&str]) -> Option<Result<Outcome, TurnError>> {
        lines.iter().map(|line| self.input(line)).last()
    }

    pub fn revealed(&self) -> Vec<&str> {
        self.engine.show().iter().map(String::as_str).collect()
    }

    pub fn budget(&self) -> i64 {
        self.engine.remaining_attempts()
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    /// Whether every revealed entry is as long as its title.
    pub fn lengths_match(&self) -> bool {
        self.engine
            .answers()
            .iter()
            .zip(self.engine.show())
            .all(|(title, revealed)| mask::char_len(title) == mask::char_len(revealed))
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the revealed titles.
#[track_caller]
pub fn assert_revealed(harness: &TestHarness, expected: &[&str]) {
    assert_eq!(
        harness.revealed(),
        expected,
        "Unexpected revealed state"
    );
}

/// Assert the remaining attempts.
#[track_caller]
pub fn assert_budget(harness: &TestHarness, expected: i64) {
    let actual = harness.budget();
    assert_eq!(actual, expected, "Expected {expected} attempts, got {actual}");
}

/// Assert the session status.
#[track_caller]
pub fn assert_status(harness: &TestHarness, expected: GameStatus) {
    let actual = harness.status();
    assert_eq!(actual, expected, "Expected {expected:?}, got {actual:?}");
}

/// Assert the length invariant.
#[track_caller]
pub fn assert_lengths_match(harness: &TestHarness) {
    assert!(
        harness.lengths_match(),
        "Revealed lengths differ from titles: {:?}",
        harness.revealed()
    );
}
