//! ScratchSession - the primary public API for playing a scratch card.
//!
//! This module wraps the [`RevealEngine`] together with the progress files
//! into a single interface: feed it one line of input at a time and render
//! the [`Reply`] it returns.

use crate::config::{ConfigError, GameConfig};
use crate::engine::{
    CorpusVersion, GameSetup, GameStatus, Outcome, RevealEngine, Snapshot, TurnError,
};
use crate::library::LibraryError;
use crate::progress::{ProgressError, ProgressWriter};
use crate::sampler::SampleError;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that keep a session from starting.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    #[error("{0}")]
    Sample(#[from] SampleError),

    #[error("Progress error: {0}")]
    Progress(#[from] ProgressError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Number of titles to hide.
    pub answer_count: usize,
    /// Opens available at the start.
    pub initial_budget: i64,
    /// Whether progress files are written.
    pub write_progress: bool,
}

impl SessionConfig {
    pub fn new(answer_count: usize, initial_budget: i64) -> Self {
        Self {
            answer_count,
            initial_budget,
            write_progress: true,
        }
    }

    /// Take the two constants from a loaded configuration file.
    pub fn from_game_config(config: &GameConfig) -> Self {
        Self::new(
            config.constants.generate_amount,
            config.constants.guess_chances,
        )
    }

    /// Skip writing progress files.
    pub fn without_progress(mut self) -> Self {
        self.write_progress = false;
        self
    }
}

/// Result of one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// What the command did, or why it was rejected.
    pub result: Result<Outcome, TurnError>,
    /// Session status after the command.
    pub status: GameStatus,
}

impl Reply {
    /// Whether the titles or ledger should be shown again.
    pub fn changed_state(&self) -> bool {
        self.result.as_ref().is_ok_and(Outcome::changed_state)
    }
}

/// A scratch card game session.
pub struct ScratchSession {
    engine: RevealEngine,
    progress: Option<ProgressWriter>,
}

impl ScratchSession {
    /// Draw the answers from `corpus` and start a session.
    pub fn new(
        config: &SessionConfig,
        corpus: BTreeSet<String>,
        versions: Vec<CorpusVersion>,
    ) -> Result<Self, SessionError> {
        let engine = RevealEngine::start(GameSetup {
            corpus,
            answer_count: config.answer_count,
            initial_budget: config.initial_budget,
            versions,
        })?;
        Ok(Self::with_engine(engine))
    }

    /// Create a session around a pre-configured engine.
    pub fn with_engine(engine: RevealEngine) -> Self {
        Self {
            engine,
            progress: None,
        }
    }

    /// Write progress files through `writer`.
    pub fn with_progress(mut self, writer: ProgressWriter) -> Self {
        self.progress = Some(writer);
        self
    }

    /// Write the answer and question files.
    pub async fn begin(&self) -> Result<(), SessionError> {
        if let Some(writer) = &self.progress {
            writer.write_answers(self.engine.answers().titles()).await?;
            writer.write_questions(self.engine.show()).await?;
            writer
                .write_temp(&self.engine.known_characters_text(), self.engine.show())
                .await?;
        }
        Ok(())
    }

    /// Process one line of input.
    ///
    /// Rejected commands leave the game untouched. A failed progress write
    /// is logged and does not affect the reply.
    pub async fn execute(&mut self, line: &str) -> Reply {
        let result = self.engine.run_line(line);
        if let Err(e) = &result {
            log::debug!("Rejected '{line}': {e}");
        }

        let reply = Reply {
            result,
            status: self.engine.status(),
        };

        if reply.changed_state() {
            self.publish().await;
        }
        reply
    }

    /// Write the final state. On a solved game the answers are written in full.
    pub async fn finish(&self) {
        if self.status() == GameStatus::Solved {
            log::info!("All {} titles solved", self.engine.answers().len());
            self.publish().await;
        }
    }

    async fn publish(&self) {
        let Some(writer) = &self.progress else {
            return;
        };
        let snapshot = self.engine.snapshot();
        if let Err(e) = writer
            .write_temp(&snapshot.known_characters, &snapshot.revealed)
            .await
        {
            log::warn!("Failed to write progress: {e}");
        }
    }

    // ========================================================================
    // Game State Queries
    // ========================================================================

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn revealed(&self) -> &[String] {
        self.engine.show()
    }

    pub fn answers(&self) -> &[String] {
        self.engine.answers().titles()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    pub fn remaining_attempts(&self) -> i64 {
        self.engine.remaining_attempts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::TEMP_FILE;
    use crate::sampler::AnswerSet;

    fn session(titles: &[&str], budget: i64) -> ScratchSession {
        let answers = AnswerSet::from_titles(titles.iter().copied());
        ScratchSession::with_engine(RevealEngine::new(answers, budget))
    }

    #[test]
    fn test_session_config() {
        let config = SessionConfig::new(5, 12).without_progress();
        assert_eq!(config.answer_count, 5);
        assert_eq!(config.initial_budget, 12);
        assert!(!config.write_progress);
    }

    #[test]
    fn test_new_fails_on_small_corpus() {
        let corpus: BTreeSet<String> = ["a".to_string()].into_iter().collect();
        let result = ScratchSession::new(&SessionConfig::new(2, 5), corpus, Vec::new());
        assert!(matches!(
            result,
            Err(SessionError::Sample(SampleError::CorpusTooSmall { .. }))
        ));
    }

    #[tokio::test]
    async fn test_execute_reports_status() {
        let mut session = session(&["AB"], 5);
        let reply = session.execute("open a").await;
        assert!(reply.changed_state());
        assert_eq!(reply.status, GameStatus::InProgress);

        let reply = session.execute("o b").await;
        assert_eq!(reply.status, GameStatus::Solved);
    }

    #[tokio::test]
    async fn test_rejected_line_changes_nothing() {
        let mut session = session(&["AB"], 5);
        let reply = session.execute("open ab").await;
        assert!(reply.result.is_err());
        assert!(!reply.changed_state());
        assert_eq!(session.remaining_attempts(), 5);
    }

    #[tokio::test]
    async fn test_progress_follows_commands() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ProgressWriter::create(dir.path()).await.unwrap();
        let mut session = session(&["CAT", "DOG"], 5).with_progress(writer);

        session.begin().await.unwrap();
        session.execute("open o").await;

        let temp = std::fs::read_to_string(dir.path().join(TEMP_FILE)).unwrap();
        assert_eq!(temp, "Known characters: o.\n1. ***\n2. *O*\n");

        // Show does not rewrite the file.
        std::fs::remove_file(dir.path().join(TEMP_FILE)).unwrap();
        session.execute("show").await;
        assert!(!dir.path().join(TEMP_FILE).exists());
    }
}
