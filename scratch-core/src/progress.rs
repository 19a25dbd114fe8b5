//! Progress files written while a game is played.
//!
//! These are plain text views for streaming overlays or for looking the
//! answers up afterwards. Nothing is ever read back.

use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;

/// Errors from writing progress files.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Full answer list, written once at the start.
pub const ANSWER_FILE: &str = "Answer.txt";
/// Fully masked titles, written once at the start.
pub const QUESTION_FILE: &str = "Question.txt";
/// Current state, rewritten after every change.
pub const TEMP_FILE: &str = "Temp.txt";

/// Number entries from 1: `1. first`, `2. second`.
pub fn numbered(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {entry}", i + 1))
        .collect()
}

fn numbered_block(entries: &[String]) -> String {
    let mut out = String::new();
    for line in numbered(entries) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Writes the progress files into one output folder.
#[derive(Debug, Clone)]
pub struct ProgressWriter {
    dir: PathBuf,
}

impl ProgressWriter {
    /// Use `dir` as the output folder, creating it if needed.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self, ProgressError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| ProgressError::Io {
                path: dir.clone(),
                source,
            })?;
        Ok(Self { dir })
    }

    /// Write `Answer.txt`.
    pub async fn write_answers(&self, answers: &[String]) -> Result<(), ProgressError> {
        self.write(ANSWER_FILE, numbered_block(answers)).await
    }

    /// Write `Question.txt`.
    pub async fn write_questions(&self, masked: &[String]) -> Result<(), ProgressError> {
        self.write(QUESTION_FILE, numbered_block(masked)).await
    }

    /// Rewrite `Temp.txt` with the known-characters line and the current titles.
    pub async fn write_temp(
        &self,
        known_characters: &str,
        revealed: &[String],
    ) -> Result<(), ProgressError> {
        let mut content = String::new();
        if !known_characters.is_empty() {
            content.push_str(known_characters);
            content.push('\n');
        }
        content.push_str(&numbered_block(revealed));
        self.write(TEMP_FILE, content).await
    }

    async fn write(&self, file: &str, content: String) -> Result<(), ProgressError> {
        let path = self.dir.join(file);
        fs::write(&path, content)
            .await
            .map_err(|source| ProgressError::Io { path, source })
    }
}
