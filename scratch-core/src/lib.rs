//! Song-title scratch card engine.
//!
//! A handful of song titles are hidden behind `*`. The player spends a
//! limited number of opens to reveal characters across every title at
//! once, and wins when all titles are revealed.
//!
//! This crate provides:
//! - The character ledger with case folding for Latin, Greek and Cyrillic
//! - Masking of titles and the attempt budget
//! - The command interpreter and the reveal engine state machine
//! - Song library discovery, configuration and progress files
//!
//! # Quick Start
//!
//! ```ignore
//! use scratch_core::{ScratchSession, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let corpus = ["Tell Your World", "Ghost Rule"].map(String::from).into();
//!     let mut session = ScratchSession::new(&SessionConfig::new(2, 10), corpus, Vec::new())?;
//!
//!     let reply = session.execute("open e").await;
//!     println!("{:?}", session.revealed());
//!     Ok(())
//! }
//! ```

pub mod budget;
pub mod command;
pub mod config;
pub mod engine;
pub mod ledger;
pub mod library;
pub mod mask;
pub mod progress;
pub mod sampler;
pub mod session;
pub mod testing;

// Primary public API
pub use command::{Command, CommandError, HeartOp, HELP_TEXT};
pub use config::{ConfigError, GameConfig};
pub use engine::{
    CorpusVersion, GameSetup, GameStatus, Outcome, RevealEngine, RevealError, Snapshot, TurnError,
};
pub use library::{Library, LibraryError, Selection};
pub use progress::{ProgressError, ProgressWriter};
pub use sampler::{AnswerSet, SampleError};
pub use session::{Reply, ScratchSession, SessionConfig, SessionError};
pub use testing::TestHarness;
