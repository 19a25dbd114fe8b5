//! Reveal engine.
//!
//! Owns the answer set, the character ledger and the attempt budget, and
//! executes one [`Command`] at a time:
//! 1. The command is checked against the budget and its arguments
//! 2. The ledger or budget is updated
//! 3. Every title is re-masked through the ledger
//! 4. Convergence is checked
//!
//! All state lives in the engine; callers only ever see snapshots.

use crate::budget::AttemptBudget;
use crate::command::{Command, CommandError, HeartOp, HELP_TEXT};
use crate::ledger::{CharacterLedger, OpenResult, SPACE_LABEL};
use crate::mask;
use crate::sampler::{AnswerSet, SampleError};
use rand::Rng;
use std::collections::BTreeSet;
use thiserror::Error;

/// Rejections raised while executing a command. None of them change state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RevealError {
    #[error("No attempts left to open characters.")]
    BudgetExhausted,
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Title {index} does not exist, valid numbers are 1 to {count}.")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Anything that can reject one line of input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TurnError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Reveal(#[from] RevealError),
}

/// Name and game version of one song library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusVersion {
    pub name: String,
    pub version: String,
}

impl CorpusVersion {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Everything the engine needs to start a game.
#[derive(Debug, Clone)]
pub struct GameSetup {
    /// Deduplicated candidate titles.
    pub corpus: BTreeSet<String>,
    /// How many titles to hide.
    pub answer_count: usize,
    /// Opens available at the start.
    pub initial_budget: i64,
    /// Libraries the corpus came from, for the `version` command.
    pub versions: Vec<CorpusVersion>,
}

/// Where the session stands after the last command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// Every title is revealed. The answers are disclosed.
    Solved,
    /// The player quit. Nothing is disclosed.
    Aborted,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// What an accepted command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Help(&'static str),
    Exit,
    Versions(Vec<CorpusVersion>),
    HeartAdjusted {
        op: HeartOp,
        amount: i64,
        remaining: i64,
    },
    Opened {
        label: String,
        remaining: i64,
    },
    AlreadyOpened {
        remaining: i64,
    },
    Checked {
        index: usize,
    },
    AlreadySolved {
        index: usize,
    },
    Shown,
}

impl Outcome {
    /// Whether the ledger, the budget or the revealed titles changed.
    pub fn changed_state(&self) -> bool {
        matches!(
            self,
            Outcome::HeartAdjusted { .. } | Outcome::Opened { .. } | Outcome::Checked { .. }
        )
    }
}

/// The revealed titles plus the known-characters line, as handed to displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub revealed: Vec<String>,
    pub known_characters: String,
}

/// The scratch card state machine.
#[derive(Debug, Clone)]
pub struct RevealEngine {
    answers: AnswerSet,
    ledger: CharacterLedger,
    budget: AttemptBudget,
    /// Titles fully revealed by `check`; they stay revealed.
    forced: Vec<bool>,
    revealed: Vec<String>,
    versions: Vec<CorpusVersion>,
    aborted: bool,
}

impl RevealEngine {
    /// Create an engine over an answer set that was already drawn.
    pub fn new(answers: AnswerSet, initial_budget: i64) -> Self {
        let revealed = answers.iter().map(mask::masked).collect();
        let forced = vec![false; answers.len()];

        let mut engine = Self {
            answers,
            ledger: CharacterLedger::new(),
            budget: AttemptBudget::new(initial_budget),
            forced,
            revealed,
            versions: Vec::new(),
            aborted: false,
        };
        // Titles with nothing to scratch (e.g. only mask symbols) start solved.
        engine.recompute();
        engine
    }

    /// Draw the answers from `setup.corpus` and start a game.
    pub fn start(setup: GameSetup) -> Result<Self, SampleError> {
        Self::start_with_rng(setup, &mut rand::thread_rng())
    }

    /// Start with a specific RNG (useful for testing).
    pub fn start_with_rng<R: Rng>(setup: GameSetup, rng: &mut R) -> Result<Self, SampleError> {
        let answers = AnswerSet::sample_with_rng(&setup.corpus, setup.answer_count, rng)?;
        log::info!(
            "Drew {} answers from a corpus of {} titles",
            answers.len(),
            setup.corpus.len()
        );
        Ok(Self::new(answers, setup.initial_budget).with_versions(setup.versions))
    }

    /// Attach the library versions listed by the `version` command.
    pub fn with_versions(mut self, versions: Vec<CorpusVersion>) -> Self {
        self.versions = versions;
        self
    }

    /// Parse and execute one line of input.
    pub fn run_line(&mut self, line: &str) -> Result<Outcome, TurnError> {
        let command = Command::parse(line)?;
        Ok(self.execute(command)?)
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, RevealError> {
        log::debug!("Executing {command:?}");
        match command {
            Command::Help => Ok(Outcome::Help(self.help())),
            Command::Exit => Ok(self.exit()),
            Command::Version => Ok(Outcome::Versions(self.versions.clone())),
            Command::Heart { op, amount } => Ok(self.adjust_hearts(op, amount)),
            Command::Open { args } => self.open_with_args(&args),
            Command::OpenSpace { args } => self.open_space_with_args(&args),
            Command::Check { index } => self.check(index),
            Command::Show => Ok(Outcome::Shown),
        }
    }

    fn open_with_args(&mut self, args: &[String]) -> Result<Outcome, RevealError> {
        if !self.budget.can_open() {
            return Err(RevealError::BudgetExhausted);
        }
        match args {
            [target] => self.open(target),
            _ => Err(RevealError::InvalidArgument(
                "expected a single character".to_string(),
            )),
        }
    }

    fn open_space_with_args(&mut self, args: &[String]) -> Result<Outcome, RevealError> {
        if !self.budget.can_open() {
            return Err(RevealError::BudgetExhausted);
        }
        if !args.is_empty() {
            return Err(RevealError::InvalidArgument(
                "this command takes no arguments".to_string(),
            ));
        }
        self.open_space()
    }

    /// Open one character, and its case twin for folded scripts.
    pub fn open(&mut self, target: &str) -> Result<Outcome, RevealError> {
        if !self.budget.can_open() {
            return Err(RevealError::BudgetExhausted);
        }

        let mut chars = target.chars();
        let ch = match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => {
                return Err(RevealError::InvalidArgument(
                    "expected a single character".to_string(),
                ))
            }
        };

        let label = if ch.is_whitespace() {
            SPACE_LABEL.to_string()
        } else {
            ch.to_string()
        };
        let result = self.ledger.open_character(ch);
        Ok(self.settle_open(result, label))
    }

    /// Open the whitespace class.
    pub fn open_space(&mut self) -> Result<Outcome, RevealError> {
        if !self.budget.can_open() {
            return Err(RevealError::BudgetExhausted);
        }

        let result = self.ledger.open_space();
        Ok(self.settle_open(result, SPACE_LABEL.to_string()))
    }

    fn settle_open(&mut self, result: OpenResult, label: String) -> Outcome {
        match result {
            OpenResult::AlreadyOpened => Outcome::AlreadyOpened {
                remaining: self.budget.remaining(),
            },
            OpenResult::Opened => {
                self.budget.consume_one();
                self.recompute();
                log::debug!(
                    "Opened '{label}', {} attempts left, {}/{} titles solved",
                    self.budget.remaining(),
                    self.solved_count(),
                    self.answers.len()
                );
                Outcome::Opened {
                    label,
                    remaining: self.budget.remaining(),
                }
            }
        }
    }

    /// Fully reveal the title numbered `index` (1-based). Costs nothing.
    pub fn check(&mut self, index: usize) -> Result<Outcome, RevealError> {
        let count = self.answers.len();
        if index == 0 || index > count {
            return Err(RevealError::IndexOutOfRange { index, count });
        }

        let i = index - 1;
        if self.is_title_solved(i) {
            return Ok(Outcome::AlreadySolved { index });
        }

        self.forced[i] = true;
        self.revealed[i] = self.answers.titles()[i].clone();
        Ok(Outcome::Checked { index })
    }

    /// Apply `heart add|remove amount`.
    pub fn adjust_hearts(&mut self, op: HeartOp, amount: i64) -> Outcome {
        self.budget.adjust(op.delta(amount));
        Outcome::HeartAdjusted {
            op,
            amount,
            remaining: self.budget.remaining(),
        }
    }

    pub fn help(&self) -> &'static str {
        HELP_TEXT
    }

    /// End the session without disclosing the answers.
    pub fn exit(&mut self) -> Outcome {
        self.aborted = true;
        Outcome::Exit
    }

    fn recompute(&mut self) {
        for (i, title) in self.answers.iter().enumerate() {
            if !self.forced[i] {
                self.revealed[i] = mask::reveal(title, &self.ledger);
            }
        }
    }

    fn is_title_solved(&self, i: usize) -> bool {
        mask::is_solved(&self.answers.titles()[i], &self.revealed[i])
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    /// Current revealed form of every title.
    pub fn show(&self) -> &[String] {
        &self.revealed
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn ledger(&self) -> &CharacterLedger {
        &self.ledger
    }

    pub fn remaining_attempts(&self) -> i64 {
        self.budget.remaining()
    }

    pub fn known_characters_text(&self) -> String {
        self.ledger.known_characters_text()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revealed: self.revealed.clone(),
            known_characters: self.known_characters_text(),
        }
    }

    pub fn solved_count(&self) -> usize {
        (0..self.answers.len())
            .filter(|&i| self.is_title_solved(i))
            .count()
    }

    /// Every title is revealed.
    pub fn is_solved(&self) -> bool {
        self.revealed.as_slice() == self.answers.titles()
    }

    pub fn status(&self) -> GameStatus {
        if self.aborted {
            GameStatus::Aborted
        } else if self.is_solved() {
            GameStatus::Solved
        } else {
            GameStatus::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(titles: &[&str], budget: i64) -> RevealEngine {
        RevealEngine::new(AnswerSet::from_titles(titles.iter().copied()), budget)
    }

    #[test]
    fn test_initial_state_fully_masked() {
        let engine = engine(&["CAT", "Hello World"], 3);
        assert_eq!(engine.show(), &["***", "***********"]);
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.remaining_attempts(), 3);
    }

    #[test]
    fn test_open_reveals_and_consumes() {
        let mut engine = engine(&["CAT", "DOG"], 3);
        let outcome = engine.open("c").unwrap();
        assert_eq!(
            outcome,
            Outcome::Opened {
                label: "c".to_string(),
                remaining: 2
            }
        );
        assert_eq!(engine.show(), &["C**", "***"]);
        assert!(outcome.changed_state());
    }

    #[test]
    fn test_open_rejects_multiple_characters() {
        let mut engine = engine(&["CAT"], 3);
        assert!(matches!(
            engine.open("ca"),
            Err(RevealError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.open(""),
            Err(RevealError::InvalidArgument(_))
        ));
        assert_eq!(engine.remaining_attempts(), 3);
    }

    #[test]
    fn test_budget_checked_before_argument() {
        let mut engine = engine(&["CAT"], 0);
        assert_eq!(engine.open("ca"), Err(RevealError::BudgetExhausted));
        assert_eq!(engine.open_space(), Err(RevealError::BudgetExhausted));
        for line in ["open", "open a b", "os x"] {
            assert_eq!(
                engine.run_line(line),
                Err(TurnError::Reveal(RevealError::BudgetExhausted)),
                "{line}"
            );
        }
    }

    #[test]
    fn test_open_arity_checked_with_budget() {
        let mut engine = engine(&["CAT"], 2);
        for line in ["open", "o a b", "openspace now"] {
            assert!(
                matches!(
                    engine.run_line(line),
                    Err(TurnError::Reveal(RevealError::InvalidArgument(_)))
                ),
                "{line}"
            );
        }
        assert_eq!(engine.remaining_attempts(), 2);
    }

    #[test]
    fn test_already_opened_is_free() {
        let mut engine = engine(&["CAT"], 3);
        engine.open("a").unwrap();
        let before = engine.show().to_vec();
        assert_eq!(
            engine.open("A").unwrap(),
            Outcome::AlreadyOpened { remaining: 2 }
        );
        assert_eq!(engine.show(), before.as_slice());
    }

    #[test]
    fn test_check_survives_later_opens() {
        let mut engine = engine(&["CAT", "DOG"], 5);
        engine.check(2).unwrap();
        engine.open("c").unwrap();
        assert_eq!(engine.show(), &["C**", "DOG"]);
        assert_eq!(engine.check(2).unwrap(), Outcome::AlreadySolved { index: 2 });
    }

    #[test]
    fn test_check_out_of_range() {
        let mut engine = engine(&["CAT", "DOG"], 5);
        assert_eq!(
            engine.check(0),
            Err(RevealError::IndexOutOfRange { index: 0, count: 2 })
        );
        assert_eq!(
            engine.check(9),
            Err(RevealError::IndexOutOfRange { index: 9, count: 2 })
        );
    }

    #[test]
    fn test_open_space_reveals_whitespace() {
        let mut engine = engine(&["A B"], 5);
        engine.open_space().unwrap();
        assert_eq!(engine.show(), &["* *"]);
        assert_eq!(engine.known_characters_text(), "Known characters: space.");
    }

    #[test]
    fn test_exit_aborts() {
        let mut engine = engine(&["A"], 5);
        assert_eq!(engine.execute(Command::Exit).unwrap(), Outcome::Exit);
        assert_eq!(engine.status(), GameStatus::Aborted);
        assert!(engine.status().is_over());
    }

    #[test]
    fn test_versions_passthrough() {
        let mut engine = engine(&["A"], 5)
            .with_versions(vec![CorpusVersion::new("Arcaea", "6.0")]);
        assert_eq!(
            engine.execute(Command::Version).unwrap(),
            Outcome::Versions(vec![CorpusVersion::new("Arcaea", "6.0")])
        );
    }

    #[test]
    fn test_run_line_reports_parse_errors() {
        let mut engine = engine(&["A"], 5);
        assert!(matches!(
            engine.run_line("fly away"),
            Err(TurnError::Command(CommandError::UnknownCommand(_)))
        ));
        assert!(matches!(
            engine.run_line("c 4"),
            Err(TurnError::Reveal(RevealError::IndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_trivial_title_starts_solved() {
        let engine = engine(&["**"], 5);
        assert_eq!(engine.status(), GameStatus::Solved);
    }
}
