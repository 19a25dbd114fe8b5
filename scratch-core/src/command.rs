//! Command interpreter.
//!
//! One line of input is split on whitespace; the first token is resolved
//! through a fixed alias table and the remaining tokens are checked against
//! the arity of the resolved command. `open` and `openspace` keep their raw
//! arguments so the engine can check the budget first.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for command parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Invalid command '{0}', try again. Type ? for help.")]
    UnknownCommand(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Direction of a `heart` adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartOp {
    Add,
    Remove,
}

impl HeartOp {
    /// Signed delta this operation applies for `amount`.
    pub fn delta(self, amount: i64) -> i64 {
        match self {
            HeartOp::Add => amount,
            HeartOp::Remove => amount.saturating_neg(),
        }
    }
}

impl fmt::Display for HeartOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeartOp::Add => write!(f, "add"),
            HeartOp::Remove => write!(f, "remove"),
        }
    }
}

/// A fully parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Version,
    Heart { op: HeartOp, amount: i64 },
    /// Arguments are checked by the engine, after the budget.
    Open { args: Vec<String> },
    OpenSpace { args: Vec<String> },
    Check { index: usize },
    Show,
}

/// Command words before their arguments are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Help,
    Exit,
    Version,
    Heart,
    Open,
    OpenSpace,
    Check,
    Show,
}

const ALIASES: &[(&str, Verb)] = &[
    ("help", Verb::Help),
    ("?", Verb::Help),
    ("？", Verb::Help),
    ("exit", Verb::Exit),
    ("e", Verb::Exit),
    ("version", Verb::Version),
    ("ver", Verb::Version),
    ("v", Verb::Version),
    ("heart", Verb::Heart),
    ("h", Verb::Heart),
    ("open", Verb::Open),
    ("o", Verb::Open),
    ("openspace", Verb::OpenSpace),
    ("os", Verb::OpenSpace),
    ("check", Verb::Check),
    ("c", Verb::Check),
    ("show", Verb::Show),
    ("s", Verb::Show),
];

fn resolve(word: &str) -> Option<Verb> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == word)
        .map(|(_, verb)| *verb)
}

/// Static help listing.
pub const HELP_TEXT: &str = "\
Available commands:
  help | ? - show this help
  exit | e - quit
  version | ver | v - list the game versions used by each library
  (heart | h) add [amount] - add attempts
  (heart | h) remove [amount] - remove attempts
  (open | o) [character] - scratch open a character
  openspace | os - scratch open spaces
  (check | c) [index] - fully reveal one title
  (show | s) - show the titles";

impl Command {
    /// Parse one line of input.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut tokens = line.split_whitespace();
        let word = tokens.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = tokens.collect();

        let verb = resolve(word).ok_or_else(|| CommandError::UnknownCommand(word.to_string()))?;

        match verb {
            Verb::Help => no_args(&args, Command::Help),
            Verb::Exit => no_args(&args, Command::Exit),
            Verb::Version => no_args(&args, Command::Version),
            Verb::Show => no_args(&args, Command::Show),
            Verb::Open => Ok(Command::Open {
                args: owned(&args),
            }),
            Verb::OpenSpace => Ok(Command::OpenSpace {
                args: owned(&args),
            }),
            Verb::Check => match args.as_slice() {
                [index] => index
                    .parse()
                    .map(|index| Command::Check { index })
                    .map_err(|_| {
                        CommandError::InvalidArgument("expected a number".to_string())
                    }),
                _ => Err(CommandError::InvalidArgument(
                    "expected a number".to_string(),
                )),
            },
            Verb::Heart => parse_heart(&args),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

fn no_args(args: &[&str], command: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::InvalidArgument(
            "this command takes no arguments".to_string(),
        ))
    }
}

fn parse_heart(args: &[&str]) -> Result<Command, CommandError> {
    let usage = || CommandError::InvalidArgument("usage: heart add|remove <amount>".to_string());

    let [op, amount] = args else {
        return Err(usage());
    };
    let op = match *op {
        "add" => HeartOp::Add,
        "remove" => HeartOp::Remove,
        _ => return Err(usage()),
    };
    let amount: i64 = amount.parse().map_err(|_| usage())?;

    Ok(Command::Heart { op, amount })
}
