//! Turning replies into terminal lines.

use scratch_core::engine::{Outcome, TurnError};
use scratch_core::progress::numbered;
use scratch_core::{HeartOp, Reply, ScratchSession};

/// Lines to print for one reply.
pub fn render_reply(reply: &Reply, session: &ScratchSession) -> Vec<String> {
    match &reply.result {
        Ok(outcome) => render_outcome(outcome, session),
        Err(e) => render_rejection(e),
    }
}

fn render_outcome(outcome: &Outcome, session: &ScratchSession) -> Vec<String> {
    let mut lines = Vec::new();
    match outcome {
        Outcome::Help(text) => lines.extend(text.lines().map(str::to_string)),
        Outcome::Exit => {}
        Outcome::Versions(versions) => {
            for v in versions {
                lines.push(format!("{} version used by the library: {}", v.name, v.version));
            }
        }
        Outcome::HeartAdjusted {
            op,
            amount,
            remaining,
        } => {
            let verb = match op {
                HeartOp::Add => "Added",
                HeartOp::Remove => "Removed",
            };
            lines.push(format!("{verb} {amount} attempt(s)."));
            lines.push(format!("Attempts remaining: {remaining}."));
        }
        Outcome::Opened { label, remaining } => {
            lines.push(format!("Opened character: {label}."));
            lines.push(format!("Attempts remaining: {remaining}."));
            lines.extend(board(session));
        }
        Outcome::AlreadyOpened { remaining } => {
            lines.push(format!(
                "That character is already open! Attempts remaining: {remaining}."
            ));
        }
        Outcome::Checked { index } => {
            lines.push(format!("Title {index} answered correctly, fully revealed."));
            lines.extend(board(session));
        }
        Outcome::AlreadySolved { index } => {
            lines.push(format!("Title {index} is already answered."));
        }
        Outcome::Shown => lines.extend(numbered(session.revealed())),
    }
    lines
}

fn render_rejection(error: &TurnError) -> Vec<String> {
    vec![error.to_string()]
}

/// Known-characters line followed by the numbered titles.
pub fn board(session: &ScratchSession) -> Vec<String> {
    let snapshot = session.snapshot();
    let mut lines = vec![snapshot.known_characters];
    lines.extend(numbered(&snapshot.revealed));
    lines
}

/// Final disclosure after every title is revealed.
pub fn render_solved(session: &ScratchSession) -> Vec<String> {
    let mut lines = vec![String::new(), "All titles answered correctly! The answers were:".to_string()];
    lines.extend(numbered(session.answers()));
    lines
}
