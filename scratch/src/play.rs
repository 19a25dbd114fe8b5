//! The interactive command loop.
//!
//! Reads one command per line from stdin, prints the reply, and stops when
//! every title is revealed, on `exit`, or at end of input.

use crate::render::{render_reply, render_solved};
use scratch_core::progress::numbered;
use scratch_core::{GameStatus, ScratchSession, SessionError};
use std::io::{self, BufRead, Write};

const PROMPT: &str = ">> ";

/// Play a session to its end and return how it ended.
pub async fn run_game(mut session: ScratchSession) -> Result<GameStatus, SessionError> {
    session.begin().await?;

    println!();
    println!("Type \"?\" for help.");
    println!();
    println!("Titles:");
    for line in numbered(session.revealed()) {
        println!("{line}");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    while !session.status().is_over() {
        print!("\n{PROMPT}");
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                log::info!("End of input, leaving the game");
                return Ok(GameStatus::Aborted);
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = session.execute(line).await;
        for out in render_reply(&reply, &session) {
            println!("{out}");
        }
    }

    let status = session.status();
    if status == GameStatus::Solved {
        session.finish().await;
        for line in render_solved(&session) {
            println!("{line}");
        }
    }
    Ok(status)
}
