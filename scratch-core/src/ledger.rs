//! Character ledger.
//!
//! Tracks which characters the player has scratched open. Letters from the
//! Latin, Greek and Cyrillic ranges are opened together with their case
//! twin; every other character opens only itself. Whitespace is its own
//! class and is opened as a whole.

use std::collections::HashSet;

/// Label recorded in the known-characters list for the whitespace class.
pub const SPACE_LABEL: &str = "space";

/// Result of an open request against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenResult {
    /// The character was new and is now open.
    Opened,
    /// The character (or its case twin) was already open. Nothing changed.
    AlreadyOpened,
}

/// Whether `ch` belongs to one of the case-folded alphabetic ranges.
pub fn is_foldable(ch: char) -> bool {
    matches!(
        ch,
        'A'..='Z' | 'a'..='z' | '\u{0391}'..='\u{03C9}' | '\u{0400}'..='\u{04FF}'
    )
}

/// Lower and upper fold of `ch`, or `None` outside the folded ranges.
///
/// A fold that expands to more than one code point leaves that side equal
/// to `ch`.
pub fn case_fold_pair(ch: char) -> Option<(char, char)> {
    if !is_foldable(ch) {
        return None;
    }
    Some((
        single_char(ch.to_lowercase(), ch),
        single_char(ch.to_uppercase(), ch),
    ))
}

fn single_char(mut mapped: impl Iterator<Item = char>, fallback: char) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(c), None) => c,
        _ => fallback,
    }
}

/// The set of opened characters plus the log shown to the player.
#[derive(Debug, Clone, Default)]
pub struct CharacterLedger {
    opened: HashSet<char>,
    space_opened: bool,
    known: Vec<String>,
}

impl CharacterLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a single character.
    ///
    /// Whitespace is routed to [`CharacterLedger::open_space`].
    pub fn open_character(&mut self, ch: char) -> OpenResult {
        if ch.is_whitespace() {
            return self.open_space();
        }
        if self.opened.contains(&ch) {
            return OpenResult::AlreadyOpened;
        }

        if let Some((lower, upper)) = case_fold_pair(ch) {
            self.opened.insert(lower);
            self.opened.insert(upper);
        }
        self.opened.insert(ch);
        self.record(ch.to_string());
        OpenResult::Opened
    }

    /// Open the whitespace class.
    pub fn open_space(&mut self) -> OpenResult {
        if self.space_opened {
            return OpenResult::AlreadyOpened;
        }
        self.space_opened = true;
        self.record(SPACE_LABEL.to_string());
        OpenResult::Opened
    }

    fn record(&mut self, label: String) {
        if !self.known.contains(&label) {
            self.known.push(label);
        }
    }

    /// Whether `ch` is currently revealed.
    pub fn is_open(&self, ch: char) -> bool {
        if ch.is_whitespace() {
            self.space_opened
        } else {
            self.opened.contains(&ch)
        }
    }

    /// Labels of every open event, in the order they happened.
    pub fn known(&self) -> &[String] {
        &self.known
    }

    /// Number of open events recorded so far.
    pub fn open_count(&self) -> usize {
        self.known.len()
    }

    /// The known-characters line, e.g. `Known characters: a, 7, space.`
    pub fn known_characters_text(&self) -> String {
        format!("Known characters: {}.", self.known.join(", "))
    }
}
