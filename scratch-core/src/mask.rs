//! Masking of hidden titles.

use crate::ledger::CharacterLedger;

/// Placeholder shown for every unopened position.
pub const MASK_SYMBOL: char = '*';

/// Reveal `title` through the ledger: open characters stay, the rest are masked.
///
/// The result always has as many characters as `title`.
pub fn reveal(title: &str, ledger: &CharacterLedger) -> String {
    title
        .chars()
        .map(|ch| if ledger.is_open(ch) { ch } else { MASK_SYMBOL })
        .collect()
}

/// A fully masked rendition of `title`.
pub fn masked(title: &str) -> String {
    title.chars().map(|_| MASK_SYMBOL).collect()
}

/// A title is solved once its revealed form is the title itself.
pub fn is_solved(title: &str, revealed: &str) -> bool {
    title == revealed
}

/// Length in characters, the unit every revealed entry is measured in.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
