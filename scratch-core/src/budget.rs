//! Attempt budget ("hearts").

use std::fmt;

/// Remaining number of permitted opens.
///
/// The count is signed: `heart remove` may push it to zero or below, which
/// freezes opens without ending the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptBudget {
    remaining: i64,
}

impl AttemptBudget {
    pub fn new(initial: i64) -> Self {
        Self { remaining: initial }
    }

    /// Whether another open is permitted.
    pub fn can_open(&self) -> bool {
        self.remaining > 0
    }

    /// Spend one attempt. Only called after a new character was opened.
    pub fn consume_one(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Apply a signed adjustment. No floor, no ceiling.
    pub fn adjust(&mut self, delta: i64) {
        self.remaining = self.remaining.saturating_add(delta);
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }
}

impl fmt::Display for AttemptBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_until_exhausted() {
        let mut budget = AttemptBudget::new(2);
        assert!(budget.can_open());
        budget.consume_one();
        budget.consume_one();
        assert!(!budget.can_open());
        assert_eq!(budget.remaining(), 0);
    }

    #[test]
    fn test_adjust_is_unbounded() {
        let mut budget = AttemptBudget::new(1);
        budget.adjust(-4);
        assert_eq!(budget.remaining(), -3);
        assert!(!budget.can_open());

        budget.adjust(5);
        budget.adjust(-3);
        assert_eq!(budget.remaining(), -1);

        budget.adjust(2);
        assert!(budget.can_open());
        assert_eq!(budget.to_string(), "1");
    }

    #[test]
    fn test_adjust_saturates() {
        let mut budget = AttemptBudget::new(i64::MAX);
        budget.adjust(10);
        assert_eq!(budget.remaining(), i64::MAX);
    }
}
