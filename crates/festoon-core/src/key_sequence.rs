#![forbid(unsafe_code)]

//! Ordered key-sequence matcher (the page's hidden easter egg).
//!
//! Keys are DOM `KeyboardEvent.key` names (`"ArrowUp"`, `"b"`). The matcher
//! advances one step per matching key and reports completion exactly once per
//! full sequence.
//!
//! # Invariants
//! 1. Progress is always `< pattern.len()` between calls.
//! 2. Completion resets progress to 0, so the sequence can fire again.
//! 3. A mismatching key resets progress to 0 and is itself discarded, even
//!    when it equals the first key of the pattern.
//!
//! # Example
//!
//! ```
//! use festoon_core::key_sequence::{KeySequenceMatcher, KeySequenceAction, KONAMI_CODE};
//!
//! let mut matcher = KeySequenceMatcher::new(KONAMI_CODE);
//! let mut last = KeySequenceAction::Ignored;
//! for key in KONAMI_CODE {
//!     last = matcher.feed(key);
//! }
//! assert_eq!(last, KeySequenceAction::Completed);
//! ```

/// The classic up-up-down-down-left-right-left-right-B-A sequence.
pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

/// Outcome of feeding one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySequenceAction {
    /// The key did not advance the sequence.
    Ignored,
    /// The key advanced the sequence; `matched` keys of `total` seen so far.
    Progress { matched: usize, total: usize },
    /// The key completed the sequence.
    Completed,
}

impl KeySequenceAction {
    /// Returns true if this action completed the sequence.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Stateful matcher for one fixed key sequence.
#[derive(Debug, Clone)]
pub struct KeySequenceMatcher {
    pattern: Vec<String>,
    matched: usize,
}

impl KeySequenceMatcher {
    #[must_use]
    pub fn new<I, S>(pattern: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pattern: pattern.into_iter().map(Into::into).collect(),
            matched: 0,
        }
    }

    /// Number of keys matched in the current attempt.
    #[must_use]
    pub fn progress(&self) -> usize {
        self.matched
    }

    /// Abandon the current attempt.
    pub fn reset(&mut self) {
        self.matched = 0;
    }

    /// Feed one key.
    pub fn feed(&mut self, key: &str) -> KeySequenceAction {
        if self.pattern.is_empty() {
            return KeySequenceAction::Ignored;
        }
        if self.pattern[self.matched] != key {
            self.reset();
            return KeySequenceAction::Ignored;
        }

        self.matched += 1;
        if self.matched == self.pattern.len() {
            self.reset();
            tracing::debug!(len = self.pattern.len(), "key sequence completed");
            return KeySequenceAction::Completed;
        }
        KeySequenceAction::Progress {
            matched: self.matched,
            total: self.pattern.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(m: &mut KeySequenceMatcher, keys: &[&str]) -> Vec<KeySequenceAction> {
        keys.iter().map(|k| m.feed(k)).collect()
    }

    #[test]
    fn full_sequence_completes_once() {
        let mut m = KeySequenceMatcher::new(KONAMI_CODE);
        let actions = feed_all(&mut m, &KONAMI_CODE);
        assert_eq!(actions.iter().filter(|a| a.is_complete()).count(), 1);
        assert!(actions.last().is_some_and(KeySequenceAction::is_complete));
        assert_eq!(m.progress(), 0);
    }

    #[test]
    fn completes_again_after_reset() {
        let mut m = KeySequenceMatcher::new(KONAMI_CODE);
        feed_all(&mut m, &KONAMI_CODE);
        let actions = feed_all(&mut m, &KONAMI_CODE);
        assert!(actions.last().is_some_and(KeySequenceAction::is_complete));
    }

    #[test]
    fn mismatch_resets_progress() {
        let mut m = KeySequenceMatcher::new(KONAMI_CODE);
        feed_all(&mut m, &["ArrowUp", "ArrowUp", "ArrowDown"]);
        assert_eq!(m.progress(), 3);
        assert_eq!(m.feed("x"), KeySequenceAction::Ignored);
        assert_eq!(m.progress(), 0);
    }

    #[test]
    fn mismatching_first_key_is_discarded() {
        let mut m = KeySequenceMatcher::new(KONAMI_CODE);
        feed_all(&mut m, &["ArrowUp", "ArrowUp"]);
        assert_eq!(m.feed("ArrowUp"), KeySequenceAction::Ignored);
        assert_eq!(m.progress(), 0);
    }

    #[test]
    fn extra_leading_up_spoils_the_attempt() {
        let mut m = KeySequenceMatcher::new(KONAMI_CODE);
        let mut keys = vec!["ArrowUp"];
        keys.extend(KONAMI_CODE);
        let actions = feed_all(&mut m, &keys);
        assert!(!actions.iter().any(KeySequenceAction::is_complete));
    }

    #[test]
    fn overlapping_prefix_is_not_kept() {
        let mut m = KeySequenceMatcher::new(["a", "a", "b"]);
        feed_all(&mut m, &["a", "a", "a"]);
        assert_eq!(m.progress(), 0);
        assert_eq!(m.feed("b"), KeySequenceAction::Ignored);
    }

    #[test]
    fn progress_reports_counts() {
        let mut m = KeySequenceMatcher::new(["a", "b"]);
        assert_eq!(
            m.feed("a"),
            KeySequenceAction::Progress { matched: 1, total: 2 }
        );
    }

    #[test]
    fn key_names_are_case_sensitive() {
        let mut m = KeySequenceMatcher::new(["b", "a"]);
        assert_eq!(m.feed("B"), KeySequenceAction::Ignored);
    }

    #[test]
    fn empty_pattern_never_fires() {
        let mut m = KeySequenceMatcher::new(Vec::<String>::new());
        assert_eq!(m.feed("a"), KeySequenceAction::Ignored);
    }
}
