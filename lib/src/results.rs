use std::fmt;
use thiserror::Error;

/// Names one of the three kinds of clue a player can supply.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum ClueKind {
    /// Letters known to be at a specific location.
    Positional,
    /// Letters known to be in the word, but not at a specific location.
    Misplaced,
    /// Letters known not to be in the word at all.
    Excluded,
}

impl fmt::Display for ClueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClueKind::Positional => write!(f, "positional"),
            ClueKind::Misplaced => write!(f, "misplaced"),
            ClueKind::Excluded => write!(f, "excluded"),
        }
    }
}

/// Indicates that an error occurred while building clues or searching for a guess.
#[derive(Debug, Error)]
pub enum WordleError {
    /// Indicates that a clue string could not be parsed.
    #[error("invalid {kind} clue {input:?}: {reason}")]
    InvalidClue {
        kind: ClueKind,
        input: String,
        reason: String,
    },
    /// Indicates that a word or clue did not have the expected length, which is provided.
    #[error("words must all have length {0}")]
    WordLength(usize),
    /// Indicates that the given clues contradict each other, so no word could satisfy them.
    #[error("inconsistent clues: {0}")]
    InconsistentClues(String),
    /// Wraps an error that occurred while reading the word list.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WordleError {
    pub(crate) fn invalid_clue(kind: ClueKind, input: &str, reason: impl Into<String>) -> Self {
        WordleError::InvalidClue {
            kind,
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
