//! Advises on the best next guess in a Wordle-style puzzle.
//!
//! Knowledge about the objective word is held in a [`ClueSet`]: the letters known to be at
//! specific locations, the letters known to be in the word but not at specific locations, and the
//! letters known not to be in the word. Every guess in a [`WordBank`] is scored by the fraction of
//! the still-possible words it is expected to eliminate, and the [`GuessAdvisor`] recommends the
//! best one.
//!
//! Clue sets are shared through a [`ClueCache`], so that the many simulated guesses which lead to
//! the same knowledge only filter the word list once.
#![cfg_attr(feature = "unstable", feature(test))]

mod cache;
mod clue_set;
mod data;
mod engine;
mod results;

pub mod clues;

pub use cache::CacheStats;
pub use cache::ClueCache;
pub use clue_set::canonical_key;
pub use clue_set::ClueSet;
pub use data::WordBank;
pub use engine::*;
pub use results::*;
