use crate::cache::ClueCache;
use crate::clue_set::ClueSet;
use crate::data::WordBank;
use crate::results::WordleError;
use rayon::prelude::*;
use std::result::Result;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

/// Controls how [`GuessAdvisor::advise`] searches for the best guess.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Give up if the search takes longer than this.
    pub time_limit: Option<Duration>,
    /// If at most this many words are still possible, they are returned as-is instead of
    /// searching for a guess. Values below 1 are treated as 1.
    pub answer_threshold: usize,
    /// Evaluate guesses on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            time_limit: None,
            answer_threshold: 2,
            parallel: false,
        }
    }
}

/// A guess along with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredGuess {
    pub guess: Arc<str>,
    /// The expected fraction of the possible words eliminated by this guess.
    pub value: f64,
    /// Whether this guess could itself be the objective.
    pub is_possible: bool,
    /// Time since the search started when this guess was scored.
    pub elapsed: Duration,
    /// Estimate of how long the whole search will take, based on progress so far. Parallel
    /// searches report guesses once every guess is scored, so this is the actual duration of the
    /// scoring there.
    pub estimated_total: Duration,
}

/// The outcome of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum Advice {
    /// No word in the word bank satisfies the clues.
    NoPossibilities,
    /// Few enough words remain that they are simply listed.
    FewPossibilities(Vec<Arc<str>>),
    /// The guess expected to eliminate the most possibilities.
    Guess(ScoredGuess),
    /// The time limit was exceeded before every guess was scored.
    TimedOut {
        elapsed: Duration,
        /// Number of guesses scored before giving up.
        evaluated: usize,
        /// Number of guesses that needed scoring.
        total: usize,
    },
}

/// Finds the word that is expected to eliminate the largest fraction of the remaining
/// possibilities.
///
/// ```
/// use rs_wordle_advisor::Advice;
/// use rs_wordle_advisor::ClueCache;
/// use rs_wordle_advisor::ClueSet;
/// use rs_wordle_advisor::GuessAdvisor;
/// use rs_wordle_advisor::SearchOptions;
/// use rs_wordle_advisor::WordBank;
///
/// let bank = WordBank::from_iterator(&["abc", "abd", "xyz", "aqr"]).unwrap();
/// let cache = ClueCache::new();
/// let clues = ClueSet::parse("a..", "", "", &cache).unwrap();
/// let advisor = GuessAdvisor::new(&bank, &cache, SearchOptions::default());
///
/// match advisor.advise(&clues, |_| {}).unwrap() {
///     Advice::Guess(best) => assert!(best.value > 0.0),
///     other => panic!("unexpected advice: {:?}", other),
/// }
/// ```
pub struct GuessAdvisor<'a> {
    bank: &'a WordBank,
    cache: &'a ClueCache,
    options: SearchOptions,
}

impl<'a> GuessAdvisor<'a> {
    pub fn new(bank: &'a WordBank, cache: &'a ClueCache, options: SearchOptions) -> Self {
        GuessAdvisor {
            bank,
            cache,
            options,
        }
    }

    /// Scores every word in the bank, in order, as a guess given the clues.
    ///
    /// `on_improvement` is called each time a new best guess is found. A guess replaces the
    /// current best if it scores strictly higher, or if it scores the same and could be the
    /// objective while the current best could not.
    pub fn advise<F>(&self, clues: &ClueSet, on_improvement: F) -> Result<Advice, WordleError>
    where
        F: FnMut(&ScoredGuess),
    {
        if clues.word_length() != self.bank.word_length() {
            return Err(WordleError::WordLength(self.bank.word_length()));
        }
        let possibilities = clues.get_words(self.bank);
        if possibilities.is_empty() {
            return Ok(Advice::NoPossibilities);
        }
        if possibilities.len() <= self.options.answer_threshold.max(1) {
            return Ok(Advice::FewPossibilities(possibilities.to_vec()));
        }

        if self.options.parallel {
            self.search_parallel(clues, on_improvement)
        } else {
            self.search_sequential(clues, on_improvement)
        }
    }

    fn search_sequential<F>(
        &self,
        clues: &ClueSet,
        mut on_improvement: F,
    ) -> Result<Advice, WordleError>
    where
        F: FnMut(&ScoredGuess),
    {
        let start = Instant::now();
        let total = self.bank.len();
        let mut best: Option<ScoredGuess> = None;
        for (index, guess) in self.bank.iter().enumerate() {
            let value = clues.value_of_guess(guess, self.bank, self.cache)?;
            let elapsed = start.elapsed();
            if self.is_over_time(elapsed) {
                return Ok(Advice::TimedOut {
                    elapsed,
                    evaluated: index + 1,
                    total,
                });
            }
            let candidate = ScoredGuess {
                guess: Arc::clone(guess),
                value,
                is_possible: clues.is_satisfied_by(guess),
                elapsed,
                estimated_total: estimate_total(elapsed, index + 1, total),
            };
            if is_improvement(&candidate, best.as_ref()) {
                on_improvement(&candidate);
                best = Some(candidate);
            }
        }
        Ok(finish(best))
    }

    fn search_parallel<F>(
        &self,
        clues: &ClueSet,
        mut on_improvement: F,
    ) -> Result<Advice, WordleError>
    where
        F: FnMut(&ScoredGuess),
    {
        let start = Instant::now();
        let total = self.bank.len();
        let timed_out = AtomicBool::new(false);
        let scores: Vec<Option<(f64, Duration)>> = self
            .bank
            .par_iter()
            .map(|guess| {
                if timed_out.load(Ordering::Relaxed) {
                    return Ok(None);
                }
                let value = clues.value_of_guess(guess, self.bank, self.cache)?;
                let elapsed = start.elapsed();
                if self.is_over_time(elapsed) {
                    timed_out.store(true, Ordering::Relaxed);
                    return Ok(None);
                }
                Ok(Some((value, elapsed)))
            })
            .collect::<Result<Vec<Option<(f64, Duration)>>, WordleError>>()?;

        if timed_out.load(Ordering::Relaxed) {
            return Ok(Advice::TimedOut {
                elapsed: start.elapsed(),
                evaluated: scores.iter().filter(|score| score.is_some()).count(),
                total,
            });
        }

        // Select in word bank order so ties resolve exactly as in the sequential search.
        let scoring_time = start.elapsed();
        let mut best: Option<ScoredGuess> = None;
        for (guess, score) in self.bank.iter().zip(scores) {
            let Some((value, elapsed)) = score else {
                continue;
            };
            let candidate = ScoredGuess {
                guess: Arc::clone(guess),
                value,
                is_possible: clues.is_satisfied_by(guess),
                elapsed,
                estimated_total: scoring_time,
            };
            if is_improvement(&candidate, best.as_ref()) {
                on_improvement(&candidate);
                best = Some(candidate);
            }
        }
        Ok(finish(best))
    }

    fn is_over_time(&self, elapsed: Duration) -> bool {
        self.options
            .time_limit
            .map_or(false, |time_limit| elapsed > time_limit)
    }
}

fn is_improvement(candidate: &ScoredGuess, maybe_best: Option<&ScoredGuess>) -> bool {
    match maybe_best {
        // The implicit starting best is an impossible guess worth nothing.
        None => candidate.value > 0.0 || (candidate.value == 0.0 && candidate.is_possible),
        Some(best) => {
            candidate.value > best.value
                || (candidate.value == best.value && candidate.is_possible && !best.is_possible)
        }
    }
}

fn finish(best: Option<ScoredGuess>) -> Advice {
    match best {
        Some(best) => Advice::Guess(best),
        // Only reachable if no possible word is in the bank, which `advise` rules out.
        None => Advice::NoPossibilities,
    }
}

fn estimate_total(elapsed: Duration, evaluated: usize, total: usize) -> Duration {
    if evaluated == 0 {
        return elapsed;
    }
    elapsed.mul_f64(total as f64 / evaluated as f64)
}
