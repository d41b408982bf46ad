use crate::cache::ClueCache;
use crate::clues::Clue;
use crate::clues::ExcludedClue;
use crate::clues::MisplacedClue;
use crate::clues::PositionalClue;
use crate::results::WordleError;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::result::Result;
use std::sync::Arc;
use std::sync::OnceLock;

/// Returns the canonical form of the given clues, e.g. `a...e|///l/|p`.
///
/// This is the key used by the [`ClueCache`]: two clue sets are interchangeable iff their keys
/// are equal.
pub fn canonical_key(
    positional: &PositionalClue,
    misplaced: &MisplacedClue,
    excluded: &ExcludedClue,
) -> String {
    format!("{}|{}|{}", positional, misplaced, excluded)
}

/// All the knowledge accumulated about the objective word.
///
/// Instances are only created through a [`ClueCache`], which hands out one shared instance per
/// distinct set of clues. Each instance lazily remembers the words it allows out of the first word
/// list it is asked to filter, so a cache (and its clue sets) should be used with a single word
/// list, or with sub-lists that were filtered by clue sets from that same cache.
pub struct ClueSet {
    positional: PositionalClue,
    misplaced: MisplacedClue,
    excluded: ExcludedClue,
    key: String,
    words: OnceLock<Vec<Arc<str>>>,
    count: OnceLock<usize>,
}

impl ClueSet {
    pub(crate) fn new(
        positional: PositionalClue,
        misplaced: MisplacedClue,
        excluded: ExcludedClue,
        key: String,
    ) -> ClueSet {
        ClueSet {
            positional,
            misplaced,
            excluded,
            key,
            words: OnceLock::new(),
            count: OnceLock::new(),
        }
    }

    /// Checks that some word could satisfy all of the given clues at once.
    pub(crate) fn check_consistency(
        positional: &PositionalClue,
        misplaced: &MisplacedClue,
        excluded: &ExcludedClue,
    ) -> Result<(), WordleError> {
        let word_length = positional.word_length();
        if misplaced.word_length() != word_length {
            return Err(WordleError::WordLength(word_length));
        }
        for index in 0..word_length {
            let maybe_here = positional.letter_at(index);
            if let Some(letter) = maybe_here.filter(|letter| excluded.contains(*letter)) {
                return Err(WordleError::InconsistentClues(format!(
                    "'{}' is excluded, but is at location {}",
                    letter, index
                )));
            }
            for &letter in misplaced.letters_at(index).into_iter().flatten() {
                if excluded.contains(letter) {
                    return Err(WordleError::InconsistentClues(format!(
                        "'{}' is excluded, but is misplaced at location {}",
                        letter, index
                    )));
                }
                if maybe_here == Some(letter) {
                    return Err(WordleError::InconsistentClues(format!(
                        "'{}' cannot be both at and not at location {}",
                        letter, index
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parses the three textual clues and resolves them through the cache.
    ///
    /// An empty `misplaced` string means that no letters are known to be misplaced.
    ///
    /// ```
    /// use rs_wordle_advisor::ClueCache;
    /// use rs_wordle_advisor::ClueSet;
    ///
    /// let cache = ClueCache::new();
    /// let clues = ClueSet::parse("a...e", "///l/", "p", &cache).unwrap();
    ///
    /// assert!(clues.is_satisfied_by("alike"));
    /// assert_eq!(clues.key(), "a...e|///l/|p");
    /// ```
    pub fn parse(
        positional: &str,
        misplaced: &str,
        excluded: &str,
        cache: &ClueCache,
    ) -> Result<Arc<ClueSet>, WordleError> {
        let positional: PositionalClue = positional.parse()?;
        ClueSet::parse_rest(positional, misplaced, excluded, cache)
    }

    /// Like [`ClueSet::parse`], but fails with a positional [`WordleError::InvalidClue`] unless
    /// the clues describe words of the given length.
    pub fn parse_for_length(
        positional: &str,
        misplaced: &str,
        excluded: &str,
        word_length: usize,
        cache: &ClueCache,
    ) -> Result<Arc<ClueSet>, WordleError> {
        let positional = PositionalClue::parse_for_length(positional, word_length)?;
        ClueSet::parse_rest(positional, misplaced, excluded, cache)
    }

    fn parse_rest(
        positional: PositionalClue,
        misplaced: &str,
        excluded: &str,
        cache: &ClueCache,
    ) -> Result<Arc<ClueSet>, WordleError> {
        let misplaced = MisplacedClue::parse_for_length(misplaced, positional.word_length())?;
        let excluded: ExcludedClue = excluded.parse()?;
        cache.make_clue_set(positional, misplaced, excluded)
    }

    /// Returns the clue set with no knowledge at all for words of the given length.
    pub fn unknown(word_length: usize, cache: &ClueCache) -> Result<Arc<ClueSet>, WordleError> {
        cache.make_clue_set(
            PositionalClue::unknown(word_length),
            MisplacedClue::unknown(word_length),
            ExcludedClue::none(),
        )
    }

    /// Returns the clues learned by guessing `guess` when the objective is `objective`.
    pub fn from_guess(
        guess: &str,
        objective: &str,
        cache: &ClueCache,
    ) -> Result<Arc<ClueSet>, WordleError> {
        cache.make_clue_set(
            PositionalClue::from_guess(guess, objective)?,
            MisplacedClue::from_guess(guess, objective)?,
            ExcludedClue::from_guess(guess, objective)?,
        )
    }

    /// Returns the shared clue set holding the knowledge of both `self` and `other`.
    pub fn combine(&self, other: &ClueSet, cache: &ClueCache) -> Result<Arc<ClueSet>, WordleError> {
        cache.make_clue_set(
            self.positional.combine(&other.positional)?,
            self.misplaced.combine(&other.misplaced)?,
            self.excluded.combine(&other.excluded)?,
        )
    }

    /// Returns the shared clue set holding this knowledge plus what would be learned by guessing
    /// `guess` when the objective is `objective`.
    ///
    /// This is equivalent to `self.combine(&ClueSet::from_guess(..)?, cache)`, but does not
    /// register the intermediate clue set.
    pub fn update(
        &self,
        guess: &str,
        objective: &str,
        cache: &ClueCache,
    ) -> Result<Arc<ClueSet>, WordleError> {
        cache.make_clue_set(
            self.positional
                .combine(&PositionalClue::from_guess(guess, objective)?)?,
            self.misplaced
                .combine(&MisplacedClue::from_guess(guess, objective)?)?,
            self.excluded
                .combine(&ExcludedClue::from_guess(guess, objective)?)?,
        )
    }

    /// Returns `true` iff the given word satisfies every clue.
    pub fn is_satisfied_by(&self, word: &str) -> bool {
        word.chars().count() == self.word_length()
            && self.positional.is_satisfied_by(word)
            && self.excluded.is_satisfied_by(word)
            && self.misplaced.is_satisfied_by(word)
    }

    /// Returns the words from `words` that satisfy these clues.
    ///
    /// The result is computed on the first call and remembered; later calls return it without
    /// looking at `words` again.
    pub fn get_words(&self, words: &[Arc<str>]) -> &[Arc<str>] {
        self.words.get_or_init(|| {
            words
                .iter()
                .filter(|word| self.is_satisfied_by(word))
                .map(Arc::clone)
                .collect()
        })
    }

    /// Returns the number of words from `words` that satisfy these clues.
    ///
    /// This reuses a remembered count or word list if there is one. Otherwise it counts the words
    /// and remembers only the count.
    pub fn count_words(&self, words: &[Arc<str>]) -> usize {
        if let Some(count) = self.count.get() {
            return *count;
        }
        if let Some(known_words) = self.words.get() {
            return known_words.len();
        }
        *self
            .count
            .get_or_init(|| words.iter().filter(|word| self.is_satisfied_by(word)).count())
    }

    /// Computes the expected fraction of the possible words that would be eliminated by guessing
    /// `guess`, averaged over every possible objective.
    ///
    /// The possible words are `word_list` filtered by these clues. For each possible objective
    /// other than `guess` itself, the outcome of the guess is simulated, and the fraction of
    /// possible words that would remain is subtracted. A score of `1.0` means the guess always
    /// narrows the possibilities down to a single word; `0.0` means it gives no information.
    ///
    /// Returns `0.0` if no words are possible.
    pub fn value_of_guess(
        &self,
        guess: &str,
        word_list: &[Arc<str>],
        cache: &ClueCache,
    ) -> Result<f64, WordleError> {
        let possibilities = self.get_words(word_list);
        if possibilities.is_empty() {
            return Ok(0.0);
        }
        let num_possibilities = possibilities.len() as f64;

        let mut eliminations = num_possibilities;
        for objective in possibilities {
            // Guessing the objective ends the game, so nothing is left to eliminate.
            if objective.as_ref() == guess {
                continue;
            }
            let outcome = self.update(guess, objective, cache)?;
            eliminations -= outcome.count_words(possibilities) as f64 / num_possibilities;
        }
        Ok(eliminations / num_possibilities)
    }

    /// The canonical form of these clues. See [`canonical_key`].
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn word_length(&self) -> usize {
        self.positional.word_length()
    }

    pub fn positional(&self) -> &PositionalClue {
        &self.positional
    }

    pub fn misplaced(&self) -> &MisplacedClue {
        &self.misplaced
    }

    pub fn excluded(&self) -> &ExcludedClue {
        &self.excluded
    }
}

impl PartialEq for ClueSet {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ClueSet {}

impl Hash for ClueSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for ClueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl fmt::Debug for ClueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClueSet")
            .field("key", &self.key)
            .field("num_words", &self.words.get().map(Vec::len))
            .field("count", &self.count.get())
            .finish()
    }
}
