use crate::results::ClueKind;
use crate::results::WordleError;
use std::collections::BTreeSet;
use std::fmt;
use std::iter::zip;
use std::result::Result;
use std::str::FromStr;

/// One slice of the knowledge gained from guesses.
///
/// Every clue can be derived by comparing a guess against a (hypothetical) objective word, can be
/// combined with another clue of the same kind into a stricter one, and can be written to and
/// parsed from its textual form. The `Display` output is canonical: two clues are equal iff their
/// displayed forms are equal, and parsing the displayed form yields an equal clue.
pub trait Clue: Sized + Clone + Eq + fmt::Display + FromStr<Err = WordleError> {
    /// Returns the clue implied by guessing `guess` when the objective is `objective`.
    fn from_guess(guess: &str, objective: &str) -> Result<Self, WordleError>;

    /// Returns `true` iff the given word satisfies this clue.
    fn is_satisfied_by(&self, word: &str) -> bool;

    /// Returns a clue that holds all the knowledge of both `self` and `other`.
    fn combine(&self, other: &Self) -> Result<Self, WordleError>;
}

fn check_same_length(guess: &str, objective: &str) -> Result<usize, WordleError> {
    let length = objective.chars().count();
    if guess.chars().count() != length {
        return Err(WordleError::WordLength(length));
    }
    Ok(length)
}

fn parse_letters(
    kind: ClueKind,
    input: &str,
    segment: &str,
) -> Result<BTreeSet<char>, WordleError> {
    segment
        .chars()
        .map(|letter| {
            if letter.is_ascii_alphabetic() {
                Ok(letter.to_ascii_lowercase())
            } else {
                Err(WordleError::invalid_clue(
                    kind,
                    input,
                    format!("'{}' is not a letter", letter),
                ))
            }
        })
        .collect()
}

fn write_letters(f: &mut fmt::Formatter<'_>, letters: &BTreeSet<char>) -> fmt::Result {
    for letter in letters {
        write!(f, "{}", letter)?;
    }
    Ok(())
}

/// Letters known to be at specific locations in the word, written as e.g. `a...e`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PositionalClue {
    letters: Vec<Option<char>>,
}

impl PositionalClue {
    /// Creates a clue for words of the given length where no location is known.
    pub fn unknown(word_length: usize) -> PositionalClue {
        PositionalClue {
            letters: vec![None; word_length],
        }
    }

    /// The length of the words this clue applies to.
    pub fn word_length(&self) -> usize {
        self.letters.len()
    }

    /// Returns the letter known to be at the given location, if any.
    pub fn letter_at(&self, index: usize) -> Option<char> {
        self.letters.get(index).copied().flatten()
    }

    /// Parses the clue, requiring one character per letter in words of the given length.
    pub fn parse_for_length(
        input: &str,
        word_length: usize,
    ) -> Result<PositionalClue, WordleError> {
        let clue: PositionalClue = input.parse()?;
        if clue.word_length() != word_length {
            return Err(WordleError::invalid_clue(
                ClueKind::Positional,
                input,
                format!(
                    "expected {} letters, found {}",
                    word_length,
                    clue.word_length()
                ),
            ));
        }
        Ok(clue)
    }

    /// Iterates over the known letters.
    pub fn known_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().filter_map(|slot| *slot)
    }
}

impl Clue for PositionalClue {
    fn from_guess(guess: &str, objective: &str) -> Result<Self, WordleError> {
        check_same_length(guess, objective)?;
        Ok(PositionalClue {
            letters: zip(guess.chars(), objective.chars())
                .map(|(guess_letter, objective_letter)| {
                    (guess_letter == objective_letter).then_some(guess_letter)
                })
                .collect(),
        })
    }

    fn is_satisfied_by(&self, word: &str) -> bool {
        zip(word.chars(), self.letters.iter())
            .all(|(letter, slot)| slot.map_or(true, |known| known == letter))
    }

    fn combine(&self, other: &Self) -> Result<Self, WordleError> {
        if self.letters.len() != other.letters.len() {
            return Err(WordleError::WordLength(self.letters.len()));
        }
        let letters = zip(self.letters.iter(), other.letters.iter())
            .enumerate()
            .map(|(index, (mine, theirs))| match (mine, theirs) {
                (Some(a), Some(b)) if a != b => Err(WordleError::InconsistentClues(format!(
                    "location {} cannot be both '{}' and '{}'",
                    index, a, b
                ))),
                _ => Ok(mine.or(*theirs)),
            })
            .collect::<Result<Vec<Option<char>>, WordleError>>()?;
        Ok(PositionalClue { letters })
    }
}

impl FromStr for PositionalClue {
    type Err = WordleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(WordleError::invalid_clue(
                ClueKind::Positional,
                input,
                "must have one character per letter in the word",
            ));
        }
        let letters = input
            .chars()
            .map(|character| match character {
                '.' => Ok(None),
                letter if letter.is_ascii_alphabetic() => Ok(Some(letter.to_ascii_lowercase())),
                other => Err(WordleError::invalid_clue(
                    ClueKind::Positional,
                    input,
                    format!("'{}' is neither a letter nor '.'", other),
                )),
            })
            .collect::<Result<Vec<Option<char>>, WordleError>>()?;
        Ok(PositionalClue { letters })
    }
}

impl fmt::Display for PositionalClue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.letters {
            write!(f, "{}", slot.unwrap_or('.'))?;
        }
        Ok(())
    }
}

/// Letters known to be in the word, but not at specific locations.
///
/// Written as one `/`-separated segment per location, e.g. `//l//` for an `l` that is somewhere in
/// the word other than the middle.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MisplacedClue {
    letters: Vec<BTreeSet<char>>,
}

impl MisplacedClue {
    /// Creates a clue for words of the given length with no misplaced letters.
    pub fn unknown(word_length: usize) -> MisplacedClue {
        MisplacedClue {
            letters: vec![BTreeSet::new(); word_length],
        }
    }

    /// Parses the clue, treating an empty string as "no misplaced letters" for words of the given
    /// length.
    pub fn parse_for_length(input: &str, word_length: usize) -> Result<MisplacedClue, WordleError> {
        if input.is_empty() {
            return Ok(MisplacedClue::unknown(word_length));
        }
        let clue: MisplacedClue = input.parse()?;
        if clue.word_length() != word_length {
            return Err(WordleError::invalid_clue(
                ClueKind::Misplaced,
                input,
                format!(
                    "expected {} '/'-separated segments, found {}",
                    word_length,
                    clue.word_length()
                ),
            ));
        }
        Ok(clue)
    }

    /// The length of the words this clue applies to.
    pub fn word_length(&self) -> usize {
        self.letters.len()
    }

    /// The letters known not to be at the given location.
    pub fn letters_at(&self, index: usize) -> Option<&BTreeSet<char>> {
        self.letters.get(index)
    }

    /// Iterates over every misplaced letter, once per location it was seen at.
    pub fn all_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().flat_map(|letters| letters.iter().copied())
    }
}

impl Clue for MisplacedClue {
    fn from_guess(guess: &str, objective: &str) -> Result<Self, WordleError> {
        check_same_length(guess, objective)?;
        Ok(MisplacedClue {
            letters: zip(guess.chars(), objective.chars())
                .map(|(guess_letter, objective_letter)| {
                    let mut letters = BTreeSet::new();
                    if guess_letter != objective_letter && objective.contains(guess_letter) {
                        letters.insert(guess_letter);
                    }
                    letters
                })
                .collect(),
        })
    }

    fn is_satisfied_by(&self, word: &str) -> bool {
        zip(word.chars(), self.letters.iter())
            .all(|(letter, not_here)| !not_here.contains(&letter))
            && self.all_letters().all(|letter| word.contains(letter))
    }

    fn combine(&self, other: &Self) -> Result<Self, WordleError> {
        if self.letters.len() != other.letters.len() {
            return Err(WordleError::WordLength(self.letters.len()));
        }
        Ok(MisplacedClue {
            letters: zip(self.letters.iter(), other.letters.iter())
                .map(|(mine, theirs)| mine.union(theirs).copied().collect())
                .collect(),
        })
    }
}

impl FromStr for MisplacedClue {
    type Err = WordleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(MisplacedClue {
            letters: input
                .split('/')
                .map(|segment| parse_letters(ClueKind::Misplaced, input, segment))
                .collect::<Result<Vec<BTreeSet<char>>, WordleError>>()?,
        })
    }
}

impl fmt::Display for MisplacedClue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, letters) in self.letters.iter().enumerate() {
            if index > 0 {
                write!(f, "/")?;
            }
            write_letters(f, letters)?;
        }
        Ok(())
    }
}

/// Letters known not to be anywhere in the word, written as a flat string such as `pqz`.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ExcludedClue {
    letters: BTreeSet<char>,
}

impl ExcludedClue {
    /// Creates a clue that excludes no letters.
    pub fn none() -> ExcludedClue {
        ExcludedClue::default()
    }

    /// Returns `true` iff the letter is known not to be in the word.
    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    pub fn letters(&self) -> &BTreeSet<char> {
        &self.letters
    }
}

impl Clue for ExcludedClue {
    fn from_guess(guess: &str, objective: &str) -> Result<Self, WordleError> {
        check_same_length(guess, objective)?;
        Ok(ExcludedClue {
            letters: guess
                .chars()
                .filter(|letter| !objective.contains(*letter))
                .collect(),
        })
    }

    fn is_satisfied_by(&self, word: &str) -> bool {
        !word.chars().any(|letter| self.letters.contains(&letter))
    }

    fn combine(&self, other: &Self) -> Result<Self, WordleError> {
        Ok(ExcludedClue {
            letters: self.letters.union(&other.letters).copied().collect(),
        })
    }
}

impl FromStr for ExcludedClue {
    type Err = WordleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(ExcludedClue {
            letters: parse_letters(ClueKind::Excluded, input, input)?,
        })
    }
}

impl fmt::Display for ExcludedClue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_letters(f, &self.letters)
    }
}
