use crate::results::WordleError;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::sync::Arc;

/// Contains all the possible words for this Wordle game, in the order they were loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    all_words: Vec<Arc<str>>,
    word_length: usize,
}

impl WordBank {
    /// Constructs a new `WordBank` struct by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word will be trimmed and converted to
    /// lower case, and empty lines are skipped. All words must have the same length.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, WordleError> {
        let words = word_reader
            .lines()
            .collect::<std::io::Result<Vec<String>>>()?;
        WordBank::from_iterator(words)
    }

    /// Constructs a new `WordBank` struct using the words from the given iterator.
    ///
    /// Each word will be trimmed and converted to lower case, and empty words are skipped. All
    /// words must have the same length.
    pub fn from_iterator<S, I>(words: I) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut word_length = 0;
        let all_words = words
            .into_iter()
            .filter_map(|word| {
                let word = word.as_ref().trim();
                if word.is_empty() {
                    return None;
                }
                let length = word.chars().count();
                if word_length == 0 {
                    word_length = length;
                } else if word_length != length {
                    return Some(Err(WordleError::WordLength(word_length)));
                }
                Some(Ok(Arc::from(word.to_lowercase().as_str())))
            })
            .collect::<Result<Vec<Arc<str>>, WordleError>>()?;
        Ok(WordBank {
            all_words,
            word_length,
        })
    }

    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    /// Returns the length of each word in the bank, or 0 if the bank is empty.
    pub fn word_length(&self) -> usize {
        self.word_length
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn from_reader_keeps_load_order() -> Result<(), WordleError> {
        let cursor = Cursor::new(String::from("other\nworda\nsmore\nwordb"));

        let bank = WordBank::from_reader(cursor)?;

        let words: Vec<&str> = bank.iter().map(|word| word.as_ref()).collect();
        assert_eq!(words, vec!["other", "worda", "smore", "wordb"]);
        Ok(())
    }

    #[test]
    fn from_iterator_empty() -> Result<(), WordleError> {
        let bank = WordBank::from_iterator(Vec::<String>::new())?;

        assert!(bank.is_empty());
        assert_eq!(bank.word_length(), 0);
        Ok(())
    }
}
