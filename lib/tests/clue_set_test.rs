#[macro_use]
extern crate assert_matches;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rs_wordle_advisor::clues::*;
use rs_wordle_advisor::*;

use std::result::Result;
use std::sync::Arc;

fn create_word_bank(words: &[&str]) -> WordBank {
    WordBank::from_iterator(words).unwrap()
}

fn random_words(rng: &mut StdRng, count: usize) -> Vec<String> {
    const LETTERS: &[u8] = b"abcdefgh";
    (0..count)
        .map(|_| {
            (0..5)
                .map(|_| *LETTERS.choose(rng).unwrap() as char)
                .collect()
        })
        .collect()
}

#[test]
fn from_guess_apple_alike() -> Result<(), WordleError> {
    let cache = ClueCache::new();

    let clues = ClueSet::from_guess("apple", "alike", &cache)?;

    assert_eq!(clues.key(), "a...e|///l/|p");
    assert_eq!(clues.positional().to_string(), "a...e");
    assert_eq!(clues.misplaced().to_string(), "///l/");
    assert_eq!(clues.excluded().to_string(), "p");
    assert!(clues.is_satisfied_by("alike"));
    Ok(())
}

#[test]
fn parse_round_trips_key() -> Result<(), WordleError> {
    let cache = ClueCache::new();
    let clues = ClueSet::parse("A.i..", "/L/b//", "zqz", &cache)?;

    assert_eq!(clues.key(), "a.i..|/l/b//|qz");

    let other_cache = ClueCache::new();
    let parts: Vec<&str> = clues.key().split('|').collect();
    let reparsed = ClueSet::parse(parts[0], parts[1], parts[2], &other_cache)?;
    assert_eq!(*reparsed, *clues);
    Ok(())
}

#[test]
fn parse_reports_bad_argument() {
    let cache = ClueCache::new();

    assert_matches!(
        ClueSet::parse("a.?..", "", "", &cache),
        Err(WordleError::InvalidClue {
            kind: ClueKind::Positional,
            ..
        })
    );
    assert_matches!(
        ClueSet::parse("a....", "b/c", "", &cache),
        Err(WordleError::InvalidClue {
            kind: ClueKind::Misplaced,
            ..
        })
    );
    assert_matches!(
        ClueSet::parse("a....", "", "x1", &cache),
        Err(WordleError::InvalidClue {
            kind: ClueKind::Excluded,
            ..
        })
    );
    assert_matches!(
        ClueSet::parse("a....", "", "a", &cache),
        Err(WordleError::InconsistentClues(_))
    );
}

#[test]
fn parse_for_length_blames_positional_clue() {
    let cache = ClueCache::new();

    assert_matches!(
        ClueSet::parse_for_length("a...", "", "", 5, &cache),
        Err(WordleError::InvalidClue {
            kind: ClueKind::Positional,
            ref reason,
            ..
        }) if reason == "expected 5 letters, found 4"
    );
    assert_matches!(
        ClueSet::parse_for_length("....", "////", "", 5, &cache),
        Err(WordleError::InvalidClue {
            kind: ClueKind::Positional,
            ..
        })
    );
    assert!(cache.is_empty());
}

#[test]
fn parse_for_length_accepts_matching_clues() -> Result<(), WordleError> {
    let cache = ClueCache::new();

    let clues = ClueSet::parse_for_length("a....", "////", "b", 5, &cache)?;

    assert_eq!(clues.key(), "a....|////|b");
    Ok(())
}

#[test]
fn is_satisfied_by_labeled_words() -> Result<(), WordleError> {
    let cache = ClueCache::new();
    // `a` first, an `l` somewhere but not second, no `p` or `t`.
    let clues = ClueSet::parse("a....", "/l///", "pt", &cache)?;

    for word in ["aglow", "aisle", "amble", "axles"] {
        assert!(clues.is_satisfied_by(word), "{} should match", word);
    }
    for word in ["alike", "alkyd", "apple", "about", "blame", "amber", "ample"] {
        assert!(!clues.is_satisfied_by(word), "{} should not match", word);
    }
    Ok(())
}

#[test]
fn get_words_filters_in_order() -> Result<(), WordleError> {
    let cache = ClueCache::new();
    let bank = create_word_bank(&["abide", "about", "above", "apple", "alike"]);

    let all_a = ClueSet::parse("a....", "", "", &cache)?;
    assert_eq!(all_a.get_words(&bank).len(), 5);

    let no_b = ClueSet::parse("a....", "", "b", &cache)?;
    let words: Vec<&str> = no_b.get_words(&bank).iter().map(|word| word.as_ref()).collect();
    assert_eq!(words, vec!["apple", "alike"]);
    assert_eq!(no_b.count_words(&bank), 2);
    Ok(())
}

#[test]
fn combine_resolves_through_cache() -> Result<(), WordleError> {
    let cache = ClueCache::new();
    let a = ClueSet::parse("a....", "", "", &cache)?;
    let b = ClueSet::parse(".....", "//l//", "p", &cache)?;

    let combined = a.combine(&b, &cache)?;

    assert_eq!(combined.key(), "a....|//l//|p");
    assert!(Arc::ptr_eq(&combined, &ClueSet::parse("a....", "//l//", "p", &cache)?));
    Ok(())
}

#[test]
fn combine_conflicting_positions_errors() -> Result<(), WordleError> {
    let cache = ClueCache::new();
    let a = ClueSet::parse("a....", "", "", &cache)?;
    let b = ClueSet::parse("b....", "", "", &cache)?;

    assert_matches!(a.combine(&b, &cache), Err(WordleError::InconsistentClues(_)));
    Ok(())
}

#[test]
fn same_knowledge_shares_instance() -> Result<(), WordleError> {
    let cache = ClueCache::new();

    let first = ClueSet::from_guess("abzzz", "abcde", &cache)?;
    let second = ClueSet::from_guess("abzzz", "abqrs", &cache)?;

    assert_eq!(first.key(), "ab...|////|z");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.stats().hits, 1);
    Ok(())
}

#[test]
fn update_matches_combine() -> Result<(), WordleError> {
    let cache = ClueCache::new();
    let clues = ClueSet::parse(".....", "", "z", &cache)?;

    let updated = clues.update("crane", "acorn", &cache)?;
    let combined = clues.combine(&*ClueSet::from_guess("crane", "acorn", &cache)?, &cache)?;

    assert!(Arc::ptr_eq(&updated, &combined));
    Ok(())
}

#[test]
fn value_of_guess_matches_hand_computation() -> Result<(), WordleError> {
    let cache = ClueCache::new();
    let bank = create_word_bank(&["abc", "abd", "abe", "afg"]);
    let clues = ClueSet::parse("a..", "", "", &cache)?;

    // Guessing "abc": "abd" and "abe" leave 2 words each, "afg" leaves 1.
    assert_eq!(clues.value_of_guess("abc", &bank, &cache)?, 0.6875);
    // Guessing "afg": "abc", "abd" and "abe" each leave 3 words.
    assert_eq!(clues.value_of_guess("afg", &bank, &cache)?, 0.4375);
    Ok(())
}

#[test]
fn value_of_guess_no_information() -> Result<(), WordleError> {
    let cache = ClueCache::new();
    let bank = create_word_bank(&["abc", "abd", "abe", "zzz"]);
    let clues = ClueSet::parse("a..", "", "", &cache)?;

    assert_eq!(clues.value_of_guess("zzz", &bank, &cache)?, 0.0);
    Ok(())
}

#[test]
fn from_guess_always_satisfied_by_objective() -> Result<(), WordleError> {
    let mut rng = StdRng::seed_from_u64(17);
    let words = random_words(&mut rng, 200);
    let cache = ClueCache::new();

    for _ in 0..500 {
        let guess = words.choose(&mut rng).unwrap();
        let objective = words.choose(&mut rng).unwrap();
        let clues = ClueSet::from_guess(guess, objective, &cache)?;
        assert!(
            clues.is_satisfied_by(objective),
            "{} -> {} gave {}",
            guess,
            objective,
            clues
        );
    }
    Ok(())
}

#[test]
fn count_words_agrees_with_get_words() -> Result<(), WordleError> {
    let mut rng = StdRng::seed_from_u64(23);
    let bank = WordBank::from_iterator(random_words(&mut rng, 300))?;

    for _ in 0..100 {
        let guess = bank.choose(&mut rng).unwrap();
        let objective = bank.choose(&mut rng).unwrap();
        // Separate caches, so neither result is remembered for the other.
        let counting_cache = ClueCache::new();
        let listing_cache = ClueCache::new();

        let counted = ClueSet::from_guess(guess, objective, &counting_cache)?.count_words(&bank);
        let listed = ClueSet::from_guess(guess, objective, &listing_cache)?
            .get_words(&bank)
            .len();

        assert_eq!(counted, listed);
    }
    Ok(())
}

#[test]
fn combine_only_narrows_possibilities() -> Result<(), WordleError> {
    let mut rng = StdRng::seed_from_u64(29);
    let bank = WordBank::from_iterator(random_words(&mut rng, 300))?;
    let cache = ClueCache::new();

    for _ in 0..100 {
        let objective = bank.choose(&mut rng).unwrap();
        let first = ClueSet::from_guess(bank.choose(&mut rng).unwrap(), objective, &cache)?;
        let second = ClueSet::from_guess(bank.choose(&mut rng).unwrap(), objective, &cache)?;

        let combined = first.combine(&second, &cache)?;

        assert!(combined.count_words(&bank) <= first.count_words(&bank));
        assert!(combined.count_words(&bank) <= second.count_words(&bank));
        assert!(combined.is_satisfied_by(objective));
    }
    Ok(())
}

#[test]
fn combine_is_commutative_and_associative() -> Result<(), WordleError> {
    let mut rng = StdRng::seed_from_u64(31);
    let words = random_words(&mut rng, 100);
    let cache = ClueCache::new();

    for _ in 0..100 {
        let objective = words.choose(&mut rng).unwrap();
        let mut next_clues = || {
            let guess = &words[rng.gen_range(0..words.len())];
            ClueSet::from_guess(guess, objective, &cache)
        };
        let a = next_clues()?;
        let b = next_clues()?;
        let c = next_clues()?;

        assert!(Arc::ptr_eq(&a.combine(&b, &cache)?, &b.combine(&a, &cache)?));
        assert!(Arc::ptr_eq(
            &a.combine(&b, &cache)?.combine(&c, &cache)?,
            &a.combine(&*b.combine(&c, &cache)?, &cache)?
        ));
    }
    Ok(())
}
