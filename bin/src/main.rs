use anyhow::Context;
use clap::Parser;
use rs_wordle_advisor::*;
use std::fs::File;
use std::io;
use std::process::ExitCode;
use std::time::Duration;

/// Exit status used when the time limit is exceeded before a guess is found.
const TIMED_OUT_EXIT_CODE: u8 = 3;

/// Recommends the guess that is expected to eliminate the most remaining words in a Wordle game.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Known letters by location, with '.' for unknown locations, e.g. "a...e".
    positional: String,

    /// Letters in the word but not at a location, as one '/'-separated segment per location,
    /// e.g. "//l//". Leave empty if there are none.
    #[arg(default_value = "")]
    misplaced: String,

    /// Letters that are not in the word, e.g. "pqz".
    #[arg(default_value = "")]
    excluded: String,

    /// Path to a file that contains a list of possible words, with one word on each line.
    #[arg(short = 'f', long, default_value = "words")]
    words_file: String,

    /// Give up after this many seconds.
    #[arg(short, long)]
    time_limit: Option<f64>,

    /// Print the remaining possible words if there are at most this many.
    #[arg(long, default_value_t = 10)]
    show_limit: usize,

    /// If at most this many words are possible, list them instead of searching for a guess.
    #[arg(long, default_value_t = 2)]
    answer_threshold: usize,

    /// Score guesses on all available cores.
    #[arg(short, long)]
    parallel: bool,

    /// Print clue cache statistics when done.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    println!("Wordle Advisor");

    let words_reader = io::BufReader::new(
        File::open(&args.words_file)
            .with_context(|| format!("unable to open words file {}", args.words_file))?,
    );
    let word_bank = WordBank::from_reader(words_reader)
        .with_context(|| format!("unable to load words from {}", args.words_file))?;

    let cache = ClueCache::new();
    let clues = ClueSet::parse_for_length(
        &args.positional,
        &args.misplaced,
        &args.excluded,
        word_bank.word_length(),
        &cache,
    )?;
    println!("Clues: {}", clues);

    let possibilities = clues.get_words(&word_bank);
    println!("There are {} possibilities left", possibilities.len());
    if possibilities.len() <= args.show_limit {
        for word in possibilities {
            println!("\t{}", word);
        }
    }

    let time_limit = args
        .time_limit
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("time limit must be a non-negative number of seconds")?;
    let options = SearchOptions {
        time_limit,
        answer_threshold: args.answer_threshold,
        parallel: args.parallel,
    };
    let advisor = GuessAdvisor::new(&word_bank, &cache, options);
    let advice = advisor.advise(&clues, |scored| {
        println!(
            "...Found {}:{:.1}% ({:.1} seconds, ~{:.1} total)",
            scored.guess,
            scored.value * 100.0,
            scored.elapsed.as_secs_f64(),
            scored.estimated_total.as_secs_f64()
        )
    })?;

    let exit_code = match advice {
        Advice::NoPossibilities => {
            println!("No words match these clues.");
            ExitCode::SUCCESS
        }
        Advice::FewPossibilities(words) => {
            println!("The word must be one of: {}", words.join(", "));
            ExitCode::SUCCESS
        }
        Advice::Guess(best) => {
            println!(
                "If you guess '{}' you'll eliminate {:.1}%. ({:.1} seconds)",
                best.guess,
                best.value * 100.0,
                best.elapsed.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Advice::TimedOut {
            evaluated, total, ..
        } => {
            eprintln!(
                "Time limit of {:.1}s exceeded after {} of {} guesses.",
                args.time_limit.unwrap_or_default(),
                evaluated,
                total
            );
            ExitCode::from(TIMED_OUT_EXIT_CODE)
        }
    };

    if args.verbose {
        let stats = cache.stats();
        println!(
            "Clue cache: {} hits, {} misses, {} clue sets",
            stats.hits, stats.misses, stats.size
        );
    }

    Ok(exit_code)
}
