//! Command-line front end: loads a dictionary, builds tries, and runs a
//! [`SearchManager`] against them, printing every rectangle it finds.
//!
//! Recovered from `wordRectMain.cpp`'s `getopt`-style flag loop, expressed
//! with `clap`'s derive API the way `examples/dfgordon-retrocompressor`
//! parses its own subcommands.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use wordrect::config::{SearchConfig, Variant};
use wordrect::dictionary;
use wordrect::loader::TrieLoader;
use wordrect::printer::TextPrinter;
use wordrect::search_manager::{SearchManager, SearchOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Rectangle,
    Lattice,
    Waffle,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Rectangle => Variant::Rectangle,
            VariantArg::Lattice => Variant::Lattice,
            VariantArg::Waffle => Variant::Waffle,
        }
    }
}

/// Find word rectangles, lattices and waffles in a dictionary.
#[derive(Debug, Parser)]
#[command(name = "wordrect", version, about)]
struct Cli {
    /// Dictionary file, one word per line.
    #[arg(short = 'd', long)]
    dictionary: PathBuf,

    /// Minimum total grid area to search.
    #[arg(default_value_t = 4)]
    min_area: usize,
    /// Minimum grid height.
    #[arg(default_value_t = 2)]
    min_tall: usize,
    /// Maximum grid height.
    #[arg(default_value_t = 48)]
    max_tall: usize,
    /// Maximum total grid area to search.
    #[arg(default_value_t = 48 * 48)]
    max_area: usize,
    /// Minimum occurrence count for a byte to get its own `CharIndex` slot.
    #[arg(default_value_t = 100)]
    min_char_count: usize,
    /// Rectangles to emit per `(W, H)` size, 0 for unbounded.
    #[arg(default_value_t = 1)]
    per_size_quota: usize,
    /// Rectangles to emit across the whole run, 0 for unbounded.
    #[arg(default_value_t = 0)]
    total_quota: usize,

    /// Puzzle variant to search for.
    #[arg(long, value_enum, default_value_t = VariantArg::Rectangle)]
    variant: VariantArg,

    /// Enumerate sizes smallest-area-first instead of largest-first.
    #[arg(short = 'i', long)]
    ascending: bool,

    /// Restrict the search to odd widths and heights (implied by lattice/waffle).
    #[arg(short = 'o', long)]
    odd_dimensions_only: bool,

    /// Do not abort a size's search merely because a larger rectangle was
    /// already found elsewhere.
    #[arg(short = 'e', long)]
    find_all_sizes: bool,

    /// Run with a single worker thread instead of a pool.
    #[arg(short = 's', long)]
    single_threaded: bool,

    /// Shortest word length loaded from the dictionary.
    #[arg(long, default_value_t = 2)]
    min_word_length: usize,
    /// Longest word length loaded from the dictionary.
    #[arg(long, default_value_t = 36)]
    max_word_length: usize,

    /// Print a progress line as sizes complete. Repeat for more detail.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Suppress the final summary line.
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.max_word_length < cli.min_word_length {
        eprintln!(
            "error: max-word-length ({}) is less than min-word-length ({})",
            cli.max_word_length, cli.min_word_length
        );
        return ExitCode::FAILURE;
    }

    let words = match dictionary::read_words(&cli.dictionary) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if words.is_empty() {
        eprintln!("error: no words loaded from {}", cli.dictionary.display());
        return ExitCode::FAILURE;
    }

    let loader = TrieLoader::new(cli.min_word_length, cli.max_word_length, cli.min_char_count);
    let tries = match loader.load(words) {
        Ok(tries) => tries,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let verbose = cli.verbose;
    let mut config = SearchConfig::new()
        .tall_range(cli.min_tall, cli.max_tall)
        .area_range(cli.min_area, cli.max_area)
        .word_length_range(cli.min_word_length, cli.max_word_length)
        .min_char_count(cli.min_char_count)
        .quotas(cli.per_size_quota, cli.total_quota)
        .ascending(cli.ascending)
        .variant(cli.variant.into())
        .odd_dimensions_only(cli.odd_dimensions_only || cli.variant != VariantArg::Rectangle)
        .abort_if_trumped(!cli.find_all_sizes);

    if cli.single_threaded {
        config = config.worker_count(1);
    }
    if verbose > 0 {
        config = config.on_progress(move |snapshot| {
            eprintln!(
                "progress: {}/{} sizes searched, {} rectangle(s) found ({} symmetric square(s)), best area {}",
                snapshot.sizes_completed,
                snapshot.sizes_total,
                snapshot.rects_found_total,
                snapshot.symmetric_squares_found,
                snapshot.best_area,
            );
        });
    }

    let printer = TextPrinter;
    let manager = SearchManager::new(&tries, config, &printer);
    match manager.run() {
        Ok(outcome) => {
            if !cli.quiet {
                match outcome {
                    SearchOutcome::Completed {
                        rects_found,
                        best_area,
                        symmetric_squares_found,
                    } => {
                        eprintln!(
                            "search complete: {rects_found} rectangle(s) ({symmetric_squares_found} symmetric square(s)), best area {best_area}"
                        );
                    }
                    SearchOutcome::QuotaReached {
                        rects_found,
                        best_area,
                        symmetric_squares_found,
                    } => {
                        eprintln!(
                            "quota reached: {rects_found} rectangle(s) ({symmetric_squares_found} symmetric square(s)), best area {best_area}"
                        );
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
