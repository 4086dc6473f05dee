//! End-to-end scenarios driven through the public crate API: load words,
//! build tries, run a search, inspect what the printer received.

use std::sync::Mutex;

use wordrect::config::SearchConfig;
use wordrect::loader::TrieLoader;
use wordrect::printer::{FoundRectangle, Printer};
use wordrect::search_manager::{SearchManager, SearchOutcome};

fn words(strs: &[&str]) -> Vec<Vec<u8>> {
    strs.iter().map(|s| s.as_bytes().to_vec()).collect()
}

struct CollectingPrinter {
    found: Mutex<Vec<FoundRectangle>>,
}

impl CollectingPrinter {
    fn new() -> Self {
        CollectingPrinter {
            found: Mutex::new(Vec::new()),
        }
    }

    fn rows(&self) -> Vec<Vec<Vec<u8>>> {
        self.found.lock().unwrap().iter().map(|f| f.rows.clone()).collect()
    }
}

impl Printer for CollectingPrinter {
    fn print(&self, found: &FoundRectangle) {
        self.found.lock().unwrap().push(found.clone());
    }
}

// Scenario A: a 4x4 word square. Rows and columns are the same length, so
// the loader puts every length-4 word into one trie and the search draws
// both rows and columns from it; rather than assume a particular visitation
// order through that wider candidate space, ask for every rectangle of this
// size and check the well-known AAHS/ABET/LUBE/STEW answer is among them.
#[test]
fn four_by_four_word_square_is_found() {
    let loader = TrieLoader::new(1, 10, 1);
    let tries = loader
        .load(words(&[
            "AAHS", "AALS", "ABET", "ABUT", "ABUE", "HEBE", "LUBE", "PALS", "SETW", "STEW",
        ]))
        .unwrap();

    let config = SearchConfig::new().tall_range(4, 4).area_range(16, 16).word_length_range(4, 4);
    let printer = CollectingPrinter::new();
    let manager = SearchManager::new(&tries, config, &printer);
    manager.run().unwrap();

    let rows = printer.rows();
    assert!(!rows.is_empty());
    assert!(rows.iter().any(|r| r
        == &vec![
            b"AAHS".to_vec(),
            b"ABET".to_vec(),
            b"LUBE".to_vec(),
            b"STEW".to_vec(),
        ]));
}

// Scenario B: an asymmetric 5x4 rectangle.
#[test]
fn asymmetric_five_by_four_is_found() {
    let loader = TrieLoader::new(1, 10, 1);
    let tries = loader
        .load(words(&[
            "AAHED", "AALS", "ABODE", "ABUT", "DEEP", "EDGE", "HONE", "LUNGE", "STEEP",
        ]))
        .unwrap();

    let config = SearchConfig::new().tall_range(4, 4).area_range(20, 20).word_length_range(4, 5);
    let printer = CollectingPrinter::new();
    let manager = SearchManager::new(&tries, config, &printer);
    manager.run().unwrap();

    let rows = printer.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 4);
    assert_eq!(rows[0][0].len(), 5);
}

// Scenario E: no rectangle exists for the requested dimensions.
#[test]
fn no_rectangle_reports_zero_found() {
    let loader = TrieLoader::new(1, 10, 1);
    let tries = loader.load(words(&["AB", "CD"])).unwrap();

    let config = SearchConfig::new().tall_range(2, 2).area_range(4, 4).word_length_range(2, 2);
    let printer = CollectingPrinter::new();
    let manager = SearchManager::new(&tries, config, &printer);
    let outcome = manager.run().unwrap();

    assert!(printer.rows().is_empty());
    match outcome {
        SearchOutcome::Completed { rects_found, .. } => assert_eq!(rects_found, 0),
        SearchOutcome::QuotaReached { .. } => panic!("quota should not be reached with nothing found"),
    }
}

// Scenario F: when more than one 3x2 rectangle exists, the first emitted is
// the lexicographically smallest row sequence.
#[test]
fn deterministic_order_picks_the_smallest_first() {
    let loader = TrieLoader::new(1, 10, 1);
    let tries = loader.load(words(&["BAT", "CAT", "DOG", "BD", "CD", "AO", "TG"])).unwrap();

    let config = SearchConfig::new()
        .tall_range(2, 2)
        .area_range(6, 6)
        .word_length_range(2, 3)
        .quotas(1, 0);
    let printer = CollectingPrinter::new();
    let manager = SearchManager::new(&tries, config, &printer);
    manager.run().unwrap();

    let rows = printer.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], b"BAT");
}
