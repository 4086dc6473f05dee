/*! This library finds word rectangles, word lattices and word waffles: grids
 * where every row and column (or, for lattices and waffles, a structured
 * subset of cell positions) reads as a word from a dictionary.
 *
 * A dictionary of words is loaded into one [forward-linked trie](trie::Trie)
 * per word length by a [`TrieLoader`]. A [`SearchManager`] then fans
 * dimension-by-dimension searches for the requested puzzle
 * [`Variant`](config::Variant) across a worker pool, using the forward links
 * to backtrack without ever walking back up the trie, and prints every
 * rectangle it finds through an external [`Printer`] collaborator.
 *
 * ## Usage
 *
 * ```no_run
 * use wordrect::{dictionary, loader::TrieLoader, config::SearchConfig, printer::TextPrinter, SearchManager};
 *
 * let words = dictionary::read_words("words.txt").unwrap();
 * let loader = TrieLoader::new(2, 36, 1);
 * let tries = loader.load(words).unwrap();
 *
 * let config = SearchConfig::new().tall_range(4, 4).area_range(16, 16);
 * let printer = TextPrinter;
 * let manager = SearchManager::new(&tries, config, &printer);
 * manager.run().unwrap();
 * ```
 *
 * ## Concurrency
 *
 * Each worker owns a private [`RectFinder`]/[`LatticeFinder`]/[`WaffleFinder`]
 * and borrows the tries read-only; the only state shared across threads is a
 * monotonic "best area found" watermark and a couple of quota counters, both
 * plain atomics. See [`search_manager`] for the admission and cancellation
 * scheme.
 */

pub mod char_index;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod lattice_finder;
pub mod loader;
pub mod printer;
pub mod rect_finder;
pub mod search_manager;
pub mod trie;
pub mod waffle_finder;

#[doc(inline)]
pub use char_index::CharIndex;
#[doc(inline)]
pub use config::{SearchConfig, Snapshot, Variant};
#[doc(inline)]
pub use dictionary::read_words;
#[doc(inline)]
pub use error::WordRectError;
#[doc(inline)]
pub use lattice_finder::LatticeFinder;
#[doc(inline)]
pub use loader::TrieLoader;
#[doc(inline)]
pub use printer::{FoundRectangle, Printer, TextPrinter};
#[doc(inline)]
pub use rect_finder::{Rectangle, RectFinder};
#[doc(inline)]
pub use search_manager::{SearchManager, SearchOutcome};
#[doc(inline)]
pub use trie::{NodeId, Trie};
#[doc(inline)]
pub use waffle_finder::WaffleFinder;
