//! Builds one [`Trie`](crate::trie::Trie) per observed word length from a
//! sorted dictionary stream.

use std::collections::BTreeMap;

use crate::char_index::CharIndex;
use crate::error::WordRectError;
use crate::trie::Trie;

/// Consumes an ordered `(word, length)` stream — see spec §6 for the exact
/// dictionary contract the caller is expected to uphold — and builds one
/// [`Trie`] per word length in `[min_word_length, max_word_length]`.
///
/// Building the per-length `CharIndex`es requires a full byte histogram, so
/// the loader buffers every accepted word up front (grouped by length) and
/// only begins inserting once every length's histogram is known. This
/// mirrors the two-pass nature of the original loader: a counting pass,
/// then a sorted-insert pass.
pub struct TrieLoader {
    min_word_length: usize,
    max_word_length: usize,
    min_count: usize,
}

impl TrieLoader {
    pub fn new(min_word_length: usize, max_word_length: usize, min_count: usize) -> Self {
        TrieLoader {
            min_word_length,
            max_word_length,
            min_count,
        }
    }

    /// Builds one trie per length that had at least one accepted word.
    /// `words` must already be sorted in ascending byte order, as spec §6
    /// requires of the dictionary; this is not the loader's job to verify
    /// beyond what `Trie::insert`'s ordering check catches per length.
    pub fn load<I>(&self, words: I) -> Result<BTreeMap<usize, Trie>, WordRectError>
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut by_length: BTreeMap<usize, Vec<Vec<u8>>> = BTreeMap::new();

        for word in words {
            let len = word.len();
            if len < self.min_word_length || len > self.max_word_length {
                continue;
            }
            by_length.entry(len).or_default().push(word);
        }

        if by_length.is_empty() {
            return Err(WordRectError::NoWordsInLengthRange {
                min: self.min_word_length,
                max: self.max_word_length,
            });
        }

        let mut tries = BTreeMap::new();
        for (len, words) in by_length {
            log::debug!("building trie for word length {len} ({} words)", words.len());

            let mut counts = [0usize; 256];
            for word in &words {
                for &b in word {
                    counts[b as usize] += 1;
                }
            }
            let char_index = CharIndex::from_histogram(&counts, self.min_count);

            let mut trie = Trie::new(len, char_index);
            for word in &words {
                // spec §6: a byte mapped to the unmapped sentinel (below
                // this length's min_count threshold) rejects the entire
                // line, rather than being inserted out of bounds.
                if word.iter().any(|&b| !trie.char_index().is_mapped(b)) {
                    log::debug!(
                        "dropping word {:?}: contains a byte below min_count",
                        String::from_utf8_lossy(word)
                    );
                    continue;
                }
                trie.insert(word)?;
            }
            tries.insert(len, trie);
        }

        log::info!("loaded {} tries spanning lengths {}..={}",
            tries.len(), self.min_word_length, self.max_word_length);

        Ok(tries)
    }
}
