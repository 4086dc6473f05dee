//! Reads a dictionary file into the sorted stream of words the loader
//! expects (spec §6's external dictionary contract): one word per line, a
//! word being the maximal prefix of bytes strictly greater than the space
//! byte (`0x20`). Lines are split on `\n` the way `genedex`'s own
//! construction code scans for sentinel bytes, via `memchr::memchr_iter`,
//! rather than the line-by-line syscalls of `BufRead::lines`.

use std::fs;
use std::path::Path;

use crate::error::WordRectError;

/// Reads every word from `path`, in file order. Does not sort or
/// deduplicate: the caller (ultimately [`Trie::insert`](crate::trie::Trie::insert))
/// is the final arbiter of whether the input was in fact sorted.
pub fn read_words(path: impl AsRef<Path>) -> Result<Vec<Vec<u8>>, WordRectError> {
    let path = path.as_ref();
    let contents = fs::read(path).map_err(|source| WordRectError::DictionaryNotOpenable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut words = Vec::new();
    let mut start = 0usize;
    for newline in memchr::memchr_iter(b'\n', &contents) {
        if let Some(word) = word_in_line(&contents[start..newline]) {
            words.push(word.to_vec());
        }
        start = newline + 1;
    }
    if let Some(word) = word_in_line(&contents[start..]) {
        words.push(word.to_vec());
    }

    Ok(words)
}

// The maximal prefix of `line` consisting of bytes > 0x20, or None if the
// line carries no word (empty, or a trailing blank line).
fn word_in_line(line: &[u8]) -> Option<&[u8]> {
    let end = line.iter().position(|&b| b <= 0x20).unwrap_or(line.len());
    if end == 0 {
        None
    } else {
        Some(&line[..end])
    }
}
