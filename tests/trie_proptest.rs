//! Property-based and seeded-fuzz checks of the trie's forward-link
//! invariants, in the style of the teacher's `tests/fmindex.rs`: a
//! `proptest!` block for small generated cases, plus a `rand_chacha`-seeded
//! test that inserts a large random dictionary and checks every node.

use std::collections::BTreeSet;

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use wordrect::char_index::CharIndex;
use wordrect::trie::Trie;

const ALPHABET: &[u8] = b"ABC";
const FUZZ_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn build_trie(word_length: usize, words: &BTreeSet<Vec<u8>>) -> Trie {
    let mut counts = [0usize; 256];
    for word in words {
        for &b in word {
            counts[b as usize] += 1;
        }
    }
    let char_index = CharIndex::from_histogram(&counts, 1);
    let mut trie = Trie::new(word_length, char_index);
    for word in words {
        trie.insert(word).expect("words are inserted in ascending order");
    }
    trie
}

fn random_word(rng: &mut impl Rng, length: usize) -> Vec<u8> {
    (0..length).map(|_| *FUZZ_ALPHABET.choose(rng).unwrap()).collect()
}

// Every node's `first_word` is the lexicographically smallest word at or
// below it, and walking `next_stem` from the trie's first word visits every
// inserted word in strictly ascending order with no gaps or repeats.
fn check_invariants(trie: &Trie, expected: &[Vec<u8>]) {
    assert_eq!(trie.words_in_order().as_slice(), expected);

    let mut previous: Option<Vec<u8>> = None;
    let mut current = trie.first_word();
    let mut visited = 0;
    while let Some(node) = current {
        let word = trie.stem(node).to_vec();
        if let Some(prev) = &previous {
            assert!(prev < &word, "next_stem must strictly increase: {prev:?} -> {word:?}");
        }
        assert!(trie.contains(&word));
        previous = Some(word);
        visited += 1;
        current = trie.next_stem(node);
    }
    assert_eq!(visited, expected.len());

    for word in expected {
        assert!(trie.contains(word));
    }
}

fn word_sets() -> impl Strategy<Value = (usize, Vec<Vec<u8>>)> {
    (1usize..4).prop_flat_map(|word_length| {
        let word = prop_vec(0u8..3, word_length).prop_map(|digits| {
            digits.into_iter().map(|d| ALPHABET[d as usize]).collect::<Vec<u8>>()
        });
        (Just(word_length), prop_vec(word, 0..40))
    })
}

proptest! {
    #[test]
    fn arbitrary_word_sets_preserve_order_and_lookup((word_length, raw_words) in word_sets()) {
        let words: BTreeSet<Vec<u8>> = raw_words.into_iter().collect();
        if words.is_empty() {
            return Ok(());
        }

        let trie = build_trie(word_length, &words);
        let expected: Vec<Vec<u8>> = words.into_iter().collect();
        check_invariants(&trie, &expected);
    }
}

#[test]
fn large_random_dictionary_satisfies_trie_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5747_4f52_4453_4551);
    let word_length = 5;
    let mut words = BTreeSet::new();
    while words.len() < 500 {
        words.insert(random_word(&mut rng, word_length));
    }

    let trie = build_trie(word_length, &words);
    let expected: Vec<Vec<u8>> = words.into_iter().collect();
    check_invariants(&trie, &expected);

    // A handful of never-inserted words must be reported absent.
    let mut misses_checked = 0;
    for _ in 0..50 {
        let candidate = random_word(&mut rng, word_length);
        if !trie.contains(&candidate) {
            misses_checked += 1;
        }
    }
    assert!(misses_checked > 0, "expected at least one genuine miss out of 50 random words");
}
