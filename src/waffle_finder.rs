//! Word-waffle variant: even rows (`W` letters) and even columns (`H`
//! letters) are full words; odd rows (`⌈W/2⌉` letters) and odd columns
//! (`⌈H/2⌉` letters) are shorter words that only ever touch even indices of
//! the other axis. A cell is blank only where both its row and column
//! index are odd.
//!
//! Four tries drive the search: `row_full`/`col_full` at the full lengths,
//! and `row_half`/`col_half` at the half lengths. An even grid column is
//! tracked against `col_full` on *every* row (odd rows advance it without
//! validating a row word of their own); an odd grid column is tracked
//! against `col_half`, but only ever advances on even rows, since odd rows
//! have no letter there at all.
//!
//! Unlike the source implementation's partial-resume optimization on
//! row-retry, every candidate here revalidates columns from its row's own
//! `start_col`/`start_k` only (same as [`RectFinder`](crate::rect_finder::RectFinder)) —
//! no attempt is made to reuse column state across a failed *and* a
//! recursively-failed deeper row beyond what the forward links already
//! give for free.

use crate::rect_finder::{Rectangle, ABORT_SENTINEL};
use crate::trie::{NodeId, Trie};

pub struct WaffleFinder<'a> {
    row_full_trie: &'a Trie,
    col_full_trie: &'a Trie,
    row_half_trie: &'a Trie,
    col_half_trie: &'a Trie,
    width: usize,
    height: usize,
    odd_wide: usize,
    odd_tall: usize,
    // col_full_nodes[c][r + 1]: state of column c's full-length word after
    // matching rows 0..=r. Only even c is ever written or read.
    col_full_nodes: Vec<Vec<NodeId>>,
    // col_half_nodes[c][k + 1]: state of column c's half-length word after
    // its k-th touch (k == r / 2 for the even row r that touched it). Only
    // odd c is ever written or read.
    col_half_nodes: Vec<Vec<NodeId>>,
    row_words: Vec<Vec<u8>>,
    rects_found: usize,
}

impl<'a> WaffleFinder<'a> {
    /// `None` if the half-tries' lengths don't match `⌈W/2⌉`/`⌈H/2⌉` as
    /// implied by the full tries' lengths.
    pub fn new(
        row_full_trie: &'a Trie,
        col_full_trie: &'a Trie,
        row_half_trie: &'a Trie,
        col_half_trie: &'a Trie,
    ) -> Option<Self> {
        let width = row_full_trie.word_length();
        let height = col_full_trie.word_length();
        let odd_wide = width.div_ceil(2);
        let odd_tall = height.div_ceil(2);
        if row_half_trie.word_length() != odd_wide || col_half_trie.word_length() != odd_tall {
            return None;
        }

        let col_full_root = col_full_trie.root();
        let col_half_root = col_half_trie.root();
        Some(WaffleFinder {
            row_full_trie,
            col_full_trie,
            row_half_trie,
            col_half_trie,
            width,
            height,
            odd_wide,
            odd_tall,
            col_full_nodes: vec![vec![col_full_root; height + 1]; width.max(1)],
            col_half_nodes: vec![vec![col_half_root; odd_tall + 1]; width.max(1)],
            row_words: vec![Vec::new(); height],
            rects_found: 0,
        })
    }

    pub fn rects_found(&self) -> usize {
        self.rects_found
    }

    pub fn run(
        &mut self,
        quota: usize,
        should_abort: &mut dyn FnMut() -> bool,
        emit: &mut dyn FnMut(Rectangle),
    ) -> i64 {
        if self.width == 0 || self.height == 0 {
            return 0;
        }
        self.search_row(0, quota, should_abort, emit)
    }

    fn search_row(
        &mut self,
        r: usize,
        quota: usize,
        should_abort: &mut dyn FnMut() -> bool,
        emit: &mut dyn FnMut(Rectangle),
    ) -> i64 {
        if r % 2 == 0 {
            self.search_even_row(r, quota, should_abort, emit)
        } else {
            self.search_odd_row(r, quota, should_abort, emit)
        }
    }

    // column 0's forced-letter rule: column 0 is always an even (full) grid
    // column, so it always comes from col_full regardless of which row is
    // being placed.
    fn forced_col0_byte(&self, r: usize) -> u8 {
        let state = self.col_full_nodes[0][r];
        let word = self
            .col_full_trie
            .first_word_of(state)
            .expect("every internal node has a descendant word in a non-empty trie");
        self.col_full_trie.stem(word)[r]
    }

    fn search_even_row(
        &mut self,
        r: usize,
        quota: usize,
        should_abort: &mut dyn FnMut() -> bool,
        emit: &mut dyn FnMut(Rectangle),
    ) -> i64 {
        if r >= 1 && should_abort() {
            return ABORT_SENTINEL;
        }

        let mut candidate = if r == 0 {
            self.row_full_trie.first_word()
        } else {
            let forced_byte = self.forced_col0_byte(r);
            let idx = self.row_full_trie.char_index().index(forced_byte);
            self.row_full_trie.first_word_from_index(idx)
        };

        let mut start_col = 0usize;
        let mut row_nodes = vec![self.row_full_trie.root(); self.width + 1];

        loop {
            let Some(candidate_node) = candidate else {
                return 0;
            };

            let word = self.row_full_trie.stem(candidate_node).to_vec();
            let mut failure_col = None;

            for c in start_col..self.width {
                let idx = self.row_full_trie.char_index().index(word[c]);
                let rn = self
                    .row_full_trie
                    .branch_at_index(row_nodes[c], idx)
                    .expect("candidate word must exist along the row-trie path");
                row_nodes[c + 1] = rn;

                if c % 2 == 0 {
                    let prev_col = self.col_full_nodes[c][r];
                    let col_idx = self.col_full_trie.char_index().index(word[c]);
                    match self.col_full_trie.branch_at_index(prev_col, col_idx) {
                        Some(col_node) => self.col_full_nodes[c][r + 1] = col_node,
                        None => {
                            failure_col = Some(c);
                            break;
                        }
                    }
                } else {
                    let half_k = r / 2;
                    let prev_col = self.col_half_nodes[c][half_k];
                    let col_idx = self.col_half_trie.char_index().index(word[c]);
                    match self.col_half_trie.branch_at_index(prev_col, col_idx) {
                        Some(col_node) => self.col_half_nodes[c][half_k + 1] = col_node,
                        None => {
                            failure_col = Some(c);
                            break;
                        }
                    }
                }
            }

            let advance_col = match failure_col {
                Some(c) => c,
                None => {
                    self.row_words[r] = word.clone();
                    if r == self.height - 1 {
                        self.rects_found += 1;
                        emit(Rectangle {
                            width: self.width,
                            height: self.height,
                            rows: self.row_words.clone(),
                            is_symmetric_square: false,
                        });
                        if self.rects_found >= quota {
                            return (self.width * self.height) as i64;
                        }
                        self.width - 1
                    } else {
                        let sub = self.search_row(r + 1, quota, should_abort, emit);
                        if sub != 0 {
                            return sub;
                        }
                        self.width - 1
                    }
                }
            };

            let failed_node = row_nodes[advance_col + 1];
            match self.row_full_trie.next_stem(failed_node) {
                None => return 0,
                Some(next) => {
                    start_col = self.row_full_trie.depth(next) - 1;
                    candidate = self.row_full_trie.first_word_of(next);
                }
            }
        }
    }

    fn search_odd_row(
        &mut self,
        r: usize,
        quota: usize,
        should_abort: &mut dyn FnMut() -> bool,
        emit: &mut dyn FnMut(Rectangle),
    ) -> i64 {
        if should_abort() {
            return ABORT_SENTINEL;
        }

        let forced_byte = self.forced_col0_byte(r);
        let idx = self.row_half_trie.char_index().index(forced_byte);
        let mut candidate = self.row_half_trie.first_word_from_index(idx);

        let mut start_k = 0usize;
        let mut row_nodes = vec![self.row_half_trie.root(); self.odd_wide + 1];

        loop {
            let Some(candidate_node) = candidate else {
                return 0;
            };

            let half_word = self.row_half_trie.stem(candidate_node).to_vec();
            let mut failure_k = None;

            for k in start_k..self.odd_wide {
                let c = 2 * k;
                let idx = self.row_half_trie.char_index().index(half_word[k]);
                let rn = self
                    .row_half_trie
                    .branch_at_index(row_nodes[k], idx)
                    .expect("candidate word must exist along the row-trie path");
                row_nodes[k + 1] = rn;

                let prev_col = self.col_full_nodes[c][r];
                let col_idx = self.col_full_trie.char_index().index(half_word[k]);
                match self.col_full_trie.branch_at_index(prev_col, col_idx) {
                    Some(col_node) => self.col_full_nodes[c][r + 1] = col_node,
                    None => {
                        failure_k = Some(k);
                        break;
                    }
                }
            }

            let advance_k = match failure_k {
                Some(k) => k,
                None => {
                    let mut full = vec![b' '; self.width];
                    for (k, &b) in half_word.iter().enumerate() {
                        full[2 * k] = b;
                    }
                    self.row_words[r] = full;

                    if r == self.height - 1 {
                        self.rects_found += 1;
                        emit(Rectangle {
                            width: self.width,
                            height: self.height,
                            rows: self.row_words.clone(),
                            is_symmetric_square: false,
                        });
                        if self.rects_found >= quota {
                            return (self.width * self.height) as i64;
                        }
                        self.odd_wide - 1
                    } else {
                        let sub = self.search_row(r + 1, quota, should_abort, emit);
                        if sub != 0 {
                            return sub;
                        }
                        self.odd_wide - 1
                    }
                }
            };

            let failed_node = row_nodes[advance_k + 1];
            match self.row_half_trie.next_stem(failed_node) {
                None => return 0,
                Some(next) => {
                    start_k = self.row_half_trie.depth(next) - 1;
                    candidate = self.row_half_trie.first_word_of(next);
                }
            }
        }
    }
}
