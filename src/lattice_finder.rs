//! Word-lattice variant: only even rows and even columns are full words;
//! a cell is blank only where both its row and column index are odd. Both
//! dimensions must be odd.

use crate::rect_finder::{Rectangle, ABORT_SENTINEL};
use crate::trie::{NodeId, Trie};

/// Depth-first search over a lattice of odd `width × height`. Even rows
/// are validated against the tries exactly like [`RectFinder`](crate::rect_finder::RectFinder);
/// between two even rows, the odd row's letter at each even column is
/// chosen by backtracking over that column's branches (there is no
/// guarantee the first branch leads anywhere — unlike `first_word`,
/// `first_branch` alone gives no completion guarantee), independently per
/// column since odd-row letters at different columns don't interact.
pub struct LatticeFinder<'a> {
    row_trie: &'a Trie,
    col_trie: &'a Trie,
    width: usize,
    height: usize,
    // row_nodes[r][c + 1]: row-trie node after matching columns 0..=c of even row r.
    row_nodes: Vec<Vec<NodeId>>,
    // col_nodes[c][r + 1]: column-trie node after matching rows 0..=r of column c
    // (r ranges over both even and odd rows).
    col_nodes: Vec<Vec<NodeId>>,
    rects_found: usize,
}

impl<'a> LatticeFinder<'a> {
    pub fn new(row_trie: &'a Trie, col_trie: &'a Trie) -> Option<Self> {
        let width = row_trie.word_length();
        let height = col_trie.word_length();
        if width % 2 == 0 || height % 2 == 0 {
            return None;
        }

        let row_root = row_trie.root();
        let col_root = col_trie.root();
        Some(LatticeFinder {
            row_trie,
            col_trie,
            width,
            height,
            row_nodes: vec![vec![row_root; width + 1]; height],
            col_nodes: vec![vec![col_root; height + 1]; width],
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
        self.search_even_row(0, quota, should_abort, emit)
    }

    fn search_even_row(
        &mut self,
        r: usize,
        quota: usize,
        should_abort: &mut dyn FnMut() -> bool,
        emit: &mut dyn FnMut(Rectangle),
    ) -> i64 {
        if r > 0 && should_abort() {
            return ABORT_SENTINEL;
        }

        let mut candidate = if r == 0 {
            self.row_trie.first_word()
        } else {
            let col0_state = self.col_nodes[0][r];
            let col0_word = self
                .col_trie
                .first_word_of(col0_state)
                .expect("every internal node has a descendant word in a non-empty trie");
            let forced_byte = self.col_trie.stem(col0_word)[r];
            let forced_idx = self.row_trie.char_index().index(forced_byte);
            self.row_trie.first_word_from_index(forced_idx)
        };

        let mut start_col = 0usize;

        loop {
            let Some(candidate_node) = candidate else {
                return 0;
            };

            let word = self.row_trie.stem(candidate_node).to_vec();
            let mut failure_col = None;

            for c in start_col..self.width {
                let idx = self.row_trie.char_index().index(word[c]);
                let prev_row_node = self.row_nodes[r][c];
                let row_node = self
                    .row_trie
                    .branch_at_index(prev_row_node, idx)
                    .expect("candidate word must exist along the row-trie path");
                self.row_nodes[r][c + 1] = row_node;

                if c % 2 == 0 {
                    let col_idx = self.col_trie.char_index().index(word[c]);
                    let prev_col_node = self.col_nodes[c][r];
                    match self.col_trie.branch_at_index(prev_col_node, col_idx) {
                        Some(col_node) => self.col_nodes[c][r + 1] = col_node,
                        None => {
                            failure_col = Some(c);
                            break;
                        }
                    }
                }
            }

            let advance_col = match failure_col {
                Some(c) => c,
                None if r == self.height - 1 => {
                    self.rects_found += 1;
                    let rows = self.build_rows(r, &word);
                    emit(Rectangle {
                        width: self.width,
                        height: self.height,
                        rows,
                        is_symmetric_square: false,
                    });
                    if self.rects_found >= quota {
                        return (self.width * self.height) as i64;
                    }
                    self.width - 1
                }
                None => {
                    let sub = self.search_odd_columns(r, 0, quota, should_abort, emit);
                    if sub != 0 {
                        return sub;
                    }
                    self.width - 1
                }
            };

            let failed_node = self.row_nodes[r][advance_col + 1];
            match self.row_trie.next_stem(failed_node) {
                None => return 0,
                Some(next) => {
                    start_col = self.row_trie.depth(next) - 1;
                    candidate = self.row_trie.first_word_of(next);
                }
            }
        }
    }

    // Reconstructs every row, including the odd ones: even rows are the
    // dictionary word matched against the row-trie, odd rows have a real
    // letter (chosen during `search_odd_columns`) at even columns and a
    // blank at odd columns, since (odd row, odd column) is the lattice's
    // only unconstrained, unoccupied cell type.
    fn build_rows(&self, final_row: usize, final_word: &[u8]) -> Vec<Vec<u8>> {
        (0..self.height)
            .map(|rr| {
                if rr % 2 == 0 {
                    if rr == final_row {
                        final_word.to_vec()
                    } else {
                        self.row_trie.stem(self.row_nodes[rr][self.width]).to_vec()
                    }
                } else {
                    (0..self.width)
                        .map(|c| {
                            if c % 2 == 0 {
                                self.col_trie.edge_byte(self.col_nodes[c][rr + 1])
                            } else {
                                b' '
                            }
                        })
                        .collect()
                }
            })
            .collect()
    }

    // Backtracks over every even column's odd-row letter independently,
    // then (once all are chosen) tries to place the next even row.
    fn search_odd_columns(
        &mut self,
        row: usize,
        col: usize,
        quota: usize,
        should_abort: &mut dyn FnMut() -> bool,
        emit: &mut dyn FnMut(Rectangle),
    ) -> i64 {
        if col >= self.width {
            return self.search_even_row(row + 2, quota, should_abort, emit);
        }

        let state = self.col_nodes[col][row + 1];
        let mut branch = self.col_trie.first_branch_of(state);
        while let Some(child) = branch {
            self.col_nodes[col][row + 2] = child;
            let area = self.search_odd_columns(row, col + 2, quota, should_abort, emit);
            if area != 0 {
                return area;
            }
            branch = self.col_trie.next_branch_of(child);
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::char_index::CharIndex;

    fn trie_of(words: &[&str]) -> Trie {
        let mut counts = [0usize; 256];
        for w in words {
            for &b in w.as_bytes() {
                counts[b as usize] += 1;
            }
        }
        let char_index = CharIndex::from_histogram(&counts, 1);
        let len = words[0].len();
        let mut trie = Trie::new(len, char_index);
        let mut sorted: Vec<&&str> = words.iter().collect();
        sorted.sort();
        for w in sorted {
            trie.insert(w.as_bytes()).unwrap();
        }
        trie
    }

    #[test]
    fn rejects_even_dimensions() {
        let trie = trie_of(&["AB", "CD"]);
        assert!(LatticeFinder::new(&trie, &trie).is_none());
    }

    #[test]
    fn three_by_three_lattice_has_one_blank_cell() {
        let trie = trie_of(&["CAT", "CAR", "TAR"]);
        let mut finder = LatticeFinder::new(&trie, &trie).unwrap();
        let mut found = Vec::new();
        finder.run(usize::MAX, &mut || false, &mut |r| found.push(r));

        assert!(!found.is_empty());
        let rect = &found[0];
        assert_eq!(rect.width, 3);
        assert_eq!(rect.height, 3);
        // Every row is reported, full width. Rows 0 and 2 are full
        // dictionary words; row 1 has real letters at columns 0 and 2 and
        // a blank at its one interior cell, column 1.
        assert_eq!(rect.rows.len(), 3);
        assert!(rect.rows[0] == b"CAT" || rect.rows[0] == b"CAR" || rect.rows[0] == b"TAR");
        assert!(rect.rows[2] == b"CAT" || rect.rows[2] == b"CAR" || rect.rows[2] == b"TAR");
        assert_eq!(rect.rows[1].len(), 3);
        assert_eq!(rect.rows[1][1], b' ');
        assert_ne!(rect.rows[1][0], b' ');
        assert_ne!(rect.rows[1][2], b' ');
    }
}
