//! Depth-first word-rectangle search driving one row-trie and one
//! column-trie using only forward-link dereferences.

use crate::trie::{NodeId, Trie};

/// Returned by [`RectFinder::run`] and the internal row recursion: a signed
/// area. Positive means the caller's quota was fully met; zero means the
/// search space was exhausted; negative means the search was aborted
/// because its target area no longer exceeds the shared watermark.
pub const ABORT_SENTINEL: i64 = -1;

/// A `width × height` grid whose rows and columns are both dictionary
/// words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangle {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<u8>>,
    pub is_symmetric_square: bool,
}

/// Depth-first search over a row-trie (word length `width`) and a
/// column-trie (word length `height`). Owns its own per-worker state; no
/// locking is needed since the tries it borrows are immutable once built.
pub struct RectFinder<'a> {
    row_trie: &'a Trie,
    col_trie: &'a Trie,
    width: usize,
    height: usize,
    // row_nodes[r][c + 1]: row-trie node after matching columns 0..=c of row r.
    // Index 0 aliases the row-trie root (c == -1).
    row_nodes: Vec<Vec<NodeId>>,
    // col_nodes[c][r + 1]: column-trie node after matching rows 0..=r of column c.
    // Index 0 aliases the column-trie root (r == -1).
    col_nodes: Vec<Vec<NodeId>>,
    rects_found: usize,
    symmetric_squares_found: usize,
}

impl<'a> RectFinder<'a> {
    pub fn new(row_trie: &'a Trie, col_trie: &'a Trie) -> Self {
        let width = row_trie.word_length();
        let height = col_trie.word_length();
        let row_root = row_trie.root();
        let col_root = col_trie.root();

        RectFinder {
            row_trie,
            col_trie,
            width,
            height,
            row_nodes: vec![vec![row_root; width + 1]; height.max(1)],
            col_nodes: vec![vec![col_root; height + 1]; width.max(1)],
            rects_found: 0,
            symmetric_squares_found: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rects_found(&self) -> usize {
        self.rects_found
    }

    pub fn symmetric_squares_found(&self) -> usize {
        self.symmetric_squares_found
    }

    /// Emits up to `quota` rectangles via `emit`, polling `should_abort` at
    /// every row-placement entry except the first. Returns the signed-area
    /// sentinel described on [`ABORT_SENTINEL`].
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
        if r >= 1 && should_abort() {
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

            let advance_col = match failure_col {
                Some(c) => c,
                None if r == self.height - 1 => {
                    self.rects_found += 1;

                    let symmetric = self.width == self.height
                        && std::ptr::eq(self.row_trie, self.col_trie)
                        && (0..self.width).all(|i| {
                            self.row_nodes[i][self.width] == self.col_nodes[i][self.width]
                        });
                    if symmetric {
                        self.symmetric_squares_found += 1;
                    }

                    let rows = (0..self.height)
                        .map(|rr| {
                            if rr == r {
                                word.clone()
                            } else {
                                self.row_trie.stem(self.row_nodes[rr][self.width]).to_vec()
                            }
                        })
                        .collect();

                    emit(Rectangle {
                        width: self.width,
                        height: self.height,
                        rows,
                        is_symmetric_square: symmetric,
                    });

                    if self.rects_found >= quota {
                        return (self.width * self.height) as i64;
                    }
                    self.width - 1
                }
                None => {
                    let sub = self.search_row(r + 1, quota, should_abort, emit);
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

    fn run_all(row_trie: &Trie, col_trie: &Trie) -> Vec<Rectangle> {
        let mut finder = RectFinder::new(row_trie, col_trie);
        let mut found = Vec::new();
        finder.run(usize::MAX, &mut || false, &mut |r| found.push(r));
        found
    }

    #[test]
    fn four_by_four_word_square() {
        let row_trie = trie_of(&["AAHS", "ABET", "ABUT", "LUBE", "PALS", "STEW"]);
        let col_trie = trie_of(&["AALS", "ABUE", "HEBE", "SETW"]);
        let found = run_all(&row_trie, &col_trie);

        assert_eq!(found.len(), 1);
        let rect = &found[0];
        assert_eq!(
            rect.rows,
            vec![
                b"AAHS".to_vec(),
                b"ABET".to_vec(),
                b"LUBE".to_vec(),
                b"STEW".to_vec(),
            ]
        );
    }

    #[test]
    fn asymmetric_five_by_four() {
        let row_trie = trie_of(&["AAHED", "ABODE", "LUNGE", "STEEP"]);
        let col_trie = trie_of(&["AALS", "ABUT", "HONE", "EDGE", "DEEP"]);
        let found = run_all(&row_trie, &col_trie);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].width, 5);
        assert_eq!(found[0].height, 4);
    }

    #[test]
    fn no_rectangle_exists() {
        let row_trie = trie_of(&["AB", "CD"]);
        let col_trie = trie_of(&["AB", "CD"]);
        let found = run_all(&row_trie, &col_trie);
        assert!(found.is_empty());
    }

    #[test]
    fn single_letter_words_are_trivial_one_by_one_rectangles() {
        let row_trie = trie_of(&["A", "B", "C"]);
        let col_trie = trie_of(&["A", "B", "C"]);
        let found = run_all(&row_trie, &col_trie);
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|r| r.width == 1 && r.height == 1));
    }

    #[test]
    fn deterministic_order_picks_lexicographically_smallest_first() {
        // BAT/DOG and CAT/DOG are both consistent with the column words, so
        // the search must visit row candidates in ascending order and
        // report the lexicographically smallest row sequence first.
        let row_trie = trie_of(&["BAT", "CAT", "DOG"]);
        let col_trie = trie_of(&["BD", "CD", "AO", "TG"]);
        let mut finder = RectFinder::new(&row_trie, &col_trie);
        let mut found = Vec::new();
        finder.run(1, &mut || false, &mut |r| found.push(r));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rows[0], b"BAT");
    }
}
