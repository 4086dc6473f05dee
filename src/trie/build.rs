//! Insertion and the post-insert forward-link fixup.
//!
//! Translated from `WordTrie::insertWord` and `TrixNode::readAsDictWord` /
//! `readAsDictStem` in the original implementation. Because words arrive in
//! ascending order, every newly created node is always the new *last*
//! sibling at its level, and the whole trie built so far is the "old
//! rightmost path" running from the root down to the previously inserted
//! word. Inserting a new word only ever invalidates the suffix of that old
//! path below the two words' common prefix — those are exactly the nodes
//! whose `next_stem` was `None` (nothing came after them yet) and now
//! becomes the new word's node.

use super::{NodeId, Trie};
use crate::error::WordRectError;

pub(super) fn insert(trie: &mut Trie, word: &[u8]) -> Result<(), WordRectError> {
    if word.len() != trie.word_length {
        return Err(WordRectError::WrongWordLength {
            word: word.to_vec(),
            len: word.len(),
            expected: trie.word_length,
        });
    }

    let common_prefix_len = match &trie.last_inserted {
        Some(previous) => {
            if word == previous.as_slice() {
                return Ok(()); // duplicate, no-op
            }
            if word < previous.as_slice() {
                return Err(WordRectError::OutOfOrderInsertion {
                    word: word.to_vec(),
                    previous: previous.clone(),
                });
            }
            previous
                .iter()
                .zip(word.iter())
                .take_while(|(a, b)| a == b)
                .count()
        }
        None => 0,
    };
    let prev_word_node = trie.last_word_node;

    let offset = trie.words.len() as u32;
    trie.words.extend_from_slice(word);

    let mut node = NodeId::ROOT;
    let mut path = Vec::with_capacity(word.len() + 1);
    path.push(NodeId::ROOT);

    for (depth, &byte) in word.iter().enumerate() {
        let idx = trie.char_index.index(byte);
        let child = match trie.branch_at_index(node, idx) {
            Some(existing) => existing,
            None => {
                let new_depth = (depth + 1) as u16;
                let new_node = trie.alloc_node(new_depth, node, offset);
                link_into_sibling_chain(trie, node, idx, new_node);
                new_node
            }
        };
        node = child;
        path.push(node);
    }

    // `node` is now the word-node; its stem offset must point at its own word.
    trie.nodes[node.idx()].stem = offset;

    fixup(trie, &path, node, prev_word_node, common_prefix_len);

    trie.last_inserted = Some(word.to_vec());
    trie.last_word_node = Some(node);
    trie.word_count += 1;

    Ok(())
}

// Inserts `new_node` (edge-labelled `idx` from `parent`) into parent's
// first_branch/next_branch chain. Ascending insertion order guarantees
// `idx` is always greater than every index already present, so the new
// node always becomes the new tail of the chain.
fn link_into_sibling_chain(trie: &mut Trie, parent: NodeId, idx: usize, new_node: NodeId) {
    {
        let branches = trie.nodes[parent.idx()]
            .branches
            .as_mut()
            .expect("parent of a newly created node must have a branch array");
        branches[idx] = Some(new_node);
    }

    match trie.nodes[parent.idx()].first_branch {
        None => {
            trie.nodes[parent.idx()].first_branch = Some(new_node);
        }
        Some(first) => {
            let mut tail = first;
            while let Some(next) = trie.nodes[tail.idx()].next_branch {
                tail = next;
            }
            trie.nodes[tail.idx()].next_branch = Some(new_node);
        }
    }
}

// Sets first_word and backpatches next_stem after inserting `word_node`
// along `path` (root..=word_node).
fn fixup(
    trie: &mut Trie,
    path: &[NodeId],
    word_node: NodeId,
    prev_word_node: Option<NodeId>,
    common_prefix_len: usize,
) {
    // Every node on the new path without a first_word yet (newly created,
    // or the root on the very first insertion) is getting its first word:
    // ascending insertion order means this word is the smallest in any
    // subtree it just helped create.
    for &n in path {
        if trie.nodes[n.idx()].first_word.is_none() {
            trie.nodes[n.idx()].first_word = Some(word_node);
        }
    }

    // The previous word's path, below the common prefix with this word, is
    // exactly the set of nodes whose next_stem was unresolved (None) and is
    // now resolved. Nodes at or above the common prefix still contain (or
    // lead to) this new word in their subtree, so their next_stem is
    // unaffected.
    //
    // next_stem does not point at word_node itself but at `nca`'s child
    // along the new path (the shallowest point of divergence) — callers
    // resume column validation at `next_stem.depth() - 1` (RectFinder §4.3
    // step 4), which must be the divergence depth, not the full word
    // length. `first_word()` still resolves it down to word_node.
    let Some(mut cursor) = prev_word_node else {
        return;
    };
    let child_of_nca = path[common_prefix_len + 1];
    while trie.depth(cursor) > common_prefix_len {
        trie.nodes[cursor.idx()].next_stem = Some(child_of_nca);
        cursor = trie.nodes[cursor.idx()]
            .parent
            .expect("node deeper than the common prefix is never the root");
    }
}
