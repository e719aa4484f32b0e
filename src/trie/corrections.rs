//! Lazy bounded Damerau-Levenshtein enumeration.
//!
//! The walker interleaves a depth-first trie traversal with the
//! Damerau-Levenshtein row recursion. Every DFS frame carries the edit
//! distance row between the path spelled so far and each prefix of the query;
//! the parent frame's row is the previous row, the grandparent's enables the
//! adjacent-transposition candidate. A subtree is pruned as soon as its row
//! minimum exceeds the distance bound, since the row minimum is a lower bound
//! for every key below the node.

use super::node::NodeRef;
use super::snapshot::{Snapshot, WalkerState};
use crate::error::KoaTrieResult;

/// One DFS frame plus its edit-distance row.
#[derive(Debug)]
struct Frame<V> {
    node: NodeRef<V>,
    next_child: usize,
    visited: bool,
    /// Character that led to this node; absent for the root frame.
    ch: Option<char>,
    /// Edit distance between the path ending here and each query prefix.
    /// Empty in unbounded mode.
    row: Vec<usize>,
    /// Whether descent below this node is cut off by the distance bound.
    prune: bool,
}

/// Lazy walker over every stored key within a bounded Damerau-Levenshtein
/// distance of a query.
///
/// Created by [`KoaTrie::iter_corrections`](super::KoaTrie::iter_corrections)
/// and [`KoaTrie::iter_corrections_all`](super::KoaTrie::iter_corrections_all).
/// The edit distance admits substitution, insertion, deletion, and adjacent
/// transposition. In the unbounded form (no query) the distance computation is
/// disabled entirely and every stored key is yielded.
///
/// Keys are produced in ascending code-point DFS order, though callers should
/// treat the result as an unordered set.
///
/// Same epoch protocol as [`SuffixWalker`](super::SuffixWalker): any
/// structural mutation after creation turns the walker permanently stale.
#[derive(Debug)]
pub struct CorrectionsWalker<V> {
    snapshot: Snapshot,
    state: WalkerState,
    query: Vec<char>,
    max_distance: usize,
    /// `false` for the no-query mode that yields every stored key.
    bounded: bool,
    stack: Vec<Frame<V>>,
    path: Vec<char>,
}

impl<V> CorrectionsWalker<V> {
    /// Builds a bounded walker matching `query` within `max_distance`.
    pub(crate) fn new(
        snapshot: Snapshot,
        root: NodeRef<V>,
        query: Vec<char>,
        max_distance: usize,
    ) -> Self {
        // Depth 0: the empty path is j insertions away from query[..j].
        let row: Vec<usize> = (0..=query.len()).collect();
        Self {
            snapshot,
            state: WalkerState::Active,
            query,
            max_distance,
            bounded: true,
            stack: vec![Frame {
                node: root,
                next_child: 0,
                visited: false,
                ch: None,
                row,
                prune: false,
            }],
            path: Vec::new(),
        }
    }

    /// Builds the unbounded walker that yields every stored key.
    pub(crate) fn new_unbounded(snapshot: Snapshot, root: NodeRef<V>) -> Self {
        Self {
            snapshot,
            state: WalkerState::Active,
            query: Vec::new(),
            max_distance: 0,
            bounded: false,
            stack: vec![Frame {
                node: root,
                next_child: 0,
                visited: false,
                ch: None,
                row: Vec::new(),
                prune: false,
            }],
            path: Vec::new(),
        }
    }

    /// Computes the edit-distance row for the child reached by `ch` from the
    /// top frame, and whether descent below it is pruned.
    fn child_row(&self, ch: char) -> (Vec<usize>, bool) {
        let qlen = self.query.len();
        let depth = self.stack.len();
        let parent = &self.stack[depth - 1];
        let prev_row = &parent.row;

        let mut row = vec![0usize; qlen + 1];
        row[0] = depth;
        for j in 1..=qlen {
            let cost = usize::from(ch != self.query[j - 1]);
            let mut best = prev_row[j - 1] + cost; // substitution
            best = best.min(row[j - 1] + 1); // insertion into the path
            best = best.min(prev_row[j] + 1); // deletion from the path
            if depth >= 2
                && j >= 2
                && ch == self.query[j - 2]
                && parent.ch == Some(self.query[j - 1])
            {
                // Swap of the last two path characters against query[j-2..j].
                let grand_row = &self.stack[depth - 2].row;
                best = best.min(grand_row[j - 2] + 1);
            }
            row[j] = best;
        }

        let minimum = row.iter().fold(usize::MAX, |acc, &d| acc.min(d));
        (row, minimum > self.max_distance)
    }
}

impl<V> Iterator for CorrectionsWalker<V> {
    type Item = KoaTrieResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            WalkerState::Exhausted => return None,
            WalkerState::Stale => return Some(Err(self.snapshot.stale_error())),
            WalkerState::Active => {}
        }
        if let Err(err) = self.snapshot.validate() {
            tracing::debug!(?err, "corrections walker invalidated");
            self.state = WalkerState::Stale;
            return Some(Err(err));
        }

        let qlen = self.query.len();
        while let Some(top_idx) = self.stack.len().checked_sub(1) {
            let top = &mut self.stack[top_idx];
            if !top.visited {
                top.visited = true;
                let within = !self.bounded || top.row[qlen] <= self.max_distance;
                if within && top.node.borrow().is_terminal() {
                    return Some(Ok(self.path.iter().collect()));
                }
            }

            let top = &self.stack[top_idx];
            let child = if self.bounded && top.prune {
                None
            } else {
                let next = top.next_child;
                top.node.borrow().child_at(next)
            };

            match child {
                Some((ch, node)) => {
                    let (row, prune) = if self.bounded {
                        self.child_row(ch)
                    } else {
                        (Vec::new(), false)
                    };
                    self.stack[top_idx].next_child += 1;
                    self.path.push(ch);
                    self.stack.push(Frame {
                        node,
                        next_child: 0,
                        visited: false,
                        ch: Some(ch),
                        row,
                        prune,
                    });
                }
                None => {
                    if let Some(frame) = self.stack.pop() {
                        if frame.ch.is_some() {
                            self.path.pop();
                        }
                    }
                }
            }
        }

        self.state = WalkerState::Exhausted;
        None
    }
}
