//! Lazy depth-first enumeration of stored keys under a prefix.

use super::node::NodeRef;
use super::snapshot::{Snapshot, WalkerState};
use crate::error::KoaTrieResult;

/// One DFS frame: a node, the next child slot to descend into, and the
/// character that led here (absent for the start node).
#[derive(Debug)]
struct Frame<V> {
    node: NodeRef<V>,
    next_child: usize,
    visited: bool,
    ch: Option<char>,
}

impl<V> Frame<V> {
    fn new(node: NodeRef<V>, ch: Option<char>) -> Self {
        Self {
            node,
            next_child: 0,
            visited: false,
            ch,
        }
    }
}

/// Lazy walker over every stored key beginning with a prefix.
///
/// Keys are yielded in ascending code-point order, as full keys including the
/// prefix. Created by [`KoaTrie::iter_suffixes`](super::KoaTrie::iter_suffixes)
/// and [`KoaTrie::iter_suffixes_bounded`](super::KoaTrie::iter_suffixes_bounded).
///
/// The walker validates the trie's mutation epoch on every step; any
/// structural mutation after creation makes this and every later step yield
/// `Err(StaleWalker)`. A walker that ran to completion stays exhausted.
#[derive(Debug)]
pub struct SuffixWalker<V> {
    snapshot: Snapshot,
    state: WalkerState,
    stack: Vec<Frame<V>>,
    /// Full key spelled by the current DFS position, prefix included.
    path: Vec<char>,
    /// Maximum descent below the start node, if bounded.
    max_depth: Option<usize>,
}

impl<V> SuffixWalker<V> {
    /// Builds a walker rooted at `start` (the node the prefix resolved to).
    ///
    /// `start` is `None` when the prefix is absent from the trie; such a
    /// walker is born exhausted and yields an empty sequence.
    pub(crate) fn new(
        snapshot: Snapshot,
        start: Option<NodeRef<V>>,
        prefix: Vec<char>,
        max_depth: Option<usize>,
    ) -> Self {
        let (stack, state) = match start {
            Some(node) => (vec![Frame::new(node, None)], WalkerState::Active),
            None => (Vec::new(), WalkerState::Exhausted),
        };
        Self {
            snapshot,
            state,
            stack,
            path: prefix,
            max_depth,
        }
    }
}

impl<V> Iterator for SuffixWalker<V> {
    type Item = KoaTrieResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            WalkerState::Exhausted => return None,
            WalkerState::Stale => return Some(Err(self.snapshot.stale_error())),
            WalkerState::Active => {}
        }
        if let Err(err) = self.snapshot.validate() {
            tracing::debug!(?err, "suffix walker invalidated");
            self.state = WalkerState::Stale;
            return Some(Err(err));
        }

        while let Some(top_idx) = self.stack.len().checked_sub(1) {
            // Yield each terminal node once, on first entry.
            let top = &mut self.stack[top_idx];
            if !top.visited {
                top.visited = true;
                if top.node.borrow().is_terminal() {
                    return Some(Ok(self.path.iter().collect()));
                }
            }

            // top_idx doubles as the depth below the start node.
            let descend = self.max_depth.map_or(true, |limit| top_idx < limit);
            let child = if descend {
                let top = &self.stack[top_idx];
                let next = top.next_child;
                top.node.borrow().child_at(next)
            } else {
                None
            };

            match child {
                Some((ch, node)) => {
                    self.stack[top_idx].next_child += 1;
                    self.path.push(ch);
                    self.stack.push(Frame::new(node, Some(ch)));
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
