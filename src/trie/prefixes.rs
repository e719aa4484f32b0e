//! Lazy enumeration of stored keys that prefix a query.

use super::node::NodeRef;
use super::snapshot::{Snapshot, WalkerState};
use crate::error::KoaTrieResult;

/// Lazy walker over every stored key that is a prefix of a query (equality
/// included), in order of increasing length.
///
/// Created by [`KoaTrie::iter_prefixes`](super::KoaTrie::iter_prefixes).
/// Descends the query one character at a time and yields at every terminal
/// node it passes through; stops at the first missing child. An empty query
/// yields nothing, since the root is never terminal.
///
/// Same epoch protocol as [`SuffixWalker`](super::SuffixWalker): any
/// structural mutation after creation turns the walker permanently stale.
#[derive(Debug)]
pub struct PrefixWalker<V> {
    snapshot: Snapshot,
    state: WalkerState,
    node: NodeRef<V>,
    query: Vec<char>,
    /// Number of query characters consumed so far.
    pos: usize,
}

impl<V> PrefixWalker<V> {
    pub(crate) fn new(snapshot: Snapshot, root: NodeRef<V>, query: Vec<char>) -> Self {
        Self {
            snapshot,
            state: WalkerState::Active,
            node: root,
            query,
            pos: 0,
        }
    }
}

impl<V> Iterator for PrefixWalker<V> {
    type Item = KoaTrieResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            WalkerState::Exhausted => return None,
            WalkerState::Stale => return Some(Err(self.snapshot.stale_error())),
            WalkerState::Active => {}
        }
        if let Err(err) = self.snapshot.validate() {
            tracing::debug!(?err, "prefix walker invalidated");
            self.state = WalkerState::Stale;
            return Some(Err(err));
        }

        while self.pos < self.query.len() {
            let ch = self.query[self.pos];
            let child = self.node.borrow().child(ch);
            match child {
                Some(next) => {
                    self.pos += 1;
                    self.node = next;
                    if self.node.borrow().is_terminal() {
                        return Some(Ok(self.query[..self.pos].iter().collect()));
                    }
                }
                None => break,
            }
        }

        self.state = WalkerState::Exhausted;
        None
    }
}
