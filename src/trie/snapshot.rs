//! Mutation-epoch tracking for walker invalidation.
//!
//! Every walker captures the trie's epoch at construction. Each step
//! re-reads the live epoch through a shared counter cell; any structural
//! mutation in between bumps the counter and permanently invalidates the
//! walker. The epoch is the sole coordination primitive between the trie and
//! its walkers.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{KoaTrieError, KoaTrieResult};

/// Epoch captured by a walker at construction time.
#[derive(Debug)]
pub(crate) struct Snapshot {
    /// The trie's live epoch counter, shared with the owning trie.
    epoch: Rc<Cell<u64>>,

    /// The epoch value observed when the walker was created.
    observed: u64,
}

impl Snapshot {
    /// Captures the current epoch.
    pub(crate) fn capture(epoch: &Rc<Cell<u64>>) -> Self {
        Self {
            epoch: Rc::clone(epoch),
            observed: epoch.get(),
        }
    }

    /// Checks that the trie has not mutated since capture.
    pub(crate) fn validate(&self) -> KoaTrieResult<()> {
        if self.epoch.get() == self.observed {
            Ok(())
        } else {
            Err(self.stale_error())
        }
    }

    /// Builds the error reported for a stale walker.
    ///
    /// The epoch counter is monotone, so once a walker has gone stale every
    /// later call reconstructs an equivalent error.
    pub(crate) fn stale_error(&self) -> KoaTrieError {
        KoaTrieError::StaleWalker {
            observed: self.observed,
            current: self.epoch.get(),
        }
    }
}

/// Lifecycle of a walker.
///
/// `Active` walkers traverse and yield. A structural mutation moves a walker
/// to `Stale`, where every subsequent step fails. A walker whose traversal
/// completed is `Exhausted` and yields nothing forever, even if the trie
/// mutates afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkerState {
    Active,
    Stale,
    Exhausted,
}
