//! Koa Trie implementation.
//!
//! This module provides an in-memory trie keyed by sequences of Unicode
//! scalar values, associating each stored key with a caller-provided value.
//! Beyond exact lookup, the trie enumerates keys three ways, each lazily and
//! each validated against concurrent mutation:
//!
//! * suffixes — every stored key beneath a prefix,
//! * prefixes — every stored key that prefixes a query,
//! * corrections — every stored key within a bounded Damerau-Levenshtein
//!   edit distance of a query.

mod corrections;
mod node;
mod prefixes;
mod snapshot;
mod suffixes;

pub use corrections::CorrectionsWalker;
pub use prefixes::PrefixWalker;
pub use suffixes::SuffixWalker;

use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::config::KoaTrieConfig;
use crate::error::{KoaTrieError, KoaTrieResult};
use node::{NodeRef, TrieNode};
use snapshot::Snapshot;

/// An in-memory trie over Unicode keys.
///
/// Keys are `str` slices indexed by scalar value; values are any caller type,
/// owned by the trie one per stored key. Child edges iterate in ascending
/// code-point order, so every enumeration is deterministic.
///
/// The trie is a single-threaded structure (`!Send`); walkers hold shared
/// handles into it and are invalidated through a mutation epoch rather than
/// through locking.
///
/// # Example
///
/// ```
/// use koa_trie::KoaTrie;
///
/// let mut trie = KoaTrie::new();
/// trie.insert("tea", 1)?;
/// trie.insert("ten", 2)?;
///
/// assert_eq!(trie.get("tea")?, 1);
/// assert_eq!(trie.suffixes("te")?.len(), 2);
/// # Ok::<(), koa_trie::KoaTrieError>(())
/// ```
#[derive(Debug)]
pub struct KoaTrie<V> {
    /// The root node. Never terminal, never pruned.
    root: NodeRef<V>,

    /// Number of stored keys (terminal nodes).
    len: usize,

    /// Total number of nodes, root included.
    node_count: usize,

    /// Mutation epoch, shared with outstanding walkers. Bumped on every
    /// structural mutation; pure lookups leave it untouched.
    epoch: Rc<Cell<u64>>,

    /// Configuration options.
    config: KoaTrieConfig,
}

impl<V> KoaTrie<V> {
    /// Creates a new empty trie with default configuration.
    pub fn new() -> Self {
        Self::with_config(KoaTrieConfig::default())
    }

    /// Creates a new empty trie with the specified configuration.
    pub fn with_config(config: KoaTrieConfig) -> Self {
        Self {
            root: TrieNode::new_ref(config.branch_capacity()),
            len: 0,
            node_count: 1,
            epoch: Rc::new(Cell::new(0)),
            config,
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the trie holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of nodes, root included. An empty trie has one node.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Current mutation epoch. Monotone; every structural mutation bumps it.
    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    /// Inserts a key-value pair into the trie.
    ///
    /// Nodes are created for any missing portion of the key path. Inserting
    /// over an existing key drops the old value before installing the new
    /// one. Both outcomes count as structural mutations and invalidate
    /// outstanding walkers.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if a new key was inserted, `Ok(false)` if the key's value
    ///   was replaced.
    /// * `Err(KoaTrieError::EmptyKey)` for the empty key, which cannot be
    ///   stored because the root is never terminal.
    /// * `Err(KoaTrieError::KeyTooLong)` if the key exceeds the configured
    ///   maximum depth. Both checks run before any node is created, so a
    ///   failed insert leaves the trie untouched.
    pub fn insert<K: AsRef<str>>(&mut self, key: K, value: V) -> KoaTrieResult<bool> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(KoaTrieError::EmptyKey);
        }
        if let Some(max_depth) = self.config.max_depth() {
            if key.chars().count() > max_depth {
                return Err(KoaTrieError::KeyTooLong {
                    key: key.to_string(),
                    max_depth,
                });
            }
        }

        let branch_capacity = self.config.branch_capacity();
        let mut node = Rc::clone(&self.root);
        for ch in key.chars() {
            let (next, created) = node.borrow_mut().child_or_insert(ch, branch_capacity);
            if created {
                self.node_count += 1;
            }
            node = next;
        }

        // Release the old value before installing the new one.
        let old = node.borrow_mut().value.take();
        let is_new = old.is_none();
        drop(old);
        node.borrow_mut().value = Some(value);

        if is_new {
            self.len += 1;
        }
        self.bump_epoch();
        tracing::trace!(key, new = is_new, "insert");
        Ok(is_new)
    }

    /// Retrieves a clone of the value stored under `key`.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent, including when it is only a
    /// non-terminal waypoint of longer keys.
    pub fn get<K: AsRef<str>>(&self, key: K) -> KoaTrieResult<V>
    where
        V: Clone,
    {
        let key = key.as_ref();
        let node = self
            .descend(key)
            .ok_or_else(|| KoaTrieError::KeyNotFound(key.to_string()))?;
        let value = node.borrow().value.clone();
        value.ok_or_else(|| KoaTrieError::KeyNotFound(key.to_string()))
    }

    /// Checks whether `key` is stored in the trie.
    pub fn contains<K: AsRef<str>>(&self, key: K) -> bool {
        self.descend(key.as_ref())
            .map_or(false, |node| node.borrow().is_terminal())
    }

    /// Removes `key` and returns its value.
    ///
    /// After the terminal marker is cleared, childless non-terminal nodes are
    /// pruned from the key's endpoint back toward the root, so the tree never
    /// retains nodes that serve no remaining key. The root itself is never
    /// pruned.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent or non-terminal; the trie is left
    /// unchanged.
    pub fn remove<K: AsRef<str>>(&mut self, key: K) -> KoaTrieResult<V> {
        let key = key.as_ref();
        let mut path: Vec<(NodeRef<V>, char)> = Vec::new();
        let mut node = Rc::clone(&self.root);
        for ch in key.chars() {
            let next = node
                .borrow()
                .child(ch)
                .ok_or_else(|| KoaTrieError::KeyNotFound(key.to_string()))?;
            path.push((node, ch));
            node = next;
        }

        let value = node
            .borrow_mut()
            .value
            .take()
            .ok_or_else(|| KoaTrieError::KeyNotFound(key.to_string()))?;
        self.len -= 1;

        // Prune upward: drop every node left childless and non-terminal.
        let mut pruned = 0usize;
        let mut current = node;
        while let Some((parent, ch)) = path.pop() {
            let removable = {
                let n = current.borrow();
                !n.is_terminal() && !n.has_children()
            };
            if !removable {
                break;
            }
            parent.borrow_mut().remove_child(ch);
            self.node_count -= 1;
            pruned += 1;
            current = parent;
        }

        self.bump_epoch();
        tracing::trace!(key, pruned, "remove");
        Ok(value)
    }

    /// Removes every key, resetting the trie to its empty state.
    ///
    /// A structural mutation: outstanding walkers go stale.
    pub fn clear(&mut self) {
        self.root = TrieNode::new_ref(self.config.branch_capacity());
        self.len = 0;
        self.node_count = 1;
        self.bump_epoch();
        tracing::debug!("clear");
    }

    /// Lazily enumerates every stored key, ascending by code point.
    ///
    /// Equivalent to `iter_suffixes("")`.
    pub fn iter(&self) -> SuffixWalker<V> {
        self.iter_suffixes("")
    }

    /// Lazily enumerates every stored key beginning with `prefix`, ascending
    /// by code point. Full keys are yielded, prefix included. A prefix absent
    /// from the trie produces an empty enumeration.
    pub fn iter_suffixes<K: AsRef<str>>(&self, prefix: K) -> SuffixWalker<V> {
        self.suffix_walker(prefix.as_ref(), None)
    }

    /// Like [`iter_suffixes`](Self::iter_suffixes), but descends at most
    /// `max_depth` characters below the node the prefix resolves to.
    pub fn iter_suffixes_bounded<K: AsRef<str>>(
        &self,
        prefix: K,
        max_depth: usize,
    ) -> SuffixWalker<V> {
        self.suffix_walker(prefix.as_ref(), Some(max_depth))
    }

    /// Materialises [`iter_suffixes`](Self::iter_suffixes) into a set.
    pub fn suffixes<K: AsRef<str>>(&self, prefix: K) -> KoaTrieResult<BTreeSet<String>> {
        self.iter_suffixes(prefix).collect()
    }

    /// Materialises [`iter_suffixes_bounded`](Self::iter_suffixes_bounded)
    /// into a set.
    pub fn suffixes_bounded<K: AsRef<str>>(
        &self,
        prefix: K,
        max_depth: usize,
    ) -> KoaTrieResult<BTreeSet<String>> {
        self.iter_suffixes_bounded(prefix, max_depth).collect()
    }

    /// Lazily enumerates every stored key that is a prefix of `query`
    /// (equality included), shortest first. An empty query yields nothing.
    pub fn iter_prefixes<K: AsRef<str>>(&self, query: K) -> PrefixWalker<V> {
        PrefixWalker::new(
            self.snapshot(),
            Rc::clone(&self.root),
            query.as_ref().chars().collect(),
        )
    }

    /// Materialises [`iter_prefixes`](Self::iter_prefixes) into a set.
    pub fn prefixes<K: AsRef<str>>(&self, query: K) -> KoaTrieResult<BTreeSet<String>> {
        self.iter_prefixes(query).collect()
    }

    /// Like [`prefixes`](Self::prefixes), limited to the `max_count` shortest
    /// results.
    pub fn prefixes_bounded<K: AsRef<str>>(
        &self,
        query: K,
        max_count: usize,
    ) -> KoaTrieResult<BTreeSet<String>> {
        self.iter_prefixes(query).take(max_count).collect()
    }

    /// Lazily enumerates every stored key within Damerau-Levenshtein distance
    /// `max_distance` of `query`.
    ///
    /// The distance admits substitution, insertion, deletion, and adjacent
    /// transposition. A negative `max_distance` is clamped to zero, making
    /// the enumeration an exact-match probe.
    pub fn iter_corrections<K: AsRef<str>>(
        &self,
        query: K,
        max_distance: isize,
    ) -> CorrectionsWalker<V> {
        CorrectionsWalker::new(
            self.snapshot(),
            Rc::clone(&self.root),
            query.as_ref().chars().collect(),
            max_distance.max(0) as usize,
        )
    }

    /// Lazily enumerates every stored key, as
    /// [`iter_corrections`](Self::iter_corrections) with no query and no
    /// bound: the distance computation is disabled and the whole trie is
    /// walked.
    pub fn iter_corrections_all(&self) -> CorrectionsWalker<V> {
        CorrectionsWalker::new_unbounded(self.snapshot(), Rc::clone(&self.root))
    }

    /// Materialises [`iter_corrections`](Self::iter_corrections) into a set.
    pub fn corrections<K: AsRef<str>>(
        &self,
        query: K,
        max_distance: isize,
    ) -> KoaTrieResult<BTreeSet<String>> {
        self.iter_corrections(query, max_distance).collect()
    }

    /// Materialises [`iter_corrections_all`](Self::iter_corrections_all) into
    /// a set holding every stored key.
    pub fn corrections_all(&self) -> KoaTrieResult<BTreeSet<String>> {
        self.iter_corrections_all().collect()
    }

    /// Resolves `key` to its endpoint node, terminal or not.
    fn descend(&self, key: &str) -> Option<NodeRef<V>> {
        let mut node = Rc::clone(&self.root);
        for ch in key.chars() {
            let next = node.borrow().child(ch)?;
            node = next;
        }
        Some(node)
    }

    fn suffix_walker(&self, prefix: &str, max_depth: Option<usize>) -> SuffixWalker<V> {
        SuffixWalker::new(
            self.snapshot(),
            self.descend(prefix),
            prefix.chars().collect(),
            max_depth,
        )
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.epoch)
    }

    fn bump_epoch(&mut self) {
        self.epoch.set(self.epoch.get() + 1);
    }
}

impl<V> Default for KoaTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V> IntoIterator for &'a KoaTrie<V> {
    type Item = KoaTrieResult<String>;
    type IntoIter = SuffixWalker<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
