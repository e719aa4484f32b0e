//! Configuration for the Koa Trie.

use serde::{Deserialize, Serialize};

/// Configuration options for the Koa Trie.
///
/// The defaults impose no limits; every option exists for callers that need
/// to bound resource usage or tune allocation behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KoaTrieConfig {
    /// Maximum key length in Unicode scalar values. Inserting a longer key
    /// fails with `KeyTooLong`. `None` means unbounded.
    max_depth: Option<usize>,

    /// Initial capacity reserved for each new node's child vector. Most nodes
    /// in realistic corpora hold four or fewer children; the default of zero
    /// defers allocation until the first child is attached.
    branch_capacity: usize,
}

impl KoaTrieConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - max_depth: None (unbounded)
    /// - branch_capacity: 0 (allocate on first child)
    pub fn new() -> Self {
        Self {
            max_depth: None,
            branch_capacity: 0,
        }
    }

    /// Set the maximum key length in Unicode scalar values.
    ///
    /// Keys longer than this are rejected at insert time. Use this to guard
    /// against unbounded input when keys come from untrusted sources.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        if max_depth == 0 {
            panic!("Maximum depth must be greater than 0");
        }
        self.max_depth = Some(max_depth);
        self
    }

    /// Set the initial capacity reserved for each new node's child vector.
    pub fn with_branch_capacity(mut self, branch_capacity: usize) -> Self {
        self.branch_capacity = branch_capacity;
        self
    }

    /// Get the maximum key length, if one is configured.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Get the initial child-vector capacity for new nodes.
    pub fn branch_capacity(&self) -> usize {
        self.branch_capacity
    }
}

impl Default for KoaTrieConfig {
    fn default() -> Self {
        Self::new()
    }
}
