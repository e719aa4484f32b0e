//! Error types for the Koa Trie.
//!
//! This module defines the error enum surfaced by every fallible trie
//! operation, following Rust's idiomatic error handling patterns with explicit
//! error types and proper error propagation.

use thiserror::Error;

/// Result type alias used throughout the Koa Trie.
pub type KoaTrieResult<T> = Result<T, KoaTrieError>;

/// Errors that can occur in Koa Trie operations.
#[derive(Debug, Error)]
pub enum KoaTrieError {
    /// Error when an empty key is passed to `insert`.
    ///
    /// The root node can never be terminal, so the empty key cannot be
    /// stored.
    #[error("Empty key not allowed")]
    EmptyKey,

    /// Error when a key exceeds the configured maximum depth.
    #[error("Key '{key}' exceeds maximum trie depth of {max_depth}")]
    KeyTooLong {
        /// The key that was too long.
        key: String,
        /// The maximum allowed depth.
        max_depth: usize,
    },

    /// Error when a key is absent on `get` or `remove`.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Error when a walker observes a trie that has mutated since the walker
    /// was created. The walker stays stale permanently.
    #[error("Walker invalidated: trie mutated since epoch {observed} (now {current})")]
    StaleWalker {
        /// The epoch captured when the walker was created.
        observed: u64,
        /// The trie's epoch at the failed step.
        current: u64,
    },
}
