//! Koa Trie Library
//!
//! An in-memory trie keyed by sequences of Unicode scalar values, built for
//! fast exact lookup plus three structural query families: suffix
//! enumeration under a prefix, prefix enumeration along a query, and bounded
//! Damerau-Levenshtein corrections.
//!
//! # Architecture
//!
//! The library is designed with the following principles in mind:
//! - A single owner: the trie owns every node and every stored value
//! - Lazy walkers over live state, invalidated deterministically through a
//!   mutation epoch rather than through locking
//! - Deterministic enumeration: children iterate ascending by code point
//! - Comprehensive error handling and propagation through typed errors
//!
//! The trie is single-threaded by design; wrap it in your own synchronisation
//! if it must cross threads.
//!
//! # Example
//!
//! ```
//! use koa_trie::KoaTrie;
//!
//! let mut trie = KoaTrie::new();
//! for word in ["to", "tea", "ted", "ten", "inn"] {
//!     trie.insert(word, ())?;
//! }
//!
//! // Keys under a prefix, ascending by code point.
//! let teas: Vec<String> = trie.iter_suffixes("te").collect::<Result<_, _>>()?;
//! assert_eq!(teas, ["tea", "ted", "ten"]);
//!
//! // Keys within edit distance 1 of a misspelling.
//! assert!(trie.corrections("tan", 1)?.contains("ten"));
//! # Ok::<(), koa_trie::KoaTrieError>(())
//! ```

// Re-export public modules
pub mod config;
pub mod error;
pub mod trie;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use config::KoaTrieConfig;
pub use error::{KoaTrieError, KoaTrieResult};
pub use trie::{CorrectionsWalker, KoaTrie, PrefixWalker, SuffixWalker};

/// Version information for the Koa Trie library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
