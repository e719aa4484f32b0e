//! Test modules for the Koa Trie.
//!
//! This module contains the testing infrastructure:
//! - Unit tests for the trie and each walker family
//! - Property-based tests using proptest
//! - Test fixtures and utilities, including the reference
//!   Damerau-Levenshtein implementations used as oracles
//!
//! Small structural tests also live in `#[cfg(test)]` blocks next to the
//! code they exercise; the suites here cover cross-module behaviour.

pub mod trie_tests;
