//! Tests for the core trie operations: insertion, lookup, removal, pruning,
//! node accounting, and value lifecycle.

use std::cell::Cell;
use std::rc::Rc;

use crate::tests::test_utils::{mixed_plane_trie, wikipedia_trie, MIXED_PLANE_KEYS};
use crate::{KoaTrie, KoaTrieConfig, KoaTrieError};

/// Value type that counts its drops through a shared counter.
#[derive(Debug)]
struct Tracked {
    drops: Rc<Cell<usize>>,
}

impl Tracked {
    fn new(drops: &Rc<Cell<usize>>) -> Self {
        Self {
            drops: Rc::clone(drops),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn test_wikipedia_trie_accounting() {
    let trie = wikipedia_trie();
    assert_eq!(trie.len(), 8);
    // root, A, t, to, te, tea, ted, ten, i, in, inn
    assert_eq!(trie.node_count(), 11);
}

#[test]
fn test_shared_prefix_nodes_are_reused() {
    let mut trie = KoaTrie::new();
    trie.insert("ten", 1).unwrap();
    assert_eq!(trie.node_count(), 4);
    trie.insert("tea", 2).unwrap();
    // Only the final character differs.
    assert_eq!(trie.node_count(), 5);
    trie.insert("te", 3).unwrap();
    // Endpoint already exists as a waypoint.
    assert_eq!(trie.node_count(), 5);
    assert_eq!(trie.len(), 3);
}

#[test]
fn test_remove_prunes_dead_branches() {
    let mut trie = wikipedia_trie();
    let before = trie.node_count();

    // "inn" ends in a leaf below the still-stored "in": one node goes.
    trie.remove("inn").unwrap();
    assert_eq!(trie.node_count(), before - 1);
    assert!(trie.contains("in"));

    // "to" shares its 't' with "tea"/"ted"/"ten": only the 'o' node goes.
    trie.remove("to").unwrap();
    assert_eq!(trie.node_count(), before - 2);
    assert!(trie.contains("tea"));

    // "A" is a whole branch of its own.
    trie.remove("A").unwrap();
    assert_eq!(trie.node_count(), before - 3);
}

#[test]
fn test_remove_keeps_terminal_waypoints() {
    let mut trie = KoaTrie::new();
    trie.insert("in", 1).unwrap();
    trie.insert("inn", 2).unwrap();

    // Removing the longer key must not prune through the stored "in".
    trie.remove("inn").unwrap();
    assert!(trie.contains("in"));
    assert_eq!(trie.node_count(), 3);

    // Removing a waypoint key keeps the chain alive for the longer key.
    let mut trie = KoaTrie::new();
    trie.insert("in", 1).unwrap();
    trie.insert("inn", 2).unwrap();
    trie.remove("in").unwrap();
    assert!(!trie.contains("in"));
    assert!(trie.contains("inn"));
    assert_eq!(trie.node_count(), 4);
}

#[test]
fn test_remove_everything_returns_to_empty_shape() {
    let mut trie = wikipedia_trie();
    for key in ["A", "to", "tea", "ted", "ten", "i", "in", "inn"] {
        trie.remove(key).unwrap();
    }
    assert_eq!(trie.len(), 0);
    assert_eq!(trie.node_count(), 1);
}

#[test]
fn test_remove_non_terminal_waypoint_fails() {
    let mut trie = wikipedia_trie();
    // "te" is a waypoint of tea/ted/ten but not itself stored.
    assert!(matches!(
        trie.remove("te"),
        Err(KoaTrieError::KeyNotFound(_))
    ));
    assert_eq!(trie.len(), 8);
    assert_eq!(trie.node_count(), 11);
}

#[test]
fn test_mixed_plane_round_trip() {
    let mut trie = KoaTrie::new();
    let ucs1 = "testing";
    let ucs2 = "testing\u{0627}";
    let ucs4 = "testing\u{10330}";

    trie.insert(ucs1, 4).unwrap();
    trie.insert(ucs2, 5).unwrap();
    trie.insert(ucs4, 6).unwrap();

    assert_eq!(trie.get(ucs1).unwrap(), 4);
    assert_eq!(trie.get(ucs2).unwrap(), 5);
    assert_eq!(trie.get(ucs4).unwrap(), 6);

    trie.remove(ucs2).unwrap();
    assert!(matches!(trie.get(ucs2), Err(KoaTrieError::KeyNotFound(_))));
    assert_eq!(trie.get(ucs1).unwrap(), 4);
    assert_eq!(trie.get(ucs4).unwrap(), 6);
}

#[test]
fn test_mixed_plane_fixture_counts() {
    let trie = mixed_plane_trie();
    assert_eq!(trie.len(), 6);
    for key in MIXED_PLANE_KEYS {
        assert!(trie.contains(key));
    }
}

#[test]
fn test_max_depth_enforced_before_mutation() {
    let mut trie = KoaTrie::with_config(KoaTrieConfig::new().with_max_depth(3));
    trie.insert("abc", 1).unwrap();

    let err = trie.insert("abcd", 2).unwrap_err();
    assert!(matches!(
        err,
        KoaTrieError::KeyTooLong { max_depth: 3, .. }
    ));
    // The failed insert created nothing.
    assert_eq!(trie.len(), 1);
    assert_eq!(trie.node_count(), 4);

    // Scalar values count, not bytes: three supplementary-plane scalars fit.
    trie.insert("\u{10330}\u{10330}\u{10330}", 3).unwrap();
}

#[test]
fn test_value_lifecycle_exactly_once() {
    let drops = Rc::new(Cell::new(0));

    let mut trie = KoaTrie::new();
    trie.insert("mo", Tracked::new(&drops)).unwrap();
    assert_eq!(drops.get(), 0);

    // Overwrite releases the old value, once.
    trie.insert("mo", Tracked::new(&drops)).unwrap();
    assert_eq!(drops.get(), 1);

    // Removal hands the value back; it dies with the binding.
    let removed = trie.remove("mo").unwrap();
    assert_eq!(drops.get(), 1);
    drop(removed);
    assert_eq!(drops.get(), 2);
}

#[test]
fn test_trie_drop_releases_every_value() {
    let drops = Rc::new(Cell::new(0));
    {
        let mut trie = KoaTrie::new();
        trie.insert("a", Tracked::new(&drops)).unwrap();
        trie.insert("ab", Tracked::new(&drops)).unwrap();
        trie.insert("ba", Tracked::new(&drops)).unwrap();
        assert_eq!(drops.get(), 0);
    }
    assert_eq!(drops.get(), 3);
}

#[test]
fn test_clear_releases_every_value() {
    let drops = Rc::new(Cell::new(0));
    let mut trie = KoaTrie::new();
    trie.insert("a", Tracked::new(&drops)).unwrap();
    trie.insert("b", Tracked::new(&drops)).unwrap();

    trie.clear();
    assert_eq!(drops.get(), 2);
    assert_eq!(trie.node_count(), 1);
}

#[test]
fn test_get_requires_exact_terminal() {
    let trie = wikipedia_trie();
    assert!(matches!(trie.get("te"), Err(KoaTrieError::KeyNotFound(_))));
    assert!(matches!(trie.get("tex"), Err(KoaTrieError::KeyNotFound(_))));
    assert_eq!(trie.get("ted").unwrap(), 1);
}
