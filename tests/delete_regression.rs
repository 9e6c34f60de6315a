//! Regression tests for deletion of interior nodes.
//!
//! The letter scenario inserts A..I in order, which builds
//! `D(B(A, C), F(E, H(G, I)))`, then deletes the root D. D has two children
//! and its successor E is not D's direct right child, so the deficit lands
//! on the sentinel under F and the fixup must rotate at F.

#![expect(clippy::unwrap_used, reason = "fail fast in tests")]

mod common;

use rbtree::{RbTree, TreeError};

const LETTERS: [(&str, &str); 9] = [
    ("A", "abc"),
    ("B", "bcd"),
    ("C", "cca"),
    ("D", "dec"),
    ("E", "ewe"),
    ("F", "father"),
    ("G", "go go go"),
    ("H", "hello world"),
    ("I", "I'm Herry"),
];

fn letter_tree() -> RbTree<&'static str, &'static str> {
    let mut tree = RbTree::new();
    for (k, v) in LETTERS {
        tree.insert(k, v).unwrap();
    }
    tree
}

fn heights(tree: &RbTree<&'static str, &'static str>) -> Vec<(&'static str, usize)> {
    let mut out = Vec::new();
    tree.iterate_with_black_height(|k, _, bh| out.push((*k, bh)))
        .unwrap();
    out
}

#[test]
fn letters_before_delete() {
    common::init_tracing();
    let tree = letter_tree();

    assert_eq!(tree.check_invariants().unwrap(), 2);
    assert_eq!(
        heights(&tree),
        [
            ("A", 1),
            ("B", 2),
            ("C", 1),
            ("D", 2),
            ("E", 1),
            ("F", 2),
            ("G", 1),
            ("H", 1),
            ("I", 1)
        ]
    );
}

#[test]
fn delete_root_d_keeps_black_height() {
    common::init_tracing();
    let mut tree = letter_tree();
    let before = tree.black_height();

    assert_eq!(tree.delete("D"), Ok("dec"));

    assert_eq!(tree.black_height(), before);
    assert_eq!(tree.check_invariants().unwrap(), before);

    let keys: Vec<&str> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, ["A", "B", "C", "E", "F", "G", "H", "I"]);

    // E(B(A, C), H(F(-, G), I)) with H red
    assert_eq!(
        heights(&tree),
        [
            ("A", 1),
            ("B", 2),
            ("C", 1),
            ("E", 2),
            ("F", 1),
            ("G", 1),
            ("H", 2),
            ("I", 1)
        ]
    );
    assert_eq!(tree.find("G"), Some(&"go go go"));
    assert!(tree.find("D").is_none());
}

#[test]
fn delete_d_twice_reports_not_found() {
    let mut tree = letter_tree();

    tree.delete("D").unwrap();

    assert_eq!(tree.delete("D"), Err(TreeError::NotFound));
    assert_eq!(tree.delete(""), Err(TreeError::InvalidArgument));
    assert_eq!(tree.len(), 8);
}

#[test]
fn delete_each_letter_from_fresh_tree() {
    for (doomed, value) in LETTERS {
        let mut tree = letter_tree();

        assert_eq!(tree.remove_entry(doomed), Ok((doomed, value)));

        tree.check_invariants().unwrap();
        let keys: Vec<&str> = tree.iter().map(|(k, _)| *k).collect();
        let expected: Vec<&str> = LETTERS
            .iter()
            .map(|(k, _)| *k)
            .filter(|k| *k != doomed)
            .collect();
        assert_eq!(keys, expected, "after deleting {doomed}");
    }
}

#[test]
fn delete_letters_then_destroy() {
    let mut tree = letter_tree();

    for k in ["D", "B", "F", "A"] {
        tree.delete(k).unwrap();
        tree.check_invariants().unwrap();
    }

    assert_eq!(tree.first(), Some((&"C", &"cca")));
    assert_eq!(tree.last(), Some((&"I", &"I'm Herry")));
    assert_eq!(tree.destroy(), Ok(5));
}
