//! Benchmarks for `RbTree` using Divan.
//!
//! Run with: `cargo bench --bench tree`

use divan::{Bencher, black_box};
use rbtree::RbTree;
use std::collections::BTreeMap;

fn main() {
    divan::main();
}

const SIZES: [u64; 4] = [16, 256, 4096, 65536];

fn ascending(n: u64) -> RbTree<u64, u64> {
    let mut tree = RbTree::with_capacity(usize::try_from(n).unwrap_or(0));
    for i in 0..n {
        let _ = tree.insert(i, i);
    }
    tree
}

/// Multiplicative scramble so inserts arrive in no particular order.
const fn scrambled(i: u64) -> u64 {
    i.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

// =============================================================================
// Construction
// =============================================================================

#[divan::bench_group]
mod construction {
    use super::RbTree;

    #[divan::bench]
    fn new_tree() -> RbTree<u64, u64> {
        RbTree::new()
    }

    #[divan::bench]
    fn with_capacity_1024() -> RbTree<u64, u64> {
        RbTree::with_capacity(1024)
    }
}

// =============================================================================
// Insert
// =============================================================================

#[divan::bench_group]
mod insert {
    use super::{BTreeMap, Bencher, RbTree, SIZES, black_box, scrambled};

    #[divan::bench(args = SIZES)]
    fn sequential(bencher: Bencher, n: u64) {
        bencher.bench_local(|| {
            let mut tree = RbTree::new();
            for i in 0..n {
                let _ = tree.insert(black_box(i), i);
            }
            tree
        });
    }

    #[divan::bench(args = SIZES)]
    fn random(bencher: Bencher, n: u64) {
        bencher.bench_local(|| {
            let mut tree = RbTree::new();
            for i in 0..n {
                let _ = tree.insert(black_box(scrambled(i)), i);
            }
            tree
        });
    }

    /// Baseline for `random`.
    #[divan::bench(args = SIZES)]
    fn random_btreemap(bencher: Bencher, n: u64) {
        bencher.bench_local(|| {
            let mut map = BTreeMap::new();
            for i in 0..n {
                map.insert(black_box(scrambled(i)), i);
            }
            map
        });
    }

    #[divan::bench]
    fn duplicate_rejected(bencher: Bencher) {
        let mut tree = super::ascending(1024);
        bencher.bench_local(|| tree.insert(black_box(512), 0));
    }
}

// =============================================================================
// Find
// =============================================================================

#[divan::bench_group]
mod find {
    use super::{Bencher, SIZES, ascending, black_box};

    #[divan::bench(args = SIZES)]
    fn hit(bencher: Bencher, n: u64) {
        let tree = ascending(n);
        let mut i = 0;
        bencher.bench_local(|| {
            i = (i + 7) % n;
            black_box(tree.find(black_box(&i)))
        });
    }

    #[divan::bench(args = SIZES)]
    fn miss(bencher: Bencher, n: u64) {
        let tree = ascending(n);
        bencher.bench_local(|| black_box(tree.find(black_box(&n))));
    }
}

// =============================================================================
// Delete
// =============================================================================

#[divan::bench_group]
mod delete {
    use super::{Bencher, SIZES, ascending, black_box};

    #[divan::bench(args = SIZES)]
    fn all_ascending(bencher: Bencher, n: u64) {
        bencher
            .with_inputs(|| ascending(n))
            .bench_local_values(|mut tree| {
                for i in 0..n {
                    let _ = tree.delete(black_box(&i));
                }
                tree
            });
    }

    #[divan::bench(args = SIZES)]
    fn churn_one(bencher: Bencher, n: u64) {
        let mut tree = ascending(n);
        let key = n / 2;
        bencher.bench_local(|| {
            let value = tree.delete(black_box(&key));
            let _ = tree.insert(key, key);
            value
        });
    }
}

// =============================================================================
// Traversal and teardown
// =============================================================================

#[divan::bench_group]
mod traverse {
    use super::{Bencher, SIZES, ascending, black_box};

    #[divan::bench(args = SIZES)]
    fn iter_sum(bencher: Bencher, n: u64) {
        let tree = ascending(n);
        bencher.bench_local(|| tree.iter().map(|(_, v)| *v).sum::<u64>());
    }

    #[divan::bench(args = SIZES)]
    fn iterate_with_black_height(bencher: Bencher, n: u64) {
        let tree = ascending(n);
        bencher.bench_local(|| {
            let mut acc = 0_usize;
            let _ = tree.iterate_with_black_height(|_, _, bh| acc += bh);
            black_box(acc)
        });
    }

    #[divan::bench(args = SIZES)]
    fn clear(bencher: Bencher, n: u64) {
        bencher
            .with_inputs(|| ascending(n))
            .bench_local_values(|mut tree| {
                let _ = tree.clear();
                tree
            });
    }
}
