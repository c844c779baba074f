//! Lock-free engine with plain-store path compression.
//!
//! Identical to [`crate::lockfree`] except that `find` compresses with
//! relaxed plain stores instead of CAS, dropping a serializing barrier from
//! the hot read path. The trade is losing the ability to notice a racing
//! update and re-try the write — acceptable because no invariant depends on
//! compression succeeding: a compression store only ever installs an
//! ancestor of the node. The linking CASes in `union` are unchanged.

use std::num::NonZeroUsize;
use std::sync::atomic::Ordering;

use crate::engine::Engine;
use crate::error::{UfError, check_index};
use crate::executor::run_batch;
use crate::ops::Operation;
use crate::packed::{PackedForest, TiePolicy, try_same_set_once, try_union_once};

/// Union-find with CAS linking and plain-store compression.
pub struct PlainWriteUnionFind {
    forest: PackedForest,
}

/// Equal-rank links make the smaller root index the parent, as in the CAS
/// engine.
const TIE: TiePolicy = TiePolicy::SmallerIndexParent;

impl PlainWriteUnionFind {
    /// `n` singleton sets.
    pub fn new(n: usize) -> PlainWriteUnionFind {
        PlainWriteUnionFind {
            forest: PackedForest::new(n),
        }
    }

    fn find_root(&self, a: usize) -> usize {
        let root = self.forest.walk_root(a, Ordering::Relaxed);
        self.forest.compress_store(a, root);
        root
    }
}

impl Engine for PlainWriteUnionFind {
    fn len(&self) -> usize {
        self.forest.len()
    }

    fn find(&self, a: usize) -> Result<usize, UfError> {
        check_index(a, self.len())?;
        Ok(self.find_root(a))
    }

    fn union(&self, a: usize, b: usize) -> Result<bool, UfError> {
        check_index(a, self.len())?;
        check_index(b, self.len())?;
        loop {
            if let Some(merged) = try_union_once(&self.forest, |u| self.find_root(u), TIE, a, b) {
                return Ok(merged);
            }
        }
    }

    fn same_set(&self, a: usize, b: usize) -> Result<bool, UfError> {
        check_index(a, self.len())?;
        check_index(b, self.len())?;
        loop {
            if let Some(same) = try_same_set_once(&self.forest, |u| self.find_root(u), a, b) {
                return Ok(same);
            }
        }
    }

    fn process(&self, ops: &[Operation], out: &mut Vec<i64>, threads: NonZeroUsize) {
        run_batch(self, ops, out, threads);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::thread;

    use super::*;
    use crate::packed::Slot;

    #[test]
    fn union_then_same_set() {
        let uf = PlainWriteUnionFind::new(4);
        assert!(uf.union(0, 1).expect("in bounds"));
        assert!(!uf.union(1, 0).expect("in bounds"));
        assert!(uf.same_set(0, 1).expect("in bounds"));
        assert!(!uf.same_set(0, 2).expect("in bounds"));
    }

    #[test]
    fn equal_rank_tie_makes_smaller_index_the_parent() {
        let uf = PlainWriteUnionFind::new(5);
        assert!(uf.union(4, 2).expect("in bounds"));
        assert_eq!(uf.find(4).expect("in bounds"), 2);
    }

    #[test]
    fn plain_store_compression_flattens_the_path() {
        let uf = PlainWriteUnionFind::new(4);
        uf.union(0, 1).expect("in bounds");
        uf.union(2, 3).expect("in bounds");
        uf.union(0, 2).expect("in bounds");
        let root = uf.find(3).expect("in bounds");
        assert_eq!(
            Slot::decode(uf.forest.load(3, Ordering::Relaxed)),
            Slot::Parent(root)
        );
    }

    #[test]
    fn out_of_bounds_rejected() {
        let uf = PlainWriteUnionFind::new(2);
        assert!(uf.find(2).is_err());
        assert!(uf.union(0, 2).is_err());
        assert_eq!(uf.count_sets(), 2);
    }

    #[test]
    fn concurrent_cycle_collapses_to_one_set() {
        let n = 512;
        let uf = PlainWriteUnionFind::new(n);
        let mut merges = 0usize;
        thread::scope(|scope| {
            let mut handles = Vec::new();
            for t in 0..8 {
                let uf = &uf;
                handles.push(scope.spawn(move || {
                    let mut local = 0usize;
                    for i in (t..n).step_by(8) {
                        if uf.union(i, (i + 1) % n).expect("in bounds") {
                            local += 1;
                        }
                    }
                    local
                }));
            }
            for handle in handles {
                merges += handle.join().expect("worker panicked");
            }
        });
        assert_eq!(merges, n - 1);
        assert_eq!(uf.count_sets(), 1);
    }
}
