//! Lock-free engine: every structural update is a single-word CAS on the
//! packed parent/rank array.
//!
//! Lock-free, not wait-free: a failed link CAS always means some other
//! thread's CAS succeeded, so the system as a whole advances even when an
//! individual operation retries.

use std::num::NonZeroUsize;
use std::sync::atomic::Ordering;

use crate::engine::Engine;
use crate::error::{UfError, check_index};
use crate::executor::run_batch;
use crate::ops::Operation;
use crate::packed::{PackedForest, TiePolicy, try_same_set_once, try_union_once};

/// Union-find where linking, rank bumps, and path compression are all CAS.
pub struct LockFreeUnionFind {
    forest: PackedForest,
}

/// Equal-rank links make the smaller root index the parent.
const TIE: TiePolicy = TiePolicy::SmallerIndexParent;

impl LockFreeUnionFind {
    /// `n` singleton sets.
    pub fn new(n: usize) -> LockFreeUnionFind {
        LockFreeUnionFind {
            forest: PackedForest::new(n),
        }
    }

    /// Walk to the root with Acquire loads, then CAS-compress the path.
    fn find_root(&self, a: usize) -> usize {
        let root = self.forest.walk_root(a, Ordering::Acquire);
        self.forest.compress_cas(a, root);
        root
    }
}

impl Engine for LockFreeUnionFind {
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
        let uf = LockFreeUnionFind::new(4);
        assert!(uf.union(0, 1).expect("in bounds"));
        assert!(!uf.union(1, 0).expect("in bounds"));
        assert!(uf.same_set(0, 1).expect("in bounds"));
        assert!(!uf.same_set(0, 2).expect("in bounds"));
    }

    #[test]
    fn equal_rank_tie_makes_smaller_index_the_parent() {
        let uf = LockFreeUnionFind::new(5);
        assert!(uf.union(3, 1).expect("in bounds"));
        assert_eq!(uf.find(3).expect("in bounds"), 1);
        assert_eq!(uf.find(1).expect("in bounds"), 1);
    }

    #[test]
    fn tie_bumps_the_retained_roots_rank() {
        let uf = LockFreeUnionFind::new(2);
        assert!(uf.union(0, 1).expect("in bounds"));
        let root = uf.find(0).expect("in bounds");
        assert_eq!(
            Slot::decode(uf.forest.load(root, Ordering::Relaxed)),
            Slot::Root(1)
        );
    }

    #[test]
    fn out_of_bounds_rejected() {
        let uf = LockFreeUnionFind::new(3);
        assert!(uf.find(3).is_err());
        assert!(uf.union(0, 8).is_err());
        assert!(uf.same_set(9, 0).is_err());
        assert_eq!(uf.count_sets(), 3);
    }

    #[test]
    fn find_compresses_the_path() {
        let uf = LockFreeUnionFind::new(4);
        uf.union(0, 1).expect("in bounds");
        uf.union(2, 3).expect("in bounds");
        uf.union(0, 2).expect("in bounds");
        let root = uf.find(3).expect("in bounds");
        assert_eq!(
            Slot::decode(uf.forest.load(3, Ordering::Relaxed)),
            Slot::Parent(root),
            "find should re-point 3 straight at the root"
        );
    }

    #[test]
    fn root_rank_stays_logarithmic() {
        const N: usize = 256;
        let uf = LockFreeUnionFind::new(N);
        let mut stride = 1;
        while stride < N {
            for i in (0..N).step_by(stride * 2) {
                uf.union(i, i + stride).expect("in bounds");
            }
            stride *= 2;
        }
        let root = uf.find(0).expect("in bounds");
        match Slot::decode(uf.forest.load(root, Ordering::Relaxed)) {
            Slot::Root(rank) => assert!(rank <= N.ilog2(), "rank {rank} too deep"),
            Slot::Parent(_) => panic!("find returned a non-root"),
        }
    }

    #[test]
    fn concurrent_cycle_collapses_to_one_set() {
        let n = 512;
        let uf = LockFreeUnionFind::new(n);
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
        assert_eq!(merges, n - 1, "exactly one cycle edge loses");
        assert_eq!(uf.count_sets(), 1);
    }

    #[test]
    fn concurrent_finds_agree_after_quiescence() {
        let n = 256;
        let uf = LockFreeUnionFind::new(n);
        for i in 0..n - 1 {
            uf.union(i, i + 1).expect("in bounds");
        }
        let expected = uf.find(0).expect("in bounds");
        thread::scope(|scope| {
            for t in 0..4 {
                let uf = &uf;
                scope.spawn(move || {
                    for i in (t..n).step_by(4) {
                        assert_eq!(uf.find(i).expect("in bounds"), expected);
                    }
                });
            }
        });
    }
}
