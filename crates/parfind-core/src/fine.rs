//! Fine-grained locking: one mutex per element, taken only on the two
//! candidate roots while a union links them.
//!
//! Reads never lock. `find` walks relaxed parent loads to a root and then
//! re-points the visited path at it with relaxed stores; those stores race
//! with concurrent unions, but every write installs an ancestor of the node,
//! so the walk-to-a-root invariant survives. A union locks its two candidate
//! roots in ascending index order, then re-verifies both roots under the
//! locks (without compression) before linking; any interference drops the
//! locks and retries from the top.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::engine::Engine;
use crate::error::{UfError, check_index};
use crate::executor::run_batch;
use crate::ops::Operation;

/// Union-find with a per-element mutex and lock-free reads.
pub struct FineUnionFind {
    parent: Vec<AtomicUsize>,
    rank: Vec<AtomicU8>,
    locks: Vec<Mutex<()>>,
}

impl FineUnionFind {
    /// `n` singleton sets.
    pub fn new(n: usize) -> FineUnionFind {
        FineUnionFind {
            parent: (0..n).map(AtomicUsize::new).collect(),
            rank: (0..n).map(|_| AtomicU8::new(0)).collect(),
            locks: (0..n).map(|_| Mutex::new(())).collect(),
        }
    }

    fn lock(&self, i: usize) -> MutexGuard<'_, ()> {
        self.locks[i].lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Walks parent links to a root without writing.
    fn walk_root(&self, mut cur: usize) -> usize {
        loop {
            let p = self.parent[cur].load(Ordering::Relaxed);
            if p == cur {
                return cur;
            }
            cur = p;
        }
    }

    /// Best-effort find: locate a root, then re-point the path at it.
    ///
    /// The second pass stops early if it runs into a live root — a stale
    /// `root` must never be written over a self-loop, or the forest would
    /// lose that root.
    fn find_compress(&self, a: usize) -> usize {
        let root = self.walk_root(a);
        let mut cur = a;
        while cur != root {
            let next = self.parent[cur].load(Ordering::Relaxed);
            if next == cur {
                break;
            }
            self.parent[cur].store(root, Ordering::Relaxed);
            cur = next;
        }
        root
    }

    /// One union attempt per loop iteration:
    /// FINDING -> LOCKING -> VERIFYING -> (RETRY | MERGING -> DONE).
    fn union_locked(&self, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        loop {
            let ra = self.find_compress(a);
            let rb = self.find_compress(b);
            if ra == rb {
                return false;
            }

            let (lo, hi) = (ra.min(rb), ra.max(rb));
            let _lo_guard = self.lock(lo);
            let _hi_guard = self.lock(hi);

            // Re-derive both roots under the locks, without compression. If
            // either candidate moved (or the two trees met) since the
            // unlocked finds, the linking decision is stale.
            let va = self.walk_root(a);
            let vb = self.walk_root(b);
            if va != ra || vb != rb || va == vb {
                continue;
            }

            let rank_a = self.rank[ra].load(Ordering::Relaxed);
            let rank_b = self.rank[rb].load(Ordering::Relaxed);
            if rank_a < rank_b {
                self.parent[ra].store(rb, Ordering::Relaxed);
            } else if rank_a > rank_b {
                self.parent[rb].store(ra, Ordering::Relaxed);
            } else {
                self.parent[rb].store(ra, Ordering::Relaxed);
                self.rank[ra].store(rank_a + 1, Ordering::Relaxed);
            }
            return true;
        }
    }
}

impl Engine for FineUnionFind {
    fn len(&self) -> usize {
        self.parent.len()
    }

    fn find(&self, a: usize) -> Result<usize, UfError> {
        check_index(a, self.len())?;
        Ok(self.find_compress(a))
    }

    fn union(&self, a: usize, b: usize) -> Result<bool, UfError> {
        check_index(a, self.len())?;
        check_index(b, self.len())?;
        Ok(self.union_locked(a, b))
    }

    /// Best-effort: reports the observation at its final root comparison; a
    /// concurrent union may invalidate a `false` immediately after return.
    fn same_set(&self, a: usize, b: usize) -> Result<bool, UfError> {
        check_index(a, self.len())?;
        check_index(b, self.len())?;
        Ok(self.find_compress(a) == self.find_compress(b))
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

    #[test]
    fn union_then_same_set() {
        let uf = FineUnionFind::new(4);
        assert!(uf.union(0, 1).expect("in bounds"));
        assert!(!uf.union(0, 1).expect("in bounds"));
        assert!(uf.same_set(0, 1).expect("in bounds"));
        assert!(!uf.same_set(0, 2).expect("in bounds"));
    }

    #[test]
    fn union_self_is_a_no_op() {
        let uf = FineUnionFind::new(2);
        assert!(!uf.union(0, 0).expect("in bounds"));
        assert_eq!(uf.count_sets(), 2);
    }

    #[test]
    fn out_of_bounds_rejected() {
        let uf = FineUnionFind::new(3);
        assert!(uf.find(3).is_err());
        assert!(uf.union(0, 3).is_err());
        assert!(uf.same_set(3, 0).is_err());
        assert_eq!(uf.count_sets(), 3);
    }

    #[test]
    fn find_compresses_the_path() {
        let uf = FineUnionFind::new(4);
        // Chain the trees so 3 sits at least two hops from the root.
        uf.union(0, 1).expect("in bounds");
        uf.union(2, 3).expect("in bounds");
        uf.union(0, 2).expect("in bounds");
        let root = uf.find(3).expect("in bounds");
        assert_eq!(
            uf.parent[3].load(Ordering::Relaxed),
            root,
            "find should re-point 3 straight at the root"
        );
    }

    #[test]
    fn concurrent_unions_form_one_set() {
        let n = 512;
        let uf = FineUnionFind::new(n);
        thread::scope(|scope| {
            for t in 0..8 {
                let uf = &uf;
                scope.spawn(move || {
                    for i in (t..n - 1).step_by(8) {
                        uf.union(i, i + 1).expect("in bounds");
                    }
                });
            }
        });
        assert_eq!(uf.count_sets(), 1);
        let root = uf.find(0).expect("in bounds");
        for i in 0..n {
            assert_eq!(uf.find(i).expect("in bounds"), root);
        }
    }

    #[test]
    fn concurrent_merge_count_is_exact() {
        // Racing unions over a cycle: exactly n - 1 of the n edges merge.
        let n = 256;
        let uf = FineUnionFind::new(n);
        let mut merges = 0usize;
        thread::scope(|scope| {
            let mut handles = Vec::new();
            for t in 0..4 {
                let uf = &uf;
                handles.push(scope.spawn(move || {
                    let mut local = 0usize;
                    for i in (t..n).step_by(4) {
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
